// meridian-service/src/routes/timeline_routes.rs
use crate::models::{ServiceError, TimelineView};
use crate::routes::AppState;
use crate::services::{map_service, timeline_service};
use actix_web::{get, web, HttpResponse};
use log::info;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct TimelineQuery {
    pub view: Option<TimelineView>,
    pub viewer_tz: Option<String>,
    pub at: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct MapQuery {
    pub at: Option<String>,
}

// Teammate cards, by hierarchy or grouped by timezone region
#[get("/timeline")]
async fn get_timeline(
    state: web::Data<AppState>,
    query: web::Query<TimelineQuery>,
) -> Result<HttpResponse, ServiceError> {
    let now = state.now(query.at.as_deref())?;
    let viewer = state.viewer(query.viewer_tz.as_deref())?;
    let view = query.view.unwrap_or_default();

    info!("🕒 Building {:?} timeline for viewer {}", view, viewer.zone.name());

    let roster = state.read_roster()?;
    let timeline = timeline_service::build_timeline(roster.teammates(), view, &viewer.zone, now);

    Ok(HttpResponse::Ok().json(timeline))
}

// World map pins
#[get("/map")]
async fn get_map(
    state: web::Data<AppState>,
    query: web::Query<MapQuery>,
) -> Result<HttpResponse, ServiceError> {
    let now = state.now(query.at.as_deref())?;
    let roster = state.read_roster()?;
    let markers = map_service::map_markers(roster.teammates(), now);

    info!("🗺️ {} of {} teammates placed on the map", markers.len(), roster.len());

    Ok(HttpResponse::Ok().json(markers))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_timeline).service(get_map);
}
