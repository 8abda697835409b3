// meridian-service/src/routes/scheduler_routes.rs
use crate::models::{SelectionRequest, SelectionState, ServiceError, SlotSelection};
use crate::routes::AppState;
use crate::services::slot_grid;
use actix_web::{get, post, web, HttpResponse};
use log::{debug, info};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct GridQuery {
    // Comma separated teammate ids, e.g. "1,4,11"
    pub ids: Option<String>,
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub viewer_tz: Option<String>,
    pub at: Option<String>,
}

fn parse_ids(ids: Option<&str>) -> Result<Vec<u32>, ServiceError> {
    let ids = match ids {
        Some(ids) if !ids.trim().is_empty() => ids,
        _ => return Ok(Vec::new()),
    };

    ids.split(',')
        .map(|part| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| ServiceError::BadRequest(format!("invalid teammate id: {}", part)))
        })
        .collect()
}

fn selection_from_query(start: Option<usize>, end: Option<usize>) -> SlotSelection {
    match (start, end) {
        (Some(start), Some(end)) => SlotSelection::Range {
            start: start.min(end),
            end: start.max(end),
        },
        (Some(slot), None) | (None, Some(slot)) => SlotSelection::SingleSlot { slot },
        (None, None) => SlotSelection::Empty,
    }
}

// Heat strips for the chosen teammates against the viewer's day
#[get("/scheduler/grid")]
async fn get_grid(
    state: web::Data<AppState>,
    query: web::Query<GridQuery>,
) -> Result<HttpResponse, ServiceError> {
    let now = state.now(query.at.as_deref())?;
    let viewer = state.viewer(query.viewer_tz.as_deref())?;
    let ids = parse_ids(query.ids.as_deref())?;
    let selection = SelectionState {
        selection: selection_from_query(query.start, query.end),
        drag_anchor: None,
    };

    info!("📅 Scheduler grid for {} teammates, viewer {}", ids.len(), viewer.zone.name());

    let roster = state.read_roster()?;
    let grid = slot_grid::build_grid(&roster, &ids, &viewer, &selection, now)?;

    Ok(HttpResponse::Ok().json(grid))
}

// Apply one pointer event to a selection
#[post("/scheduler/selection")]
async fn apply_selection_event(
    request: web::Json<SelectionRequest>,
) -> Result<HttpResponse, ServiceError> {
    let request = request.into_inner();

    debug!("Selection event {:?} on {:?}", request.event, request.state);

    let next = request.state.apply(request.event)?;

    Ok(HttpResponse::Ok().json(next))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_grid).service(apply_selection_event);
}
