// meridian-service/src/routes/roster_routes.rs
use crate::models::{ServiceError, TeammatePatch, TeammateRecord, UpdateTeammateRequest};
use crate::routes::AppState;
use actix_web::{get, post, put, web, HttpResponse};
use log::{error, info};

// List the roster in stored order
#[get("/teammates")]
async fn list_teammates(state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let roster = state.read_roster()?;

    info!("📋 Listing {} teammates", roster.len());

    Ok(HttpResponse::Ok().json(roster.teammates()))
}

// Add a teammate; the id is assigned by the roster
#[post("/teammates")]
async fn add_teammate(
    state: web::Data<AppState>,
    record: web::Json<TeammateRecord>,
) -> Result<HttpResponse, ServiceError> {
    info!("📝 Adding teammate: {}", record.name);

    let mut roster = state.write_roster()?;
    let teammate = roster.add_teammate(record.into_inner()).map_err(|e| {
        error!("❌ Rejected new teammate: {}", e);
        e
    })?;

    Ok(HttpResponse::Created().json(teammate))
}

// Replace selected fields of a teammate
#[put("/teammates/{id}")]
async fn update_teammate(
    state: web::Data<AppState>,
    path: web::Path<u32>,
    request: web::Json<UpdateTeammateRequest>,
) -> Result<HttpResponse, ServiceError> {
    let id = path.into_inner();

    info!("🔄 Updating teammate: {}", id);

    let patch = TeammatePatch::try_from(request.into_inner())?;
    let mut roster = state.write_roster()?;

    match roster.update_teammate(id, patch) {
        Some(teammate) => Ok(HttpResponse::Ok().json(teammate)),
        None => {
            error!("❌ Teammate not found: {}", id);
            Err(ServiceError::NotFound)
        }
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_teammates)
        .service(add_teammate)
        .service(update_teammate);
}
