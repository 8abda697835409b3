// meridian-service/src/routes/mod.rs
pub mod roster_routes;
pub mod scheduler_routes;
pub mod timeline_routes;

use crate::config::AppConfig;
use crate::models::{ServiceError, TeammateZone, Viewer};
use crate::utils::roster_storage::Roster;
use crate::utils::{Clock, SystemClock};
use actix_web::{get, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use log::{debug, error};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

// Shared state handed to every handler
pub struct AppState {
    pub roster: RwLock<Roster>,
    pub clock: Box<dyn Clock>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(roster: Roster, config: AppConfig) -> Self {
        Self::with_clock(roster, config, Box::new(SystemClock))
    }

    pub fn with_clock(roster: Roster, config: AppConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            roster: RwLock::new(roster),
            clock,
            config,
        }
    }

    pub fn read_roster(&self) -> Result<RwLockReadGuard<'_, Roster>, ServiceError> {
        self.roster.read().map_err(|e| {
            error!("❌ Roster lock poisoned: {:?}", e);
            ServiceError::InternalServerError
        })
    }

    pub fn write_roster(&self) -> Result<RwLockWriteGuard<'_, Roster>, ServiceError> {
        self.roster.write().map_err(|e| {
            error!("❌ Roster lock poisoned: {:?}", e);
            ServiceError::InternalServerError
        })
    }

    // `at` (RFC 3339) overrides the clock for a single request
    pub fn now(&self, at: Option<&str>) -> Result<DateTime<Utc>, ServiceError> {
        match at {
            Some(text) => DateTime::parse_from_rfc3339(text)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| {
                    debug!("Rejecting instant {}: {:?}", text, e);
                    ServiceError::BadRequest(format!("invalid RFC 3339 instant: {}", text))
                }),
            None => Ok(self.clock.now()),
        }
    }

    // Viewer zone from the request, falling back to the configured one
    pub fn viewer(&self, viewer_tz: Option<&str>) -> Result<Viewer, ServiceError> {
        let mut viewer = self.config.viewer();
        if let Some(name) = viewer_tz {
            viewer.zone = TeammateZone::from_iana(name)?;
        }
        Ok(viewer)
    }
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().body("Meridian team clock service.\nSee /teammates, /timeline, /map and /scheduler/grid.")
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index);
    roster_routes::init_routes(cfg);
    timeline_routes::init_routes(cfg);
    scheduler_routes::init_routes(cfg);
}
