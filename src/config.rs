// meridian-service/src/config.rs
use crate::models::{ServiceError, TeammateZone, Viewer, WorkingHours};
use log::{info, warn};
use std::env;
use std::path::PathBuf;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:9090";
const DEFAULT_VIEWER_TIMEZONE: &str = "UTC";
const DEFAULT_VIEWER_WORKING_HOURS: &str = "08:00-22:00";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub viewer_zone: TeammateZone,
    pub viewer_working_hours: WorkingHours,
    pub roster_path: Option<PathBuf>,
}

impl AppConfig {
    // Read configuration from the environment (after .env has been loaded)
    pub fn from_env() -> Result<Self, ServiceError> {
        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
        let viewer_timezone =
            env::var("VIEWER_TIMEZONE").unwrap_or_else(|_| DEFAULT_VIEWER_TIMEZONE.to_string());
        let viewer_hours = env::var("VIEWER_WORKING_HOURS")
            .unwrap_or_else(|_| DEFAULT_VIEWER_WORKING_HOURS.to_string());
        let roster_path = env::var("ROSTER_PATH").ok().map(PathBuf::from);

        let config = Self {
            bind_address,
            viewer_zone: TeammateZone::from_iana(&viewer_timezone)?,
            viewer_working_hours: parse_hours_range(&viewer_hours)?,
            roster_path,
        };

        info!(
            "Config: bind={} viewer_tz={} roster={}",
            config.bind_address,
            config.viewer_zone.name(),
            config
                .roster_path
                .as_ref()
                .map_or("<builtin>".to_string(), |p| p.display().to_string())
        );
        Ok(config)
    }

    pub fn viewer(&self) -> Viewer {
        Viewer {
            zone: self.viewer_zone,
            working_hours: self.viewer_working_hours,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            viewer_zone: TeammateZone::Iana(chrono_tz::UTC),
            viewer_working_hours: WorkingHours::default(),
            roster_path: None,
        }
    }
}

// "08:00-22:00"
fn parse_hours_range(value: &str) -> Result<WorkingHours, ServiceError> {
    match value.split_once('-') {
        Some((start, end)) => WorkingHours::parse(start.trim(), end.trim()),
        None => {
            warn!("VIEWER_WORKING_HOURS is not a START-END range: {}", value);
            Err(ServiceError::InvalidWorkingHoursFormat(value.to_string()))
        }
    }
}
