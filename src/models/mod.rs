// meridian-service/src/models/mod.rs
use actix_web::{HttpResponse, ResponseError};
use derive_more::Display;
use serde_json::json;

pub mod teammate;
pub use teammate::*;

pub mod schedule;
pub use schedule::*;

pub mod dashboard;
pub use dashboard::*;

// Custom error types
#[derive(Debug, Display, Clone, PartialEq)]
pub enum ServiceError {
    #[display(fmt = "Internal Server Error")]
    InternalServerError,
    #[display(fmt = "BadRequest: {}", _0)]
    BadRequest(String),
    #[display(fmt = "Invalid timezone: {}", _0)]
    InvalidTimezone(String),
    #[display(fmt = "Invalid working hours format: {}", _0)]
    InvalidWorkingHoursFormat(String),
    #[display(fmt = "Not Found")]
    NotFound,
}

impl std::error::Error for ServiceError {}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::InternalServerError => {
                HttpResponse::InternalServerError().json(json!({ "error": "Internal Server Error" }))
            }
            ServiceError::BadRequest(ref message) => {
                HttpResponse::BadRequest().json(json!({ "error": message }))
            }
            ServiceError::InvalidTimezone(_) | ServiceError::InvalidWorkingHoursFormat(_) => {
                HttpResponse::BadRequest().json(json!({ "error": self.to_string() }))
            }
            ServiceError::NotFound => HttpResponse::NotFound().json(json!({ "error": "Not Found" })),
        }
    }
}
