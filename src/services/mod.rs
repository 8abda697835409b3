// meridian-service/src/services/mod.rs
pub mod map_service;
pub mod selection;
pub mod slot_grid;
pub mod time_resolver;
pub mod timeline_service;
