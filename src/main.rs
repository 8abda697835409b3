//Third-party-dependencies
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};

// Crate imports:
use meridian_service::config::AppConfig;
use meridian_service::routes::{self, AppState};
use meridian_service::utils::roster_storage::Roster;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(|e| {
        error!("❌ Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let roster = match config.roster_path {
        Some(ref path) => Roster::load_from_file(path),
        None => Roster::builtin(),
    }
    .map_err(|e| {
        error!("❌ Failed to load roster: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;

    let address = config.bind_address.clone();
    let state = web::Data::new(AppState::new(roster, config));

    info!("Server started at {}", address);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(routes::init_routes)
    })
        .bind(address)?
        .run()
        .await
}
