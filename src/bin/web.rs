//! Single binary web server for tournament brackets.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default; see `ServerConfig` for the env overrides.

use actix_web::{web::Data, App, HttpServer};
use pickleball_bracket::web::{configure, session_middleware, ApiSettings};
use pickleball_bracket::{BracketEngine, MemoryStore, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let key = config.cookie_key();
    let secure = config.secure_cookies;
    log::info!(
        "Starting server at http://{}:{} (auto-complete: {})",
        config.host,
        config.port,
        config.auto_complete
    );

    let engine = Data::new(BracketEngine::new(MemoryStore::new()));
    let settings = Data::new(ApiSettings {
        auto_complete: config.auto_complete,
    });

    HttpServer::new(move || {
        App::new()
            .wrap(session_middleware(key.clone(), secure))
            .app_data(engine.clone())
            .app_data(settings.clone())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
