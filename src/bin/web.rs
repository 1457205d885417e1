//! Web server for the chess tournament manager: REST API under /api.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, WRITE_TIMEOUT_MS; log level with RUST_LOG.

use actix_web::{web::Data, App, HttpServer};
use chess_tournament_manager::{config::ServerConfig, web, TournamentManager, TournamentStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    log::info!("Write timeout per tournament: {:?}", config.write_timeout);

    let state = Data::new(TournamentManager::new(TournamentStore::new(
        config.write_timeout,
    )));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(web::configure)
    })
    .bind(bind)?
    .run()
    .await
}
