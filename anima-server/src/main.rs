mod routes;
mod singleton;
mod state;

use anyhow::Result;
use axum::Router;
use log::info;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

use anima_core::AnimaConfig;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AnimaConfig::load()?;

    // Ensure only one instance writes the per-user files
    let _lock = singleton::acquire_lock(&config.data_path())?;

    let port = config.server.port;
    let state = AppState::new(config)?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::auth::router())
        .merge(routes::chat::router())
        .merge(routes::survey::router())
        .merge(routes::forum::router())
        .merge(routes::calendar::router())
        .with_state(state)
        .layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("anima-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
