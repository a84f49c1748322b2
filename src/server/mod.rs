pub mod handlers;
pub mod types;

use crate::{Result, config::Config, provider::ReplicateClient};
use axum::{Router, routing::post};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub fn router(state: handlers::AppState) -> Router {
    Router::new()
        .route("/api/generate", post(handlers::generate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    // Missing credentials fail here, before the server accepts traffic
    let provider = ReplicateClient::new(&config.provider)?;

    let state = handlers::AppState {
        provider: Arc::new(provider),
        max_prompt_chars: config.provider.max_prompt_chars,
    };
    let app = router(state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
