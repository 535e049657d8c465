use axum::{routing::get, Router};
use pk_core::{Result, ServerConfig};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod handlers;
pub mod render;
pub mod state;

pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::index))
        .route("/news", get(handlers::news_page))
        .route("/weather", get(handlers::weather_page))
        .route("/api/news", get(handlers::news_api))
        .route("/api/weather", get(handlers::weather_api))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Serves the app until the process is stopped.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let app = create_app(state).await;
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::AppState;
    pub use pk_core::{Error, Result};
}
