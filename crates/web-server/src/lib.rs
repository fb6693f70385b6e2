use analytics::AnalyticsEngine;
use axum::{Router, routing::get};
use dataset::Dataset;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
///
/// The dataset is loaded once by the caller and never mutated; every request derives its
/// own view from it.
#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub engine: AnalyticsEngine,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, engine: AnalyticsEngine) -> Self {
        Self { dataset, engine }
    }
}

/// Builds the API router over `state`.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/bounds", get(handlers::get_bounds))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/orders", get(handlers::get_orders))
        .route("/api/view", get(handlers::get_view))
        .with_state(Arc::new(state))
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Serves the JSON API on `addr` until the process is stopped.
pub async fn run_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    // Tracing is initialized by the binary.
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
