use axum::{extract::DefaultBodyLimit, http::Method, routing::get, Json, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use crate::{models::HealthStatus, AppState};

pub mod analyze;
pub mod files;

/// Assembles the API routes, static file fallback and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/api/health", get(health_check))
        .merge(analyze::routes())
        .merge(files::routes())
        .fallback_service(ServeDir::new(&state.config.static_dir))
        .layer(DefaultBodyLimit::max(state.config.max_file_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "success",
        message: "Data analysis service is running",
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
