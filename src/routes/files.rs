use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Router,
    Json,
};
use std::sync::Arc;
use crate::{
    AppState,
    error::AppError,
    models::ApiResponse,
    services::upload_store::StoredFile,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/history", get(list_history))
        .route("/api/file/:filename", delete(delete_file))
}

async fn list_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<StoredFile>>>, AppError> {
    let files = state.uploads.list().await?;
    tracing::debug!("Listing {} stored uploads", files.len());
    Ok(Json(ApiResponse::data(files)))
}

async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.uploads.delete(&filename).await?;
    Ok(Json(ApiResponse::success("File deleted", ())))
}
