use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    routing::post,
    Router,
    Json,
};
use std::sync::Arc;
use crate::{
    AppState,
    error::AppError,
    models::{
        AnalysisOptions, AnalysisView, ApiResponse, FileAnalysisResponse, WorkflowAnalysisResponse,
        WorkflowRequest,
    },
    services::{
        analysis::{analyze, Dataset},
        file_processor::{self, FileKind},
    },
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/analyze", post(analyze_upload))
        .route("/api/workflow/analyze", post(analyze_workflow))
}

/// Runs the analysis off the async runtime and shapes it for the response.
async fn run_analysis(dataset: Dataset, options: AnalysisOptions) -> Result<(usize, usize, AnalysisView), AppError> {
    let (row_count, column_count, result) = tokio::task::spawn_blocking(move || {
        let result = analyze(&dataset);
        (dataset.row_count(), dataset.column_count(), result)
    })
    .await?;

    Ok((row_count, column_count, AnalysisView::new(result, options)?))
}

async fn analyze_upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<FileAnalysisResponse>>, AppError> {
    let start = std::time::Instant::now();

    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await?;
            upload = Some((file_name, data));
            break;
        }
    }

    let (file_name, data) = upload
        .ok_or_else(|| AppError::InvalidInput("Please upload a file".to_string()))?;
    tracing::info!("Received upload {} ({}KB)", file_name, data.len() / 1024);

    let kind = FileKind::from_file_name(&file_name)
        .ok_or_else(|| AppError::UnsupportedFileType(file_name.clone()))?;

    state.uploads.save(&file_name, &data).await?;

    let parse_start = std::time::Instant::now();
    let dataset = tokio::task::spawn_blocking(move || file_processor::parse_dataset(data, kind)).await??;
    tracing::info!("Parsed {} in {:?}", file_name, parse_start.elapsed());

    let (row_count, column_count, analysis) = run_analysis(dataset, AnalysisOptions::default()).await?;
    tracing::info!("Total processing of {} completed in {:?}", file_name, start.elapsed());

    Ok(Json(ApiResponse::success(
        "Analysis complete",
        FileAnalysisResponse { file_name, row_count, column_count, analysis },
    )))
}

async fn analyze_workflow(
    payload: Result<Json<WorkflowRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<WorkflowAnalysisResponse>>, AppError> {
    let Json(request) = payload?;
    let options = request.options.unwrap_or_default();
    let rows = match request.data {
        Some(serde_json::Value::Array(rows)) => rows,
        _ => return Err(AppError::InvalidInput("Please provide a valid data array".to_string())),
    };
    tracing::info!(
        "Workflow analysis of {} rows (charts: {}, insights: {})",
        rows.len(),
        options.include_charts,
        options.include_insights
    );

    let dataset = file_processor::dataset_from_json(&rows)?;
    let (row_count, column_count, analysis) = run_analysis(dataset, options).await?;

    let now = chrono::Utc::now();
    Ok(Json(ApiResponse::success(
        "Workflow analysis complete",
        WorkflowAnalysisResponse {
            row_count,
            column_count,
            analysis,
            timestamp: now.to_rfc3339(),
            request_id: now.timestamp_millis().to_string(),
        },
    )))
}
