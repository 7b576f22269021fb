use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use crate::services::analysis::{categorical::top_slices, types::PieSlice, AnalysisResult, ChartSpec};

/// Envelope shared by every JSON endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self { status: "success", message: Some(message.into()), data }
    }

    pub fn data(data: T) -> Self {
        Self { status: "success", message: None, data }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOptions {
    #[serde(default = "default_true")]
    pub include_charts: bool,
    #[serde(default = "default_true")]
    pub include_insights: bool,
    /// Adds a most-frequent-first view of each categorical column, capped at this many values.
    #[serde(default)]
    pub top_categories: Option<usize>,
}

fn default_true() -> bool {
    true
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self { include_charts: true, include_insights: true, top_categories: None }
    }
}

#[derive(Debug, Deserialize)]
pub struct WorkflowRequest {
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub options: Option<AnalysisOptions>,
}

/// Analysis as sent over the wire; sections switched off by the caller are omitted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisView {
    pub summary: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charts: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_categories: Option<IndexMap<String, Vec<PieSlice>>>,
}

impl AnalysisView {
    pub fn new(result: AnalysisResult, options: AnalysisOptions) -> Result<Self, serde_json::Error> {
        let top_categories = options.top_categories.map(|n| {
            result.charts
                .iter()
                .filter_map(|(column, chart)| match chart {
                    ChartSpec::Pie(slices) => Some((column.clone(), top_slices(slices, n))),
                    ChartSpec::Histogram(_) => None,
                })
                .collect()
        });

        Ok(Self {
            summary: serde_json::to_value(&result.summary)?,
            charts: if options.include_charts {
                Some(serde_json::to_value(&result.charts)?)
            } else {
                None
            },
            insights: options.include_insights.then_some(result.insights),
            top_categories,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysisResponse {
    pub file_name: String,
    pub row_count: usize,
    pub column_count: usize,
    pub analysis: AnalysisView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowAnalysisResponse {
    pub row_count: usize,
    pub column_count: usize,
    pub analysis: AnalysisView,
    pub timestamp: String,
    pub request_id: String,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
    pub version: &'static str,
}
