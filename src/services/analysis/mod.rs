pub mod analyzer;
pub mod categorical;
pub mod classifier;
pub mod histogram;
pub mod insights;
pub mod numeric;
pub mod types;

pub use analyzer::analyze;
pub use types::{AnalysisResult, CellValue, ChartSpec, ColumnSummary, Dataset, Row};
