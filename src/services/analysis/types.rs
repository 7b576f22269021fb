use std::collections::HashMap;
use indexmap::IndexMap;
use serde::Serialize;

/// Label used for empty or missing categorical values.
pub const UNKNOWN_LABEL: &str = "unknown";

static MISSING: CellValue = CellValue::Missing;

/// A single cell as read from the source file.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Builds a text cell, treating the empty string as missing.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            CellValue::Missing
        } else {
            CellValue::Text(value)
        }
    }

    /// Finite numeric interpretation of the cell, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Number(_) => None,
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            CellValue::Missing => None,
        }
    }

    /// Key under which the cell is counted in a categorical column.
    pub fn label(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Missing => UNKNOWN_LABEL.to_string(),
        }
    }
}

impl From<&serde_json::Value> for CellValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Missing,
            serde_json::Value::Bool(b) => CellValue::Text(b.to_string()),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(CellValue::Number)
                .unwrap_or_else(|| CellValue::Text(n.to_string())),
            serde_json::Value::String(s) => CellValue::text(s.as_str()),
            other => CellValue::Text(other.to_string()),
        }
    }
}

pub type Row = HashMap<String, CellValue>;

/// Ordered rows sharing one column set.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Builds a dataset from key/value rows; the column set is taken from the first row.
    pub fn from_pairs<I, R, K>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (K, CellValue)>,
        K: Into<String>,
    {
        let mut columns = Vec::new();
        let rows: Vec<Row> = rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| {
                row.into_iter()
                    .map(|(key, value)| {
                        let key = key.into();
                        if idx == 0 && !columns.contains(&key) {
                            columns.push(key.clone());
                        }
                        (key, value)
                    })
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column in row order; absent keys read as missing.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a CellValue> + 'a {
        self.rows
            .iter()
            .map(move |row| row.get(column).unwrap_or(&MISSING))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoricalSummary {
    pub unique_values: usize,
    pub value_counts: IndexMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub range: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ChartSpec {
    Histogram(Vec<HistogramBin>),
    Pie(Vec<PieSlice>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub summary: IndexMap<String, ColumnSummary>,
    pub charts: IndexMap<String, ChartSpec>,
    pub insights: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_from_text() {
        assert_eq!(CellValue::text(" 4.5 ").as_number(), Some(4.5));
        assert_eq!(CellValue::text("1e3").as_number(), Some(1000.0));
        assert_eq!(CellValue::text("abc").as_number(), None);
        assert_eq!(CellValue::text("inf").as_number(), None);
        assert_eq!(CellValue::Missing.as_number(), None);
    }

    #[test]
    fn empty_text_is_missing() {
        assert_eq!(CellValue::text(""), CellValue::Missing);
        assert_eq!(CellValue::Missing.label(), UNKNOWN_LABEL);
        assert_eq!(CellValue::Number(5.0).label(), "5");
    }

    #[test]
    fn absent_keys_read_as_missing() {
        let dataset = Dataset::from_pairs(vec![
            vec![("a", CellValue::Number(1.0)), ("b", CellValue::text("x"))],
            vec![("a", CellValue::Number(2.0))],
        ]);
        assert_eq!(dataset.columns(), &["a".to_string(), "b".to_string()]);
        let b: Vec<_> = dataset.column_values("b").cloned().collect();
        assert_eq!(b, vec![CellValue::text("x"), CellValue::Missing]);
    }

    #[test]
    fn chart_spec_serializes_with_type_tag() {
        let chart = ChartSpec::Pie(vec![PieSlice { label: "A".into(), value: 2 }]);
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["type"], "pie");
        assert_eq!(json["data"][0]["label"], "A");
    }
}
