use indexmap::IndexMap;
use super::types::{CategoricalSummary, ColumnSummary, Dataset, NumericSummary};

const HIGH_CV_PERCENT: f64 = 50.0;
const LOW_CV_PERCENT: f64 = 20.0;
const OUTLIER_MEAN_FACTOR: f64 = 3.0;
const CONCENTRATION_PERCENT: f64 = 80.0;

/// Rule-based observations, in summary order.
pub fn generate_insights(summary: &IndexMap<String, ColumnSummary>, dataset: &Dataset) -> Vec<String> {
    let mut insights = Vec::new();
    if dataset.is_empty() {
        return insights;
    }

    for (column, stats) in summary {
        match stats {
            ColumnSummary::Numeric(stats) => numeric_insights(column, stats, &mut insights),
            ColumnSummary::Categorical(stats) => {
                categorical_insights(column, stats, dataset.row_count(), &mut insights)
            }
        }
    }

    tracing::debug!("Generated {} insights over {} columns", insights.len(), summary.len());
    insights
}

fn numeric_insights(column: &str, stats: &NumericSummary, out: &mut Vec<String>) {
    if stats.std > 0.0 {
        let cv = stats.std / stats.mean * 100.0;
        if cv > HIGH_CV_PERCENT {
            out.push(format!(
                "{}: coefficient of variation is high ({:.2}%), values are unevenly distributed",
                column, cv
            ));
        } else if cv < LOW_CV_PERCENT {
            out.push(format!(
                "{}: coefficient of variation is low ({:.2}%), values are relatively stable",
                column, cv
            ));
        }
    }

    if stats.max > stats.mean * OUTLIER_MEAN_FACTOR {
        out.push(format!(
            "{}: possible outliers, max ({}) is far above the mean ({:.2})",
            column, stats.max, stats.mean
        ));
    }
}

fn categorical_insights(column: &str, stats: &CategoricalSummary, row_count: usize, out: &mut Vec<String>) {
    if stats.unique_values == 1 {
        out.push(format!(
            "{}: every value is identical, the column likely has low analytic value",
            column
        ));
    } else if stats.unique_values == row_count {
        out.push(format!("{}: every value is unique, the column is likely an identifier", column));
    }

    let total: usize = stats.value_counts.values().sum();
    let top = stats.value_counts.values().copied().max().unwrap_or(0);
    if total == 0 {
        return;
    }

    let concentration = top as f64 / total as f64 * 100.0;
    if concentration > CONCENTRATION_PERCENT {
        out.push(format!(
            "{}: values are highly concentrated, the top value accounts for {:.1}%",
            column, concentration
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::analysis::{categorical, numeric};
    use crate::services::analysis::types::CellValue;

    fn texts(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::text(*v)).collect()
    }

    fn one_column(values: Vec<CellValue>) -> Dataset {
        Dataset::from_pairs(values.into_iter().map(|v| vec![("c", v)]))
    }

    #[test]
    fn eighty_percent_is_not_concentrated() {
        let dataset = one_column(texts(&["A", "A", "A", "A", "B"]));
        let mut summary = IndexMap::new();
        summary.insert("c".to_string(), ColumnSummary::Categorical(categorical::summarize(dataset.column_values("c"))));
        assert!(generate_insights(&summary, &dataset).is_empty());
    }

    #[test]
    fn flags_concentration_above_threshold() {
        let dataset = one_column(texts(&["A", "A", "A", "A", "A", "B"]));
        let mut summary = IndexMap::new();
        summary.insert("c".to_string(), ColumnSummary::Categorical(categorical::summarize(dataset.column_values("c"))));
        let insights = generate_insights(&summary, &dataset);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].contains("83.3%"));
    }

    #[test]
    fn unique_values_flag_identifier() {
        let dataset = one_column(texts(&["a1", "a2", "a3"]));
        let mut summary = IndexMap::new();
        summary.insert("c".to_string(), ColumnSummary::Categorical(categorical::summarize(dataset.column_values("c"))));
        let insights = generate_insights(&summary, &dataset);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].contains("identifier"));
    }

    #[test]
    fn zero_std_skips_cv_rule() {
        let dataset = one_column(vec![CellValue::Number(4.0); 3]);
        let stats = numeric::summarize(&[4.0, 4.0, 4.0]).unwrap();
        let mut summary = IndexMap::new();
        summary.insert("c".to_string(), ColumnSummary::Numeric(stats));
        assert!(generate_insights(&summary, &dataset).is_empty());
    }

    #[test]
    fn low_dispersion_is_reported() {
        let values = [100.0, 102.0, 98.0, 101.0];
        let dataset = one_column(values.iter().map(|v| CellValue::Number(*v)).collect());
        let mut summary = IndexMap::new();
        summary.insert("c".to_string(), ColumnSummary::Numeric(numeric::summarize(&values).unwrap()));
        let insights = generate_insights(&summary, &dataset);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].contains("is low"));
    }

    #[test]
    fn empty_dataset_yields_nothing() {
        assert!(generate_insights(&IndexMap::new(), &Dataset::default()).is_empty());
    }
}
