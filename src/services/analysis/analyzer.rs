use super::categorical;
use super::classifier::classify_columns;
use super::histogram::build_histogram;
use super::insights::generate_insights;
use super::numeric;
use super::types::*;

/// Runs the full analysis over one dataset.
///
/// Numeric columns are reported first, then categorical columns, each group in
/// column order. Pure computation: no I/O and no shared state.
pub fn analyze(dataset: &Dataset) -> AnalysisResult {
    let start = std::time::Instant::now();
    let mut result = AnalysisResult::default();

    if dataset.is_empty() {
        tracing::debug!("Empty dataset, nothing to analyze");
        return result;
    }

    let kinds = classify_columns(dataset);

    for (column, _) in kinds.iter().filter(|(_, kind)| *kind == ColumnKind::Numeric) {
        let values = numeric::numeric_values(dataset.column_values(column));
        match numeric::summarize(&values) {
            Some(stats) => {
                result.charts.insert(column.clone(), ChartSpec::Histogram(build_histogram(&values)));
                result.summary.insert(column.clone(), ColumnSummary::Numeric(stats));
            }
            None => {
                tracing::warn!("Numeric column {} has no parseable values, omitting", column);
            }
        }
    }

    for (column, _) in kinds.iter().filter(|(_, kind)| *kind == ColumnKind::Categorical) {
        let stats = categorical::summarize(dataset.column_values(column));
        result.charts.insert(column.clone(), ChartSpec::Pie(categorical::pie_slices(&stats)));
        result.summary.insert(column.clone(), ColumnSummary::Categorical(stats));
    }

    result.insights = generate_insights(&result.summary, dataset);

    tracing::info!(
        "Analyzed {} rows x {} columns in {:?}, {} insights",
        dataset.row_count(),
        dataset.column_count(),
        start.elapsed(),
        result.insights.len()
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn age_city() -> Dataset {
        Dataset::from_pairs(
            [10.0, 10.0, 10.0, 100.0]
                .iter()
                .map(|age| vec![("age", CellValue::Number(*age)), ("city", CellValue::text("NY"))]),
        )
    }

    #[test]
    fn insights_follow_column_and_rule_order() {
        let result = analyze(&age_city());

        let ColumnSummary::Numeric(age) = &result.summary["age"] else {
            panic!("age should be numeric");
        };
        assert_eq!(age.mean, 32.5);
        assert!((age.std - 38.97).abs() < 0.01);

        // a constant column is also fully concentrated, so city yields two lines
        assert_eq!(result.insights.len(), 4);
        assert!(result.insights[0].starts_with("age: coefficient of variation is high (119.91%)"));
        assert!(result.insights[1].starts_with("age: possible outliers, max (100)"));
        assert!(result.insights[2].starts_with("city: every value is identical"));
        assert!(result.insights[3].starts_with("city: values are highly concentrated"));
        assert!(result.insights[3].ends_with("100.0%"));
    }

    #[test]
    fn numeric_columns_come_first() {
        let dataset = Dataset::from_pairs(vec![
            vec![("name", CellValue::text("a")), ("score", CellValue::text("1"))],
            vec![("name", CellValue::text("b")), ("score", CellValue::text("2"))],
        ]);
        let result = analyze(&dataset);
        let keys: Vec<_> = result.summary.keys().cloned().collect();
        assert_eq!(keys, vec!["score".to_string(), "name".to_string()]);
        let chart_keys: Vec<_> = result.charts.keys().cloned().collect();
        assert_eq!(chart_keys, keys);
    }

    #[test]
    fn histogram_counts_match_surviving_values() {
        let dataset = Dataset::from_pairs(
            ["1", "2", "x", "", "5", "8"].iter().map(|v| vec![("v", CellValue::text(*v))]),
        );
        let result = analyze(&dataset);
        let ColumnSummary::Numeric(stats) = &result.summary["v"] else {
            panic!("v should be numeric");
        };
        assert_eq!(stats.count, 4);
        let ChartSpec::Histogram(bins) = &result.charts["v"] else {
            panic!("v should have a histogram");
        };
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 4);
    }

    #[test]
    fn empty_dataset_gives_empty_result() {
        let result = analyze(&Dataset::default());
        assert_eq!(result, AnalysisResult::default());
    }

    #[test]
    fn identical_values_histogram() {
        let dataset = Dataset::from_pairs((0..3).map(|_| vec![("v", CellValue::Number(5.0))]));
        let result = analyze(&dataset);
        assert_eq!(
            result.charts["v"],
            ChartSpec::Histogram(vec![HistogramBin { range: "5.00 - 5.00".into(), count: 3 }])
        );
    }
}
