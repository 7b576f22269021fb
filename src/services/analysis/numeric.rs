use super::types::{CellValue, NumericSummary};

/// Parses the raw values of a numeric column, dropping anything that is not a finite number.
pub fn numeric_values<'a, I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a CellValue>,
{
    values.into_iter().filter_map(CellValue::as_number).collect()
}

/// Descriptive statistics over the parsed values. `None` when there are none.
pub fn summarize(values: &[f64]) -> Option<NumericSummary> {
    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let sum: f64 = values.iter().sum();
    let mean = sum / count as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // population variance, divisor N
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

    Some(NumericSummary {
        count,
        sum,
        mean,
        median: median(values),
        min,
        max,
        std: variance.sqrt(),
    })
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
