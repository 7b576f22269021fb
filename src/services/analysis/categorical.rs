use indexmap::IndexMap;
use super::types::{CategoricalSummary, CellValue, PieSlice};

/// Frequency table keyed by literal value, in first-seen order.
pub fn summarize<'a, I>(values: I) -> CategoricalSummary
where
    I: IntoIterator<Item = &'a CellValue>,
{
    let mut value_counts: IndexMap<String, usize> = IndexMap::new();
    for value in values {
        *value_counts.entry(value.label()).or_insert(0) += 1;
    }

    CategoricalSummary {
        unique_values: value_counts.len(),
        value_counts,
    }
}

/// Pie slices in first-seen order.
pub fn pie_slices(summary: &CategoricalSummary) -> Vec<PieSlice> {
    summary.value_counts
        .iter()
        .map(|(label, count)| PieSlice { label: label.clone(), value: *count })
        .collect()
}

/// The `n` most frequent slices, largest first. Ties keep first-seen order.
pub fn top_slices(slices: &[PieSlice], n: usize) -> Vec<PieSlice> {
    let mut sorted = slices.to_vec();
    sorted.sort_by(|a, b| b.value.cmp(&a.value));
    sorted.truncate(n);
    sorted
}
