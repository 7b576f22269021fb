use rayon::prelude::*;
use super::types::{ColumnKind, Dataset};

/// Classifies every column of the dataset, in column order.
///
/// A column is numeric when at least one row holds a finite number for it.
pub fn classify_columns(dataset: &Dataset) -> Vec<(String, ColumnKind)> {
    if dataset.is_empty() {
        return Vec::new();
    }

    dataset.columns()
        .par_iter()
        .map(|column| (column.clone(), classify_column(dataset, column)))
        .collect()
}

pub fn classify_column(dataset: &Dataset, column: &str) -> ColumnKind {
    if dataset.column_values(column).any(|value| value.as_number().is_some()) {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::analysis::types::CellValue;

    fn dataset() -> Dataset {
        Dataset::from_pairs(vec![
            vec![("price", CellValue::text("n/a")), ("city", CellValue::text("NY"))],
            vec![("price", CellValue::text(" 12.5 ")), ("city", CellValue::text("LA"))],
            vec![("price", CellValue::Missing), ("city", CellValue::Missing)],
        ])
    }

    #[test]
    fn one_number_makes_a_column_numeric() {
        let kinds = classify_columns(&dataset());
        assert_eq!(kinds, vec![
            ("price".to_string(), ColumnKind::Numeric),
            ("city".to_string(), ColumnKind::Categorical),
        ]);
    }

    #[test]
    fn classification_ignores_row_order() {
        let forward = dataset();
        let mut rows = forward.rows().to_vec();
        rows.reverse();
        let reversed = Dataset::new(forward.columns().to_vec(), rows);
        assert_eq!(classify_columns(&forward), classify_columns(&reversed));
    }

    #[test]
    fn empty_dataset_has_no_columns() {
        let empty = Dataset::new(vec!["a".into()], Vec::new());
        assert!(classify_columns(&empty).is_empty());
    }
}
