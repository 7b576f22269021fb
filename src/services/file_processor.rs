use std::collections::HashSet;
use std::io::Cursor;
use bytes::Bytes;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use crate::error::AppError;
use crate::services::analysis::{CellValue, Dataset, Row};

/// Source formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Spreadsheet,
}

impl FileKind {
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = std::path::Path::new(name)
            .extension()?
            .to_str()?
            .to_lowercase();
        match ext.as_str() {
            "csv" => Some(FileKind::Csv),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(FileKind::Spreadsheet),
            _ => None,
        }
    }
}

pub fn parse_dataset(file_data: Bytes, kind: FileKind) -> Result<Dataset, AppError> {
    match kind {
        FileKind::Csv => parse_csv(&file_data),
        FileKind::Spreadsheet => parse_spreadsheet(file_data),
    }
}

/// Reads CSV with a header row. Every field is kept as text.
pub fn parse_csv(file_data: &[u8]) -> Result<Dataset, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(file_data);

    let mut existing_names = HashSet::new();
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| unique_header(h.trim_start_matches('\u{feff}'), &mut existing_names))
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = record.get(idx).map(CellValue::text).unwrap_or(CellValue::Missing);
                (header.clone(), value)
            })
            .collect();
        rows.push(row);
    }

    tracing::info!("Parsed CSV with {} columns and {} rows", headers.len(), rows.len());
    Ok(Dataset::new(headers, rows))
}

/// Reads the first worksheet; its first row holds the headers.
/// Rows with no non-empty cell are dropped.
pub fn parse_spreadsheet(file_data: Bytes) -> Result<Dataset, AppError> {
    let cursor = Cursor::new(file_data);
    let mut workbook = open_workbook_auto_from_rs(cursor).map_err(|e| {
        tracing::error!("Failed to open workbook: {}", e);
        AppError::FileProcessing(format!("Failed to open workbook: {}", e))
    })?;

    let sheet_names = workbook.sheet_names().to_vec();
    tracing::info!("Found {} sheets: {:?}", sheet_names.len(), sheet_names);

    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| AppError::FileProcessing("No sheets found in workbook".to_string()))?;

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| AppError::FileProcessing(format!("Failed to read worksheet {}: {}", sheet_name, e)))?;

    let mut sheet_rows = range.rows();
    let mut existing_names = HashSet::new();
    let headers: Vec<String> = sheet_rows
        .next()
        .map(|row| row.iter()
            .map(|cell| unique_header(&cell.to_string(), &mut existing_names))
            .collect())
        .unwrap_or_default();

    // blank rows are skipped, not read as all-missing records
    let rows: Vec<Row> = sheet_rows
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(idx, header)| (header.clone(), cell_value(row.get(idx).unwrap_or(&Data::Empty))))
                .collect()
        })
        .collect();

    tracing::info!(
        "Parsed sheet {} with {} columns and {} rows",
        sheet_name,
        headers.len(),
        rows.len()
    );
    Ok(Dataset::new(headers, rows))
}

/// Builds a dataset from JSON row objects; the first row fixes the column set.
pub fn dataset_from_json(rows: &[serde_json::Value]) -> Result<Dataset, AppError> {
    let objects = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            row.as_object()
                .ok_or_else(|| AppError::InvalidInput(format!("Row {} is not an object", idx)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dataset::from_pairs(objects.into_iter().map(|object| {
        object
            .iter()
            .map(|(key, value)| (key.clone(), CellValue::from(value)))
            .collect::<Vec<_>>()
    })))
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::DateTime(d) => CellValue::Number(d.as_f64()),
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Empty => CellValue::Missing,
        other => CellValue::text(other.to_string()),
    }
}

/// Keeps the header text as-is, suffixing repeats so every column name is distinct.
fn unique_header(name: &str, existing_names: &mut HashSet<String>) -> String {
    let base = if name.trim().is_empty() { "column".to_string() } else { name.to_string() };

    let mut header = base.clone();
    let mut counter = 1;
    while !existing_names.insert(header.clone()) {
        header = format!("{}_{}", base, counter);
        counter += 1;
    }
    header
}
