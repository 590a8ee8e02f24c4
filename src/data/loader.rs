use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};

use super::model::{CellValue, Column, Table};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a table from a CSV file on disk.
///
/// The first record is the header row; every other record is one data row.
/// Cell types are guessed per cell (int → float → bool → text; empty → null).
pub fn load_csv_path(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    load_csv_reader(file)
}

/// Load a table from any CSV byte stream (the upload path).
pub fn load_csv_reader(reader: impl Read) -> Result<Table> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() {
        bail!("CSV has no columns");
    }

    let mut columns: Vec<Column> = headers
        .iter()
        .map(|name| Column {
            name: name.clone(),
            values: Vec::new(),
        })
        .collect();

    for (row_no, result) in csv_reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        if record.len() != headers.len() {
            bail!(
                "CSV row {row_no}: expected {} fields, found {}",
                headers.len(),
                record.len()
            );
        }

        for (col_idx, field) in record.iter().enumerate() {
            columns[col_idx].values.push(guess_cell_type(field.trim()));
        }
    }

    Ok(Table::from_columns(columns))
}

// ---------------------------------------------------------------------------
// Per-cell type guessing
// ---------------------------------------------------------------------------

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::Text(s.to_string())
}
