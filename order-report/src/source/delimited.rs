//! Read delimited (CSV) order exports

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use crate::report::{Table, Value};

/// Read a delimited file with a header row into a table
pub fn read_csv_file(path: &Path, delimiter: u8) -> Result<Table> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    read_csv(file, delimiter).with_context(|| format!("Failed to read CSV file: {}", path.display()))
}

/// Read delimited text with a header row from any reader
///
/// Ragged rows are accepted: short rows are padded with missing values and
/// surplus cells are dropped.
pub fn read_csv<R: Read>(reader: R, delimiter: u8) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().context("Failed to read CSV header row")?.clone();
    let mut table = Table::new(headers.iter());

    for (idx, record) in reader.records().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let record = record.with_context(|| format!("Failed to read CSV row {}", idx + 2))?;
        table.push_row(record.iter().map(Value::from_cell).collect());
    }

    log::debug!(
        "Read {} rows x {} columns from CSV",
        table.len(),
        table.columns().len()
    );

    Ok(table)
}
