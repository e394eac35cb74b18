//! Input adapters: where the raw export table comes from

pub mod delimited;
pub mod discovery;
pub mod excel;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::report::Table;

pub use discovery::find_latest_input;

/// A raw order export handed to the pipeline
#[derive(Debug, Clone)]
pub enum InputSource {
    Csv(PathBuf),
    Excel(PathBuf),
    /// CSV content already held in memory (`--input -`)
    CsvBytes(Vec<u8>),
}

impl InputSource {
    /// Pick the reader from the file extension (`.xlsx`/`.xlsm` → Excel, else CSV)
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_excel = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| matches!(e.to_ascii_lowercase().as_str(), "xlsx" | "xlsm"))
            .unwrap_or(false);

        if is_excel {
            InputSource::Excel(path)
        } else {
            InputSource::Csv(path)
        }
    }

    /// Buffer a CSV export streamed on `reader` (e.g. stdin)
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .context("Failed to read CSV export from stream")?;
        Ok(InputSource::CsvBytes(bytes))
    }

    /// Read the whole export into memory
    pub fn load(&self, delimiter: u8) -> Result<Table> {
        match self {
            InputSource::Csv(path) => delimited::read_csv_file(path, delimiter),
            InputSource::Excel(path) => excel::read_excel_file(path),
            InputSource::CsvBytes(bytes) => delimited::read_csv(bytes.as_slice(), delimiter),
        }
    }
}

impl std::fmt::Display for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputSource::Csv(p) | InputSource::Excel(p) => write!(f, "{}", p.display()),
            InputSource::CsvBytes(b) => write!(f, "<stream, {} bytes>", b.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_picks_reader_by_extension() {
        assert!(matches!(InputSource::from_path("a_b.csv"), InputSource::Csv(_)));
        assert!(matches!(InputSource::from_path("a_b.XLSX"), InputSource::Excel(_)));
        assert!(matches!(InputSource::from_path("export"), InputSource::Csv(_)));
    }

    #[test]
    fn test_load_from_stream() {
        let source = InputSource::from_reader(&b"Order Status;Subscription\nCompleted;S1\n"[..]).unwrap();
        assert_eq!(source.to_string(), "<stream, 39 bytes>");

        let table = source.load(b';').unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.columns().len(), 2);
    }
}
