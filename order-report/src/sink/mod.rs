//! Output sinks: where the rendered workbook goes

pub mod excel;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::report::Report;

/// Destination for the rendered report
#[derive(Debug, Clone)]
pub enum OutputSink {
    File(PathBuf),
    /// Keep the workbook bytes (e.g. to hand to a download)
    Memory,
}

/// What a sink produced
#[derive(Debug)]
pub enum Written {
    File(PathBuf),
    Bytes(Vec<u8>),
}

/// `<prefix>_<YYYY-MM-DD>.xlsx`
pub fn report_file_name(prefix: &str, as_of: NaiveDate) -> String {
    format!("{}_{}.xlsx", prefix, as_of.format("%Y-%m-%d"))
}

impl OutputSink {
    /// File sink for the dated default name inside `dir`
    pub fn in_directory(dir: &Path, prefix: &str, as_of: NaiveDate) -> Self {
        OutputSink::File(dir.join(report_file_name(prefix, as_of)))
    }

    pub fn write(&self, report: &Report) -> Result<Written> {
        let mut workbook = excel::build_workbook(report).context("Failed to build report workbook")?;

        match self {
            OutputSink::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
                workbook
                    .save(path)
                    .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;
                log::info!("Report for {} written to: {}", report.as_of, path.display());
                Ok(Written::File(path.clone()))
            }
            OutputSink::Memory => {
                let bytes = workbook
                    .save_to_buffer()
                    .context("Failed to render Excel workbook")?;
                log::info!("Report for {} rendered in memory ({} bytes)", report.as_of, bytes.len());
                Ok(Written::Bytes(bytes))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ReportOptions, Table, Value, build_report, sheet_names};
    use calamine::{Data, Reader, Xlsx, open_workbook, open_workbook_from_rs};
    use std::io::Cursor;

    fn sample_report() -> Report {
        let mut raw = Table::new([
            "Order Status",
            "Order Creation Date",
            "Main Offer",
            "Subscription",
            "Order Category",
            "Modelo Comercial",
            "Fecha Activación",
        ]);
        let rows = [
            ["Completed", "2024-03-01", "Fiber", "S1", "SalesOrder", "Retail", "2024-03-04"],
            ["Completed", "2024-03-09", "Fiber", "S2", "SalesOrder", "Wholesale", ""],
            ["Completed", "2024-01-09", "Mobile", "S3", "SalesOrder", "Retail", ""],
            ["InProgress", "2024-02-01", "Fiber", "S4", "Deactivation", "Retail", ""],
            ["InProgress", "2024-02-20", "Mobile", "S5", "SalesOrder", "Retail", ""],
        ];
        for row in rows {
            raw.push_row(row.into_iter().map(Value::from_cell).collect());
        }
        build_report(raw, &ReportOptions::new(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap())).unwrap()
    }

    fn read_back(bytes: Vec<u8>) -> Xlsx<Cursor<Vec<u8>>> {
        open_workbook_from_rs(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn test_report_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        assert_eq!(report_file_name("general_report", date), "general_report_2024-03-11.xlsx");
    }

    #[test]
    fn test_workbook_sheet_order() {
        let Written::Bytes(bytes) = OutputSink::Memory.write(&sample_report()).unwrap() else {
            panic!("memory sink must return bytes");
        };

        let workbook = read_back(bytes);
        assert_eq!(
            workbook.sheet_names().to_vec(),
            vec![
                "All Orders",
                "Open Orders",
                "Top 20 + Open",
                "Deactivations",
                "Activations by Model"
            ]
        );
    }

    #[test]
    fn test_activation_blocks_are_positioned() {
        let Written::Bytes(bytes) = OutputSink::Memory.write(&sample_report()).unwrap() else {
            panic!("memory sink must return bytes");
        };

        let mut workbook = read_back(bytes);
        let range = workbook.worksheet_range(sheet_names::ACTIVATIONS).unwrap();

        // March block: title, header, 1 offer + total, 2 blank rows
        assert_eq!(range.get_value((0, 0)), Some(&Data::String("MARZO 2024".into())));
        assert_eq!(range.get_value((1, 0)), Some(&Data::String("OFERTA".into())));
        assert_eq!(range.get_value((1, 3)), Some(&Data::String("Suma total".into())));
        assert_eq!(range.get_value((3, 3)), Some(&Data::Float(2.0)));
        assert_eq!(range.get_value((6, 0)), Some(&Data::String("ENERO 2024".into())));
    }

    #[test]
    fn test_table_sheet_contents() {
        let Written::Bytes(bytes) = OutputSink::Memory.write(&sample_report()).unwrap() else {
            panic!("memory sink must return bytes");
        };

        let mut workbook = read_back(bytes);
        let range = workbook.worksheet_range(sheet_names::TOP_OPEN).unwrap();

        assert_eq!(range.height(), 2);
        let header: Vec<String> = range.rows().next().unwrap().iter().map(|c| c.to_string()).collect();
        assert!(header.contains(&"DIAS ABIERTA".to_string()));
        assert!(!header.contains(&"FECHA DE ACTIVACION".to_string()));
        assert!(header.contains(&"FECHA DE CREACION".to_string()));
    }

    #[test]
    fn test_file_sink_writes_dated_file() {
        let dir = tempfile::tempdir().unwrap();
        let as_of = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let sink = OutputSink::in_directory(&dir.path().join("out"), "general_report", as_of);

        let written = sink.write(&sample_report()).unwrap();

        let Written::File(path) = written else {
            panic!("file sink must return a path");
        };
        assert!(path.ends_with("general_report_2024-03-11.xlsx"));
        let workbook: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(workbook.sheet_names().len(), 5);
    }
}
