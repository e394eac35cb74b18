//! Read order exports saved as Excel workbooks

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx, open_workbook};

use crate::report::{Table, Value};

/// Read the first worksheet of an XLSX file; the first row is the header
pub fn read_excel_file(path: &Path) -> Result<Table> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .context("Excel file has no sheets")?
        .clone();

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::default());
    };

    let mut table = Table::new(header.iter().map(header_text));
    for row in rows {
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        table.push_row(row.iter().map(cell_to_value).collect());
    }

    log::debug!(
        "Read {} rows x {} columns from sheet '{}'",
        table.len(),
        table.columns().len(),
        sheet_name
    );

    Ok(table)
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Convert an Excel cell to a table value
pub(crate) fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::from_cell(s),
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) => {
            // Whole numbers come back from Excel as floats
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                Value::Int(*f as i64)
            } else {
                Value::Float(*f)
            }
        }
        Data::Bool(b) => Value::Text(b.to_string()),
        Data::DateTime(dt) => dt.as_datetime().map(Value::DateTime).unwrap_or(Value::Null),
        Data::DateTimeIso(s) => Value::Text(s.clone()),
        Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Error(_) => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ReportError, ReportOptions, build_report};
    use chrono::NaiveDate;
    use rust_xlsxwriter::{Format, Workbook};

    fn created() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn write_export(path: &Path) {
        let mut workbook = Workbook::new();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        let sheet = workbook.add_worksheet();

        for (col, name) in ["Order Status", "Order Creation Date", "Subscription"]
            .iter()
            .enumerate()
        {
            sheet.write_string(0, col as u16, *name).unwrap();
        }

        sheet.write_string(1, 0, "Completed").unwrap();
        sheet
            .write_datetime_with_format(1, 1, &created(), &date_format)
            .unwrap();
        sheet.write_number(1, 2, 1001.0).unwrap();

        // Row 2 stays blank
        sheet.write_string(3, 0, "InProgress").unwrap();
        sheet.write_string(3, 2, "SUB-2").unwrap();

        workbook.save(path).unwrap();
    }

    #[test]
    fn test_read_excel_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders_march.xlsx");
        write_export(&path);

        let table = read_excel_file(&path).unwrap();

        assert_eq!(
            table.columns().to_vec(),
            vec![
                "Order Status".to_string(),
                "Order Creation Date".to_string(),
                "Subscription".to_string(),
            ]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0, "Order Creation Date"), &Value::DateTime(created()));
        assert_eq!(table.get(0, "Subscription"), &Value::Int(1001));
        assert_eq!(table.get(1, "Order Status"), &Value::from("InProgress"));
        assert_eq!(table.get(1, "Order Creation Date"), &Value::Null);
    }

    #[test]
    fn test_empty_first_sheet_is_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty_export.xlsx");
        let mut workbook = Workbook::new();
        workbook.add_worksheet();
        workbook.save(&path).unwrap();

        let table = read_excel_file(&path).unwrap();
        assert!(table.columns().is_empty());

        let options = ReportOptions::new(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(build_report(table, &options).unwrap_err(), ReportError::EmptyInput);
    }

    #[test]
    fn test_missing_workbook_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_excel_file(&dir.path().join("nope_1.xlsx")).is_err());
    }

    #[test]
    fn test_cell_to_value() {
        assert_eq!(cell_to_value(&Data::Empty), Value::Null);
        assert_eq!(cell_to_value(&Data::Float(12.0)), Value::Int(12));
        assert_eq!(cell_to_value(&Data::Float(1.5)), Value::Float(1.5));
        assert_eq!(cell_to_value(&Data::String("SUB-1".into())), Value::from("SUB-1"));
        assert_eq!(cell_to_value(&Data::String(String::new())), Value::Null);
        assert_eq!(cell_to_value(&Data::Bool(true)), Value::from("true"));
        assert_eq!(cell_to_value(&Data::Float(1e19)), Value::Float(1e19));
    }
}
