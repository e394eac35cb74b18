//! Render a report as an XLSX workbook

use anyhow::Result;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::report::{MonthBlock, Report, SheetContent, Table, Value};

/// Shared cell formats
struct Formats {
    header: Format,
    datetime: Format,
    title: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center),
            datetime: Format::new().set_num_format("yyyy-mm-dd hh:mm:ss"),
            title: Format::new().set_bold(),
        }
    }
}

/// Build the workbook for a report, one worksheet per sheet in order
pub fn build_workbook(report: &Report) -> Result<Workbook> {
    let formats = Formats::new();
    let mut workbook = Workbook::new();

    for sheet in &report.sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name)?;

        match &sheet.content {
            SheetContent::Table(table) => {
                write_table(worksheet, 0, table, &formats)?;
            }
            SheetContent::Blocks(blocks) => {
                write_blocks(worksheet, blocks, &formats)?;
            }
        }

        worksheet.autofit();
    }

    Ok(workbook)
}

/// Write header and rows starting at `start_row`; returns the next free row
fn write_table(ws: &mut Worksheet, start_row: u32, table: &Table, formats: &Formats) -> Result<u32> {
    for (col, name) in table.columns().iter().enumerate() {
        ws.write_string_with_format(start_row, col as u16, name, &formats.header)?;
    }

    let mut row = start_row + 1;
    for record in table.rows() {
        for (col, value) in record.cells().iter().enumerate() {
            write_value(ws, row, col as u16, value, formats)?;
        }
        row += 1;
    }

    Ok(row)
}

fn write_blocks(ws: &mut Worksheet, blocks: &[MonthBlock], formats: &Formats) -> Result<()> {
    for block in blocks {
        ws.write_string_with_format(block.start_row, 0, &block.title, &formats.title)?;
        write_table(ws, block.start_row + 1, &block.table, formats)?;
    }
    Ok(())
}

fn write_value(ws: &mut Worksheet, row: u32, col: u16, value: &Value, formats: &Formats) -> Result<()> {
    match value {
        Value::Null => { /* Leave cell empty */ }
        Value::Text(s) => {
            ws.write_string(row, col, s)?;
        }
        Value::Int(i) => {
            ws.write_number(row, col, *i as f64)?;
        }
        Value::Float(f) => {
            ws.write_number(row, col, *f)?;
        }
        Value::DateTime(dt) => {
            ws.write_datetime_with_format(row, col, dt, &formats.datetime)?;
        }
    }
    Ok(())
}
