//! One complete report run: load, transform, write

use std::time::Instant;

use anyhow::{Context, Result};

use crate::config::ReportConfig;
use crate::report::{ReportOptions, SheetContent, build_report};
use crate::sink::{OutputSink, Written};
use crate::source::InputSource;

/// What a run produced, for display
#[derive(Debug)]
pub struct RunSummary {
    pub output: Written,
    /// (sheet name, data rows) in workbook order; block sheets count blocks
    pub sheets: Vec<(&'static str, usize)>,
}

/// Read `source`, build the report and hand it to `sink`
///
/// Fails without writing anything if the input cannot be read or lacks a
/// required field.
pub fn run_report(
    source: &InputSource,
    sink: &OutputSink,
    config: &ReportConfig,
    options: &ReportOptions,
) -> Result<RunSummary> {
    let started = Instant::now();
    log::info!("Processing input: {}", source);

    let raw = source.load(config.delimiter())?;
    if !raw.columns().is_empty() && raw.is_empty() {
        log::warn!("{} has no data rows; the report will only carry headers", source);
    }
    let report = build_report(raw, options)
        .with_context(|| format!("Cannot build report from {}", source))?;

    let sheets = report
        .sheets
        .iter()
        .map(|sheet| {
            let size = match &sheet.content {
                SheetContent::Table(table) => table.len(),
                SheetContent::Blocks(blocks) => blocks.len(),
            };
            (sheet.name, size)
        })
        .collect();

    let output = sink.write(&report)?;

    log::debug!("Report run finished in {:.2}ms", started.elapsed().as_secs_f64() * 1000.0);

    Ok(RunSummary { output, sheets })
}
