//! Generate command handler

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use colored::*;

use super::GenerateArgs;
use crate::cli::commands::{print_summary, today, try_open_file};
use crate::config::ReportConfig;
use crate::services::run_report;
use crate::sink::{OutputSink, Written};
use crate::source::{InputSource, find_latest_input};

/// Path argument standing for stdin or stdout
const STDIO: &str = "-";

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO
}

/// Handle `generate`: pick the export, build the report, write it
///
/// Finding no export is reported and ends the command successfully.
pub fn handle_generate_command(args: GenerateArgs, config: &ReportConfig) -> Result<()> {
    let as_of = args.as_of.unwrap_or_else(today);
    let sink = resolve_sink(args.output, config, as_of);

    // Status lines must not interleave with workbook bytes on stdout
    let mut console: Box<dyn Write> = match sink {
        OutputSink::Memory => Box::new(std::io::stderr()),
        OutputSink::File(_) => Box::new(std::io::stdout()),
    };

    let source = match args.input {
        Some(path) if is_stdio(&path) => InputSource::from_reader(std::io::stdin().lock())?,
        Some(path) => {
            if !path.is_file() {
                bail!("Input file does not exist: {}", path.display());
            }
            InputSource::from_path(path)
        }
        None => {
            let dir = args.dir.unwrap_or_else(|| config.input.directory.clone());
            match find_latest_input(&dir, &config.input.pattern)? {
                Some(path) => {
                    writeln!(
                        console,
                        "Processing newest export: {}",
                        path.display().to_string().cyan()
                    )?;
                    InputSource::from_path(path)
                }
                None => {
                    writeln!(
                        console,
                        "{} No export matching '{}' found in {}",
                        "⚠".yellow(),
                        config.input.pattern,
                        dir.display()
                    )?;
                    log::warn!("No input found; nothing generated");
                    return Ok(());
                }
            }
        }
    };

    let summary = run_report(&source, &sink, config, &config.report_options(as_of))?;

    if let Written::Bytes(bytes) = &summary.output {
        emit_bytes(std::io::stdout().lock(), bytes)?;
    }
    print_summary(&mut *console, &summary)?;

    if args.open {
        if let Written::File(path) = &summary.output {
            try_open_file(path);
        }
    }

    Ok(())
}

/// `-` streams the workbook to stdout, anything else is a file path
fn resolve_sink(output: Option<PathBuf>, config: &ReportConfig, as_of: NaiveDate) -> OutputSink {
    match output {
        Some(path) if is_stdio(&path) => OutputSink::Memory,
        Some(path) => OutputSink::File(path),
        None => OutputSink::in_directory(
            &config.output.directory,
            &config.output.file_prefix,
            as_of,
        ),
    }
}

fn emit_bytes(mut out: impl Write, bytes: &[u8]) -> Result<()> {
    out.write_all(bytes).context("Failed to write report to stdout")?;
    out.flush().context("Failed to flush stdout")?;
    Ok(())
}
