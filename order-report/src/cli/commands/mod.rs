//! Subcommand handlers and shared console output

pub mod generate;
pub mod interactive;

use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use colored::*;

use crate::services::RunSummary;
use crate::sink::Written;

/// Local calendar date of the run
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Print the per-sheet summary of a finished run
///
/// `out` is stderr when stdout carries the workbook itself.
pub fn print_summary(out: &mut dyn Write, summary: &RunSummary) -> std::io::Result<()> {
    for (name, size) in &summary.sheets {
        writeln!(out, "  {} {}", format!("{:<22}", name).dimmed(), size)?;
    }

    match &summary.output {
        Written::File(path) => writeln!(
            out,
            "{} Report generated: {}",
            "✓".bright_green(),
            path.display().to_string().bright_green()
        ),
        Written::Bytes(bytes) => writeln!(
            out,
            "{} Report written to stdout ({} bytes)",
            "✓".bright_green(),
            bytes.len()
        ),
    }
}

/// Try to open the file with the system default application
pub fn try_open_file(path: &Path) {
    #[cfg(target_os = "windows")]
    {
        let _ = std::process::Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .spawn();
    }

    #[cfg(target_os = "macos")]
    {
        let _ = std::process::Command::new("open").arg(path).spawn();
    }

    #[cfg(target_os = "linux")]
    {
        let _ = std::process::Command::new("xdg-open").arg(path).spawn();
    }
}
