//! Batch report generation

mod handler;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;

pub use handler::handle_generate_command;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Export to process (skips discovery); `-` reads CSV from stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory searched for the newest export (defaults to input.directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Output file (defaults to <output.directory>/general_report_<date>.xlsx); `-` writes to stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Reference date for days open, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Open the report when done
    #[arg(long)]
    pub open: bool,
}
