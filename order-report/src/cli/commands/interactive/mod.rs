//! Interactive single-file report generation

mod handler;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;

pub use handler::handle_interactive_command;

#[derive(Args, Debug)]
pub struct InteractiveArgs {
    /// Export to process; prompted for when omitted
    pub input: Option<PathBuf>,

    /// Reference date for days open, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}
