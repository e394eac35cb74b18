//! Command-line interface definition

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::generate::GenerateArgs;
pub use commands::interactive::InteractiveArgs;

#[derive(Parser)]
#[command(name = "order-report")]
#[command(about = "Build the general service-order report workbook from an order export")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ~/.config/order-report/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the report from an export (newest matching file by default)
    Generate(GenerateArgs),
    /// Prompt for an export, generate the report and offer to open it
    Interactive(InteractiveArgs),
}
