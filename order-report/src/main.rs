mod cli;
mod config;
mod report;
mod services;
mod sink;
mod source;

use anyhow::Result;
use clap::Parser;
use colored::*;

use cli::commands::generate::handle_generate_command;
use cli::commands::interactive::handle_interactive_command;
use cli::{Cli, Commands};
use config::ReportConfig;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ReportConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(args) => handle_generate_command(args, &config),
        Commands::Interactive(args) => handle_interactive_command(args, &config),
    }
}

/// `RUST_LOG` wins; otherwise info, or debug with --verbose
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .init();
}
