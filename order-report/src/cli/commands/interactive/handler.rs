//! Interactive command handler

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use colored::*;
use dialoguer::{Confirm, Input};
use is_terminal::IsTerminal;

use super::InteractiveArgs;
use crate::cli::commands::{print_summary, today, try_open_file};
use crate::config::ReportConfig;
use crate::services::run_report;
use crate::sink::{OutputSink, Written};
use crate::source::InputSource;

/// Handle `interactive`: one export in, one report out, then offer to open it
pub fn handle_interactive_command(args: InteractiveArgs, config: &ReportConfig) -> Result<()> {
    let interactive_stdin = std::io::stdin().is_terminal();

    let input = match args.input {
        Some(path) => path,
        None if interactive_stdin => prompt_for_input()?,
        None => bail!("No input file given and stdin is not a terminal to prompt on"),
    };
    let as_of = args.as_of.unwrap_or_else(today);

    println!("Processing: {}", input.display().to_string().cyan());

    let source = InputSource::from_path(input);
    let sink = OutputSink::in_directory(&config.output.directory, &config.output.file_prefix, as_of);
    let summary = run_report(&source, &sink, config, &config.report_options(as_of))?;

    // The report is already written; nothing below may fail the run
    if let Err(e) = print_summary(&mut std::io::stdout(), &summary) {
        log::warn!("Could not print the run summary: {}", e);
    }

    if let Written::File(path) = &summary.output {
        if wants_to_open(interactive_stdin, confirm_open) {
            try_open_file(path);
        }
    }

    Ok(())
}

fn confirm_open() -> Result<bool> {
    Confirm::new()
        .with_prompt("Open the report now?")
        .default(true)
        .interact()
        .context("Failed to read confirmation")
}

/// Ask only on a terminal; a failed prompt means "don't open"
fn wants_to_open<F>(interactive_stdin: bool, ask: F) -> bool
where
    F: FnOnce() -> Result<bool>,
{
    if !interactive_stdin {
        log::debug!("stdin is not a terminal; not offering to open the report");
        return false;
    }

    match ask() {
        Ok(open) => open,
        Err(e) => {
            log::warn!("Could not ask whether to open the report: {:#}", e);
            false
        }
    }
}

fn prompt_for_input() -> Result<PathBuf> {
    let raw: String = Input::new()
        .with_prompt("Path to the order export (.csv or .xlsx)")
        .validate_with(|s: &String| -> Result<(), String> {
            if Path::new(s.trim()).is_file() {
                Ok(())
            } else {
                Err(format!("No file at '{}'", s.trim()))
            }
        })
        .interact_text()
        .context("Failed to read input path")?;

    Ok(PathBuf::from(raw.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_no_prompt_without_terminal() {
        let mut asked = false;
        let open = wants_to_open(false, || {
            asked = true;
            Ok(true)
        });

        assert!(!open);
        assert!(!asked);
    }

    #[test]
    fn test_failed_prompt_means_do_not_open() {
        assert!(!wants_to_open(true, || Err(anyhow!("IO error: not a terminal"))));
    }

    #[test]
    fn test_answer_is_respected() {
        assert!(wants_to_open(true, || Ok(true)));
        assert!(!wants_to_open(true, || Ok(false)));
    }
}
