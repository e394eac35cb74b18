//! Report configuration loaded from TOML
//!
//! Lookup order: explicit `--config` path, then
//! `~/.config/order-report/config.toml` when it exists, then built-in
//! defaults. Every key is optional.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::report::{AggregateOptions, ReportOptions};

const APP_DIR: &str = "order-report";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub report: LayoutConfig,
}

/// Where exports are found and how they are read
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    pub directory: PathBuf,
    /// Regex matched against file names during discovery
    pub pattern: String,
    /// Single-byte field delimiter
    pub delimiter: char,
    /// Read slash dates as day/month/year
    pub day_first: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            pattern: r"^.*_.*\.csv$".to_string(),
            delimiter: ',',
            day_first: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_prefix: "general_report".to_string(),
        }
    }
}

/// Report shape
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub top_open_limit: usize,
    pub block_gap: u32,
    pub total_label: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            top_open_limit: 20,
            block_gap: 2,
            total_label: "Suma total".to_string(),
        }
    }
}

impl ReportConfig {
    /// Load from `path`, or the default location, or fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    log::debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.input.delimiter.is_ascii() {
            bail!("input.delimiter must be a single ASCII character, got '{}'", self.input.delimiter);
        }
        if self.output.file_prefix.trim().is_empty() {
            bail!("output.file_prefix cannot be empty");
        }
        Ok(())
    }

    pub fn delimiter(&self) -> u8 {
        // validate() guarantees ASCII
        self.input.delimiter as u8
    }

    /// Pipeline options for a run dated `as_of`
    pub fn report_options(&self, as_of: NaiveDate) -> ReportOptions {
        ReportOptions {
            as_of,
            top_open_limit: self.report.top_open_limit,
            day_first: self.input.day_first,
            aggregate: AggregateOptions {
                total_label: self.report.total_label.clone(),
                block_gap: self.report.block_gap,
            },
        }
    }
}

/// `~/.config/order-report/config.toml` (platform config dir)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ReportConfig::parse("").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.report.top_open_limit, 20);
        assert_eq!(config.output.file_prefix, "general_report");
        assert_eq!(config.delimiter(), b',');
    }

    #[test]
    fn test_partial_config_overrides() {
        let config = ReportConfig::parse(
            r#"
            [input]
            delimiter = ";"
            day_first = true

            [report]
            total_label = "Total"
            "#,
        )
        .unwrap();

        assert_eq!(config.delimiter(), b';');
        assert!(config.input.day_first);
        assert_eq!(config.input.pattern, r"^.*_.*\.csv$");

        let options = config.report_options(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(options.aggregate.total_label, "Total");
        assert_eq!(options.aggregate.block_gap, 2);
        assert!(options.day_first);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(ReportConfig::parse("[input]\ndelimiter = \"é\"\n").is_err());
        assert!(ReportConfig::parse("[output]\nfile_prefix = \"  \"\n").is_err());
        assert!(ReportConfig::parse("[unknown]\nkey = 1\n").is_err());
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[report]\ntop_open_limit = 5\n").unwrap();

        let config = ReportConfig::load(Some(&path)).unwrap();
        assert_eq!(config.report.top_open_limit, 5);

        assert!(ReportConfig::load(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
