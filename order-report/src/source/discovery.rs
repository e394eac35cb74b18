//! Locate the newest order export in a directory

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use regex::Regex;

/// Most recently modified file in `dir` whose name matches `pattern`
///
/// Only the directory itself is scanned. Returns `Ok(None)` when nothing
/// matches; unreadable entries are skipped.
pub fn find_latest_input(dir: &Path, pattern: &str) -> Result<Option<PathBuf>> {
    let re = Regex::new(pattern).with_context(|| format!("Invalid input pattern: {}", pattern))?;

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory: {}", dir.display()))?;

    let mut latest: Option<(SystemTime, PathBuf)> = None;

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !re.is_match(name) {
            continue;
        }

        let modified = match entry.metadata().and_then(|m| m.modified()) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        log::debug!("Candidate input: {}", path.display());

        let newer = latest.as_ref().is_none_or(|(t, _)| modified > *t);
        if newer {
            latest = Some((modified, path));
        }
    }

    Ok(latest.map(|(_, path)| path))
}
