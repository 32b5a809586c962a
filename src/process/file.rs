//! File-level operations: sort one manifest on disk, stdin text, or the hook target

use std::fs;
use std::io::Write;
use std::path::Path;

use similar::TextDiff;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::manifest::find_manifest;
use crate::process::pipeline::GemfileSorter;

/// Manifests larger than this are refused (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// What to do with the sorted text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Rewrite the file when sorting changes it
    Write,
    /// Report `Error::NotSorted` instead of writing
    Check,
    /// Print the sorted text to stdout
    Stdout,
    /// Print a unified diff of the change to stdout
    Diff,
}

/// Result of processing one manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to change
    AlreadySorted,
    /// The file was rewritten
    Sorted,
    /// Output went to stdout (`Stdout` or `Diff` mode)
    Printed,
}

/// Sort the manifest at `path` according to `mode`
pub fn process_file(path: &Path, config: &Config, mode: Mode) -> Result<Outcome> {
    let size = fs::metadata(path)?.len();
    if size > MAX_FILE_SIZE {
        return Err(Error::TooLarge {
            path: path.to_path_buf(),
            size,
            limit: MAX_FILE_SIZE,
        });
    }

    let original = fs::read_to_string(path)?;
    let sorter = GemfileSorter::new(config)?;
    let sorted = sorter.sort_contents(&original);
    let label = path.display().to_string();

    let outcome = emit(&label, &original, &sorted, mode, &mut std::io::stdout().lock())?;
    if outcome == Outcome::Sorted {
        fs::write(path, &sorted)?;
        info!(path = %path.display(), "sorted");
    } else {
        debug!(path = %path.display(), ?outcome, "processed");
    }
    Ok(outcome)
}

/// Sort text that is not backed by a file (stdin), writing to `out`
///
/// `Write` mode behaves like `Stdout`: the sorted text is always printed.
pub fn process_text<W: Write>(
    text: &str,
    config: &Config,
    mode: Mode,
    out: &mut W,
) -> Result<Outcome> {
    let sorter = GemfileSorter::new(config)?;
    let sorted = sorter.sort_contents(text);
    let mode = if mode == Mode::Write { Mode::Stdout } else { mode };
    emit("<stdin>", text, &sorted, mode, out)
}

/// Decide the outcome and produce any printed output
fn emit<W: Write>(label: &str, original: &str, sorted: &str, mode: Mode, out: &mut W) -> Result<Outcome> {
    let changed = original != sorted;

    match mode {
        Mode::Check if changed => Err(Error::NotSorted { path: label.into() }),
        Mode::Stdout => {
            out.write_all(sorted.as_bytes())?;
            out.flush()?;
            Ok(Outcome::Printed)
        }
        Mode::Diff if changed => {
            let diff = TextDiff::from_lines(original, sorted);
            let mut unified = diff.unified_diff();
            unified
                .context_radius(3)
                .header(&format!("a/{label}"), &format!("b/{label}"));
            write!(out, "{unified}")?;
            out.flush()?;
            Ok(Outcome::Printed)
        }
        Mode::Write if changed => Ok(Outcome::Sorted),
        Mode::Check | Mode::Diff | Mode::Write => Ok(Outcome::AlreadySorted),
    }
}

/// Post-install hook: sort the manifest found from `start_dir`
///
/// Never fails. Any error is logged as a warning and `None` is returned.
pub fn run_hook(start_dir: &Path, config: &Config) -> Option<Outcome> {
    let result = find_manifest(start_dir, &config.manifest_names)
        .and_then(|path| process_file(&path, config, Mode::Write));

    match result {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            warn!("gemsort hook skipped: {e}");
            None
        }
    }
}
