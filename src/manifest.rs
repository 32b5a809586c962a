//! Manifest discovery
//!
//! Finds the manifest a bare `gemsort` invocation (or the install hook)
//! should sort, and expands CLI inputs into the list of files to process.

use std::path::{Component, Path, PathBuf};

use glob::Pattern;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Find the nearest manifest, looking in `start_dir` and then its ancestors
///
/// Within one directory the first matching name in `names` wins.
pub fn find_manifest(start_dir: &Path, names: &[String]) -> Result<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in names {
            let candidate = dir.join(name);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "found manifest");
                return Ok(candidate);
            }
        }
    }

    Err(Error::ManifestNotFound {
        start: start_dir.to_path_buf(),
    })
}

/// Expand CLI inputs into manifest paths
///
/// Files are taken as given. Directories contribute the files whose name is
/// one of `names`: direct children only, or the whole tree when `recursive`.
/// Paths matching any `excludes` glob are skipped.
#[must_use]
pub fn collect_files(
    inputs: &[PathBuf],
    recursive: bool,
    excludes: &[String],
    names: &[String],
) -> Vec<PathBuf> {
    let exclude_patterns: Vec<Pattern> = excludes
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!("ignoring exclude pattern {p:?}: {e}");
                None
            }
        })
        .collect();

    let mut files = Vec::new();

    for input in inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            if recursive {
                // follow_links reports symlink loops as errors; those are skipped
                for entry in WalkDir::new(input)
                    .follow_links(true)
                    .max_depth(256)
                    .into_iter()
                    .filter_entry(|e| e.depth() == 0 || !is_excluded(e.path(), &exclude_patterns))
                    .filter_map(std::result::Result::ok)
                {
                    let path = entry.path();
                    if path.is_file() && is_manifest(path, names) {
                        files.push(path.to_path_buf());
                    }
                }
            } else if let Ok(entries) = std::fs::read_dir(input) {
                let mut children: Vec<PathBuf> = entries
                    .filter_map(std::result::Result::ok)
                    .map(|entry| entry.path())
                    .filter(|path| {
                        path.is_file()
                            && is_manifest(path, names)
                            && !is_excluded(path, &exclude_patterns)
                    })
                    .collect();
                children.sort();
                files.extend(children);
            }
        } else {
            warn!("no such file or directory: {}", input.display());
        }
    }

    files
}

/// Check if the file name is one of the manifest names
fn is_manifest(path: &Path, names: &[String]) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| names.iter().any(|n| n == name))
}

/// Check if a path matches any exclusion pattern
///
/// A pattern matches the full path, the file name, or any single component.
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
            || path.components().any(|component| match component {
                Component::Normal(c) => pattern.matches(&c.to_string_lossy()),
                _ => false,
            })
    })
}
