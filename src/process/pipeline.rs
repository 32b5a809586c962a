//! Sorting driver
//!
//! Walks a manifest once scopes are known:
//! - scope headers and closers stay where they are, bodies recurse
//! - inside every scope-free span, each declaration run becomes a [`Region`]
//!   that is segmented, sorted and rendered back
//! - every other line passes through untouched

use std::ops::Range;

use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::parser::{split_lines, Patterns};
use crate::scope::{locate, Scope};
use crate::sort::Region;

/// Sorts declarations in manifest text for one keyword vocabulary
#[derive(Debug, Clone)]
pub struct GemfileSorter {
    patterns: Patterns,
}

impl Default for GemfileSorter {
    fn default() -> Self {
        Self {
            patterns: Patterns::default_patterns().clone(),
        }
    }
}

impl GemfileSorter {
    /// Build a sorter for `config`'s vocabulary
    pub fn new(config: &Config) -> Result<Self> {
        if let Some(reason) = config.validate() {
            return Err(Error::Config(reason));
        }
        Ok(Self {
            patterns: Patterns::new(config)?,
        })
    }

    /// Sort every declaration run in `text`
    ///
    /// Total and idempotent: ambiguous input is returned unchanged, and
    /// sorting sorted text is the identity.
    #[must_use]
    pub fn sort_contents(&self, text: &str) -> String {
        let source = split_lines(text);
        if source.is_empty() {
            return String::new();
        }

        let scopes = locate(&source.lines, &self.patterns);
        debug!(lines = source.len(), scopes = scopes.len(), "sorting manifest");

        let mut out = Vec::with_capacity(source.len());
        self.sort_span(&source.lines, 0..source.len(), &scopes, &mut out);
        debug_assert_eq!(out.len(), source.len());

        source.join(&out)
    }

    /// Check if `text` is already sorted
    #[must_use]
    pub fn is_sorted(&self, text: &str) -> bool {
        self.sort_contents(text) == text
    }

    /// Emit `range`, sorting the runs between (and inside) `scopes`
    fn sort_span(&self, lines: &[String], range: Range<usize>, scopes: &[Scope], out: &mut Vec<String>) {
        let mut pos = range.start;

        for scope in scopes {
            self.sort_run(lines, pos..scope.header, out);
            out.push(lines[scope.header].clone());
            self.sort_span(lines, scope.body.clone(), &scope.children, out);
            out.push(lines[scope.closer].clone());
            pos = scope.closer + 1;
        }

        self.sort_run(lines, pos..range.end, out);
    }

    /// Emit a scope-free run of lines, sorting each declaration region in it
    fn sort_run(&self, lines: &[String], range: Range<usize>, out: &mut Vec<String>) {
        let mut pos = range.start;

        while pos < range.end {
            if !self.starts_region(lines, pos, range.end) {
                out.push(lines[pos].clone());
                pos += 1;
                continue;
            }

            let region = Region::parse(lines, pos..range.end, &self.patterns);
            if region.unsortable {
                debug!(line = pos + 1, "leaving region unchanged");
            } else {
                trace!(start = region.start, end = region.end, entries = region.entries.len(), "region");
            }
            out.extend(region.render(lines));
            pos = region.end;
        }
    }

    /// A declaration, or comments sitting directly on top of one
    fn starts_region(&self, lines: &[String], pos: usize, end: usize) -> bool {
        let mut i = pos;
        while i < end && self.patterns.is_comment(&lines[i]) {
            i += 1;
        }
        i < end && self.patterns.is_declaration(&lines[i])
    }
}

/// Sort `text` with the default Gemfile vocabulary
#[must_use]
pub fn sort(text: &str) -> String {
    GemfileSorter::default().sort_contents(text)
}

/// Check if `text` is sorted under the default Gemfile vocabulary
#[must_use]
pub fn is_sorted(text: &str) -> bool {
    GemfileSorter::default().is_sorted(text)
}
