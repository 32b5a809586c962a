/// `Region` - segmentation, sorting and re-rendering of one declaration run
///
/// A region is scanned with a small state machine:
///
/// ```text
/// SeekingFormatting -> MaybeEntry -> InEntryBody -> SeekingFormatting ...
///                          |
///                          +-> Terminated (end of range, or a line that is
///                              neither formatting nor a declaration)
/// ```
///
/// Rendering only ever relocates whole lines. A region that cannot be sorted
/// safely renders as its original lines.
use std::ops::Range;

use tracing::{debug, trace};

use crate::parser::Patterns;
use crate::sort::entry::{statement_end, Entry, FormattingRun};

/// Scanner states while segmenting a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Collecting blank/comment lines for the next entry
    SeekingFormatting,
    /// Deciding whether the next line opens a declaration
    MaybeEntry,
    /// Consuming a declaration and its continuation lines
    InEntryBody,
    /// Done; everything after `end` is outside the region
    Terminated,
}

/// A segmented declaration run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// First line of the region
    pub start: usize,
    /// One past the last line consumed (entries and trailing run)
    pub end: usize,
    /// Blank lines ahead of the first entry; they stay at the top
    pub leading: FormattingRun,
    /// Entries in source order
    pub entries: Vec<Entry>,
    /// Formatting after the last entry; stays at the bottom
    pub trailing: FormattingRun,
    /// Set when the region must be emitted unchanged
    pub unsortable: bool,
}

impl Region {
    /// Segment the region that starts at `range.start`
    ///
    /// Scanning stops at the end of `range` or at the first line that is
    /// neither formatting nor a declaration.
    #[must_use]
    pub fn parse(lines: &[String], range: Range<usize>, patterns: &Patterns) -> Self {
        let mut entries = Vec::new();
        let mut formatting = Vec::new();
        let mut trailing = Vec::new();
        let mut pos = range.start;
        let mut state = ScanState::SeekingFormatting;

        while state != ScanState::Terminated {
            state = match state {
                ScanState::SeekingFormatting => {
                    while pos < range.end && patterns.is_blank_or_comment(&lines[pos]) {
                        formatting.push(lines[pos].clone());
                        pos += 1;
                    }
                    ScanState::MaybeEntry
                }
                ScanState::MaybeEntry => {
                    if pos < range.end && patterns.is_declaration(&lines[pos]) {
                        ScanState::InEntryBody
                    } else {
                        trailing = std::mem::take(&mut formatting);
                        ScanState::Terminated
                    }
                }
                ScanState::InEntryBody => {
                    let end = statement_end(lines, pos, range.end, patterns);
                    entries.push(Entry::new(
                        patterns.declared_name(&lines[pos]),
                        std::mem::take(&mut formatting),
                        lines[pos..end].to_vec(),
                    ));
                    pos = end;
                    ScanState::SeekingFormatting
                }
                ScanState::Terminated => ScanState::Terminated,
            };
        }

        let leading = entries
            .first_mut()
            .map(|entry| std::mem::take(&mut entry.leading_blanks))
            .unwrap_or_default();
        let trailing = FormattingRun::new(trailing);

        let unnamed = entries.iter().any(|entry| entry.name.is_none());
        let dangling = !entries.is_empty()
            && pos == range.end
            && at_hard_boundary(lines, range.end, patterns)
            && trailing.opens_with_comment();

        if unnamed {
            debug!(line = range.start + 1, "declaration without a name, region left unchanged");
        } else if dangling {
            debug!(line = range.start + 1, "comment trails the last declaration, region left unchanged");
        }

        Self {
            start: range.start,
            end: pos,
            leading: FormattingRun::new(leading),
            entries,
            trailing,
            unsortable: unnamed || dangling,
        }
    }

    /// Check if rendering will reorder anything
    #[must_use]
    pub fn is_sortable(&self) -> bool {
        !self.unsortable && self.entries.len() > 1
    }

    /// Render the region with its entries in case-insensitive name order
    ///
    /// Each entry keeps its comments and its blank-line spacing. The entry
    /// that lands first hands its blank lines to the one after it, so the
    /// region never gains a blank line at its top.
    #[must_use]
    pub fn render(&self, lines: &[String]) -> Vec<String> {
        if !self.is_sortable() {
            return lines[self.start..self.end].to_vec();
        }

        let mut order: Vec<&Entry> = self.entries.iter().collect();
        order.sort_by_cached_key(|entry| entry.sort_key());

        let mut out = Vec::with_capacity(self.end - self.start);
        out.extend_from_slice(&self.leading.lines);

        let mut deferred: &[String] = &[];
        for (position, entry) in order.iter().enumerate() {
            if position == 0 {
                deferred = &entry.leading_blanks;
            } else {
                out.extend_from_slice(deferred);
                deferred = &[];
                out.extend_from_slice(&entry.leading_blanks);
            }
            out.extend_from_slice(&entry.leading_formatting);
            out.extend_from_slice(&entry.statement);
        }
        out.extend_from_slice(deferred);
        out.extend_from_slice(&self.trailing.lines);

        debug_assert_eq!(out.len(), self.end - self.start);
        trace!(start = self.start, entries = self.entries.len(), "sorted region");
        out
    }
}

/// Whether the line at `index` ends the enclosing block (end of file or a closer)
fn at_hard_boundary(lines: &[String], index: usize, patterns: &Patterns) -> bool {
    index >= lines.len() || patterns.is_closer(&lines[index])
}

/// Sort the region starting at `range.start`; lines after it stay as they are
#[must_use]
pub fn sort_region(lines: &[String], range: Range<usize>, patterns: &Patterns) -> Vec<String> {
    let region = Region::parse(lines, range.clone(), patterns);
    let mut out = region.render(lines);
    out.extend_from_slice(&lines[region.end..range.end]);
    out
}
