/// Entries and formatting runs - the units a region is segmented into
use crate::parser::{indent_of, is_blank, Patterns};

/// One declaration plus the formatting lines directly above it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Declared name, `None` when it could not be extracted
    pub name: Option<String>,
    /// Pure blank lines at the top of the entry's formatting
    pub leading_blanks: Vec<String>,
    /// Remaining formatting (comments, and any blanks between them)
    pub leading_formatting: Vec<String>,
    /// The declaration line and its continuation lines
    pub statement: Vec<String>,
}

impl Entry {
    /// Build an entry, splitting leading blank lines off `formatting`
    #[must_use]
    pub fn new(name: Option<String>, mut formatting: Vec<String>, statement: Vec<String>) -> Self {
        let blank_count = formatting.iter().take_while(|line| is_blank(line)).count();
        let leading_formatting = formatting.split_off(blank_count);
        Self {
            name,
            leading_blanks: formatting,
            leading_formatting,
            statement,
        }
    }

    /// Case-insensitive ordering key
    #[must_use]
    pub fn sort_key(&self) -> Option<String> {
        self.name.as_deref().map(str::to_lowercase)
    }
}

/// Blank and comment lines not owned by any entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattingRun {
    pub lines: Vec<String>,
}

impl FormattingRun {
    #[must_use]
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Check if the run starts with a comment rather than a blank line
    #[must_use]
    pub fn opens_with_comment(&self) -> bool {
        self.lines.first().is_some_and(|line| !is_blank(line))
    }
}

/// End (exclusive) of the statement starting at `start`
///
/// Continuation lines are any non-blank lines deeper than the declaration,
/// or at/below its indentation when they are neither comments nor a
/// starter keyword. Scope headers and closers are never continuations, so a
/// statement can't carry block structure with it when it moves.
#[must_use]
pub fn statement_end(lines: &[String], start: usize, end: usize, patterns: &Patterns) -> usize {
    let base_indent = indent_of(&lines[start]);
    let mut i = start + 1;

    while i < end {
        let line = &lines[i];

        if is_blank(line) || patterns.is_scope_header(line) || patterns.is_closer(line) {
            break;
        }

        if indent_of(line) <= base_indent && (patterns.is_comment(line) || patterns.is_starter(line))
        {
            break;
        }

        i += 1;
    }

    i
}
