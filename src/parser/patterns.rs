/// Keyword patterns for manifest lines
///
/// The vocabulary (declaration, scope and closer keywords, comment prefix,
/// statement starters) comes from [`Config`], so nothing in the segmentation
/// logic is tied to one host DSL. The default Gemfile vocabulary is compiled
/// once at first use.
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::config::Config;
use crate::error::Result;
use crate::parser::lines::is_blank;

/// Patterns for the default configuration.
///
/// # Panics
///
/// Panics on first access if the default vocabulary fails to compile. The
/// default keywords are constants escaped into a fixed template and are
/// verified by tests.
static DEFAULT_PATTERNS: LazyLock<Patterns> = LazyLock::new(|| {
    Patterns::new(&Config::default())
        .unwrap_or_else(|e| panic!("Invalid default keyword patterns: {e}"))
});

/// Compiled keyword matchers for one vocabulary
#[derive(Debug, Clone)]
pub struct Patterns {
    declaration: String,
    scope: String,
    closer: String,
    comment: String,
    starters: Vec<String>,
    /// `<kw> "name"` or `<kw>('name')`, capturing the name
    name_re: Regex,
}

impl Patterns {
    /// Compile the matchers for `config`'s vocabulary
    pub fn new(config: &Config) -> Result<Self> {
        let name_re = RegexBuilder::new(&format!(
            r#"^{}(?:\s+|\s*\(\s*)["']([^"']+)["']"#,
            regex::escape(&config.declaration_keyword)
        ))
        .unicode(true)
        .build()?;

        Ok(Self {
            declaration: config.declaration_keyword.clone(),
            scope: config.scope_keyword.clone(),
            closer: config.closer_keyword.clone(),
            comment: config.comment_prefix.trim().to_string(),
            starters: config.starters().into_iter().map(str::to_string).collect(),
            name_re,
        })
    }

    /// Shared patterns for the default (Gemfile) vocabulary
    #[must_use]
    pub fn default_patterns() -> &'static Patterns {
        &DEFAULT_PATTERNS
    }

    /// Check if a line is a comment
    #[must_use]
    pub fn is_comment(&self, line: &str) -> bool {
        line.trim_start().starts_with(&self.comment)
    }

    /// Check if a line is blank or a comment (formatting material)
    #[must_use]
    pub fn is_blank_or_comment(&self, line: &str) -> bool {
        is_blank(line) || self.is_comment(line)
    }

    /// Check if a line starts a declaration (`gem "x"`, `gem("x")`)
    #[must_use]
    pub fn is_declaration(&self, line: &str) -> bool {
        !self.is_comment(line) && opens_with(line.trim_start(), &self.declaration)
    }

    /// Check if a line opens a scope (`group :test do`, `group(:test) do`)
    #[must_use]
    pub fn is_scope_header(&self, line: &str) -> bool {
        !self.is_comment(line) && opens_with(line.trim_start(), &self.scope)
    }

    /// Check if a line closes a scope
    #[must_use]
    pub fn is_closer(&self, line: &str) -> bool {
        starts_with_word(line.trim_start(), &self.closer)
    }

    /// Check if a line begins with any statement-starting keyword
    #[must_use]
    pub fn is_starter(&self, line: &str) -> bool {
        let stripped = line.trim_start();
        self.starters
            .iter()
            .any(|keyword| starts_with_word(stripped, keyword))
    }

    /// Extract the declared name from a declaration line
    ///
    /// Returns `None` for non-declarations and for declarations whose name is
    /// not a quoted string literal right after the keyword.
    #[must_use]
    pub fn declared_name(&self, line: &str) -> Option<String> {
        if !self.is_declaration(line) {
            return None;
        }
        self.name_re
            .captures(line.trim_start())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// `keyword` followed by whitespace or an opening parenthesis
///
/// The line terminator does not count: a bare keyword is not a statement.
fn opens_with(stripped: &str, keyword: &str) -> bool {
    stripped
        .strip_prefix(keyword)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| (c.is_whitespace() && c != '\n' && c != '\r') || c == '(')
}

/// `keyword` followed by a non-word character or the end of the line
fn starts_with_word(stripped: &str, keyword: &str) -> bool {
    stripped.strip_prefix(keyword).is_some_and(|rest| {
        rest.chars()
            .next()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_'))
    })
}
