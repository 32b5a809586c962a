/// Scope locator - finds `header ... closer` blocks by indentation
///
/// A header opens a scope at its own indentation. Deeper headers open nested
/// scopes; a closer at exactly the header's indentation ends the scope. A
/// header that never meets its closer is not a scope, and neither is any
/// scope containing it.
use tracing::{debug, trace};

use crate::parser::{indent_of, Patterns};
use crate::scope::Scope;

/// Locate all top-level scopes in `lines`, each carrying its nested scopes
#[must_use]
pub fn locate(lines: &[String], patterns: &Patterns) -> Vec<Scope> {
    let mut scopes = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if patterns.is_scope_header(&lines[i]) {
            if let Some(scope) = match_scope(lines, i, patterns) {
                trace!(header = scope.header, closer = scope.closer, "located scope");
                i = scope.closer + 1;
                scopes.push(scope);
                continue;
            }
            debug!(line = i + 1, "scope header without matching closer, left as text");
        }
        i += 1;
    }

    scopes
}

/// Find the closer for the header at `header`, collecting nested scopes
fn match_scope(lines: &[String], header: usize, patterns: &Patterns) -> Option<Scope> {
    let header_indent = indent_of(&lines[header]);
    let mut children = Vec::new();
    let mut i = header + 1;

    while i < lines.len() {
        let line = &lines[i];
        let indent = indent_of(line);

        if patterns.is_scope_header(line) && indent > header_indent {
            let nested = match_scope(lines, i, patterns)?;
            i = nested.closer + 1;
            children.push(nested);
            continue;
        }

        if patterns.is_closer(line) && indent == header_indent {
            return Some(Scope {
                header,
                body: header + 1..i,
                closer: i,
                children,
            });
        }

        i += 1;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(|l| format!("{l}\n")).collect()
    }

    fn locate_default(text: &str) -> Vec<Scope> {
        locate(&lines(text), Patterns::default_patterns())
    }

    #[test]
    fn test_single_scope() {
        let scopes = locate_default(
            "source \"https://rubygems.org\"\n\ngroup :development do\n  gem \"b\"\n  gem \"a\"\nend\n",
        );
        assert_eq!(scopes.len(), 1);
        assert_eq!(scopes[0].header, 2);
        assert_eq!(scopes[0].body, 3..5);
        assert_eq!(scopes[0].closer, 5);
        assert!(scopes[0].children.is_empty());
    }

    #[test]
    fn test_sibling_scopes() {
        let scopes = locate_default(
            "group :development do\n  gem \"b\"\nend\n\ngroup :test do\n  gem \"a\"\nend\n",
        );
        assert_eq!(scopes.len(), 2);
        assert_eq!((scopes[0].header, scopes[0].closer), (0, 2));
        assert_eq!((scopes[1].header, scopes[1].closer), (4, 6));
    }

    #[test]
    fn test_nested_scope() {
        let scopes = locate_default(
            "group :development do\n  gem \"b\"\n  group :debug do\n    gem \"z\"\n    gem \"y\"\n  end\n  gem \"a\"\nend\n",
        );
        assert_eq!(scopes.len(), 1);
        let outer = &scopes[0];
        assert_eq!((outer.header, outer.closer), (0, 7));
        assert_eq!(outer.children.len(), 1);
        let inner = &outer.children[0];
        assert_eq!(inner.header, 2);
        assert_eq!(inner.body, 3..5);
        assert_eq!(inner.closer, 5);
    }

    #[test]
    fn test_closer_must_match_indentation() {
        // The indented `end` closes the `if`, not the group
        let scopes = locate_default(
            "group :test do\n  if ENV[\"CI\"]\n    gem \"b\"\n  end\n  gem \"a\"\nend\n",
        );
        assert_eq!(scopes.len(), 1);
        assert_eq!(scopes[0].closer, 5);
    }

    #[test]
    fn test_unterminated_scope_is_not_a_scope() {
        let scopes = locate_default("group :test do\n  gem \"b\"\n  gem \"a\"\n");
        assert!(scopes.is_empty());
    }

    #[test]
    fn test_unterminated_nested_scope_fails_outer() {
        let scopes = locate_default(
            "group :test do\n  group :inner do\n    gem \"b\"\nend\n",
        );
        assert!(scopes.is_empty());
    }

    #[test]
    fn test_unterminated_header_does_not_hide_later_scope() {
        let scopes = locate_default(
            "  group :broken do\ngem \"x\"\ngroup :test do\n  gem \"a\"\nend\n",
        );
        // The broken header scans to EOF without a closer at indent 2 and is
        // skipped; the real group is still found.
        assert_eq!(scopes.len(), 1);
        assert_eq!(scopes[0].header, 2);
    }

    #[test]
    fn test_commented_header_is_ignored() {
        let scopes = locate_default("# group :test do\ngem \"a\"\nend\n");
        assert!(scopes.is_empty());
    }

    #[test]
    fn test_empty_body() {
        let scopes = locate_default("group :test do\nend\n");
        assert_eq!(scopes.len(), 1);
        assert!(scopes[0].body.is_empty());
    }

    #[test]
    fn test_parenthesized_header() {
        let scopes = locate_default("group(:test) do\n  gem \"a\"\nend\n");
        assert_eq!(scopes.len(), 1);
    }
}
