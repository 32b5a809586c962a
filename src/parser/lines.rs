/// `SourceLines` - Splits manifest text into relocatable lines
///
/// Every line keeps its own terminator so that lines can be moved around and
/// concatenated back without touching a single byte of their content.

/// Manifest text split into lines, each ending with its line terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLines {
    /// The physical lines, terminators included
    pub lines: Vec<String>,
    /// Terminator appended to an unterminated last line, stripped again on join
    synthetic_eol: Option<&'static str>,
}

impl SourceLines {
    /// Split `text` into lines
    ///
    /// A last line without a terminator gets one appended (`\r\n` for CRLF
    /// text, `\n` otherwise) so it can move like any other line.
    #[must_use]
    pub fn split(text: &str) -> Self {
        if text.is_empty() {
            return Self {
                lines: Vec::new(),
                synthetic_eol: None,
            };
        }

        let synthetic_eol = if text.ends_with('\n') {
            None
        } else if text.contains("\r\n") {
            Some("\r\n")
        } else {
            Some("\n")
        };

        let mut lines: Vec<String> = text.split_inclusive('\n').map(str::to_string).collect();
        if let (Some(eol), Some(last)) = (synthetic_eol, lines.last_mut()) {
            last.push_str(eol);
        }

        Self {
            lines,
            synthetic_eol,
        }
    }

    /// Concatenate `lines` (a reordering of `self.lines`) back into text
    #[must_use]
    pub fn join(&self, lines: &[String]) -> String {
        let mut out = lines.concat();
        if let Some(eol) = self.synthetic_eol {
            if out.ends_with(eol) {
                out.truncate(out.len() - eol.len());
            }
        }
        out
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Split `text` into [`SourceLines`]
#[must_use]
pub fn split_lines(text: &str) -> SourceLines {
    SourceLines::split(text)
}

/// Width of a line's leading indentation; spaces and tabs count one each
#[must_use]
pub fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

/// Check if a line holds nothing but whitespace
#[must_use]
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeps_terminators() {
        let source = split_lines("gem \"a\"\n\ngem \"b\"\n");
        assert_eq!(source.lines, vec!["gem \"a\"\n", "\n", "gem \"b\"\n"]);
        assert_eq!(source.join(&source.lines), "gem \"a\"\n\ngem \"b\"\n");
    }

    #[test]
    fn test_split_empty() {
        let source = split_lines("");
        assert!(source.is_empty());
        assert_eq!(source.join(&source.lines), "");
    }

    #[test]
    fn test_missing_final_newline_survives_reordering() {
        let source = split_lines("gem \"b\"\ngem \"a\"");
        assert_eq!(source.len(), 2);
        let reordered = vec![source.lines[1].clone(), source.lines[0].clone()];
        assert_eq!(source.join(&reordered), "gem \"a\"\ngem \"b\"");
    }

    #[test]
    fn test_missing_final_crlf() {
        let source = split_lines("gem \"b\"\r\ngem \"a\"");
        assert_eq!(source.lines[1], "gem \"a\"\r\n");
        let reordered = vec![source.lines[1].clone(), source.lines[0].clone()];
        assert_eq!(source.join(&reordered), "gem \"a\"\r\ngem \"b\"");
    }

    #[test]
    fn test_indent_of() {
        assert_eq!(indent_of("  gem \"rails\""), 2);
        assert_eq!(indent_of("gem \"rails\""), 0);
        assert_eq!(indent_of("      gem \"rails\""), 6);
    }

    #[test]
    fn test_indent_of_tabs() {
        assert_eq!(indent_of("\tgem \"rails\""), 1);
        assert_eq!(indent_of("\t\tgem \"rails\""), 2);
        assert_eq!(indent_of("\t\t\tgem \"rails\""), 3);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("     "));
        assert!(is_blank("\n"));
        assert!(is_blank("\t"));
        assert!(is_blank("\r\n"));
        assert!(!is_blank("gem \"rails\""));
    }
}
