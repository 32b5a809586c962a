use std::collections::HashMap;

use gemsort::parser::Patterns;
use gemsort::{is_sorted, sort};
use proptest::prelude::*;

/// One generated declaration with its surrounding formatting
#[derive(Debug, Clone)]
struct GemEntry {
    blanks: usize,
    comments: Vec<String>,
    name: String,
    continuation: usize,
}

impl GemEntry {
    fn render(&self, indent: &str, out: &mut String) {
        for _ in 0..self.blanks {
            out.push('\n');
        }
        for comment in &self.comments {
            out.push_str(&format!("{indent}# {comment}\n"));
        }
        out.push_str(&format!("{indent}gem \"{}\"", self.name));
        for _ in 0..self.continuation {
            out.push_str(&format!(",\n{indent}    require: false"));
        }
        out.push('\n');
    }
}

fn gem_entry() -> impl Strategy<Value = GemEntry> {
    (
        0usize..3,
        prop::collection::vec("[a-z ]{0,12}", 0..3),
        "[A-Za-z][a-z0-9_-]{0,8}",
        0usize..3,
    )
        .prop_map(|(blanks, comments, name, continuation)| GemEntry {
            blanks,
            comments,
            name,
            continuation,
        })
}

/// Arbitrary manifest-looking lines, including unbalanced blocks and
/// declarations the sorter cannot name
fn manifest_line() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-zA-Z]{1,5}".prop_map(|n| format!("gem \"{n}\"")),
        2 => "[a-zA-Z]{1,5}".prop_map(|n| format!("  gem '{n}'")),
        3 => prop::sample::select(vec![
            "",
            "# note",
            "  # nested note",
            "    # deep note",
            "group :test do",
            "  group :development do",
            "end",
            "  end",
            "source \"https://rubygems.org\"",
            "gem name_from_variable",
            "    require: false",
            "platforms :jruby do",
            "gemspec",
        ])
        .prop_map(String::from),
    ]
}

fn manifest() -> impl Strategy<Value = String> {
    prop::collection::vec(manifest_line(), 0..40).prop_map(|lines| {
        let mut text = lines.join("\n");
        text.push('\n');
        text
    })
}

fn line_counts(text: &str) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for line in text.lines() {
        *counts.entry(line).or_insert(0) += 1;
    }
    counts
}

fn declared_names(text: &str) -> Vec<String> {
    let patterns = Patterns::default_patterns();
    text.lines()
        .filter_map(|line| patterns.declared_name(line))
        .collect()
}

proptest! {
    #[test]
    fn test_sort_is_idempotent(text in manifest()) {
        let once = sort(&text);
        let twice = sort(&once);
        prop_assert_eq!(&twice, &once);
        prop_assert!(is_sorted(&once));
    }

    #[test]
    fn test_sort_only_relocates_lines(text in manifest()) {
        let sorted = sort(&text);
        prop_assert_eq!(sorted.len(), text.len());
        prop_assert_eq!(line_counts(&sorted), line_counts(&text));
    }

    #[test]
    fn test_single_run_is_ordered(entries in prop::collection::vec(gem_entry(), 1..12)) {
        let mut text = String::from("source \"https://rubygems.org\"\n");
        for entry in &entries {
            entry.render("", &mut text);
        }

        let sorted = sort(&text);
        let names = declared_names(&sorted);
        prop_assert_eq!(names.len(), entries.len());

        let keys: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
        let mut expected = keys.clone();
        expected.sort();
        prop_assert_eq!(keys, expected);
    }

    #[test]
    fn test_group_body_stays_in_place(
        top in prop::collection::vec(gem_entry(), 0..5),
        body in prop::collection::vec(gem_entry(), 0..6),
        tail in prop::collection::vec(gem_entry(), 0..5),
    ) {
        let mut head = String::new();
        for entry in &top {
            entry.render("", &mut head);
        }
        let mut inner = String::new();
        for entry in &body {
            entry.render("  ", &mut inner);
        }
        let mut after = String::new();
        for entry in &tail {
            entry.render("", &mut after);
        }
        let text = format!("{head}group :test do\n{inner}end\n{after}");

        let sorted = sort(&text);
        let sorted_lines: Vec<&str> = sorted.lines().collect();
        let header = head.lines().count();
        let closer = header + 1 + inner.lines().count();

        prop_assert_eq!(sorted_lines[header], "group :test do");
        prop_assert_eq!(sorted_lines[closer], "end");

        let sorted_body: String = sorted_lines[header + 1..closer]
            .iter()
            .map(|line| format!("{line}\n"))
            .collect();
        prop_assert_eq!(line_counts(&sorted_body), line_counts(&inner));
        prop_assert_eq!(sort(&inner), sorted_body);
    }
}
