//! Compatibility tests against expected output
//!
//! Each manifest under `tests/fixtures/in` is sorted and compared with its
//! counterpart under `tests/fixtures/out`. The expected files are also
//! checked to be fixed points.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs;
use std::path::PathBuf;

use gemsort::{is_sorted, sort};

/// Sort the input fixture and compare with the expected fixture
fn test_compatibility(name: &str) {
    let input_path = fixture_path("in", name);
    let expected_path = fixture_path("out", name);

    let input = fs::read_to_string(&input_path)
        .unwrap_or_else(|e| panic!("Failed to read input file {}: {e}", input_path.display()));
    let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
        panic!("Failed to read expected file {}: {e}", expected_path.display())
    });

    let result = sort(&input);

    // Compare line by line for better error messages
    let result_lines: Vec<&str> = result.lines().collect();
    let expected_lines: Vec<&str> = expected.lines().collect();

    if result_lines.len() != expected_lines.len() {
        eprintln!("=== Line count mismatch for {name} ===");
        eprintln!(
            "Expected {} lines, got {} lines",
            expected_lines.len(),
            result_lines.len()
        );
        panic!("Line count mismatch");
    }

    let differences: Vec<(usize, &str, &str)> = result_lines
        .iter()
        .zip(expected_lines.iter())
        .enumerate()
        .filter(|(_, (got, want))| got != want)
        .map(|(i, (got, want))| (i + 1, *want, *got))
        .collect();

    if !differences.is_empty() {
        eprintln!("\n=== Differences in {name} ===");
        for (line_num, expected, got) in differences.iter().take(10) {
            eprintln!("\nLine {line_num}:");
            eprintln!("  expected: {expected:?}");
            eprintln!("  got:      {got:?}");
        }
        panic!("{} differences found", differences.len());
    }

    assert_eq!(result, expected, "Line endings differ for {name}");
    assert!(is_sorted(&expected), "Expected output for {name} is not a fixed point");
}

/// Path of a fixture relative to the crate root
fn fixture_path(dir: &str, file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(dir)
        .join(file)
}

// ============================================================================
// Fixture Manifests
// ============================================================================

/// A generated Rails application Gemfile
#[test]
fn test_rails_app_compatibility() {
    test_compatibility("rails_app.Gemfile");
}

/// Nested groups, non-group blocks, multi-line declarations and a trailing
/// commented-out gem that keeps its region in place
#[test]
fn test_nested_compatibility() {
    test_compatibility("nested.Gemfile");
}

/// Single quotes, parenthesized declarations, tab indentation
#[test]
fn test_gems_rb_compatibility() {
    test_compatibility("gems.rb");
}

// ============================================================================
// Individual Feature Tests - Smaller scope for debugging
// ============================================================================

/// Declarations separated by an unrelated statement sort separately
#[test]
fn test_compat_runs_split_by_statement() {
    let input = "gem \"b\"\ngem \"a\"\nsource \"https://gems.example.com\" do\n  gem \"d\"\n  gem \"c\"\nend\n";
    let expected = "gem \"a\"\ngem \"b\"\nsource \"https://gems.example.com\" do\n  gem \"c\"\n  gem \"d\"\nend\n";
    assert_eq!(sort(input), expected, "Split runs mismatch");
}

/// Indented group closer belongs to an inner block, not the group
#[test]
fn test_compat_inner_if_block() {
    let input = "group :test do\n  if ENV[\"CI\"]\n    gem \"b\"\n    gem \"a\"\n  end\n  gem \"z\"\n  gem \"y\"\nend\n";
    let expected = "group :test do\n  if ENV[\"CI\"]\n    gem \"a\"\n    gem \"b\"\n  end\n  gem \"y\"\n  gem \"z\"\nend\n";
    assert_eq!(sort(input), expected, "Inner block mismatch");
}

/// Stable order for names equal up to case
#[test]
fn test_compat_equal_names_keep_order() {
    let input = "gem \"Nokogiri\", \"1\"\ngem \"nokogiri\", \"2\"\ngem \"ahoy\"\n";
    let expected = "gem \"ahoy\"\ngem \"Nokogiri\", \"1\"\ngem \"nokogiri\", \"2\"\n";
    assert_eq!(sort(input), expected, "Stable ordering mismatch");
}
