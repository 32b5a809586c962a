//! Line-level parsing utilities for dependency manifests.
//!
//! The sorter never builds a grammar for the host language. It works on raw
//! lines and a handful of keyword heuristics:
//! - [`SourceLines`]: Splits text into lines that keep their own terminators
//! - [`Patterns`]: Keyword matchers (declaration, scope, closer, starters, comments)
//!   compiled from a [`Config`](crate::Config)

pub mod lines;
pub mod patterns;

pub use lines::{indent_of, is_blank, split_lines, SourceLines};
pub use patterns::Patterns;
