//! gemsort - keeps `gem` declarations in Gemfiles alphabetically sorted
//!
//! Sorting is a pure, line-level transformation: declarations (with the
//! comments above them and any continuation lines) are relocated as whole
//! lines, never edited. Each `group ... do`/`end` body is sorted on its own,
//! and anything the sorter cannot attribute safely is left exactly as it was.
//!
//! ```
//! let input = "source \"https://rubygems.org\"\n\ngem \"rails\"\ngem \"bootsnap\"\n";
//! assert_eq!(
//!     gemsort::sort(input),
//!     "source \"https://rubygems.org\"\n\ngem \"bootsnap\"\ngem \"rails\"\n"
//! );
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod parser;
pub mod process;
pub mod scope;
pub mod sort;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use error::{Error, Result};
pub use process::{is_sorted, sort, GemfileSorter};
pub use scope::{locate, Scope};
pub use sort::{sort_region, Region};
