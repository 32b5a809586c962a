//! Sorting driver and file processing.
//!
//! [`GemfileSorter`] is the pure core: text in, sorted text out, never an
//! error. The [`file`] layer around it reads and writes manifests, implements
//! the check/stdout/diff modes and the non-fatal install hook.

pub mod file;
pub mod pipeline;

pub use file::{process_file, process_text, run_hook, Mode, Outcome, MAX_FILE_SIZE};
pub use pipeline::{is_sorted, sort, GemfileSorter};
