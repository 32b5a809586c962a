//! Error types and result aliases for gemsort.
//!
//! The sorting core never fails: ambiguous input degrades to leaving the
//! affected lines unchanged. Everything in here belongs to the layer around
//! it (finding, reading and writing manifests, loading configuration).

use std::path::PathBuf;

/// Result type for gemsort operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur around a sort run
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Gemfile not found (searched from {})", .start.display())]
    ManifestNotFound { start: PathBuf },

    /// Check mode found a manifest that would change when sorted.
    #[error("{} is not alphabetically sorted", .path.display())]
    NotSorted { path: PathBuf },

    #[error("{} is too large ({size} bytes exceeds limit of {limit} bytes)", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid keyword pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl Error {
    /// Whether this is the check-mode signal rather than an operational failure
    #[must_use]
    pub fn is_not_sorted(&self) -> bool {
        matches!(self, Error::NotSorted { .. })
    }
}
