//! Configuration management for gemsort.
//!
//! This module provides the [`Config`] struct which controls the keyword
//! vocabulary the sorter recognizes and where manifests are looked for.
//! Configuration can be loaded from:
//! - TOML files (`gemsort.toml`)
//! - CLI arguments (`--config` replaces discovery)
//!
//! Config files are auto-discovered by searching parent directories from the file
//! being sorted up to the filesystem root, plus the user's home directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["gemsort.toml", ".gemsort.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

// Serde default functions
fn default_declaration_keyword() -> String {
    "gem".to_string()
}
fn default_scope_keyword() -> String {
    "group".to_string()
}
fn default_closer_keyword() -> String {
    "end".to_string()
}
fn default_comment_prefix() -> String {
    "#".to_string()
}
fn default_starter_keywords() -> Vec<String> {
    [
        "gem",
        "group",
        "source",
        "ruby",
        "path",
        "plugin",
        "platforms",
        "platform",
        "end",
        "gemspec",
        "git",
        "github",
        "if",
        "elsif",
        "else",
        "unless",
        "local_gemfile",
        "instance_eval",
        "eval_gemfile",
        "install_if",
        "rack_version",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}
fn default_manifest_names() -> Vec<String> {
    vec!["Gemfile".to_string(), "gems.rb".to_string()]
}

/// Main configuration struct for gemsort
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Keyword that opens a sortable declaration (default: `gem`)
    #[serde(default = "default_declaration_keyword")]
    pub declaration_keyword: String,

    /// Keyword that opens a nested scope (default: `group`)
    #[serde(default = "default_scope_keyword")]
    pub scope_keyword: String,

    /// Keyword that closes a scope (default: `end`)
    #[serde(default = "default_closer_keyword")]
    pub closer_keyword: String,

    /// Line comment prefix (default: `#`)
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,

    /// Keywords that start a new statement.
    ///
    /// A line at or below a declaration's indentation that starts with one of
    /// these ends the declaration; any other line continues it.
    #[serde(default = "default_starter_keywords")]
    pub starter_keywords: Vec<String>,

    /// Additional starter keywords, appended to `starter_keywords`
    #[serde(default)]
    pub extra_starter_keywords: Vec<String>,

    /// File names treated as manifests during discovery (default: `Gemfile`, `gems.rb`)
    #[serde(default = "default_manifest_names")]
    pub manifest_names: Vec<String>,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    pub declaration_keyword: Option<String>,
    pub scope_keyword: Option<String>,
    pub closer_keyword: Option<String>,
    pub comment_prefix: Option<String>,
    pub starter_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub extra_starter_keywords: Vec<String>,
    pub manifest_names: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            declaration_keyword: default_declaration_keyword(),
            scope_keyword: default_scope_keyword(),
            closer_keyword: default_closer_keyword(),
            comment_prefix: default_comment_prefix(),
            starter_keywords: default_starter_keywords(),
            extra_starter_keywords: Vec::new(),
            manifest_names: default_manifest_names(),
        }
    }
}

impl Config {
    /// Validate configuration values
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        let keywords = [
            ("declaration_keyword", &self.declaration_keyword),
            ("scope_keyword", &self.scope_keyword),
            ("closer_keyword", &self.closer_keyword),
        ];
        for (field, keyword) in keywords {
            if keyword.is_empty() {
                return Some(format!("{field} must not be empty"));
            }
            if keyword.chars().any(char::is_whitespace) {
                return Some(format!("{field} {keyword:?} must not contain whitespace"));
            }
        }
        if self.comment_prefix.trim().is_empty() {
            return Some("comment_prefix must not be empty".to_string());
        }
        for keyword in self.starters() {
            if keyword.is_empty() || keyword.chars().any(char::is_whitespace) {
                return Some(format!(
                    "starter keyword {keyword:?} must be a single non-empty word"
                ));
            }
        }
        if self.manifest_names.iter().all(|name| name.trim().is_empty()) {
            return Some("manifest_names must name at least one file".to_string());
        }
        None
    }

    /// All starter keywords: configured list plus extras plus the structural keywords
    #[must_use]
    pub fn starters(&self) -> Vec<&str> {
        let mut starters: Vec<&str> = self
            .starter_keywords
            .iter()
            .chain(&self.extra_starter_keywords)
            .map(String::as_str)
            .collect();
        for keyword in [
            self.declaration_keyword.as_str(),
            self.scope_keyword.as_str(),
            self.closer_keyword.as_str(),
        ] {
            if !starters.contains(&keyword) {
                starters.push(keyword);
            }
        }
        starters
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.apply_partial(&read_partial(path)?);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = &partial.declaration_keyword {
            self.declaration_keyword.clone_from(v);
        }
        if let Some(v) = &partial.scope_keyword {
            self.scope_keyword.clone_from(v);
        }
        if let Some(v) = &partial.closer_keyword {
            self.closer_keyword.clone_from(v);
        }
        if let Some(v) = &partial.comment_prefix {
            self.comment_prefix.clone_from(v);
        }
        if let Some(v) = &partial.starter_keywords {
            self.starter_keywords.clone_from(v);
        }
        if let Some(v) = &partial.manifest_names {
            self.manifest_names.clone_from(v);
        }
        // Extras accumulate across files
        for keyword in &partial.extra_starter_keywords {
            if !self.extra_starter_keywords.contains(keyword) {
                self.extra_starter_keywords.push(keyword.clone());
            }
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home directory config.
    /// Returns list of config file paths in order of priority (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            std::env::current_dir().ok()
        };

        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Root first, so closer configs are applied last
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Unreadable or malformed files are skipped with a warning.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let mut config = Self::default();
        for path in Self::discover_config_files(start_path) {
            match read_partial(&path) {
                Ok(partial) => {
                    debug!(path = %path.display(), "applying config file");
                    config.apply_partial(&partial);
                }
                Err(e) => warn!("skipping config file: {e}"),
            }
        }
        config
    }
}

fn read_partial(path: &Path) -> Result<PartialConfig> {
    let contents = std::fs::read_to_string(path)?;
    toml::from_str(&contents).map_err(|source| Error::Toml {
        path: path.to_path_buf(),
        source,
    })
}
