//! Command-line interface for gemsort.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

use crate::process::Mode;

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct CliArgs {
    /// Manifests or directories to sort (`-` for stdin)
    pub inputs: Vec<PathBuf>,

    /// Fail instead of writing when a manifest is not sorted
    pub check: bool,

    /// Output to stdout instead of in-place
    pub stdout: bool,

    /// Show diff without modifying files
    pub diff: bool,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Recursive directory processing
    pub recursive: bool,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    /// Run as the post-install hook (never fails)
    pub hook: bool,

    /// Enable debug output
    pub debug: bool,

    /// Silent mode (no output)
    pub silent: bool,
}

impl CliArgs {
    /// Processing mode selected by the flags
    #[must_use]
    pub fn mode(&self) -> Mode {
        if self.check {
            Mode::Check
        } else if self.diff {
            Mode::Diff
        } else if self.stdout {
            Mode::Stdout
        } else {
            Mode::Write
        }
    }

    /// Whether the only input is `-`
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].as_os_str() == "-"
    }
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("gemsort")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sorts gem declarations in Gemfiles alphabetically")
        .arg(
            Arg::new("inputs")
                .help("Gemfiles or directories to sort (default: nearest Gemfile; '-' for stdin)")
                .value_name("FILE")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("check")
                .short('c')
                .long("check")
                .help("Exit with status 1 if a Gemfile is not sorted; never writes")
                .action(ArgAction::SetTrue)
                .conflicts_with_all(["stdout", "diff"]),
        )
        .arg(
            Arg::new("stdout")
                .short('s')
                .long("stdout")
                .help("Output to stdout instead of modifying files in-place")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("diff")
                .short('d')
                .long("diff")
                .help("Show diff without modifying files")
                .action(ArgAction::SetTrue)
                .conflicts_with("stdout"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to configuration file (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Recursively search directories for Gemfiles")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Exclude files/directories matching pattern (glob syntax, can be repeated)")
                .value_name("PATTERN")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel jobs (0=auto, 1=sequential)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("hook")
                .long("hook")
                .help("Run as a post-install hook: sort the nearest Gemfile, only warn on failure")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output (shows config, scopes, skipped regions)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode (no status output)")
                .action(ArgAction::SetTrue),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        check: matches.get_flag("check"),
        stdout: matches.get_flag("stdout"),
        diff: matches.get_flag("diff"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        recursive: matches.get_flag("recursive"),
        exclude: matches
            .get_many::<String>("exclude")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        jobs: matches.get_one::<usize>("jobs").copied(),
        hook: matches.get_flag("hook"),
        debug: matches.get_flag("debug"),
        silent: matches.get_flag("silent"),
    }
}
