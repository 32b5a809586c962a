//! gemsort - keeps Gemfile declarations in alphabetical order

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{bail, Context};
use gemsort::manifest::{collect_files, find_manifest};
use gemsort::process::{process_file, process_text, run_hook, Mode, Outcome, MAX_FILE_SIZE};
use gemsort::{logging, parse_args, CliArgs, Config, Error};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Environment variable Bundler uses to point at a non-default manifest
const BUNDLE_GEMFILE: &str = "BUNDLE_GEMFILE";

fn main() -> ExitCode {
    let args = parse_args();

    if let Err(e) = logging::init(logging::level_for(args.debug, args.silent)) {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    if args.hook {
        hook(&args);
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            if !args.silent {
                eprintln!("gemsort: {e:#}");
            }
            if is_not_sorted(&e) {
                ExitCode::from(1)
            } else {
                ExitCode::from(2)
            }
        }
    }
}

fn run(args: &CliArgs) -> anyhow::Result<ExitCode> {
    if args.reads_stdin() {
        let config = build_config(args, None)?;
        return process_stdin(&config, args);
    }

    // Configure thread pool if --jobs specified
    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                warn!("failed to configure thread pool: {e}");
            }
        }
    }

    let use_per_file_config = args.config.is_none();
    let base_config = if use_per_file_config {
        None
    } else {
        Some(build_config(args, None)?)
    };

    let files = if args.inputs.is_empty() {
        vec![default_manifest(args, base_config.as_ref())?]
    } else {
        let names = match &base_config {
            Some(config) => config.manifest_names.clone(),
            None => build_config(args, None)?.manifest_names,
        };
        collect_files(&args.inputs, args.recursive, &args.exclude, &names)
    };

    if files.is_empty() {
        if !args.silent {
            eprintln!("No Gemfiles found to sort.");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let tally = Tally::default();
    let sequential = matches!(args.mode(), Mode::Stdout | Mode::Diff)
        || args.jobs == Some(1)
        || files.len() == 1;

    if sequential {
        for path in &files {
            tally.record(path, sort_one(path, base_config.as_ref(), args), args);
        }
    } else {
        files.par_iter().for_each(|path| {
            tally.record(path, sort_one(path, base_config.as_ref(), args), args);
        });
    }

    Ok(tally.exit_code())
}

/// The manifest to sort when no inputs are given
fn default_manifest(args: &CliArgs, base_config: Option<&Config>) -> anyhow::Result<PathBuf> {
    if let Some(path) = std::env::var_os(BUNDLE_GEMFILE).filter(|v| !v.is_empty()) {
        debug!("using {BUNDLE_GEMFILE}={}", Path::new(&path).display());
        return Ok(PathBuf::from(path));
    }

    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let names = match base_config {
        Some(config) => config.manifest_names.clone(),
        None => build_config(args, Some(&cwd))?.manifest_names,
    };
    Ok(find_manifest(&cwd, &names)?)
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> anyhow::Result<Config> {
    let config = if let Some(config_path) = &args.config {
        debug!("using explicit config file: {}", config_path.display());
        Config::from_toml_file(config_path)?
    } else {
        let start = match for_path {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir().unwrap_or_default(),
        };
        let discovered = Config::discover_config_files(&start);
        if discovered.is_empty() {
            debug!("no config files discovered for {}", start.display());
        }
        for file in &discovered {
            debug!("discovered config file: {}", file.display());
        }
        Config::from_discovered_files(&start)
    };

    debug!(?config, "configuration");

    if let Some(error) = config.validate() {
        bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Sort one manifest with the base config, or with the config discovered for it
fn sort_one(path: &Path, base_config: Option<&Config>, args: &CliArgs) -> anyhow::Result<Outcome> {
    let outcome = if let Some(config) = base_config {
        process_file(path, config, args.mode())?
    } else {
        let config = build_config(args, Some(path))?;
        process_file(path, &config, args.mode())?
    };
    Ok(outcome)
}

/// Read a manifest from stdin; sorted output (or a diff) goes to stdout
fn process_stdin(config: &Config, args: &CliArgs) -> anyhow::Result<ExitCode> {
    let mut contents = String::new();
    io::stdin()
        .take(MAX_FILE_SIZE + 1)
        .read_to_string(&mut contents)?;

    if u64::try_from(contents.len()).unwrap_or(u64::MAX) > MAX_FILE_SIZE {
        bail!(
            "stdin input too large (exceeds limit of {} MB)",
            MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    process_text(&contents, config, args.mode(), &mut io::stdout().lock())?;
    Ok(ExitCode::SUCCESS)
}

/// Post-install hook: sort the active manifest, never fail
fn hook(args: &CliArgs) {
    let config = match build_config(args, None) {
        Ok(config) => config,
        Err(e) => {
            warn!("gemsort hook skipped: {e:#}");
            return;
        }
    };

    let outcome = match std::env::var_os(BUNDLE_GEMFILE).filter(|v| !v.is_empty()) {
        Some(path) => process_file(Path::new(&path), &config, Mode::Write)
            .map_err(|e| warn!("gemsort hook skipped: {e}"))
            .ok(),
        None => match std::env::current_dir() {
            Ok(cwd) => run_hook(&cwd, &config),
            Err(e) => {
                warn!("gemsort hook skipped: {e}");
                None
            }
        },
    };

    if outcome == Some(Outcome::Sorted) && !args.silent {
        eprintln!("Gemfile gems sorted alphabetically");
    }
}

/// Whether `e` is the check-mode signal
fn is_not_sorted(e: &anyhow::Error) -> bool {
    e.downcast_ref::<Error>().is_some_and(Error::is_not_sorted)
}

/// Per-run counters, shared across rayon workers
#[derive(Default)]
struct Tally {
    not_sorted: AtomicUsize,
    errors: AtomicUsize,
}

impl Tally {
    /// Report one file's result and count failures
    fn record(&self, path: &Path, result: anyhow::Result<Outcome>, args: &CliArgs) {
        match result {
            Ok(Outcome::AlreadySorted) => {
                if !args.silent && args.mode() == Mode::Write {
                    eprintln!("{}: already sorted", path.display());
                }
            }
            Ok(Outcome::Sorted) => {
                if !args.silent {
                    eprintln!("{}: sorted", path.display());
                }
            }
            Ok(Outcome::Printed) => {}
            Err(e) if is_not_sorted(&e) => {
                self.not_sorted.fetch_add(1, Ordering::Relaxed);
                if !args.silent {
                    eprintln!("{e}");
                }
            }
            Err(e) => {
                self.errors.fetch_add(1, Ordering::Relaxed);
                if !args.silent {
                    eprintln!("Error sorting {}: {e:#}", path.display());
                }
            }
        }
    }

    /// 2 if anything failed, 1 if only the check failed, else 0
    fn exit_code(&self) -> ExitCode {
        if self.errors.load(Ordering::Relaxed) > 0 {
            ExitCode::from(2)
        } else if self.not_sorted.load(Ordering::Relaxed) > 0 {
            ExitCode::from(1)
        } else {
            ExitCode::SUCCESS
        }
    }
}
