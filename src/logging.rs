//! Tracing subscriber setup for the `gemsort` binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a stderr subscriber
///
/// `RUST_LOG` takes precedence; otherwise `default_level` (e.g. `"warn"`) is
/// used. Calling this twice is an error from the second call on.
pub fn init(default_level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Default filter for the CLI verbosity flags
#[must_use]
pub fn level_for(debug: bool, silent: bool) -> &'static str {
    if debug {
        "debug"
    } else if silent {
        "error"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, warn};

    #[test]
    fn test_logging_init() {
        // Only the first init in a process succeeds
        let _ = init("debug");

        debug!("debug message");
        warn!("warning message");
    }

    #[test]
    fn test_level_for_flags() {
        assert_eq!(level_for(false, false), "warn");
        assert_eq!(level_for(true, false), "debug");
        assert_eq!(level_for(true, true), "debug");
        assert_eq!(level_for(false, true), "error");
    }
}
