//! Logging setup.
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for the
//! result line. Verbosity comes from `RUST_LOG` (default: `warn`), e.g.
//! `RUST_LOG=simapro_import=debug`. `--verbose` forces `info` whatever
//! `RUST_LOG` says.

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "info";

/// Filter for a run: `info` when verbose, else `RUST_LOG` or `warn`.
pub fn build_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(VERBOSE_FILTER);
    }

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
pub fn init(verbose: bool) {
    // A subscriber may already be installed (tests, embedding)
    let _ = fmt()
        .with_env_filter(build_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_overrides_rust_log() {
        // Only this test reads RUST_LOG
        std::env::set_var("RUST_LOG", "error");
        let verbose = build_filter(true).to_string();
        let quiet = build_filter(false).to_string();
        std::env::remove_var("RUST_LOG");

        assert_eq!(verbose, "info");
        assert_eq!(quiet, "error");
    }
}
