//! Diagnostic logging setup
//!
//! Library code logs through `tracing`; the subscriber writes to stderr so
//! it never mixes with data written to stdout.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a log filter directive
pub const LOG_ENV: &str = "CIT_LOG";

/// Filter used when no environment variable is set
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "cit=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber
///
/// `CIT_LOG` wins over `RUST_LOG`; without either the verbosity flags
/// decide. Calling this twice is harmless.
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
