//! Diagnostic logging for the `qs` binary.
//!
//! Events go to stderr so they never mix with command output on stdout.

use std::io;

use tracing_subscriber::{EnvFilter, fmt};

/// Picks the default filter directive from `-v` count and the configured level.
fn default_directive(verbose: u8, configured: &str) -> &str {
    match verbose {
        0 => configured,
        1 => "debug",
        _ => "trace",
    }
}

/// Builds the filter: `RUST_LOG` wins, then `-v`, then `log.level`.
///
/// An unparseable configured level falls back to `warn`.
pub fn build_filter(verbose: u8, configured: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let directive = default_directive(verbose, configured);
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Installs the global subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbose: u8, configured: &str, ansi: bool) {
    let result = fmt()
        .with_env_filter(build_filter(verbose, configured))
        .with_writer(io::stderr)
        .with_ansi(ansi)
        .with_target(true)
        .compact()
        .try_init();
    if result.is_err() {
        tracing::debug!("logging already initialized");
    }
}
