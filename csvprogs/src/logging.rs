//! Tracing subscriber setup for the binaries.
//!
//! Logs always go to standard error; standard output carries CSV only.

use tracing_subscriber::EnvFilter;

const VERBOSE_FILTER: &str = "warn,csvprogs=debug,csvprogs_core=debug";

/// Install a fmt subscriber.
///
/// `-v` turns on debug output for the csvprogs crates; otherwise `RUST_LOG`
/// decides, falling back to `warn`.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
