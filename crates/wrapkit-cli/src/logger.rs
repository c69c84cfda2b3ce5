//! Logging setup for the wrapkit CLI.
//!
//! Log events go to stderr so stdout stays free for command output such as
//! `wrapkit schema`.
//!
//! # Example
//!
//! ```rust,no_run
//! use wrapkit_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//!
//! info!("Starting build");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "wrapkit_cli=debug,wrapkit_core=debug,wrapkit_target=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "wrapkit_cli=info,wrapkit_core=info,wrapkit_target=info";

/// Pick the filter for the global flags.
///
/// Precedence: `--verbose`, then `--quiet`, then `RUST_LOG`, then info for
/// the wrapkit crates.
pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the tracing subscriber.
///
/// Call once, before any logging occurs.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && crate::ui::should_use_color())
        .compact();

    tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(fmt_layer)
        .init();
}
