//! wrapkit CLI - turn a web page into a native desktop installer.
//!
//! This crate is the command-line front end of `wrapkit-core`. It layers
//! configuration from a file, the environment and flags, picks the host's
//! platform target and reports progress and failures to the operator.
//!
//! # Architecture
//!
//! - [`cli`] - argument parsing (clap derive)
//! - [`config`] - `wrapkit.config.json` loading and validation (figment)
//! - `commands` - `build`, `check`, `init` and `schema`
//! - [`error`] - CLI error types with hints, mapped to exit codes
//! - [`logger`] - tracing subscriber setup
//! - [`prompt`] - toolchain install consent on the terminal
//! - [`ui`] - status lines, spinner and summaries on stderr
//!
//! # Example
//!
//! ```rust,no_run
//! use wrapkit_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod prompt;
pub mod ui;

pub use error::{BuildError, CliError, ConfigError, Result, ResultExt};
