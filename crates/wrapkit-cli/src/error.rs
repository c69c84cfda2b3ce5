//! Error types of the wrapkit CLI.
//!
//! Every command returns [`CliError`]. Configuration and project problems end
//! with a `Hint:` line for the operator. A failed build keeps the
//! [`wrapkit_core::Error`] it came from, so `main` can still ask it for its
//! stage and exit code.
//!
//! ```rust,no_run
//! use wrapkit_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_icon(path: &Path) -> Result<Vec<u8>> {
//!     std::fs::read(path).with_path(path)
//! }
//! ```

mod report;

pub use report::cli_error_to_miette;

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// A stage of the build pipeline failed.
    #[error("{stage} stage failed: {0}", stage = .0.stage())]
    Core(#[from] wrapkit_core::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No such file: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error with context prepended by [`ResultExt::context`].
    #[error("{0}")]
    Custom(String),
}

impl CliError {
    /// Exit status of the process when this error ends it.
    ///
    /// Build failures map through [`wrapkit_core::Error::exit_code`]; anything
    /// else exits with 1.
    pub fn exit_code(&self) -> i32 {
        if let CliError::Core(err) = self {
            err.exit_code()
        } else {
            1
        }
    }
}

/// Problems with `wrapkit.config.json`, `WRAPKIT_*` variables or flags.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}\n\nHint: Run 'wrapkit init' to create wrapkit.config.json or pass --config <path>", .0.display())]
    NotFound(PathBuf),

    /// The layered sources do not deserialize into a configuration.
    #[error("Invalid configuration: {0}\n\nHint: Compare wrapkit.config.json and WRAPKIT_* variables with 'wrapkit schema'")]
    Extract(String),

    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField { field: String, hint: String },

    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },
}

/// Problems with the app project or the directory installers are written to.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("App project not found: {}\n\nHint: Run wrapkit inside the app project or pass --project-dir", .0.display())]
    AppProjectNotFound(PathBuf),

    #[error("Output directory is not writable: {}\n\nHint: Run wrapkit from a directory you can write to", .0.display())]
    OutputNotWritable(PathBuf),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Context helpers for fallible calls in commands.
pub trait ResultExt<T> {
    /// Report a missing file as [`CliError::FileNotFound`] naming `path`.
    fn with_path(self, path: impl AsRef<Path>) -> Result<T>;

    /// Prefix the error message with `msg`.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| CliError::Custom(format!("{}: {}", msg, e.into())))
    }
}
