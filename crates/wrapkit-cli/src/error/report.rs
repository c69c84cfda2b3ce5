//! Miette report conversion for CLI errors.

use crate::error::CliError;
use miette::Report;
use wrapkit_core::{ArtifactError, Error};

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Core(e) => core_error_to_miette(e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert a build pipeline error to a report with a stage code and a hint.
pub fn core_error_to_miette(err: Error) -> Report {
    let code = format!("wrapkit::{}", err.stage());
    match &err {
        Error::ToolchainMissing { .. } => miette::miette!(
            code = code,
            help = "Install the Rust toolchain (https://rustup.rs) or rerun with --yes to let wrapkit install it",
            "{}",
            err
        ),
        Error::ToolchainInstallFailed { .. } => miette::miette!(
            code = code,
            help = "Install the Rust toolchain manually, then open a new shell and retry",
            "{}",
            err
        ),
        Error::ManifestValidation { .. } => miette::miette!(
            code = code,
            help = "Fix the option in wrapkit.config.json or on the command line",
            "{}",
            err
        ),
        Error::BuildProcessFailed { .. } => miette::miette!(
            code = code,
            help = "The packager output above shows why it failed",
            "{}",
            err
        ),
        Error::Collection(collection) => {
            let mut lines: Vec<String> = collection
                .relocated
                .iter()
                .map(|a| format!("  ✓ {}: {}", a.format, a.path.display()))
                .collect();
            lines.extend(collection.failures.iter().map(|f| format!("  ✗ {}", f)));

            let missing = collection
                .failures
                .iter()
                .any(|f| matches!(f, ArtifactError::NotFound { .. }));
            let help = if missing {
                "The packager did not leave an installer where expected; its version may use a different bundle layout"
            } else {
                "Check permissions of the working directory and the bundle directory"
            };
            miette::miette!(code = code, help = help, "{}\n{}", err, lines.join("\n"))
        }
        _ => miette::miette!(code = code, "{}", err),
    }
}
