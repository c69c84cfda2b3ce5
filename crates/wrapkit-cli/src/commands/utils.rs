//! Shared utilities for command implementations.
//!
//! - Path resolution against the working directory
//! - App project validation
//! - Wiring configuration into an [`Orchestrator`]

use crate::config::WrapConfig;
use crate::error::{BuildError, CliError, Result, ResultExt};
use crate::prompt::ConsolePrompter;
use path_clean::PathClean;
use std::fs;
use std::path::{Path, PathBuf};
use wrapkit_core::Orchestrator;

/// Resolve a path relative to a working directory.
///
/// Absolute paths are kept; relative ones are joined onto `cwd`. Both are
/// lexically cleaned, so `./app/../app` becomes `app`.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.clean()
    } else {
        cwd.join(path).clean()
    }
}

/// Get the current working directory.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to get current directory: {}", e),
        ))
    })
}

/// Check that `dir` looks like an app project the packager can build.
///
/// # Errors
///
/// Returns `BuildError::AppProjectNotFound` if the directory or its
/// `package.json` is missing.
pub fn validate_app_project(dir: &Path) -> Result<()> {
    if !dir.is_dir() || !dir.join("package.json").is_file() {
        return Err(BuildError::AppProjectNotFound(dir.to_path_buf()).into());
    }
    Ok(())
}

/// Check that installers can be written into `dir` by creating (and
/// dropping) a scratch file there.
pub fn ensure_writable(dir: &Path) -> Result<()> {
    fs::metadata(dir).with_path(dir)?;
    match tempfile::NamedTempFile::new_in(dir) {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "write check failed");
            Err(BuildError::OutputNotWritable(dir.to_path_buf()).into())
        }
    }
}

/// Resolve the paths in `config` against `cwd`.
///
/// Relative icon and template paths are relative to where wrapkit runs, not
/// to the app project.
pub fn resolve_config_paths(config: &mut WrapConfig, cwd: &Path) {
    config.project_dir = resolve_path(&config.project_dir, cwd);
    config.icon = config.icon.as_deref().map(|p| resolve_path(p, cwd));
    config.template = config.template.as_deref().map(|p| resolve_path(p, cwd));
}

/// Check that a configured icon file exists.
pub fn validate_icon(icon: Option<&Path>) -> Result<()> {
    if let Some(icon) = icon {
        fs::metadata(icon).with_path(icon)?;
    }
    Ok(())
}

/// Build an orchestrator for the host from validated configuration whose
/// paths went through [`resolve_config_paths`].
pub fn orchestrator_for(config: &WrapConfig, cwd: &Path, assume_yes: bool) -> Result<Orchestrator> {
    let target = wrapkit_target::detect_host()?;
    let settings = config.orchestrator_settings(config.project_dir.clone(), cwd.to_path_buf());
    Ok(Orchestrator::new(target, settings)
        .with_prompter(ConsolePrompter::new(assume_yes))
        .with_probe(config.probe()))
}
