//! Error types for the build pipeline.
//!
//! Every fatal error knows which [`Stage`] produced it so the CLI can tell the
//! operator where a run stopped. Artifact collection failures are reported per
//! package format through [`CollectionError`], so a multi-format build shows
//! partial success instead of hiding it behind the first failure.

use crate::artifact::RelocatedArtifact;
use crate::format::PackageFormat;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Process exit status for "a required toolchain dependency was declined".
pub const EXIT_MISSING_DEPENDENCY: i32 = 2;

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Platform,
    Toolchain,
    Mirror,
    Manifest,
    Pipeline,
    Collect,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Platform => "platform",
            Stage::Toolchain => "toolchain",
            Stage::Mirror => "mirror",
            Stage::Manifest => "manifest",
            Stage::Pipeline => "pipeline",
            Stage::Collect => "collect",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal errors of a build run.
#[derive(Debug, Error)]
pub enum Error {
    /// The host OS has no platform target.
    #[error("unsupported host platform: {0}")]
    UnsupportedHost(String),

    /// The operator declined to install the toolchain.
    #[error("required toolchain is not installed: {missing}")]
    ToolchainMissing { missing: String },

    /// The toolchain installer ran and failed.
    #[error("toolchain installation failed: {reason}")]
    ToolchainInstallFailed { reason: String },

    /// The consent prompt itself could not be shown or read.
    #[error("failed to ask for toolchain installation consent: {0}")]
    Prompt(#[source] std::io::Error),

    /// An app option or the merged manifest is invalid.
    #[error("invalid value for '{field}': {value:?} ({hint})")]
    ManifestValidation {
        field: String,
        value: String,
        hint: String,
    },

    /// The base template is unreadable or has the wrong shape.
    #[error("invalid manifest template: {0}")]
    Template(String),

    /// The manifest could not be written where the toolchain reads it.
    #[error("failed to write manifest {}: {source}", .path.display())]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Local web assets could not be copied into the app project.
    #[error("failed to stage local assets from {}: {source}", .path.display())]
    LocalAssets {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The pipeline process could not be started at all.
    #[error("failed to launch build pipeline `{command}`: {source}")]
    PipelineSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The pipeline exited non-zero or was killed.
    #[error("build pipeline `{command}` failed with {}", describe_code(.code))]
    BuildProcessFailed { code: Option<i32>, command: String },

    /// One or more requested formats could not be relocated.
    #[error(transparent)]
    Collection(#[from] CollectionError),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl Error {
    /// Stage that produced this error.
    pub fn stage(&self) -> Stage {
        match self {
            Error::UnsupportedHost(_) => Stage::Platform,
            Error::ToolchainMissing { .. }
            | Error::ToolchainInstallFailed { .. }
            | Error::Prompt(_) => Stage::Toolchain,
            Error::ManifestValidation { .. }
            | Error::Template(_)
            | Error::ManifestWrite { .. }
            | Error::LocalAssets { .. } => Stage::Manifest,
            Error::PipelineSpawn { .. } | Error::BuildProcessFailed { .. } => Stage::Pipeline,
            Error::Collection(_) => Stage::Collect,
        }
    }

    /// Process exit status for this error.
    ///
    /// A declined toolchain maps to [`EXIT_MISSING_DEPENDENCY`], a failed
    /// pipeline propagates its own code, everything else is `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ToolchainMissing { .. } => EXIT_MISSING_DEPENDENCY,
            Error::BuildProcessFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }

    pub(crate) fn invalid(
        field: impl Into<String>,
        value: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Error::ManifestValidation {
            field: field.into(),
            value: value.into(),
            hint: hint.into(),
        }
    }
}

/// Relocation step that failed for an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationOp {
    Copy,
    /// Renaming the finished copy over the final path.
    Replace,
    RemoveStaged,
}

impl fmt::Display for RelocationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelocationOp::Copy => f.write_str("copy"),
            RelocationOp::Replace => f.write_str("move into place"),
            RelocationOp::RemoveStaged => f.write_str("remove staged"),
        }
    }
}

/// Failure to relocate a single package format.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Nothing at the staged path. Usually toolchain version skew changed the
    /// bundle layout or file naming.
    #[error("{format} artifact not found at expected path {}", .expected_path.display())]
    NotFound {
        format: PackageFormat,
        expected_path: PathBuf,
    },

    #[error("failed to {op} {format} artifact {}: {source}", .path.display())]
    RelocationIo {
        format: PackageFormat,
        op: RelocationOp,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArtifactError {
    pub fn format(&self) -> PackageFormat {
        match self {
            ArtifactError::NotFound { format, .. } | ArtifactError::RelocationIo { format, .. } => {
                *format
            }
        }
    }
}

/// Per-format outcome of a collection run that had at least one failure.
#[derive(Debug, Error)]
#[error("{} of {} requested artifacts could not be collected", .failures.len(), .failures.len() + .relocated.len())]
pub struct CollectionError {
    /// Formats that were relocated before or after the failures.
    pub relocated: Vec<RelocatedArtifact>,
    /// Formats that failed, in request order.
    pub failures: Vec<ArtifactError>,
}

/// Result type alias using [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
