//! The per-OS capability set.
//!
//! Each supported OS provides one [`PlatformTarget`]. The orchestrator picks a
//! single implementation at startup and never mixes them within a run.

use crate::arch::{ArchitectureTag, HostOs};
use crate::error::{Error, Result};
use crate::format::PackageFormat;
use crate::options::BuildOptions;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Directory of the packager project inside an app project.
pub const TAURI_DIR: &str = "src-tauri";

/// Platform-specific knowledge the generic pipeline needs.
pub trait PlatformTarget: Send + Sync {
    /// OS this target packages for.
    fn os(&self) -> HostOs;

    /// Human readable name (e.g. "Linux").
    fn name(&self) -> &'static str;

    /// Formats this platform can produce, in collection order.
    fn formats(&self) -> &'static [PackageFormat];

    /// Base manifest template with the platform defaults applied.
    fn template(&self) -> Result<Value>;

    /// Platform naming rules on top of the generic file-name check.
    fn validate_name(&self, name: &str) -> Result<()>;

    /// Reject options this platform cannot honor.
    fn validate_options(&self, options: &BuildOptions) -> Result<()> {
        if options.multi_arch {
            return Err(Error::invalid(
                "multiArch",
                "true",
                format!("universal binaries are only supported on macOS, not {}", self.name()),
            ));
        }
        Ok(())
    }

    /// Architecture tag used in staged file names.
    fn architecture(&self, _options: &BuildOptions) -> ArchitectureTag {
        ArchitectureTag::host(self.os())
    }

    /// Root of the toolchain's bundle tree inside the app project.
    fn bundle_root(&self, app_dir: &Path, _options: &BuildOptions) -> PathBuf {
        app_dir
            .join(TAURI_DIR)
            .join("target")
            .join("release")
            .join("bundle")
    }

    /// Compile + package step of the pipeline.
    fn build_command(&self, _options: &BuildOptions) -> String {
        "npm run build".to_string()
    }

    /// Shell line that installs the native toolchain.
    fn toolchain_install_command(&self) -> &'static str;
}
