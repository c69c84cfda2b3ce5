//! macOS target: `.dmg`, optionally as a universal binary.

use super::{check_name, RUSTUP_UNIX_INSTALL};
use crate::template::platform_template;
use serde_json::Value;
use std::path::{Path, PathBuf};
use wrapkit_core::platform::TAURI_DIR;
use wrapkit_core::{ArchitectureTag, BuildOptions, HostOs, PackageFormat, PlatformTarget, Result};

/// Rust target triple of a universal macOS build.
const UNIVERSAL_TRIPLE: &str = "universal-apple-darwin";

/// macOS packaging.
///
/// With `multi_arch` the toolchain builds for both Apple architectures into a
/// separate target directory and tags the image `universal`.
pub struct MacosTarget;

impl PlatformTarget for MacosTarget {
    fn os(&self) -> HostOs {
        HostOs::Macos
    }

    fn name(&self) -> &'static str {
        "macOS"
    }

    fn formats(&self) -> &'static [PackageFormat] {
        &[PackageFormat::Dmg]
    }

    fn template(&self) -> Result<Value> {
        platform_template(HostOs::Macos)
    }

    fn validate_name(&self, name: &str) -> Result<()> {
        check_name(
            name,
            |c| c.is_ascii_alphanumeric(),
            "on macOS the name may only contain ASCII letters and digits, and must contain a letter",
        )
    }

    fn validate_options(&self, _options: &BuildOptions) -> Result<()> {
        Ok(())
    }

    fn architecture(&self, options: &BuildOptions) -> ArchitectureTag {
        if options.multi_arch {
            ArchitectureTag::universal()
        } else {
            ArchitectureTag::host(HostOs::Macos)
        }
    }

    fn bundle_root(&self, app_dir: &Path, options: &BuildOptions) -> PathBuf {
        let target = app_dir.join(TAURI_DIR).join("target");
        let target = if options.multi_arch {
            target.join(UNIVERSAL_TRIPLE)
        } else {
            target
        };
        target.join("release").join("bundle")
    }

    fn build_command(&self, options: &BuildOptions) -> String {
        if options.multi_arch {
            "npm run build:mac".to_string()
        } else {
            "npm run build".to_string()
        }
    }

    fn toolchain_install_command(&self) -> &'static str {
        RUSTUP_UNIX_INSTALL
    }
}
