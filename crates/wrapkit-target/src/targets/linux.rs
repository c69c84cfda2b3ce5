//! Linux target: `.deb` and `.AppImage`.

use super::{check_name, RUSTUP_UNIX_INSTALL};
use crate::template::platform_template;
use serde_json::Value;
use wrapkit_core::{HostOs, PackageFormat, PlatformTarget, Result};

/// Linux packaging.
///
/// Debian package names only allow lowercase letters, digits and `-`, so app
/// names are held to the same rule for both formats.
pub struct LinuxTarget;

impl PlatformTarget for LinuxTarget {
    fn os(&self) -> HostOs {
        HostOs::Linux
    }

    fn name(&self) -> &'static str {
        "Linux"
    }

    fn formats(&self) -> &'static [PackageFormat] {
        &[PackageFormat::Deb, PackageFormat::AppImage]
    }

    fn template(&self) -> Result<Value> {
        platform_template(HostOs::Linux)
    }

    fn validate_name(&self, name: &str) -> Result<()> {
        check_name(
            name,
            |c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-',
            "on Linux the name may only contain lowercase letters, digits and '-', and must contain a letter",
        )
    }

    fn toolchain_install_command(&self) -> &'static str {
        RUSTUP_UNIX_INSTALL
    }
}
