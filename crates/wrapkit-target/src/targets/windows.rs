//! Windows target: `.msi` through WiX.

use super::check_name;
use crate::template::platform_template;
use serde_json::Value;
use wrapkit_core::{HostOs, PackageFormat, PlatformTarget, Result};

pub struct WindowsTarget;

impl PlatformTarget for WindowsTarget {
    fn os(&self) -> HostOs {
        HostOs::Windows
    }

    fn name(&self) -> &'static str {
        "Windows"
    }

    fn formats(&self) -> &'static [PackageFormat] {
        &[PackageFormat::Msi]
    }

    fn template(&self) -> Result<Value> {
        platform_template(HostOs::Windows)
    }

    fn validate_name(&self, name: &str) -> Result<()> {
        check_name(
            name,
            |c| c.is_ascii_alphanumeric(),
            "on Windows the name may only contain ASCII letters and digits, and must contain a letter",
        )
    }

    fn toolchain_install_command(&self) -> &'static str {
        "winget install --id Rustlang.Rustup -e --accept-source-agreements --accept-package-agreements"
    }
}
