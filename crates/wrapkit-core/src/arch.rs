//! Host OS and architecture tags used in staged artifact names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating system a build runs on (and produces installers for).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostOs {
    Linux,
    Windows,
    Macos,
}

impl HostOs {
    /// OS of the running process, if it is one wrapkit can package for.
    pub fn current() -> Option<Self> {
        Self::from_platform(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value.
    pub fn from_platform(os: &str) -> Option<Self> {
        match os {
            "linux" => Some(HostOs::Linux),
            "windows" => Some(HostOs::Windows),
            "macos" => Some(HostOs::Macos),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HostOs::Linux => "linux",
            HostOs::Windows => "windows",
            HostOs::Macos => "macos",
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized CPU architecture label, as it appears in staged file names.
///
/// The raw value reported by the platform (`x86_64`, `aarch64`, ...) is not
/// what the packager writes into file names, and the label differs per OS:
/// Debian-style `amd64` on Linux, `x64` on Windows and macOS.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchitectureTag(String);

impl ArchitectureTag {
    /// Label for a macOS universal (fat) binary.
    pub const UNIVERSAL: &'static str = "universal";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Tag of the running process for the given OS.
    pub fn host(os: HostOs) -> Self {
        Self::normalize(os, std::env::consts::ARCH)
    }

    /// Normalize a raw `std::env::consts::ARCH` value for `os`.
    pub fn normalize(os: HostOs, raw: &str) -> Self {
        let tag = match (os, raw) {
            (HostOs::Linux, "x86_64") => "amd64",
            (HostOs::Linux, "x86") => "i386",
            (HostOs::Linux, "aarch64") => "arm64",
            (HostOs::Linux, "arm") => "armhf",
            (HostOs::Windows, "x86_64") => "x64",
            (HostOs::Windows, "aarch64") => "arm64",
            (HostOs::Macos, "x86_64") => "x64",
            (_, other) => other,
        };
        Self(tag.to_string())
    }

    pub fn universal() -> Self {
        Self(Self::UNIVERSAL.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArchitectureTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x86_64_is_vendor_neutral_per_os() {
        assert_eq!(ArchitectureTag::normalize(HostOs::Linux, "x86_64").as_str(), "amd64");
        assert_eq!(ArchitectureTag::normalize(HostOs::Windows, "x86_64").as_str(), "x64");
        assert_eq!(ArchitectureTag::normalize(HostOs::Macos, "x86_64").as_str(), "x64");
    }

    #[test]
    fn test_arm_variants() {
        assert_eq!(ArchitectureTag::normalize(HostOs::Linux, "aarch64").as_str(), "arm64");
        assert_eq!(ArchitectureTag::normalize(HostOs::Linux, "arm").as_str(), "armhf");
        assert_eq!(ArchitectureTag::normalize(HostOs::Windows, "aarch64").as_str(), "arm64");
        assert_eq!(ArchitectureTag::normalize(HostOs::Macos, "aarch64").as_str(), "aarch64");
    }

    #[test]
    fn test_unknown_arch_passes_through() {
        assert_eq!(
            ArchitectureTag::normalize(HostOs::Linux, "riscv64").as_str(),
            "riscv64"
        );
    }

    #[test]
    fn test_host_os_mapping() {
        assert_eq!(HostOs::from_platform("linux"), Some(HostOs::Linux));
        assert_eq!(HostOs::from_platform("macos"), Some(HostOs::Macos));
        assert_eq!(HostOs::from_platform("windows"), Some(HostOs::Windows));
        assert_eq!(HostOs::from_platform("freebsd"), None);
    }
}
