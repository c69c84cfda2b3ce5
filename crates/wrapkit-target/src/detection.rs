//! Selection of the platform target for the running host.

use crate::targets::{LinuxTarget, MacosTarget, WindowsTarget};
use wrapkit_core::{Error, HostOs, PlatformTarget, Result};

/// Target for a known OS.
pub fn target_for(os: HostOs) -> Box<dyn PlatformTarget> {
    match os {
        HostOs::Linux => Box::new(LinuxTarget),
        HostOs::Windows => Box::new(WindowsTarget),
        HostOs::Macos => Box::new(MacosTarget),
    }
}

/// Target for the OS this process runs on.
///
/// Fails on hosts wrapkit cannot package for (e.g. the BSDs).
pub fn detect_host() -> Result<Box<dyn PlatformTarget>> {
    let os = HostOs::current()
        .ok_or_else(|| Error::UnsupportedHost(std::env::consts::OS.to_string()))?;
    tracing::debug!(%os, "detected host platform");
    Ok(target_for(os))
}
