//! Built-in platform targets.

pub mod linux;
pub mod macos;
pub mod windows;

pub use linux::LinuxTarget;
pub use macos::MacosTarget;
pub use windows::WindowsTarget;

use wrapkit_core::{Error, Result};

/// Installs rustup non-interactively on Unix hosts.
pub(crate) const RUSTUP_UNIX_INSTALL: &str =
    "curl --proto '=https' --tlsv1.2 -sSf https://sh.rustup.rs | sh -s -- -y";

/// Check `name` against a character class, requiring at least one letter.
pub(crate) fn check_name(
    name: &str,
    allowed: impl Fn(char) -> bool,
    hint: &str,
) -> Result<()> {
    if name.chars().all(allowed) && name.chars().any(|c| c.is_ascii_alphabetic()) {
        return Ok(());
    }
    Err(Error::ManifestValidation {
        field: "name".to_string(),
        value: name.to_string(),
        hint: hint.to_string(),
    })
}
