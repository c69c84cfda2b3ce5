//! ToolchainGate: makes sure the native compiler toolchain exists before any
//! build work starts.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::io;
use std::path::PathBuf;

/// Probe and installer for the native toolchain.
#[async_trait]
pub trait Toolchain: Send + Sync {
    /// Whether every required binary is available.
    fn is_installed(&self) -> bool;

    /// Human readable list of what is required (used in prompts and errors).
    fn describe(&self) -> String;

    /// Install the toolchain. Returns a reason on failure.
    async fn install(&self) -> std::result::Result<(), String>;
}

/// Asks the operator for consent.
pub trait Prompter: Send + Sync {
    fn confirm(&self, message: &str) -> io::Result<bool>;
}

/// Toolchain found on `PATH`, installed through a shell command.
#[derive(Debug, Clone)]
pub struct SystemToolchain {
    binaries: Vec<String>,
    install_command: String,
}

impl SystemToolchain {
    pub fn new(binaries: Vec<String>, install_command: impl Into<String>) -> Self {
        Self {
            binaries,
            install_command: install_command.into(),
        }
    }

    fn locate(binary: &str) -> Option<PathBuf> {
        match which::which(binary) {
            Ok(path) => {
                tracing::debug!(binary, path = %path.display(), "found toolchain binary");
                Some(path)
            }
            Err(e) => {
                tracing::debug!(binary, error = %e, "toolchain binary not found");
                None
            }
        }
    }
}

#[async_trait]
impl Toolchain for SystemToolchain {
    fn is_installed(&self) -> bool {
        self.binaries.iter().all(|b| Self::locate(b).is_some())
    }

    fn describe(&self) -> String {
        self.binaries.join(", ")
    }

    async fn install(&self) -> std::result::Result<(), String> {
        tracing::info!(command = %self.install_command, "installing toolchain");
        let status = crate::invoker::shell_command(&self.install_command)
            .status()
            .await
            .map_err(|e| format!("failed to launch `{}`: {}", self.install_command, e))?;

        if !status.success() {
            return Err(format!("`{}` exited with {}", self.install_command, status));
        }

        // The installer may have put binaries somewhere PATH does not cover
        // for this process yet.
        let missing: Vec<&str> = self
            .binaries
            .iter()
            .map(String::as_str)
            .filter(|b| Self::locate(b).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(format!(
                "installer finished but {} still not on PATH (open a new shell and retry)",
                missing.join(", ")
            ));
        }
        Ok(())
    }
}

/// Proof that the toolchain gate passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ready;

/// Checks the toolchain and offers to install it.
pub struct ToolchainGate<'a> {
    toolchain: &'a dyn Toolchain,
    prompter: &'a dyn Prompter,
}

impl<'a> ToolchainGate<'a> {
    pub fn new(toolchain: &'a dyn Toolchain, prompter: &'a dyn Prompter) -> Self {
        Self {
            toolchain,
            prompter,
        }
    }

    /// Pass when the toolchain is installed; otherwise ask, then install.
    ///
    /// A declined prompt is [`Error::ToolchainMissing`], which maps to the
    /// missing-dependency exit code. The prompt is never shown when the
    /// toolchain is already present.
    pub async fn ensure_ready(&self) -> Result<Ready> {
        if self.toolchain.is_installed() {
            return Ok(Ready);
        }

        let required = self.toolchain.describe();
        tracing::warn!(required = %required, "toolchain not found");

        let message = format!(
            "The native toolchain ({}) is required to package apps. Install it now?",
            required
        );
        let accepted = self.prompter.confirm(&message).map_err(Error::Prompt)?;
        if !accepted {
            return Err(Error::ToolchainMissing { missing: required });
        }

        self.toolchain
            .install()
            .await
            .map_err(|reason| Error::ToolchainInstallFailed { reason })?;
        tracing::info!("toolchain installed");
        Ok(Ready)
    }
}
