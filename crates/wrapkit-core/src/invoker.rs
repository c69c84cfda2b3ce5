//! BuildInvoker: runs dependency fetch, compile and package as one shell
//! pipeline inside the app project.

use crate::error::{Error, Result};
use crate::mirror::SourcePolicy;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

/// The two halves of the build pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineCommands {
    /// Dependency fetch. Receives `--registry=<url>` when mirrored.
    pub fetch: String,
    /// Compile + package.
    pub build: String,
}

impl PipelineCommands {
    pub fn new(fetch: impl Into<String>, build: impl Into<String>) -> Self {
        Self {
            fetch: fetch.into(),
            build: build.into(),
        }
    }

    pub fn fetch_line(&self, policy: &SourcePolicy) -> String {
        match policy {
            SourcePolicy::Default => self.fetch.clone(),
            SourcePolicy::Mirrored { registry } => format!("{} --registry={}", self.fetch, registry),
        }
    }

    /// Full pipeline; the build only runs if the fetch succeeded.
    pub fn command_line(&self, policy: &SourcePolicy) -> String {
        format!("{} && {}", self.fetch_line(policy), self.build)
    }
}

impl Default for PipelineCommands {
    fn default() -> Self {
        Self::new("npm install", "npm run build")
    }
}

/// Platform shell invocation for a command line.
pub(crate) fn shell_command(line: &str) -> Command {
    let mut command = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(line);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(line);
        c
    };
    command.kill_on_drop(true);
    command
}

/// Runs the pipeline as one blocking child process.
#[derive(Debug, Clone)]
pub struct BuildInvoker {
    commands: PipelineCommands,
}

impl BuildInvoker {
    pub fn new(commands: PipelineCommands) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &PipelineCommands {
        &self.commands
    }

    /// Run the pipeline in `dir` and wait for it.
    ///
    /// The child inherits stdio so toolchain output streams to the operator.
    /// A non-zero exit is [`Error::BuildProcessFailed`] carrying the child's
    /// code.
    pub async fn invoke(&self, policy: &SourcePolicy, dir: &Path) -> Result<ExitStatus> {
        let line = self.commands.command_line(policy);
        tracing::info!(command = %line, dir = %dir.display(), "running build pipeline");

        let status = shell_command(&line)
            .current_dir(dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| Error::PipelineSpawn {
                command: line.clone(),
                source,
            })?;

        if !status.success() {
            return Err(Error::BuildProcessFailed {
                code: status.code(),
                command: line,
            });
        }
        Ok(status)
    }
}
