use crate::config::defaults::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which binaries make up the native toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ToolchainConfig {
    /// Binaries that must be on PATH (default: rustc, cargo)
    #[serde(default = "default_toolchain_binaries")]
    pub binaries: Vec<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            binaries: default_toolchain_binaries(),
        }
    }
}

/// Network probe and registry mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MirrorConfig {
    /// Probe the registry host before fetching dependencies
    #[serde(default = "default_true")]
    pub probe: bool,

    /// Always use the mirror registry
    #[serde(default)]
    pub force: bool,

    /// Host whose connect latency decides between default and mirror
    #[serde(default = "default_probe_host")]
    pub probe_host: String,

    /// Registry used on slow networks
    #[serde(default = "default_registry")]
    pub registry: String,

    /// Give up probing after this many milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Connects slower than this use the mirror
    #[serde(default = "default_slow_threshold_ms")]
    pub slow_threshold_ms: u64,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            probe: true,
            force: false,
            probe_host: default_probe_host(),
            registry: default_registry(),
            timeout_ms: default_timeout_ms(),
            slow_threshold_ms: default_slow_threshold_ms(),
        }
    }
}

/// Commands run inside the app project. Unset commands use the platform default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PipelineConfig {
    /// Dependency fetch (default: npm install)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_command: Option<String>,

    /// Compile and package (default: npm run build)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_command: Option<String>,
}
