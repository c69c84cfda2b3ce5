//! `wrapkit.config.json`, `WRAPKIT_*` variables and flags, layered with figment.
//!
//! Later layers win: defaults, then the file, then the environment, then
//! flags given on the command line.

mod conversions;
mod defaults;
mod loading;
mod types;
mod validation;

use crate::cli::TargetArg;
use crate::error::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use conversions::default_app_name;
pub use defaults::*;
pub use loading::{CliOverrides, CONFIG_FILE, ENV_PREFIX};
pub use types::*;

/// wrapkit configuration - loaded from wrapkit.config.json, WRAPKIT_* and CLI args.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WrapConfig {
    /// URL or local HTML file to wrap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// App name (defaults to the first label of the URL's host)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Installer format to build
    #[serde(default = "default_targets")]
    pub targets: TargetArg,

    /// Bundle identifier (e.g. com.example.weread)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// Icon file for the app
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<PathBuf>,

    /// Window width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Window height in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resizable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullscreen: Option<bool>,

    /// Transparent title bar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparent: Option<bool>,

    /// Custom user agent for the webview
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_menu: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_system_tray: Option<bool>,

    /// App version (overrides the template's version)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,

    /// Universal binary for Intel and Apple Silicon (macOS only)
    #[serde(default)]
    pub multi_arch: bool,

    /// The app project the packager builds
    #[serde(default = "default_project_dir")]
    pub project_dir: PathBuf,

    /// Manifest template replacing the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,

    /// Native toolchain detection
    #[serde(default)]
    pub toolchain: ToolchainConfig,

    /// Network probe and registry mirror
    #[serde(default)]
    pub mirror: MirrorConfig,

    /// Commands run inside the app project
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl WrapConfig {
    /// Generate JSON Schema for wrapkit.config.json.
    pub fn json_schema() -> Result<serde_json::Value> {
        let schema = schemars::schema_for!(WrapConfig);
        Ok(serde_json::to_value(schema)?)
    }

    /// Generate example wrapkit.config.json content.
    pub fn example_config() -> Result<String> {
        Ok(serde_json::to_string_pretty(&Self {
            url: Some("https://weread.qq.com".to_string()),
            name: Some("weread".to_string()),
            targets: TargetArg::All,
            identifier: Some("com.wrapkit.weread".to_string()),
            icon: None,
            width: Some(1200),
            height: Some(780),
            resizable: Some(true),
            fullscreen: Some(false),
            transparent: None,
            user_agent: None,
            show_menu: None,
            show_system_tray: Some(false),
            app_version: Some("1.0.0".to_string()),
            multi_arch: false,
            project_dir: default_project_dir(),
            template: None,
            toolchain: ToolchainConfig::default(),
            mirror: MirrorConfig::default(),
            pipeline: PipelineConfig::default(),
        })?)
    }
}
