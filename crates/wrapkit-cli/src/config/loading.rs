use crate::cli::{AppArgs, SourceArgs, TargetArg};
use crate::config::{MirrorConfig, PipelineConfig, ToolchainConfig, WrapConfig};
use crate::error::{ConfigError, Result};
use figment::{
    providers::{Env, Format as _, Json, Serialized},
    Figment,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the current directory.
pub const CONFIG_FILE: &str = "wrapkit.config.json";

/// Prefix of environment overrides. `__` separates nested keys:
/// `WRAPKIT_MIRROR__PROBE_HOST` sets `mirror.probeHost`.
pub const ENV_PREFIX: &str = "WRAPKIT_";

/// Values given on the command line. Unset values leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<TargetArg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resizable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullscreen: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_menu: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_system_tray: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_arch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror: Option<MirrorOverrides>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MirrorOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

impl CliOverrides {
    /// Collect the flags shared by `build` and `check`.
    pub fn from_args(url: Option<&str>, app: &AppArgs, source: &SourceArgs) -> Self {
        let mirror = (source.force_mirror || source.no_probe).then(|| MirrorOverrides {
            probe: source.no_probe.then_some(false),
            force: source.force_mirror.then_some(true),
        });

        Self {
            url: url.map(str::to_string),
            name: app.name.clone(),
            targets: app.targets,
            identifier: app.identifier.clone(),
            icon: app.icon.clone(),
            width: app.width,
            height: app.height,
            resizable: app.resizable,
            fullscreen: app.fullscreen,
            transparent: app.transparent,
            user_agent: app.user_agent.clone(),
            show_menu: app.show_menu,
            show_system_tray: app.show_system_tray,
            app_version: app.app_version.clone(),
            multi_arch: app.multi_arch.then_some(true),
            project_dir: source.project_dir.clone(),
            template: source.template.clone(),
            mirror,
        }
    }
}

impl WrapConfig {
    /// Layer defaults, the config file, `WRAPKIT_*` and `overrides`.
    ///
    /// An explicit `config_path` must exist; the default `wrapkit.config.json`
    /// is only read when present.
    pub fn load(overrides: &CliOverrides, config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default_config()));

        let config_file = match config_path {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = Path::new(CONFIG_FILE);
                default_path.is_file().then(|| default_path.to_path_buf())
            }
        };

        if let Some(path) = config_file {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Json::file(path));
        }

        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .map(|key| env_key_to_path(key.as_str()).into())
                .lowercase(false),
        );

        figment = figment.merge(Serialized::defaults(overrides));

        figment
            .extract()
            .map_err(|e| ConfigError::Extract(e.to_string()).into())
    }

    /// The bottom layer: what an empty config file means.
    pub(crate) fn default_config() -> Self {
        use crate::config::defaults::*;

        Self {
            url: None,
            name: None,
            targets: default_targets(),
            identifier: None,
            icon: None,
            width: None,
            height: None,
            resizable: None,
            fullscreen: None,
            transparent: None,
            user_agent: None,
            show_menu: None,
            show_system_tray: None,
            app_version: None,
            multi_arch: false,
            project_dir: default_project_dir(),
            template: None,
            toolchain: ToolchainConfig::default(),
            mirror: MirrorConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

/// Turn an environment key (prefix already stripped) into a config path.
///
/// `MIRROR__SLOW_THRESHOLD_MS` becomes `mirror.slowThresholdMs`.
pub(crate) fn env_key_to_path(key: &str) -> String {
    key.to_ascii_lowercase()
        .split("__")
        .map(camel_case)
        .collect::<Vec<_>>()
        .join(".")
}

fn camel_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut upper = false;
    for c in segment.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
