use crate::cli::TargetArg;
use crate::config::WrapConfig;
use crate::error::{ConfigError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use wrapkit_core::{
    BuildOptions, MirrorSettings, OrchestratorSettings, PackageFormat, PipelineOverrides,
    TargetSelection, TcpLatencyProbe,
};

// Conversion implementations: CLI enums -> core types

impl From<TargetArg> for TargetSelection {
    fn from(t: TargetArg) -> Self {
        match t {
            TargetArg::Deb => TargetSelection::Single(PackageFormat::Deb),
            TargetArg::Appimage => TargetSelection::Single(PackageFormat::AppImage),
            TargetArg::Msi => TargetSelection::Single(PackageFormat::Msi),
            TargetArg::Dmg => TargetSelection::Single(PackageFormat::Dmg),
            TargetArg::All => TargetSelection::All,
        }
    }
}

/// Derive an app name from the URL or local file when none is configured.
///
/// Web URLs use the first host label other than `www`; local files use the
/// file stem. Only ASCII letters and digits are kept, lowercased, so the name
/// is valid on every platform.
pub fn default_app_name(input: &str) -> Option<String> {
    let path = Path::new(input);
    let raw = if path.is_file() {
        path.file_stem()?.to_string_lossy().into_owned()
    } else {
        let rest = input.split_once("://").map_or(input, |(_, rest)| rest);
        let authority = rest.split(['/', '?', '#']).next().unwrap_or(rest);
        let host = authority.rsplit('@').next().unwrap_or(authority);
        let host = host.split(':').next().unwrap_or(host);
        host.split('.')
            .find(|label| !label.is_empty() && !label.eq_ignore_ascii_case("www"))?
            .to_string()
    };

    let name: String = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    (!name.is_empty()).then_some(name)
}

impl WrapConfig {
    /// The configured URL, or an error explaining how to provide one.
    pub fn require_url(&self) -> Result<&str> {
        self.url.as_deref().ok_or_else(|| {
            ConfigError::MissingField {
                field: "url".to_string(),
                hint: "Pass the URL as an argument (wrapkit build https://example.com) or set \"url\" in wrapkit.config.json".to_string(),
            }
            .into()
        })
    }

    /// App name, falling back to one derived from `url`.
    pub fn app_name(&self, url: &str) -> Result<String> {
        if let Some(ref name) = self.name {
            return Ok(name.clone());
        }
        default_app_name(url).ok_or_else(|| {
            ConfigError::MissingField {
                field: "name".to_string(),
                hint: format!("Could not derive an app name from '{}'; pass --name", url),
            }
            .into()
        })
    }

    /// Build options for one run against `url`.
    pub fn build_options(&self, url: &str) -> Result<BuildOptions> {
        let mut options = BuildOptions::new(self.app_name(url)?).with_targets(self.targets.into());
        options.identifier = self.identifier.clone();
        options.icon = self.icon.clone();
        options.width = self.width;
        options.height = self.height;
        options.resizable = self.resizable;
        options.fullscreen = self.fullscreen;
        options.transparent = self.transparent;
        options.user_agent = self.user_agent.clone();
        options.show_menu = self.show_menu;
        options.show_system_tray = self.show_system_tray;
        options.app_version = self.app_version.clone();
        options.multi_arch = self.multi_arch;
        Ok(options)
    }

    pub fn mirror_settings(&self) -> MirrorSettings {
        MirrorSettings {
            probe: self.mirror.probe,
            force: self.mirror.force,
            probe_host: self.mirror.probe_host.clone(),
            registry: self.mirror.registry.clone(),
        }
    }

    /// Latency probe using the configured timeout and threshold.
    pub fn probe(&self) -> TcpLatencyProbe {
        TcpLatencyProbe {
            timeout: Duration::from_millis(self.mirror.timeout_ms),
            slow_threshold: Duration::from_millis(self.mirror.slow_threshold_ms),
            ..TcpLatencyProbe::default()
        }
    }

    /// Host-side settings for the orchestrator.
    pub fn orchestrator_settings(&self, app_dir: PathBuf, work_dir: PathBuf) -> OrchestratorSettings {
        let mut settings = OrchestratorSettings::new(app_dir, work_dir);
        settings.template = self.template.clone();
        settings.mirror = self.mirror_settings();
        settings.pipeline = PipelineOverrides {
            fetch: self.pipeline.fetch_command.clone(),
            build: self.pipeline.build_command.clone(),
        };
        settings.toolchain_binaries = self.toolchain.binaries.clone();
        settings
    }
}
