use crate::config::WrapConfig;
use crate::error::{ConfigError, Result};

fn invalid(field: &str, value: impl ToString, hint: &str) -> crate::error::CliError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        hint: hint.to_string(),
    }
    .into()
}

impl WrapConfig {
    /// Validate configuration for logical consistency.
    ///
    /// Platform-specific rules (name charset, supported formats) are checked
    /// later against the detected host.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url) = self.url {
            if url.trim().is_empty() {
                return Err(invalid("url", url, "Provide a URL such as https://weread.qq.com"));
            }
        }

        if let Some(ref name) = self.name {
            if let Err(e) = wrapkit_core::options::validate_app_name(name) {
                return Err(ConfigError::InvalidValue {
                    field: "name".to_string(),
                    value: name.clone(),
                    hint: e.to_string(),
                }
                .into());
            }
        }

        for (field, value) in [("width", self.width), ("height", self.height)] {
            if value == Some(0) {
                return Err(invalid(field, 0, "Window size must be a positive number of pixels"));
            }
        }

        if self.toolchain.binaries.is_empty()
            || self.toolchain.binaries.iter().any(|b| b.trim().is_empty())
        {
            return Err(ConfigError::MissingField {
                field: "toolchain.binaries".to_string(),
                hint: "List the binaries the toolchain needs, e.g. [\"rustc\", \"cargo\"]".to_string(),
            }
            .into());
        }

        let mirror = &self.mirror;
        if mirror.timeout_ms == 0 {
            return Err(invalid(
                "mirror.timeoutMs",
                0,
                "Use a positive number of milliseconds",
            ));
        }
        if mirror.slow_threshold_ms == 0 || mirror.slow_threshold_ms > mirror.timeout_ms {
            return Err(invalid(
                "mirror.slowThresholdMs",
                mirror.slow_threshold_ms,
                "Use a positive number of milliseconds no larger than mirror.timeoutMs",
            ));
        }
        if mirror.probe_host.trim().is_empty() {
            return Err(invalid("mirror.probeHost", "", "Provide a host name such as www.npmjs.com"));
        }
        if mirror.registry.trim().is_empty() {
            return Err(invalid(
                "mirror.registry",
                "",
                "Provide a registry URL such as https://registry.npmmirror.com",
            ));
        }

        let commands = [
            ("pipeline.fetchCommand", &self.pipeline.fetch_command),
            ("pipeline.buildCommand", &self.pipeline.build_command),
        ];
        for (field, command) in commands {
            if matches!(command, Some(c) if c.trim().is_empty()) {
                return Err(invalid(field, "", "Remove the field to use the default command"));
            }
        }

        Ok(())
    }
}
