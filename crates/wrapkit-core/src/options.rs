//! User-facing packaging options for one build.

use crate::error::{Error, Result};
use crate::format::TargetSelection;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Characters that are unsafe in file names on at least one supported OS.
const UNSAFE_NAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Options for one build. Immutable once the build starts.
///
/// Every knob left as `None` falls back to the platform template's default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    /// App name. Becomes the product name and part of every output file name.
    pub name: String,

    /// Requested package formats.
    #[serde(default)]
    pub targets: TargetSelection,

    /// Bundle identifier (e.g. `com.example.weread`).
    pub identifier: Option<String>,

    /// Icon file handed to the packager.
    pub icon: Option<PathBuf>,

    pub width: Option<u32>,
    pub height: Option<u32>,
    pub resizable: Option<bool>,
    pub fullscreen: Option<bool>,
    pub transparent: Option<bool>,

    /// Custom user agent for the embedded webview.
    pub user_agent: Option<String>,

    pub show_menu: Option<bool>,
    pub show_system_tray: Option<bool>,

    /// Overrides the version declared by the template.
    pub app_version: Option<String>,

    /// Build a universal binary (macOS only).
    #[serde(default)]
    pub multi_arch: bool,
}

impl BuildOptions {
    /// Options with only a name set; everything else uses template defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            targets: TargetSelection::All,
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
        }
    }

    pub fn with_targets(mut self, targets: TargetSelection) -> Self {
        self.targets = targets;
        self
    }
}

/// Check that `name` can be used as a file name stem on every platform.
///
/// Platform targets layer stricter rules on top of this one.
pub fn validate_app_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid("name", name, "app name cannot be empty"));
    }

    if name == "." || name == ".." {
        return Err(Error::invalid(
            "name",
            name,
            "app name cannot be a relative path component",
        ));
    }

    if name.trim() != name {
        return Err(Error::invalid(
            "name",
            name,
            "app name cannot start or end with whitespace",
        ));
    }

    if let Some(c) = name
        .chars()
        .find(|c| UNSAFE_NAME_CHARS.contains(c) || c.is_control())
    {
        return Err(Error::invalid(
            "name",
            name,
            format!("app name contains a character that is unsafe in file names: {:?}", c),
        ));
    }

    Ok(())
}
