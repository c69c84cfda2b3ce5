//! Built-in manifest templates.
//!
//! Every platform starts from the shared base and deep-merges its own overlay
//! (icons, installer settings, tray icon) on top.

use serde_json::Value;
use wrapkit_core::manifest::deep_merge;
use wrapkit_core::{Error, HostOs, Result};

const BASE: &str = include_str!("../templates/base.json");
const LINUX: &str = include_str!("../templates/linux.json");
const WINDOWS: &str = include_str!("../templates/windows.json");
const MACOS: &str = include_str!("../templates/macos.json");

fn parse(name: &str, source: &str) -> Result<Value> {
    serde_json::from_str(source)
        .map_err(|e| Error::Template(format!("built-in {} template is invalid: {}", name, e)))
}

/// Template for `os`: base merged with the OS overlay.
pub fn platform_template(os: HostOs) -> Result<Value> {
    let overlay = match os {
        HostOs::Linux => LINUX,
        HostOs::Windows => WINDOWS,
        HostOs::Macos => MACOS,
    };

    let mut template = parse("base", BASE)?;
    deep_merge(&mut template, parse(os.as_str(), overlay)?);
    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_template_parses_and_has_version() {
        for os in [HostOs::Linux, HostOs::Windows, HostOs::Macos] {
            let template = platform_template(os).unwrap();
            assert_eq!(template["package"]["version"], "1.0.0", "{os}");
            assert_eq!(template["tauri"]["windows"][0]["width"], 1200, "{os}");
            assert_eq!(template["tauri"]["windows"][0]["height"], 780, "{os}");
        }
    }

    #[test]
    fn test_overlay_replaces_icon_list() {
        let linux = platform_template(HostOs::Linux).unwrap();
        assert_eq!(linux["tauri"]["bundle"]["icon"], serde_json::json!(["png/icon_512.png"]));
        assert!(linux["tauri"]["bundle"]["deb"].is_object());
        assert_eq!(linux["tauri"]["bundle"]["identifier"], "com.wrapkit.app");

        let windows = platform_template(HostOs::Windows).unwrap();
        assert_eq!(
            windows["tauri"]["bundle"]["windows"]["wix"]["language"],
            serde_json::json!(["en-US"])
        );
    }
}
