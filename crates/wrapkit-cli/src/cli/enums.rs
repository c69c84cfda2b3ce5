use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Installer format to build
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TargetArg {
    /// Debian package (Linux)
    #[value(name = "deb")]
    Deb,

    /// AppImage (Linux)
    #[value(name = "appimage")]
    Appimage,

    /// Windows Installer package
    #[value(name = "msi")]
    Msi,

    /// macOS disk image
    #[value(name = "dmg")]
    Dmg,

    /// Every format the host platform supports
    #[value(name = "all")]
    All,
}
