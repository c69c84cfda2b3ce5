//! Package formats and the table that describes where the toolchain stages them.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An installer type the toolchain can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageFormat {
    Deb,
    #[serde(rename = "appimage")]
    AppImage,
    Msi,
    Dmg,
}

/// Where and how the toolchain stages one package format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    /// Name used on the command line and in the manifest's bundle targets.
    pub name: &'static str,
    /// File extension of both the staged and the relocated file.
    pub extension: &'static str,
    /// Subdirectory of the bundle root the toolchain writes into.
    pub staged_subdir: &'static str,
    /// Extra text between the architecture and the extension.
    pub staged_suffix: &'static str,
}

const FORMATS: [FormatSpec; 4] = [
    FormatSpec {
        name: "deb",
        extension: "deb",
        staged_subdir: "deb",
        staged_suffix: "",
    },
    FormatSpec {
        name: "appimage",
        extension: "AppImage",
        staged_subdir: "appimage",
        staged_suffix: "",
    },
    FormatSpec {
        name: "msi",
        extension: "msi",
        staged_subdir: "msi",
        // WiX appends the installer language
        staged_suffix: "_en-US",
    },
    FormatSpec {
        name: "dmg",
        extension: "dmg",
        staged_subdir: "dmg",
        staged_suffix: "",
    },
];

impl PackageFormat {
    pub const ALL: [PackageFormat; 4] = [
        PackageFormat::Deb,
        PackageFormat::AppImage,
        PackageFormat::Msi,
        PackageFormat::Dmg,
    ];

    pub fn spec(&self) -> &'static FormatSpec {
        match self {
            PackageFormat::Deb => &FORMATS[0],
            PackageFormat::AppImage => &FORMATS[1],
            PackageFormat::Msi => &FORMATS[2],
            PackageFormat::Dmg => &FORMATS[3],
        }
    }

    pub fn name(&self) -> &'static str {
        self.spec().name
    }

    pub fn extension(&self) -> &'static str {
        self.spec().extension
    }
}

impl fmt::Display for PackageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PackageFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        PackageFormat::ALL
            .into_iter()
            .find(|format| format.name() == lower)
            .ok_or_else(|| {
                Error::invalid(
                    "targets",
                    s,
                    "expected one of deb, appimage, msi, dmg or all",
                )
            })
    }
}

/// Formats requested for one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TargetSelection {
    Single(PackageFormat),
    /// Every format the host platform supports.
    #[default]
    All,
}

impl TargetSelection {
    /// Resolve against the formats a platform can produce.
    ///
    /// A single format the platform cannot produce is a validation error, so
    /// it is caught before the pipeline runs.
    pub fn resolve(&self, supported: &[PackageFormat]) -> Result<Vec<PackageFormat>> {
        match self {
            TargetSelection::All => Ok(supported.to_vec()),
            TargetSelection::Single(format) if supported.contains(format) => Ok(vec![*format]),
            TargetSelection::Single(format) => Err(Error::invalid(
                "targets",
                format.name(),
                format!(
                    "this platform can only produce: {}",
                    supported
                        .iter()
                        .map(PackageFormat::name)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            )),
        }
    }
}

impl fmt::Display for TargetSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSelection::Single(format) => format.fmt(f),
            TargetSelection::All => f.write_str("all"),
        }
    }
}

impl FromStr for TargetSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("all") {
            Ok(TargetSelection::All)
        } else {
            s.parse().map(TargetSelection::Single)
        }
    }
}

impl TryFrom<String> for TargetSelection {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TargetSelection> for String {
    fn from(value: TargetSelection) -> Self {
        value.to_string()
    }
}
