use std::path::PathBuf;

use crate::cli::TargetArg;
use wrapkit_core::mirror::{DEFAULT_MIRROR_REGISTRY, DEFAULT_PROBE_HOST};

pub fn default_targets() -> TargetArg {
    TargetArg::All
}

pub fn default_project_dir() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_toolchain_binaries() -> Vec<String> {
    vec!["rustc".to_string(), "cargo".to_string()]
}

pub fn default_true() -> bool {
    true
}

pub fn default_probe_host() -> String {
    DEFAULT_PROBE_HOST.to_string()
}

pub fn default_registry() -> String {
    DEFAULT_MIRROR_REGISTRY.to_string()
}

pub fn default_timeout_ms() -> u64 {
    3000
}

pub fn default_slow_threshold_ms() -> u64 {
    1000
}
