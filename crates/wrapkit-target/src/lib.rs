//! # wrapkit-target
//!
//! Platform targets for wrapkit.
//!
//! Each supported OS (Linux, Windows, macOS) is one [`PlatformTarget`]
//! implementation carrying its package formats, its manifest template, its
//! naming rules and the command that installs the native toolchain. The host's
//! target is picked once with [`detect_host`].

pub mod detection;
pub mod template;
pub mod targets;

pub use detection::{detect_host, target_for};
pub use targets::*;
pub use wrapkit_core::PlatformTarget;
