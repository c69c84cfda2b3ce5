use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::*;
use crate::cli::validation::{parse_app_name, parse_dimension};

/// Available wrapkit subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Package a web page into native installers
    ///
    /// Merges the app options into the packager manifest, runs the app
    /// project's build pipeline and moves the finished installers into the
    /// current directory as `<name>.<ext>`.
    Build(BuildArgs),

    /// Validate configuration and preview a build
    ///
    /// Checks the configuration, the toolchain and the network, and prints
    /// where each installer is expected, without running the pipeline.
    Check(CheckArgs),

    /// Write an example wrapkit.config.json
    Init(InitArgs),

    /// Print the JSON schema of wrapkit.config.json
    Schema,
}

/// Options describing the app itself
#[derive(Args, Debug, Default, Clone)]
pub struct AppArgs {
    /// App name, used for the window title and installer file names
    ///
    /// Defaults to the first label of the URL's host (e.g. `weread` for
    /// weread.qq.com). Linux only accepts lowercase letters, digits and '-'.
    #[arg(short, long, value_parser = parse_app_name, value_name = "NAME")]
    pub name: Option<String>,

    /// Installer format to build
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub targets: Option<TargetArg>,

    /// Bundle identifier (e.g. com.example.weread)
    #[arg(long, value_name = "ID")]
    pub identifier: Option<String>,

    /// Icon file for the app
    #[arg(long, value_name = "FILE")]
    pub icon: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long, value_parser = parse_dimension, value_name = "PX")]
    pub width: Option<u32>,

    /// Window height in pixels
    #[arg(long, value_parser = parse_dimension, value_name = "PX")]
    pub height: Option<u32>,

    /// Whether the window can be resized
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub resizable: Option<bool>,

    /// Start in fullscreen
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub fullscreen: Option<bool>,

    /// Transparent title bar
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub transparent: Option<bool>,

    /// Custom user agent for the webview
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Show the app menu
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub show_menu: Option<bool>,

    /// Show a system tray icon
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub show_system_tray: Option<bool>,

    /// App version (overrides the template's version)
    #[arg(long, value_name = "VERSION")]
    pub app_version: Option<String>,

    /// Build a universal binary for Intel and Apple Silicon (macOS only)
    #[arg(long)]
    pub multi_arch: bool,
}

/// Where configuration and the app project come from
#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    /// Path to wrapkit.config.json
    ///
    /// If not provided, wrapkit.config.json in the current directory is used
    /// when present.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The app project the packager builds (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Manifest template replacing the built-in one
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Always fetch dependencies from the mirror registry
    #[arg(long, conflicts_with = "no_probe")]
    pub force_mirror: bool,

    /// Skip the network probe and use the default registry
    #[arg(long)]
    pub no_probe: bool,
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// URL or local HTML file to wrap
    ///
    /// A URL without a scheme gets https://. An existing local file is
    /// bundled with the app together with the rest of its directory.
    ///
    /// Examples:
    ///   wrapkit build https://weread.qq.com
    ///   wrapkit build ./site/index.html --name site
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    #[command(flatten)]
    pub app: AppArgs,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Install a missing toolchain without asking
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// URL to preview installer paths for (optional)
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    #[command(flatten)]
    pub app: AppArgs,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing wrapkit.config.json
    #[arg(short, long)]
    pub force: bool,
}
