//! Command-line interface definition for wrapkit.
//!
//! # Command Structure
//!
//! - `wrapkit build <URL>` - package a web page into installers
//! - `wrapkit check` - validate configuration and preview the build
//! - `wrapkit init` - write an example `wrapkit.config.json`
//! - `wrapkit schema` - print the configuration JSON schema

mod commands;
pub mod enums;
mod validation;

use clap::Parser;

pub use commands::{AppArgs, BuildArgs, CheckArgs, Command, InitArgs, SourceArgs};
pub use enums::*;
pub use validation::{parse_app_name, parse_dimension};

/// wrapkit - turn a web page into a native desktop installer
#[derive(Parser, Debug)]
#[command(
    name = "wrapkit",
    version,
    about = "Turn a web page into a native desktop installer",
    long_about = "wrapkit wraps a URL (or a local HTML file) into a lightweight desktop app\n\
                  and packages it with the Tauri toolchain: .deb and .AppImage on Linux,\n\
                  .msi on Windows, .dmg on macOS."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
