//! Command implementations for the wrapkit CLI.
//!
//! - [`build`] - Wrap a URL into native installers
//! - [`check`] - Validate configuration and preview a build
//! - [`init`] - Write an example config file
//! - [`schema`] - Print the config JSON schema
//!
//! Each command is implemented in its own module and provides an `execute`
//! function that takes the parsed command arguments and returns a Result.

pub mod build;
pub mod check;
pub mod init;
pub mod schema;
pub(crate) mod utils;

// Re-export execute functions for convenience
pub use build::execute as build_execute;
pub use check::execute as check_execute;
pub use init::execute as init_execute;
pub use schema::execute as schema_execute;
