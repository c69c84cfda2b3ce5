//! Terminal output for the operator: status lines, a spinner for the network
//! probe and the final artifact summary. Everything goes to stderr.
//!
//! # Examples
//!
//! ```no_run
//! use wrapkit_cli::ui;
//!
//! ui::init_colors();
//!
//! let spinner = ui::Spinner::new("Probing registry host...");
//! spinner.finish("Default registry reachable");
//!
//! ui::success("Build completed");
//! ```

mod format;
mod spinner;

pub use format::{format_duration, format_size, print_artifact_summary};
pub use spinner::Spinner;

use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Done,
    Note,
    Caution,
}

fn status_line(status: Status, message: &str) -> String {
    match status {
        Status::Done => format!("{} {}", "✓".green().bold(), message),
        Status::Note => format!("{} {}", "›".cyan().bold(), message),
        Status::Caution => format!("{} {}", "!".yellow().bold(), message.yellow()),
    }
}

/// A finished step.
pub fn success(message: &str) {
    eprintln!("{}", status_line(Status::Done, message));
}

pub fn info(message: &str) {
    eprintln!("{}", status_line(Status::Note, message));
}

/// Something the operator should look at; the run continues.
pub fn warning(message: &str) {
    eprintln!("{}", status_line(Status::Caution, message));
}

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS"]
        .iter()
        .any(|var| std::env::var(var).is_ok())
}

/// Check if color output should be enabled.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise colors follow whether stderr
/// is a terminal.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Apply the color decision to `owo-colors` output.
pub fn init_colors() {
    owo_colors::set_override(should_use_color() && !is_ci());
}
