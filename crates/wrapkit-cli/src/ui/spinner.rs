//! Spinner for short waits of unknown length.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

/// Spinner on stderr. Hidden when stderr is not a terminal.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        if !console::user_attended_stderr() {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["◐", "◓", "◑", "◒"]);
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// Finish with a green checkmark.
    pub fn finish(&self, message: &str) {
        self.finish_with(format!("{} {}", "✓".green(), message));
    }

    /// Finish with a yellow warning sign.
    pub fn warn(&self, message: &str) {
        self.finish_with(format!("{} {}", "!".yellow().bold(), message));
    }

    /// Finish with a red X.
    pub fn fail(&self, message: &str) {
        self.finish_with(format!("{} {}", "✗".red(), message));
    }

    fn finish_with(&self, line: String) {
        if self.pb.is_hidden() {
            self.pb.finish_and_clear();
            eprintln!("{}", line);
        } else {
            self.pb.finish_with_message(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_lifecycle() {
        let spinner = Spinner::new("Probing...");
        spinner.finish("Done");

        Spinner::new("Probing").warn("Slow");
        Spinner::new("Probing").fail("Failed");
    }
}
