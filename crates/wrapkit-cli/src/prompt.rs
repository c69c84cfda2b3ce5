//! Toolchain install consent on the terminal.

use console::Term;
use std::io;
use wrapkit_core::Prompter;

/// Asks on stderr and reads the answer from the terminal.
///
/// Without an attended terminal nobody can answer, so the prompt declines
/// unless `--yes` was given.
#[derive(Debug, Clone, Copy)]
pub struct ConsolePrompter {
    assume_yes: bool,
}

impl ConsolePrompter {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Prompter for ConsolePrompter {
    fn confirm(&self, message: &str) -> io::Result<bool> {
        if self.assume_yes {
            tracing::info!("--yes given, accepting: {}", message);
            return Ok(true);
        }

        if !console::user_attended_stderr() {
            crate::ui::warning(message);
            crate::ui::warning("No terminal to answer on; declining (pass --yes to accept)");
            return Ok(false);
        }

        let term = Term::stderr();
        term.write_str(&format!("{} [y/N] ", message))?;
        let answer = term.read_line()?;
        Ok(parse_answer(&answer))
    }
}

fn parse_answer(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
