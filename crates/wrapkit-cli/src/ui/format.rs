//! Human-readable sizes and durations, and the installer summary.

use console::Term;
use owo_colors::OwoColorize;
use std::time::Duration;
use wrapkit_core::RelocatedArtifact;

/// Size with a binary unit and one decimal.
///
/// ```
/// use wrapkit_cli::ui::format_size;
///
/// assert_eq!(format_size(512), "512 B");
/// assert_eq!(format_size(3 * 1024 * 1024 + 512 * 1024), "3.5 MiB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const STEP: f64 = 1024.0;
    let units = ["KiB", "MiB", "GiB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / STEP;
    let mut unit = units[0];
    for next in &units[1..] {
        if value < STEP {
            break;
        }
        value /= STEP;
        unit = next;
    }
    format!("{:.1} {}", value, unit)
}

/// Wall-clock time of a build. Packaging takes minutes, so seconds are
/// whole once a minute has passed.
///
/// ```
/// use std::time::Duration;
/// use wrapkit_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(420)), "420ms");
/// assert_eq!(format_duration(Duration::from_secs(185)), "3m 05s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    match duration.as_secs() {
        0 => format!("{}ms", duration.subsec_millis()),
        secs @ 1..=59 => format!("{}.{}s", secs, duration.subsec_millis() / 100),
        secs => format!("{}m {:02}s", secs / 60, secs % 60),
    }
}

/// Print the relocated installers with their sizes to stderr.
pub fn print_artifact_summary(artifacts: &[RelocatedArtifact], elapsed: Duration) {
    let rule = "─".repeat(usize::from(Term::stderr().size().1).min(72));

    eprintln!();
    eprintln!("{}", "Installers".bold());
    eprintln!("{}", rule.dimmed());
    for artifact in artifacts {
        eprintln!(
            "  {} {:<9} {}  {}",
            "▸".cyan(),
            artifact.format.name(),
            artifact.path.display().bold(),
            format_size(artifact.size).dimmed()
        );
    }
    eprintln!("{}", rule.dimmed());

    let total: u64 = artifacts.iter().map(|a| a.size).sum();
    eprintln!(
        "  {} installer(s), {} in {}",
        artifacts.len(),
        format_size(total).green(),
        format_duration(elapsed).green()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use wrapkit_core::PackageFormat;

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.0 KiB");
        assert_eq!(format_size(80 * 1024 * 1024), "80.0 MiB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.0 GiB");
    }

    #[test]
    fn test_format_duration_ranges() {
        assert_eq!(format_duration(Duration::from_millis(0)), "0ms");
        assert_eq!(format_duration(Duration::from_millis(2750)), "2.7s");
        assert_eq!(format_duration(Duration::from_secs(60)), "1m 00s");
        assert_eq!(format_duration(Duration::from_secs(754)), "12m 34s");
    }

    #[test]
    fn test_print_artifact_summary() {
        let artifacts = vec![RelocatedArtifact {
            format: PackageFormat::Deb,
            path: PathBuf::from("demo.deb"),
            size: 4096,
        }];
        print_artifact_summary(&artifacts, Duration::from_secs(90));
        print_artifact_summary(&[], Duration::ZERO);
    }
}
