//! Build command implementation.
//!
//! This module implements the `wrapkit build` command, which wraps a URL into
//! native installers using the wrapkit-core orchestrator.

use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::config::{CliOverrides, WrapConfig};
use crate::error::Result;
use crate::ui;
use std::time::Instant;

/// Execute the build command.
///
/// # Build Process
///
/// 1. Load and validate configuration (CLI > Env > File > Defaults)
/// 2. Detect the host platform and resolve the app project
/// 3. Plan the build: every option is validated before anything is written
/// 4. Make sure the native toolchain is installed (asking first)
/// 5. Pick the registry source, write the manifest, run the pipeline
/// 6. Move the installers into the current directory and print a summary
///
/// # Errors
///
/// Returns errors for invalid configuration, a missing app project, a missing
/// or declined toolchain, a failed pipeline and installers that cannot be
/// collected. Pipeline failures keep the pipeline's exit code.
pub async fn execute(args: BuildArgs) -> Result<()> {
    let start_time = Instant::now();

    let overrides = CliOverrides::from_args(args.url.as_deref(), &args.app, &args.source);
    let mut config = WrapConfig::load(&overrides, args.source.config.as_deref())?;
    config.validate()?;

    let cwd = utils::get_cwd()?;
    utils::resolve_config_paths(&mut config, &cwd);

    let url = config.require_url()?.to_string();
    let options = config.build_options(&url)?;

    utils::ensure_writable(&cwd)?;
    utils::validate_icon(config.icon.as_deref())?;
    utils::validate_app_project(&config.project_dir)?;
    let orchestrator = utils::orchestrator_for(&config, &cwd, args.yes)?;

    let plan = orchestrator.plan(&url, &options)?;
    let formats = plan
        .snapshot
        .formats
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    ui::info(&format!(
        "Packaging {} as '{}' {} for {} ({})",
        url,
        plan.snapshot.name,
        plan.snapshot.version,
        orchestrator.target().name(),
        formats
    ));

    orchestrator.prepare().await?;

    ui::info(&format!("Running build pipeline in {}", config.project_dir.display()));
    let report = orchestrator.execute(&plan).await?;

    if report.source.is_mirrored() {
        ui::info("Dependencies were fetched from the mirror registry");
    }
    tracing::debug!(manifest = %report.manifest_path.display(), "manifest written");

    ui::print_artifact_summary(&report.artifacts, start_time.elapsed());
    ui::success(&format!(
        "Build completed in {}",
        ui::format_duration(start_time.elapsed())
    ));

    Ok(())
}
