//! Check command implementation.
//!
//! Validates configuration and reports what a build would do: the host
//! platform, the app project, the toolchain, the network and where every
//! installer is expected. Nothing is written and the pipeline is not run.

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::config::{CliOverrides, WrapConfig};
use crate::error::Result;
use crate::ui;
use owo_colors::OwoColorize;
use wrapkit_core::{NetworkRegion, Orchestrator, SourcePolicy};

/// Execute the check command.
pub async fn execute(args: CheckArgs) -> Result<()> {
    ui::info("Checking configuration...");
    let overrides = CliOverrides::from_args(args.url.as_deref(), &args.app, &args.source);
    let mut config = WrapConfig::load(&overrides, args.source.config.as_deref())?;
    config.validate()?;
    ui::success("Configuration is valid");

    let cwd = utils::get_cwd()?;
    utils::resolve_config_paths(&mut config, &cwd);
    let orchestrator = utils::orchestrator_for(&config, &cwd, false)?;

    let target = orchestrator.target();
    let supported = target
        .formats()
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    ui::info(&format!("Host platform: {} ({})", target.name(), supported));

    match utils::validate_app_project(&config.project_dir) {
        Ok(()) => ui::success(&format!("App project: {}", config.project_dir.display())),
        Err(e) => ui::warning(&e.to_string()),
    }
    if let Err(e) = utils::validate_icon(config.icon.as_deref()) {
        ui::warning(&e.to_string());
    }

    if orchestrator.toolchain_installed() {
        ui::success(&format!("Toolchain found: {}", orchestrator.toolchain_description()));
    } else {
        ui::warning(&format!(
            "Toolchain missing: {} (wrapkit build will offer to install it)",
            orchestrator.toolchain_description()
        ));
    }

    check_network(&orchestrator, &config).await;

    match config.url.as_deref() {
        Some(url) => preview(&orchestrator, &config, url)?,
        None => ui::info("No URL configured; pass one to preview installer paths"),
    }

    ui::success("All checks passed!");
    Ok(())
}

async fn check_network(orchestrator: &Orchestrator, config: &WrapConfig) {
    if config.mirror.force {
        ui::info(&format!("Mirror forced: {}", config.mirror.registry));
        return;
    }
    if !config.mirror.probe {
        ui::info("Network probe disabled; the default registry will be used");
        return;
    }

    let spinner = ui::Spinner::new(&format!("Probing {}...", config.mirror.probe_host));
    match orchestrator.probe_region().await {
        Ok(NetworkRegion::Default) => spinner.finish("Default registry is reachable"),
        Ok(NetworkRegion::SlowPath) => spinner.warn(&format!(
            "Default registry is slow; the build will use {}",
            config.mirror.registry
        )),
        Err(e) => spinner.fail(&format!("{}; the build will use the default registry", e)),
    }
}

fn preview(orchestrator: &Orchestrator, config: &WrapConfig, url: &str) -> Result<()> {
    let options = config.build_options(url)?;
    let plan = orchestrator.plan(url, &options)?;

    ui::success(&format!(
        "Build plan: '{}' {} ({})",
        plan.snapshot.name, plan.snapshot.version, plan.snapshot.arch
    ));
    ui::info(&format!(
        "Pipeline: {}",
        plan.commands.command_line(&SourcePolicy::Default)
    ));

    for descriptor in orchestrator.artifact_plan(&plan.snapshot) {
        eprintln!(
            "  {} {} {} {}",
            format!("{:>8}", descriptor.format.name()).bold(),
            descriptor.staged_path.display().dimmed(),
            "→".blue(),
            descriptor.final_path.display()
        );
    }
    Ok(())
}
