//! Orchestrator: one build, start to finish, for one platform target.
//!
//! Stages run strictly in order: toolchain, mirror, manifest, pipeline,
//! collect. Everything that can be validated without side effects is checked
//! in [`Orchestrator::plan`] before any of them run.

use crate::artifact::{ArtifactCollector, ArtifactDescriptor, BuildSnapshot, RelocatedArtifact};
use crate::error::{Error, Result, Stage};
use crate::format::PackageFormat;
use crate::invoker::{BuildInvoker, PipelineCommands};
use crate::manifest::{
    check_local_layout, stage_local_assets, AppUrl, ConfigMerger, PlatformManifest,
};
use crate::mirror::{MirrorSelector, MirrorSettings, NetworkProbe, NetworkRegion, ProbeError, SourcePolicy, TcpLatencyProbe};
use crate::options::BuildOptions;
use crate::platform::PlatformTarget;
use crate::toolchain::{Prompter, Ready, SystemToolchain, Toolchain, ToolchainGate};
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use tracing::Instrument;

/// Overrides for the pipeline commands. `None` keeps the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOverrides {
    pub fetch: Option<String>,
    pub build: Option<String>,
}

/// Host-side settings that are not part of the app's options.
#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    /// The app project the toolchain builds.
    pub app_dir: PathBuf,
    /// Where relocated installers end up.
    pub work_dir: PathBuf,
    /// Manifest template replacing the built-in one.
    pub template: Option<PathBuf>,
    pub mirror: MirrorSettings,
    pub pipeline: PipelineOverrides,
    /// Binaries that must be on `PATH` for the toolchain to count as installed.
    pub toolchain_binaries: Vec<String>,
}

impl OrchestratorSettings {
    pub fn new(app_dir: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            app_dir: app_dir.into(),
            work_dir: work_dir.into(),
            template: None,
            mirror: MirrorSettings::default(),
            pipeline: PipelineOverrides::default(),
            toolchain_binaries: vec!["rustc".to_string(), "cargo".to_string()],
        }
    }
}

/// Everything decided before the first side effect.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub url: AppUrl,
    pub manifest: PlatformManifest,
    pub snapshot: BuildSnapshot,
    pub commands: PipelineCommands,
}

/// Outcome of a successful build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub manifest_path: PathBuf,
    pub source: SourcePolicy,
    pub artifacts: Vec<RelocatedArtifact>,
}

/// Prompter used when the caller did not supply one.
struct DeclineAll;

impl Prompter for DeclineAll {
    fn confirm(&self, _message: &str) -> io::Result<bool> {
        Ok(false)
    }
}

/// Drives one build for a single [`PlatformTarget`].
pub struct Orchestrator {
    target: Box<dyn PlatformTarget>,
    settings: OrchestratorSettings,
    toolchain: Box<dyn Toolchain>,
    prompter: Box<dyn Prompter>,
    probe: Box<dyn NetworkProbe>,
}

impl Orchestrator {
    pub fn new(target: Box<dyn PlatformTarget>, settings: OrchestratorSettings) -> Self {
        let toolchain = SystemToolchain::new(
            settings.toolchain_binaries.clone(),
            target.toolchain_install_command(),
        );
        Self {
            target,
            settings,
            toolchain: Box::new(toolchain),
            prompter: Box::new(DeclineAll),
            probe: Box::new(TcpLatencyProbe::default()),
        }
    }

    pub fn with_toolchain(mut self, toolchain: impl Toolchain + 'static) -> Self {
        self.toolchain = Box::new(toolchain);
        self
    }

    pub fn with_prompter(mut self, prompter: impl Prompter + 'static) -> Self {
        self.prompter = Box::new(prompter);
        self
    }

    pub fn with_probe(mut self, probe: impl NetworkProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    pub fn target(&self) -> &dyn PlatformTarget {
        self.target.as_ref()
    }

    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    pub fn toolchain_installed(&self) -> bool {
        self.toolchain.is_installed()
    }

    pub fn toolchain_description(&self) -> String {
        self.toolchain.describe()
    }

    /// Make sure the toolchain is installed, asking to install it if not.
    pub async fn prepare(&self) -> Result<Ready> {
        ToolchainGate::new(self.toolchain.as_ref(), self.prompter.as_ref())
            .ensure_ready()
            .instrument(tracing::info_span!("stage", stage = %Stage::Toolchain))
            .await
    }

    /// Validate the options and compute the manifest and the collection plan.
    ///
    /// Touches nothing on disk except reading a custom template and, for a
    /// local app, resolving where its files will be copied.
    pub fn plan(&self, url: &str, options: &BuildOptions) -> Result<BuildPlan> {
        let _span = tracing::info_span!("stage", stage = %Stage::Manifest).entered();

        self.target.validate_options(options)?;
        let formats = options.targets.resolve(self.target.formats())?;
        let template = self.load_template()?;
        let url = AppUrl::classify(url);
        if let AppUrl::Local(entry) = &url {
            check_local_layout(entry, &self.settings.app_dir)?;
        }

        let manifest = ConfigMerger::new(self.target.as_ref()).merge(&url, options, &formats, &template)?;
        let snapshot = BuildSnapshot::from_manifest(
            &manifest,
            self.target.architecture(options),
            formats,
            self.target.bundle_root(&self.settings.app_dir, options),
        )?;

        let defaults = PipelineCommands::default();
        let commands = PipelineCommands::new(
            self.settings.pipeline.fetch.clone().unwrap_or(defaults.fetch),
            self.settings
                .pipeline
                .build
                .clone()
                .unwrap_or_else(|| self.target.build_command(options)),
        );

        for descriptor in self.artifact_plan(&snapshot) {
            tracing::debug!(
                format = %descriptor.format,
                staged = %descriptor.staged_path.display(),
                output = %descriptor.final_path.display(),
                "planned artifact"
            );
        }

        Ok(BuildPlan {
            url,
            manifest,
            snapshot,
            commands,
        })
    }

    /// Staged and final path of every format in a snapshot.
    pub fn artifact_plan(&self, snapshot: &BuildSnapshot) -> Vec<ArtifactDescriptor> {
        ArtifactCollector::new(&self.settings.work_dir).plan(snapshot)
    }

    /// Classify the network without changing the app project.
    pub async fn probe_region(&self) -> std::result::Result<NetworkRegion, ProbeError> {
        MirrorSelector::new(self.probe.as_ref(), &self.settings.mirror)
            .classify()
            .await
    }

    /// Run every stage after planning: mirror, manifest write, pipeline, collect.
    ///
    /// The toolchain gate is not part of this; see [`Orchestrator::run`].
    pub async fn execute(&self, plan: &BuildPlan) -> Result<BuildReport> {
        let app_dir = self.settings.app_dir.as_path();

        let source = MirrorSelector::new(self.probe.as_ref(), &self.settings.mirror)
            .select_source(app_dir)
            .instrument(tracing::info_span!("stage", stage = %Stage::Mirror))
            .await;
        tracing::debug!(?source, "selected dependency source");

        let manifest_path = {
            let _span = tracing::info_span!("stage", stage = %Stage::Manifest).entered();
            if let AppUrl::Local(entry) = &plan.url {
                stage_local_assets(entry, app_dir)?;
            }
            plan.manifest.write_to(app_dir)?
        };

        BuildInvoker::new(plan.commands.clone())
            .invoke(&source, app_dir)
            .instrument(tracing::info_span!("stage", stage = %Stage::Pipeline))
            .await?;

        let artifacts = {
            let _span = tracing::info_span!("stage", stage = %Stage::Collect).entered();
            ArtifactCollector::new(&self.settings.work_dir).collect(&plan.snapshot)?
        };

        Ok(BuildReport {
            manifest_path,
            source,
            artifacts,
        })
    }

    /// Plan, pass the toolchain gate, then execute.
    pub async fn run(&self, url: &str, options: &BuildOptions) -> Result<BuildReport> {
        let plan = self.plan(url, options)?;
        self.prepare().await?;
        self.execute(&plan).await
    }

    /// Formats this orchestrator's target would build for `options`.
    pub fn formats_for(&self, options: &BuildOptions) -> Result<Vec<PackageFormat>> {
        options.targets.resolve(self.target.formats())
    }

    fn load_template(&self) -> Result<Value> {
        match &self.settings.template {
            Some(path) => read_template(path),
            None => self.target.template(),
        }
    }
}

fn read_template(path: &Path) -> Result<Value> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::Template(format!("failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&contents)
        .map_err(|e| Error::Template(format!("failed to parse {}: {}", path.display(), e)))
}
