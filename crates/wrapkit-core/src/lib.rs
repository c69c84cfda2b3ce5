//! # wrapkit-core
//!
//! Build orchestration for wrapping a web page into a native desktop installer.
//!
//! This crate drives an external packaging toolchain and post-processes its
//! output. It does not compile anything itself: it prepares a manifest, runs the
//! app project's pipeline as one blocking process, and relocates the installers
//! the toolchain leaves in its bundle tree.
//!
//! ## Pipeline
//!
//! 1. [`ToolchainGate`] makes sure the native toolchain exists (or installs it).
//! 2. [`MirrorSelector`] probes the network and picks a registry source.
//! 3. [`ConfigMerger`] overlays [`BuildOptions`] onto the platform template and
//!    writes the [`PlatformManifest`].
//! 4. [`BuildInvoker`] runs dependency fetch + compile + package.
//! 5. [`ArtifactCollector`] copies each staged installer next to the working
//!    directory and removes the staged original.
//!
//! [`Orchestrator`] ties the steps together for one [`PlatformTarget`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use wrapkit_core::{BuildOptions, Orchestrator, OrchestratorSettings, PlatformTarget};
//!
//! # async fn run(target: Box<dyn PlatformTarget>) -> wrapkit_core::Result<()> {
//! let settings = OrchestratorSettings::new("./app", ".");
//! let orchestrator = Orchestrator::new(target, settings);
//!
//! let options = BuildOptions::new("weread");
//! let report = orchestrator.run("https://weread.qq.com", &options).await?;
//! for artifact in &report.artifacts {
//!     println!("{} -> {}", artifact.format, artifact.path.display());
//! }
//! # Ok(()) }
//! ```
//!
//! ## Host state
//!
//! The mirror swap rewrites `src-tauri/.cargo/config` inside the app project.
//! That file is shared by every run on the host, so concurrent builds against
//! the same app project must be serialized by the caller.

pub mod arch;
pub mod artifact;
pub mod error;
pub mod format;
pub mod invoker;
pub mod manifest;
pub mod mirror;
pub mod options;
pub mod orchestrator;
pub mod platform;
pub mod toolchain;

pub use arch::{ArchitectureTag, HostOs};
pub use artifact::{ArtifactCollector, ArtifactDescriptor, BuildSnapshot, RelocatedArtifact};
pub use error::{ArtifactError, CollectionError, Error, Result, Stage, EXIT_MISSING_DEPENDENCY};
pub use format::{PackageFormat, TargetSelection};
pub use invoker::{BuildInvoker, PipelineCommands};
pub use manifest::{AppUrl, ConfigMerger, PlatformManifest};
pub use mirror::{MirrorSelector, MirrorSettings, NetworkProbe, NetworkRegion, ProbeError, SourcePolicy, TcpLatencyProbe};
pub use options::BuildOptions;
pub use orchestrator::{BuildPlan, BuildReport, Orchestrator, OrchestratorSettings, PipelineOverrides};
pub use platform::PlatformTarget;
pub use toolchain::{Prompter, Ready, SystemToolchain, Toolchain, ToolchainGate};
