//! End-to-end runs of the orchestrator with the toolchain, prompt and network
//! replaced by fakes and the packaging pipeline replaced by shell commands.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use wrapkit_core::{
    ArchitectureTag, ArtifactError, BuildOptions, Error, HostOs, NetworkProbe, NetworkRegion,
    Orchestrator, OrchestratorSettings, PackageFormat, PipelineOverrides, PlatformTarget,
    ProbeError, Prompter, SourcePolicy, TargetSelection, Toolchain,
};

struct TestPlatform;

impl PlatformTarget for TestPlatform {
    fn os(&self) -> HostOs {
        HostOs::Linux
    }

    fn name(&self) -> &'static str {
        "Test"
    }

    fn formats(&self) -> &'static [PackageFormat] {
        &[PackageFormat::Deb, PackageFormat::AppImage]
    }

    fn template(&self) -> wrapkit_core::Result<Value> {
        Ok(json!({
            "package": { "productName": "template", "version": "1.0.0" },
            "build": { "distDir": "../dist" },
            "tauri": {
                "windows": [{ "url": "https://example.com", "width": 1200, "height": 780 }],
                "bundle": { "identifier": "com.wrapkit.test", "targets": [] }
            }
        }))
    }

    fn validate_name(&self, _name: &str) -> wrapkit_core::Result<()> {
        Ok(())
    }

    fn architecture(&self, _options: &BuildOptions) -> ArchitectureTag {
        ArchitectureTag::new("amd64")
    }

    fn toolchain_install_command(&self) -> &'static str {
        "true"
    }
}

struct FakeToolchain {
    installed: bool,
}

#[async_trait]
impl Toolchain for FakeToolchain {
    fn is_installed(&self) -> bool {
        self.installed
    }

    fn describe(&self) -> String {
        "rustc".to_string()
    }

    async fn install(&self) -> Result<(), String> {
        Err("not in tests".to_string())
    }
}

#[derive(Clone, Default)]
struct CountingDecline {
    asked: Arc<AtomicUsize>,
}

impl Prompter for CountingDecline {
    fn confirm(&self, _message: &str) -> io::Result<bool> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        Ok(false)
    }
}

struct TimeoutProbe;

#[async_trait]
impl NetworkProbe for TimeoutProbe {
    async fn classify(&self, host: &str) -> Result<NetworkRegion, ProbeError> {
        Err(ProbeError::Timeout {
            host: host.to_string(),
            timeout: std::time::Duration::from_millis(1),
        })
    }
}

struct Workspace {
    app: TempDir,
    work: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            app: TempDir::new().unwrap(),
            work: TempDir::new().unwrap(),
        }
    }

    fn orchestrator(&self, build: &str, installed: bool) -> Orchestrator {
        let mut settings = OrchestratorSettings::new(self.app.path(), self.work.path());
        settings.pipeline = PipelineOverrides {
            fetch: Some("true".to_string()),
            build: Some(build.to_string()),
        };
        Orchestrator::new(Box::new(TestPlatform), settings)
            .with_toolchain(FakeToolchain { installed })
            .with_prompter(CountingDecline::default())
            .with_probe(TimeoutProbe)
    }

    fn manifest_path(&self) -> std::path::PathBuf {
        self.app.path().join("src-tauri").join("tauri.conf.json")
    }
}

fn stage_command(files: &[&str]) -> String {
    let bundle = "src-tauri/target/release/bundle";
    files
        .iter()
        .map(|file| {
            let dir = Path::new(file).parent().unwrap().display().to_string();
            format!("mkdir -p {bundle}/{dir} && echo pkg > {bundle}/{file}")
        })
        .collect::<Vec<_>>()
        .join(" && ")
}

#[cfg(unix)]
#[tokio::test]
async fn test_all_formats_are_relocated() {
    let ws = Workspace::new();
    let build = stage_command(&["deb/demo_1.0.0_amd64.deb", "appimage/demo_1.0.0_amd64.AppImage"]);
    let orchestrator = ws.orchestrator(&build, true);

    let report = orchestrator
        .run("https://example.com", &BuildOptions::new("demo"))
        .await
        .unwrap();

    assert_eq!(report.source, SourcePolicy::Default);
    assert_eq!(report.artifacts.len(), 2);
    assert!(ws.work.path().join("demo.deb").is_file());
    assert!(ws.work.path().join("demo.AppImage").is_file());
    let bundle = ws.app.path().join("src-tauri/target/release/bundle");
    assert!(!bundle.join("deb/demo_1.0.0_amd64.deb").exists());
    assert!(!bundle.join("appimage/demo_1.0.0_amd64.AppImage").exists());

    let manifest: Value = serde_json::from_str(&fs::read_to_string(ws.manifest_path()).unwrap()).unwrap();
    assert_eq!(manifest["package"]["productName"], "demo");
    assert_eq!(manifest["tauri"]["bundle"]["targets"], json!(["deb", "appimage"]));
}

#[cfg(unix)]
#[tokio::test]
async fn test_missing_staged_file_is_not_found() {
    let ws = Workspace::new();
    let orchestrator = ws.orchestrator("true", true);
    let options = BuildOptions::new("demo").with_targets(TargetSelection::Single(PackageFormat::Deb));

    let err = orchestrator.run("https://example.com", &options).await.unwrap_err();

    match err {
        Error::Collection(collection) => {
            assert!(collection.relocated.is_empty());
            match &collection.failures[..] {
                [ArtifactError::NotFound { format, expected_path }] => {
                    assert_eq!(*format, PackageFormat::Deb);
                    assert!(expected_path.ends_with("bundle/deb/demo_1.0.0_amd64.deb"));
                }
                other => panic!("unexpected failures: {other:?}"),
            }
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!ws.work.path().join("demo.deb").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_failed_pipeline_skips_collection() {
    let ws = Workspace::new();
    let build = format!("{} && exit 3", stage_command(&["deb/demo_1.0.0_amd64.deb"]));
    let orchestrator = ws.orchestrator(&build, true);

    let err = orchestrator
        .run("https://example.com", &BuildOptions::new("demo"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::BuildProcessFailed { code: Some(3), .. }));
    assert_eq!(err.exit_code(), 3);
    assert!(!ws.work.path().join("demo.deb").exists());
}

#[tokio::test]
async fn test_declined_toolchain_writes_nothing() {
    let ws = Workspace::new();
    let prompter = CountingDecline::default();
    let mut settings = OrchestratorSettings::new(ws.app.path(), ws.work.path());
    settings.pipeline.build = Some("touch ran".to_string());
    let orchestrator = Orchestrator::new(Box::new(TestPlatform), settings)
        .with_toolchain(FakeToolchain { installed: false })
        .with_prompter(prompter.clone())
        .with_probe(TimeoutProbe);

    let err = orchestrator
        .run("https://example.com", &BuildOptions::new("demo"))
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 2);
    assert_eq!(prompter.asked.load(Ordering::SeqCst), 1);
    assert!(!ws.manifest_path().exists());
    assert!(!ws.app.path().join("ran").exists());
}

#[tokio::test]
async fn test_invalid_options_fail_before_toolchain() {
    let ws = Workspace::new();
    let orchestrator = ws.orchestrator("true", false);

    let err = orchestrator
        .run("https://example.com", &BuildOptions::new("de/mo"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ManifestValidation { .. }));

    let dmg = BuildOptions::new("demo").with_targets(TargetSelection::Single(PackageFormat::Dmg));
    let err = orchestrator.run("https://example.com", &dmg).await.unwrap_err();
    assert!(matches!(err, Error::ManifestValidation { ref field, .. } if field == "targets"));

    let mut universal = BuildOptions::new("demo");
    universal.multi_arch = true;
    assert!(orchestrator.plan("https://example.com", &universal).is_err());

    assert!(!ws.manifest_path().exists());
}

#[test]
fn test_plan_computes_paths_without_side_effects() {
    let ws = Workspace::new();
    let orchestrator = ws.orchestrator("true", true);
    let mut options = BuildOptions::new("demo");
    options.app_version = Some("2.0.1".to_string());

    let plan = orchestrator.plan("example.com", &options).unwrap();
    let descriptors = orchestrator.artifact_plan(&plan.snapshot);

    assert_eq!(plan.snapshot.version, "2.0.1");
    assert_eq!(plan.commands.build, "true");
    assert_eq!(descriptors.len(), 2);
    assert_eq!(
        descriptors[1].staged_path,
        ws.app
            .path()
            .join("src-tauri/target/release/bundle/appimage/demo_2.0.1_amd64.AppImage")
    );
    assert_eq!(descriptors[1].final_path, ws.work.path().join("demo.AppImage"));
    assert_eq!(
        plan.manifest.as_value()["tauri"]["windows"][0]["url"],
        "https://example.com"
    );
    assert!(!ws.manifest_path().exists());
}

#[test]
fn test_custom_template_replaces_builtin() {
    let ws = Workspace::new();
    let template = ws.work.path().join("custom.json");
    fs::write(
        &template,
        r#"{ "package": { "version": "9.9.9" }, "tauri": { "bundle": { "identifier": "com.custom" } } }"#,
    )
    .unwrap();

    let mut settings = OrchestratorSettings::new(ws.app.path(), ws.work.path());
    settings.template = Some(template);
    let orchestrator = Orchestrator::new(Box::new(TestPlatform), settings);

    let plan = orchestrator.plan("https://example.com", &BuildOptions::new("demo")).unwrap();
    assert_eq!(plan.snapshot.version, "9.9.9");
    assert_eq!(plan.manifest.as_value()["tauri"]["bundle"]["identifier"], "com.custom");
    assert!(plan.manifest.as_value().pointer("/build/distDir").is_none());
}

#[tokio::test]
async fn test_disabled_probe_reports_default_region() {
    let ws = Workspace::new();
    let mut settings = OrchestratorSettings::new(ws.app.path(), ws.work.path());
    settings.mirror.probe = false;
    let orchestrator = Orchestrator::new(Box::new(TestPlatform), settings).with_probe(TimeoutProbe);

    assert_eq!(orchestrator.probe_region().await.unwrap(), NetworkRegion::Default);
}

fn files_under(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(dir)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(dir).unwrap().to_string_lossy().into_owned())
        .collect();
    files.sort();
    files
}

fn read_manifest(ws: &Workspace) -> Value {
    serde_json::from_str(&fs::read_to_string(ws.manifest_path()).unwrap()).unwrap()
}

#[cfg(unix)]
#[tokio::test]
async fn test_local_app_ships_its_directory() {
    let ws = Workspace::new();
    let site = TempDir::new().unwrap();
    let index = site.path().join("index.html");
    fs::write(&index, "<html>reader</html>").unwrap();
    fs::write(site.path().join("style.css"), "body { margin: 0 }").unwrap();

    let build = stage_command(&["deb/demo_1.0.0_amd64.deb", "appimage/demo_1.0.0_amd64.AppImage"]);
    let report = ws
        .orchestrator(&build, true)
        .run(index.to_str().unwrap(), &BuildOptions::new("demo"))
        .await
        .unwrap();

    assert_eq!(report.artifacts.len(), 2);
    assert_eq!(files_under(&ws.app.path().join("dist")), vec!["index.html", "style.css"]);
    assert_eq!(fs::read_to_string(&index).unwrap(), "<html>reader</html>");
    assert_eq!(files_under(site.path()), vec!["index.html", "style.css"]);

    let manifest = read_manifest(&ws);
    assert_eq!(manifest["tauri"]["windows"][0]["url"], "index.html");
    assert_eq!(manifest["tauri"]["windows"][0]["url_type"], "local");
}

#[cfg(unix)]
#[tokio::test]
async fn test_local_app_at_project_root_copies_only_the_site() {
    let ws = Workspace::new();
    let index = ws.app.path().join("index.html");
    fs::write(&index, "<html>reader</html>").unwrap();
    fs::write(ws.app.path().join("app.js"), "start()").unwrap();
    fs::create_dir_all(ws.app.path().join("node_modules/left-pad")).unwrap();
    fs::write(ws.app.path().join("node_modules/left-pad/index.js"), "").unwrap();

    let build = stage_command(&["deb/demo_1.0.0_amd64.deb"]);
    let options = BuildOptions::new("demo").with_targets(TargetSelection::Single(PackageFormat::Deb));
    let orchestrator = ws.orchestrator(&build, true);

    orchestrator.run(index.to_str().unwrap(), &options).await.unwrap();
    assert_eq!(files_under(&ws.app.path().join("dist")), vec!["app.js", "index.html"]);

    // rebuilding sees the previous dist/ and src-tauri/ output
    orchestrator.run(index.to_str().unwrap(), &options).await.unwrap();
    assert_eq!(files_under(&ws.app.path().join("dist")), vec!["app.js", "index.html"]);
    assert_eq!(fs::read_to_string(&index).unwrap(), "<html>reader</html>");
}

#[cfg(unix)]
#[tokio::test]
async fn test_local_app_already_in_dist_is_kept() {
    let ws = Workspace::new();
    let dist = ws.app.path().join("dist");
    fs::create_dir_all(&dist).unwrap();
    let index = dist.join("index.html");
    fs::write(&index, "<html>reader</html>").unwrap();

    let build = stage_command(&["deb/demo_1.0.0_amd64.deb"]);
    let options = BuildOptions::new("demo").with_targets(TargetSelection::Single(PackageFormat::Deb));
    ws.orchestrator(&build, true)
        .run(index.to_str().unwrap(), &options)
        .await
        .unwrap();

    assert_eq!(fs::read_to_string(&index).unwrap(), "<html>reader</html>");
    assert_eq!(files_under(&dist), vec!["index.html"]);
    assert_eq!(read_manifest(&ws)["tauri"]["windows"][0]["url_type"], "local");
}

#[test]
fn test_local_entry_below_dist_is_rejected_when_planning() {
    let ws = Workspace::new();
    let nested = ws.app.path().join("dist/site");
    fs::create_dir_all(&nested).unwrap();
    let index = nested.join("index.html");
    fs::write(&index, "<html>reader</html>").unwrap();

    let err = ws
        .orchestrator("true", true)
        .plan(index.to_str().unwrap(), &BuildOptions::new("demo"))
        .unwrap_err();

    assert!(matches!(err, Error::ManifestValidation { ref field, .. } if field == "url"));
    assert_eq!(fs::read_to_string(&index).unwrap(), "<html>reader</html>");
    assert!(!ws.manifest_path().exists());
}
