//! Integration tests for the wrapkit binary's build command.
//!
//! The packaging pipeline is replaced by shell commands that leave staged
//! installers where the packager would, so no real toolchain is needed.

#![cfg(target_os = "linux")]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wrapkit_core::{ArchitectureTag, HostOs};

const BUNDLE: &str = "src-tauri/target/release/bundle";

struct Project {
    work: TempDir,
}

impl Project {
    /// Working directory with an app project under `app/`.
    fn new() -> Self {
        let work = TempDir::new().unwrap();
        let app = work.path().join("app");
        fs::create_dir_all(&app).unwrap();
        fs::write(app.join("package.json"), r#"{ "name": "app" }"#).unwrap();
        Self { work }
    }

    fn path(&self) -> &Path {
        self.work.path()
    }

    fn manifest_path(&self) -> PathBuf {
        self.path().join("app/src-tauri/tauri.conf.json")
    }

    fn write_config(&self, binaries: &[&str], build_command: &str) {
        let config = json!({
            "projectDir": "app",
            "toolchain": { "binaries": binaries },
            "mirror": { "probe": false },
            "pipeline": { "fetchCommand": "true", "buildCommand": build_command }
        });
        fs::write(
            self.path().join("wrapkit.config.json"),
            serde_json::to_string_pretty(&config).unwrap(),
        )
        .unwrap();
    }

    fn build(&self, extra: &[&str]) -> assert_cmd::assert::Assert {
        self.build_url("https://example.com", extra)
    }

    fn build_url(&self, url: &str, extra: &[&str]) -> assert_cmd::assert::Assert {
        Command::cargo_bin("wrapkit")
            .unwrap()
            .current_dir(self.path())
            .env("NO_COLOR", "1")
            .args(["build", url, "--name", "demo", "--app-version", "1.0.0"])
            .args(extra)
            .assert()
    }

    fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    fn dist_files(&self) -> Vec<String> {
        let dist = self.path().join("app/dist");
        let mut files: Vec<String> = walkdir::WalkDir::new(&dist)
            .into_iter()
            .map(|e| e.unwrap())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().strip_prefix(&dist).unwrap().to_string_lossy().into_owned())
            .collect();
        files.sort();
        files
    }
}

fn arch() -> String {
    ArchitectureTag::host(HostOs::Linux).to_string()
}

/// Shell command that stages one file per relative path under the bundle root.
fn stage(files: &[String]) -> String {
    files
        .iter()
        .map(|file| {
            let dir = Path::new(file).parent().unwrap().display().to_string();
            format!("mkdir -p {BUNDLE}/{dir} && echo pkg > {BUNDLE}/{file}")
        })
        .collect::<Vec<_>>()
        .join(" && ")
}

fn deb() -> String {
    format!("deb/demo_1.0.0_{}.deb", arch())
}

fn appimage() -> String {
    format!("appimage/demo_1.0.0_{}.AppImage", arch())
}

#[test]
fn test_build_relocates_every_format() {
    let project = Project::new();
    project.write_config(&["sh"], &stage(&[deb(), appimage()]));

    project.build(&[]).success();

    assert!(project.path().join("demo.deb").is_file());
    assert!(project.path().join("demo.AppImage").is_file());
    let bundle = project.path().join("app").join(BUNDLE);
    assert!(!bundle.join(deb()).exists());
    assert!(!bundle.join(appimage()).exists());

    let manifest: Value =
        serde_json::from_str(&fs::read_to_string(project.manifest_path()).unwrap()).unwrap();
    assert_eq!(manifest["package"]["productName"], "demo");
    assert_eq!(manifest["tauri"]["windows"][0]["url"], "https://example.com");
}

#[test]
fn test_single_target_only_collects_that_format() {
    let project = Project::new();
    project.write_config(&["sh"], &stage(&[appimage()]));

    project.build(&["--targets", "appimage"]).success();

    assert!(project.path().join("demo.AppImage").is_file());
    assert!(!project.path().join("demo.deb").exists());
}

#[test]
fn test_pipeline_exit_code_is_propagated() {
    let project = Project::new();
    project.write_config(&["sh"], &format!("{} && exit 7", stage(&[deb()])));

    project.build(&[]).code(7);

    assert!(!project.path().join("demo.deb").exists());
}

#[test]
fn test_invalid_name_writes_no_manifest() {
    let project = Project::new();
    project.write_config(&["sh"], "true");

    Command::cargo_bin("wrapkit")
        .unwrap()
        .current_dir(project.path())
        .env("NO_COLOR", "1")
        .args(["build", "https://example.com", "--name", "WeRead"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("lowercase"));

    assert!(!project.manifest_path().exists());
}

#[test]
fn test_declined_toolchain_exits_with_missing_dependency() {
    let project = Project::new();
    project.write_config(&["wrapkit-missing-bin"], "touch ran");

    project
        .build(&[])
        .code(2)
        .stderr(predicate::str::contains("wrapkit-missing-bin"));

    assert!(!project.manifest_path().exists());
    assert!(!project.path().join("app/ran").exists());
}

#[test]
fn test_missing_staged_file_names_expected_path() {
    let project = Project::new();
    project.write_config(&["sh"], &stage(&[appimage()]));

    project
        .build(&[])
        .code(1)
        .stderr(predicate::str::contains(deb()))
        .stderr(predicate::str::contains("not found"));

    assert!(project.path().join("demo.AppImage").is_file());
    assert!(!project.path().join("demo.deb").exists());
}

#[test]
fn test_missing_app_project() {
    let project = Project::new();
    project.write_config(&["sh"], "true");

    project
        .build(&["--project-dir", "nowhere"])
        .code(1)
        .stderr(predicate::str::contains("App project not found"));
}

#[test]
fn test_missing_url() {
    let project = Project::new();
    project.write_config(&["sh"], "true");

    Command::cargo_bin("wrapkit")
        .unwrap()
        .current_dir(project.path())
        .env("NO_COLOR", "1")
        .arg("build")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("url"));
}

#[test]
fn test_local_html_is_packaged_with_its_assets() {
    let project = Project::new();
    project.write_config(&["sh"], &stage(&[deb()]));
    let index = project.write("site/index.html", "<html>reader</html>");
    project.write("site/logo.svg", "<svg/>");

    project
        .build_url("site/index.html", &["--targets", "deb"])
        .success();

    assert_eq!(project.dist_files(), vec!["index.html", "logo.svg"]);
    assert_eq!(fs::read_to_string(&index).unwrap(), "<html>reader</html>");
    assert!(project.path().join("demo.deb").is_file());

    let manifest: Value =
        serde_json::from_str(&fs::read_to_string(project.manifest_path()).unwrap()).unwrap();
    assert_eq!(manifest["tauri"]["windows"][0]["url"], "index.html");
    assert_eq!(manifest["tauri"]["windows"][0]["url_type"], "local");
}

#[test]
fn test_local_html_in_dist_is_not_truncated() {
    let project = Project::new();
    project.write_config(&["sh"], &stage(&[deb()]));
    let index = project.write("app/dist/index.html", "<html>reader</html>");

    project
        .build_url("app/dist/index.html", &["--targets", "deb"])
        .success();

    assert_eq!(fs::read_to_string(&index).unwrap(), "<html>reader</html>");
    assert_eq!(project.dist_files(), vec!["index.html"]);
}

#[test]
fn test_local_html_at_project_root_does_not_copy_dist_into_itself() {
    let project = Project::new();
    project.write_config(&["sh"], &stage(&[deb()]));
    let index = project.write("app/index.html", "<html>reader</html>");

    project
        .build_url("app/index.html", &["--targets", "deb"])
        .success();
    project
        .build_url("app/index.html", &["--targets", "deb"])
        .success();

    assert_eq!(project.dist_files(), vec!["index.html", "package.json"]);
    assert_eq!(fs::read_to_string(&index).unwrap(), "<html>reader</html>");
}
