//! ArtifactCollector: moves staged installers out of the toolchain's bundle
//! tree and next to the working directory.
//!
//! Staged names follow `{name}_{version}_{arch}{suffix}.{ext}`; relocated names
//! drop everything but the app name: `{name}.{ext}`. An existing file at the
//! destination is overwritten.

use crate::arch::ArchitectureTag;
use crate::error::{ArtifactError, CollectionError, Error, RelocationOp, Result};
use crate::format::PackageFormat;
use crate::manifest::PlatformManifest;
use std::fs;
use std::path::{Path, PathBuf};

/// Name the toolchain gives a staged installer.
pub fn staged_file_name(
    name: &str,
    version: &str,
    arch: &ArchitectureTag,
    format: PackageFormat,
) -> String {
    let spec = format.spec();
    format!(
        "{}_{}_{}{}.{}",
        name, version, arch, spec.staged_suffix, spec.extension
    )
}

/// Where the toolchain is expected to leave `format`.
pub fn expected_staged_path(
    bundle_root: &Path,
    name: &str,
    version: &str,
    arch: &ArchitectureTag,
    format: PackageFormat,
) -> PathBuf {
    bundle_root
        .join(format.spec().staged_subdir)
        .join(staged_file_name(name, version, arch, format))
}

/// Where a relocated installer ends up.
pub fn final_output_path(work_dir: &Path, name: &str, format: PackageFormat) -> PathBuf {
    work_dir.join(format!("{}.{}", name, format.extension()))
}

/// Values the collector needs, captured from the manifest before the pipeline
/// runs so later changes to the manifest file cannot affect collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSnapshot {
    pub name: String,
    pub version: String,
    pub arch: ArchitectureTag,
    pub formats: Vec<PackageFormat>,
    pub bundle_root: PathBuf,
}

impl BuildSnapshot {
    /// Capture name and version from a merged manifest.
    pub fn from_manifest(
        manifest: &PlatformManifest,
        arch: ArchitectureTag,
        formats: Vec<PackageFormat>,
        bundle_root: PathBuf,
    ) -> Result<Self> {
        let name = manifest
            .product_name()
            .ok_or_else(|| Error::invalid("package.productName", "", "manifest has no product name"))?;
        let version = manifest
            .version()
            .ok_or_else(|| Error::invalid("package.version", "", "manifest has no version"))?;

        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
            arch,
            formats,
            bundle_root,
        })
    }
}

/// One format's move from the bundle tree to the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    pub format: PackageFormat,
    pub staged_path: PathBuf,
    pub final_path: PathBuf,
}

impl ArtifactDescriptor {
    /// Copy to the final path, then remove the staged original.
    ///
    /// The copy goes to a hidden sibling first and is renamed over the final
    /// path only once complete, so a failed copy leaves both the staged file
    /// and any installer from an earlier build untouched.
    pub fn relocate(self) -> Result<RelocatedArtifact, ArtifactError> {
        if !self.staged_path.is_file() {
            return Err(ArtifactError::NotFound {
                format: self.format,
                expected_path: self.staged_path,
            });
        }

        let partial = self.partial_path();
        let size = match fs::copy(&self.staged_path, &partial) {
            Ok(size) => size,
            Err(source) => {
                discard_partial(&partial);
                return Err(ArtifactError::RelocationIo {
                    format: self.format,
                    op: RelocationOp::Copy,
                    path: self.final_path,
                    source,
                });
            }
        };

        if let Err(source) = fs::rename(&partial, &self.final_path) {
            discard_partial(&partial);
            return Err(ArtifactError::RelocationIo {
                format: self.format,
                op: RelocationOp::Replace,
                path: self.final_path,
                source,
            });
        }

        fs::remove_file(&self.staged_path).map_err(|source| ArtifactError::RelocationIo {
            format: self.format,
            op: RelocationOp::RemoveStaged,
            path: self.staged_path.clone(),
            source,
        })?;

        Ok(RelocatedArtifact {
            format: self.format,
            path: self.final_path,
            size,
        })
    }

    fn partial_path(&self) -> PathBuf {
        let name = self
            .final_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.final_path.with_file_name(format!(".{}.part", name))
    }
}

fn discard_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        tracing::debug!(path = %path.display(), error = %e, "no partial copy to clean up");
    }
}

/// An installer at its final location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocatedArtifact {
    pub format: PackageFormat,
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
}

/// Relocates every requested format of one build.
#[derive(Debug, Clone)]
pub struct ArtifactCollector {
    work_dir: PathBuf,
}

impl ArtifactCollector {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    /// Descriptors for every requested format, in request order.
    pub fn plan(&self, snapshot: &BuildSnapshot) -> Vec<ArtifactDescriptor> {
        snapshot
            .formats
            .iter()
            .map(|&format| ArtifactDescriptor {
                format,
                staged_path: expected_staged_path(
                    &snapshot.bundle_root,
                    &snapshot.name,
                    &snapshot.version,
                    &snapshot.arch,
                    format,
                ),
                final_path: final_output_path(&self.work_dir, &snapshot.name, format),
            })
            .collect()
    }

    /// Relocate every format.
    ///
    /// Each format is attempted even when an earlier one fails; the error
    /// carries both the relocated and the failed formats.
    pub fn collect(
        &self,
        snapshot: &BuildSnapshot,
    ) -> Result<Vec<RelocatedArtifact>, CollectionError> {
        let mut relocated = Vec::new();
        let mut failures = Vec::new();

        for descriptor in self.plan(snapshot) {
            let format = descriptor.format;
            match descriptor.relocate() {
                Ok(artifact) => {
                    tracing::info!(%format, path = %artifact.path.display(), "collected artifact");
                    relocated.push(artifact);
                }
                Err(err) => {
                    tracing::warn!(%format, error = %err, "failed to collect artifact");
                    failures.push(err);
                }
            }
        }

        if failures.is_empty() {
            Ok(relocated)
        } else {
            Err(CollectionError {
                relocated,
                failures,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn snapshot(bundle_root: &Path, formats: Vec<PackageFormat>) -> BuildSnapshot {
        BuildSnapshot {
            name: "demo".to_string(),
            version: "1.0.0".to_string(),
            arch: ArchitectureTag::new("amd64"),
            formats,
            bundle_root: bundle_root.to_path_buf(),
        }
    }

    fn stage(snapshot: &BuildSnapshot, format: PackageFormat, contents: &str) -> PathBuf {
        let path = expected_staged_path(
            &snapshot.bundle_root,
            &snapshot.name,
            &snapshot.version,
            &snapshot.arch,
            format,
        );
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_staged_names() {
        let amd64 = ArchitectureTag::new("amd64");
        assert_eq!(
            staged_file_name("demo", "1.0.0", &amd64, PackageFormat::Deb),
            "demo_1.0.0_amd64.deb"
        );
        assert_eq!(
            staged_file_name("demo", "1.0.0", &amd64, PackageFormat::AppImage),
            "demo_1.0.0_amd64.AppImage"
        );
        assert_eq!(
            staged_file_name("Demo", "2.0.0", &ArchitectureTag::new("x64"), PackageFormat::Msi),
            "Demo_2.0.0_x64_en-US.msi"
        );
        assert_eq!(
            expected_staged_path(Path::new("bundle"), "demo", "1.0.0", &amd64, PackageFormat::AppImage),
            Path::new("bundle").join("appimage").join("demo_1.0.0_amd64.AppImage")
        );
        assert_eq!(
            final_output_path(Path::new("out"), "demo", PackageFormat::AppImage),
            Path::new("out").join("demo.AppImage")
        );
    }

    #[test]
    fn test_collect_relocates_and_removes_staged() {
        let bundle = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let snap = snapshot(bundle.path(), vec![PackageFormat::Deb, PackageFormat::AppImage]);
        let deb = stage(&snap, PackageFormat::Deb, "deb-bytes");
        let appimage = stage(&snap, PackageFormat::AppImage, "appimage");

        let artifacts = ArtifactCollector::new(work.path()).collect(&snap).unwrap();

        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].path, work.path().join("demo.deb"));
        assert_eq!(artifacts[0].size, 9);
        assert_eq!(fs::read_to_string(work.path().join("demo.deb")).unwrap(), "deb-bytes");
        assert!(work.path().join("demo.AppImage").is_file());
        assert!(!deb.exists());
        assert!(!appimage.exists());
    }

    #[test]
    fn test_existing_destination_is_overwritten() {
        let bundle = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let snap = snapshot(bundle.path(), vec![PackageFormat::Deb]);
        stage(&snap, PackageFormat::Deb, "new");
        fs::write(work.path().join("demo.deb"), "old build").unwrap();

        ArtifactCollector::new(work.path()).collect(&snap).unwrap();
        assert_eq!(fs::read_to_string(work.path().join("demo.deb")).unwrap(), "new");
    }

    #[test]
    fn test_missing_format_does_not_stop_the_others() {
        let bundle = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let snap = snapshot(bundle.path(), vec![PackageFormat::Deb, PackageFormat::AppImage]);
        stage(&snap, PackageFormat::AppImage, "appimage");

        let err = ArtifactCollector::new(work.path()).collect(&snap).unwrap_err();

        assert_eq!(err.relocated.len(), 1);
        assert_eq!(err.relocated[0].format, PackageFormat::AppImage);
        assert_eq!(err.failures.len(), 1);
        match &err.failures[0] {
            ArtifactError::NotFound {
                format,
                expected_path,
            } => {
                assert_eq!(*format, PackageFormat::Deb);
                assert!(expected_path.ends_with("deb/demo_1.0.0_amd64.deb"));
            }
            other => panic!("unexpected failure: {other}"),
        }
        assert!(!work.path().join("demo.deb").exists());
    }

    #[test]
    fn test_failed_copy_keeps_staged_file() {
        let bundle = TempDir::new().unwrap();
        let snap = snapshot(bundle.path(), vec![PackageFormat::Deb]);
        let staged = stage(&snap, PackageFormat::Deb, "deb");

        let descriptor = ArtifactDescriptor {
            format: PackageFormat::Deb,
            staged_path: staged.clone(),
            final_path: bundle.path().join("missing-dir").join("demo.deb"),
        };
        let err = descriptor.relocate().unwrap_err();

        assert!(matches!(
            err,
            ArtifactError::RelocationIo {
                op: RelocationOp::Copy,
                ..
            }
        ));
        assert!(staged.is_file());
    }

    #[test]
    fn test_failed_copy_keeps_previous_installer() {
        let bundle = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let snap = snapshot(bundle.path(), vec![PackageFormat::Deb]);
        let staged = stage(&snap, PackageFormat::Deb, "new");
        let previous = work.path().join("demo.deb");
        fs::write(&previous, "old build").unwrap();

        let descriptor = ArtifactDescriptor {
            format: PackageFormat::Deb,
            staged_path: staged.clone(),
            final_path: previous.clone(),
        };
        // a directory where the copy would land makes the copy itself fail
        let partial = descriptor.partial_path();
        fs::create_dir_all(partial.join("busy")).unwrap();

        let err = descriptor.relocate().unwrap_err();

        assert!(matches!(
            err,
            ArtifactError::RelocationIo {
                op: RelocationOp::Copy,
                ..
            }
        ));
        assert_eq!(fs::read_to_string(&previous).unwrap(), "old build");
        assert!(staged.is_file());
    }

    #[test]
    fn test_relocate_leaves_no_partial_file() {
        let bundle = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let snap = snapshot(bundle.path(), vec![PackageFormat::Deb]);
        stage(&snap, PackageFormat::Deb, "deb");

        ArtifactCollector::new(work.path()).collect(&snap).unwrap();

        let names: Vec<_> = fs::read_dir(work.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["demo.deb".to_string()]);
    }
}
