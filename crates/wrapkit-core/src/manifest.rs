//! ConfigMerger: overlays build options onto a platform template.
//!
//! The merge itself is pure. Writing the result to the app project is a
//! separate step ([`PlatformManifest::write_to`]) because the toolchain is an
//! external process that only reads its configuration from disk.

use crate::error::{Error, Result};
use crate::format::PackageFormat;
use crate::options::{validate_app_name, BuildOptions};
use crate::platform::{PlatformTarget, TAURI_DIR};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Manifest file the toolchain reads, relative to the app project.
pub const MANIFEST_FILE: &str = "tauri.conf.json";

/// What the app window loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppUrl {
    /// A remote page.
    Web(String),
    /// A local HTML file whose directory is shipped with the app.
    Local(PathBuf),
}

impl AppUrl {
    /// Classify user input.
    ///
    /// An existing file is a local app. Anything else is a web URL, with
    /// `https://` added when no scheme is present.
    pub fn classify(input: &str) -> Self {
        let path = Path::new(input);
        if path.is_file() {
            return AppUrl::Local(path.to_path_buf());
        }

        if input.contains("://") {
            AppUrl::Web(input.to_string())
        } else {
            AppUrl::Web(format!("https://{}", input))
        }
    }

    fn window_url(&self) -> String {
        match self {
            AppUrl::Web(url) => url.clone(),
            AppUrl::Local(file) => file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    fn url_type(&self) -> &'static str {
        match self {
            AppUrl::Web(_) => "web",
            AppUrl::Local(_) => "local",
        }
    }
}

/// The merged configuration handed to the toolchain.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformManifest {
    value: Value,
}

impl PlatformManifest {
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    pub fn product_name(&self) -> Option<&str> {
        self.value.pointer("/package/productName")?.as_str()
    }

    pub fn version(&self) -> Option<&str> {
        self.value.pointer("/package/version")?.as_str()
    }

    /// Serialized form, identical for identical manifests.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(&self.value)
            .map_err(|e| Error::Template(format!("manifest is not serializable: {}", e)))?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Path the toolchain reads the manifest from.
    pub fn path_in(app_dir: &Path) -> PathBuf {
        app_dir.join(TAURI_DIR).join(MANIFEST_FILE)
    }

    /// Write the manifest into the app project, replacing the previous one.
    pub fn write_to(&self, app_dir: &Path) -> Result<PathBuf> {
        let path = Self::path_in(app_dir);
        let bytes = self.to_bytes()?;
        let write = || -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &bytes)
        };
        write().map_err(|source| Error::ManifestWrite {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "wrote manifest");
        Ok(path)
    }
}

/// Directory the packager serves local apps from, relative to the app project.
pub const LOCAL_DIST_DIR: &str = "dist";

/// Top-level directories of an app project that are never web assets.
const PROJECT_DIRS: [&str; 3] = [TAURI_DIR, "node_modules", ".git"];

/// Both ends of a local app copy, resolved to canonical paths.
#[derive(Debug)]
struct LocalLayout {
    source: PathBuf,
    dest: PathBuf,
    app_dir: PathBuf,
}

impl LocalLayout {
    fn resolve(entry: &Path, app_dir: &Path) -> Result<Self> {
        let parent = entry
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let canonical = |path: &Path| {
            fs::canonicalize(path).map_err(|source| Error::LocalAssets {
                path: path.to_path_buf(),
                source,
            })
        };

        let source = canonical(parent)?;
        let app_dir = canonical(app_dir)?;
        let dest = app_dir.join(LOCAL_DIST_DIR);

        if source != dest && source.starts_with(&dest) {
            return Err(Error::invalid(
                "url",
                entry.display().to_string(),
                format!(
                    "a local app inside {} must have its entry file at the top of it",
                    dest.display()
                ),
            ));
        }

        Ok(Self {
            source,
            dest,
            app_dir,
        })
    }

    /// The site already lives in `dist/`.
    fn in_place(&self) -> bool {
        self.source == self.dest
    }

    fn skips(&self, entry: &walkdir::DirEntry) -> bool {
        let path = entry.path();
        if path == self.dest {
            return true;
        }
        if entry.path_is_symlink()
            && fs::canonicalize(path).is_ok_and(|target| target.starts_with(&self.dest))
        {
            return true;
        }
        if self.source == self.app_dir {
            return entry.depth() == 1
                && PROJECT_DIRS.iter().any(|dir| entry.file_name() == *dir);
        }
        // an app project nested somewhere below the site
        path == self.app_dir
    }
}

/// Check that a local app can be copied into `app_dir` without the copy
/// reaching into its own output.
pub(crate) fn check_local_layout(entry: &Path, app_dir: &Path) -> Result<()> {
    LocalLayout::resolve(entry, app_dir).map(|_| ())
}

/// Copy the directory containing a local app's entry file into the app
/// project's `dist/` so the packager bundles it.
///
/// A site that already is `dist/` is left as it is. When the entry file sits
/// at the top of the app project, `dist/`, `src-tauri/`, `node_modules/` and
/// `.git/` are not copied.
pub fn stage_local_assets(entry: &Path, app_dir: &Path) -> Result<PathBuf> {
    let layout = LocalLayout::resolve(entry, app_dir)?;
    if layout.in_place() {
        tracing::debug!(dir = %layout.dest.display(), "local assets already in place");
        return Ok(layout.dest);
    }

    let source = layout.source.as_path();
    let dest = layout.dest.as_path();
    let copy = || -> std::io::Result<usize> {
        let mut copied = 0;
        let walker = walkdir::WalkDir::new(source)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| !layout.skips(entry));
        for entry in walker {
            let entry = entry.map_err(std::io::Error::other)?;
            let relative = entry
                .path()
                .strip_prefix(source)
                .map_err(std::io::Error::other)?;
            let target = dest.join(relative);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)?;
            } else {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(entry.path(), &target)?;
                copied += 1;
            }
        }
        Ok(copied)
    };

    let copied = copy().map_err(|source_err| Error::LocalAssets {
        path: source.to_path_buf(),
        source: source_err,
    })?;
    tracing::debug!(from = %source.display(), to = %dest.display(), files = copied, "staged local assets");
    Ok(layout.dest)
}

/// Recursively merge `overlay` into `base`.
///
/// Objects merge key by key; arrays and scalars from `overlay` replace the
/// value in `base`.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Walk `path` from `root`, creating empty objects where keys are missing.
fn object_at<'v>(root: &'v mut Value, path: &[&str]) -> Result<&'v mut Map<String, Value>> {
    let mut current = root;
    for (depth, key) in path.iter().enumerate() {
        let map = current.as_object_mut().ok_or_else(|| {
            Error::Template(format!("'{}' is not an object", path[..depth].join(".")))
        })?;
        current = map
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    current
        .as_object_mut()
        .ok_or_else(|| Error::Template(format!("'{}' is not an object", path.join("."))))
}

/// Merges [`BuildOptions`] into a platform template.
pub struct ConfigMerger<'a> {
    target: &'a dyn PlatformTarget,
}

impl<'a> ConfigMerger<'a> {
    pub fn new(target: &'a dyn PlatformTarget) -> Self {
        Self { target }
    }

    /// Produce the manifest for one build.
    ///
    /// Explicit options always win; unset options keep the template value.
    /// Fails on names that cannot become file names and on templates that do
    /// not declare a version.
    pub fn merge(
        &self,
        url: &AppUrl,
        options: &BuildOptions,
        formats: &[PackageFormat],
        template: &Value,
    ) -> Result<PlatformManifest> {
        validate_app_name(&options.name)?;
        self.target.validate_name(&options.name)?;

        for (field, value) in [("width", options.width), ("height", options.height)] {
            if value == Some(0) {
                return Err(Error::invalid(field, "0", "window size must be positive"));
            }
        }

        if !template.is_object() {
            return Err(Error::Template("template root must be an object".to_string()));
        }
        let mut value = template.clone();

        let package = object_at(&mut value, &["package"])?;
        package.insert("productName".into(), json!(options.name));
        if let Some(version) = &options.app_version {
            package.insert("version".into(), json!(version));
        }

        let window = Self::main_window(&mut value)?;
        window.insert("url".into(), json!(url.window_url()));
        window.insert("url_type".into(), json!(url.url_type()));
        let knobs = [
            ("width", options.width.map(Value::from)),
            ("height", options.height.map(Value::from)),
            ("resizable", options.resizable.map(Value::from)),
            ("fullscreen", options.fullscreen.map(Value::from)),
            ("transparent", options.transparent.map(Value::from)),
            ("user_agent", options.user_agent.clone().map(Value::from)),
            ("menu", options.show_menu.map(Value::from)),
        ];
        for (key, knob) in knobs {
            if let Some(knob) = knob {
                window.insert(key.into(), knob);
            }
        }

        let bundle = object_at(&mut value, &["tauri", "bundle"])?;
        if let Some(identifier) = &options.identifier {
            bundle.insert("identifier".into(), json!(identifier));
        }
        if let Some(icon) = &options.icon {
            bundle.insert("icon".into(), json!([icon.to_string_lossy()]));
        }
        bundle.insert(
            "targets".into(),
            Value::from(formats.iter().map(|f| f.name()).collect::<Vec<_>>()),
        );

        match options.show_system_tray {
            Some(false) => {
                object_at(&mut value, &["tauri"])?.remove("systemTray");
            }
            Some(true) => {
                object_at(&mut value, &["tauri"])?
                    .entry("systemTray")
                    .or_insert_with(|| json!({ "iconPath": "png/icon_512.png", "iconAsTemplate": true }));
            }
            None => {}
        }

        let manifest = PlatformManifest { value };
        match manifest.version() {
            Some(version) if !version.trim().is_empty() => {}
            _ => {
                return Err(Error::invalid(
                    "package.version",
                    "",
                    "the template declares no version; set appVersion",
                ))
            }
        }

        Ok(manifest)
    }

    fn main_window(value: &mut Value) -> Result<&mut Map<String, Value>> {
        let tauri = object_at(value, &["tauri"])?;
        let windows = tauri
            .entry("windows")
            .or_insert_with(|| json!([{}]))
            .as_array_mut()
            .ok_or_else(|| Error::Template("'tauri.windows' is not an array".to_string()))?;
        if windows.is_empty() {
            windows.push(json!({}));
        }
        windows[0]
            .as_object_mut()
            .ok_or_else(|| Error::Template("'tauri.windows[0]' is not an object".to_string()))
    }
}
