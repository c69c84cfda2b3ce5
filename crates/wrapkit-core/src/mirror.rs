//! MirrorSelector: picks the package registry source for the dependency fetch.
//!
//! Some networks reach the default package registry so slowly that a build
//! effectively hangs. A short TCP probe against the registry host classifies
//! the network; on the slow path the fetch is pointed at a mirror and the app
//! project's cargo registry config is swapped for its mirrored variant.
//!
//! A failed probe never fails the build: it falls back to the default source.

use async_trait::async_trait;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::net::TcpStream;

/// Cargo registry config the toolchain reads, relative to the app project.
pub const REGISTRY_CONFIG: &str = "src-tauri/.cargo/config";

/// Mirrored variant of [`REGISTRY_CONFIG`] shipped with the app project.
pub const MIRROR_REGISTRY_CONFIG: &str = "src-tauri/.cargo/cn_config.bak";

pub const DEFAULT_PROBE_HOST: &str = "www.npmjs.com";
pub const DEFAULT_MIRROR_REGISTRY: &str = "https://registry.npmmirror.com";

/// Where dependencies are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourcePolicy {
    Default,
    Mirrored { registry: String },
}

impl SourcePolicy {
    pub fn is_mirrored(&self) -> bool {
        matches!(self, SourcePolicy::Mirrored { .. })
    }
}

/// Result of classifying the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkRegion {
    Default,
    /// The default registry is slow or unreachable from here.
    SlowPath,
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("{host} resolved to no addresses")]
    NoAddress { host: String },

    #[error("failed to connect to {host}: {source}")]
    Connect {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("probe of {host} timed out after {timeout:?}")]
    Timeout { host: String, timeout: Duration },
}

/// Classifies the network by probing a host.
#[async_trait]
pub trait NetworkProbe: Send + Sync {
    async fn classify(&self, host: &str) -> Result<NetworkRegion, ProbeError>;
}

/// Measures TCP connect latency to `host:port`.
#[derive(Debug, Clone)]
pub struct TcpLatencyProbe {
    pub port: u16,
    pub timeout: Duration,
    /// Connects slower than this are classified as [`NetworkRegion::SlowPath`].
    pub slow_threshold: Duration,
}

impl Default for TcpLatencyProbe {
    fn default() -> Self {
        Self {
            port: 443,
            timeout: Duration::from_millis(3000),
            slow_threshold: Duration::from_millis(1000),
        }
    }
}

impl TcpLatencyProbe {
    pub fn classify_latency(&self, elapsed: Duration) -> NetworkRegion {
        if elapsed > self.slow_threshold {
            NetworkRegion::SlowPath
        } else {
            NetworkRegion::Default
        }
    }

    /// Bound a connect attempt by `self.timeout`.
    async fn within_timeout<F>(&self, host: &str, attempt: F) -> Result<Duration, ProbeError>
    where
        F: std::future::Future<Output = Result<Duration, ProbeError>>,
    {
        tokio::time::timeout(self.timeout, attempt)
            .await
            .map_err(|_| ProbeError::Timeout {
                host: host.to_string(),
                timeout: self.timeout,
            })?
    }

    async fn connect(&self, host: &str) -> Result<Duration, ProbeError> {
        let mut addrs = tokio::net::lookup_host((host, self.port))
            .await
            .map_err(|source| ProbeError::Resolve {
                host: host.to_string(),
                source,
            })?;
        let addr = addrs.next().ok_or_else(|| ProbeError::NoAddress {
            host: host.to_string(),
        })?;

        let started = Instant::now();
        TcpStream::connect(addr)
            .await
            .map_err(|source| ProbeError::Connect {
                host: host.to_string(),
                source,
            })?;
        Ok(started.elapsed())
    }
}

#[async_trait]
impl NetworkProbe for TcpLatencyProbe {
    async fn classify(&self, host: &str) -> Result<NetworkRegion, ProbeError> {
        let elapsed = self.within_timeout(host, self.connect(host)).await?;
        tracing::debug!(host, elapsed_ms = elapsed.as_millis() as u64, "probed registry host");
        Ok(self.classify_latency(elapsed))
    }
}

/// Mirror behavior for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorSettings {
    /// Probe the network at all. When off, the default source is used unless
    /// `force` is set.
    pub probe: bool,
    /// Always use the mirror.
    pub force: bool,
    pub probe_host: String,
    pub registry: String,
}

impl Default for MirrorSettings {
    fn default() -> Self {
        Self {
            probe: true,
            force: false,
            probe_host: DEFAULT_PROBE_HOST.to_string(),
            registry: DEFAULT_MIRROR_REGISTRY.to_string(),
        }
    }
}

/// Chooses the [`SourcePolicy`] and applies its host-side effects.
pub struct MirrorSelector<'a> {
    probe: &'a dyn NetworkProbe,
    settings: &'a MirrorSettings,
}

impl<'a> MirrorSelector<'a> {
    pub fn new(probe: &'a dyn NetworkProbe, settings: &'a MirrorSettings) -> Self {
        Self { probe, settings }
    }

    /// Classify the network without touching the app project.
    pub async fn classify(&self) -> Result<NetworkRegion, ProbeError> {
        if self.settings.force {
            return Ok(NetworkRegion::SlowPath);
        }
        if !self.settings.probe {
            return Ok(NetworkRegion::Default);
        }
        self.probe.classify(&self.settings.probe_host).await
    }

    /// Pick the source for this run.
    ///
    /// On the slow path the mirrored registry config replaces the active one
    /// in `app_dir`. Probe failures fall back to [`SourcePolicy::Default`].
    pub async fn select_source(&self, app_dir: &Path) -> SourcePolicy {
        let region = match self.classify().await {
            Ok(region) => region,
            Err(e) => {
                tracing::warn!(error = %e, "network probe failed, using the default registry");
                NetworkRegion::Default
            }
        };

        match region {
            NetworkRegion::Default => SourcePolicy::Default,
            NetworkRegion::SlowPath => {
                tracing::info!(registry = %self.settings.registry, "using mirrored registry");
                if let Err(e) = swap_registry_config(app_dir) {
                    tracing::warn!(
                        error = %e,
                        "could not switch the cargo registry config; crate downloads use the default source"
                    );
                }
                SourcePolicy::Mirrored {
                    registry: self.settings.registry.clone(),
                }
            }
        }
    }
}

/// Copy the mirrored cargo config over the active one.
fn swap_registry_config(app_dir: &Path) -> io::Result<PathBuf> {
    let from = app_dir.join(MIRROR_REGISTRY_CONFIG);
    let to = app_dir.join(REGISTRY_CONFIG);
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(&from, &to)?;
    tracing::debug!(from = %from.display(), to = %to.display(), "swapped registry config");
    Ok(to)
}
