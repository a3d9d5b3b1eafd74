//! Manifest-backed metadata provider.
//!
//! Reads `openedge-project.json` directly and resolves the runtime home
//! from the configured runtime catalog, the same data the ABL tooling keeps
//! about installed OpenEdge versions.

use crate::config::{ProjectManifest, RUNTIMES_KEY, ScopedSettings};
use crate::error::{Error, Result};
use crate::interfaces::{ProjectMetadataProvider, SettingsProvider};
use crate::types::{ProjectMetadata, WorkspaceFolder};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// One installed OpenEdge runtime in the `datadigger.runtimes` catalog.
#[derive(Debug, Clone, Deserialize)]
struct RuntimeEntry {
    name: String,
    path: String,
    #[serde(default)]
    default: bool,
}

pub struct ManifestMetadataProvider {
    settings: Arc<dyn SettingsProvider>,
}

impl ManifestMetadataProvider {
    pub fn new(settings: Arc<dyn SettingsProvider>) -> Self {
        Self { settings }
    }

    /// The runtime matching the manifest's version, else the catalog entry
    /// marked as default.
    fn runtime_home_for(&self, version: &str) -> Result<PathBuf> {
        let value = ScopedSettings::new(self.settings.as_ref(), None)
            .value(RUNTIMES_KEY)
            .ok_or_else(|| {
                Error::ConfigError(format!(
                    "no OpenEdge runtimes configured; set {RUNTIMES_KEY} in the settings"
                ))
            })?;
        let runtimes: Vec<RuntimeEntry> = serde_json::from_value(value)
            .map_err(|err| Error::ConfigError(format!("invalid {RUNTIMES_KEY} setting: {err}")))?;
        runtimes
            .iter()
            .find(|runtime| runtime.name == version)
            .or_else(|| runtimes.iter().find(|runtime| runtime.default))
            .map(|runtime| PathBuf::from(&runtime.path))
            .ok_or_else(|| Error::RuntimeNotConfigured(version.to_string()))
    }
}

#[async_trait]
impl ProjectMetadataProvider for ManifestMetadataProvider {
    async fn project_metadata(&self, folder: &WorkspaceFolder) -> Result<ProjectMetadata> {
        let manifest = ProjectManifest::load(&folder.path)?;
        let runtime_home = self.runtime_home_for(&manifest.oeversion)?;
        let db_connections = manifest.connection_strings();
        debug!(
            "DB connections for project '{}': {}",
            folder.name,
            db_connections.join(", ")
        );
        Ok(ProjectMetadata {
            project_root: folder.path.clone(),
            runtime_home,
            oe_version: manifest.oeversion.clone(),
            db_connections,
            extra_parameters: manifest.extra_parameters.clone(),
        })
    }
}
