//! Workspace project discovery and registration.

use crate::config::{LaunchConfigBuilder, ProjectManifest, ToolPathResolver};
use crate::error::{Error, Result};
use crate::interfaces::{ProjectMetadataProvider, SettingsProvider, UserInteraction};
use crate::types::{ResolvedProjectConfig, WorkspaceFolder};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};

/// Registered projects keyed by workspace folder name.
pub type ProjectMap = BTreeMap<String, ResolvedProjectConfig>;

/// Lazily built, immutable view of the launchable projects in a workspace.
///
/// The map is built exactly once per registry lifetime; concurrent callers
/// share the same in-flight build. Invalidation is done by replacing the
/// whole registry object, never by mutating it.
pub struct ProjectRegistry {
    folders: Vec<WorkspaceFolder>,
    extension_root: PathBuf,
    settings: Arc<dyn SettingsProvider>,
    provider: Arc<dyn ProjectMetadataProvider>,
    ui: Arc<dyn UserInteraction>,
    projects: OnceCell<ProjectMap>,
}

impl ProjectRegistry {
    pub fn new(
        folders: Vec<WorkspaceFolder>,
        extension_root: PathBuf,
        settings: Arc<dyn SettingsProvider>,
        provider: Arc<dyn ProjectMetadataProvider>,
        ui: Arc<dyn UserInteraction>,
    ) -> Self {
        Self {
            folders,
            extension_root,
            settings,
            provider,
            ui,
            projects: OnceCell::new(),
        }
    }

    /// The registered projects, building the map on first use.
    ///
    /// A failed build is not cached: the next call retries, which is how
    /// environment errors heal once the workspace is usable again.
    pub async fn projects(&self) -> Result<&ProjectMap> {
        self.projects.get_or_try_init(|| self.load_all()).await
    }

    async fn load_all(&self) -> Result<ProjectMap> {
        if self.folders.is_empty() {
            error!("There are no workspace folders to enumerate");
            return Err(Error::NoWorkspace);
        }

        info!("Reading OpenEdge projects and locating DataDigger installations");
        let workspace_root = self.folders.first().map(|f| f.path.clone());
        let mut projects = ProjectMap::new();

        let project_folders: Vec<&WorkspaceFolder> = self
            .folders
            .iter()
            .filter(|folder| ProjectManifest::exists(&folder.path))
            .collect();
        if project_folders.is_empty() {
            warn!("There are no OpenEdge projects in this workspace");
            return Ok(projects);
        }

        for folder in project_folders {
            let metadata = match self.provider.project_metadata(folder).await {
                Ok(metadata) => metadata,
                Err(err) => {
                    error!("Could not load project info for '{}': {err}", folder.name);
                    self.ui.notify_warn(&format!(
                        "Could not load project info for '{}': {err}",
                        folder.name
                    ));
                    continue;
                }
            };

            if metadata.db_connections.is_empty() {
                warn!("No DB connections found for project '{}'", folder.name);
                self.ui.notify_warn(&format!(
                    "Project '{}' declares no database connections and was skipped.",
                    folder.name
                ));
                continue;
            }

            let resolver = ToolPathResolver::new(
                self.settings.as_ref(),
                self.ui.as_ref(),
                workspace_root.as_deref(),
                &self.extension_root,
            );
            let Some(tool) = resolver.resolve(&folder.name, &metadata.project_root)? else {
                continue;
            };

            let config =
                LaunchConfigBuilder::new(self.settings.as_ref()).build(&folder.name, &metadata, tool);
            debug!(
                "Registered project '{}' with {} connection(s)",
                folder.name,
                config.db_connections.len()
            );
            projects.insert(folder.name.clone(), config);
        }

        info!("Registered {} DataDigger project(s)", projects.len());
        Ok(projects)
    }
}
