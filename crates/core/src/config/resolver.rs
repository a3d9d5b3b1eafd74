//! DataDigger installation path resolution.
//!
//! The raw path comes from the settings cascade, falling back to the copy
//! bundled with the extension. Validation failures skip the project; only a
//! relative path with no workspace root to resolve against is fatal.

use super::settings::{PATH_KEY, ScopedSettings};
use crate::error::{Error, Result};
use crate::interfaces::{SettingsProvider, UserInteraction};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Parameter file every DataDigger installation ships; its presence is what
/// makes a directory a valid install.
pub const TOOL_PARAMETER_FILE: &str = "DataDigger.pf";

/// Location of the bundled DataDigger copy, relative to the extension root.
pub const BUNDLED_TOOL_DIR: &str = "resources/DataDigger";

/// A validated DataDigger installation directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedToolPath {
    pub path: PathBuf,
    pub bundled: bool,
}

pub struct ToolPathResolver<'a> {
    settings: &'a dyn SettingsProvider,
    ui: &'a dyn UserInteraction,
    workspace_root: Option<&'a Path>,
    extension_root: &'a Path,
}

impl<'a> ToolPathResolver<'a> {
    pub fn new(
        settings: &'a dyn SettingsProvider,
        ui: &'a dyn UserInteraction,
        workspace_root: Option<&'a Path>,
        extension_root: &'a Path,
    ) -> Self {
        Self {
            settings,
            ui,
            workspace_root,
            extension_root,
        }
    }

    /// Resolve and validate the install directory for one project.
    ///
    /// `Ok(None)` means the project must be skipped; the reason has already
    /// been logged and surfaced to the user.
    pub fn resolve(
        &self,
        project_key: &str,
        project_dir: &Path,
    ) -> Result<Option<ResolvedToolPath>> {
        let scoped = ScopedSettings::new(self.settings, Some(project_dir));
        let (raw, bundled) = match scoped.string(PATH_KEY) {
            Some(configured) => (configured, false),
            None => (
                self.extension_root.join(BUNDLED_TOOL_DIR).display().to_string(),
                true,
            ),
        };
        self.validate(project_key, raw.trim(), bundled)
    }

    fn validate(
        &self,
        project_key: &str,
        raw: &str,
        bundled: bool,
    ) -> Result<Option<ResolvedToolPath>> {
        if raw.is_empty() {
            warn!("No valid DataDigger path for project '{project_key}'");
            self.ui.notify_warn(&format!(
                "No valid DataDigger path found for project '{project_key}'. Please set {PATH_KEY} in the settings."
            ));
            return Ok(None);
        }

        let mut path = PathBuf::from(raw);
        if !path.is_absolute() {
            // Relative overrides only make sense against an open workspace.
            let Some(root) = self.workspace_root else {
                return Err(Error::NoWorkspace);
            };
            path = root.join(path);
        }

        if !path.exists() {
            warn!(
                "DataDigger path for project '{project_key}': {} --> not found",
                path.display()
            );
            self.ui.notify_warn(&format!(
                "The configured DataDigger path '{}' for project '{project_key}' does not exist. Please check {PATH_KEY} in the settings.",
                path.display()
            ));
            return Ok(None);
        }

        if !path.is_dir() {
            error!(
                "DataDigger path for project '{project_key}': {} is not a directory",
                path.display()
            );
            self.ui.notify_error(&format!(
                "The configured DataDigger path '{}' for project '{project_key}' is not a directory. Please check {PATH_KEY} in the settings.",
                path.display()
            ));
            return Ok(None);
        }

        if !path.join(TOOL_PARAMETER_FILE).is_file() {
            error!(
                "DataDigger path for project '{project_key}': {} is missing {TOOL_PARAMETER_FILE}",
                path.display()
            );
            self.ui.notify_error(&format!(
                "The DataDigger installation at '{}' for project '{project_key}' is missing {TOOL_PARAMETER_FILE}. Please check {PATH_KEY} in the settings.",
                path.display()
            ));
            return Ok(None);
        }

        info!(
            "DataDigger path for project '{project_key}': {}",
            path.display()
        );
        Ok(Some(ResolvedToolPath { path, bundled }))
    }
}
