//! Shared data types for project discovery and launching.

use std::path::PathBuf;

/// A folder that is part of the open workspace.
///
/// The folder name doubles as the project key once the folder is registered,
/// so it must be unique within a workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceFolder {
    pub name: String,
    pub path: PathBuf,
}

impl WorkspaceFolder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }
}

/// Raw project data as supplied by the metadata provider.
///
/// Read-only downstream; the registry turns it into a
/// [`ResolvedProjectConfig`] or drops the project entirely.
#[derive(Debug, Clone)]
pub struct ProjectMetadata {
    pub project_root: PathBuf,
    /// OpenEdge installation directory (DLC) for the project's runtime.
    pub runtime_home: PathBuf,
    pub oe_version: String,
    /// Connection strings, each a space-delimited argument group passed
    /// through unparsed to the launched process.
    pub db_connections: Vec<String>,
    /// Free-form extra startup parameters declared by the project manifest.
    pub extra_parameters: String,
}

/// Launch-ready configuration for a single project.
///
/// Built once per registry load and immutable thereafter. `tool_path` is
/// always a validated existing directory containing the DataDigger parameter
/// file; projects that fail validation are never stored.
#[derive(Debug, Clone)]
pub struct ResolvedProjectConfig {
    pub project_key: String,
    pub display_name: String,
    pub project_dir: PathBuf,
    pub runtime_home: PathBuf,
    pub oe_version: String,
    pub db_connections: Vec<String>,
    pub tool_path: PathBuf,
    /// Whether `tool_path` is the copy bundled with this extension rather
    /// than a configured install.
    pub tool_path_is_bundled: bool,
    /// The project's own parameter string, carried only when the
    /// include-project-parameters setting is enabled.
    pub project_parameters: Option<String>,
    /// Free-form parameters from the settings surface.
    pub extra_parameters: Option<String>,
}

/// One entry presented by the interactive project picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItem {
    pub label: String,
    pub description: String,
}
