//! JSON-file settings provider.
//!
//! Folder and workspace scopes read a `.datadigger.json` next to the code;
//! the user scope reads a settings file under the platform config
//! directory. Files are read per lookup, so edits are picked up on the next
//! registry build without any watching.

use crate::interfaces::{SettingsProvider, SettingsScope};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Settings file name used for the folder and workspace scopes.
pub const FOLDER_SETTINGS_FILE: &str = ".datadigger.json";

pub struct JsonFileSettings {
    workspace_root: Option<PathBuf>,
    user_file: PathBuf,
}

impl JsonFileSettings {
    pub fn new(workspace_root: Option<PathBuf>, user_file: PathBuf) -> Self {
        Self {
            workspace_root,
            user_file,
        }
    }

    /// User scope under the platform config directory
    /// (`<config_dir>/ddlaunch/settings.json`).
    pub fn with_default_user_file(workspace_root: Option<PathBuf>) -> Self {
        let user_file = dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("ddlaunch")
            .join("settings.json");
        Self::new(workspace_root, user_file)
    }

    fn read(path: &Path) -> Option<Value> {
        let raw = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("Ignoring unparsable settings file {}: {err}", path.display());
                None
            }
        }
    }

    /// Look up a dotted key, either as a literal top-level key
    /// (`"datadigger.path"`) or as a nested object path
    /// (`{"datadigger": {"path": ...}}`).
    fn lookup(root: &Value, key: &str) -> Option<Value> {
        if let Some(value) = root.get(key) {
            return Some(value.clone());
        }
        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current.clone())
    }
}

impl SettingsProvider for JsonFileSettings {
    fn get(&self, scope: SettingsScope<'_>, key: &str) -> Option<Value> {
        let file = match scope {
            SettingsScope::Folder(dir) => dir.join(FOLDER_SETTINGS_FILE),
            SettingsScope::Workspace => self.workspace_root.as_ref()?.join(FOLDER_SETTINGS_FILE),
            SettingsScope::User => self.user_file.clone(),
        };
        let root = Self::read(&file)?;
        Self::lookup(&root, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PATH_KEY, ScopedSettings};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_literal_and_nested_keys() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(FOLDER_SETTINGS_FILE),
            r#"{ "datadigger.path": "literal", "datadigger": { "debugLogging": true } }"#,
        )
        .unwrap();

        let settings = JsonFileSettings::new(None, dir.path().join("unused.json"));
        assert_eq!(
            settings.get(SettingsScope::Folder(dir.path()), "datadigger.path"),
            Some(Value::from("literal"))
        );
        assert_eq!(
            settings.get(SettingsScope::Folder(dir.path()), "datadigger.debugLogging"),
            Some(Value::Bool(true))
        );
        assert_eq!(
            settings.get(SettingsScope::Folder(dir.path()), "datadigger.missing"),
            None
        );
    }

    #[test]
    fn folder_settings_override_workspace_and_user_files() {
        let workspace = TempDir::new().unwrap();
        let folder = workspace.path().join("app");
        fs::create_dir_all(&folder).unwrap();
        let user = TempDir::new().unwrap();
        let user_file = user.path().join("settings.json");

        fs::write(
            folder.join(FOLDER_SETTINGS_FILE),
            r#"{ "datadigger": { "path": "from-folder" } }"#,
        )
        .unwrap();
        fs::write(
            workspace.path().join(FOLDER_SETTINGS_FILE),
            r#"{ "datadigger": { "path": "from-workspace" } }"#,
        )
        .unwrap();
        fs::write(&user_file, r#"{ "datadigger": { "path": "from-user" } }"#).unwrap();

        let settings =
            JsonFileSettings::new(Some(workspace.path().to_path_buf()), user_file.clone());
        let scoped = ScopedSettings::new(&settings, Some(&folder));
        assert_eq!(scoped.string(PATH_KEY).as_deref(), Some("from-folder"));

        fs::remove_file(folder.join(FOLDER_SETTINGS_FILE)).unwrap();
        assert_eq!(scoped.string(PATH_KEY).as_deref(), Some("from-workspace"));

        fs::remove_file(workspace.path().join(FOLDER_SETTINGS_FILE)).unwrap();
        assert_eq!(scoped.string(PATH_KEY).as_deref(), Some("from-user"));
    }

    #[test]
    fn a_broken_settings_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(FOLDER_SETTINGS_FILE), "{ not json").unwrap();
        let settings = JsonFileSettings::new(None, dir.path().join("unused.json"));
        assert_eq!(
            settings.get(SettingsScope::Folder(dir.path()), "datadigger.path"),
            None
        );
    }
}
