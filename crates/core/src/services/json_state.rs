//! Durable last-used project storage in a small JSON state file.

use crate::interfaces::StateStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_project: Option<String>,
}

pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// State file under the platform data directory
    /// (`<data_dir>/ddlaunch/state.json`).
    pub fn with_default_file() -> Self {
        let path = dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("ddlaunch")
            .join("state.json");
        Self::new(path)
    }

    fn load(&self) -> PersistedState {
        let Ok(raw) = std::fs::read_to_string(&self.path) else {
            return PersistedState::default();
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }

    fn save(&self, state: &PersistedState) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                warn!("Could not create state directory {}: {err}", parent.display());
                return;
            }
        }
        match serde_json::to_string_pretty(state) {
            Ok(raw) => {
                if let Err(err) = std::fs::write(&self.path, raw) {
                    warn!("Could not persist state to {}: {err}", self.path.display());
                }
            }
            Err(err) => warn!("Could not serialize state: {err}"),
        }
    }
}

impl StateStore for JsonStateStore {
    fn last_used_project(&self) -> Option<String> {
        self.load().last_project
    }

    fn set_last_used_project(&self, project_key: &str) {
        let mut state = self.load();
        state.last_project = Some(project_key.to_string());
        self.save(&state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn remembers_the_last_used_project_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let store = JsonStateStore::new(&path);
        assert_eq!(store.last_used_project(), None);
        store.set_last_used_project("alpha");

        let reopened = JsonStateStore::new(&path);
        assert_eq!(reopened.last_used_project().as_deref(), Some("alpha"));
    }

    #[test]
    fn a_corrupt_state_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "garbage").unwrap();
        assert_eq!(JsonStateStore::new(&path).last_used_project(), None);
    }
}
