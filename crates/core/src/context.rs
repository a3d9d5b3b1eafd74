//! Explicitly owned launcher context.
//!
//! Holds every host capability the subsystems need (workspace folders,
//! settings, metadata, durable state, UI) plus the current registry. There
//! are no globals: whoever issues commands owns a context and passes it
//! down.

use crate::config::{DEBUG_LOGGING_KEY, SETTINGS_PREFIX, ScopedSettings};
use crate::interfaces::{ProjectMetadataProvider, SettingsProvider, StateStore, UserInteraction};
use crate::launcher::ProcessLauncher;
use crate::registry::ProjectRegistry;
use crate::types::WorkspaceFolder;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::info;

/// Effect a configuration-change notification had on the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigChange {
    /// The key is not ours; nothing happened.
    None,
    /// The registry was discarded and will rebuild on the next read.
    RegistryInvalidated,
    /// Only the logging level changed; the host should retune its
    /// subscriber to the carried debug flag.
    LogLevel(bool),
}

pub struct LauncherContext {
    folders: Vec<WorkspaceFolder>,
    extension_root: PathBuf,
    settings: Arc<dyn SettingsProvider>,
    metadata: Arc<dyn ProjectMetadataProvider>,
    state: Arc<dyn StateStore>,
    ui: Arc<dyn UserInteraction>,
    launcher: ProcessLauncher,
    registry: RwLock<Arc<ProjectRegistry>>,
}

impl LauncherContext {
    pub fn new(
        folders: Vec<WorkspaceFolder>,
        extension_root: PathBuf,
        settings: Arc<dyn SettingsProvider>,
        metadata: Arc<dyn ProjectMetadataProvider>,
        state: Arc<dyn StateStore>,
        ui: Arc<dyn UserInteraction>,
    ) -> Self {
        let registry = Arc::new(ProjectRegistry::new(
            folders.clone(),
            extension_root.clone(),
            Arc::clone(&settings),
            Arc::clone(&metadata),
            Arc::clone(&ui),
        ));
        let launcher = ProcessLauncher::new(Arc::clone(&ui));
        Self {
            folders,
            extension_root,
            settings,
            metadata,
            state,
            ui,
            launcher,
            registry: RwLock::new(registry),
        }
    }

    /// The current registry. Clones of this handle keep observing the same
    /// build even if the context swaps in a replacement meanwhile.
    pub fn registry(&self) -> Arc<ProjectRegistry> {
        Arc::clone(&self.registry.read().expect("registry lock poisoned"))
    }

    pub fn extension_root(&self) -> &Path {
        &self.extension_root
    }

    pub fn settings(&self) -> &dyn SettingsProvider {
        self.settings.as_ref()
    }

    pub fn state(&self) -> &dyn StateStore {
        self.state.as_ref()
    }

    pub fn ui(&self) -> &dyn UserInteraction {
        self.ui.as_ref()
    }

    pub fn launcher(&self) -> &ProcessLauncher {
        &self.launcher
    }

    /// Route a settings-change notification from the host.
    ///
    /// The debug-logging key only retunes logging; any other key under the
    /// launcher's prefix replaces the registry wholesale.
    pub fn on_configuration_change(&self, key: &str) -> ConfigChange {
        if key == DEBUG_LOGGING_KEY {
            let debug_enabled = ScopedSettings::new(self.settings.as_ref(), None)
                .bool(DEBUG_LOGGING_KEY)
                .unwrap_or(false);
            info!("Debug logging is now {}", if debug_enabled { "ENABLED" } else { "DISABLED" });
            return ConfigChange::LogLevel(debug_enabled);
        }
        if key == SETTINGS_PREFIX || key.starts_with(&format!("{SETTINGS_PREFIX}.")) {
            info!("Configuration changed, rebuilding project configs");
            self.invalidate_registry();
            return ConfigChange::RegistryInvalidated;
        }
        ConfigChange::None
    }

    /// Drop the current registry and install a fresh, unbuilt one.
    pub fn invalidate_registry(&self) {
        let fresh = Arc::new(ProjectRegistry::new(
            self.folders.clone(),
            self.extension_root.clone(),
            Arc::clone(&self.settings),
            Arc::clone(&self.metadata),
            Arc::clone(&self.ui),
        ));
        let mut slot = self.registry.write().expect("registry lock poisoned");
        *slot = fresh;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::interfaces::SettingsScope;
    use crate::types::{PickItem, ProjectMetadata};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::collections::HashMap;

    struct MapSettings(HashMap<String, Value>);

    impl SettingsProvider for MapSettings {
        fn get(&self, _scope: SettingsScope<'_>, key: &str) -> Option<Value> {
            self.0.get(key).cloned()
        }
    }

    struct SilentUi;

    #[async_trait]
    impl UserInteraction for SilentUi {
        fn notify_info(&self, _message: &str) {}
        fn notify_warn(&self, _message: &str) {}
        fn notify_error(&self, _message: &str) {}
        async fn pick_project(&self, _items: Vec<PickItem>) -> Option<String> {
            None
        }
    }

    struct NoProvider;

    #[async_trait]
    impl ProjectMetadataProvider for NoProvider {
        async fn project_metadata(&self, _folder: &WorkspaceFolder) -> Result<ProjectMetadata> {
            unreachable!("not used in these tests")
        }
    }

    struct NoState;

    impl StateStore for NoState {
        fn last_used_project(&self) -> Option<String> {
            None
        }
        fn set_last_used_project(&self, _project_key: &str) {}
    }

    fn context(settings: HashMap<String, Value>) -> LauncherContext {
        LauncherContext::new(
            vec![],
            PathBuf::from("/ext"),
            Arc::new(MapSettings(settings)),
            Arc::new(NoProvider),
            Arc::new(NoState),
            Arc::new(SilentUi),
        )
    }

    #[test]
    fn launcher_keys_invalidate_the_registry() {
        let ctx = context(HashMap::new());
        let before = ctx.registry();
        assert_eq!(
            ctx.on_configuration_change("datadigger.path"),
            ConfigChange::RegistryInvalidated
        );
        assert!(!Arc::ptr_eq(&before, &ctx.registry()));
    }

    #[test]
    fn foreign_keys_are_ignored() {
        let ctx = context(HashMap::new());
        let before = ctx.registry();
        assert_eq!(
            ctx.on_configuration_change("editor.fontSize"),
            ConfigChange::None
        );
        assert!(Arc::ptr_eq(&before, &ctx.registry()));
    }

    #[test]
    fn the_debug_logging_key_only_reloads_the_level() {
        let mut settings = HashMap::new();
        settings.insert(DEBUG_LOGGING_KEY.to_string(), Value::Bool(true));
        let ctx = context(settings);
        let before = ctx.registry();
        assert_eq!(
            ctx.on_configuration_change(DEBUG_LOGGING_KEY),
            ConfigChange::LogLevel(true)
        );
        assert!(Arc::ptr_eq(&before, &ctx.registry()));
    }
}
