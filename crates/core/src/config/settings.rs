//! Scoped settings resolution.
//!
//! Values cascade folder -> workspace -> user; the first scope that defines
//! a usable value wins. Scopes are never merged.

use crate::interfaces::{SettingsProvider, SettingsScope};
use serde_json::Value;
use std::path::Path;

/// Prefix shared by every launcher setting; configuration-change
/// notifications under this prefix invalidate the registry.
pub const SETTINGS_PREFIX: &str = "datadigger";

/// DataDigger install directory override. Empty means "use the bundled copy".
pub const PATH_KEY: &str = "datadigger.path";
/// When true, the project manifest's own parameter string is passed along.
pub const INCLUDE_PROJECT_PARAMETERS_KEY: &str = "datadigger.includeProjectParameters";
/// Free-form parameters appended to every launch of the scoped project.
pub const EXTRA_PARAMETERS_KEY: &str = "datadigger.extraParameters";
/// Toggles debug-level logging; changing it must not rebuild the registry.
pub const DEBUG_LOGGING_KEY: &str = "datadigger.debugLogging";
/// Catalog of installed OpenEdge runtimes, `[{ name, path, default? }]`.
pub const RUNTIMES_KEY: &str = "datadigger.runtimes";

/// Settings lookups for one project folder (or none, for workspace/user-only
/// keys), applying the scope cascade.
pub struct ScopedSettings<'a> {
    provider: &'a dyn SettingsProvider,
    folder: Option<&'a Path>,
}

impl<'a> ScopedSettings<'a> {
    pub fn new(provider: &'a dyn SettingsProvider, folder: Option<&'a Path>) -> Self {
        Self { provider, folder }
    }

    /// First non-empty string across the scope chain.
    pub fn string(&self, key: &str) -> Option<String> {
        self.chain().into_iter().find_map(|scope| {
            match self.provider.get(scope, key) {
                Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
                _ => None,
            }
        })
    }

    /// First boolean across the scope chain.
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.chain().into_iter().find_map(|scope| {
            match self.provider.get(scope, key) {
                Some(Value::Bool(b)) => Some(b),
                _ => None,
            }
        })
    }

    /// First value of any shape across the scope chain.
    pub fn value(&self, key: &str) -> Option<Value> {
        self.chain()
            .into_iter()
            .find_map(|scope| self.provider.get(scope, key))
    }

    /// The ordered lookup chain, most specific scope first.
    fn chain(&self) -> Vec<SettingsScope<'a>> {
        let mut scopes = Vec::with_capacity(3);
        if let Some(folder) = self.folder {
            scopes.push(SettingsScope::Folder(folder));
        }
        scopes.push(SettingsScope::Workspace);
        scopes.push(SettingsScope::User);
        scopes
    }
}
