//! Settings access boundary.

use serde_json::Value;
use std::path::Path;

/// The scope a single settings lookup applies to.
///
/// Precedence across scopes lives in [`crate::config::ScopedSettings`]; a
/// provider only answers for one scope at a time and never merges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsScope<'a> {
    /// Settings attached to one workspace folder.
    Folder(&'a Path),
    /// Settings attached to the workspace root.
    Workspace,
    /// The user's global settings.
    User,
}

/// Read access to scoped settings storage.
pub trait SettingsProvider: Send + Sync {
    /// Raw value for `key` at exactly `scope`, or `None` when that scope
    /// does not define it.
    fn get(&self, scope: SettingsScope<'_>, key: &str) -> Option<Value>;
}
