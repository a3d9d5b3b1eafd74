//! Durable key-value state boundary.

/// Host-provided persistent storage for the last-used project key.
///
/// Writes are fire-and-forget; implementations log failures instead of
/// surfacing them, matching how the selection flow treats the value as a
/// best-effort hint.
pub trait StateStore: Send + Sync {
    fn last_used_project(&self) -> Option<String>;
    fn set_last_used_project(&self, project_key: &str);
}
