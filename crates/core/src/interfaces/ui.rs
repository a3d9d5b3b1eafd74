//! User-facing notification and selection boundary.

use crate::types::PickItem;
use async_trait::async_trait;

/// One-line notifications and the interactive project picker.
#[async_trait]
pub trait UserInteraction: Send + Sync {
    fn notify_info(&self, message: &str);
    fn notify_warn(&self, message: &str);
    fn notify_error(&self, message: &str);

    /// Present `items` in order and return the label of the chosen entry,
    /// or `None` when the user cancels.
    async fn pick_project(&self, items: Vec<PickItem>) -> Option<String>;
}
