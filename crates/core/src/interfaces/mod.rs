//! Host boundaries.
//!
//! The hosting environment (settings storage, durable state, UI prompts,
//! project metadata) is reached only through these traits so the core stays
//! host-agnostic and testable with in-memory fakes.

mod metadata;
mod settings;
mod state;
mod ui;

pub use metadata::ProjectMetadataProvider;
pub use settings::{SettingsProvider, SettingsScope};
pub use state::StateStore;
pub use ui::UserInteraction;
