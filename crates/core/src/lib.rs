//! ddlaunch - workspace launcher for the DataDigger desktop tool
//!
//! This crate provides functionality to:
//! - Discover OpenEdge projects in a workspace and read their manifests
//! - Resolve the DataDigger installation to use for each project
//! - Assemble the `prowin` invocation and spawn it as a detached process
pub mod command;
pub mod config;
pub mod context;
pub mod error;
pub mod interfaces;
pub mod launcher;
pub mod registry;
pub mod selection;
pub mod services;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use command::{LaunchCommand, LaunchCommandBuilder, tokenize};
pub use context::{ConfigChange, LauncherContext};
pub use launcher::{LaunchOutcome, LaunchTask, ProcessLauncher};
pub use registry::{ProjectMap, ProjectRegistry};
pub use selection::SelectionController;
