//! Configuration loading: scoped settings, the project manifest, tool path
//! resolution and launch configuration assembly.

mod builder;
mod manifest;
mod resolver;
mod settings;

pub use builder::LaunchConfigBuilder;
pub use manifest::{DbConnection, PROJECT_MANIFEST, ProjectManifest};
pub use resolver::{BUNDLED_TOOL_DIR, ResolvedToolPath, TOOL_PARAMETER_FILE, ToolPathResolver};
pub use settings::{
    DEBUG_LOGGING_KEY, EXTRA_PARAMETERS_KEY, INCLUDE_PROJECT_PARAMETERS_KEY, PATH_KEY,
    RUNTIMES_KEY, SETTINGS_PREFIX, ScopedSettings,
};
