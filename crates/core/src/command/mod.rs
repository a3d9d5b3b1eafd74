//! Assembly of the external tool invocation.

mod args;
mod builder;

pub use args::tokenize;
pub use builder::{
    LaunchCommandBuilder, RUNTIME_EXECUTABLES, TOOL_HOME_ENV, TOOL_WORKDIR_ENV, WRAPPER_PROCEDURE,
};

use std::path::PathBuf;

/// A fully assembled external tool invocation.
///
/// Transient value produced per launch call; holds everything the launcher
/// needs to spawn the process.
#[derive(Debug, Clone)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub env: Vec<(String, String)>,
}

impl LaunchCommand {
    /// Render the invocation as a single shell-style line for logging.
    pub fn to_shell_command(&self) -> String {
        let mut cmd = self.program.display().to_string();
        for arg in &self.args {
            cmd.push(' ');
            if arg.contains(' ') {
                cmd.push_str(&format!("'{arg}'"));
            } else {
                cmd.push_str(arg);
            }
        }
        cmd
    }
}
