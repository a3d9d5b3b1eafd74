//! Builds the `prowin` invocation for a resolved project.

use super::{LaunchCommand, args};
use crate::config::TOOL_PARAMETER_FILE;
use crate::error::{Error, Result};
use crate::types::ResolvedProjectConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Runtime executable candidates under `<runtime_home>/bin`, probed in
/// order. Older 32-bit installations only ship the second one.
pub const RUNTIME_EXECUTABLES: [&str; 2] = ["prowin.exe", "prowin32.exe"];

/// Startup procedure handed to the runtime, relative to the extension root.
pub const WRAPPER_PROCEDURE: &str = "resources/ddwrapper.p";

/// Environment variable carrying the resolved tool path into the process.
pub const TOOL_HOME_ENV: &str = "DATADIGGER_HOME";

/// Environment variable carrying the scoped working directory.
pub const TOOL_WORKDIR_ENV: &str = "DATADIGGER_WORKDIR";

/// Assembles [`LaunchCommand`]s from resolved project configurations.
///
/// The data root and temp directory default to the platform locations and
/// are overridable for tests.
pub struct LaunchCommandBuilder<'a> {
    extension_root: &'a Path,
    local_data_root: PathBuf,
    temp_dir: PathBuf,
}

impl<'a> LaunchCommandBuilder<'a> {
    pub fn new(extension_root: &'a Path) -> Self {
        Self {
            extension_root,
            local_data_root: dirs::data_local_dir().unwrap_or_else(std::env::temp_dir),
            temp_dir: std::env::temp_dir(),
        }
    }

    pub fn with_local_data_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.local_data_root = root.into();
        self
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    pub fn build(&self, config: &ResolvedProjectConfig) -> Result<LaunchCommand> {
        let program = self.runtime_executable(config)?;
        let working_dir = self.working_dir(config)?;
        let args = self.argument_list(config);
        let env = vec![
            (
                TOOL_HOME_ENV.to_string(),
                config.tool_path.display().to_string(),
            ),
            (
                TOOL_WORKDIR_ENV.to_string(),
                working_dir.display().to_string(),
            ),
        ];
        Ok(LaunchCommand {
            program,
            args,
            working_dir,
            env,
        })
    }

    fn runtime_executable(&self, config: &ResolvedProjectConfig) -> Result<PathBuf> {
        let bin = config.runtime_home.join("bin");
        for candidate in RUNTIME_EXECUTABLES {
            let path = bin.join(candidate);
            if path.is_file() {
                debug!("Runtime executable: {}", path.display());
                return Ok(path);
            }
        }
        Err(Error::RuntimeNotFound(bin))
    }

    /// Custom installs run inside their own directory; the bundled copy gets
    /// a per-project directory under the local application-data root.
    fn working_dir(&self, config: &ResolvedProjectConfig) -> Result<PathBuf> {
        let dir = if config.tool_path_is_bundled {
            let dir = self
                .local_data_root
                .join("DataDigger")
                .join(&config.project_key);
            if let Err(err) = std::fs::create_dir_all(&dir) {
                warn!("Could not create working directory {}: {err}", dir.display());
            }
            dir
        } else {
            config.tool_path.clone()
        };
        if !dir.is_dir() {
            return Err(Error::WorkdirError(dir));
        }
        Ok(dir)
    }

    fn argument_list(&self, config: &ResolvedProjectConfig) -> Vec<String> {
        // DataDigger.pf goes first so every later argument can override it.
        let mut list = vec![
            "-pf".to_string(),
            config
                .tool_path
                .join(TOOL_PARAMETER_FILE)
                .display()
                .to_string(),
        ];
        for connection in &config.db_connections {
            list.extend(connection.split_whitespace().map(str::to_string));
        }
        list.push("-nosplash".to_string());
        list.push("-param".to_string());
        list.push(config.project_key.clone());
        list.push("-T".to_string());
        list.push(self.temp_dir.display().to_string());
        if let Some(parameters) = &config.project_parameters {
            list.extend(args::tokenize(parameters));
        }
        if let Some(parameters) = &config.extra_parameters {
            list.extend(args::tokenize(parameters));
        }
        list.push("-p".to_string());
        list.push(
            self.extension_root
                .join(WRAPPER_PROCEDURE)
                .display()
                .to_string(),
        );
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_with(runtime_home: &Path, tool_path: &Path, bundled: bool) -> ResolvedProjectConfig {
        ResolvedProjectConfig {
            project_key: "app".into(),
            display_name: "app".into(),
            project_dir: PathBuf::from("/ws/app"),
            runtime_home: runtime_home.to_path_buf(),
            oe_version: "12.8".into(),
            db_connections: vec![
                "-db sports2020 -H localhost -S 20000".into(),
                "-db agent".into(),
            ],
            tool_path: tool_path.to_path_buf(),
            tool_path_is_bundled: bundled,
            project_parameters: Some(r#"-ini "my config.ini""#.into()),
            extra_parameters: Some("-debugalert".into()),
        }
    }

    fn make_runtime(dir: &Path, executable: &str) {
        let bin = dir.join("bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join(executable), "").unwrap();
    }

    #[test]
    fn assembles_the_argument_list_in_launch_order() {
        let runtime = TempDir::new().unwrap();
        make_runtime(runtime.path(), "prowin.exe");
        let tool = TempDir::new().unwrap();
        let extension = TempDir::new().unwrap();

        let command = LaunchCommandBuilder::new(extension.path())
            .with_temp_dir("/tmp/dd")
            .build(&config_with(runtime.path(), tool.path(), false))
            .unwrap();

        let pf = tool.path().join(TOOL_PARAMETER_FILE).display().to_string();
        let wrapper = extension
            .path()
            .join(WRAPPER_PROCEDURE)
            .display()
            .to_string();
        assert_eq!(command.args, vec![
            "-pf".to_string(),
            pf,
            "-db".into(),
            "sports2020".into(),
            "-H".into(),
            "localhost".into(),
            "-S".into(),
            "20000".into(),
            "-db".into(),
            "agent".into(),
            "-nosplash".into(),
            "-param".into(),
            "app".into(),
            "-T".into(),
            "/tmp/dd".into(),
            "-ini".into(),
            "my config.ini".into(),
            "-debugalert".into(),
            "-p".into(),
            wrapper,
        ]);
        assert_eq!(command.program, runtime.path().join("bin/prowin.exe"));
        // custom install runs inside its own directory
        assert_eq!(command.working_dir, tool.path());
    }

    #[test]
    fn falls_back_to_the_secondary_executable() {
        let runtime = TempDir::new().unwrap();
        make_runtime(runtime.path(), "prowin32.exe");
        let tool = TempDir::new().unwrap();
        let extension = TempDir::new().unwrap();

        let command = LaunchCommandBuilder::new(extension.path())
            .build(&config_with(runtime.path(), tool.path(), false))
            .unwrap();
        assert_eq!(command.program, runtime.path().join("bin/prowin32.exe"));
    }

    #[test]
    fn missing_runtime_executables_abort_the_launch() {
        let runtime = TempDir::new().unwrap();
        fs::create_dir_all(runtime.path().join("bin")).unwrap();
        let tool = TempDir::new().unwrap();
        let extension = TempDir::new().unwrap();

        let err = LaunchCommandBuilder::new(extension.path())
            .build(&config_with(runtime.path(), tool.path(), false))
            .unwrap_err();
        assert!(matches!(err, Error::RuntimeNotFound(_)));
    }

    #[test]
    fn bundled_installs_get_a_created_per_project_working_dir() {
        let runtime = TempDir::new().unwrap();
        make_runtime(runtime.path(), "prowin.exe");
        let tool = TempDir::new().unwrap();
        let extension = TempDir::new().unwrap();
        let data_root = TempDir::new().unwrap();

        let command = LaunchCommandBuilder::new(extension.path())
            .with_local_data_root(data_root.path())
            .build(&config_with(runtime.path(), tool.path(), true))
            .unwrap();

        let expected = data_root.path().join("DataDigger").join("app");
        assert_eq!(command.working_dir, expected);
        assert!(expected.is_dir());
    }

    #[test]
    fn env_names_the_tool_path_and_working_dir() {
        let runtime = TempDir::new().unwrap();
        make_runtime(runtime.path(), "prowin.exe");
        let tool = TempDir::new().unwrap();
        let extension = TempDir::new().unwrap();

        let command = LaunchCommandBuilder::new(extension.path())
            .build(&config_with(runtime.path(), tool.path(), false))
            .unwrap();
        assert_eq!(command.env, vec![
            (
                TOOL_HOME_ENV.to_string(),
                tool.path().display().to_string()
            ),
            (
                TOOL_WORKDIR_ENV.to_string(),
                tool.path().display().to_string()
            ),
        ]);
    }
}
