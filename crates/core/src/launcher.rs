//! Detached spawning of the assembled tool command.
//!
//! The spawned process is not supervised: once the child is running, the
//! launcher only drains its output streams and reports the final status.
//! Dropping the returned task detaches completely without affecting the
//! child.

use crate::command::LaunchCommand;
use crate::interfaces::UserInteraction;
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Final status of one launch attempt.
#[derive(Debug)]
pub enum LaunchOutcome {
    /// Exit code 0 with no stderr output.
    Success,
    /// The executable could not be started at all.
    SpawnFailed(String),
    /// The process ran but exited non-zero or wrote to stderr.
    ExitedWithError {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

impl LaunchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LaunchOutcome::Success)
    }
}

/// Handle on a launch in flight.
///
/// Awaiting it yields the [`LaunchOutcome`]; dropping it leaves the child
/// running and unobserved.
pub struct LaunchTask {
    handle: JoinHandle<LaunchOutcome>,
}

impl LaunchTask {
    pub async fn outcome(self) -> LaunchOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(err) => LaunchOutcome::SpawnFailed(format!("launch task failed: {err}")),
        }
    }

    pub fn detach(self) {}
}

/// Spawns launch commands and reports their outcomes through the UI.
pub struct ProcessLauncher {
    ui: Arc<dyn UserInteraction>,
}

impl ProcessLauncher {
    pub fn new(ui: Arc<dyn UserInteraction>) -> Self {
        Self { ui }
    }

    /// Initiate the launch and return immediately; spawn and stream-drain
    /// outcomes are observed by the returned task.
    pub fn launch(&self, project_key: &str, command: LaunchCommand) -> LaunchTask {
        info!("Starting DataDigger for project '{project_key}'");
        debug!("Command: {}", command.to_shell_command());
        debug!("Working directory: {}", command.working_dir.display());

        let ui = Arc::clone(&self.ui);
        let project_key = project_key.to_string();
        let handle = tokio::spawn(run_to_completion(project_key, command, ui));
        LaunchTask { handle }
    }
}

async fn run_to_completion(
    project_key: String,
    command: LaunchCommand,
    ui: Arc<dyn UserInteraction>,
) -> LaunchOutcome {
    let mut child = match tokio::process::Command::new(&command.program)
        .args(&command.args)
        .current_dir(&command.working_dir)
        .envs(command.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(false)
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            error!("Failed to start '{}': {err}", command.program.display());
            ui.notify_error(&format!(
                "Could not start DataDigger for project '{project_key}': {err}"
            ));
            return LaunchOutcome::SpawnFailed(err.to_string());
        }
    };

    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();
    let (status, stdout, stderr) = tokio::join!(
        child.wait(),
        drain(stdout_pipe),
        drain(stderr_pipe)
    );

    let status = match status {
        Ok(status) => status,
        Err(err) => {
            error!("Lost track of DataDigger for project '{project_key}': {err}");
            return LaunchOutcome::SpawnFailed(err.to_string());
        }
    };

    if status.success() && stderr.is_empty() {
        debug!("DataDigger for project '{project_key}' exited cleanly");
        return LaunchOutcome::Success;
    }

    error!(
        "DataDigger for project '{project_key}' exited with {:?}",
        status.code()
    );
    if !stdout.is_empty() {
        warn!("Captured stdout: {stdout}");
    }
    if !stderr.is_empty() {
        error!("Captured stderr: {stderr}");
    }
    ui.notify_error(&format!(
        "DataDigger for project '{project_key}' reported a failure. See the log for details."
    ));
    LaunchOutcome::ExitedWithError {
        code: status.code(),
        stdout,
        stderr,
    }
}

async fn drain<R>(stream: Option<R>) -> String
where
    R: tokio::io::AsyncRead + Unpin,
{
    let Some(mut stream) = stream else {
        return String::new();
    };
    let mut buffer = Vec::new();
    if let Err(err) = stream.read_to_end(&mut buffer).await {
        warn!("Could not read process output: {err}");
    }
    String::from_utf8_lossy(&buffer).trim().to_string()
}
