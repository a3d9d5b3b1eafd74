use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ddlaunch::terminal::TerminalUi;
use ddlaunch_core::config::DEBUG_LOGGING_KEY;
use ddlaunch_core::config::ScopedSettings;
use ddlaunch_core::services::{
    JsonFileSettings, JsonStateStore, ManifestMetadataProvider, enumerate_workspace_folders,
};
use ddlaunch_core::{LaunchOutcome, LauncherContext, SelectionController};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Launches the DataDigger tool for OpenEdge projects in a workspace
#[derive(Parser)]
#[command(name = "ddlaunch")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug      Override the log level\n    DDLAUNCH_HOME       Extension root carrying the bundled DataDigger\n    DDLAUNCH_STATE_FILE Override the last-used-project state file")]
struct Cli {
    /// Workspace root to scan for projects (defaults to the current directory)
    #[arg(long = "workspace-root", global = true)]
    workspace_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start DataDigger, prompting when several projects qualify
    Launch {
        /// File or directory identifying the target project
        target: Option<PathBuf>,

        /// Wait for the tool to exit and report its outcome
        #[arg(short = 'w', long = "wait")]
        wait: bool,
    },
    /// List the projects resolved from the workspace
    List,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let workspace_root = match cli.workspace_root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let workspace_root = workspace_root
        .canonicalize()
        .with_context(|| format!("Failed to resolve workspace root {}", workspace_root.display()))?;

    let settings = Arc::new(JsonFileSettings::with_default_user_file(Some(
        workspace_root.clone(),
    )));
    let debug_logging = ScopedSettings::new(settings.as_ref(), None)
        .bool(DEBUG_LOGGING_KEY)
        .unwrap_or(false);
    let _logging = ddlaunch::logging::init(debug_logging);

    let folders = enumerate_workspace_folders(&workspace_root)
        .with_context(|| format!("No usable workspace at {}", workspace_root.display()))?;
    debug!("Workspace folders: {}", folders.len());

    let provider = Arc::new(ManifestMetadataProvider::new(settings.clone()));
    let ctx = LauncherContext::new(
        folders,
        extension_root()?,
        settings,
        provider,
        Arc::new(state_store()),
        Arc::new(TerminalUi),
    );

    match cli.command {
        Commands::Launch { target, wait } => launch_command(&ctx, target, wait).await,
        Commands::List => list_command(&ctx).await,
    }
}

async fn launch_command(ctx: &LauncherContext, target: Option<PathBuf>, wait: bool) -> Result<()> {
    let controller = SelectionController::new(ctx);
    let Some(task) = controller.run_launch(target.as_deref()).await? else {
        return Ok(());
    };

    if !wait {
        task.detach();
        return Ok(());
    }

    match task.outcome().await {
        LaunchOutcome::Success => {
            println!("DataDigger exited cleanly.");
            Ok(())
        }
        LaunchOutcome::SpawnFailed(reason) => {
            anyhow::bail!("DataDigger could not be started: {reason}")
        }
        LaunchOutcome::ExitedWithError { code, stderr, .. } => {
            if !stderr.is_empty() {
                eprintln!("{stderr}");
            }
            // stderr output with a zero exit code is still a failure
            std::process::exit(code.filter(|&c| c != 0).unwrap_or(1));
        }
    }
}

async fn list_command(ctx: &LauncherContext) -> Result<()> {
    let registry = ctx.registry();
    let projects = registry.projects().await?;

    if projects.is_empty() {
        println!("No DataDigger projects found in this workspace.");
        return Ok(());
    }

    println!("Found {} project(s):\n", projects.len());
    for (key, config) in projects {
        println!("  {key}");
        println!("     runtime: {} (OpenEdge {})", config.runtime_home.display(), config.oe_version);
        println!(
            "     tool:    {}{}",
            config.tool_path.display(),
            if config.tool_path_is_bundled {
                " (bundled)"
            } else {
                ""
            }
        );
        println!("     databases: {}", config.db_connections.len());
    }
    Ok(())
}

/// Extension root carrying `resources/DataDigger` and the wrapper
/// procedure: `DDLAUNCH_HOME` when set, else the executable's directory.
fn extension_root() -> Result<PathBuf> {
    if let Some(root) = std::env::var_os("DDLAUNCH_HOME") {
        return Ok(PathBuf::from(root));
    }
    let exe = std::env::current_exe().context("Failed to locate the ddlaunch executable")?;
    Ok(exe
        .parent()
        .map(|dir| dir.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".")))
}

fn state_store() -> JsonStateStore {
    match std::env::var_os("DDLAUNCH_STATE_FILE") {
        Some(path) => JsonStateStore::new(PathBuf::from(path)),
        None => JsonStateStore::with_default_file(),
    }
}
