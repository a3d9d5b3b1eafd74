//! End-user project selection and launch orchestration.

use crate::command::LaunchCommandBuilder;
use crate::context::LauncherContext;
use crate::error::Result;
use crate::launcher::LaunchTask;
use crate::registry::ProjectMap;
use crate::types::{PickItem, ResolvedProjectConfig};
use std::path::Path;
use tracing::{debug, error, warn};

/// Drives the zero/one/many launch policy on top of a context.
pub struct SelectionController<'a> {
    ctx: &'a LauncherContext,
}

impl<'a> SelectionController<'a> {
    pub fn new(ctx: &'a LauncherContext) -> Self {
        Self { ctx }
    }

    /// Launch policy entry point.
    ///
    /// - no registered projects: warn and do nothing
    /// - exactly one: launch it directly
    /// - several, with an explicit path target: launch the project whose
    ///   root contains the target, or warn without falling back to the picker
    /// - several, no target: interactive pick, last-used project first
    ///
    /// Returns the launch task when a process was started, `None` when the
    /// flow ended without a launch (nothing to do, no match, cancellation).
    pub async fn run_launch(&self, explicit_target: Option<&Path>) -> Result<Option<LaunchTask>> {
        let registry = self.ctx.registry();
        let projects = registry.projects().await?;

        if projects.is_empty() {
            warn!("There are no DataDigger projects configured");
            self.ctx
                .ui()
                .notify_warn("There are no DataDigger projects configured in this workspace.");
            return Ok(None);
        }

        if projects.len() == 1 {
            if let Some(config) = projects.values().next() {
                return Ok(Some(self.start(config)?));
            }
        }

        if let Some(target) = explicit_target {
            return match find_project_for_path(projects, target) {
                Some(config) => Ok(Some(self.start(config)?)),
                None => {
                    warn!("No project matches '{}'", target.display());
                    self.ctx.ui().notify_warn(&format!(
                        "No OpenEdge project matches '{}'.",
                        target.display()
                    ));
                    Ok(None)
                }
            };
        }

        let last_used = self.ctx.state().last_used_project();
        let items = pick_items(projects, last_used.as_deref());
        let Some(label) = self.ctx.ui().pick_project(items).await else {
            debug!("Project pick cancelled");
            return Ok(None);
        };
        let Some(config) = projects.get(&label) else {
            error!("Configuration for project '{label}' is not found");
            self.ctx
                .ui()
                .notify_error(&format!("Configuration for project '{label}' is not found."));
            return Ok(None);
        };
        Ok(Some(self.start(config)?))
    }

    /// Build the command, hand it to the launcher and remember the project.
    /// Assembly failures are surfaced here so every caller reports them the
    /// same way.
    fn start(&self, config: &ResolvedProjectConfig) -> Result<LaunchTask> {
        let builder = LaunchCommandBuilder::new(self.ctx.extension_root());
        let command = match builder.build(config) {
            Ok(command) => command,
            Err(err) => {
                error!(
                    "Cannot launch DataDigger for project '{}': {err}",
                    config.project_key
                );
                self.ctx.ui().notify_error(&format!(
                    "Cannot launch DataDigger for project '{}': {err}",
                    config.project_key
                ));
                return Err(err);
            }
        };
        let task = self.ctx.launcher().launch(&config.project_key, command);
        self.ctx.state().set_last_used_project(&config.project_key);
        Ok(task)
    }
}

/// The project whose root contains `target`; the longest root wins so
/// nested projects resolve to the most specific one.
fn find_project_for_path<'a>(
    projects: &'a ProjectMap,
    target: &Path,
) -> Option<&'a ResolvedProjectConfig> {
    projects
        .values()
        .filter(|config| target.starts_with(&config.project_dir))
        .max_by_key(|config| config.project_dir.components().count())
}

/// Picker entries in presentation order: alphabetical (the map's iteration
/// order), with the last-used project lifted to the front and annotated.
fn pick_items(projects: &ProjectMap, last_used: Option<&str>) -> Vec<PickItem> {
    let mut items: Vec<PickItem> = projects
        .values()
        .map(|config| PickItem {
            label: config.display_name.clone(),
            description: describe(config, last_used),
        })
        .collect();
    if let Some(last) = last_used {
        items.sort_by_key(|item| item.label != last);
    }
    items
}

/// A custom install shows up relative to the project root; the bundled copy
/// shows nothing.
fn describe(config: &ResolvedProjectConfig, last_used: Option<&str>) -> String {
    let mut description = if config.tool_path_is_bundled {
        String::new()
    } else {
        config
            .tool_path
            .strip_prefix(&config.project_dir)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| config.tool_path.display().to_string())
    };
    if last_used == Some(config.project_key.as_str()) {
        if description.is_empty() {
            description.push_str("(last used)");
        } else {
            description.push_str(" (last used)");
        }
    }
    description
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(key: &str, dir: &str, tool: &str, bundled: bool) -> ResolvedProjectConfig {
        ResolvedProjectConfig {
            project_key: key.to_string(),
            display_name: key.to_string(),
            project_dir: PathBuf::from(dir),
            runtime_home: PathBuf::from("/opt/dlc"),
            oe_version: "12.8".into(),
            db_connections: vec!["-db sports2020".into()],
            tool_path: PathBuf::from(tool),
            tool_path_is_bundled: bundled,
            project_parameters: None,
            extra_parameters: None,
        }
    }

    fn two_projects() -> ProjectMap {
        let mut map = ProjectMap::new();
        map.insert(
            "alpha".into(),
            config("alpha", "/ws/alpha", "/ws/alpha/tools/DataDigger", false),
        );
        map.insert("beta".into(), config("beta", "/ws/beta", "/ext/resources/DataDigger", true));
        map
    }

    #[test]
    fn last_used_project_is_listed_first() {
        let items = pick_items(&two_projects(), Some("beta"));
        assert_eq!(items[0].label, "beta");
        assert_eq!(items[0].description, "(last used)");
        assert_eq!(items[1].label, "alpha");
        assert_eq!(items[1].description, "tools/DataDigger");
    }

    #[test]
    fn without_a_last_used_project_the_order_is_alphabetical() {
        let items = pick_items(&two_projects(), None);
        assert_eq!(items[0].label, "alpha");
        assert_eq!(items[1].label, "beta");
        assert_eq!(items[1].description, "");
    }

    #[test]
    fn custom_installs_annotate_with_the_relative_path() {
        let items = pick_items(&two_projects(), Some("alpha"));
        assert_eq!(items[0].description, "tools/DataDigger (last used)");
    }

    #[test]
    fn target_paths_match_by_project_root_prefix() {
        let projects = two_projects();
        let hit = find_project_for_path(&projects, Path::new("/ws/beta/src/start.p")).unwrap();
        assert_eq!(hit.project_key, "beta");
        assert!(find_project_for_path(&projects, Path::new("/elsewhere/file.p")).is_none());
    }

    #[test]
    fn nested_projects_resolve_to_the_most_specific_root() {
        let mut projects = two_projects();
        projects.insert(
            "alpha-sub".into(),
            config("alpha-sub", "/ws/alpha/sub", "/tools/DataDigger", false),
        );
        let hit = find_project_for_path(&projects, Path::new("/ws/alpha/sub/src/x.p")).unwrap();
        assert_eq!(hit.project_key, "alpha-sub");
    }
}
