//! Launch configuration assembly.

use super::resolver::ResolvedToolPath;
use super::settings::{EXTRA_PARAMETERS_KEY, INCLUDE_PROJECT_PARAMETERS_KEY, ScopedSettings};
use crate::interfaces::SettingsProvider;
use crate::types::{ProjectMetadata, ResolvedProjectConfig};

/// Combines provider metadata, the resolved tool path and the parameter
/// settings into one launch-ready configuration per project.
pub struct LaunchConfigBuilder<'a> {
    settings: &'a dyn SettingsProvider,
}

impl<'a> LaunchConfigBuilder<'a> {
    pub fn new(settings: &'a dyn SettingsProvider) -> Self {
        Self { settings }
    }

    /// Both parameter strings are opaque here; they are tokenized only when
    /// the launch command is assembled.
    pub fn build(
        &self,
        project_key: &str,
        metadata: &ProjectMetadata,
        tool: ResolvedToolPath,
    ) -> ResolvedProjectConfig {
        let scoped = ScopedSettings::new(self.settings, Some(&metadata.project_root));

        let include_project_parameters = scoped
            .bool(INCLUDE_PROJECT_PARAMETERS_KEY)
            .unwrap_or(false);
        let project_parameters = if include_project_parameters
            && !metadata.extra_parameters.trim().is_empty()
        {
            Some(metadata.extra_parameters.clone())
        } else {
            None
        };

        ResolvedProjectConfig {
            project_key: project_key.to_string(),
            display_name: project_key.to_string(),
            project_dir: metadata.project_root.clone(),
            runtime_home: metadata.runtime_home.clone(),
            oe_version: metadata.oe_version.clone(),
            db_connections: metadata.db_connections.clone(),
            tool_path: tool.path,
            tool_path_is_bundled: tool.bundled,
            project_parameters,
            extra_parameters: scoped.string(EXTRA_PARAMETERS_KEY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::SettingsScope;
    use serde_json::Value;
    use std::collections::HashMap;
    use std::path::PathBuf;

    struct MapSettings(HashMap<String, Value>);

    impl SettingsProvider for MapSettings {
        fn get(&self, _scope: SettingsScope<'_>, key: &str) -> Option<Value> {
            self.0.get(key).cloned()
        }
    }

    fn metadata() -> ProjectMetadata {
        ProjectMetadata {
            project_root: PathBuf::from("/ws/app"),
            runtime_home: PathBuf::from("/opt/dlc"),
            oe_version: "12.8".into(),
            db_connections: vec!["-db sports2020".into()],
            extra_parameters: "-s 128".into(),
        }
    }

    fn tool() -> ResolvedToolPath {
        ResolvedToolPath {
            path: PathBuf::from("/tools/DataDigger"),
            bundled: false,
        }
    }

    #[test]
    fn project_parameters_require_the_include_flag() {
        let builder_settings = MapSettings(HashMap::new());
        let config = LaunchConfigBuilder::new(&builder_settings).build("app", &metadata(), tool());
        assert_eq!(config.project_parameters, None);

        let mut map = HashMap::new();
        map.insert(
            INCLUDE_PROJECT_PARAMETERS_KEY.to_string(),
            Value::Bool(true),
        );
        let builder_settings = MapSettings(map);
        let config = LaunchConfigBuilder::new(&builder_settings).build("app", &metadata(), tool());
        assert_eq!(config.project_parameters.as_deref(), Some("-s 128"));
    }

    #[test]
    fn extra_parameters_are_copied_when_present() {
        let mut map = HashMap::new();
        map.insert(
            EXTRA_PARAMETERS_KEY.to_string(),
            Value::from("-basekey ini"),
        );
        let builder_settings = MapSettings(map);
        let config = LaunchConfigBuilder::new(&builder_settings).build("app", &metadata(), tool());
        assert_eq!(config.extra_parameters.as_deref(), Some("-basekey ini"));
        assert_eq!(config.project_key, "app");
        assert_eq!(config.tool_path, PathBuf::from("/tools/DataDigger"));
    }
}
