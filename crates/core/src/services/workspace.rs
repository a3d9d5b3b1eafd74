//! Default workspace folder enumeration.

use crate::error::{Error, Result};
use crate::types::WorkspaceFolder;
use std::path::Path;

/// Workspace folders for a root directory: the root itself plus its
/// immediate, non-hidden subdirectories, sorted by path.
///
/// The manifest filter in the registry decides which of these are actual
/// projects; enumeration stays dumb on purpose.
pub fn enumerate_workspace_folders(root: &Path) -> Result<Vec<WorkspaceFolder>> {
    if !root.is_dir() {
        return Err(Error::NoWorkspace);
    }
    let mut folders = vec![WorkspaceFolder::new(root)];
    let mut children = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        children.push(path);
    }
    children.sort();
    folders.extend(children.into_iter().map(WorkspaceFolder::new));
    Ok(folders)
}
