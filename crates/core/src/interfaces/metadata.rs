//! Project metadata boundary.

use crate::error::Result;
use crate::types::{ProjectMetadata, WorkspaceFolder};
use async_trait::async_trait;

/// Supplies per-project data: project root, runtime home, declared database
/// connections and the manifest's extra parameters.
///
/// Stands in for the ABL extension the launcher depends on; an error from
/// this trait excludes the folder from the registry but never aborts the
/// overall build.
#[async_trait]
pub trait ProjectMetadataProvider: Send + Sync {
    async fn project_metadata(&self, folder: &WorkspaceFolder) -> Result<ProjectMetadata>;
}
