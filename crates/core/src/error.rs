use std::io;
use std::path::PathBuf;

/// Errors that can occur during launcher operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No workspace is open")]
    NoWorkspace,

    #[error("Manifest error in {}: {message}", .path.display())]
    ManifestError { path: PathBuf, message: String },

    #[error("No OpenEdge runtime is configured for version '{0}'")]
    RuntimeNotConfigured(String),

    #[error("No runtime executable found under {}", .0.display())]
    RuntimeNotFound(PathBuf),

    #[error("Working directory {} is not available", .0.display())]
    WorkdirError(PathBuf),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("No configuration found for project '{0}'")]
    UnknownProject(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for launcher operations
pub type Result<T> = std::result::Result<T, Error>;
