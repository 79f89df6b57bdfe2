use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong before or around a build.
///
/// Failures of a running build are not errors: they travel inside
/// [`crate::BuildOutcome::Failure`]. Organizer problems are warnings and
/// never surface as a `PackError` either.
#[derive(Debug, Error)]
pub enum PackError {
    /// The script path is empty or does not point at a file.
    #[error("Invalid script: {0}")]
    Validation(String),

    /// The packaging tool could not be run.
    #[error("{tool} is not available: {reason}")]
    DependencyMissing { tool: String, reason: String },

    /// The icon could not be turned into an `.ico` file.
    #[error("Icon conversion failed for {path:?}: {reason}")]
    Conversion { path: PathBuf, reason: String },

    #[error("A build is already running")]
    BuildInProgress,

    /// The tool reported success but no executable is where it should be.
    #[error("Build finished but no executable was found at {0:?}")]
    ArtifactNotFound(PathBuf),

    #[error("Shortcut creation failed: {0}")]
    Shortcut(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PackError {
    pub fn conversion(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        PackError::Conversion {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = PackError> = std::result::Result<T, E>;
