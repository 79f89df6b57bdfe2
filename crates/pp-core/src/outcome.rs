use std::fmt;
use std::path::{Path, PathBuf};

/// Terminal result of one build. Produced exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Success { artifact_path: PathBuf },
    Failure { message: String },
    Cancelled,
}

impl BuildOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        BuildOutcome::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Success { .. })
    }

    pub fn artifact_path(&self) -> Option<&Path> {
        match self {
            BuildOutcome::Success { artifact_path } => Some(artifact_path),
            _ => None,
        }
    }
}

impl fmt::Display for BuildOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildOutcome::Success { artifact_path } => {
                write!(f, "Build succeeded: {}", artifact_path.display())
            }
            BuildOutcome::Failure { message } => write!(f, "Build failed: {}", message),
            BuildOutcome::Cancelled => write!(f, "Build cancelled"),
        }
    }
}
