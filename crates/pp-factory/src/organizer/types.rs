use std::fmt;
use std::path::PathBuf;

/// Which best-effort steps run after a successful build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostBuildOptions {
    pub organize: bool,
    pub shortcut: bool,
    pub open_folder: bool,
}

impl Default for PostBuildOptions {
    fn default() -> Self {
        Self {
            organize: true,
            shortcut: true,
            open_folder: true,
        }
    }
}

/// Progress of the post-build steps. `Warning` is the only failure a
/// caller ever sees from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostBuildStatus {
    Moved(PathBuf),     // New artifact location
    Copied(PathBuf),    // Script copy
    Removed(PathBuf),   // Leftover build dir or spec file
    Organized(PathBuf), // Project folder
    ShortcutCreated(PathBuf),
    OpenedFolder(PathBuf),
    Warning(String),
}

impl fmt::Display for PostBuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostBuildStatus::Moved(p) => write!(f, "📦 Executable moved to: {}", p.display()),
            PostBuildStatus::Copied(p) => write!(f, "📁 Script copied to: {}", p.display()),
            PostBuildStatus::Removed(p) => write!(f, "🗑️ Removed: {}", p.display()),
            PostBuildStatus::Organized(p) => write!(f, "✅ Project organized in: {}", p.display()),
            PostBuildStatus::ShortcutCreated(p) => {
                write!(f, "🔗 Desktop shortcut created: {}", p.display())
            }
            PostBuildStatus::OpenedFolder(p) => write!(f, "📂 Opened: {}", p.display()),
            PostBuildStatus::Warning(msg) => write!(f, "⚠️ {}", msg),
        }
    }
}
