use crate::error::{PackError, Result};
use crate::layout;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Boolean switches forwarded to the packaging tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildFlags {
    pub single_file: bool,        // --onefile
    pub hide_console: bool,       // --windowed
    pub clean_before_build: bool, // --clean
}

impl Default for BuildFlags {
    fn default() -> Self {
        Self {
            single_file: true,
            hide_console: true,
            clean_before_build: true,
        }
    }
}

/// One build request. Built fresh for every run and never mutated once it
/// has been handed to the supervisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub script_path: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub exe_name: Option<String>,
    pub icon_path: Option<PathBuf>,
    pub flags: BuildFlags,
}

impl BuildConfig {
    /// A bare config: only the script, default flags.
    pub fn new(script_path: impl Into<PathBuf>) -> Self {
        Self {
            script_path: script_path.into(),
            output_dir: None,
            exe_name: None,
            icon_path: None,
            flags: BuildFlags::default(),
        }
    }

    /// Same auto-fill the form does when a script is picked: output next to
    /// the script, executable named after it.
    pub fn for_script(script_path: impl Into<PathBuf>) -> Self {
        let mut config = Self::new(script_path);
        config.output_dir = Some(config.script_dir());
        config.exe_name = Some(config.script_stem());
        config
    }

    pub fn validate(&self) -> Result<()> {
        if self.script_path.as_os_str().is_empty() {
            return Err(PackError::Validation("no script selected".into()));
        }
        if !self.script_path.is_file() {
            debug!(script = ?self.script_path, "script missing");
            return Err(PackError::Validation(format!(
                "{:?} is not an existing file",
                self.script_path
            )));
        }
        debug!(
            script = ?self.script_path,
            name = %self.artifact_name(),
            dist = ?self.dist_dir(),
            flags = ?self.flags,
            "build config accepted"
        );
        Ok(())
    }

    /// `exe_name` if set and non-empty.
    pub fn exe_name(&self) -> Option<&str> {
        self.exe_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// `output_dir` if set and non-empty.
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
    }

    /// `icon_path` if set and non-empty.
    pub fn icon_path(&self) -> Option<&Path> {
        self.icon_path
            .as_deref()
            .filter(|icon| !icon.as_os_str().is_empty())
    }

    pub fn script_stem(&self) -> String {
        self.script_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Directory holding the script; `.` for a bare file name.
    pub fn script_dir(&self) -> PathBuf {
        match self.script_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Base name of the produced executable (without platform suffix).
    pub fn artifact_name(&self) -> String {
        self.exe_name()
            .map(str::to_string)
            .unwrap_or_else(|| self.script_stem())
    }

    /// Where the packaging tool drops its output.
    pub fn dist_dir(&self) -> PathBuf {
        self.output_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(layout::DEFAULT_DIST_DIR))
    }

    /// Root the organizer restructures into: the output folder, or the
    /// script's folder when none was given.
    pub fn project_root(&self) -> PathBuf {
        self.output_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.script_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_script_fills_output_and_name() {
        let config = BuildConfig::for_script("/work/tools/app.py");
        assert_eq!(config.output_dir(), Some(Path::new("/work/tools")));
        assert_eq!(config.exe_name(), Some("app"));
        assert_eq!(config.flags, BuildFlags::default());
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let mut config = BuildConfig::new("/work/app.py");
        config.exe_name = Some("  ".into());
        config.output_dir = Some(PathBuf::new());
        config.icon_path = Some(PathBuf::new());

        assert_eq!(config.exe_name(), None);
        assert_eq!(config.output_dir(), None);
        assert_eq!(config.icon_path(), None);
        assert_eq!(config.artifact_name(), "app");
        assert_eq!(config.dist_dir(), PathBuf::from("dist"));
        assert_eq!(config.project_root(), PathBuf::from("/work"));
    }

    #[test]
    fn bare_file_name_resolves_to_current_dir() {
        let config = BuildConfig::new("app.py");
        assert_eq!(config.script_dir(), PathBuf::from("."));
    }

    #[test]
    fn validate_rejects_missing_and_empty_scripts() {
        let err = BuildConfig::new("").validate().unwrap_err();
        assert!(matches!(err, PackError::Validation(_)));

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.py");
        assert!(BuildConfig::new(&missing).validate().is_err());

        // A directory is not a script either.
        assert!(BuildConfig::new(dir.path()).validate().is_err());

        let script = dir.path().join("app.py");
        std::fs::write(&script, "print('hi')").unwrap();
        assert!(BuildConfig::new(&script).validate().is_ok());
    }
}
