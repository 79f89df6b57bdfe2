pub mod config;
pub mod error;
pub mod logging;
pub mod outcome;
pub mod tool;

pub use config::{BuildConfig, BuildFlags};
pub use error::{PackError, Result};
pub use outcome::BuildOutcome;
pub use tool::PackagerTool;

/// Names and sizes that make up the on-disk layout the packager and the
/// organizer agree on.
pub mod layout {
    /// Default `--distpath` of the packaging tool, relative to its working dir.
    pub const DEFAULT_DIST_DIR: &str = "dist";
    /// Transient working directory the packaging tool leaves behind.
    pub const BUILD_DIR: &str = "build";
    /// Extension of the generated build-specification file.
    pub const SPEC_EXTENSION: &str = "spec";
    /// Sub-folder of an organized project that receives the script copy.
    pub const SOURCE_DIR: &str = "source";

    pub const ICON_EXTENSION: &str = "ico";
    pub const CONVERTED_ICON_SUFFIX: &str = "_converted";
    /// Square frame sizes embedded in a normalized icon, largest first.
    pub const ICON_SIZES: [u32; 6] = [256, 128, 64, 48, 32, 16];

    /// Platform executable suffix (`.exe` on Windows, empty elsewhere).
    pub const EXE_SUFFIX: &str = std::env::consts::EXE_SUFFIX;
}

/// A `Command` for helper processes. On Windows the child gets no console
/// window of its own, so the GUI does not flash terminals.
pub fn background_command<S: AsRef<std::ffi::OsStr>>(program: S) -> std::process::Command {
    #[allow(unused_mut)]
    let mut cmd = std::process::Command::new(program);

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        use windows::Win32::System::Threading::CREATE_NO_WINDOW;
        cmd.creation_flags(CREATE_NO_WINDOW.0);
    }

    cmd
}
