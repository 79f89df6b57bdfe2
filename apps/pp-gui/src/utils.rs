use crate::theme;
use eframe::egui::Color32;
use pp_core::BuildConfig;
use std::path::Path;

/// Severity of the one-line status shown above the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Idle,
    Busy,
    Success,
    Warning,
    Error,
}

impl StatusKind {
    pub fn color(self, weak: Color32) -> Color32 {
        match self {
            StatusKind::Idle => weak,
            StatusKind::Busy => theme::ACCENT,
            StatusKind::Success => theme::SUCCESS,
            StatusKind::Warning => theme::WARNING,
            StatusKind::Error => theme::DANGER,
        }
    }
}

/// Log block appended once a build and its post-build steps are done.
pub fn summary_lines(config: &BuildConfig, final_path: &Path) -> Vec<String> {
    let rule = "=".repeat(50);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        "✅ BUILD COMPLETE".into(),
        format!("Executable: {}", final_path.display()),
    ];
    if let Some(folder) = final_path.parent() {
        lines.push(format!("Folder:     {}", folder.display()));
    }
    lines.push(format!("Script:     {}", config.script_path.display()));
    lines.push(rule);
    lines
}

/// Log header written before the packager starts.
pub fn header_lines(config: &BuildConfig) -> Vec<String> {
    let rule = "-".repeat(50);
    vec![
        rule.clone(),
        format!("Building {}", config.artifact_name()),
        format!("Script: {}", config.script_path.display()),
        format!("Output: {}", config.dist_dir().display()),
        rule,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_names_executable_and_folder() {
        let config = BuildConfig::for_script("/src/app.py");
        let lines = summary_lines(&config, Path::new("/out/app/app.exe"));
        assert!(lines.iter().any(|l| l.ends_with("/out/app/app.exe")));
        assert!(lines.iter().any(|l| l.starts_with("Folder:") && l.ends_with("/out/app")));
    }
}
