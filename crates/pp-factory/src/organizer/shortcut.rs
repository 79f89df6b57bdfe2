use pp_core::PackError;
use std::path::{Path, PathBuf};
use tracing::info;

/// Puts a launcher for `artifact` on the user's desktop.
pub fn create_shortcut(artifact: &Path) -> Result<PathBuf, PackError> {
    let desktop = dirs::desktop_dir()
        .ok_or_else(|| PackError::Shortcut("desktop folder not found".into()))?;
    create_shortcut_in(artifact, &desktop)
}

/// Same as [`create_shortcut`] with an explicit target folder.
pub fn create_shortcut_in(artifact: &Path, desktop: &Path) -> Result<PathBuf, PackError> {
    if !artifact.is_file() && !artifact.is_dir() {
        return Err(PackError::Shortcut(format!(
            "{} does not exist",
            artifact.display()
        )));
    }
    let name = artifact
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| PackError::Shortcut(format!("{} has no name", artifact.display())))?;
    let artifact = std::path::absolute(artifact)?;

    let link = platform::write_link(&artifact, &name, desktop)?;
    info!(link = ?link, "shortcut created");
    Ok(link)
}

#[cfg(windows)]
mod platform {
    use super::*;
    use pp_core::background_command;
    use std::process::Stdio;

    fn quote(path: &Path) -> String {
        format!("'{}'", path.display().to_string().replace('\'', "''"))
    }

    pub fn write_link(artifact: &Path, name: &str, desktop: &Path) -> Result<PathBuf, PackError> {
        let link = desktop.join(format!("{}.lnk", name));
        let working_dir = artifact.parent().unwrap_or(artifact);
        let script = format!(
            "$s = (New-Object -ComObject WScript.Shell).CreateShortcut({}); \
             $s.TargetPath = {}; $s.WorkingDirectory = {}; $s.Save()",
            quote(&link),
            quote(artifact),
            quote(working_dir),
        );

        let output = background_command("powershell")
            .args(["-NoProfile", "-NonInteractive", "-Command", &script])
            .stdin(Stdio::null())
            .output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PackError::Shortcut(stderr.trim().to_string()));
        }
        Ok(link)
    }
}

#[cfg(target_os = "macos")]
mod platform {
    use super::*;

    pub fn write_link(artifact: &Path, name: &str, desktop: &Path) -> Result<PathBuf, PackError> {
        let link = desktop.join(name);
        if link.symlink_metadata().is_ok() {
            std::fs::remove_file(&link)?;
        }
        std::os::unix::fs::symlink(artifact, &link)?;
        Ok(link)
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
mod platform {
    use super::*;
    use std::{fs, os::unix::fs::PermissionsExt};

    pub fn write_link(artifact: &Path, name: &str, desktop: &Path) -> Result<PathBuf, PackError> {
        let link = desktop.join(format!("{}.desktop", name));
        let working_dir = artifact.parent().unwrap_or(artifact);
        let entry = format!(
            "[Desktop Entry]\n\
             Type=Application\n\
             Name={}\n\
             Exec=\"{}\"\n\
             Path={}\n\
             Terminal=false\n",
            name,
            artifact.display(),
            working_dir.display(),
        );

        fs::write(&link, entry)?;
        fs::set_permissions(&link, fs::Permissions::from_mode(0o755))?;
        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_artifact_is_rejected() {
        let desktop = tempfile::tempdir().unwrap();
        let err = create_shortcut_in(&desktop.path().join("ghost.exe"), desktop.path()).unwrap_err();
        assert!(matches!(err, PackError::Shortcut(_)));
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn desktop_entry_points_at_artifact() {
        use std::os::unix::fs::PermissionsExt;

        let out = tempfile::tempdir().unwrap();
        let desktop = tempfile::tempdir().unwrap();
        let artifact = out.path().join("app");
        std::fs::write(&artifact, b"bin").unwrap();

        let link = create_shortcut_in(&artifact, desktop.path()).unwrap();
        assert_eq!(link, desktop.path().join("app.desktop"));

        let entry = std::fs::read_to_string(&link).unwrap();
        assert!(entry.starts_with("[Desktop Entry]\n"));
        assert!(entry.contains("Name=app\n"));
        assert!(entry.contains(&format!("Exec=\"{}\"", artifact.display())));
        let mode = std::fs::metadata(&link).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
