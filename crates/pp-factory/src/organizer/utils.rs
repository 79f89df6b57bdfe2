use pp_core::background_command;
use std::{
    fs, io,
    path::{Path, PathBuf},
    process::Stdio,
};

/// Compares two paths after making them absolute. Neither has to exist.
pub fn same_path(a: &Path, b: &Path) -> bool {
    absolute(a) == absolute(b)
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Renames `from` to `to`, falling back to copy + delete for files when a
/// plain rename is refused (e.g. across devices).
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    let rename_err = match fs::rename(from, to) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };

    if !from.is_file() || to.is_dir() {
        return Err(rename_err);
    }
    fs::copy(from, to)?;
    fs::remove_file(from)
}

/// Deletes a file or a whole directory tree. `Ok(false)` if nothing was there.
pub fn remove_path(path: &Path) -> io::Result<bool> {
    if path.is_dir() {
        fs::remove_dir_all(path)?;
        Ok(true)
    } else if path.exists() {
        fs::remove_file(path)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Shows `dir` in the platform file manager without waiting for it.
pub fn open_folder(dir: &Path) -> io::Result<()> {
    let program = if cfg!(windows) {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    background_command(program)
        .arg(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_path_sees_through_relative_forms() {
        let cwd = std::env::current_dir().unwrap();
        assert!(same_path(Path::new("a/b.txt"), &cwd.join("a/b.txt")));
        assert!(!same_path(Path::new("a/b.txt"), Path::new("a/c.txt")));
    }

    #[test]
    fn move_file_relocates_content() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("app.bin");
        let to = dir.path().join("nested").join("app.bin");
        fs::write(&from, b"payload").unwrap();
        fs::create_dir_all(to.parent().unwrap()).unwrap();

        move_file(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(fs::read(&to).unwrap(), b"payload");
    }

    #[test]
    fn remove_path_handles_files_dirs_and_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("x.spec");
        let tree = dir.path().join("build").join("deep");
        fs::write(&file, b"").unwrap();
        fs::create_dir_all(&tree).unwrap();

        assert!(remove_path(&file).unwrap());
        assert!(remove_path(&dir.path().join("build")).unwrap());
        assert!(!remove_path(&dir.path().join("build")).unwrap());
        assert!(!file.exists());
    }
}
