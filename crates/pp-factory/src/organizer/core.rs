use super::shortcut::create_shortcut;
use super::types::{PostBuildOptions, PostBuildStatus};
use super::utils::{move_file, open_folder, remove_path, same_path};
use pp_core::{layout, BuildConfig};
use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

/// Extension given to an executable while its own name is turned into the
/// project folder.
const STAGING_EXTENSION: &str = "organizing";

/// Restructures a fresh build into `output_dir/{name}/` with the script
/// copied to `source/`, and clears the packager's leftovers.
///
/// Never fails: problems are logged and the best-known artifact path is
/// returned. Leftovers are looked up in the current working directory.
pub fn organize(artifact: &Path, script: &Path, output_dir: &Path) -> PathBuf {
    let work_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    organize_in(artifact, script, output_dir, &work_dir, |_| {})
}

/// [`organize`] with an explicit packager working directory and progress
/// reporting. Every step runs even if an earlier one failed.
pub fn organize_in<F>(
    artifact: &Path,
    script: &Path,
    output_dir: &Path,
    work_dir: &Path,
    mut callback: F,
) -> PathBuf
where
    F: FnMut(PostBuildStatus),
{
    let (Some(file_name), Some(stem)) = (artifact.file_name(), artifact.file_stem()) else {
        report_warning(&mut callback, "Cannot organize", artifact.display());
        return artifact.to_path_buf();
    };
    let base = stem.to_string_lossy().into_owned();
    let project = output_dir.join(&base);
    let source_dir = project.join(layout::SOURCE_DIR);
    let mut source = artifact.to_path_buf();
    let mut best = artifact.to_path_buf();

    // 0. A suffix-less executable sits exactly where the project folder goes
    if artifact.is_file() && same_path(artifact, &project) {
        let staged = project.with_extension(STAGING_EXTENSION);
        match fs::rename(artifact, &staged) {
            Ok(()) => {
                debug!(staged = ?staged, "artifact moved aside for project folder");
                source = staged.clone();
                best = staged;
            }
            Err(e) => report_warning(&mut callback, "Could not make room for project folder", e),
        }
    }

    // 1. Project + source folders
    if let Err(e) = fs::create_dir_all(&source_dir) {
        report_warning(&mut callback, "Could not create project folder", e);
    }

    // 2. Executable into the project folder
    let target = project.join(file_name);
    if same_path(&source, &target) {
        best = target;
    } else if source.exists() {
        match move_file(&source, &target) {
            Ok(()) => {
                best = target.clone();
                callback(PostBuildStatus::Moved(target));
            }
            Err(e) => report_warning(&mut callback, "Could not move executable", e),
        }
    } else if target.exists() {
        best = target;
    } else {
        report_warning(&mut callback, "Executable not found", source.display());
    }

    // 3. Script copy
    match script.file_name() {
        Some(script_name) => {
            let dest = source_dir.join(script_name);
            if !same_path(script, &dest) {
                match fs::copy(script, &dest) {
                    Ok(_) => callback(PostBuildStatus::Copied(dest)),
                    Err(e) => report_warning(&mut callback, "Could not copy script", e),
                }
            }
        }
        None => report_warning(&mut callback, "Could not copy script", script.display()),
    }

    // 4 + 5. Leftover build dirs, then spec files
    let mut leftover_dirs = vec![work_dir.to_path_buf()];
    if !same_path(work_dir, output_dir) {
        leftover_dirs.push(output_dir.to_path_buf());
    }
    let spec_name = format!("{}.{}", base, layout::SPEC_EXTENSION);

    let build_dirs = leftover_dirs.iter().map(|dir| dir.join(layout::BUILD_DIR));
    let spec_files = leftover_dirs.iter().map(|dir| dir.join(&spec_name));
    for leftover in build_dirs.chain(spec_files) {
        if same_path(&leftover, &project) {
            continue;
        }
        match remove_path(&leftover) {
            Ok(true) => callback(PostBuildStatus::Removed(leftover)),
            Ok(false) => {}
            Err(e) => report_warning(
                &mut callback,
                &format!("Could not remove {}", leftover.display()),
                e,
            ),
        }
    }

    debug!(project = ?project, artifact = ?best, "organize finished");
    callback(PostBuildStatus::Organized(project));
    best
}

/// Runs the enabled post-build steps in order (organize, shortcut, open
/// folder) and returns where the executable ended up.
pub fn finish_build<F>(
    artifact: &Path,
    config: &BuildConfig,
    options: PostBuildOptions,
    work_dir: &Path,
    mut callback: F,
) -> PathBuf
where
    F: FnMut(PostBuildStatus),
{
    let mut final_path = artifact.to_path_buf();

    if options.organize {
        final_path = organize_in(
            artifact,
            &config.script_path,
            &config.project_root(),
            work_dir,
            &mut callback,
        );
    }

    if options.shortcut {
        match create_shortcut(&final_path) {
            Ok(link) => callback(PostBuildStatus::ShortcutCreated(link)),
            Err(e) => report_warning(&mut callback, "Shortcut", e),
        }
    }

    if options.open_folder {
        if let Some(folder) = final_path.parent().filter(|p| p.exists()) {
            match open_folder(folder) {
                Ok(()) => callback(PostBuildStatus::OpenedFolder(folder.to_path_buf())),
                Err(e) => report_warning(&mut callback, "Could not open folder", e),
            }
        }
    }

    final_path
}

fn report_warning<F>(callback: &mut F, context: &str, err: impl fmt::Display)
where
    F: FnMut(PostBuildStatus),
{
    let message = format!("{}: {}", context, err);
    warn!("{}", message);
    callback(PostBuildStatus::Warning(message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_already_in_place_is_kept() {
        let root = tempfile::tempdir().unwrap();
        let work = tempfile::tempdir().unwrap();
        let project = root.path().join("app");
        fs::create_dir_all(&project).unwrap();
        let artifact = project.join("app.exe");
        let script = root.path().join("app.py");
        fs::write(&artifact, b"bin").unwrap();
        fs::write(&script, b"print()").unwrap();

        let mut events = Vec::new();
        let result = organize_in(&artifact, &script, root.path(), work.path(), |s| {
            events.push(s)
        });

        assert_eq!(result, artifact);
        assert!(artifact.exists());
        assert!(!events.iter().any(|e| matches!(e, PostBuildStatus::Moved(_))));
        assert!(project.join("source").join("app.py").exists());
    }

    #[test]
    fn missing_artifact_warns_but_still_copies_script() {
        let root = tempfile::tempdir().unwrap();
        let work = tempfile::tempdir().unwrap();
        let script = root.path().join("tool.py");
        fs::write(&script, b"x = 1").unwrap();
        let artifact = root.path().join("tool.exe");

        let mut events = Vec::new();
        let result = organize_in(&artifact, &script, root.path(), work.path(), |s| {
            events.push(s)
        });

        assert_eq!(result, artifact);
        assert!(events
            .iter()
            .any(|e| matches!(e, PostBuildStatus::Warning(m) if m.contains("not found"))));
        assert!(root.path().join("tool/source/tool.py").exists());
    }

    #[test]
    fn build_folder_named_project_is_not_wiped() {
        let root = tempfile::tempdir().unwrap();
        let artifact = root.path().join("build.exe");
        let script = root.path().join("build.py");
        fs::write(&artifact, b"bin").unwrap();
        fs::write(&script, b"").unwrap();

        // Packager ran inside the output folder.
        let result = organize_in(&artifact, &script, root.path(), root.path(), |_| {});

        assert_eq!(result, root.path().join("build").join("build.exe"));
        assert!(result.exists());
    }

    #[test]
    fn executable_without_suffix_becomes_its_own_project() {
        let root = tempfile::tempdir().unwrap();
        let work = tempfile::tempdir().unwrap();
        let artifact = root.path().join("app");
        let script = root.path().join("app.py");
        fs::write(&artifact, b"ELF").unwrap();
        fs::write(&script, b"print()").unwrap();

        let mut events = Vec::new();
        let result = organize_in(&artifact, &script, root.path(), work.path(), |s| {
            events.push(s)
        });

        let moved = root.path().join("app").join("app");
        assert_eq!(result, moved);
        assert_eq!(fs::read(&moved).unwrap(), b"ELF");
        assert!(root.path().join("app/source/app.py").exists());
        assert!(!root.path().join("app.organizing").exists());
        assert!(events.contains(&PostBuildStatus::Moved(moved)));
        assert!(!events
            .iter()
            .any(|e| matches!(e, PostBuildStatus::Warning(_))));
    }

    #[test]
    fn finish_build_without_steps_returns_artifact() {
        let config = BuildConfig::for_script("/src/app.py");
        let options = PostBuildOptions {
            organize: false,
            shortcut: false,
            open_folder: false,
        };
        let mut events = Vec::new();
        let result = finish_build(
            Path::new("/out/app.exe"),
            &config,
            options,
            Path::new("/work"),
            |s| events.push(s),
        );

        assert_eq!(result, PathBuf::from("/out/app.exe"));
        assert!(events.is_empty());
    }
}
