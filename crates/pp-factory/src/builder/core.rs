use super::types::{BuildControl, BuildStatus};
use super::utils::{format_command, locate_artifact, spawn_merged};
use crossbeam_channel::RecvTimeoutError;
use pp_core::{background_command, BuildConfig, BuildOutcome, PackagerTool};
use std::{
    process::ExitStatus,
    thread,
    time::Duration,
};
use tracing::{debug, info, warn};

/// How often an idle supervisor re-checks the cancellation flag.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Ordered argument list for the packaging tool, invocation first and the
/// script last.
pub fn build_args(tool: &PackagerTool, config: &BuildConfig) -> Vec<String> {
    let mut args = tool.invocation();

    if config.flags.single_file {
        args.push("--onefile".into());
    }
    if config.flags.hide_console {
        args.push("--windowed".into());
    }
    if config.flags.clean_before_build {
        args.push("--clean".into());
    }
    if let Some(name) = config.exe_name() {
        args.push("--name".into());
        args.push(name.to_string());
    }
    if let Some(dir) = config.output_dir() {
        args.push("--distpath".into());
        args.push(dir.to_string_lossy().into_owned());
    }
    if let Some(icon) = config.icon_path() {
        args.push("--icon".into());
        args.push(icon.to_string_lossy().into_owned());
    }

    args.push(config.script_path.to_string_lossy().into_owned());
    args
}

/// Runs one build to completion on the calling thread.
///
/// Every line of the child's merged output goes to `callback` as
/// [`BuildStatus::Line`] in arrival order. The returned outcome is the only
/// terminal result; sending it on is left to the caller.
pub fn supervise<F>(
    tool: &PackagerTool,
    config: &BuildConfig,
    control: &BuildControl,
    callback: F,
) -> BuildOutcome
where
    F: Fn(BuildStatus),
{
    // 1. Command
    let args = build_args(tool, config);
    let command_line = format_command(&args);
    callback(BuildStatus::Command(command_line.clone()));
    info!(command = %command_line, "starting packager");

    let Some((program, rest)) = args.split_first() else {
        return BuildOutcome::failure("empty packager command");
    };

    // 2. Spawn with stdout and stderr on one pipe
    let mut cmd = background_command(program);
    cmd.args(rest).env("PYTHONUNBUFFERED", "1");

    let (child, rx_lines) = match spawn_merged(cmd) {
        Ok(spawned) => spawned,
        Err(e) => {
            warn!(error = %e, "failed to spawn packager");
            return BuildOutcome::failure(format!("Failed to start {}: {}", program, e));
        }
    };

    debug!(pid = child.id(), "packager running");
    control.attach(child);

    // 3. Relay
    loop {
        if control.is_cancelled() {
            return cancelled(control);
        }
        match rx_lines.recv_timeout(POLL_INTERVAL) {
            Ok(line) => {
                if control.is_cancelled() {
                    return cancelled(control);
                }
                callback(BuildStatus::Line(line));
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    // 5. Exit status
    let status = loop {
        if control.is_cancelled() {
            return cancelled(control);
        }
        match control.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => {
                control.terminate();
                return BuildOutcome::failure(format!("Failed to wait for packager: {}", e));
            }
        }
    };
    control.detach();

    outcome_for(status, config)
}

fn cancelled(control: &BuildControl) -> BuildOutcome {
    control.terminate();
    info!("build cancelled, packager terminated");
    BuildOutcome::Cancelled
}

fn outcome_for(status: ExitStatus, config: &BuildConfig) -> BuildOutcome {
    if status.success() {
        match locate_artifact(config) {
            Ok(artifact_path) => {
                info!(artifact = ?artifact_path, "build succeeded");
                BuildOutcome::Success { artifact_path }
            }
            Err(e) => {
                warn!(error = %e, "packager exited cleanly without an artifact");
                BuildOutcome::failure(e.to_string())
            }
        }
    } else {
        match status.code() {
            Some(code) => {
                warn!(code, "packager failed");
                BuildOutcome::failure(format!("Build failed (exit code: {})", code))
            }
            None => {
                warn!(?status, "packager terminated by signal");
                BuildOutcome::failure(format!("Build terminated unexpectedly ({})", status))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pp_core::BuildFlags;
    use std::path::PathBuf;

    fn tool() -> PackagerTool {
        PackagerTool::new("pyinstaller", vec![])
    }

    #[test]
    fn all_options_in_fixed_order() {
        let config = BuildConfig {
            script_path: PathBuf::from("/src/app.py"),
            output_dir: Some(PathBuf::from("/out")),
            exe_name: Some("app".into()),
            icon_path: None,
            flags: BuildFlags {
                single_file: true,
                hide_console: true,
                clean_before_build: true,
            },
        };

        assert_eq!(
            build_args(&tool(), &config),
            vec![
                "pyinstaller",
                "--onefile",
                "--windowed",
                "--clean",
                "--name",
                "app",
                "--distpath",
                "/out",
                "/src/app.py",
            ]
        );
    }

    #[test]
    fn no_flags_leaves_only_invocation_and_script() {
        let mut config = BuildConfig::new("/src/app.py");
        config.flags = BuildFlags {
            single_file: false,
            hide_console: false,
            clean_before_build: false,
        };
        config.exe_name = Some(String::new());

        let tool = PackagerTool::python_module("python3");
        assert_eq!(
            build_args(&tool, &config),
            vec!["python3", "-m", "PyInstaller", "/src/app.py"]
        );
    }

    #[test]
    fn icon_goes_right_before_script() {
        let mut config = BuildConfig::new("/src/app.py");
        config.flags = BuildFlags {
            single_file: true,
            hide_console: false,
            clean_before_build: false,
        };
        config.icon_path = Some(PathBuf::from("/img/app.ico"));

        let args = build_args(&tool(), &config);
        assert_eq!(
            args,
            vec!["pyinstaller", "--onefile", "--icon", "/img/app.ico", "/src/app.py"]
        );
    }

    #[test]
    fn spawn_failure_is_reported_as_failure() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("app.py");
        std::fs::write(&script, "").unwrap();

        let tool = PackagerTool::new(
            dir.path().join("no-such-packager").to_string_lossy(),
            vec![],
        );
        let outcome = supervise(
            &tool,
            &BuildConfig::new(&script),
            &BuildControl::default(),
            |_| {},
        );

        match outcome {
            BuildOutcome::Failure { message } => assert!(message.contains("Failed to start")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
