use super::types::InstallStatus;
use crate::builder::utils::{format_command, spawn_merged};
use pp_core::{background_command, tool::PACKAGER_PACKAGE, PackError, PackagerTool};
use std::process::Stdio;
use tracing::{debug, info, warn};

/// Asks the packaging tool for its version.
///
/// Any failure to run it, or a non-zero exit, means the tool is not usable
/// and maps to [`PackError::DependencyMissing`].
pub fn check_packager(tool: &PackagerTool) -> Result<String, PackError> {
    let missing = |reason: String| PackError::DependencyMissing {
        tool: tool.display_name(),
        reason,
    };

    let program = which::which(&tool.program).map_err(|e| missing(e.to_string()))?;
    debug!(program = ?program, "packager resolved");

    let output = background_command(&program)
        .args(&tool.prefix_args)
        .arg("--version")
        .stdin(Stdio::null())
        .output()
        .map_err(|e| missing(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let reason = stderr
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .map(|line| line.trim().to_string())
            .unwrap_or_else(|| format!("exited with {}", output.status));
        debug!(%reason, "packager check failed");
        return Err(missing(reason));
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(if version.is_empty() {
        "unknown version".into()
    } else {
        version
    })
}

/// Installs the packaging tool with `pip` into the tool's interpreter,
/// relaying pip's output, then re-checks it.
pub fn install_packager<F>(tool: &PackagerTool, mut callback: F) -> Result<String, PackError>
where
    F: FnMut(InstallStatus),
{
    let interpreter = tool.interpreter().ok_or_else(|| PackError::DependencyMissing {
        tool: tool.display_name(),
        reason: "not a Python module invocation, install it manually".into(),
    })?;

    let args: Vec<String> = vec![
        interpreter.to_string(),
        "-m".into(),
        "pip".into(),
        "install".into(),
        PACKAGER_PACKAGE.into(),
    ];
    callback(InstallStatus::Starting(format_command(&args)));
    info!(interpreter, "installing packager");

    let mut cmd = background_command(interpreter);
    cmd.args(&args[1..]);
    let (mut child, rx_lines) = spawn_merged(cmd)?;

    for line in rx_lines {
        callback(InstallStatus::Line(line));
    }

    let status = child.wait()?;
    if !status.success() {
        warn!(%status, "pip install failed");
        return Err(PackError::DependencyMissing {
            tool: tool.display_name(),
            reason: format!("pip install failed ({})", status),
        });
    }

    let version = check_packager(tool)?;
    callback(InstallStatus::Finished(version.clone()));
    Ok(version)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn shell_tool(script: &str) -> PackagerTool {
        PackagerTool::new("sh", vec!["-c".into(), script.into(), "packager".into()])
    }

    #[test]
    fn reports_version_from_stdout() {
        let version = check_packager(&shell_tool("echo 6.3.0")).unwrap();
        assert_eq!(version, "6.3.0");
    }

    #[test]
    fn missing_program_is_dependency_missing() {
        let tool = PackagerTool::new("/definitely/not/a/python", vec![]);
        let err = check_packager(&tool).unwrap_err();
        assert!(matches!(err, PackError::DependencyMissing { .. }));
    }

    #[test]
    fn failing_tool_surfaces_last_stderr_line() {
        let tool = shell_tool("echo 'No module named PyInstaller' >&2; exit 1");
        match check_packager(&tool).unwrap_err() {
            PackError::DependencyMissing { reason, .. } => {
                assert_eq!(reason, "No module named PyInstaller")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn install_relays_pip_output_in_order() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let python = dir.path().join("python");
        std::fs::write(
            &python,
            "#!/bin/sh\n\
             if [ \"$3\" = install ]; then\n\
             echo Collecting pyinstaller; echo 'WARNING: pip is old' >&2; echo Installed\n\
             exit 0\n\
             fi\n\
             echo 6.3.0\n",
        )
        .unwrap();
        std::fs::set_permissions(&python, std::fs::Permissions::from_mode(0o755)).unwrap();

        let tool = PackagerTool::python_module(python.display().to_string());
        let mut events = Vec::new();
        let version = install_packager(&tool, |s| events.push(s)).unwrap();

        assert_eq!(version, "6.3.0");
        assert!(matches!(&events[0], InstallStatus::Starting(cmd) if cmd.ends_with("pip install pyinstaller")));
        assert_eq!(
            events[1..],
            [
                InstallStatus::Line("Collecting pyinstaller".into()),
                InstallStatus::Line("WARNING: pip is old".into()),
                InstallStatus::Line("Installed".into()),
                InstallStatus::Finished("6.3.0".into()),
            ]
        );
    }

    #[test]
    fn install_requires_python_module_tool() {
        let mut events = Vec::new();
        let err = install_packager(&shell_tool("true"), |s| events.push(s)).unwrap_err();
        assert!(matches!(err, PackError::DependencyMissing { .. }));
        assert!(events.is_empty());
    }
}
