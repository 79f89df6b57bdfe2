use crossbeam_channel::{unbounded, Receiver, Sender};
use pp_core::{layout, BuildConfig, PackError};
use std::{
    io::{self, BufRead, BufReader, Read},
    path::PathBuf,
    process::{Child, Command, Stdio},
    thread,
};

/// Where the packaging tool puts a one-file build:
/// `{output_dir or dist}/{name}{EXE_SUFFIX}`.
pub fn expected_artifact_path(config: &BuildConfig) -> PathBuf {
    config.dist_dir().join(format!(
        "{}{}",
        config.artifact_name(),
        layout::EXE_SUFFIX
    ))
}

/// Finds the executable the tool actually produced.
///
/// Probes the one-file location first, then the one-folder layout
/// (`{dist}/{name}/{name}{EXE_SUFFIX}`), then a macOS app bundle.
pub fn locate_artifact(config: &BuildConfig) -> Result<PathBuf, PackError> {
    let expected = expected_artifact_path(config);
    let name = config.artifact_name();
    let dist = config.dist_dir();

    let folder_build = dist.join(&name).join(format!("{}{}", name, layout::EXE_SUFFIX));
    let app_bundle = dist.join(format!("{}.app", name));

    if expected.is_file() {
        Ok(expected)
    } else if folder_build.is_file() {
        Ok(folder_build)
    } else if cfg!(target_os = "macos") && app_bundle.is_dir() {
        Ok(app_bundle)
    } else {
        Err(PackError::ArtifactNotFound(expected))
    }
}

/// Renders an argument list the way a user would type it.
pub fn format_command(args: &[String]) -> String {
    args.iter()
        .map(|arg| {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                format!("\"{}\"", arg)
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Spawns `cmd` with stdout and stderr sharing one pipe, so lines arrive
/// in the order the child wrote them. Stdin is closed.
///
/// The returned channel disconnects once every writer of the pipe is gone.
pub(crate) fn spawn_merged(mut cmd: Command) -> io::Result<(Child, Receiver<String>)> {
    let (reader, writer) = os_pipe::pipe()?;
    let writer_err = writer.try_clone()?;

    cmd.stdin(Stdio::null()).stdout(writer).stderr(writer_err);
    let child = cmd.spawn()?;
    // Our copies of the write end must go, or the reader never sees EOF.
    drop(cmd);

    let (tx_lines, rx_lines) = unbounded::<String>();
    spawn_line_pump(reader, tx_lines);
    Ok((child, rx_lines))
}

/// Reads `source` line by line on its own thread and pushes each line
/// (terminator stripped, invalid UTF-8 replaced) into `sink`. Stops at EOF,
/// on a read error, or when the receiving side is gone.
fn spawn_line_pump<R>(source: R, sink: Sender<String>) -> thread::JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut reader = BufReader::new(source);
        let mut buffer = Vec::new();

        loop {
            buffer.clear();
            match reader.read_until(b'\n', &mut buffer) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    if buffer.ends_with(b"\n") {
                        buffer.pop();
                        if buffer.ends_with(b"\r") {
                            buffer.pop();
                        }
                    }
                    let line = String::from_utf8_lossy(&buffer).into_owned();
                    if sink.send(line).is_err() {
                        break;
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn expected_path_defaults_to_dist_and_script_stem() {
        let config = BuildConfig::new("/src/tool.py");
        assert_eq!(
            expected_artifact_path(&config),
            PathBuf::from("dist").join(format!("tool{}", layout::EXE_SUFFIX))
        );
    }

    #[test]
    fn locate_prefers_one_file_then_one_folder() {
        let out = tempfile::tempdir().unwrap();
        let mut config = BuildConfig::new("/src/app.py");
        config.output_dir = Some(out.path().to_path_buf());

        let err = locate_artifact(&config).unwrap_err();
        assert!(matches!(err, PackError::ArtifactNotFound(_)));

        let folder_build = out
            .path()
            .join("app")
            .join(format!("app{}", layout::EXE_SUFFIX));
        fs::create_dir_all(folder_build.parent().unwrap()).unwrap();
        fs::write(&folder_build, b"bin").unwrap();
        assert_eq!(locate_artifact(&config).unwrap(), folder_build);

        let single = out.path().join(format!("app{}", layout::EXE_SUFFIX));
        // Without a platform suffix `app` is the folder above.
        if !single.exists() {
            fs::write(&single, b"bin").unwrap();
            assert_eq!(locate_artifact(&config).unwrap(), single);
        }
    }

    #[test]
    fn format_command_quotes_spaces() {
        let args = vec!["python".to_string(), "My Script.py".to_string()];
        assert_eq!(format_command(&args), "python \"My Script.py\"");
    }

    #[cfg(unix)]
    #[test]
    fn merged_output_keeps_write_order() {
        let mut cmd = Command::new("sh");
        cmd.args([
            "-c",
            "i=0; while [ $i -lt 200 ]; do echo o$i; echo e$i >&2; i=$((i+1)); done",
        ]);
        let (mut child, rx) = spawn_merged(cmd).unwrap();

        let lines: Vec<String> = rx.iter().collect();
        assert!(child.wait().unwrap().success());

        let expected: Vec<String> = (0..200)
            .flat_map(|i| [format!("o{}", i), format!("e{}", i)])
            .collect();
        assert_eq!(lines, expected);
    }

    #[test]
    fn line_pump_strips_terminators_only() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let input: &'static [u8] = b"first\r\n  spaced  \nlast";
        spawn_line_pump(input, tx).join().unwrap();

        let lines: Vec<String> = rx.iter().collect();
        assert_eq!(lines, vec!["first", "  spaced  ", "last"]);
    }
}
