use super::core::{check_packager, install_packager};
use super::types::InstallStatus;
use pp_core::{PackError, PackagerTool};
use std::{sync::mpsc::Sender, thread};

/// Runs the packager version check on a background thread and sends its
/// result once, so a window never waits on a slow interpreter.
pub fn check_async(tool: PackagerTool, sender: Sender<Result<String, PackError>>) {
    thread::spawn(move || {
        let _ = sender.send(check_packager(&tool));
    });
}

/// Installs the packager on a background thread so the GUI keeps painting.
pub fn run_async(tool: PackagerTool, sender: Sender<InstallStatus>) {
    thread::spawn(move || {
        let tx_callback = sender.clone();

        let result = install_packager(&tool, move |status| {
            let _ = tx_callback.send(status);
        });

        if let Err(e) = result {
            let _ = sender.send(InstallStatus::Error(e.to_string()));
        }
    });
}
