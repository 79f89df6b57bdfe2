use pp_core::{BuildOutcome, PackagerTool};
use std::path::PathBuf;
use std::process::{Child, ExitStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Events sent from the supervising thread to the CLI or GUI, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    Starting,
    Command(String), // Full command line, before spawning
    Line(String),    // One line of merged stdout/stderr
    Finished(BuildOutcome),
}

/// Position of a build in `Idle -> Running -> {Completed, Failed, Cancelled}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Idle,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl BuildState {
    pub fn from_outcome(outcome: &BuildOutcome) -> Self {
        match outcome {
            BuildOutcome::Success { .. } => BuildState::Completed,
            BuildOutcome::Failure { .. } => BuildState::Failed,
            BuildOutcome::Cancelled => BuildState::Cancelled,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BuildState::Completed | BuildState::Failed | BuildState::Cancelled
        )
    }
}

/// Cancellation flag plus the slot holding the running child, shared
/// between the foreground handle and the supervising thread.
#[derive(Debug, Clone, Default)]
pub struct BuildControl {
    cancelled: Arc<AtomicBool>,
    child: Arc<Mutex<Option<Child>>>,
}

impl BuildControl {
    /// Flags the build as cancelled and kills the child if it is up.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(child) = self.slot().as_mut() {
            let _ = child.kill();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub(crate) fn attach(&self, child: Child) {
        *self.slot() = Some(child);
    }

    pub(crate) fn try_wait(&self) -> std::io::Result<Option<ExitStatus>> {
        match self.slot().as_mut() {
            Some(child) => child.try_wait(),
            None => Ok(None),
        }
    }

    /// Kills and reaps the child. Errors are ignored: the process may
    /// already be gone.
    pub(crate) fn terminate(&self) {
        if let Some(mut child) = self.slot().take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    pub(crate) fn detach(&self) {
        self.slot().take();
    }

    fn slot(&self) -> MutexGuard<'_, Option<Child>> {
        self.child.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Arguments of the `build` command.
#[derive(Debug, Clone, Default)]
pub struct BuildArgs {
    pub tool: PackagerTool,
    pub script: Option<PathBuf>,
    pub icon: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub name: Option<String>,
    pub no_onefile: bool,
    pub console: bool,
    pub no_clean: bool,
    pub no_organize: bool,
    pub no_shortcut: bool,
    pub open_folder: bool,
    pub assume_yes: bool,
}
