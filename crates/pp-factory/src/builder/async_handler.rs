use super::{
    core::supervise,
    types::{BuildControl, BuildState, BuildStatus},
};
use pp_core::{BuildConfig, BuildOutcome, PackError, PackagerTool};
use std::{
    sync::mpsc::Sender,
    thread::{self, JoinHandle},
};
use tracing::warn;

struct ActiveBuild {
    control: BuildControl,
    handle: JoinHandle<BuildOutcome>,
}

/// Owner of the single in-flight build.
///
/// Lives on the foreground (CLI main loop or GUI state). The background
/// thread reports only through the `Sender` it was given and through the
/// outcome returned from its join handle.
pub struct BuildSupervisor {
    active: Option<ActiveBuild>,
    state: BuildState,
}

impl Default for BuildSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildSupervisor {
    pub fn new() -> Self {
        Self {
            active: None,
            state: BuildState::Idle,
        }
    }

    /// Validates `config` and starts the build on a background thread.
    ///
    /// `sender` receives `Starting`, the command line, every output line and
    /// finally exactly one `Finished`. Rejected while a build is running.
    pub fn start(
        &mut self,
        tool: PackagerTool,
        config: BuildConfig,
        sender: Sender<BuildStatus>,
    ) -> Result<(), PackError> {
        if self.is_running() {
            return Err(PackError::BuildInProgress);
        }
        config.validate()?;
        self.reap();

        let control = BuildControl::default();
        let worker_control = control.clone();

        let handle = thread::Builder::new()
            .name("pp-build".into())
            .spawn(move || {
                let _ = sender.send(BuildStatus::Starting);

                let tx_callback = sender.clone();
                let outcome = supervise(&tool, &config, &worker_control, move |status| {
                    let _ = tx_callback.send(status);
                });

                let _ = sender.send(BuildStatus::Finished(outcome.clone()));
                outcome
            })?;

        self.active = Some(ActiveBuild { control, handle });
        self.state = BuildState::Running;
        Ok(())
    }

    /// Requests cancellation of the running build. Returns `false` when
    /// nothing is running.
    pub fn cancel(&self) -> bool {
        match &self.active {
            Some(active) if !active.handle.is_finished() => {
                active.control.cancel();
                true
            }
            _ => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .map_or(false, |active| !active.handle.is_finished())
    }

    /// Current state; collects the outcome of a finished build first.
    pub fn state(&mut self) -> BuildState {
        self.reap();
        self.state
    }

    /// Blocks until the running build ends and returns its outcome.
    /// `None` when no build was started since the last `wait`.
    pub fn wait(&mut self) -> Option<BuildOutcome> {
        let active = self.active.take()?;
        let outcome = match active.handle.join() {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!("build thread panicked");
                active.control.cancel();
                BuildOutcome::failure("Build supervisor crashed")
            }
        };
        self.state = BuildState::from_outcome(&outcome);
        Some(outcome)
    }

    fn reap(&mut self) {
        if self
            .active
            .as_ref()
            .map_or(false, |active| active.handle.is_finished())
        {
            self.wait();
        }
    }
}

impl Drop for BuildSupervisor {
    fn drop(&mut self) {
        // Do not leave an orphaned packager behind when the front end exits.
        if let Some(active) = &self.active {
            active.control.cancel();
        }
    }
}
