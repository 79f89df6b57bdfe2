use crate::form::{self, FormState};
use crate::theme;
use crate::utils::{self, StatusKind};
use eframe::egui;
use pp_core::{BuildConfig, BuildOutcome, PackError, PackagerTool};
use pp_factory::builder::{BuildStatus, BuildSupervisor};
use pp_factory::icon::normalize_icon;
use pp_factory::organizer::{finish_build, PostBuildOptions};
use pp_factory::toolchain::{self, InstallStatus};
use std::env;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use tracing::{info, warn};

/// Request held while the packager check runs off the UI thread.
struct PendingCheck {
    config: BuildConfig,
    options: PostBuildOptions,
    result: Receiver<Result<String, PackError>>,
}

/// Request kept while its build runs, needed again for the post-build steps.
struct RunningBuild {
    config: BuildConfig,
    options: PostBuildOptions,
    events: Receiver<BuildStatus>,
}

pub struct PpApp {
    pub theme_preference: theme::Theme,
    pub form: FormState,

    tool: PackagerTool,
    supervisor: BuildSupervisor,
    checking: Option<PendingCheck>,
    running: Option<RunningBuild>,
    install_rx: Option<Receiver<InstallStatus>>,
    install_prompt: Option<String>,

    pub logs: Vec<String>,
    pub status: String,
    pub status_kind: StatusKind,
}

impl Default for PpApp {
    fn default() -> Self {
        Self {
            theme_preference: theme::Theme::Dark,
            form: FormState::default(),

            tool: PackagerTool::from_env(),
            supervisor: BuildSupervisor::new(),
            checking: None,
            running: None,
            install_rx: None,
            install_prompt: None,

            logs: vec!["Ready. Pick a Python script to begin.".into()],
            status: "Idle".into(),
            status_kind: StatusKind::Idle,
        }
    }
}

impl eframe::App for PpApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        // 1. Theme
        let is_dark = match self.theme_preference {
            theme::Theme::Dark => true,
            theme::Theme::Light => false,
            theme::Theme::System => !matches!(frame.info().system_theme, Some(eframe::Theme::Light)),
        };
        theme::apply_settings(ctx, is_dark);

        // 2. Background events
        self.poll_install();
        self.poll_check();
        self.poll_build();

        // 3. Layout: Side -> Bottom -> Central
        self.render_sidebar(ctx);
        self.render_console(ctx);
        self.render_content(ctx);
        self.render_install_prompt(ctx);

        if self.is_busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }
}

impl PpApp {
    fn is_busy(&self) -> bool {
        self.checking.is_some() || self.running.is_some() || self.install_rx.is_some()
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status_kind = kind;
        self.status = text.into();
    }

    fn log(&mut self, line: impl Into<String>) {
        self.logs.push(line.into());
    }

    // ------------------------------------------------------------------
    // Build flow
    // ------------------------------------------------------------------

    fn start_build(&mut self) {
        if self.is_busy() {
            return;
        }
        let config = self.form.to_config();
        if let Err(e) = config.validate() {
            self.set_status(StatusKind::Error, e.to_string());
            return;
        }

        // 1. Dependency check, answered in poll_check
        let (tx, rx) = channel();
        toolchain::check_async(self.tool.clone(), tx);
        self.checking = Some(PendingCheck {
            config,
            options: self.form.post_build_options(),
            result: rx,
        });
        self.set_status(StatusKind::Busy, "Checking PyInstaller...");
    }

    fn poll_check(&mut self) {
        let Some(pending) = &self.checking else {
            return;
        };
        let result = match pending.result.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(PackError::DependencyMissing {
                tool: self.tool.display_name(),
                reason: "check did not report back".into(),
            }),
        };
        let Some(PendingCheck { config, options, .. }) = self.checking.take() else {
            return;
        };

        match result {
            Ok(version) => {
                self.log(format!("🔧 {} {}", self.tool.display_name(), version));
                self.launch_build(config, options);
            }
            Err(e @ PackError::DependencyMissing { .. }) if self.tool.interpreter().is_some() => {
                self.log(format!("⚠️ {}", e));
                self.install_prompt = Some(e.to_string());
                self.set_status(StatusKind::Warning, "PyInstaller is not installed");
            }
            Err(e) => {
                self.log(format!("❌ {}", e));
                self.set_status(StatusKind::Error, e.to_string());
            }
        }
    }

    fn launch_build(&mut self, mut config: BuildConfig, options: PostBuildOptions) {
        // 2. Icon
        if let Some(icon) = config.icon_path().map(PathBuf::from) {
            match normalize_icon(&icon) {
                Ok(ico) => {
                    if ico != icon {
                        self.log(format!("🎨 Icon converted: {}", ico.display()));
                    }
                    config.icon_path = Some(ico);
                }
                Err(e) => {
                    warn!(error = %e, "icon conversion failed, building without icon");
                    self.log(format!("⚠️ {}. Building without an icon.", e));
                    config.icon_path = None;
                }
            }
        }

        // 3. Launch
        for line in utils::header_lines(&config) {
            self.log(line);
        }
        let (tx, rx) = channel();
        match self.supervisor.start(self.tool.clone(), config.clone(), tx) {
            Ok(()) => {
                self.running = Some(RunningBuild {
                    config,
                    options,
                    events: rx,
                });
                self.set_status(StatusKind::Busy, "Building...");
            }
            Err(e) => {
                self.log(format!("❌ {}", e));
                self.set_status(StatusKind::Error, e.to_string());
            }
        }
    }

    fn cancel_build(&mut self) {
        if self.supervisor.cancel() {
            info!("cancel requested from the window");
            self.set_status(StatusKind::Warning, "Cancelling...");
        }
    }

    fn poll_build(&mut self) {
        let mut finished = false;
        if let Some(running) = &self.running {
            let mut batch = Vec::new();
            loop {
                match running.events.try_recv() {
                    Ok(BuildStatus::Finished(_)) => {
                        finished = true;
                        break;
                    }
                    Ok(status) => batch.push(status),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        finished = true;
                        break;
                    }
                }
            }
            for status in batch {
                match status {
                    BuildStatus::Starting => self.log("🚀 Build started"),
                    BuildStatus::Command(cmd) => self.log(format!("$ {}", cmd)),
                    BuildStatus::Line(line) => self.log(line),
                    BuildStatus::Finished(_) => {}
                }
            }
        }

        if finished {
            if let Some(running) = self.running.take() {
                self.complete_build(running);
            }
        }
    }

    fn complete_build(&mut self, running: RunningBuild) {
        let outcome = self
            .supervisor
            .wait()
            .unwrap_or_else(|| BuildOutcome::failure("Build result was lost"));

        match outcome {
            BuildOutcome::Success { artifact_path } => {
                self.log(format!("✅ Build succeeded: {}", artifact_path.display()));
                let work_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

                let mut steps = Vec::new();
                let final_path = finish_build(
                    &artifact_path,
                    &running.config,
                    running.options,
                    &work_dir,
                    |status| steps.push(status.to_string()),
                );
                self.logs.extend(steps);
                self.logs.extend(utils::summary_lines(&running.config, &final_path));
                self.set_status(StatusKind::Success, "Build complete");
            }
            BuildOutcome::Failure { message } => {
                self.log(format!("❌ {}", message));
                self.set_status(StatusKind::Error, message);
            }
            BuildOutcome::Cancelled => {
                self.log("⏹ Build cancelled");
                self.set_status(StatusKind::Warning, "Cancelled");
            }
        }
    }

    // ------------------------------------------------------------------
    // Toolchain install
    // ------------------------------------------------------------------

    fn start_install(&mut self) {
        let (tx, rx) = channel();
        toolchain::run_async(self.tool.clone(), tx);
        self.install_rx = Some(rx);
        self.set_status(StatusKind::Busy, "Installing PyInstaller...");
    }

    fn poll_install(&mut self) {
        let Some(rx) = &self.install_rx else {
            return;
        };

        let mut events = Vec::new();
        let mut disconnected = false;
        loop {
            match rx.try_recv() {
                Ok(status) => events.push(status),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        let mut installed = false;
        for status in events {
            match status {
                InstallStatus::Starting(cmd) => self.log(format!("📦 {}", cmd)),
                InstallStatus::Line(line) => self.log(line),
                InstallStatus::Finished(version) => {
                    self.log(format!("✅ Installed: {}", version));
                    installed = true;
                }
                InstallStatus::Error(e) => {
                    self.log(format!("❌ {}", e));
                    self.set_status(StatusKind::Error, "Installation failed");
                }
            }
        }

        if disconnected {
            self.install_rx = None;
            if installed {
                // Pick the original request back up.
                self.start_build();
            } else if self.status_kind == StatusKind::Busy {
                self.set_status(StatusKind::Error, "Installation failed");
            }
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    fn render_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("sidebar")
            .exact_width(200.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new("PYPACK")
                            .strong()
                            .size(18.0)
                            .color(theme::ACCENT),
                    );
                    ui.label(egui::RichText::new("FACTORY").weak().size(10.0));
                });
                ui.add_space(24.0);

                ui.label(egui::RichText::new("Packager").small().weak());
                ui.label(egui::RichText::new(self.tool.display_name()).monospace());

                ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                    ui.add_space(20.0);
                    theme::combo_box(ui, "theme_select", self.theme_preference.label(), |ui| {
                        for choice in [theme::Theme::Light, theme::Theme::Dark, theme::Theme::System] {
                            ui.selectable_value(&mut self.theme_preference, choice, choice.label());
                        }
                    });
                    ui.add_space(5.0);
                    ui.separator();
                });
            });
    }

    fn render_console(&mut self, ctx: &egui::Context) {
        let colors = theme::palette::get_colors(ctx.style().visuals.dark_mode);
        let panel_frame = egui::Frame::none()
            .fill(colors.bg_console)
            .inner_margin(14.0);

        egui::TopBottomPanel::bottom("console")
            .resizable(true)
            .min_height(180.0)
            .default_height(240.0)
            .frame(panel_frame)
            .show(ctx, |ui| {
                // Header: title, status, clear
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("BUILD LOG").strong().small());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("🗑 Clear log").clicked() {
                            self.logs.clear();
                        }
                        ui.label(
                            egui::RichText::new(&self.status)
                                .strong()
                                .color(self.status_kind.color(colors.text_weak)),
                        );
                        if self.is_busy() {
                            ui.spinner();
                        }
                    });
                });
                ui.separator();

                let row_height = ui.text_style_height(&egui::TextStyle::Monospace);
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .auto_shrink([false, false])
                    .show_rows(ui, row_height, self.logs.len(), |ui, rows| {
                        for line in &self.logs[rows] {
                            ui.label(
                                egui::RichText::new(line)
                                    .monospace()
                                    .color(colors.text_weak),
                            );
                        }
                    });
            });
    }

    fn render_content(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Frame::none()
                    .inner_margin(egui::Margin {
                        left: 5.0,
                        right: 17.5,
                        top: 17.5,
                        bottom: 5.0,
                    })
                    .show(ui, |ui| {
                        ui.heading("Python to Executable");
                        ui.label("Package a Python script into a standalone program with PyInstaller.");
                        ui.add_space(12.0);

                        let busy = self.is_busy();
                        ui.add_enabled_ui(!busy, |ui| form::show(&mut self.form, ui));
                        ui.add_space(16.0);

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if self.running.is_some() {
                                if theme::styled_button(ui, "⏹ Cancel", theme::ButtonVariant::Destructive)
                                    .clicked()
                                {
                                    self.cancel_build();
                                }
                            } else {
                                let ready = !busy && self.form.can_build();
                                ui.add_enabled_ui(ready, |ui| {
                                    if theme::styled_button(ui, "🔨 Build", theme::ButtonVariant::Primary)
                                        .clicked()
                                    {
                                        self.start_build();
                                    }
                                });
                            }
                        });
                    });
            });
        });
    }

    fn render_install_prompt(&mut self, ctx: &egui::Context) {
        let Some(reason) = self.install_prompt.clone() else {
            return;
        };

        let mut answer = None;
        egui::Window::new("PyInstaller missing")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("PyInstaller is required to build executables.");
                ui.label(egui::RichText::new(&reason).small().weak());
                ui.add_space(8.0);
                ui.label("Install it now with pip?");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if theme::styled_button(ui, "Install", theme::ButtonVariant::Primary).clicked() {
                        answer = Some(true);
                    }
                    if theme::styled_button(ui, "Not now", theme::ButtonVariant::Secondary).clicked() {
                        answer = Some(false);
                    }
                });
            });

        match answer {
            Some(true) => {
                self.install_prompt = None;
                self.start_install();
            }
            Some(false) => {
                self.install_prompt = None;
                self.log("Build aborted: PyInstaller is not installed.");
                self.set_status(StatusKind::Error, "PyInstaller missing");
            }
            None => {}
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::thread;
    use std::time::{Duration, Instant};

    fn app_with_tool(script: &str, dir: &std::path::Path) -> PpApp {
        let source = dir.join("app.py");
        fs::write(&source, "print('hi')\n").unwrap();
        let mut app = PpApp {
            tool: PackagerTool::new("sh", vec!["-c".into(), script.into(), "packager".into()]),
            ..Default::default()
        };
        app.form.set_script(&source);
        app
    }

    #[test]
    fn build_request_returns_before_the_check_finishes() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_tool("sleep 3; exit 1", dir.path());

        let pressed = Instant::now();
        app.start_build();
        assert!(pressed.elapsed() < Duration::from_secs(1));
        assert!(app.is_busy());
        assert_eq!(app.status_kind, StatusKind::Busy);

        // Still waiting: nothing has been launched yet.
        app.poll_check();
        assert!(app.running.is_none());
    }

    #[test]
    fn failed_check_is_reported_on_a_later_frame() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_tool("echo 'broken packager' >&2; exit 1", dir.path());

        app.start_build();
        let deadline = Instant::now() + Duration::from_secs(10);
        while app.is_busy() {
            assert!(Instant::now() < deadline, "check never reported back");
            app.poll_check();
            thread::sleep(Duration::from_millis(10));
        }

        assert!(app.running.is_none());
        assert!(app.install_prompt.is_none());
        assert_eq!(app.status_kind, StatusKind::Error);
        assert!(app.status.contains("broken packager"), "{}", app.status);
    }
}
