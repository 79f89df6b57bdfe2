use crate::theme;
use eframe::egui;
use pp_core::{BuildConfig, BuildFlags};
use pp_factory::organizer::PostBuildOptions;
use std::path::{Path, PathBuf};

/// Everything the user can set before pressing Build.
pub struct FormState {
    pub script: String,
    pub icon: String,
    pub output_dir: String,
    pub exe_name: String,

    pub single_file: bool,
    pub hide_console: bool,
    pub clean: bool,
    pub open_folder: bool,
    pub organize: bool,
    pub shortcut: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            script: String::new(),
            icon: String::new(),
            output_dir: String::new(),
            exe_name: String::new(),
            single_file: true,
            hide_console: true,
            clean: true,
            open_folder: true,
            organize: true,
            shortcut: true,
        }
    }
}

impl FormState {
    /// Sets the script and fills the output folder and name when the user
    /// has not typed them yet.
    pub fn set_script(&mut self, path: &Path) {
        self.script = path.display().to_string();
        self.autofill();
    }

    fn autofill(&mut self) {
        let config = BuildConfig::new(self.script.trim());
        if self.output_dir.trim().is_empty() {
            self.output_dir = config.script_dir().display().to_string();
        }
        if self.exe_name.trim().is_empty() {
            self.exe_name = config.script_stem();
        }
    }

    pub fn can_build(&self) -> bool {
        let script = self.script.trim();
        !script.is_empty() && Path::new(script).is_file()
    }

    pub fn to_config(&self) -> BuildConfig {
        BuildConfig {
            script_path: PathBuf::from(self.script.trim()),
            output_dir: non_empty(&self.output_dir).map(PathBuf::from),
            exe_name: non_empty(&self.exe_name).map(str::to_string),
            icon_path: non_empty(&self.icon).map(PathBuf::from),
            flags: BuildFlags {
                single_file: self.single_file,
                hide_console: self.hide_console,
                clean_before_build: self.clean,
            },
        }
    }

    pub fn post_build_options(&self) -> PostBuildOptions {
        PostBuildOptions {
            organize: self.organize,
            shortcut: self.shortcut,
            open_folder: self.open_folder,
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}

pub fn show(form: &mut FormState, ui: &mut egui::Ui) {
    // CARD 1: INPUT
    theme::card(ui, "1. Input", None, |ui| {
        let (script_field, browse) =
            theme::path_field(ui, "Python script", &mut form.script, "path/to/app.py");
        if browse {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Python", &["py", "pyw"])
                .pick_file()
            {
                form.set_script(&path);
            }
        } else if script_field.lost_focus() && form.can_build() {
            form.autofill();
        }

        let (_, browse) = theme::path_field(
            ui,
            "Icon",
            &mut form.icon,
            "optional: .ico, .png, .jpg, .bmp",
        );
        if browse {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", &["ico", "png", "jpg", "jpeg", "bmp", "gif"])
                .pick_file()
            {
                form.icon = path.display().to_string();
            }
        }
    });

    ui.add_space(12.0);

    // CARD 2: OUTPUT
    theme::card(ui, "2. Output", None, |ui| {
        let (_, browse) = theme::path_field(
            ui,
            "Output folder",
            &mut form.output_dir,
            "defaults to ./dist",
        );
        if browse {
            if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                form.output_dir = dir.display().to_string();
            }
        }

        ui.horizontal(|ui| {
            ui.add_sized(egui::vec2(110.0, 30.0), egui::Label::new("Executable name"));
            theme::text_input(ui, &mut form.exe_name, "defaults to the script name");
        });
    });

    ui.add_space(12.0);

    // CARD 3: OPTIONS
    theme::card(ui, "3. Options", None, |ui| {
        ui.columns(2, |cols| {
            theme::option_toggle(&mut cols[0], &mut form.single_file, "One file", "--onefile");
            theme::option_toggle(&mut cols[0], &mut form.hide_console, "Hide console", "--windowed");
            theme::option_toggle(&mut cols[0], &mut form.clean, "Clean build", "--clean");

            theme::option_toggle(&mut cols[1], &mut form.organize, "Organize project", "exe + source/");
            theme::option_toggle(&mut cols[1], &mut form.shortcut, "Desktop shortcut", "");
            theme::option_toggle(&mut cols[1], &mut form.open_folder, "Open folder", "when done");
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picking_a_script_fills_blank_fields_only() {
        let mut form = FormState::default();
        form.set_script(Path::new("/projects/tool/main.py"));
        assert_eq!(form.output_dir, Path::new("/projects/tool").display().to_string());
        assert_eq!(form.exe_name, "main");

        form.exe_name = "Renamed".into();
        form.set_script(Path::new("/elsewhere/other.py"));
        assert_eq!(form.exe_name, "Renamed");
        assert_eq!(form.output_dir, Path::new("/projects/tool").display().to_string());
    }

    #[test]
    fn blank_fields_become_none() {
        let form = FormState {
            script: " /src/app.py ".into(),
            exe_name: "   ".into(),
            ..Default::default()
        };
        let config = form.to_config();
        assert_eq!(config.script_path, PathBuf::from("/src/app.py"));
        assert_eq!(config.output_dir, None);
        assert_eq!(config.exe_name, None);
        assert_eq!(config.icon_path, None);
        assert_eq!(config.flags, BuildFlags::default());
        assert_eq!(form.post_build_options(), PostBuildOptions::default());
    }

    #[test]
    fn build_needs_an_existing_script() {
        let mut form = FormState::default();
        assert!(!form.can_build());
        form.script = "/definitely/not/here.py".into();
        assert!(!form.can_build());
    }
}
