use super::{
    async_handler::BuildSupervisor,
    types::{BuildArgs, BuildStatus},
};
use crate::icon::normalize_icon;
use crate::organizer::{finish_build, PostBuildOptions};
use crate::toolchain::ensure_packager;
use anyhow::{bail, Context, Result};
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use indicatif::{ProgressBar, ProgressStyle};
use pp_core::{BuildConfig, BuildOutcome};
use std::{env, path::PathBuf, sync::mpsc, time::Duration};

const OPTION_LABELS: [&str; 6] = [
    "Single file (--onefile)",
    "Hide console (--windowed)",
    "Clean build (--clean)",
    "Organize output folder",
    "Desktop shortcut",
    "Open folder when done",
];

pub fn run_cli(args: BuildArgs) -> Result<()> {
    // 1. Collect the request
    let (config, options) = match &args.script {
        Some(script) => from_flags(script.clone(), &args),
        None => interactive(&args)?,
    };
    config.validate()?;

    // 2. Toolchain
    let version = ensure_packager(&args.tool, args.assume_yes)?;
    println!("🔧 {} {}", args.tool.display_name(), version);

    // 3. Icon
    let mut config = config;
    if let Some(icon) = config.icon_path().map(|p| p.to_path_buf()) {
        match normalize_icon(&icon) {
            Ok(ico) => {
                if ico != icon {
                    println!("🎨 Icon converted: {}", ico.display());
                }
                config.icon_path = Some(ico);
            }
            Err(e) => {
                println!("⚠️ {}. Building without an icon.", e);
                config.icon_path = None;
            }
        }
    }

    // 4. Build
    let (tx, rx) = mpsc::channel();
    let mut supervisor = BuildSupervisor::new();
    supervisor.start(args.tool.clone(), config.clone(), tx)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] {msg}",
    )?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Building {}...", config.artifact_name()));

    for status in rx {
        match status {
            BuildStatus::Starting => {}
            BuildStatus::Command(cmd) => pb.println(format!("🚀 {}", cmd)),
            BuildStatus::Line(line) => pb.println(format!("   {}", line)),
            BuildStatus::Finished(_) => break,
        }
    }
    pb.finish_and_clear();

    let outcome = supervisor
        .wait()
        .unwrap_or_else(|| BuildOutcome::failure("Build result was lost"));

    // 5. Post-build
    let artifact = match outcome {
        BuildOutcome::Success { artifact_path } => artifact_path,
        BuildOutcome::Failure { message } => bail!("{}", message),
        BuildOutcome::Cancelled => bail!("Build cancelled."),
    };
    println!("✅ Build succeeded: {}", artifact.display());

    let work_dir = env::current_dir().context("Failed to read working directory")?;
    let final_path = finish_build(&artifact, &config, options, &work_dir, |status| {
        println!("{}", status)
    });

    println!();
    println!("==============================");
    println!("✨ Executable: {}", final_path.display());
    println!("==============================");
    Ok(())
}

fn from_flags(script: PathBuf, args: &BuildArgs) -> (BuildConfig, PostBuildOptions) {
    let mut config = BuildConfig::for_script(script);
    if let Some(dir) = &args.output_dir {
        config.output_dir = Some(dir.clone());
    }
    if let Some(name) = &args.name {
        config.exe_name = Some(name.clone());
    }
    config.icon_path = args.icon.clone();
    config.flags.single_file = !args.no_onefile;
    config.flags.hide_console = !args.console;
    config.flags.clean_before_build = !args.no_clean;

    let options = PostBuildOptions {
        organize: !args.no_organize,
        shortcut: !args.no_shortcut,
        open_folder: args.open_folder,
    };
    (config, options)
}

fn interactive(args: &BuildArgs) -> Result<(BuildConfig, PostBuildOptions)> {
    let theme = ColorfulTheme::default();

    let script: String = Input::with_theme(&theme)
        .with_prompt("Python script (.py)")
        .interact_text()?;
    let mut config = BuildConfig::for_script(script.trim());

    let output: String = Input::with_theme(&theme)
        .with_prompt("Output folder")
        .default(config.script_dir().display().to_string())
        .interact_text()?;
    let name: String = Input::with_theme(&theme)
        .with_prompt("Executable name")
        .default(config.script_stem())
        .interact_text()?;
    let icon: String = Input::with_theme(&theme)
        .with_prompt("Icon (optional, any image)")
        .allow_empty(true)
        .interact_text()?;

    config.output_dir = Some(PathBuf::from(output.trim()));
    config.exe_name = Some(name.trim().to_string());
    config.icon_path = match icon.trim() {
        "" => args.icon.clone(),
        path => Some(PathBuf::from(path)),
    };

    let defaults = [true; OPTION_LABELS.len()];
    let picked = MultiSelect::with_theme(&theme)
        .with_prompt("Build options")
        .items(&OPTION_LABELS[..])
        .defaults(&defaults[..])
        .interact()?;
    let on = |i: usize| picked.contains(&i);

    config.flags.single_file = on(0);
    config.flags.hide_console = on(1);
    config.flags.clean_before_build = on(2);
    let options = PostBuildOptions {
        organize: on(3),
        shortcut: on(4),
        open_folder: on(5),
    };
    Ok((config, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_config_and_options() {
        let args = BuildArgs {
            script: Some(PathBuf::from("/src/game.py")),
            name: Some("Game".into()),
            no_onefile: true,
            no_shortcut: true,
            open_folder: true,
            ..Default::default()
        };
        let (config, options) = from_flags(PathBuf::from("/src/game.py"), &args);

        assert_eq!(config.exe_name(), Some("Game"));
        assert_eq!(config.output_dir(), Some(std::path::Path::new("/src")));
        assert!(!config.flags.single_file);
        assert!(config.flags.hide_console);
        assert!(config.flags.clean_before_build);
        assert!(options.organize);
        assert!(!options.shortcut);
        assert!(options.open_folder);
    }
}
