use clap::{Parser, Subcommand};
use pp_core::{tool::PYTHON_ENV, PackagerTool};
use pp_factory::{builder, icon, toolchain};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "PyPack Factory")]
#[command(version)]
#[command(about = "Turn Python scripts into standalone executables with PyInstaller")]
struct Cli {
    /// Python interpreter used to run PyInstaller
    #[arg(long, global = true, env = PYTHON_ENV)]
    python: Option<String>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    // 1. Build
    /// Package a script (prompts for everything when SCRIPT is omitted)
    Build {
        script: Option<PathBuf>,

        #[arg(short, long)]
        icon: Option<PathBuf>,

        #[arg(short, long)]
        out: Option<PathBuf>,

        #[arg(short, long)]
        name: Option<String>,

        /// One-folder bundle instead of a single executable
        #[arg(long, default_value_t = false)]
        no_onefile: bool,

        /// Keep the console window
        #[arg(long, default_value_t = false)]
        console: bool,

        #[arg(long, default_value_t = false)]
        no_clean: bool,

        /// Leave the packager output as it is
        #[arg(long, default_value_t = false)]
        no_organize: bool,

        #[arg(long, default_value_t = false)]
        no_shortcut: bool,

        /// Open the output folder when done
        #[arg(long, default_value_t = false)]
        open: bool,

        /// Install PyInstaller without asking if it is missing
        #[arg(short, long, default_value_t = false)]
        yes: bool,
    },

    // 2. Icon
    /// Convert an image into a multi-resolution .ico
    Icon { image: Option<PathBuf> },

    // 3. Check
    /// Report whether PyInstaller is available
    Check {
        #[arg(long, default_value_t = false)]
        install: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    pp_core::logging::init(cli.verbose);

    let tool = match cli.python.as_deref().map(str::trim) {
        Some(python) if !python.is_empty() => PackagerTool::python_module(python),
        _ => PackagerTool::default(),
    };

    let result = match cli.command {
        // [1] BUILD
        Commands::Build {
            script,
            icon,
            out,
            name,
            no_onefile,
            console,
            no_clean,
            no_organize,
            no_shortcut,
            open,
            yes,
        } => {
            let args = builder::BuildArgs {
                tool,
                script,
                icon,
                output_dir: out,
                name,
                no_onefile,
                console,
                no_clean,
                no_organize,
                no_shortcut,
                open_folder: open,
                assume_yes: yes,
            };
            builder::run_cli(args).map_err(|e| ("Build Error", e))
        }

        // [2] ICON
        Commands::Icon { image } => {
            icon::run_cli(icon::IconArgs { image }).map_err(|e| ("Icon Error", e))
        }

        // [3] CHECK
        Commands::Check { install } => {
            let args = toolchain::CheckArgs { tool, install };
            toolchain::run_cli(args).map_err(|e| ("Toolchain Error", e))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err((label, e)) => {
            eprintln!("❌ {}: {:#}", label, e);
            ExitCode::FAILURE
        }
    }
}
