use super::core::{check_packager, install_packager};
use super::types::{CheckArgs, InstallStatus};
use anyhow::{bail, Result};
use dialoguer::{theme::ColorfulTheme, Confirm};
use pp_core::PackagerTool;

pub fn run_cli(args: CheckArgs) -> Result<()> {
    match check_packager(&args.tool) {
        Ok(version) => {
            println!("✅ {} {}", args.tool.display_name(), version);
            Ok(())
        }
        Err(e) if args.install => {
            println!("⚠️ {}", e);
            install_with_output(&args.tool)?;
            Ok(())
        }
        Err(e) => bail!("{}\nRun `check --install` to install it.", e),
    }
}

/// Makes sure the packager can run before a build starts, offering to
/// install it when it is missing. Declining aborts the build.
pub fn ensure_packager(tool: &PackagerTool, assume_yes: bool) -> Result<String> {
    let err = match check_packager(tool) {
        Ok(version) => return Ok(version),
        Err(e) => e,
    };

    println!("⚠️ {}", err);
    if tool.interpreter().is_none() {
        bail!(err);
    }

    let install = assume_yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("PyInstaller is not installed. Install it now?")
            .default(true)
            .interact()?;

    if !install {
        bail!("Build aborted: packaging tool missing.");
    }
    install_with_output(tool)
}

fn install_with_output(tool: &PackagerTool) -> Result<String> {
    let version = install_packager(tool, |status| match status {
        InstallStatus::Starting(cmd) => println!("📦 {}", cmd),
        InstallStatus::Line(line) => println!("   {}", line),
        InstallStatus::Finished(version) => println!("✅ Installed: {}", version),
        InstallStatus::Error(e) => eprintln!("❌ {}", e),
    })?;
    Ok(version)
}
