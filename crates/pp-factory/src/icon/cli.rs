use super::core::normalize_icon;
use super::types::IconArgs;
use super::utils::is_icon_path;
use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input};
use std::path::PathBuf;

pub fn run_cli(args: IconArgs) -> Result<()> {
    let image = match args.image {
        Some(path) => path,
        None => {
            let raw: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Image to convert (.png/.jpg/.bmp)")
                .interact_text()?;
            PathBuf::from(raw.trim())
        }
    };

    if is_icon_path(&image) {
        println!("ℹ️ {:?} is already an icon.", image);
        return Ok(());
    }

    println!("🎨 Converting {:?} to ICO...", image.file_name().unwrap_or_default());
    let icon = normalize_icon(&image).context("Icon conversion failed")?;
    println!("✅ Icon created: {}", icon.display());
    Ok(())
}
