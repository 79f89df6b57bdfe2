use super::utils::{converted_icon_path, is_icon_path};
use image::{
    codecs::ico::{IcoEncoder, IcoFrame},
    imageops::{self, FilterType},
    ExtendedColorType, RgbaImage,
};
use pp_core::{layout::ICON_SIZES, PackError};
use rayon::prelude::*;
use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Returns a path the packaging tool accepts as `--icon`.
///
/// `.ico` inputs come back untouched without touching the disk. Anything
/// else is converted into `{stem}_converted.ico` next to the source.
pub fn normalize_icon(path: &Path) -> Result<PathBuf, PackError> {
    if is_icon_path(path) {
        return Ok(path.to_path_buf());
    }

    let output = converted_icon_path(path);
    convert_to_ico(path, &output)?;
    info!(source = ?path, icon = ?output, "icon converted");
    Ok(output)
}

/// Decodes `source`, renders it at every size in [`ICON_SIZES`] with a
/// Lanczos filter and writes all frames into one ICO container.
pub fn convert_to_ico(source: &Path, output: &Path) -> Result<(), PackError> {
    let image = image::open(source).map_err(|e| PackError::conversion(source, e))?;
    let rgba = image.to_rgba8();
    debug!(width = rgba.width(), height = rgba.height(), "icon source decoded");

    // Resize in parallel, keep the descending order for the container
    let frames: Vec<RgbaImage> = ICON_SIZES
        .par_iter()
        .map(|&size| imageops::resize(&rgba, size, size, FilterType::Lanczos3))
        .collect();

    let encoded = frames
        .iter()
        .map(|frame| {
            IcoFrame::as_png(
                frame.as_raw(),
                frame.width(),
                frame.height(),
                ExtendedColorType::Rgba8,
            )
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| PackError::conversion(source, e))?;

    let file = File::create(output).map_err(|e| PackError::conversion(output, e))?;
    IcoEncoder::new(BufWriter::new(file))
        .encode_images(&encoded)
        .map_err(|e| PackError::conversion(output, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::fs;

    #[test]
    fn ico_input_is_returned_untouched() {
        // Does not exist: proves no I/O happens.
        let path = Path::new("/nowhere/app.ICO");
        let once = normalize_icon(path).unwrap();
        assert_eq!(once, path);
        assert_eq!(normalize_icon(&once).unwrap(), once);
    }

    #[test]
    fn raster_becomes_six_frame_icon() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("logo.png");
        RgbImage::from_pixel(300, 200, Rgb([200, 40, 10]))
            .save(&source)
            .unwrap();

        let icon = normalize_icon(&source).unwrap();
        assert_eq!(icon, dir.path().join("logo_converted.ico"));

        // ICONDIR: reserved(2) type(2) count(2), then 16-byte entries
        let bytes = fs::read(&icon).unwrap();
        assert_eq!(&bytes[0..4], &[0, 0, 1, 0]);
        let count = u16::from_le_bytes([bytes[4], bytes[5]]) as usize;
        assert_eq!(count, 6);

        let widths: Vec<u32> = (0..count)
            .map(|i| match bytes[6 + i * 16] {
                0 => 256,
                w => w as u32,
            })
            .collect();
        assert_eq!(widths, ICON_SIZES.to_vec());

        // Converting the result again is a no-op.
        assert_eq!(normalize_icon(&icon).unwrap(), icon);
    }

    #[test]
    fn undecodable_source_is_conversion_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("broken.png");
        fs::write(&source, b"not an image").unwrap();

        let err = normalize_icon(&source).unwrap_err();
        assert!(matches!(err, PackError::Conversion { .. }));
        assert!(!dir.path().join("broken_converted.ico").exists());
    }

    #[test]
    fn missing_source_is_conversion_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = normalize_icon(&dir.path().join("gone.jpg")).unwrap_err();
        assert!(matches!(err, PackError::Conversion { .. }));
    }
}
