use pp_core::layout::{CONVERTED_ICON_SUFFIX, ICON_EXTENSION};
use std::path::{Path, PathBuf};

/// True when `path` already carries the `.ico` extension (any case).
pub fn is_icon_path(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case(ICON_EXTENSION))
}

/// `dir/photo.png` -> `dir/photo_converted.ico`
pub fn converted_icon_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "icon".into());
    source.with_file_name(format!(
        "{}{}.{}",
        stem, CONVERTED_ICON_SUFFIX, ICON_EXTENSION
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_extension_is_case_insensitive() {
        assert!(is_icon_path(Path::new("a/app.ico")));
        assert!(is_icon_path(Path::new("a/APP.ICO")));
        assert!(!is_icon_path(Path::new("a/app.png")));
        assert!(!is_icon_path(Path::new("a/ico")));
    }

    #[test]
    fn converted_name_sits_next_to_source() {
        assert_eq!(
            converted_icon_path(Path::new("/img/logo.png")),
            PathBuf::from("/img/logo_converted.ico")
        );
    }
}
