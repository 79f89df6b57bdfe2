use std::path::PathBuf;

/// Arguments of the `icon` command.
#[derive(Debug, Clone, Default)]
pub struct IconArgs {
    pub image: Option<PathBuf>,
}
