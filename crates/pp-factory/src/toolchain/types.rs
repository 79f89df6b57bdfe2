use pp_core::PackagerTool;

/// Progress of a packager installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStatus {
    Starting(String), // Command line
    Line(String),
    Finished(String), // Version now reported by the tool
    Error(String),
}

/// Arguments of the `check` command.
#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
    pub tool: PackagerTool,
    pub install: bool,
}
