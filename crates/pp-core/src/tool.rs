use std::env;
use tracing::debug;

/// Environment variable that overrides the Python interpreter.
pub const PYTHON_ENV: &str = "PP_PYTHON";
/// Module name passed to `python -m`.
pub const PACKAGER_MODULE: &str = "PyInstaller";
/// Package name passed to `pip install`.
pub const PACKAGER_PACKAGE: &str = "pyinstaller";

/// How the external packaging tool is invoked: a program plus the fixed
/// arguments that precede the build options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagerTool {
    pub program: String,
    pub prefix_args: Vec<String>,
}

impl PackagerTool {
    pub fn new(program: impl Into<String>, prefix_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            prefix_args,
        }
    }

    /// `<interpreter> -m PyInstaller`
    pub fn python_module(interpreter: impl Into<String>) -> Self {
        Self::new(interpreter, vec!["-m".into(), PACKAGER_MODULE.into()])
    }

    /// Interpreter from `PP_PYTHON`, falling back to the platform default.
    pub fn from_env() -> Self {
        match env::var(PYTHON_ENV) {
            Ok(python) if !python.trim().is_empty() => {
                debug!(python = python.trim(), "interpreter from {}", PYTHON_ENV);
                Self::python_module(python.trim())
            }
            _ => Self::default(),
        }
    }

    /// Program followed by its prefix arguments.
    pub fn invocation(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.prefix_args.len() + 1);
        args.push(self.program.clone());
        args.extend(self.prefix_args.iter().cloned());
        args
    }

    /// The interpreter, when the tool is run as a Python module. Installing
    /// through pip is only possible in that case.
    pub fn interpreter(&self) -> Option<&str> {
        match self.prefix_args.as_slice() {
            [flag, module] if flag == "-m" && module == PACKAGER_MODULE => Some(&self.program),
            _ => None,
        }
    }

    pub fn display_name(&self) -> String {
        self.invocation().join(" ")
    }
}

impl Default for PackagerTool {
    fn default() -> Self {
        Self::python_module(default_python())
    }
}

pub fn default_python() -> &'static str {
    if cfg!(windows) {
        "python"
    } else {
        "python3"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_module_invocation() {
        let tool = PackagerTool::python_module("py");
        assert_eq!(tool.invocation(), vec!["py", "-m", "PyInstaller"]);
        assert_eq!(tool.interpreter(), Some("py"));
        assert_eq!(tool.display_name(), "py -m PyInstaller");
    }

    #[test]
    fn standalone_program_has_no_interpreter() {
        let tool = PackagerTool::new("pyinstaller", vec![]);
        assert_eq!(tool.invocation(), vec!["pyinstaller"]);
        assert_eq!(tool.interpreter(), None);
    }
}
