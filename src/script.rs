use crate::command::Command;
use crate::error::ScriptError;
use std::path::{Path, PathBuf};

/// A parsed script: where it came from and the commands to run, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    name: PathBuf,
    commands: Vec<Command>,
}

impl Script {
    pub fn new(name: impl Into<PathBuf>, commands: Vec<Command>) -> Self {
        Self {
            name: name.into(),
            commands,
        }
    }

    /// Read and parse the script at `path`. See [`crate::parse_file`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        crate::parser::parse_file(path)
    }

    /// The resolved path of the source file, used in diagnostics.
    pub fn name(&self) -> &Path {
        &self.name
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
