//! Error types for parsing and running scripts.

use std::num::ParseIntError;
use std::path::PathBuf;

/// A control directive that could not be turned into a command.
#[derive(Debug, thiserror::Error)]
pub enum DirectiveError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("no arguments given to command '{0}'")]
    MissingArgument(&'static str),

    #[error("invalid argument to command '{command}': {value:?}")]
    MalformedArgument {
        command: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Errors surfaced by the two public entry points: parsing a script and
/// running it.
///
/// Line numbers and command indices are 0-based.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source} (line {line})")]
    Parse {
        line: usize,
        #[source]
        source: DirectiveError,
    },

    #[error("{source} (command {index})")]
    Run {
        index: usize,
        #[source]
        source: anyhow::Error,
    },
}

impl ScriptError {
    /// The offending source line, for parse errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// The index of the failing command, for run errors.
    pub fn command_index(&self) -> Option<usize> {
        match self {
            Self::Run { index, .. } => Some(*index),
            _ => None,
        }
    }
}
