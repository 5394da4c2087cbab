//! The external terminal recorder (asciinema) that captures a run.
//!
//! The engine itself only writes characters to stdout; recording is done by
//! wrapping the whole process in `asciinema rec`.

use anyhow::{Context as _, Result, bail};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};

/// Handle to a terminal recording program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorder {
    program: String,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

impl Recorder {
    pub const DEFAULT_PROGRAM: &'static str = "asciinema";

    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Check if the recorder is installed by asking it for its help text.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-h")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Fail with an operator-facing message if the recorder is missing.
    pub fn ensure_available(&self) -> Result<()> {
        if !self.is_available() {
            bail!("{} is not installed", self.program);
        }
        log::debug!("found recorder {}", self.program);
        Ok(())
    }

    /// Record `inner_command` (a shell command line) into `output`.
    ///
    /// Blocks until the recorder exits; an existing `output` is overwritten.
    pub fn record(&self, output: &Path, inner_command: &str) -> Result<()> {
        log::info!("recording to {}", output.display());
        let status = Command::new(&self.program)
            .args(self.record_args(output.as_os_str(), inner_command))
            .status()
            .with_context(|| format!("Failed to start {}", self.program))?;
        if !status.success() {
            bail!("{} exited with {}", self.program, status);
        }
        Ok(())
    }

    fn record_args<'a>(&self, output: &'a OsStr, inner_command: &'a str) -> [&'a OsStr; 5] {
        [
            OsStr::new("rec"),
            OsStr::new("--overwrite"),
            OsStr::new("-c"),
            OsStr::new(inner_command),
            output,
        ]
    }
}

/// Quote `arg` for a POSIX shell command line.
///
/// Arguments made only of safe characters are left alone; anything else is
/// wrapped in single quotes.
pub fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@%+,".contains(c));
    if safe {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_program() {
        assert_eq!(Recorder::default().program(), "asciinema");
    }

    #[test]
    fn test_missing_program_not_available() {
        let recorder = Recorder::new("shcast-no-such-recorder-binary");
        assert!(!recorder.is_available());
        let err = recorder.ensure_available().unwrap_err();
        assert_eq!(
            err.to_string(),
            "shcast-no-such-recorder-binary is not installed"
        );
    }

    #[test]
    fn test_record_args() {
        let recorder = Recorder::default();
        let args = recorder.record_args(OsStr::new("out.cast"), "shcast demo.sh");
        assert_eq!(
            args,
            [
                OsStr::new("rec"),
                OsStr::new("--overwrite"),
                OsStr::new("-c"),
                OsStr::new("shcast demo.sh"),
                OsStr::new("out.cast"),
            ]
        );
    }

    #[test]
    fn test_record_with_missing_program_fails() {
        let recorder = Recorder::new("shcast-no-such-recorder-binary");
        assert!(recorder.record(Path::new("x.cast"), "true").is_err());
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("demo.sh"), "demo.sh");
        assert_eq!(shell_quote("/tmp/a-b_c"), "/tmp/a-b_c");
        assert_eq!(shell_quote("my script.sh"), "'my script.sh'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("$HOME"), "'$HOME'");
    }
}
