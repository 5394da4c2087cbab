//! Script parser for the shcast script language.
//!
//! A script is plain text. Lines starting with [`CONTROL_PREFIX`] are
//! directives (`#$wait:500`, `#$delay:40`); every other non-empty line is
//! literal shell input, and consecutive literal lines are typed as one block.
//!
//! The top-level entry points are [`parse_str`] and [`parse_file`].

use crate::command::{Command, Directive};
use crate::commands::{SetDelay, Wait};
use crate::error::{DirectiveError, ScriptError};
use crate::script::Script;
use std::path::Path;

/// Marks a line as a control directive rather than text to type.
pub const CONTROL_PREFIX: &str = "#$";

/// Parse a script from a string slice and return the resulting commands.
///
/// Lines are split on `\n`; a single trailing `\r` is dropped from each line
/// so CRLF scripts behave like LF ones. Empty lines are skipped and do not
/// split a block of literal text.
///
/// # Errors
///
/// Returns [`ScriptError::Parse`] for the first malformed directive, carrying
/// its 0-based line number. No commands are returned in that case.
///
/// # Example
///
/// ```
/// use shcast::{Command, parse_str};
/// use std::time::Duration;
///
/// let commands = parse_str("echo hi\n#$wait:50\nls\n").unwrap();
/// assert_eq!(
///     commands,
///     vec![
///         Command::typed_text("echo hi"),
///         Command::wait(Duration::from_millis(50)),
///         Command::typed_text("ls"),
///     ]
/// );
/// ```
pub fn parse_str(content: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    let mut text = String::new();

    for (line_num, line) in content.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            continue;
        }
        if let Some(directive) = line.strip_prefix(CONTROL_PREFIX) {
            flush_text(&mut text, &mut commands);
            let cmd = parse_directive(directive).map_err(|source| ScriptError::Parse {
                line: line_num,
                source,
            })?;
            commands.push(cmd);
        } else {
            text.push_str(line);
            text.push('\n');
        }
    }
    flush_text(&mut text, &mut commands);

    Ok(commands)
}

/// Parse a script from a file.
///
/// The file is read as UTF-8 (invalid sequences are replaced) and the
/// script is named after its absolute path.
///
/// # Errors
///
/// Returns [`ScriptError::Read`] if the file cannot be read, or
/// [`ScriptError::Parse`] if the script is malformed.
///
/// # Example
///
/// ```no_run
/// use shcast::parse_file;
///
/// let script = parse_file("demo.sh").unwrap();
/// println!("{} commands", script.len());
/// ```
pub fn parse_file(path: impl AsRef<Path>) -> Result<Script, ScriptError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ScriptError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let commands = parse_str(&String::from_utf8_lossy(&bytes))?;

    let name = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    log::debug!("parsed {} commands from {}", commands.len(), name.display());
    Ok(Script::new(name, commands))
}

type ParseFn = fn(&[&str]) -> Result<Command, DirectiveError>;

static REGISTRY: &[(&str, ParseFn)] = &[
    (SetDelay::NAME, SetDelay::parse_command),
    (Wait::NAME, Wait::parse_command),
];

/// Parse the part of a control line after [`CONTROL_PREFIX`].
///
/// The text is split on `:` into a name and its arguments, and the name is
/// looked up in the directive registry. Unknown names are errors.
///
/// ```
/// use shcast::{Command, parse_directive};
/// use std::time::Duration;
///
/// assert_eq!(
///     parse_directive("delay:0").unwrap(),
///     Command::set_delay(Duration::ZERO)
/// );
/// assert!(parse_directive("frobnicate:1").is_err());
/// ```
pub fn parse_directive(directive: &str) -> Result<Command, DirectiveError> {
    let mut tokens = directive.split(':');
    let name = tokens.next().unwrap_or_default();
    let args: Vec<&str> = tokens.collect();

    REGISTRY
        .iter()
        .find(|(cmd_name, _)| *cmd_name == name)
        .map(|(_, parse)| parse(&args))
        .unwrap_or_else(|| Err(DirectiveError::UnknownCommand(name.to_string())))
}

/// Move accumulated literal text into a [`TypedText`](crate::TypedText)
/// command, dropping the newline that terminated its last line.
fn flush_text(text: &mut String, commands: &mut Vec<Command>) {
    if text.is_empty() {
        return;
    }
    let mut typed = std::mem::take(text);
    typed.pop();
    commands.push(Command::typed_text(typed));
}
