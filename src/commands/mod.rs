mod set_delay;
mod type_text;
mod wait;

pub use set_delay::SetDelay;
pub use type_text::TypedText;
pub use wait::Wait;

use crate::error::DirectiveError;
use std::time::Duration;

/// Read `args[0]` as a whole number of milliseconds.
pub(crate) fn parse_millis(
    command: &'static str,
    args: &[&str],
) -> Result<Duration, DirectiveError> {
    let value = args.first().ok_or(DirectiveError::MissingArgument(command))?;
    let ms: u64 = value
        .parse()
        .map_err(|source| DirectiveError::MalformedArgument {
            command,
            value: (*value).to_string(),
            source,
        })?;
    Ok(Duration::from_millis(ms))
}
