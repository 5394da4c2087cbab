//! The [`ScriptCommand`] trait, the closed [`Command`] type the parser
//! produces, and the [`Context`] commands execute against.

use crate::commands::{SetDelay, TypedText, Wait};
use crate::error::DirectiveError;
use anyhow::Result;
use async_trait::async_trait;
use rand::Rng;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

pub(crate) type OutputHandler = Arc<dyn Fn(&[u8]) -> io::Result<()> + Send + Sync>;

/// Mutable session state passed to [`ScriptCommand::execute`].
///
/// Holds the current typing delay, which only [`SetDelay`] changes, and the
/// sink every typed character is written to.
pub struct Context {
    pub(crate) typing_delay: Duration,
    pub(crate) jitter: Duration,
    pub(crate) output_handler: OutputHandler,
}

impl Context {
    pub(crate) fn new(
        typing_delay: Duration,
        jitter: Duration,
        output_handler: OutputHandler,
    ) -> Self {
        Self {
            typing_delay,
            jitter,
            output_handler,
        }
    }

    /// The per-character delay currently in effect.
    pub fn typing_delay(&self) -> Duration {
        self.typing_delay
    }

    /// Replace the per-character delay for every character typed from now on.
    pub fn set_typing_delay(&mut self, delay: Duration) {
        self.typing_delay = delay;
    }

    /// Pass bytes through the output handler.
    pub fn emit(&self, data: &[u8]) -> io::Result<()> {
        (self.output_handler)(data)
    }

    /// How long to pause after emitting one character.
    ///
    /// Equal to the typing delay unless jitter is configured, in which case a
    /// uniform offset in `[-jitter, +jitter]` is applied, floored at zero.
    pub fn char_delay(&self) -> Duration {
        if self.jitter.is_zero() {
            return self.typing_delay;
        }
        let jitter_ms = saturating_millis(self.jitter);
        let spread = jitter_ms.saturating_mul(2);
        let offset = rand::thread_rng().gen_range(0..=spread);
        let base_ms = saturating_millis(self.typing_delay);
        Duration::from_millis(base_ms.saturating_add(offset).saturating_sub(jitter_ms))
    }
}

fn saturating_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Default output handler: write straight to stdout, flushing every chunk so
/// characters appear one at a time.
pub(crate) fn stdout_handler() -> OutputHandler {
    Arc::new(|data: &[u8]| -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(data)?;
        out.flush()
    })
}

/// A single script command.
#[async_trait(?Send)]
pub trait ScriptCommand {
    /// The command name, accessible through a [`Command`] value.
    fn name(&self) -> &'static str;

    /// Execute the command against the session context.
    async fn execute(&self, ctx: &mut Context) -> Result<()>;
}

/// A command written as a `#$name:arg...` control line.
///
/// To add a directive:
///
/// 1. Implement this trait; `NAME` is the keyword after the prefix.
/// 2. Add a variant to [`Command`] and a `From` impl for it.
/// 3. Add `(MyCmd::NAME, MyCmd::parse_command)` to the registry in
///    [`crate::parser`].
pub trait Directive: ScriptCommand + Into<Command> + Sized {
    const NAME: &'static str;

    /// Parse from the colon-separated tokens following the name.
    fn parse(args: &[&str]) -> Result<Self, DirectiveError>;

    /// Parse and wrap in [`Command`]. Used as the registry's function pointer.
    fn parse_command(args: &[&str]) -> Result<Command, DirectiveError> {
        Ok(Self::parse(args)?.into())
    }
}

/// One unit of a parsed script.
///
/// The set of variants is closed; the order in a script's command list is
/// the order of execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    TypedText(TypedText),
    Wait(Wait),
    SetDelay(SetDelay),
}

impl Command {
    /// Literal shell text to be typed.
    pub fn typed_text(text: impl Into<String>) -> Self {
        Self::TypedText(TypedText::new(text))
    }

    /// A pause of `duration`.
    pub fn wait(duration: Duration) -> Self {
        Self::Wait(Wait::new(duration))
    }

    /// A change of the per-character typing delay.
    pub fn set_delay(delay: Duration) -> Self {
        Self::SetDelay(SetDelay::new(delay))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TypedText(cmd) => cmd.name(),
            Self::Wait(cmd) => cmd.name(),
            Self::SetDelay(cmd) => cmd.name(),
        }
    }

    pub async fn execute(&self, ctx: &mut Context) -> Result<()> {
        match self {
            Self::TypedText(cmd) => cmd.execute(ctx).await,
            Self::Wait(cmd) => cmd.execute(ctx).await,
            Self::SetDelay(cmd) => cmd.execute(ctx).await,
        }
    }
}

impl From<TypedText> for Command {
    fn from(cmd: TypedText) -> Self {
        Self::TypedText(cmd)
    }
}

impl From<Wait> for Command {
    fn from(cmd: Wait) -> Self {
        Self::Wait(cmd)
    }
}

impl From<SetDelay> for Command {
    fn from(cmd: SetDelay) -> Self {
        Self::SetDelay(cmd)
    }
}
