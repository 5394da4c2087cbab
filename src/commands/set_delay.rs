//! [`SetDelay`] command — changes the typing speed of later text.
//!
//! Script syntax: `#$delay:40` (milliseconds per character)

use crate::command::{Context, Directive, ScriptCommand};
use crate::commands::parse_millis;
use crate::error::DirectiveError;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Sets the per-character delay used by every [`TypedText`](super::TypedText)
/// executed after it. Zero means instant typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetDelay {
    pub delay: Duration,
}

impl SetDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Directive for SetDelay {
    const NAME: &'static str = "delay";

    fn parse(args: &[&str]) -> Result<Self, DirectiveError> {
        Ok(Self::new(parse_millis(Self::NAME, args)?))
    }
}

#[async_trait(?Send)]
impl ScriptCommand for SetDelay {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn execute(&self, ctx: &mut Context) -> Result<()> {
        ctx.set_typing_delay(self.delay);
        Ok(())
    }
}
