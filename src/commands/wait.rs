//! [`Wait`] command — pauses execution for a fixed duration.
//!
//! Script syntax: `#$wait:500` (milliseconds)

use crate::command::{Context, Directive, ScriptCommand};
use crate::commands::parse_millis;
use crate::error::DirectiveError;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Pauses execution for a fixed duration before running the next command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wait {
    pub duration: Duration,
}

impl Wait {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl Directive for Wait {
    const NAME: &'static str = "wait";

    fn parse(args: &[&str]) -> Result<Self, DirectiveError> {
        Ok(Self::new(parse_millis(Self::NAME, args)?))
    }
}

#[async_trait(?Send)]
impl ScriptCommand for Wait {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn execute(&self, _ctx: &mut Context) -> Result<()> {
        tokio::time::sleep(self.duration).await;
        Ok(())
    }
}
