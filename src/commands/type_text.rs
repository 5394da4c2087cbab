//! [`TypedText`] command — simulates human typing character by character.
//!
//! Produced by any run of literal (non-directive) script lines.

use crate::command::{Context, ScriptCommand};
use anyhow::{Context as _, Result};
use async_trait::async_trait;
use tokio::time::sleep;

/// Emits `text` one character at a time, pausing for the context's current
/// typing delay after each character.
///
/// The text may span several lines; embedded newlines are typed like any
/// other character. A failed write stops typing immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedText {
    pub text: String,
}

impl TypedText {
    pub const NAME: &'static str = "text";

    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait(?Send)]
impl ScriptCommand for TypedText {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn execute(&self, ctx: &mut Context) -> Result<()> {
        let mut buf = [0u8; 4];
        for ch in self.text.chars() {
            ctx.emit(ch.encode_utf8(&mut buf).as_bytes())
                .context("Failed to write typed text")?;
            sleep(ctx.char_delay()).await;
        }
        Ok(())
    }
}
