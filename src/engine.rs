use crate::command::{Command, Context, OutputHandler, stdout_handler};
use crate::error::ScriptError;
use crate::script::Script;
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Starting values for the typing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Pause after each typed character until a `#$delay` changes it.
    pub typing_delay: Duration,
    /// Maximum random deviation from `typing_delay`, in either direction.
    pub jitter: Duration,
}

impl EngineConfig {
    pub const DEFAULT_TYPING_DELAY: Duration = Duration::from_millis(25);
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            typing_delay: Self::DEFAULT_TYPING_DELAY,
            jitter: Duration::ZERO,
        }
    }
}

/// Runs parsed scripts, owning the session state (the typing delay) that
/// commands read and update.
pub struct Engine {
    ctx: Context,
}

impl Engine {
    /// Create an engine that types to stdout.
    pub fn new(config: EngineConfig) -> Self {
        Self::from_handler(config, stdout_handler())
    }

    /// Create an engine that sends every emitted chunk to `handler` instead
    /// of stdout. An `Err` from the handler fails the running command.
    pub fn with_handler<F>(config: EngineConfig, handler: F) -> Self
    where
        F: Fn(&[u8]) -> io::Result<()> + Send + Sync + 'static,
    {
        Self::from_handler(config, Arc::new(handler))
    }

    fn from_handler(config: EngineConfig, handler: OutputHandler) -> Self {
        Self {
            ctx: Context::new(config.typing_delay, config.jitter, handler),
        }
    }

    /// The per-character delay currently in effect.
    pub fn typing_delay(&self) -> Duration {
        self.ctx.typing_delay()
    }

    /// Run every command of `script` in order.
    ///
    /// # Errors
    ///
    /// Stops at the first failing command and returns [`ScriptError::Run`]
    /// with its 0-based index. Output already produced is not undone.
    pub async fn run(&mut self, script: &Script) -> Result<(), ScriptError> {
        log::info!(
            "running {} ({} commands)",
            script.name().display(),
            script.len()
        );
        self.execute(script.commands()).await?;
        log::info!("finished {}", script.name().display());
        Ok(())
    }

    /// Run a sequence of commands in order, stopping at the first failure.
    pub async fn execute(&mut self, commands: &[Command]) -> Result<(), ScriptError> {
        for (index, command) in commands.iter().enumerate() {
            log::debug!("command {index}: {command:?}");
            command
                .execute(&mut self.ctx)
                .await
                .map_err(|source| ScriptError::Run { index, source })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;
    use std::sync::Mutex;
    use tokio::time::Instant;

    type Emitted = Arc<Mutex<Vec<(Instant, u8)>>>;

    fn capturing_engine(config: EngineConfig) -> (Engine, Emitted) {
        let emitted: Emitted = Arc::new(Mutex::new(Vec::new()));
        let sink = emitted.clone();
        let engine = Engine::with_handler(config, move |data| {
            let now = Instant::now();
            sink.lock().unwrap().extend(data.iter().map(|b| (now, *b)));
            Ok(())
        });
        (engine, emitted)
    }

    fn text(emitted: &Emitted) -> String {
        let bytes: Vec<u8> = emitted.lock().unwrap().iter().map(|(_, b)| *b).collect();
        String::from_utf8(bytes).unwrap()
    }

    fn gap(emitted: &Emitted, i: usize) -> Duration {
        let e = emitted.lock().unwrap();
        e[i + 1].0 - e[i].0
    }

    fn assert_about(actual: Duration, expected: Duration) {
        assert!(
            actual >= expected && actual <= expected + Duration::from_millis(3),
            "expected ~{expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.typing_delay, Duration::from_millis(25));
        assert_eq!(config.jitter, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_commands_in_order() {
        let (mut engine, emitted) = capturing_engine(EngineConfig::default());
        let commands = parse_str("echo hi\n#$wait:50\n#$delay:0\nls\n").unwrap();
        let script = Script::new("t", commands);

        engine.run(&script).await.unwrap();

        assert_eq!(text(&emitted), "echo hils");
        // Default delay inside the first block.
        assert_about(gap(&emitted, 0), Duration::from_millis(25));
        // Trailing character delay plus the explicit wait.
        assert_about(gap(&emitted, 6), Duration::from_millis(75));
        // Zero delay after `#$delay:0`.
        assert_about(gap(&emitted, 7), Duration::ZERO);
        assert_eq!(engine.typing_delay(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_applies_only_to_later_text() {
        let (mut engine, emitted) = capturing_engine(EngineConfig::default());
        let commands = parse_str("#$delay:100\nab\n#$delay:0\ncd\n").unwrap();

        engine.execute(&commands).await.unwrap();

        assert_eq!(text(&emitted), "abcd");
        assert_about(gap(&emitted, 0), Duration::from_millis(100));
        // `b` still sleeps 100ms before the delay change takes effect.
        assert_about(gap(&emitted, 1), Duration::from_millis(100));
        assert_about(gap(&emitted, 2), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_initial_delay() {
        let (mut engine, emitted) = capturing_engine(EngineConfig {
            typing_delay: Duration::from_millis(60),
            jitter: Duration::ZERO,
        });
        engine.execute(&[Command::typed_text("ok")]).await.unwrap();
        assert_about(gap(&emitted, 0), Duration::from_millis(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_script_is_ok() {
        let (mut engine, emitted) = capturing_engine(EngineConfig::default());
        engine.run(&Script::new("empty", Vec::new())).await.unwrap();
        assert!(emitted.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_pauses_whole_run() {
        let (mut engine, _emitted) = capturing_engine(EngineConfig::default());
        let start = Instant::now();
        engine
            .execute(&[
                Command::wait(Duration::from_millis(400)),
                Command::wait(Duration::from_millis(100)),
            ])
            .await
            .unwrap();
        assert_about(Instant::now() - start, Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_failure_aborts_run_with_index() {
        let written = Arc::new(Mutex::new(Vec::<u8>::new()));
        let sink = written.clone();
        // Accept four bytes, then fail like a closed pipe.
        let mut engine = Engine::with_handler(EngineConfig::default(), move |data| {
            let mut out = sink.lock().unwrap();
            if out.len() >= 4 {
                return Err(io::ErrorKind::BrokenPipe.into());
            }
            out.extend_from_slice(data);
            Ok(())
        });
        let commands = vec![
            Command::typed_text("ab"),
            Command::wait(Duration::from_millis(10)),
            Command::typed_text("cdef"),
            Command::set_delay(Duration::from_millis(999)),
            Command::typed_text("never"),
        ];

        let err = engine.execute(&commands).await.unwrap_err();

        assert_eq!(err.command_index(), Some(2));
        assert!(err.to_string().ends_with("(command 2)"), "got: {err}");
        assert_eq!(written.lock().unwrap().as_slice(), b"abcd");
        // The later `#$delay` never ran.
        assert_eq!(engine.typing_delay(), EngineConfig::DEFAULT_TYPING_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_in_first_command() {
        let mut engine = Engine::with_handler(EngineConfig::default(), |_| {
            Err(io::ErrorKind::BrokenPipe.into())
        });
        let script = Script::new("t", parse_str("x\n#$delay:1\n").unwrap());

        let err = engine.run(&script).await.unwrap_err();

        assert_eq!(err.command_index(), Some(0));
        assert_eq!(engine.typing_delay(), EngineConfig::DEFAULT_TYPING_DELAY);
    }
}
