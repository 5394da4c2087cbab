//! # shcast
//!
//! Types out a shell script at human speed so a terminal recorder such as
//! asciinema can capture a believable live session.
//!
//! ## Quick start
//!
//! ```no_run
//! use shcast::{Engine, EngineConfig, parse_file};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let script = parse_file("demo.sh")?;
//!     let mut engine = Engine::new(EngineConfig::default());
//!     engine.run(&script).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Script syntax
//!
//! Every line that does not start with `#$` is literal shell input. Runs of
//! such lines are typed as one block, newlines included. Empty lines are
//! skipped.
//!
//! | Directive | Description |
//! |-----------|-------------|
//! | `#$wait:500` | Pause for 500 ms |
//! | `#$delay:40` | Type later text with 40 ms between characters |
//!
//! Anything else after `#$` is an error, reported with its 0-based line
//! number.
//!
//! ## Custom output handling
//!
//! [`Engine::new`] writes to stdout; a failed write (for example a closed
//! pipe) aborts the run. Use [`Engine::with_handler`] to send the typed
//! characters anywhere else:
//!
//! ```
//! use shcast::{Engine, EngineConfig, parse_str};
//! use std::sync::{Arc, Mutex};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let commands = parse_str("#$delay:0\necho hello\n")?;
//!
//! let captured = Arc::new(Mutex::new(Vec::<u8>::new()));
//! let sink = captured.clone();
//! let mut engine = Engine::with_handler(EngineConfig::default(), move |data| {
//!     sink.lock().unwrap().extend_from_slice(data);
//!     Ok(())
//! });
//!
//! engine.execute(&commands).await?;
//! assert_eq!(captured.lock().unwrap().as_slice(), b"echo hello");
//! assert_eq!(engine.typing_delay(), Duration::ZERO);
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod commands;
pub mod engine;
pub mod error;
pub mod parser;
pub mod recorder;
pub mod script;

pub use command::{Command, Context, Directive, ScriptCommand};
pub use commands::{SetDelay, TypedText, Wait};
pub use engine::{Engine, EngineConfig};
pub use error::{DirectiveError, ScriptError};
pub use parser::{CONTROL_PREFIX, parse_directive, parse_file, parse_str};
pub use recorder::Recorder;
pub use script::Script;
