use anyhow::{Context, Result};
use clap::Parser;
use shcast::recorder::shell_quote;
use shcast::{Engine, EngineConfig, Recorder, parse_file};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "shcast",
    about = "Type out a shell script at human speed for a terminal recording",
    version
)]
struct Args {
    /// Path to the script file
    script: PathBuf,

    /// Delay between typed characters until the script changes it
    #[arg(short, long, value_name = "MS", default_value_t = 25)]
    delay: u64,

    /// Random variation applied to each character delay
    #[arg(short, long, value_name = "MS", default_value_t = 0)]
    jitter: u64,

    /// Record the session into FILE with asciinema
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only parse the script and report how many commands it contains
    #[arg(long)]
    check: bool,

    /// Do not verify that asciinema is installed
    #[arg(long)]
    no_recorder_check: bool,
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            typing_delay: Duration::from_millis(self.delay),
            jitter: Duration::from_millis(self.jitter),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let recorder = Recorder::default();
    if !args.check && (args.output.is_some() || !args.no_recorder_check) {
        recorder.ensure_available()?;
    }

    let script = parse_file(&args.script)
        .with_context(|| format!("Failed to parse script file: {}", args.script.display()))?;

    if args.check {
        println!("{}: {} commands", script.name().display(), script.len());
        return Ok(());
    }

    if let Some(output) = &args.output {
        let inner = replay_command(&args, script.name())?;
        return recorder
            .record(output, &inner)
            .context("Failed to record script");
    }

    let mut engine = Engine::new(args.engine_config());
    engine
        .run(&script)
        .await
        .context("Failed to execute script")?;

    Ok(())
}

/// The command line asciinema runs to replay `script` with the same timing.
fn replay_command(args: &Args, script: &Path) -> Result<String> {
    let exe = std::env::current_exe().context("Failed to locate the shcast executable")?;
    let parts = [
        exe.to_string_lossy().into_owned(),
        script.to_string_lossy().into_owned(),
        format!("--delay={}", args.delay),
        format!("--jitter={}", args.jitter),
        "--no-recorder-check".to_string(),
    ];
    Ok(parts
        .iter()
        .map(|p| shell_quote(p))
        .collect::<Vec<_>>()
        .join(" "))
}
