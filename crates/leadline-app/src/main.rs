use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use leadline_app::scheduler::{self, Output};
use leadline_app::state::Session;
use leadline_core::config::EngineConfig;
use leadline_sim::ScenarioConfig;

#[derive(Parser)]
#[command(name = "leadline")]
#[command(about = "Run the aim-assist engine against a seeded synthetic world")]
struct Args {
    /// JSON engine configuration; missing fields take defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// World seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Wall-clock run time
    #[arg(long, default_value_t = 5.0)]
    seconds: f64,

    /// Number of hostile targets
    #[arg(long, default_value_t = 3)]
    targets: usize,

    /// Number of teammates
    #[arg(long, default_value_t = 1)]
    teammates: usize,

    /// Index into the beam length presets (800, 1000, 1200, 1400, 2000)
    #[arg(long)]
    beam_preset: Option<usize>,

    /// Also print beam frames, not just tick reports
    #[arg(long)]
    beams: bool,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(index) = args.beam_preset {
        config = config.with_beam_preset(index)?;
    }
    Ok(config)
}

/// When a run of `seconds` started at `start` should stop.
fn run_deadline(start: Instant, seconds: f64) -> Result<Instant> {
    let run = Duration::try_from_secs_f64(seconds)
        .with_context(|| format!("--seconds {seconds} is not a usable duration"))?;
    start
        .checked_add(run)
        .with_context(|| format!("--seconds {seconds} is too large"))
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let deadline = run_deadline(Instant::now(), args.seconds)?;
    let config = load_config(&args)?;
    let scenario = ScenarioConfig {
        seed: args.seed,
        targets: args.targets,
        teammates: args.teammates,
        ..Default::default()
    };
    info!(seed = scenario.seed, targets = scenario.targets, "starting");

    let session = Session::new(config, &scenario).context("invalid engine config")?;
    let (tx, rx) = mpsc::channel();
    let handle = scheduler::spawn_loops(Arc::new(Mutex::new(session)), tx)
        .context("spawning loop threads")?;

    let (mut ticks, mut hits) = (0u64, 0u64);
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        let output = match rx.recv_timeout(remaining) {
            Ok(output) => output,
            Err(mpsc::RecvTimeoutError::Timeout) => break,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        };
        match &output {
            Output::Tick(report) => {
                ticks += 1;
                if report.any_hit() {
                    hits += 1;
                }
            }
            Output::Beam(_) if !args.beams => continue,
            Output::Beam(_) => {}
        }
        println!("{}", serde_json::to_string(&output)?);
    }

    handle.shutdown();
    info!(ticks, hits, "finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_deadline() {
        let start = Instant::now();
        assert_eq!(
            run_deadline(start, 2.5).unwrap(),
            start + Duration::from_millis(2500)
        );
        assert_eq!(run_deadline(start, 0.0).unwrap(), start);
    }

    #[test]
    fn test_run_deadline_rejects_unusable_seconds() {
        let start = Instant::now();
        for seconds in [-1.0, f64::NAN, f64::INFINITY, 1.0e30] {
            assert!(run_deadline(start, seconds).is_err(), "{seconds}");
        }
    }
}
