//! Arcade Sim entry point
//!
//! Runs one engine headless under autopilot and prints the final snapshot
//! as JSON. With `--realtime` the engine ticks on a background thread
//! against the wall clock instead of virtual time.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use serde::Serialize;

use arcade_sim::autopilot::{pong_key, snake_turn};
use arcade_sim::sim::{PongEngine, SnakeEngine};
use arcade_sim::{Driver, Engine, GamePhase, Key, Settings, SharedEngine, TickSource};

/// Host frame length used for virtual time
const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser)]
#[command(name = "arcade-sim", about = "Run an arcade engine headless under autopilot")]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,

    /// Settings JSON file; missing file means defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed; defaults to the current time
    #[arg(short, long)]
    seed: Option<u64>,

    /// Simulated (or wall-clock) seconds to run
    #[arg(long, default_value_t = 30.0)]
    seconds: f64,

    /// Tick on a background thread against the wall clock
    #[arg(long)]
    realtime: bool,

    #[command(subcommand)]
    game: Game,
}

#[derive(Subcommand, Clone, Copy)]
enum Game {
    /// Ball-and-paddle game
    Pong,
    /// Growing-trail grid game
    Snake,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    let duration = Duration::from_secs_f64(cli.seconds.max(0.0));
    log::info!("Arcade Sim starting (seed {seed}, {:?})", duration);

    let json = match cli.game {
        Game::Pong => {
            let driver = Driver::pong(PongEngine::with_seed(settings.pong, seed)?);
            run(driver, duration, cli.realtime, |driver| {
                let key = pong_key(&driver.snapshot());
                let input = driver.input();
                for k in [Key::Up, Key::Down] {
                    if Some(k) != key {
                        input.key_up(k);
                    }
                }
                if let Some(k) = key {
                    input.key_down(k);
                }
            })?
        }
        Game::Snake => {
            let driver = Driver::snake(SnakeEngine::with_seed(settings.snake, seed)?);
            run(driver, duration, cli.realtime, |driver| {
                if let Some(turn) = snake_turn(&driver.snapshot()) {
                    driver.input().tap(Key::from(turn));
                }
            })?
        }
    };

    println!("{json}");
    Ok(())
}

/// Press start, then let `pilot` play until the game ends or time runs out
fn run<E, C, P>(
    mut driver: Driver<E, C>,
    duration: Duration,
    realtime: bool,
    mut pilot: P,
) -> anyhow::Result<String>
where
    E: Engine + Send + 'static,
    E::Snapshot: Serialize,
    C: TickSource + Send + 'static,
    P: FnMut(&mut Driver<E, C>),
{
    driver.input().tap(Key::Action);

    if !realtime {
        let mut elapsed = Duration::ZERO;
        while elapsed < duration {
            pilot(&mut driver);
            driver.advance(FRAME);
            elapsed += FRAME;
            if driver.phase() == GamePhase::Ended {
                break;
            }
        }
        log::info!("Stopped after {:?} of simulated time", elapsed);
        return Ok(serde_json::to_string_pretty(&driver.snapshot())?);
    }

    let shared = SharedEngine::new(driver);
    let stop = Arc::new(AtomicBool::new(false));
    let ticker = shared.spawn_ticker(Arc::clone(&stop), Duration::from_millis(1));

    let started = Instant::now();
    while started.elapsed() < duration && shared.phase() != GamePhase::Ended {
        shared.with(&mut pilot);
        thread::sleep(FRAME);
    }
    stop.store(true, Ordering::Relaxed);
    if ticker.join().is_err() {
        anyhow::bail!("ticker thread panicked");
    }
    log::info!("Stopped after {:?} of wall time", started.elapsed());
    Ok(serde_json::to_string_pretty(&shared.snapshot())?)
}
