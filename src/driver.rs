//! Runs an engine from a tick source and an input tracker
//!
//! Control flow per tick: copy the input state once, apply one-shot
//! signals, then let the engine step. Hosts call `advance` with frame or
//! wall-clock time and read `snapshot` afterwards.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::clock::{FixedTimestep, IntervalTimer, TickSource};
use crate::consts::MAX_SUBSTEPS;
use crate::input::{InputTracker, Key};
use crate::rng::RandomSource;
use crate::sim::{Engine, GamePhase, PongEngine, SnakeEngine};

/// An engine, its clock, and the input it reads
#[derive(Debug)]
pub struct Driver<E, C> {
    engine: E,
    clock: C,
    input: InputTracker,
}

impl<R: RandomSource> Driver<PongEngine<R>, FixedTimestep> {
    /// Ball-and-paddle engine on a fixed timestep at its configured rate
    pub fn pong(engine: PongEngine<R>) -> Self {
        let clock = FixedTimestep::new(engine.config().tick_step(), MAX_SUBSTEPS);
        Self::new(engine, clock)
    }
}

impl<R: RandomSource> Driver<SnakeEngine<R>, IntervalTimer> {
    /// Grid engine on its configured interval
    pub fn snake(engine: SnakeEngine<R>) -> Self {
        let clock = IntervalTimer::new(engine.config().tick_interval());
        Self::new(engine, clock)
    }
}

impl<E: Engine, C: TickSource> Driver<E, C> {
    pub fn new(engine: E, clock: C) -> Self {
        Self {
            engine,
            clock,
            input: InputTracker::new(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Direct access for host signals (start, restart, pause)
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn input(&mut self) -> &mut InputTracker {
        &mut self.input
    }

    pub fn phase(&self) -> GamePhase {
        self.engine.phase()
    }

    pub fn snapshot(&self) -> E::Snapshot {
        self.engine.snapshot()
    }

    /// Feed elapsed time and run whatever ticks are due
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let due = self.clock.advance(elapsed);
        for _ in 0..due {
            self.run_tick();
        }
        due
    }

    /// Run exactly one tick regardless of the clock
    pub fn run_tick(&mut self) {
        let input = self.input.snapshot();
        if input.was_pressed(Key::Restart) {
            self.engine.restart();
            self.clock.reset();
        }
        if input.was_pressed(Key::Action) {
            self.engine.on_action();
        }
        self.engine.tick(&input);
    }

    pub fn into_parts(self) -> (E, C) {
        (self.engine, self.clock)
    }
}

/// A driver behind one mutex, for ticking on a background thread
///
/// Every mutation (ticks, key events, signals) and every snapshot read
/// takes the same lock, so a reader never sees half a tick.
#[derive(Debug)]
pub struct SharedEngine<E, C> {
    inner: Arc<Mutex<Driver<E, C>>>,
}

impl<E, C> Clone for SharedEngine<E, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Engine, C: TickSource> SharedEngine<E, C> {
    pub fn new(driver: Driver<E, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(driver)),
        }
    }

    /// Run `f` with exclusive access. A panic on another thread does not
    /// poison the engine for everyone else.
    pub fn with<T>(&self, f: impl FnOnce(&mut Driver<E, C>) -> T) -> T {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn snapshot(&self) -> E::Snapshot {
        self.with(|driver| driver.snapshot())
    }

    pub fn phase(&self) -> GamePhase {
        self.with(|driver| driver.phase())
    }

    pub fn key_down(&self, key: Key) {
        self.with(|driver| driver.input().key_down(key));
    }

    pub fn key_up(&self, key: Key) {
        self.with(|driver| driver.input().key_up(key));
    }
}

impl<E, C> SharedEngine<E, C>
where
    E: Engine + Send + 'static,
    C: TickSource + Send + 'static,
{
    /// Tick on a background thread from wall-clock time, polling every
    /// `poll`, until `stop` is raised
    pub fn spawn_ticker(&self, stop: Arc<AtomicBool>, poll: Duration) -> JoinHandle<()> {
        let shared = self.clone();
        thread::spawn(move || {
            log::info!("Ticker thread started");
            let mut last = Instant::now();
            while !stop.load(Ordering::Relaxed) {
                let now = Instant::now();
                let elapsed = now - last;
                last = now;
                shared.with(|driver| driver.advance(elapsed));
                thread::sleep(poll);
            }
            log::info!("Ticker thread stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;
    use crate::settings::{PongConfig, SnakeConfig};
    use glam::IVec2;

    fn snake_driver() -> Driver<SnakeEngine<ScriptedRandom>, IntervalTimer> {
        let engine = SnakeEngine::new(SnakeConfig::default(), ScriptedRandom::new([0.0])).unwrap();
        Driver::snake(engine)
    }

    #[test]
    fn test_snake_ticks_on_interval() {
        let mut driver = snake_driver();
        driver.input().tap(Key::Action);
        assert_eq!(driver.advance(Duration::from_millis(100)), 0);
        assert_eq!(driver.phase(), GamePhase::NotStarted);

        assert_eq!(driver.advance(Duration::from_millis(50)), 1);
        assert_eq!(driver.phase(), GamePhase::Running);
        assert_eq!(driver.engine().head(), IVec2::new(11, 10));
    }

    #[test]
    fn test_direction_press_applies_to_next_tick_only() {
        let mut driver = snake_driver();
        driver.engine_mut().start();
        driver.input().key_down(Key::Down);
        driver.run_tick();
        assert_eq!(driver.engine().head(), IVec2::new(10, 11));

        // Still held, but a held key is not a new request
        driver.input().key_down(Key::Left);
        driver.input().key_up(Key::Left);
        driver.run_tick();
        assert_eq!(driver.engine().head(), IVec2::new(9, 11));
        driver.run_tick();
        assert_eq!(driver.engine().head(), IVec2::new(8, 11));
    }

    #[test]
    fn test_action_pauses_snake() {
        let mut driver = snake_driver();
        driver.engine_mut().start();
        driver.input().tap(Key::Action);
        driver.run_tick();
        assert_eq!(driver.phase(), GamePhase::Paused);
        assert_eq!(driver.engine().head(), IVec2::new(10, 10));
    }

    #[test]
    fn test_restart_key_resets() {
        let mut driver = snake_driver();
        driver.engine_mut().start();
        driver.run_tick();
        driver.input().tap(Key::Restart);
        driver.run_tick();
        assert_eq!(driver.phase(), GamePhase::NotStarted);
        assert_eq!(driver.engine().head(), IVec2::new(10, 10));
    }

    #[test]
    fn test_pong_runs_at_fixed_rate() {
        let engine = PongEngine::new(PongConfig::default(), ScriptedRandom::new([0.5])).unwrap();
        let mut driver = Driver::pong(engine);
        driver.input().tap(Key::Action);

        let mut ticks = 0;
        // Two seconds of uneven frames
        for frame in 0..160 {
            let ms = if frame % 2 == 0 { 10 } else { 15 };
            ticks += driver.advance(Duration::from_millis(ms));
        }
        assert!((119..=121).contains(&ticks), "ran {ticks} ticks");
        assert_eq!(driver.snapshot().ticks, u64::from(ticks));
    }

    #[test]
    fn test_held_keys_move_pong_paddle() {
        let engine = PongEngine::new(PongConfig::default(), ScriptedRandom::new([0.5])).unwrap();
        let mut driver = Driver::pong(engine);
        driver.engine_mut().start();
        driver.input().key_down(Key::Up);
        driver.run_tick();
        driver.run_tick();
        driver.input().key_up(Key::Up);
        driver.run_tick();
        assert_eq!(driver.snapshot().player.y, 238.0);
    }

    #[test]
    fn test_shared_engine_ticks_in_background() {
        let config = SnakeConfig {
            tick_interval_ms: 1,
            ..Default::default()
        };
        let engine = SnakeEngine::new(config, ScriptedRandom::new([0.0])).unwrap();
        let shared = SharedEngine::new(Driver::snake(engine));
        shared.key_down(Key::Action);
        shared.key_up(Key::Action);

        let stop = Arc::new(AtomicBool::new(false));
        let handle = shared.spawn_ticker(Arc::clone(&stop), Duration::from_millis(1));

        let deadline = Instant::now() + Duration::from_secs(5);
        while shared.snapshot().ticks == 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(2));
        }
        stop.store(true, Ordering::Relaxed);
        handle.join().unwrap();

        let snapshot = shared.snapshot();
        assert!(snapshot.ticks > 0);
        assert_ne!(snapshot.phase, GamePhase::NotStarted);
    }
}
