//! Input tracking
//!
//! Key events arrive whenever the host delivers them. The tracker folds
//! them into held-key state plus a queue of fresh presses, and engines only
//! ever see an `InputSnapshot` copied out at the start of a tick.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Logical keys the engines understand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Start / pause (space bar)
    Action,
    Restart,
}

impl Key {
    /// Map a DOM-style key name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" | "Up" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "Down" | "s" | "S" => Some(Key::Down),
            "ArrowLeft" | "Left" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "Right" | "d" | "D" => Some(Key::Right),
            " " | "Space" | "Spacebar" => Some(Key::Action),
            "r" | "R" | "Escape" => Some(Key::Restart),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

const KEY_COUNT: usize = 6;

/// Axis-aligned movement on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in screen coordinates (y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::Action | Key::Restart => None,
        }
    }
}

impl From<Direction> for Key {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Key::Up,
            Direction::Down => Key::Down,
            Direction::Left => Key::Left,
            Direction::Right => Key::Right,
        }
    }
}

/// Input as seen by one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: [bool; KEY_COUNT],
    /// Keys pressed since the previous snapshot, in arrival order
    pub presses: Vec<Key>,
}

impl InputSnapshot {
    /// Snapshot with the given keys held and no fresh presses
    pub fn holding(keys: &[Key]) -> Self {
        let mut snapshot = Self::default();
        for &key in keys {
            snapshot.held[key.index()] = true;
        }
        snapshot
    }

    /// Snapshot with the given fresh presses and nothing held
    pub fn pressing(keys: &[Key]) -> Self {
        Self {
            presses: keys.to_vec(),
            ..Default::default()
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    pub fn was_pressed(&self, key: Key) -> bool {
        self.presses.contains(&key)
    }

    /// Vertical intent from held keys: -1 up, +1 down, 0 for none or both
    pub fn vertical_axis(&self) -> f32 {
        match (self.is_held(Key::Up), self.is_held(Key::Down)) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// Direction presses in arrival order
    pub fn direction_presses(&self) -> impl Iterator<Item = Direction> + '_ {
        self.presses.iter().filter_map(|&k| Direction::from_key(k))
    }
}

/// Accumulates key events between ticks
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    held: [bool; KEY_COUNT],
    presses: Vec<Key>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. Auto-repeat while held does not count as a new press.
    pub fn key_down(&mut self, key: Key) {
        let slot = &mut self.held[key.index()];
        if !*slot {
            *slot = true;
            self.presses.push(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held[key.index()] = false;
    }

    /// Down-then-up in one go, for hosts that only report taps
    pub fn tap(&mut self, key: Key) {
        self.key_down(key);
        self.key_up(key);
    }

    /// Forget held keys (e.g. on focus loss). Pending presses survive.
    pub fn release_all(&mut self) {
        self.held = [false; KEY_COUNT];
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// Copy out the state for one tick and clear the press queue
    pub fn snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            held: self.held,
            presses: std::mem::take(&mut self.presses),
        }
    }
}
