//! Growing-trail grid engine
//!
//! A chain of cells crawls one cell per tick on a square grid, growing when
//! it reaches food and ending the game when it leaves the grid or runs into
//! itself.

pub mod food;
pub mod state;
pub mod tick;

pub use food::place_food;
pub use state::{SnakeEngine, SnakeSnapshot};
