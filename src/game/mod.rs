//! Core game logic module for Snake
//!
//! Everything here is simulation only: the toroidal grid, the snake body,
//! apple placement, direction arbitration and the per-tick session rules.
//! No I/O or rendering dependencies, so it can be driven directly in tests.

pub mod apple;
pub mod config;
pub mod direction;
pub mod grid;
pub mod session;
pub mod snake;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::{Direction, DirectionArbiter};
pub use grid::{Cell, Grid};
pub use session::{PlaySession, SessionState};
pub use snake::Snake;
