use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Playing field width in pixels
    pub width_px: u32,
    /// Playing field height in pixels
    pub height_px: u32,
    /// Side length of one grid tile in pixels
    pub tile_size: u32,
    /// Fixed simulation timestep in milliseconds
    pub tick_ms: u64,
    /// Points awarded per apple
    pub apple_score: u32,
    /// Growth ticks granted per apple
    pub apple_extension: u32,
    /// Capacity of the buffered-direction queue
    pub direction_queue_capacity: usize,
    /// Where the highscore is persisted
    pub highscore_path: PathBuf,
    /// Debug flag: suppress self-collision checks
    pub godmode: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width_px: 640,
            height_px: 480,
            tile_size: 10,
            tick_ms: 80,
            apple_score: 10,
            apple_extension: 3,
            direction_queue_capacity: 50,
            highscore_path: PathBuf::from("highscore"),
            godmode: false,
        }
    }
}

impl GameConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Create a small 8x8 board for testing
    pub fn small() -> Self {
        Self {
            width_px: 80,
            height_px: 80,
            ..Default::default()
        }
    }
}
