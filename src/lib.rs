//! Snake - a real-time terminal arcade game
//!
//! This library provides:
//! - Core game simulation (game module): toroidal grid, snake, apples,
//!   direction arbitration and the fixed-timestep session
//! - Highscore persistence (highscore module)
//! - TUI rendering (render module)
//! - Key-event decoding (input module)
//! - The host loop and menu/play state machine (app module)

pub mod app;
pub mod game;
pub mod highscore;
pub mod input;
pub mod render;
