//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Every action is
//! a single trigger, so key repeat from the terminal is passed straight through
//! and no release events are needed.

pub mod map;

pub use grid_tetris_types as types;

pub use map::{handle_key_event, should_quit, KEY_HELP};
