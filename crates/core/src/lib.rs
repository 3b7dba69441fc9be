//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the board model, the piece templates, and the game loop
//! that sequences spawning, gravity, player moves and line clears. It has no
//! dependency on the terminal or on wall-clock time:
//!
//! - **Deterministic**: the random source is injected, and time only advances
//!   through [`GameState::tick`]
//! - **Testable**: a [`ScriptedRng`](rng::ScriptedRng) replays exact piece sequences
//!
//! # Module Structure
//!
//! - [`board`]: 10x30 grid of tagged cells, row removal and placement
//! - [`piece`]: the mutable 5x5 piece buffer, collision test and rotation
//! - [`pieces`]: the eleven fixed shape templates
//! - [`game_state`]: the game loop, command queue and events
//! - [`rng`]: uniform piece and color draws
//! - [`snapshot`]: plain-data view for renderers
//!
//! # Rules
//!
//! - Every piece spawns at (3, 0); if it does not fit there the game is over.
//! - Gravity moves the piece one row per interval. Each downward step advances a
//!   move counter; once it exceeds its maximum the player earns a bonus and the
//!   interval shrinks.
//! - A piece glues in place when it reaches the bottom row or when any of its
//!   cells rests directly on a settled block.
//! - Every full row is removed and awards a bonus.
//!
//! # Example
//!
//! ```
//! use grid_tetris_core::GameState;
//! use grid_tetris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.tick(0); // spawn the first piece
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Drop);
//!
//! assert!(game.board().filled_count() > 0);
//! assert!(!game.game_over());
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`] every frame with the elapsed milliseconds. A step
//! runs once the current interval has elapsed: the descent speed during play,
//! or the fade frame length while a cleared row animates.

pub mod board;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use grid_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, RawGrid};
pub use game_state::{GameState, Phase};
pub use piece::{Piece, RawPiece};
pub use pieces::{get_template, Template, TEMPLATES};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use snapshot::GameSnapshot;
