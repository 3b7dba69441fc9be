//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders a [`GameSnapshot`]
//! into a simple framebuffer that can be flushed to a terminal backend.
//!
//! - [`game_view`] is pure: snapshot in, framebuffer out
//! - [`renderer`] owns the terminal and flushes framebuffers with diffing
//!
//! [`GameSnapshot`]: grid_tetris_core::GameSnapshot

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use grid_tetris_core as core;
pub use grid_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{color_rgb, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
