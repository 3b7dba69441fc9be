//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no I/O, making them usable in any context
//! (core logic, terminal rendering, tests).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 30 rows (indexed 0-29)
//! - **Piece buffer**: 5x5 cells
//! - **Spawn position**: (3, 0) for every piece
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_SPEED_MS` | 2000 | Descent interval at the start of a game |
//! | `MINIMUM_SPEED_MS` | 1 | Floor for the descent interval |
//! | `SPEED_STEP_MS` | 25 | Interval decrement on counter overflow or piece delete |
//! | `FRAME_MS` | 16 | Terminal frame interval (~60 FPS) |
//! | `CLEAR_FADE_FRAME_MS` | 60 | Frame length of the line-clear fade |
//!
//! # Cells
//!
//! A board or piece cell is an [`Option<Block>`](Cell). A [`Block`] carries its
//! [`Color`] (1-9) and whether it is still attached to the falling piece. The
//! legacy integer encoding (0 empty, 1-9 settled, 11-19 falling) is available
//! through [`Block::raw`] for snapshots and renderers.
//!
//! # Examples
//!
//! ```
//! use grid_tetris_types::{Block, CellState, Color, GameAction, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let color = Color::new(4).unwrap();
//! let falling = Block::falling(color);
//! assert_eq!(falling.raw(), 14);
//! assert_eq!(falling.settle(), Block { color, state: CellState::Settled });
//!
//! assert_eq!(GameAction::MoveLeft.as_str(), "moveLeft");
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 30);
//! ```

pub mod config;

pub use config::{ConfigError, GameConfig};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (30 rows)
pub const BOARD_HEIGHT: u8 = 30;

/// Edge length of the square piece buffer
pub const PIECE_SIZE: usize = 5;

/// Spawn column for new pieces
pub const SPAWN_X: i8 = 3;

/// Spawn row for new pieces
pub const SPAWN_Y: i8 = 0;

/// Number of distinct piece colors (1..=9)
pub const COLOR_COUNT: u8 = 9;

/// Offset added to a color in the legacy encoding while the cell is falling
pub const MOVING_OFFSET: u8 = 10;

/// Descent interval at the start of a game
pub const INITIAL_SPEED_MS: u32 = 2000;

/// Minimum descent interval
pub const MINIMUM_SPEED_MS: u32 = 1;

/// Amount the descent interval shrinks on counter overflow or piece delete
pub const SPEED_STEP_MS: u32 = 25;

/// The move counter must exceed this value before it rolls over
pub const COUNT_MAX: u32 = 1000;

/// Score bonus per cleared line and per counter rollover
pub const SCORE_ADD: u32 = 100;

/// Default number of fade frames for an animated line clear
pub const CLEAR_FADE_FRAMES: u32 = 4;

/// Default length of one line-clear fade frame
pub const CLEAR_FADE_FRAME_MS: u32 = 60;

/// Terminal frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Capacity of the pending command queue
pub const COMMAND_QUEUE_CAPACITY: usize = 16;

/// A piece color, always within 1..=9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u8);

impl Color {
    /// Create a color, returning `None` outside 1..=9.
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= COLOR_COUNT {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Color from a zero-based draw in `0..COLOR_COUNT`, wrapping larger values.
    pub const fn from_index(index: u32) -> Self {
        Self((index % COLOR_COUNT as u32) as u8 + 1)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Whether a cell belongs to the falling piece or has been glued in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    Settled,
    Falling,
}

/// A filled cell: a color plus its motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub color: Color,
    pub state: CellState,
}

impl Block {
    pub const fn settled(color: Color) -> Self {
        Self {
            color,
            state: CellState::Settled,
        }
    }

    pub const fn falling(color: Color) -> Self {
        Self {
            color,
            state: CellState::Falling,
        }
    }

    pub fn is_falling(&self) -> bool {
        self.state == CellState::Falling
    }

    /// The same color, glued in place.
    pub fn settle(self) -> Self {
        Self::settled(self.color)
    }

    /// Legacy integer encoding: the color for settled cells, color + 10 while falling.
    pub fn raw(&self) -> u8 {
        match self.state {
            CellState::Settled => self.color.get(),
            CellState::Falling => self.color.get() + MOVING_OFFSET,
        }
    }

    /// Decode the legacy integer encoding. `0` and values outside 1-9 / 11-19 are `None`.
    pub fn from_raw(value: u8) -> Option<Self> {
        if value > MOVING_OFFSET {
            Color::new(value - MOVING_OFFSET).map(Self::falling)
        } else {
            Color::new(value).map(Self::settled)
        }
    }
}

/// A cell on the game board or in a piece buffer
///
/// - `None`: Empty cell
/// - `Some(Block)`: Filled cell
pub type Cell = Option<Block>;

/// Legacy integer value of a cell (0 when empty).
pub fn cell_raw(cell: Cell) -> u8 {
    cell.map(|b| b.raw()).unwrap_or(0)
}

/// The piece shapes, one per 5x5 template
///
/// The first seven are the classic tetrominoes. `Dot` is a single-cell debug
/// shape; `Slab`, `Bar3` and `Tower` are the extra shapes of the legacy
/// ten-template set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    S,
    Z,
    T,
    O,
    Dot,
    Slab,
    Bar3,
    Tower,
}

impl PieceKind {
    /// Number of piece kinds (the random draw range)
    pub const COUNT: usize = 11;

    /// Every kind, in template index order
    pub const ALL: [PieceKind; Self::COUNT] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
        PieceKind::O,
        PieceKind::Dot,
        PieceKind::Slab,
        PieceKind::Bar3,
        PieceKind::Tower,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::T => "t",
            PieceKind::O => "o",
            PieceKind::Dot => "dot",
            PieceKind::Slab => "slab",
            PieceKind::Bar3 => "bar3",
            PieceKind::Tower => "tower",
        }
    }
}

/// Player commands that can be applied to the game state
///
/// Each action is a zero-argument trigger; the game decides whether it applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Rotate the falling piece 90°
    Rotate,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (advances the move counter)
    MoveDown,
    /// Move the piece down until it lands
    Drop,
    /// Discard the falling piece and spawn a replacement (speeds the game up)
    Delete,
    /// Toggle pause state
    Pause,
    /// Restart the game (when game over or at any time)
    Restart,
    /// Pause and show the key help overlay
    Help,
}

impl GameAction {
    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Rotate => "rotate",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Drop => "drop",
            GameAction::Delete => "delete",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
            GameAction::Help => "help",
        }
    }

    /// Actions that operate on the falling piece.
    pub fn moves_piece(&self) -> bool {
        matches!(
            self,
            GameAction::Rotate
                | GameAction::MoveLeft
                | GameAction::MoveRight
                | GameAction::MoveDown
                | GameAction::Drop
                | GameAction::Delete
        )
    }
}

/// Notifications raised by the game for the UI layer (sounds, dialogs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// One full row was removed
    LineCleared,
    /// A new piece could not be spawned; the game is over until restart
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_timing_defaults() {
        assert_eq!(INITIAL_SPEED_MS, 2000);
        assert_eq!(MINIMUM_SPEED_MS, 1);
        assert_eq!(SPEED_STEP_MS, 25);
        assert_eq!(COUNT_MAX, 1000);
        assert_eq!(SCORE_ADD, 100);
        assert_eq!(PIECE_SIZE, 5);
    }

    #[test]
    fn color_rejects_out_of_range() {
        assert!(Color::new(0).is_none());
        assert!(Color::new(10).is_none());
        assert_eq!(Color::new(9).map(Color::get), Some(9));
    }

    #[test]
    fn block_raw_encoding() {
        let c = Color::new(7).unwrap();
        assert_eq!(Block::settled(c).raw(), 7);
        assert_eq!(Block::falling(c).raw(), 17);
        assert_eq!(Block::from_raw(17), Some(Block::falling(c)));
        assert_eq!(Block::from_raw(7), Some(Block::settled(c)));
        assert_eq!(Block::from_raw(0), None);
        assert_eq!(Block::from_raw(10), None);
        assert_eq!(Block::from_raw(20), None);
    }

    #[test]
    fn piece_kind_index_roundtrip() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_index(i), Some(*kind));
        }
        assert_eq!(PieceKind::from_index(PieceKind::COUNT), None);
    }
}
