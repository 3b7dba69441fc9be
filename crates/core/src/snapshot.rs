use crate::board::RawGrid;
use crate::game_state::Phase;
use crate::piece::RawPiece;
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, COUNT_MAX, INITIAL_SPEED_MS, PIECE_SIZE};

/// Read-only copy of everything a renderer needs.
///
/// Grids use the legacy integer encoding: 0 empty, 1-9 settled, 11-19 falling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: RawGrid,
    pub piece: RawPiece,
    pub piece_kind: PieceKind,
    /// Color of the current piece (0 when the buffer is blank)
    pub piece_color: u8,
    pub piece_x: i8,
    pub piece_y: i8,
    pub next_kind: PieceKind,
    /// Template mask of the queued piece (0/1)
    pub next_piece: RawPiece,
    pub phase: Phase,
    pub paused: bool,
    pub help_visible: bool,
    pub game_over: bool,
    pub score: u32,
    pub speed_ms: u32,
    pub counter: u32,
    pub count_max: u32,
    pub lines: u32,
    /// Fade frames per cleared row (0 when rows clear instantly)
    pub clear_fade_frames: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.piece = [[0u8; PIECE_SIZE]; PIECE_SIZE];
        self.piece_kind = PieceKind::I;
        self.piece_color = 0;
        self.piece_x = 0;
        self.piece_y = 0;
        self.next_kind = PieceKind::I;
        self.next_piece = [[0u8; PIECE_SIZE]; PIECE_SIZE];
        self.phase = Phase::Spawning;
        self.paused = false;
        self.help_visible = false;
        self.game_over = false;
        self.score = 0;
        self.speed_ms = INITIAL_SPEED_MS;
        self.counter = 0;
        self.count_max = COUNT_MAX;
        self.lines = 0;
        self.clear_fade_frames = 0;
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Row currently fading out and how far along it is, if a clear is animating
    pub fn clearing(&self) -> Option<(usize, u32)> {
        match self.phase {
            Phase::Clearing { row, frame } => Some((row, frame)),
            _ => None,
        }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            piece: [[0u8; PIECE_SIZE]; PIECE_SIZE],
            piece_kind: PieceKind::I,
            piece_color: 0,
            piece_x: 0,
            piece_y: 0,
            next_kind: PieceKind::I,
            next_piece: [[0u8; PIECE_SIZE]; PIECE_SIZE],
            phase: Phase::Spawning,
            paused: false,
            help_visible: false,
            game_over: false,
            score: 0,
            speed_ms: 0,
            counter: 0,
            count_max: 0,
            lines: 0,
            clear_fade_frames: 0,
        };
        s.clear();
        s
    }
}
