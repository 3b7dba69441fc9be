//! Game state module - manages the complete game state
//!
//! This module ties together the board, the current piece, the lookahead slot,
//! the random source and the logical clock. It sequences spawning, gravity,
//! player moves, landing and line clears.
//!
//! # Phases
//!
//! ```text
//! Spawning -> Falling -> (landed) -> [Clearing]* -> Spawning -> ... -> GameOver
//! ```
//!
//! Pausing is a flag next to the phase, so it never changes where the game is.
//! `GameOver` is only left through `Restart`.

use arrayvec::ArrayVec;
use log::{debug, info, trace, warn};

use crate::board::Board;
use crate::piece::Piece;
use crate::pieces::{get_template, Template};
use crate::rng::{RandomSource, SimpleRng};
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Upper bound on the steps of a single drop; a piece passes the floor within this many rows.
const DROP_STEP_LIMIT: usize = BOARD_HEIGHT as usize + PIECE_SIZE;

/// Events a single step can raise: a rotated slab spans five full rows.
const EVENT_CAPACITY: usize = 8;

/// Where the game loop is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No piece is in motion; the next step spawns one
    Spawning,
    /// A piece is in motion; the next step moves it down
    Falling,
    /// A full row is fading out; the main timer is suspended until it is removed
    Clearing { row: usize, frame: u32 },
    /// Spawning failed; only a restart leaves this phase
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    config: GameConfig,
    board: Board,
    piece: Piece,
    piece_kind: PieceKind,
    piece_x: i8,
    piece_y: i8,
    /// Lookahead: the kind the next spawn will place
    next_kind: PieceKind,
    phase: Phase,
    paused: bool,
    help_visible: bool,
    score: u32,
    speed_ms: u32,
    /// Move counter; rolls over into a bonus and a speed-up
    counter: u32,
    lines: u32,
    /// Time accumulated toward the next step
    timer_ms: u32,
    /// Length of the current step
    interval_ms: u32,
    commands: ArrayVec<GameAction, COMMAND_QUEUE_CAPACITY>,
    events: Vec<GameEvent>,
    rng: R,
}

impl GameState<SimpleRng> {
    /// Create a new game with default parameters and the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_config(GameConfig::default(), seed)
    }

    pub fn with_config(config: GameConfig, seed: u32) -> Self {
        Self::with_rng(config, SimpleRng::new(seed))
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a new game drawing pieces and colors from `rng`.
    ///
    /// The first draw fills the lookahead slot; the first tick spawns it.
    pub fn with_rng(config: GameConfig, mut rng: R) -> Self {
        let next_kind = rng.draw_kind();
        Self {
            config,
            board: Board::new(),
            piece: Piece::new(),
            piece_kind: next_kind,
            piece_x: SPAWN_X,
            piece_y: SPAWN_Y,
            next_kind,
            phase: Phase::Spawning,
            paused: false,
            help_visible: false,
            score: 0,
            speed_ms: config.initial_speed_ms,
            counter: 0,
            lines: 0,
            timer_ms: 0,
            interval_ms: 0,
            commands: ArrayVec::new(),
            events: Vec::with_capacity(EVENT_CAPACITY),
            rng,
        }
    }

    /// Replace the board before play starts.
    ///
    /// Any falling cells on the given board are settled, since no piece tracks them.
    pub fn with_board(mut self, mut board: Board) -> Self {
        board.settle_moving_cells();
        self.board = board;
        self.phase = Phase::Spawning;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The current piece buffer (falling, or the last one placed)
    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn piece_kind(&self) -> PieceKind {
        self.piece_kind
    }

    pub fn piece_color(&self) -> Option<Color> {
        self.piece.color()
    }

    pub fn piece_position(&self) -> (i8, i8) {
        (self.piece_x, self.piece_y)
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next_kind
    }

    pub fn next_template(&self) -> &'static Template {
        get_template(self.next_kind)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// True while a line clear is animating; piece commands wait until it ends.
    pub fn busy(&self) -> bool {
        matches!(self.phase, Phase::Clearing { .. })
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current descent interval
    pub fn speed_ms(&self) -> u32 {
        self.speed_ms
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Rows removed since the last restart
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Length of the step the clock is currently timing
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Take the events raised since the last call.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        self.piece.write_u8_grid(&mut out.piece);
        out.piece_kind = self.piece_kind;
        out.piece_color = self.piece.color().map(Color::get).unwrap_or(0);
        out.piece_x = self.piece_x;
        out.piece_y = self.piece_y;
        out.next_kind = self.next_kind;
        out.next_piece = *self.next_template();
        out.phase = self.phase;
        out.paused = self.paused;
        out.help_visible = self.help_visible;
        out.game_over = self.game_over();
        out.score = self.score;
        out.speed_ms = self.speed_ms;
        out.counter = self.counter;
        out.count_max = self.config.count_max;
        out.lines = self.lines;
        out.clear_fade_frames = self.config.clear_fade_frames;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Queue an action for the next tick. Returns false if the queue is full.
    pub fn submit(&mut self, action: GameAction) -> bool {
        if self.commands.try_push(action).is_err() {
            warn!("command queue full, dropping {}", action.as_str());
            return false;
        }
        true
    }

    /// Advance the logical clock by `elapsed_ms`.
    ///
    /// Queued commands are applied first. Then, if the current interval has
    /// elapsed, one step runs: spawn, gravity, or a line-clear fade frame.
    /// Returns true if a step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.drain_commands();

        if self.paused || self.game_over() {
            return false;
        }

        self.timer_ms = self.timer_ms.saturating_add(elapsed_ms);
        if self.timer_ms < self.interval_ms {
            return false;
        }
        self.timer_ms = 0;

        trace!("step in {:?}", self.phase);
        match self.phase {
            Phase::Clearing { row, frame } => self.advance_clear(row, frame),
            Phase::GameOver => {}
            Phase::Spawning | Phase::Falling => {
                if self.board.has_moving_cell() {
                    self.move_down();
                } else {
                    self.spawn_piece();
                }
            }
        }

        self.interval_ms = self.step_interval();
        true
    }

    /// Apply an action immediately. Returns false if it was rejected or had no effect.
    ///
    /// After game over only `Restart` is accepted. Piece actions need a falling
    /// piece and are rejected while paused or while a line clear animates.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Restart => {
                self.restart();
                return true;
            }
            _ if self.game_over() => return false,
            GameAction::Pause => {
                self.paused = !self.paused;
                self.help_visible = false;
                debug!("paused: {}", self.paused);
                return true;
            }
            GameAction::Help => {
                self.paused = true;
                self.help_visible = true;
                return true;
            }
            _ => {}
        }

        if self.paused || self.busy() {
            return false;
        }

        match action {
            GameAction::Rotate => self.rotate_piece(),
            GameAction::MoveLeft => self.move_piece(-1, 0),
            GameAction::MoveRight => self.move_piece(1, 0),
            GameAction::MoveDown => self.move_down(),
            GameAction::Drop => self.drop_piece(),
            GameAction::Delete => self.delete_piece(),
            GameAction::Pause | GameAction::Help | GameAction::Restart => false,
        }
    }

    fn drain_commands(&mut self) {
        while let Some(&action) = self.commands.first() {
            if self.busy() && action.moves_piece() {
                // Deferred until the clear animation finishes.
                break;
            }
            self.commands.remove(0);
            self.apply_action(action);
        }
    }

    fn step_interval(&self) -> u32 {
        match self.phase {
            Phase::Clearing { .. } => self.config.clear_fade_frame_ms,
            _ => self.speed_ms.max(self.config.minimum_speed_ms),
        }
    }

    /// Spawn the queued piece at the spawn position and draw a new lookahead.
    ///
    /// Returns false (and ends the game) if the spawn position is blocked.
    fn spawn_piece(&mut self) -> bool {
        self.board.clear_moving_cells();

        let drawn = self.rng.draw_kind();
        let color = self.rng.draw_color();
        let kind = self.next_kind;

        self.piece
            .copy_from_template(get_template(kind), Block::falling(color));
        self.piece_kind = kind;
        self.next_kind = drawn;
        self.piece_x = SPAWN_X;
        self.piece_y = SPAWN_Y;

        if !self.piece.can_move_to(&self.board, SPAWN_X, SPAWN_Y) {
            info!("game over: spawn blocked, score {}", self.score);
            self.phase = Phase::GameOver;
            self.events.push(GameEvent::GameOver);
            return false;
        }

        debug!(
            "spawned {} color {}, next {}",
            kind.as_str(),
            color.get(),
            drawn.as_str()
        );
        self.phase = Phase::Spawning;
        self.board.place_piece(&self.piece, self.piece_x, self.piece_y);
        self.sync_phase();
        self.check_lines();
        true
    }

    /// Move the falling piece by (dx, dy) if the target is free, then re-check landing.
    ///
    /// Returns true if the piece moved. An illegal move is not an error: the
    /// piece is re-placed where it was.
    fn move_piece(&mut self, dx: i8, dy: i8) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }

        self.board.clear_moving_cells();
        let x = self.piece_x + dx;
        let y = self.piece_y + dy;
        let moved = self.piece.can_move_to(&self.board, x, y);
        if moved {
            self.piece_x = x;
            self.piece_y = y;
        }

        self.board.place_piece(&self.piece, self.piece_x, self.piece_y);
        if self.board.is_piece_at_bottom() {
            self.board.settle_moving_cells();
        }
        self.sync_phase();
        self.check_lines();
        moved
    }

    /// Gravity step: advance the counter, then move down one row.
    fn move_down(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        self.advance_counter();
        self.move_piece(0, 1)
    }

    fn drop_piece(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        for _ in 0..DROP_STEP_LIMIT {
            if self.phase != Phase::Falling {
                break;
            }
            self.move_down();
        }
        true
    }

    /// Rotate the falling piece in place.
    ///
    /// Without `checked_rotation` the rotation is applied unconditionally, even
    /// into occupied cells or past the walls.
    fn rotate_piece(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }

        self.board.clear_moving_cells();
        self.piece.rotate();

        let mut rotated = true;
        if self.config.checked_rotation
            && !self
                .piece
                .can_move_to(&self.board, self.piece_x, self.piece_y)
        {
            // Three more quarter turns restore the original layout.
            for _ in 0..3 {
                self.piece.rotate();
            }
            rotated = false;
        }

        self.board.place_piece(&self.piece, self.piece_x, self.piece_y);
        if self.board.is_piece_at_bottom() {
            self.board.settle_moving_cells();
        }
        self.sync_phase();
        self.check_lines();
        rotated
    }

    /// Throw the current piece away and spawn a replacement. Speeds the game up.
    fn delete_piece(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        self.speed_up();
        self.spawn_piece();
        true
    }

    fn advance_counter(&mut self) {
        self.counter += 1;
        if self.counter > self.config.count_max {
            self.counter = 0;
            self.score = self.score.saturating_add(self.config.score_add);
            self.speed_up();
            debug!("counter rollover, speed now {}ms", self.speed_ms);
        }
    }

    fn speed_up(&mut self) {
        self.speed_ms = self
            .speed_ms
            .saturating_sub(self.config.speed_step_ms)
            .max(self.config.minimum_speed_ms);
    }

    /// Falling while the board holds moving cells, spawning otherwise.
    fn sync_phase(&mut self) {
        if matches!(self.phase, Phase::GameOver | Phase::Clearing { .. }) {
            return;
        }
        self.phase = if self.board.has_moving_cell() {
            Phase::Falling
        } else {
            Phase::Spawning
        };
    }

    /// Remove full rows, either all at once or by starting a fade animation.
    fn check_lines(&mut self) {
        if self.phase != Phase::Spawning {
            return;
        }

        if self.config.animates_clears() {
            if let Some(row) = self.board.find_full_row() {
                self.phase = Phase::Clearing { row, frame: 0 };
                self.timer_ms = 0;
                self.interval_ms = self.config.clear_fade_frame_ms;
            }
            return;
        }

        while let Some(row) = self.board.find_full_row() {
            self.remove_line(row);
        }
    }

    fn advance_clear(&mut self, row: usize, frame: u32) {
        let frame = frame + 1;
        if frame < self.config.clear_fade_frames {
            self.phase = Phase::Clearing { row, frame };
            return;
        }

        self.remove_line(row);
        self.phase = match self.board.find_full_row() {
            Some(next) => Phase::Clearing {
                row: next,
                frame: 0,
            },
            None => Phase::Spawning,
        };
        self.sync_phase();
    }

    fn remove_line(&mut self, row: usize) {
        self.board.remove_row(row);
        self.score = self.score.saturating_add(self.config.score_add);
        self.lines += 1;
        self.events.push(GameEvent::LineCleared);
        debug!("cleared row {}, score {}", row, self.score);
    }

    fn restart(&mut self) {
        info!("restart (previous score {})", self.score);
        self.board.clear();
        self.score = 0;
        self.speed_ms = self.config.initial_speed_ms;
        self.counter = 0;
        self.lines = 0;
        self.phase = Phase::Spawning;
        self.paused = false;
        self.help_visible = false;
        self.timer_ms = 0;
        self.interval_ms = 0;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
