//! Board module - manages the game grid
//!
//! The board is a 10x30 grid. Each cell is empty, settled, or part of the falling
//! piece; the falling piece has no other representation on the board, so its
//! footprint is found by scanning for [`CellState::Falling`] cells.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..29 (top to bottom)

use crate::piece::Piece;
use crate::types::{cell_raw, Block, Cell, CellState, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Board grid in the legacy integer encoding (0 / 1-9 / 11-19), indexed `[y][x]`
pub type RawGrid = [[u8; WIDTH]; HEIGHT];

/// The game board - 10 columns x 30 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board from the legacy integer encoding.
    ///
    /// Values that are not a valid encoding are treated as empty.
    pub fn from_raw(grid: &RawGrid) -> Self {
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                board.cells[y * WIDTH + x] = Block::from_raw(v);
            }
        }
        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// One row of cells, or `None` past the bottom.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= HEIGHT {
            return None;
        }
        let start = y * WIDTH;
        Some(&self.cells[start..start + WIDTH])
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Fill every cell with `cell` (`None` empties the board)
    pub fn reset(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.reset(None);
    }

    /// True if any cell belongs to the falling piece
    pub fn has_moving_cell(&self) -> bool {
        self.cells.iter().flatten().any(Block::is_falling)
    }

    /// Glue the falling piece in place
    pub fn settle_moving_cells(&mut self) {
        for block in self.cells.iter_mut().flatten() {
            block.state = CellState::Settled;
        }
    }

    /// Remove the falling piece's footprint
    pub fn clear_moving_cells(&mut self) {
        for cell in &mut self.cells {
            if matches!(cell, Some(b) if b.is_falling()) {
                *cell = None;
            }
        }
    }

    /// Check if a row is completely filled with settled cells
    pub fn is_row_full(&self, y: usize) -> bool {
        match self.row(y) {
            Some(row) => row
                .iter()
                .all(|cell| matches!(cell, Some(b) if !b.is_falling())),
            None => false,
        }
    }

    /// First full row, scanning top to bottom
    pub fn find_full_row(&self) -> Option<usize> {
        (0..HEIGHT).find(|&y| self.is_row_full(y))
    }

    /// Remove a row and shift every row above it down by one; the top row becomes empty.
    /// Returns false (without touching the board) if the row is out of bounds.
    pub fn remove_row(&mut self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }

        // Shift all rows above down by one
        // Note: copy_within handles overlapping ranges safely
        for row in (1..=y).rev() {
            let src_start = (row - 1) * WIDTH;
            self.cells
                .copy_within(src_start..src_start + WIDTH, row * WIDTH);
        }

        self.cells[..WIDTH].fill(None);
        true
    }

    /// True if the falling piece touches the bottom row
    pub fn is_piece_at_bottom(&self) -> bool {
        self.row(HEIGHT - 1)
            .map(|row| row.iter().flatten().any(Block::is_falling))
            .unwrap_or(false)
    }

    /// Write a piece's filled cells onto the board at offset (x, y).
    ///
    /// Cells that fall outside the board are dropped. If any written cell sits
    /// directly on top of an existing block (not counting the bottom row), the
    /// falling cells are settled immediately. Returns true when that happened.
    pub fn place_piece(&mut self, piece: &Piece, x: i8, y: i8) -> bool {
        let mut landed = false;
        for (px, py, _) in piece.blocks() {
            let bx = x + px;
            let by = y + py;
            if Self::index(bx, by).is_none() || by >= BOARD_HEIGHT as i8 - 1 {
                continue;
            }
            if self.is_occupied(bx, by + 1) {
                landed = true;
                break;
            }
        }

        for (px, py, block) in piece.blocks() {
            self.set(x + px, y + py, Some(block));
        }

        if landed {
            self.settle_moving_cells();
        }
        landed
    }

    /// Export the board in the legacy integer encoding
    pub fn write_u8_grid(&self, out: &mut RawGrid) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = cell_raw(self.cells[y * WIDTH + x]);
            }
        }
    }

    /// Count of filled cells (settled or falling)
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Count of cells belonging to the falling piece
    pub fn moving_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|b| b.is_falling())
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::get_template;
    use crate::types::{Color, PieceKind};

    fn color(v: u8) -> Color {
        Color::new(v).unwrap()
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 29), Some(299));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 30), None);
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::new();

        board.set(0, 0, Some(Block::settled(color(1))));
        board.set(5, 10, Some(Block::falling(color(3))));

        assert_eq!(board.cells[0], Some(Block::settled(color(1))));
        assert_eq!(board.cells[10 * 10 + 5], Some(Block::falling(color(3))));
    }

    #[test]
    fn test_raw_roundtrip() {
        let mut grid: RawGrid = [[0; WIDTH]; HEIGHT];
        grid[5][3] = 4;
        grid[10][7] = 19;

        let board = Board::from_raw(&grid);
        let mut back: RawGrid = [[0; WIDTH]; HEIGHT];
        board.write_u8_grid(&mut back);

        assert_eq!(grid, back);
    }

    #[test]
    fn test_place_piece_on_floor_does_not_glue() {
        let mut board = Board::new();
        let mut piece = Piece::new();
        piece.copy_from_template(get_template(PieceKind::Dot), Block::falling(color(2)));

        // The dot sits at buffer row 2; y = 27 puts it in the bottom row.
        assert!(!board.place_piece(&piece, 3, 27));
        assert!(board.is_piece_at_bottom());
        assert!(board.has_moving_cell());
    }

    #[test]
    fn test_place_piece_drops_cells_outside_board() {
        let mut board = Board::new();
        let mut piece = Piece::new();
        piece.copy_from_template(get_template(PieceKind::Slab), Block::falling(color(2)));

        // Slab rows 1..=3 at y = -3 map to board rows -2..=0; only row 0 lands.
        assert!(!board.place_piece(&piece, 0, -3));
        assert_eq!(board.moving_count(), 5);
    }
}
