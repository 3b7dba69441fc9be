//! Piece module - the mutable 5x5 piece buffer
//!
//! A piece is a square buffer of cells. It knows nothing about its position;
//! the game loop tracks (x, y) and passes it in.

use log::debug;

use crate::board::Board;
use crate::pieces::Template;
use crate::types::{cell_raw, Block, Cell, Color, PIECE_SIZE};

/// Piece buffer in the legacy integer encoding, indexed `[y][x]`
pub type RawPiece = [[u8; PIECE_SIZE]; PIECE_SIZE];

/// A 5x5 piece buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    cells: [[Cell; PIECE_SIZE]; PIECE_SIZE],
}

impl Piece {
    /// A blank piece
    pub fn new() -> Self {
        Self {
            cells: [[None; PIECE_SIZE]; PIECE_SIZE],
        }
    }

    /// A piece built from a template with the given block
    pub fn from_template(template: &Template, block: Block) -> Self {
        let mut piece = Self::new();
        piece.copy_from_template(template, block);
        piece
    }

    /// Fill every cell with one value
    pub fn set_uniform(&mut self, cell: Cell) {
        for row in &mut self.cells {
            row.fill(cell);
        }
    }

    /// Overwrite the buffer: every set template bit becomes `block`, everything else empty.
    pub fn copy_from_template(&mut self, template: &Template, block: Block) {
        for (row, mask) in self.cells.iter_mut().zip(template.iter()) {
            for (cell, &bit) in row.iter_mut().zip(mask.iter()) {
                *cell = if bit != 0 { Some(block) } else { None };
            }
        }
    }

    /// Get cell at buffer position (x, y)
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    pub fn cells(&self) -> &[[Cell; PIECE_SIZE]; PIECE_SIZE] {
        &self.cells
    }

    /// Filled cells as (x, y, block), row by row
    pub fn blocks(&self) -> impl Iterator<Item = (i8, i8, Block)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(x, cell)| cell.map(|b| (x as i8, y as i8, b)))
        })
    }

    /// Color of the first filled cell, if any
    pub fn color(&self) -> Option<Color> {
        self.blocks().next().map(|(_, _, b)| b.color)
    }

    pub fn is_blank(&self) -> bool {
        self.blocks().next().is_none()
    }

    /// Check whether the piece fits at board offset (x, y).
    ///
    /// A filled cell fails the check if its column is outside the board or if the
    /// board cell under it is occupied. Rows are not bounds-checked: cells above
    /// or below the board never collide, reaching the floor is detected by the
    /// board after placement.
    pub fn can_move_to(&self, board: &Board, x: i8, y: i8) -> bool {
        for (px, py, _) in self.blocks() {
            let bx = x + px;
            let by = y + py;
            if bx < 0 || bx >= board.width() as i8 {
                debug!("can't move to {}, {} - out of bounds", x, y);
                return false;
            }
            if board.is_occupied(bx, by) {
                debug!("can't move to {}, {} - position occupied", x, y);
                return false;
            }
        }
        true
    }

    /// Rotate the buffer 90° in place: `new[y][x] = old[N-1-x][y]`.
    ///
    /// This is a layout transform only; callers check the result against the board.
    pub fn rotate(&mut self) {
        let old = self.cells;
        for (y, row) in self.cells.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = old[PIECE_SIZE - 1 - x][y];
            }
        }
    }

    /// Export the buffer in the legacy integer encoding
    pub fn write_u8_grid(&self, out: &mut RawPiece) {
        for (out_row, row) in out.iter_mut().zip(self.cells.iter()) {
            for (v, cell) in out_row.iter_mut().zip(row.iter()) {
                *v = cell_raw(*cell);
            }
        }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::get_template;
    use crate::types::PieceKind;

    fn falling(v: u8) -> Block {
        Block::falling(Color::new(v).unwrap())
    }

    #[test]
    fn test_copy_overwrites_previous_contents() {
        let mut piece = Piece::from_template(get_template(PieceKind::Slab), falling(1));
        piece.copy_from_template(get_template(PieceKind::Dot), falling(2));

        let blocks: Vec<_> = piece.blocks().collect();
        assert_eq!(blocks, vec![(2, 2, falling(2))]);
    }

    #[test]
    fn test_set_uniform() {
        let mut piece = Piece::new();
        assert!(piece.is_blank());

        piece.set_uniform(Some(falling(5)));
        assert_eq!(piece.blocks().count(), PIECE_SIZE * PIECE_SIZE);

        piece.set_uniform(None);
        assert!(piece.is_blank());
        assert_eq!(piece.color(), None);
    }

    #[test]
    fn test_rotate_moves_cells_clockwise() {
        let mut piece = Piece::from_template(get_template(PieceKind::I), falling(3));
        piece.rotate();

        // Row 2, columns 1..=4 becomes column 2, rows 1..=4.
        let cells: Vec<_> = piece.blocks().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(cells, vec![(2, 1), (2, 2), (2, 3), (2, 4)]);
    }

    #[test]
    fn test_raw_grid_uses_moving_offset() {
        let piece = Piece::from_template(get_template(PieceKind::Dot), falling(4));
        let mut raw = [[0u8; PIECE_SIZE]; PIECE_SIZE];
        piece.write_u8_grid(&mut raw);
        assert_eq!(raw[2][2], 14);
        assert_eq!(raw.iter().flatten().filter(|&&v| v != 0).count(), 1);
    }
}
