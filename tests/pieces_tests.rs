//! Piece tests - templates, rotation and the collision test

use grid_tetris::core::{get_template, Board, Piece, RawPiece, TEMPLATES};
use grid_tetris::types::{Block, Color, PieceKind, BOARD_WIDTH, PIECE_SIZE, SPAWN_X, SPAWN_Y};

fn falling(v: u8) -> Block {
    Block::falling(Color::new(v).unwrap())
}

fn settled(v: u8) -> Option<Block> {
    Some(Block::settled(Color::new(v).unwrap()))
}

fn raw(piece: &Piece) -> RawPiece {
    let mut out = [[0; PIECE_SIZE]; PIECE_SIZE];
    piece.write_u8_grid(&mut out);
    out
}

#[test]
fn test_every_kind_has_a_template() {
    assert_eq!(TEMPLATES.len(), PieceKind::COUNT);
    for kind in PieceKind::ALL {
        let piece = Piece::from_template(get_template(kind), falling(1));
        assert!(!piece.is_blank(), "{:?}", kind);
    }
}

#[test]
fn test_four_rotations_are_identity() {
    for kind in PieceKind::ALL {
        let original = Piece::from_template(get_template(kind), falling(4));
        let mut piece = original;
        for _ in 0..4 {
            piece.rotate();
        }
        assert_eq!(piece, original, "{:?}", kind);
    }
}

#[test]
fn test_rotation_keeps_cell_count_and_color() {
    for kind in PieceKind::ALL {
        let mut piece = Piece::from_template(get_template(kind), falling(6));
        let count = piece.blocks().count();
        piece.rotate();
        assert_eq!(piece.blocks().count(), count);
        assert!(piece.blocks().all(|(_, _, b)| b == falling(6)));
    }
}

#[test]
fn test_o_piece_rotation_moves_within_buffer() {
    // The 2x2 sits off-center, so a quarter turn shifts it inside the buffer.
    let mut piece = Piece::from_template(get_template(PieceKind::O), falling(4));
    piece.rotate();
    let cells: Vec<_> = piece.blocks().map(|(x, y, _)| (x, y)).collect();
    assert_eq!(cells, vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
}

#[test]
fn test_can_move_to_ignores_vertical_bounds() {
    let board = Board::new();
    let piece = Piece::from_template(get_template(PieceKind::Slab), falling(2));

    for y in [-10, -4, 0, 15, 27, 40] {
        assert!(piece.can_move_to(&board, 0, y), "y = {y}");
    }
}

#[test]
fn test_can_move_to_checks_columns() {
    let board = Board::new();
    // I cells sit in buffer columns 1..=4.
    let piece = Piece::from_template(get_template(PieceKind::I), falling(2));

    assert!(piece.can_move_to(&board, -1, 0));
    assert!(!piece.can_move_to(&board, -2, 0));
    assert!(piece.can_move_to(&board, BOARD_WIDTH as i8 - 5, 0));
    assert!(!piece.can_move_to(&board, BOARD_WIDTH as i8 - 4, 0));
}

#[test]
fn test_can_move_to_checks_every_occupied_cell() {
    let piece = Piece::from_template(get_template(PieceKind::T), falling(5));

    // T: row 2 columns 1..=3, row 3 column 2.
    for (bx, by) in [(4, 2), (5, 2), (6, 2), (5, 3)] {
        let mut board = Board::new();
        board.set(bx, by, settled(1));
        assert!(!piece.can_move_to(&board, SPAWN_X, SPAWN_Y), "blocked at ({bx}, {by})");
    }

    // Cells under empty buffer positions do not matter.
    let mut board = Board::new();
    board.set(4, 3, settled(1));
    board.set(6, 3, settled(1));
    board.set(3, 2, settled(1));
    assert!(piece.can_move_to(&board, SPAWN_X, SPAWN_Y));
}

#[test]
fn test_i_piece_spawn_fills_row_two() {
    let mut board = Board::new();
    let piece = Piece::from_template(get_template(PieceKind::I), falling(3));

    assert!(piece.can_move_to(&board, SPAWN_X, SPAWN_Y));
    board.place_piece(&piece, SPAWN_X, SPAWN_Y);

    assert_eq!(board.moving_count(), 4);
    for x in 4..8 {
        assert_eq!(board.get(x, 2), Some(Some(falling(3))));
    }
}

#[test]
fn test_raw_export_matches_template() {
    for kind in PieceKind::ALL {
        let piece = Piece::from_template(get_template(kind), falling(9));
        let out = raw(&piece);
        for (row, mask) in out.iter().zip(get_template(kind).iter()) {
            for (&v, &bit) in row.iter().zip(mask.iter()) {
                assert_eq!(v, bit * 19);
            }
        }
    }
}
