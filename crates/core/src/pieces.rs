//! Pieces module - the fixed 5x5 shape templates
//!
//! Each template is an immutable 0/1 mask indexed `[row][column]`. A live
//! [`Piece`](crate::piece::Piece) is produced by copying a template with a color.

use crate::types::{PieceKind, PIECE_SIZE};

/// A 0/1 shape mask, indexed `[y][x]`
pub type Template = [[u8; PIECE_SIZE]; PIECE_SIZE];

const I: Template = [
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0],
    [0, 1, 1, 1, 1],
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0],
];

const J: Template = [
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0],
    [0, 1, 0, 0, 0],
    [0, 1, 1, 1, 0],
    [0, 0, 0, 0, 0],
];

const L: Template = [
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0],
    [0, 0, 0, 1, 0],
    [0, 1, 1, 1, 0],
    [0, 0, 0, 0, 0],
];

const S: Template = [
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0],
    [0, 0, 1, 1, 0],
    [0, 1, 1, 0, 0],
    [0, 0, 0, 0, 0],
];

const Z: Template = [
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0],
    [0, 1, 1, 0, 0],
    [0, 0, 1, 1, 0],
    [0, 0, 0, 0, 0],
];

const T: Template = [
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0],
    [0, 1, 1, 1, 0],
    [0, 0, 1, 0, 0],
    [0, 0, 0, 0, 0],
];

const O: Template = [
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0],
    [0, 1, 1, 0, 0],
    [0, 1, 1, 0, 0],
    [0, 0, 0, 0, 0],
];

// Single cell, handy when debugging placement.
const DOT: Template = [
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0],
    [0, 0, 1, 0, 0],
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0],
];

const SLAB: Template = [
    [0, 0, 0, 0, 0],
    [1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1],
    [0, 0, 0, 0, 0],
];

const BAR3: Template = [
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0],
    [0, 1, 1, 1, 0],
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0],
];

const TOWER: Template = [
    [0, 0, 0, 0, 0],
    [0, 1, 1, 0, 0],
    [0, 1, 1, 0, 0],
    [0, 1, 1, 0, 0],
    [0, 0, 0, 0, 0],
];

/// All templates in [`PieceKind::ALL`] order
pub const TEMPLATES: [Template; PieceKind::COUNT] =
    [I, J, L, S, Z, T, O, DOT, SLAB, BAR3, TOWER];

/// Get the template for a piece kind
pub fn get_template(kind: PieceKind) -> &'static Template {
    &TEMPLATES[kind.index()]
}

/// Number of filled cells in a template
pub fn cell_count(template: &Template) -> usize {
    template
        .iter()
        .flat_map(|row| row.iter())
        .filter(|&&v| v != 0)
        .count()
}
