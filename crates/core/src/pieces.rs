//! Pieces module - the shape catalog
//!
//! Every kind owns an ordered list of rotation states. A state is a fixed 4x4 matrix
//! whose nonzero cells are filled with the kind's color id. Cycling through the list
//! in order rotates the piece; the O piece has a single state.
//!
//! The tables are `'static` constants. [`ShapeMatrix`] is a `Copy` array, so every
//! accessor hands out an independent value and callers can never alias the catalog.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, SHAPE_SIZE};

/// A single rotation state, indexed `[row][col]`
pub type ShapeMatrix = [[Cell; SHAPE_SIZE]; SHAPE_SIZE];

/// Offset of a filled cell relative to the matrix top-left corner, as `(col, row)`
pub type CellOffset = (i32, i32);

const I_STATES: [ShapeMatrix; 2] = [
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
];

const J_STATES: [ShapeMatrix; 4] = [
    [[0, 0, 0, 0], [2, 2, 2, 0], [0, 0, 2, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [0, 2, 2, 0], [0, 2, 0, 0], [0, 2, 0, 0]],
    [[0, 0, 0, 0], [0, 2, 0, 0], [0, 2, 2, 2], [0, 0, 0, 0]],
    [[0, 0, 2, 0], [0, 0, 2, 0], [0, 2, 2, 0], [0, 0, 0, 0]],
];

const L_STATES: [ShapeMatrix; 4] = [
    [[0, 0, 0, 0], [0, 3, 3, 3], [0, 3, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [0, 3, 3, 0], [0, 0, 3, 0], [0, 0, 3, 0]],
    [[0, 0, 0, 0], [0, 0, 3, 0], [3, 3, 3, 0], [0, 0, 0, 0]],
    [[0, 3, 0, 0], [0, 3, 0, 0], [0, 3, 3, 0], [0, 0, 0, 0]],
];

const O_STATES: [ShapeMatrix; 1] = [[[0, 0, 0, 0], [0, 4, 4, 0], [0, 4, 4, 0], [0, 0, 0, 0]]];

const S_STATES: [ShapeMatrix; 2] = [
    [[0, 0, 0, 0], [0, 5, 5, 0], [5, 5, 0, 0], [0, 0, 0, 0]],
    [[5, 0, 0, 0], [5, 5, 0, 0], [0, 5, 0, 0], [0, 0, 0, 0]],
];

const T_STATES: [ShapeMatrix; 4] = [
    [[0, 0, 0, 0], [6, 6, 6, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
    [[0, 6, 0, 0], [0, 6, 6, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
    [[0, 6, 0, 0], [6, 6, 6, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 6, 0, 0], [6, 6, 0, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
];

const Z_STATES: [ShapeMatrix; 2] = [
    [[0, 0, 0, 0], [7, 7, 0, 0], [0, 7, 7, 0], [0, 0, 0, 0]],
    [[0, 7, 0, 0], [7, 7, 0, 0], [7, 0, 0, 0], [0, 0, 0, 0]],
];

/// All rotation states of a kind, in rotation order
pub fn rotation_states(kind: PieceKind) -> &'static [ShapeMatrix] {
    match kind {
        PieceKind::I => &I_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::L => &L_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::Z => &Z_STATES,
    }
}

/// Number of distinct rotation states of a kind
pub fn state_count(kind: PieceKind) -> usize {
    rotation_states(kind).len()
}

/// Get the matrix for a kind and rotation index
///
/// The index wraps, so any `usize` is accepted.
pub fn get_shape(kind: PieceKind, rotation: usize) -> ShapeMatrix {
    let states = rotation_states(kind);
    states[rotation % states.len()]
}

/// Get the unrotated (spawn) matrix of a kind
pub fn get_spawn_shape(kind: PieceKind) -> ShapeMatrix {
    get_shape(kind, 0)
}

/// Width of a shape matrix in columns (used for spawn centering)
pub fn shape_width(shape: &ShapeMatrix) -> usize {
    shape[0].len()
}

/// Offsets of all filled cells, row-major
///
/// Stack-only; a 4x4 matrix has at most 16 filled cells.
pub fn filled_cells(shape: &ShapeMatrix) -> ArrayVec<CellOffset, 16> {
    let mut cells = ArrayVec::new();
    for (r, row) in shape.iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            if value != 0 {
                cells.push((c as i32, r as i32));
            }
        }
    }
    cells
}
