//! Rotation tracking for the active piece
//!
//! The tracker only knows which kind is active and which of its rotation states is
//! current. Rotating is split into a side-effect free preview and an explicit commit,
//! so the board can test the previewed matrix for collisions before accepting it.

use crate::pieces::{get_shape, state_count, ShapeMatrix};
use crate::types::PieceKind;

/// A previewed rotation: the matrix to test and the index to commit on success
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPreview {
    pub shape: ShapeMatrix,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationTracker {
    kind: PieceKind,
    index: usize,
}

impl RotationTracker {
    pub fn new(kind: PieceKind) -> Self {
        Self { kind, index: 0 }
    }

    /// Switch to another piece; rotation always restarts at state 0
    pub fn assign(&mut self, kind: PieceKind) {
        self.kind = kind;
        self.index = 0;
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_matrix(&self) -> ShapeMatrix {
        get_shape(self.kind, self.index)
    }

    /// Next state in the cycle, without changing the committed index
    pub fn preview_next_rotation(&self) -> RotationPreview {
        let index = (self.index + 1) % state_count(self.kind);
        RotationPreview {
            shape: get_shape(self.kind, index),
            index,
        }
    }

    /// Accept a rotation index (normally one returned by a preview)
    pub fn commit_rotation(&mut self, index: usize) {
        debug_assert!(index < state_count(self.kind), "rotation index out of range");
        self.index = index % state_count(self.kind);
    }
}
