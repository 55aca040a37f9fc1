use serde::Serialize;

use crate::matrix::Grid;
use crate::pieces::ShapeMatrix;
use crate::types::PieceKind;

/// Outcome of one row-clear pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineClearResult {
    pub lines_removed: usize,
    /// Grid after compaction
    pub grid: Grid,
    pub score_bonus: u32,
}

/// Where the active piece would land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GhostSnapshot {
    pub shape: ShapeMatrix,
    pub x: i32,
    pub y: i32,
}

/// Everything a renderer needs for one frame
///
/// All matrices are owned copies; mutating a snapshot never reaches the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ViewSnapshot {
    pub kind: PieceKind,
    pub shape: ShapeMatrix,
    pub x: i32,
    pub y: i32,
    /// `None` when the piece is already resting
    pub ghost: Option<GhostSnapshot>,
    pub next: Option<ShapeMatrix>,
    pub held: Option<ShapeMatrix>,
    pub can_hold: bool,
}

impl ViewSnapshot {
    /// Whether the active piece cannot fall any further
    pub fn is_resting(&self) -> bool {
        self.ghost.is_none()
    }
}
