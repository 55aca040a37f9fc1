//! Board module - the board engine state machine
//!
//! [`BoardEngine`] owns the settled grid, the active piece (kind, rotation, offset),
//! the hold slot, the next-piece preview and the score. A driver moves it through
//! its lifecycle:
//!
//! ```text
//! reset -> spawn_piece -> (move_* | rotate | hold_swap)* -> move_down == false
//!       -> merge_active_into_grid -> clear_full_rows -> spawn_piece ...
//! ```
//!
//! `spawn_piece` returning `true` is game over. The engine never reads clocks or
//! input and never blocks; callers must serialize access to one instance.
//!
//! Every placement test goes through [`BoardEngine::collides`], which delegates to
//! [`Grid::collides`], so moves, rotations, ghost search and spawn all share one
//! bounds/overlap rule.

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info};

use crate::matrix::{self, Grid};
use crate::pieces::{get_spawn_shape, shape_width, ShapeMatrix};
use crate::rng::PieceSupplier;
use crate::rotation::RotationTracker;
use crate::scoring::ScoreTracker;
use crate::snapshot::{GhostSnapshot, LineClearResult, ViewSnapshot};
use crate::types::{BoardConfig, ConfigError, PieceKind};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActivePiece {
    rotation: RotationTracker,
    shape: ShapeMatrix,
    x: i32,
    y: i32,
}

impl ActivePiece {
    fn new(kind: PieceKind, (x, y): (i32, i32)) -> Self {
        let rotation = RotationTracker::new(kind);
        Self {
            shape: rotation.current_matrix(),
            rotation,
            x,
            y,
        }
    }
}

/// Result of a hold request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldOutcome {
    /// Hold was already used since the last spawn, or nothing is active
    Ignored,
    /// The slot was empty: the active kind was stored and a fresh piece spawned
    Stored { game_over: bool },
    /// The active kind and the held kind traded places
    Swapped,
}

/// Result of locking the active piece and bringing in the next one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettleOutcome {
    pub clear: LineClearResult,
    pub game_over: bool,
}

/// The board engine
#[derive(Debug, Clone)]
pub struct BoardEngine<R = StdRng> {
    config: BoardConfig,
    grid: Grid,
    supplier: PieceSupplier<R>,
    active: Option<ActivePiece>,
    next_preview: Option<ShapeMatrix>,
    hold: Option<PieceKind>,
    hold_used: bool,
    score: ScoreTracker,
}

impl BoardEngine<StdRng> {
    /// Create a board with an OS-seeded piece supplier
    pub fn new(config: BoardConfig) -> Result<Self, ConfigError> {
        Self::with_supplier(config, PieceSupplier::from_entropy())
    }

    /// Create a board with a reproducible piece sequence
    pub fn seeded(config: BoardConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_supplier(config, PieceSupplier::seeded(seed))
    }

    /// Create a board from raw dimensions
    pub fn with_dimensions(width: usize, height: usize) -> Result<Self, ConfigError> {
        Self::new(BoardConfig::new(width, height)?)
    }
}

impl<R: Rng> BoardEngine<R> {
    /// Create a board drawing pieces from `supplier`
    pub fn with_supplier(
        config: BoardConfig,
        supplier: PieceSupplier<R>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            grid: Grid::for_config(&config),
            supplier,
            active: None,
            next_preview: None,
            hold: None,
            hold_used: false,
            score: ScoreTracker::new(),
        })
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Settled cells (read-only)
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Replace the settled grid wholesale
    pub fn load_grid(&mut self, grid: Grid) -> Result<(), ConfigError> {
        if grid.width() != self.config.width || grid.height() != self.config.height {
            return Err(ConfigError::GridMismatch {
                width: grid.width(),
                height: grid.height(),
                expected_width: self.config.width,
                expected_height: self.config.height,
            });
        }
        self.grid = grid;
        Ok(())
    }

    pub fn score(&self) -> u32 {
        self.score.current()
    }

    pub fn add_score(&mut self, amount: u32) {
        self.score.add(amount);
    }

    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_kind(&self) -> Option<PieceKind> {
        self.active.map(|a| a.rotation.kind())
    }

    pub fn rotation_index(&self) -> Option<usize> {
        self.active.map(|a| a.rotation.index())
    }

    /// Offset of the active matrix's top-left corner
    pub fn position(&self) -> Option<(i32, i32)> {
        self.active.map(|a| (a.x, a.y))
    }

    pub fn active_matrix(&self) -> Option<ShapeMatrix> {
        self.active.map(|a| a.shape)
    }

    pub fn held_kind(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn held_matrix(&self) -> Option<ShapeMatrix> {
        self.hold.map(get_spawn_shape)
    }

    /// The kind queued after the active piece
    pub fn next_kind(&self) -> PieceKind {
        self.supplier.peek_next()
    }

    pub fn next_matrix(&self) -> Option<ShapeMatrix> {
        self.next_preview
    }

    pub fn can_hold(&self) -> bool {
        !self.hold_used
    }

    /// Shared collision predicate
    pub fn collides(&self, x: i32, y: i32, shape: &ShapeMatrix) -> bool {
        self.grid.collides(shape, x, y)
    }

    /// Horizontally centered spawn offset inside the hidden buffer
    pub fn spawn_offset(&self, shape: &ShapeMatrix) -> (i32, i32) {
        let x = (self.config.width / 2) as i32 - (shape_width(shape) / 2) as i32;
        (x, 0)
    }

    /// Bring in the next piece; returns true on game over
    ///
    /// The piece becomes active either way. It counts as blocked only when both the
    /// spawn row and the row above it collide, so tall pieces can still enter over
    /// terrain that reaches the top visible row.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.supplier.next_active();
        let offset = self.spawn_offset(&get_spawn_shape(kind));
        let piece = ActivePiece::new(kind, offset);

        self.next_preview = Some(get_spawn_shape(self.supplier.peek_next()));
        self.hold_used = false;

        let blocked = self.collides(piece.x, piece.y, &piece.shape)
            && self.collides(piece.x, piece.y - 1, &piece.shape);
        self.active = Some(piece);

        if blocked {
            info!(kind = kind.as_str(), "spawn blocked, game over");
        } else {
            debug!(kind = kind.as_str(), x = piece.x, y = piece.y, "spawned piece");
        }
        blocked
    }

    /// Try to shift the active piece; the state is untouched on failure
    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if self.collides(active.x + dx, active.y + dy, &active.shape) {
            return false;
        }

        self.active = Some(ActivePiece {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        });
        true
    }

    pub fn move_down(&mut self) -> bool {
        self.try_move(0, 1)
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Advance to the next rotation state in place (no wall kicks)
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let preview = active.rotation.preview_next_rotation();
        if self.collides(active.x, active.y, &preview.shape) {
            debug!(
                kind = active.rotation.kind().as_str(),
                to = preview.index,
                "rotation blocked"
            );
            return false;
        }

        let mut rotation = active.rotation;
        rotation.commit_rotation(preview.index);
        self.active = Some(ActivePiece {
            rotation,
            shape: preview.shape,
            ..active
        });
        true
    }

    /// Drop the active piece as far as it goes; returns rows travelled
    pub fn drop_to_floor(&mut self) -> u32 {
        let mut distance = 0;
        while self.move_down() {
            distance += 1;
        }
        distance
    }

    /// Drop, merge, clear and respawn in one step
    pub fn hard_drop(&mut self) -> SettleOutcome {
        let distance = self.drop_to_floor();
        debug!(distance, "hard drop");
        self.settle()
    }

    /// Merge the active piece, clear rows and spawn the next piece
    ///
    /// The bonus in the returned clear is not added to the score.
    pub fn settle(&mut self) -> SettleOutcome {
        self.merge_active_into_grid();
        let clear = self.clear_full_rows();
        let game_over = self.spawn_piece();
        SettleOutcome { clear, game_over }
    }

    /// Write the active piece's filled cells into the grid
    ///
    /// Call exactly once per settle: a second call writes the same cells again.
    pub fn merge_active_into_grid(&mut self) {
        let Some(active) = self.active else {
            return;
        };
        self.grid.stamp(&active.shape, active.x, active.y);
    }

    /// Remove full rows from the grid and report the pass
    pub fn clear_full_rows(&mut self) -> LineClearResult {
        let result = matrix::clear_full_rows(&self.grid);
        if result.lines_removed > 0 {
            debug!(
                lines = result.lines_removed,
                bonus = result.score_bonus,
                "cleared rows"
            );
            self.grid = result.grid.clone();
        }
        result
    }

    /// Stash the active piece, or trade it with the held one
    ///
    /// Allowed once per spawn. The swap branch puts the held kind at the spawn
    /// offset without a collision check.
    pub fn hold_swap(&mut self) -> HoldOutcome {
        if self.hold_used {
            return HoldOutcome::Ignored;
        }
        let Some(active) = self.active else {
            return HoldOutcome::Ignored;
        };
        let current = active.rotation.kind();

        let outcome = match self.hold.replace(current) {
            None => {
                let game_over = self.spawn_piece();
                HoldOutcome::Stored { game_over }
            }
            Some(held) => {
                let mut rotation = active.rotation;
                rotation.assign(held);
                let shape = rotation.current_matrix();
                let (x, y) = self.spawn_offset(&shape);
                self.active = Some(ActivePiece {
                    rotation,
                    shape,
                    x,
                    y,
                });
                HoldOutcome::Swapped
            }
        };
        debug!(held = current.as_str(), ?outcome, "hold");

        self.hold_used = true;
        outcome
    }

    /// Lowest reachable offset straight below the active piece
    ///
    /// `None` when the piece cannot move down (or nothing is active).
    pub fn ghost_position(&self) -> Option<(i32, i32)> {
        let active = self.active?;
        let mut ghost_y = active.y;
        while !self.collides(active.x, ghost_y + 1, &active.shape) {
            ghost_y += 1;
        }
        (ghost_y > active.y).then_some((active.x, ghost_y))
    }

    /// Copy out the renderable state
    ///
    /// # Panics
    ///
    /// Panics if no piece has been spawned since construction or reset.
    pub fn snapshot(&self) -> ViewSnapshot {
        let active = self
            .active
            .expect("snapshot() called before spawn_piece()");

        ViewSnapshot {
            kind: active.rotation.kind(),
            shape: active.shape,
            x: active.x,
            y: active.y,
            ghost: self.ghost_position().map(|(x, y)| GhostSnapshot {
                shape: active.shape,
                x,
                y,
            }),
            next: self.next_preview,
            held: self.held_matrix(),
            can_hold: self.can_hold(),
        }
    }

    /// Start over: empty grid, zero score, empty hold
    ///
    /// No piece is spawned; call [`BoardEngine::spawn_piece`] afterwards.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.score.reset();
        self.active = None;
        self.next_preview = None;
        self.hold = None;
        self.hold_used = false;
        info!(
            width = self.config.width,
            height = self.config.height,
            "board reset"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::rotation_states;

    fn board_with(kinds: &[PieceKind]) -> BoardEngine {
        BoardEngine::with_supplier(
            BoardConfig::default(),
            PieceSupplier::from_kinds(kinds.iter().copied(), 1),
        )
        .unwrap()
    }

    #[test]
    fn test_spawn_centers_piece() {
        let mut board = board_with(&[PieceKind::T]);
        assert!(!board.spawn_piece());
        assert_eq!(board.position(), Some((3, 0)));
        assert_eq!(board.rotation_index(), Some(0));
        assert!(board.can_hold());
    }

    #[test]
    fn test_moves_before_spawn_are_noops() {
        let mut board = board_with(&[]);
        assert!(!board.move_down());
        assert!(!board.move_left());
        assert!(!board.rotate());
        assert_eq!(board.hold_swap(), HoldOutcome::Ignored);
        assert_eq!(board.ghost_position(), None);
    }

    #[test]
    fn test_rejected_rotation_keeps_index() {
        let mut board = board_with(&[PieceKind::I]);
        board.spawn_piece();
        // Horizontal I at row 1 of its matrix; the vertical state needs column 4
        // down to row 3 of the matrix, so block (4, 3).
        board.grid.set(4, 3, 1);

        assert!(!board.rotate());
        assert_eq!(board.rotation_index(), Some(0));
        assert_eq!(board.active_matrix(), Some(rotation_states(PieceKind::I)[0]));
    }

    #[test]
    fn test_rotation_commits_on_success() {
        let mut board = board_with(&[PieceKind::T]);
        board.spawn_piece();
        assert!(board.rotate());
        assert_eq!(board.rotation_index(), Some(1));
        assert_eq!(board.active_matrix(), Some(rotation_states(PieceKind::T)[1]));
    }

    #[test]
    fn test_merge_writes_color_ids() {
        let mut board = board_with(&[PieceKind::O]);
        board.spawn_piece();
        board.merge_active_into_grid();
        // O fills matrix cells (1..=2, 1..=2); offset is (3, 0).
        for (x, y) in [(4, 1), (5, 1), (4, 2), (5, 2)] {
            assert_eq!(board.grid().get(x, y), Some(4));
        }
        assert_eq!(board.grid().get(3, 0), Some(0));
    }

    #[test]
    fn test_clear_full_rows_replaces_grid() {
        let mut board = board_with(&[]);
        for x in 0..10 {
            board.grid.set(x, 24, 1);
        }
        board.grid.set(0, 23, 2);

        let result = board.clear_full_rows();
        assert_eq!(result.lines_removed, 1);
        assert_eq!(result.score_bonus, 50);
        assert_eq!(board.grid().get(0, 24), Some(2));
        assert_eq!(board.grid(), &result.grid);
    }

    #[test]
    fn test_ghost_lands_on_floor() {
        let mut board = board_with(&[PieceKind::O]);
        board.spawn_piece();
        // O occupies matrix rows 1..=2, so the lowest offset puts row 2 at y = 24.
        assert_eq!(board.ghost_position(), Some((3, 22)));
        board.drop_to_floor();
        assert_eq!(board.ghost_position(), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut board = board_with(&[PieceKind::S, PieceKind::Z]);
        board.spawn_piece();
        board.hold_swap();
        board.add_score(120);
        board.grid.set(0, 24, 3);

        board.reset();

        assert!(board.grid().is_empty());
        assert_eq!(board.score(), 0);
        assert_eq!(board.held_kind(), None);
        assert!(board.can_hold());
        assert!(!board.has_active());
        assert_eq!(board.next_matrix(), None);
    }

    #[test]
    fn test_new_game_after_reset_previews_fresh_queue() {
        let mut board = board_with(&[PieceKind::T, PieceKind::O, PieceKind::I, PieceKind::L]);
        board.spawn_piece();
        assert_eq!(board.next_matrix(), Some(get_spawn_shape(PieceKind::O)));

        board.reset();
        assert_eq!(board.next_matrix(), None);

        board.spawn_piece();
        assert_eq!(board.active_kind(), Some(PieceKind::O));
        assert_eq!(board.next_matrix(), Some(get_spawn_shape(PieceKind::I)));
    }

    #[test]
    fn test_swap_restarts_rotation_of_held_kind() {
        let mut board = board_with(&[PieceKind::T, PieceKind::L, PieceKind::O]);
        board.spawn_piece();
        board.hold_swap(); // T held, L active
        board.drop_to_floor();
        board.settle(); // O active
        assert_eq!(board.hold_swap(), HoldOutcome::Swapped);

        assert_eq!(board.active_kind(), Some(PieceKind::T));
        assert_eq!(board.rotation_index(), Some(0));
        assert_eq!(board.active_matrix(), Some(get_spawn_shape(PieceKind::T)));
        assert_eq!(board.position(), Some((3, 0)));
        assert!(board.rotate());
        assert_eq!(board.active_matrix(), Some(rotation_states(PieceKind::T)[1]));
    }

    #[test]
    fn test_load_grid_checks_dimensions() {
        let mut board = board_with(&[]);
        assert!(board.load_grid(Grid::new(10, 24)).is_err());
        assert!(board.load_grid(Grid::new(9, 25)).is_err());
        assert!(board.load_grid(Grid::new(10, 25)).is_ok());
    }
}
