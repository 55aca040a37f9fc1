//! Core game logic module - pure, synchronous and testable
//!
//! This crate contains the falling-block rules: the shape catalog, piece supply,
//! rotation, collision, merging, row clearing, hold and ghost. It has **no
//! dependencies** on rendering, input devices, timers or storage, so it can run in a
//! terminal, a GUI, a test or a headless simulation alike.
//!
//! # Module Structure
//!
//! - [`pieces`]: 4x4 rotation matrices for the seven kinds
//! - [`rng`]: uniform random piece supply with next-piece lookahead
//! - [`rotation`]: rotation index tracking with preview-then-commit
//! - [`matrix`]: the settled [`Grid`] and pure matrix helpers (overlay, row compaction)
//! - [`board`]: the [`BoardEngine`] state machine
//! - [`scoring`]: score accumulation and the `50 * lines^2` clear bonus
//! - [`snapshot`]: render-ready copies of the board state
//!
//! # Rules
//!
//! - **Spawn**: pieces enter centered in the two hidden top rows; a spawn is blocked
//!   (game over) only when both the spawn row and the row above it collide
//! - **Rotation**: cycles through the kind's states in place, no wall kicks
//! - **Hold**: once per spawned piece
//! - **Ghost**: the lowest reachable offset straight down
//!
//! # Example
//!
//! ```
//! use blockfall_core::BoardEngine;
//! use blockfall_types::BoardConfig;
//!
//! let mut board = BoardEngine::seeded(BoardConfig::default(), 12345).unwrap();
//! assert!(!board.spawn_piece());
//!
//! board.move_right();
//! board.rotate();
//! let outcome = board.hard_drop();
//! assert!(!outcome.game_over);
//! assert_eq!(outcome.clear.lines_removed, 0);
//!
//! let view = board.snapshot();
//! assert!(view.next.is_some());
//! ```

pub mod board;
pub mod matrix;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{BoardEngine, HoldOutcome, SettleOutcome};
pub use matrix::Grid;
pub use pieces::{get_shape, get_spawn_shape, ShapeMatrix};
pub use rng::PieceSupplier;
pub use rotation::{RotationPreview, RotationTracker};
pub use scoring::{line_clear_bonus, ScoreTracker};
pub use snapshot::{GhostSnapshot, LineClearResult, ViewSnapshot};
