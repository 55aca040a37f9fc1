//! Engine module - the driver layer between input and the board
//!
//! Timer ticks and key presses both arrive here as [`MoveEvent`](types::MoveEvent)s,
//! already serialized onto one thread by the caller. [`GameController`] applies
//! them to a single [`BoardEngine`](core::BoardEngine) and returns what to draw.
//!
//! # Example
//!
//! ```
//! use blockfall_engine::GameController;
//! use blockfall_engine::types::{BoardConfig, MoveEvent, MoveKind};
//!
//! let mut game = GameController::seeded(BoardConfig::default(), 7).unwrap();
//!
//! let result = game.handle(MoveEvent::user(MoveKind::Down));
//! assert!(result.clear.is_none());
//! assert_eq!(game.score(), 1);
//!
//! let result = game.handle(MoveEvent::user(MoveKind::HardDrop));
//! assert!(result.clear.is_some());
//! ```

pub mod controller;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use controller::{DownResult, GameController};
