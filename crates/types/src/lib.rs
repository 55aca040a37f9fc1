//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data: the core engine, the controller and any external
//! renderer can depend on it without pulling in game logic.
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 25 rows. The top two rows are a hidden
//! spawn buffer: they are never drawn but take part in every collision check.
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 25 rows (indexed 0-24, top to bottom)
//! - **Hidden rows**: 0 and 1
//!
//! # Cells
//!
//! A cell is a `u8`. Zero means empty; any other value is the color id of the piece
//! that settled there (see [`PieceKind::color_id`]).
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{BoardConfig, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let config = BoardConfig::default();
//! assert_eq!(config.width, BOARD_WIDTH);
//! assert_eq!(config.height, BOARD_HEIGHT);
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.color_id(), 6);
//!
//! assert!(BoardConfig::new(0, 25).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Default board height in cells, hidden rows included (25 rows)
pub const BOARD_HEIGHT: usize = 25;

/// Rows at the top of the grid that are part of collision logic but never rendered
pub const HIDDEN_ROWS: usize = 2;

/// Side length of every shape matrix
pub const SHAPE_SIZE: usize = 4;

/// Points awarded for a player-initiated downward move that succeeds
pub const SOFT_DROP_REWARD: u32 = 1;

/// Multiplier of the line-clear bonus: `LINE_CLEAR_BASE * lines^2`
pub const LINE_CLEAR_BASE: u32 = 50;

/// A cell on the game board
///
/// - `0`: Empty cell
/// - `1..=7`: Cell filled by the piece with that color id
pub type Cell = u8;

/// Value of an empty cell
pub const EMPTY: Cell = 0;

/// The seven piece kinds
///
/// Declaration order matches the color ids: I=1, J=2, L=3, O=4, S=5, T=6, Z=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in color-id order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Color id written into the grid for cells of this kind
    pub fn color_id(&self) -> Cell {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::color_id`]
    pub fn from_color_id(id: Cell) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }
}

/// Rejected board configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board width must be positive")]
    ZeroWidth,
    #[error("board height must be positive")]
    ZeroHeight,
    #[error("hidden rows ({hidden}) must be fewer than the board height ({height})")]
    HiddenRowsExceedHeight { hidden: usize, height: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("grid is {width}x{height}, board is {expected_width}x{expected_height}")]
    GridMismatch {
        width: usize,
        height: usize,
        expected_width: usize,
        expected_height: usize,
    },
}

/// Board dimensions, supplied once at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    pub hidden_rows: usize,
}

impl BoardConfig {
    /// Create a config with the default number of hidden rows
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        Self::with_hidden_rows(width, height, HIDDEN_ROWS.min(height.saturating_sub(1)))
    }

    /// Create a config with an explicit hidden spawn buffer
    pub fn with_hidden_rows(
        width: usize,
        height: usize,
        hidden_rows: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            width,
            height,
            hidden_rows,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants `new` enforces (useful after deserializing)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if self.hidden_rows >= self.height {
            return Err(ConfigError::HiddenRowsExceedHeight {
                hidden: self.hidden_rows,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Read dimensions from `BLOCKFALL_WIDTH`, `BLOCKFALL_HEIGHT` and
    /// `BLOCKFALL_HIDDEN_ROWS`; unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`BoardConfig::from_env`] with the variables supplied by `lookup`
    ///
    /// Without an explicit hidden row count the default buffer shrinks to fit short
    /// boards, as in [`BoardConfig::new`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).and_then(|s| s.trim().parse::<usize>().ok());

        let width = read("BLOCKFALL_WIDTH").unwrap_or(BOARD_WIDTH);
        let height = read("BLOCKFALL_HEIGHT").unwrap_or(BOARD_HEIGHT);
        let hidden_rows = read("BLOCKFALL_HIDDEN_ROWS")
            .unwrap_or_else(|| HIDDEN_ROWS.min(height.saturating_sub(1)));

        Self::with_hidden_rows(width, height, hidden_rows)
    }

    /// Number of rows a renderer should draw
    pub fn visible_height(&self) -> usize {
        self.height - self.hidden_rows
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            hidden_rows: HIDDEN_ROWS,
        }
    }
}

/// Kind of movement requested by the player or the gravity timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveKind {
    Down,
    Left,
    Right,
    Rotate,
    HardDrop,
    Hold,
}

impl MoveKind {
    /// Parse from string
    ///
    /// Accepts camelCase names (e.g. "hardDrop") case-insensitively.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "down" => Some(MoveKind::Down),
            "left" => Some(MoveKind::Left),
            "right" => Some(MoveKind::Right),
            "rotate" => Some(MoveKind::Rotate),
            "harddrop" => Some(MoveKind::HardDrop),
            "hold" => Some(MoveKind::Hold),
            _ => None,
        }
    }
}

/// Origin of a movement request
///
/// Only used for scoring policy outside the board engine: the engine itself treats
/// both sources the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveSource {
    /// A key press
    User,
    /// The periodic gravity timer
    Timer,
}

/// A movement request tagged with its origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveEvent {
    pub kind: MoveKind,
    pub source: MoveSource,
}

impl MoveEvent {
    pub fn user(kind: MoveKind) -> Self {
        Self {
            kind,
            source: MoveSource::User,
        }
    }

    pub fn timer(kind: MoveKind) -> Self {
        Self {
            kind,
            source: MoveSource::Timer,
        }
    }
}
