//! Scoring module - score accumulation and the line-clear bonus formula
//!
//! A clear pass awards `50 * lines^2`, so multi-line clears grow superlinearly:
//!
//! | Lines | Bonus |
//! |-------|-------|
//! | 0 | 0 |
//! | 1 | 50 |
//! | 2 | 200 |
//! | 3 | 450 |
//! | 4 | 800 |
//!
//! The board engine only reports the bonus; the caller decides when to add it.

use serde::{Deserialize, Serialize};

use crate::types::LINE_CLEAR_BASE;

/// Bonus for removing `lines` rows in one pass
pub fn line_clear_bonus(lines: usize) -> u32 {
    let lines = lines as u32;
    LINE_CLEAR_BASE.saturating_mul(lines.saturating_mul(lines))
}

/// Running score of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }

    pub fn current(&self) -> u32 {
        self.score
    }
}
