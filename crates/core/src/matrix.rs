//! Matrix module - the settled-block grid and pure matrix helpers
//!
//! The grid is stored as a flat row-major array (`y * width + x`) for cache locality.
//! Coordinates are `(x, y)` with `x` growing to the right and `y` growing downward;
//! row 0 is the top of the hidden spawn buffer.
//!
//! Shape placement uses signed coordinates so a piece may hang off any edge while its
//! empty matrix cells do; only filled cells are ever bounds-checked.

use serde::Serialize;

use crate::pieces::{filled_cells, ShapeMatrix};
use crate::scoring::line_clear_bonus;
use crate::snapshot::LineClearResult;
use crate::types::{BoardConfig, Cell, ConfigError, EMPTY};

/// Fixed-size grid of settled cells
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    /// Create an empty grid sized by a validated config
    pub fn for_config(config: &BoardConfig) -> Self {
        Self::new(config.width, config.height)
    }

    /// Build a grid from rows, rejecting ragged or empty input
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, ConfigError> {
        let height = rows.len();
        if height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        let width = rows[0].len();
        if width == 0 {
            return Err(ConfigError::ZeroWidth);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(ConfigError::RaggedRows {
                    row: y,
                    found: row.len(),
                    expected: width,
                });
            }
            cells.extend(row);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Calculate flat index from signed coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(EMPTY))
    }

    /// Borrow one row
    ///
    /// Panics if `y` is out of bounds.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width.max(1))
    }

    /// Rows a renderer draws: everything below the hidden buffer
    pub fn visible_rows(&self, hidden_rows: usize) -> impl Iterator<Item = &[Cell]> + '_ {
        self.rows().skip(hidden_rows)
    }

    /// Copy out as nested rows
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    /// Whether every cell is empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == EMPTY)
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Collision predicate shared by every placement check
    ///
    /// True when any filled cell of `shape` at offset `(x, y)` lands outside
    /// `[0, width) x [0, height)` or on a nonzero grid cell.
    pub fn collides(&self, shape: &ShapeMatrix, x: i32, y: i32) -> bool {
        filled_cells(shape)
            .iter()
            .any(|&(dx, dy)| !self.is_free(x + dx, y + dy))
    }

    /// Write the filled cells of `shape` at `(x, y)`; out-of-bounds cells are skipped
    pub fn stamp(&mut self, shape: &ShapeMatrix, x: i32, y: i32) {
        for (dx, dy) in filled_cells(shape) {
            let value = shape[dy as usize][dx as usize];
            self.set(x + dx, y + dy, value);
        }
    }

    /// Remove all full rows in place, shifting the rest down
    ///
    /// Two-pointer scan from the bottom: surviving rows keep their order and settle at
    /// the bottom, vacated rows at the top are zero-filled. Returns the number of rows
    /// removed.
    pub fn compact_full_rows(&mut self) -> usize {
        let width = self.width;
        let mut write_y = self.height;
        let mut removed = 0;

        for read_y in (0..self.height).rev() {
            if is_row_full(self.row(read_y)) {
                removed += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        self.cells[..write_y * width].fill(EMPTY);
        removed
    }
}

/// Independent copy of a grid
pub fn deep_copy(grid: &Grid) -> Grid {
    grid.clone()
}

/// Non-mutating merge: a copy of `grid` with `shape` written at `(x, y)`
///
/// Cells that fall outside the grid are dropped.
pub fn overlay(grid: &Grid, shape: &ShapeMatrix, x: i32, y: i32) -> Grid {
    let mut merged = deep_copy(grid);
    merged.stamp(shape, x, y);
    merged
}

/// A row is full iff every cell is nonzero
pub fn is_row_full(row: &[Cell]) -> bool {
    row.iter().all(|&cell| cell != EMPTY)
}

/// Remove every full row of `grid` and compute the bonus for the pass
///
/// The input is left untouched; the compacted grid is returned in the result.
pub fn clear_full_rows(grid: &Grid) -> LineClearResult {
    let mut compacted = deep_copy(grid);
    let lines_removed = compacted.compact_full_rows();
    LineClearResult {
        lines_removed,
        grid: compacted,
        score_bonus: line_clear_bonus(lines_removed),
    }
}
