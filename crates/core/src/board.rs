//! Board module - manages the occupancy grid
//!
//! The board is a `columns x rows` grid where each cell is empty or holds the
//! kind of the block locked there. Storage is a flat row-major `Vec`.
//! Coordinates: (x, y) where x ranges `0..columns` (left to right) and y ranges
//! `0..rows` (bottom to top). Cells at `y >= rows` are above the visible board:
//! they are never stored and never block.

use crate::types::{Cell, PieceKind};

/// The game board - fixed dimensions chosen at construction
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    columns: i32,
    rows: i32,
    /// Flat array of cells, row-major order (y * columns + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(columns: u16, rows: u16) -> Self {
        assert!(columns > 0 && rows > 0, "board dimensions must be non-zero");
        Self {
            columns: columns as i32,
            rows: rows as i32,
            cells: vec![None; columns as usize * rows as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.columns || y < 0 || y >= self.rows {
            return None;
        }
        Some((y as usize) * (self.columns as usize) + (x as usize))
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Overwrite a cell directly, bypassing the lock precondition.
    ///
    /// Meant for tests and tooling that need to stage a board.
    /// Returns false if out of bounds.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a locked block occupies (x, y).
    ///
    /// Cells at or above `rows` are never occupied so pieces may hang off the
    /// top of the board.
    ///
    /// # Panics
    ///
    /// Panics if `x` is outside `0..columns` or `y` is negative: collision code
    /// rejects those coordinates before asking, so reaching here is a bug.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        assert!(
            x >= 0 && x < self.columns && y >= 0,
            "occupancy query out of bounds: ({}, {}) on a {}x{} board",
            x,
            y,
            self.columns,
            self.rows
        );
        if y >= self.rows {
            return false;
        }
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Mark (x, y) as occupied by a block of `kind`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds or already occupied.
    pub fn lock(&mut self, x: i32, y: i32, kind: PieceKind) {
        let idx = match self.index(x, y) {
            Some(idx) => idx,
            None => panic!(
                "lock out of bounds: ({}, {}) on a {}x{} board",
                x, y, self.columns, self.rows
            ),
        };
        assert!(
            self.cells[idx].is_none(),
            "lock on occupied cell ({}, {})",
            x,
            y
        );
        self.cells[idx] = Some(kind);
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i32) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Check if a row has no blocks at all
    pub fn is_row_empty(&self, y: i32) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_none()))
            .unwrap_or(true)
    }

    fn row(&self, y: i32) -> Option<&[Cell]> {
        if y < 0 || y >= self.rows {
            return None;
        }
        let width = self.columns as usize;
        let start = y as usize * width;
        Some(&self.cells[start..start + width])
    }

    /// Empty row `y` and shift every row above it down by one.
    /// The top row becomes empty. Out-of-range rows are ignored.
    pub fn clear_and_collapse(&mut self, y: i32) {
        if y < 0 || y >= self.rows {
            return;
        }

        let width = self.columns as usize;
        let y = y as usize;
        let top = self.rows as usize - 1;

        // copy_within handles the overlapping ranges
        if y < top {
            self.cells
                .copy_within((y + 1) * width..(top + 1) * width, y * width);
        }

        self.cells[top * width..].fill(None);
    }

    /// Coordinates of every occupied cell, bottom row first.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let width = self.columns as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_some())
            .map(move |(i, _)| ((i % width) as i32, (i / width) as i32))
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array (row-major, bottom row first)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from text rows, top row first.
    ///
    /// `.` is empty, any other character is a locked block of `kind`.
    /// Row lengths must match.
    ///
    /// # Panics
    ///
    /// Panics on an empty picture or ragged rows.
    pub fn from_picture(picture: &[&str], kind: PieceKind) -> Self {
        assert!(!picture.is_empty(), "picture needs at least one row");
        let columns = picture[0].chars().count();
        let rows = picture.len();
        let mut board = Self::new(columns as u16, rows as u16);
        for (i, line) in picture.iter().enumerate() {
            assert_eq!(line.chars().count(), columns, "ragged picture row {}", i);
            let y = (rows - 1 - i) as i32;
            for (x, ch) in line.chars().enumerate() {
                if ch != '.' {
                    board.lock(x as i32, y, kind);
                }
            }
        }
        board
    }
}
