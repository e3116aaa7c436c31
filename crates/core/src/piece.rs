//! Active piece - a shape anchored on the board
//!
//! The piece never stores the board. Every operation borrows it for the
//! duration of the call, so the simulation stays the single owner of both.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::shape::Shape;
use crate::types::{PieceKind, RotationDirection, SHAPE_PIVOT, SHAPE_SIZE};

/// Rows touched by a lock, ascending and deduplicated
pub type TouchedRows = ArrayVec<i32, SHAPE_SIZE>;

/// Result of committing a piece into the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockOutcome {
    /// Board rows that received at least one block
    pub rows: TouchedRows,
    /// True if some cells sat at or above the top row and were dropped
    pub overflowed: bool,
}

/// The currently falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub anchor: (i32, i32),
    pub shape: Shape,
}

impl ActivePiece {
    /// Create a piece of `kind` in its template orientation at `anchor`
    pub fn new(kind: PieceKind, anchor: (i32, i32)) -> Self {
        Self::with_shape(kind, anchor, Shape::template(kind))
    }

    /// Create a piece with a host-supplied shape; `kind` only picks the colour
    pub fn with_shape(kind: PieceKind, anchor: (i32, i32), shape: Shape) -> Self {
        Self {
            kind,
            anchor,
            shape,
        }
    }

    /// Whether `shape` anchored at `anchor` fits on `board`.
    ///
    /// Cells left/right of the board or below row 0 fail; cells at or above
    /// the top row always pass; everything else must be unoccupied.
    pub fn can_occupy(board: &Board, anchor: (i32, i32), shape: &Shape) -> bool {
        shape.occupied_offsets().all(|(ox, oy)| {
            let x = anchor.0 + ox - SHAPE_PIVOT;
            let y = anchor.1 + oy - SHAPE_PIVOT;
            if x < 0 || x >= board.columns() || y < 0 {
                return false;
            }
            y >= board.rows() || !board.is_occupied(x, y)
        })
    }

    /// Whether the piece fits where it currently is
    pub fn fits(&self, board: &Board) -> bool {
        Self::can_occupy(board, self.anchor, &self.shape)
    }

    /// Move by (dx, dy) if the destination fits. State is untouched on failure.
    pub fn try_translate(&mut self, board: &Board, dx: i32, dy: i32) -> bool {
        let candidate = (self.anchor.0 + dx, self.anchor.1 + dy);
        if !Self::can_occupy(board, candidate, &self.shape) {
            return false;
        }
        self.anchor = candidate;
        true
    }

    /// Rotate in place if the rotated shape fits at the same anchor.
    /// No wall kicks are attempted.
    pub fn try_rotate(&mut self, board: &Board, direction: RotationDirection) -> bool {
        let candidate = self.shape.rotated(direction);
        if !Self::can_occupy(board, self.anchor, &candidate) {
            return false;
        }
        self.shape = candidate;
        true
    }

    /// Whether a downward step would be blocked
    pub fn is_grounded(&self, board: &Board) -> bool {
        !Self::can_occupy(board, (self.anchor.0, self.anchor.1 - 1), &self.shape)
    }

    /// Number of rows the piece can fall before it is blocked
    pub fn drop_distance(&self, board: &Board) -> i32 {
        let mut distance = 0;
        while Self::can_occupy(
            board,
            (self.anchor.0, self.anchor.1 - distance - 1),
            &self.shape,
        ) {
            distance += 1;
        }
        distance
    }

    /// Absolute board coordinates of every cell, including any above the top
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (ax, ay) = self.anchor;
        self.shape
            .pivot_offsets()
            .map(move |(dx, dy)| (ax + dx, ay + dy))
    }

    /// Commit the piece into `board`.
    ///
    /// Cells at or above the top row cannot be stored; they are skipped and
    /// reported through [`LockOutcome::overflowed`].
    ///
    /// # Panics
    ///
    /// The piece must currently fit (see [`ActivePiece::fits`]); locking over
    /// occupied or out-of-range cells panics inside [`Board::lock`].
    pub fn lock(&self, board: &mut Board) -> LockOutcome {
        let mut rows = TouchedRows::new();
        let mut overflowed = false;

        for (x, y) in self.occupied_cells() {
            if y >= board.rows() {
                overflowed = true;
                continue;
            }
            board.lock(x, y, self.kind);
            if !rows.contains(&y) {
                rows.push(y);
            }
        }

        rows.sort_unstable();
        LockOutcome { rows, overflowed }
    }
}
