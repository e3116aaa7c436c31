//! Shape module - piece occupancy bitmasks and quarter-turn rotation
//!
//! A shape is a `SHAPE_SIZE x SHAPE_SIZE` bitmask; bit `x + y * SHAPE_SIZE` marks
//! an occupied local cell. Local `y` grows in the same direction as board `y`
//! (up), and the pivot sits at `(SHAPE_PIVOT, SHAPE_PIVOT)`.

use crate::types::{PieceKind, RotationDirection, SHAPE_PIVOT, SHAPE_SIZE};

const S: i32 = SHAPE_SIZE as i32;

/// Offset of a single cell relative to the pivot
pub type PivotOffset = (i32, i32);

/// Immutable occupancy pattern of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    bits: u32,
}

impl Shape {
    /// Build from raw bits. Bits beyond the `SHAPE_SIZE^2` grid are dropped.
    pub const fn from_bits(bits: u32) -> Self {
        Self {
            bits: bits & Self::GRID_MASK,
        }
    }

    const GRID_MASK: u32 = if SHAPE_SIZE * SHAPE_SIZE >= 32 {
        u32::MAX
    } else {
        (1u32 << (SHAPE_SIZE * SHAPE_SIZE)) - 1
    };

    /// Build from pivot-relative offsets.
    ///
    /// # Panics
    ///
    /// Panics if an offset falls outside the bitmask.
    pub fn from_offsets(offsets: &[PivotOffset]) -> Self {
        let mut bits = 0u32;
        for &(dx, dy) in offsets {
            let (x, y) = (dx + SHAPE_PIVOT, dy + SHAPE_PIVOT);
            assert!(
                (0..S).contains(&x) && (0..S).contains(&y),
                "offset ({}, {}) does not fit a {}x{} shape",
                dx,
                dy,
                S,
                S
            );
            bits |= 1 << bit(x, y);
        }
        Self { bits }
    }

    /// Spawn orientation of a catalog piece
    pub fn template(kind: PieceKind) -> Self {
        Self::from_offsets(template_offsets(kind))
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Whether local cell (x, y) is set; false outside the bitmask
    pub fn is_set(&self, x: i32, y: i32) -> bool {
        (0..S).contains(&x) && (0..S).contains(&y) && self.bits & (1 << bit(x, y)) != 0
    }

    pub fn cell_count(&self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Rotate a quarter turn about the pivot, returning a new shape.
    ///
    /// Directions are as seen on screen, with local `y` pointing up. The two
    /// matrix rules below are the usual y-down quarter turns, so each one
    /// serves the opposite on-screen direction:
    ///
    /// - new `(x, y)` = old `(S-1-y, x)`: clockwise
    /// - new `(x, y)` = old `(y, S-1-x)`: counter-clockwise
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        let mut bits = 0u32;
        for y in 0..S {
            for x in 0..S {
                let (ox, oy) = match direction {
                    RotationDirection::Clockwise => (S - 1 - y, x),
                    RotationDirection::CounterClockwise => (y, S - 1 - x),
                };
                if self.is_set(ox, oy) {
                    bits |= 1 << bit(x, y);
                }
            }
        }
        Self { bits }
    }

    /// Set cells in local coordinates, each axis in `[0, SHAPE_SIZE)`.
    pub fn occupied_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..S * S)
            .filter(move |i| self.bits & (1 << i) != 0)
            .map(|i| (i % S, i / S))
    }

    /// Set cells relative to the pivot.
    pub fn pivot_offsets(&self) -> impl Iterator<Item = PivotOffset> + '_ {
        self.occupied_offsets()
            .map(|(x, y)| (x - SHAPE_PIVOT, y - SHAPE_PIVOT))
    }

    /// Lowest and highest set local rows, or None for an empty shape
    pub fn row_span(&self) -> Option<(i32, i32)> {
        let mut rows = self.occupied_offsets().map(|(_, y)| y);
        let first = rows.next()?;
        Some(rows.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }
}

#[inline(always)]
fn bit(x: i32, y: i32) -> u32 {
    (x + y * S) as u32
}

/// Catalog offsets, pivot-relative, y up
fn template_offsets(kind: PieceKind) -> &'static [PivotOffset] {
    match kind {
        PieceKind::I => &[(-1, 0), (0, 0), (1, 0), (2, 0)],
        PieceKind::O => &[(0, 0), (1, 0), (0, 1), (1, 1)],
        PieceKind::T => &[(-1, 0), (0, 0), (1, 0), (0, 1)],
        PieceKind::S => &[(-1, 0), (0, 0), (0, 1), (1, 1)],
        PieceKind::Z => &[(0, 0), (1, 0), (-1, 1), (0, 1)],
        PieceKind::J => &[(-1, 1), (-1, 0), (0, 0), (1, 0)],
        PieceKind::L => &[(1, 1), (-1, 0), (0, 0), (1, 0)],
    }
}
