//! Snapshot module - read-only copy of the simulation for renderers
//!
//! The update step owns all mutable state; a renderer only ever sees a
//! [`Snapshot`]. `Simulation::snapshot_into` refills an existing snapshot so
//! the host loop can redraw without allocating. Coordinates are board
//! coordinates (row 0 at the bottom) and the active piece is resolved to
//! absolute cells together with its ghost.
//!
//! ```
//! use blockfall_core::{BagSpawner, SimConfig, Simulation, Snapshot};
//!
//! let mut sim = Simulation::new(SimConfig::default(), BagSpawner::new(1)).unwrap();
//! sim.start();
//!
//! let mut snap = Snapshot::default();
//! sim.snapshot_into(&mut snap);
//! assert_eq!(snap.cells.len(), 10 * 18);
//! assert_eq!(snap.active.as_ref().map(|a| a.cells.len()), Some(4));
//! assert!(snap.playable());
//! ```

use arrayvec::ArrayVec;

use crate::piece::ActivePiece;
use crate::simulation::Phase;
use crate::types::{Cell, PieceKind, SHAPE_SIZE};

/// Absolute cells of a piece; a shape has at most `SHAPE_SIZE^2` cells
pub type PieceCells = ArrayVec<(i32, i32), { SHAPE_SIZE * SHAPE_SIZE }>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub anchor: (i32, i32),
    pub cells: PieceCells,
    /// Where the cells would come to rest after a hard drop
    pub ghost: PieceCells,
}

impl ActiveSnapshot {
    pub(crate) fn capture(piece: &ActivePiece, drop_distance: i32) -> Self {
        let cells: PieceCells = piece.occupied_cells().collect();
        let ghost = cells.iter().map(|&(x, y)| (x, y - drop_distance)).collect();
        Self {
            kind: piece.kind,
            anchor: piece.anchor,
            cells,
            ghost,
        }
    }
}

/// Read-only copy of the simulation for renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub columns: i32,
    pub rows: i32,
    /// Row-major, bottom row first
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub phase: Phase,
    pub paused: bool,
    pub pieces_spawned: u32,
    pub rows_cleared: u32,
}

impl Snapshot {
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        if x < 0 || x >= self.columns || y < 0 || y >= self.rows {
            return None;
        }
        self.cells[(y * self.columns + x) as usize]
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Falling && !self.paused
    }

    /// FNV-1a over everything a renderer draws
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a::new();
        h.write_i32(self.columns);
        h.write_i32(self.rows);
        for cell in &self.cells {
            h.write_u8(cell.map(|k| k.index() as u8 + 1).unwrap_or(0));
        }
        if let Some(active) = &self.active {
            h.write_u8(active.kind.index() as u8 + 1);
            for &(x, y) in active.cells.iter().chain(active.ghost.iter()) {
                h.write_i32(x);
                h.write_i32(y);
            }
        }
        h.write_u8(match self.phase {
            Phase::Idle => 0,
            Phase::Falling => 1,
            Phase::GameOver(_) => 2,
        });
        h.write_u8(self.paused as u8);
        h.write_i32(self.pieces_spawned as i32);
        h.write_i32(self.rows_cleared as i32);
        h.finish()
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            columns: 0,
            rows: 0,
            cells: Vec::new(),
            active: None,
            phase: Phase::Idle,
            paused: false,
            pieces_spawned: 0,
            rows_cleared: 0,
        }
    }
}

struct Fnv1a(u64);

impl Fnv1a {
    fn new() -> Self {
        Self(0xcbf29ce484222325)
    }

    fn write_u8(&mut self, b: u8) {
        self.0 ^= b as u64;
        self.0 = self.0.wrapping_mul(0x00000100000001B3);
    }

    fn write_i32(&mut self, v: i32) {
        for b in v.to_le_bytes() {
            self.write_u8(b);
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}
