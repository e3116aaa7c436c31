//! Core types module - shared data structures and constants
//!
//! This module defines the plain data exchanged between the simulation core,
//! the input layer and the renderer. Everything here is `Copy` and free of
//! external dependencies, so it can be used from any context.
//!
//! # Orientation
//!
//! The board uses a bottom-left origin:
//!
//! - **x**: columns, `0` is the leftmost column
//! - **y**: rows, `0` is the bottom row; "down" is decreasing `y`
//!
//! # Default Dimensions and Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_COLUMNS` | 10 | Board width in cells |
//! | `DEFAULT_ROWS` | 18 | Board height in cells |
//! | `MAX_COLUMNS` / `MAX_ROWS` | 256 | Largest board a config may ask for |
//! | `DEFAULT_GRAVITY_PERIOD` | 0.2 s | Time between forced downward steps |
//! | `DEFAULT_MOVE_REPEAT_DELAY` | 0.15 s | Time between repeated horizontal steps while held |
//! | `TICK_SECONDS` | 0.016 s | Fixed update step used by the terminal host |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Direction, Intent, PieceKind, RotationDirection};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(RotationDirection::Clockwise.opposite(), RotationDirection::CounterClockwise);
//! assert_eq!(Direction::Left.dx(), -1);
//!
//! let intent = Intent::Move { direction: Direction::Right, enabled: true };
//! assert_eq!(intent.as_str(), "moveRight");
//! ```

/// Default board width in cells
pub const DEFAULT_COLUMNS: u16 = 10;

/// Default board height in cells
pub const DEFAULT_ROWS: u16 = 18;

/// Largest accepted board width in cells
pub const MAX_COLUMNS: u16 = 256;

/// Largest accepted board height in cells
pub const MAX_ROWS: u16 = 256;

/// Side length of a shape bitmask (odd, so the pivot is a real cell)
pub const SHAPE_SIZE: usize = 5;

/// Pivot cell of a shape bitmask on both axes (`SHAPE_SIZE / 2`)
pub const SHAPE_PIVOT: i32 = (SHAPE_SIZE / 2) as i32;

/// Default gravity period in seconds
pub const DEFAULT_GRAVITY_PERIOD: f32 = 0.2;

/// Default horizontal move-repeat delay in seconds
pub const DEFAULT_MOVE_REPEAT_DELAY: f32 = 0.15;

/// Fixed update step of the terminal host in milliseconds (~60 Hz)
pub const TICK_MS: u32 = 16;

/// Fixed update step of the terminal host in seconds
pub const TICK_SECONDS: f32 = TICK_MS as f32 / 1000.0;

/// The seven piece templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("L"), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Uppercase letter used in logs and the side panel
    pub fn letter(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Stable index into [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }
}

/// Horizontal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Column delta for one step in this direction
    pub fn dx(&self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Quarter-turn rotation direction, as seen on screen (y up)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    pub fn opposite(&self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

/// Player intent delivered to the simulation
///
/// `Move` and `Rush` are edges (pressed/released); `Rotate` and `HardDrop`
/// are instantaneous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Start or stop holding a horizontal direction
    Move { direction: Direction, enabled: bool },
    /// Rotate the active piece a quarter turn
    Rotate(RotationDirection),
    /// Zero the gravity period while enabled
    Rush(bool),
    /// Drop to the landing row and lock immediately
    HardDrop,
}

impl Intent {
    /// camelCase name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Move {
                direction: Direction::Left,
                ..
            } => "moveLeft",
            Intent::Move {
                direction: Direction::Right,
                ..
            } => "moveRight",
            Intent::Rotate(RotationDirection::Clockwise) => "rotateCw",
            Intent::Rotate(RotationDirection::CounterClockwise) => "rotateCcw",
            Intent::Rush(_) => "rush",
            Intent::HardDrop => "hardDrop",
        }
    }
}

/// Rows removed by a single lock, in pre-clear indices, ascending.
///
/// A piece spans at most [`SHAPE_SIZE`] rows, so the list is fixed-size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearedRows {
    rows: [i32; SHAPE_SIZE],
    len: u8,
}

impl ClearedRows {
    /// Build from a slice of at most [`SHAPE_SIZE`] rows.
    ///
    /// # Panics
    ///
    /// Panics if `rows` is longer than [`SHAPE_SIZE`].
    pub fn from_slice(rows: &[i32]) -> Self {
        assert!(
            rows.len() <= SHAPE_SIZE,
            "a single lock clears at most {} rows, got {}",
            SHAPE_SIZE,
            rows.len()
        );
        let mut out = Self::default();
        out.rows[..rows.len()].copy_from_slice(rows);
        out.len = rows.len() as u8;
        out
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.rows[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Why the simulation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// A freshly spawned piece overlapped locked cells
    BlockOut,
    /// A piece locked with cells above the top row
    LockOut,
}

/// Event emitted by the simulation, drained by the host after each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    PieceSpawned(PieceKind),
    PieceLocked(PieceKind),
    RowsCompleted(ClearedRows),
    GameOver(GameOverCause),
}

/// A cell on the board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Locked block of the given kind
pub type Cell = Option<PieceKind>;
