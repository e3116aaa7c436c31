//! Falling-block simulation core - pure, deterministic, and testable
//!
//! This crate contains the board, the falling piece, the timing state machine
//! and line clearing. It has **no dependencies** on rendering, terminals or
//! I/O, which makes it:
//!
//! - **Deterministic**: same config, spawner seed and inputs give the same game
//! - **Testable**: every rule is reachable from plain function calls
//! - **Portable**: runs headless, in a terminal, or under any other host
//!
//! # Module Structure
//!
//! - [`board`]: occupancy grid with row queries and collapse
//! - [`shape`]: 5x5 occupancy bitmasks and quarter-turn rotation
//! - [`piece`]: the active piece, collision-checked translation and rotation
//! - [`fall`]: gravity and move-repeat timing
//! - [`line_clear`]: clearing full rows after a lock
//! - [`simulation`]: owns everything above and runs the fixed step
//! - [`spawner`]: seeded piece sources supplied by the host
//! - [`config`]: board size, timing and spawn point
//! - [`snapshot`]: read-only copies for renderers
//!
//! # Rules
//!
//! - Row 0 is the bottom of the board; gravity moves pieces to lower rows
//! - Cells above the top row never block, so pieces may spawn partly off-board
//! - A piece whose downward step is blocked locks at once (no lock delay)
//! - Rotation that collides is rejected; there are no wall kicks
//! - A spawn that overlaps locked cells ends the game
//!
//! # Example
//!
//! ```
//! use blockfall_core::{BagSpawner, SimConfig, Simulation};
//! use blockfall_types::{Direction, Intent};
//!
//! let mut sim = Simulation::new(SimConfig::default(), BagSpawner::new(12345)).unwrap();
//! sim.start();
//!
//! sim.apply(Intent::Move { direction: Direction::Left, enabled: true });
//! sim.apply(Intent::Move { direction: Direction::Left, enabled: false });
//! sim.apply(Intent::HardDrop);
//!
//! assert_eq!(sim.pieces_spawned(), 2);
//! assert_eq!(sim.board().occupied_count(), 4);
//! ```
//!
//! # Timing
//!
//! Call [`Simulation::tick`](simulation::Simulation::tick) every update step
//! with the elapsed time in seconds. Renderers take a
//! [`Snapshot`](snapshot::Snapshot) and never touch the simulation itself.

pub mod board;
pub mod config;
pub mod fall;
pub mod line_clear;
pub mod piece;
pub mod shape;
pub mod simulation;
pub mod snapshot;
pub mod spawner;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, SimConfig};
pub use fall::{FallController, GravityStep, TickOutcome};
pub use line_clear::LineClearer;
pub use piece::{ActivePiece, LockOutcome};
pub use shape::Shape;
pub use simulation::{Phase, PieceState, Simulation};
pub use snapshot::{ActiveSnapshot, Snapshot};
pub use spawner::{BagSpawner, SequenceSpawner, SimpleRng, Spawner, UniformSpawner};
