//! Terminal input module (simulation-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Intent`]s and host
//! commands. Repeat timing lives in the simulation's fall controller, so this
//! crate only reports press/release edges. Terminals that never send release
//! events are handled with a timeout.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::{HostCommand, InputEvent, InputHandler};
pub use map::{map_key, should_quit, Control};
