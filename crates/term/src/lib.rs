//! Terminal rendering for the simulation.
//!
//! A small game-oriented layer: views draw a [`Snapshot`](core::Snapshot) into
//! a plain framebuffer, and the renderer flushes framebuffers to the terminal
//! with crossterm. Board cells are two columns wide to offset the glyph
//! aspect ratio.

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
