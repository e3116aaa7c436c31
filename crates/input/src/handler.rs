//! Press/release tracking for terminal environments.
//!
//! Turns key presses into [`Intent`] edges. Held controls (left, right, rush)
//! emit an enabling intent on the first press and a disabling intent on
//! release. Terminals that never report releases keep re-sending presses while
//! a key is down; when those stop for longer than the release timeout the
//! control is released automatically.

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::map::{map_key, Control};
use crate::types::{Direction, Intent};

/// Commands for the host loop rather than the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    TogglePause,
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Intent(Intent),
    Command(HostCommand),
}

// Held slots, in this order
const LEFT: usize = 0;
const RIGHT: usize = 1;
const RUSH: usize = 2;

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tracks which held controls are down
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Milliseconds since the last press of each held control, None if up
    since_press: [Option<u32>; 3],
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            since_press: [None; 3],
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn is_down(&self, control: Control) -> bool {
        slot(control).is_some_and(|i| self.since_press[i].is_some())
    }

    /// Handle a press (or terminal auto-repeat) of `code`.
    ///
    /// Returns None for unbound keys and for repeats of a control that is
    /// already down.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<InputEvent> {
        let control = map_key(code)?;

        let event = match control {
            Control::Rotate(direction) => InputEvent::Intent(Intent::Rotate(direction)),
            Control::HardDrop => InputEvent::Intent(Intent::HardDrop),
            Control::Pause => InputEvent::Command(HostCommand::TogglePause),
            Control::Restart => InputEvent::Command(HostCommand::Restart),
            Control::Move(_) | Control::Rush => {
                let i = slot(control)?;
                if self.since_press[i].replace(0).is_some() {
                    return None;
                }
                InputEvent::Intent(edge(i, true))
            }
        };
        Some(event)
    }

    /// Handle an explicit key release.
    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<Intent> {
        let i = map_key(code).and_then(slot)?;
        self.since_press[i].take().map(|_| edge(i, false))
    }

    /// Advance timeouts; returns releases for controls that went quiet.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<Intent, 3> {
        let mut released = ArrayVec::new();
        for i in 0..self.since_press.len() {
            let Some(ms) = self.since_press[i] else {
                continue;
            };
            let ms = ms.saturating_add(elapsed_ms);
            if ms > self.key_release_timeout_ms {
                self.since_press[i] = None;
                released.push(edge(i, false));
            } else {
                self.since_press[i] = Some(ms);
            }
        }
        released
    }

    /// Release everything that is down, e.g. on focus loss.
    pub fn release_all(&mut self) -> ArrayVec<Intent, 3> {
        let mut released = ArrayVec::new();
        for i in 0..self.since_press.len() {
            if self.since_press[i].take().is_some() {
                released.push(edge(i, false));
            }
        }
        released
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn slot(control: Control) -> Option<usize> {
    match control {
        Control::Move(Direction::Left) => Some(LEFT),
        Control::Move(Direction::Right) => Some(RIGHT),
        Control::Rush => Some(RUSH),
        _ => None,
    }
}

fn edge(slot: usize, enabled: bool) -> Intent {
    match slot {
        LEFT => Intent::Move {
            direction: Direction::Left,
            enabled,
        },
        RIGHT => Intent::Move {
            direction: Direction::Right,
            enabled,
        },
        _ => Intent::Rush(enabled),
    }
}
