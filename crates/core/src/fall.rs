//! Fall controller - gravity and move-repeat timing
//!
//! Elapsed time accumulates into two counters. When the gravity counter
//! reaches the gravity period the piece is pushed down one row; when the
//! repeat counter reaches the repeat delay and a direction is held, the piece
//! steps sideways. Each counter resets to zero when its action fires.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::piece::ActivePiece;
use crate::types::Direction;

/// What gravity did during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GravityStep {
    /// Period not reached yet
    #[default]
    Waiting,
    /// Piece moved down one row
    Moved,
    /// Downward move was blocked; the piece must lock
    Blocked,
}

/// Result of [`FallController::on_tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    pub gravity: GravityStep,
    /// A held-direction repeat step moved the piece
    pub shifted: bool,
}

impl TickOutcome {
    pub fn blocked(&self) -> bool {
        self.gravity == GravityStep::Blocked
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FallController {
    gravity_elapsed: f32,
    gravity_period: f32,
    default_gravity_period: f32,
    move_repeat_elapsed: f32,
    move_repeat_delay: f32,
    /// Held directions in press order; the last one wins
    held: ArrayVec<Direction, 2>,
    rushing: bool,
}

impl FallController {
    pub fn new(gravity_period: f32, move_repeat_delay: f32) -> Self {
        Self {
            gravity_elapsed: 0.0,
            gravity_period,
            default_gravity_period: gravity_period,
            move_repeat_elapsed: 0.0,
            move_repeat_delay,
            held: ArrayVec::new(),
            rushing: false,
        }
    }

    pub fn gravity_elapsed(&self) -> f32 {
        self.gravity_elapsed
    }

    /// Current period, zero while rushing
    pub fn gravity_period(&self) -> f32 {
        self.gravity_period
    }

    pub fn move_repeat_elapsed(&self) -> f32 {
        self.move_repeat_elapsed
    }

    pub fn move_repeat_delay(&self) -> f32 {
        self.move_repeat_delay
    }

    pub fn is_rushing(&self) -> bool {
        self.rushing
    }

    /// Direction that repeat steps will use, if any is held
    pub fn held_direction(&self) -> Option<Direction> {
        self.held.last().copied()
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.held.contains(&direction)
    }

    /// Advance both counters and fire whichever actions are due.
    ///
    /// Gravity is evaluated first. A blocked gravity step ends the tick: the
    /// owner locks the piece and no repeat step is attempted.
    pub fn on_tick(&mut self, delta: f32, piece: &mut ActivePiece, board: &Board) -> TickOutcome {
        debug_assert!(delta >= 0.0, "negative tick delta {}", delta);

        self.gravity_elapsed += delta;
        self.move_repeat_elapsed += delta;

        let mut outcome = TickOutcome::default();

        if self.gravity_elapsed >= self.gravity_period {
            self.gravity_elapsed = 0.0;
            if piece.try_translate(board, 0, -1) {
                outcome.gravity = GravityStep::Moved;
            } else {
                outcome.gravity = GravityStep::Blocked;
                return outcome;
            }
        }

        if let Some(direction) = self.held_direction() {
            if self.move_repeat_elapsed >= self.move_repeat_delay {
                self.move_repeat_elapsed = 0.0;
                outcome.shifted = piece.try_translate(board, direction.dx(), 0);
            }
        }

        outcome
    }

    /// Zero the gravity period while enabled, restore the default otherwise.
    pub fn set_rush(&mut self, enabled: bool) {
        self.rushing = enabled;
        self.gravity_period = if enabled {
            0.0
        } else {
            self.default_gravity_period
        };
    }

    /// Press or release a direction.
    ///
    /// A press that was not already held moves the piece once right away and
    /// restarts the repeat counter. Returns whether the piece moved.
    pub fn set_held_direction(
        &mut self,
        direction: Direction,
        enabled: bool,
        piece: &mut ActivePiece,
        board: &Board,
    ) -> bool {
        if !enabled {
            self.release_direction(direction);
            return false;
        }

        if self.is_held(direction) {
            return false;
        }

        self.held.push(direction);
        self.move_repeat_elapsed = 0.0;
        piece.try_translate(board, direction.dx(), 0)
    }

    /// Release a direction without needing a piece
    pub fn release_direction(&mut self, direction: Direction) {
        self.held.retain(|d| *d != direction);
    }

    /// Forget held directions and rush, e.g. when input focus is lost.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.set_rush(false);
    }

    /// Restart both counters for a freshly spawned piece.
    ///
    /// Held directions and rush mirror the input device and are kept.
    pub fn reset(&mut self) {
        self.gravity_elapsed = 0.0;
        self.move_repeat_elapsed = 0.0;
    }
}
