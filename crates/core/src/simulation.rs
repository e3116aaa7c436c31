//! Simulation - owns the board and the active piece and runs the fixed step
//!
//! Ownership is one-directional: the simulation owns [`Board`], the optional
//! [`ActivePiece`], the [`FallController`] and the host's [`Spawner`]. Pieces
//! and controllers only borrow the board for the duration of a call.
//!
//! Input is applied immediately when [`Simulation::apply`] is called. A tick
//! either leaves the piece falling or runs lock, line clear and respawn to
//! completion before returning.

use crate::board::Board;
use crate::config::{ConfigError, SimConfig};
use crate::fall::{FallController, GravityStep};
use crate::line_clear::LineClearer;
use crate::piece::ActivePiece;
use crate::snapshot::{ActiveSnapshot, Snapshot};
use crate::spawner::Spawner;
use crate::types::{ClearedRows, Event, GameOverCause, Intent, PieceKind};

/// Lifecycle of the whole simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created, no piece spawned yet
    Idle,
    /// A piece is active
    Falling,
    /// Terminal
    GameOver(GameOverCause),
}

/// Lifecycle of the current (or most recent) piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceState {
    Spawned,
    Falling,
    Locking,
    Locked,
}

pub struct Simulation<S: Spawner> {
    config: SimConfig,
    board: Board,
    active: Option<ActivePiece>,
    piece_state: PieceState,
    fall: FallController,
    spawner: S,
    phase: Phase,
    paused: bool,
    pieces_spawned: u32,
    rows_cleared: u32,
    events: Vec<Event>,
}

impl<S: Spawner> Simulation<S> {
    pub fn new(config: SimConfig, spawner: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.columns, config.rows);
        Ok(Self::assemble(config, board, spawner))
    }

    /// Start from a pre-populated board whose size must match `config`.
    pub fn with_board(config: SimConfig, board: Board, spawner: S) -> Result<Self, ConfigError> {
        config.validate()?;
        if board.columns() != config.columns as i32 || board.rows() != config.rows as i32 {
            return Err(ConfigError::BoardMismatch {
                columns: board.columns(),
                rows: board.rows(),
            });
        }
        Ok(Self::assemble(config, board, spawner))
    }

    fn assemble(config: SimConfig, board: Board, spawner: S) -> Self {
        let fall = FallController::new(config.gravity_period, config.move_repeat_delay);
        Self {
            config,
            board,
            active: None,
            piece_state: PieceState::Locked,
            fall,
            spawner,
            phase: Phase::Idle,
            paused: false,
            pieces_spawned: 0,
            rows_cleared: 0,
            events: Vec::new(),
        }
    }

    /// Spawn the first piece. Does nothing once started.
    pub fn start(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        self.spawn_piece();
    }

    /// Clear the board and counters and start again.
    /// The spawner keeps its sequence.
    pub fn restart(&mut self) {
        self.board.clear();
        self.active = None;
        self.piece_state = PieceState::Locked;
        self.fall = FallController::new(self.config.gravity_period, self.config.move_repeat_delay);
        self.phase = Phase::Idle;
        self.paused = false;
        self.pieces_spawned = 0;
        self.rows_cleared = 0;
        self.events.clear();
        log::info!("restart");
        self.start();
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn fall(&self) -> &FallController {
        &self.fall
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn piece_state(&self) -> PieceState {
        self.piece_state
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    /// Row the active piece's anchor would reach on a hard drop
    pub fn landing_y(&self) -> Option<i32> {
        let piece = self.active.as_ref()?;
        Some(piece.anchor.1 - piece.drop_distance(&self.board))
    }

    /// Take all events queued since the last drain.
    pub fn drain_events(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.events.drain(..)
    }

    /// Advance timers by `delta` seconds.
    ///
    /// Returns true if the active piece moved or locked.
    pub fn tick(&mut self, delta: f32) -> bool {
        if self.paused || self.phase != Phase::Falling {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        let outcome = self.fall.on_tick(delta, piece, &self.board);
        match outcome.gravity {
            GravityStep::Blocked => {
                self.lock_active();
                true
            }
            GravityStep::Moved => {
                self.piece_state = PieceState::Falling;
                true
            }
            GravityStep::Waiting => outcome.shifted,
        }
    }

    /// Apply a player intent immediately.
    ///
    /// Releases (`enabled: false`) are recorded even while paused so a key let
    /// go during a pause does not stay held. Returns true if the piece moved,
    /// rotated or locked, or the rush state changed. Rotating an O piece is
    /// always rejected.
    pub fn apply(&mut self, intent: Intent) -> bool {
        log::trace!("intent {}", intent.as_str());

        match intent {
            Intent::Move {
                direction,
                enabled: false,
            } => {
                self.fall.release_direction(direction);
                return false;
            }
            Intent::Rush(false) => {
                let changed = self.fall.is_rushing();
                self.fall.set_rush(false);
                return changed;
            }
            _ => {}
        }

        if self.paused || self.phase != Phase::Falling {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        match intent {
            Intent::Move { direction, .. } => {
                self.fall
                    .set_held_direction(direction, true, piece, &self.board)
            }
            // O pieces never rotate. The 2x2 block has no cell-centred pivot,
            // so a quarter turn would only slide it one column.
            Intent::Rotate(_) if piece.kind == PieceKind::O => false,
            Intent::Rotate(direction) => piece.try_rotate(&self.board, direction),
            Intent::Rush(enabled) => {
                let changed = self.fall.is_rushing() != enabled;
                self.fall.set_rush(enabled);
                changed
            }
            Intent::HardDrop => {
                let distance = piece.drop_distance(&self.board);
                piece.anchor.1 -= distance;
                self.lock_active();
                true
            }
        }
    }

    fn spawn_piece(&mut self) -> bool {
        let kind = self.spawner.next_piece();
        let shape = self.spawner.shape_for(kind);
        let piece = ActivePiece::with_shape(kind, self.config.spawn_anchor(), shape);

        if !piece.fits(&self.board) {
            log::debug!("{} blocked at spawn {:?}", kind.letter(), piece.anchor);
            self.active = None;
            self.end_game(GameOverCause::BlockOut);
            return false;
        }

        self.active = Some(piece);
        self.piece_state = PieceState::Spawned;
        self.phase = Phase::Falling;
        self.fall.reset();
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        self.events.push(Event::PieceSpawned(kind));
        log::debug!("spawned {} at {:?}", kind.letter(), piece.anchor);
        true
    }

    /// Lock the active piece, clear rows and spawn the next one.
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.piece_state = PieceState::Locking;
        let outcome = piece.lock(&mut self.board);
        self.piece_state = PieceState::Locked;
        self.events.push(Event::PieceLocked(piece.kind));
        log::debug!(
            "locked {} at {:?}, rows {:?}",
            piece.kind.letter(),
            piece.anchor,
            outcome.rows.as_slice()
        );

        if outcome.overflowed {
            self.end_game(GameOverCause::LockOut);
            return;
        }

        let cleared = LineClearer::resolve(&mut self.board, &outcome.rows);
        if !cleared.is_empty() {
            self.rows_cleared = self.rows_cleared.wrapping_add(cleared.len() as u32);
            self.events
                .push(Event::RowsCompleted(ClearedRows::from_slice(&cleared)));
        }

        self.spawn_piece();
    }

    fn end_game(&mut self, cause: GameOverCause) {
        self.phase = Phase::GameOver(cause);
        self.events.push(Event::GameOver(cause));
        log::info!(
            "game over ({:?}) after {} pieces, {} rows",
            cause,
            self.pieces_spawned,
            self.rows_cleared
        );
    }

    /// Copy renderable state into `out`, reusing its allocations.
    pub fn snapshot_into(&self, out: &mut Snapshot) {
        out.columns = self.board.columns();
        out.rows = self.board.rows();
        out.cells.clear();
        out.cells.extend_from_slice(self.board.cells());
        out.active = self
            .active
            .as_ref()
            .map(|piece| ActiveSnapshot::capture(piece, piece.drop_distance(&self.board)));
        out.phase = self.phase;
        out.paused = self.paused;
        out.pieces_spawned = self.pieces_spawned;
        out.rows_cleared = self.rows_cleared;
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut s = Snapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawner::SequenceSpawner;

    fn sim(kinds: &[PieceKind]) -> Simulation<SequenceSpawner> {
        let config = SimConfig {
            gravity_period: 1.0,
            move_repeat_delay: 0.5,
            ..SimConfig::with_size(10, 8)
        };
        Simulation::new(config, SequenceSpawner::new(kinds.to_vec())).unwrap()
    }

    #[test]
    fn test_new_is_idle() {
        let sim = sim(&[PieceKind::T]);
        assert_eq!(sim.phase(), Phase::Idle);
        assert!(sim.active().is_none());
        assert_eq!(sim.pieces_spawned(), 0);
    }

    #[test]
    fn test_start_spawns_at_anchor() {
        let mut sim = sim(&[PieceKind::T]);
        sim.start();
        assert_eq!(sim.phase(), Phase::Falling);
        assert_eq!(sim.piece_state(), PieceState::Spawned);
        assert_eq!(sim.active().unwrap().anchor, (5, 7));
        assert_eq!(sim.pieces_spawned(), 1);

        sim.start();
        assert_eq!(sim.pieces_spawned(), 1);
    }

    #[test]
    fn test_gravity_moves_piece_to_falling() {
        let mut sim = sim(&[PieceKind::T]);
        sim.start();
        assert!(sim.tick(1.0));
        assert_eq!(sim.piece_state(), PieceState::Falling);
        assert_eq!(sim.active().unwrap().anchor, (5, 6));
    }

    #[test]
    fn test_o_does_not_rotate() {
        let mut sim = sim(&[PieceKind::O]);
        sim.start();
        let before = *sim.active().unwrap();
        assert!(!sim.apply(Intent::Rotate(crate::types::RotationDirection::Clockwise)));
        assert_eq!(*sim.active().unwrap(), before);
    }

    #[test]
    fn test_paused_ignores_ticks_and_presses() {
        let mut sim = sim(&[PieceKind::T]);
        sim.start();
        sim.set_paused(true);
        let before = *sim.active().unwrap();
        assert!(!sim.tick(5.0));
        assert!(!sim.apply(Intent::HardDrop));
        assert_eq!(*sim.active().unwrap(), before);
    }

    #[test]
    fn test_restart_clears_board_and_counters() {
        let mut sim = sim(&[PieceKind::I]);
        sim.start();
        sim.apply(Intent::HardDrop);
        assert!(sim.board().occupied_count() > 0);

        sim.restart();
        assert_eq!(sim.board().occupied_count(), 0);
        assert_eq!(sim.pieces_spawned(), 1);
        assert_eq!(sim.rows_cleared(), 0);
        assert_eq!(sim.phase(), Phase::Falling);
    }
}
