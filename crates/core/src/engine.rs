//! Engine module - orchestration of grid, pieces, score and game flags
//!
//! The engine is a plain synchronous state machine. Serialization of concurrent callers
//! and the autonomous descent timer live in the runtime crate; here every method runs to
//! completion on `&mut self`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::grid::{Grid, HEIGHT, WIDTH};
use crate::piece::{Descent, Piece, PieceId};
use crate::snapshot::{CellSnapshot, GameSnapshot, PieceSnapshot, SnapshotError};
use crate::types::{Command, PieceKind, SCORE_PER_LINE};
use crate::view::{EngineView, PieceView};

/// What one frame tick changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The current piece was activated on this tick
    pub activated: bool,
    pub lines_cleared: u32,
    /// The game is over, whether it ended on this tick or earlier
    pub game_over: bool,
}

#[derive(Debug)]
pub struct Engine<R = StdRng> {
    grid: Grid,
    current: Piece,
    next: Piece,
    score: u32,
    game_on: bool,
    paused: bool,
    dirty: bool,
    next_id: u32,
    rng: R,
}

impl Engine<StdRng> {
    /// Engine with a reproducible piece sequence
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    /// Create a new game drawing both opening pieces from `rng`
    pub fn new(mut rng: R) -> Self {
        let current = rng.gen::<PieceKind>();
        let next = rng.gen::<PieceKind>();
        Self::with_opening(rng, current, next)
    }

    /// Create a new game with known first two pieces
    pub fn with_opening(rng: R, current: PieceKind, next: PieceKind) -> Self {
        Self {
            grid: Grid::new(),
            current: Piece::spawn(PieceId(1), current),
            next: Piece::spawn(PieceId(2), next),
            score: 0,
            game_on: true,
            paused: false,
            dirty: true,
            next_id: 3,
            rng,
        }
    }

    /// Rebuild an engine from a capture
    pub fn from_snapshot(rng: R, snapshot: &GameSnapshot) -> Result<Self, SnapshotError> {
        let mut engine = Self::with_opening(rng, snapshot.current.kind, snapshot.next.kind);
        engine.restore(snapshot)?;
        Ok(engine)
    }

    fn issue_id(&mut self) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Promote `next` to `current` (inactive) and draw a fresh `next`
    pub fn spawn_next(&mut self) {
        let kind = self.rng.gen::<PieceKind>();
        let id = self.issue_id();
        let upcoming = Piece::spawn(id, kind);
        let promoted = std::mem::replace(&mut self.next, upcoming);
        self.current = Piece::spawn(promoted.id(), promoted.kind());
        self.dirty = true;
        debug!(
            current = self.current.kind().as_str(),
            next = kind.as_str(),
            "spawned next piece"
        );
    }

    /// Advance one frame: loss check, activation, row clearing and scoring
    pub fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !self.game_on {
            outcome.game_over = true;
            return outcome;
        }

        if self.grid.is_loss_state() {
            self.game_on = false;
            self.dirty = true;
            outcome.game_over = true;
            info!(score = self.score, "game over");
            return outcome;
        }

        if !self.current.is_active() && self.current.activate(&mut self.grid) {
            outcome.activated = true;
            self.dirty = true;
            debug!(id = self.current.id().0, kind = self.current.kind().as_str(), "piece activated");
        }

        let cleared = self.grid.clear_completed_rows();
        if !cleared.is_empty() {
            let lines = cleared.len() as u32;
            self.score = self.score.saturating_add(SCORE_PER_LINE * lines);
            self.current.repaint(&mut self.grid);
            outcome.lines_cleared = lines;
            self.dirty = true;
            info!(lines, score = self.score, "rows cleared");
        }

        outcome
    }

    fn controllable(&self) -> bool {
        self.game_on && self.current.is_active()
    }

    fn mark(&mut self, applied: bool) -> bool {
        self.dirty |= applied;
        applied
    }

    pub fn move_left(&mut self) -> bool {
        let applied = self.controllable() && self.current.move_left(&mut self.grid);
        self.mark(applied)
    }

    pub fn move_right(&mut self) -> bool {
        let applied = self.controllable() && self.current.move_right(&mut self.grid);
        self.mark(applied)
    }

    pub fn rotate(&mut self) -> bool {
        let applied = self.controllable() && self.current.rotate(&mut self.grid);
        self.mark(applied)
    }

    pub fn hard_drop(&mut self) -> bool {
        let applied = self.controllable() && self.current.hard_drop(&mut self.grid);
        self.mark(applied)
    }

    /// One downward step of the current piece, handing off to the next piece on lock
    pub fn move_down(&mut self) -> Descent {
        if !self.game_on {
            return Descent::Ignored;
        }
        let descent = self.current.move_down(&mut self.grid);
        match descent {
            Descent::Moved => self.dirty = true,
            Descent::Locked => {
                debug!(id = self.current.id().0, origin = ?self.current.origin(), "piece locked");
                self.spawn_next();
            }
            Descent::Ignored => {}
        }
        descent
    }

    /// Descent step requested by the autonomous driver of `piece`.
    ///
    /// Ignored unless `piece` is the current piece and the engine is running unpaused,
    /// so a tick queued before a lock or pause never reaches another piece.
    pub fn descend(&mut self, piece: PieceId) -> Descent {
        if piece != self.current.id() || self.paused {
            debug!(requested = piece.0, current = self.current.id().0, "stale descent ignored");
            return Descent::Ignored;
        }
        self.move_down()
    }

    pub fn pause(&mut self) -> bool {
        if self.paused || !self.game_on {
            return false;
        }
        self.paused = true;
        self.dirty = true;
        info!("paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        self.dirty = true;
        info!("resumed");
        true
    }

    /// Dispatch a player command
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::Rotate => self.rotate(),
            Command::HardDrop => self.hard_drop(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
        }
    }

    /// Piece whose descent driver should be running, if any
    pub fn driver_target(&self) -> Option<PieceId> {
        (self.game_on && !self.paused && self.current.is_active()).then(|| self.current.id())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_on(&self) -> bool {
        self.game_on
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and clear the change flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> EngineView {
        EngineView {
            cells: EngineView::capture_cells(&self.grid),
            current: PieceView::from(&self.current),
            next: PieceView::from(&self.next),
            score: self.score,
            game_on: self.game_on,
            paused: self.paused,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let cells = self
            .grid
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| CellSnapshot {
                        color: cell.color(),
                        locked: cell.is_locked(),
                    })
                    .collect()
            })
            .collect();

        GameSnapshot {
            cells,
            current: PieceSnapshot::from(&self.current),
            next: PieceSnapshot::from(&self.next),
            score: self.score,
            game_on: self.game_on,
        }
    }

    /// Replace the whole game state with a validated capture.
    ///
    /// A finished engine stays finished; load into a new one with [`Engine::from_snapshot`].
    pub fn restore(&mut self, snapshot: &GameSnapshot) -> Result<(), SnapshotError> {
        if !self.game_on {
            warn!("restore refused: game is over");
            return Err(SnapshotError::Finished);
        }
        if let Err(err) = snapshot.validate() {
            warn!(%err, "rejected snapshot");
            return Err(err);
        }

        let mut grid = Grid::new();
        for (row, cells) in snapshot.cells.iter().enumerate().take(HEIGHT) {
            for (col, saved) in cells.iter().enumerate().take(WIDTH) {
                if saved.locked {
                    grid.lock_at(row, col, saved.color);
                }
            }
        }

        let current_id = self.issue_id();
        let next_id = self.issue_id();
        let current = &snapshot.current;
        let next = &snapshot.next;
        self.current = Piece::restore(
            current_id,
            current.kind,
            current.shape(),
            current.origin,
            current.active,
            &mut grid,
        );
        self.next = Piece::restore(next_id, next.kind, next.shape(), next.origin, false, &mut grid);
        self.grid = grid;
        self.score = snapshot.score;
        self.game_on = snapshot.game_on;
        self.paused = false;
        self.dirty = true;
        info!(score = self.score, game_on = self.game_on, "state restored");
        Ok(())
    }
}

impl Default for Engine<StdRng> {
    fn default() -> Self {
        Self::new(StdRng::from_entropy())
    }
}
