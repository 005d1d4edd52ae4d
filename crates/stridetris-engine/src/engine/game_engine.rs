use serde::Serialize;
use tracing::{debug, info};

use crate::{
    EngineError,
    core::{
        board::Board,
        cell::{Cell, Dimensions, Shift},
        grid::GridSnapshot,
        piece::{ActivePiece, Fall, PieceKind},
    },
};

use super::{Command, EngineStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum EngineState {
    Running,
    GameOver,
}

/// What a single command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum Outcome {
    /// A new piece replaced the active one.
    Spawned(PieceKind),
    /// The piece shifted (if the shift was allowed) and fell one row.
    Moved(Shift),
    /// The piece landed on a locked cell during the move and was locked at once.
    Landed { cleared_rows: usize },
    /// The piece advanced to its next rotation state.
    Rotated,
    /// The rotated piece would leave the board; nothing changed.
    Rejected,
    /// The piece was resting on the bottom row and has been locked; the command
    /// itself was not applied.
    Locked { cleared_rows: usize },
    /// There is no active piece to move.
    Idle,
    /// A column is filled from top to bottom. The engine accepts no more commands.
    GameOver,
}

/// Applies commands to a board one at a time.
///
/// The engine owns the [`Board`] and at most one [`ActivePiece`]. After a piece
/// locks there is no active piece until the next [`Command::Spawn`].
#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    piece: Option<ActivePiece>,
    state: EngineState,
    stats: EngineStats,
}

impl Engine {
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self::with_board(Board::new(dimensions))
    }

    /// Starts a game on a board that may already hold locked cells.
    #[must_use]
    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            piece: None,
            state: EngineState::Running,
            stats: EngineStats::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<&ActivePiece> {
        self.piece.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    #[must_use]
    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Discards the board contents and the active piece and starts over.
    pub fn restart(&mut self) {
        self.board.reset();
        self.piece = None;
        self.state = EngineState::Running;
        self.stats = EngineStats::new();
        debug!("game restarted");
    }

    pub fn apply(&mut self, command: Command) -> Result<Outcome, EngineError> {
        if self.state.is_game_over() {
            return Err(EngineError::GameOver);
        }

        let shift = match command {
            Command::Spawn(kind) => {
                let outcome = self.spawn(kind)?;
                self.stats.record_command();
                return Ok(outcome);
            }
            Command::Rotate => None,
            Command::Left | Command::Right | Command::Down => command.shift(),
        };
        self.stats.record_command();

        let active = self.piece.as_ref().map(ActivePiece::cells);
        let full_columns = self
            .board
            .full_columns(active.as_ref().map_or(&[][..], |cells| &cells[..]));
        if !full_columns.is_empty() {
            info!(columns = ?full_columns.as_slice(), "game over");
            self.state = EngineState::GameOver;
            return Ok(Outcome::GameOver);
        }

        let Some(piece) = self.piece.as_mut() else {
            debug!(%command, "no active piece");
            return Ok(Outcome::Idle);
        };

        if piece.hit_floor(self.board.dimensions()) {
            let cleared_rows = self.lock_active_piece();
            return Ok(Outcome::Locked { cleared_rows });
        }

        let Some(shift) = shift else {
            let mut ticked = piece.clone();
            ticked.record(Shift::Stay);
            let rotated = ticked.rotated();
            if !rotated.cells().iter().all(|&cell| self.board.contains(cell)) {
                debug!(kind = %piece.kind(), "rotation leaves the board");
                return Ok(Outcome::Rejected);
            }
            *piece = rotated;
            return Ok(Outcome::Rotated);
        };

        match piece.step(shift, &self.board) {
            Fall::Descended => {
                let applied = piece.history().last().copied().unwrap_or_default();
                Ok(Outcome::Moved(applied))
            }
            Fall::Blocked => {
                let cleared_rows = self.lock_active_piece();
                Ok(Outcome::Landed { cleared_rows })
            }
        }
    }

    fn spawn(&mut self, kind: PieceKind) -> Result<Outcome, EngineError> {
        let piece = ActivePiece::spawn(kind);
        if !piece.cells().iter().all(|&cell| self.board.contains(cell)) {
            return Err(EngineError::SpawnOutOfBounds { kind });
        }
        if let Some(previous) = self.piece.replace(piece) {
            debug!(kind = %previous.kind(), "discarding unlocked piece");
        }
        self.stats.record_spawn();
        debug!(%kind, "piece spawned");
        Ok(Outcome::Spawned(kind))
    }

    fn lock_active_piece(&mut self) -> usize {
        let Some(piece) = self.piece.take() else {
            return 0;
        };
        self.board.lock(piece.cells());
        let cleared_rows = self.board.clear_completed_rows();
        self.stats.record_lock(cleared_rows);
        debug!(
            kind = %piece.kind(),
            cells = ?piece.cells().map(Cell::position),
            cleared_rows,
            "piece locked"
        );
        cleared_rows
    }

    /// Returns the grid of locked cells plus the active piece.
    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        let mut grid = self.locked_snapshot();
        if let Some(piece) = &self.piece {
            for cell in piece.cells() {
                grid.fill(cell);
            }
        }
        grid
    }

    /// Returns the grid of locked cells only.
    #[must_use]
    pub fn locked_snapshot(&self) -> GridSnapshot {
        GridSnapshot::from_cells(
            self.board.dimensions(),
            self.board.locked_cells().iter().copied(),
        )
    }
}
