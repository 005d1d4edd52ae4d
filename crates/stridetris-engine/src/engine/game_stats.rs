use serde::Serialize;

/// Counters for one game.
///
/// - **Commands**: commands accepted by the engine, spawns included; rejected
///   spawns and commands after game over are not counted
/// - **Spawned pieces**: pieces created by spawn commands
/// - **Locked pieces**: pieces that came to rest and joined the board
/// - **Cleared rows**: total rows removed by row clears
///
/// # Example
///
/// ```
/// use stridetris_engine::EngineStats;
///
/// let mut stats = EngineStats::new();
/// stats.record_spawn();
/// stats.record_lock(2);
///
/// assert_eq!(stats.locked_pieces(), 1);
/// assert_eq!(stats.cleared_rows(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    commands: usize,
    spawned_pieces: usize,
    locked_pieces: usize,
    cleared_rows: usize,
}

impl EngineStats {
    /// Creates a statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: 0,
            spawned_pieces: 0,
            locked_pieces: 0,
            cleared_rows: 0,
        }
    }

    #[must_use]
    pub const fn commands(&self) -> usize {
        self.commands
    }

    #[must_use]
    pub const fn spawned_pieces(&self) -> usize {
        self.spawned_pieces
    }

    #[must_use]
    pub const fn locked_pieces(&self) -> usize {
        self.locked_pieces
    }

    #[must_use]
    pub const fn cleared_rows(&self) -> usize {
        self.cleared_rows
    }

    pub const fn record_command(&mut self) {
        self.commands += 1;
    }

    pub const fn record_spawn(&mut self) {
        self.spawned_pieces += 1;
    }

    /// Updates statistics after a piece is locked into the board.
    pub const fn record_lock(&mut self, cleared_rows: usize) {
        self.locked_pieces += 1;
        self.cleared_rows += cleared_rows;
    }
}
