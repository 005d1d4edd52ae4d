//! Command-at-a-time game logic on top of the core board and piece types.
//!
//! - [`Engine`] - Board, active piece, terminal state and statistics
//! - [`Command`] - One player input: spawn a shape, move, or rotate
//! - [`Outcome`] - What a command did
//! - [`EngineStats`] - Counters for a game
//!
//! # Game Flow
//!
//! 1. Spawn a piece with [`Command::Spawn`]
//! 2. Move it with [`Command::Left`], [`Command::Right`], [`Command::Down`] and
//!    [`Command::Rotate`]; every move also drops the piece one row
//! 3. Once the piece reaches the bottom row, the next command locks it and clears
//!    rows; a piece that lands on another piece is locked right away
//! 4. Spawn the next piece; nothing spawns on its own
//! 5. The game ends when a column is filled from top to bottom
//!
//! # Example
//!
//! ```
//! use stridetris_engine::{Command, Dimensions, Engine, Outcome, PieceKind};
//!
//! let mut engine = Engine::new(Dimensions::new(10, 4)?);
//! engine.apply(Command::Spawn(PieceKind::O))?;
//! engine.apply(Command::Down)?;
//! engine.apply(Command::Down)?;
//!
//! // The piece is on the bottom row; the next command locks it.
//! assert_eq!(engine.apply(Command::Down)?, Outcome::Locked { cleared_rows: 0 });
//! print!("{}", engine.snapshot());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{command::*, game_engine::*, game_stats::*};

mod command;
mod game_engine;
mod game_stats;
