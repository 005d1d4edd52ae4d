use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    ParseCommandError,
    core::{cell::Shift, piece::PieceKind},
};

/// A single, already tokenized player input.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum Command {
    #[display("spawn {_0}")]
    Spawn(PieceKind),
    #[display("left")]
    Left,
    #[display("right")]
    Right,
    #[display("down")]
    Down,
    #[display("rotate")]
    Rotate,
}

impl Command {
    /// Returns the horizontal shift of a move command, `None` for spawn and rotate.
    #[must_use]
    pub const fn shift(self) -> Option<Shift> {
        match self {
            Command::Left => Some(Shift::Left),
            Command::Right => Some(Shift::Right),
            Command::Down => Some(Shift::Stay),
            Command::Spawn(_) | Command::Rotate => None,
        }
    }
}

/// Parses a motion token (`left`, `right`, `down`, `rotate`) or a shape letter,
/// which stands for spawning that shape.
impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Command::Left),
            "right" => Ok(Command::Right),
            "down" => Ok(Command::Down),
            "rotate" => Ok(Command::Rotate),
            _ => s
                .parse::<PieceKind>()
                .map(Command::Spawn)
                .map_err(|_| ParseCommandError::new(s)),
        }
    }
}
