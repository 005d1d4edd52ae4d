pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DimensionsError {
    #[display("board width must be positive")]
    ZeroWidth,
    #[display("board height must be positive")]
    ZeroHeight,
    #[display("board width {width} exceeds the position stride {}", STRIDE)]
    TooWide { width: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown piece shape: {token:?}")]
pub struct ParsePieceKindError {
    token: String,
}

impl ParsePieceKindError {
    pub(crate) fn new(token: &str) -> Self {
        Self {
            token: token.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown command: {token:?}")]
pub struct ParseCommandError {
    token: String,
}

impl ParseCommandError {
    pub(crate) fn new(token: &str) -> Self {
        Self {
            token: token.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EngineError {
    #[display("game is over; restart to play again")]
    GameOver,
    #[display("piece {kind} does not fit on the board")]
    SpawnOutOfBounds { kind: PieceKind },
}
