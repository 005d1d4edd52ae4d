pub use self::{board::*, cell::*, grid::*, piece::*};

pub(crate) mod board;
pub(crate) mod cell;
pub(crate) mod grid;
pub(crate) mod piece;
