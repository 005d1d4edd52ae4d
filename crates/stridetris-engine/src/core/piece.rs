use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParsePieceKindError;

use super::{
    board::Board,
    cell::{Cell, Dimensions, Shift},
};

/// Enum representing the shape of a tetromino.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum PieceKind {
    I,
    S,
    Z,
    L,
    J,
    O,
    T,
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::T,
    ];

    /// Returns the layouts of every rotation state, in rotation order.
    #[must_use]
    pub const fn rotation_states(self) -> &'static [[Cell; 4]] {
        match self {
            PieceKind::I => I_STATES,
            PieceKind::S => S_STATES,
            PieceKind::Z => Z_STATES,
            PieceKind::L => L_STATES,
            PieceKind::J => J_STATES,
            PieceKind::O => O_STATES,
            PieceKind::T => T_STATES,
        }
    }

    #[must_use]
    pub const fn rotation_count(self) -> usize {
        self.rotation_states().len()
    }

    /// Returns the spawn layout for a rotation index, taken modulo the state count.
    #[must_use]
    pub const fn rotation_state(self, rotation: usize) -> [Cell; 4] {
        let states = self.rotation_states();
        states[rotation % states.len()]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use stridetris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use stridetris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('S'), Some(PieceKind::S));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }
}

impl FromStr for PieceKind {
    type Err = ParsePieceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c).ok_or_else(|| ParsePieceKindError::new(s)),
            _ => Err(ParsePieceKindError::new(s)),
        }
    }
}

const fn cells(positions: [usize; 4]) -> [Cell; 4] {
    [
        Cell::new(positions[0]),
        Cell::new(positions[1]),
        Cell::new(positions[2]),
        Cell::new(positions[3]),
    ]
}

// Rotation layouts at the spawn location, encoded with `STRIDE`.
// These are enumerated, not derived by rotating a bounding box.
const I_STATES: &[[Cell; 4]] = &[cells([4, 14, 24, 34]), cells([3, 4, 5, 6])];
const S_STATES: &[[Cell; 4]] = &[cells([5, 4, 14, 13]), cells([4, 14, 15, 25])];
const Z_STATES: &[[Cell; 4]] = &[cells([4, 5, 15, 16]), cells([5, 15, 14, 24])];
const L_STATES: &[[Cell; 4]] = &[
    cells([4, 14, 24, 25]),
    cells([5, 15, 14, 13]),
    cells([4, 5, 15, 25]),
    cells([6, 5, 4, 14]),
];
const J_STATES: &[[Cell; 4]] = &[
    cells([5, 15, 25, 24]),
    cells([15, 5, 4, 3]),
    cells([5, 4, 14, 24]),
    cells([4, 14, 15, 16]),
];
const O_STATES: &[[Cell; 4]] = &[cells([4, 14, 15, 5])];
const T_STATES: &[[Cell; 4]] = &[
    cells([4, 14, 24, 15]),
    cells([4, 13, 14, 15]),
    cells([5, 15, 25, 14]),
    cells([4, 5, 6, 15]),
];

/// Result of a single move tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum Fall {
    /// The piece moved down one row.
    Descended,
    /// A locked cell (or the bottom edge) is directly below; the piece came to rest.
    Blocked,
}

/// The falling tetromino.
///
/// Besides its cells, the piece remembers every horizontal shift applied since it
/// spawned. Rotation rebuilds the cells from the new rotation's spawn layout by
/// replaying that history, so there is no rotation pivot and no wall kick.
///
/// # Example
///
/// ```
/// use stridetris_engine::{ActivePiece, Board, Cell, Dimensions, Fall, PieceKind, Shift};
///
/// let board = Board::new(Dimensions::new(10, 4)?);
/// let mut piece = ActivePiece::spawn(PieceKind::O);
/// assert_eq!(piece.cells().map(Cell::position), [4, 14, 15, 5]);
///
/// assert_eq!(piece.step(Shift::Right, &board), Fall::Descended);
/// assert_eq!(piece.cells().map(Cell::position), [15, 25, 26, 16]);
/// # Ok::<(), stridetris_engine::DimensionsError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    kind: PieceKind,
    rotation: usize,
    cells: [Cell; 4],
    history: Vec<Shift>,
}

impl ActivePiece {
    #[must_use]
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            cells: kind.rotation_state(0),
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    #[must_use]
    pub fn cells(&self) -> [Cell; 4] {
        self.cells
    }

    #[must_use]
    pub fn history(&self) -> &[Shift] {
        &self.history
    }

    /// Checks whether any cell sits on the bottom row.
    #[must_use]
    pub fn hit_floor(&self, dimensions: Dimensions) -> bool {
        self.cells
            .iter()
            .any(|cell| cell.row() == dimensions.bottom_row())
    }

    /// Appends a tick to the history without moving the piece.
    pub fn record(&mut self, shift: Shift) {
        self.history.push(shift);
    }

    /// Applies one move tick: the horizontal shift, then a forced one-row fall.
    ///
    /// The shift is dropped (recorded as [`Shift::Stay`]) when it would move a cell
    /// across a row boundary or past the board width. The fall is refused when any
    /// cell below is locked or outside the board; the piece then keeps its shifted
    /// position and [`Fall::Blocked`] is returned. If that shifted position overlaps
    /// a locked cell, the shift is dropped and the piece stays where it was.
    pub fn step(&mut self, shift: Shift, board: &Board) -> Fall {
        let (mut applied, mut resolved) = match self.shifted_cells(shift, board) {
            Some(cells) => (shift, cells),
            None => (Shift::Stay, self.cells),
        };

        let fallen = resolved.map(Cell::below);
        if fallen
            .iter()
            .any(|&cell| !board.contains(cell) || board.is_occupied(cell))
        {
            if resolved.iter().any(|&cell| board.is_occupied(cell)) {
                applied = Shift::Stay;
                resolved = self.cells;
            }
            self.history.push(applied);
            self.cells = resolved;
            return Fall::Blocked;
        }
        self.history.push(applied);
        self.cells = fallen;
        Fall::Descended
    }

    fn shifted_cells(&self, shift: Shift, board: &Board) -> Option<[Cell; 4]> {
        let mut shifted = self.cells;
        for cell in &mut shifted {
            let moved = cell.offset(shift.delta())?;
            if moved.row() != cell.row() || !board.contains(moved) {
                return None;
            }
            *cell = moved;
        }
        Some(shifted)
    }

    /// Returns the piece advanced to its next rotation state.
    ///
    /// The new cells are the next state's spawn layout with every recorded tick
    /// replayed on top (shift, then one row down). Nothing is checked against the
    /// board; callers decide whether the result is acceptable.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let rotation = (self.rotation + 1) % self.kind.rotation_count();
        let offset: usize = self.history.iter().map(|shift| shift.tick_offset()).sum();
        let cells = self
            .kind
            .rotation_state(rotation)
            .map(|cell| Cell::new(cell.position() + offset));

        Self {
            kind: self.kind,
            rotation,
            cells,
            history: self.history.clone(),
        }
    }
}
