use serde::{Deserialize, Serialize};

use crate::DimensionsError;

/// Distance between vertically adjacent cells in the linear position encoding.
///
/// A cell at `(row, column)` is encoded as `row * STRIDE + column`. The stride is
/// fixed and does not follow the board width: the rotation tables in
/// [`PieceKind`](super::piece::PieceKind) are written against it, so boards are
/// limited to `STRIDE` columns.
pub const STRIDE: usize = 10;

/// A stride-encoded board position.
///
/// # Example
///
/// ```
/// use stridetris_engine::Cell;
///
/// let cell = Cell::new(34);
/// assert_eq!(cell.row(), 3);
/// assert_eq!(cell.column(), 4);
/// assert_eq!(Cell::from_row_column(3, 4), cell);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell(usize);

impl Cell {
    #[must_use]
    pub const fn new(position: usize) -> Self {
        Self(position)
    }

    #[must_use]
    pub const fn from_row_column(row: usize, column: usize) -> Self {
        assert!(column < STRIDE);
        Self(row * STRIDE + column)
    }

    #[must_use]
    pub const fn position(self) -> usize {
        self.0
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.0 / STRIDE
    }

    #[must_use]
    pub const fn column(self) -> usize {
        self.0 % STRIDE
    }

    /// Returns the cell one row below.
    #[must_use]
    pub const fn below(self) -> Self {
        Self(self.0 + STRIDE)
    }

    /// Adds a signed offset to the encoded position.
    ///
    /// Returns `None` when the result would be negative. The row is not
    /// preserved: moving left from column 0 lands on the previous row.
    #[must_use]
    pub const fn offset(self, delta: isize) -> Option<Self> {
        match self.0.checked_add_signed(delta) {
            Some(position) => Some(Self(position)),
            None => None,
        }
    }
}

/// Horizontal component of a single move tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    Left,
    #[default]
    Stay,
    Right,
}

impl Shift {
    #[must_use]
    pub const fn delta(self) -> isize {
        match self {
            Shift::Left => -1,
            Shift::Stay => 0,
            Shift::Right => 1,
        }
    }

    /// Position change of a full tick: this shift followed by a one-row fall.
    #[must_use]
    pub const fn tick_offset(self) -> usize {
        match self {
            Shift::Left => STRIDE - 1,
            Shift::Stay => STRIDE,
            Shift::Right => STRIDE + 1,
        }
    }
}

/// Board size in cells. Fixed for the lifetime of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    width: usize,
    height: usize,
}

impl Dimensions {
    pub const fn new(width: usize, height: usize) -> Result<Self, DimensionsError> {
        if width == 0 {
            return Err(DimensionsError::ZeroWidth);
        }
        if height == 0 {
            return Err(DimensionsError::ZeroHeight);
        }
        if width > STRIDE {
            return Err(DimensionsError::TooWide { width });
        }
        Ok(Self { width, height })
    }

    #[must_use]
    pub const fn width(self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn bottom_row(self) -> usize {
        self.height - 1
    }

    /// Checks whether the cell lies inside the board.
    #[must_use]
    pub const fn contains(self, cell: Cell) -> bool {
        cell.row() < self.height && cell.column() < self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_row_and_column() {
        let cell = Cell::new(57);
        assert_eq!(cell.row(), 5);
        assert_eq!(cell.column(), 7);
        assert_eq!(cell.below(), Cell::new(67));
    }

    #[test]
    fn test_cell_offset_wraps_rows() {
        // Moving right from the last column crosses into the next row.
        assert_eq!(Cell::new(19).offset(1), Some(Cell::new(20)));
        assert_eq!(Cell::new(20).offset(-1).map(Cell::row), Some(1));
        assert_eq!(Cell::new(0).offset(-1), None);
    }

    #[test]
    fn test_dimensions_validation() {
        assert!(Dimensions::new(10, 20).is_ok());
        assert!(Dimensions::new(1, 1).is_ok());
        assert_eq!(Dimensions::new(0, 4), Err(DimensionsError::ZeroWidth));
        assert_eq!(Dimensions::new(4, 0), Err(DimensionsError::ZeroHeight));
        assert_eq!(
            Dimensions::new(11, 4),
            Err(DimensionsError::TooWide { width: 11 })
        );
    }

    #[test]
    fn test_dimensions_contains() {
        let dims = Dimensions::new(6, 4).unwrap();
        assert!(dims.contains(Cell::from_row_column(0, 0)));
        assert!(dims.contains(Cell::from_row_column(3, 5)));
        assert!(!dims.contains(Cell::from_row_column(3, 6)));
        assert!(!dims.contains(Cell::from_row_column(4, 0)));
    }
}
