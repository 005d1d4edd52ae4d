use std::fmt;

use serde::{Deserialize, Serialize};

use super::cell::{Cell, Dimensions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridCell {
    #[default]
    Empty,
    Filled,
}

impl GridCell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == GridCell::Empty
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            GridCell::Empty => '-',
            GridCell::Filled => '0',
        }
    }
}

/// A `height × width` picture of the board for renderers.
///
/// Built on demand from the locked cells and the active piece; it is never the
/// system of record. The text form prints one row per line, cells separated by a
/// space, `-` for empty and `0` for filled.
///
/// # Example
///
/// ```
/// use stridetris_engine::{Cell, Dimensions, GridSnapshot};
///
/// let grid = GridSnapshot::from_cells(Dimensions::new(3, 2)?, [Cell::new(1), Cell::new(12)]);
/// assert_eq!(grid.to_string(), "- 0 -\n- - 0\n");
/// # Ok::<(), stridetris_engine::DimensionsError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    width: usize,
    height: usize,
    rows: Vec<Vec<GridCell>>,
}

impl GridSnapshot {
    #[must_use]
    pub fn empty(dimensions: Dimensions) -> Self {
        Self {
            width: dimensions.width(),
            height: dimensions.height(),
            rows: vec![vec![GridCell::Empty; dimensions.width()]; dimensions.height()],
        }
    }

    pub fn from_cells<I>(dimensions: Dimensions, cells: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut grid = Self::empty(dimensions);
        for cell in cells {
            grid.fill(cell);
        }
        grid
    }

    /// Marks a cell as filled.
    ///
    /// A cell outside the grid means the engine broke its bounds invariant, so this
    /// panics instead of clamping.
    pub fn fill(&mut self, cell: Cell) {
        assert!(
            cell.row() < self.height && cell.column() < self.width,
            "cell {} (row {}, column {}) is outside the {}x{} grid",
            cell.position(),
            cell.row(),
            cell.column(),
            self.width,
            self.height,
        );
        self.rows[cell.row()][cell.column()] = GridCell::Filled;
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> GridCell {
        self.rows[row][column]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }
}

impl fmt::Display for GridSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for (column, cell) in row.iter().enumerate() {
                if column > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid() {
        let grid = GridSnapshot::empty(Dimensions::new(10, 4).unwrap());
        assert_eq!(grid.rows().count(), 4);
        assert!(grid.rows().all(|row| row.len() == 10));
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    fn test_from_cells_text() {
        let dims = Dimensions::new(10, 4).unwrap();
        let grid = GridSnapshot::from_cells(dims, [4, 14, 15, 5].map(Cell::new));
        assert_eq!(grid.cell(0, 4), GridCell::Filled);
        assert_eq!(grid.cell(1, 5), GridCell::Filled);
        assert_eq!(grid.cell(2, 4), GridCell::Empty);
        assert_eq!(
            grid.to_string(),
            "- - - - 0 0 - - - -\n\
             - - - - 0 0 - - - -\n\
             - - - - - - - - - -\n\
             - - - - - - - - - -\n"
        );
    }

    #[test]
    fn test_fill_same_cell_twice() {
        let mut grid = GridSnapshot::empty(Dimensions::new(2, 2).unwrap());
        grid.fill(Cell::new(0));
        grid.fill(Cell::new(0));
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_fill_outside_grid_panics() {
        let mut grid = GridSnapshot::empty(Dimensions::new(6, 4).unwrap());
        grid.fill(Cell::from_row_column(0, 7));
    }

    #[test]
    fn test_serialization() {
        let grid = GridSnapshot::from_cells(Dimensions::new(2, 1).unwrap(), [Cell::new(1)]);
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, r#"{"width":2,"height":1,"rows":[["empty","filled"]]}"#);
    }
}
