use arrayvec::ArrayVec;

use super::cell::{Cell, Dimensions, STRIDE};

/// The playing field: its dimensions and the cells of every landed piece.
///
/// Locked cells are kept as an unordered multiset of stride-encoded positions.
/// The board is the bounds and collision authority for the falling piece, and
/// evaluates row clears and the column-overflow game-over condition.
///
/// # Example
///
/// ```
/// use stridetris_engine::{Board, Cell, Dimensions};
///
/// let mut board = Board::new(Dimensions::new(10, 4)?);
/// board.lock([30, 31, 32, 33].map(Cell::new));
/// assert!(board.is_occupied(Cell::new(31)));
/// assert_eq!(board.clear_completed_rows(), 0);
/// # Ok::<(), stridetris_engine::DimensionsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    dimensions: Dimensions,
    locked: Vec<Cell>,
}

// Locked cells form a multiset; their order carries no meaning.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        let sorted = |board: &Board| {
            let mut cells = board.locked.clone();
            cells.sort_unstable();
            cells
        };
        self.dimensions == other.dimensions && sorted(self) == sorted(other)
    }
}

impl Eq for Board {}

impl Board {
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            locked: Vec::new(),
        }
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[must_use]
    pub fn locked_cells(&self) -> &[Cell] {
        &self.locked
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.dimensions.contains(cell)
    }

    #[must_use]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.locked.contains(&cell)
    }

    /// Adds the cells of a landed piece. The caller guarantees they are on the board.
    pub fn lock(&mut self, cells: [Cell; 4]) {
        debug_assert!(cells.iter().all(|&cell| self.contains(cell)));
        self.locked.extend(cells);
    }

    /// Removes every locked cell.
    pub fn reset(&mut self) {
        self.locked.clear();
    }

    /// A row is complete when exactly `width` locked cells share it. Duplicates count.
    fn is_row_complete(&self, row: usize) -> bool {
        self.locked.iter().filter(|cell| cell.row() == row).count() == self.dimensions.width()
    }

    /// Clears completed rows from the bottom up and returns how many were cleared.
    ///
    /// Only the bottom row is examined. While it is complete, its cells are removed,
    /// everything above drops one row, and the bottom row is checked again. The scan
    /// ends at the first incomplete bottom row; complete rows higher up are left
    /// alone until they reach the bottom.
    pub fn clear_completed_rows(&mut self) -> usize {
        let row = self.dimensions.bottom_row();
        let mut count = 0;
        while self.is_row_complete(row) {
            self.locked.retain(|cell| cell.row() != row);
            for cell in &mut self.locked {
                if cell.row() < row {
                    *cell = cell.below();
                }
            }
            count += 1;
        }
        count
    }

    /// Returns the columns occupied in every row by locked cells or `active` cells.
    #[must_use]
    pub fn full_columns(&self, active: &[Cell]) -> ArrayVec<usize, STRIDE> {
        let mut occupied = vec![[false; STRIDE]; self.dimensions.height()];
        for cell in self.locked.iter().chain(active) {
            if self.contains(*cell) {
                occupied[cell.row()][cell.column()] = true;
            }
        }
        (0..self.dimensions.width())
            .filter(|&column| occupied.iter().all(|row| row[column]))
            .collect()
    }

    /// Checks the column-overflow condition: some column is filled from the top
    /// row to the bottom row by locked cells and the `active` cells.
    #[must_use]
    pub fn is_game_over(&self, active: &[Cell]) -> bool {
        !self.full_columns(active).is_empty()
    }

    /// Creates a `Board` from ASCII art for testing.
    /// '#' represents a locked cell, '.' an empty cell.
    /// Rows are given top to bottom; the width is the length of the first row.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<Vec<char>> = art
            .lines()
            .map(|line| line.chars().filter(|c| *c == '#' || *c == '.').collect())
            .filter(|chars: &Vec<char>| !chars.is_empty())
            .collect();
        let width = lines.first().map_or(0, Vec::len);
        let dimensions = match Dimensions::new(width, lines.len()) {
            Ok(dimensions) => dimensions,
            Err(e) => panic!("invalid board art: {e}"),
        };

        let mut board = Self::new(dimensions);
        for (row, chars) in lines.iter().enumerate() {
            assert_eq!(
                chars.len(),
                width,
                "Each row must have exactly {width} cells, got {} at row {row}",
                chars.len(),
            );
            for (column, &ch) in chars.iter().enumerate() {
                if ch == '#' {
                    board.locked.push(Cell::from_row_column(row, column));
                }
            }
        }
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_count(board: &Board, row: usize) -> usize {
        board
            .locked_cells()
            .iter()
            .filter(|cell| cell.row() == row)
            .count()
    }

    #[test]
    fn test_from_ascii() {
        let board = Board::from_ascii(
            r"
            ....
            .#..
            ##.#
            ",
        );
        assert_eq!(board.dimensions().width(), 4);
        assert_eq!(board.dimensions().height(), 3);
        assert_eq!(board.locked_cells().len(), 4);
        assert!(board.is_occupied(Cell::from_row_column(1, 1)));
        assert!(board.is_occupied(Cell::from_row_column(2, 3)));
        assert!(!board.is_occupied(Cell::from_row_column(2, 2)));
    }

    #[test]
    fn test_lock_and_reset() {
        let mut board = Board::new(Dimensions::new(10, 4).unwrap());
        let cells = [4, 14, 15, 5].map(Cell::new);
        board.lock(cells);
        for cell in cells {
            assert!(board.is_occupied(cell));
        }
        assert!(!board.is_occupied(Cell::new(6)));

        board.reset();
        assert!(board.locked_cells().is_empty());
    }

    #[test]
    fn test_clear_single_bottom_row() {
        let mut board = Board::from_ascii(
            r"
            ..........
            ....#.....
            ....##....
            ##########
            ",
        );

        assert_eq!(board.clear_completed_rows(), 1);
        assert_eq!(
            board,
            Board::from_ascii(
                r"
                ..........
                ..........
                ....#.....
                ....##....
                ",
            )
        );
    }

    #[test]
    fn test_clear_cascades_through_consecutive_rows() {
        let mut board = Board::from_ascii(
            r"
            .#........
            ##########
            ##########
            ##########
            ",
        );

        assert_eq!(board.clear_completed_rows(), 3);
        assert_eq!(board.locked_cells(), [Cell::from_row_column(3, 1)]);
        for row in 0..3 {
            assert_eq!(row_count(&board, row), 0);
        }
    }

    #[test]
    fn test_clear_stops_at_incomplete_bottom_row() {
        let mut board = Board::from_ascii(
            r"
            ..........
            ##########
            #########.
            ",
        );

        let before = board.clone();
        assert_eq!(board.clear_completed_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_stops_after_first_incomplete_row() {
        let mut board = Board::from_ascii(
            r"
            ##########
            #.########
            ##########
            ",
        );

        assert_eq!(board.clear_completed_rows(), 1);
        assert_eq!(
            board,
            Board::from_ascii(
                r"
                ..........
                ##########
                #.########
                ",
            )
        );
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut board = Board::from_ascii(
            r"
            ###.......
            ##########
            ",
        );
        assert_eq!(board.clear_completed_rows(), 1);
        assert_eq!(board.clear_completed_rows(), 0);
        assert_eq!(row_count(&board, 1), 3);
    }

    #[test]
    fn test_clear_removes_width_cells_per_row() {
        let mut board = Board::from_ascii(
            r"
            ..#...
            .###..
            ######
            ######
            ",
        );
        let before = board.locked_cells().len();
        let cleared = board.clear_completed_rows();
        assert_eq!(cleared, 2);
        assert_eq!(before - board.locked_cells().len(), cleared * 6);
        assert!(!board.is_row_complete(board.dimensions().bottom_row()));
    }

    #[test]
    fn test_clear_counts_duplicate_cells() {
        let mut board = Board::from_ascii(
            r"
            ....
            ....
            ##..
            ",
        );
        board.lock([2, 12, 22, 22].map(Cell::new));

        // Row 2 holds four cells (two share a position) and column 3 stays empty.
        assert_eq!(board.clear_completed_rows(), 1);
        assert_eq!(
            board,
            Board::from_ascii(
                r"
                ....
                ..#.
                ..#.
                ",
            )
        );
    }

    #[test]
    fn test_clear_on_empty_board() {
        let mut board = Board::new(Dimensions::new(10, 20).unwrap());
        assert_eq!(board.clear_completed_rows(), 0);
    }

    #[test]
    fn test_game_over_full_column() {
        let board = Board::from_ascii(
            r"
            ...#......
            ...#......
            ...##.....
            ..###.....
            ",
        );
        assert!(board.is_game_over(&[]));
        assert_eq!(board.full_columns(&[]).as_slice(), [3]);
    }

    #[test]
    fn test_game_over_needs_every_row() {
        let board = Board::from_ascii(
            r"
            ...#......
            ..........
            ...#......
            ...#......
            ",
        );
        assert!(!board.is_game_over(&[]));
    }

    #[test]
    fn test_game_over_counts_active_cells() {
        let board = Board::from_ascii(
            r"
            ..........
            ..........
            ....#.....
            ....#.....
            ",
        );
        assert!(!board.is_game_over(&[]));

        let active = [4, 14, 15, 5].map(Cell::new);
        assert!(board.is_game_over(&active));
        assert_eq!(board.full_columns(&active).as_slice(), [4]);
    }

    #[test]
    fn test_game_over_with_full_rows_only() {
        // A full row is a clear, not an overflow.
        let board = Board::from_ascii(
            r"
            ..........
            ##########
            ",
        );
        assert!(!board.is_game_over(&[]));
    }

    #[test]
    fn test_game_over_single_row_board() {
        let board = Board::from_ascii("..#.");
        assert!(board.is_game_over(&[]));
        assert!(!Board::from_ascii("....").is_game_over(&[]));
    }
}
