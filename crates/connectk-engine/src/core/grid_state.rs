use arrayvec::ArrayVec;

use crate::{GridSizeError, IllegalMoveError};

use super::{
    MAX_HEIGHT, MAX_WIDTH,
    cell::{Cell, Column, Player},
    line::{Line, LineKind, find_winning_streak},
};

/// Piece placement of a connect-k grid.
///
/// Cells are addressed by `(column index, row)` with row 0 at the bottom.
/// Pieces fall to the lowest empty row of a column, so the occupied cells of
/// every column always form a contiguous stack starting at row 0.
///
/// # Example
///
/// ```
/// use connectk_engine::{Column, GridState, Player};
///
/// let state = GridState::new(7, 6, 4).unwrap();
/// let next = state.apply_move(Column::new(4).unwrap(), Player::A).unwrap();
///
/// assert_eq!(next.move_count(), 1);
/// assert_eq!(state.move_count(), 0);
/// assert!(!next.is_terminal());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    width: usize,
    height: usize,
    k: usize,
    // column-major: `cells[x * height + y]`
    cells: Vec<Cell>,
    column_heights: ArrayVec<usize, MAX_WIDTH>,
    move_count: usize,
    placements: [Vec<(usize, usize)>; 2],
}

impl GridState {
    /// Creates an empty grid of `width` columns and `height` rows where `k`
    /// pieces in a row win.
    pub fn new(width: usize, height: usize, k: usize) -> Result<Self, GridSizeError> {
        if !(1..=MAX_WIDTH).contains(&width) {
            return Err(GridSizeError::Width { width });
        }
        if !(1..=MAX_HEIGHT).contains(&height) {
            return Err(GridSizeError::Height { height });
        }
        let max = usize::max(width, height);
        if !(1..=max).contains(&k) {
            return Err(GridSizeError::RunLength { k, max });
        }
        Ok(Self {
            width,
            height,
            k,
            cells: vec![Cell::Empty; width * height],
            column_heights: (0..width).map(|_| 0).collect(),
            move_count: 0,
            placements: [Vec::new(), Vec::new()],
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of pieces in a row needed to win.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the total number of pieces placed so far.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Returns the content of the cell at column index `x` and row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside of the grid.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of grid");
        self.cells[x * self.height + y]
    }

    /// Returns the number of pieces stacked in column index `x`.
    ///
    /// # Panics
    ///
    /// Panics if `x` is outside of the grid.
    #[must_use]
    pub fn column_height(&self, x: usize) -> usize {
        assert!(x < self.width, "column index {x} out of grid");
        self.column_heights[x]
    }

    /// Returns the cells occupied by `player` in placement order.
    #[must_use]
    pub fn placements(&self, player: Player) -> &[(usize, usize)] {
        &self.placements[player.index()]
    }

    /// Returns the player whose turn it is, assuming players alternate and
    /// [`Player::A`] moves first.
    #[must_use]
    pub fn side_to_move(&self) -> Player {
        if self.move_count % 2 == 0 {
            Player::A
        } else {
            Player::B
        }
    }

    /// Returns the row a piece dropped into `column` would land on.
    pub fn landing_row(&self, column: Column) -> Result<usize, IllegalMoveError> {
        let x = column.index();
        if x >= self.width {
            return Err(IllegalMoveError::ColumnOutOfRange {
                column,
                width: self.width,
            });
        }
        let y = self.column_heights[x];
        if y >= self.height {
            return Err(IllegalMoveError::ColumnFull { column });
        }
        Ok(y)
    }

    /// Drops a piece of `player` into `column`, returning the filled `(x, y)` cell.
    pub fn play(
        &mut self,
        column: Column,
        player: Player,
    ) -> Result<(usize, usize), IllegalMoveError> {
        let y = self.landing_row(column)?;
        let x = column.index();
        self.cells[x * self.height + y] = Cell::Piece(player);
        self.column_heights[x] += 1;
        self.move_count += 1;
        self.placements[player.index()].push((x, y));
        Ok((x, y))
    }

    /// Returns a new state with a piece of `player` dropped into `column`.
    ///
    /// `self` is left untouched.
    pub fn apply_move(&self, column: Column, player: Player) -> Result<Self, IllegalMoveError> {
        let mut next = self.clone();
        next.play(column, player)?;
        Ok(next)
    }

    /// Removes the top piece of `column` and returns its owner.
    ///
    /// Only the most recent move may be undone for the placement order to stay
    /// consistent; search unwinds moves in exactly that order.
    pub fn undo(&mut self, column: Column) -> Option<Player> {
        let x = column.index();
        if x >= self.width || self.column_heights[x] == 0 {
            return None;
        }
        let y = self.column_heights[x] - 1;
        let player = self.cells[x * self.height + y].player()?;
        self.cells[x * self.height + y] = Cell::Empty;
        self.column_heights[x] = y;
        self.move_count -= 1;
        let placements = &mut self.placements[player.index()];
        if let Some(pos) = placements.iter().rposition(|&cell| cell == (x, y)) {
            placements.remove(pos);
        }
        Some(player)
    }

    /// Returns the columns that can still take a piece, in ascending order.
    #[must_use]
    pub fn legal_moves(&self) -> ArrayVec<Column, MAX_WIDTH> {
        self.column_heights
            .iter()
            .enumerate()
            .filter(|&(_, &h)| h < self.height)
            .map(|(x, _)| Column::from_index(x))
            .collect()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.move_count == self.width * self.height
    }

    /// Returns the player owning a run of `k` pieces, if any.
    ///
    /// Lines are scanned in the order of [`GridState::lines`] and the first
    /// run found decides the result.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        self.lines().find_map(|line| find_winning_streak(&line, self.k))
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.is_full() || self.winner().is_some()
    }

    /// Reads the cells along one line of the grid.
    #[must_use]
    pub fn line(&self, kind: LineKind) -> Line {
        kind.positions(self.width, self.height)
            .map(|(x, y)| self.cells[x * self.height + y])
            .collect()
    }

    /// Reads column index `x` bottom to top.
    #[must_use]
    pub fn column_line(&self, x: usize) -> Line {
        self.line(LineKind::Column(x))
    }

    /// Reads row `y` left to right.
    #[must_use]
    pub fn row_line(&self, y: usize) -> Line {
        self.line(LineKind::Row(y))
    }

    /// Reads the cells with `y - x == offset`, bottom-left to top-right.
    ///
    /// `offset` ranges over `-(width - 1)..=height - 1`.
    #[must_use]
    pub fn positive_diagonal(&self, offset: isize) -> Line {
        self.line(LineKind::PositiveDiagonal(offset))
    }

    /// Reads the cells with `x + y == offset + width - 1`, bottom-right to top-left.
    ///
    /// `offset` ranges over `-(width - 1)..=height - 1`.
    #[must_use]
    pub fn negative_diagonal(&self, offset: isize) -> Line {
        self.line(LineKind::NegativeDiagonal(offset))
    }

    /// Iterates over every line that may hold a run of `k` pieces.
    ///
    /// Yields every column left to right, every row bottom to top, then the
    /// positive and negative diagonals of at least `k` cells. Shorter
    /// diagonals can never hold a winning run and are skipped.
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        LineKind::all(self.width, self.height, self.k).map(|kind| self.line(kind))
    }
}
