use arrayvec::ArrayVec;

use super::{
    MAX_LINE_LEN,
    cell::{Cell, Player},
};

/// Cells read along one row, column or diagonal.
///
/// Lines are extracted on demand for scanning and never stored in the grid.
pub type Line = ArrayVec<Cell, MAX_LINE_LEN>;

/// Identifies one row, column or diagonal of a grid.
///
/// Diagonals are indexed by an offset in `-(width - 1)..=(height - 1)`:
///
/// - a positive diagonal (`/`) holds the cells with `row - col == offset`
/// - a negative diagonal (`\`) holds the cells with `row + col == offset + width - 1`
///
/// ```text
/// positive offset 0 on 4x3    negative offset 0 on 4x3
/// row 2: . . X .              row 2: X . . .
/// row 1: . X . .              row 1: . X . .
/// row 0: X . . .              row 0: . . X .
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Column(usize),
    Row(usize),
    PositiveDiagonal(isize),
    NegativeDiagonal(isize),
}

impl LineKind {
    /// Returns the `(column, row)` coordinates of the line on a `width`×`height` grid,
    /// ordered by increasing column (bottom to top for columns).
    pub fn positions(self, width: usize, height: usize) -> impl Iterator<Item = (usize, usize)> {
        let (start, step_row, len): ((usize, usize), isize, usize) = match self {
            LineKind::Column(x) => ((x, 0), 1, height),
            LineKind::Row(y) => ((0, y), 0, width),
            LineKind::PositiveDiagonal(offset) => {
                let x0 = offset.min(0).unsigned_abs();
                let y0 = offset.max(0).unsigned_abs();
                let len = usize::min(width.saturating_sub(x0), height.saturating_sub(y0));
                ((x0, y0), 1, len)
            }
            LineKind::NegativeDiagonal(offset) => {
                // x + y == sum; a negative sum lies left of the grid
                match usize::try_from(offset + isize_of(width) - 1) {
                    Ok(sum) => {
                        let x0 = sum.saturating_sub(height - 1);
                        let x1 = usize::min(width - 1, sum);
                        let len = (x1 + 1).saturating_sub(x0);
                        ((x0, sum - x0), -1, len)
                    }
                    Err(_) => ((0, 0), -1, 0),
                }
            }
        };
        let step_col = usize::from(!matches!(self, LineKind::Column(_)));
        (0..len).map(move |i| {
            let (x0, y0) = start;
            let y = y0.wrapping_add_signed(step_row * isize_of(i));
            (x0 + step_col * i, y)
        })
    }

    /// Returns the number of cells of the line on a `width`×`height` grid.
    #[must_use]
    pub fn len(self, width: usize, height: usize) -> usize {
        self.positions(width, height).count()
    }

    /// Enumerates every column, every row, and every diagonal of at least
    /// `min_diagonal_len` cells, in scan order.
    ///
    /// The order is columns left to right, rows bottom to top, positive
    /// diagonals, then negative diagonals. Each line is produced exactly once.
    pub fn all(
        width: usize,
        height: usize,
        min_diagonal_len: usize,
    ) -> impl Iterator<Item = LineKind> {
        let offsets = (1 - isize_of(width))..isize_of(height);
        let columns = (0..width).map(LineKind::Column);
        let rows = (0..height).map(LineKind::Row);
        let positive = offsets.clone().map(LineKind::PositiveDiagonal);
        let negative = offsets.map(LineKind::NegativeDiagonal);
        columns.chain(rows).chain(
            positive
                .chain(negative)
                .filter(move |kind| kind.len(width, height) >= min_diagonal_len),
        )
    }
}

fn isize_of(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}

/// Returns the player owning the first run of `k` consecutive pieces in `line`.
///
/// Any change of cell value starts a new run, so empty cells always break a
/// run. Scanning stops as soon as a run reaches `k`.
#[must_use]
pub fn find_winning_streak(line: &[Cell], k: usize) -> Option<Player> {
    let mut current = Cell::Empty;
    let mut run = 0;
    for &cell in line {
        if cell == current {
            run += 1;
        } else {
            current = cell;
            run = 1;
        }
        if run == k
            && let Cell::Piece(player) = current
        {
            return Some(player);
        }
    }
    None
}

/// Run lengths of each player observed along a single line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Streaks {
    runs: [ArrayVec<usize, MAX_LINE_LEN>; 2],
}

impl Streaks {
    /// Returns the run lengths of `player` in the order they appear.
    #[must_use]
    pub fn runs(&self, player: Player) -> &[usize] {
        &self.runs[player.index()]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(ArrayVec::is_empty)
    }
}

/// Collects every maximal run of consecutive same-player pieces in `line`.
///
/// Returns early once a run reaches `k`; such a line already decides the game
/// and its remaining runs are irrelevant.
#[must_use]
pub fn find_all_streaks(line: &[Cell], k: usize) -> Streaks {
    let mut streaks = Streaks::default();
    let mut current = None;
    for &cell in line {
        let Cell::Piece(player) = cell else {
            current = None;
            continue;
        };
        let runs = &mut streaks.runs[player.index()];
        if current == Some(player)
            && let Some(last) = runs.last_mut()
        {
            *last += 1;
        } else {
            current = Some(player);
            runs.push(1);
        }
        if runs.last() == Some(&k) {
            break;
        }
    }
    streaks
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: Cell = Cell::Empty;
    const A: Cell = Cell::Piece(Player::A);
    const B: Cell = Cell::Piece(Player::B);

    fn mirrored(line: &[Cell]) -> Vec<Cell> {
        line.iter().rev().copied().collect()
    }

    #[test]
    fn test_winning_streak_basic() {
        assert_eq!(find_winning_streak(&[A, A, A, E, E, E, E], 4), None);
        assert_eq!(find_winning_streak(&[A, A, A, A, E, E, E], 4), Some(Player::A));
        assert_eq!(find_winning_streak(&[E, B, B, B, B, E], 4), Some(Player::B));
    }

    #[test]
    fn test_winning_streak_empty_and_short_lines() {
        assert_eq!(find_winning_streak(&[], 4), None);
        assert_eq!(find_winning_streak(&[E; 7], 4), None);
        assert_eq!(find_winning_streak(&[A, A, A], 4), None);
    }

    #[test]
    fn test_winning_streak_broken_runs() {
        assert_eq!(find_winning_streak(&[A, A, E, A, A], 4), None);
        assert_eq!(find_winning_streak(&[A, A, B, A, A, A], 4), None);
        assert_eq!(find_winning_streak(&[A, B, A, B, A, B], 4), None);
    }

    #[test]
    fn test_winning_streak_first_run_wins() {
        assert_eq!(
            find_winning_streak(&[B, B, B, B, A, A, A, A], 4),
            Some(Player::B)
        );
    }

    #[test]
    fn test_winning_streak_mirror_symmetry() {
        let lines: [&[Cell]; 4] = [
            &[E, A, A, A, A, B],
            &[B, B, E, B, B, B],
            &[A, A, A, B, B, B, B],
            &[E, E, A, E, E],
        ];
        for line in lines {
            assert_eq!(
                find_winning_streak(line, 4),
                find_winning_streak(&mirrored(line), 4),
                "{line:?}"
            );
        }
    }

    #[test]
    fn test_all_streaks() {
        let streaks = find_all_streaks(&[A, A, E, B, A, A, A, E, B, B], 4);
        assert_eq!(streaks.runs(Player::A), &[2, 3]);
        assert_eq!(streaks.runs(Player::B), &[1, 2]);
    }

    #[test]
    fn test_all_streaks_empty_line() {
        assert!(find_all_streaks(&[E; 6], 4).is_empty());
        assert!(find_all_streaks(&[], 4).is_empty());
    }

    #[test]
    fn test_all_streaks_stops_at_k() {
        let streaks = find_all_streaks(&[B, A, A, A, B, B], 3);
        assert_eq!(streaks.runs(Player::A), &[3]);
        assert_eq!(streaks.runs(Player::B), &[1]);
    }

    #[test]
    fn test_all_streaks_mirror_symmetry() {
        let line = [A, A, E, B, B, B, A, E, A];
        let forward = find_all_streaks(&line, 4);
        let backward = find_all_streaks(&mirrored(&line), 4);
        for player in Player::ALL {
            let mut reversed = backward.runs(player).to_vec();
            reversed.reverse();
            assert_eq!(forward.runs(player), reversed.as_slice());
        }
    }

    #[test]
    fn test_line_positions() {
        let column: Vec<_> = LineKind::Column(2).positions(4, 3).collect();
        assert_eq!(column, [(2, 0), (2, 1), (2, 2)]);

        let row: Vec<_> = LineKind::Row(1).positions(4, 3).collect();
        assert_eq!(row, [(0, 1), (1, 1), (2, 1), (3, 1)]);

        let positive: Vec<_> = LineKind::PositiveDiagonal(0).positions(4, 3).collect();
        assert_eq!(positive, [(0, 0), (1, 1), (2, 2)]);

        let positive: Vec<_> = LineKind::PositiveDiagonal(-2).positions(4, 3).collect();
        assert_eq!(positive, [(2, 0), (3, 1)]);

        let negative: Vec<_> = LineKind::NegativeDiagonal(0).positions(4, 3).collect();
        assert_eq!(negative, [(1, 2), (2, 1), (3, 0)]);

        let negative: Vec<_> = LineKind::NegativeDiagonal(-3).positions(4, 3).collect();
        assert_eq!(negative, [(0, 0)]);

        let negative: Vec<_> = LineKind::NegativeDiagonal(2).positions(4, 3).collect();
        assert_eq!(negative, [(3, 2)]);
    }

    #[test]
    fn test_offsets_outside_grid_are_empty() {
        for offset in [-4, -10, 3, 10] {
            assert_eq!(LineKind::PositiveDiagonal(offset).len(4, 3), 0, "{offset}");
            assert_eq!(LineKind::NegativeDiagonal(offset).len(4, 3), 0, "{offset}");
        }
    }

    #[test]
    fn test_every_cell_on_one_diagonal_per_direction() {
        let (width, height) = (7, 6);
        for kind in [LineKind::PositiveDiagonal(0), LineKind::NegativeDiagonal(0)] {
            let mut seen = vec![0; width * height];
            for offset in (1 - 7)..6 {
                let kind = match kind {
                    LineKind::PositiveDiagonal(_) => LineKind::PositiveDiagonal(offset),
                    _ => LineKind::NegativeDiagonal(offset),
                };
                for (x, y) in kind.positions(width, height) {
                    seen[x * height + y] += 1;
                }
            }
            assert!(seen.iter().all(|&n| n == 1), "{kind:?}: {seen:?}");
        }
    }

    #[test]
    fn test_all_line_kinds_skip_short_diagonals() {
        let kinds: Vec<_> = LineKind::all(7, 6, 4).collect();
        let diagonals = kinds
            .iter()
            .filter(|kind| {
                matches!(
                    kind,
                    LineKind::PositiveDiagonal(_) | LineKind::NegativeDiagonal(_)
                )
            })
            .count();
        assert_eq!(kinds.len(), 7 + 6 + diagonals);
        assert_eq!(diagonals, 12);
        assert!(!kinds.contains(&LineKind::PositiveDiagonal(3)));
        assert_eq!(LineKind::PositiveDiagonal(3).len(7, 6), 3);
        assert!(kinds.contains(&LineKind::PositiveDiagonal(2)));
    }
}
