use std::{num::ParseIntError, str::FromStr};

use super::MAX_WIDTH;

/// One of the two players of a game.
///
/// [`Player::A`] always moves first and is the maximizing side of the
/// heuristic; [`Player::B`] is the minimizing side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Player {
    #[display("X")]
    A = 0,
    #[display("O")]
    B = 1,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::A, Player::B];

    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A single cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    Piece(Player),
}

impl Cell {
    /// Returns the owner of the piece in this cell, if any.
    #[must_use]
    pub const fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Piece(player) => Some(player),
        }
    }
}

/// A column number, counted from 1 at the left edge.
///
/// A `Column` is always within `1..=MAX_WIDTH`; whether it fits a particular
/// grid is checked when the move is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("{_0}")]
pub struct Column(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("column must be in 1..={MAX_WIDTH}, got {number}")]
pub struct ColumnRangeError {
    number: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ParseColumnError {
    #[display("not a column number: {_0}")]
    Parse(ParseIntError),
    #[display("{_0}")]
    Range(ColumnRangeError),
}

impl Column {
    /// Creates a column from its 1-based number.
    pub fn new(number: usize) -> Result<Self, ColumnRangeError> {
        match u8::try_from(number) {
            Ok(n) if (1..=MAX_WIDTH).contains(&number) => Ok(Self(n)),
            _ => Err(ColumnRangeError { number }),
        }
    }

    /// Creates a column from its 0-based index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= MAX_WIDTH`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self::new(index + 1).unwrap_or_else(|_| panic!("column index out of range: {index}"))
    }

    /// Returns the 1-based column number.
    #[must_use]
    pub const fn number(self) -> usize {
        self.0 as usize
    }

    /// Returns the 0-based column index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl FromStr for Column {
    type Err = ParseColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s.trim().parse::<usize>()?;
        Ok(Column::new(number)?)
    }
}
