//! Grid model and rules of connect-k games.
//!
//! Two players drop pieces into the columns of a `width`×`height` grid. The
//! first player to line up `k` pieces horizontally, vertically or diagonally
//! wins; a full grid without such a run is a draw.
//!
//! - [`GridState`] - piece placement, move application and terminal tests
//! - [`find_winning_streak`] / [`find_all_streaks`] - run detection over a [`Line`]
//! - [`GameSession`] - the authoritative game, advanced one move per turn

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum IllegalMoveError {
    #[display("column {column} is outside of the board (1..={width})")]
    ColumnOutOfRange { column: Column, width: usize },
    #[display("column {column} is full")]
    ColumnFull { column: Column },
    #[display("the game is already over")]
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridSizeError {
    #[display("width must be in 1..={MAX_WIDTH}, got {width}")]
    Width { width: usize },
    #[display("height must be in 1..={MAX_HEIGHT}, got {height}")]
    Height { height: usize },
    #[display("k must be in 1..={max}, got {k}")]
    RunLength { k: usize, max: usize },
}
