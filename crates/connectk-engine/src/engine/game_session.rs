use tracing::{debug, info};

use crate::{
    GridSizeError, IllegalMoveError,
    core::{
        cell::{Column, Player},
        grid_state::GridState,
    },
};

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum GameOutcome {
    #[display("{_0} wins")]
    Win(Player),
    #[display("draw")]
    Draw,
    /// The game was stopped after a fixed number of moves.
    #[display("stopped after {_0} moves")]
    MoveLimitReached(usize),
}

/// The authoritative game.
///
/// Owns the one [`GridState`] that is mutated exactly once per real turn.
/// Players alternate, starting with [`Player::A`].
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GridState,
    history: Vec<Column>,
    outcome: Option<GameOutcome>,
    move_limit: Option<usize>,
}

impl GameSession {
    /// Creates a new game, optionally stopped after `move_limit` moves.
    pub fn new(
        width: usize,
        height: usize,
        k: usize,
        move_limit: Option<usize>,
    ) -> Result<Self, GridSizeError> {
        Ok(Self {
            state: GridState::new(width, height, k)?,
            history: Vec::new(),
            outcome: None,
            move_limit,
        })
    }

    #[must_use]
    pub fn state(&self) -> &GridState {
        &self.state
    }

    /// Returns the columns played so far, in order.
    #[must_use]
    pub fn history(&self) -> &[Column] {
        &self.history
    }

    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub fn side_to_move(&self) -> Player {
        self.state.side_to_move()
    }

    /// Drops a piece of the player to move into `column`.
    ///
    /// Returns the filled `(x, y)` cell. The outcome is updated when the move
    /// ends the game.
    pub fn play(&mut self, column: Column) -> Result<(usize, usize), IllegalMoveError> {
        if self.is_over() {
            return Err(IllegalMoveError::GameOver);
        }
        let player = self.state.side_to_move();
        let (x, y) = self.state.play(column, player)?;
        self.history.push(column);
        debug!(%player, %column, row = y, "piece placed");

        self.outcome = if let Some(winner) = self.state.winner() {
            Some(GameOutcome::Win(winner))
        } else if self.state.is_full() {
            Some(GameOutcome::Draw)
        } else {
            self.move_limit
                .filter(|&limit| self.history.len() >= limit)
                .map(GameOutcome::MoveLimitReached)
        };
        if let Some(outcome) = self.outcome {
            info!(%outcome, moves = self.history.len(), "game over");
        }
        Ok((x, y))
    }
}
