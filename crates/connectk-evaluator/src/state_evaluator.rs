//! Heuristic scoring of non-terminal positions.
//!
//! The default [`StreakEvaluator`] rewards runs of consecutive pieces. Every run of
//! length `L` along a row, column or diagonal contributes `base^L`, added for
//! [`Player::A`] and subtracted for [`Player::B`], where `base = 80 / k`:
//!
//! ```text
//! k = 4 → base = 20
//!
//! run length   1     2      3
//! contribution 20    400    8000
//! ```
//!
//! Longer runs dominate super-linearly, so a single run of `k - 1` outweighs many
//! short ones. The score is unbounded and only meaningful as a ranking between
//! positions with the same `k`.

use std::fmt;

use connectk_engine::{GridState, Player, find_all_streaks};

/// Scores positions from the point of view of [`Player::A`].
///
/// Higher is better for A, lower is better for B.
pub trait StateEvaluator: fmt::Debug + Send + Sync {
    /// Returns the desirability of a non-terminal `state`.
    fn evaluate(&self, state: &GridState) -> f64;
}

/// Run-length heuristic over every row, column and diagonal of at least `k` cells.
///
/// # Example
///
/// ```
/// use connectk_engine::GridState;
/// use connectk_evaluator::state_evaluator::StreakEvaluator;
///
/// let state = GridState::new(7, 6, 4).unwrap();
/// assert_eq!(StreakEvaluator::score(&state), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StreakEvaluator;

impl StreakEvaluator {
    const BASE_NUMERATOR: f64 = 80.0;

    /// Returns the exponential base used for runs when `k` pieces win.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn base(k: usize) -> f64 {
        Self::BASE_NUMERATOR / k as f64
    }

    #[must_use]
    pub fn score(state: &GridState) -> f64 {
        let k = state.k();
        let base = Self::base(k);
        let mut value = 0.0;
        for line in state.lines() {
            let streaks = find_all_streaks(&line, k);
            for player in Player::ALL {
                let sign = match player {
                    Player::A => 1.0,
                    Player::B => -1.0,
                };
                for &run in streaks.runs(player) {
                    let exponent = i32::try_from(run).unwrap_or(i32::MAX);
                    value += sign * base.powi(exponent);
                }
            }
        }
        value
    }
}

impl StateEvaluator for StreakEvaluator {
    fn evaluate(&self, state: &GridState) -> f64 {
        Self::score(state)
    }
}
