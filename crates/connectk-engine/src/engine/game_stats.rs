use std::time::Duration;

use crate::core::cell::{Column, Player};

/// Instrumentation recorded for a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnRecord {
    pub player: Player,
    pub column: Column,
    /// Search nodes expanded to choose the move, if the move came from a search.
    pub states_visited: Option<u64>,
    pub think_time: Duration,
}

/// Per-turn statistics of a game.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use connectk_engine::{Column, GameStats, Player, TurnRecord};
///
/// let mut stats = GameStats::new();
/// stats.record_turn(TurnRecord {
///     player: Player::A,
///     column: Column::new(4).unwrap(),
///     states_visited: Some(120),
///     think_time: Duration::from_millis(30),
/// });
///
/// assert_eq!(stats.average_states_visited(), Some(120.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GameStats {
    turns: Vec<TurnRecord>,
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self { turns: Vec::new() }
    }

    pub fn record_turn(&mut self, record: TurnRecord) {
        self.turns.push(record);
    }

    #[must_use]
    pub fn turns(&self) -> &[TurnRecord] {
        &self.turns
    }

    /// Returns the mean thinking time over all turns.
    #[must_use]
    pub fn average_think_time(&self) -> Option<Duration> {
        let count = u32::try_from(self.turns.len()).ok().filter(|&n| n > 0)?;
        let total: Duration = self.turns.iter().map(|turn| turn.think_time).sum();
        Some(total / count)
    }

    /// Returns the mean number of states visited over the turns chosen by search.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn average_states_visited(&self) -> Option<f64> {
        let visited: Vec<u64> = self
            .turns
            .iter()
            .filter_map(|turn| turn.states_visited)
            .collect();
        if visited.is_empty() {
            return None;
        }
        Some(visited.iter().sum::<u64>() as f64 / visited.len() as f64)
    }
}
