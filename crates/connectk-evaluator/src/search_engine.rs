//! Depth-bounded game-tree search.
//!
//! [`SearchEngine`] walks the tree of successor positions alternating between two
//! node types:
//!
//! - **MAX nodes** - [`Player::A`] to move, keeps the highest backed-up value
//! - **MIN nodes** - [`Player::B`] to move, keeps the lowest backed-up value
//!
//! Each node is resolved by the first matching rule:
//!
//! 1. **Terminal** - `+∞` if A has a run of `k`, `−∞` if B has, `0` for a full grid
//! 2. **Depth limit** - the [`StateEvaluator`] score
//! 3. **Expand** - recurse into every legal column in ascending order
//!
//! Ties keep the first (lowest) column reaching the best value. With
//! [`Algorithm::AlphaBeta`] the remaining siblings of a node are skipped as soon as
//! `alpha >= beta`; the chosen column and its value are the same as plain
//! [`Algorithm::Minimax`], only fewer states are visited.
//!
//! # Move Application
//!
//! The engine clones the root position once and then applies and undoes moves on
//! that private copy. Every branch observes exactly the position a fresh copy
//! would give it, and the caller's state is never touched.

use std::time::Instant;

use connectk_engine::{Column, GridState, Player};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state_evaluator::{StateEvaluator, StreakEvaluator};

/// Tree-walking algorithm of a [`SearchEngine`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Exhaustive Minimax without pruning.
    #[display("minimax")]
    Minimax,
    /// Minimax with alpha-beta pruning.
    #[default]
    #[display("alpha-beta")]
    AlphaBeta,
}

/// Which bound the engine optimizes at the root.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Plays [`Player::A`] and searches from a MAX node.
    #[default]
    #[display("maximizer")]
    Maximizer,
    /// Plays [`Player::B`] and searches from a MIN node.
    #[display("minimizer")]
    Minimizer,
}

impl Role {
    /// Returns the role of the engine playing `player`.
    #[must_use]
    pub const fn of(player: Player) -> Self {
        match player {
            Player::A => Role::Maximizer,
            Player::B => Role::Minimizer,
        }
    }

    #[must_use]
    pub const fn player(self) -> Player {
        match self {
            Role::Maximizer => Player::A,
            Role::Minimizer => Player::B,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SearchConfigError {
    #[display("max_depth must be at least 1")]
    ZeroDepth,
}

/// Construction parameters of a [`SearchEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SearchConfig {
    /// Number of plies explored below the root.
    pub max_depth: u32,
    pub algorithm: Algorithm,
    pub role: Role,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            algorithm: Algorithm::default(),
            role: Role::default(),
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), SearchConfigError> {
        if self.max_depth == 0 {
            return Err(SearchConfigError::ZeroDepth);
        }
        Ok(())
    }
}

/// Outcome of a single search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// Backed-up value of the root, `±∞` for forced wins and losses.
    pub value: f64,
    /// Best column, or `None` when the root position is terminal.
    pub column: Option<Column>,
    /// Number of nodes expanded.
    pub states_visited: u64,
}

/// Minimax / Alpha-Beta searcher for one side of a game.
#[derive(Debug)]
pub struct SearchEngine {
    config: SearchConfig,
    evaluator: Box<dyn StateEvaluator>,
    states_visited: u64,
}

impl SearchEngine {
    /// Creates an engine scoring leaves with [`StreakEvaluator`].
    pub fn new(config: SearchConfig) -> Result<Self, SearchConfigError> {
        Self::with_evaluator(config, Box::new(StreakEvaluator))
    }

    pub fn with_evaluator(
        config: SearchConfig,
        evaluator: Box<dyn StateEvaluator>,
    ) -> Result<Self, SearchConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            evaluator,
            states_visited: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Returns the number of nodes expanded by the last search.
    #[must_use]
    pub fn states_visited(&self) -> u64 {
        self.states_visited
    }

    /// Returns the best column for the engine's role, or `None` if `state` is
    /// terminal (in particular when the grid is full).
    pub fn select_target(&mut self, state: &GridState) -> Option<Column> {
        self.search(state).column
    }

    /// Searches `state` and returns the backed-up value with the chosen column.
    pub fn search(&mut self, state: &GridState) -> SearchResult {
        let start = Instant::now();
        self.states_visited = 0;

        let mut board = state.clone();
        let alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;
        let (value, column) = match self.config.role {
            Role::Maximizer => self.max_node(&mut board, alpha, beta, 0),
            Role::Minimizer => self.min_node(&mut board, alpha, beta, 0),
        };
        debug_assert_eq!(&board, state, "search must restore the root position");

        debug!(
            algorithm = %self.config.algorithm,
            role = %self.config.role,
            depth = self.config.max_depth,
            column = column.map(Column::number),
            value,
            states_visited = self.states_visited,
            elapsed = ?start.elapsed(),
            "search finished"
        );

        SearchResult {
            value,
            column,
            states_visited: self.states_visited,
        }
    }

    fn prunes(&self) -> bool {
        self.config.algorithm == Algorithm::AlphaBeta
    }

    /// Resolves terminal and depth-limit nodes without expanding them.
    fn leaf_value(&self, board: &GridState, depth: u32) -> Option<f64> {
        if let Some(winner) = board.winner() {
            return Some(match winner {
                Player::A => f64::INFINITY,
                Player::B => f64::NEG_INFINITY,
            });
        }
        if board.is_full() {
            return Some(0.0);
        }
        if depth >= self.config.max_depth {
            return Some(self.evaluator.evaluate(board));
        }
        None
    }

    fn max_node(
        &mut self,
        board: &mut GridState,
        mut alpha: f64,
        beta: f64,
        depth: u32,
    ) -> (f64, Option<Column>) {
        if let Some(value) = self.leaf_value(board, depth) {
            return (value, None);
        }
        self.states_visited += 1;

        let mut best_value = f64::NEG_INFINITY;
        let mut best_move = None;
        for column in board.legal_moves() {
            // legal_moves only yields open columns
            let Ok(_) = board.play(column, Player::A) else {
                continue;
            };
            let (value, _) = self.min_node(board, alpha, beta, depth + 1);
            board.undo(column);

            if best_move.is_none() || value > best_value {
                best_value = value;
                best_move = Some(column);
            }
            alpha = alpha.max(best_value);
            if self.prunes() && alpha >= beta {
                break;
            }
        }
        (best_value, best_move)
    }

    fn min_node(
        &mut self,
        board: &mut GridState,
        alpha: f64,
        mut beta: f64,
        depth: u32,
    ) -> (f64, Option<Column>) {
        if let Some(value) = self.leaf_value(board, depth) {
            return (value, None);
        }
        self.states_visited += 1;

        let mut best_value = f64::INFINITY;
        let mut best_move = None;
        for column in board.legal_moves() {
            let Ok(_) = board.play(column, Player::B) else {
                continue;
            };
            let (value, _) = self.max_node(board, alpha, beta, depth + 1);
            board.undo(column);

            if best_move.is_none() || value < best_value {
                best_value = value;
                best_move = Some(column);
            }
            beta = beta.min(best_value);
            if self.prunes() && alpha >= beta {
                break;
            }
        }
        (best_value, best_move)
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn col(number: usize) -> Column {
        Column::new(number).unwrap()
    }

    fn engine_with(max_depth: u32, algorithm: Algorithm, role: Role) -> SearchEngine {
        SearchEngine::new(SearchConfig {
            max_depth,
            algorithm,
            role,
        })
        .unwrap()
    }

    fn board(width: usize, height: usize, k: usize, moves: &[usize]) -> GridState {
        let mut state = GridState::new(width, height, k).unwrap();
        for &number in moves {
            let player = state.side_to_move();
            state.play(col(number), player).unwrap();
        }
        state
    }

    /// Plays random legal moves until `moves` pieces are placed, restarting
    /// whenever the game ends early.
    fn random_position(
        rng: &mut Pcg64Mcg,
        width: usize,
        height: usize,
        k: usize,
        moves: usize,
    ) -> GridState {
        'retry: loop {
            let mut state = GridState::new(width, height, k).unwrap();
            for _ in 0..moves {
                let legal = state.legal_moves();
                let column = legal[rng.random_range(0..legal.len())];
                let player = state.side_to_move();
                state.play(column, player).unwrap();
                if state.is_terminal() {
                    continue 'retry;
                }
            }
            return state;
        }
    }

    #[test]
    fn test_config_validation() {
        let config = SearchConfig {
            max_depth: 0,
            ..SearchConfig::default()
        };
        assert_eq!(
            SearchEngine::new(config).unwrap_err(),
            SearchConfigError::ZeroDepth
        );
        assert!(SearchEngine::new(SearchConfig::default()).is_ok());
    }

    #[test]
    fn test_config_from_json() {
        let config: SearchConfig = serde_json::from_str(
            r#"{"max-depth": 3, "algorithm": "minimax", "role": "minimizer"}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            SearchConfig {
                max_depth: 3,
                algorithm: Algorithm::Minimax,
                role: Role::Minimizer,
            }
        );
        let config: SearchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SearchConfig::default());
    }

    #[test]
    fn test_full_board_has_no_move() {
        let state = board(3, 2, 3, &[1, 2, 3, 1, 2, 3]);
        for algorithm in [Algorithm::Minimax, Algorithm::AlphaBeta] {
            let mut engine = engine_with(3, algorithm, Role::Maximizer);
            let result = engine.search(&state);
            assert_eq!(result.column, None);
            assert!(result.value.abs() < f64::EPSILON);
            assert_eq!(result.states_visited, 0);
        }
    }

    #[test]
    fn test_terminal_root_has_no_move() {
        let state = board(7, 6, 4, &[1, 2, 1, 2, 1, 2, 1]);
        let mut engine = engine_with(2, Algorithm::AlphaBeta, Role::Minimizer);
        let result = engine.search(&state);
        assert_eq!(result.column, None);
        assert!(result.value.is_infinite() && result.value > 0.0);
    }

    #[test]
    fn test_takes_immediate_win() {
        // X has three in column 3, O has three in row 0 (columns 4..=6)
        let state = board(7, 6, 4, &[3, 4, 3, 5, 3, 6]);
        for algorithm in [Algorithm::Minimax, Algorithm::AlphaBeta] {
            let mut engine = engine_with(1, algorithm, Role::Maximizer);
            let result = engine.search(&state);
            assert_eq!(result.column, Some(col(3)));
            assert_eq!(result.value, f64::INFINITY);
        }
    }

    #[test]
    fn test_minimizer_takes_immediate_win() {
        // O has three in column 7 and it is O's turn
        let state = board(7, 6, 4, &[1, 7, 2, 7, 1, 7, 5]);
        let mut engine = engine_with(1, Algorithm::AlphaBeta, Role::Minimizer);
        let result = engine.search(&state);
        assert_eq!(result.column, Some(col(7)));
        assert_eq!(result.value, f64::NEG_INFINITY);
    }

    #[test]
    fn test_blocks_opponent_win() {
        // O threatens column 7; X must block there
        let state = board(7, 6, 4, &[1, 7, 2, 7, 5, 7]);
        let mut engine = engine_with(2, Algorithm::AlphaBeta, Role::Maximizer);
        assert_eq!(engine.select_target(&state), Some(col(7)));
    }

    #[test]
    fn test_lost_position_still_moves() {
        // O has two open threats in row 0; every X move loses at depth 2
        let state = board(7, 1, 3, &[1, 3, 7, 4]);
        for algorithm in [Algorithm::Minimax, Algorithm::AlphaBeta] {
            let mut engine = engine_with(2, algorithm, Role::Maximizer);
            let result = engine.search(&state);
            assert_eq!(result.value, f64::NEG_INFINITY);
            assert_eq!(result.column, Some(col(2)));
        }
    }

    #[test]
    fn test_depth_one_picks_best_heuristic() {
        let state = board(7, 6, 4, &[4, 4, 3, 5]);
        let mut best: Option<(f64, Column)> = None;
        for column in state.legal_moves() {
            let next = state.apply_move(column, Player::A).unwrap();
            let score = StreakEvaluator::score(&next);
            if best.is_none_or(|(value, _)| score > value) {
                best = Some((score, column));
            }
        }
        let (expected_value, expected_column) = best.unwrap();

        let mut engine = engine_with(1, Algorithm::AlphaBeta, Role::Maximizer);
        let result = engine.search(&state);
        assert_eq!(result.column, Some(expected_column));
        assert_eq!(result.value.to_bits(), expected_value.to_bits());
    }

    #[test]
    fn test_ties_pick_lowest_column() {
        // any first move wins at once
        let state = GridState::new(5, 1, 1).unwrap();
        let mut engine = engine_with(1, Algorithm::AlphaBeta, Role::Maximizer);
        assert_eq!(engine.select_target(&state), Some(col(1)));

        // too short for diagonals, so every first move scores the same
        let state = GridState::new(5, 3, 4).unwrap();
        let mut engine = engine_with(1, Algorithm::Minimax, Role::Maximizer);
        let result = engine.search(&state);
        assert_eq!(result.column, Some(col(1)));
        assert!((result.value - 2.0 * 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_search_leaves_state_untouched() {
        let state = board(7, 6, 4, &[4, 3, 4]);
        let before = state.clone();
        let mut engine = engine_with(4, Algorithm::Minimax, Role::Minimizer);
        engine.search(&state);
        assert_eq!(state, before);
    }

    #[test]
    fn test_states_visited_reset_per_search() {
        let state = GridState::new(4, 4, 3).unwrap();
        let mut engine = engine_with(2, Algorithm::Minimax, Role::Maximizer);
        let first = engine.search(&state).states_visited;
        // root + 4 children
        assert_eq!(first, 5);
        assert_eq!(engine.search(&state).states_visited, first);
        assert_eq!(engine.states_visited(), first);
    }

    #[test]
    fn test_alpha_beta_matches_minimax() {
        let mut rng = Pcg64Mcg::seed_from_u64(0x5eed);
        for case in 0..40 {
            let (width, height, k) = [(7, 6, 4), (5, 4, 3), (4, 4, 4)][case % 3];
            let moves = rng.random_range(0..8);
            let state = random_position(&mut rng, width, height, k, moves);
            let depth = rng.random_range(1..=4);
            for role in [Role::Maximizer, Role::Minimizer] {
                let mut minimax = engine_with(depth, Algorithm::Minimax, role);
                let mut alpha_beta = engine_with(depth, Algorithm::AlphaBeta, role);
                let expected = minimax.search(&state);
                let actual = alpha_beta.search(&state);
                assert_eq!(actual.column, expected.column, "case {case}: {state:?}");
                assert_eq!(
                    actual.value.to_bits(),
                    expected.value.to_bits(),
                    "case {case}: {state:?}"
                );
                assert!(actual.states_visited <= expected.states_visited);
            }
        }
    }

    #[test]
    fn test_alpha_beta_prunes() {
        let state = GridState::new(7, 6, 4).unwrap();
        let mut minimax = engine_with(4, Algorithm::Minimax, Role::Maximizer);
        let mut alpha_beta = engine_with(4, Algorithm::AlphaBeta, Role::Maximizer);
        let expected = minimax.search(&state);
        let actual = alpha_beta.search(&state);
        assert_eq!(actual.column, expected.column);
        assert!(actual.states_visited < expected.states_visited);
    }

    #[test]
    fn test_role_player_mapping() {
        assert_eq!(Role::of(Player::A), Role::Maximizer);
        assert_eq!(Role::of(Player::B).player(), Player::B);
        assert_eq!(Algorithm::AlphaBeta.to_string(), "alpha-beta");
    }
}
