//! Position evaluation and move selection for connect-k games.
//!
//! This crate implements a three-level architecture:
//!
//! 1. **State Evaluation** ([`state_evaluator`]) - Scores a non-terminal grid from the
//!    point of view of [`Player::A`](connectk_engine::Player::A) (the maximizer).
//!
//! 2. **Search** ([`search_engine`]) - Explores the move tree to a bounded depth with
//!    Minimax or Alpha-Beta and backs the scores up to pick a column.
//!
//! 3. **Agents** ([`agent`]) - The single "pick a column" contract consumed by the game
//!    loop, backed by a search engine, a random choice, or a human at a terminal.
//!
//! # Architecture
//!
//! ```text
//! Agent (select_target)
//!     ↓ uses
//! SearchEngine (Minimax / Alpha-Beta over successor states)
//!     ↓ uses
//! StateEvaluator (score a position at the depth limit)
//! ```
//!
//! Terminal positions never reach the state evaluator: the search scores them itself
//! with `+∞` (A won), `−∞` (B won) or `0` (draw), keeping the terminal signal distinct
//! from any finite heuristic value.
//!
//! # Example
//!
//! ```
//! use connectk_engine::GridState;
//! use connectk_evaluator::search_engine::{Algorithm, Role, SearchConfig, SearchEngine};
//!
//! let config = SearchConfig {
//!     max_depth: 3,
//!     algorithm: Algorithm::AlphaBeta,
//!     role: Role::Maximizer,
//! };
//! let mut engine = SearchEngine::new(config).unwrap();
//!
//! let state = GridState::new(7, 6, 4).unwrap();
//! let column = engine.select_target(&state).unwrap();
//! assert!((1..=7).contains(&column.number()));
//! ```

pub mod agent;
pub mod search_engine;
pub mod state_evaluator;
