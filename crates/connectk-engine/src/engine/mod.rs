//! Authoritative game progression.
//!
//! - [`GameSession`] - the single real game: one [`GridState`](crate::GridState)
//!   mutated once per turn, with the outcome recorded once the game ends
//! - [`GameStats`] - per-turn instrumentation (states visited, thinking time)
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] with the grid dimensions and `k`
//! 2. Ask the player to move for a column
//! 3. Apply it with [`GameSession::play`]
//! 4. Repeat until [`GameSession::outcome`] is set
//!
//! # Example
//!
//! ```
//! use connectk_engine::{Column, GameOutcome, GameSession, Player};
//!
//! let mut session = GameSession::new(7, 6, 4, None).unwrap();
//! for number in [1, 2, 1, 2, 1, 2, 1] {
//!     session.play(Column::new(number).unwrap()).unwrap();
//! }
//! assert_eq!(session.outcome(), Some(GameOutcome::Win(Player::A)));
//! ```

pub use self::{game_session::*, game_stats::*};

mod game_session;
mod game_stats;
