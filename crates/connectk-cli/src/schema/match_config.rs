use serde::{Deserialize, Serialize};

/// What sits in a seat of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SeatKind {
    /// Columns typed at the terminal
    Human,
    /// Columns typed at the terminal, with the engine's suggestion shown first
    Assisted,
    /// Plain Minimax search
    Minimax,
    /// Minimax search with alpha-beta pruning
    AlphaBeta,
    /// Uniformly random legal columns
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SeatConfig {
    pub kind: SeatKind,
    pub name: String,
    /// Search depth of engine seats and of the advisor of assisted seats.
    #[serde(default = "SeatConfig::default_max_depth")]
    pub max_depth: u32,
    /// Seed of random seats; drawn from the OS when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SeatConfig {
    pub const DEFAULT_MAX_DEPTH: u32 = 5;

    fn default_max_depth() -> u32 {
        Self::DEFAULT_MAX_DEPTH
    }
}

/// A match as described by a JSON file given with `--config`.
///
/// ```json
/// {
///   "width": 7,
///   "height": 6,
///   "k": 4,
///   "seats": [
///     { "kind": "human", "name": "Alice" },
///     { "kind": "alpha-beta", "name": "Bot", "max-depth": 6 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MatchConfig {
    #[serde(default = "MatchConfig::default_width")]
    pub width: usize,
    #[serde(default = "MatchConfig::default_height")]
    pub height: usize,
    #[serde(default = "MatchConfig::default_k")]
    pub k: usize,
    /// Stop the game after this many moves.
    #[serde(default)]
    pub move_limit: Option<usize>,
    /// First (X) and second (O) seat.
    pub seats: [SeatConfig; 2],
}

impl MatchConfig {
    pub const DEFAULT_WIDTH: usize = 7;
    pub const DEFAULT_HEIGHT: usize = 6;
    pub const DEFAULT_K: usize = 4;

    fn default_width() -> usize {
        Self::DEFAULT_WIDTH
    }

    fn default_height() -> usize {
        Self::DEFAULT_HEIGHT
    }

    fn default_k() -> usize {
        Self::DEFAULT_K
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_defaults() {
        let config: MatchConfig = serde_json::from_str(
            r#"{
                "k": 3,
                "seats": [
                    { "kind": "assisted", "name": "Alice" },
                    { "kind": "random", "name": "Dice", "seed": 42 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.width, MatchConfig::DEFAULT_WIDTH);
        assert_eq!(config.height, MatchConfig::DEFAULT_HEIGHT);
        assert_eq!(config.k, 3);
        assert_eq!(config.move_limit, None);
        assert_eq!(config.seats[0].kind, SeatKind::Assisted);
        assert_eq!(config.seats[0].max_depth, SeatConfig::DEFAULT_MAX_DEPTH);
        assert_eq!(config.seats[1].seed, Some(42));
    }

    #[test]
    fn test_parse_engine_seat() {
        let seat: SeatConfig = serde_json::from_str(
            r#"{ "kind": "alpha-beta", "name": "Bot", "max-depth": 7 }"#,
        )
        .unwrap();
        assert_eq!(seat.kind, SeatKind::AlphaBeta);
        assert_eq!(seat.max_depth, 7);
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let result = serde_json::from_str::<SeatConfig>(r#"{ "kind": "oracle", "name": "?" }"#);
        assert!(result.is_err());
    }
}
