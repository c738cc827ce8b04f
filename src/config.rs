use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::board::{Board, CandidateRule, DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};
use crate::error::ConfigError;
use crate::eval::heuristic::{DEFAULT_FREEDOM_BONUS, DEFAULT_OPPONENT_WEIGHT};
use crate::eval::Score;

/// Engine tunables, loadable from TOML. Missing keys take their defaults.
///
/// ```
/// use gomoku::EngineConfig;
///
/// let config = EngineConfig::from_toml_str("hard_depth = 2").unwrap();
/// assert_eq!(config.hard_depth, 2);
/// assert_eq!(config.board_size, 15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub board_size: usize,
    /// Chebyshev radius around stones for candidate moves
    pub candidate_radius: usize,
    /// Try central candidates first
    pub order_by_center: bool,
    /// Multiplier on opponent stones in the center-distance score
    pub opponent_center_weight: Score,
    /// Bonus per open neighbour in the freedom score
    pub freedom_bonus: Score,
    /// Weight of the pattern score in the hard tier
    pub hard_pattern_weight: Score,
    /// Chance that the easy tier plays a random candidate
    pub blunder_probability: f64,
    pub easy_depth: u8,
    pub medium_depth: u8,
    pub hard_depth: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            board_size: DEFAULT_SIZE,
            candidate_radius: 2,
            order_by_center: true,
            opponent_center_weight: DEFAULT_OPPONENT_WEIGHT,
            freedom_bonus: DEFAULT_FREEDOM_BONUS,
            hard_pattern_weight: 1.5,
            blunder_probability: 0.3,
            easy_depth: 1,
            medium_depth: 3,
            hard_depth: 4,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.board_size) {
            return Err(ConfigError::Validation(format!(
                "board_size must be in [{MIN_SIZE}, {MAX_SIZE}]"
            )));
        }
        if self.candidate_radius == 0 {
            return Err(ConfigError::Validation(
                "candidate_radius must be >= 1".into(),
            ));
        }
        if self.easy_depth == 0 || self.medium_depth == 0 || self.hard_depth == 0 {
            return Err(ConfigError::Validation(
                "search depths must be >= 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.blunder_probability) {
            return Err(ConfigError::Validation(
                "blunder_probability must be in [0, 1]".into(),
            ));
        }
        if self.opponent_center_weight.is_nan() || self.opponent_center_weight < 1.0 {
            return Err(ConfigError::Validation(
                "opponent_center_weight must be >= 1".into(),
            ));
        }
        if self.freedom_bonus.is_nan() || self.freedom_bonus < 0.0 {
            return Err(ConfigError::Validation(
                "freedom_bonus must be >= 0".into(),
            ));
        }
        if self.hard_pattern_weight.is_nan() || self.hard_pattern_weight < 0.0 {
            return Err(ConfigError::Validation(
                "hard_pattern_weight must be >= 0".into(),
            ));
        }
        Ok(())
    }

    /// Candidate generation rule for boards built from this config
    pub fn candidate_rule(&self) -> CandidateRule {
        CandidateRule {
            radius: self.candidate_radius,
            order_by_center: self.order_by_center,
        }
    }

    /// Empty board with the configured size and candidate rule
    pub fn new_board(&self) -> Board {
        Board::with_rule(self.board_size, self.candidate_rule())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.candidate_rule(), CandidateRule::default());

        let board = config.new_board();
        assert_eq!(board.size(), 15);
        assert_eq!(board.candidate_rule(), CandidateRule::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            "board_size = 9\nblunder_probability = 0.0\nopponent_center_weight = 1.2\n",
        )
        .unwrap();
        assert_eq!(config.board_size, 9);
        assert_eq!(config.blunder_probability, 0.0);
        assert_eq!(config.opponent_center_weight, 1.2);
        assert_eq!(config.medium_depth, 3);
        assert_eq!(config.freedom_bonus, 5.0);
    }

    #[test]
    fn test_serialized_config_parses_back() {
        let mut config = EngineConfig::default();
        config.hard_depth = 2;
        config.order_by_center = false;
        let text = toml::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_validation_failures() {
        let cases = [
            "board_size = 4",
            "board_size = 65",
            "candidate_radius = 0",
            "medium_depth = 0",
            "blunder_probability = 1.5",
            "blunder_probability = -0.1",
            "opponent_center_weight = 0.5",
            "freedom_bonus = -1.0",
            "hard_pattern_weight = nan",
        ];
        for case in cases {
            match EngineConfig::from_toml_str(case) {
                Err(ConfigError::Validation(_)) => {}
                other => panic!("{case}: expected validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            EngineConfig::from_toml_str("board_size = \"big\""),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/nonexistent/gomoku.toml");
        assert!(matches!(
            EngineConfig::load(path),
            Err(ConfigError::FileRead { .. })
        ));
        assert_eq!(
            EngineConfig::load_or_default(path).unwrap(),
            EngineConfig::default()
        );
    }
}
