//! Fixed benchmark positions and search configurations
//!
//! Compares plain and pruned search across heuristics on five positions
//! ranging from the opening to a crowded middle game.

use crate::board::{Board, Pos};
use crate::config::EngineConfig;
use crate::engine::Evaluators;
use crate::error::MoveError;
use crate::eval::Heuristic;
use crate::search::{Algorithm, SearchResult};

/// Named position, given as the move sequence from an empty board
pub struct Scenario {
    pub name: &'static str,
    pub moves: &'static [(u8, u8)],
}

pub const SCENARIOS: [Scenario; 5] = [
    Scenario {
        name: "Center Opening",
        moves: &[(7, 7)],
    },
    Scenario {
        name: "Simple Block",
        moves: &[(7, 7), (6, 6), (7, 8)],
    },
    Scenario {
        name: "Diagonal Threat",
        moves: &[(5, 5), (5, 6), (6, 6), (5, 7), (7, 7)],
    },
    Scenario {
        name: "Split Three",
        moves: &[(7, 7), (2, 2), (7, 8), (2, 3), (7, 10)],
    },
    Scenario {
        name: "Complex Midgame",
        moves: &[
            (7, 7),
            (7, 8),
            (6, 7),
            (6, 6),
            (8, 8),
            (5, 5),
            (8, 6),
            (9, 6),
            (5, 8),
            (4, 9),
            (8, 5),
            (8, 4),
            (9, 5),
            (9, 4),
            (5, 6),
        ],
    },
];

impl Scenario {
    /// Replay the scenario on an empty board built from `config`.
    pub fn board(&self, config: &EngineConfig) -> Result<Board, MoveError> {
        let mut board = config.new_board();
        for &(row, col) in self.moves {
            board.make_move(Pos::new(row, col))?;
        }
        Ok(board)
    }
}

/// Leaf evaluation used by a benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchEval {
    /// Win/loss only
    Blind,
    /// Patterns + center
    Medium,
    /// Weighted patterns + center + freedom
    Hard,
}

/// One search configuration of the benchmark table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    pub name: &'static str,
    pub algorithm: Algorithm,
    pub depth: u8,
    pub eval: BenchEval,
}

pub const CONFIGS: [BenchConfig; 6] = [
    BenchConfig {
        name: "Minimax No-H",
        algorithm: Algorithm::Minimax,
        depth: 2,
        eval: BenchEval::Blind,
    },
    BenchConfig {
        name: "AlphaBeta No-H",
        algorithm: Algorithm::AlphaBeta,
        depth: 3,
        eval: BenchEval::Blind,
    },
    BenchConfig {
        name: "Minimax H1+H2",
        algorithm: Algorithm::Minimax,
        depth: 2,
        eval: BenchEval::Medium,
    },
    BenchConfig {
        name: "Minimax H1+H2+H3",
        algorithm: Algorithm::Minimax,
        depth: 2,
        eval: BenchEval::Hard,
    },
    BenchConfig {
        name: "AlphaBeta H1+H2",
        algorithm: Algorithm::AlphaBeta,
        depth: 3,
        eval: BenchEval::Medium,
    },
    BenchConfig {
        name: "AlphaBeta H1+H2+H3",
        algorithm: Algorithm::AlphaBeta,
        depth: 4,
        eval: BenchEval::Hard,
    },
];

impl BenchConfig {
    /// Search `board` with this configuration.
    pub fn run(&self, board: &mut Board, evaluators: &Evaluators) -> SearchResult {
        let heuristic: Option<&dyn Heuristic> = match self.eval {
            BenchEval::Blind => None,
            BenchEval::Medium => Some(&evaluators.medium),
            BenchEval::Hard => Some(&evaluators.hard),
        };
        self.algorithm.find_best_move(board, self.depth, heuristic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stone;

    #[test]
    fn test_scenarios_replay() {
        let config = EngineConfig::default();
        for scenario in &SCENARIOS {
            let board = scenario.board(&config).unwrap();
            assert_eq!(board.stone_count(), scenario.moves.len());
            assert!(!board.is_terminal(), "{}", scenario.name);
        }
        let midgame = SCENARIOS[4].board(&config).unwrap();
        assert_eq!(midgame.current_player(), Stone::White);
    }

    #[test]
    fn test_blind_configs_agree_at_shared_depth() {
        let config = EngineConfig {
            candidate_radius: 1,
            ..EngineConfig::default()
        };
        let evaluators = Evaluators::from_config(&config);
        let mut board = SCENARIOS[1].board(&config).unwrap();

        let minimax = BenchConfig {
            depth: 2,
            ..CONFIGS[0]
        };
        let alphabeta = BenchConfig {
            depth: 2,
            ..CONFIGS[1]
        };
        let mm = minimax.run(&mut board, &evaluators);
        let ab = alphabeta.run(&mut board, &evaluators);
        assert_eq!(mm.score, ab.score);
        assert_eq!(mm.best_move, ab.best_move);
        assert!(ab.nodes <= mm.nodes);
    }

    #[test]
    fn test_replay_rejects_bad_sequence() {
        let scenario = Scenario {
            name: "Twice",
            moves: &[(7, 7), (7, 7)],
        };
        assert_eq!(
            scenario.board(&EngineConfig::default()).unwrap_err(),
            MoveError::Occupied(Pos::new(7, 7))
        );
    }
}
