//! Main AI engine binding difficulty tiers to search components
//!
//! Every [`Mode`] resolves to one search recipe:
//!
//! | Mode               | Search      | Depth | Evaluation              |
//! |--------------------|-------------|-------|-------------------------|
//! | `easy`             | Minimax     | 1     | patterns, with blunders |
//! | `medium`           | Alpha-Beta  | 3     | patterns + center       |
//! | `hard`             | Alpha-Beta  | 4     | 1.5·patterns + center + freedom |
//! | `greedy-pattern`   | one ply     | 1     | patterns                |
//! | `greedy-center`    | one ply     | 1     | center                  |
//! | `minimax-basic`    | Minimax     | 1     | win/loss only           |
//! | `alphabeta-basic`  | Alpha-Beta  | 1     | win/loss only           |
//! | `minimax-center`   | Minimax     | 1     | center                  |
//! | `alphabeta-pattern`| Alpha-Beta  | 1     | patterns                |
//!
//! Tier depths and weights come from [`EngineConfig`].
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, EngineConfig, Mode, Pos};
//!
//! let config = EngineConfig {
//!     blunder_probability: 0.0,
//!     ..EngineConfig::default()
//! };
//! let mut engine = AIEngine::with_seed(config.clone(), 7);
//! let mut board = config.new_board();
//!
//! let result = engine.get_move_with_stats(&mut board, Mode::Easy);
//! assert_eq!(result.best_move, Some(Pos::new(7, 7)));
//! println!("Search type: {:?}, nodes: {}", result.search_type, result.nodes);
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use log::info;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Pos};
use crate::config::EngineConfig;
use crate::error::ModeError;
use crate::eval::{CenterDistance, Freedom, Heuristic, PatternEval, Score, Weighted};
use crate::search::{with_move, Algorithm, SearchResult};

/// Named engine behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Easy,
    Medium,
    Hard,
    GreedyPattern,
    GreedyCenter,
    MinimaxBasic,
    AlphaBetaBasic,
    MinimaxCenter,
    AlphaBetaPattern,
}

impl Mode {
    pub const ALL: [Mode; 9] = [
        Mode::Easy,
        Mode::Medium,
        Mode::Hard,
        Mode::GreedyPattern,
        Mode::GreedyCenter,
        Mode::MinimaxBasic,
        Mode::AlphaBetaBasic,
        Mode::MinimaxCenter,
        Mode::AlphaBetaPattern,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Easy => "easy",
            Mode::Medium => "medium",
            Mode::Hard => "hard",
            Mode::GreedyPattern => "greedy-pattern",
            Mode::GreedyCenter => "greedy-center",
            Mode::MinimaxBasic => "minimax-basic",
            Mode::AlphaBetaBasic => "alphabeta-basic",
            Mode::MinimaxCenter => "minimax-center",
            Mode::AlphaBetaPattern => "alphabeta-pattern",
        }
    }

    /// Mode key used by saved games and older front ends
    pub fn legacy_key(self) -> &'static str {
        match self {
            Mode::Easy => "Minimax_H1",
            Mode::Medium => "AlphaBeta_H2",
            Mode::Hard => "AlphaBeta_Combined",
            Mode::GreedyPattern => "Heuristic_1_Only",
            Mode::GreedyCenter => "Heuristic_2_Only",
            Mode::MinimaxBasic => "Minimax_Basic",
            Mode::AlphaBetaBasic => "AlphaBeta_Basic",
            Mode::MinimaxCenter => "Minimax_H2",
            Mode::AlphaBetaPattern => "AlphaBeta_H1",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = ModeError;

    /// Accepts friendly names (any case, `-` or `_`) and legacy keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        let friendly = key.replace('_', "-");
        Mode::ALL
            .into_iter()
            .find(|m| m.legacy_key() == key || m.name().eq_ignore_ascii_case(&friendly))
            .ok_or_else(|| ModeError::Unknown(s.to_string()))
    }
}

/// Type of search that produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Random candidate played by the easy tier
    Blunder,
    /// One-ply greedy choice
    Greedy,
    Minimax,
    AlphaBeta,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Evaluation score from the mover's side
    pub score: Score,
    /// Type of search that found this move
    pub search_type: SearchType,
    /// Number of nodes searched
    pub nodes: u64,
    /// Alpha-beta cutoffs
    pub pruned: u64,
    pub elapsed: Duration,
}

impl MoveResult {
    #[inline]
    fn blunder(pos: Pos) -> Self {
        Self {
            best_move: Some(pos),
            score: 0.0,
            search_type: SearchType::Blunder,
            nodes: 0,
            pruned: 0,
            elapsed: Duration::ZERO,
        }
    }

    #[inline]
    fn from_search(result: SearchResult, algorithm: Algorithm) -> Self {
        let search_type = match algorithm {
            Algorithm::Minimax => SearchType::Minimax,
            Algorithm::AlphaBeta => SearchType::AlphaBeta,
        };
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type,
            nodes: result.nodes,
            pruned: result.pruned,
            elapsed: result.elapsed,
        }
    }
}

/// Evaluators used by the modes, built once from a config.
#[derive(Debug)]
pub struct Evaluators {
    /// Line patterns
    pub pattern: PatternEval,
    /// Center distance
    pub center: CenterDistance,
    /// Patterns + center
    pub medium: Weighted,
    /// Weighted patterns + center + freedom
    pub hard: Weighted,
}

impl Evaluators {
    pub fn from_config(config: &EngineConfig) -> Self {
        let center = CenterDistance {
            opponent_weight: config.opponent_center_weight,
        };
        let freedom = Freedom {
            bonus: config.freedom_bonus,
        };
        Self {
            pattern: PatternEval::default(),
            center,
            medium: Weighted::new()
                .with(1.0, PatternEval::default())
                .with(1.0, center),
            hard: Weighted::new()
                .with(config.hard_pattern_weight, PatternEval::default())
                .with(1.0, center)
                .with(1.0, freedom),
        }
    }
}

/// Main AI engine for Gomoku.
///
/// Owns the configuration, the evaluators and the random source used by
/// the easy tier's blunders and the greedy modes' tie shuffling. Seeding
/// the engine makes every move reproducible.
pub struct AIEngine<R = SmallRng> {
    config: EngineConfig,
    evaluators: Evaluators,
    rng: R,
}

impl AIEngine<SmallRng> {
    /// Engine seeded from system entropy.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Engine with a fixed seed.
    #[must_use]
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl Default for AIEngine<SmallRng> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<R: Rng> AIEngine<R> {
    /// Engine drawing randomness from `rng`.
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        Self {
            evaluators: Evaluators::from_config(&config),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn evaluators(&self) -> &Evaluators {
        &self.evaluators
    }

    /// Get the best move for the player to move.
    ///
    /// Convenience wrapper around [`get_move_with_stats`](Self::get_move_with_stats).
    pub fn get_move(&mut self, board: &mut Board, mode: Mode) -> Option<Pos> {
        self.get_move_with_stats(board, mode).best_move
    }

    /// Get the best move for the player to move, with search statistics.
    ///
    /// The board is searched in place and restored before returning.
    pub fn get_move_with_stats(&mut self, board: &mut Board, mode: Mode) -> MoveResult {
        let start = Instant::now();
        let ev = &self.evaluators;
        let config = &self.config;

        let mut result = match mode {
            Mode::Easy => {
                let blunder = if self.rng.gen::<f64>() < config.blunder_probability {
                    board.possible_moves().choose(&mut self.rng).copied()
                } else {
                    None
                };
                match blunder {
                    Some(pos) => {
                        info!("{mode}: blunder at {pos}");
                        MoveResult::blunder(pos)
                    }
                    None => search(board, Algorithm::Minimax, config.easy_depth, Some(&ev.pattern)),
                }
            }
            Mode::Medium => {
                search(board, Algorithm::AlphaBeta, config.medium_depth, Some(&ev.medium))
            }
            Mode::Hard => search(board, Algorithm::AlphaBeta, config.hard_depth, Some(&ev.hard)),
            Mode::GreedyPattern => greedy(board, &ev.pattern, &mut self.rng),
            Mode::GreedyCenter => greedy(board, &ev.center, &mut self.rng),
            Mode::MinimaxBasic => search(board, Algorithm::Minimax, 1, None),
            Mode::AlphaBetaBasic => search(board, Algorithm::AlphaBeta, 1, None),
            Mode::MinimaxCenter => search(board, Algorithm::Minimax, 1, Some(&ev.center)),
            Mode::AlphaBetaPattern => {
                search(board, Algorithm::AlphaBeta, 1, Some(&ev.pattern))
            }
        };
        result.elapsed = start.elapsed();

        match result.best_move {
            Some(pos) => info!(
                "{}: {:?} plays {} (score {}, {} nodes, {} pruned, {:.3}s)",
                mode,
                result.search_type,
                pos,
                result.score,
                result.nodes,
                result.pruned,
                result.elapsed.as_secs_f64()
            ),
            None => info!("{mode}: no move available"),
        }

        result
    }
}

fn search(
    board: &mut Board,
    algorithm: Algorithm,
    depth: u8,
    heuristic: Option<&dyn Heuristic>,
) -> MoveResult {
    MoveResult::from_search(algorithm.find_best_move(board, depth, heuristic), algorithm)
}

/// One-ply greedy choice: shuffle the candidates, score each resulting
/// position for the mover, keep the strictly best.
fn greedy<R: Rng + ?Sized>(board: &mut Board, heuristic: &dyn Heuristic, rng: &mut R) -> MoveResult {
    let mover = board.current_player();
    let mut moves = board.possible_moves();
    moves.shuffle(rng);

    let mut best_move = None;
    let mut best_score = Score::NEG_INFINITY;
    let mut nodes = 0;

    for mov in moves {
        let Some(score) = with_move(board, mov, |b| heuristic.score(b.grid(), mover)) else {
            continue;
        };
        nodes += 1;
        if score > best_score || best_move.is_none() {
            best_score = score;
            best_move = Some(mov);
        }
    }

    MoveResult {
        best_move,
        score: if best_move.is_some() { best_score } else { 0.0 },
        search_type: SearchType::Greedy,
        nodes,
        pruned: 0,
        elapsed: Duration::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stone;
    use crate::eval::position_value;

    fn config_without_blunders() -> EngineConfig {
        EngineConfig {
            blunder_probability: 0.0,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_mode_from_friendly_names() {
        assert_eq!("easy".parse::<Mode>().unwrap(), Mode::Easy);
        assert_eq!("HARD".parse::<Mode>().unwrap(), Mode::Hard);
        assert_eq!("greedy_center".parse::<Mode>().unwrap(), Mode::GreedyCenter);
        assert_eq!(" alphabeta-pattern ".parse::<Mode>().unwrap(), Mode::AlphaBetaPattern);
    }

    #[test]
    fn test_mode_from_legacy_keys() {
        assert_eq!("Minimax_H1".parse::<Mode>().unwrap(), Mode::Easy);
        assert_eq!("AlphaBeta_H2".parse::<Mode>().unwrap(), Mode::Medium);
        assert_eq!("AlphaBeta_Combined".parse::<Mode>().unwrap(), Mode::Hard);
        assert_eq!("Heuristic_1_Only".parse::<Mode>().unwrap(), Mode::GreedyPattern);
        assert_eq!("Heuristic_2_Only".parse::<Mode>().unwrap(), Mode::GreedyCenter);
        assert_eq!("Minimax_Basic".parse::<Mode>().unwrap(), Mode::MinimaxBasic);
        assert_eq!("AlphaBeta_Basic".parse::<Mode>().unwrap(), Mode::AlphaBetaBasic);
        assert_eq!("Minimax_H2".parse::<Mode>().unwrap(), Mode::MinimaxCenter);
        assert_eq!("AlphaBeta_H1".parse::<Mode>().unwrap(), Mode::AlphaBetaPattern);
    }

    #[test]
    fn test_mode_names_parse_back() {
        for mode in Mode::ALL {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_unknown_mode() {
        assert_eq!(
            "impossible".parse::<Mode>(),
            Err(ModeError::Unknown("impossible".to_string()))
        );
    }

    #[test]
    fn test_easy_opens_in_center() {
        let config = config_without_blunders();
        let mut engine = AIEngine::with_seed(config.clone(), 1);
        let mut board = config.new_board();

        let result = engine.get_move_with_stats(&mut board, Mode::Easy);
        assert_eq!(result.best_move, Some(Pos::new(7, 7)));
        assert_eq!(result.search_type, SearchType::Minimax);
        assert_eq!(result.nodes, 2);
        assert_eq!(board.stone_count(), 0);
    }

    #[test]
    fn test_hard_blocks_open_four_end() {
        let config = config_without_blunders();
        let mut board = config.new_board();
        for (r, c) in [
            (7, 7),
            (9, 9),
            (7, 8),
            (9, 11),
            (7, 9),
            (5, 7),
            (7, 10),
        ] {
            board.make_move(Pos::new(r, c)).unwrap();
        }
        // Black holds an open four on row 7
        assert_eq!(board.current_player(), Stone::White);

        let mut engine = AIEngine::with_seed(config, 1);
        let result = engine.get_move_with_stats(&mut board, Mode::Hard);
        let block = result.best_move.unwrap();
        assert!(block == Pos::new(7, 6) || block == Pos::new(7, 11));
        assert_eq!(result.search_type, SearchType::AlphaBeta);
        assert!(result.pruned > 0);
        assert_eq!(board.stone_count(), 7);
    }

    #[test]
    fn test_basic_mode_on_last_cell_is_draw() {
        let mut board = Board::from_rows(&[
            "XXOOX",
            "OOXXO",
            "XXOOX",
            "OOXXO",
            "XXOO.",
        ])
        .unwrap();
        let mut engine = AIEngine::with_seed(EngineConfig::default(), 1);
        for mode in [Mode::MinimaxBasic, Mode::AlphaBetaBasic] {
            let result = engine.get_move_with_stats(&mut board, mode);
            assert_eq!(result.best_move, Some(Pos::new(4, 4)));
            assert_eq!(result.score, 0.0);
        }
    }

    #[test]
    fn test_blunder_always_fires_at_probability_one() {
        let config = EngineConfig {
            blunder_probability: 1.0,
            ..EngineConfig::default()
        };
        let mut board = config.new_board();
        board.make_move(Pos::new(7, 7)).unwrap();
        let candidates = board.possible_moves();

        let mut engine = AIEngine::with_seed(config, 11);
        for _ in 0..20 {
            let result = engine.get_move_with_stats(&mut board, Mode::Easy);
            assert_eq!(result.search_type, SearchType::Blunder);
            assert_eq!(result.nodes, 0);
            assert!(candidates.contains(&result.best_move.unwrap()));
        }
    }

    #[test]
    fn test_blunder_never_fires_at_probability_zero() {
        let config = config_without_blunders();
        let mut board = config.new_board();
        board.make_move(Pos::new(7, 7)).unwrap();

        let mut engine = AIEngine::with_seed(config, 11);
        let first = engine.get_move(&mut board, Mode::Easy);
        for _ in 0..10 {
            let result = engine.get_move_with_stats(&mut board, Mode::Easy);
            assert_eq!(result.search_type, SearchType::Minimax);
            assert_eq!(result.best_move, first);
        }
    }

    #[test]
    fn test_same_seed_same_moves() {
        let config = EngineConfig {
            blunder_probability: 0.5,
            ..EngineConfig::default()
        };
        let mut board = config.new_board();
        board.make_move(Pos::new(7, 7)).unwrap();
        board.make_move(Pos::new(6, 8)).unwrap();

        let mut a = AIEngine::with_seed(config.clone(), 2024);
        let mut b = AIEngine::with_seed(config, 2024);
        let mut kinds = Vec::new();
        for _ in 0..30 {
            let ra = a.get_move_with_stats(&mut board, Mode::Easy);
            let rb = b.get_move_with_stats(&mut board, Mode::Easy);
            assert_eq!(ra.best_move, rb.best_move);
            assert_eq!(ra.search_type, rb.search_type);
            kinds.push(ra.search_type);
        }
        assert!(kinds.contains(&SearchType::Blunder));
        assert!(kinds.contains(&SearchType::Minimax));
    }

    #[test]
    fn test_greedy_pattern_takes_win() {
        let mut board = Board::from_rows(&[
            ".........",
            ".........",
            "..XXXX...",
            ".........",
            "..OOO....",
            "......O..",
            ".........",
            ".........",
            ".........",
        ])
        .unwrap();
        let mut engine = AIEngine::with_seed(EngineConfig::default(), 3);
        let result = engine.get_move_with_stats(&mut board, Mode::GreedyPattern);
        let win = result.best_move.unwrap();
        assert!(win == Pos::new(2, 1) || win == Pos::new(2, 6));
        assert_eq!(result.search_type, SearchType::Greedy);
        assert_eq!(result.nodes, board.possible_moves().len() as u64);
    }

    #[test]
    fn test_greedy_center_hugs_center() {
        let config = EngineConfig::default();
        let mut board = config.new_board();
        board.make_move(Pos::new(7, 7)).unwrap();

        for seed in 0..5 {
            let mut engine = AIEngine::with_seed(config.clone(), seed);
            let pos = engine.get_move(&mut board, Mode::GreedyCenter).unwrap();
            assert_eq!(position_value(pos, 15), 130.0);
        }
    }

    #[test]
    fn test_evaluators_follow_config() {
        let config = EngineConfig {
            opponent_center_weight: 1.2,
            ..EngineConfig::default()
        };
        let engine = AIEngine::with_seed(config, 0);
        assert_eq!(engine.evaluators().center.opponent_weight, 1.2);
        assert_eq!(engine.evaluators().medium.len(), 2);
        assert_eq!(engine.evaluators().hard.len(), 3);
    }

    #[test]
    fn test_engine_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<AIEngine>();
    }
}
