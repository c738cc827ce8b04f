//! Alpha-Beta search
//!
//! Same tree, leaf scoring and move order as [`Minimax`](super::Minimax),
//! with branches cut once `beta <= alpha`. Root score and root move match
//! Minimax exactly; only the node count shrinks.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos};
//! use gomoku::eval::PatternEval;
//! use gomoku::search::{AlphaBeta, Searcher};
//!
//! let mut board = Board::new(15);
//! board.make_move(Pos::new(7, 7)).unwrap();
//!
//! let mut searcher = AlphaBeta::new();
//! let result = searcher.find_best_move(&mut board, 2, Some(&PatternEval::default()));
//! if let Some(best_move) = result.best_move {
//!     println!("Best move: ({}, {})", best_move.row, best_move.col);
//! }
//! assert_eq!(board.stone_count(), 1);
//! ```

use std::time::Instant;

use log::debug;

use crate::board::{Board, Pos, Stone};
use crate::eval::{Heuristic, Score};

use super::{leaf_score, with_move, SearchResult, Searcher};

/// Minimax with alpha-beta pruning.
#[derive(Debug, Clone)]
pub struct AlphaBeta {
    nodes: u64,
    pruned: u64,
    root: Stone,
}

impl AlphaBeta {
    pub fn new() -> Self {
        Self {
            nodes: 0,
            pruned: 0,
            root: Stone::Empty,
        }
    }

    /// Nodes visited by the last search
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Cutoffs taken by the last search
    pub fn pruned(&self) -> u64 {
        self.pruned
    }

    fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
        heuristic: Option<&dyn Heuristic>,
    ) -> (Score, Option<Pos>) {
        self.nodes += 1;

        if depth == 0 || board.is_terminal() {
            return (leaf_score(board, self.root, heuristic), None);
        }

        let moves = board.possible_moves();
        if moves.is_empty() {
            return (0.0, None);
        }

        let mut best_move = None;
        let mut best_score = if maximizing {
            Score::NEG_INFINITY
        } else {
            Score::INFINITY
        };

        for mov in moves {
            let Some((score, _)) = with_move(board, mov, |b| {
                self.alpha_beta(b, depth - 1, alpha, beta, !maximizing, heuristic)
            }) else {
                continue;
            };

            if maximizing {
                if score > best_score || best_move.is_none() {
                    best_score = score;
                    best_move = Some(mov);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score || best_move.is_none() {
                    best_score = score;
                    best_move = Some(mov);
                }
                beta = beta.min(score);
            }

            if beta <= alpha {
                self.pruned += 1;
                break;
            }
        }

        (best_score, best_move)
    }
}

impl Default for AlphaBeta {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher for AlphaBeta {
    fn find_best_move(
        &mut self,
        board: &mut Board,
        depth: u8,
        heuristic: Option<&dyn Heuristic>,
    ) -> SearchResult {
        let start = Instant::now();
        self.nodes = 0;
        self.pruned = 0;
        self.root = board.current_player();

        let (score, best_move) = self.alpha_beta(
            board,
            depth,
            Score::NEG_INFINITY,
            Score::INFINITY,
            true,
            heuristic,
        );
        let elapsed = start.elapsed();

        debug!(
            "alpha-beta depth {} for {:?}: move {:?} score {} ({} nodes, {} cutoffs, {:?})",
            depth, self.root, best_move, score, self.nodes, self.pruned, elapsed
        );

        SearchResult {
            best_move,
            score,
            nodes: self.nodes,
            pruned: self.pruned,
            elapsed,
        }
    }
}
