//! Search module for the Gomoku AI
//!
//! Contains:
//! - Plain Minimax over the candidate moves
//! - Alpha-Beta, the same search with branch pruning
//!
//! Both mutate the board in place through `make_move`/`undo_move` and leave
//! it exactly as they found it. For identical inputs they return the same
//! score and, because ties keep the earliest candidate, the same move.

pub mod alphabeta;
pub mod minimax;

use std::fmt;
use std::time::Duration;

use crate::board::{Board, Pos, Stone};
use crate::eval::{Heuristic, Score};

pub use alphabeta::AlphaBeta;
pub use minimax::Minimax;

/// Score of a won game when searching without a heuristic
pub const WIN_SCORE: Score = 1_000_000.0;

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Evaluation score of the best move, from the root player's side
    pub score: Score,
    /// Total nodes visited, root included
    pub nodes: u64,
    /// Number of alpha-beta cutoffs (always 0 for Minimax)
    pub pruned: u64,
    /// Wall-clock time spent searching
    pub elapsed: Duration,
}

/// A depth-limited game-tree search.
pub trait Searcher {
    /// Find the best move for the player to move on `board`.
    ///
    /// `heuristic` scores leaves from the root player's side; with `None`
    /// only wins and losses are told apart. The board is restored before
    /// returning.
    fn find_best_move(
        &mut self,
        board: &mut Board,
        depth: u8,
        heuristic: Option<&dyn Heuristic>,
    ) -> SearchResult;
}

/// Search algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Minimax,
    AlphaBeta,
}

impl Algorithm {
    /// Run a fresh search of this kind.
    pub fn find_best_move(
        self,
        board: &mut Board,
        depth: u8,
        heuristic: Option<&dyn Heuristic>,
    ) -> SearchResult {
        match self {
            Algorithm::Minimax => Minimax::new().find_best_move(board, depth, heuristic),
            Algorithm::AlphaBeta => AlphaBeta::new().find_best_move(board, depth, heuristic),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Minimax => write!(f, "Minimax"),
            Algorithm::AlphaBeta => write!(f, "AlphaBeta"),
        }
    }
}

/// Leaf value from `root`'s side.
///
/// Without a heuristic: `WIN_SCORE` if the last move won for `root`, its
/// negation if it won for the opponent, 0 otherwise (draw or depth limit).
pub(crate) fn leaf_score(board: &Board, root: Stone, heuristic: Option<&dyn Heuristic>) -> Score {
    match heuristic {
        Some(h) => h.score(board.grid(), root),
        None => match board.winner() {
            Some(winner) if winner == root => WIN_SCORE,
            Some(_) => -WIN_SCORE,
            None => 0.0,
        },
    }
}

/// Play `mov`, run `f` on the resulting board, take the move back.
///
/// Candidates come from `possible_moves`, so `make_move` cannot reject
/// them; a rejected move yields `None` and is skipped by the caller.
pub(crate) fn with_move<T>(
    board: &mut Board,
    mov: Pos,
    f: impl FnOnce(&mut Board) -> T,
) -> Option<T> {
    board.make_move(mov).ok()?;
    let out = f(board);
    let undone = board.undo_move(mov);
    debug_assert!(undone.is_ok(), "failed to undo {mov}");
    Some(out)
}
