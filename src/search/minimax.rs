//! Plain depth-limited Minimax
//!
//! The root maximizes for the player to move; every leaf is scored from
//! that player's side. Nothing is pruned, so the node count is the full
//! tree size and serves as the baseline for Alpha-Beta.

use std::time::Instant;

use log::debug;

use crate::board::{Board, Pos, Stone};
use crate::eval::{Heuristic, Score};

use super::{leaf_score, with_move, SearchResult, Searcher};

/// Exhaustive Minimax searcher.
#[derive(Debug, Clone)]
pub struct Minimax {
    nodes: u64,
    root: Stone,
}

impl Minimax {
    pub fn new() -> Self {
        Self {
            nodes: 0,
            root: Stone::Empty,
        }
    }

    /// Nodes visited by the last search
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        depth: u8,
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
            let Some((score, _)) =
                with_move(board, mov, |b| self.minimax(b, depth - 1, !maximizing, heuristic))
            else {
                continue;
            };

            // Strict comparison: the earliest of equal moves is kept
            let better = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if better || best_move.is_none() {
                best_score = score;
                best_move = Some(mov);
            }
        }

        (best_score, best_move)
    }
}

impl Default for Minimax {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher for Minimax {
    fn find_best_move(
        &mut self,
        board: &mut Board,
        depth: u8,
        heuristic: Option<&dyn Heuristic>,
    ) -> SearchResult {
        let start = Instant::now();
        self.nodes = 0;
        self.root = board.current_player();

        let (score, best_move) = self.minimax(board, depth, true, heuristic);
        let elapsed = start.elapsed();

        debug!(
            "minimax depth {} for {:?}: move {:?} score {} ({} nodes, {:?})",
            depth, self.root, best_move, score, self.nodes, elapsed
        );

        SearchResult {
            best_move,
            score,
            nodes: self.nodes,
            pruned: 0,
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CandidateRule;
    use crate::eval::PatternEval;
    use crate::search::WIN_SCORE;

    fn narrow(mut board: Board) -> Board {
        board.set_candidate_rule(CandidateRule {
            radius: 1,
            order_by_center: true,
        });
        board
    }

    #[test]
    fn test_empty_board_plays_center() {
        let mut board = Board::new(15);
        let result = Minimax::new().find_best_move(&mut board, 1, Some(&PatternEval::default()));
        assert_eq!(result.best_move, Some(Pos::new(7, 7)));
        // Root plus the single center child
        assert_eq!(result.nodes, 2);
        assert_eq!(board.stone_count(), 0);
    }

    #[test]
    fn test_node_count_is_full_tree() {
        let mut board = narrow(Board::new(9));
        board.make_move(Pos::new(4, 4)).unwrap();
        // White sees the 8 neighbours of the center stone
        let result = Minimax::new().find_best_move(&mut board, 1, None);
        assert_eq!(result.nodes, 1 + 8);
        assert_eq!(result.pruned, 0);
    }

    #[test]
    fn test_takes_immediate_win() {
        let mut board = narrow(
            Board::from_rows(&[
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
            .unwrap(),
        );
        assert_eq!(board.current_player(), Stone::Black);

        let result = Minimax::new().find_best_move(&mut board, 1, None);
        assert_eq!(result.score, WIN_SCORE);
        let win = result.best_move.unwrap();
        assert!(win == Pos::new(2, 1) || win == Pos::new(2, 6));
    }

    #[test]
    fn test_blocks_four_with_lookahead() {
        // White to move; only (2, 5) stops Black's five
        let mut board = narrow(
            Board::from_rows(&[
                ".........",
                ".........",
                "OXXXX....",
                ".........",
                "..OO.....",
                ".........",
                ".........",
                ".........",
                ".........",
            ])
            .unwrap(),
        );
        assert_eq!(board.current_player(), Stone::White);

        let result = Minimax::new().find_best_move(&mut board, 2, None);
        assert_eq!(result.best_move, Some(Pos::new(2, 5)));
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_board_restored_after_search() {
        let mut board = Board::new(9);
        board.make_move(Pos::new(4, 4)).unwrap();
        board.make_move(Pos::new(3, 3)).unwrap();
        let before = board.clone();

        Minimax::new().find_best_move(&mut board, 2, Some(&PatternEval::default()));

        assert_eq!(board.grid(), before.grid());
        assert_eq!(board.current_player(), before.current_player());
        assert_eq!(board.last_move(), Some(Pos::new(3, 3)));
    }

    #[test]
    fn test_terminal_root_has_no_move() {
        let mut board = Board::new(15);
        for i in 0..4 {
            board.make_move(Pos::new(0, i)).unwrap();
            board.make_move(Pos::new(5, i)).unwrap();
        }
        board.make_move(Pos::new(0, 4)).unwrap();

        let result = Minimax::new().find_best_move(&mut board, 3, None);
        assert_eq!(result.best_move, None);
        assert_eq!(result.nodes, 1);
        // White to move, Black already won
        assert_eq!(result.score, -WIN_SCORE);
    }
}
