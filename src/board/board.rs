//! Board structure with turn and history tracking

use std::fmt;

use super::grid::Grid;
use super::{Pos, Stone, DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};
use crate::error::{BoardError, MoveError};
use crate::rules::check_winner;

/// How candidate moves are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateRule {
    /// Chebyshev radius around existing stones
    pub radius: usize,
    /// Sort candidates by distance to the center (closest first)
    pub order_by_center: bool,
}

impl Default for CandidateRule {
    fn default() -> Self {
        Self {
            radius: 2,
            order_by_center: true,
        }
    }
}

/// Game board: grid, side to move and placement history.
///
/// The search mutates a single `Board` in place through `make_move` and
/// `undo_move`; it is never cloned per node.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    current: Stone,
    /// Placements in order; the last entry is the last move
    history: Vec<Pos>,
    rule: CandidateRule,
}

impl Board {
    /// Empty board of side `size` with Black to move.
    pub fn new(size: usize) -> Self {
        Self::with_rule(size, CandidateRule::default())
    }

    pub fn with_rule(size: usize, rule: CandidateRule) -> Self {
        Self {
            grid: Grid::new(size),
            current: Stone::Black,
            history: Vec::with_capacity(size * size),
            rule,
        }
    }

    /// Parse a text position, one string per row.
    ///
    /// `X`/`x` is Black, `O`/`o` is White, `.` is empty; whitespace is
    /// ignored. The side to move follows from the stone counts (Black
    /// moves first). The parsed board has no last move.
    ///
    /// ```
    /// use gomoku::{Board, Stone};
    ///
    /// let board = Board::from_rows(&[
    ///     ".....",
    ///     ".X...",
    ///     "..O..",
    ///     ".....",
    ///     "...X.",
    /// ])
    /// .unwrap();
    /// assert_eq!(board.current_player(), Stone::White);
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        let size = rows.len();
        if size < MIN_SIZE {
            return Err(BoardError::TooSmall { size, min: MIN_SIZE });
        }
        if size > MAX_SIZE {
            return Err(BoardError::TooLarge { size, max: MAX_SIZE });
        }

        let mut board = Board::new(size);
        let (mut black, mut white) = (0usize, 0usize);

        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != size {
                return Err(BoardError::NotSquare {
                    row,
                    len: symbols.len(),
                    size,
                });
            }
            for (col, ch) in symbols.into_iter().enumerate() {
                let stone = Stone::from_symbol(ch).ok_or(BoardError::BadCell { ch, row, col })?;
                match stone {
                    Stone::Black => black += 1,
                    Stone::White => white += 1,
                    Stone::Empty => continue,
                }
                #[allow(clippy::cast_possible_truncation)]
                board.grid.set(Pos::new(row as u8, col as u8), stone);
            }
        }

        board.current = if black == white {
            Stone::Black
        } else if black == white + 1 {
            Stone::White
        } else {
            return Err(BoardError::BadCounts { black, white });
        };

        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Read-only view of the cells, as handed to heuristics
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.grid.get(pos)
    }

    /// Player to move next
    #[inline]
    pub fn current_player(&self) -> Stone {
        self.current
    }

    /// Most recent placement still on the board
    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.history.last().copied()
    }

    #[inline]
    pub fn stone_count(&self) -> usize {
        self.grid.stone_count()
    }

    #[inline]
    pub fn candidate_rule(&self) -> CandidateRule {
        self.rule
    }

    pub fn set_candidate_rule(&mut self, rule: CandidateRule) {
        self.rule = rule;
    }

    /// Place the current player's stone and pass the turn.
    pub fn make_move(&mut self, pos: Pos) -> Result<(), MoveError> {
        if !self.grid.contains(pos) {
            return Err(MoveError::OutOfBounds {
                pos,
                size: self.size(),
            });
        }
        if !self.grid.is_empty(pos) {
            return Err(MoveError::Occupied(pos));
        }

        self.grid.set(pos, self.current);
        self.history.push(pos);
        self.current = self.current.opponent();
        Ok(())
    }

    /// Remove the stone at `pos` and hand the turn back.
    ///
    /// Undoing the last move is O(1); undoing an older placement also
    /// works but scans the history.
    pub fn undo_move(&mut self, pos: Pos) -> Result<(), MoveError> {
        if !self.grid.contains(pos) {
            return Err(MoveError::OutOfBounds {
                pos,
                size: self.size(),
            });
        }
        if self.grid.is_empty(pos) {
            return Err(MoveError::Empty(pos));
        }

        self.current = self.current.opponent();
        self.grid.set(pos, Stone::Empty);
        if self.history.last() == Some(&pos) {
            self.history.pop();
        } else if let Some(idx) = self.history.iter().rposition(|&p| p == pos) {
            self.history.remove(idx);
        }
        Ok(())
    }

    /// Candidate moves for the side to move.
    ///
    /// On a board without stones this is the single center cell. Otherwise
    /// every empty cell within the candidate radius of some stone, in
    /// row-major order, then stably sorted by distance to the center when
    /// the rule asks for it.
    pub fn possible_moves(&self) -> Vec<Pos> {
        if self.grid.is_board_empty() {
            return vec![self.grid.center()];
        }

        let size = self.size();
        let radius = self.rule.radius as i32;
        let mut near = vec![false; size * size];

        for (pos, _) in self.grid.occupied() {
            for dr in -radius..=radius {
                for dc in -radius..=radius {
                    let r = i32::from(pos.row) + dr;
                    let c = i32::from(pos.col) + dc;
                    if self.grid.in_bounds(r, c) {
                        near[r as usize * size + c as usize] = true;
                    }
                }
            }
        }

        let mut moves: Vec<Pos> = self
            .grid
            .cells()
            .iter()
            .zip(near)
            .enumerate()
            .filter(|(_, (stone, near))| *near && **stone == Stone::Empty)
            .map(|(idx, _)| Pos::from_index(idx, size))
            .collect();

        if self.rule.order_by_center {
            moves.sort_by_key(|&p| self.grid.center_distance2(p));
        }
        moves
    }

    /// Game over: the last move completed a five, or no empty cell is left.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.grid.is_full()
    }

    /// Whether `player` owns exactly five in a row through `pos`
    #[inline]
    pub fn check_winner(&self, pos: Pos, player: Stone) -> bool {
        check_winner(&self.grid, pos, player)
    }

    /// Player whose last move won the game, if any
    pub fn winner(&self) -> Option<Stone> {
        let last = self.last_move()?;
        let mover = self.grid.get(last);
        self.check_winner(last, mover).then_some(mover)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        write!(f, "   ")?;
        for col in 0..size {
            write!(f, "{:>3}", col)?;
        }
        writeln!(f)?;
        for row in 0..size {
            write!(f, "{:>3}", row)?;
            for col in 0..size {
                #[allow(clippy::cast_possible_truncation)]
                let pos = Pos::new(row as u8, col as u8);
                let marker = if self.last_move() == Some(pos) { '*' } else { ' ' };
                write!(f, " {}{}", self.grid.get(pos).symbol(), marker)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
