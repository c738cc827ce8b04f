//! Heuristic evaluation functions for board positions
//!
//! Every scorer implements [`Heuristic`] and looks only at the grid, never
//! at whose turn it is. Scores are from the perspective of `player`.

use std::sync::Arc;

use crate::board::{Grid, Pos, Stone, DIRECTIONS};
use crate::rules::WIN_LENGTH;

use super::patterns::{PatternScore, PatternTable, Symbol};
use super::Score;

/// Multiplier applied to opponent stones by the center-distance scorer
pub const DEFAULT_OPPONENT_WEIGHT: Score = 2.0;

/// Points per open neighbour awarded by the freedom scorer
pub const DEFAULT_FREEDOM_BONUS: Score = 5.0;

/// Points per unit of distance to the center
const DISTANCE_SCALE: Score = 10.0;

/// Scores a grid from one player's point of view.
///
/// The search depends only on this trait. Plain functions and closures
/// with the right signature implement it too:
///
/// ```
/// use gomoku::{Grid, Heuristic, Stone};
///
/// let stones = |grid: &Grid, _: Stone| grid.stone_count() as f64;
/// assert_eq!(stones.score(&Grid::new(15), Stone::Black), 0.0);
/// ```
pub trait Heuristic: Send + Sync {
    fn score(&self, grid: &Grid, player: Stone) -> Score;
}

impl<F> Heuristic for F
where
    F: Fn(&Grid, Stone) -> Score + Send + Sync,
{
    fn score(&self, grid: &Grid, player: Stone) -> Score {
        self(grid, player)
    }
}

// =============================================================================
// H1: line patterns
// =============================================================================

/// Pattern scorer over every row, column and diagonal.
#[derive(Debug, Clone)]
pub struct PatternEval {
    table: Arc<PatternTable>,
}

impl PatternEval {
    pub fn new(table: Arc<PatternTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PatternTable {
        &self.table
    }
}

impl Default for PatternEval {
    fn default() -> Self {
        Self::new(PatternTable::shared())
    }
}

impl Heuristic for PatternEval {
    /// Sum of pattern values over all lines, or `±WIN_SENTINEL` as soon as
    /// some line holds five in a row.
    fn score(&self, grid: &Grid, player: Stone) -> Score {
        if player == Stone::Empty {
            return 0.0;
        }

        let mut line = Vec::with_capacity(grid.size());
        let mut score = 0.0;

        for (r0, c0, dr, dc) in line_starts(grid.size()) {
            line.clear();
            let mut stones = 0;
            let (mut own_run, mut opp_run) = (0, 0);
            let (mut own_five, mut opp_five) = (false, false);

            let (mut r, mut c) = (r0, c0);
            while let Some(stone) = grid.stone_at(r, c) {
                let symbol = if stone == player {
                    own_run += 1;
                    opp_run = 0;
                    Symbol::Own
                } else if stone == Stone::Empty {
                    own_run = 0;
                    opp_run = 0;
                    Symbol::Empty
                } else {
                    opp_run += 1;
                    own_run = 0;
                    Symbol::Opp
                };
                if symbol != Symbol::Empty {
                    stones += 1;
                }
                own_five |= own_run >= WIN_LENGTH;
                opp_five |= opp_run >= WIN_LENGTH;
                line.push(symbol);
                r += dr;
                c += dc;
            }

            if own_five {
                return PatternScore::WIN_SENTINEL;
            }
            if opp_five {
                return -PatternScore::WIN_SENTINEL;
            }
            if line.len() < WIN_LENGTH || stones < self.table.min_stones() {
                continue;
            }
            score += self.table.score_line(&line);
        }

        score
    }
}

/// Start cell and direction of every maximal line: rows, columns,
/// down-right diagonals, then down-left diagonals.
fn line_starts(size: usize) -> impl Iterator<Item = (i32, i32, i32, i32)> {
    let n = size as i32;
    let rows = (0..n).map(|r| (r, 0, 0, 1));
    let cols = (0..n).map(|c| (0, c, 1, 0));
    let diag = (0..n)
        .map(|r| (r, 0))
        .chain((1..n).map(|c| (0, c)))
        .map(|(r, c)| (r, c, 1, 1));
    let anti = (0..n)
        .map(move |r| (r, n - 1))
        .chain((0..n - 1).rev().map(|c| (0, c)))
        .map(|(r, c)| (r, c, 1, -1));
    rows.chain(cols).chain(diag).chain(anti)
}

// =============================================================================
// H2: distance to center
// =============================================================================

/// Positional value of a cell: highest at the center, zero in the corners.
#[must_use]
pub fn position_value(pos: Pos, size: usize) -> Score {
    let center = (size as Score - 1.0) / 2.0;
    let dist = (Score::from(pos.row) - center).abs() + (Score::from(pos.col) - center).abs();
    let max_dist = center * 2.0;
    ((max_dist - dist) * DISTANCE_SCALE).trunc()
}

/// Center-control scorer. Opponent stones count against us with
/// `opponent_weight` times their positional value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterDistance {
    pub opponent_weight: Score,
}

impl CenterDistance {
    pub fn new(opponent_weight: Score) -> Self {
        Self { opponent_weight }
    }
}

impl Default for CenterDistance {
    fn default() -> Self {
        Self::new(DEFAULT_OPPONENT_WEIGHT)
    }
}

impl Heuristic for CenterDistance {
    fn score(&self, grid: &Grid, player: Stone) -> Score {
        if player == Stone::Empty {
            return 0.0;
        }
        grid.occupied()
            .map(|(pos, stone)| {
                let value = position_value(pos, grid.size());
                if stone == player {
                    value
                } else {
                    -value * self.opponent_weight
                }
            })
            .sum()
    }
}

// =============================================================================
// H3: freedom
// =============================================================================

/// Rewards own stones for every empty cell directly next to them along
/// each of the four lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Freedom {
    pub bonus: Score,
}

impl Freedom {
    pub fn new(bonus: Score) -> Self {
        Self { bonus }
    }
}

impl Default for Freedom {
    fn default() -> Self {
        Self::new(DEFAULT_FREEDOM_BONUS)
    }
}

impl Heuristic for Freedom {
    fn score(&self, grid: &Grid, player: Stone) -> Score {
        if player == Stone::Empty {
            return 0.0;
        }
        let mut open = 0u32;
        for (pos, _) in grid.occupied().filter(|&(_, s)| s == player) {
            let (r, c) = (i32::from(pos.row), i32::from(pos.col));
            for &(dr, dc) in &DIRECTIONS {
                for side in [1, -1] {
                    if grid.stone_at(r + dr * side, c + dc * side) == Some(Stone::Empty) {
                        open += 1;
                    }
                }
            }
        }
        Score::from(open) * self.bonus
    }
}

// =============================================================================
// Combinations
// =============================================================================

/// Weighted sum of scorers.
///
/// ```
/// use gomoku::eval::{CenterDistance, Freedom, PatternEval, Weighted};
///
/// // 1.5 * H1 + H2 + H3
/// let hard = Weighted::new()
///     .with(1.5, PatternEval::default())
///     .with(1.0, CenterDistance::default())
///     .with(1.0, Freedom::default());
/// assert_eq!(hard.len(), 3);
/// ```
#[derive(Default)]
pub struct Weighted {
    terms: Vec<(Score, Box<dyn Heuristic>)>,
}

impl Weighted {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, weight: Score, heuristic: impl Heuristic + 'static) -> Self {
        self.terms.push((weight, Box::new(heuristic)));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Heuristic for Weighted {
    fn score(&self, grid: &Grid, player: Stone) -> Score {
        self.terms
            .iter()
            .map(|(weight, h)| weight * h.score(grid, player))
            .sum()
    }
}

impl std::fmt::Debug for Weighted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let weights: Vec<Score> = self.terms.iter().map(|(w, _)| *w).collect();
        f.debug_struct("Weighted").field("weights", &weights).finish()
    }
}

/// H1 with the shared standard table
#[must_use]
pub fn evaluate(grid: &Grid, player: Stone) -> Score {
    PatternEval::default().score(grid, player)
}

/// H2 with the default opponent weight
#[must_use]
pub fn evaluate_distance_to_center(grid: &Grid, player: Stone) -> Score {
    CenterDistance::default().score(grid, player)
}

/// H3 with the default bonus
#[must_use]
pub fn evaluate_freedom(grid: &Grid, player: Stone) -> Score {
    Freedom::default().score(grid, player)
}
