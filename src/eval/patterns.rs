//! Pattern table for line evaluation
//!
//! Patterns are written from the evaluating player's point of view:
//! `X` is one of our stones, `O` an opponent stone, `.` an empty cell.
//! Each pattern is stored twice, once as written with the "own" value and
//! once with `X`/`O` swapped carrying the (much larger) opponent penalty.

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::Score;

/// Pattern scores
pub struct PatternScore;

impl PatternScore {
    /// Returned as soon as any line holds five in a row
    pub const WIN_SENTINEL: Score = 1_000_000_000.0;

    // Own patterns
    pub const FIVE: Score = 100_000_000.0;
    pub const OPEN_FOUR: Score = 100_000.0;
    /// Split and closed fours share a tier
    pub const FOUR: Score = 10_000.0;
    pub const OPEN_THREE: Score = 5_000.0;
    pub const CLOSED_THREE: Score = 500.0;
    /// Split threes and open twos share a tier
    pub const SPLIT_THREE: Score = 200.0;
    pub const OPEN_TWO: Score = 200.0;
    pub const CLOSED_TWO: Score = 50.0;

    // Opponent patterns: punished harder than the same shape of ours
    pub const OPP_FIVE: Score = -1_500_000_000.0;
    pub const OPP_OPEN_FOUR: Score = -1_500_000.0;
    pub const OPP_FOUR: Score = -150_000.0;
    pub const OPP_OPEN_THREE: Score = -55_000.0;
    pub const OPP_CLOSED_THREE: Score = -5_500.0;
    pub const OPP_SPLIT_THREE: Score = -2_500.0;
    pub const OPP_OPEN_TWO: Score = -2_500.0;
    pub const OPP_CLOSED_TWO: Score = -50.0;
}

/// Standard table: (shape, own value, opponent value)
const STANDARD_PATTERNS: [(&str, Score, Score); 15] = [
    ("XXXXX", PatternScore::FIVE, PatternScore::OPP_FIVE),
    (".XXXX.", PatternScore::OPEN_FOUR, PatternScore::OPP_OPEN_FOUR),
    ("XX.XX", PatternScore::FOUR, PatternScore::OPP_FOUR),
    ("X.XXX", PatternScore::FOUR, PatternScore::OPP_FOUR),
    ("XXX.X", PatternScore::FOUR, PatternScore::OPP_FOUR),
    ("OXXXX.", PatternScore::FOUR, PatternScore::OPP_FOUR),
    (".XXXXO", PatternScore::FOUR, PatternScore::OPP_FOUR),
    (".XXX.", PatternScore::OPEN_THREE, PatternScore::OPP_OPEN_THREE),
    ("OXXX.", PatternScore::CLOSED_THREE, PatternScore::OPP_CLOSED_THREE),
    (".XXXO", PatternScore::CLOSED_THREE, PatternScore::OPP_CLOSED_THREE),
    (".XX.X.", PatternScore::SPLIT_THREE, PatternScore::OPP_SPLIT_THREE),
    (".X.XX.", PatternScore::SPLIT_THREE, PatternScore::OPP_SPLIT_THREE),
    (".XX.", PatternScore::OPEN_TWO, PatternScore::OPP_OPEN_TWO),
    ("OXX.", PatternScore::CLOSED_TWO, PatternScore::OPP_CLOSED_TWO),
    (".XXO", PatternScore::CLOSED_TWO, PatternScore::OPP_CLOSED_TWO),
];

static STANDARD: Lazy<Arc<PatternTable>> = Lazy::new(|| Arc::new(PatternTable::standard()));

/// A cell as seen from the evaluating player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Empty,
    Own,
    Opp,
}

impl Symbol {
    fn parse(ch: char) -> Option<Symbol> {
        match ch {
            'X' => Some(Symbol::Own),
            'O' => Some(Symbol::Opp),
            '.' => Some(Symbol::Empty),
            _ => None,
        }
    }

    #[inline]
    fn swapped(self) -> Symbol {
        match self {
            Symbol::Own => Symbol::Opp,
            Symbol::Opp => Symbol::Own,
            Symbol::Empty => Symbol::Empty,
        }
    }
}

/// One line shape and its value
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub cells: Vec<Symbol>,
    pub value: Score,
}

impl Pattern {
    #[inline]
    pub fn matches(&self, line: &[Symbol]) -> bool {
        line.windows(self.cells.len()).any(|w| w == self.cells.as_slice())
    }

    /// Number of non-empty cells in the shape
    pub fn stones(&self) -> usize {
        self.cells.iter().filter(|&&s| s != Symbol::Empty).count()
    }
}

/// Immutable pattern table, built once and shared by every evaluator.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternTable {
    patterns: Vec<Pattern>,
    /// Fewest stones any pattern needs; lines with fewer cannot match
    min_stones: usize,
}

impl PatternTable {
    /// Build the standard table: every own shape, then every mirrored
    /// opponent shape.
    pub fn standard() -> Self {
        let own = STANDARD_PATTERNS
            .iter()
            .map(|&(shape, value, _)| Pattern {
                cells: parse_shape(shape),
                value,
            });
        let opp = STANDARD_PATTERNS
            .iter()
            .map(|&(shape, _, value)| Pattern {
                cells: parse_shape(shape).into_iter().map(Symbol::swapped).collect(),
                value,
            });
        Self::from_patterns(own.chain(opp).collect())
    }

    /// Process-wide standard table
    pub fn shared() -> Arc<PatternTable> {
        Arc::clone(&STANDARD)
    }

    /// Table from explicit `(shape, value)` entries, shapes using `X`, `O`
    /// and `.`. Returns `None` on an unknown symbol or an empty shape.
    pub fn from_entries(entries: &[(&str, Score)]) -> Option<Self> {
        let mut patterns = Vec::with_capacity(entries.len());
        for &(shape, value) in entries {
            let cells = shape.chars().map(Symbol::parse).collect::<Option<Vec<_>>>()?;
            if cells.is_empty() {
                return None;
            }
            patterns.push(Pattern { cells, value });
        }
        Some(Self::from_patterns(patterns))
    }

    fn from_patterns(patterns: Vec<Pattern>) -> Self {
        let min_stones = patterns
            .iter()
            .map(Pattern::stones)
            .min()
            .unwrap_or(usize::MAX);
        Self {
            patterns,
            min_stones,
        }
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Smallest stone count among the patterns, `usize::MAX` when empty
    #[inline]
    pub fn min_stones(&self) -> usize {
        self.min_stones
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Sum of the values of every pattern present somewhere in `line`.
    /// A pattern counts once per line however often it occurs.
    pub fn score_line(&self, line: &[Symbol]) -> Score {
        self.patterns
            .iter()
            .filter(|p| p.matches(line))
            .map(|p| p.value)
            .sum()
    }
}

fn parse_shape(shape: &str) -> Vec<Symbol> {
    shape.chars().filter_map(Symbol::parse).collect()
}
