//! Evaluation module for five-in-a-row positions
//!
//! Three independent scorers, all seen from one player's perspective:
//! - Line patterns (fives, fours, threes, twos) against a shared table
//! - Distance of stones to the center
//! - Freedom: empty neighbours along each line through a stone
//!
//! Search code only depends on the [`Heuristic`] trait; difficulty tiers
//! combine the scorers with [`Weighted`].

pub mod heuristic;
pub mod patterns;

/// Evaluation score. Positive favours the evaluating player.
pub type Score = f64;

pub use heuristic::{
    evaluate, evaluate_distance_to_center, evaluate_freedom, position_value, CenterDistance,
    Freedom, Heuristic, PatternEval, Weighted,
};
pub use patterns::{Pattern, PatternScore, PatternTable, Symbol};
