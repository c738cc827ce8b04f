//! Game rules for five-in-a-row
//!
//! Only the win condition lives here: exactly five in a row wins,
//! overlines do not.

pub mod win;

// Re-exports for convenient access
pub use win::{check_winner, count_in_direction, run_length, WIN_LENGTH};
