//! Gomoku search engine
//!
//! A game-tree search engine for five-in-a-row on a square board:
//! - 15x15 board by default, Black (`X`) moves first
//! - Exactly five in a row wins; overlines do not
//! - No captures, no forbidden moves
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board state with in-place make/undo and candidate moves
//! - [`rules`]: Win detection
//! - [`eval`]: Position heuristics (patterns, center distance, freedom)
//! - [`search`]: Minimax and Alpha-Beta
//! - [`engine`]: Difficulty tiers and auxiliary modes on top of the search
//! - [`config`]: TOML-loadable engine tunables
//! - [`bench`]: Fixed benchmark positions
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{AIEngine, EngineConfig, Mode, Pos};
//!
//! let config = EngineConfig::default();
//! let mut board = config.new_board();
//! let mut engine = AIEngine::with_seed(config, 42);
//!
//! board.make_move(Pos::new(7, 7)).unwrap();
//!
//! // AI responds as White
//! if let Some(pos) = engine.get_move(&mut board, Mode::Medium) {
//!     board.make_move(pos).unwrap();
//!     println!("AI plays at ({}, {})", pos.row, pos.col);
//! }
//! ```

pub mod bench;
pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, CandidateRule, Grid, Pos, Stone, DEFAULT_SIZE, MAX_SIZE};
pub use config::EngineConfig;
pub use engine::{AIEngine, Mode, MoveResult, SearchType};
pub use error::{BoardError, ConfigError, ModeError, MoveError};
pub use eval::{Heuristic, Score};
pub use search::{Algorithm, SearchResult, Searcher};
