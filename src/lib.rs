//! Connect-4 solver
//!
//! Perfect-play solver for standard Connect-4:
//! - 7 columns by 6 rows, stones drop to the lowest free cell
//! - Four in a row horizontally, vertically or diagonally wins
//! - A full board without four in a row is a draw
//!
//! # Architecture
//!
//! - [`board`]: Bitboard position with O(1) move, undo and win detection
//! - [`search`]: Transposition table and negamax with alpha-beta pruning
//! - [`engine`]: Move selection on top of the search
//! - [`config`]: Solver settings
//! - [`error`]: Error types
//!
//! # Quick Start
//!
//! ```
//! use connect4::{Engine, Position, SolverConfig};
//!
//! let mut engine = Engine::with_config(SolverConfig::default().with_tt_capacity(100_003))?;
//! let mut position = Position::from_moves("725611544127135213426445")?;
//!
//! if let Some(column) = engine.best_move(&mut position) {
//!     position.apply_move(column)?;
//!     println!("Solver plays column {}\n{}", column + 1, position);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Scores
//!
//! Values are from the point of view of the player to move. Winning with the
//! stone placed at ply `k` scores `(43 - k) / 2`, a draw scores 0 and a loss
//! is the negation of the opponent's win, all within
//! [`MIN_SCORE`]..=[`MAX_SCORE`].

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Player, Position, MAX_SCORE, MIN_SCORE, WIDTH};
pub use config::SolverConfig;
pub use engine::{Analysis, Engine, MoveKind};
pub use error::{ConfigError, PositionError};
