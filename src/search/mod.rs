//! Search module for the Connect-4 solver
//!
//! Contains:
//! - Transposition table for caching solved positions
//! - Negamax with alpha-beta pruning and center-out move ordering

pub mod negamax;
pub mod tt;

pub use negamax::{win_score, RootResult, SearchStats, Searcher};
pub use tt::{Bound, TTEntry, TTStats, TranspositionTable, DEFAULT_CAPACITY};
