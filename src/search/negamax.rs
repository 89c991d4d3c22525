//! Negamax search with alpha-beta pruning and transposition table
//!
//! The searcher walks the game tree depth-first on a single [`Position`],
//! playing and taking back moves in place. Scores are in plies-to-end units
//! from the point of view of the player to move: winning with the stone
//! placed at ply `k` (counting from zero) is worth `(43 - k) / 2`, so faster
//! wins score higher; a draw is 0; losses are the negation.
//!
//! # Example
//!
//! ```
//! use connect4::board::{Position, MIN_SCORE, MAX_SCORE};
//! use connect4::search::Searcher;
//!
//! let mut searcher = Searcher::new(100_003);
//! let mut position = Position::from_moves("474724471243227572426376").unwrap();
//!
//! let score = searcher.negamax(&mut position, MIN_SCORE, MAX_SCORE);
//! assert_eq!(score, 7);
//! ```

use std::time::Instant;

use log::debug;

use crate::board::{Position, CELLS, MAX_SCORE, MIN_SCORE, MOVE_ORDER, WIDTH};

use super::{Bound, TTStats, TranspositionTable};

/// Below every reachable score; seeds the running maximum.
const NO_SCORE: i32 = -(CELLS as i32);

/// Clock is consulted once per this many nodes.
const TIME_CHECK_INTERVAL: u64 = 4096;

/// Score for connecting four with the next stone.
#[inline]
pub fn win_score(ply: usize) -> i32 {
    (CELLS as i32 + 1 - ply as i32) / 2
}

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Negamax calls
    pub nodes: u64,
    /// Total TT probes
    pub tt_probes: u64,
    /// TT probes that found an entry for the position
    pub tt_hits: u64,
    /// Total beta cutoffs (fail-high)
    pub beta_cutoffs: u64,
}

impl SearchStats {
    /// TT hit rate in percent
    pub fn tt_hit_rate(&self) -> f64 {
        if self.tt_probes == 0 {
            0.0
        } else {
            self.tt_hits as f64 / self.tt_probes as f64 * 100.0
        }
    }
}

/// Outcome of a root search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootResult {
    /// Column to play, `None` only if nothing is playable
    pub best_move: Option<usize>,
    /// Score of `best_move` if it was fully searched
    pub score: Option<i32>,
    /// Score of every fully searched column, indexed by column
    pub scores: [Option<i32>; WIDTH],
    /// The move wins on the spot
    pub immediate_win: bool,
    /// The deadline expired before every column was scored
    pub timed_out: bool,
}

/// Depth-first solver owning the transposition table.
pub struct Searcher {
    tt: TranspositionTable,
    stats: SearchStats,
    deadline: Option<Instant>,
    stopped: bool,
}

impl Searcher {
    /// Create a searcher with a table of `tt_capacity` slots.
    #[must_use]
    pub fn new(tt_capacity: usize) -> Self {
        Self::with_table(TranspositionTable::new(tt_capacity))
    }

    /// Create a searcher around an existing table.
    #[must_use]
    pub fn with_table(tt: TranspositionTable) -> Self {
        Self {
            tt,
            stats: SearchStats::default(),
            deadline: None,
            stopped: false,
        }
    }

    /// Reset statistics and arm (or disarm) the deadline for a new search.
    pub fn begin(&mut self, deadline: Option<Instant>) {
        self.stats = SearchStats::default();
        self.deadline = deadline;
        self.stopped = false;
    }

    /// The deadline expired during the last search
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Statistics of the current/last search
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Read access to the transposition table
    pub fn table(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Write access to the transposition table
    pub fn table_mut(&mut self) -> &mut TranspositionTable {
        &mut self.tt
    }

    /// Clear the transposition table.
    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    /// Get transposition table statistics.
    pub fn tt_stats(&self) -> TTStats {
        self.tt.stats()
    }

    /// Check the deadline every few thousand nodes and latch the stop flag.
    #[inline]
    fn check_time(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        if let Some(deadline) = self.deadline {
            if self.stats.nodes % TIME_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
                self.stopped = true;
            }
        }
        self.stopped
    }

    /// Score `position` for the player to move within `[alpha, beta]`.
    ///
    /// The position is played on in place and handed back unchanged. The
    /// game must not already be won. After a deadline stop the returned value
    /// is meaningless and nothing from the aborted subtree is cached.
    pub fn negamax(&mut self, position: &mut Position, mut alpha: i32, mut beta: i32) -> i32 {
        self.stats.nodes += 1;
        if self.check_time() {
            return 0;
        }

        let alpha_orig = alpha;
        let key = position.fingerprint();

        self.stats.tt_probes += 1;
        if let Some(entry) = self.tt.lookup(key) {
            self.stats.tt_hits += 1;
            let stored = i32::from(entry.score);
            match entry.bound {
                Bound::Exact => return stored,
                Bound::LowerBound => alpha = alpha.max(stored),
                Bound::UpperBound => beta = beta.min(stored),
            }
            if alpha >= beta {
                return stored;
            }
        }

        if position.is_full() {
            return 0;
        }

        // Winning right now beats anything deeper; no need to recurse
        if (0..WIDTH).any(|column| position.is_winning_move(column)) {
            return win_score(position.ply());
        }

        let mut best = NO_SCORE;
        for &column in &MOVE_ORDER {
            if !position.can_play(column) {
                continue;
            }
            let score = {
                let mut child = position.play_scoped(column);
                -self.negamax(&mut child, -beta, -alpha)
            };
            if self.stopped {
                return 0;
            }
            best = best.max(score);
            alpha = alpha.max(best);
            if alpha >= beta {
                self.stats.beta_cutoffs += 1;
                break;
            }
        }

        let bound = if best <= alpha_orig {
            Bound::UpperBound
        } else if best >= beta {
            Bound::LowerBound
        } else {
            Bound::Exact
        };
        self.tt.store(key, best, bound);

        best
    }

    /// Score every root column and pick the best.
    ///
    /// Columns are visited center-out. A column that connects four is
    /// returned at once, before any table probe. Otherwise each child is
    /// solved with the full window and the strictly highest score wins, so
    /// ties keep the more central column. If the deadline expires, the best
    /// fully scored column is kept, falling back to the first playable one.
    pub fn search_root(&mut self, position: &mut Position) -> RootResult {
        let mut result = RootResult {
            best_move: None,
            score: None,
            scores: [None; WIDTH],
            immediate_win: false,
            timed_out: false,
        };

        for &column in &MOVE_ORDER {
            if !position.can_play(column) {
                continue;
            }

            if position.is_winning_move(column) {
                let score = win_score(position.ply());
                result.best_move = Some(column);
                result.score = Some(score);
                result.scores[column] = Some(score);
                result.immediate_win = true;
                return result;
            }

            let score = {
                let mut child = position.play_scoped(column);
                -self.negamax(&mut child, -MAX_SCORE, -MIN_SCORE)
            };
            if self.stopped {
                result.timed_out = true;
                break;
            }

            debug!("column {} score: {}", column + 1, score);
            result.scores[column] = Some(score);
            if result.score.map_or(true, |best| score > best) {
                result.best_move = Some(column);
                result.score = Some(score);
            }
        }

        if result.best_move.is_none() {
            result.best_move = MOVE_ORDER.iter().copied().find(|&c| position.can_play(c));
        }

        result
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::with_table(TranspositionTable::default())
    }
}
