//! Solver engine: picks a column for the player to move
//!
//! The engine answers in this order:
//!
//! 1. **Game over**: a won or full board has no move
//! 2. **Opening**: the empty board gets the center column without searching
//! 3. **Immediate win**: a column that connects four right now
//! 4. **Search**: every other column is solved with negamax and the highest
//!    score is played, ties going to the more central column
//!
//! The transposition table lives as long as the engine, so consecutive moves
//! of one game reuse what earlier searches solved.
//!
//! # Example
//!
//! ```
//! use connect4::{Engine, MoveKind, Position, SolverConfig};
//!
//! let config = SolverConfig::default().with_tt_capacity(100_003);
//! let mut engine = Engine::with_config(config).unwrap();
//! let mut position = Position::from_moves("377341266525622161367337").unwrap();
//!
//! let analysis = engine.analyze(&mut position);
//! assert_eq!(analysis.best_move, Some(0));
//! assert_eq!(analysis.kind, MoveKind::Search);
//! println!("nodes: {}, time: {:?}", analysis.nodes, analysis.elapsed);
//! ```

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::board::{Position, CENTER_COLUMN, MAX_SCORE, MIN_SCORE, WIDTH};
use crate::config::SolverConfig;
use crate::error::ConfigError;
use crate::search::{win_score, RootResult, SearchStats, Searcher, TTStats, TranspositionTable};

/// How the engine arrived at its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Center column on an empty board, no search
    Opening,
    /// The move connects four
    ImmediateWin,
    /// Regular negamax search over every column
    Search,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Column to play (0-indexed); `None` when the game is already over
    pub best_move: Option<usize>,
    /// Value of `best_move` for the player to move, if it was solved
    pub score: Option<i32>,
    /// Value of every solved column, indexed by column
    pub scores: [Option<i32>; WIDTH],
    /// How the move was found
    pub kind: MoveKind,
    /// Number of nodes searched
    pub nodes: u64,
    /// Wall-clock time spent
    pub elapsed: Duration,
    /// The time limit cut the search short
    pub timed_out: bool,
    /// Search counters
    pub stats: SearchStats,
}

impl Analysis {
    /// Nothing to play: the game is decided
    fn game_over(elapsed: Duration) -> Self {
        Self {
            best_move: None,
            score: None,
            scores: [None; WIDTH],
            kind: MoveKind::Search,
            nodes: 0,
            elapsed,
            timed_out: false,
            stats: SearchStats::default(),
        }
    }

    /// Center column on the empty board
    fn opening(elapsed: Duration) -> Self {
        Self {
            best_move: Some(CENTER_COLUMN),
            kind: MoveKind::Opening,
            ..Self::game_over(elapsed)
        }
    }

    /// Build from a finished root search
    fn from_root(root: RootResult, stats: SearchStats, elapsed: Duration) -> Self {
        Self {
            best_move: root.best_move,
            score: root.score,
            scores: root.scores,
            kind: if root.immediate_win {
                MoveKind::ImmediateWin
            } else {
                MoveKind::Search
            },
            nodes: stats.nodes,
            elapsed,
            timed_out: root.timed_out,
            stats,
        }
    }
}

/// Connect-4 solver engine.
///
/// Owns the searcher (and through it the transposition table) plus the time
/// limit. Positions are borrowed mutably for the duration of a call and are
/// handed back exactly as they were passed in.
pub struct Engine {
    searcher: Searcher,
    time_limit: Option<Duration>,
}

impl Engine {
    /// Create an engine with the default configuration.
    ///
    /// The default table holds [`DEFAULT_CAPACITY`] entries (about 128 MiB).
    ///
    /// [`DEFAULT_CAPACITY`]: crate::search::DEFAULT_CAPACITY
    #[must_use]
    pub fn new() -> Self {
        Self {
            searcher: Searcher::default(),
            time_limit: None,
        }
    }

    /// Create an engine with a custom configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use connect4::{Engine, SolverConfig};
    ///
    /// let config = SolverConfig::default()
    ///     .with_tt_capacity(1_000_003)
    ///     .with_time_limit(Duration::from_secs(2));
    /// let engine = Engine::with_config(config).unwrap();
    /// assert_eq!(engine.tt_stats().size, 1_000_003);
    /// ```
    pub fn with_config(config: SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            searcher: Searcher::new(config.tt_capacity),
            time_limit: config.time_limit,
        })
    }

    /// Get the best column for the player to move.
    ///
    /// Returns `None` if the game is already over. Use [`Engine::analyze`]
    /// for scores and statistics.
    #[must_use]
    pub fn best_move(&mut self, position: &mut Position) -> Option<usize> {
        self.analyze(position).best_move
    }

    /// Get the best column together with per-column scores and statistics.
    pub fn analyze(&mut self, position: &mut Position) -> Analysis {
        let start = Instant::now();

        if position.is_game_over() {
            debug!("game over at ply {}, nothing to play", position.ply());
            return Analysis::game_over(start.elapsed());
        }

        if position.ply() == 0 {
            info!("opening: column {}", CENTER_COLUMN + 1);
            return Analysis::opening(start.elapsed());
        }

        self.searcher
            .begin(self.time_limit.map(|limit| start + limit));
        let root = self.searcher.search_root(position);
        let analysis = Analysis::from_root(root, self.searcher.stats(), start.elapsed());

        if analysis.timed_out {
            warn!(
                "time limit reached after {} nodes; playing best fully searched column",
                analysis.nodes
            );
        }
        debug!(
            "nodes: {}, tt hit rate: {:.1}%, beta cutoffs: {}",
            analysis.nodes,
            analysis.stats.tt_hit_rate(),
            analysis.stats.beta_cutoffs
        );
        if let Some(column) = analysis.best_move {
            info!(
                "best move: column {} ({:?}, score {:?}, {:?})",
                column + 1,
                analysis.kind,
                analysis.score,
                analysis.elapsed
            );
        }

        analysis
    }

    /// Game-theoretic value of `position` for the player to move.
    ///
    /// Positive: the player to move wins, the sooner the larger. Zero: draw.
    /// Negative: the player to move loses. A position already won by the
    /// previous player scores as that loss. Always runs to completion,
    /// ignoring the time limit.
    pub fn evaluate(&mut self, position: &mut Position) -> i32 {
        if position.winner().is_some() {
            return -win_score(position.ply() - 1);
        }
        self.searcher.begin(None);
        self.searcher.negamax(position, MIN_SCORE, MAX_SCORE)
    }

    /// Current per-move time limit
    #[must_use]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Clear the transposition table cache.
    pub fn clear_cache(&mut self) {
        self.searcher.clear_tt();
    }

    /// Get transposition table statistics.
    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.searcher.tt_stats()
    }

    /// Direct access to the transposition table
    pub fn table_mut(&mut self) -> &mut TranspositionTable {
        self.searcher.table_mut()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
