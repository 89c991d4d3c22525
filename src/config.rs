//! Solver configuration

use std::time::Duration;

use crate::error::ConfigError;
use crate::search::DEFAULT_CAPACITY;

/// Solver settings.
///
/// The defaults solve without a time limit using a table of
/// [`DEFAULT_CAPACITY`] slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Transposition table slots
    pub tt_capacity: usize,
    /// Wall-clock budget per move; `None` searches to completion
    pub time_limit: Option<Duration>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            tt_capacity: DEFAULT_CAPACITY,
            time_limit: None,
        }
    }
}

impl SolverConfig {
    /// Set the number of transposition table slots.
    #[must_use]
    pub fn with_tt_capacity(mut self, tt_capacity: usize) -> Self {
        self.tt_capacity = tt_capacity;
        self
    }

    /// Set the per-move time limit.
    #[must_use]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tt_capacity == 0 {
            return Err(ConfigError::Validation(
                "tt_capacity must be > 0".into(),
            ));
        }
        if self.time_limit.is_some_and(|limit| limit.is_zero()) {
            return Err(ConfigError::Validation(
                "time_limit must be > 0 when set".into(),
            ));
        }
        Ok(())
    }
}
