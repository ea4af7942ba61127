//! Solver configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cp::SearchStrategy;
use crate::error::{ConfigError, ConfigResult};

/// Configuration of a [`TournamentSolver`](super::TournamentSolver).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Variable selection heuristic.
    pub strategy: SearchStrategy,
    /// Branch on every timeslot of a court before the next court (`true`)
    /// or on every court of a timeslot before the next timeslot (`false`).
    pub fill_timeslots_first: bool,
    /// Wall-clock limit per `solve()` / `next_solution()` call in
    /// milliseconds. `0` = unlimited; negative values are rejected.
    pub time_limit_ms: i64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::default(),
            fill_timeslots_first: true,
            time_limit_ms: 0,
        }
    }
}

impl SolverConfig {
    /// Sets the search strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the fill order.
    pub fn with_fill_timeslots_first(mut self, fill_timeslots_first: bool) -> Self {
        self.fill_timeslots_first = fill_timeslots_first;
        self
    }

    /// Sets the time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, time_limit_ms: i64) -> Self {
        self.time_limit_ms = time_limit_ms;
        self
    }

    /// Checks the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.time_limit_ms < 0 {
            return Err(ConfigError::NegativeTimeLimit(self.time_limit_ms));
        }
        Ok(())
    }

    /// Time limit as a duration, `None` when unlimited.
    pub fn time_limit(&self) -> Option<Duration> {
        (self.time_limit_ms > 0).then(|| Duration::from_millis(self.time_limit_ms as u64))
    }
}
