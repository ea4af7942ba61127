//! Error types for u-tournament.
//!
//! Infeasibility is not an error: `solve()` and `next_solution()` report
//! it as `Ok(false)`.

use thiserror::Error;

use crate::validation::ValidationReport;

/// Result type for model construction.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type for solver operations.
pub type SolveResult<T> = std::result::Result<T, SolveError>;

/// Malformed configuration detected while setting up the solver or
/// building the constraint model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The resolution time limit is negative.
    #[error("Negative time limit: {0} ms")]
    NegativeTimeLimit(i64),

    /// A team cannot be encoded.
    #[error("Malformed team '{team}' in event '{event}': {reason}")]
    MalformedTeam {
        /// Event name.
        event: String,
        /// Team name.
        team: String,
        /// What is wrong.
        reason: String,
    },

    /// A predefined matchup cannot be encoded.
    #[error("Malformed matchup {matchup} in event '{event}': {reason}")]
    MalformedMatchup {
        /// Event name.
        event: String,
        /// Matchup description.
        matchup: String,
        /// What is wrong.
        reason: String,
    },

    /// A restriction refers to a position outside its pool.
    #[error("Event '{event}': {kind} index {index} is out of range")]
    IndexOutOfRange {
        /// Event name.
        event: String,
        /// Which pool the index refers to.
        kind: &'static str,
        /// Offending index.
        index: usize,
    },
}

/// An occupation grid that does not decode into matches.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Grid dimensions do not match the event.
    #[error("Grid shape mismatch in event '{event}': {reason}")]
    GridShape {
        /// Event name.
        event: String,
        /// What is wrong.
        reason: String,
    },

    /// Fewer players than a match needs start together.
    #[error("Incomplete match in event '{event}' at timeslot {timeslot}, localization {localization}")]
    IncompleteMatch {
        /// Event name.
        event: String,
        /// Timeslot index.
        timeslot: usize,
        /// Localization index.
        localization: usize,
    },

    /// A match would run past the last timeslot.
    #[error("Match of player {player} in event '{event}' overflows the domain at timeslot {timeslot}")]
    MatchOverflow {
        /// Event name.
        event: String,
        /// Player index.
        player: usize,
        /// Start timeslot index.
        timeslot: usize,
    },

    /// A team is split across matches.
    #[error("Team '{team}' in event '{event}' is split at timeslot {timeslot}")]
    SplitTeam {
        /// Event name.
        event: String,
        /// Team name.
        team: String,
        /// Timeslot index.
        timeslot: usize,
    },
}

/// Errors returned by the solver.
#[derive(Error, Debug)]
pub enum SolveError {
    /// The tournament failed validation.
    #[error("Invalid tournament: {0}")]
    Validation(#[from] ValidationReport),

    /// The configuration or model is malformed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A solution could not be read back into a schedule.
    #[error("Schedule extraction failed: {0}")]
    Schedule(#[from] ScheduleError),

    /// The operation is not valid in the solver's current state.
    #[error("Invalid solver state: {0}")]
    InvalidState(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = ConfigError::NegativeTimeLimit(-5);
        assert_eq!(e.to_string(), "Negative time limit: -5 ms");

        let e = ConfigError::IndexOutOfRange {
            event: "Singles".into(),
            kind: "timeslot",
            index: 9,
        };
        assert_eq!(e.to_string(), "Event 'Singles': timeslot index 9 is out of range");
    }

    #[test]
    fn test_from_conversions() {
        let e: SolveError = ConfigError::NegativeTimeLimit(-1).into();
        assert!(matches!(e, SolveError::Config(_)));

        let e: SolveError = ValidationReport::default().into();
        assert!(matches!(e, SolveError::Validation(_)));
        assert!(e.to_string().starts_with("Invalid tournament: 0 validation error(s)"));
    }
}
