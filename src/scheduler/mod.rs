//! Solving, schedule read-back and occupancy metrics.
//!
//! # Pipeline
//!
//! 1. [`TournamentSolver`] builds one model for the whole tournament and
//!    enumerates its solutions.
//! 2. Each solution's occupation is turned into a player × timeslot grid
//!    per event and [`extract_schedule`] rebuilds the matches.
//! 3. [`combine_schedules`] merges the event schedules into one
//!    tournament-wide schedule.
//! 4. [`OccupancyKpi`] measures how much available court time is used.

mod combine;
mod config;
mod extract;
mod occupancy;
mod solver;

pub use combine::combine_schedules;
pub use config::SolverConfig;
pub use extract::extract_schedule;
pub use occupancy::{CourtSlot, LocalizationSchedule, OccupancyKpi};
pub use solver::{SolverStatus, Termination, TournamentSolver};
