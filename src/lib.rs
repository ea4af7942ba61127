//! Constraint-based tournament timetabling.
//!
//! Assigns the players of one or more events (categories) to courts and
//! contiguous blocks of timeslots, honouring breaks, unavailability,
//! teams, predefined matchups and match durations, and enumerates the
//! feasible timetables one at a time.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Player`, `Localization`, `Timeslot`,
//!   `Team`, `Matchup`, `Event`, `Tournament`, `Schedule`, `Match`
//! - **`validation`**: Input integrity checks, reported as a batch
//! - **`error`**: Configuration, extraction and solve errors
//! - **`cp`**: Boolean constraint model, propagation and resumable search
//! - **`constraints`**: Constraint families encoding events and tournaments
//! - **`scheduler`**: Solver, schedule extraction, aggregation and occupancy
//!
//! # Example
//!
//! ```
//! use u_tournament::models::{Event, Localization, Player, Timeslot, Tournament};
//! use u_tournament::scheduler::{OccupancyKpi, SolverConfig, TournamentSolver};
//!
//! let event = Event::new(
//!     "Singles",
//!     Player::numbered("P", 8),
//!     Localization::numbered("Court ", 1),
//!     Timeslot::week(8),
//! );
//! let tournament = Tournament::single(event);
//!
//! let mut solver = TournamentSolver::new(&tournament, SolverConfig::default()).unwrap();
//! assert!(solver.solve().unwrap());
//!
//! let schedule = solver.combined_schedule().unwrap();
//! assert_eq!(schedule.match_count(), 4);
//! assert!(OccupancyKpi::calculate(schedule).meets_threshold(1.0));
//! ```
//!
//! # References
//!
//! - Dechter (2003), "Constraint Processing"
//! - Boussemart et al. (2004), "Boosting systematic search by weighting constraints"

pub mod constraints;
pub mod cp;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;
