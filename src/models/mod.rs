//! Tournament domain models.
//!
//! Value entities (players, courts, timeslots, teams, matchups), the
//! problem description (events grouped in a tournament) and the solution
//! read-back (schedules, matches, grid cells).
//!
//! # Domain Mappings
//!
//! | u-tournament | Tennis | Padel | Esports |
//! |--------------|--------|-------|---------|
//! | Event | Draw / Category | Category | Bracket |
//! | Player | Player | Pair | Team |
//! | Localization | Court | Court | Server / Stage |
//! | Timeslot | Session | Round | Time block |

mod event;
mod localization;
mod player;
mod schedule;
mod team;
mod timeslot;
mod tournament;

pub use event::Event;
pub use localization::Localization;
pub use player::Player;
pub use schedule::{Availability, Match, PlayerSlot, Schedule};
pub use team::{Matchup, MatchupMode, Team};
pub use timeslot::Timeslot;
pub use tournament::Tournament;

pub(crate) use tournament::ordered_union;
