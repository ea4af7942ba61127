//! Constraint builders.
//!
//! Translates events into constraints over the shared [`CpModel`]. Each
//! constraint family is a small type implementing [`EventConstraint`];
//! [`post_event`] posts the standard families in order and
//! [`post_tournament`] adds the constraints linking events that share
//! players or courts.
//!
//! # Families
//!
//! | Family | Constraint |
//! |--------|------------|
//! | [`Availability`] | breaks, blocked players/courts, forced affinities |
//! | [`TotalMatches`] | matches per event |
//! | [`MatchesPerPlayer`] | matches per player |
//! | [`StartsToOccupies`] | a start occupies the whole match duration |
//! | [`OccupiesToStarts`] | an occupied slot is covered by exactly one start |
//! | [`CourtCapacity`] | a court hosts zero or one full match |
//! | [`SingleCourt`] | a player is on one court at a time |
//! | [`Teams`] | team members play together |
//! | [`Matchups`] | predefined matchups occur as required |
//!
//! Unsatisfiable combinations are not detected here; they surface as
//! solver infeasibility. Malformed input is reported as [`ConfigError`].
//!
//! [`ConfigError`]: crate::error::ConfigError

mod availability;
mod courts;
mod mapping;
mod matches;
mod matchups;
mod teams;
mod tournament;
mod variables;

pub use availability::Availability;
pub use courts::{CourtCapacity, SingleCourt};
pub use mapping::{OccupiesToStarts, StartsToOccupies};
pub use matches::{MatchesPerPlayer, TotalMatches};
pub use matchups::{matchup_bounds, Matchups};
pub use teams::Teams;
pub use tournament::post_tournament;
pub use variables::EventVariables;

use std::fmt::Debug;

use crate::cp::CpModel;
use crate::error::ConfigResult;
use crate::models::Event;

/// Model-building context handed to every constraint family.
#[derive(Debug)]
pub struct ModelContext<'a> {
    /// Model receiving the constraints.
    pub model: &'a mut CpModel,
    /// Event being encoded.
    pub event: &'a Event,
    /// The event's variables.
    pub vars: &'a EventVariables,
}

/// A family of constraints posted for one event.
pub trait EventConstraint: Debug {
    /// Family name (e.g. "TotalMatches").
    fn name(&self) -> &'static str;

    /// Posts the family's constraints.
    fn post(&self, ctx: &mut ModelContext<'_>) -> ConfigResult<()>;
}

/// The standard families, in posting order.
pub fn event_constraints() -> Vec<Box<dyn EventConstraint>> {
    vec![
        Box::new(Availability),
        Box::new(TotalMatches),
        Box::new(MatchesPerPlayer),
        Box::new(StartsToOccupies),
        Box::new(OccupiesToStarts),
        Box::new(CourtCapacity),
        Box::new(SingleCourt),
        Box::new(Teams),
        Box::new(Matchups),
    ]
}

/// Posts every standard family for one event.
pub fn post_event(model: &mut CpModel, event: &Event, vars: &EventVariables) -> ConfigResult<()> {
    let mut ctx = ModelContext { model, event, vars };
    for family in event_constraints() {
        let before = ctx.model.num_constraints();
        family.post(&mut ctx)?;
        tracing::debug!(
            event = %event.name,
            family = family.name(),
            constraints = ctx.model.num_constraints() - before,
            "posted constraint family"
        );
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::cp::{Search, SearchOutcome, SearchStrategy};

    /// Builds and posts an event, returning the model and its variables.
    pub(crate) fn build(event: &Event) -> (CpModel, EventVariables) {
        let mut model = CpModel::new("test");
        let vars = EventVariables::create(&mut model, event, 0, true);
        post_event(&mut model, event, &vars).unwrap();
        (model, vars)
    }

    /// First solution, or `None` when infeasible.
    pub(crate) fn first_solution(event: &Event) -> Option<(Search, EventVariables)> {
        let (model, vars) = build(event);
        let mut search = Search::new(model, SearchStrategy::InputOrder, None);
        (search.next_solution() == SearchOutcome::Solution).then_some((search, vars))
    }
}
