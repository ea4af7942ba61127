//! Breaks, unavailability and forced affinities.
//!
//! Every restriction fixes `occupies` variables to false before search:
//! - break timeslots: every player, every court
//! - unavailable player at a timeslot: every court
//! - unavailable court at a timeslot: every player (and the court-level
//!   match indicator)
//! - player restricted to some courts: every other court, every timeslot
//! - player restricted to some timeslots: every other timeslot, every court

use std::collections::BTreeSet;

use super::{EventConstraint, ModelContext};
use crate::error::{ConfigError, ConfigResult};
use crate::models::Event;

/// Availability restrictions.
#[derive(Debug, Clone, Copy)]
pub struct Availability;

impl EventConstraint for Availability {
    fn name(&self) -> &'static str {
        "Availability"
    }

    fn post(&self, ctx: &mut ModelContext<'_>) -> ConfigResult<()> {
        let event = ctx.event;
        let (np, nl, nt) = (
            ctx.vars.players(),
            ctx.vars.localizations(),
            ctx.vars.timeslots(),
        );

        for &t in &event.breaks {
            check(event, "timeslot", t, nt)?;
            for c in 0..nl {
                ctx.model.fix(ctx.vars.match_occupies(c, t), false);
                for p in 0..np {
                    ctx.model.fix(ctx.vars.occupies(p, c, t), false);
                }
            }
        }

        for (&p, timeslots) in &event.unavailable_players {
            check(event, "player", p, np)?;
            for &t in timeslots {
                check(event, "timeslot", t, nt)?;
                for c in 0..nl {
                    ctx.model.fix(ctx.vars.occupies(p, c, t), false);
                }
            }
        }

        for (&c, timeslots) in &event.unavailable_localizations {
            check(event, "localization", c, nl)?;
            for &t in timeslots {
                check(event, "timeslot", t, nt)?;
                ctx.model.fix(ctx.vars.match_occupies(c, t), false);
                for p in 0..np {
                    ctx.model.fix(ctx.vars.occupies(p, c, t), false);
                }
            }
        }

        for (&p, courts) in &event.player_localizations {
            check(event, "player", p, np)?;
            check_all(event, "localization", courts, nl)?;
            for c in (0..nl).filter(|c| !courts.contains(c)) {
                for t in 0..nt {
                    ctx.model.fix(ctx.vars.occupies(p, c, t), false);
                }
            }
        }

        for (&p, timeslots) in &event.player_timeslots {
            check(event, "player", p, np)?;
            check_all(event, "timeslot", timeslots, nt)?;
            for t in (0..nt).filter(|t| !timeslots.contains(t)) {
                for c in 0..nl {
                    ctx.model.fix(ctx.vars.occupies(p, c, t), false);
                }
            }
        }

        Ok(())
    }
}

fn check(event: &Event, kind: &'static str, index: usize, len: usize) -> ConfigResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(ConfigError::IndexOutOfRange {
            event: event.name.clone(),
            kind,
            index,
        })
    }
}

fn check_all(
    event: &Event,
    kind: &'static str,
    indices: &BTreeSet<usize>,
    len: usize,
) -> ConfigResult<()> {
    indices.iter().try_for_each(|&i| check(event, kind, i, len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::testing::{build, first_solution};
    use crate::constraints::{post_event, EventVariables};
    use crate::cp::CpModel;
    use crate::models::{Localization, Player, Timeslot};

    fn event() -> Event {
        Event::new(
            "E",
            Player::numbered("P", 2),
            Localization::numbered("C", 2),
            Timeslot::week(4),
        )
    }

    #[test]
    fn test_fixes() {
        let e = event()
            .with_break(0)
            .with_unavailable_player(1, [3])
            .with_unavailable_localization(0, [2])
            .with_player_localizations(0, [1])
            .with_player_timeslots(1, [1, 2, 3]);
        let (model, vars) = build(&e);

        assert_eq!(model.fixed_value(vars.occupies(0, 1, 0)), Some(false));
        assert_eq!(model.fixed_value(vars.occupies(1, 0, 3)), Some(false));
        assert_eq!(model.fixed_value(vars.occupies(1, 1, 2)), None);
        assert_eq!(model.fixed_value(vars.occupies(1, 0, 2)), Some(false));
        assert_eq!(model.fixed_value(vars.match_occupies(0, 2)), Some(false));
        assert_eq!(model.fixed_value(vars.occupies(0, 0, 1)), Some(false));
        assert_eq!(model.fixed_value(vars.occupies(0, 1, 1)), None);
    }

    #[test]
    fn test_solution_respects_restrictions() {
        let e = event()
            .with_break(1)
            .with_unavailable_localization(1, [2, 3]);
        let (search, vars) = first_solution(&e).unwrap();
        // Only court 0, slots 2-3 can host a two-slot match.
        assert_eq!(search.value(vars.occupies(0, 0, 2)), Some(true));
        assert_eq!(search.value(vars.occupies(1, 0, 3)), Some(true));
    }

    #[test]
    fn test_restrictions_can_make_event_infeasible() {
        let e = event().with_unavailable_player(0, [0, 1, 2]);
        assert!(first_solution(&e).is_none());
    }

    #[test]
    fn test_out_of_range_index() {
        let e = event().with_unavailable_player(5, [0]);
        let mut model = CpModel::new("t");
        let vars = EventVariables::create(&mut model, &e, 0, true);
        let err = post_event(&mut model, &e, &vars).unwrap_err();
        assert_eq!(
            err,
            ConfigError::IndexOutOfRange {
                event: "E".into(),
                kind: "player",
                index: 5,
            }
        );

        let e = event().with_break(4);
        let mut model = CpModel::new("t");
        let vars = EventVariables::create(&mut model, &e, 0, true);
        assert!(post_event(&mut model, &e, &vars).is_err());
    }
}
