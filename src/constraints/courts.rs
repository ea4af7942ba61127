//! Court constraints.

use super::{EventConstraint, ModelContext};
use crate::error::ConfigResult;

/// A court hosts either no match or exactly one full match.
///
/// For every (court, timeslot):
/// `Σ_p starts = players_per_match · match_starts` and
/// `Σ_p occupies = players_per_match · match_occupies`.
#[derive(Debug, Clone, Copy)]
pub struct CourtCapacity;

impl EventConstraint for CourtCapacity {
    fn name(&self) -> &'static str {
        "CourtCapacity"
    }

    fn post(&self, ctx: &mut ModelContext<'_>) -> ConfigResult<()> {
        let ppm = ctx.event.players_per_match as i64;
        for c in 0..ctx.vars.localizations() {
            for t in 0..ctx.vars.timeslots() {
                let mut terms: Vec<_> = (0..ctx.vars.players())
                    .map(|p| (1, ctx.vars.starts(p, c, t)))
                    .collect();
                terms.push((-ppm, ctx.vars.match_starts(c, t)));
                ctx.model.add_linear(terms, 0, 0);

                if !ctx.vars.is_aliased() {
                    let mut terms: Vec<_> = (0..ctx.vars.players())
                        .map(|p| (1, ctx.vars.occupies(p, c, t)))
                        .collect();
                    terms.push((-ppm, ctx.vars.match_occupies(c, t)));
                    ctx.model.add_linear(terms, 0, 0);
                }
            }
        }
        Ok(())
    }
}

/// A player is on at most one court per timeslot.
#[derive(Debug, Clone, Copy)]
pub struct SingleCourt;

impl EventConstraint for SingleCourt {
    fn name(&self) -> &'static str {
        "SingleCourt"
    }

    fn post(&self, ctx: &mut ModelContext<'_>) -> ConfigResult<()> {
        if ctx.vars.localizations() < 2 {
            return Ok(());
        }
        for p in 0..ctx.vars.players() {
            for t in 0..ctx.vars.timeslots() {
                let courts: Vec<_> = (0..ctx.vars.localizations())
                    .map(|c| ctx.vars.occupies(p, c, t))
                    .collect();
                ctx.model.add_sum_le(&courts, 1);
            }
        }
        Ok(())
    }
}
