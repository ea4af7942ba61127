//! Start/occupation mapping.
//!
//! With a match duration `d > 1`:
//! - `starts[p][c][t] = occupies[p][c][t] ∧ … ∧ occupies[p][c][t+d-1]`,
//!   and no match starts in the last `d-1` timeslots;
//! - `occupies[p][c][t] = Σ starts[p][c][t-d+1..=t]`, so exactly zero or
//!   one match covers a slot.
//!
//! The same mapping links the court-level `match_starts` and
//! `match_occupies`. With `d = 1` both arrays are the same variables and
//! nothing is posted.
//!
//! Together the two directions also keep a player from playing two
//! matches back to back on the same court: the slots of both matches
//! would form an occupied window with no start of its own.

use super::{EventConstraint, ModelContext};
use crate::error::ConfigResult;

/// `starts → occupies`.
#[derive(Debug, Clone, Copy)]
pub struct StartsToOccupies;

impl EventConstraint for StartsToOccupies {
    fn name(&self) -> &'static str {
        "StartsToOccupies"
    }

    fn post(&self, ctx: &mut ModelContext<'_>) -> ConfigResult<()> {
        if ctx.vars.is_aliased() {
            return Ok(());
        }
        let d = ctx.event.timeslots_per_match;
        let nt = ctx.vars.timeslots();
        for c in 0..ctx.vars.localizations() {
            for t in 0..nt {
                if t + d > nt {
                    ctx.model.fix(ctx.vars.match_starts(c, t), false);
                }
            }
            for p in 0..ctx.vars.players() {
                for t in 0..nt {
                    let s = ctx.vars.starts(p, c, t);
                    if t + d > nt {
                        ctx.model.fix(s, false);
                    } else {
                        let window = (t..t + d).map(|u| ctx.vars.occupies(p, c, u)).collect();
                        ctx.model.add_and(s, window);
                    }
                }
            }
        }
        Ok(())
    }
}

/// `occupies → starts`.
#[derive(Debug, Clone, Copy)]
pub struct OccupiesToStarts;

impl EventConstraint for OccupiesToStarts {
    fn name(&self) -> &'static str {
        "OccupiesToStarts"
    }

    fn post(&self, ctx: &mut ModelContext<'_>) -> ConfigResult<()> {
        if ctx.vars.is_aliased() {
            return Ok(());
        }
        let d = ctx.event.timeslots_per_match;
        for c in 0..ctx.vars.localizations() {
            for t in 0..ctx.vars.timeslots() {
                let first = (t + 1).saturating_sub(d);

                let mut terms: Vec<_> = (first..=t)
                    .map(|u| (1, ctx.vars.match_starts(c, u)))
                    .collect();
                terms.push((-1, ctx.vars.match_occupies(c, t)));
                ctx.model.add_linear(terms, 0, 0);

                for p in 0..ctx.vars.players() {
                    let mut terms: Vec<_> = (first..=t)
                        .map(|u| (1, ctx.vars.starts(p, c, u)))
                        .collect();
                    terms.push((-1, ctx.vars.occupies(p, c, t)));
                    ctx.model.add_linear(terms, 0, 0);
                }
            }
        }
        Ok(())
    }
}
