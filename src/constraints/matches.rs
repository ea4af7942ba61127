//! Match count constraints.

use super::{EventConstraint, ModelContext};
use crate::error::ConfigResult;

/// Number of matches in the event.
///
/// `Σ match_starts = players / players_per_match × matches_per_player` and
/// `Σ match_occupies` equals that times the match duration.
#[derive(Debug, Clone, Copy)]
pub struct TotalMatches;

impl EventConstraint for TotalMatches {
    fn name(&self) -> &'static str {
        "TotalMatches"
    }

    fn post(&self, ctx: &mut ModelContext<'_>) -> ConfigResult<()> {
        let matches = ctx.event.number_of_matches() as i64;
        ctx.model.add_sum_eq(ctx.vars.all_match_starts(), matches);
        if !ctx.vars.is_aliased() {
            let cells = matches * ctx.event.timeslots_per_match as i64;
            ctx.model.add_sum_eq(ctx.vars.all_match_occupies(), cells);
        }
        Ok(())
    }
}

/// Number of matches of every player.
///
/// Each `starts` row sums to `matches_per_player`; each `occupies` row
/// sums to `matches_per_player × timeslots_per_match`.
#[derive(Debug, Clone, Copy)]
pub struct MatchesPerPlayer;

impl EventConstraint for MatchesPerPlayer {
    fn name(&self) -> &'static str {
        "MatchesPerPlayer"
    }

    fn post(&self, ctx: &mut ModelContext<'_>) -> ConfigResult<()> {
        let matches = ctx.event.matches_per_player as i64;
        let cells = matches * ctx.event.timeslots_per_match as i64;
        for p in 0..ctx.vars.players() {
            ctx.model.add_sum_eq(&ctx.vars.starts_row(p), matches);
            if !ctx.vars.is_aliased() {
                ctx.model.add_sum_eq(&ctx.vars.occupies_row(p), cells);
            }
        }
        Ok(())
    }
}
