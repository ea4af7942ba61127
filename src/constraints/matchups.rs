//! Predefined matchup constraints.
//!
//! For each matchup an indicator per (court, timeslot) is the `AND` of its
//! players' `starts`; it is true only when all of them start a match
//! together there. The indicator sum is bounded by the number of required
//! occurrences.

use super::{EventConstraint, ModelContext};
use crate::error::{ConfigError, ConfigResult};
use crate::models::{Event, Matchup, MatchupMode};

/// Matchup occurrences.
#[derive(Debug, Clone, Copy)]
pub struct Matchups;

impl EventConstraint for Matchups {
    fn name(&self) -> &'static str {
        "Matchups"
    }

    fn post(&self, ctx: &mut ModelContext<'_>) -> ConfigResult<()> {
        let event = ctx.event;
        if event.matches_per_player <= 1 && event.matchup_mode != MatchupMode::Any {
            tracing::warn!(
                event = %event.name,
                mode = ?event.matchup_mode,
                "matchup mode ignored: players play a single match"
            );
        }

        for (m, matchup) in event.matchups.iter().enumerate() {
            let players = matchup_players(event, matchup)?;
            let cells = ctx.vars.localizations() * ctx.vars.timeslots();
            let mut indicators = Vec::with_capacity(cells);
            for c in 0..ctx.vars.localizations() {
                for t in 0..ctx.vars.timeslots() {
                    let ind = ctx.model.new_bool(format!("{}.m{m}[{c}][{t}]", event.name));
                    let inputs = players.iter().map(|&p| ctx.vars.starts(p, c, t)).collect();
                    ctx.model.add_and(ind, inputs);
                    indicators.push(ind);
                }
            }
            let (lo, hi) = matchup_bounds(event, matchup);
            ctx.model.add_sum_between(&indicators, lo as i64, hi as i64);
        }
        Ok(())
    }
}

/// Inclusive bounds on how often a matchup occurs.
///
/// An explicit occurrence count wins; otherwise the matchup mode decides
/// when players play several matches, and a single occurrence is required
/// when they play one.
pub fn matchup_bounds(event: &Event, matchup: &Matchup) -> (usize, usize) {
    match (matchup.occurrences, event.effective_matchup_mode()) {
        (Some(k), _) => (k, k),
        (None, Some(mode)) => mode.bounds(event.matches_per_player),
        (None, None) => (1, 1),
    }
}

fn matchup_players(event: &Event, matchup: &Matchup) -> ConfigResult<Vec<usize>> {
    let size = matchup.players.len();
    if size < 2 || size > event.players_per_match {
        return Err(malformed(
            event,
            matchup,
            &format!(
                "a matchup needs between 2 and {} players",
                event.players_per_match
            ),
        ));
    }
    if matchup.has_duplicates() {
        return Err(malformed(event, matchup, "a player is listed twice"));
    }
    if matchup.occurrences == Some(0) {
        return Err(malformed(event, matchup, "occurrences must be positive"));
    }
    matchup
        .players
        .iter()
        .map(|player| {
            event.player_index(player).ok_or_else(|| {
                malformed(event, matchup, &format!("player '{player}' is not in the event"))
            })
        })
        .collect()
}

fn malformed(event: &Event, matchup: &Matchup, reason: &str) -> ConfigError {
    ConfigError::MalformedMatchup {
        event: event.name.clone(),
        matchup: matchup.to_string(),
        reason: reason.to_string(),
    }
}
