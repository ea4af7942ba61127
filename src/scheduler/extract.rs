//! Schedule extraction.
//!
//! Rebuilds discrete matches from one event's solved player × timeslot
//! grid.
//!
//! # Algorithm
//!
//! 1. Reduce every player row to its match starts: an occupied cell at
//!    `t` is a start; the next `duration - 1` cells are continuations and
//!    are skipped.
//! 2. Scan timeslot-major. At each timeslot, group ungrouped players
//!    starting at the same court until `players_per_match` are collected.
//! 3. Each full group becomes a [`Match`] from `t` to `t + duration - 1`.
//!    When the players are exactly two or more of the event's teams, the
//!    match also records the team grouping.
//!
//! Cells that are not occupied (free, break, unavailable, limited, not in
//! domain) never start a match.

use crate::error::ScheduleError;
use crate::models::{Event, Match, PlayerSlot, Schedule, Team};

/// Builds the player × timeslot grid of an event from an occupation test
/// `occupied(player, localization, timeslot)`.
///
/// A cell is occupied by the first court reported true; other cells get
/// the event's structural state.
pub(crate) fn grid_from_occupation<F>(event: &Event, occupied: F) -> Vec<Vec<PlayerSlot>>
where
    F: Fn(usize, usize, usize) -> bool,
{
    (0..event.players.len())
        .map(|p| {
            (0..event.timeslots.len())
                .map(|t| {
                    (0..event.localizations.len())
                        .find(|&c| occupied(p, c, t))
                        .map_or_else(
                            || event.player_slot(p, t),
                            |localization| PlayerSlot::Occupied { localization },
                        )
                })
                .collect()
        })
        .collect()
}

/// Reconstructs the schedule of `event` from its grid.
pub fn extract_schedule(
    event: &Event,
    grid: Vec<Vec<PlayerSlot>>,
) -> Result<Schedule, ScheduleError> {
    let np = event.players.len();
    let nl = event.localizations.len();
    let nt = event.timeslots.len();
    let d = event.timeslots_per_match.max(1);
    let ppm = event.players_per_match.max(1);

    if grid.len() != np || grid.iter().any(|row| row.len() != nt) {
        return Err(ScheduleError::GridShape {
            event: event.name.clone(),
            reason: format!("expected {np} rows of {nt} timeslots"),
        });
    }

    let starts = starts_view(event, &grid, d, nl)?;

    let mut matches = Vec::new();
    for t in 0..nt {
        let mut taken = vec![false; np];
        for p in 0..np {
            let Some(c) = starts[p][t] else { continue };
            if taken[p] {
                continue;
            }
            let mut group = vec![p];
            taken[p] = true;
            for q in (p + 1)..np {
                if group.len() == ppm {
                    break;
                }
                if !taken[q] && starts[q][t] == Some(c) {
                    group.push(q);
                    taken[q] = true;
                }
            }
            if group.len() < ppm {
                return Err(ScheduleError::IncompleteMatch {
                    event: event.name.clone(),
                    timeslot: t,
                    localization: c,
                });
            }
            matches.push(build_match(event, &group, c, t, d)?);
        }
    }

    let localization_grid = (0..nl)
        .map(|c| (0..nt).map(|t| event.localization_availability(c, t)).collect())
        .collect();

    Ok(Schedule {
        name: event.name.clone(),
        players: event.players.clone(),
        localizations: event.localizations.clone(),
        timeslots: event.timeslots.clone(),
        grid,
        localization_grid,
        matches,
    })
}

/// `starts[p][t] = Some(court)` where a match of `p` starts.
fn starts_view(
    event: &Event,
    grid: &[Vec<PlayerSlot>],
    d: usize,
    nl: usize,
) -> Result<Vec<Vec<Option<usize>>>, ScheduleError> {
    let nt = event.timeslots.len();
    let mut starts = vec![vec![None; nt]; grid.len()];
    for (p, row) in grid.iter().enumerate() {
        let mut t = 0;
        while t < nt {
            match row[t] {
                PlayerSlot::Occupied { localization } => {
                    if localization >= nl {
                        return Err(ScheduleError::GridShape {
                            event: event.name.clone(),
                            reason: format!("localization index {localization} out of range"),
                        });
                    }
                    if t + d > nt {
                        return Err(ScheduleError::MatchOverflow {
                            event: event.name.clone(),
                            player: p,
                            timeslot: t,
                        });
                    }
                    starts[p][t] = Some(localization);
                    t += d;
                }
                _ => t += 1,
            }
        }
    }
    Ok(starts)
}

fn build_match(
    event: &Event,
    group: &[usize],
    c: usize,
    t: usize,
    d: usize,
) -> Result<Match, ScheduleError> {
    let players: Vec<_> = group.iter().map(|&p| event.players[p].clone()).collect();

    let mut teams: Vec<&Team> = Vec::new();
    let mut all_in_teams = true;
    for player in &players {
        match event.team_of(player) {
            Some(team) if !teams.contains(&team) => teams.push(team),
            Some(_) => {}
            None => all_in_teams = false,
        }
    }
    if let Some(split) = teams
        .iter()
        .find(|team| !team.players.iter().all(|m| players.contains(m)))
    {
        return Err(ScheduleError::SplitTeam {
            event: event.name.clone(),
            team: split.name.clone(),
            timeslot: t,
        });
    }

    let m = Match::new(
        players,
        event.localizations[c].clone(),
        event.timeslots[t].clone(),
        event.timeslots[t + d - 1].clone(),
        d,
    );
    if all_in_teams && teams.len() >= 2 {
        Ok(m.with_teams(teams.into_iter().cloned().collect()))
    } else {
        Ok(m)
    }
}
