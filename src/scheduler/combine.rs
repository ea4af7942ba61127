//! Tournament-wide schedule aggregation.
//!
//! Merges per-event schedules into one schedule over the union of their
//! players, localizations and timeslots.
//!
//! # Algorithm
//!
//! 1. Build the union pools (first appearance order).
//! 2. Start with every player cell "not in domain".
//! 3. For each schedule in order, translate each cell into the union index
//!    space and write it unless the combined cell is already occupied or
//!    limited: the first event to commit a player's slot keeps it.
//! 4. Concatenate the events' matches and sort them descending by start
//!    under the timeslot ordering, which lists the earliest start first.
//!
//! Court cells merge the other way round: a cell is available if any
//! event can use it, structurally blocked if some event blocks it and
//! none can use it, and not in domain otherwise.

use std::collections::HashMap;
use std::hash::Hash;

use crate::models::{ordered_union, Availability, PlayerSlot, Schedule};

/// Combines per-event schedules into one.
///
/// Matches of the result are listed earliest start first. Under the
/// inverted timeslot ordering that is a descending sort, so do not read
/// "descending" as latest-first.
pub fn combine_schedules(name: impl Into<String>, schedules: &[Schedule]) -> Schedule {
    let players = ordered_union(schedules.iter().map(|s| s.players.as_slice()));
    let localizations = ordered_union(schedules.iter().map(|s| s.localizations.as_slice()));
    let timeslots = ordered_union(schedules.iter().map(|s| s.timeslots.as_slice()));

    let player_at = positions(&players);
    let localization_at = positions(&localizations);
    let timeslot_at = positions(&timeslots);

    let mut grid = vec![vec![PlayerSlot::NotInDomain; timeslots.len()]; players.len()];
    let mut localization_grid =
        vec![vec![Availability::NotInDomain; timeslots.len()]; localizations.len()];

    for schedule in schedules {
        let columns: Vec<usize> = schedule.timeslots.iter().map(|t| timeslot_at[t]).collect();
        let courts: Vec<usize> = schedule
            .localizations
            .iter()
            .map(|l| localization_at[l])
            .collect();

        for (player, row) in schedule.players.iter().zip(&schedule.grid) {
            let up = player_at[player];
            for (&ut, &cell) in columns.iter().zip(row) {
                let current = &mut grid[up][ut];
                if matches!(current, PlayerSlot::Occupied { .. } | PlayerSlot::Limited)
                    || cell == PlayerSlot::NotInDomain
                {
                    continue;
                }
                *current = match cell {
                    PlayerSlot::Occupied { localization } => PlayerSlot::Occupied {
                        localization: courts[localization],
                    },
                    other => other,
                };
            }
        }

        for (&uc, row) in courts.iter().zip(&schedule.localization_grid) {
            for (&ut, &cell) in columns.iter().zip(row) {
                let current = &mut localization_grid[uc][ut];
                match cell {
                    Availability::Available => *current = Availability::Available,
                    Availability::NotInDomain => {}
                    blocked => {
                        if *current == Availability::NotInDomain {
                            *current = blocked;
                        }
                    }
                }
            }
        }
    }

    let mut matches: Vec<_> = schedules
        .iter()
        .flat_map(|s| s.matches.iter().cloned())
        .collect();
    matches.sort_by(|a, b| b.start.cmp(&a.start));

    Schedule {
        name: name.into(),
        players,
        localizations,
        timeslots,
        grid,
        localization_grid,
        matches,
    }
}

fn positions<T: Eq + Hash>(items: &[T]) -> HashMap<&T, usize> {
    items.iter().enumerate().map(|(i, item)| (item, i)).collect()
}
