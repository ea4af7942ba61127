//! Constraints linking events.
//!
//! Events may share players, courts and timeslots. At every timeslot of
//! the tournament a shared player occupies at most one court over all of
//! their events, and a shared court hosts at most one match over all of
//! its events.

use crate::cp::{BoolVar, CpModel};
use crate::models::Tournament;

use super::EventVariables;

/// Posts the cross-event constraints. Returns how many were posted.
///
/// `vars[i]` must hold the variables of `tournament.events[i]`.
pub fn post_tournament(
    model: &mut CpModel,
    tournament: &Tournament,
    vars: &[EventVariables],
) -> usize {
    if tournament.events.len() < 2 {
        return 0;
    }
    let before = model.num_constraints();
    let timeslots = tournament.timeslots();

    for player in tournament.players() {
        let events = tournament.events_with_player(&player);
        if events.len() < 2 {
            continue;
        }
        for timeslot in &timeslots {
            let mut shared: Vec<BoolVar> = Vec::new();
            let mut owners = 0;
            for &e in &events {
                let event = &tournament.events[e];
                let (Some(p), Some(t)) = (event.player_index(&player), event.timeslot_index(timeslot))
                else {
                    continue;
                };
                owners += 1;
                shared.extend((0..vars[e].localizations()).map(|c| vars[e].occupies(p, c, t)));
            }
            if owners > 1 {
                model.add_sum_le(&shared, 1);
            }
        }
    }

    for localization in tournament.localizations() {
        for timeslot in &timeslots {
            let mut shared: Vec<BoolVar> = Vec::new();
            for (e, event) in tournament.events.iter().enumerate() {
                if let (Some(c), Some(t)) = (
                    event.localization_index(&localization),
                    event.timeslot_index(timeslot),
                ) {
                    shared.push(vars[e].match_occupies(c, t));
                }
            }
            if shared.len() > 1 {
                model.add_sum_le(&shared, 1);
            }
        }
    }

    model.num_constraints() - before
}
