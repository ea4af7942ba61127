//! Tournament model.
//!
//! A tournament is an ordered list of events. Its player, court and
//! timeslot pools are the deduplicated unions of the events' pools, in
//! order of first appearance.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

use super::{Event, Localization, Player, Timeslot};

/// A set of simultaneous events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    /// Tournament name.
    pub name: String,
    /// Events, in declaration order.
    pub events: Vec<Event>,
}

impl Tournament {
    /// Creates a tournament from its events.
    pub fn new(name: impl Into<String>, events: Vec<Event>) -> Self {
        Self {
            name: name.into(),
            events,
        }
    }

    /// Creates a tournament holding a single event.
    pub fn single(event: Event) -> Self {
        Self::new(event.name.clone(), vec![event])
    }

    /// Adds an event.
    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    /// Union of every event's players.
    pub fn players(&self) -> Vec<Player> {
        ordered_union(self.events.iter().map(|e| e.players.as_slice()))
    }

    /// Union of every event's localizations.
    pub fn localizations(&self) -> Vec<Localization> {
        ordered_union(self.events.iter().map(|e| e.localizations.as_slice()))
    }

    /// Union of every event's timeslots.
    pub fn timeslots(&self) -> Vec<Timeslot> {
        ordered_union(self.events.iter().map(|e| e.timeslots.as_slice()))
    }

    /// Indices of the events the player takes part in.
    pub fn events_with_player(&self, player: &Player) -> Vec<usize> {
        self.events
            .iter()
            .enumerate()
            .filter(|(_, e)| e.players.contains(player))
            .map(|(i, _)| i)
            .collect()
    }

    /// Total number of matches over all events.
    pub fn number_of_matches(&self) -> usize {
        self.events.iter().map(Event::number_of_matches).sum()
    }

    /// Marks the player unavailable at the timeslot in every event that
    /// contains both.
    pub fn set_player_unavailable(&mut self, player: &Player, timeslot: &Timeslot) {
        for event in &mut self.events {
            if let (Some(p), Some(t)) = (event.player_index(player), event.timeslot_index(timeslot))
            {
                event.unavailable_players.entry(p).or_default().insert(t);
            }
        }
    }

    /// Blocks the court at the timeslot in every event that contains both.
    pub fn set_localization_unavailable(&mut self, localization: &Localization, timeslot: &Timeslot) {
        for event in &mut self.events {
            if let (Some(c), Some(t)) = (
                event.localization_index(localization),
                event.timeslot_index(timeslot),
            ) {
                event.unavailable_localizations.entry(c).or_default().insert(t);
            }
        }
    }

    /// Adds a break at the timeslot in every event that contains it.
    pub fn add_break(&mut self, timeslot: &Timeslot) {
        for event in &mut self.events {
            if let Some(t) = event.timeslot_index(timeslot) {
                event.breaks.insert(t);
            }
        }
    }
}

/// Deduplicated concatenation, first appearance wins.
pub(crate) fn ordered_union<'a, T, I>(lists: I) -> Vec<T>
where
    T: Clone + Eq + Hash + 'a,
    I: IntoIterator<Item = &'a [T]>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for list in lists {
        for item in list {
            if seen.insert(item) {
                out.push(item.clone());
            }
        }
    }
    out
}
