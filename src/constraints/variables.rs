//! Decision variables of one event.
//!
//! Per event the model holds two player-level arrays,
//! `occupies[player][court][timeslot]` (every slot a match spans) and
//! `starts[player][court][timeslot]` (only its first slot), and two
//! court-level arrays, `match_occupies[court][timeslot]` and
//! `match_starts[court][timeslot]`, marking cells that host a match.
//! With one timeslot per match each `starts` array is the same variable
//! as its `occupies` counterpart.

use crate::cp::{BoolVar, CpModel};
use crate::models::Event;

/// Variable handles of one event, stored flat.
#[derive(Debug, Clone)]
pub struct EventVariables {
    players: usize,
    localizations: usize,
    timeslots: usize,
    aliased: bool,
    occupies: Vec<BoolVar>,
    starts: Vec<BoolVar>,
    match_occupies: Vec<BoolVar>,
    match_starts: Vec<BoolVar>,
}

impl EventVariables {
    /// Creates the variables of `event` in `model`.
    ///
    /// `occupies` variables are flagged as decisions, player by player.
    /// Within a player, `fill_timeslots_first` branches on every timeslot of
    /// a court before moving to the next court; otherwise every court of a
    /// timeslot comes before the next timeslot.
    pub fn create(
        model: &mut CpModel,
        event: &Event,
        event_index: usize,
        fill_timeslots_first: bool,
    ) -> Self {
        let (np, nl, nt) = (
            event.players.len(),
            event.localizations.len(),
            event.timeslots.len(),
        );
        let aliased = event.timeslots_per_match == 1;

        let mut occupies = Vec::with_capacity(np * nl * nt);
        let mut starts = Vec::with_capacity(np * nl * nt);
        for p in 0..np {
            for c in 0..nl {
                for t in 0..nt {
                    let o = model.new_bool(format!("e{event_index}.o[{p}][{c}][{t}]"));
                    occupies.push(o);
                    starts.push(if aliased {
                        o
                    } else {
                        model.new_bool(format!("e{event_index}.s[{p}][{c}][{t}]"))
                    });
                }
            }
        }

        let mut match_occupies = Vec::with_capacity(nl * nt);
        let mut match_starts = Vec::with_capacity(nl * nt);
        for c in 0..nl {
            for t in 0..nt {
                let mo = model.new_bool(format!("e{event_index}.mo[{c}][{t}]"));
                match_occupies.push(mo);
                match_starts.push(if aliased {
                    mo
                } else {
                    model.new_bool(format!("e{event_index}.ms[{c}][{t}]"))
                });
            }
        }

        let vars = Self {
            players: np,
            localizations: nl,
            timeslots: nt,
            aliased,
            occupies,
            starts,
            match_occupies,
            match_starts,
        };

        for p in 0..np {
            if fill_timeslots_first {
                for c in 0..nl {
                    for t in 0..nt {
                        model.mark_decision(vars.occupies(p, c, t));
                    }
                }
            } else {
                for t in 0..nt {
                    for c in 0..nl {
                        model.mark_decision(vars.occupies(p, c, t));
                    }
                }
            }
        }

        vars
    }

    /// Player count.
    #[inline]
    pub fn players(&self) -> usize {
        self.players
    }

    /// Court count.
    #[inline]
    pub fn localizations(&self) -> usize {
        self.localizations
    }

    /// Timeslot count.
    #[inline]
    pub fn timeslots(&self) -> usize {
        self.timeslots
    }

    /// Whether `starts` and `occupies` are the same variables.
    #[inline]
    pub fn is_aliased(&self) -> bool {
        self.aliased
    }

    #[inline]
    fn at(&self, p: usize, c: usize, t: usize) -> usize {
        (p * self.localizations + c) * self.timeslots + t
    }

    /// Player `p` plays at court `c` during timeslot `t`.
    #[inline]
    pub fn occupies(&self, p: usize, c: usize, t: usize) -> BoolVar {
        self.occupies[self.at(p, c, t)]
    }

    /// A match of player `p` starts at court `c`, timeslot `t`.
    #[inline]
    pub fn starts(&self, p: usize, c: usize, t: usize) -> BoolVar {
        self.starts[self.at(p, c, t)]
    }

    /// Court `c` hosts a match during timeslot `t`.
    #[inline]
    pub fn match_occupies(&self, c: usize, t: usize) -> BoolVar {
        self.match_occupies[c * self.timeslots + t]
    }

    /// A match starts at court `c`, timeslot `t`.
    #[inline]
    pub fn match_starts(&self, c: usize, t: usize) -> BoolVar {
        self.match_starts[c * self.timeslots + t]
    }

    /// Every `occupies` variable of a player.
    pub fn occupies_row(&self, p: usize) -> Vec<BoolVar> {
        let row = self.localizations * self.timeslots;
        self.occupies[p * row..(p + 1) * row].to_vec()
    }

    /// Every `starts` variable of a player.
    pub fn starts_row(&self, p: usize) -> Vec<BoolVar> {
        let row = self.localizations * self.timeslots;
        self.starts[p * row..(p + 1) * row].to_vec()
    }

    /// Every court-level `match_occupies` variable.
    pub fn all_match_occupies(&self) -> &[BoolVar] {
        &self.match_occupies
    }

    /// Every court-level `match_starts` variable.
    pub fn all_match_starts(&self) -> &[BoolVar] {
        &self.match_starts
    }
}
