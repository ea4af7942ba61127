//! Schedule (solution) model.
//!
//! A schedule is the read-back form of one solution: a player × timeslot
//! assignment grid, its court × timeslot dual and the list of matches
//! reconstructed from the grid. The same type holds a single event's
//! schedule and the combined tournament-wide schedule.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Localization, Player, Team, Timeslot};

/// State of one (player, timeslot) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    /// Nothing scheduled; the player could play.
    Free,
    /// Playing at the localization with this index (within the owning
    /// schedule's localization list).
    Occupied {
        /// Localization index.
        localization: usize,
    },
    /// The player is unavailable.
    Unavailable,
    /// No play at this timeslot.
    Break,
    /// The player is restricted to other timeslots.
    Limited,
    /// The timeslot is outside the player's event domain.
    NotInDomain,
}

impl PlayerSlot {
    /// Whether a match occupies the cell.
    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self, PlayerSlot::Occupied { .. })
    }

    /// Localization index of an occupied cell.
    #[inline]
    pub fn localization(&self) -> Option<usize> {
        match self {
            PlayerSlot::Occupied { localization } => Some(*localization),
            _ => None,
        }
    }
}

/// Structural state of one (localization, timeslot) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Availability {
    /// The court can host a match.
    #[default]
    Available,
    /// No play at this timeslot.
    Break,
    /// The court is blocked.
    Unavailable,
    /// The timeslot is outside every domain the court belongs to.
    NotInDomain,
}

impl Availability {
    /// Whether the cell counts towards the court's available capacity.
    #[inline]
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

/// A scheduled contest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Participants, flattened even when teams play.
    pub players: Vec<Player>,
    /// Team grouping when the participants are exactly two or more teams.
    pub teams: Vec<Team>,
    /// Court.
    pub localization: Localization,
    /// First timeslot.
    pub start: Timeslot,
    /// Last timeslot (inclusive).
    pub end: Timeslot,
    /// Length in timeslots.
    pub duration: usize,
}

impl Match {
    /// Creates a match without team grouping.
    pub fn new(
        players: Vec<Player>,
        localization: Localization,
        start: Timeslot,
        end: Timeslot,
        duration: usize,
    ) -> Self {
        Self {
            players,
            teams: Vec::new(),
            localization,
            start,
            end,
            duration,
        }
    }

    /// Records the team grouping.
    pub fn with_teams(mut self, teams: Vec<Team>) -> Self {
        self.teams = teams;
        self
    }

    /// Whether the player takes part.
    pub fn involves(&self, player: &Player) -> bool {
        self.players.contains(player)
    }

    /// Whether the match is in play at the timeslot.
    pub fn covers(&self, timeslot: &Timeslot) -> bool {
        timeslot.within(&self.start, &self.end)
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sides: Vec<String> = if self.teams.is_empty() {
            self.players.iter().map(|p| p.to_string()).collect()
        } else {
            self.teams.iter().map(|t| t.to_string()).collect()
        };
        write!(
            f,
            "{} @ {} [{} - {}]",
            sides.join(" vs "),
            self.localization,
            self.start,
            self.end
        )
    }
}

/// A solved schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Event (or tournament) name.
    pub name: String,
    /// Row labels of `grid`.
    pub players: Vec<Player>,
    /// Index space of [`PlayerSlot::Occupied`] and row labels of
    /// `localization_grid`.
    pub localizations: Vec<Localization>,
    /// Column labels of both grids.
    pub timeslots: Vec<Timeslot>,
    /// Player × timeslot assignment grid.
    pub grid: Vec<Vec<PlayerSlot>>,
    /// Localization × timeslot structural availability.
    pub localization_grid: Vec<Vec<Availability>>,
    /// Matches in chronological order of their start.
    pub matches: Vec<Match>,
}

impl Schedule {
    /// Number of matches.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Grid cell of a player at a timeslot.
    pub fn slot(&self, player: usize, timeslot: usize) -> Option<PlayerSlot> {
        self.grid.get(player)?.get(timeslot).copied()
    }

    /// Position of a player in the row list.
    pub fn player_index(&self, player: &Player) -> Option<usize> {
        self.players.iter().position(|p| p == player)
    }

    /// Position of a localization in the index space.
    pub fn localization_index(&self, localization: &Localization) -> Option<usize> {
        self.localizations.iter().position(|l| l == localization)
    }

    /// Position of a timeslot in the column list.
    pub fn timeslot_index(&self, timeslot: &Timeslot) -> Option<usize> {
        self.timeslots.iter().position(|t| t == timeslot)
    }

    /// Matches the player takes part in.
    pub fn matches_for_player(&self, player: &Player) -> Vec<&Match> {
        self.matches.iter().filter(|m| m.involves(player)).collect()
    }

    /// Matches played at the localization.
    pub fn matches_at_localization(&self, localization: &Localization) -> Vec<&Match> {
        self.matches
            .iter()
            .filter(|m| &m.localization == localization)
            .collect()
    }

    /// Matches in play at the timeslot (started there or still running).
    pub fn matches_at_timeslot(&self, timeslot: &Timeslot) -> Vec<&Match> {
        self.matches.iter().filter(|m| m.covers(timeslot)).collect()
    }

    /// Matches starting between `a` and `b`, both inclusive.
    ///
    /// Bounds given in reverse chronological order are swapped.
    pub fn matches_in_range(&self, a: &Timeslot, b: &Timeslot) -> Vec<&Match> {
        self.matches
            .iter()
            .filter(|m| m.start.within(a, b))
            .collect()
    }

    /// Timeslots at which the player occupies a court.
    pub fn occupied_timeslots_of(&self, player: &Player) -> Vec<&Timeslot> {
        let Some(row) = self.player_index(player).and_then(|p| self.grid.get(p)) else {
            return Vec::new();
        };
        row.iter()
            .zip(&self.timeslots)
            .filter(|(slot, _)| slot.is_occupied())
            .map(|(_, t)| t)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schedule() -> Schedule {
        let players = Player::numbered("P", 4);
        let courts = Localization::numbered("C", 1);
        let week = Timeslot::week(4);
        let occ = PlayerSlot::Occupied { localization: 0 };
        let matches = vec![
            Match::new(
                vec![players[0].clone(), players[1].clone()],
                courts[0].clone(),
                week[0].clone(),
                week[1].clone(),
                2,
            ),
            Match::new(
                vec![players[2].clone(), players[3].clone()],
                courts[0].clone(),
                week[2].clone(),
                week[3].clone(),
                2,
            ),
        ];
        Schedule {
            name: "Singles".into(),
            grid: vec![
                vec![occ, occ, PlayerSlot::Free, PlayerSlot::Free],
                vec![occ, occ, PlayerSlot::Free, PlayerSlot::Free],
                vec![PlayerSlot::Free, PlayerSlot::Free, occ, occ],
                vec![PlayerSlot::Free, PlayerSlot::Free, occ, occ],
            ],
            localization_grid: vec![vec![Availability::Available; 4]],
            players,
            localizations: courts,
            timeslots: week,
            matches,
        }
    }

    #[test]
    fn test_player_slot_helpers() {
        let occ = PlayerSlot::Occupied { localization: 3 };
        assert!(occ.is_occupied());
        assert_eq!(occ.localization(), Some(3));
        assert!(!PlayerSlot::Limited.is_occupied());
        assert_eq!(PlayerSlot::Break.localization(), None);
        assert!(Availability::default().is_available());
        assert!(!Availability::NotInDomain.is_available());
    }

    #[test]
    fn test_filters() {
        let s = sample_schedule();
        assert_eq!(s.match_count(), 2);
        assert_eq!(s.matches_for_player(&Player::new("P3")).len(), 1);
        assert_eq!(s.matches_at_localization(&Localization::new("C1")).len(), 2);
        assert!(s.matches_at_localization(&Localization::new("C9")).is_empty());

        let tuesday = &s.timeslots[1];
        let at = s.matches_at_timeslot(tuesday);
        assert_eq!(at.len(), 1);
        assert!(at[0].involves(&Player::new("P1")));
    }

    #[test]
    fn test_matches_in_range_swaps_reversed_bounds() {
        let s = sample_schedule();
        let (mon, wed, thu) = (&s.timeslots[0], &s.timeslots[2], &s.timeslots[3]);
        assert_eq!(s.matches_in_range(mon, wed).len(), 2);
        assert_eq!(s.matches_in_range(wed, mon).len(), 2);
        assert_eq!(s.matches_in_range(thu, thu).len(), 0);
        assert_eq!(s.matches_in_range(wed, thu).len(), 1);
    }

    #[test]
    fn test_occupied_timeslots_of() {
        let s = sample_schedule();
        let slots = s.occupied_timeslots_of(&Player::new("P4"));
        let orders: Vec<u32> = slots.iter().map(|t| t.order).collect();
        assert_eq!(orders, vec![2, 3]);
        assert!(s.occupied_timeslots_of(&Player::new("X")).is_empty());
        assert_eq!(s.slot(0, 0), Some(PlayerSlot::Occupied { localization: 0 }));
        assert_eq!(s.slot(9, 0), None);
    }

    #[test]
    fn test_match_display() {
        let s = sample_schedule();
        assert_eq!(s.matches[0].to_string(), "P1 vs P2 @ C1 [Monday - Tuesday]");
        let teamed = s.matches[0].clone().with_teams(vec![
            Team::new(vec![Player::new("P1")]).with_name("Red"),
            Team::new(vec![Player::new("P2")]).with_name("Blue"),
        ]);
        assert_eq!(teamed.to_string(), "Red vs Blue @ C1 [Monday - Tuesday]");
    }
}
