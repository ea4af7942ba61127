//! Event (competition category) model.
//!
//! An event owns its player, court and timeslot pools, the shape of its
//! matches and the per-category restrictions. Restrictions that pair an
//! entity with timeslots are stored by position within the owning pool so
//! an external layer can persist them losslessly.
//!
//! # Match shape
//! - `players_per_match`: players taking part in one match
//! - `timeslots_per_match`: consecutive timeslots one match lasts
//! - `matches_per_player`: matches every player plays

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{Availability, Localization, Matchup, MatchupMode, Player, PlayerSlot, Team, Timeslot};

/// One competition category to be scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event name (unique within a tournament).
    pub name: String,
    /// Player pool.
    pub players: Vec<Player>,
    /// Court pool.
    pub localizations: Vec<Localization>,
    /// Timeslot domain, in chronological order.
    pub timeslots: Vec<Timeslot>,
    /// Matches each player must play (default: 1).
    pub matches_per_player: usize,
    /// Consecutive timeslots a match lasts (default: 2).
    pub timeslots_per_match: usize,
    /// Players in one match (default: 2).
    pub players_per_match: usize,
    /// Timeslot positions where nobody plays.
    pub breaks: BTreeSet<usize>,
    /// Player position → timeslot positions the player cannot play.
    pub unavailable_players: BTreeMap<usize, BTreeSet<usize>>,
    /// Court position → timeslot positions the court is blocked.
    pub unavailable_localizations: BTreeMap<usize, BTreeSet<usize>>,
    /// Player position → the only court positions the player may use.
    pub player_localizations: BTreeMap<usize, BTreeSet<usize>>,
    /// Player position → the only timeslot positions the player may use.
    pub player_timeslots: BTreeMap<usize, BTreeSet<usize>>,
    /// Teams whose members always play together.
    pub teams: Vec<Team>,
    /// Predefined matchups.
    pub matchups: Vec<Matchup>,
    /// Occurrence policy for matchups (only meaningful with more than one
    /// match per player).
    pub matchup_mode: MatchupMode,
}

impl Event {
    /// Creates an event with the default match shape (1 match per player,
    /// 2 timeslots per match, 2 players per match).
    pub fn new(
        name: impl Into<String>,
        players: Vec<Player>,
        localizations: Vec<Localization>,
        timeslots: Vec<Timeslot>,
    ) -> Self {
        Self {
            name: name.into(),
            players,
            localizations,
            timeslots,
            matches_per_player: 1,
            timeslots_per_match: 2,
            players_per_match: 2,
            breaks: BTreeSet::new(),
            unavailable_players: BTreeMap::new(),
            unavailable_localizations: BTreeMap::new(),
            player_localizations: BTreeMap::new(),
            player_timeslots: BTreeMap::new(),
            teams: Vec::new(),
            matchups: Vec::new(),
            matchup_mode: MatchupMode::default(),
        }
    }

    /// Sets the number of matches per player.
    pub fn with_matches_per_player(mut self, matches: usize) -> Self {
        self.matches_per_player = matches;
        self
    }

    /// Sets the match duration in timeslots.
    pub fn with_timeslots_per_match(mut self, timeslots: usize) -> Self {
        self.timeslots_per_match = timeslots;
        self
    }

    /// Sets the number of players per match.
    pub fn with_players_per_match(mut self, players: usize) -> Self {
        self.players_per_match = players;
        self
    }

    /// Marks a timeslot position as a break.
    pub fn with_break(mut self, timeslot: usize) -> Self {
        self.breaks.insert(timeslot);
        self
    }

    /// Marks a player as unavailable at the given timeslot positions.
    pub fn with_unavailable_player(
        mut self,
        player: usize,
        timeslots: impl IntoIterator<Item = usize>,
    ) -> Self {
        self.unavailable_players
            .entry(player)
            .or_default()
            .extend(timeslots);
        self
    }

    /// Blocks a court at the given timeslot positions.
    pub fn with_unavailable_localization(
        mut self,
        localization: usize,
        timeslots: impl IntoIterator<Item = usize>,
    ) -> Self {
        self.unavailable_localizations
            .entry(localization)
            .or_default()
            .extend(timeslots);
        self
    }

    /// Restricts a player to the given court positions.
    pub fn with_player_localizations(
        mut self,
        player: usize,
        localizations: impl IntoIterator<Item = usize>,
    ) -> Self {
        self.player_localizations
            .entry(player)
            .or_default()
            .extend(localizations);
        self
    }

    /// Restricts a player to the given timeslot positions.
    pub fn with_player_timeslots(
        mut self,
        player: usize,
        timeslots: impl IntoIterator<Item = usize>,
    ) -> Self {
        self.player_timeslots
            .entry(player)
            .or_default()
            .extend(timeslots);
        self
    }

    /// Adds a team.
    pub fn with_team(mut self, team: Team) -> Self {
        self.teams.push(team);
        self
    }

    /// Adds a predefined matchup.
    pub fn with_matchup(mut self, matchup: Matchup) -> Self {
        self.matchups.push(matchup);
        self
    }

    /// Sets the matchup mode.
    ///
    /// The mode is stored as given; it is ignored when the model is built
    /// if the event has one match per player.
    pub fn with_matchup_mode(mut self, mode: MatchupMode) -> Self {
        self.matchup_mode = mode;
        self
    }

    /// Total number of matches: `players / players_per_match × matches_per_player`.
    pub fn number_of_matches(&self) -> usize {
        if self.players_per_match == 0 {
            return 0;
        }
        self.players.len() / self.players_per_match * self.matches_per_player
    }

    /// Court-timeslot cells used by all matches together.
    pub fn number_of_occupied_timeslots(&self) -> usize {
        self.number_of_matches() * self.timeslots_per_match
    }

    /// Matchup mode in effect, `None` when players play a single match.
    pub fn effective_matchup_mode(&self) -> Option<MatchupMode> {
        (self.matches_per_player > 1).then_some(self.matchup_mode)
    }

    /// Position of a player in the pool.
    pub fn player_index(&self, player: &Player) -> Option<usize> {
        self.players.iter().position(|p| p == player)
    }

    /// Position of a court in the pool.
    pub fn localization_index(&self, localization: &Localization) -> Option<usize> {
        self.localizations.iter().position(|l| l == localization)
    }

    /// Position of a timeslot in the domain.
    pub fn timeslot_index(&self, timeslot: &Timeslot) -> Option<usize> {
        self.timeslots.iter().position(|t| t == timeslot)
    }

    /// Whether the timeslot position is a break.
    #[inline]
    pub fn is_break(&self, timeslot: usize) -> bool {
        self.breaks.contains(&timeslot)
    }

    /// Whether the player cannot play at the timeslot.
    pub fn is_player_unavailable(&self, player: usize, timeslot: usize) -> bool {
        self.unavailable_players
            .get(&player)
            .is_some_and(|ts| ts.contains(&timeslot))
    }

    /// Whether the court is blocked at the timeslot.
    pub fn is_localization_unavailable(&self, localization: usize, timeslot: usize) -> bool {
        self.unavailable_localizations
            .get(&localization)
            .is_some_and(|ts| ts.contains(&timeslot))
    }

    /// Whether the player is restricted to other timeslots.
    pub fn is_player_limited(&self, player: usize, timeslot: usize) -> bool {
        self.player_timeslots
            .get(&player)
            .is_some_and(|ts| !ts.contains(&timeslot))
    }

    /// Whether the player may use the court.
    pub fn is_localization_allowed(&self, player: usize, localization: usize) -> bool {
        self.player_localizations
            .get(&player)
            .is_none_or(|ls| ls.contains(&localization))
    }

    /// Whether the event defines teams.
    #[inline]
    pub fn has_teams(&self) -> bool {
        !self.teams.is_empty()
    }

    /// The team a player belongs to, if any.
    pub fn team_of(&self, player: &Player) -> Option<&Team> {
        self.teams.iter().find(|t| t.contains(player))
    }

    /// Grid state of a player cell before any match is placed.
    ///
    /// Precedence: break, unavailable, limited, free.
    pub fn player_slot(&self, player: usize, timeslot: usize) -> PlayerSlot {
        if self.is_break(timeslot) {
            PlayerSlot::Break
        } else if self.is_player_unavailable(player, timeslot) {
            PlayerSlot::Unavailable
        } else if self.is_player_limited(player, timeslot) {
            PlayerSlot::Limited
        } else {
            PlayerSlot::Free
        }
    }

    /// Structural state of a court cell.
    pub fn localization_availability(&self, localization: usize, timeslot: usize) -> Availability {
        if self.is_break(timeslot) {
            Availability::Break
        } else if self.is_localization_unavailable(localization, timeslot) {
            Availability::Unavailable
        } else {
            Availability::Available
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> Event {
        Event::new(
            "Singles",
            Player::numbered("P", 4),
            Localization::numbered("C", 2),
            Timeslot::week(5),
        )
    }

    #[test]
    fn test_defaults() {
        let e = sample_event();
        assert_eq!(e.matches_per_player, 1);
        assert_eq!(e.timeslots_per_match, 2);
        assert_eq!(e.players_per_match, 2);
        assert_eq!(e.matchup_mode, MatchupMode::Any);
        assert!(!e.has_teams());
    }

    #[test]
    fn test_number_of_matches() {
        let e = sample_event().with_matches_per_player(3);
        assert_eq!(e.number_of_matches(), 6);
        assert_eq!(e.number_of_occupied_timeslots(), 12);

        let broken = sample_event().with_players_per_match(0);
        assert_eq!(broken.number_of_matches(), 0);
    }

    #[test]
    fn test_effective_matchup_mode() {
        let single = sample_event().with_matchup_mode(MatchupMode::AllEqual);
        assert_eq!(single.effective_matchup_mode(), None);

        let multi = single.with_matches_per_player(2);
        assert_eq!(multi.effective_matchup_mode(), Some(MatchupMode::AllEqual));
    }

    #[test]
    fn test_restrictions() {
        let e = sample_event()
            .with_break(4)
            .with_unavailable_player(0, [1, 2])
            .with_unavailable_localization(1, [0])
            .with_player_timeslots(2, [0, 1])
            .with_player_localizations(3, [1]);

        assert!(e.is_break(4));
        assert!(e.is_player_unavailable(0, 2));
        assert!(!e.is_player_unavailable(1, 2));
        assert!(e.is_localization_unavailable(1, 0));
        assert!(e.is_player_limited(2, 3));
        assert!(!e.is_player_limited(2, 1));
        assert!(!e.is_player_limited(0, 3));
        assert!(e.is_localization_allowed(3, 1));
        assert!(!e.is_localization_allowed(3, 0));
        assert!(e.is_localization_allowed(0, 0));
    }

    #[test]
    fn test_player_slot_precedence() {
        let e = sample_event()
            .with_break(1)
            .with_unavailable_player(0, [1, 2])
            .with_player_timeslots(0, [0, 2]);

        assert_eq!(e.player_slot(0, 1), PlayerSlot::Break);
        assert_eq!(e.player_slot(0, 2), PlayerSlot::Unavailable);
        assert_eq!(e.player_slot(0, 3), PlayerSlot::Limited);
        assert_eq!(e.player_slot(0, 0), PlayerSlot::Free);
        assert_eq!(e.localization_availability(0, 1), Availability::Break);
        assert_eq!(e.localization_availability(0, 0), Availability::Available);
    }

    #[test]
    fn test_lookups() {
        let e = sample_event().with_team(Team::new(vec![Player::new("P1"), Player::new("P2")]));
        assert_eq!(e.player_index(&Player::new("P3")), Some(2));
        assert_eq!(e.player_index(&Player::new("X")), None);
        assert_eq!(e.localization_index(&Localization::new("C2")), Some(1));
        assert_eq!(e.timeslot_index(&e.timeslots[3].clone()), Some(3));
        assert_eq!(e.team_of(&Player::new("P2")).map(|t| t.name.as_str()), Some("P1-P2"));
        assert!(e.team_of(&Player::new("P3")).is_none());
    }

    #[test]
    fn test_serde_round_trip() {
        let e = sample_event().with_unavailable_player(1, [0, 3]).with_break(2);
        let json = serde_json::to_string(&e).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }
}
