//! Teams and predefined matchups.
//!
//! A team is a set of two or more players that always play together: same
//! court, same timeslots. A matchup is a set of players that must meet in
//! the same match a required number of times.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::Player;

/// A group of players sharing every assignment within an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team {
    /// Team name. Defaults to the member names joined with `-`.
    pub name: String,
    /// Members, in declaration order.
    pub players: Vec<Player>,
}

impl Team {
    /// Creates a team from its members.
    pub fn new(players: Vec<Player>) -> Self {
        let name = players
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join("-");
        Self { name, players }
    }

    /// Sets the team name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether the player belongs to this team.
    pub fn contains(&self, player: &Player) -> bool {
        self.players.contains(player)
    }

    /// Number of members.
    #[inline]
    pub fn size(&self) -> usize {
        self.players.len()
    }

    /// Whether a member is listed more than once.
    pub fn has_duplicates(&self) -> bool {
        has_duplicates(&self.players)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// How many times a predefined matchup must occur when players play
/// more than one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchupMode {
    /// The matchup occurs exactly once.
    AllDifferent,
    /// The matchup occurs in every match of its players.
    AllEqual,
    /// The matchup occurs at least once and at most once per match played.
    #[default]
    Any,
}

impl MatchupMode {
    /// Inclusive bounds on the number of occurrences of a matchup.
    pub fn bounds(self, matches_per_player: usize) -> (usize, usize) {
        match self {
            MatchupMode::AllDifferent => (1, 1),
            MatchupMode::AllEqual => (matches_per_player, matches_per_player),
            MatchupMode::Any => (1, matches_per_player),
        }
    }
}

/// A predefined set of players that must compete together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Matchup {
    /// Players that meet in the same match.
    pub players: Vec<Player>,
    /// Exact number of occurrences. `None` = decided by the event's
    /// [`MatchupMode`] (or once, for single-match events).
    pub occurrences: Option<usize>,
}

impl Matchup {
    /// Creates a matchup between the given players.
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            players,
            occurrences: None,
        }
    }

    /// Requires the matchup to occur exactly `occurrences` times.
    pub fn with_occurrences(mut self, occurrences: usize) -> Self {
        self.occurrences = Some(occurrences);
        self
    }

    /// Whether the player takes part in this matchup.
    pub fn contains(&self, player: &Player) -> bool {
        self.players.contains(player)
    }

    /// Whether a player is listed more than once.
    pub fn has_duplicates(&self) -> bool {
        has_duplicates(&self.players)
    }
}

impl fmt::Display for Matchup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.players.iter().map(|p| p.name.as_str()).collect();
        write!(f, "[{}]", names.join(" vs "))
    }
}

fn has_duplicates(players: &[Player]) -> bool {
    let mut seen = HashSet::with_capacity(players.len());
    players.iter().any(|p| !seen.insert(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_default_name() {
        let team = Team::new(vec![Player::new("A"), Player::new("B")]);
        assert_eq!(team.name, "A-B");
        assert_eq!(team.size(), 2);
        assert!(team.contains(&Player::new("B")));
        assert!(!team.has_duplicates());

        let named = team.with_name("Blue");
        assert_eq!(named.to_string(), "Blue");
    }

    #[test]
    fn test_team_duplicates() {
        let team = Team::new(vec![Player::new("A"), Player::new("A")]);
        assert!(team.has_duplicates());
    }

    #[test]
    fn test_matchup_mode_bounds() {
        assert_eq!(MatchupMode::AllDifferent.bounds(3), (1, 1));
        assert_eq!(MatchupMode::AllEqual.bounds(3), (3, 3));
        assert_eq!(MatchupMode::Any.bounds(3), (1, 3));
        assert_eq!(MatchupMode::default(), MatchupMode::Any);
    }

    #[test]
    fn test_matchup_display() {
        let m = Matchup::new(vec![Player::new("A"), Player::new("B")]).with_occurrences(2);
        assert_eq!(m.to_string(), "[A vs B]");
        assert_eq!(m.occurrences, Some(2));
        assert!(m.contains(&Player::new("A")));
    }
}
