//! Team constraints.
//!
//! Members of a team have identical `occupies` values over every
//! (court, timeslot) of their event, so they always share a match.
//! Equality is chained between consecutive members.

use std::collections::HashSet;

use super::{EventConstraint, ModelContext};
use crate::error::{ConfigError, ConfigResult};
use crate::models::{Event, Team};

/// Team co-location.
#[derive(Debug, Clone, Copy)]
pub struct Teams;

impl EventConstraint for Teams {
    fn name(&self) -> &'static str {
        "Teams"
    }

    fn post(&self, ctx: &mut ModelContext<'_>) -> ConfigResult<()> {
        let members = team_members(ctx.event)?;
        for indices in members {
            for pair in indices.windows(2) {
                for c in 0..ctx.vars.localizations() {
                    for t in 0..ctx.vars.timeslots() {
                        ctx.model.add_equal(
                            ctx.vars.occupies(pair[0], c, t),
                            ctx.vars.occupies(pair[1], c, t),
                        );
                    }
                }
            }
        }
        Ok(())
    }
}

/// Player indices of every team, after checking that each team has at
/// least two distinct members of the event and that no player belongs to
/// two teams.
pub(crate) fn team_members(event: &Event) -> ConfigResult<Vec<Vec<usize>>> {
    let mut assigned = HashSet::new();
    let mut out = Vec::with_capacity(event.teams.len());
    for team in &event.teams {
        if team.size() < 2 {
            return Err(malformed(event, team, "a team needs at least 2 players"));
        }
        if team.has_duplicates() {
            return Err(malformed(event, team, "a player is listed twice"));
        }
        let mut indices = Vec::with_capacity(team.size());
        for player in &team.players {
            let Some(p) = event.player_index(player) else {
                return Err(malformed(
                    event,
                    team,
                    &format!("player '{player}' is not in the event"),
                ));
            };
            if !assigned.insert(p) {
                return Err(malformed(
                    event,
                    team,
                    &format!("player '{player}' belongs to another team"),
                ));
            }
            indices.push(p);
        }
        out.push(indices);
    }
    Ok(out)
}

fn malformed(event: &Event, team: &Team, reason: &str) -> ConfigError {
    ConfigError::MalformedTeam {
        event: event.name.clone(),
        team: team.name.clone(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::testing::first_solution;
    use crate::models::{Localization, Player, Timeslot};

    fn doubles() -> Event {
        Event::new(
            "Doubles",
            Player::numbered("P", 8),
            Localization::numbered("C", 2),
            Timeslot::week(4),
        )
        .with_players_per_match(4)
    }

    #[test]
    fn test_members_share_every_slot() {
        let p = Player::numbered("P", 8);
        let event = doubles()
            .with_team(Team::new(vec![p[0].clone(), p[5].clone()]))
            .with_team(Team::new(vec![p[2].clone(), p[7].clone()]));
        let (search, vars) = first_solution(&event).unwrap();

        for (a, b) in [(0, 5), (2, 7)] {
            for c in 0..2 {
                for t in 0..4 {
                    assert_eq!(
                        search.value(vars.occupies(a, c, t)),
                        search.value(vars.occupies(b, c, t))
                    );
                }
            }
        }
    }

    #[test]
    fn test_malformed_teams() {
        let p = Player::numbered("P", 8);

        let single = doubles().with_team(Team::new(vec![p[0].clone()]));
        assert!(matches!(
            team_members(&single),
            Err(ConfigError::MalformedTeam { .. })
        ));

        let duplicate = doubles().with_team(Team::new(vec![p[0].clone(), p[0].clone()]));
        assert!(team_members(&duplicate).is_err());

        let outsider = doubles().with_team(Team::new(vec![p[0].clone(), Player::new("X")]));
        let err = team_members(&outsider).unwrap_err();
        assert!(err.to_string().contains("'X' is not in the event"));

        let overlap = doubles()
            .with_team(Team::new(vec![p[0].clone(), p[1].clone()]))
            .with_team(Team::new(vec![p[1].clone(), p[2].clone()]));
        assert!(team_members(&overlap).is_err());
    }

    #[test]
    fn test_team_indices() {
        let p = Player::numbered("P", 8);
        let event = doubles().with_team(Team::new(vec![p[3].clone(), p[1].clone(), p[6].clone()]));
        assert_eq!(team_members(&event).unwrap(), vec![vec![3, 1, 6]]);
    }
}
