//! Tournament solver.
//!
//! # Lifecycle
//!
//! ```text
//! Unbuilt ──build──▶ ModelBuilt ──solve──▶ SolutionFound ──next──▶ SolutionFound
//!                                   │                        │
//!                                   ▼                        ▼
//!                               Infeasible             NoMoreSolutions
//! ```
//!
//! `build` validates the tournament, creates the variables of every event,
//! posts the per-event families and the constraints linking events, and
//! hands the model to a resumable [`Search`]. Every solution is read back
//! into per-event schedules and a combined schedule; the previous
//! solution's schedules are replaced, never mutated.

use tracing::{debug, info, trace};

use super::combine::combine_schedules;
use super::config::SolverConfig;
use super::extract::{extract_schedule, grid_from_occupation};
use crate::constraints::{post_event, post_tournament, EventVariables};
use crate::cp::{CpModel, Search, SearchOutcome, SearchStatistics};
use crate::error::{ConfigError, SolveError, SolveResult};
use crate::models::{Schedule, Tournament};
use crate::validation::validate_tournament;

/// Solver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Nothing built yet.
    Unbuilt,
    /// Model built, no search run.
    ModelBuilt,
    /// The current schedules hold a solution.
    SolutionFound,
    /// Enumeration ended after at least one solution.
    NoMoreSolutions,
    /// No solution was found.
    Infeasible,
}

/// Why the search stopped without a new solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The search proved there is no solution.
    InfeasibilityProven,
    /// Every solution has been enumerated.
    Exhausted,
    /// The time limit expired.
    TimeLimitReached,
}

#[derive(Debug)]
struct Built {
    search: Search,
    vars: Vec<EventVariables>,
}

#[derive(Debug)]
struct Solution {
    schedules: Vec<Schedule>,
    combined: Schedule,
}

/// Constraint-based tournament solver.
///
/// # Example
///
/// ```
/// use u_tournament::models::{Event, Localization, Player, Timeslot, Tournament};
/// use u_tournament::scheduler::{SolverConfig, TournamentSolver};
///
/// let event = Event::new(
///     "Singles",
///     Player::numbered("P", 4),
///     Localization::numbered("Court ", 1),
///     Timeslot::week(4),
/// );
/// let tournament = Tournament::single(event);
/// let mut solver = TournamentSolver::new(&tournament, SolverConfig::default()).unwrap();
///
/// assert!(solver.solve().unwrap());
/// assert_eq!(solver.combined_schedule().unwrap().match_count(), 2);
/// ```
#[derive(Debug)]
pub struct TournamentSolver<'a> {
    tournament: &'a Tournament,
    config: SolverConfig,
    status: SolverStatus,
    termination: Option<Termination>,
    built: Option<Built>,
    solution: Option<Solution>,
}

impl<'a> TournamentSolver<'a> {
    /// Creates a solver. The configuration is checked here; the tournament
    /// is validated when the model is built.
    pub fn new(tournament: &'a Tournament, config: SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tournament,
            config,
            status: SolverStatus::Unbuilt,
            termination: None,
            built: None,
            solution: None,
        })
    }

    /// The solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Builds the model, discarding any previous search.
    pub fn build(&mut self) -> SolveResult<()> {
        validate_tournament(self.tournament)?;

        let mut model = CpModel::new(self.tournament.name.clone());
        let vars: Vec<EventVariables> = self
            .tournament
            .events
            .iter()
            .enumerate()
            .map(|(i, event)| {
                EventVariables::create(&mut model, event, i, self.config.fill_timeslots_first)
            })
            .collect();

        for (event, event_vars) in self.tournament.events.iter().zip(&vars) {
            post_event(&mut model, event, event_vars)?;
        }
        let linking = post_tournament(&mut model, self.tournament, &vars);

        debug!(
            tournament = %self.tournament.name,
            events = self.tournament.events.len(),
            variables = model.num_vars(),
            decisions = model.decisions().len(),
            constraints = model.num_constraints(),
            linking,
            "model built"
        );

        self.built = Some(Built {
            search: Search::new(model, self.config.strategy, self.config.time_limit()),
            vars,
        });
        self.status = SolverStatus::ModelBuilt;
        self.termination = None;
        self.solution = None;
        Ok(())
    }

    /// Finds a first solution. Returns `Ok(false)` when there is none
    /// (or none was found within the time limit).
    ///
    /// Calling `solve` again restarts the enumeration from scratch.
    pub fn solve(&mut self) -> SolveResult<bool> {
        if self.status != SolverStatus::ModelBuilt {
            self.build()?;
        }
        self.advance()
    }

    /// Finds the next solution of the enumeration started by
    /// [`solve`](Self::solve).
    pub fn next_solution(&mut self) -> SolveResult<bool> {
        match self.status {
            SolverStatus::Unbuilt | SolverStatus::ModelBuilt => Err(SolveError::InvalidState(
                "next_solution() requires a successful solve()".into(),
            )),
            SolverStatus::NoMoreSolutions | SolverStatus::Infeasible => Ok(false),
            SolverStatus::SolutionFound => self.advance(),
        }
    }

    fn advance(&mut self) -> SolveResult<bool> {
        let Some(built) = self.built.as_mut() else {
            return Err(SolveError::InvalidState("model not built".into()));
        };

        let outcome = built.search.next_solution();
        let stats = built.search.statistics();
        info!(
            tournament = %self.tournament.name,
            ?outcome,
            nodes = stats.nodes,
            failures = stats.failures,
            solutions = stats.solutions,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "search step finished"
        );

        let (status, termination) = match outcome {
            SearchOutcome::Solution => {
                let solution = read_solution(self.tournament, built)?;
                trace!(
                    solution = stats.solutions,
                    matches = solution.combined.match_count(),
                    "solution materialized"
                );
                self.solution = Some(solution);
                self.status = SolverStatus::SolutionFound;
                self.termination = None;
                return Ok(true);
            }
            SearchOutcome::Exhausted => (SolverStatus::NoMoreSolutions, Termination::Exhausted),
            SearchOutcome::Infeasible => {
                (SolverStatus::Infeasible, Termination::InfeasibilityProven)
            }
            SearchOutcome::TimeLimit if stats.solutions > 0 => {
                (SolverStatus::NoMoreSolutions, Termination::TimeLimitReached)
            }
            SearchOutcome::TimeLimit => (SolverStatus::Infeasible, Termination::TimeLimitReached),
        };
        self.status = status;
        self.termination = Some(termination);
        self.solution = None;
        Ok(false)
    }

    /// Current state.
    pub fn status(&self) -> SolverStatus {
        self.status
    }

    /// Why the last call returned `false`.
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Per-event schedules of the current solution, in event order.
    pub fn schedules(&self) -> Option<&[Schedule]> {
        self.solution.as_ref().map(|s| s.schedules.as_slice())
    }

    /// Schedule of one event in the current solution.
    pub fn schedule(&self, event_index: usize) -> Option<&Schedule> {
        self.solution.as_ref()?.schedules.get(event_index)
    }

    /// Tournament-wide schedule of the current solution.
    pub fn combined_schedule(&self) -> Option<&Schedule> {
        self.solution.as_ref().map(|s| &s.combined)
    }

    /// Search statistics since the last build.
    pub fn statistics(&self) -> Option<&SearchStatistics> {
        self.built.as_ref().map(|b| b.search.statistics())
    }

    /// Solutions enumerated since the last build.
    pub fn solutions_found(&self) -> u64 {
        self.statistics().map_or(0, |s| s.solutions)
    }
}

fn read_solution(tournament: &Tournament, built: &Built) -> SolveResult<Solution> {
    let schedules = tournament
        .events
        .iter()
        .zip(&built.vars)
        .map(|(event, vars)| {
            let grid = grid_from_occupation(event, |p, c, t| {
                built.search.value(vars.occupies(p, c, t)) == Some(true)
            });
            extract_schedule(event, grid)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let combined = combine_schedules(tournament.name.clone(), &schedules);
    Ok(Solution {
        schedules,
        combined,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::cp::SearchStrategy;
    use crate::models::{Event, Localization, Player, PlayerSlot, Team, Timeslot};
    use crate::scheduler::OccupancyKpi;
    use crate::validation::ValidationErrorKind;

    fn singles(players: usize, courts: usize, timeslots: usize) -> Event {
        Event::new(
            "Singles",
            Player::numbered("P", players),
            Localization::numbered("C", courts),
            Timeslot::week(timeslots),
        )
    }

    fn assert_consistent(schedule: &Schedule, event: &Event) {
        // Duration integrity.
        for m in &schedule.matches {
            assert_eq!(m.end.order - m.start.order + 1, m.duration as u32);
            let c = schedule.localization_index(&m.localization).unwrap();
            let s = schedule.timeslot_index(&m.start).unwrap();
            for player in &m.players {
                let p = schedule.player_index(player).unwrap();
                for t in s..s + m.duration {
                    assert_eq!(schedule.grid[p][t], PlayerSlot::Occupied { localization: c });
                }
            }
        }
        // Grid / match consistency.
        assert_eq!(schedule.match_count(), event.number_of_matches());
        // No court hosts two matches at once.
        for timeslot in &schedule.timeslots {
            let at = schedule.matches_at_timeslot(timeslot);
            let courts: HashSet<_> = at.iter().map(|m| &m.localization).collect();
            assert_eq!(courts.len(), at.len());
        }
    }

    #[test]
    fn test_eight_players_one_court() {
        let t = Tournament::single(singles(8, 1, 8));
        let mut solver = TournamentSolver::new(&t, SolverConfig::default()).unwrap();
        assert_eq!(solver.status(), SolverStatus::Unbuilt);

        assert!(solver.solve().unwrap());
        assert_eq!(solver.status(), SolverStatus::SolutionFound);

        let combined = solver.combined_schedule().unwrap();
        assert_eq!(combined.match_count(), 4);
        for m in &combined.matches {
            assert_eq!(m.players.len(), 2);
            assert_ne!(m.players[0], m.players[1]);
        }
        assert_consistent(solver.schedule(0).unwrap(), &t.events[0]);

        let kpi = OccupancyKpi::calculate(combined);
        assert!((kpi.occupation_ratio - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_insufficient_timeslots_is_infeasible() {
        let t = Tournament::single(singles(8, 1, 7));
        let mut solver = TournamentSolver::new(&t, SolverConfig::default()).unwrap();
        assert!(!solver.solve().unwrap());
        assert_eq!(solver.status(), SolverStatus::Infeasible);
        assert_eq!(solver.termination(), Some(Termination::InfeasibilityProven));
        assert!(solver.schedules().is_none());
        assert!(!solver.next_solution().unwrap());
    }

    #[test]
    fn test_doubles_two_courts() {
        let event = singles(24, 2, 6).with_players_per_match(4);
        let t = Tournament::single(event);
        let mut solver = TournamentSolver::new(&t, SolverConfig::default()).unwrap();
        assert!(solver.solve().unwrap());

        let schedule = solver.schedule(0).unwrap();
        assert_eq!(schedule.match_count(), 6);
        assert!(schedule.matches.iter().all(|m| m.players.len() == 4));
        assert_consistent(schedule, &t.events[0]);

        let kpi = OccupancyKpi::calculate(solver.combined_schedule().unwrap());
        assert!((kpi.occupation_ratio - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_enumeration() {
        let t = Tournament::single(singles(4, 1, 4));
        let config = SolverConfig::default().with_strategy(SearchStrategy::InputOrder);
        let mut solver = TournamentSolver::new(&t, config).unwrap();

        assert!(solver.solve().unwrap());
        let mut seen = vec![solver.combined_schedule().unwrap().clone()];
        while solver.next_solution().unwrap() {
            let s = solver.combined_schedule().unwrap().clone();
            assert!(!seen.contains(&s));
            seen.push(s);
        }

        // Three pairings, two orders each.
        assert_eq!(seen.len(), 6);
        assert_eq!(solver.solutions_found(), 6);
        assert_eq!(solver.status(), SolverStatus::NoMoreSolutions);
        assert_eq!(solver.termination(), Some(Termination::Exhausted));
        assert!(solver.combined_schedule().is_none());
        assert!(!solver.next_solution().unwrap());
    }

    #[test]
    fn test_enumeration_is_reproducible() {
        let t = Tournament::single(singles(4, 2, 4));
        let config = SolverConfig::default().with_strategy(SearchStrategy::Random { seed: 7 });
        let run = || {
            let mut solver = TournamentSolver::new(&t, config.clone()).unwrap();
            let mut out = Vec::new();
            if solver.solve().unwrap() {
                out.push(solver.combined_schedule().unwrap().clone());
            }
            for _ in 0..3 {
                if solver.next_solution().unwrap() {
                    out.push(solver.combined_schedule().unwrap().clone());
                }
            }
            out
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_solve_restarts() {
        let t = Tournament::single(singles(4, 1, 4));
        let mut solver = TournamentSolver::new(&t, SolverConfig::default()).unwrap();
        assert!(solver.solve().unwrap());
        let first = solver.combined_schedule().unwrap().clone();
        assert!(solver.next_solution().unwrap());
        assert!(solver.solve().unwrap());
        assert_eq!(solver.combined_schedule().unwrap(), &first);
        assert_eq!(solver.solutions_found(), 1);
    }

    #[test]
    fn test_next_solution_before_solve() {
        let t = Tournament::single(singles(4, 1, 4));
        let mut solver = TournamentSolver::new(&t, SolverConfig::default()).unwrap();
        assert!(matches!(
            solver.next_solution(),
            Err(SolveError::InvalidState(_))
        ));
        solver.build().unwrap();
        assert_eq!(solver.status(), SolverStatus::ModelBuilt);
        assert!(solver.next_solution().is_err());
    }

    #[test]
    fn test_negative_time_limit() {
        let t = Tournament::single(singles(4, 1, 4));
        let err = TournamentSolver::new(&t, SolverConfig::default().with_time_limit_ms(-5))
            .unwrap_err();
        assert_eq!(err, ConfigError::NegativeTimeLimit(-5));
    }

    #[test]
    fn test_validation_errors_are_batched() {
        let bad = Event::new("", vec![], Localization::numbered("C", 1), vec![]);
        let t = Tournament::new("", vec![bad]);
        let mut solver = TournamentSolver::new(&t, SolverConfig::default()).unwrap();
        match solver.solve() {
            Err(SolveError::Validation(report)) => {
                assert!(report.has(&ValidationErrorKind::MissingName));
                assert!(report.has(&ValidationErrorKind::EmptyPlayers));
                assert!(report.has(&ValidationErrorKind::EmptyTimeslots));
                assert!(report.len() >= 4);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(solver.status(), SolverStatus::Unbuilt);
    }

    #[test]
    fn test_malformed_team_is_config_error() {
        let p = Player::numbered("P", 4);
        let event = singles(4, 1, 4).with_team(Team::new(vec![p[0].clone()]));
        let t = Tournament::single(event);
        let mut solver = TournamentSolver::new(&t, SolverConfig::default()).unwrap();
        assert!(matches!(
            solver.solve(),
            Err(SolveError::Config(ConfigError::MalformedTeam { .. }))
        ));
    }

    #[test]
    fn test_shared_player_across_events() {
        let week = Timeslot::week(4);
        let a = Event::new(
            "A",
            vec![Player::new("X"), Player::new("Y")],
            vec![Localization::new("C1")],
            week.clone(),
        )
        .with_timeslots_per_match(1);
        let b = Event::new(
            "B",
            vec![Player::new("X"), Player::new("Z")],
            vec![Localization::new("C1")],
            week,
        )
        .with_timeslots_per_match(1);
        let t = Tournament::new("T", vec![a, b]);
        let mut solver = TournamentSolver::new(&t, SolverConfig::default()).unwrap();
        assert!(solver.solve().unwrap());

        let combined = solver.combined_schedule().unwrap();
        assert_eq!(combined.match_count(), 2);
        assert_eq!(combined.players.len(), 3);
        assert_eq!(combined.occupied_timeslots_of(&Player::new("X")).len(), 2);
        assert_ne!(combined.matches[0].start, combined.matches[1].start);
        assert!(combined.matches[0].start.is_before(&combined.matches[1].start));
    }

    #[test]
    fn test_shared_timeslots_described_differently() {
        let a = Event::new(
            "A",
            vec![Player::new("X"), Player::new("Y")],
            vec![Localization::new("C1")],
            Timeslot::week(2),
        )
        .with_timeslots_per_match(1);
        let b = Event::new(
            "B",
            vec![Player::new("X"), Player::new("Z")],
            vec![Localization::new("C1")],
            (0..2).map(Timeslot::undefined).collect(),
        )
        .with_timeslots_per_match(1);
        let t = Tournament::new("T", vec![a, b]);
        assert_eq!(t.timeslots().len(), 2);

        let mut solver = TournamentSolver::new(&t, SolverConfig::default()).unwrap();
        assert!(solver.solve().unwrap());
        let combined = solver.combined_schedule().unwrap();
        assert_eq!(combined.timeslots.len(), 2);
        assert_eq!(combined.match_count(), 2);
        assert_ne!(combined.matches[0].start.order, combined.matches[1].start.order);
        assert_eq!(combined.occupied_timeslots_of(&Player::new("X")).len(), 2);
    }

    #[test]
    fn test_time_limit_without_solution() {
        // Twelve players restricted to eleven timeslots: infeasible, but
        // only an exhaustive search can tell.
        let mut event = singles(23, 1, 23)
            .with_players_per_match(1)
            .with_timeslots_per_match(1);
        for p in 0..12 {
            event = event.with_player_timeslots(p, 0..11);
        }
        let t = Tournament::single(event);
        let config = SolverConfig::default().with_time_limit_ms(200);
        let mut solver = TournamentSolver::new(&t, config).unwrap();

        assert!(!solver.solve().unwrap());
        assert_eq!(solver.status(), SolverStatus::Infeasible);
        assert_eq!(solver.termination(), Some(Termination::TimeLimitReached));
        assert!(solver.schedules().is_none());
        assert!(solver.statistics().unwrap().nodes > 0);
        assert!(!solver.next_solution().unwrap());
    }
}
