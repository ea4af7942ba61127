//! Court occupancy metrics.
//!
//! Regroups a schedule by court and measures how much of the available
//! court time the matches use.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Occupied cells | (court, timeslot) cells covered by a match |
//! | Available cells | (court, timeslot) cells that are neither break, blocked nor outside every domain |
//! | Occupation ratio | occupied / available (0 when nothing is available) |
//! | Court utilization | the same ratio per court |

use std::collections::BTreeMap;

use crate::models::{Availability, Localization, Player, Schedule, Timeslot};

/// State of one (court, timeslot) cell in the court-grouped view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourtSlot {
    /// Available and unused.
    Free,
    /// No play at this timeslot.
    Break,
    /// The court is blocked.
    Unavailable,
    /// Outside every domain the court belongs to.
    NotInDomain,
    /// A match is in play.
    Occupied {
        /// Participants.
        players: Vec<Player>,
        /// Timeslot index at which the match started.
        start: usize,
    },
}

impl CourtSlot {
    /// Whether a match covers the cell.
    pub fn is_occupied(&self) -> bool {
        matches!(self, CourtSlot::Occupied { .. })
    }

    /// Whether the cell counts towards available court time.
    pub fn is_available(&self) -> bool {
        matches!(self, CourtSlot::Free | CourtSlot::Occupied { .. })
    }
}

impl From<Availability> for CourtSlot {
    fn from(value: Availability) -> Self {
        match value {
            Availability::Available => CourtSlot::Free,
            Availability::Break => CourtSlot::Break,
            Availability::Unavailable => CourtSlot::Unavailable,
            Availability::NotInDomain => CourtSlot::NotInDomain,
        }
    }
}

/// A schedule regrouped by court.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizationSchedule {
    /// Row labels.
    pub localizations: Vec<Localization>,
    /// Column labels.
    pub timeslots: Vec<Timeslot>,
    /// Localization × timeslot cells.
    pub grid: Vec<Vec<CourtSlot>>,
    /// Per localization: start timeslot index → players starting there.
    pub starts: Vec<BTreeMap<usize, Vec<Player>>>,
}

impl LocalizationSchedule {
    /// Regroups `schedule` by court.
    ///
    /// Matches at a court or timeslot unknown to the schedule are skipped.
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let nt = schedule.timeslots.len();
        let mut grid: Vec<Vec<CourtSlot>> = (0..schedule.localizations.len())
            .map(|c| {
                (0..nt)
                    .map(|t| {
                        CourtSlot::from(
                            schedule
                                .localization_grid
                                .get(c)
                                .and_then(|row| row.get(t))
                                .copied()
                                .unwrap_or_default(),
                        )
                    })
                    .collect()
            })
            .collect();
        let mut starts = vec![BTreeMap::new(); schedule.localizations.len()];

        for m in &schedule.matches {
            let (Some(c), Some(s)) = (
                schedule.localization_index(&m.localization),
                schedule.timeslot_index(&m.start),
            ) else {
                continue;
            };
            for (t, timeslot) in schedule.timeslots.iter().enumerate() {
                if m.covers(timeslot) {
                    grid[c][t] = CourtSlot::Occupied {
                        players: m.players.clone(),
                        start: s,
                    };
                }
            }
            starts[c]
                .entry(s)
                .or_insert_with(Vec::new)
                .extend(m.players.iter().cloned());
        }

        Self {
            localizations: schedule.localizations.clone(),
            timeslots: schedule.timeslots.clone(),
            grid,
            starts,
        }
    }

    /// Occupied cells over all courts.
    pub fn occupied_count(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|cell| cell.is_occupied())
            .count()
    }

    /// Available cells over all courts.
    pub fn available_count(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|cell| cell.is_available())
            .count()
    }

    /// Number of match starts over all courts.
    pub fn start_count(&self) -> usize {
        self.starts.iter().map(BTreeMap::len).sum()
    }

    /// Players in play at a court and timeslot.
    pub fn players_at(&self, localization: usize, timeslot: usize) -> &[Player] {
        match self.grid.get(localization).and_then(|row| row.get(timeslot)) {
            Some(CourtSlot::Occupied { players, .. }) => players.as_slice(),
            _ => &[],
        }
    }
}

/// Occupancy indicators of a schedule.
#[derive(Debug, Clone)]
pub struct OccupancyKpi {
    /// Court cells covered by a match.
    pub occupied_count: usize,
    /// Court cells that can host play.
    pub available_count: usize,
    /// Matches started.
    pub match_starts: usize,
    /// `occupied_count / available_count` (0.0..1.0).
    pub occupation_ratio: f64,
    /// Per-court ratio, in court order.
    pub utilization_by_localization: Vec<(Localization, f64)>,
}

impl OccupancyKpi {
    /// Computes the indicators of a schedule.
    pub fn calculate(schedule: &Schedule) -> Self {
        Self::from_view(&LocalizationSchedule::from_schedule(schedule))
    }

    /// Computes the indicators of a court-grouped view.
    pub fn from_view(view: &LocalizationSchedule) -> Self {
        let utilization_by_localization = view
            .localizations
            .iter()
            .zip(&view.grid)
            .map(|(localization, row)| {
                let occupied = row.iter().filter(|c| c.is_occupied()).count();
                let available = row.iter().filter(|c| c.is_available()).count();
                (localization.clone(), ratio(occupied, available))
            })
            .collect();

        let occupied_count = view.occupied_count();
        let available_count = view.available_count();
        Self {
            occupied_count,
            available_count,
            match_starts: view.start_count(),
            occupation_ratio: ratio(occupied_count, available_count),
            utilization_by_localization,
        }
    }

    /// Whether the occupation ratio reaches `min_ratio`.
    pub fn meets_threshold(&self, min_ratio: f64) -> bool {
        self.occupation_ratio >= min_ratio
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Match, PlayerSlot};

    fn schedule(courts: usize, timeslots: usize, matches: Vec<(usize, usize, usize)>) -> Schedule {
        let players = Player::numbered("P", 4);
        let localizations = Localization::numbered("C", courts);
        let week = Timeslot::week(timeslots);
        let matches = matches
            .into_iter()
            .map(|(c, s, d)| {
                Match::new(
                    vec![players[0].clone(), players[1].clone()],
                    localizations[c].clone(),
                    week[s].clone(),
                    week[s + d - 1].clone(),
                    d,
                )
            })
            .collect();
        Schedule {
            name: "S".into(),
            grid: vec![vec![PlayerSlot::Free; timeslots]; players.len()],
            localization_grid: vec![vec![Availability::Available; timeslots]; courts],
            players,
            localizations,
            timeslots: week,
            matches,
        }
    }

    #[test]
    fn test_full_occupation() {
        let s = schedule(1, 4, vec![(0, 0, 2), (0, 2, 2)]);
        let kpi = OccupancyKpi::calculate(&s);
        assert_eq!(kpi.occupied_count, 4);
        assert_eq!(kpi.available_count, 4);
        assert_eq!(kpi.match_starts, 2);
        assert!((kpi.occupation_ratio - 1.0).abs() < 1e-10);
        assert!(kpi.meets_threshold(1.0));
    }

    #[test]
    fn test_partial_and_per_localization() {
        let s = schedule(2, 4, vec![(0, 0, 2), (1, 1, 1)]);
        let kpi = OccupancyKpi::calculate(&s);
        assert_eq!(kpi.occupied_count, 3);
        assert!((kpi.occupation_ratio - 3.0 / 8.0).abs() < 1e-10);
        assert_eq!(kpi.utilization_by_localization[0].0, Localization::new("C1"));
        assert!((kpi.utilization_by_localization[0].1 - 0.5).abs() < 1e-10);
        assert!((kpi.utilization_by_localization[1].1 - 0.25).abs() < 1e-10);
        assert!(!kpi.meets_threshold(0.5));
    }

    #[test]
    fn test_structural_cells_are_not_available() {
        let mut s = schedule(1, 4, vec![(0, 0, 1)]);
        s.localization_grid[0][1] = Availability::Break;
        s.localization_grid[0][2] = Availability::Unavailable;
        s.localization_grid[0][3] = Availability::NotInDomain;
        let kpi = OccupancyKpi::calculate(&s);
        assert_eq!(kpi.available_count, 1);
        assert!((kpi.occupation_ratio - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_schedule() {
        let kpi = OccupancyKpi::calculate(&Schedule::default());
        assert_eq!(kpi.occupied_count, 0);
        assert_eq!(kpi.available_count, 0);
        assert!((kpi.occupation_ratio - 0.0).abs() < 1e-10);
        assert!(kpi.utilization_by_localization.is_empty());
    }

    #[test]
    fn test_view_cells() {
        let s = schedule(1, 4, vec![(0, 1, 2)]);
        let view = LocalizationSchedule::from_schedule(&s);
        assert_eq!(view.grid[0][0], CourtSlot::Free);
        assert_eq!(view.players_at(0, 2), &[Player::new("P1"), Player::new("P2")]);
        assert!(view.players_at(0, 3).is_empty());
        assert_eq!(view.starts[0].keys().copied().collect::<Vec<_>>(), vec![1]);
        assert!(matches!(view.grid[0][2], CourtSlot::Occupied { start: 1, .. }));
    }

    #[test]
    fn test_round_trip_matches_kpi() {
        let s = schedule(2, 6, vec![(0, 0, 3), (1, 2, 2), (0, 4, 2)]);
        let kpi = OccupancyKpi::calculate(&s);
        let view = LocalizationSchedule::from_schedule(&s);
        let summed: usize = view
            .grid
            .iter()
            .map(|row| row.iter().filter(|c| c.is_occupied()).count())
            .sum();
        assert_eq!(summed, kpi.occupied_count);
        assert_eq!(summed, 7);
    }
}
