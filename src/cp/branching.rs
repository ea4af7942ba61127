//! Variable selection strategies.
//!
//! Every strategy is deterministic: ties go to the variable that comes
//! first in the decision order, and the random strategy only shuffles
//! that order once, from an explicit seed.
//!
//! # Reference
//! - Boussemart et al. (2004), "Boosting systematic search by weighting constraints"
//! - Haralick & Elliott (1980), "Increasing tree search efficiency for constraint satisfaction problems"

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::model::BoolVar;
use super::propagate::Propagator;

/// How the search picks the next variable to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// First unfixed variable in the decision order.
    InputOrder,
    /// Unfixed variable involved in the most constraints that still have
    /// another unfixed variable.
    MostConstrained,
    /// Domain over weighted degree: like [`MostConstrained`](Self::MostConstrained)
    /// but each constraint counts with its failure weight.
    #[default]
    DomOverWDeg,
    /// Input order after a seeded shuffle of the decision variables.
    Random {
        /// Shuffle seed.
        seed: u64,
    },
}

impl SearchStrategy {
    /// Strategy name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            SearchStrategy::InputOrder => "InputOrder",
            SearchStrategy::MostConstrained => "MostConstrained",
            SearchStrategy::DomOverWDeg => "DomOverWDeg",
            SearchStrategy::Random { .. } => "Random",
        }
    }

    /// Reorders the decision variables before search.
    pub(crate) fn arrange(&self, decisions: &mut [BoolVar]) {
        if let SearchStrategy::Random { seed } = self {
            let mut rng = StdRng::seed_from_u64(*seed);
            decisions.shuffle(&mut rng);
        }
    }

    /// Picks an unfixed variable among `candidates`.
    pub(crate) fn select(&self, candidates: &[BoolVar], propagator: &Propagator) -> Option<BoolVar> {
        let mut unfixed = candidates
            .iter()
            .copied()
            .filter(|&x| propagator.value(x).is_none());
        match self {
            SearchStrategy::InputOrder | SearchStrategy::Random { .. } => unfixed.next(),
            SearchStrategy::MostConstrained => {
                best_by(unfixed, |x| propagator.degree(x).0 as u64)
            }
            SearchStrategy::DomOverWDeg => best_by(unfixed, |x| propagator.degree(x).1),
        }
    }
}

/// First variable with the highest score.
fn best_by<I, F>(vars: I, score: F) -> Option<BoolVar>
where
    I: Iterator<Item = BoolVar>,
    F: Fn(BoolVar) -> u64,
{
    let mut best: Option<(BoolVar, u64)> = None;
    for x in vars {
        let s = score(x);
        if best.is_none_or(|(_, b)| s > b) {
            best = Some((x, s));
        }
    }
    best.map(|(x, _)| x)
}
