//! Boolean CSP backend.
//!
//! A small constraint solver specialised for the 0/1 models produced by
//! the tournament constraint builders:
//!
//! - [`CpModel`]: boolean variables, bounded linear sums, `AND`
//! - propagation to fixpoint with trail-based undo
//! - [`Search`]: resumable depth-first enumeration, one solution per call,
//!   with an optional per-call time limit
//! - [`SearchStrategy`]: variable selection heuristics
//!
//! # Reference
//! - Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming", Ch. 3-4
//! - Boussemart et al. (2004), "Boosting systematic search by weighting constraints"

mod branching;
mod model;
mod propagate;
mod search;

pub use branching::SearchStrategy;
pub use model::{BoolVar, Constraint, CpModel};
pub use search::{Search, SearchOutcome, SearchStatistics};
