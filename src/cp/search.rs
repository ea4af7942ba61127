//! Resumable depth-first enumeration.
//!
//! The search keeps an explicit stack of decision frames instead of
//! recursing, so it can stop at a solution, hand control back to the
//! caller and continue from the same point on the next call. Each frame
//! remembers the trail length before its decision and the value still to
//! try. Values are tried `true` first.
//!
//! # Reference
//! - Dechter (2003), "Constraint Processing", Ch. 5-6

use std::time::{Duration, Instant};

use super::branching::SearchStrategy;
use super::model::{BoolVar, CpModel};
use super::propagate::Propagator;

/// How many nodes are explored between two clock readings.
const TIME_CHECK_INTERVAL: u64 = 64;

/// Result of one [`Search::next_solution`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A new solution is available through [`Search::value`].
    Solution,
    /// Every solution has been enumerated (at least one was found).
    Exhausted,
    /// The model has no solution.
    Infeasible,
    /// The time limit expired before the next solution was found.
    TimeLimit,
}

/// Counters accumulated over all calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Decisions taken.
    pub nodes: u64,
    /// Propagation failures.
    pub failures: u64,
    /// Frames revisited while backtracking.
    pub backtracks: u64,
    /// Solutions returned.
    pub solutions: u64,
    /// Deepest decision stack.
    pub max_depth: u64,
    /// Time spent inside the search.
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    var: BoolVar,
    mark: usize,
    alternative: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Fresh,
    Running,
    AtSolution,
    Done,
}

/// Depth-first search over a [`CpModel`].
#[derive(Debug, Clone)]
pub struct Search {
    model: CpModel,
    propagator: Propagator,
    decisions: Vec<BoolVar>,
    auxiliaries: Vec<BoolVar>,
    strategy: SearchStrategy,
    time_limit: Option<Duration>,
    frames: Vec<Frame>,
    phase: Phase,
    ops_since_check: u64,
    stats: SearchStatistics,
}

impl Search {
    /// Creates a search; `time_limit` applies to each call of
    /// [`next_solution`](Self::next_solution).
    pub fn new(model: CpModel, strategy: SearchStrategy, time_limit: Option<Duration>) -> Self {
        let propagator = Propagator::new(&model);
        let mut decisions = model.decisions().to_vec();
        strategy.arrange(&mut decisions);
        let auxiliaries = model.vars().filter(|&v| !model.is_decision(v)).collect();
        Self {
            model,
            propagator,
            decisions,
            auxiliaries,
            strategy,
            time_limit,
            frames: Vec::new(),
            phase: Phase::Fresh,
            ops_since_check: 0,
            stats: SearchStatistics::default(),
        }
    }

    /// The searched model.
    pub fn model(&self) -> &CpModel {
        &self.model
    }

    /// Accumulated statistics.
    pub fn statistics(&self) -> &SearchStatistics {
        &self.stats
    }

    /// Value of a variable in the current solution (or partial state).
    pub fn value(&self, var: BoolVar) -> Option<bool> {
        self.propagator.value(var)
    }

    /// Finds the next solution.
    pub fn next_solution(&mut self) -> SearchOutcome {
        let started = Instant::now();
        self.ops_since_check = 0;
        let outcome = self.run(started);
        self.stats.elapsed += started.elapsed();
        outcome
    }

    fn run(&mut self, started: Instant) -> SearchOutcome {
        match self.phase {
            Phase::Done => return self.finished(),
            Phase::Fresh => {
                self.phase = Phase::Running;
                if self.model.is_trivially_infeasible()
                    || !self.propagator.propagate_root(&self.model)
                {
                    self.stats.failures += 1;
                    self.phase = Phase::Done;
                    return SearchOutcome::Infeasible;
                }
            }
            Phase::AtSolution => {
                self.phase = Phase::Running;
                if !self.backtrack() {
                    self.phase = Phase::Done;
                    return self.finished();
                }
            }
            Phase::Running => {}
        }

        loop {
            if self.time_expired(started) {
                return SearchOutcome::TimeLimit;
            }

            let Some(var) = self.select() else {
                self.phase = Phase::AtSolution;
                self.stats.solutions += 1;
                return SearchOutcome::Solution;
            };

            self.stats.nodes += 1;
            self.frames.push(Frame {
                var,
                mark: self.propagator.trail_len(),
                alternative: Some(false),
            });
            self.stats.max_depth = self.stats.max_depth.max(self.frames.len() as u64);

            if !(self.propagator.assign(var, true) && self.propagator.propagate(&self.model)) {
                self.stats.failures += 1;
                if !self.backtrack() {
                    self.phase = Phase::Done;
                    return self.finished();
                }
            }
        }
    }

    /// Restores the deepest frame that still has an untried value.
    /// Returns `false` when the stack is exhausted.
    fn backtrack(&mut self) -> bool {
        while let Some(frame) = self.frames.last_mut() {
            self.propagator.undo_to(frame.mark);
            self.stats.backtracks += 1;
            match frame.alternative.take() {
                Some(value) => {
                    if self.propagator.assign(frame.var, value)
                        && self.propagator.propagate(&self.model)
                    {
                        return true;
                    }
                    self.stats.failures += 1;
                }
                None => {
                    self.frames.pop();
                }
            }
        }
        false
    }

    fn select(&self) -> Option<BoolVar> {
        self.strategy
            .select(&self.decisions, &self.propagator)
            .or_else(|| SearchStrategy::InputOrder.select(&self.auxiliaries, &self.propagator))
    }

    fn time_expired(&mut self, started: Instant) -> bool {
        let Some(limit) = self.time_limit else {
            return false;
        };
        self.ops_since_check += 1;
        if self.ops_since_check < TIME_CHECK_INTERVAL {
            return false;
        }
        self.ops_since_check = 0;
        started.elapsed() > limit
    }

    fn finished(&self) -> SearchOutcome {
        if self.stats.solutions > 0 {
            SearchOutcome::Exhausted
        } else {
            SearchOutcome::Infeasible
        }
    }
}
