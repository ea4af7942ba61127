//! Constraint propagation with a trail.
//!
//! Linear constraints use bounds reasoning: a variable is fixed when one
//! of its values would push the reachable interval of the sum outside
//! `[lo, hi]`. `AND` constraints are propagated in both directions.
//! Every assignment is logged on a trail so that the search can undo a
//! decision level in time proportional to the assignments it made.

use std::collections::VecDeque;

use super::model::{BoolVar, Constraint, CpModel};

/// Current domains and propagation queue.
#[derive(Debug, Clone)]
pub(crate) struct Propagator {
    values: Vec<Option<bool>>,
    trail: Vec<BoolVar>,
    /// Variable → constraints mentioning it (one entry per occurrence).
    watches: Vec<Vec<usize>>,
    /// Constraint → unfixed variable occurrences.
    open: Vec<usize>,
    /// Constraint → failure count + 1.
    weights: Vec<u64>,
    queue: VecDeque<usize>,
    queued: Vec<bool>,
}

impl Propagator {
    pub(crate) fn new(model: &CpModel) -> Self {
        let values = model.fixed_values().to_vec();
        let mut watches = vec![Vec::new(); model.num_vars()];
        let mut open = vec![0; model.num_constraints()];
        for (c, constraint) in model.constraints().iter().enumerate() {
            for x in constraint.vars() {
                watches[x.index()].push(c);
                if values[x.index()].is_none() {
                    open[c] += 1;
                }
            }
        }
        Self {
            values,
            trail: Vec::new(),
            watches,
            open,
            weights: vec![1; model.num_constraints()],
            queue: VecDeque::new(),
            queued: vec![false; model.num_constraints()],
        }
    }

    /// Propagates every constraint once, then to fixpoint.
    pub(crate) fn propagate_root(&mut self, model: &CpModel) -> bool {
        for c in 0..model.num_constraints() {
            self.enqueue(c);
        }
        self.propagate(model)
    }

    #[inline]
    pub(crate) fn value(&self, var: BoolVar) -> Option<bool> {
        self.values[var.index()]
    }

    #[inline]
    pub(crate) fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Constraints mentioning the variable that still have another unfixed
    /// variable, as `(count, summed weight)`.
    pub(crate) fn degree(&self, var: BoolVar) -> (usize, u64) {
        self.watches[var.index()]
            .iter()
            .filter(|&&c| self.open[c] > 1)
            .fold((0, 0), |(n, w), &c| (n + 1, w + self.weights[c]))
    }

    /// Assigns a value. Returns `false` if the variable holds the other value.
    pub(crate) fn assign(&mut self, var: BoolVar, value: bool) -> bool {
        match self.values[var.index()] {
            Some(v) => v == value,
            None => {
                self.values[var.index()] = Some(value);
                self.trail.push(var);
                for i in 0..self.watches[var.index()].len() {
                    let c = self.watches[var.index()][i];
                    self.open[c] -= 1;
                    self.enqueue(c);
                }
                true
            }
        }
    }

    /// Undoes every assignment made after the trail had length `mark`.
    pub(crate) fn undo_to(&mut self, mark: usize) {
        while self.trail.len() > mark {
            let Some(var) = self.trail.pop() else { break };
            self.values[var.index()] = None;
            for &c in &self.watches[var.index()] {
                self.open[c] += 1;
            }
        }
    }

    /// Runs the queue to fixpoint. On conflict the failing constraint's
    /// weight is bumped and the queue is cleared.
    pub(crate) fn propagate(&mut self, model: &CpModel) -> bool {
        while let Some(c) = self.queue.pop_front() {
            self.queued[c] = false;
            let ok = match &model.constraints()[c] {
                Constraint::Linear { terms, lo, hi } => self.propagate_linear(terms, *lo, *hi),
                Constraint::And { output, inputs } => self.propagate_and(*output, inputs),
            };
            if !ok {
                self.weights[c] += 1;
                while let Some(rest) = self.queue.pop_front() {
                    self.queued[rest] = false;
                }
                return false;
            }
        }
        true
    }

    fn enqueue(&mut self, c: usize) {
        if !self.queued[c] {
            self.queued[c] = true;
            self.queue.push_back(c);
        }
    }

    fn propagate_linear(&mut self, terms: &[(i64, BoolVar)], lo: i64, hi: i64) -> bool {
        let (mut min, mut max) = (0i64, 0i64);
        for &(a, x) in terms {
            match self.value(x) {
                Some(true) => {
                    min += a;
                    max += a;
                }
                Some(false) => {}
                None if a < 0 => min += a,
                None => max += a,
            }
        }
        if min > hi || max < lo {
            return false;
        }

        for &(a, x) in terms {
            if self.value(x).is_some() {
                continue;
            }
            let base_min = min - a.min(0);
            let base_max = max - a.max(0);
            let one_ok = base_min + a <= hi && base_max + a >= lo;
            let zero_ok = base_min <= hi && base_max >= lo;
            match (one_ok, zero_ok) {
                (false, false) => return false,
                (true, false) => {
                    if !self.assign(x, true) {
                        return false;
                    }
                    min = base_min + a;
                    max = base_max + a;
                }
                (false, true) => {
                    if !self.assign(x, false) {
                        return false;
                    }
                    min = base_min;
                    max = base_max;
                }
                (true, true) => {}
            }
        }
        true
    }

    fn propagate_and(&mut self, output: BoolVar, inputs: &[BoolVar]) -> bool {
        let mut any_false = false;
        let mut unfixed = None;
        let mut n_unfixed = 0;
        for &x in inputs {
            match self.value(x) {
                Some(false) => any_false = true,
                Some(true) => {}
                None => {
                    n_unfixed += 1;
                    unfixed = Some(x);
                }
            }
        }

        if any_false {
            return self.assign(output, false);
        }
        if n_unfixed == 0 {
            return self.assign(output, true);
        }
        match (self.value(output), unfixed) {
            (Some(true), _) => inputs.iter().all(|&x| self.assign(x, true)),
            (Some(false), Some(last)) if n_unfixed == 1 => self.assign(last, false),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(m: &mut CpModel, n: usize) -> Vec<BoolVar> {
        (0..n).map(|i| m.new_bool(format!("x{i}"))).collect()
    }

    #[test]
    fn test_sum_forces_all_true() {
        let mut m = CpModel::new("t");
        let x = vars(&mut m, 3);
        m.add_sum_eq(&x, 3);
        let mut p = Propagator::new(&m);
        assert!(p.propagate_root(&m));
        assert!(x.iter().all(|&v| p.value(v) == Some(true)));
    }

    #[test]
    fn test_sum_overflow_fails_at_root() {
        let mut m = CpModel::new("t");
        let x = vars(&mut m, 7);
        m.add_sum_eq(&x, 8);
        let mut p = Propagator::new(&m);
        assert!(!p.propagate_root(&m));
    }

    #[test]
    fn test_at_most_one() {
        let mut m = CpModel::new("t");
        let x = vars(&mut m, 3);
        m.add_sum_le(&x, 1);
        let mut p = Propagator::new(&m);
        assert!(p.propagate_root(&m));
        assert!(p.assign(x[1], true));
        assert!(p.propagate(&m));
        assert_eq!(p.value(x[0]), Some(false));
        assert_eq!(p.value(x[2]), Some(false));
    }

    #[test]
    fn test_negative_coefficient() {
        // x0 + x1 - 2·y = 0
        let mut m = CpModel::new("t");
        let x = vars(&mut m, 3);
        m.add_linear(vec![(1, x[0]), (1, x[1]), (-2, x[2])], 0, 0);
        let mut p = Propagator::new(&m);
        assert!(p.propagate_root(&m));
        assert!(p.assign(x[0], true));
        assert!(p.propagate(&m));
        assert_eq!(p.value(x[2]), Some(true));
        assert_eq!(p.value(x[1]), Some(true));
    }

    #[test]
    fn test_and_propagation() {
        let mut m = CpModel::new("t");
        let x = vars(&mut m, 3);
        m.add_and(x[2], vec![x[0], x[1]]);
        let mut p = Propagator::new(&m);
        assert!(p.propagate_root(&m));

        let mark = p.trail_len();
        assert!(p.assign(x[2], true));
        assert!(p.propagate(&m));
        assert_eq!(p.value(x[0]), Some(true));
        assert_eq!(p.value(x[1]), Some(true));

        p.undo_to(mark);
        assert_eq!(p.value(x[0]), None);

        assert!(p.assign(x[2], false));
        assert!(p.assign(x[0], true));
        assert!(p.propagate(&m));
        assert_eq!(p.value(x[1]), Some(false));
    }

    #[test]
    fn test_failure_bumps_weight() {
        let mut m = CpModel::new("t");
        let x = vars(&mut m, 2);
        m.add_equal(x[0], x[1]);
        let mut p = Propagator::new(&m);
        assert!(p.propagate_root(&m));
        assert_eq!(p.degree(x[0]), (1, 1));
        assert!(p.assign(x[0], true));
        assert!(p.assign(x[1], false));
        assert!(!p.propagate(&m));
        p.undo_to(0);
        assert_eq!(p.degree(x[0]), (1, 2));
    }
}
