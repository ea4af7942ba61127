//! Boolean constraint model.
//!
//! A [`CpModel`] holds boolean variables and two constraint kinds:
//! bounded linear sums and logical `AND`. Variables flagged as decisions
//! are branched on first by the search; every other variable is either
//! fixed by propagation or branched on afterwards.

use std::fmt;

/// Handle to a boolean variable of a [`CpModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoolVar(usize);

impl BoolVar {
    /// Position of the variable in its model.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BoolVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

/// A constraint over boolean variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// `lo <= Σ coef·x <= hi`.
    Linear {
        /// `(coefficient, variable)` pairs.
        terms: Vec<(i64, BoolVar)>,
        /// Inclusive lower bound.
        lo: i64,
        /// Inclusive upper bound.
        hi: i64,
    },
    /// `output = inputs[0] ∧ inputs[1] ∧ …` (true for no inputs).
    And {
        /// Conjunction result.
        output: BoolVar,
        /// Conjuncts.
        inputs: Vec<BoolVar>,
    },
}

impl Constraint {
    /// Variables the constraint mentions, with repetitions.
    pub fn vars(&self) -> Vec<BoolVar> {
        match self {
            Constraint::Linear { terms, .. } => terms.iter().map(|&(_, x)| x).collect(),
            Constraint::And { output, inputs } => {
                let mut vars = Vec::with_capacity(inputs.len() + 1);
                vars.push(*output);
                vars.extend_from_slice(inputs);
                vars
            }
        }
    }
}

/// A boolean constraint satisfaction model.
#[derive(Debug, Clone, Default)]
pub struct CpModel {
    name: String,
    var_names: Vec<String>,
    fixed: Vec<Option<bool>>,
    is_decision: Vec<bool>,
    decisions: Vec<BoolVar>,
    constraints: Vec<Constraint>,
    trivially_infeasible: bool,
}

impl CpModel {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a free boolean variable.
    pub fn new_bool(&mut self, name: impl Into<String>) -> BoolVar {
        let var = BoolVar(self.var_names.len());
        self.var_names.push(name.into());
        self.fixed.push(None);
        self.is_decision.push(false);
        var
    }

    /// Adds a variable fixed to `value`.
    pub fn new_constant(&mut self, name: impl Into<String>, value: bool) -> BoolVar {
        let var = self.new_bool(name);
        self.fix(var, value);
        var
    }

    /// Fixes a variable before search.
    ///
    /// Fixing a variable to both values makes the model infeasible.
    pub fn fix(&mut self, var: BoolVar, value: bool) {
        match self.fixed[var.0] {
            Some(v) if v != value => self.trivially_infeasible = true,
            _ => self.fixed[var.0] = Some(value),
        }
    }

    /// Flags a variable for branching.
    pub fn mark_decision(&mut self, var: BoolVar) {
        if !self.is_decision[var.0] {
            self.is_decision[var.0] = true;
            self.decisions.push(var);
        }
    }

    /// Adds `lo <= Σ coef·x <= hi`.
    pub fn add_linear(&mut self, terms: Vec<(i64, BoolVar)>, lo: i64, hi: i64) {
        if lo > hi || (terms.is_empty() && !(lo..=hi).contains(&0)) {
            self.trivially_infeasible = true;
            return;
        }
        if terms.is_empty() {
            return;
        }
        self.constraints.push(Constraint::Linear { terms, lo, hi });
    }

    /// Adds `Σ vars = value`.
    pub fn add_sum_eq(&mut self, vars: &[BoolVar], value: i64) {
        self.add_sum_between(vars, value, value);
    }

    /// Adds `Σ vars <= hi`.
    pub fn add_sum_le(&mut self, vars: &[BoolVar], hi: i64) {
        self.add_sum_between(vars, i64::MIN, hi);
    }

    /// Adds `lo <= Σ vars <= hi`.
    pub fn add_sum_between(&mut self, vars: &[BoolVar], lo: i64, hi: i64) {
        let terms = vars.iter().map(|&x| (1, x)).collect();
        self.add_linear(terms, lo, hi);
    }

    /// Adds `a = b`.
    pub fn add_equal(&mut self, a: BoolVar, b: BoolVar) {
        if a != b {
            self.add_linear(vec![(1, a), (-1, b)], 0, 0);
        }
    }

    /// Adds `output = ∧ inputs`.
    pub fn add_and(&mut self, output: BoolVar, inputs: Vec<BoolVar>) {
        self.constraints.push(Constraint::And { output, inputs });
    }

    /// Number of variables.
    #[inline]
    pub fn num_vars(&self) -> usize {
        self.var_names.len()
    }

    /// Number of constraints.
    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// All variables, in creation order.
    pub fn vars(&self) -> impl Iterator<Item = BoolVar> {
        (0..self.var_names.len()).map(BoolVar)
    }

    /// All constraints, in insertion order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Decision variables, in marking order.
    pub fn decisions(&self) -> &[BoolVar] {
        &self.decisions
    }

    /// Whether the variable is a decision variable.
    pub fn is_decision(&self, var: BoolVar) -> bool {
        self.is_decision[var.0]
    }

    /// Value the variable is fixed to before search.
    pub fn fixed_value(&self, var: BoolVar) -> Option<bool> {
        self.fixed[var.0]
    }

    pub(crate) fn fixed_values(&self) -> &[Option<bool>] {
        &self.fixed
    }

    /// Name given at creation.
    pub fn var_name(&self, var: BoolVar) -> &str {
        &self.var_names[var.0]
    }

    /// Whether a contradiction was detected while posting.
    pub fn is_trivially_infeasible(&self) -> bool {
        self.trivially_infeasible
    }
}
