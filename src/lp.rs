//! Linear programs over non-negative continuous variables,
//! and the interface to the solvers.

use crate::error::Error;
use sprs::CsVec;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Display;

/// Direction of the optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

/// Comparison between the left side of a constraint and its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    AtLeast,
    AtMost,
    Equal,
}

impl Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Comparison::AtLeast => write!(f, "≥"),
            Comparison::AtMost => write!(f, "≤"),
            Comparison::Equal => write!(f, "="),
        }
    }
}

/// The family a constraint comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Cliques containing the vertex have total weight at least one.
    Covering(usize),
    /// The empty set has entropy zero.
    Normalization,
    /// A single vertex has entropy at most one.
    Boundedness(usize),
    /// The vertex is determined by its neighbourhood.
    LocalDependency(usize),
    Monotonicity,
    Submodularity,
}

impl Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConstraintKind::Covering(v) => write!(f, "covering of {}", v),
            ConstraintKind::Normalization => write!(f, "normalization"),
            ConstraintKind::Boundedness(v) => write!(f, "boundedness of {}", v),
            ConstraintKind::LocalDependency(v) => write!(f, "local dependency of {}", v),
            ConstraintKind::Monotonicity => write!(f, "monotonicity"),
            ConstraintKind::Submodularity => write!(f, "submodularity"),
        }
    }
}

/// A linear combination of variables, built term by term.
///
/// Terms on the same variable are summed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinExpr(BTreeMap<usize, f64>);

impl LinExpr {
    pub fn new() -> Self {
        Self::default()
    }
    /// Add `coeff * x_var` to the expression.
    pub fn term(mut self, var: usize, coeff: f64) -> Self {
        *self.0.entry(var).or_insert(0.) += coeff;
        self
    }
    fn into_row(self, dim: usize) -> CsVec<f64> {
        let mut row = CsVec::empty(dim);
        for (i, val) in self.0 {
            assert!(i < dim, "variable {} out of range", i);
            if val != 0. {
                row.append(i, val)
            }
        }
        row
    }
}

impl FromIterator<(usize, f64)> for LinExpr {
    fn from_iter<I: IntoIterator<Item = (usize, f64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |e, (var, coeff)| e.term(var, coeff))
    }
}

/// The constraint `row . x (cmp) rhs`.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub row: CsVec<f64>,
    pub cmp: Comparison,
    pub rhs: f64,
}

impl Constraint {
    /// Value of the left side at the point `x`.
    pub fn lhs(&self, x: &[f64]) -> f64 {
        self.row.iter().map(|(i, val)| val * x[i]).sum()
    }
    pub fn is_satisfied(&self, x: &[f64], tolerance: f64) -> bool {
        let lhs = self.lhs(x);
        match self.cmp {
            Comparison::AtLeast => lhs >= self.rhs - tolerance,
            Comparison::AtMost => lhs <= self.rhs + tolerance,
            Comparison::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]\t", self.kind)?;
        for (k, (i, val)) in self.row.iter().enumerate() {
            if k > 0 {
                write!(f, " ")?
            }
            write!(f, "{:+}*x{}", val, i)?
        }
        write!(f, " {} {}", self.cmp, self.rhs)
    }
}

/// A linear program on named variables constrained to be non-negative.
#[derive(Debug, Clone)]
pub struct Model {
    variables: Vec<String>,
    sense: Sense,
    objective: CsVec<f64>,
    constraints: Vec<Constraint>,
}

impl Model {
    /// Create a model with a null objective and no constraint.
    pub fn new(sense: Sense, variables: Vec<String>) -> Self {
        let n = variables.len();
        Self {
            variables,
            sense,
            objective: CsVec::empty(n),
            constraints: Vec::new(),
        }
    }
    pub fn set_objective(&mut self, expr: LinExpr) {
        self.objective = expr.into_row(self.n_vars())
    }
    pub fn reserve(&mut self, additional: usize) {
        self.constraints.reserve(additional)
    }
    fn push(&mut self, kind: ConstraintKind, expr: LinExpr, cmp: Comparison, rhs: f64) {
        let row = expr.into_row(self.n_vars());
        self.constraints.push(Constraint {
            kind,
            row,
            cmp,
            rhs,
        })
    }
    /// Add the constraint "`expr` ≥ `rhs`".
    pub fn at_least(&mut self, kind: ConstraintKind, expr: LinExpr, rhs: f64) {
        self.push(kind, expr, Comparison::AtLeast, rhs)
    }
    /// Add the constraint "`expr` ≤ `rhs`".
    pub fn at_most(&mut self, kind: ConstraintKind, expr: LinExpr, rhs: f64) {
        self.push(kind, expr, Comparison::AtMost, rhs)
    }
    /// Add the constraint "`expr` = `rhs`".
    pub fn equal(&mut self, kind: ConstraintKind, expr: LinExpr, rhs: f64) {
        self.push(kind, expr, Comparison::Equal, rhs)
    }
    pub fn n_vars(&self) -> usize {
        self.variables.len()
    }
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
    pub fn sense(&self) -> Sense {
        self.sense
    }
    pub fn objective(&self) -> &CsVec<f64> {
        &self.objective
    }
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
    /// Number of constraints whose kind satisfies `pred`.
    pub fn count<P: Fn(&ConstraintKind) -> bool>(&self, pred: P) -> usize {
        self.constraints.iter().filter(|c| pred(&c.kind)).count()
    }
    pub fn objective_value(&self, x: &[f64]) -> f64 {
        self.objective.iter().map(|(i, val)| val * x[i]).sum()
    }
    /// First constraint (or negative variable) violated by `x`, if any.
    pub fn violation(&self, x: &[f64], tolerance: f64) -> Option<String> {
        if let Some(i) = (0..self.n_vars()).find(|&i| x[i] < -tolerance) {
            return Some(format!("{} = {} is negative", self.variables[i], x[i]));
        }
        self.constraints
            .iter()
            .find(|c| !c.is_satisfied(x, tolerance))
            .map(|c| format!("{} (lhs = {})", c, c.lhs(x)))
    }
}

/// Outcome of a call to a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Optimal,
    Infeasible,
    Unbounded,
    NotSolved,
}

impl Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Status::Optimal => write!(f, "Optimal"),
            Status::Infeasible => write!(f, "Infeasible"),
            Status::Unbounded => write!(f, "Unbounded"),
            Status::NotSolved => write!(f, "Not Solved"),
        }
    }
}

/// The answer of a solver: a status, and the value of every variable
/// when the status is optimal.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub status: Status,
    values: Option<Vec<f64>>,
}

impl Solution {
    pub fn optimal(values: Vec<f64>) -> Self {
        Self {
            status: Status::Optimal,
            values: Some(values),
        }
    }
    pub fn not_optimal(status: Status) -> Self {
        debug_assert!(status != Status::Optimal);
        Self {
            status,
            values: None,
        }
    }
    pub fn is_optimal(&self) -> bool {
        self.status == Status::Optimal
    }
    /// The value of every variable, or an error if the solution is not optimal.
    pub fn values(&self) -> Result<&[f64], Error> {
        match &self.values {
            Some(v) if self.is_optimal() => Ok(v),
            _ => Err(Error::NotOptimal(self.status)),
        }
    }
    pub fn value(&self, var: usize) -> Result<f64, Error> {
        Ok(self.values()?[var])
    }
}

/// A linear programming solver.
pub trait LpSolver {
    /// Short name of the solver, used in logs.
    fn name(&self) -> &str;
    /// Solve `model`. Errors are reserved for failures of the solver itself,
    /// infeasible and unbounded problems are reported in the status.
    fn solve(&self, model: &Model) -> Result<Solution, Error>;
    /// Refuse, before it is built, a model with `constraints` constraints
    /// and `vars` variables that the solver cannot handle.
    fn check_size(&self, _constraints: usize, _vars: usize) -> Result<(), Error> {
        Ok(())
    }
}
