//! Dense two-phase simplex method.
//!
//! This is the default solver. The tableau is dense, which is adequate for
//! the models of graphs with a handful of vertices. Bland's rule is used
//! for both the entering and the leaving variable, so the method
//! terminates on degenerate problems (the entropy models are very degenerate).

use crate::error::Error;
use crate::lp::*;
use log::*;
use ndarray::Array2;

/// Two-phase simplex solver with Bland's pivoting rule.
#[derive(Debug, Clone, Copy)]
pub struct Simplex {
    /// Threshold under which a reduced cost or a pivot is considered null.
    pub tolerance: f64,
    /// The solver gives up with `Status::NotSolved` after this many pivots.
    pub max_iterations: usize,
    /// Largest number of entries allowed in the dense tableau.
    pub max_cells: usize,
}

impl Default for Simplex {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_iterations: 1_000_000,
            max_cells: 50_000_000,
        }
    }
}

impl Simplex {
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }
    fn check_cells(&self, rows: usize, cols: usize) -> Result<(), Error> {
        if rows.saturating_mul(cols) > self.max_cells {
            Err(Error::ModelTooLarge { rows, cols })
        } else {
            Ok(())
        }
    }
}

// Sign by which a constraint is multiplied to get a non-negative right
// side, and the resulting comparison.
fn normalize(c: &Constraint) -> (f64, Comparison) {
    // `expr ≥ 0` is stored as `-expr ≤ 0`, which needs no artificial
    if c.rhs < 0. || (c.rhs == 0. && c.cmp == Comparison::AtLeast) {
        let cmp = match c.cmp {
            Comparison::AtLeast => Comparison::AtMost,
            Comparison::AtMost => Comparison::AtLeast,
            Comparison::Equal => Comparison::Equal,
        };
        (-1., cmp)
    } else {
        (1., c.cmp)
    }
}

// Number of rows and columns of the tableau of `model`.
fn tableau_shape(model: &Model) -> (usize, usize) {
    let m = model.constraints().len();
    let (mut slacks, mut artificials) = (0, 0);
    for c in model.constraints() {
        let (_, cmp) = normalize(c);
        if cmp != Comparison::Equal {
            slacks += 1
        }
        if cmp != Comparison::AtMost {
            artificials += 1
        }
    }
    (m + 1, model.n_vars() + slacks + artificials + 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Optimal,
    Unbounded,
    IterationLimit,
}

// Rows 0..m are the constraints, row m is the objective.
// The last column is the right side; on the objective row it holds
// minus the current objective value.
//
// Columns: the model variables, then one slack or surplus per
// inequality, then one artificial per `≥` or `=` constraint.
#[derive(Debug)]
struct Tableau {
    t: Array2<f64>,
    basis: Vec<usize>,
    artificial_start: usize,
    tolerance: f64,
}

impl Tableau {
    fn new(model: &Model, tolerance: f64) -> Self {
        let n = model.n_vars();
        let m = model.constraints().len();
        let rows: Vec<(f64, Comparison)> = model.constraints().iter().map(normalize).collect();
        let n_slack = rows.iter().filter(|r| r.1 != Comparison::Equal).count();
        let n_artificial = rows.iter().filter(|r| r.1 != Comparison::AtMost).count();
        let artificial_start = n + n_slack;
        let width = artificial_start + n_artificial + 1;
        let mut t = Array2::zeros((m + 1, width));
        let mut basis = vec![0; m];
        let mut slack = n;
        let mut artificial = artificial_start;
        for (r, (c, &(sign, cmp))) in model.constraints().iter().zip(&rows).enumerate() {
            for (i, &val) in c.row.iter() {
                t[[r, i]] = sign * val;
            }
            t[[r, width - 1]] = sign * c.rhs;
            match cmp {
                Comparison::AtMost => {
                    t[[r, slack]] = 1.;
                    basis[r] = slack;
                    slack += 1;
                }
                Comparison::AtLeast => {
                    t[[r, slack]] = -1.;
                    slack += 1;
                    t[[r, artificial]] = 1.;
                    basis[r] = artificial;
                    artificial += 1;
                }
                Comparison::Equal => {
                    t[[r, artificial]] = 1.;
                    basis[r] = artificial;
                    artificial += 1;
                }
            }
        }
        Self {
            t,
            basis,
            artificial_start,
            tolerance,
        }
    }

    fn m(&self) -> usize {
        self.basis.len()
    }

    fn rhs(&self) -> usize {
        self.t.ncols() - 1
    }

    fn value(&self) -> f64 {
        -self.t[[self.m(), self.rhs()]]
    }

    /// Set the objective row to `costs` and express it in the current basis.
    fn set_costs(&mut self, costs: &[(usize, f64)]) {
        let m = self.m();
        self.t.row_mut(m).fill(0.);
        for &(j, c) in costs {
            self.t[[m, j]] = c;
        }
        for r in 0..m {
            let cb = self.t[[m, self.basis[r]]];
            if cb != 0. {
                let row = self.t.row(r).to_owned();
                self.t.row_mut(m).scaled_add(-cb, &row);
            }
        }
    }

    fn pivot(&mut self, r: usize, j: usize) {
        trace!("pivot on row {} column {}", r, j);
        let p = self.t[[r, j]];
        self.t.row_mut(r).mapv_inplace(|x| x / p);
        let pivot_row = self.t.row(r).to_owned();
        for i in 0..self.t.nrows() {
            if i != r {
                let f = self.t[[i, j]];
                if f != 0. {
                    self.t.row_mut(i).scaled_add(-f, &pivot_row);
                }
            }
        }
        self.basis[r] = j;
    }

    /// Pivot until the objective row has no negative reduced cost among
    /// the first `allowed` columns.
    fn run(&mut self, allowed: usize, max_iterations: usize, iterations: &mut usize) -> Outcome {
        let m = self.m();
        let rhs = self.rhs();
        let tol = self.tolerance;
        loop {
            let Some(j) = (0..allowed).find(|&j| self.t[[m, j]] < -tol) else {
                return Outcome::Optimal;
            };
            if *iterations >= max_iterations {
                return Outcome::IterationLimit;
            }
            // Minimum ratio test, ties broken by smallest basic variable
            let mut leaving: Option<(usize, f64)> = None;
            for r in 0..m {
                let a = self.t[[r, j]];
                if a > tol {
                    let ratio = self.t[[r, rhs]] / a;
                    leaving = match leaving {
                        Some((l, best))
                            if !(ratio < best - tol
                                || (ratio <= best + tol && self.basis[r] < self.basis[l])) =>
                        {
                            Some((l, best))
                        }
                        _ => Some((r, ratio)),
                    };
                }
            }
            match leaving {
                None => return Outcome::Unbounded,
                Some((r, _)) => {
                    self.pivot(r, j);
                    *iterations += 1;
                }
            }
        }
    }

    /// Pivot the remaining artificial variables out of the basis.
    /// Rows where this is impossible are redundant and are left alone.
    fn drive_out_artificials(&mut self) {
        for r in 0..self.m() {
            if self.basis[r] >= self.artificial_start {
                let tol = self.tolerance;
                if let Some(j) = (0..self.artificial_start).find(|&j| self.t[[r, j]].abs() > tol) {
                    self.pivot(r, j)
                } else {
                    debug!("row {} is redundant", r);
                }
            }
        }
    }

    fn primal(&self, n: usize) -> Vec<f64> {
        let mut x = vec![0.; n];
        for (r, &b) in self.basis.iter().enumerate() {
            if b < n {
                x[b] = self.t[[r, self.rhs()]].max(0.);
            }
        }
        x
    }
}

impl LpSolver for Simplex {
    fn name(&self) -> &str {
        "simplex"
    }

    // Each constraint brings at least one slack or artificial column,
    // so this shape is a lower bound on the one of the tableau.
    fn check_size(&self, constraints: usize, vars: usize) -> Result<(), Error> {
        let rows = constraints.saturating_add(1);
        let cols = vars.saturating_add(constraints).saturating_add(1);
        self.check_cells(rows, cols)
    }

    fn solve(&self, model: &Model) -> Result<Solution, Error> {
        let (rows, cols) = tableau_shape(model);
        self.check_cells(rows, cols)?;
        let mut tableau = Tableau::new(model, self.tolerance);
        let mut iterations = 0;
        debug!(
            "Simplex tableau of size {}x{}",
            tableau.t.nrows(),
            tableau.t.ncols()
        );
        // Phase 1: minimize the sum of the artificial variables
        let width = tableau.rhs();
        let phase1_costs: Vec<_> = (tableau.artificial_start..width).map(|j| (j, 1.)).collect();
        if !phase1_costs.is_empty() {
            tableau.set_costs(&phase1_costs);
            match tableau.run(width, self.max_iterations, &mut iterations) {
                Outcome::IterationLimit => {
                    warn!("Simplex stopped after {} pivots in phase 1", iterations);
                    return Ok(Solution::not_optimal(Status::NotSolved));
                }
                // Phase 1 is bounded below by 0
                Outcome::Unbounded | Outcome::Optimal => (),
            }
            let scale: f64 = 1. + model.constraints().iter().map(|c| c.rhs.abs()).sum::<f64>();
            if tableau.value() > self.tolerance * scale {
                debug!("Phase 1 ended with infeasibility {}", tableau.value());
                return Ok(Solution::not_optimal(Status::Infeasible));
            }
            tableau.drive_out_artificials();
        }
        debug!("Phase 1 done after {} pivots", iterations);
        // Phase 2: the objective of the model, as a minimization
        let sign = match model.sense() {
            Sense::Minimize => 1.,
            Sense::Maximize => -1.,
        };
        let costs: Vec<_> = model
            .objective()
            .iter()
            .map(|(j, &c)| (j, sign * c))
            .collect();
        tableau.set_costs(&costs);
        let outcome = tableau.run(tableau.artificial_start, self.max_iterations, &mut iterations);
        debug!("Phase 2 done after {} pivots: {:?}", iterations, outcome);
        Ok(match outcome {
            Outcome::Optimal => Solution::optimal(tableau.primal(model.n_vars())),
            Outcome::Unbounded => Solution::not_optimal(Status::Unbounded),
            Outcome::IterationLimit => Solution::not_optimal(Status::NotSolved),
        })
    }
}
