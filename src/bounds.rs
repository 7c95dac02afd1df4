//! Solving the two models and reading their optimum as rationals.

use crate::combinatorics::subset_count;
use crate::config::Config;
use crate::cover::CliqueCoverModel;
use crate::entropy::{self, EntropyModel};
use crate::error::Error;
use crate::graph::Graph;
use crate::lp::{LpSolver, Model, Solution, Status};
use crate::rational::{approximate, Rational};
use crate::subset::{Subset, SubsetSpace};
use log::*;

/// The optimum of one of the models.
#[derive(Debug, Clone, PartialEq)]
pub struct Bound {
    pub status: Status,
    /// Optimal value of the objective, when the status is optimal.
    pub value: Option<Rational>,
    /// Raw output of the solver.
    pub solution: Solution,
    /// Value of the variable of every subset, in canonical order.
    /// Empty when the status is not optimal.
    pub assignment: Vec<(Subset, Rational)>,
}

impl Bound {
    fn new(
        space: &SubsetSpace,
        model: &Model,
        solution: Solution,
        max_denominator: i64,
    ) -> Result<Self, Error> {
        if !solution.is_optimal() {
            return Ok(Self::without_value(solution));
        }
        let x = solution.values()?;
        if x.len() != model.n_vars() {
            return Err(Error::SolverOutput(format!(
                "{} values for {} variables",
                x.len(),
                model.n_vars()
            )));
        }
        let value = approximate(model.objective_value(x), max_denominator)?;
        let assignment = space
            .iter()
            .zip(x)
            .map(|(s, &v)| Ok((s.clone(), approximate(v, max_denominator)?)))
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(Self {
            status: solution.status,
            value: Some(value),
            solution,
            assignment,
        })
    }
    fn without_value(solution: Solution) -> Self {
        Self {
            status: solution.status,
            value: None,
            solution,
            assignment: Vec::new(),
        }
    }
    pub fn is_optimal(&self) -> bool {
        self.status == Status::Optimal
    }
    /// Rational value of the variable of `s`.
    pub fn get(&self, s: &Subset) -> Option<Rational> {
        self.assignment
            .iter()
            .find(|(t, _)| t == s)
            .map(|&(_, v)| v)
    }
}

/// Result of a full calculation on a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub cover: Bound,
    pub entropy: Bound,
}

/// Solve the fractional clique cover model of `g`.
pub fn fractional_clique_cover(
    g: &Graph,
    solver: &dyn LpSolver,
    config: &Config,
) -> Result<Bound, Error> {
    let vars = subset_count(g.size()).unwrap_or(usize::MAX);
    solver.check_size(g.size(), vars)?;
    let cover = CliqueCoverModel::new(g);
    let solution = solver.solve(&cover.model)?;
    let bound = Bound::new(&cover.space, &cover.model, solution, config.max_denominator)?;
    info!("Fractional clique cover: {}", describe(&bound));
    Ok(bound)
}

/// Solve the entropy model of `g`.
///
/// Fails with [`Error::ModelTooLarge`] before building the model
/// when `solver` cannot handle its size.
pub fn shannon_entropy(g: &Graph, solver: &dyn LpSolver, config: &Config) -> Result<Bound, Error> {
    let (vars, constraints) = entropy::model_size(g.size()).unwrap_or((usize::MAX, usize::MAX));
    solver.check_size(constraints, vars)?;
    let entropy = EntropyModel::new(g);
    let solution = solver.solve(&entropy.model)?;
    let bound = Bound::new(&entropy.space, &entropy.model, solution, config.max_denominator)?;
    info!("Shannon entropy: {}", describe(&bound));
    Ok(bound)
}

/// Compute both bounds of `g`, one after the other.
///
/// A model too large for `solver` gives a bound with status
/// `NotSolved`, without affecting the other one.
/// Nothing is cached: every call builds and solves the models again.
pub fn calculate(g: &Graph, solver: &dyn LpSolver, config: &Config) -> Result<Calculation, Error> {
    config.check(g)?;
    info!("Calculating bounds of {} with {}", g, solver.name());
    let cover = unless_too_large(fractional_clique_cover(g, solver, config))?;
    let entropy = unless_too_large(shannon_entropy(g, solver, config))?;
    Ok(Calculation { cover, entropy })
}

fn unless_too_large(res: Result<Bound, Error>) -> Result<Bound, Error> {
    match res {
        Err(e @ Error::ModelTooLarge { .. }) => {
            warn!("{}", e);
            Ok(Bound::without_value(Solution::not_optimal(Status::NotSolved)))
        }
        res => res,
    }
}

fn describe(bound: &Bound) -> String {
    match bound.value {
        Some(v) => format!("{}", v),
        None => format!("{}", bound.status),
    }
}
