//! The fractional clique cover linear program.
//!
//! There is one variable per subset of vertices. The objective is the sum
//! of all variables and each vertex must be covered, with total weight at
//! least one, by the cliques that contain it.
//!
//! Variables of subsets that are not cliques appear in the objective only.
//! They are not constrained to zero: any feasible point stays feasible and
//! gets a smaller objective when they are set to zero, so they vanish at
//! the optimum. Adding a constraint that mentions them requires adding the
//! equalities `x_S = 0` for non-cliques as well.

use crate::clique::Cliques;
use crate::graph::Graph;
use crate::lp::{ConstraintKind, LinExpr, Model, Sense};
use crate::subset::{Subset, SubsetSpace};
use log::*;

/// The fractional clique cover LP of a graph.
#[derive(Debug, Clone)]
pub struct CliqueCoverModel {
    pub space: SubsetSpace,
    pub cliques: Vec<Subset>,
    pub model: Model,
}

impl CliqueCoverModel {
    pub fn new(g: &Graph) -> Self {
        let space = SubsetSpace::new(g);
        let cliques: Vec<Subset> = Cliques::new(g).collect();
        let mut model = Model::new(Sense::Minimize, space.variable_names());
        model.set_objective((0..space.len()).map(|i| (i, 1.)).collect());
        model.reserve(g.size());
        for v in g.vertices() {
            let expr: LinExpr = cliques
                .iter()
                .filter(|c| c.contains(v))
                .map(|c| (space.var(c), 1.))
                .collect();
            model.at_least(ConstraintKind::Covering(v), expr, 1.)
        }
        info!(
            "Clique cover: {} variables, {} cliques, {} constraints",
            space.len(),
            cliques.len(),
            model.constraints().len()
        );
        Self {
            space,
            cliques,
            model,
        }
    }
    /// Total weight of the cliques containing `v` at the point `x`.
    pub fn coverage(&self, x: &[f64], v: usize) -> f64 {
        self.cliques
            .iter()
            .filter(|c| c.contains(v))
            .map(|c| x[self.space.var(c)])
            .sum()
    }
}
