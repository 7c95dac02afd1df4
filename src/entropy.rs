//! The Shannon entropy linear program.
//!
//! A variable `x_S` stands for the joint entropy of the vertices of `S`.
//! The constraints are the polymatroid axioms, together with the fact
//! that a vertex is a function of its neighbourhood:
//! * `x_∅ = 0`,
//! * `x_{v} ≤ 1` for every vertex `v`,
//! * `x_{N(v) ∪ {v}} = x_{N(v)}` for every vertex `v`,
//! * `x_S ≤ x_T` when `S ⊆ T`,
//! * `x_S + x_T ≥ x_{S ∪ T} + x_{S ∩ T}` otherwise.
//!
//! The objective is to maximize the entropy of the whole vertex set.
//!
//! The last two families range over all pairs of distinct subsets, so a
//! graph on `n` vertices gives about `2^(2n-1)` constraints.

use crate::combinatorics::{nested_pair_count, subset_count, subset_pair_count};
use crate::graph::Graph;
use crate::lp::{ConstraintKind, LinExpr, Model, Sense};
use crate::subset::{Subset, SubsetSpace};
use log::*;

/// The entropy LP of a graph.
#[derive(Debug, Clone)]
pub struct EntropyModel {
    pub space: SubsetSpace,
    pub model: Model,
}

impl EntropyModel {
    pub fn new(g: &Graph) -> Self {
        let space = SubsetSpace::new(g);
        let n = g.size();
        let mut model = Model::new(Sense::Maximize, space.variable_names());
        model.set_objective(LinExpr::new().term(space.full(), 1.));
        if let Some(pairs) = subset_pair_count(n) {
            model.reserve(1 + 2 * n + pairs)
        }
        model.equal(
            ConstraintKind::Normalization,
            LinExpr::new().term(space.empty(), 1.),
            0.,
        );
        for v in g.vertices() {
            let s = space.var(&Subset::singleton(v));
            model.at_most(ConstraintKind::Boundedness(v), LinExpr::new().term(s, 1.), 1.)
        }
        for v in g.vertices() {
            let nbrs = Subset::new(g.nbrs(v));
            let closed = nbrs.with(v);
            let expr = LinExpr::new()
                .term(space.var(&closed), 1.)
                .term(space.var(&nbrs), -1.);
            model.equal(ConstraintKind::LocalDependency(v), expr, 0.)
        }
        let subsets = space.as_slice();
        for (i, s) in subsets.iter().enumerate() {
            for t in &subsets[i + 1..] {
                // the canonical order puts S before T whenever S ⊊ T
                if s.is_subset(t) {
                    let expr = LinExpr::new()
                        .term(space.var(t), 1.)
                        .term(space.var(s), -1.);
                    model.at_least(ConstraintKind::Monotonicity, expr, 0.)
                } else {
                    let expr = LinExpr::new()
                        .term(space.var(s), 1.)
                        .term(space.var(t), 1.)
                        .term(space.var(&s.union(t)), -1.)
                        .term(space.var(&s.intersection(t)), -1.);
                    model.at_least(ConstraintKind::Submodularity, expr, 0.)
                }
            }
        }
        debug!(
            "Entropy: {} monotonicity and {} submodularity constraints",
            model.count(|k| *k == ConstraintKind::Monotonicity),
            model.count(|k| *k == ConstraintKind::Submodularity)
        );
        info!(
            "Entropy: {} variables, {} constraints",
            space.len(),
            model.constraints().len()
        );
        Self { space, model }
    }
}

/// Number of variables and number of constraints of the model
/// on `n` vertices.
pub fn model_size(n: usize) -> Option<(usize, usize)> {
    let constraints = subset_pair_count(n)?.checked_add(1 + 2 * n)?;
    Some((subset_count(n)?, constraints))
}

/// Number of monotonicity constraints of the model on `n` vertices.
pub fn monotonicity_count(n: usize) -> Option<usize> {
    nested_pair_count(n)
}

/// Number of submodularity constraints of the model on `n` vertices.
pub fn submodularity_count(n: usize) -> Option<usize> {
    Some(subset_pair_count(n)? - nested_pair_count(n)?)
}

/// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::lp::Comparison;

    fn count(m: &EntropyModel, kind: ConstraintKind) -> usize {
        m.model.count(|k| *k == kind)
    }

    #[test]
    fn constraint_counts() {
        for n in 0..6 {
            let g = Graph::path(n);
            let m = EntropyModel::new(&g);
            assert_eq!(m.model.n_vars(), 1 << n);
            assert_eq!(count(&m, ConstraintKind::Normalization), 1);
            assert_eq!(m.model.count(|k| matches!(k, ConstraintKind::Boundedness(_))), n);
            assert_eq!(
                m.model.count(|k| matches!(k, ConstraintKind::LocalDependency(_))),
                n
            );
            assert_eq!(
                Some(count(&m, ConstraintKind::Monotonicity)),
                monotonicity_count(n)
            );
            assert_eq!(
                Some(count(&m, ConstraintKind::Submodularity)),
                submodularity_count(n)
            );
        }
        assert_eq!(submodularity_count(3), Some(9));
        for n in 3..7 {
            let m = EntropyModel::new(&Graph::cycle(n));
            assert_eq!(
                model_size(n),
                Some((m.model.n_vars(), m.model.constraints().len()))
            );
        }
        assert_eq!(model_size(40), None);
    }

    #[test]
    fn local_dependency_on_a_path() {
        let g = Graph::path(3);
        let m = EntropyModel::new(&g);
        let c = m
            .model
            .constraints()
            .iter()
            .find(|c| c.kind == ConstraintKind::LocalDependency(1))
            .unwrap();
        assert_eq!(c.cmp, Comparison::Equal);
        assert_eq!(c.rhs, 0.);
        let full = m.space.var(&Subset::new([0, 1, 2]));
        let nbrs = m.space.var(&Subset::new([0, 2]));
        let mut terms: Vec<(usize, f64)> = c.row.iter().map(|(i, &v)| (i, v)).collect();
        terms.sort_by_key(|&(i, _)| i);
        let mut expected = vec![(nbrs, -1.), (full, 1.)];
        expected.sort_by_key(|&(i, _)| i);
        assert_eq!(terms, expected);
    }

    #[test]
    fn isolated_vertex_is_constant() {
        // N(v) is empty, so x_{v} = x_∅
        let g = Graph::empty(2);
        let m = EntropyModel::new(&g);
        let c = &m.model.constraints()[3];
        assert_eq!(c.kind, ConstraintKind::LocalDependency(0));
        let terms: Vec<(usize, f64)> = c.row.iter().map(|(i, &v)| (i, v)).collect();
        assert_eq!(terms, [(0, -1.), (1, 1.)]);
    }

    #[test]
    fn objective_is_the_full_set() {
        let m = EntropyModel::new(&Graph::cycle(4));
        assert_eq!(m.model.sense(), Sense::Maximize);
        let obj: Vec<(usize, f64)> = m.model.objective().iter().map(|(i, &v)| (i, v)).collect();
        assert_eq!(obj, [(15, 1.)]);
    }

    #[test]
    fn zero_is_feasible() {
        let m = EntropyModel::new(&Graph::cycle(5));
        assert_eq!(m.model.violation(&vec![0.; 32], 1e-12), None);
    }
}
