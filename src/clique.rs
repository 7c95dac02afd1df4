//! Enumeration of every clique of a graph.
//!
//! Cliques are grown from the adjacency of the graph: a clique is only
//! extended by common neighbours larger than all its vertices, so each
//! clique is produced once, already sorted.

use crate::graph::Graph;
use crate::subset::Subset;
use std::collections::VecDeque;

/// Iterator on the cliques of a graph, including the empty clique
/// and the singletons, by increasing size.
#[derive(Debug, Clone)]
pub struct Cliques<'a> {
    g: &'a Graph,
    started: bool,
    // A clique together with the vertices that can extend it
    queue: VecDeque<(Vec<usize>, Vec<usize>)>,
}

impl<'a> Cliques<'a> {
    pub fn new(g: &'a Graph) -> Self {
        let queue = g
            .vertices()
            .map(|u| (vec![u], g.nbrs(u).into_iter().filter(|&v| v > u).collect()))
            .collect();
        Self {
            g,
            started: false,
            queue,
        }
    }
}

impl Iterator for Cliques<'_> {
    type Item = Subset;

    fn next(&mut self) -> Option<Subset> {
        if !self.started {
            self.started = true;
            return Some(Subset::empty());
        }
        let (base, candidates) = self.queue.pop_front()?;
        for (i, &u) in candidates.iter().enumerate() {
            let mut clique = base.clone();
            clique.push(u);
            let next_candidates = candidates[i + 1..]
                .iter()
                .copied()
                .filter(|&v| self.g.edge(u, v))
                .collect();
            self.queue.push_back((clique, next_candidates))
        }
        Some(Subset::new(base))
    }
}

/// Return every clique of `g`, by increasing size and then lexicographically.
pub fn cliques(g: &Graph) -> Vec<Subset> {
    Cliques::new(g).collect()
}

/// Returns `true` if the vertices of `s` are pairwise adjacent in `g`.
pub fn is_clique(g: &Graph, s: &Subset) -> bool {
    let v = s.vertices();
    v.iter()
        .enumerate()
        .all(|(i, &x)| v[i + 1..].iter().all(|&y| g.edge(x, y)))
}

/// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::subset::SubsetSpace;

    #[test]
    fn path_cliques() {
        let res = cliques(&Graph::path(3));
        let expected: Vec<Subset> = vec![
            Subset::empty(),
            Subset::new([0]),
            Subset::new([1]),
            Subset::new([2]),
            Subset::new([0, 1]),
            Subset::new([1, 2]),
        ];
        assert_eq!(res, expected);
    }

    #[test]
    fn edgeless_and_complete() {
        assert_eq!(cliques(&Graph::empty(4)).len(), 5);
        assert_eq!(cliques(&Graph::clique(4)).len(), 16);
        assert_eq!(cliques(&Graph::empty(0)), vec![Subset::empty()]);
    }

    #[test]
    fn agrees_with_brute_force() {
        for g in [Graph::petersen(), Graph::cycle(5), Graph::clique(5), Graph::path(6)] {
            let space = SubsetSpace::new(&g);
            let mut brute: Vec<Subset> = space.iter().filter(|s| is_clique(&g, s)).cloned().collect();
            let mut res = cliques(&g);
            for c in &res {
                assert!(space.index_of(c).is_some());
            }
            brute.sort();
            res.sort();
            assert_eq!(res, brute);
        }
    }
}
