//! Vertex subsets and the space of all subsets of a graph.
//!
//! A [`Subset`] is always kept sorted and without repetition, so two
//! subsets built from the same vertices in any order (for instance
//! from a union, an intersection or a neighbourhood) compare and hash
//! identically. This is what lets derived subsets be looked up in a
//! [`SubsetSpace`].

use crate::combinatorics::subset_count;
use crate::graph::Graph;
use crate::iterators::{Combinations, StreamingIterator};
use std::collections::HashMap;
use std::fmt;

/// A set of vertices represented by its sorted list of elements.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Subset(Vec<usize>);

impl Subset {
    /// Normalize `vertices` (sort and deduplicate) into a subset.
    pub fn new<I: IntoIterator<Item = usize>>(vertices: I) -> Self {
        let mut v: Vec<usize> = vertices.into_iter().collect();
        v.sort_unstable();
        v.dedup();
        Subset(v)
    }
    pub fn empty() -> Self {
        Subset(Vec::new())
    }
    pub fn singleton(v: usize) -> Self {
        Subset(vec![v])
    }
    /// Wrap a slice that is already strictly increasing.
    fn from_sorted(v: &[usize]) -> Self {
        debug_assert!(v.windows(2).all(|w| w[0] < w[1]));
        Subset(v.to_vec())
    }
    pub fn vertices(&self) -> &[usize] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn contains(&self, v: usize) -> bool {
        self.0.binary_search(&v).is_ok()
    }
    /// Returns `true` if every element of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        if self.len() > other.len() {
            return false;
        }
        let mut iter = other.0.iter();
        self.0.iter().all(|x| iter.any(|y| y == x))
    }
    pub fn union(&self, other: &Self) -> Self {
        let (a, b) = (&self.0, &other.0);
        let mut res = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            if a[i] < b[j] {
                res.push(a[i]);
                i += 1
            } else if b[j] < a[i] {
                res.push(b[j]);
                j += 1
            } else {
                res.push(a[i]);
                i += 1;
                j += 1
            }
        }
        res.extend_from_slice(&a[i..]);
        res.extend_from_slice(&b[j..]);
        Subset(res)
    }
    pub fn intersection(&self, other: &Self) -> Self {
        Subset(
            self.0
                .iter()
                .copied()
                .filter(|&x| other.contains(x))
                .collect(),
        )
    }
    /// Return `self ∪ {v}`.
    pub fn with(&self, v: usize) -> Self {
        match self.0.binary_search(&v) {
            Ok(_) => self.clone(),
            Err(pos) => {
                let mut res = self.0.clone();
                res.insert(pos, v);
                Subset(res)
            }
        }
    }
}

impl From<&[usize]> for Subset {
    fn from(v: &[usize]) -> Self {
        Self::new(v.iter().copied())
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?
            }
            write!(f, "{}", v)?
        }
        write!(f, "}}")
    }
}

/// Every subset of the vertex set of a graph, in canonical order:
/// by increasing size, then lexicographically.
///
/// The space has `2^n` elements for a graph on `n` vertices,
/// so it is only meant for small graphs.
#[derive(Clone, Debug)]
pub struct SubsetSpace {
    subsets: Vec<Subset>,
    index: HashMap<Subset, usize>,
}

impl SubsetSpace {
    pub fn new(g: &Graph) -> Self {
        let vertices: Vec<usize> = g.vertices().collect();
        let len = subset_count(vertices.len()).unwrap_or(usize::MAX);
        let mut subsets = Vec::with_capacity(len);
        for k in 0..=vertices.len() {
            let mut iter = Combinations::new(&vertices, k);
            while let Some(c) = iter.next() {
                subsets.push(Subset::from_sorted(c))
            }
        }
        let index = subsets
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();
        Self { subsets, index }
    }
    /// Number of subsets.
    pub fn len(&self) -> usize {
        self.subsets.len()
    }
    /// Always false: the empty subset is in every space.
    pub fn is_empty(&self) -> bool {
        self.subsets.is_empty()
    }
    /// Position of `s` in the canonical order, if `s` is a subset of the vertex set.
    pub fn index_of(&self, s: &Subset) -> Option<usize> {
        self.index.get(s).copied()
    }
    /// Index of the variable of `s`.
    ///
    /// Panics if `s` is not a subset of the vertex set.
    pub fn var(&self, s: &Subset) -> usize {
        self.index[s]
    }
    /// Name of the LP variable of every subset, in canonical order.
    pub fn variable_names(&self) -> Vec<String> {
        self.subsets.iter().map(|s| format!("x{}", s)).collect()
    }
    pub fn get(&self, i: usize) -> &Subset {
        &self.subsets[i]
    }
    pub fn iter(&self) -> impl Iterator<Item = &Subset> {
        self.subsets.iter()
    }
    pub fn as_slice(&self) -> &[Subset] {
        &self.subsets
    }
    /// Index of the empty subset.
    pub fn empty(&self) -> usize {
        0
    }
    /// Index of the whole vertex set, the last subset in canonical order.
    pub fn full(&self) -> usize {
        self.subsets.len() - 1
    }
}

/// Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization() {
        let a = Subset::new([3, 1, 2, 1]);
        assert_eq!(a.vertices(), [1, 2, 3]);
        assert_eq!(a, Subset::from(&[2, 3, 1][..]));
        assert_eq!(Subset::new([]), Subset::empty());
    }

    #[test]
    fn set_operations() {
        let a = Subset::new([0, 2, 4]);
        let b = Subset::new([1, 2, 3]);
        assert_eq!(a.union(&b), Subset::new([0, 1, 2, 3, 4]));
        assert_eq!(a.intersection(&b), Subset::singleton(2));
        assert_eq!(a.with(3), Subset::new([0, 2, 3, 4]));
        assert_eq!(a.with(2), a);
        assert!(Subset::new([0, 4]).is_subset(&a));
        assert!(Subset::empty().is_subset(&a));
        assert!(a.is_subset(&a));
        assert!(!b.is_subset(&a));
        assert!(!Subset::new([0, 1]).is_subset(&a));
        assert!(a.contains(4) && !a.contains(1));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Subset::new([2, 0])), "{0, 2}");
        assert_eq!(format!("{}", Subset::empty()), "{}");
    }

    #[test]
    fn canonical_order() {
        let space = SubsetSpace::new(&Graph::empty(3));
        let expected: Vec<Subset> = vec![
            Subset::empty(),
            Subset::new([0]),
            Subset::new([1]),
            Subset::new([2]),
            Subset::new([0, 1]),
            Subset::new([0, 2]),
            Subset::new([1, 2]),
            Subset::new([0, 1, 2]),
        ];
        assert_eq!(space.as_slice(), expected.as_slice());
        assert_eq!(space.get(space.full()), &Subset::new([0, 1, 2]));
        assert_eq!(space.get(space.empty()), &Subset::empty());
    }

    #[test]
    fn lookup_of_derived_subsets() {
        let space = SubsetSpace::new(&Graph::empty(5));
        assert_eq!(space.len(), 32);
        for (i, s) in space.iter().enumerate() {
            assert_eq!(space.index_of(&Subset::new(s.vertices().iter().rev().copied())), Some(i));
        }
        let u = Subset::new([4, 1]).union(&Subset::new([0, 1]));
        assert_eq!(space.get(space.index_of(&u).unwrap()), &Subset::new([0, 1, 4]));
        assert_eq!(space.index_of(&Subset::singleton(5)), None);
    }

    #[test]
    fn empty_graph() {
        let space = SubsetSpace::new(&Graph::empty(0));
        assert_eq!(space.len(), 1);
        assert_eq!(space.full(), space.empty());
    }
}
