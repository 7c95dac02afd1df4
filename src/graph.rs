//! Finite simple undirected graphs and their text format.
//!
//! A graph is stored in a file as two lines: the number of vertices `n`,
//! then a `;`-separated list of `u,v` pairs, e.g.
//!
//! ```text
//! 3
//! 0,1;1,2
//! ```
//!
//! The vertices are `0,...,n-1`. An empty second line means no edges.

use crate::error::Error;
use rand::Rng;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::mem::swap;
use std::ops::{Index, IndexMut};
use std::path::Path;
use std::str::FromStr;

/// Largest number of vertices of a graph, so that its subsets
/// can be counted with a `usize`.
pub const MAX_SIZE: usize = usize::BITS as usize - 1;

/// Symmetric relation R such that R(x,x) never holds,
/// stored as the flat upper triangle of the matrix.
#[derive(Clone, Debug, PartialOrd, Ord, Eq, PartialEq, Serialize, Deserialize)]
struct SymNonRefl<A>(Vec<A>);

impl<A: Clone> SymNonRefl<A> {
    fn new(elem: A, n: usize) -> Self {
        SymNonRefl(vec![elem; Self::data_size(n)])
    }
    fn data_size(size: usize) -> usize {
        if size == 0 {
            0
        } else {
            ((size - 1) * size) / 2
        }
    }
    fn flat_index(mut i: usize, mut j: usize) -> usize {
        if j < i {
            swap(&mut i, &mut j)
        };
        debug_assert!(j > i);
        Self::data_size(j) + i
    }
}

impl<A: Clone> Index<(usize, usize)> for SymNonRefl<A> {
    type Output = A;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.0[Self::flat_index(i, j)]
    }
}

impl<A: Clone> IndexMut<(usize, usize)> for SymNonRefl<A> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut A {
        &mut self.0[Self::flat_index(i, j)]
    }
}

/// Undirected simple graphs on the vertices `0,...,n-1`.
///
/// The adjacency is an upper triangular boolean matrix,
/// represented as a vector of length `n` choose `2`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    size: usize,
    edge: SymNonRefl<bool>,
}

#[derive(Debug, Clone)]
struct EdgeIterator<'a> {
    g: &'a Graph,
    u: usize,
    v: usize,
}

impl Iterator for EdgeIterator<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.u += 1;
            if self.u >= self.v {
                self.u = 0;
                self.v += 1;
            }
            if self.v >= self.g.size {
                return None;
            } else if self.g.edge(self.u, self.v) {
                return Some((self.u, self.v));
            }
        }
    }
}

impl Graph {
    /// Create a graph on `n` vertices with edge set `edge`.
    ///
    /// Panics on a self-loop or an endpoint out of range;
    /// use [`Graph::try_new`] for untrusted input.
    pub fn new(n: usize, edge: &[(usize, usize)]) -> Self {
        match Self::try_new(n, edge) {
            Ok(g) => g,
            Err(e) => panic!("{}", e),
        }
    }
    /// Create a graph on `n` vertices, rejecting self-loops,
    /// endpoints that are not in `0..n` and more than [`MAX_SIZE`] vertices.
    pub fn try_new(n: usize, edge: &[(usize, usize)]) -> Result<Self, Error> {
        if n > MAX_SIZE {
            return Err(Error::InvalidGraph(format!(
                "{} vertices, at most {} are supported",
                n, MAX_SIZE
            )));
        }
        let mut res = Self::empty(n);
        for &(u, v) in edge {
            res.add_edge(u, v)?;
        }
        Ok(res)
    }
    /// Create the graph on `n` vertices with no edge.
    ///
    /// Panics if the adjacency matrix does not fit in memory.
    pub fn empty(n: usize) -> Self {
        Self {
            size: n,
            edge: SymNonRefl::new(false, n),
        }
    }
    /// Add the edge `uv`. Adding an existing edge does nothing.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<(), Error> {
        if u >= self.size || v >= self.size {
            return Err(Error::InvalidGraph(format!(
                "edge ({}, {}) has an endpoint outside 0..{}",
                u, v, self.size
            )));
        }
        if u == v {
            return Err(Error::InvalidGraph(format!("self-loop on vertex {}", u)));
        }
        self.edge[(u, v)] = true;
        Ok(())
    }
    /// Return the number of vertices in the graph
    pub fn size(&self) -> usize {
        self.size
    }
    /// Iterate over the vertices in increasing order.
    pub fn vertices(&self) -> std::ops::Range<usize> {
        0..self.size
    }
    /// Return the vector of vertices adjacent to `v`, in increasing order.
    pub fn nbrs(&self, v: usize) -> Vec<usize> {
        self.vertices().filter(|&u| self.edge(u, v)).collect()
    }
    /// Returns `true` if `uv` is an edge.
    #[inline]
    pub fn edge(&self, u: usize, v: usize) -> bool {
        u != v && self.edge[(u, v)]
    }
    /// Returns an iterator on edges.
    /// The edges are represented as couples `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        EdgeIterator {
            g: self,
            u: 0,
            v: 0,
        }
    }
    pub fn edge_count(&self) -> usize {
        self.edge.0.iter().filter(|&&b| b).count()
    }
}

// particular graphs
impl Graph {
    pub fn clique(n: usize) -> Self {
        let mut res = Self::empty(n);
        for x in res.edge.0.iter_mut() {
            *x = true
        }
        res
    }
    pub fn cycle(n: usize) -> Self {
        assert!(n >= 3, "a cycle needs at least 3 vertices");
        let mut edges: Vec<_> = (0..n - 1).map(|i| (i, i + 1)).collect();
        edges.push((n - 1, 0));
        Self::new(n, &edges)
    }
    pub fn petersen() -> Self {
        Self::new(
            10,
            &[
                (0, 1),
                (1, 2),
                (2, 3),
                (3, 4),
                (4, 0),
                (5, 7),
                (6, 8),
                (7, 9),
                (8, 5),
                (9, 6),
                (0, 5),
                (1, 6),
                (2, 7),
                (3, 8),
                (4, 9),
            ],
        )
    }
    pub fn path(n: usize) -> Self {
        let edges: Vec<_> = (1..n).map(|i| (i - 1, i)).collect();
        Self::new(n, &edges)
    }
    /// Erdős–Rényi random graph where each edge is present with probability `p`.
    pub fn random<R: Rng>(n: usize, p: f64, rng: &mut R) -> Self {
        let mut res = Self::empty(n);
        for x in res.edge.0.iter_mut() {
            *x = rng.random_bool(p)
        }
        res
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(V=[{}], E={{", self.size)?;
        for (u, v) in self.edges() {
            if self.size < 10 {
                write!(f, " {u}{v}")?
            } else {
                write!(f, " {u}-{v}")?
            }
        }
        write!(f, " }})")
    }
}

// ================ Text format

fn parse_edge(s: &str) -> Result<(usize, usize), Error> {
    let mut iter = s.split(',');
    let mut next = || {
        iter.next()
            .ok_or_else(|| Error::ParseError(format!("'{}' is not a pair u,v", s)))
    };
    let u = next()?.trim().parse()?;
    let v = next()?.trim().parse()?;
    if iter.next().is_some() {
        return Err(Error::ParseError(format!("'{}' is not a pair u,v", s)));
    }
    Ok((u, v))
}

impl FromStr for Graph {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines();
        let n: usize = lines
            .next()
            .ok_or_else(|| Error::ParseError("missing vertex count".into()))?
            .trim()
            .parse()?;
        let mut edges = Vec::new();
        if let Some(line) = lines.next() {
            for pair in line.split(';').map(str::trim).filter(|p| !p.is_empty()) {
                edges.push(parse_edge(pair)?)
            }
        }
        if lines.any(|l| !l.trim().is_empty()) {
            return Err(Error::ParseError("trailing content after edge list".into()));
        }
        Self::try_new(n, &edges)
    }
}

impl Graph {
    /// The text format of the graph (see the module documentation).
    pub fn to_format_string(&self) -> String {
        let edges: Vec<_> = self.edges().map(|(u, v)| format!("{},{}", u, v)).collect();
        format!("{}\n{}\n", self.size, edges.join(";"))
    }
    /// Write the graph in the file `filename`.
    pub fn write<P: AsRef<Path>>(&self, filename: P) -> Result<(), Error> {
        let mut w = BufWriter::new(File::create(filename)?);
        write!(w, "{}", self.to_format_string())?;
        w.flush()?;
        Ok(())
    }
    /// Read a graph from the file `filename`.
    pub fn load<P: AsRef<Path>>(filename: P) -> Result<Self, Error> {
        let buf = BufReader::new(File::open(filename)?);
        let mut content = String::new();
        for line in buf.lines() {
            content.push_str(&line?);
            content.push('\n');
        }
        content.parse()
    }
}
