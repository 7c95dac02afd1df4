//! Parameters of a calculation.

use crate::error::Error;
use crate::graph::Graph;
use crate::rational::MAX_DENOMINATOR;

/// Parameters shared by the model builders, the solvers and the
/// rational approximation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Bound on the denominators of the reported values.
    pub max_denominator: i64,
    /// Largest graph accepted by [`crate::calculate`]. The entropy model of a
    /// graph on `n` vertices has about `2^(2n-1)` constraints, the default
    /// simplex only solves it up to 6 vertices.
    pub max_vertices: usize,
    /// Tolerance used by the simplex solver and when checking solutions.
    pub tolerance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_denominator: MAX_DENOMINATOR,
            max_vertices: 12,
            tolerance: 1e-9,
        }
    }
}

impl Config {
    /// Reject graphs with more than `max_vertices` vertices.
    pub fn check(&self, g: &Graph) -> Result<(), Error> {
        if g.size() > self.max_vertices {
            Err(Error::TooManyVertices {
                vertices: g.size(),
                limit: self.max_vertices,
            })
        } else {
            Ok(())
        }
    }
}
