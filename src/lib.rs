//!Two linear programming bounds on a finite simple graph:
//!the fractional clique cover number and
//!the Shannon entropy (polymatroid) bound.
//!
//!Both linear programs have one variable per subset of vertices,
//!so they are only practical for graphs with a few vertices.
//!Values returned by the solver are reported as rationals
//!with a bounded denominator.
//!
//!# Example
//!
//!```rust
//!extern crate clique_entropy;
//!
//!use clique_entropy::*;
//!
//!pub fn main() {
//!    // The cycle of length 5.
//!    let c5 = Graph::cycle(5);
//!
//!    // Solve both models with the built-in simplex.
//!    let res = calculate(&c5, &Simplex::default(), &Config::default()).unwrap();
//!
//!    assert_eq!(res.cover.value, Some(Rational::new(5, 2)));
//!    assert_eq!(res.entropy.value, Some(Rational::new(5, 2)));
//!}
//!```
//!

#![warn(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    //unused_qualifications,
    unused_labels,
    //unused_results
)]

mod bounds;
pub use crate::bounds::*;

pub mod clique;
mod combinatorics;
mod config;
pub use crate::config::Config;
pub mod cover;
pub mod entropy;
mod error;
pub use crate::error::Error;
mod graph;
pub use crate::graph::Graph;
mod iterators;
pub mod lp;
pub use crate::lp::{LpSolver, Solution, Status};
pub mod rational;
pub use crate::rational::Rational;
pub mod report;
pub mod sdpa;
pub use crate::sdpa::Csdp;
pub mod simplex;
pub use crate::simplex::Simplex;
mod subset;
pub use crate::subset::{Subset, SubsetSpace};

#[macro_use]
extern crate serde_derive;

use log::LevelFilter;

/// Install a logger writing to the standard error at level `level`.
/// The `RUST_LOG` variable takes precedence.
pub fn init_log(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .parse_default_env()
        .try_init();
}
pub fn init_default_log() {
    init_log(LevelFilter::Info)
}
pub fn init_debug_log() {
    init_log(LevelFilter::Trace)
}
