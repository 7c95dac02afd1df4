//! Error type shared by the whole crate.

use crate::lp::Status;
use std::io;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error while parsing: {0}")]
    ParseError(String),
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("Solver returned with code {0}")]
    SolverFailed(i32),
    #[error("Unexpected solver output: {0}")]
    SolverOutput(String),
    #[error("Model too large for the dense simplex: {rows} rows and {cols} columns")]
    ModelTooLarge { rows: usize, cols: usize },
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),
    #[error("Graph has {vertices} vertices, the limit is {limit}")]
    TooManyVertices { vertices: usize, limit: usize },
    #[error("Cannot approximate the non-finite value {0}")]
    NotFinite(f64),
    #[error("The bound on denominators must be positive, not {0}")]
    InvalidDenominator(i64),
    #[error("The value {0} does not fit a 64-bit rational")]
    OutOfRange(f64),
    #[error("No optimal solution (status: {0})")]
    NotOptimal(Status),
}

impl From<ParseIntError> for Error {
    fn from(e: ParseIntError) -> Self {
        Error::ParseError(format!("{}", e))
    }
}

impl From<ParseFloatError> for Error {
    fn from(e: ParseFloatError) -> Self {
        Error::ParseError(format!("{}", e))
    }
}
