//! Text report of a calculation.
//!
//! ```text
//! Graph:
//! Number Of Nodes: 3
//! Edges: [(0, 1), (1, 2)]
//!
//! Results:
//! Fractional Clique Cover - 2
//! Shannon Entropy - 1
//!
//! Fractional Clique Cover (All Values):
//! {} - 0
//! {0} - 0
//! ...
//! ```

use crate::bounds::{Bound, Calculation};
use crate::error::Error;
use crate::graph::Graph;
use std::fs::File;
use std::io::{BufWriter, Result, Write};
use std::path::Path;

fn print_value<W: Write>(w: &mut W, name: &str, bound: &Bound) -> Result<()> {
    match bound.value {
        Some(v) => writeln!(w, "{} - {}", name, v),
        None => writeln!(w, "{} - {}", name, bound.status),
    }
}

fn print_assignment<W: Write>(w: &mut W, name: &str, bound: &Bound) -> Result<()> {
    writeln!(w, "{} (All Values):", name)?;
    if !bound.is_optimal() {
        return writeln!(w, "{}", bound.status);
    }
    for (s, v) in &bound.assignment {
        writeln!(w, "{} - {}", s, v)?
    }
    Ok(())
}

/// Write the report of `calc` on `g` to `w`.
pub fn print_report<W: Write>(w: &mut W, g: &Graph, calc: &Calculation) -> Result<()> {
    writeln!(w, "Graph:")?;
    writeln!(w, "Number Of Nodes: {}", g.size())?;
    let edges: Vec<_> = g.edges().collect();
    writeln!(w, "Edges: {:?}", edges)?;
    writeln!(w)?;
    writeln!(w, "Results:")?;
    print_value(w, "Fractional Clique Cover", &calc.cover)?;
    print_value(w, "Shannon Entropy", &calc.entropy)?;
    writeln!(w)?;
    print_assignment(w, "Fractional Clique Cover", &calc.cover)?;
    writeln!(w)?;
    print_assignment(w, "Shannon Entropy", &calc.entropy)
}

/// The report as a string.
pub fn render(g: &Graph, calc: &Calculation) -> String {
    let mut buf = Vec::new();
    // Writing to a vector does not fail
    let _ = print_report(&mut buf, g, calc);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write the report in the file `filename`.
pub fn write_report<P: AsRef<Path>>(
    filename: P,
    g: &Graph,
    calc: &Calculation,
) -> std::result::Result<(), Error> {
    let mut w = BufWriter::new(File::create(filename)?);
    print_report(&mut w, g, calc)?;
    w.flush()?;
    Ok(())
}
