//! Command line interface.
//!
//! Usage:
//!   clique-entropy [OPTIONS] [GRAPH]
//!
//! Without `--report`, an interactive menu is started, with `GRAPH`
//! already loaded if given.
//!
//! Examples:
//!   clique-entropy                              # Interactive menu
//!   clique-entropy c5.txt --report c5-result.txt  # Solve and write the report
//!   clique-entropy --solver csdp c5.txt          # Use the external solver

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use clique_entropy::{Calculation, Config, Csdp, Graph, LpSolver, Simplex, calculate, report};
use log::{LevelFilter, debug, error};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Fractional clique cover and Shannon entropy bounds of small graphs
#[derive(Parser, Debug)]
#[command(name = "clique-entropy")]
#[command(version)]
#[command(about = "Fractional clique cover and Shannon entropy bounds of small graphs", long_about = None)]
struct Cli {
    /// Graph file to load (first line: vertex count, second line: u,v;u,v;...)
    #[arg(value_name = "GRAPH")]
    graph: Option<PathBuf>,

    /// Solve the graph and write the report to this file instead of
    /// starting the menu
    #[arg(short, long, value_name = "FILE", requires = "graph")]
    report: Option<PathBuf>,

    /// Linear programming solver
    #[arg(short, long, default_value = "simplex")]
    solver: SolverArg,

    /// Largest denominator of the reported values
    #[arg(long, default_value_t = clique_entropy::rational::MAX_DENOMINATOR,
          value_parser = clap::value_parser!(i64).range(1..))]
    max_denominator: i64,

    /// Largest number of vertices accepted
    #[arg(long, default_value_t = Config::default().max_vertices)]
    max_vertices: usize,

    /// Verbose output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SolverArg {
    /// Built-in dense simplex
    Simplex,
    /// External csdp binary, found in the PATH
    Csdp,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            max_denominator: self.max_denominator,
            max_vertices: self.max_vertices,
            ..Config::default()
        }
    }
    fn solver(&self, config: &Config) -> Box<dyn LpSolver> {
        match self.solver {
            SolverArg::Simplex => Box::new(Simplex::with_tolerance(config.tolerance)),
            SolverArg::Csdp => Box::new(Csdp::default()),
        }
    }
}

/// State of the interactive menu.
struct Session {
    solver: Box<dyn LpSolver>,
    config: Config,
    graph: Option<Graph>,
    result: Option<Calculation>,
    directory: PathBuf,
}

const MENU: &str = "Menu:
 0 - Exit
 1 - New Graph
 2 - Load Graph
 3 - Calculate
 4 - Save result";

// Print `msg` and read one line, `None` at the end of the input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, msg: &str) -> Result<Option<String>> {
    write!(out, "{}", msg)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

// Prompt until the answer parses and satisfies `valid`.
fn prompt_parse<T, R, W, F>(input: &mut R, out: &mut W, msg: &str, valid: F) -> Result<Option<T>>
where
    T: std::str::FromStr,
    R: BufRead,
    W: Write,
    F: Fn(&T) -> bool,
{
    while let Some(line) = prompt(input, out, msg)? {
        match line.parse() {
            Ok(x) if valid(&x) => return Ok(Some(x)),
            _ => writeln!(out, "Invalid Entry.")?,
        }
    }
    Ok(None)
}

impl Session {
    fn new(solver: Box<dyn LpSolver>, config: Config) -> Self {
        Self {
            solver,
            config,
            graph: None,
            result: None,
            directory: PathBuf::from("."),
        }
    }
    fn set_graph(&mut self, g: Graph) {
        self.graph = Some(g);
        self.result = None
    }
    /// Run the menu until the user exits or the input ends.
    fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<()> {
        loop {
            writeln!(out, "{}", MENU)?;
            let Some(choice) = prompt_parse(input, out, "Please choose an action: ", |&x: &u8| {
                x <= 4
            })?
            else {
                return Ok(());
            };
            let done = match choice {
                0 => return Ok(()),
                1 => self.new_graph(input, out)?,
                2 => self.load_graph(input, out)?,
                3 => self.calculate(out)?,
                _ => self.save(input, out)?,
            };
            if !done {
                return Ok(());
            }
        }
    }
    // The following return false at the end of the input.
    fn new_graph<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<bool> {
        let Some(n) = prompt_parse(input, out, "How many nodes? ", |&n: &usize| {
            n >= 1 && n <= self.config.max_vertices
        })?
        else {
            return Ok(false);
        };
        let mut g = Graph::empty(n);
        loop {
            let edges: Vec<_> = g.edges().collect();
            writeln!(out, "Nodes (starts @ 0): {} | Edges: {:?}", n, edges)?;
            let Some(answer) = prompt(input, out, "Add an edge? (Y or N): ")? else {
                return Ok(false);
            };
            match answer.as_str() {
                "N" | "n" => break,
                "Y" | "y" => (),
                _ => {
                    writeln!(out, "Invalid Entry.")?;
                    continue;
                }
            }
            let Some(u) = prompt_parse(input, out, "Node 1 - ", |_: &usize| true)? else {
                return Ok(false);
            };
            let Some(v) = prompt_parse(input, out, "Node 2 - ", |_: &usize| true)? else {
                return Ok(false);
            };
            if let Err(e) = g.add_edge(u, v) {
                writeln!(out, "Invalid Entry: {}", e)?
            }
        }
        writeln!(out, "New graph: {}", g)?;
        self.set_graph(g);
        Ok(true)
    }
    fn load_graph<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<bool> {
        let Some(filename) = prompt(input, out, "Filename: ")? else {
            return Ok(false);
        };
        match Graph::load(&filename) {
            Ok(g) => {
                writeln!(out, "Graph successfully loaded: {}", g)?;
                self.set_graph(g)
            }
            Err(e) => writeln!(out, "Loading failed: {}", e)?,
        }
        Ok(true)
    }
    fn calculate<W: Write>(&mut self, out: &mut W) -> Result<bool> {
        let Some(g) = &self.graph else {
            writeln!(out, "No graph. (Please create or load a graph first.)")?;
            return Ok(true);
        };
        match calculate(g, self.solver.as_ref(), &self.config) {
            Ok(res) => {
                for (name, bound) in [("Fractional Clique Cover", &res.cover), ("Shannon Entropy", &res.entropy)] {
                    match bound.value {
                        Some(v) => writeln!(out, "{} - {}", name, v)?,
                        None => writeln!(out, "{} - {}", name, bound.status)?,
                    }
                }
                self.result = Some(res)
            }
            Err(e) => {
                error!("{}", e);
                writeln!(out, "Calculation failed: {}", e)?
            }
        }
        Ok(true)
    }
    fn save<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<bool> {
        let (Some(g), Some(res)) = (&self.graph, &self.result) else {
            writeln!(out, "No results to save. (Please run calculate before attempting to save.)")?;
            return Ok(true);
        };
        let Some(name) = prompt(input, out, "Name of file to be saved: ")? else {
            return Ok(false);
        };
        let filename = self.directory.join(format!("{}.txt", name));
        match report::write_report(&filename, g, res) {
            Ok(()) => writeln!(out, "Saving of {}.txt successful.", name)?,
            Err(e) => writeln!(out, "Saving failed: {}", e)?,
        }
        Ok(true)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    clique_entropy::init_log(level);
    debug!("{:?}", cli);

    let config = cli.config();
    let mut session = Session::new(cli.solver(&config), config);
    if let Some(path) = &cli.graph {
        let g = Graph::load(path).with_context(|| format!("Failed to load {}", path.display()))?;
        session.set_graph(g);
    }
    if let Some(path) = &cli.report {
        let Some(g) = &session.graph else {
            bail!("No graph to solve");
        };
        let res = calculate(g, session.solver.as_ref(), &session.config)?;
        report::write_report(path, g, &res)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        return Ok(());
    }
    let stdin = io::stdin();
    session.run(&mut stdin.lock(), &mut io::stdout())
}
