//! The csdp solver, through files in the SDPA format.
//!
//! csdp solves the pair of semidefinite programs
//! ```text
//! (P) max tr(F0 X)  s.t. tr(Fi X) = bi,  X ⪰ 0
//! (D) min b.y       s.t. Σ yi Fi - F0 ⪰ 0
//! ```
//! A linear program `min c.x s.t. A x ≥ r` is an instance of (D) where all
//! matrices are diagonal: `b = c`, the diagonal of `Fi` is the column of
//! `x_i` in `A` and the diagonal of `F0` is `r`. The values of the
//! variables are read from the vector `y` of the certificate.

use crate::error::Error;
use crate::lp::{Comparison, LpSolver, Model, Sense, Solution, Status};
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::str::FromStr;
use std::time::{Duration, Instant};

use log::*;

/// A line in a .sdpa file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SdpaCoeff {
    pub mat: usize,
    pub block: usize,
    pub i: usize,
    pub j: usize,
    pub val: f64,
}

impl FromStr for SdpaCoeff {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut iter = s.split_whitespace();
        let mut next = || {
            iter.next()
                .ok_or_else(|| Error::ParseError("Less than 5 elements".into()))
        };
        let result = SdpaCoeff {
            mat: next()?.parse()?,
            block: next()?.parse()?,
            i: next()?.parse()?,
            j: next()?.parse()?,
            val: next()?.parse()?,
        };
        if iter.next().is_some() {
            return Err(Error::ParseError("More than 5 elements".into()));
        };
        Ok(result)
    }
}

impl Display for SdpaCoeff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.mat, self.block, self.i, self.j, self.val
        )
    }
}

fn parse_line<T: FromStr>(line: Option<String>, what: &str) -> Result<Vec<T>, Error>
where
    Error: From<T::Err>,
{
    let line = line.ok_or_else(|| Error::ParseError(format!("missing {}", what)))?;
    let mut res = Vec::new();
    for x in line.split(|c: char| c.is_whitespace() || c == ',' || c == '{' || c == '}') {
        if !x.is_empty() {
            res.push(x.parse()?)
        }
    }
    Ok(res)
}

// Non-empty lines of a file, without the comments
fn content_lines<P: AsRef<Path>>(filename: P) -> Result<Vec<String>, Error> {
    let buf = BufReader::new(File::open(filename)?);
    let mut res = Vec::new();
    for line in buf.lines() {
        let line = line?;
        let l = line.trim_start();
        if !l.is_empty() && !l.starts_with('*') && !l.starts_with('"') {
            res.push(line)
        }
    }
    Ok(res)
}

// The diagonal block of a linear program, built one entry at a time
#[derive(Debug, Default)]
struct DiagonalBlock {
    size: usize,
    coeffs: Vec<SdpaCoeff>,
}

impl DiagonalBlock {
    // Add the entry `Σ val * y_var ≥ rhs`
    fn push<I: IntoIterator<Item = (usize, f64)>>(&mut self, terms: I, rhs: f64) {
        self.size += 1;
        let i = self.size;
        if rhs != 0. {
            self.coeffs.push(SdpaCoeff {
                mat: 0,
                block: 1,
                i,
                j: i,
                val: rhs,
            })
        }
        for (var, val) in terms {
            self.coeffs.push(SdpaCoeff {
                mat: var + 1,
                block: 1,
                i,
                j: i,
                val,
            })
        }
    }
}

// SDPA format for problems
// 1. dimension ( =b.len() )
// 2. n_blocks ( =block_sizes.len() )
// 3. block_sizes of length nblock
// 4. b of length dim
// 5+. list of coefficients
#[derive(Debug, Clone, PartialEq)]
pub struct SdpaProblem {
    block_sizes: Vec<i32>,
    b: Vec<f64>,
    coeffs: Vec<SdpaCoeff>,
}

impl SdpaProblem {
    /// Translate a linear program into a diagonal semidefinite program.
    ///
    /// Every `≥` constraint is one diagonal entry, `≤` constraints are
    /// negated, equalities are split in two inequalities and each variable
    /// gets an entry for its non-negativity. A maximization is turned into
    /// the minimization of the opposite objective.
    pub fn from_model(model: &Model) -> Self {
        let sign = match model.sense() {
            Sense::Minimize => 1.,
            Sense::Maximize => -1.,
        };
        let mut b = vec![0.; model.n_vars()];
        for (i, &c) in model.objective().iter() {
            b[i] = sign * c
        }
        let mut block = DiagonalBlock::default();
        for c in model.constraints() {
            let row = || c.row.iter().map(|(i, &v)| (i, v));
            let neg_row = || c.row.iter().map(|(i, &v)| (i, -v));
            match c.cmp {
                Comparison::AtLeast => block.push(row(), c.rhs),
                Comparison::AtMost => block.push(neg_row(), -c.rhs),
                Comparison::Equal => {
                    block.push(row(), c.rhs);
                    block.push(neg_row(), -c.rhs)
                }
            }
        }
        for var in 0..model.n_vars() {
            block.push([(var, 1.)], 0.)
        }
        Self {
            block_sizes: vec![-(block.size as i32)],
            b,
            coeffs: block.coeffs,
        }
    }
    /// Size of the diagonal block.
    pub fn entries(&self) -> usize {
        self.block_sizes.iter().map(|x| x.unsigned_abs() as usize).sum()
    }
    pub fn write<P: AsRef<Path>>(&self, filename: P) -> Result<(), Error> {
        let mut w = BufWriter::new(File::create(filename)?);
        writeln!(w, "{}", self.b.len())?;
        writeln!(w, "{}", self.block_sizes.len())?;
        for i in &self.block_sizes {
            write!(w, "{} ", i)?;
        }
        writeln!(w)?;
        for x in &self.b {
            write!(w, "{} ", x)?;
        }
        writeln!(w)?;
        for coeff in &self.coeffs {
            writeln!(w, "{}", coeff)?;
        }
        w.flush()?;
        Ok(())
    }
}

// SDPA format for certificates (as given by csdp)
// 1. vector y
// 2+. list of coefficients for Z and X
// matrix 1: Z, matrix 2: X
#[derive(Debug, Clone, PartialEq)]
pub struct SdpaCertificate {
    y: Vec<f64>,
    coeffs: Vec<SdpaCoeff>,
}

impl SdpaCertificate {
    pub fn load<P: AsRef<Path>>(filename: P) -> Result<Self, Error> {
        let mut lines = content_lines(filename)?.into_iter();
        let y = parse_line(lines.next(), "vector y")?;
        let coeffs = lines.map(|l| l.parse()).collect::<Result<_, _>>()?;
        Ok(SdpaCertificate { y, coeffs })
    }
    pub fn y(&self) -> &[f64] {
        &self.y
    }
    /// Coefficients of the primal matrix `X`.
    pub fn primal(&self) -> impl Iterator<Item = &SdpaCoeff> {
        self.coeffs.iter().filter(|c| c.mat == 2)
    }
    /// Values of the `n_vars` variables of the linear program translated
    /// into `problem`, checking that the certificate answers this problem.
    pub fn values(&self, problem: &SdpaProblem, n_vars: usize) -> Result<&[f64], Error> {
        if self.y.len() != n_vars {
            return Err(Error::SolverOutput(format!(
                "certificate has {} values for {} variables",
                self.y.len(),
                n_vars
            )));
        }
        let size = problem.entries();
        if let Some(c) = self.primal().find(|c| c.block != 1 || c.i != c.j || c.i > size) {
            return Err(Error::SolverOutput(format!(
                "primal entry '{}' outside the diagonal of size {}",
                c, size
            )));
        }
        debug!("csdp: {} non-zero primal entries", self.primal().count());
        Ok(&self.y)
    }
}

/// Status of the linear program solved by csdp, from the exit code of csdp.
pub fn status_of_code(code: i32) -> Result<Status, Error> {
    match code {
        0 => Ok(Status::Optimal),
        3 => {
            warn!("csdp: partial success, the solution is not fully accurate");
            Ok(Status::Optimal)
        }
        // Infeasibility of (P) is unboundedness of (D) and conversely
        1 => Ok(Status::Unbounded),
        2 => Ok(Status::Infeasible),
        4..=9 => Ok(Status::NotSolved),
        _ => Err(Error::SolverFailed(code)),
    }
}

/// Run csdp on `problem`, writing the solution in `certificate`.
///
/// Returns the exit code of csdp and the primal value it printed, if any.
pub fn csdp(program: &str, problem: &Path, certificate: &Path) -> Result<(i32, Option<f64>), Error> {
    let mut command = Command::new(program);
    command.arg(problem).arg(certificate);
    info!("Calling CSDP");
    debug!("command: {:?}", command);
    let mut child = command.stdout(Stdio::piped()).spawn()?;
    let output = child
        .stdout
        .take()
        .ok_or_else(|| Error::SolverOutput("no standard output".into()))?;
    let time_start = Instant::now();
    let time_before_stream = Duration::from_secs(2);
    let mut stream = false;
    let mut value = None;
    for line in BufReader::new(output).lines() {
        let line = line?;
        if line.starts_with("Iter") {
            if !stream && time_start.elapsed() > time_before_stream {
                stream = true;
                info!(
                    "csdp is taking more than {}s, start streaming output",
                    time_before_stream.as_secs_f32()
                )
            }
            if stream {
                info!("{}", line)
            } else {
                debug!("{}", line)
            }
        } else if line.starts_with("Primal objective value:") {
            value = line.split_whitespace().nth(3).and_then(|x| x.parse().ok());
            debug!("{}", line)
        } else if !line.trim().is_empty() {
            debug!("{}", line)
        }
    }
    let code = child
        .wait()?
        .code()
        .ok_or_else(|| Error::SolverOutput("csdp was interrupted".into()))?;
    Ok((code, value))
}

/// The external solver csdp.
///
/// Each call to [`LpSolver::solve`] writes `<name>.dat-s` and `<name>.cert`
/// in `directory`, overwriting previous files.
#[derive(Debug, Clone)]
pub struct Csdp {
    pub program: String,
    pub directory: PathBuf,
    pub name: String,
}

impl Default for Csdp {
    fn default() -> Self {
        Self {
            program: "csdp".into(),
            directory: PathBuf::from("."),
            name: "lp".into(),
        }
    }
}

impl Csdp {
    /// Write the files of the solver in `directory`.
    pub fn in_directory<P: Into<PathBuf>>(directory: P) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }
    pub fn problem_file(&self) -> PathBuf {
        self.directory.join(format!("{}.dat-s", self.name))
    }
    pub fn certificate_file(&self) -> PathBuf {
        self.directory.join(format!("{}.cert", self.name))
    }
}

impl LpSolver for Csdp {
    fn name(&self) -> &str {
        "csdp"
    }

    fn solve(&self, model: &Model) -> Result<Solution, Error> {
        let problem = SdpaProblem::from_model(model);
        let problem_file = self.problem_file();
        let certificate_file = self.certificate_file();
        debug!(
            "Writing {} variables and {} diagonal entries to {}",
            model.n_vars(),
            problem.entries(),
            problem_file.display()
        );
        problem.write(&problem_file)?;
        let (code, value) = csdp(&self.program, &problem_file, &certificate_file)?;
        let status = status_of_code(code)?;
        if status != Status::Optimal {
            info!("csdp returned with code {}: {}", code, status);
            return Ok(Solution::not_optimal(status));
        }
        if let Some(v) = value {
            info!("csdp: primal value {}", v)
        }
        let certificate = SdpaCertificate::load(&certificate_file)?;
        let y = certificate.values(&problem, model.n_vars())?;
        Ok(Solution::optimal(y.to_vec()))
    }
}

/// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::lp::{ConstraintKind, LinExpr};

    fn small_model() -> Model {
        // max x0  s.t.  x0 + x1 ≤ 2,  x0 - x1 = 0
        let mut m = Model::new(Sense::Maximize, vec!["a".into(), "b".into()]);
        m.set_objective(LinExpr::new().term(0, 1.));
        m.at_most(
            ConstraintKind::Boundedness(0),
            LinExpr::new().term(0, 1.).term(1, 1.),
            2.,
        );
        m.equal(
            ConstraintKind::Normalization,
            LinExpr::new().term(0, 1.).term(1, -1.),
            0.,
        );
        m
    }

    #[test]
    fn coeff_format() {
        let c: SdpaCoeff = "2 1 3 3 -1.5".parse().unwrap();
        assert_eq!(
            c,
            SdpaCoeff {
                mat: 2,
                block: 1,
                i: 3,
                j: 3,
                val: -1.5
            }
        );
        assert_eq!(format!("{}", c), "2 1 3 3 -1.5");
        assert!("2 1 3 3".parse::<SdpaCoeff>().is_err());
        assert!("2 1 3 3 1 1".parse::<SdpaCoeff>().is_err());
        assert!("2 1 x 3 1".parse::<SdpaCoeff>().is_err());
    }

    #[test]
    fn diagonal_translation() {
        let p = SdpaProblem::from_model(&small_model());
        // one entry for the inequality, two for the equality, two for the signs
        assert_eq!(p.block_sizes, [-5]);
        assert_eq!(p.entries(), 5);
        assert_eq!(p.b, [-1., 0.]);
        let at = |i: usize| -> Vec<(usize, f64)> {
            p.coeffs
                .iter()
                .filter(|c| c.i == i)
                .map(|c| (c.mat, c.val))
                .collect()
        };
        assert_eq!(at(1), [(0, -2.), (1, -1.), (2, -1.)]);
        assert_eq!(at(2), [(1, 1.), (2, -1.)]);
        assert_eq!(at(3), [(1, -1.), (2, 1.)]);
        assert_eq!(at(4), [(1, 1.)]);
        assert_eq!(at(5), [(2, 1.)]);
        assert!(p.coeffs.iter().all(|c| c.i == c.j && c.block == 1));
    }

    #[test]
    fn problem_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("small.dat-s");
        let p = SdpaProblem::from_model(&small_model());
        p.write(&file).unwrap();
        let text = std::fs::read_to_string(&file).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[..4], ["2", "1", "-5 ", "-1 0 "]);
        let coeffs: Vec<SdpaCoeff> = lines[4..].iter().map(|l| l.parse().unwrap()).collect();
        assert_eq!(coeffs, p.coeffs);
    }

    #[test]
    fn certificate_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("small.cert");
        std::fs::write(&file, "1.0e+00 9.99e-01 \n1 1 1 1 0.5\n2 1 2 2 1.0\n").unwrap();
        let cert = SdpaCertificate::load(&file).unwrap();
        assert_eq!(cert.y(), [1., 0.999]);
        assert_eq!(cert.primal().count(), 1);
        let p = SdpaProblem::from_model(&small_model());
        assert_eq!(cert.values(&p, 2).unwrap(), [1., 0.999]);
        assert!(matches!(cert.values(&p, 3), Err(Error::SolverOutput(_))));
        std::fs::write(&file, "1 1\n2 1 6 6 1.0\n").unwrap();
        let outside = SdpaCertificate::load(&file).unwrap();
        assert!(matches!(outside.values(&p, 2), Err(Error::SolverOutput(_))));
        std::fs::write(&file, "").unwrap();
        assert!(SdpaCertificate::load(&file).is_err());
        std::fs::write(&file, "1.0 nan?\n").unwrap();
        assert!(SdpaCertificate::load(&file).is_err());
    }

    #[test]
    fn exit_codes() {
        assert_eq!(status_of_code(0).unwrap(), Status::Optimal);
        assert_eq!(status_of_code(1).unwrap(), Status::Unbounded);
        assert_eq!(status_of_code(2).unwrap(), Status::Infeasible);
        assert_eq!(status_of_code(7).unwrap(), Status::NotSolved);
        assert!(matches!(status_of_code(12), Err(Error::SolverFailed(12))));
    }

    #[test]
    fn missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let solver = Csdp {
            program: "csdp-that-does-not-exist".into(),
            ..Csdp::in_directory(dir.path())
        };
        assert!(matches!(solver.solve(&small_model()), Err(Error::Io(_))));
        assert!(solver.problem_file().exists());
    }
}
