use super::{Literal, WCNFFormula};
use crate::io::WCNFDimacsWriter;
use anyhow::{anyhow, Context, Result};
use std::{
    io::{self, BufRead, BufReader, BufWriter, Read, Write},
    path::PathBuf,
    process::{self, Child, ChildStdin, ExitStatus, Stdio},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};
use tempfile::Builder;
use thiserror::Error;
use tracing::{debug, info, trace};

const STATUS_OPTIMUM_FOUND: &str = "OPTIMUM FOUND";

const WAIT_POLLING_INTERVAL: Duration = Duration::from_millis(10);

/// An interface for MaxSAT solvers.
///
/// A call returns the optimal cost and the model, as a list of literals.
pub trait MaxSatSolver {
    /// Computes an optimal solution for a formula.
    fn solve(&self, formula: &WCNFFormula) -> Result<(usize, Vec<Literal>)>;
}

/// The errors raised when the external solver does not give an optimal solution.
///
/// They are returned wrapped into [`anyhow::Error`]; use `downcast_ref` to inspect them.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The solver process could not be started.
    #[error(r#"cannot start the MaxSAT solver "{solver}": {source}"#)]
    Spawn {
        /// the path to the solver
        solver: String,
        /// the underlying error
        source: io::Error,
    },
    /// The solver process ended with an unexpected exit code, or was killed by a signal.
    #[error("MaxSAT solver ended with an error status ({status})\n{output}")]
    ExitStatus {
        /// the exit status
        status: String,
        /// what the solver wrote on its standard output and error
        output: String,
    },
    /// The solver was killed since it did not end before the time limit.
    #[error("MaxSAT solver did not end before the time limit ({0:?})")]
    Timeout(Duration),
    /// The solver reported a status different from "OPTIMUM FOUND".
    #[error(r#"wrong solver status; expected "OPTIMUM FOUND", got "{status}""#)]
    Status {
        /// the status given by the solver
        status: String,
        /// what the solver wrote on its standard output
        output: String,
    },
    /// The output of the solver does not follow the expected format.
    #[error("malformed MaxSAT solver output: {0}")]
    MalformedOutput(String),
}

/// The way the formula is transmitted to the external solver.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    /// The formula is written into a temporary file which path is given as the last argument.
    #[default]
    TempFile,
    /// The formula is written to the standard input of the solver.
    Stdin,
}

/// An external MaxSAT solver, built thanks to the path to its executable.
/// The solver must follow the I/O rules defined by the MaxSAT Evaluations.
#[derive(Clone, Debug)]
pub struct ExternalMaxSatSolver {
    path: PathBuf,
    args: Vec<String>,
    input_mode: InputMode,
    timeout: Option<Duration>,
    accepted_exit_codes: Vec<i32>,
}

impl ExternalMaxSatSolver {
    /// Sets arguments to give to the solver before the formula file path.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the way the formula is transmitted to the solver.
    pub fn with_input_mode(mut self, input_mode: InputMode) -> Self {
        self.input_mode = input_mode;
        self
    }

    /// Sets a time limit; the solver is killed when it is reached.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the exit codes considered as a normal termination.
    ///
    /// By default, only 0 is accepted.
    /// Solvers following the MaxSAT Evaluation rules may exit with 10, 20 or 30.
    pub fn with_accepted_exit_codes(mut self, codes: &[i32]) -> Self {
        self.accepted_exit_codes = codes.to_vec();
        self
    }

    fn command(&self) -> process::Command {
        let mut command = process::Command::new(&self.path);
        command
            .args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    fn spawn(&self, mut command: process::Command) -> Result<Child> {
        command.spawn().map_err(|source| {
            anyhow!(SolverError::Spawn {
                solver: self.path.display().to_string(),
                source,
            })
        })
    }

    fn wait(
        &self,
        mut child: Child,
        started: Instant,
        readers: PipeReaders,
    ) -> Result<ProcessOutput> {
        let status = match wait_with_deadline(&mut child, self.timeout.map(|t| started + t)) {
            Ok(Some(s)) => s,
            Ok(None) => {
                let timeout = self.timeout.unwrap_or_default();
                info!("MaxSAT solver reached the time limit; killing it");
                kill_and_reap(&mut child);
                // processes started by the solver may still hold the pipes; the readers are detached
                drop(readers);
                return Err(anyhow!(SolverError::Timeout(timeout)));
            }
            Err(e) => {
                kill_and_reap(&mut child);
                return Err(e).context("while waiting for the MaxSAT solver");
            }
        };
        let (stdout, stderr) = readers.join();
        Ok(ProcessOutput {
            status,
            stdout,
            stderr,
        })
    }

    fn check_exit_status(&self, output: &ProcessOutput) -> Result<()> {
        match output.status.code() {
            Some(c) if self.accepted_exit_codes.contains(&c) => Ok(()),
            Some(c) => Err(anyhow!(SolverError::ExitStatus {
                status: format!("exit code {}", c),
                output: output.captured(),
            })),
            None => Err(anyhow!(SolverError::ExitStatus {
                status: "terminated by a signal".to_string(),
                output: output.captured(),
            })),
        }
    }

    fn solve_with_temp_file(&self, formula: &WCNFFormula) -> Result<ProcessOutput> {
        let wcnf_file = Builder::new()
            .prefix("crusti_graph-")
            .suffix(".wcnf")
            .tempfile()
            .context("while creating a temporary file")?;
        let mut wcnf_file_writer = BufWriter::new(wcnf_file);
        WCNFDimacsWriter
            .write(&mut wcnf_file_writer, formula)
            .context("while writing the MaxSAT problem")?;
        let wcnf_file_path = wcnf_file_writer
            .into_inner()
            .map_err(|e| e.into_error())
            .context("while flushing the MaxSAT problem")?
            .into_temp_path();
        debug!("wrote the MaxSAT problem into {:?}", wcnf_file_path);
        let mut command = self.command();
        command.arg(wcnf_file_path.as_os_str()).stdin(Stdio::null());
        let mut child = self.spawn(command)?;
        let started = Instant::now();
        let readers = PipeReaders::spawn(&mut child);
        let output = self.wait(child, started, readers);
        wcnf_file_path
            .close()
            .context("while deleting the temporary file")?;
        output
    }

    fn solve_with_stdin(&self, formula: &WCNFFormula) -> Result<ProcessOutput> {
        let mut wcnf = Vec::new();
        WCNFDimacsWriter
            .write(&mut wcnf, formula)
            .context("while writing the MaxSAT problem")?;
        let mut command = self.command();
        command.stdin(Stdio::piped());
        let mut child = self.spawn(command)?;
        let started = Instant::now();
        let readers = PipeReaders::spawn(&mut child);
        let stdin_writer = spawn_stdin_writer(child.stdin.take(), wcnf);
        let output = self.wait(child, started, readers)?;
        if let Err(e) = join_stdin_writer(stdin_writer) {
            // the solver may have ended early; its exit status is more informative than a broken pipe
            debug!("cannot write the MaxSAT problem to the solver: {:#}", e);
            self.check_exit_status(&output)?;
            return Err(e).context("while writing the MaxSAT problem");
        }
        Ok(output)
    }
}

impl MaxSatSolver for ExternalMaxSatSolver {
    fn solve(&self, formula: &WCNFFormula) -> Result<(usize, Vec<Literal>)> {
        info!(
            "invoking the MaxSAT solver {:?} on a formula with {} variables and {} clauses",
            self.path,
            formula.n_vars(),
            formula.n_clauses()
        );
        let output = match self.input_mode {
            InputMode::TempFile => self.solve_with_temp_file(formula)?,
            InputMode::Stdin => self.solve_with_stdin(formula)?,
        };
        self.check_exit_status(&output)
            .context("while inspecting the output of the MaxSAT solver")?;
        let optimum =
            parse_maxsat_output(BufReader::new(output.stdout.as_slice()), formula.n_vars())
                .context("while inspecting the output of the MaxSAT solver")?;
        info!(
            "MaxSAT solver exited successfully with an optimal value of {}",
            optimum.0
        );
        Ok(optimum)
    }
}

impl From<PathBuf> for ExternalMaxSatSolver {
    fn from(value: PathBuf) -> Self {
        Self {
            path: value,
            args: Vec::new(),
            input_mode: InputMode::default(),
            timeout: None,
            accepted_exit_codes: vec![0],
        }
    }
}

struct ProcessOutput {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl ProcessOutput {
    fn captured(&self) -> String {
        format!(
            "{}{}",
            String::from_utf8_lossy(&self.stdout),
            String::from_utf8_lossy(&self.stderr)
        )
    }
}

// The pipes are drained on their own threads, so a solver filling them never blocks.
struct PipeReaders {
    stdout: Option<JoinHandle<Vec<u8>>>,
    stderr: Option<JoinHandle<Vec<u8>>>,
}

impl PipeReaders {
    fn spawn(child: &mut Child) -> Self {
        Self {
            stdout: spawn_pipe_reader(child.stdout.take()),
            stderr: spawn_pipe_reader(child.stderr.take()),
        }
    }

    fn join(self) -> (Vec<u8>, Vec<u8>) {
        (join_pipe_reader(self.stdout), join_pipe_reader(self.stderr))
    }
}

fn spawn_pipe_reader<R>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    pipe.map(|mut p| {
        thread::spawn(move || {
            let mut buffer = Vec::new();
            // a read error truncates the captured output; the exit status still tells what happened
            let _ = p.read_to_end(&mut buffer);
            buffer
        })
    })
}

fn join_pipe_reader(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

fn spawn_stdin_writer(stdin: Option<ChildStdin>, data: Vec<u8>) -> JoinHandle<io::Result<()>> {
    thread::spawn(move || match stdin {
        Some(mut s) => s.write_all(&data),
        None => Err(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "standard input of the MaxSAT solver is unavailable",
        )),
    })
}

fn join_stdin_writer(handle: JoinHandle<io::Result<()>>) -> Result<()> {
    handle
        .join()
        .map_err(|_| anyhow!("the thread writing to the MaxSAT solver panicked"))?
        .map_err(anyhow::Error::from)
}

fn wait_with_deadline(
    child: &mut Child,
    deadline: Option<Instant>,
) -> io::Result<Option<ExitStatus>> {
    let deadline = match deadline {
        None => return child.wait().map(Some),
        Some(d) => d,
    };
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(WAIT_POLLING_INTERVAL);
    }
}

fn kill_and_reap(child: &mut Child) {
    // the child may already be gone; both calls are best effort
    let _ = child.kill();
    let _ = child.wait();
}

/// Parses the output of a MaxSAT solver.
///
/// `c` lines and unknown lines are ignored.
/// The last `o` line gives the cost, the `v` lines are concatenated to get the model,
/// and the single `s` line must be `OPTIMUM FOUND`.
/// The model may be given as a list of literals or, following the MaxSAT Evaluation 2022 rules,
/// as a single word of `n_vars` characters in `0` and `1`.
/// Each variable of `1..=n_vars` must be assigned; the model is returned in the order of the variables.
pub fn parse_maxsat_output<R>(mut out_reader: R, n_vars: usize) -> Result<(usize, Vec<Literal>)>
where
    R: BufRead,
{
    let mut s_line: Option<String> = None;
    let mut o_line: Option<String> = None;
    let mut v_words: Option<Vec<String>> = None;
    let mut full_output = String::new();
    let mut buffer = String::new();
    loop {
        buffer.clear();
        if out_reader
            .read_line(&mut buffer)
            .context("while reading the solver output")?
            == 0
        {
            break;
        }
        full_output.push_str(&buffer);
        let mut words = buffer.split_whitespace();
        match words.next() {
            Some("s") => {
                if s_line.is_some() {
                    return Err(malformed(r#"multiple "s" lines in output"#));
                }
                s_line = Some(words.collect::<Vec<_>>().join(" "));
            }
            Some("o") => o_line = Some(words.collect::<Vec<_>>().join(" ")),
            Some("v") => v_words
                .get_or_insert_with(Vec::new)
                .extend(words.map(str::to_string)),
            Some("c") | None => continue,
            Some(_) => trace!("ignoring solver output line: {}", buffer.trim_end()),
        }
    }
    let status = s_line.ok_or_else(|| malformed(r#"missing "s" line"#))?;
    if status != STATUS_OPTIMUM_FOUND {
        return Err(anyhow!(SolverError::Status {
            status,
            output: full_output,
        }));
    }
    let o = o_line.ok_or_else(|| malformed(r#"missing "o" line"#))?;
    let cost = str::parse::<usize>(&o)
        .map_err(|_| malformed(&format!(r#"cannot read the objective value "{}""#, o)))?;
    let v = v_words.ok_or_else(|| malformed(r#"missing "v" line"#))?;
    let model = parse_model(&v, n_vars)?;
    Ok((cost, model))
}

fn parse_model(words: &[String], n_vars: usize) -> Result<Vec<Literal>> {
    if let [word] = words {
        if n_vars > 1 && word.len() == n_vars && word.chars().all(|c| c == '0' || c == '1') {
            return Ok(word
                .chars()
                .enumerate()
                .map(|(i, c)| {
                    let var = (i + 1) as Literal;
                    if c == '1' {
                        var
                    } else {
                        -var
                    }
                })
                .collect());
        }
    }
    let mut values: Vec<Option<bool>> = vec![None; n_vars];
    for w in words {
        let l = str::parse::<Literal>(w)
            .map_err(|_| malformed(&format!(r#"cannot read the literal "{}" in a "v" line"#, w)))?;
        if l == 0 {
            continue;
        }
        let var = l.unsigned_abs();
        if var > n_vars {
            return Err(malformed(&format!(
                "literal {} is out of range for a formula with {} variables",
                l, n_vars
            )));
        }
        match values[var - 1] {
            Some(v) if v != (l > 0) => {
                return Err(malformed(&format!(
                    "variable {} is both true and false in the model",
                    var
                )))
            }
            _ => values[var - 1] = Some(l > 0),
        }
    }
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            let var = (i + 1) as Literal;
            match v {
                Some(true) => Ok(var),
                Some(false) => Ok(-var),
                None => Err(malformed(&format!(
                    "variable {} is not assigned in the model",
                    var
                ))),
            }
        })
        .collect()
}

fn malformed(message: &str) -> anyhow::Error {
    anyhow!(SolverError::MalformedOutput(message.to_string()))
}
