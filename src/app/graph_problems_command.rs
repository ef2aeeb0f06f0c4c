use super::logging;
use anyhow::{Context, Result};
use clap::{App, Arg, ArgMatches};
use crusti_graph::{
    solve_with_encoding, CliqueEncoding, CutEncoding, ExternalMaxSatSolver, Graph,
    GraphDimacsReader, GraphEncoding, GraphProblem, GraphvizDotWriter, InputMode,
    VertexCoverEncoding, WCNFDimacsWriter,
};
use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info, warn};

const ARG_SOLVER: &str = "ARG_SOLVER";
const ARG_GRAPH: &str = "ARG_GRAPH";
const ARG_VISUALIZE: &str = "ARG_VISUALIZE";
const ARG_PROBLEM: &str = "ARG_PROBLEM";
const ARG_CLIQUE_ENCODING: &str = "ARG_CLIQUE_ENCODING";
const ARG_TIMEOUT: &str = "ARG_TIMEOUT";
const ARG_STDIN: &str = "ARG_STDIN";
const ARG_COMPETITION_EXIT_CODES: &str = "ARG_COMPETITION_EXIT_CODES";
const ARG_WCNF_DIR: &str = "ARG_WCNF_DIR";

const COMPETITION_EXIT_CODES: [i32; 4] = [0, 10, 20, 30];

pub(crate) fn clap_app<'a>() -> App<'a, 'a> {
    App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about("Solves graph problems through MaxSAT encodings")
        .arg(
            Arg::with_name(ARG_SOLVER)
                .index(1)
                .empty_values(false)
                .help("the path to the MaxSAT solver")
                .required(true),
        )
        .arg(
            Arg::with_name(ARG_GRAPH)
                .index(2)
                .empty_values(false)
                .help("the input file that contains the graph")
                .required(true),
        )
        .arg(
            Arg::with_name(ARG_VISUALIZE)
                .short("v")
                .long("visualize")
                .help("writes the graph in the Graphviz format into the working directory"),
        )
        .arg(
            Arg::with_name(ARG_PROBLEM)
                .short("p")
                .long("problem")
                .empty_values(false)
                .multiple(true)
                .number_of_values(1)
                .possible_values(&["mvc", "clique", "cut"])
                .help("the problems to solve (default: all of them)"),
        )
        .arg(
            Arg::with_name(ARG_CLIQUE_ENCODING)
                .long("clique-encoding")
                .empty_values(false)
                .multiple(false)
                .possible_values(&["complement", "legacy"])
                .default_value("complement")
                .help("the encoding used for the maximum clique problem"),
        )
        .arg(
            Arg::with_name(ARG_TIMEOUT)
                .long("timeout")
                .empty_values(false)
                .multiple(false)
                .help("the time limit of each solver call, in seconds"),
        )
        .arg(
            Arg::with_name(ARG_STDIN)
                .long("stdin")
                .help("gives the formulas to the solver through its standard input"),
        )
        .arg(
            Arg::with_name(ARG_COMPETITION_EXIT_CODES)
                .long("competition-exit-codes")
                .help("accepts the exit codes 10, 20 and 30 used by MaxSAT Evaluation solvers"),
        )
        .arg(
            Arg::with_name(ARG_WCNF_DIR)
                .long("wcnf-dir")
                .empty_values(false)
                .multiple(false)
                .help("a directory in which the MaxSAT formulas are saved"),
        )
        .arg(logging::logging_level_cli_arg())
}

pub(crate) fn execute(arg_matches: &ArgMatches<'_>) -> Result<()> {
    solve_graph_problems(arg_matches, &mut io::stdout())
}

fn solve_graph_problems(arg_matches: &ArgMatches<'_>, out: &mut dyn Write) -> Result<()> {
    let graph_path = realpath_from_arg(arg_matches, ARG_GRAPH)?;
    let graph = read_graph(&graph_path)?;
    if arg_matches.is_present(ARG_VISUALIZE) {
        write_graphviz(&graph, &graph_path)?;
    }
    let solver = create_solver(arg_matches)?;
    let problems = match arg_matches.values_of(ARG_PROBLEM) {
        None => GraphProblem::ALL.to_vec(),
        Some(values) => values
            .map(str::parse::<GraphProblem>)
            .collect::<Result<Vec<_>>>()?,
    };
    for problem in problems {
        let encoding = create_encoding(arg_matches, problem, &graph);
        if let Some(dir) = arg_matches.value_of(ARG_WCNF_DIR) {
            write_wcnf(encoding.as_ref(), Path::new(dir), &graph_path)?;
        }
        let solution = solve_with_encoding(encoding.as_ref(), &solver)?;
        info!(
            "{} optimum is {} (solver cost {})",
            problem,
            solution.objective(),
            solution.solver_cost()
        );
        writeln!(out, "{}", solution).context("while writing a solution")?;
    }
    Ok(())
}

fn read_graph(graph_path: &Path) -> Result<Graph> {
    info!("reading input file {:?}", graph_path);
    let file_reader = BufReader::new(
        File::open(graph_path).with_context(|| format!("while opening file {:?}", graph_path))?,
    );
    let (graph, warnings) = GraphDimacsReader
        .read(file_reader)
        .context("while parsing the input graph")?
        .into_parts();
    warnings.iter().for_each(|w| warn!("{}", w));
    info!(
        "graph has {} nodes and {} edges",
        graph.n_nodes(),
        graph.n_edges()
    );
    Ok(graph)
}

fn create_solver(arg_matches: &ArgMatches<'_>) -> Result<ExternalMaxSatSolver> {
    let mut solver = ExternalMaxSatSolver::from(realpath_from_arg(arg_matches, ARG_SOLVER)?);
    if let Some(t) = arg_matches.value_of(ARG_TIMEOUT) {
        let timeout = str::parse::<f64>(t)
            .ok()
            .filter(|s| *s > 0.)
            .and_then(|s| Duration::try_from_secs_f64(s).ok())
            .with_context(|| format!(r#"invalid timeout "{}""#, t))?;
        solver = solver.with_timeout(timeout);
    }
    if arg_matches.is_present(ARG_STDIN) {
        solver = solver.with_input_mode(InputMode::Stdin);
    }
    if arg_matches.is_present(ARG_COMPETITION_EXIT_CODES) {
        solver = solver.with_accepted_exit_codes(&COMPETITION_EXIT_CODES);
    }
    Ok(solver)
}

fn create_encoding<'a>(
    arg_matches: &ArgMatches<'_>,
    problem: GraphProblem,
    graph: &'a Graph,
) -> Box<dyn GraphEncoding + 'a> {
    match problem {
        GraphProblem::MinVertexCover => Box::new(VertexCoverEncoding::new(graph)),
        GraphProblem::MaxClique => match arg_matches.value_of(ARG_CLIQUE_ENCODING) {
            Some("legacy") => {
                warn!("the legacy clique encoding does not ensure the solution is a clique");
                Box::new(CliqueEncoding::legacy(graph))
            }
            _ => Box::new(CliqueEncoding::new(graph)),
        },
        GraphProblem::MaxCut => Box::new(CutEncoding::new(graph)),
    }
}

fn write_graphviz(graph: &Graph, graph_path: &Path) -> Result<()> {
    let name = file_name(graph_path);
    let dot_path = PathBuf::from(format!("{}.dot", name));
    info!("writing the graph into {:?}", dot_path);
    let file = File::create(&dot_path)
        .with_context(|| format!("while creating file {:?}", dot_path))?;
    let mut writer = BufWriter::new(file);
    GraphvizDotWriter.write(&mut writer, graph, &name)?;
    writer.flush().context("while writing the Graphviz file")
}

fn write_wcnf(encoding: &dyn GraphEncoding, dir: &Path, graph_path: &Path) -> Result<()> {
    let wcnf_path = dir.join(format!(
        "{}-{}.wcnf",
        file_name(graph_path),
        encoding.problem().cli_name()
    ));
    debug!("writing the MaxSAT formula into {:?}", wcnf_path);
    let file = File::create(&wcnf_path)
        .with_context(|| format!("while creating file {:?}", wcnf_path))?;
    let mut writer = BufWriter::new(file);
    WCNFDimacsWriter.write(&mut writer, &encoding.to_wcnf_formula())?;
    writer.flush().context("while writing a WCNF file")
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "graph".to_string())
}

fn realpath_from_arg(arg_matches: &ArgMatches<'_>, arg: &str) -> Result<PathBuf> {
    let file_path = arg_matches.value_of(arg).unwrap();
    fs::canonicalize(PathBuf::from(file_path))
        .with_context(|| format!(r#"while opening file "{}""#, file_path))
}
