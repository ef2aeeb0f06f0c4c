#[cfg(test)]
pub(crate) mod brute_force_solver;

mod graph;
pub use graph::Graph;
pub use graph::GraphWarning;
pub use graph::Node;
pub use graph::WithWarnings;

mod maxsat_solver;
pub use maxsat_solver::parse_maxsat_output;
pub use maxsat_solver::ExternalMaxSatSolver;
pub use maxsat_solver::InputMode;
pub use maxsat_solver::MaxSatSolver;
pub use maxsat_solver::SolverError;

mod problems;
pub use problems::GraphProblem;
pub use problems::Solution;

mod wcnf;
pub use wcnf::Clause;
pub use wcnf::Literal;
pub use wcnf::Variable;
pub use wcnf::WCNFFormula;

mod weighted;
pub use weighted::Weight;
pub use weighted::Weighted;
