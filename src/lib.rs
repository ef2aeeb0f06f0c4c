//! Encodings of graph problems into weighted partial MaxSAT.
//!
//! Graphs are read by [`GraphDimacsReader`], encoded into a [`WCNFFormula`] by one of the
//! [`GraphEncoding`] implementations, and solved by a [`MaxSatSolver`], usually an
//! [`ExternalMaxSatSolver`] running a solver executable.

mod core;
pub use crate::core::Clause;
pub use crate::core::ExternalMaxSatSolver;
pub use crate::core::Graph;
pub use crate::core::GraphProblem;
pub use crate::core::GraphWarning;
pub use crate::core::InputMode;
pub use crate::core::Literal;
pub use crate::core::MaxSatSolver;
pub use crate::core::Node;
pub use crate::core::Solution;
pub use crate::core::SolverError;
pub use crate::core::Variable;
pub use crate::core::WCNFFormula;
pub use crate::core::Weight;
pub use crate::core::Weighted;
pub use crate::core::WithWarnings;
pub use crate::core::parse_maxsat_output;

mod encodings;
pub use encodings::solve_with_encoding;
pub use encodings::CliqueEncoding;
pub use encodings::CutEncoding;
pub use encodings::GraphEncoding;
pub use encodings::VertexCoverEncoding;

mod io;
pub use io::GraphDimacsReader;
pub use io::GraphvizDotWriter;
pub use io::WCNFDimacsWriter;
