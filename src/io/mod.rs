mod graph_dimacs;
pub use graph_dimacs::GraphDimacsReader;

mod graphviz_dot;
pub use graphviz_dot::GraphvizDotWriter;

mod wcnf_dimacs;
pub use wcnf_dimacs::WCNFDimacsWriter;

#[cfg(test)]
mod wcnf_dimacs_reader;
#[cfg(test)]
pub(crate) use wcnf_dimacs_reader::WCNFDimacsReader;
