use super::{node_values, nodes_with_value, GraphEncoding, VertexCoverEncoding};
use crate::{
    core::{GraphProblem, Literal, Solution},
    Graph, WCNFFormula,
};
use anyhow::Result;

/// The MaxSAT encoding of the maximum clique problem.
///
/// A set of nodes is a clique iff its complement is a vertex cover of the complement graph.
/// The formula is the one of the minimum vertex cover of the complement graph,
/// and the clique is made of the nodes left out of the cover.
///
/// The [`legacy`](Self::legacy) variant reproduces an earlier behavior in which the formula
/// was the vertex cover formula of the graph itself; its solutions are not cliques in general.
pub struct CliqueEncoding<'a> {
    graph: &'a Graph,
    complement: Option<Graph>,
}

impl<'a> CliqueEncoding<'a> {
    /// Builds the encoding of the problem for the given graph.
    pub fn new(graph: &'a Graph) -> Self {
        CliqueEncoding {
            graph,
            complement: Some(graph.complement()),
        }
    }

    /// Builds the legacy encoding, identical to the vertex cover one.
    pub fn legacy(graph: &'a Graph) -> Self {
        CliqueEncoding {
            graph,
            complement: None,
        }
    }

    /// Returns `true` iff this is the legacy encoding.
    pub fn is_legacy(&self) -> bool {
        self.complement.is_none()
    }

    fn encoded_graph(&self) -> &Graph {
        self.complement.as_ref().unwrap_or(self.graph)
    }
}

impl GraphEncoding for CliqueEncoding<'_> {
    fn problem(&self) -> GraphProblem {
        GraphProblem::MaxClique
    }

    fn to_wcnf_formula(&self) -> WCNFFormula {
        VertexCoverEncoding::new(self.encoded_graph()).to_wcnf_formula()
    }

    fn decode(&self, cost: usize, model: &[Literal]) -> Result<Solution> {
        let values = node_values(model, self.graph.n_nodes())?;
        if self.is_legacy() {
            Ok(Solution::new(
                self.problem(),
                cost,
                cost,
                nodes_with_value(&values, true),
            ))
        } else {
            let clique = nodes_with_value(&values, false);
            Ok(Solution::new(self.problem(), cost, clique.len(), clique))
        }
    }
}
