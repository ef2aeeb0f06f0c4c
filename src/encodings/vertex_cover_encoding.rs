use super::{node_lit, node_values, nodes_with_value, GraphEncoding};
use crate::{
    core::{GraphProblem, Literal, Solution},
    Graph, WCNFFormula,
};
use anyhow::Result;

/// The MaxSAT encoding of the minimum vertex cover problem.
///
/// Each edge gives a hard clause requiring one of its endpoints to be in the cover,
/// and each node gives a soft unit clause of weight 1 penalizing its presence in the cover.
/// The optimal cost is the size of a minimum vertex cover.
pub struct VertexCoverEncoding<'a> {
    graph: &'a Graph,
}

impl<'a> VertexCoverEncoding<'a> {
    /// Builds the encoding of the problem for the given graph.
    pub fn new(graph: &'a Graph) -> Self {
        VertexCoverEncoding { graph }
    }
}

impl GraphEncoding for VertexCoverEncoding<'_> {
    fn problem(&self) -> GraphProblem {
        GraphProblem::MinVertexCover
    }

    fn to_wcnf_formula(&self) -> WCNFFormula {
        let mut formula = WCNFFormula::default();
        formula
            .new_vars(self.graph.n_nodes())
            .for_each(|n| formula.add_soft_clause(vec![-node_lit(n)], 1));
        self.graph
            .iter_edges()
            .for_each(|(u, v)| formula.add_hard_clause(vec![node_lit(u), node_lit(v)]));
        formula
    }

    fn decode(&self, cost: usize, model: &[Literal]) -> Result<Solution> {
        let values = node_values(model, self.graph.n_nodes())?;
        Ok(Solution::new(
            self.problem(),
            cost,
            cost,
            nodes_with_value(&values, true),
        ))
    }
}
