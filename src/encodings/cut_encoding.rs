use super::{node_lit, node_values, nodes_with_value, GraphEncoding};
use crate::{
    core::{GraphProblem, Literal, Solution},
    Graph, WCNFFormula,
};
use anyhow::Result;
use tracing::debug;

/// The MaxSAT encoding of the maximum cut problem.
///
/// A node is on the first side of the cut iff its variable is true.
/// Each edge `(u, v)` gives the soft clauses `u ∨ v` and `¬u ∨ ¬v` of weight 1;
/// both are satisfied iff the edge is cut, and exactly one is falsified otherwise.
/// The optimal cost is thus the number of edges left uncut.
///
/// Self loops cannot be cut and are not encoded.
pub struct CutEncoding<'a> {
    graph: &'a Graph,
}

impl<'a> CutEncoding<'a> {
    /// Builds the encoding of the problem for the given graph.
    pub fn new(graph: &'a Graph) -> Self {
        CutEncoding { graph }
    }

    fn iter_cuttable_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.graph.iter_edges().filter(|(u, v)| u != v)
    }
}

impl GraphEncoding for CutEncoding<'_> {
    fn problem(&self) -> GraphProblem {
        GraphProblem::MaxCut
    }

    fn to_wcnf_formula(&self) -> WCNFFormula {
        let mut formula = WCNFFormula::default();
        formula.new_vars(self.graph.n_nodes());
        self.iter_cuttable_edges().for_each(|(u, v)| {
            formula.add_soft_clause(vec![node_lit(u), node_lit(v)], 1);
            formula.add_soft_clause(vec![-node_lit(u), -node_lit(v)], 1);
        });
        let n_loops = self.graph.n_edges() - self.iter_cuttable_edges().count();
        if n_loops > 0 {
            debug!("ignored {} self loops in the cut encoding", n_loops);
        }
        formula
    }

    fn decode(&self, cost: usize, model: &[Literal]) -> Result<Solution> {
        let values = node_values(model, self.graph.n_nodes())?;
        let cut_value = self.iter_cuttable_edges().count().saturating_sub(cost);
        Ok(Solution::new(
            self.problem(),
            cost,
            cut_value,
            nodes_with_value(&values, true),
        ))
    }
}
