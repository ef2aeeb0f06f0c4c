mod clique_encoding;
pub use clique_encoding::CliqueEncoding;

mod cut_encoding;
pub use cut_encoding::CutEncoding;

mod vertex_cover_encoding;
pub use vertex_cover_encoding::VertexCoverEncoding;

use crate::{
    core::{GraphProblem, Literal, MaxSatSolver, Node, Solution},
    WCNFFormula,
};
use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};

/// A trait implemented by structures encoding a graph problem into MaxSAT.
///
/// Each node `n` of the graph is encoded by the variable `n`.
pub trait GraphEncoding {
    /// Returns the problem handled by this encoding.
    fn problem(&self) -> GraphProblem;

    /// Builds the MaxSAT formula.
    fn to_wcnf_formula(&self) -> WCNFFormula;

    /// Translates an optimal model of the formula into a solution of the graph problem.
    fn decode(&self, cost: usize, model: &[Literal]) -> Result<Solution>;
}

/// Encodes a problem, solves it and decodes the result.
///
/// A formula without variables is not given to the solver: its optimal cost is 0.
pub fn solve_with_encoding(
    encoding: &dyn GraphEncoding,
    solver: &dyn MaxSatSolver,
) -> Result<Solution> {
    let problem = encoding.problem();
    let formula = encoding.to_wcnf_formula();
    debug!(
        "{} formula has {} variables, {} hard clauses and {} soft clauses",
        problem,
        formula.n_vars(),
        formula.n_hard_clauses(),
        formula.n_soft_clauses()
    );
    let (cost, model) = if formula.n_vars() == 0 {
        info!("{} formula has no variables; skipping the solver", problem);
        (0, Vec::new())
    } else {
        solver
            .solve(&formula)
            .with_context(|| format!("while solving the {} problem", problem))?
    };
    encoding
        .decode(cost, &model)
        .with_context(|| format!("while decoding the {} solution", problem))
}

/// Returns the truth values of the nodes `1..=n_nodes` in a model, indexed from 0.
///
/// Each node must be assigned by the model.
pub(crate) fn node_values(model: &[Literal], n_nodes: usize) -> Result<Vec<bool>> {
    let mut values = vec![None; n_nodes];
    for l in model {
        let var = l.unsigned_abs();
        if var == 0 || var > n_nodes {
            return Err(anyhow!(
                "literal {} is out of range for a model of {} variables",
                l,
                n_nodes
            ));
        }
        match values[var - 1] {
            Some(v) if v != (*l > 0) => {
                return Err(anyhow!("variable {} is both true and false in the model", var))
            }
            _ => values[var - 1] = Some(*l > 0),
        }
    }
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| v.ok_or_else(|| anyhow!("node {} is not assigned in the model", i + 1)))
        .collect()
}

/// Returns the nodes which truth value is the given one.
pub(crate) fn nodes_with_value(values: &[bool], value: bool) -> Vec<Node> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v == value)
        .map(|(i, _)| i + 1)
        .collect()
}

pub(crate) fn node_lit(node: Node) -> Literal {
    node as Literal
}
