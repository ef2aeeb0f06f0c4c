use super::Node;
use anyhow::{anyhow, Error};
use itertools::Itertools;
use std::{fmt::Display, str::FromStr};

/// The graph problems that can be encoded into MaxSAT.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphProblem {
    /// Minimum vertex cover.
    MinVertexCover,
    /// Maximum clique.
    MaxClique,
    /// Maximum cut.
    MaxCut,
}

impl GraphProblem {
    /// All the problems, in the order they are solved by default.
    pub const ALL: [GraphProblem; 3] = [
        GraphProblem::MinVertexCover,
        GraphProblem::MaxClique,
        GraphProblem::MaxCut,
    ];

    /// Returns the label used to print the solutions.
    pub fn label(&self) -> &'static str {
        match self {
            GraphProblem::MinVertexCover => "MVC",
            GraphProblem::MaxClique => "MCLIQUE",
            GraphProblem::MaxCut => "MCUT",
        }
    }

    /// Returns the name used to select the problem from the command line.
    pub fn cli_name(&self) -> &'static str {
        match self {
            GraphProblem::MinVertexCover => "mvc",
            GraphProblem::MaxClique => "clique",
            GraphProblem::MaxCut => "cut",
        }
    }
}

impl Display for GraphProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for GraphProblem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GraphProblem::ALL
            .into_iter()
            .find(|p| p.cli_name() == s)
            .ok_or_else(|| anyhow!(r#"unknown problem "{}""#, s))
    }
}

/// A solution of a graph problem, decoded from the output of a MaxSAT solver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    problem: GraphProblem,
    solver_cost: usize,
    objective: usize,
    nodes: Vec<Node>,
}

impl Solution {
    /// Builds a new solution; the nodes are sorted.
    pub fn new(
        problem: GraphProblem,
        solver_cost: usize,
        objective: usize,
        mut nodes: Vec<Node>,
    ) -> Self {
        nodes.sort_unstable();
        Self {
            problem,
            solver_cost,
            objective,
            nodes,
        }
    }

    /// Returns the problem this solution is related to.
    pub fn problem(&self) -> GraphProblem {
        self.problem
    }

    /// Returns the optimal cost given by the MaxSAT solver.
    pub fn solver_cost(&self) -> usize {
        self.solver_cost
    }

    /// Returns the value of the solution for the graph problem:
    /// the size of the cover or of the clique, or the number of edges in the cut.
    pub fn objective(&self) -> usize {
        self.objective
    }

    /// Returns the nodes of the solution, in ascending order.
    ///
    /// For the cut problem, these are the nodes of one of the two sides.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.nodes.is_empty() {
            write!(f, "{}", self.problem.label())
        } else {
            write!(f, "{} {}", self.problem.label(), self.nodes.iter().join(" "))
        }
    }
}
