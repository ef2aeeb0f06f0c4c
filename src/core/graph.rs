use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::fmt::Display;

/// A node of a graph, labeled from 1 to the number of nodes.
pub type Node = usize;

/// An undirected graph which nodes are labeled `1..=n_nodes`.
///
/// Edges are stored once each, in the order they were first added, with their endpoints sorted.
/// Self loops are accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    n_nodes: usize,
    edges: Vec<(Node, Node)>,
    edge_set: FxHashSet<(Node, Node)>,
}

impl Graph {
    /// Builds a graph with the given number of nodes and no edges.
    pub fn new(n_nodes: usize) -> Self {
        Self {
            n_nodes,
            ..Default::default()
        }
    }

    /// Returns the number of nodes.
    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Returns the number of (distinct) edges.
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over the node labels.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + Clone {
        1..=self.n_nodes
    }

    /// Adds an edge between two nodes.
    ///
    /// Returns `false` if the edge was already present (in any direction).
    ///
    /// # Panics
    ///
    /// This function panics if a node is not in `1..=n_nodes`.
    pub fn add_edge(&mut self, u: Node, v: Node) -> bool {
        if let Some(n) = [u, v].into_iter().find(|n| *n == 0 || *n > self.n_nodes) {
            panic!(
                "node {} is out of range for a graph with {} nodes (edge {} {})",
                n, self.n_nodes, u, v
            );
        }
        let edge = (usize::min(u, v), usize::max(u, v));
        if self.edge_set.insert(edge) {
            self.edges.push(edge);
            true
        } else {
            false
        }
    }

    /// Returns `true` iff the two nodes are linked by an edge.
    pub fn has_edge(&self, u: Node, v: Node) -> bool {
        self.edge_set
            .contains(&(usize::min(u, v), usize::max(u, v)))
    }

    /// Iterates over the edges, in the order they were first added.
    pub fn iter_edges(&self) -> impl Iterator<Item = (Node, Node)> + '_ {
        self.edges.iter().copied()
    }

    /// Builds the complement of this graph.
    ///
    /// Two distinct nodes are adjacent in the complement iff they are not in this graph.
    /// Self loops are not carried to the complement.
    pub fn complement(&self) -> Graph {
        let mut complement = Graph::new(self.n_nodes);
        self.nodes()
            .tuple_combinations()
            .filter(|(u, v)| !self.has_edge(*u, *v))
            .for_each(|(u, v)| {
                complement.add_edge(u, v);
            });
        complement
    }

    /// Returns `true` iff each edge has at least one endpoint in the given set.
    pub fn is_vertex_cover(&self, nodes: &[Node]) -> bool {
        let set = nodes.iter().copied().collect::<FxHashSet<_>>();
        self.iter_edges()
            .all(|(u, v)| set.contains(&u) || set.contains(&v))
    }

    /// Returns `true` iff the given nodes are pairwise adjacent.
    pub fn is_clique(&self, nodes: &[Node]) -> bool {
        nodes
            .iter()
            .tuple_combinations()
            .all(|(u, v)| u != v && self.has_edge(*u, *v))
    }

    /// Returns the number of edges with exactly one endpoint in the given set.
    pub fn cut_value(&self, side: &[Node]) -> usize {
        let set = side.iter().copied().collect::<FxHashSet<_>>();
        self.iter_edges()
            .filter(|(u, v)| set.contains(u) != set.contains(v))
            .count()
    }
}

/// A value coming with non-fatal diagnostics collected while it was built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithWarnings<T> {
    value: T,
    warnings: Vec<GraphWarning>,
}

impl<T> WithWarnings<T> {
    /// Builds a new value with its warnings.
    pub fn new(value: T, warnings: Vec<GraphWarning>) -> Self {
        Self { value, warnings }
    }

    /// Returns a reference to the value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the warnings.
    pub fn warnings(&self) -> &[GraphWarning] {
        &self.warnings
    }

    /// Consumes this object, returning the value and the warnings.
    pub fn into_parts(self) -> (T, Vec<GraphWarning>) {
        (self.value, self.warnings)
    }
}

/// A problem in an input graph that does not prevent its use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphWarning {
    /// The preamble declares a number of edges that differs from the number of distinct edges read.
    EdgeCountMismatch {
        /// the number of edges given in the preamble
        declared: usize,
        /// the number of distinct edges read
        actual: usize,
    },
}

impl Display for GraphWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphWarning::EdgeCountMismatch { declared, actual } => write!(
                f,
                "incorrect number of edges: the preamble declares {} edges, but {} distinct edges were read",
                declared, actual
            ),
        }
    }
}
