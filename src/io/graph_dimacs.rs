use crate::{Graph, GraphWarning, Node, WithWarnings};
use anyhow::{anyhow, Context, Result};
use std::io::{BufRead, BufReader, Read};
use tracing::debug;

/// A structure used to read a graph given in the DIMACS-like edge format.
///
/// The preamble `p edge <n_nodes> <n_edges>` must come before the edges.
/// Lines beginning with `c` are comments; any other non-empty line `<tag> <u> <v>` is an edge.
///
/// Duplicated edges are merged.
/// If the number of distinct edges differs from the one given in the preamble,
/// the graph is still returned, with a warning.
#[derive(Default)]
pub struct GraphDimacsReader;

impl GraphDimacsReader {
    /// Reads a graph.
    pub fn read<R>(&self, reader: R) -> Result<WithWarnings<Graph>>
    where
        R: Read,
    {
        let mut r = BufReader::new(reader);
        let mut buffer = String::new();
        let mut graph: Option<Graph> = None;
        let mut declared_n_edges = 0;
        let mut line_index = 0;
        loop {
            buffer.clear();
            line_index += 1;
            let line_context = || format!("while parsing line at index {}", line_index);
            if r.read_line(&mut buffer).with_context(line_context)? == 0 {
                break;
            }
            let mut words = buffer.split_whitespace();
            match words.next() {
                None | Some("c") => continue,
                Some("p") => {
                    if graph.is_some() {
                        return Err(anyhow!("multiple preambles")).with_context(line_context);
                    }
                    let (n_nodes, n_edges) = read_preamble(words).with_context(line_context)?;
                    debug!("graph preamble: {} nodes, {} edges", n_nodes, n_edges);
                    graph = Some(Graph::new(n_nodes));
                    declared_n_edges = n_edges;
                }
                Some(_) => {
                    let g = graph
                        .as_mut()
                        .ok_or_else(|| anyhow!("edge definition before preamble"))
                        .with_context(line_context)?;
                    let (u, v) = read_edge(words, g.n_nodes()).with_context(line_context)?;
                    if !g.add_edge(u, v) {
                        debug!("ignoring duplicated edge {} {}", u, v);
                    }
                }
            }
        }
        let graph = graph.ok_or_else(|| anyhow!("missing preamble"))?;
        let mut warnings = Vec::new();
        if graph.n_edges() != declared_n_edges {
            warnings.push(GraphWarning::EdgeCountMismatch {
                declared: declared_n_edges,
                actual: graph.n_edges(),
            });
        }
        Ok(WithWarnings::new(graph, warnings))
    }
}

fn read_preamble<'a>(mut words: impl Iterator<Item = &'a str>) -> Result<(usize, usize)> {
    if words.next() != Some("edge") {
        return Err(anyhow!(r#"expected "p edge" preamble"#));
    }
    let n_nodes = read_usize(words.next(), "number of nodes")?;
    let n_edges = read_usize(words.next(), "number of edges")?;
    if words.next().is_some() {
        return Err(anyhow!("unexpected content after the preamble"));
    }
    Ok((n_nodes, n_edges))
}

fn read_edge<'a>(mut words: impl Iterator<Item = &'a str>, n_nodes: usize) -> Result<(Node, Node)> {
    let mut read_node = |what: &str| {
        let n = read_usize(words.next(), what)?;
        if n == 0 || n > n_nodes {
            Err(anyhow!(
                "node {} is out of range for a graph with {} nodes",
                n,
                n_nodes
            ))
        } else {
            Ok(n)
        }
    };
    let u = read_node("first node")?;
    let v = read_node("second node")?;
    Ok((u, v))
}

fn read_usize(word: Option<&str>, what: &str) -> Result<usize> {
    let w = word.ok_or_else(|| anyhow!("missing {}", what))?;
    str::parse::<usize>(w).with_context(|| format!(r#"invalid {} "{}""#, what, w))
}
