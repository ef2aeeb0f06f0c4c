use crate::Graph;
use anyhow::{Context, Result};
use std::io::Write;

/// A structure used to write a graph in the Graphviz DOT language.
#[derive(Default)]
pub struct GraphvizDotWriter;

impl GraphvizDotWriter {
    /// Writes the graph under the given name.
    pub fn write(&self, writer: &mut dyn Write, graph: &Graph, name: &str) -> Result<()> {
        let context = "while writing a Graphviz graph";
        writeln!(writer, "graph \"{}\" {{", name.replace('"', "\\\"")).context(context)?;
        graph
            .nodes()
            .try_for_each(|n| writeln!(writer, "    {};", n))
            .context(context)?;
        graph
            .iter_edges()
            .try_for_each(|(u, v)| writeln!(writer, "    {} -- {};", u, v))
            .context(context)?;
        writeln!(writer, "}}").context(context)?;
        Ok(())
    }
}
