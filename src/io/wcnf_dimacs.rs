use crate::WCNFFormula;
use anyhow::{Context, Result};
use std::io::Write;

/// A structure used to write a DIMACS formatted WCNF formula, using the format with a preamble
/// (`p wcnf <n_vars> <n_clauses> <top>`) where hard clauses are written with the TOP weight.
#[derive(Default)]
pub struct WCNFDimacsWriter;

impl WCNFDimacsWriter {
    /// Writes the formula, its clauses in their insertion order.
    pub fn write(&self, writer: &mut dyn Write, formula: &WCNFFormula) -> Result<()> {
        let context = "while writing a WCNF formula";
        let top = formula.top_weight();
        writeln!(
            writer,
            "p wcnf {} {} {}",
            formula.n_vars(),
            formula.n_clauses(),
            top
        )
        .context(context)?;
        formula
            .iter_clauses()
            .try_for_each(|wcl| {
                write!(writer, "{} ", wcl.weight().soft_value().unwrap_or(top))?;
                wcl.thing()
                    .iter()
                    .try_for_each(|l| write!(writer, "{} ", l))?;
                writeln!(writer, "0")
            })
            .context(context)?;
        Ok(())
    }
}
