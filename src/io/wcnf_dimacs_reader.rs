use crate::{Clause, Literal, WCNFFormula, Weight};
use anyhow::{anyhow, Context, Result};
use std::io::{BufRead, BufReader, Read};

/// A structure used to read a DIMACS formatted WCNF formula with a preamble.
///
/// The preamble must be exact in terms of number of variables and clauses.
/// Clauses which weight is equal to the TOP value are hard clauses.
/// Since the TOP value of [`WCNFFormula`] is computed from its soft clauses,
/// the TOP value of the input must be higher than the sum of the soft weights.
#[derive(Default)]
pub(crate) struct WCNFDimacsReader;

impl WCNFDimacsReader {
    /// Reads a formula.
    pub(crate) fn read<R>(&self, reader: R) -> Result<WCNFFormula>
    where
        R: Read,
    {
        let mut r = BufReader::new(reader);
        let mut buffer = String::new();
        let mut preamble: Option<(usize, usize, usize)> = None;
        let mut clauses: Vec<(Clause, Weight)> = Vec::new();
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
                    if preamble.is_some() {
                        return Err(anyhow!("multiple preambles")).with_context(line_context);
                    }
                    preamble = Some(read_preamble(&mut words).with_context(line_context)?);
                }
                Some(w) => {
                    let (n_vars, _, top) =
                        preamble.ok_or_else(|| anyhow!("clause before preamble"))?;
                    let weight = read_usize(w).with_context(line_context)?;
                    let clause = read_clause(words, n_vars).with_context(line_context)?;
                    let weight = if weight == top {
                        Weight::Hard
                    } else if weight > 0 && weight < top {
                        Weight::Soft(weight)
                    } else {
                        return Err(anyhow!("invalid clause weight {}", weight))
                            .with_context(line_context);
                    };
                    clauses.push((clause, weight));
                }
            }
        }
        let (n_vars, n_clauses, top) = preamble.ok_or_else(|| anyhow!("missing preamble"))?;
        if clauses.len() != n_clauses {
            return Err(anyhow!(
                "the preamble declares {} clauses, but {} were read",
                n_clauses,
                clauses.len()
            ));
        }
        let mut formula = WCNFFormula::default();
        formula.new_vars(n_vars);
        clauses
            .into_iter()
            .for_each(|(cl, w)| formula.add_clause(cl, w));
        if formula.top_weight() > top {
            return Err(anyhow!(
                "the TOP value {} is not higher than the sum of the soft weights ({})",
                top,
                formula.soft_weight_sum()
            ));
        }
        Ok(formula)
    }
}

fn read_preamble<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<(usize, usize, usize)> {
    if words.next() != Some("wcnf") {
        return Err(anyhow!(r#"expected "p wcnf" preamble"#));
    }
    let mut next_usize = |what: &str| {
        words
            .next()
            .ok_or_else(|| anyhow!("missing {} in preamble", what))
            .and_then(read_usize)
    };
    let n_vars = next_usize("number of variables")?;
    let n_clauses = next_usize("number of clauses")?;
    let top = next_usize("top weight")?;
    if words.next().is_some() {
        return Err(anyhow!("unexpected content after the preamble"));
    }
    Ok((n_vars, n_clauses, top))
}

fn read_clause<'a>(words: impl Iterator<Item = &'a str>, n_vars: usize) -> Result<Clause> {
    let mut clause = Vec::new();
    let mut terminated = false;
    for w in words {
        if terminated {
            return Err(anyhow!("unexpected content after the end of the clause"));
        }
        let l = str::parse::<Literal>(w).with_context(|| format!(r#"invalid literal "{}""#, w))?;
        if l == 0 {
            terminated = true;
        } else if l.unsigned_abs() > n_vars {
            return Err(anyhow!("literal {} refers to an undeclared variable", l));
        } else {
            clause.push(l);
        }
    }
    if !terminated {
        return Err(anyhow!("missing clause terminator"));
    }
    if clause.is_empty() {
        return Err(anyhow!("empty clause"));
    }
    Ok(clause)
}

fn read_usize(w: &str) -> Result<usize> {
    str::parse::<usize>(w).with_context(|| format!(r#"expected a positive integer, got "{}""#, w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_unused_vars() {
        let formula = WCNFDimacsReader
            .read("c comment\np wcnf 5 1 2\n\n2 1 0\n".as_bytes())
            .unwrap();
        assert_eq!(5, formula.n_vars());
        assert_eq!(1, formula.n_hard_clauses());
    }

    #[test]
    fn test_read_wrong_clause_count() {
        assert!(WCNFDimacsReader
            .read("p wcnf 2 2 2\n2 1 2 0\n".as_bytes())
            .is_err());
        assert!(WCNFDimacsReader
            .read("p wcnf 2 1 2\n2 1 2 0\n1 -1 0\n".as_bytes())
            .is_err());
    }

    #[test]
    fn test_read_unknown_variable() {
        assert!(WCNFDimacsReader
            .read("p wcnf 1 1 2\n2 1 2 0\n".as_bytes())
            .is_err());
    }

    #[test]
    fn test_read_missing_terminator() {
        assert!(WCNFDimacsReader
            .read("p wcnf 2 1 2\n2 1 2\n".as_bytes())
            .is_err());
    }

    #[test]
    fn test_read_not_a_literal() {
        assert!(WCNFDimacsReader
            .read("p wcnf 2 1 2\n2 a 2 0\n".as_bytes())
            .is_err());
    }

    #[test]
    fn test_read_clause_before_preamble() {
        assert!(WCNFDimacsReader.read("2 1 2 0\n".as_bytes()).is_err());
    }

    #[test]
    fn test_read_weight_above_top() {
        assert!(WCNFDimacsReader
            .read("p wcnf 2 1 2\n3 1 2 0\n".as_bytes())
            .is_err());
    }

    #[test]
    fn test_read_top_not_dominant() {
        assert!(WCNFDimacsReader
            .read("p wcnf 2 3 3\n3 1 2 0\n2 -1 0\n2 -2 0\n".as_bytes())
            .is_err());
    }

    #[test]
    fn test_read_cnf_preamble() {
        assert!(WCNFDimacsReader.read("p cnf 2 1\n1 2 0\n".as_bytes()).is_err());
    }
}
