use super::{Literal, MaxSatSolver, SolverError, WCNFFormula};
use anyhow::{anyhow, Result};
use std::cell::Cell;

/// A MaxSAT solver for tests, enumerating all the assignments of small formulas.
///
/// Among the optimal assignments, the one with the lowest binary representation is returned
/// (variable 1 being the least significant bit).
#[derive(Default)]
pub(crate) struct BruteForceMaxSatSolver {
    n_calls: Cell<usize>,
}

impl BruteForceMaxSatSolver {
    pub(crate) fn n_calls(&self) -> usize {
        self.n_calls.get()
    }
}

impl MaxSatSolver for BruteForceMaxSatSolver {
    fn solve(&self, formula: &WCNFFormula) -> Result<(usize, Vec<Literal>)> {
        self.n_calls.set(self.n_calls.get() + 1);
        let n_vars = formula.n_vars();
        assert!(n_vars < 20, "too many variables for a brute force search");
        let value = |mask: u32, l: Literal| {
            let bit = mask & (1 << (l.unsigned_abs() - 1)) != 0;
            bit == (l > 0)
        };
        let mut best: Option<(usize, u32)> = None;
        for mask in 0..(1u32 << n_vars) {
            let mut cost = 0;
            let mut feasible = true;
            for clause in formula.iter_clauses() {
                if clause.thing().iter().any(|l| value(mask, *l)) {
                    continue;
                }
                match clause.weight().soft_value() {
                    Some(w) => cost += w,
                    None => {
                        feasible = false;
                        break;
                    }
                }
            }
            if feasible && best.map(|(c, _)| cost < c).unwrap_or(true) {
                best = Some((cost, mask));
            }
        }
        let (cost, mask) = best.ok_or_else(|| {
            anyhow!(SolverError::Status {
                status: "UNSATISFIABLE".to_string(),
                output: String::new(),
            })
        })?;
        let model = (1..=n_vars as Literal)
            .map(|v| if value(mask, v) { v } else { -v })
            .collect();
        Ok((cost, model))
    }
}
