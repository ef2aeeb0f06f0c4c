use super::{Weight, Weighted};
use crate::io::WCNFDimacsWriter;
use anyhow::Result;
use std::{io::Write, ops::Range};

/// A propositional variable, identified by a strictly positive index.
pub type Variable = usize;

/// A literal, in the DIMACS way: a positive value for a variable, a negative one for its negation.
pub type Literal = isize;

/// A disjunction of literals.
pub type Clause = Vec<Literal>;

/// A weighted partial MaxSAT formula.
///
/// Clauses are kept in their insertion order.
/// The TOP weight is not fixed: it is always the sum of the soft weights plus one,
/// so violating a single hard clause costs more than violating all the soft ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WCNFFormula {
    n_vars: usize,
    clauses: Vec<Weighted<Clause>>,
    soft_weight_sum: usize,
}

impl WCNFFormula {
    /// Allocates a fresh variable and returns it.
    pub fn new_var(&mut self) -> Variable {
        self.n_vars += 1;
        self.n_vars
    }

    /// Allocates `n` fresh consecutive variables and returns their range.
    pub fn new_vars(&mut self, n: usize) -> Range<Variable> {
        let first = self.n_vars + 1;
        self.n_vars += n;
        first..first + n
    }

    /// Returns the number of variables allocated for this formula.
    ///
    /// This number may be higher than the highest variable index involved in the clauses.
    pub fn n_vars(&self) -> usize {
        self.n_vars
    }

    /// Returns the number of clauses, hard and soft.
    pub fn n_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Returns the number of hard clauses.
    pub fn n_hard_clauses(&self) -> usize {
        self.clauses.iter().filter(|c| c.weight().is_hard()).count()
    }

    /// Returns the number of soft clauses.
    pub fn n_soft_clauses(&self) -> usize {
        self.n_clauses() - self.n_hard_clauses()
    }

    /// Returns the sum of the weights of the soft clauses.
    pub fn soft_weight_sum(&self) -> usize {
        self.soft_weight_sum
    }

    /// Returns the value used to write the weight of hard clauses.
    pub fn top_weight(&self) -> usize {
        self.soft_weight_sum + 1
    }

    /// Adds a clause to the formula.
    ///
    /// # Panics
    ///
    /// This function panics if the clause is empty, contains a null literal or a literal
    /// which variable has not been allocated, or if the weight is a soft weight equal to zero.
    pub fn add_clause(&mut self, clause: Clause, weight: Weight) {
        if clause.is_empty() {
            panic!("cannot add an empty clause");
        }
        if let Some(l) = clause
            .iter()
            .find(|l| **l == 0 || l.unsigned_abs() > self.n_vars)
        {
            panic!(
                "literal {} is out of range for a formula with {} variables (clause {:?})",
                l, self.n_vars, clause
            );
        }
        if let Weight::Soft(w) = weight {
            if w == 0 {
                panic!("soft clause {:?} has a null weight", clause);
            }
            self.soft_weight_sum += w;
        }
        self.clauses.push(Weighted::new(clause, weight));
    }

    /// Adds a hard clause to the formula.
    ///
    /// See [`add_clause`](Self::add_clause) for the panic conditions.
    pub fn add_hard_clause(&mut self, clause: Clause) {
        self.add_clause(clause, Weight::Hard)
    }

    /// Adds a soft clause to the formula.
    ///
    /// See [`add_clause`](Self::add_clause) for the panic conditions.
    pub fn add_soft_clause(&mut self, clause: Clause, weight: usize) {
        self.add_clause(clause, Weight::Soft(weight))
    }

    /// Iterates over the clauses in their insertion order.
    pub fn iter_clauses(&self) -> impl Iterator<Item = &Weighted<Clause>> + '_ {
        self.clauses.iter()
    }

    /// Writes the formula using the DIMACS WCNF format.
    pub fn to_dimacs(&self, writer: &mut dyn Write) -> Result<()> {
        WCNFDimacsWriter.write(writer, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufWriter;

    #[test]
    fn test_new_var() {
        let mut formula = WCNFFormula::default();
        assert_eq!(1, formula.new_var());
        assert_eq!(2, formula.new_var());
        assert_eq!(3..6, formula.new_vars(3));
        assert_eq!(5, formula.n_vars());
        assert_eq!(6..6, formula.new_vars(0));
    }

    #[test]
    fn test_top_weight() {
        let mut formula = WCNFFormula::default();
        assert_eq!(1, formula.top_weight());
        formula.new_vars(2);
        formula.add_soft_clause(vec![-1], 3);
        formula.add_hard_clause(vec![1, 2]);
        formula.add_soft_clause(vec![-2], 4);
        assert_eq!(7, formula.soft_weight_sum());
        assert_eq!(8, formula.top_weight());
        assert_eq!(3, formula.n_clauses());
        assert_eq!(1, formula.n_hard_clauses());
        assert_eq!(2, formula.n_soft_clauses());
    }

    #[test]
    fn test_insertion_order() {
        let mut formula = WCNFFormula::default();
        formula.new_vars(2);
        formula.add_soft_clause(vec![-2], 1);
        formula.add_hard_clause(vec![1, 2]);
        let clauses = formula
            .iter_clauses()
            .map(|c| (c.thing().clone(), c.weight()))
            .collect::<Vec<_>>();
        assert_eq!(
            vec![(vec![-2], Weight::Soft(1)), (vec![1, 2], Weight::Hard)],
            clauses
        );
    }

    #[test]
    fn test_to_dimacs() {
        let mut formula = WCNFFormula::default();
        formula.new_vars(2);
        formula.add_hard_clause(vec![1, 2]);
        formula.add_soft_clause(vec![-1], 1);
        let mut writer = BufWriter::new(Vec::new());
        formula.to_dimacs(&mut writer).unwrap();
        assert_eq!(
            "p wcnf 2 2 2\n2 1 2 0\n1 -1 0\n",
            String::from_utf8(writer.into_inner().unwrap()).unwrap()
        );
    }

    #[test]
    #[should_panic(expected = "literal 3 is out of range")]
    fn test_add_clause_unknown_variable() {
        let mut formula = WCNFFormula::default();
        formula.new_vars(2);
        formula.add_hard_clause(vec![1, 3]);
    }

    #[test]
    #[should_panic(expected = "literal 0 is out of range")]
    fn test_add_clause_null_literal() {
        let mut formula = WCNFFormula::default();
        formula.new_var();
        formula.add_hard_clause(vec![0]);
    }

    #[test]
    #[should_panic(expected = "empty clause")]
    fn test_add_empty_clause() {
        let mut formula = WCNFFormula::default();
        formula.add_hard_clause(vec![]);
    }

    #[test]
    #[should_panic(expected = "null weight")]
    fn test_add_clause_null_weight() {
        let mut formula = WCNFFormula::default();
        formula.new_var();
        formula.add_soft_clause(vec![1], 0);
    }
}
