use std::fmt::Display;

/// The weight of a clause in a weighted partial MaxSAT formula.
///
/// Hard clauses must be satisfied by any solution.
/// Falsifying a soft clause costs its weight, which is always strictly positive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Weight {
    /// The weight of hard clauses, written as the TOP value of the formula.
    Hard,
    /// A finite, strictly positive weight.
    Soft(usize),
}

impl Weight {
    /// Returns `true` iff this is the weight of a hard clause.
    pub fn is_hard(&self) -> bool {
        matches!(self, Weight::Hard)
    }

    /// Returns the finite weight, or `None` for hard clauses.
    pub fn soft_value(&self) -> Option<usize> {
        match self {
            Weight::Hard => None,
            Weight::Soft(w) => Some(*w),
        }
    }
}

impl Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Weight::Hard => write!(f, "top"),
            Weight::Soft(w) => write!(f, "{}", w),
        }
    }
}

/// A thing with a weight.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Weighted<T> {
    weight: Weight,
    thing: T,
}

impl<T> Weighted<T> {
    /// Builds a new weighted thing.
    pub fn new(thing: T, weight: Weight) -> Self {
        Self { weight, thing }
    }

    /// Returns a reference to the thing.
    pub fn thing(&self) -> &T {
        &self.thing
    }

    /// Returns the weight of the thing.
    pub fn weight(&self) -> Weight {
        self.weight
    }
}
