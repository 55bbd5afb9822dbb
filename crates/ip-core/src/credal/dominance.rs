//! Pairwise dominance between acts and the maximal set it induces.
//!
//! Entry `(i, k)` of a [`DominanceRelation`] is true iff act `i` dominates
//! act `k`. An act is maximal iff no other act dominates it. The relation
//! is irreflexive by construction; transitivity is not assumed, so the
//! maximal set comes from a full scan over all ordered pairs.

use super::check_tolerance;
use super::expectation::ExpectationMatrix;
use ip_common::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A predicate over two rows of expectations: does the first dominate the
/// second?
///
/// Implemented for [`Dominance`] and for any `Fn(&[f64], &[f64]) -> bool`.
pub trait PairwiseCompare {
    fn dominates(&self, lhs: &[f64], rhs: &[f64]) -> bool;

    /// Check parameters before any pair is compared.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl<F> PairwiseCompare for F
where
    F: Fn(&[f64], &[f64]) -> bool,
{
    fn dominates(&self, lhs: &[f64], rhs: &[f64]) -> bool {
        self(lhs, rhs)
    }
}

/// Built-in dominance predicates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "relation", rename_all = "snake_case")]
pub enum Dominance {
    /// Strictly better under every pmf, by more than `tolerance`.
    Bayes { tolerance: f64 },
    /// Worst case of one beats the best case of the other by more than
    /// `tolerance`.
    Interval { tolerance: f64 },
}

impl Dominance {
    pub fn bayes(tolerance: f64) -> Result<Self> {
        let rule = Dominance::Bayes { tolerance };
        rule.validate()?;
        Ok(rule)
    }

    pub fn interval(tolerance: f64) -> Result<Self> {
        let rule = Dominance::Interval { tolerance };
        rule.validate()?;
        Ok(rule)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dominance::Bayes { .. } => "bayes",
            Dominance::Interval { .. } => "interval",
        }
    }

    pub fn tolerance(&self) -> f64 {
        match *self {
            Dominance::Bayes { tolerance } | Dominance::Interval { tolerance } => tolerance,
        }
    }
}

impl PairwiseCompare for Dominance {
    fn dominates(&self, lhs: &[f64], rhs: &[f64]) -> bool {
        match *self {
            Dominance::Bayes { tolerance } => bayes_dominates(lhs, rhs, tolerance),
            Dominance::Interval { tolerance } => interval_dominates(lhs, rhs, tolerance),
        }
    }

    fn validate(&self) -> Result<()> {
        check_tolerance("dominance_tolerance", self.tolerance())
    }
}

/// `lhs[j] > rhs[j] + tolerance` for every `j`.
///
/// Rows of different length or empty rows never dominate.
pub fn bayes_dominates(lhs: &[f64], rhs: &[f64], tolerance: f64) -> bool {
    !lhs.is_empty()
        && lhs.len() == rhs.len()
        && lhs
            .iter()
            .zip(rhs)
            .all(|(&a, &b)| ip_math::strictly_exceeds(a, b, tolerance))
}

/// `min(lhs) > max(rhs) + tolerance`. Empty rows never dominate.
pub fn interval_dominates(lhs: &[f64], rhs: &[f64], tolerance: f64) -> bool {
    if lhs.is_empty() || rhs.is_empty() {
        return false;
    }
    ip_math::strictly_exceeds(ip_math::min_value(lhs), ip_math::max_value(rhs), tolerance)
}

/// `N × N` dominance relation between acts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DominanceRelation {
    size: usize,
    relation: Vec<bool>,
}

impl DominanceRelation {
    /// Evaluate `predicate` over every ordered pair of rows. The diagonal is
    /// false regardless of what the predicate says about `(i, i)`.
    pub fn build<P: PairwiseCompare + ?Sized>(rows: &[&[f64]], predicate: &P) -> Self {
        let size = rows.len();
        let mut relation = vec![false; size * size];
        for (i, lhs) in rows.iter().enumerate() {
            for (k, rhs) in rows.iter().enumerate() {
                if i != k {
                    relation[i * size + k] = predicate.dominates(lhs, rhs);
                }
            }
        }
        Self { size, relation }
    }

    /// Number of acts.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Does act `i` dominate act `k`? False when either is out of range.
    pub fn dominates(&self, i: usize, k: usize) -> bool {
        i < self.size && k < self.size && self.relation[i * self.size + k]
    }

    /// Acts that dominate act `i`.
    pub fn dominators(&self, i: usize) -> Vec<usize> {
        (0..self.size).filter(|&k| self.dominates(k, i)).collect()
    }

    /// Acts that act `i` dominates.
    pub fn dominated_by(&self, i: usize) -> Vec<usize> {
        (0..self.size).filter(|&k| self.dominates(i, k)).collect()
    }

    /// Entry `i` is true iff no act dominates act `i`.
    pub fn maximal(&self) -> Vec<bool> {
        (0..self.size)
            .map(|i| (0..self.size).all(|k| !self.relation[k * self.size + i]))
            .collect()
    }

    /// Number of ordered pairs in the relation.
    pub fn pair_count(&self) -> usize {
        self.relation.iter().filter(|&&d| d).count()
    }

    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        if self.size == 0 {
            return Vec::new();
        }
        self.relation.chunks(self.size).map(<[bool]>::to_vec).collect()
    }
}

impl ExpectationMatrix {
    /// Dominance relation under `predicate`.
    pub fn dominance<P: PairwiseCompare + ?Sized>(&self, predicate: &P) -> Result<DominanceRelation> {
        predicate.validate()?;
        let rows: Vec<&[f64]> = self.iter_rows().collect();
        let relation = DominanceRelation::build(&rows, predicate);
        debug!(
            acts = relation.len(),
            pairs = relation.pair_count(),
            "dominance relation computed"
        );
        Ok(relation)
    }

    /// Dominance relation under a caller-supplied predicate.
    pub fn dominance_with<F: Fn(&[f64], &[f64]) -> bool>(&self, predicate: F) -> DominanceRelation {
        let rows: Vec<&[f64]> = self.iter_rows().collect();
        DominanceRelation::build(&rows, &predicate)
    }

    /// Maximal set under `predicate`.
    pub fn maximal<P: PairwiseCompare + ?Sized>(&self, predicate: &P) -> Result<Vec<bool>> {
        Ok(self.dominance(predicate)?.maximal())
    }

    pub fn bayes_maximal(&self, tolerance: f64) -> Result<Vec<bool>> {
        self.maximal(&Dominance::bayes(tolerance)?)
    }

    pub fn interval_maximal(&self, tolerance: f64) -> Result<Vec<bool>> {
        self.maximal(&Dominance::interval(tolerance)?)
    }
}
