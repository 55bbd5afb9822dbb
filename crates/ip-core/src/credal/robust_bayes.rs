//! Robust-Bayes (E-admissibility) over the pmfs of the credal set.

use super::check_tolerance;
use super::expectation::ExpectationMatrix;
use ip_common::Result;
use serde::Serialize;
use tracing::debug;

/// Per-act robust-Bayes verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RobustBayes {
    /// `admissible[i]` is true iff act `i` maximizes expectation (within
    /// tolerance) under at least one pmf.
    pub admissible: Vec<bool>,
    /// For each act, the pmf indices under which it is a maximizer.
    pub witnesses: Vec<Vec<usize>>,
}

impl RobustBayes {
    pub fn len(&self) -> usize {
        self.admissible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.admissible.is_empty()
    }

    /// Indices of admissible acts.
    pub fn admissible_indices(&self) -> Vec<usize> {
        self.admissible
            .iter()
            .enumerate()
            .filter_map(|(i, &ok)| ok.then_some(i))
            .collect()
    }
}

impl ExpectationMatrix {
    /// `acts × pmfs` booleans: entry `(i, j)` is true iff
    /// `e[i][j] >= max_k e[k][j] - tolerance`.
    pub fn column_maximizers(&self, tolerance: f64) -> Result<Vec<Vec<bool>>> {
        check_tolerance("robust_bayes_tolerance", tolerance)?;
        let best: Vec<f64> = (0..self.pmfs())
            .map(|j| ip_math::max_value(&self.column(j)))
            .collect();
        Ok(self
            .iter_rows()
            .map(|row| {
                row.iter()
                    .zip(&best)
                    .map(|(&v, &b)| ip_math::at_least_within(v, b, tolerance))
                    .collect()
            })
            .collect())
    }

    /// Robust-Bayes acts with their witnessing pmfs.
    pub fn robust_bayes(&self, tolerance: f64) -> Result<RobustBayes> {
        let maximizers = self.column_maximizers(tolerance)?;
        let witnesses: Vec<Vec<usize>> = maximizers
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter_map(|(j, &hit)| hit.then_some(j))
                    .collect()
            })
            .collect();
        let admissible: Vec<bool> = witnesses.iter().map(|w| !w.is_empty()).collect();

        debug!(
            acts = self.acts(),
            pmfs = self.pmfs(),
            admissible = admissible.iter().filter(|&&a| a).count(),
            "robust-bayes check complete"
        );

        Ok(RobustBayes {
            admissible,
            witnesses,
        })
    }
}
