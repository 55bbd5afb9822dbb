//! Validated credal set.

use super::check_tolerance;
use ip_common::{DistributionCheck, Error, Result};
use ip_math::Matrix;
use tracing::debug;

/// Default absolute slack on `|Σ pmf − 1|`.
pub const DEFAULT_NORMALIZATION_TOLERANCE: f64 = 1e-7;

/// A finite, non-empty set of probability mass functions over the same
/// outcome space.
///
/// Stored as a `K × M` matrix: outcomes as rows, pmfs as columns. Once built
/// the set is immutable; every pmf is finite, non-negative and sums to one
/// within the tolerance it was built with.
#[derive(Debug, Clone, PartialEq)]
pub struct PmfSet {
    matrix: Matrix,
    tolerance: f64,
}

impl PmfSet {
    /// Validate `pmfs` with the default normalization tolerance.
    pub fn new<P: AsRef<[f64]>>(pmfs: &[P]) -> Result<Self> {
        Self::with_tolerance(pmfs, DEFAULT_NORMALIZATION_TOLERANCE)
    }

    /// Validate `pmfs`, accepting sums within `tolerance` of one.
    ///
    /// Checks run pmf by pmf, in order: length, finiteness,
    /// non-negativity, normalization. The first failure is returned.
    pub fn with_tolerance<P: AsRef<[f64]>>(pmfs: &[P], tolerance: f64) -> Result<Self> {
        check_tolerance("normalization_tolerance", tolerance)?;

        let first = pmfs.first().ok_or(Error::EmptyCredalSet)?;
        let outcomes = first.as_ref().len();
        if outcomes == 0 {
            return Err(Error::dimension_mismatch("outcomes of pmf 0", 1, 0));
        }

        for (index, pmf) in pmfs.iter().enumerate() {
            validate_pmf(index, pmf.as_ref(), outcomes, tolerance)?;
        }

        let matrix = Matrix::from_columns(pmfs)
            .ok_or_else(|| Error::dimension_mismatch("credal set", outcomes, 0))?;

        debug!(
            pmfs = matrix.cols(),
            outcomes = matrix.rows(),
            tolerance,
            "credal set validated"
        );

        Ok(Self { matrix, tolerance })
    }

    /// Size K of the outcome space.
    pub fn outcomes(&self) -> usize {
        self.matrix.rows()
    }

    /// Number M of pmfs.
    pub fn len(&self) -> usize {
        self.matrix.cols()
    }

    /// Always false for a validated set; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.matrix.cols() == 0
    }

    /// Normalization tolerance the set was validated with.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The `K × M` matrix (outcomes × pmfs).
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Copy of pmf `j`, or None when out of range.
    pub fn pmf(&self, j: usize) -> Option<Vec<f64>> {
        (j < self.len()).then(|| self.matrix.column(j))
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        self.matrix.iter_columns()
    }

    /// All pmfs as nested vectors, in credal-set order.
    pub fn to_vecs(&self) -> Vec<Vec<f64>> {
        self.iter().collect()
    }
}

fn validate_pmf(index: usize, pmf: &[f64], outcomes: usize, tolerance: f64) -> Result<()> {
    if pmf.len() != outcomes {
        return Err(Error::dimension_mismatch(
            format!("outcomes of pmf {}", index),
            outcomes,
            pmf.len(),
        ));
    }

    if let Some(outcome) = pmf.iter().position(|p| !p.is_finite()) {
        return Err(Error::MalformedDistribution {
            pmf: index,
            check: DistributionCheck::NonFinite { outcome },
        });
    }

    if let Some(outcome) = pmf.iter().position(|&p| p < 0.0) {
        return Err(Error::MalformedDistribution {
            pmf: index,
            check: DistributionCheck::Negative {
                outcome,
                value: pmf[outcome],
            },
        });
    }

    let sum = ip_math::sum(pmf);
    if (sum - 1.0).abs() > tolerance {
        return Err(Error::MalformedDistribution {
            pmf: index,
            check: DistributionCheck::Normalization { sum, tolerance },
        });
    }

    Ok(())
}
