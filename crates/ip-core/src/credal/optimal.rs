//! Threshold selection over a prevision vector (Gamma-maxi criteria).

use super::check_tolerance;
use super::expectation::ExpectationMatrix;
use super::prevision::{Prevision, RowReducer};
use ip_common::{Error, Result};

/// Mark every value within `tolerance` of the maximum.
///
/// Entry `i` is true iff `values[i] >= max(values) - tolerance`. An empty
/// input yields an empty output; a non-empty input always has at least one
/// true entry.
pub fn optimal_set(values: &[f64], tolerance: f64) -> Result<Vec<bool>> {
    check_tolerance("optimality_tolerance", tolerance)?;
    if let Some(i) = values.iter().position(|v| v.is_nan()) {
        return Err(Error::invalid_parameter(
            format!("previsions[{}]", i),
            f64::NAN,
            "previsions must not be NaN",
        ));
    }

    let best = ip_math::max_value(values);
    Ok(values
        .iter()
        .map(|&v| ip_math::at_least_within(v, best, tolerance))
        .collect())
}

impl ExpectationMatrix {
    /// Optimal set under `rule`: reduce every row, then keep the acts within
    /// `tolerance` of the best.
    pub fn gamma_maxi<R: RowReducer + ?Sized>(&self, rule: &R, tolerance: f64) -> Result<Vec<bool>> {
        let values = self.previsions(rule)?;
        optimal_set(&values, tolerance)
    }

    /// Acts whose worst-case expectation is (near) best.
    pub fn gamma_maximin(&self, tolerance: f64) -> Result<Vec<bool>> {
        self.gamma_maxi(&Prevision::Lower, tolerance)
    }

    /// Acts whose best-case expectation is (near) best.
    pub fn gamma_maximax(&self, tolerance: f64) -> Result<Vec<bool>> {
        self.gamma_maxi(&Prevision::Upper, tolerance)
    }

    pub fn gamma_maxi_hurwicz(&self, optimism: f64, tolerance: f64) -> Result<Vec<bool>> {
        self.gamma_maxi(&Prevision::hurwicz(optimism)?, tolerance)
    }
}
