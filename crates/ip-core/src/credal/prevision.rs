//! Row reductions: one scalar per act from its expectations.
//!
//! The lower prevision is the worst-case expectation over the credal set,
//! the upper prevision the best case, and the Hurwicz prevision blends the
//! two with an optimism coefficient α:
//!
//! ```text
//! lower(e)      = min_j e_j
//! upper(e)      = max_j e_j
//! hurwicz(e; α) = α · upper(e) + (1 − α) · lower(e)
//! ```
//!
//! `lower ≤ hurwicz ≤ upper` holds for every row and every α ∈ [0, 1],
//! including under floating-point rounding.

use super::expectation::ExpectationMatrix;
use ip_common::{Error, Result};
use serde::{Deserialize, Serialize};

/// Reduces one row of expectations (one act across all pmfs) to a scalar.
///
/// Implemented for [`Prevision`] and for any `Fn(&[f64]) -> f64`, so a
/// caller-supplied aggregation goes through the same contract.
pub trait RowReducer {
    fn reduce(&self, row: &[f64]) -> f64;

    /// Check parameters before any row is reduced.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl<F> RowReducer for F
where
    F: Fn(&[f64]) -> f64,
{
    fn reduce(&self, row: &[f64]) -> f64 {
        self(row)
    }
}

/// Named prevision rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Prevision {
    /// Minimum expectation (Gamma-maximin when maximized).
    Lower,
    /// Maximum expectation (Gamma-maximax when maximized).
    Upper,
    /// Optimism-weighted blend of upper and lower.
    Hurwicz { optimism: f64 },
}

impl Prevision {
    /// Hurwicz rule with a checked optimism coefficient.
    pub fn hurwicz(optimism: f64) -> Result<Self> {
        let rule = Prevision::Hurwicz { optimism };
        rule.validate()?;
        Ok(rule)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Prevision::Lower => "lower",
            Prevision::Upper => "upper",
            Prevision::Hurwicz { .. } => "hurwicz",
        }
    }
}

impl std::fmt::Display for Prevision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Prevision::Hurwicz { optimism } => write!(f, "hurwicz(α={})", optimism),
            other => write!(f, "{}", other.name()),
        }
    }
}

impl RowReducer for Prevision {
    fn reduce(&self, row: &[f64]) -> f64 {
        match *self {
            Prevision::Lower => lower(row),
            Prevision::Upper => upper(row),
            Prevision::Hurwicz { optimism } => hurwicz(row, optimism),
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            Prevision::Hurwicz { optimism } if !(0.0..=1.0).contains(&optimism) => {
                Err(Error::invalid_parameter(
                    "optimism",
                    optimism,
                    "Hurwicz optimism must lie in [0, 1]",
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Lower prevision of one row.
pub fn lower(row: &[f64]) -> f64 {
    ip_math::min_value(row)
}

/// Upper prevision of one row.
pub fn upper(row: &[f64]) -> f64 {
    ip_math::max_value(row)
}

/// Hurwicz prevision of one row. `optimism` is not range-checked here; use
/// [`Prevision::hurwicz`] for a validated rule.
pub fn hurwicz(row: &[f64], optimism: f64) -> f64 {
    let (lo, hi) = ip_math::min_max(row);
    ip_math::interpolate(lo, hi, optimism)
}

impl ExpectationMatrix {
    /// Apply `rule` to every act's row of expectations.
    pub fn previsions<R: RowReducer + ?Sized>(&self, rule: &R) -> Result<Vec<f64>> {
        rule.validate()?;
        Ok(self.matrix().map_rows(|row| rule.reduce(row)))
    }

    /// Apply a caller-supplied reduction to every row.
    pub fn previsions_with<F: Fn(&[f64]) -> f64>(&self, f: F) -> Vec<f64> {
        self.matrix().map_rows(f)
    }

    pub fn lower_previsions(&self) -> Vec<f64> {
        self.matrix().map_rows(lower)
    }

    pub fn upper_previsions(&self) -> Vec<f64> {
        self.matrix().map_rows(upper)
    }

    /// Hurwicz previsions; fails if `optimism` is outside [0, 1].
    pub fn hurwicz_previsions(&self, optimism: f64) -> Result<Vec<f64>> {
        self.previsions(&Prevision::hurwicz(optimism)?)
    }
}
