//! Decision criteria under imprecise probability.
//!
//! A credal set ([`PmfSet`]) is a finite set of probability mass functions
//! over a finite outcome space. Acts ([`ActSet`]) assign a payoff to every
//! outcome. Everything else is derived from the expectation matrix
//! (acts × pmfs):
//!
//! - previsions (lower, upper, Hurwicz, or any row reduction) and the
//!   Gamma-maxi sets they induce,
//! - pairwise dominance (Bayes, interval, or any pairwise predicate) and the
//!   maximal set,
//! - robust-Bayes (E-admissible) acts.
//!
//! All computations are pure and recompute from their inputs.
//!
//! ```rust
//! use ip_core::credal::{ActSet, PmfSet, DEFAULT_TOLERANCE};
//!
//! let pmfs = PmfSet::new(&[vec![0.4, 0.5, 0.1], vec![0.1, 0.8, 0.1]]).unwrap();
//! let acts = ActSet::new(&[vec![3.0, 9.0, 2.0], vec![4.0, 4.0, 4.0]]).unwrap();
//! let exp = pmfs.expectations(&acts).unwrap();
//! assert_eq!(exp.gamma_maximin(DEFAULT_TOLERANCE).unwrap(), vec![true, false]);
//! ```

pub mod acts;
pub mod dominance;
pub mod engine;
pub mod expectation;
pub mod optimal;
pub mod pmf_set;
pub mod prevision;
pub mod report;
pub mod robust_bayes;

pub use acts::ActSet;
pub use dominance::{bayes_dominates, interval_dominates, Dominance, DominanceRelation, PairwiseCompare};
pub use engine::DecisionEngine;
pub use expectation::ExpectationMatrix;
pub use optimal::optimal_set;
pub use pmf_set::{PmfSet, DEFAULT_NORMALIZATION_TOLERANCE};
pub use prevision::{hurwicz, lower, upper, Prevision, RowReducer};
pub use report::{Criterion, DecisionReport};
pub use robust_bayes::RobustBayes;

/// Default slack for optimality, dominance and robust-Bayes comparisons.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Reject tolerances that are negative, NaN or infinite.
pub(crate) fn check_tolerance(name: &str, tolerance: f64) -> ip_common::Result<()> {
    if ip_math::is_valid_tolerance(tolerance) {
        Ok(())
    } else {
        Err(ip_common::Error::invalid_parameter(
            name,
            tolerance,
            "must be finite and non-negative",
        ))
    }
}
