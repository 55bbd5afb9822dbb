//! improb core library
//!
//! Decision criteria over a credal set (a finite set of probability mass
//! functions):
//! - Credal-set validation and expectation matrices
//! - Lower, upper and Hurwicz previsions with their Gamma-maxi sets
//! - Bayes and interval dominance with maximal sets
//! - Robust-Bayes (E-admissible) acts
//! - Problem files, settings loading, logging and exit codes for the CLI
//!
//! The binary entry point is in `main.rs`.

pub mod config;
pub mod credal;
pub mod exit_codes;
pub mod logging;
pub mod problem;

pub use credal::{ActSet, DecisionEngine, DecisionReport, ExpectationMatrix, PmfSet};
pub use problem::Problem;
