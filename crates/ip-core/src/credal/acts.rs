//! Acts (random variables) supplied per evaluation.

use ip_common::{Error, Result};
use ip_math::Matrix;

/// An ordered set of N acts, each a payoff per outcome.
///
/// Stored as an `N × K` matrix, acts as rows. Every payoff is finite and all
/// acts share one length. An empty set is allowed and evaluates to empty
/// results.
#[derive(Debug, Clone, PartialEq)]
pub struct ActSet {
    matrix: Matrix,
}

impl ActSet {
    pub fn new<A: AsRef<[f64]>>(acts: &[A]) -> Result<Self> {
        let outcomes = acts.first().map(|a| a.as_ref().len()).unwrap_or(0);

        for (i, act) in acts.iter().enumerate() {
            let act = act.as_ref();
            if act.len() != outcomes {
                return Err(Error::dimension_mismatch(
                    format!("payoffs of act {}", i),
                    outcomes,
                    act.len(),
                ));
            }
            if let Some(k) = act.iter().position(|v| !v.is_finite()) {
                return Err(Error::invalid_parameter(
                    format!("acts[{}][{}]", i, k),
                    act[k],
                    "payoffs must be finite",
                ));
            }
        }

        let matrix = Matrix::from_rows(acts)
            .ok_or_else(|| Error::dimension_mismatch("act set", outcomes, 0))?;
        Ok(Self { matrix })
    }

    /// A set holding a single act.
    pub fn single(act: &[f64]) -> Result<Self> {
        Self::new(&[act])
    }

    /// Number N of acts.
    pub fn len(&self) -> usize {
        self.matrix.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.rows() == 0
    }

    /// Payoffs per act (0 for an empty set).
    pub fn outcomes(&self) -> usize {
        self.matrix.cols()
    }

    /// Payoffs of act `i`, or None when out of range.
    pub fn act(&self, i: usize) -> Option<&[f64]> {
        (i < self.len()).then(|| self.matrix.row(i))
    }

    /// The `N × K` payoff matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }
}
