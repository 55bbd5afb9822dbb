//! Expectation matrix: every act against every pmf.

use super::acts::ActSet;
use super::pmf_set::PmfSet;
use ip_common::{Error, Result};
use ip_math::Matrix;
use serde::Serialize;
use tracing::debug;

/// `N × M` matrix of expectations; entry `(i, j)` is the inner product of
/// act `i` with pmf `j`.
///
/// Derived from a [`PmfSet`] and an [`ActSet`]; never mutated. All decision
/// criteria in this module read from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpectationMatrix {
    matrix: Matrix,
}

impl ExpectationMatrix {
    /// Wrap a precomputed `acts × pmfs` matrix.
    ///
    /// Fails if there are acts but no pmf columns.
    pub fn from_matrix(matrix: Matrix) -> Result<Self> {
        if matrix.rows() > 0 && matrix.cols() == 0 {
            return Err(Error::EmptyCredalSet);
        }
        if let Some(pos) = matrix.as_slice().iter().position(|v| v.is_nan()) {
            let cols = matrix.cols().max(1);
            return Err(Error::invalid_parameter(
                format!("expectations[{}][{}]", pos / cols, pos % cols),
                f64::NAN,
                "expectations must not be NaN",
            ));
        }
        Ok(Self { matrix })
    }

    /// Build from nested rows (one row per act).
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let expected = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let matrix = Matrix::from_rows(rows).ok_or_else(|| {
            let actual = rows
                .iter()
                .map(|r| r.as_ref().len())
                .find(|&len| len != expected)
                .unwrap_or(0);
            Error::dimension_mismatch("expectation rows", expected, actual)
        })?;
        Self::from_matrix(matrix)
    }

    /// Number N of acts.
    pub fn acts(&self) -> usize {
        self.matrix.rows()
    }

    /// Number M of pmfs.
    pub fn pmfs(&self) -> usize {
        self.matrix.cols()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.rows() == 0
    }

    pub fn get(&self, act: usize, pmf: usize) -> Option<f64> {
        self.matrix.get(act, pmf)
    }

    /// Expectations of act `i` under every pmf.
    ///
    /// # Panics
    /// Panics if `i` is out of range.
    pub fn row(&self, i: usize) -> &[f64] {
        self.matrix.row(i)
    }

    /// Expectations of every act under pmf `j`.
    ///
    /// # Panics
    /// Panics if `j` is out of range.
    pub fn column(&self, j: usize) -> Vec<f64> {
        self.matrix.column(j)
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.matrix.iter_rows()
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.matrix.to_rows()
    }
}

impl PmfSet {
    /// Expectation matrix `acts · pmfs` for every act and every pmf.
    ///
    /// Fails with `DimensionMismatch` when the acts do not have one payoff
    /// per outcome. An empty act set yields a `0 × M` matrix.
    pub fn expectations(&self, acts: &ActSet) -> Result<ExpectationMatrix> {
        if acts.is_empty() {
            return Ok(ExpectationMatrix {
                matrix: Matrix::zeros(0, self.len()),
            });
        }
        if acts.outcomes() != self.outcomes() {
            return Err(Error::dimension_mismatch(
                "act payoffs vs credal set outcomes",
                self.outcomes(),
                acts.outcomes(),
            ));
        }

        let matrix = acts.matrix().matmul(self.matrix()).ok_or_else(|| {
            Error::dimension_mismatch("expectation product", self.outcomes(), acts.outcomes())
        })?;

        // Finite payoffs near f64::MAX can still overflow the inner product.
        if let Some(pos) = matrix.as_slice().iter().position(|v| !v.is_finite()) {
            let (act, pmf) = (pos / matrix.cols(), pos % matrix.cols());
            return Err(Error::invalid_parameter(
                format!("expectations[{}][{}]", act, pmf),
                matrix.as_slice()[pos],
                format!("expectation of act {} under pmf {} overflows; rescale the payoffs", act, pmf),
            ));
        }

        debug!(
            acts = matrix.rows(),
            pmfs = matrix.cols(),
            outcomes = self.outcomes(),
            "expectation matrix computed"
        );

        Ok(ExpectationMatrix { matrix })
    }

    /// Expectations of a single act under every pmf.
    pub fn expectation(&self, act: &[f64]) -> Result<Vec<f64>> {
        let acts = ActSet::single(act)?;
        Ok(self.expectations(&acts)?.row(0).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rows_close(actual: &ExpectationMatrix, expected: &[Vec<f64>]) {
        assert_eq!(actual.acts(), expected.len());
        for (row, want) in actual.iter_rows().zip(expected) {
            assert_eq!(row.len(), want.len());
            for (a, b) in row.iter().zip(want) {
                assert!((a - b).abs() < 1e-12, "{:?} vs {:?}", row, want);
            }
        }
    }

    #[test]
    fn single_act_single_pmf() {
        let pmfs = PmfSet::new(&[vec![0.4, 0.6]]).unwrap();
        let e = pmfs.expectation(&[3.0, 9.0]).unwrap();
        assert_eq!(e.len(), 1);
        assert!((e[0] - 6.6).abs() < 1e-12);
    }

    #[test]
    fn three_acts_one_pmf() {
        let pmfs = PmfSet::new(&[vec![0.4, 0.6]]).unwrap();
        let acts = ActSet::new(&[vec![3.0, 9.0], vec![4.0, 4.0], vec![0.0, 3.0]]).unwrap();
        let e = pmfs.expectations(&acts).unwrap();
        assert_rows_close(&e, &[vec![6.6], vec![4.0], vec![1.8]]);
    }

    #[test]
    fn four_acts_two_pmfs() {
        let pmfs = PmfSet::new(&[vec![0.4, 0.5, 0.1], vec![0.1, 0.8, 0.1]]).unwrap();
        let acts = ActSet::new(&[
            vec![3.0, 9.0, 2.0],
            vec![4.0, 4.0, 4.0],
            vec![0.0, 3.0, 6.0],
            vec![6.0, 2.0, 1.0],
        ])
        .unwrap();
        let e = pmfs.expectations(&acts).unwrap();
        assert_eq!((e.acts(), e.pmfs()), (4, 2));
        assert_rows_close(
            &e,
            &[
                vec![5.9, 7.7],
                vec![4.0, 4.0],
                vec![2.1, 3.0],
                vec![3.5, 2.3],
            ],
        );
    }

    #[test]
    fn act_length_mismatch() {
        let pmfs = PmfSet::new(&[vec![0.4, 0.6]]).unwrap();
        let acts = ActSet::new(&[vec![1.0, 2.0, 3.0]]).unwrap();
        let err = pmfs.expectations(&acts).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn overflowing_expectation_names_act_and_pmf() {
        // Both pmfs sit inside the default normalization slack.
        let pmfs = PmfSet::new(&[vec![1.0 + 5e-8, 0.0], vec![0.0, 1.0 + 5e-8]]).unwrap();
        let acts = ActSet::new(&[vec![0.0, 0.0], vec![f64::MAX, -f64::MAX]]).unwrap();
        let err = pmfs.expectations(&acts).unwrap_err();
        match err {
            Error::InvalidParameter { ref name, value, ref reason } => {
                assert_eq!(name, "expectations[1][0]");
                assert!(value.is_infinite());
                assert!(reason.contains("act 1 under pmf 0"), "{}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn empty_act_set_gives_empty_matrix() {
        let pmfs = PmfSet::new(&[vec![0.4, 0.6], vec![1.0, 0.0]]).unwrap();
        let acts = ActSet::new::<Vec<f64>>(&[]).unwrap();
        let e = pmfs.expectations(&acts).unwrap();
        assert!(e.is_empty());
        assert_eq!(e.pmfs(), 2);
    }

    #[test]
    fn from_rows_validates() {
        assert!(ExpectationMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).is_err());
        assert!(matches!(
            ExpectationMatrix::from_rows(&[Vec::<f64>::new()]).unwrap_err(),
            Error::EmptyCredalSet
        ));
        assert!(ExpectationMatrix::from_rows(&[vec![f64::NAN]]).is_err());
        let e = ExpectationMatrix::from_rows(&[vec![1.0, 2.0]]).unwrap();
        assert_eq!(e.get(0, 1), Some(2.0));
        assert_eq!(e.column(0), vec![1.0]);
    }
}
