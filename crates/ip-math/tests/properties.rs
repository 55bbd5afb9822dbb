//! Property-based tests for ip-math kernels.
//!
//! Uses proptest to check algebraic properties of the matrix product and
//! reductions across many random inputs.

use ip_math::{approx_eq, dot, interpolate, max_value, min_max, min_value, Matrix};
use proptest::prelude::*;

/// Tolerance for floating point comparisons on bounded inputs.
const TOL: f64 = 1e-9;

fn matrix_strategy(rows: usize, cols: usize) -> impl Strategy<Value = Matrix> {
    prop::collection::vec(-100.0..100.0f64, rows * cols)
        .prop_map(move |data| Matrix::from_vec(rows, cols, data).expect("shape matches"))
}

// ============================================================================
// dot / matmul properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// dot is symmetric in its arguments.
    #[test]
    fn dot_commutative(pairs in prop::collection::vec((-100.0..100.0f64, -100.0..100.0f64), 1..16)) {
        let a: Vec<f64> = pairs.iter().map(|p| p.0).collect();
        let b: Vec<f64> = pairs.iter().map(|p| p.1).collect();
        prop_assert_eq!(dot(&a, &b), dot(&b, &a));
    }

    /// dot is linear in its first argument.
    #[test]
    fn dot_linear(
        pairs in prop::collection::vec((-100.0..100.0f64, -100.0..100.0f64), 1..16),
        scale in -10.0..10.0f64,
    ) {
        let a: Vec<f64> = pairs.iter().map(|p| p.0).collect();
        let b: Vec<f64> = pairs.iter().map(|p| p.1).collect();
        let scaled: Vec<f64> = a.iter().map(|x| x * scale).collect();
        let lhs = dot(&scaled, &b);
        let rhs = scale * dot(&a, &b);
        prop_assert!(approx_eq(lhs, rhs, TOL * (1.0 + rhs.abs())), "{} vs {}", lhs, rhs);
    }

    /// Entry (i, j) of a product is the dot product of row i with column j.
    #[test]
    fn matmul_entries_are_dots(a in matrix_strategy(3, 4), b in matrix_strategy(4, 2)) {
        let c = a.matmul(&b).expect("compatible shapes");
        prop_assert_eq!(c.shape(), (3, 2));
        for i in 0..3 {
            for j in 0..2 {
                prop_assert_eq!(c.get(i, j).unwrap(), dot(a.row(i), &b.column(j)));
            }
        }
    }

    /// (A·B)ᵀ = Bᵀ·Aᵀ up to rounding.
    #[test]
    fn matmul_transpose_identity(a in matrix_strategy(2, 3), b in matrix_strategy(3, 4)) {
        let lhs = a.matmul(&b).unwrap().transpose();
        let rhs = b.transpose().matmul(&a.transpose()).unwrap();
        prop_assert_eq!(lhs.shape(), rhs.shape());
        for (x, y) in lhs.as_slice().iter().zip(rhs.as_slice()) {
            prop_assert!(approx_eq(*x, *y, TOL * (1.0 + y.abs())));
        }
    }
}

// ============================================================================
// reduction properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// min_max agrees with the separate reductions.
    #[test]
    fn min_max_consistent(values in prop::collection::vec(-1e6..1e6f64, 1..32)) {
        let (lo, hi) = min_max(&values);
        prop_assert_eq!(lo, min_value(&values));
        prop_assert_eq!(hi, max_value(&values));
        prop_assert!(lo <= hi);
    }

    /// interpolate never leaves the closed interval.
    #[test]
    fn interpolate_bounded(values in prop::collection::vec(-1e6..1e6f64, 1..32), w in 0.0..=1.0f64) {
        let (lo, hi) = min_max(&values);
        let h = interpolate(lo, hi, w);
        prop_assert!(lo <= h && h <= hi, "lo={} h={} hi={} w={}", lo, h, hi, w);
    }

    /// interpolate is monotone in the weight.
    #[test]
    fn interpolate_monotone(lo in -1e3..1e3f64, span in 0.0..1e3f64, w1 in 0.0..=1.0f64, w2 in 0.0..=1.0f64) {
        let hi = lo + span;
        let (a, b) = if w1 <= w2 { (w1, w2) } else { (w2, w1) };
        prop_assert!(interpolate(lo, hi, a) <= interpolate(lo, hi, b) + TOL);
    }
}
