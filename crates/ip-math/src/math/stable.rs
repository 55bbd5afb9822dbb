//! Reductions and tolerance comparisons with explicit NaN/empty semantics.
//!
//! Every helper here is a plain floating-point kernel: no compensation, no
//! reordering. Callers comparing derived values against thresholds rely on
//! that, and apply their own tolerance on top.

/// Inner product of two equally long slices, accumulated left to right.
///
/// Returns NaN when the lengths differ.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return f64::NAN;
    }
    let mut acc = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        acc += x * y;
    }
    acc
}

/// Plain left-to-right sum.
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Smallest value of the slice.
///
/// Returns INFINITY for empty input and NaN if any entry is NaN.
pub fn min_value(values: &[f64]) -> f64 {
    if values.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    values.iter().cloned().fold(f64::INFINITY, f64::min)
}

/// Largest value of the slice.
///
/// Returns NEG_INFINITY for empty input and NaN if any entry is NaN.
pub fn max_value(values: &[f64]) -> f64 {
    if values.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    values.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
}

/// `(min, max)` in a single pass, with the same conventions as
/// [`min_value`] and [`max_value`].
pub fn min_max(values: &[f64]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values {
        if v.is_nan() {
            return (f64::NAN, f64::NAN);
        }
        lo = lo.min(v);
        hi = hi.max(v);
    }
    (lo, hi)
}

/// `weight * hi + (1 - weight) * lo`, kept inside `[lo, hi]`.
///
/// Rounding in the two products can push the raw combination one ulp past
/// either endpoint; the result is pulled back onto the closed interval.
/// NaN inputs propagate.
pub fn interpolate(lo: f64, hi: f64, weight: f64) -> f64 {
    let raw = weight * hi + (1.0 - weight) * lo;
    if raw < lo {
        lo
    } else if raw > hi {
        hi
    } else {
        raw
    }
}

/// `value >= reference - tol`.
pub fn at_least_within(value: f64, reference: f64, tol: f64) -> bool {
    value >= reference - tol
}

/// `a > b + tol`.
pub fn strictly_exceeds(a: f64, b: f64, tol: f64) -> bool {
    a > b + tol
}

/// Absolute-difference comparison. NaN never compares equal.
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() <= tol
}

/// True when a tolerance is usable: finite and non-negative.
pub fn is_valid_tolerance(tol: f64) -> bool {
    tol.is_finite() && tol >= 0.0
}
