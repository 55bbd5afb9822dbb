//! Structured fuzz target for the decision criteria.
//!
//! Builds a credal set by normalizing arbitrary weights, then checks the
//! relations between criteria on arbitrary finite payoffs.

#![no_main]

use arbitrary::Arbitrary;
use ip_core::credal::{ActSet, PmfSet, DEFAULT_TOLERANCE};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    outcomes: u8,
    weights: Vec<u16>,
    payoffs: Vec<i16>,
    optimism: u8,
}

fuzz_target!(|input: Input| {
    let k = usize::from(input.outcomes % 6) + 1;

    let pmfs: Vec<Vec<f64>> = input
        .weights
        .chunks(k)
        .filter(|c| c.len() == k)
        .take(6)
        .filter_map(|c| {
            let total: f64 = c.iter().map(|&w| f64::from(w)).sum();
            (total > 0.0).then(|| c.iter().map(|&w| f64::from(w) / total).collect())
        })
        .collect();
    let acts: Vec<Vec<f64>> = input
        .payoffs
        .chunks(k)
        .filter(|c| c.len() == k)
        .take(8)
        .map(|c| c.iter().map(|&p| f64::from(p)).collect())
        .collect();

    let Ok(pmfs) = PmfSet::new(&pmfs) else {
        return;
    };
    let Ok(acts) = ActSet::new(&acts) else {
        return;
    };
    let Ok(exp) = pmfs.expectations(&acts) else {
        return;
    };

    let alpha = f64::from(input.optimism) / 255.0;
    let lower = exp.lower_previsions();
    let upper = exp.upper_previsions();
    let hurwicz = exp.hurwicz_previsions(alpha).unwrap();
    for i in 0..lower.len() {
        assert!(lower[i] <= hurwicz[i] && hurwicz[i] <= upper[i]);
    }

    if !acts.is_empty() {
        assert!(exp.bayes_maximal(DEFAULT_TOLERANCE).unwrap().iter().any(|&m| m));
        assert!(exp.interval_maximal(DEFAULT_TOLERANCE).unwrap().iter().any(|&m| m));
    }

    // Nesting is exact only at zero tolerance.
    let bayes = exp.bayes_maximal(0.0).unwrap();
    let interval = exp.interval_maximal(0.0).unwrap();
    let robust = exp.robust_bayes(0.0).unwrap();
    for i in 0..bayes.len() {
        if robust.admissible[i] {
            assert!(bayes[i]);
        }
        if bayes[i] {
            assert!(interval[i]);
        }
    }
});
