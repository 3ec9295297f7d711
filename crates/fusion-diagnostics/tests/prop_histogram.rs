// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Property-Based Tests (proptest) for fusion-diagnostics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for the histogram diagnostics.

use fusion_diagnostics::histogram::{normalize_to_fluctuation, Histogram1D, Histogram2D};
use fusion_types::state::{Grid1D, Grid2D};
use proptest::prelude::*;

// ── Histogram Properties ─────────────────────────────────────────────

proptest! {
    /// Non-empty samples give counts in [0, 1] with a peak of exactly 1.
    #[test]
    fn histogram1d_normalized(
        samples in prop::collection::vec(-5.0f64..5.0, 1..200),
        nx in 1usize..50,
    ) {
        let grid = Grid1D::new(-4.0, 4.0, 1, nx).unwrap();
        let h = Histogram1D::new(&grid, &samples);
        let max = h.counts().iter().copied().fold(0.0, f64::max);
        prop_assert_eq!(max, 1.0);
        prop_assert!(h.counts().iter().all(|&c| (0.0..=1.0).contains(&c)));
        for &x in &samples {
            prop_assert!(h.eval(x) > 0.0);
        }
    }

    /// Every sample pair lands in a populated joint bin.
    #[test]
    fn histogram2d_covers_samples(
        pairs in prop::collection::vec((-3.0f64..3.0, -3.0f64..3.0), 1..100),
        nx in 1usize..20,
        ny in 1usize..20,
    ) {
        let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let grid = Grid2D::new(-3.0, 3.0, -3.0, 3.0, 1, nx, ny).unwrap();
        let h = Histogram2D::new(&grid, &xs, &ys).unwrap();
        prop_assert_eq!(h.counts().dim(), (ny, nx));
        for (&x, &y) in xs.iter().zip(&ys) {
            prop_assert!(h.eval(x, y) > 0.0);
        }
    }

    /// The normalized signal has zero mean and unit variance.
    #[test]
    fn fluctuation_is_standardized(
        signal in prop::collection::vec(-100.0f64..100.0, 2..100)
            .prop_filter("needs spread", |s| {
                let lo = s.iter().copied().fold(f64::INFINITY, f64::min);
                let hi = s.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                hi - lo > 1.0
            }),
    ) {
        let mut s = signal;
        normalize_to_fluctuation(&mut s).unwrap();
        let len = s.len() as f64;
        let mean = s.iter().sum::<f64>() / len;
        let var = s.iter().map(|v| v * v).sum::<f64>() / len - mean * mean;
        prop_assert!(mean.abs() < 1e-9, "mean = {}", mean);
        prop_assert!((var - 1.0).abs() < 1e-6, "var = {}", var);
    }
}
