// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Histogram Diagnostics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Nearest-bin probability histograms of fluctuation signals.
//!
//! Bins are the cells of a grid. Counts are normalized so the fullest
//! bin reads 1.

use fusion_math::grid_ops::{evaluate, evaluate_1d, reduce_max, scal};
use fusion_types::error::{FusionError, FusionResult};
use fusion_types::state::{Grid1D, Grid2D};
use ndarray::{Array1, Array2};

/// Cell index of `x`, clamped to `[0, cells - 1]`. NaN lands in bin 0.
fn bin_index(x: f64, x0: f64, width: f64, cells: usize) -> usize {
    let b = ((x - x0) / width).floor();
    if b > 0.0 {
        (b as usize).min(cells - 1)
    } else {
        0
    }
}

/// 1D histogram on the cells of a Grid1D.
#[derive(Debug, Clone)]
pub struct Histogram1D {
    grid: Grid1D,
    bin_width: f64,
    counts: Array1<f64>,
}

impl Histogram1D {
    pub fn new(grid: &Grid1D, samples: &[f64]) -> Self {
        let bin_width = grid.h();
        let mut counts = Array1::zeros(grid.nx);
        for &x in samples {
            counts[bin_index(x, grid.x0, bin_width, grid.nx)] += 1.0;
        }
        let amp_max = counts.iter().copied().fold(0.0, f64::max);
        if amp_max > 0.0 {
            counts.mapv_inplace(|c| c / amp_max);
        }
        Histogram1D {
            grid: grid.clone(),
            bin_width,
            counts,
        }
    }

    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Normalized count of the bin containing `x`.
    pub fn eval(&self, x: f64) -> f64 {
        self.counts[bin_index(x, self.grid.x0, self.bin_width, self.grid.nx)]
    }

    pub fn counts(&self) -> &Array1<f64> {
        &self.counts
    }

    /// The histogram sampled on the grid nodes, P(A).
    pub fn on_grid(&self) -> Array1<f64> {
        evaluate_1d(&self.grid, |x| self.eval(x))
    }
}

/// Joint 2D histogram; counts have shape `[ny, nx]`.
#[derive(Debug, Clone)]
pub struct Histogram2D {
    grid: Grid2D,
    counts: Array2<f64>,
}

impl Histogram2D {
    pub fn new(grid: &Grid2D, xs: &[f64], ys: &[f64]) -> FusionResult<Self> {
        if xs.len() != ys.len() {
            return Err(FusionError::ConfigError(format!(
                "joint histogram needs paired samples, got {} x and {} y",
                xs.len(),
                ys.len()
            )));
        }
        let (hx, hy) = (grid.hx(), grid.hy());
        let mut counts = Array2::zeros((grid.ny, grid.nx));
        for (&x, &y) in xs.iter().zip(ys) {
            let ix = bin_index(x, grid.x0, hx, grid.nx);
            let iy = bin_index(y, grid.y0, hy, grid.ny);
            counts[[iy, ix]] += 1.0;
        }
        let amp_max = reduce_max(&counts, 0.0);
        if amp_max > 0.0 {
            scal(&mut counts, 1.0 / amp_max);
        }
        Ok(Histogram2D {
            grid: grid.clone(),
            counts,
        })
    }

    pub fn eval(&self, x: f64, y: f64) -> f64 {
        let ix = bin_index(x, self.grid.x0, self.grid.hx(), self.grid.nx);
        let iy = bin_index(y, self.grid.y0, self.grid.hy(), self.grid.ny);
        self.counts[[iy, ix]]
    }

    pub fn counts(&self) -> &Array2<f64> {
        &self.counts
    }

    /// The histogram sampled on the grid nodes, P(A1, A2).
    pub fn on_grid(&self) -> Array2<f64> {
        evaluate(&self.grid, |x, y| self.eval(x, y))
    }
}

/// Shift and scale `samples` in place to zero mean and unit variance.
///
/// Returns `(mean, sigma)` of the input.
pub fn normalize_to_fluctuation(samples: &mut [f64]) -> FusionResult<(f64, f64)> {
    if samples.is_empty() {
        return Err(FusionError::ConfigError(
            "cannot normalize an empty signal".to_string(),
        ));
    }
    let len = samples.len() as f64;
    let ex = samples.iter().sum::<f64>() / len;
    let exx = samples.iter().map(|v| v * v).sum::<f64>() / len;
    let sigma = (exx - ex * ex).sqrt();
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(FusionError::ConfigError(format!(
            "signal has no fluctuation (sigma = {sigma})"
        )));
    }
    for v in samples.iter_mut() {
        *v = (*v - ex) / sigma;
    }
    log::info!("Sigma = {sigma} Meanvalue = {ex}");
    Ok((ex, sigma))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    const N_SIGMA: f64 = 4.0;
    const N_HIST: usize = 100;

    fn gaussian_signal(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let normal = Normal::new(0.0, 1.0).unwrap();
        (0..n).map(|_| normal.sample(&mut rng)).collect()
    }

    #[test]
    fn test_bin_index_clamps() {
        assert_eq!(bin_index(-10.0, 0.0, 1.0, 5), 0);
        assert_eq!(bin_index(0.5, 0.0, 1.0, 5), 0);
        assert_eq!(bin_index(2.5, 0.0, 1.0, 5), 2);
        assert_eq!(bin_index(99.0, 0.0, 1.0, 5), 4);
        assert_eq!(bin_index(f64::NAN, 0.0, 1.0, 5), 0);
    }

    #[test]
    fn test_histogram1d_counts() {
        let grid = Grid1D::new(0.0, 4.0, 1, 4).unwrap();
        let h = Histogram1D::new(&grid, &[0.5, 1.5, 1.7, 1.9, 3.2, -7.0]);
        // Bins: [2, 3, 0, 1] → normalized by 3
        assert!((h.counts()[0] - 2.0 / 3.0).abs() < 1e-15);
        assert_eq!(h.counts()[1], 1.0);
        assert_eq!(h.counts()[2], 0.0);
        assert!((h.eval(3.9) - 1.0 / 3.0).abs() < 1e-15);
        assert_eq!(h.bin_width(), 1.0);
        let p = h.on_grid();
        assert_eq!(p.len(), 4);
        assert_eq!(p[1], 1.0);
    }

    #[test]
    fn test_histogram1d_empty_stays_zero() {
        let grid = Grid1D::new(-1.0, 1.0, 1, 10).unwrap();
        let h = Histogram1D::new(&grid, &[]);
        assert!(h.counts().iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_gaussian_histogram_peaks_at_zero() {
        let mut signal = gaussian_signal(50_000, 7);
        for v in signal.iter_mut() {
            *v = 0.1 * *v + 1.0;
        }
        let (mean, sigma) = normalize_to_fluctuation(&mut signal).unwrap();
        assert!((mean - 1.0).abs() < 5e-3, "mean = {mean}");
        assert!((sigma - 0.1).abs() < 5e-3, "sigma = {sigma}");

        let grid = Grid1D::new(-N_SIGMA, N_SIGMA, 1, N_HIST).unwrap();
        let h = Histogram1D::new(&grid, &signal);
        assert!(h.eval(0.0) > 0.85, "P(0) = {}", h.eval(0.0));
        assert!(h.eval(-3.5) < 0.05);
        assert!(h.eval(3.5) < 0.05);
    }

    #[test]
    fn test_joint_histogram_anticorrelated() {
        let mut a1 = gaussian_signal(20_000, 11);
        let mut a2: Vec<f64> = a1.iter().map(|v| -v).collect();
        normalize_to_fluctuation(&mut a1).unwrap();
        normalize_to_fluctuation(&mut a2).unwrap();

        let grid = Grid2D::new(-N_SIGMA, N_SIGMA, -N_SIGMA, N_SIGMA, 1, 40, 40).unwrap();
        let h = Histogram2D::new(&grid, &a1, &a2).unwrap();
        // All mass sits on the anti-diagonal
        assert!(h.eval(0.05, -0.05) > 0.5);
        assert_eq!(h.eval(1.05, 1.05), 0.0);
        assert_eq!(h.eval(-1.05, -1.05), 0.0);
        assert_eq!(h.on_grid().dim(), (40, 40));
    }

    #[test]
    fn test_joint_histogram_length_mismatch() {
        let grid = Grid2D::new(0.0, 1.0, 0.0, 1.0, 1, 4, 4).unwrap();
        assert!(Histogram2D::new(&grid, &[0.1, 0.2], &[0.3]).is_err());
    }

    #[test]
    fn test_normalize_rejects_flat_signal() {
        let mut flat = vec![2.0; 16];
        assert!(normalize_to_fluctuation(&mut flat).is_err());
        assert!(normalize_to_fluctuation(&mut []).is_err());
    }
}
