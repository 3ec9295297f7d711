// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Grid Operations
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Sampling, quadrature weights and reductions on Gauss-Legendre grids.
//!
//! Every field produced here is an `[n·ny, n·nx]` array in standard
//! layout, so row `i`, column `j` is the node at `(x[j], y[i])`.

use crate::quadrature::gauss_legendre;
use fusion_types::state::{Grid1D, Grid2D};
use ndarray::{Array1, Array2, Zip};

/// Node coordinates of `cells` cells of width `h` starting at `x0`.
fn axis_nodes(x0: f64, h: f64, n: usize, cells: usize) -> Array1<f64> {
    let (xi, _) = gauss_legendre(n);
    Array1::from_shape_fn(n * cells, |k| {
        let cell = k / n;
        x0 + h * cell as f64 + 0.5 * h * (1.0 + xi[k % n])
    })
}

/// Per-node weights along one axis: `h/2 · w_k`.
fn axis_weights(h: f64, n: usize, cells: usize) -> Array1<f64> {
    let (_, w) = gauss_legendre(n);
    Array1::from_shape_fn(n * cells, |k| 0.5 * h * w[k % n])
}

/// 1D node coordinates of a Grid1D.
pub fn nodes_1d(grid: &Grid1D) -> Array1<f64> {
    axis_nodes(grid.x0, grid.h(), grid.n, grid.nx)
}

/// Node coordinates `(x, y)` of a Grid2D, lengths `n·nx` and `n·ny`.
pub fn node_coordinates(grid: &Grid2D) -> (Array1<f64>, Array1<f64>) {
    (
        axis_nodes(grid.x0, grid.hx(), grid.n, grid.nx),
        axis_nodes(grid.y0, grid.hy(), grid.n, grid.ny),
    )
}

/// Sample `f(x, y)` on every node of the grid.
pub fn evaluate<F>(grid: &Grid2D, f: F) -> Array2<f64>
where
    F: Fn(f64, f64) -> f64,
{
    let (x, y) = node_coordinates(grid);
    Array2::from_shape_fn(grid.shape(), |(i, j)| f(x[j], y[i]))
}

/// Sample `f(x)` on every node of a 1D grid.
pub fn evaluate_1d<F>(grid: &Grid1D, f: F) -> Array1<f64>
where
    F: Fn(f64) -> f64,
{
    nodes_1d(grid).mapv(f)
}

/// Quadrature weights of a Grid2D. They sum to the domain area.
pub fn create_weights(grid: &Grid2D) -> Array2<f64> {
    let wx = axis_weights(grid.hx(), grid.n, grid.nx);
    let wy = axis_weights(grid.hy(), grid.n, grid.ny);
    Array2::from_shape_fn(grid.shape(), |(i, j)| wy[i] * wx[j])
}

/// Quadrature weights of a Grid1D.
pub fn create_weights_1d(grid: &Grid1D) -> Array1<f64> {
    axis_weights(grid.h(), grid.n, grid.nx)
}

/// Weighted inner product `Σ a_k w_k b_k`.
///
/// Panics if the three shapes differ.
pub fn weighted_dot(a: &Array2<f64>, weights: &Array2<f64>, b: &Array2<f64>) -> f64 {
    Zip::from(a)
        .and(weights)
        .and(b)
        .fold(0.0, |acc, &ak, &wk, &bk| acc + ak * wk * bk)
}

/// In-place scaling `a ← alpha · a`.
pub fn scal(a: &mut Array2<f64>, alpha: f64) {
    a.mapv_inplace(|v| alpha * v);
}

/// Maximum of `init` and every element.
pub fn reduce_max(a: &Array2<f64>, init: f64) -> f64 {
    a.iter().copied().fold(init, f64::max)
}

/// Minimum of `init` and every element.
pub fn reduce_min(a: &Array2<f64>, init: f64) -> f64 {
    a.iter().copied().fold(init, f64::min)
}
