//! Bilinear sampling and finite-difference gradients of tabulated fields.
//!
//! Fields are tabulated on the cell centres of an order-1 Grid2D, so node
//! `(i, j)` sits at `(x0 + (j + ½)·hx, y0 + (i + ½)·hy)`. At least two
//! nodes per direction are required.

use fusion_types::state::Grid2D;
use ndarray::{s, Array2, ArrayView2, Axis, Slice, Zip};

/// Lower node index and fractional offset of `x` along one axis.
///
/// Positions past the outermost centres snap to the boundary node.
fn locate(x: f64, x0: f64, h: f64, nodes: usize) -> (usize, f64) {
    let t = ((x - x0) / h - 0.5).clamp(0.0, (nodes - 1) as f64);
    let i = (t.floor() as usize).min(nodes - 2);
    (i, t - i as f64)
}

/// Value of `field` at `(x, y)` by bilinear interpolation.
pub fn bilinear(field: &Array2<f64>, grid: &Grid2D, x: f64, y: f64) -> f64 {
    let (rows, cols) = field.dim();
    let (ix, tx) = locate(x, grid.x0, grid.hx(), cols);
    let (iy, ty) = locate(y, grid.y0, grid.hy(), rows);
    let wx = [1.0 - tx, tx];
    let wy = [1.0 - ty, ty];
    field
        .slice(s![iy..iy + 2, ix..ix + 2])
        .indexed_iter()
        .map(|((i, j), v)| wy[i] * wx[j] * v)
        .sum()
}

/// Derivative along `axis`: central in the interior, one-sided at the ends.
fn differentiate(field: ArrayView2<f64>, axis: Axis, h: f64) -> Array2<f64> {
    let len = field.len_of(axis);
    let mut out = Array2::zeros(field.raw_dim());
    Zip::from(out.slice_axis_mut(axis, Slice::from(1..len - 1)))
        .and(field.slice_axis(axis, Slice::from(2..)))
        .and(field.slice_axis(axis, Slice::from(..len - 2)))
        .for_each(|d, &hi, &lo| *d = (hi - lo) / (2.0 * h));
    for (edge, hi, lo) in [(0, 1, 0), (len - 1, len - 1, len - 2)] {
        let diff = (&field.index_axis(axis, hi) - &field.index_axis(axis, lo)) / h;
        out.index_axis_mut(axis, edge).assign(&diff);
    }
    out
}

/// `(∂f/∂x, ∂f/∂y)` of a tabulated field.
///
/// Columns run along x, rows along y.
pub fn gradient(field: &Array2<f64>, grid: &Grid2D) -> (Array2<f64>, Array2<f64>) {
    (
        differentiate(field.view(), Axis(1), grid.hx()),
        differentiate(field.view(), Axis(0), grid.hy()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid_ops::evaluate;

    fn unit_cells(cells: usize) -> Grid2D {
        Grid2D::new(0.0, cells as f64, 0.0, cells as f64, 1, cells, cells).unwrap()
    }

    #[test]
    fn test_bilinear_hits_nodes() {
        // Centres at 0.5, 1.5, ..., 4.5
        let grid = unit_cells(5);
        let field = Array2::from_shape_fn((5, 5), |(i, j)| (10 * i + j) as f64);
        assert!((bilinear(&field, &grid, 2.5, 3.5) - 32.0).abs() < 1e-12);
        assert!((bilinear(&field, &grid, 4.5, 4.5) - 44.0).abs() < 1e-12);
        // Midway between four nodes
        assert!((bilinear(&field, &grid, 1.0, 1.0) - 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_bilinear_snaps_outside() {
        let grid = unit_cells(4);
        let field = evaluate(&grid, |x, y| x - 2.0 * y);
        let corner = field[[0, 3]];
        assert!((bilinear(&field, &grid, 100.0, -100.0) - corner).abs() < 1e-12);
        assert!((bilinear(&field, &grid, 0.0, 0.5) - field[[0, 0]]).abs() < 1e-12);
    }

    #[test]
    fn test_bilinear_reproduces_bilinear_fields() {
        let grid = Grid2D::new(-1.0, 3.0, 2.0, 4.0, 1, 9, 7).unwrap();
        let f = |x: f64, y: f64| 1.5 + 2.0 * x - y + 0.25 * x * y;
        let field = evaluate(&grid, f);
        for &(x, y) in &[(0.3, 2.9), (-0.7, 3.6), (2.5, 2.2)] {
            let v = bilinear(&field, &grid, x, y);
            assert!((v - f(x, y)).abs() < 1e-12, "f({x}, {y}) = {v}");
        }
    }

    #[test]
    fn test_gradient_of_quadratic() {
        let grid = Grid2D::new(0.0, 2.0, -1.0, 1.0, 1, 20, 10).unwrap();
        let field = evaluate(&grid, |x, y| x * x + 3.0 * y);
        let (df_dx, df_dy) = gradient(&field, &grid);
        let (x, _) = crate::grid_ops::node_coordinates(&grid);

        assert_eq!(df_dx.dim(), (10, 20));
        // Central differences are exact for quadratics
        for j in 1..19 {
            assert!((df_dx[[4, j]] - 2.0 * x[j]).abs() < 1e-12, "column {j}");
        }
        // One-sided ends are off by h
        assert!((df_dx[[4, 0]] - 2.0 * x[0]).abs() < 0.11);
        assert!(df_dy.iter().all(|&d| (d - 3.0).abs() < 1e-12));
    }

    #[test]
    fn test_gradient_two_nodes() {
        let grid = unit_cells(2);
        let field = evaluate(&grid, |x, y| 4.0 * x + y);
        let (df_dx, df_dy) = gradient(&field, &grid);
        assert!(df_dx.iter().all(|&d| (d - 4.0).abs() < 1e-12));
        assert!(df_dy.iter().all(|&d| (d - 1.0).abs() < 1e-12));
    }
}
