// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{FusionError, FusionResult};
use serde::{Deserialize, Serialize};

/// Highest number of Gauss-Legendre nodes per cell a grid may carry.
pub const MAX_ORDER: usize = 20;

/// Boundary condition tag of one grid direction.
///
/// Stored alongside the grid; none of the quadrature depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    #[default]
    Periodic,
    Dirichlet,
    Neumann,
    /// Dirichlet left, Neumann right.
    DirNeu,
    /// Neumann left, Dirichlet right.
    NeuDir,
}

fn check_axis(name: &str, lo: f64, hi: f64, n: usize, cells: usize) -> FusionResult<()> {
    if !lo.is_finite() || !hi.is_finite() || hi <= lo {
        return Err(FusionError::ConfigError(format!(
            "{name}-extent must be finite with min < max, got [{lo}, {hi}]"
        )));
    }
    if n == 0 || n > MAX_ORDER {
        return Err(FusionError::ConfigError(format!(
            "order n must be in 1..={MAX_ORDER}, got {n}"
        )));
    }
    if cells == 0 {
        return Err(FusionError::ConfigError(format!(
            "{name}-direction needs at least one cell"
        )));
    }
    Ok(())
}

/// 1D cell grid with `n` Gauss-Legendre nodes per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid1D {
    pub x0: f64,
    pub x1: f64,
    pub n: usize,
    pub nx: usize,
    pub bc: Boundary,
}

impl Grid1D {
    pub fn new(x0: f64, x1: f64, n: usize, nx: usize) -> FusionResult<Self> {
        check_axis("x", x0, x1, n, nx)?;
        Ok(Grid1D {
            x0,
            x1,
            n,
            nx,
            bc: Boundary::default(),
        })
    }

    pub fn lx(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Cell width.
    pub fn h(&self) -> f64 {
        self.lx() / self.nx as f64
    }

    /// Total number of nodes, `n * nx`.
    pub fn size(&self) -> usize {
        self.n * self.nx
    }
}

/// 2D cell grid over `[x0, x1] × [y0, y1]`.
///
/// Each of the `nx × ny` cells carries `n × n` Gauss-Legendre nodes. The
/// first coordinate is R, the second Z. A field sampled on the grid is an
/// `Array2` of shape `[n * ny, n * nx]` in row-major order (y-major,
/// x-minor), matching the `[nz, nr]` convention of the equilibrium arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2D {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub n: usize,
    pub nx: usize,
    pub ny: usize,
    pub bcx: Boundary,
    pub bcy: Boundary,
}

impl Grid2D {
    pub fn new(
        x0: f64,
        x1: f64,
        y0: f64,
        y1: f64,
        n: usize,
        nx: usize,
        ny: usize,
    ) -> FusionResult<Self> {
        check_axis("x", x0, x1, n, nx)?;
        check_axis("y", y0, y1, n, ny)?;
        Ok(Grid2D {
            x0,
            x1,
            y0,
            y1,
            n,
            nx,
            ny,
            bcx: Boundary::default(),
            bcy: Boundary::default(),
        })
    }

    pub fn with_boundaries(mut self, bcx: Boundary, bcy: Boundary) -> Self {
        self.bcx = bcx;
        self.bcy = bcy;
        self
    }

    pub fn lx(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn ly(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Cell width in x.
    pub fn hx(&self) -> f64 {
        self.lx() / self.nx as f64
    }

    /// Cell height in y.
    pub fn hy(&self) -> f64 {
        self.ly() / self.ny as f64
    }

    /// Shape of a sampled field: `(rows, cols) = (n * ny, n * nx)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n * self.ny, self.n * self.nx)
    }

    /// Total number of nodes.
    pub fn size(&self) -> usize {
        let (rows, cols) = self.shape();
        rows * cols
    }

    /// Whether `(x, y)` lies in the closed domain.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}
