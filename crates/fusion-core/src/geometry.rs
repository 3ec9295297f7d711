// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Flux Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Providers of the poloidal flux ψ_p(R, Z), its gradient and I_pol.
//!
//! Providers are held by value by the flux-surface integrators, so they
//! must be cheap to clone and immutable once built.

use crate::bundles::{BinaryFunctorsLvl1, BinaryFunctorsLvl2};
use crate::functor::FunctorHandle;
use fusion_math::interp::{bilinear, gradient};
use fusion_types::error::{FusionError, FusionResult};
use fusion_types::state::Grid2D;
use ndarray::Array2;

/// ψ_p and its first derivatives.
pub trait FluxGeometry: Clone + Send + Sync + 'static {
    fn psip(&self, r: f64, z: f64) -> f64;
    fn psip_r(&self, r: f64, z: f64) -> f64;
    fn psip_z(&self, r: f64, z: f64) -> f64;

    /// |∇ψ_p|
    fn grad_psip(&self, r: f64, z: f64) -> f64 {
        self.psip_r(r, z).hypot(self.psip_z(r, z))
    }
}

/// A flux geometry that also knows the poloidal current function.
pub trait PoloidalCurrent: FluxGeometry {
    fn ipol(&self, r: f64, z: f64) -> f64;
}

/// Geometry assembled from user-supplied functors.
#[derive(Debug, Clone)]
pub struct AnalyticGeometry {
    psip: BinaryFunctorsLvl1,
    ipol: FunctorHandle,
}

impl AnalyticGeometry {
    pub fn new(psip: BinaryFunctorsLvl1, ipol: FunctorHandle) -> FusionResult<Self> {
        if ipol.is_empty() {
            return Err(FusionError::MissingFunctor {
                bundle: "AnalyticGeometry",
                component: "ipol",
            });
        }
        Ok(AnalyticGeometry { psip, ipol })
    }

    pub fn from_lvl2(psip: &BinaryFunctorsLvl2, ipol: FunctorHandle) -> FusionResult<Self> {
        Self::new(psip.lvl1().clone(), ipol)
    }

    pub fn psip_bundle(&self) -> &BinaryFunctorsLvl1 {
        &self.psip
    }
}

impl FluxGeometry for AnalyticGeometry {
    fn psip(&self, r: f64, z: f64) -> f64 {
        self.psip.f().eval(r, z)
    }
    fn psip_r(&self, r: f64, z: f64) -> f64 {
        self.psip.dfx().eval(r, z)
    }
    fn psip_z(&self, r: f64, z: f64) -> f64 {
        self.psip.dfy().eval(r, z)
    }
}

impl PoloidalCurrent for AnalyticGeometry {
    fn ipol(&self, r: f64, z: f64) -> f64 {
        self.ipol.get().eval(r, z)
    }
}

/// Concentric circular flux surfaces.
///
/// ψ_p = s·((R - R₀)² + (Z - Z₀)²), I_pol = I₀·R.
/// With these choices the safety factor is flat: q = I₀ / (2s).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularGeometry {
    pub r_axis: f64,
    pub z_axis: f64,
    pub psi_scale: f64,
    pub current: f64,
}

impl CircularGeometry {
    pub fn new(r_axis: f64, z_axis: f64, psi_scale: f64, current: f64) -> FusionResult<Self> {
        if !(psi_scale.is_finite() && psi_scale > 0.0) {
            return Err(FusionError::PhysicsViolation(format!(
                "psi_scale must be finite and > 0, got {psi_scale}"
            )));
        }
        if !(r_axis.is_finite() && z_axis.is_finite() && current.is_finite()) {
            return Err(FusionError::PhysicsViolation(
                "circular geometry parameters must be finite".to_string(),
            ));
        }
        Ok(CircularGeometry {
            r_axis,
            z_axis,
            psi_scale,
            current,
        })
    }

    /// Closed-form q(ψ) of this geometry.
    pub fn safety_factor_exact(&self) -> f64 {
        self.current / (2.0 * self.psi_scale)
    }

    /// ψ_p with its first and second derivatives as functors.
    pub fn psip_bundle(&self) -> FusionResult<BinaryFunctorsLvl2> {
        let CircularGeometry {
            r_axis: r0,
            z_axis: z0,
            psi_scale: s,
            ..
        } = *self;
        BinaryFunctorsLvl2::new(
            FunctorHandle::from_fn(move |r, z| s * ((r - r0).powi(2) + (z - z0).powi(2))),
            FunctorHandle::from_fn(move |r, _| 2.0 * s * (r - r0)),
            FunctorHandle::from_fn(move |_, z| 2.0 * s * (z - z0)),
            FunctorHandle::from_fn(move |_, _| 2.0 * s),
            FunctorHandle::from_fn(|_, _| 0.0),
            FunctorHandle::from_fn(move |_, _| 2.0 * s),
        )
    }

    /// The same geometry expressed through functors.
    pub fn to_analytic(&self) -> FusionResult<AnalyticGeometry> {
        let i0 = self.current;
        AnalyticGeometry::from_lvl2(
            &self.psip_bundle()?,
            FunctorHandle::from_fn(move |r, _| i0 * r),
        )
    }
}

impl FluxGeometry for CircularGeometry {
    fn psip(&self, r: f64, z: f64) -> f64 {
        self.psi_scale * ((r - self.r_axis).powi(2) + (z - self.z_axis).powi(2))
    }
    fn psip_r(&self, r: f64, _z: f64) -> f64 {
        2.0 * self.psi_scale * (r - self.r_axis)
    }
    fn psip_z(&self, _r: f64, z: f64) -> f64 {
        2.0 * self.psi_scale * (z - self.z_axis)
    }
}

impl PoloidalCurrent for CircularGeometry {
    fn ipol(&self, r: f64, _z: f64) -> f64 {
        self.current * r
    }
}

/// ψ_p tabulated on the cell centres of an order-1 grid.
///
/// ψ_p is interpolated bilinearly; the derivatives come from central
/// differences of the table, interpolated the same way.
#[derive(Debug, Clone)]
pub struct SampledGeometry {
    grid: Grid2D,
    psi: Array2<f64>,
    dpsi_dr: Array2<f64>,
    dpsi_dz: Array2<f64>,
    ipol: FunctorHandle,
}

impl SampledGeometry {
    pub fn new(grid: &Grid2D, psi: Array2<f64>, ipol: FunctorHandle) -> FusionResult<Self> {
        if grid.n != 1 {
            return Err(FusionError::ConfigError(format!(
                "sampled geometry needs an order-1 grid, got n = {}",
                grid.n
            )));
        }
        if grid.nx < 2 || grid.ny < 2 {
            return Err(FusionError::ConfigError(
                "sampled geometry needs at least 2 nodes per direction".to_string(),
            ));
        }
        if psi.dim() != grid.shape() {
            return Err(FusionError::PhysicsViolation(format!(
                "psi shape {:?} does not match grid shape {:?}",
                psi.dim(),
                grid.shape()
            )));
        }
        if psi.iter().any(|v| !v.is_finite()) {
            return Err(FusionError::PhysicsViolation(
                "psi contains non-finite values".to_string(),
            ));
        }
        if ipol.is_empty() {
            return Err(FusionError::MissingFunctor {
                bundle: "SampledGeometry",
                component: "ipol",
            });
        }
        let (dpsi_dr, dpsi_dz) = gradient(&psi, grid);
        Ok(SampledGeometry {
            grid: grid.clone(),
            psi,
            dpsi_dr,
            dpsi_dz,
            ipol,
        })
    }
}

impl FluxGeometry for SampledGeometry {
    fn psip(&self, r: f64, z: f64) -> f64 {
        bilinear(&self.psi, &self.grid, r, z)
    }
    fn psip_r(&self, r: f64, z: f64) -> f64 {
        bilinear(&self.dpsi_dr, &self.grid, r, z)
    }
    fn psip_z(&self, r: f64, z: f64) -> f64 {
        bilinear(&self.dpsi_dz, &self.grid, r, z)
    }
}

impl PoloidalCurrent for SampledGeometry {
    fn ipol(&self, r: f64, z: f64) -> f64 {
        self.ipol.get().eval(r, z)
    }
}
