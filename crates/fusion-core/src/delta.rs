// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Regularized Delta
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Integrands of the flux-surface quadrature.

use crate::functor::BinaryFunctor;
use crate::geometry::{FluxGeometry, PoloidalCurrent};
use fusion_types::error::{FusionError, FusionResult};
use std::f64::consts::PI;

fn check_epsilon(epsilon: f64) -> FusionResult<()> {
    if epsilon.is_finite() && epsilon > 0.0 {
        Ok(())
    } else {
        Err(FusionError::DegenerateBandwidth { epsilon })
    }
}

/// Gaussian approximation of |∇ψ_p| δ(ψ_p(R,Z) - ψ₀):
///
/// ```text
/// |∇ψ_p| / sqrt(2π ε) · exp(-(ψ_p - ψ₀)² / (2ε))
/// ```
///
/// ε and ψ₀ are mutable; a single instance must not be evaluated from
/// several threads while either is being changed.
#[derive(Debug, Clone)]
pub struct DeltaFunction<G> {
    geometry: G,
    epsilon: f64,
    psi0: f64,
}

impl<G: FluxGeometry> DeltaFunction<G> {
    /// Fails with `DegenerateBandwidth` unless `epsilon` is finite and > 0.
    pub fn new(geometry: G, epsilon: f64, psi0: f64) -> FusionResult<Self> {
        check_epsilon(epsilon)?;
        Ok(DeltaFunction {
            geometry,
            epsilon,
            psi0,
        })
    }

    /// Set a new ε. An invalid value leaves the current one in place.
    pub fn set_epsilon(&mut self, epsilon: f64) -> FusionResult<()> {
        check_epsilon(epsilon)?;
        self.epsilon = epsilon;
        Ok(())
    }

    /// Set a new ψ₀.
    pub fn set_psi(&mut self, psi0: f64) {
        self.psi0 = psi0;
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn psi0(&self) -> f64 {
        self.psi0
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }
}

impl<G: FluxGeometry> BinaryFunctor for DeltaFunction<G> {
    fn eval(&self, r: f64, z: f64) -> f64 {
        let psip = self.geometry.psip(r, z);
        let dpsi = psip - self.psi0;
        (-(dpsi * dpsi) / (2.0 * self.epsilon)).exp() / (2.0 * PI * self.epsilon).sqrt()
            * self.geometry.grad_psip(r, z)
    }
}

/// Local safety-factor integrand
///
/// ```text
/// α(R,Z) = I_pol(R,Z) / (R |∇ψ_p|)
/// ```
#[derive(Debug, Clone)]
pub struct Alpha<G> {
    geometry: G,
}

impl<G: PoloidalCurrent> Alpha<G> {
    pub fn new(geometry: G) -> Self {
        Alpha { geometry }
    }
}

impl<G: PoloidalCurrent> BinaryFunctor for Alpha<G> {
    fn eval(&self, r: f64, z: f64) -> f64 {
        (1.0 / r) * (self.geometry.ipol(r, z) / self.geometry.grad_psip(r, z))
    }
}
