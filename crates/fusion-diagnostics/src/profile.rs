// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Flux Profile Driver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Radial profiles of ⟨ψ⟩ and q over a list of flux levels.

use fusion_core::average::{FluxSurfaceAverage, SafetyFactor};
use fusion_core::geometry::{CircularGeometry, FluxGeometry};
use fusion_math::grid_ops::evaluate;
use fusion_types::config::DiagnosticConfig;
use fusion_types::error::{FusionError, FusionResult};
use serde::Serialize;

/// Result of [`compute_profiles`]. `None` marks a level outside the ψ
/// range of the grid or with a vanishing surface.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    pub name: String,
    pub levels: Vec<f64>,
    pub average: Vec<Option<f64>>,
    pub q: Vec<Option<f64>>,
    pub q_exact: f64,
    pub average_bandwidth: f64,
    pub q_bandwidth: f64,
}

impl ProfileReport {
    /// Largest |q - q_exact| over the non-degenerate levels.
    pub fn max_q_error(&self) -> Option<f64> {
        self.q
            .iter()
            .flatten()
            .map(|q| (q - self.q_exact).abs())
            .reduce(f64::max)
    }

    pub fn to_json(&self) -> FusionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn degenerate_to_none(value: FusionResult<f64>) -> FusionResult<Option<f64>> {
    match value {
        Ok(v) => Ok(Some(v)),
        Err(FusionError::DegenerateSurface { .. } | FusionError::LevelOutOfRange { .. }) => {
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Evaluate ⟨ψ_p⟩ and q at every configured level of a circular
/// equilibrium.
pub fn compute_profiles(config: &DiagnosticConfig) -> FusionResult<ProfileReport> {
    config.validate()?;
    let grid = config.create_grid()?;
    let geo = &config.geometry;
    let geometry = CircularGeometry::new(geo.r_axis, geo.z_axis, geo.psi_scale, geo.current)?;
    let levels = config.levels();
    log::info!(
        "{}: {} levels on a {}x{} grid of order {}",
        config.name,
        levels.len(),
        grid.nx,
        grid.ny,
        grid.n
    );

    let psi = evaluate(&grid, |r, z| geometry.psip(r, z));
    let mut fsa = FluxSurfaceAverage::new(&grid, geometry, psi)?;
    let mut sf = SafetyFactor::from_geometry(&grid, geometry)?;

    let average = fsa
        .profile(&levels)
        .into_iter()
        .map(degenerate_to_none)
        .collect::<FusionResult<Vec<_>>>()?;
    let q = sf
        .profile(&levels)
        .into_iter()
        .map(degenerate_to_none)
        .collect::<FusionResult<Vec<_>>>()?;

    let skipped = average.iter().filter(|v| v.is_none()).count();
    if skipped > 0 {
        log::warn!("{}: {skipped} degenerate levels skipped", config.name);
    }

    Ok(ProfileReport {
        name: config.name.clone(),
        levels,
        average,
        q,
        q_exact: geometry.safety_factor_exact(),
        average_bandwidth: fsa.bandwidth(),
        q_bandwidth: sf.bandwidth(),
    })
}
