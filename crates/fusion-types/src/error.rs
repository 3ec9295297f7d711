// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Errors
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FusionError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Physics constraint violated: {0}")]
    PhysicsViolation(String),

    #[error("Empty handle: no functor is owned")]
    EmptyHandle,

    #[error("{bundle} constructed without its `{component}` functor")]
    MissingFunctor {
        bundle: &'static str,
        component: &'static str,
    },

    #[error("Degenerate delta bandwidth: epsilon = {epsilon} (must be finite and > 0)")]
    DegenerateBandwidth { epsilon: f64 },

    #[error("Degenerate flux surface at psi0 = {psi0}: surface measure {measure}")]
    DegenerateSurface { psi0: f64, measure: f64 },

    #[error("Flux level psi0 = {psi0} outside the sampled range [{psi_min}, {psi_max}]")]
    LevelOutOfRange {
        psi0: f64,
        psi_min: f64,
        psi_max: f64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type FusionResult<T> = Result<T, FusionError>;
