//! Statistical and profile diagnostics built on the flux-surface
//! integrators of `fusion-core`.

pub mod histogram;
pub mod profile;
