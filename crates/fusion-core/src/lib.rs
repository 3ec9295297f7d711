//! Flux-surface diagnostics on Gauss-Legendre grids.
//!
//! Field functors and their bundles, flux geometry providers, the
//! regularized delta and the flux-surface average / safety factor.

pub mod average;
pub mod bundles;
pub mod delta;
pub mod functor;
pub mod geometry;
