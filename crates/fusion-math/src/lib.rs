//! Mathematical primitives for SCPN Fusion Core.

pub mod grid_ops;
pub mod interp;
pub mod quadrature;
