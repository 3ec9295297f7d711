// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Functor Bundles
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Read-only bundles of a field and its analytic derivatives.
//!
//! Every bundle owns its components through [`FunctorHandle`]s and refuses
//! to be built from an empty one.

use crate::functor::{BinaryFunctor, FunctorHandle};
use fusion_types::error::{FusionError, FusionResult};

fn require(
    handles: &[(&FunctorHandle, &'static str)],
    bundle: &'static str,
) -> FusionResult<()> {
    match handles.iter().find(|(h, _)| h.is_empty()) {
        Some(&(_, component)) => Err(FusionError::MissingFunctor { bundle, component }),
        None => Ok(()),
    }
}

/// A function and its first derivatives.
#[derive(Debug, Clone)]
pub struct BinaryFunctorsLvl1 {
    p: [FunctorHandle; 3],
}

impl BinaryFunctorsLvl1 {
    /// `f(x, y)` with `∂f/∂x` and `∂f/∂y`.
    pub fn new(f: FunctorHandle, fx: FunctorHandle, fy: FunctorHandle) -> FusionResult<Self> {
        require(
            &[(&f, "f"), (&fx, "dfx"), (&fy, "dfy")],
            "BinaryFunctorsLvl1",
        )?;
        Ok(BinaryFunctorsLvl1 { p: [f, fx, fy] })
    }

    /// f
    pub fn f(&self) -> &dyn BinaryFunctor {
        self.p[0].get()
    }

    /// ∂f/∂x
    pub fn dfx(&self) -> &dyn BinaryFunctor {
        self.p[1].get()
    }

    /// ∂f/∂y
    pub fn dfy(&self) -> &dyn BinaryFunctor {
        self.p[2].get()
    }
}

/// A function with its first and second derivatives.
#[derive(Debug, Clone)]
pub struct BinaryFunctorsLvl2 {
    first: BinaryFunctorsLvl1,
    p: [FunctorHandle; 3],
}

impl BinaryFunctorsLvl2 {
    pub fn new(
        f: FunctorHandle,
        fx: FunctorHandle,
        fy: FunctorHandle,
        fxx: FunctorHandle,
        fxy: FunctorHandle,
        fyy: FunctorHandle,
    ) -> FusionResult<Self> {
        require(
            &[
                (&f, "f"),
                (&fx, "dfx"),
                (&fy, "dfy"),
                (&fxx, "dfxx"),
                (&fxy, "dfxy"),
                (&fyy, "dfyy"),
            ],
            "BinaryFunctorsLvl2",
        )?;
        Ok(BinaryFunctorsLvl2 {
            first: BinaryFunctorsLvl1 { p: [f, fx, fy] },
            p: [fxx, fxy, fyy],
        })
    }

    /// The first-derivative part of the bundle.
    pub fn lvl1(&self) -> &BinaryFunctorsLvl1 {
        &self.first
    }

    pub fn f(&self) -> &dyn BinaryFunctor {
        self.first.f()
    }

    pub fn dfx(&self) -> &dyn BinaryFunctor {
        self.first.dfx()
    }

    pub fn dfy(&self) -> &dyn BinaryFunctor {
        self.first.dfy()
    }

    /// ∂²f/∂x²
    pub fn dfxx(&self) -> &dyn BinaryFunctor {
        self.p[0].get()
    }

    /// ∂²f/∂x∂y
    pub fn dfxy(&self) -> &dyn BinaryFunctor {
        self.p[1].get()
    }

    /// ∂²f/∂y²
    pub fn dfyy(&self) -> &dyn BinaryFunctor {
        self.p[2].get()
    }
}

/// A symmetric 2×2 tensor field χ and its divergence.
#[derive(Debug, Clone)]
pub struct BinarySymmTensorLvl1 {
    p: [FunctorHandle; 5],
}

impl BinarySymmTensorLvl1 {
    /// Contravariant components χ^xx, χ^xy, χ^yy and
    /// div_x = ∂_x χ^xx + ∂_y χ^yx, div_y = ∂_x χ^xy + ∂_y χ^yy.
    pub fn new(
        chi_xx: FunctorHandle,
        chi_xy: FunctorHandle,
        chi_yy: FunctorHandle,
        div_chi_x: FunctorHandle,
        div_chi_y: FunctorHandle,
    ) -> FusionResult<Self> {
        require(
            &[
                (&chi_xx, "xx"),
                (&chi_xy, "xy"),
                (&chi_yy, "yy"),
                (&div_chi_x, "div_x"),
                (&div_chi_y, "div_y"),
            ],
            "BinarySymmTensorLvl1",
        )?;
        Ok(BinarySymmTensorLvl1 {
            p: [chi_xx, chi_xy, chi_yy, div_chi_x, div_chi_y],
        })
    }

    pub fn xx(&self) -> &dyn BinaryFunctor {
        self.p[0].get()
    }

    pub fn xy(&self) -> &dyn BinaryFunctor {
        self.p[1].get()
    }

    pub fn yy(&self) -> &dyn BinaryFunctor {
        self.p[2].get()
    }

    pub fn div_x(&self) -> &dyn BinaryFunctor {
        self.p[3].get()
    }

    pub fn div_y(&self) -> &dyn BinaryFunctor {
        self.p[4].get()
    }
}

/// A three-component vector field depending only on (x, y).
#[derive(Debug, Clone)]
pub struct BinaryVectorLvl0 {
    p: [FunctorHandle; 3],
}

impl BinaryVectorLvl0 {
    pub fn new(v_x: FunctorHandle, v_y: FunctorHandle, v_z: FunctorHandle) -> FusionResult<Self> {
        require(
            &[(&v_x, "x"), (&v_y, "y"), (&v_z, "z")],
            "BinaryVectorLvl0",
        )?;
        Ok(BinaryVectorLvl0 { p: [v_x, v_y, v_z] })
    }

    pub fn x(&self) -> &dyn BinaryFunctor {
        self.p[0].get()
    }

    pub fn y(&self) -> &dyn BinaryFunctor {
        self.p[1].get()
    }

    pub fn z(&self) -> &dyn BinaryFunctor {
        self.p[2].get()
    }
}
