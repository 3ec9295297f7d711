// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Field Functors
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Scalar fields f(R, Z) behind a cloneable trait object.
//!
//! A [`Handle`] owns one boxed field and deep-copies it on `clone`, so
//! structs that store heterogeneous fields keep ordinary value semantics.

use fusion_math::grid_ops::evaluate;
use fusion_types::error::{FusionError, FusionResult};
use fusion_types::state::Grid2D;
use ndarray::Array2;
use std::fmt;

/// Deep copy of a field into a fresh box.
///
/// Implemented automatically for every `BinaryFunctor + Clone`.
pub trait CloneFunctor {
    fn clone_functor(&self) -> Box<dyn BinaryFunctor>;
}

impl<T> CloneFunctor for T
where
    T: BinaryFunctor + Clone + 'static,
{
    fn clone_functor(&self) -> Box<dyn BinaryFunctor> {
        Box::new(self.clone())
    }
}

/// A function of the cylindrical coordinates (R, Z), independent of φ.
pub trait BinaryFunctor: CloneFunctor + Send + Sync {
    /// f(R, Z)
    fn eval(&self, r: f64, z: f64) -> f64;

    /// Same as [`BinaryFunctor::eval`]; the toroidal angle is ignored.
    fn eval_3d(&self, r: f64, z: f64, _phi: f64) -> f64 {
        self.eval(r, z)
    }
}

/// Types that can duplicate themselves into a new box.
pub trait CloneBox {
    fn clone_box(&self) -> Box<Self>;
}

impl CloneBox for dyn BinaryFunctor {
    fn clone_box(&self) -> Box<Self> {
        self.clone_functor()
    }
}

/// Owning, value-semantic holder of at most one boxed object.
///
/// `clone` creates an independent copy of the held object; assignment
/// through [`Handle::set`] drops the previous one.
pub struct Handle<T: ?Sized + CloneBox> {
    ptr: Option<Box<T>>,
}

/// A handle to a scalar field.
pub type FunctorHandle = Handle<dyn BinaryFunctor>;

impl<T: ?Sized + CloneBox> Handle<T> {
    /// Take ownership of `obj`.
    pub fn new(obj: Box<T>) -> Self {
        Handle { ptr: Some(obj) }
    }

    pub fn empty() -> Self {
        Handle { ptr: None }
    }

    /// Replace the held object, dropping the old one.
    pub fn set(&mut self, obj: Box<T>) {
        self.ptr = Some(obj);
    }

    /// Move the held object out, leaving the handle empty.
    pub fn take(&mut self) -> Option<Box<T>> {
        self.ptr.take()
    }

    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    pub fn try_get(&self) -> FusionResult<&T> {
        self.ptr.as_deref().ok_or(FusionError::EmptyHandle)
    }

    /// Access the held object.
    ///
    /// # Panics
    ///
    /// Panics if the handle is empty. Use [`Handle::try_get`] when emptiness
    /// is an expected state.
    pub fn get(&self) -> &T {
        match self.ptr.as_deref() {
            Some(obj) => obj,
            None => panic!("{}", FusionError::EmptyHandle),
        }
    }
}

impl FunctorHandle {
    /// Wrap any cloneable closure `f(R, Z)`.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Clone + Send + Sync + 'static,
    {
        Handle::new(make_binary_functor(f))
    }
}

impl<T: ?Sized + CloneBox> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Handle {
            ptr: self.ptr.as_deref().map(CloneBox::clone_box),
        }
    }
}

impl<T: ?Sized + CloneBox> Default for Handle<T> {
    fn default() -> Self {
        Handle::empty()
    }
}

impl<T: ?Sized + CloneBox> From<Box<T>> for Handle<T> {
    fn from(obj: Box<T>) -> Self {
        Handle::new(obj)
    }
}

impl<T: ?Sized + CloneBox> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("Handle(empty)")
        } else {
            f.write_str("Handle(..)")
        }
    }
}

/// Makes any cloneable `Fn(f64, f64) -> f64` a [`BinaryFunctor`].
#[derive(Clone)]
pub struct FunctorAdapter<F> {
    f: F,
}

impl<F> FunctorAdapter<F>
where
    F: Fn(f64, f64) -> f64 + Clone + Send + Sync + 'static,
{
    pub fn new(f: F) -> Self {
        FunctorAdapter { f }
    }
}

impl<F> BinaryFunctor for FunctorAdapter<F>
where
    F: Fn(f64, f64) -> f64 + Clone + Send + Sync + 'static,
{
    fn eval(&self, r: f64, z: f64) -> f64 {
        (self.f)(r, z)
    }
}

/// Box a closure as a field. The closure is captured by value, so later
/// changes to the caller's data are not seen by the field.
pub fn make_binary_functor<F>(f: F) -> Box<dyn BinaryFunctor>
where
    F: Fn(f64, f64) -> f64 + Clone + Send + Sync + 'static,
{
    Box::new(FunctorAdapter::new(f))
}

/// f(R, Z) = c
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant {
    value: f64,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        Constant { value }
    }
}

impl BinaryFunctor for Constant {
    fn eval(&self, _r: f64, _z: f64) -> f64 {
        self.value
    }
}

/// Sample a field on every node of `grid`.
pub fn sample<F: BinaryFunctor + ?Sized>(f: &F, grid: &Grid2D) -> Array2<f64> {
    evaluate(grid, |r, z| f.eval(r, z))
}
