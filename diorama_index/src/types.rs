// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;
use core::fmt::Debug;

/// Axis-aligned bounding box in 3D.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb3D<T> {
    /// Minimum corner `[x, y, z]`.
    pub min: [T; 3],
    /// Maximum corner `[x, y, z]`.
    pub max: [T; 3],
}

impl<T> Aabb3D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min: [T; 3], max: [T; 3]) -> Self {
        Self { min, max }
    }
}

impl<T: Copy + PartialOrd> Aabb3D<T> {
    /// Whether this AABB contains the point.
    pub fn contains_point(&self, p: [T; 3]) -> bool {
        (0..3).all(|i| le(self.min[i], p[i]) && le(p[i], self.max[i]))
    }

    /// The intersection of two AABBs.
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            min: [
                max_t(self.min[0], other.min[0]),
                max_t(self.min[1], other.min[1]),
                max_t(self.min[2], other.min[2]),
            ],
            max: [
                min_t(self.max[0], other.max[0]),
                min_t(self.max[1], other.max[1]),
                min_t(self.max[2], other.max[2]),
            ],
        }
    }

    /// The smallest AABB enclosing both.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: [
                min_t(self.min[0], other.min[0]),
                min_t(self.min[1], other.min[1]),
                min_t(self.min[2], other.min[2]),
            ],
            max: [
                max_t(self.max[0], other.max[0]),
                max_t(self.max[1], other.max[1]),
                max_t(self.max[2], other.max[2]),
            ],
        }
    }

    /// Return true if the AABB is empty or inverted (no volume). Assumes no NaN.
    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| lt(self.max[i], self.min[i]))
    }
}

impl<T: Scalar> Aabb3D<T> {
    /// Slab test against a ray `origin + t * dir`.
    ///
    /// Returns the parametric `(t_enter, t_exit)` interval when the ray meets
    /// the box at some `t >= 0`. `t_enter` is negative when the origin lies
    /// inside the box. `dir` does not need to be normalized.
    pub fn ray_interval(&self, origin: [T; 3], dir: [T; 3]) -> Option<(T, T)> {
        let mut t_enter = T::neg_infinity();
        let mut t_exit = T::infinity();
        for axis in 0..3 {
            let (lo, hi) = T::slab(origin[axis], dir[axis], self.min[axis], self.max[axis])?;
            t_enter = max_t(t_enter, lo);
            t_exit = min_t(t_exit, hi);
        }
        if lt(t_exit, max_t(t_enter, T::zero())) {
            return None;
        }
        Some((t_enter, t_exit))
    }
}

/// Floating-point scalar abstraction used by ray queries.
///
/// Implemented for `f32` and `f64`. Integer coordinates have no meaningful ray
/// parameterization and are not supported.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// Positive infinity.
    fn infinity() -> Self;

    /// Negative infinity.
    fn neg_infinity() -> Self;

    /// Parametric interval where `origin + t * dir` lies within `[min, max]`
    /// along one axis, or `None` for a parallel ray outside the slab.
    fn slab(origin: Self, dir: Self, min: Self, max: Self) -> Option<(Self, Self)>;
}

macro_rules! impl_float_scalar {
    ($t:ty) => {
        impl Scalar for $t {
            #[inline]
            fn zero() -> Self {
                0.0
            }

            #[inline]
            fn infinity() -> Self {
                <$t>::INFINITY
            }

            #[inline]
            fn neg_infinity() -> Self {
                <$t>::NEG_INFINITY
            }

            #[inline]
            fn slab(origin: Self, dir: Self, min: Self, max: Self) -> Option<(Self, Self)> {
                if dir == 0.0 {
                    return if origin < min || origin > max {
                        None
                    } else {
                        Some((<$t>::NEG_INFINITY, <$t>::INFINITY))
                    };
                }
                let inv = 1.0 / dir;
                let t1 = (min - origin) * inv;
                let t2 = (max - origin) * inv;
                Some((t1.min(t2), t1.max(t2)))
            }
        }
    };
}

impl_float_scalar!(f32);
impl_float_scalar!(f64);

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}
