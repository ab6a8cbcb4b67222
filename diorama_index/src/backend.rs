// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial indexing implementations.

use alloc::boxed::Box;

use crate::types::{Aabb3D, Scalar};
use core::fmt::Debug;

/// Spatial backend abstraction used by `IndexGeneric`.
pub trait Backend<T: Scalar, P: Copy + Debug> {
    /// Insert a new slot into the spatial structure.
    fn insert(&mut self, slot: usize, aabb: Aabb3D<T>);

    /// Update an existing slot's AABB.
    fn update(&mut self, slot: usize, aabb: Aabb3D<T>);

    /// Query slots whose AABB contains the point.
    fn query_point<'a>(&'a self, p: [T; 3]) -> Box<dyn Iterator<Item = usize> + 'a>;

    /// Query slots whose AABB is crossed by the ray `origin + t * dir` for some `t >= 0`.
    ///
    /// Yields the slot and the parametric entry value (negative when the
    /// origin lies inside the box).
    fn query_ray<'a>(
        &'a self,
        origin: [T; 3],
        dir: [T; 3],
    ) -> Box<dyn Iterator<Item = (usize, T)> + 'a>;
}
