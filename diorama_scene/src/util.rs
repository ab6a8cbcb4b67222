// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use diorama_index::Aabb3D;
use glam::{Affine3A, Vec3};

/// Transform an axis-aligned box by an `Affine3A` and return a conservative
/// axis-aligned bounding box in the target space.
pub(crate) fn transform_aabb_bbox(affine: Affine3A, aabb: Aabb3D<f32>) -> Aabb3D<f32> {
    let lo = Vec3::from_array(aabb.min);
    let hi = Vec3::from_array(aabb.max);
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for i in 0..8_u8 {
        let corner = Vec3::new(
            if i & 1 == 0 { lo.x } else { hi.x },
            if i & 2 == 0 { lo.y } else { hi.y },
            if i & 4 == 0 { lo.z } else { hi.z },
        );
        let p = affine.transform_point3(corner);
        min = min.min(p);
        max = max.max(p);
    }
    Aabb3D::new(min.to_array(), max.to_array())
}
