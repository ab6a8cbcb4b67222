// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers, flags, transforms, local geometry, and rays.

use alloc::string::String;
use diorama_index::Aabb3D;
use glam::{Affine3A, EulerRot, Quat, Vec3};

/// Identifier for a node in the scene.
///
/// A small, copyable handle. Nodes are created while the scene is assembled
/// and live as long as the scene, so identifiers never go stale.
///
/// Identifiers are ordered by creation; this order is used only for
/// deterministic tie-breaks in [ray casting](crate::Scene::raycast).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Creation-order index of this node.
    pub const fn index(self) -> u32 {
        self.0
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible.
        const VISIBLE  = 0b0000_0001;
        /// Node geometry participates in ray casts.
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Position / rotation / scale triple relative to the parent node.
///
/// Rotation is stored as Euler angles in radians applied in `XYZ` order, so a
/// single axis can be animated independently.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    /// Translation relative to the parent.
    pub position: Vec3,
    /// Euler angles (radians, `XYZ` order).
    pub rotation: Vec3,
    /// Per-axis scale factors.
    pub scale: Vec3,
}

impl Transform {
    /// No translation, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Identity transform moved to `position`.
    pub const fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Compose into an affine matrix (scale, then rotate, then translate).
    pub fn to_affine(&self) -> Affine3A {
        let r = self.rotation;
        Affine3A::from_scale_rotation_translation(
            self.scale,
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.position,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Local data for a node.
#[derive(Clone, Debug, Default)]
pub struct LocalNode {
    /// Name used by name-keyed policies. Not required to be unique.
    pub name: String,
    /// Transform relative to the parent.
    pub transform: Transform,
    /// Local-space geometry box. `None` for pure grouping nodes.
    pub bounds: Option<Aabb3D<f32>>,
    /// Visibility and picking flags.
    pub flags: NodeFlags,
}

impl LocalNode {
    /// A grouping node without geometry.
    pub fn group(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
            ..Default::default()
        }
    }

    /// A node with a box of the given half extents centered on its origin.
    pub fn mesh(name: impl Into<String>, transform: Transform, half_extents: Vec3) -> Self {
        Self {
            name: name.into(),
            transform,
            bounds: Some(Aabb3D::new(
                (-half_extents).to_array(),
                half_extents.to_array(),
            )),
            flags: NodeFlags::default(),
        }
    }
}

/// A half-line `origin + t * direction`, `t >= 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray3 {
    /// Start of the ray.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray3 {
    /// Create a ray; `direction` is normalized (a zero vector stays zero and hits nothing).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t`.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
