// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for Diorama Scene.
//!
//! ## Feature
//!
//! Enable with `scene_adapter`.
//!
//! ## Notes
//!
//! [`Scene`] implements [`NameLookup`] and [`ParentLookup`] so the resolver can
//! apply name policies and single-hop redirection directly on scene nodes.
//! [`hits_for_ray`] casts against the registry's pickable set and converts the
//! scene's hits into resolver input, carrying the world hit point as metadata.

use alloc::vec::Vec;

use diorama_scene::{NodeId, QueryFilter, Ray3, Scene};
use glam::Vec3;

use crate::registry::EntityRegistry;
use crate::resolver::Resolver;
use crate::types::{NameLookup, ParentLookup, RayDistance, ResolvedHit};

impl NameLookup<NodeId> for Scene {
    fn name_of(&self, node: &NodeId) -> Option<&str> {
        self.name(*node)
    }
}

impl ParentLookup<NodeId> for Scene {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.parent(*node)
    }
}

/// Cast `ray` against every pickable entity (and its descendants).
///
/// Hits come back nearest first; `order` is the owning entity's position in the
/// pickable set.
pub fn hits_for_ray(
    scene: &Scene,
    registry: &EntityRegistry<NodeId>,
    ray: &Ray3,
    filter: QueryFilter,
) -> Vec<ResolvedHit<NodeId, Vec3>> {
    scene
        .raycast(ray, registry.pickables(), filter)
        .into_iter()
        .map(|h| ResolvedHit {
            node: h.node,
            entity: h.root,
            order: h.root_order,
            distance: RayDistance(h.distance),
            meta: h.point,
        })
        .collect()
}

/// Cast `ray` and resolve the canonical target in one step.
pub fn resolve_ray(
    resolver: &Resolver<NodeId>,
    scene: &Scene,
    registry: &EntityRegistry<NodeId>,
    ray: &Ray3,
    filter: QueryFilter,
) -> Option<NodeId> {
    let hits = hits_for_ray(scene, registry, ray, filter);
    resolver.resolve(registry, scene, &hits)
}
