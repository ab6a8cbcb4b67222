// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diorama Scene: a Glam-native scene graph with ray casting.
//!
//! - Represents a hierarchy of named nodes with local transforms, optional box geometry, and flags.
//! - Computes world transforms and world-space AABBs in a [`Scene::commit`] step and feeds them to a
//!   [`diorama_index`] broadphase.
//! - Casts rays against node geometry with an exact narrowphase in local space.
//! - Provides a perspective [`Camera`] that turns normalized device coordinates into world rays.
//!
//! ## Not a renderer
//!
//! Geometry here is a pick proxy: each node may carry one local box. Meshes and materials live in
//! whatever renders the scene; this crate only answers "what does this ray cross, and how far away".
//!
//! ## Ray casting
//!
//! [`Scene::raycast`] takes a list of roots. Only those roots and their descendants are candidates,
//! and each hit reports which root owns it. Hits are sorted nearest first; equal distances fall back
//! to the root's position in the list, then to node creation order.
//!
//! # Example
//!
//! ```rust
//! use diorama_scene::{Camera, LocalNode, QueryFilter, Scene, Transform};
//! use glam::{Vec2, Vec3};
//!
//! let mut scene = Scene::new();
//! let group = scene.insert(None, LocalNode::group("Interactives", Transform::IDENTITY));
//! let cup = scene.insert(
//!     Some(group),
//!     LocalNode::mesh("Cup", Transform::from_position(Vec3::new(-3.0, 7.0, 0.0)), Vec3::ONE),
//! );
//! let _ = scene.commit();
//!
//! // The default camera looks straight at (-3, 7, 0).
//! let camera = Camera::default();
//! let ray = camera.ray_from_ndc(Vec2::ZERO);
//! let hits = scene.raycast(&ray, &[cup], QueryFilter::default());
//! assert_eq!(hits.first().map(|h| h.node), Some(cup));
//! ```
//!
//! ### Float semantics
//!
//! Transforms are assumed finite. A node whose world transform collapses an axis (zero scale)
//! cannot be hit.

#![no_std]

extern crate alloc;

mod camera;
mod scene;
mod types;
mod util;

pub use camera::Camera;
pub use scene::{QueryFilter, RayHit, Scene};
pub use types::{LocalNode, NodeFlags, NodeId, Ray3, Transform};

pub use diorama_index::Aabb3D;
