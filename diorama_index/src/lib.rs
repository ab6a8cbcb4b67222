// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diorama Index: a generic 3D AABB index (broadphase for ray picking).
//!
//! - Insert and update axis-aligned bounding boxes (AABBs) with user payloads.
//! - Query by point or by ray.
//! - Stage updates and apply them with [`Index::commit`].
//!
//! It is generic over the scalar type `T` and does not depend on any geometry crate.
//! Higher layers (like a scene graph) compute world-space AABBs and feed them here.
//!
//! Backends are pluggable via a simple trait so you can swap the spatial strategy without API churn.
//! The default backend is a flat vector (linear scan).
//!
//! # Example
//!
//! ```rust
//! use diorama_index::{Index, Aabb3D};
//!
//! let mut idx: Index<f32, u32> = Index::new();
//! let _ = idx.insert(Aabb3D::new([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]), 1);
//! let _ = idx.insert(Aabb3D::new([3.0, 0.0, 0.0], [4.0, 1.0, 1.0]), 2);
//! let _ = idx.commit();
//!
//! // A ray along +x from the left crosses both boxes.
//! let hits: Vec<_> = idx.query_ray([-1.0, 0.5, 0.5], [1.0, 0.0, 0.0]).collect();
//! assert_eq!(hits.len(), 2);
//! ```
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for coordinates. Ray directions may have zero
//! components; parallel rays outside a slab miss.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod index;
pub mod types;

pub use backend::Backend;
pub use backends::flatvec::FlatVec;
pub use index::{Index, IndexGeneric, Key};
pub use types::{Aabb3D, Scalar};
