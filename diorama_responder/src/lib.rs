// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diorama Responder: deterministic, `no_std` hover resolution for 3D picking.
//!
//! ## Overview
//!
//! This crate turns raw ray hits into a single hovered entity and keeps the
//! hover animation ownership consistent. It does not perform ray casting.
//! Instead, feed it [`ResolvedHit`](crate::types::ResolvedHit) items (for example from the
//! scene adapter), and it returns a canonical target you can pass to the hover state machine.
//!
//! ## Inputs
//!
//! - An [`EntityRegistry`](crate::registry::EntityRegistry): the ordered pickable set and the
//!   name-keyed redirect and exclusion policies.
//! - One or more [`ResolvedHit`](crate::types::ResolvedHit) values: the node that was hit, the
//!   pickable entity owning it, its pickable-set position, and a
//!   [`RayDistance`](crate::types::RayDistance).
//! - A lookup implementing [`NameLookup`](crate::types::NameLookup) and
//!   [`ParentLookup`](crate::types::ParentLookup).
//!
//! ## Ordering
//!
//! Candidates are ranked by distance; lower is nearer. Equal distances are broken by
//! [`TieBreakPolicy`](crate::types::TieBreakPolicy) (lower pickable-set position by default),
//! then by input order.
//!
//! ## Workflow
//!
//! 1) Pick candidates, e.g. with [`adapters::scene::hits_for_ray`](crate::adapters) when the
//!    `scene_adapter` feature is enabled.
//! 2) Resolve: [`Resolver`](crate::resolver::Resolver) selects the nearest hit and applies
//!    exclusion and single-hop parent redirection.
//! 3) Hover: feed the target to [`HoverSession`](crate::hover::HoverSession), which releases the
//!    previous entity before starting the next one and reports `Leave` / `Enter` transitions.
//!
//! ## Example
//!
//! ```
//! use diorama_responder::hover::{HoverEffects, HoverEvent, HoverSession};
//! use diorama_responder::registry::RegistryBuilder;
//! use diorama_responder::resolver::Resolver;
//! use diorama_responder::types::{NameLookup, ParentLookup, RayDistance, ResolvedHit};
//!
//! struct Names;
//! impl NameLookup<u32> for Names {
//!     fn name_of(&self, n: &u32) -> Option<&str> {
//!         ["Cup", "Cat_tree"].get(*n as usize).copied()
//!     }
//! }
//! impl ParentLookup<u32> for Names {
//!     fn parent_of(&self, _n: &u32) -> Option<u32> { None }
//! }
//!
//! struct NoFx;
//! impl HoverEffects<u32> for NoFx {
//!     type Handle = ();
//!     fn start(&mut self, _e: u32) {}
//!     fn release(&mut self, _e: u32, _h: ()) {}
//! }
//!
//! let mut b = RegistryBuilder::new();
//! b.exclude("Cat_tree").register(0_u32).register(1);
//! let registry = b.build();
//!
//! let hit = |node: u32, d: f32| ResolvedHit {
//!     node,
//!     entity: node,
//!     order: node as usize,
//!     distance: RayDistance(d),
//!     meta: (),
//! };
//!
//! let resolver = Resolver::new();
//! let mut hover: HoverSession<u32, ()> = HoverSession::new();
//! let target = resolver.resolve(&registry, &Names, &[hit(0, 4.0)]);
//! assert_eq!(hover.update(target, &mut NoFx).as_slice(), &[HoverEvent::Enter(0)]);
//!
//! // The excluded entity is nearer: nothing is hovered.
//! let target = resolver.resolve(&registry, &Names, &[hit(0, 4.0), hit(1, 2.0)]);
//! assert_eq!(hover.update(target, &mut NoFx).as_slice(), &[HoverEvent::Leave(0)]);
//! assert!(hover.is_idle());
//! ```

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod hover;
pub mod registry;
pub mod resolver;
pub mod types;
