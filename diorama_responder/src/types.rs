// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the responder: ray distances, resolved hits, tie-break policy, and lookups.
//!
//! ## Overview
//!
//! These types describe the inputs of the [`resolver`](crate::resolver).
//! A picker (for example a scene ray cast) produces [`ResolvedHit`] values; the
//! resolver ranks them and canonicalizes the winner with help from the
//! [`NameLookup`] and [`ParentLookup`] traits.

/// Policy for breaking ties between hits at equal distance.
///
/// Consulted by [`Resolver::select`](crate::resolver::Resolver::select) after the
/// primary [`RayDistance`] comparison. When the policy also ties (same pickable
/// entity), the hit that appears first in the input wins.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TieBreakPolicy {
    /// Prefer the entity registered earlier (lower pickable-set index).
    #[default]
    FirstRegistered,
    /// Prefer the entity registered later (higher pickable-set index).
    LastRegistered,
    /// Ignore registration order; first in input order wins.
    InputOrder,
}

/// World-space distance from the ray origin to a hit.
///
/// Lower is nearer. Ordering is total: if either side is NaN the two compare
/// equal, so ties fall through to the [`TieBreakPolicy`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayDistance(pub f32);

impl Eq for RayDistance {}

impl Ord for RayDistance {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.0
            .partial_cmp(&other.0)
            .unwrap_or(core::cmp::Ordering::Equal)
    }
}

impl PartialOrd for RayDistance {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(Ord::cmp(self, other))
    }
}

/// A raw hit to be resolved.
///
/// Typically obtained from a ray cast against the pickable set. It is the input to
/// [`Resolver::resolve`](crate::resolver::Resolver::resolve).
#[derive(Clone, Debug)]
pub struct ResolvedHit<K, M = ()> {
    /// Node whose geometry was crossed. May be a descendant of `entity`.
    pub node: K,
    /// Pickable entity that owns `node` (the node itself when it is pickable).
    pub entity: K,
    /// Position of `entity` in the pickable set.
    pub order: usize,
    /// Distance from the ray origin; used to pick the nearest hit.
    pub distance: RayDistance,
    /// Optional metadata carried alongside the hit (e.g., the world hit point).
    pub meta: M,
}

/// Look up the parent of a node for single-hop redirection.
///
/// The [resolver](crate::resolver::Resolver) consults this when a hit node's name
/// is in the redirect-to-parent set.
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// Look up the name of a node; name-keyed policies are evaluated against it.
pub trait NameLookup<K> {
    /// Returns the name of `node`, or `None` if it has none.
    fn name_of(&self, node: &K) -> Option<&str>;
}
