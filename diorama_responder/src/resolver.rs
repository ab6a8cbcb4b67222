// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolver implementation.
//!
//! ## Overview
//!
//! Ranks raw hits and canonicalizes the winner into a single target entity.
//!
//! ## Target Selection
//!
//! - Ranks candidates by [`RayDistance`](crate::types::RayDistance); lower is nearer.
//! - Equal distances are broken by [`TieBreakPolicy`] on pickable-set order.
//! - When that also ties, the first candidate in input order wins.
//!
//! ## Canonicalization
//!
//! Applied to the single nearest hit, in order:
//!
//! 1. If the hit node or its owning entity has an excluded name, the result is none.
//!    Exclusion does not fall through to a farther hit.
//! 2. If the hit node's name redirects to its parent, the target is the node's
//!    direct parent (one hop only).
//! 3. Otherwise a hit on a node that is not itself pickable resolves to its owning entity.
//! 4. If the final target has an excluded name, the result is none.

use core::hash::Hash;
use core::marker::PhantomData;

use crate::registry::EntityRegistry;
use crate::types::{NameLookup, ParentLookup, ResolvedHit, TieBreakPolicy};

/// Deterministic hit resolver.
///
/// ## Usage
///
/// - Construct with [`Resolver::new`]; optionally set a tie-break policy with
///   [`Resolver::set_tie_break`].
/// - Call [`Resolver::resolve`] for each pointer event with the hits from your
///   picker. The result is the canonical target, or `None`.
#[derive(Clone)]
pub struct Resolver<K> {
    tie_break: TieBreakPolicy,
    _k: PhantomData<fn(&K)>,
}

impl<K> core::fmt::Debug for Resolver<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Resolver")
            .field("tie_break", &self.tie_break)
            .finish()
    }
}

impl<K: Copy + Eq + Hash + core::fmt::Debug> Default for Resolver<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash + core::fmt::Debug> Resolver<K> {
    /// Create a resolver with the default tie-break policy.
    pub fn new() -> Self {
        Self {
            tie_break: TieBreakPolicy::default(),
            _k: PhantomData,
        }
    }

    /// Current tie-break policy.
    pub fn tie_break(&self) -> TieBreakPolicy {
        self.tie_break
    }

    /// Set the policy used when multiple hits share the same distance.
    pub fn set_tie_break(&mut self, policy: TieBreakPolicy) {
        self.tie_break = policy;
    }

    /// Resolve `hits` to the canonical target.
    ///
    /// Returns `None` when there are no usable hits or the nearest hit is excluded.
    pub fn resolve<M, L>(
        &self,
        registry: &EntityRegistry<K>,
        lookup: &L,
        hits: &[ResolvedHit<K, M>],
    ) -> Option<K>
    where
        L: NameLookup<K> + ParentLookup<K>,
    {
        let Some(best) = self.select(hits) else {
            tracing::trace!(candidates = hits.len(), "no hit");
            return None;
        };
        let target = Self::canonicalize(registry, lookup, best);
        tracing::trace!(
            node = ?best.node,
            entity = ?best.entity,
            distance = best.distance.0,
            canonical = ?target,
            "resolved"
        );
        target
    }

    /// Select the nearest hit.
    ///
    /// Single pass without allocation or sort. Hits with a non-finite distance are skipped.
    pub fn select<'h, M>(&self, hits: &'h [ResolvedHit<K, M>]) -> Option<&'h ResolvedHit<K, M>> {
        let mut best: Option<&ResolvedHit<K, M>> = None;
        for h in hits {
            if !h.distance.0.is_finite() {
                continue;
            }
            match best {
                None => best = Some(h),
                Some(a) => {
                    use core::cmp::Ordering::*;
                    let better = match h.distance.cmp(&a.distance) {
                        Less => true,
                        Greater => false,
                        // Equal after the policy: the earlier candidate stays.
                        Equal => self.tiebreak(h.order, a.order) == Less,
                    };
                    if better {
                        best = Some(h);
                    }
                }
            }
        }
        best
    }

    /// Apply exclusion and redirection rules to a single hit.
    pub fn canonicalize<M, L>(
        registry: &EntityRegistry<K>,
        lookup: &L,
        hit: &ResolvedHit<K, M>,
    ) -> Option<K>
    where
        L: NameLookup<K> + ParentLookup<K>,
    {
        let excluded = |node: &K| lookup.name_of(node).is_some_and(|n| registry.is_excluded(n));

        if excluded(&hit.node) || excluded(&hit.entity) {
            return None;
        }
        let redirects = lookup
            .name_of(&hit.node)
            .is_some_and(|n| registry.redirects_to_parent(n));
        let target = if redirects {
            match lookup.parent_of(&hit.node) {
                Some(parent) => parent,
                None => {
                    tracing::debug!(node = ?hit.node, "redirecting node has no parent; using its entity");
                    hit.entity
                }
            }
        } else if registry.is_pickable(&hit.node) {
            hit.node
        } else {
            hit.entity
        };
        if excluded(&target) {
            return None;
        }
        Some(target)
    }

    /// `Less` means `a` is preferred over `b`.
    fn tiebreak(&self, a: usize, b: usize) -> core::cmp::Ordering {
        match self.tie_break {
            TieBreakPolicy::FirstRegistered => a.cmp(&b),
            TieBreakPolicy::LastRegistered => b.cmp(&a),
            TieBreakPolicy::InputOrder => core::cmp::Ordering::Equal,
        }
    }
}
