// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entity registry: the pickable set and the name-keyed policy sets.
//!
//! ## Lifecycle
//!
//! 1) While the scene is traversed, create a [`RegistryBuilder`], configure the
//!    redirect and exclusion name sets, and [`register`](RegistryBuilder::register)
//!    each discovered interactive entity in traversal order.
//! 2) Call [`build`](RegistryBuilder::build) to obtain an immutable [`EntityRegistry`].
//!
//! Registration order is the tie-break order used by the
//! [resolver](crate::resolver). Lookups are by name and have no error cases:
//! unknown names are neither excluded nor redirected.
//!
//! ```
//! use diorama_responder::registry::RegistryBuilder;
//!
//! let mut b = RegistryBuilder::new();
//! b.redirect_to_parent("PicClover").exclude("Cat_tree");
//! b.register(7_u32);
//! b.register(3_u32);
//! let reg = b.build();
//!
//! assert!(reg.is_excluded("Cat_tree"));
//! assert!(reg.redirects_to_parent("PicClover"));
//! assert!(!reg.is_excluded("Cup"));
//! assert_eq!(reg.index_of(&3), Some(1));
//! assert_eq!(reg.pickables(), &[7, 3]);
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::hash_map::Entry;
use hashbrown::{HashMap, HashSet};

/// Mutable builder for an [`EntityRegistry`]. Only exists during setup.
#[derive(Clone, Debug)]
pub struct RegistryBuilder<K> {
    pickables: Vec<K>,
    positions: HashMap<K, usize>,
    redirect: HashSet<String>,
    excluded: HashSet<String>,
}

impl<K: Copy + Eq + Hash> Default for RegistryBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> RegistryBuilder<K> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            pickables: Vec::new(),
            positions: HashMap::new(),
            redirect: HashSet::new(),
            excluded: HashSet::new(),
        }
    }

    /// Add a name whose hits resolve to the direct parent of the hit node.
    pub fn redirect_to_parent(&mut self, name: impl Into<String>) -> &mut Self {
        self.redirect.insert(name.into());
        self
    }

    /// Add a name whose hits resolve to none.
    pub fn exclude(&mut self, name: impl Into<String>) -> &mut Self {
        self.excluded.insert(name.into());
        self
    }

    /// Add every name from `names` to the redirect-to-parent set.
    pub fn redirect_all<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.redirect.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add every name from `names` to the excluded set.
    pub fn exclude_all<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(names.into_iter().map(Into::into));
        self
    }

    /// Append an entity to the pickable set.
    ///
    /// Registering the same entity twice keeps its first position.
    pub fn register(&mut self, entity: K) -> &mut Self {
        let next = self.pickables.len();
        if let Entry::Vacant(slot) = self.positions.entry(entity) {
            slot.insert(next);
            self.pickables.push(entity);
        } else {
            tracing::trace!(index = next, "entity already registered; keeping first position");
        }
        self
    }

    /// Number of entities registered so far.
    pub fn len(&self) -> usize {
        self.pickables.len()
    }

    /// Whether no entity has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.pickables.is_empty()
    }

    /// Freeze the builder into a read-only registry.
    pub fn build(self) -> EntityRegistry<K> {
        for name in self.redirect.intersection(&self.excluded) {
            tracing::warn!(%name, "name is both redirected and excluded; exclusion wins");
        }
        EntityRegistry {
            pickables: self.pickables,
            positions: self.positions,
            redirect: self.redirect,
            excluded: self.excluded,
        }
    }
}

/// Read-only pickable set plus name policies.
#[derive(Clone, Debug)]
pub struct EntityRegistry<K> {
    pickables: Vec<K>,
    positions: HashMap<K, usize>,
    redirect: HashSet<String>,
    excluded: HashSet<String>,
}

impl<K: Copy + Eq + Hash> Default for EntityRegistry<K> {
    fn default() -> Self {
        RegistryBuilder::new().build()
    }
}

impl<K: Copy + Eq + Hash> EntityRegistry<K> {
    /// Whether hits on a node with this name resolve to none.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    /// Whether hits on a node with this name resolve to its direct parent.
    pub fn redirects_to_parent(&self, name: &str) -> bool {
        self.redirect.contains(name)
    }

    /// Position of `entity` in the pickable set, if registered.
    pub fn index_of(&self, entity: &K) -> Option<usize> {
        self.positions.get(entity).copied()
    }

    /// Whether `entity` is in the pickable set.
    pub fn is_pickable(&self, entity: &K) -> bool {
        self.positions.contains_key(entity)
    }

    /// The pickable set in registration order.
    pub fn pickables(&self) -> &[K] {
        &self.pickables
    }

    /// Number of pickable entities.
    pub fn len(&self) -> usize {
        self.pickables.len()
    }

    /// Whether the pickable set is empty.
    pub fn is_empty(&self) -> bool {
        self.pickables.is_empty()
    }
}
