// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `Index` API and generic implementation over a pluggable backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::{Aabb3D, Scalar};

/// Stable handle for an entry.
///
/// Entries are never removed, so a key stays valid for the life of the index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Key(u32);

impl Key {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Index keys are 32-bit; slot counts never approach u32::MAX."
    )]
    const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mark {
    Added,
    Updated,
}

#[derive(Clone, Debug)]
struct Entry<T, P> {
    aabb: Aabb3D<T>,
    payload: P,
    mark: Option<Mark>,
}

/// A generic AABB index parameterized by a spatial backend.
///
/// Mutations are staged and only become visible to queries after
/// [`commit`](Self::commit).
#[derive(Debug)]
pub struct IndexGeneric<T: Scalar, P: Copy + Debug, B: Backend<T, P>> {
    entries: Vec<Entry<T, P>>,
    backend: B,
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Scalar,
    P: Copy + Debug,
    B: Backend<T, P> + Default,
{
    /// Create an empty index using the backend's default constructor.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            backend: B::default(),
        }
    }
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Scalar,
    P: Copy + Debug,
    B: Backend<T, P>,
{
    /// Number of entries, committed or staged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a new AABB with payload. Returns a stable handle `Key`.
    pub fn insert(&mut self, aabb: Aabb3D<T>, payload: P) -> Key {
        self.entries.push(Entry {
            aabb,
            payload,
            mark: Some(Mark::Added),
        });
        Key::new(self.entries.len() - 1)
    }

    /// Update an existing AABB. Unknown keys are ignored.
    pub fn update(&mut self, key: Key, aabb: Aabb3D<T>) {
        if let Some(e) = self.entries.get_mut(key.idx()) {
            e.aabb = aabb;
            if e.mark.is_none() {
                e.mark = Some(Mark::Updated);
            }
        }
    }

    /// Apply pending changes to the backend.
    ///
    /// Returns the number of staged changes that were applied.
    pub fn commit(&mut self) -> usize {
        let mut applied = 0;
        for (i, entry) in self.entries.iter_mut().enumerate() {
            match entry.mark.take() {
                Some(Mark::Added) => self.backend.insert(i, entry.aabb),
                Some(Mark::Updated) => self.backend.update(i, entry.aabb),
                None => continue,
            }
            applied += 1;
        }
        applied
    }

    /// Query for entries whose AABB contains the point.
    pub fn query_point(&self, p: [T; 3]) -> impl Iterator<Item = (Key, P)> + '_ {
        self.backend
            .query_point(p)
            .filter_map(move |i| self.entries.get(i).map(|e| (Key::new(i), e.payload)))
    }

    /// Query for entries whose AABB is crossed by the ray `origin + t * dir`.
    ///
    /// Each item carries the parametric entry value `t` along `dir`. Results
    /// are in backend order; callers rank them.
    pub fn query_ray(
        &self,
        origin: [T; 3],
        dir: [T; 3],
    ) -> impl Iterator<Item = (Key, P, T)> + '_ {
        self.backend
            .query_ray(origin, dir)
            .filter_map(move |(i, t)| self.entries.get(i).map(|e| (Key::new(i), e.payload, t)))
    }
}

/// Default index using a flat vector backend.
pub type Index<T, P> = IndexGeneric<T, P, crate::backends::flatvec::FlatVec<T, P>>;

impl<T: Scalar, P: Copy + Debug> Default for Index<T, P> {
    fn default() -> Self {
        Self::new()
    }
}
