// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: structure, transform updates, ray queries.

use alloc::vec::Vec;
use diorama_index::{Aabb3D, Index as AabbIndex, Key as AabbKey};
use glam::{Affine3A, Vec3};

use crate::types::{LocalNode, NodeFlags, NodeId, Ray3, Transform};
use crate::util::transform_aabb_bbox;

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Scene graph of named nodes.
///
/// Nodes are inserted while the scene is assembled and are never removed.
/// Transform edits are staged; call [`Scene::commit`] to propagate world
/// transforms and bounds before ray casting.
pub struct Scene {
    nodes: Vec<Node>,
    index: AabbIndex<f32, NodeId>,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let dirty = self.nodes.iter().filter(|n| n.dirty).count();
        f.debug_struct("Scene")
            .field("nodes_total", &total)
            .field("nodes_dirty", &dirty)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

/// A single ray intersection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    /// The node whose geometry was crossed.
    pub node: NodeId,
    /// The root (from the `roots` passed to [`Scene::raycast`]) that owns `node`.
    pub root: NodeId,
    /// Position of `root` within the `roots` slice.
    pub root_order: usize,
    /// World-space distance from the ray origin.
    pub distance: f32,
    /// World-space intersection point.
    pub point: Vec3,
}

/// Filters applied during ray casting.
///
/// Used by [`Scene::raycast`].
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryFilter {
    /// If true, only consider nodes marked [`NodeFlags::VISIBLE`].
    pub visible_only: bool,
    /// If true, only consider nodes marked [`NodeFlags::PICKABLE`].
    pub pickable_only: bool,
}

#[derive(Clone, Debug, Default)]
struct WorldNode {
    world_transform: Affine3A,
    world_bounds: Option<Aabb3D<f32>>,
}

#[derive(Clone, Debug)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
    world: WorldNode,
    dirty: bool,
    index_key: Option<AabbKey>,
}

impl Node {
    fn new(local: LocalNode) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            local,
            world: WorldNode::default(),
            dirty: true,
            index_key: None,
        }
    }
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: AabbIndex::default(),
        }
    }

    /// Insert a new node as a child of `parent` (or as a root if `None`).
    ///
    /// A stale or foreign `parent` makes the node a root.
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId is a 32-bit index."
        )]
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(Node::new(local));
        if let Some(p) = parent
            && self.contains(p)
        {
            self.nodes[p.idx()].children.push(id);
            self.nodes[id.idx()].parent = Some(p);
        }
        id
    }

    /// Number of nodes in the scene.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` refers to a node of this scene.
    pub fn contains(&self, id: NodeId) -> bool {
        id.idx() < self.nodes.len()
    }

    /// Name of a node.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id.idx()).map(|n| n.local.name.as_str())
    }

    /// Parent of a node, or `None` for roots.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.idx()).and_then(|n| n.parent)
    }

    /// Children of a node in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.idx())
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the node carries local geometry.
    pub fn has_geometry(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .is_some_and(|n| n.local.bounds.is_some())
    }

    /// Flags of a node.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.nodes.get(id.idx()).map(|n| n.local.flags)
    }

    /// First node (in insertion order) with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.local.name == name)
            .map(Self::id_at)
    }

    /// Root nodes in insertion order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(i, _)| Self::id_at(i))
            .collect()
    }

    /// Pre-order traversal of `root` and all of its descendants.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(root) {
            return out;
        }
        let mut stack = Vec::from([root]);
        while let Some(id) = stack.pop() {
            out.push(id);
            // Reverse so the first child is visited first.
            stack.extend(self.nodes[id.idx()].children.iter().rev().copied());
        }
        out
    }

    /// Local transform of a node.
    pub fn transform(&self, id: NodeId) -> Option<Transform> {
        self.nodes.get(id.idx()).map(|n| n.local.transform)
    }

    /// Replace the local transform of a node. Takes effect at the next [`commit`](Self::commit).
    pub fn set_transform(&mut self, id: NodeId, transform: Transform) {
        if let Some(n) = self.nodes.get_mut(id.idx()) {
            n.local.transform = transform;
            n.dirty = true;
        }
    }

    /// World transform as of the last commit.
    pub fn world_transform(&self, id: NodeId) -> Option<Affine3A> {
        self.nodes.get(id.idx()).map(|n| n.world.world_transform)
    }

    /// World-space AABB of the node's own geometry as of the last commit.
    pub fn world_bounds(&self, id: NodeId) -> Option<Aabb3D<f32>> {
        self.nodes.get(id.idx()).and_then(|n| n.world.world_bounds)
    }

    /// Propagate world transforms and bounds and synchronize the spatial index.
    ///
    /// Only dirty nodes and their descendants are recomputed. Returns the
    /// number of nodes whose world data was recomputed.
    pub fn commit(&mut self) -> usize {
        let mut updated = 0;
        for root in self.roots() {
            self.update_world_recursive(root, Affine3A::IDENTITY, false, &mut updated);
        }
        let _ = self.index.commit();
        updated
    }

    /// Cast `ray` against the geometry of `roots` and all their descendants.
    ///
    /// Each hit is attributed to the nearest enclosing root in `roots`. Hits are
    /// sorted by distance, then by root position in `roots`, then by node
    /// creation order, so equal-distance ties resolve deterministically.
    ///
    /// Uses world data from the last [`commit`](Self::commit).
    pub fn raycast(&self, ray: &Ray3, roots: &[NodeId], filter: QueryFilter) -> Vec<RayHit> {
        let mut hits = Vec::new();
        if roots.is_empty() || ray.direction == Vec3::ZERO {
            return hits;
        }
        let candidates = self
            .index
            .query_ray(ray.origin.to_array(), ray.direction.to_array());
        for (_, id, _) in candidates {
            let node = &self.nodes[id.idx()];
            if filter.visible_only && !node.local.flags.contains(NodeFlags::VISIBLE) {
                continue;
            }
            if filter.pickable_only && !node.local.flags.contains(NodeFlags::PICKABLE) {
                continue;
            }
            let Some((root, root_order)) = self.owning_root(id, roots) else {
                continue;
            };
            let Some((distance, point)) = self.narrowphase(node, ray) else {
                continue;
            };
            hits.push(RayHit {
                node: id,
                root,
                root_order,
                distance,
                point,
            });
        }
        hits.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.root_order.cmp(&b.root_order))
                .then(a.node.cmp(&b.node))
        });
        hits
    }

    // --- internals ---

    #[allow(
        clippy::cast_possible_truncation,
        reason = "NodeId is a 32-bit index."
    )]
    fn id_at(i: usize) -> NodeId {
        NodeId::new(i as u32)
    }

    fn owning_root(&self, id: NodeId, roots: &[NodeId]) -> Option<(NodeId, usize)> {
        let mut cur = Some(id);
        while let Some(n) = cur {
            if let Some(order) = roots.iter().position(|r| *r == n) {
                return Some((n, order));
            }
            cur = self.parent(n);
        }
        None
    }

    /// Exact test against the node's local box, in local space.
    fn narrowphase(&self, node: &Node, ray: &Ray3) -> Option<(f32, Vec3)> {
        let bounds = node.local.bounds?;
        let world = node.world.world_transform;
        // A collapsed axis has no inverse and nothing to hit.
        if world.matrix3.determinant() == 0.0 {
            return None;
        }
        let inv = world.inverse();
        let local_origin = inv.transform_point3(ray.origin);
        let local_dir = inv.transform_vector3(ray.direction);
        let (t_enter, t_exit) =
            bounds.ray_interval(local_origin.to_array(), local_dir.to_array())?;
        let t = if t_enter >= 0.0 { t_enter } else { t_exit };
        let point = world.transform_point3(local_origin + local_dir * t);
        Some((point.distance(ray.origin), point))
    }

    fn update_world_recursive(
        &mut self,
        id: NodeId,
        parent_tf: Affine3A,
        parent_dirty: bool,
        updated: &mut usize,
    ) {
        enum IndexOp {
            Update(AabbKey, Aabb3D<f32>),
            Insert(Aabb3D<f32>),
            Skip,
        }
        let (world_tf, dirty, child_ids, index_op) = {
            let node = &mut self.nodes[id.idx()];
            let dirty = node.dirty || parent_dirty;
            if dirty {
                node.world.world_transform = parent_tf * node.local.transform.to_affine();
                node.world.world_bounds = node
                    .local
                    .bounds
                    .map(|b| transform_aabb_bbox(node.world.world_transform, b));
                node.dirty = false;
                *updated += 1;
            }
            let op = match (dirty, node.world.world_bounds, node.index_key) {
                (true, Some(aabb), Some(key)) => IndexOp::Update(key, aabb),
                (true, Some(aabb), None) => IndexOp::Insert(aabb),
                _ => IndexOp::Skip,
            };
            (
                node.world.world_transform,
                dirty,
                node.children.clone(),
                op,
            )
        };

        match index_op {
            IndexOp::Update(key, aabb) => self.index.update(key, aabb),
            IndexOp::Insert(aabb) => {
                let key = self.index.insert(aabb, id);
                self.nodes[id.idx()].index_key = Some(key);
            }
            IndexOp::Skip => {}
        }

        for child in child_ids {
            self.update_world_recursive(child, world_tf, dirty, updated);
        }
    }
}
