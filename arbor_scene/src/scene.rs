// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: structure, mutation, transforms, traversal.

use alloc::vec::Vec;
use glam::{Mat4, Vec3};

use crate::types::{NodeId, Transform};

/// A vertex of the scene tree.
///
/// Structural links (parent, children) are managed exclusively by [`Scene`];
/// the transform and the payload are plain public fields.
#[derive(Clone, Debug)]
pub struct Node<D> {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Local transform relative to the parent.
    pub transform: Transform,
    /// Caller-defined payload, opaque to the tree engine.
    pub data: D,
}

impl<D> Node<D> {
    fn new(generation: u32, data: D) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            transform: Transform::IDENTITY,
            data,
        }
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether this node is the scene root.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether this node is not the scene root.
    pub fn not_root(&self) -> bool {
        self.parent.is_some()
    }

    /// Handle of the parent node, or `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Handles of the children, in traversal order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Hierarchical container owning a single tree of [`Node`]s.
///
/// Nodes live in generational slots; [`NodeId`]s address them without
/// borrowing. The root node is created together with the scene and is alive
/// for the scene's whole lifetime.
pub struct Scene<D> {
    nodes: Vec<Option<Node<D>>>, // slots
    generations: Vec<u32>,       // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: NodeId,
}

impl<D> core::fmt::Debug for Scene<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Scene")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl<D: Default> Default for Scene<D> {
    fn default() -> Self {
        Self::new(D::default())
    }
}

impl<D> Scene<D> {
    /// Create a scene owning a fresh root node built from `data`.
    ///
    /// The root keeps an identity transform for its whole lifetime; mutating
    /// it is a contract violation.
    pub fn new(data: D) -> Self {
        let mut scene = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 1),
        };
        scene.root = scene.alloc(data);
        scene
    }

    /// Handle of the root node. The root is always alive.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is live if its slot exists and its generation matches the
    /// current generation stored in that slot.
    /// See [`NodeId`] docs for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Checked access to a node. Returns `None` for stale handles.
    pub fn get(&self, id: NodeId) -> Option<&Node<D>> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    /// Checked mutable access to a node. Returns `None` for stale handles.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<D>> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    /// Number of live nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Construct a new node from `data` and append it at the end of
    /// `parent`'s child list.
    ///
    /// The new node starts with an identity transform. The returned handle
    /// stays valid until the node (or an ancestor) is removed.
    pub fn append(&mut self, parent: NodeId, data: D) -> NodeId {
        assert!(self.is_alive(parent), "dangling NodeId");
        let id = self.alloc(data);
        self.link_parent(id, parent);
        id
    }

    /// Move a live node, with its entire subtree, under `new_parent`.
    ///
    /// The node keeps its slot, payload, local transform, and children; every
    /// handle into the moved subtree stays valid. It is detached from its old
    /// parent's child list and appended at the end of `new_parent`'s.
    ///
    /// Panics if `node` and `new_parent` are the same node, if `new_parent`
    /// lies inside `node`'s subtree (the move would create a cycle; the root
    /// can therefore never be moved), or if either handle is dangling.
    pub fn reparent(&mut self, node: NodeId, new_parent: NodeId) {
        assert!(self.is_alive(node), "dangling NodeId");
        assert!(self.is_alive(new_parent), "dangling NodeId");
        assert!(node != new_parent, "a node cannot become its own parent");

        // Walk up from the destination; any match means the destination is
        // inside `node`'s subtree. The root is on every ancestor chain, so a
        // root move always trips this.
        let mut ancestor = self.node(new_parent).parent;
        while let Some(a) = ancestor {
            assert!(a != node, "cannot move a node into its own subtree");
            ancestor = self.node(a).parent;
        }

        let old_parent = self.node(node).parent.expect("the root has no parent");
        self.unlink_parent(node, old_parent);
        self.link_parent(node, new_parent);
    }

    /// Detach `node` from its parent and free its whole subtree depth-first.
    ///
    /// Every handle into the subtree becomes stale. Calling this with an
    /// already-stale handle is a no-op. Panics when `node` is the root.
    pub fn remove(&mut self, node: NodeId) {
        if !self.is_alive(node) {
            return;
        }
        assert!(node != self.root, "the root cannot be removed");
        let parent = self
            .node(node)
            .parent
            .expect("non-root nodes are always attached");
        self.unlink_parent(node, parent);
        self.free_subtree(node);
    }

    /// World-space matrix of `node`: its local matrix composed with every
    /// ancestor's, root-down.
    ///
    /// For the root this is the identity matrix, kept so by the identity-root
    /// invariant rather than by special-casing.
    pub fn local_to_world(&self, id: NodeId) -> Mat4 {
        assert!(self.is_alive(id), "dangling NodeId");
        self.local_to_world_inner(id)
    }

    fn local_to_world_inner(&self, id: NodeId) -> Mat4 {
        let node = self.node(id);
        let local = node.transform.local_matrix();
        match node.parent {
            Some(parent) => self.local_to_world_inner(parent) * local,
            None => {
                debug_assert!(
                    node.transform.is_identity(),
                    "the root transform must stay identity"
                );
                local
            }
        }
    }

    /// Inverse of [`Scene::local_to_world`].
    pub fn world_to_local(&self, id: NodeId) -> Mat4 {
        self.local_to_world(id).inverse()
    }

    /// Transform a homogeneous point (`w = 1`) or direction (`w = 0`) from
    /// world space into `node`'s local space.
    pub fn world_to_local_point(&self, id: NodeId, point: Vec3, w: f32) -> Vec3 {
        (self.world_to_local(id) * point.extend(w)).truncate()
    }

    /// Displace `node` by a world-space direction.
    ///
    /// The direction is mapped into local space with weight zero and
    /// accumulated into the translate component, so the resulting world-space
    /// displacement tracks the given direction rather than the node's axes.
    pub fn translate_world(&mut self, id: NodeId, direction: Vec3) {
        let delta = self.world_to_local_point(id, direction, 0.0);
        self.node_mut(id).transform.translate += delta;
    }

    /// Post-order reduction over the subtree rooted at `id`.
    ///
    /// Children fold left-to-right, each child's result threading into the
    /// next sibling as the accumulator, starting from `leaf`; the node itself
    /// merges last. A childless node merges `leaf` directly.
    ///
    /// The tree shape cannot change while the fold runs; the exclusive borrow
    /// covers the whole traversal.
    pub fn fold<R>(
        &mut self,
        id: NodeId,
        leaf: R,
        mut merge: impl FnMut(NodeId, &mut Node<D>, R) -> R,
    ) -> R {
        assert!(self.is_alive(id), "dangling NodeId");
        self.fold_inner(id, leaf, &mut merge)
    }

    fn fold_inner<R, F>(&mut self, id: NodeId, leaf: R, merge: &mut F) -> R
    where
        F: FnMut(NodeId, &mut Node<D>, R) -> R,
    {
        let children = self.node(id).children.clone();
        if children.is_empty() {
            return merge(id, self.node_mut(id), leaf);
        }
        let mut acc = leaf;
        for &child in &children {
            acc = self.fold_inner(child, acc, merge);
            debug_assert_eq!(
                self.node(id).children.len(),
                children.len(),
                "tree shape changed during a fold"
            );
        }
        merge(id, self.node_mut(id), acc)
    }

    /// Pre-order walk over all descendants of the root, in child-list order.
    ///
    /// The root itself is not passed to the callback. Return `true` to
    /// descend into a node's children, `false` to prune that subtree;
    /// siblings of a pruned node are still visited.
    pub fn visit(&mut self, callback: impl FnMut(NodeId, &mut Node<D>) -> bool) {
        self.visit_from(self.root, callback);
    }

    /// Pre-order walk over all descendants of `id` (`id` itself excluded).
    ///
    /// Same protocol as [`Scene::visit`], which is this walk started at the
    /// root.
    pub fn visit_from(&mut self, id: NodeId, mut callback: impl FnMut(NodeId, &mut Node<D>) -> bool) {
        assert!(self.is_alive(id), "dangling NodeId");
        let children = self.node(id).children.clone();
        for child in children {
            self.visit_recursive(child, &mut callback);
        }
    }

    fn visit_recursive<F>(&mut self, id: NodeId, callback: &mut F)
    where
        F: FnMut(NodeId, &mut Node<D>) -> bool,
    {
        if !callback(id, self.node_mut(id)) {
            return;
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.visit_recursive(child, callback);
        }
    }

    // --- internals ---

    /// Access a node; panics if the slot is empty.
    fn node(&self, id: NodeId) -> &Node<D> {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if the slot is empty.
    fn node_mut(&mut self, id: NodeId) -> &mut Node<D> {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn alloc(&mut self, data: D) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, data));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, data)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = self.node(id).children.clone();
        for child in children {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}
