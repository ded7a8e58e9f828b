// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Scene: a Glam-native hierarchical scene tree.
//!
//! Arbor Scene is a reusable building block for renderers, simulations, and editors.
//!
//! - Represents a tree of nodes, each carrying a local translate/rotate/scale transform and a
//!   caller-defined payload.
//! - Composes local transforms into world-space matrices and back, preserving a fixed
//!   Z-then-Y-then-X Euler rotation order in degrees.
//! - Supports moving a live subtree between parents without invalidating any handle into it.
//! - Drives computation through two traversal protocols: a post-order [`Scene::fold`] and a
//!   pre-order [`Scene::visit`] with per-node pruning.
//!
//! It aims for a stable, minimal API: the tree imposes no rendering, culling, serialization, or
//! scripting policy, so it can sit under whatever system drives it.
//!
//! ## Not an engine
//!
//! This crate does not render, cull, schedule, or persist anything. Upstream code owns the payload
//! type, decides when transforms change, and pulls matrices or runs traversals when it needs them.
//! Think of this as the ownership and coordinate backbone of a scene, not the scene system itself.
//!
//! ## API overview
//!
//! - [`Scene`]: container owning one tree of nodes, addressed by handle.
//! - [`Node`]: a tree vertex; public `transform` and `data` fields, structural queries.
//! - [`NodeId`]: generational handle of a node.
//! - [`Transform`]: the local translate/rotate/scale triple and its matrix.
//!
//! Key operations:
//! - [`Scene::append`](Scene::append) → [`NodeId`]
//! - [`Scene::reparent`](Scene::reparent) / [`Scene::remove`](Scene::remove)
//! - [`Scene::local_to_world`](Scene::local_to_world) / [`Scene::world_to_local`](Scene::world_to_local)
//! - [`Scene::fold`](Scene::fold) and [`Scene::visit`](Scene::visit)
//!
//! ## Contract violations
//!
//! Structural misuse is a bug in the caller, not a runtime condition: appending a node onto
//! itself, moving a node into its own subtree, removing or moving the root, mutating the root
//! transform, or passing a dangling handle to a panicking operation. These panic; there is no
//! recoverable error path.
//!
//! ### Minimal usage
//!
//! ```
//! use arbor_scene::Scene;
//!
//! // Build a tiny tree with integer payloads.
//! let mut scene = Scene::new(0_u32);
//! let root = scene.root();
//! let a = scene.append(root, 1);
//! let b = scene.append(a, 2);
//! let _c = scene.append(a, 3);
//!
//! // Pre-order visit over the root's descendants, in child order.
//! let mut seen = Vec::new();
//! scene.visit(|_, node| {
//!     seen.push(node.data);
//!     true
//! });
//! assert_eq!(seen, vec![1, 2, 3]);
//!
//! // Post-order fold: sum every payload in the tree.
//! let sum = scene.fold(root, 0, |_, node, acc| acc + node.data);
//! assert_eq!(sum, 6);
//!
//! // Move `b` (and its subtree) directly under the root; handles stay valid.
//! scene.reparent(b, root);
//! assert_eq!(scene.get(b).unwrap().parent(), Some(root));
//! assert_eq!(scene.node_count(), 4);
//! ```
//!
//! ### World-space transforms
//!
//! ```
//! use arbor_scene::Scene;
//! use glam::Vec3;
//!
//! let mut scene = Scene::new("root");
//! let pivot = scene.append(scene.root(), "pivot");
//! let tip = scene.append(pivot, "tip");
//!
//! // Spin the pivot a quarter turn and hang the tip one unit out on x.
//! scene.get_mut(pivot).unwrap().transform.rotate = Vec3::new(0.0, 0.0, 90.0);
//! scene.get_mut(tip).unwrap().transform.translate = Vec3::new(1.0, 0.0, 0.0);
//!
//! let world = scene.local_to_world(tip);
//! let origin = world * Vec3::ZERO.extend(1.0);
//! assert!(origin.truncate().abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), 1e-5));
//!
//! // And back: a world-space point expressed in the tip's local space.
//! let local = scene.world_to_local_point(tip, Vec3::new(0.0, 1.0, 0.0), 1.0);
//! assert!(local.abs_diff_eq(Vec3::ZERO, 1e-5));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod scene;
mod types;

pub use scene::{Node, Scene};
pub use types::{NodeId, Transform};
