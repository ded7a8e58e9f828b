// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene basics.
//!
//! Build a small tree, place nodes, pull world matrices, and run the two traversals.
//!
//! Run:
//! - `cargo run -p arbor_examples --example scene_basics`

use arbor_scene::Scene;
use glam::Vec3;

fn main() {
    // Build a small tree
    let mut scene = Scene::new("ship");
    let root = scene.root();
    let hull = scene.append(root, "hull");
    let turret = scene.append(hull, "turret");
    let barrel = scene.append(turret, "barrel");
    let _antenna = scene.append(hull, "antenna");

    // Place the parts: the turret sits on top of the hull, the barrel pokes
    // out of the turret, and the whole assembly is pushed away from origin.
    scene.get_mut(hull).unwrap().transform.translate = Vec3::new(10.0, 0.0, 0.0);
    scene.get_mut(turret).unwrap().transform.translate = Vec3::new(0.0, 1.0, 0.0);
    scene.get_mut(turret).unwrap().transform.rotate = Vec3::new(0.0, 0.0, 90.0);
    scene.get_mut(barrel).unwrap().transform.translate = Vec3::new(2.0, 0.0, 0.0);

    // Pre-order visit over every part (the root is not visited).
    scene.visit(|_, node| {
        println!("part: {}", node.data);
        true
    });

    // Post-order fold: count the parts below the root.
    let parts = scene.fold(root, 0_u32, |_, node, acc| {
        acc + u32::from(!node.is_root())
    });
    println!("part count: {parts}");
    assert_eq!(parts, 4);

    // The barrel tip in world space: hull offset + turret lift + rotated barrel.
    let world = scene.local_to_world(barrel);
    let tip = (world * Vec3::ZERO.extend(1.0)).truncate();
    println!("barrel origin in world space: {tip}");
    assert!(tip.abs_diff_eq(Vec3::new(10.0, 3.0, 0.0), 1e-5));

    // And back into the barrel's local space.
    let local = scene.world_to_local_point(barrel, tip, 1.0);
    println!("same point in barrel space: {local}");
    assert!(local.abs_diff_eq(Vec3::ZERO, 1e-5));
}
