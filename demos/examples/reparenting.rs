// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reparenting.
//!
//! Move a live subtree between parents and push a node along a world axis,
//! showing that handles and payloads survive both.
//!
//! Run:
//! - `cargo run -p arbor_examples --example reparenting`

use arbor_scene::Scene;
use glam::Vec3;

fn main() {
    let mut scene = Scene::new(0_u32);
    let root = scene.root();
    let left = scene.append(root, 1);
    let right = scene.append(root, 2);
    let cargo = scene.append(left, 3);
    let crate_a = scene.append(cargo, 4);
    let crate_b = scene.append(cargo, 5);

    scene.get_mut(left).unwrap().transform.translate = Vec3::new(-5.0, 0.0, 0.0);
    scene.get_mut(right).unwrap().transform.rotate = Vec3::new(0.0, 0.0, 90.0);

    println!("before: {scene:?}");
    let before = scene.fold(root, 0, |_, node, acc| acc + node.data);

    // Hand the cargo subtree from the left arm to the right one. No node is
    // rebuilt; every handle stays valid.
    scene.reparent(cargo, right);
    assert_eq!(scene.get(cargo).unwrap().parent(), Some(right));
    assert_eq!(scene.get(cargo).unwrap().children(), &[crate_a, crate_b]);
    assert_eq!(scene.node_count(), 6);

    let after = scene.fold(root, 0, |_, node, acc| acc + node.data);
    assert_eq!(before, after, "a move must not create or drop payloads");
    println!("after:  {scene:?}");

    // Push the cargo one unit along world x. Its parent is rotated, so the
    // local translate ends up on a different axis.
    let origin_before = (scene.local_to_world(cargo) * Vec3::ZERO.extend(1.0)).truncate();
    scene.translate_world(cargo, Vec3::new(1.0, 0.0, 0.0));
    let origin_after = (scene.local_to_world(cargo) * Vec3::ZERO.extend(1.0)).truncate();

    println!("cargo moved from {origin_before} to {origin_after}");
    assert!((origin_after - origin_before).abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-5));
    println!(
        "cargo local translate after the push: {}",
        scene.get(cargo).unwrap().transform.translate
    );
}
