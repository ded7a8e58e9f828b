// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_scene::{NodeId, Scene};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::Vec3;

/// One root with `n` direct children, each carrying a small payload.
fn build_wide(n: u32) -> Scene<u32> {
    let mut scene = Scene::new(0_u32);
    let root = scene.root();
    for v in 0..n {
        scene.append(root, v);
    }
    scene
}

/// A single chain of `depth` nodes, each translated off its parent.
fn build_deep(depth: u32) -> (Scene<u32>, NodeId) {
    let mut scene = Scene::new(0_u32);
    let mut tip = scene.root();
    for v in 0..depth {
        tip = scene.append(tip, v);
        scene.get_mut(tip).unwrap().transform.translate = Vec3::new(1.0, 0.5, 0.0);
    }
    (scene, tip)
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");
    group.throughput(Throughput::Elements(1024));
    group.bench_function("wide_1024", |b| b.iter(|| build_wide(black_box(1024))));
    group.throughput(Throughput::Elements(256));
    group.bench_function("deep_256", |b| b.iter(|| build_deep(black_box(256))));
    group.finish();
}

fn bench_fold(c: &mut Criterion) {
    let mut scene = build_wide(1024);
    let root = scene.root();
    c.bench_function("fold_sum_1024", |b| {
        b.iter(|| scene.fold(root, 0_u64, |_, node, acc| acc + u64::from(node.data)));
    });
}

fn bench_visit(c: &mut Criterion) {
    let mut scene = build_wide(1024);
    c.bench_function("visit_count_1024", |b| {
        b.iter(|| {
            let mut count = 0_u64;
            scene.visit(|_, _| {
                count += 1;
                true
            });
            black_box(count)
        });
    });
}

fn bench_local_to_world(c: &mut Criterion) {
    let (scene, tip) = build_deep(256);
    c.bench_function("local_to_world_depth_256", |b| {
        b.iter(|| black_box(scene.local_to_world(tip)));
    });
}

fn bench_reparent(c: &mut Criterion) {
    c.bench_function("reparent_shuffle_256", |b| {
        b.iter_batched(
            || {
                let scene = build_wide(256);
                let children = scene.get(scene.root()).unwrap().children().to_vec();
                (scene, children)
            },
            |(mut scene, children)| {
                // Hang every even child under its odd neighbor and back out.
                for pair in children.chunks_exact(2) {
                    scene.reparent(pair[0], pair[1]);
                }
                let root = scene.root();
                for pair in children.chunks_exact(2) {
                    scene.reparent(pair[0], root);
                }
                scene
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_append,
    bench_fold,
    bench_visit,
    bench_local_to_world,
    bench_reparent
);
criterion_main!(benches);
