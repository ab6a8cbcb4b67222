// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use diorama_index::{Aabb3D, Index};
use diorama_responder::adapters::scene::{hits_for_ray, resolve_ray};
use diorama_responder::registry::{EntityRegistry, RegistryBuilder};
use diorama_responder::resolver::Resolver;
use diorama_scene::{Camera, LocalNode, NodeId, QueryFilter, Ray3, Scene, Transform};
use glam::{Vec2, Vec3};

/// An `n` x `n` grid of unit boxes on the floor, each with a small child box on top.
fn gen_room(n: usize) -> (Scene, EntityRegistry<NodeId>) {
    let mut scene = Scene::new();
    let group = scene.insert(None, LocalNode::group("Interactives_Parent", Transform::IDENTITY));
    let mut b = RegistryBuilder::new();
    b.redirect_to_parent("Knob").exclude("Cat_tree");
    for z in 0..n {
        for x in 0..n {
            let at = Vec3::new(x as f32 * 3.0 - n as f32 * 1.5, 0.0, z as f32 * 3.0 - n as f32 * 1.5);
            let name = if (x + z) % 7 == 0 { "Cat_tree" } else { "Box" };
            let id = scene.insert(Some(group), LocalNode::mesh(name, Transform::from_position(at), Vec3::ONE));
            let _ = scene.insert(
                Some(id),
                LocalNode::mesh("Knob", Transform::from_position(Vec3::Y * 1.5), Vec3::splat(0.25)),
            );
            b.register(id);
        }
    }
    let _ = scene.commit();
    (scene, b.build())
}

fn gen_cubes(n: usize) -> Vec<Aabb3D<f32>> {
    let mut out = Vec::with_capacity(n * n * n);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                let min = [x as f32 * 2.0, y as f32 * 2.0, z as f32 * 2.0];
                out.push(Aabb3D::new(min, [min[0] + 1.0, min[1] + 1.0, min[2] + 1.0]));
            }
        }
    }
    out
}

fn rays(camera: &Camera, count: usize) -> Vec<Ray3> {
    (0..count)
        .map(|i| {
            let t = i as f32 / count as f32;
            camera.ray_from_ndc(Vec2::new(t * 1.6 - 0.8, 0.8 - t * 1.6))
        })
        .collect()
}

fn bench_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("index");
    for &n in &[8_usize, 16, 24] {
        let cubes = gen_cubes(n);
        group.throughput(Throughput::Elements((n * n * n) as u64));
        group.bench_function(format!("insert_commit_n{}", n), |b| {
            b.iter_batched(
                Index::<f32, u32>::new,
                |mut idx| {
                    for (i, a) in cubes.iter().enumerate() {
                        let _ = idx.insert(*a, i as u32);
                    }
                    black_box(idx.commit())
                },
                BatchSize::SmallInput,
            );
        });
        let mut idx = Index::<f32, u32>::new();
        for (i, a) in cubes.iter().enumerate() {
            let _ = idx.insert(*a, i as u32);
        }
        let _ = idx.commit();
        let dir = Vec3::new(1.0, 1.0, 1.0).normalize().to_array();
        group.bench_function(format!("query_ray_diagonal_n{}", n), |b| {
            b.iter(|| black_box(idx.query_ray([-1.0, -1.0, -1.0], dir).count()));
        });
    }
    group.finish();
}

fn bench_pick(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick");
    let camera = Camera {
        position: Vec3::new(60.0, 40.0, 60.0),
        target: Vec3::ZERO,
        ..Camera::default()
    };
    let rays = rays(&camera, 64);
    let resolver = Resolver::new();
    for &n in &[4_usize, 16, 32] {
        let (scene, registry) = gen_room(n);
        group.throughput(Throughput::Elements(rays.len() as u64));
        group.bench_function(format!("raycast_n{}", n), |b| {
            b.iter(|| {
                for ray in &rays {
                    black_box(scene.raycast(ray, registry.pickables(), QueryFilter::default()));
                }
            });
        });
        group.bench_function(format!("hits_and_select_n{}", n), |b| {
            b.iter(|| {
                for ray in &rays {
                    let hits = hits_for_ray(&scene, &registry, ray, QueryFilter::default());
                    black_box(resolver.select(&hits).map(|h| h.entity));
                }
            });
        });
        group.bench_function(format!("resolve_ray_n{}", n), |b| {
            b.iter(|| {
                for ray in &rays {
                    black_box(resolve_ray(&resolver, &scene, &registry, ray, QueryFilter::default()));
                }
            });
        });
    }
    group.finish();
}

fn bench_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("commit");
    for &n in &[16_usize, 32] {
        let (_, registry) = gen_room(n);
        let first = registry.pickables()[0];
        let pulsed = Transform {
            scale: Vec3::splat(1.2),
            ..Transform::IDENTITY
        };
        group.bench_function(format!("animate_one_then_commit_n{}", n), |b| {
            b.iter_batched(
                || gen_room(n).0,
                |mut scene| {
                    scene.set_transform(first, pulsed);
                    black_box(scene.commit())
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_index, bench_pick, bench_commit);
criterion_main!(benches);
