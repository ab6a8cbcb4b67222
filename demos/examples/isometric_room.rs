// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless walk through the isometric room.
//!
//! Builds the stock room, replays a scripted pointer path at 60 fps, and
//! prints every hover transition along with the hovered entity's transform.
//! Pass a TOML file to override the interaction config.
//!
//! Run:
//! - `cargo run -p diorama_demos --example isometric_room`
//! - `RUST_LOG=diorama=debug cargo run -p diorama_demos --example isometric_room -- room.toml`

use diorama::{InteractionConfig, Room, Surface};
use diorama_responder::hover::HoverEvent;
use diorama_scene::{Camera, LocalNode, NodeId, Scene, Transform};
use glam::Vec3;
use kurbo::{Point, Rect, Size};
use tracing_subscriber::EnvFilter;

/// A surface that only logs what it would draw.
#[derive(Debug)]
struct LogSurface {
    viewport: Rect,
    frames: u64,
}

impl Surface for LogSurface {
    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn resize(&mut self, size: Size) {
        self.viewport = Rect::from_origin_size(Point::ORIGIN, size);
        tracing::info!(width = size.width, height = size.height, "surface resized");
    }

    fn render(&mut self, scene: &Scene, _camera: &Camera) {
        self.frames += 1;
        tracing::trace!(frame = self.frames, nodes = scene.len(), "render");
    }
}

fn stock_room() -> Scene {
    let mut scene = Scene::new();
    let at = |x, y, z| Transform::from_position(Vec3::new(x, y, z));
    let _floor = scene.insert(None, LocalNode::mesh("Floor", at(0.0, -1.0, 0.0), Vec3::new(20.0, 0.5, 20.0)));
    let group = scene.insert(None, LocalNode::group("Interactives_Parent", Transform::IDENTITY));

    let _cup = scene.insert(Some(group), LocalNode::mesh("Cup", at(-3.0, 7.0, 0.0), Vec3::splat(0.8)));
    let tree = scene.insert(Some(group), LocalNode::mesh("Tree_fuzz", at(7.0, 7.0, -10.5), Vec3::ONE));
    let _leaves = scene.insert(
        Some(tree),
        LocalNode::mesh("Tree_fuzz_leaves", at(0.0, 3.0, 0.0), Vec3::splat(1.5)),
    );
    let wall = scene.insert(Some(group), LocalNode::mesh("Wall_shelf", at(-13.0, 7.0, 10.5), Vec3::new(3.0, 0.3, 1.0)));
    for (i, pic) in ["PicClover", "PicCats"].into_iter().enumerate() {
        let frame = scene.insert(
            Some(wall),
            LocalNode::mesh(format!("Frame_{i}"), at(i as f32 * 3.0 - 1.5, 3.0, 0.0), Vec3::new(1.0, 1.0, 0.2)),
        );
        let _ = scene.insert(Some(frame), LocalNode::mesh(pic, at(0.0, 0.0, 0.3), Vec3::new(0.8, 0.8, 0.05)));
    }
    let _cat_tree = scene.insert(Some(group), LocalNode::mesh("Cat_tree", at(-3.0, -3.0, 5.5), Vec3::new(1.0, 3.0, 1.0)));
    scene
}

fn client_of(room: &Room<LogSurface>, node: NodeId) -> Point {
    let world = room
        .scene()
        .world_transform(node)
        .map_or(Vec3::ZERO, |tf| tf.translation.into());
    let ndc = room.camera().project(world);
    let vp = room.surface().viewport();
    Point::new(
        vp.x0 + (f64::from(ndc.x) + 1.0) * 0.5 * vp.width(),
        vp.y0 + (1.0 - f64::from(ndc.y)) * 0.5 * vp.height(),
    )
}

fn describe(room: &Room<LogSurface>, event: HoverEvent<NodeId>) -> String {
    let (verb, id) = match event {
        HoverEvent::Enter(id) => ("enter", id),
        HoverEvent::Leave(id) => ("leave", id),
    };
    let name = room.scene().name(id).unwrap_or("<unnamed>");
    let tf = room.scene().transform(id).unwrap_or_default();
    format!("{verb:5} {name:12} scale={:.3} rot_z={:.3}", tf.scale.x, tf.rotation.z)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .try_init()
        .ok();

    let config = match std::env::args().nth(1) {
        Some(path) => InteractionConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => InteractionConfig::default(),
    };

    let surface = LogSurface {
        viewport: Rect::new(0.0, 0.0, 1280.0, 720.0),
        frames: 0,
    };
    let mut room = Room::setup(stock_room(), Some(surface), &config)?;

    let find = |name: &str| room.scene().find_by_name(name);
    let path: Vec<NodeId> = ["Cup", "Tree_fuzz_leaves", "PicClover", "Cat_tree", "Cup"]
        .into_iter()
        .filter_map(find)
        .collect();

    // 60 fps; the pointer rests on each waypoint for half a second.
    let mut now = 0_u64;
    for (i, &node) in path.iter().enumerate() {
        let target = client_of(&room, node);
        for frame in 0..30_u64 {
            now += 16;
            // A little jitter while arriving; debouncing folds it into one resolution.
            if frame < 3 {
                let jitter = Point::new(target.x + frame as f64, target.y);
                for event in room.on_pointer_move(jitter, now) {
                    println!("t={now:5}ms  {}", describe(&room, event));
                }
            }
            for event in room.frame(now) {
                println!("t={now:5}ms  {}", describe(&room, event));
            }
        }
        if i == 2 {
            let _ = room.on_resize(Size::new(1024.0, 768.0), now);
        }
    }

    if let Some(event) = room.clear_hover() {
        println!("t={now:5}ms  {}", describe(&room, event));
    }
    let (_, surface) = room.into_parts();
    println!("rendered {} frames", surface.frames);
    Ok(())
}
