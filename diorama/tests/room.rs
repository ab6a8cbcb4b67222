// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end hover behavior of a [`Room`] driven through client-space pointer events.

use diorama::config::InteractionConfig;
use diorama::error::{ConfigError, SetupError};
use diorama::{RecordingSurface, Room, Surface};
use diorama_input::debounce::{DebounceEdge, DebounceSettings};
use diorama_responder::hover::HoverEvent;
use diorama_scene::{LocalNode, NodeId, Scene, Transform};
use glam::{Vec2, Vec3};
use kurbo::{Point, Size};

const SIDE: f64 = 800.0;
const EYE: Vec3 = Vec3::new(60.0, 40.0, 60.0);
const CUP: Vec3 = Vec3::new(-3.0, 7.0, 0.0);
const TREE: Vec3 = Vec3::new(7.0, 7.0, -10.5);
const SHELF: Vec3 = Vec3::new(-13.0, 7.0, 10.5);
const LAMP: Vec3 = Vec3::new(-3.0, -3.0, 5.5);

// Scene layout (entities spread across the view so none occludes another):
//   Window                      (root, no interaction, between eye and Cup)
//   Interactives_Parent
//   ├── Cup
//   ├── Tree_fuzz
//   │     └── Tree_fuzz_leaves
//   ├── Shelf
//   │     └── Frame
//   │           └── PicClover
//   ├── Lamp
//   └── Cat_tree                (between eye and Lamp)
struct Fixture {
    scene: Scene,
    cup: NodeId,
    tree: NodeId,
    leaves: NodeId,
    shelf: NodeId,
    frame: NodeId,
    pic: NodeId,
    lamp: NodeId,
    cat_tree: NodeId,
}

fn fixture() -> Fixture {
    let mut scene = Scene::new();
    let _window = scene.insert(
        None,
        LocalNode::mesh("Window", Transform::from_position((EYE + CUP) * 0.5), Vec3::splat(2.0)),
    );
    let group = scene.insert(None, LocalNode::group("Interactives_Parent", Transform::IDENTITY));
    let mesh = |name: &str, at: Vec3, half: Vec3| LocalNode::mesh(name, Transform::from_position(at), half);

    let cup = scene.insert(Some(group), mesh("Cup", CUP, Vec3::ONE));
    let tree = scene.insert(Some(group), mesh("Tree_fuzz", TREE, Vec3::ONE));
    let leaves = scene.insert(
        Some(tree),
        mesh("Tree_fuzz_leaves", Vec3::new(0.0, 3.0, 0.0), Vec3::splat(1.5)),
    );
    let shelf = scene.insert(Some(group), mesh("Shelf", SHELF, Vec3::new(2.0, 0.5, 1.0)));
    let frame = scene.insert(
        Some(shelf),
        mesh("Frame", Vec3::new(0.0, 3.0, 0.0), Vec3::new(1.0, 1.0, 0.2)),
    );
    let pic = scene.insert(
        Some(frame),
        mesh("PicClover", Vec3::new(0.0, 0.0, 0.3), Vec3::new(0.8, 0.8, 0.05)),
    );
    let lamp = scene.insert(Some(group), mesh("Lamp", LAMP, Vec3::ONE));
    let cat_tree = scene.insert(Some(group), mesh("Cat_tree", (EYE + LAMP) * 0.5, Vec3::ONE));
    Fixture {
        scene,
        cup,
        tree,
        leaves,
        shelf,
        frame,
        pic,
        lamp,
        cat_tree,
    }
}

fn instant() -> InteractionConfig {
    InteractionConfig {
        pointer_debounce: DebounceSettings {
            window_ms: 0,
            edge: DebounceEdge::Trailing,
        },
        resize_debounce: DebounceSettings {
            window_ms: 0,
            edge: DebounceEdge::Trailing,
        },
        ..InteractionConfig::default()
    }
}

fn room_with(f: &mut Fixture, config: &InteractionConfig) -> Room<RecordingSurface> {
    let surface = RecordingSurface::with_size(Size::new(SIDE, SIDE));
    Room::setup(core::mem::take(&mut f.scene), Some(surface), config).unwrap()
}

/// Client-space position of the world point `node` is drawn at.
fn client_of(room: &Room<RecordingSurface>, node: NodeId) -> Point {
    let world = room.scene().world_transform(node).unwrap().translation;
    let ndc = room.camera().project(world.into());
    let vp = room.surface().viewport();
    Point::new(
        vp.x0 + (f64::from(ndc.x) + 1.0) * 0.5 * vp.width(),
        vp.y0 + (1.0 - f64::from(ndc.y)) * 0.5 * vp.height(),
    )
}

fn ndc_of(room: &Room<RecordingSurface>, node: NodeId) -> Vec2 {
    let world = room.scene().world_transform(node).unwrap().translation;
    room.camera().project(world.into()).truncate()
}

const NOWHERE: Point = Point::new(5.0, 5.0);

fn scale_of(room: &Room<RecordingSurface>, node: NodeId) -> Vec3 {
    room.scene().transform(node).unwrap().scale
}

#[test]
fn cup_at_center_pulses_and_returns_to_rest() {
    let mut f = fixture();
    let mut room = room_with(&mut f, &instant());
    assert_eq!(room.resolve_at(Vec2::ZERO), Some(f.cup));

    let center = Point::new(SIDE / 2.0, SIDE / 2.0);
    assert_eq!(room.on_pointer_move(center, 0).as_slice(), &[HoverEvent::Enter(f.cup)]);
    room.frame(0);
    room.frame(300);
    let peak = scale_of(&room, f.cup);
    assert!((peak - Vec3::splat(1.2)).length() < 1e-3, "peak {peak}");

    room.frame(700);
    assert_eq!(scale_of(&room, f.cup), Vec3::ONE);
    assert!(!room.is_animating(f.cup));
    // Completion does not end the hover.
    assert_eq!(room.active(), Some(f.cup));
    assert!(room.surface().frames >= 3);
}

#[test]
fn rehovering_mid_flight_does_not_restart() {
    let mut f = fixture();
    let mut room = room_with(&mut f, &instant());
    let at = client_of(&room, f.cup);
    let _ = room.on_pointer_move(at, 0);
    room.frame(0);
    room.frame(150);
    let handle = room.hover().handle().copied();
    assert!(room.on_pointer_move(at, 150).is_empty());
    assert_eq!(room.hover().handle().copied(), handle);
    room.frame(300);
    // A restart at 150 would only be halfway up the first leg here.
    assert!((scale_of(&room, f.cup) - Vec3::splat(1.2)).length() < 1e-3);
}

#[test]
fn tree_child_swings_parent_then_nothing_resets() {
    let mut f = fixture();
    let mut room = room_with(&mut f, &instant());
    let at = client_of(&room, f.leaves);
    assert_eq!(room.on_pointer_move(at, 0).as_slice(), &[HoverEvent::Enter(f.tree)]);
    room.frame(0);
    room.frame(100);
    let tf = room.scene().transform(f.tree).unwrap();
    assert!(tf.rotation.z > 0.0, "tree should swing about z");
    assert_eq!(tf.rotation.x, 0.0);
    assert_eq!(tf.scale, Vec3::ONE, "swinging entities do not pulse");
    assert_eq!(room.scene().transform(f.leaves), Some(Transform::from_position(Vec3::new(0.0, 3.0, 0.0))));

    assert_eq!(room.on_pointer_move(NOWHERE, 110).as_slice(), &[HoverEvent::Leave(f.tree)]);
    assert!(room.hover().is_idle());
    assert!(!room.is_animating(f.tree));
    assert_eq!(room.scene().transform(f.tree), Some(Transform::from_position(TREE)));
    // Nothing left to contribute on later frames.
    room.frame(200);
    assert_eq!(room.scene().transform(f.tree), Some(Transform::from_position(TREE)));
}

#[test]
fn aaba_gives_three_transitions_each_resetting_the_previous() {
    let mut f = fixture();
    let mut room = room_with(&mut f, &instant());
    let a = client_of(&room, f.cup);
    let b = client_of(&room, f.leaves);
    room.frame(0);

    let mut changes = 0;
    let mut step = |room: &mut Room<RecordingSurface>, p: Point, t: u64| {
        let events = room.on_pointer_move(p, t);
        if events.iter().any(|e| matches!(e, HoverEvent::Enter(_))) {
            changes += 1;
        }
        room.frame(t + 100);
        events
    };

    assert_eq!(step(&mut room, a, 0).as_slice(), &[HoverEvent::Enter(f.cup)]);
    assert!(step(&mut room, a, 100).is_empty());
    assert_ne!(scale_of(&room, f.cup), Vec3::ONE);

    assert_eq!(
        step(&mut room, b, 200).as_slice(),
        &[HoverEvent::Leave(f.cup), HoverEvent::Enter(f.tree)]
    );
    assert_eq!(scale_of(&room, f.cup), Vec3::ONE);
    assert!(!room.is_animating(f.cup));

    assert_eq!(
        step(&mut room, a, 300).as_slice(),
        &[HoverEvent::Leave(f.tree), HoverEvent::Enter(f.cup)]
    );
    assert_eq!(room.scene().transform(f.tree), Some(Transform::from_position(TREE)));
    assert!(!room.is_animating(f.tree));
    assert_eq!(changes, 3);
    assert_eq!(room.active(), Some(f.cup));
}

#[test]
fn consecutive_misses_stay_idle() {
    let mut f = fixture();
    let mut room = room_with(&mut f, &instant());
    assert!(room.on_pointer_move(NOWHERE, 0).is_empty());
    assert!(room.on_pointer_move(Point::new(6.0, 5.0), 10).is_empty());
    assert!(room.hover().is_idle());
    assert!(room.hover().handle().is_none());
}

#[test]
fn non_interactive_geometry_does_not_block() {
    let mut f = fixture();
    let room = room_with(&mut f, &instant());
    // The Window root sits between the eye and the cup.
    assert_eq!(room.resolve_at(ndc_of(&room, f.cup)), Some(f.cup));
}

#[test]
fn excluded_entity_in_front_forces_none() {
    let mut f = fixture();
    let mut room = room_with(&mut f, &instant());
    let lamp = ndc_of(&room, f.lamp);
    assert_eq!(room.resolve_at(lamp), None, "no fall-through to the lamp");

    let _ = room.on_pointer_move(client_of(&room, f.cup), 0);
    assert_eq!(
        room.on_pointer_move(client_of(&room, f.lamp), 10).as_slice(),
        &[HoverEvent::Leave(f.cup)]
    );

    let permissive = InteractionConfig {
        excluded: Vec::new(),
        ..instant()
    };
    let room = room_with(&mut fixture(), &permissive);
    assert_eq!(room.resolve_at(lamp), Some(f.cat_tree));
}

#[test]
fn redirect_is_one_hop_to_the_frame() {
    let mut f = fixture();
    let mut room = room_with(&mut f, &instant());
    assert_eq!(room.resolve_at(ndc_of(&room, f.pic)), Some(f.frame));
    assert_eq!(room.resolve_at(ndc_of(&room, f.shelf)), Some(f.shelf));

    let at = client_of(&room, f.pic);
    assert_eq!(room.on_pointer_move(at, 0).as_slice(), &[HoverEvent::Enter(f.frame)]);
    room.frame(0);
    room.frame(200);
    assert_ne!(scale_of(&room, f.frame), Vec3::ONE);
    assert_eq!(scale_of(&room, f.shelf), Vec3::ONE);
    let _ = room.on_pointer_move(NOWHERE, 210);
    assert_eq!(scale_of(&room, f.frame), Vec3::ONE);
}

#[test]
fn redirect_does_not_chain_when_the_frame_also_redirects() {
    let mut f = fixture();
    let config = InteractionConfig {
        redirect_to_parent: vec!["PicClover".to_owned(), "Frame".to_owned()],
        ..instant()
    };
    let mut room = room_with(&mut f, &config);
    assert_eq!(room.resolve_at(ndc_of(&room, f.pic)), Some(f.frame));
    assert_eq!(
        room.on_pointer_move(client_of(&room, f.pic), 0).as_slice(),
        &[HoverEvent::Enter(f.frame)]
    );
    assert_ne!(room.active(), Some(f.shelf));
}

#[test]
fn hover_after_idle_stretch_plays_from_its_own_start() {
    let mut f = fixture();
    let mut room = room_with(&mut f, &instant());
    room.frame(0);
    assert_eq!(
        room.on_pointer_move(client_of(&room, f.cup), 1000).as_slice(),
        &[HoverEvent::Enter(f.cup)]
    );
    room.frame(1016);
    let early = scale_of(&room, f.cup);
    assert!(early.x < 1.1, "16ms in, still near rest: {early}");
    assert!(room.is_animating(f.cup));
    room.frame(1300);
    assert!((scale_of(&room, f.cup) - Vec3::splat(1.2)).length() < 1e-3);
}

#[test]
fn sparse_frames_start_the_pulse_on_delivery() {
    let mut f = fixture();
    let mut room = room_with(&mut f, &InteractionConfig::default());
    assert!(room.on_pointer_move(client_of(&room, f.cup), 0).is_empty());
    // The host only wakes long after the debounce deadline.
    assert_eq!(room.frame(500).as_slice(), &[HoverEvent::Enter(f.cup)]);
    assert!(room.is_animating(f.cup));
    room.frame(516);
    assert!(scale_of(&room, f.cup).x < 1.1);
}

#[test]
fn pointer_off_the_viewport_releases_hover() {
    let mut f = fixture();
    let mut room = room_with(&mut f, &instant());
    let _ = room.on_pointer_move(client_of(&room, f.cup), 0);
    assert_eq!(
        room.on_pointer_move(Point::new(-50.0, SIDE / 2.0), 10).as_slice(),
        &[HoverEvent::Leave(f.cup)]
    );
    assert!(room.on_pointer_move(Point::new(SIDE + 1.0, SIDE + 1.0), 20).is_empty());
    assert!(room.hover().is_idle());
    assert_eq!(scale_of(&room, f.cup), Vec3::ONE);
}

#[test]
fn burst_resolves_once_with_latest_position() {
    let mut f = fixture();
    let mut room = room_with(&mut f, &InteractionConfig::default());
    assert!(room.on_pointer_move(client_of(&room, f.leaves), 0).is_empty());
    assert!(room.on_pointer_move(client_of(&room, f.cup), 5).is_empty());
    assert_eq!(room.next_deadline(), Some(25));
    assert!(room.frame(24).is_empty());
    assert_eq!(room.frame(25).as_slice(), &[HoverEvent::Enter(f.cup)]);
    assert_eq!(room.rest_transform(f.tree), None, "tree was never resolved");
    assert_eq!(room.next_deadline(), None);
}

#[test]
fn leading_edge_pointer_fires_immediately() {
    let mut f = fixture();
    let config = InteractionConfig {
        pointer_debounce: DebounceSettings {
            window_ms: 20,
            edge: DebounceEdge::LeadingAndTrailing,
        },
        ..InteractionConfig::default()
    };
    let mut room = room_with(&mut f, &config);
    assert_eq!(
        room.on_pointer_move(client_of(&room, f.cup), 0).as_slice(),
        &[HoverEvent::Enter(f.cup)]
    );
    assert!(room.on_pointer_move(client_of(&room, f.leaves), 5).is_empty());
    assert_eq!(
        room.frame(25).as_slice(),
        &[HoverEvent::Leave(f.cup), HoverEvent::Enter(f.tree)]
    );
}

#[test]
fn resize_updates_aspect_and_degenerate_viewport_drops_pointer() {
    let mut f = fixture();
    let mut room = room_with(&mut f, &instant());
    let _ = room.on_resize(Size::new(1600.0, 800.0), 0);
    assert_eq!(room.camera().aspect, 2.0);
    assert_eq!(room.surface().resizes, [Size::new(1600.0, 800.0)]);
    // The view center still shows the cup.
    assert_eq!(
        room.on_pointer_move(Point::new(800.0, 400.0), 1).as_slice(),
        &[HoverEvent::Enter(f.cup)]
    );

    let _ = room.on_resize(Size::new(0.0, 0.0), 2);
    assert_eq!(room.camera().aspect, 2.0);
    assert!(room.on_pointer_move(NOWHERE, 3).is_empty());
    assert!(room.on_pointer_move(Point::new(f64::NAN, 1.0), 4).is_empty());
    assert_eq!(room.active(), Some(f.cup));
}

#[test]
fn resize_is_debounced_separately() {
    let mut f = fixture();
    let config = InteractionConfig {
        resize_debounce: DebounceSettings {
            window_ms: 50,
            edge: DebounceEdge::Trailing,
        },
        ..instant()
    };
    let mut room = room_with(&mut f, &config);
    let _ = room.on_resize(Size::new(1000.0, 800.0), 0);
    let _ = room.on_resize(Size::new(1200.0, 800.0), 10);
    assert_eq!(room.camera().aspect, 1.0);
    room.frame(60);
    assert_eq!(room.camera().aspect, 1.5);
    assert_eq!(room.surface().resizes.len(), 1);
}

#[test]
fn clear_hover_keeps_a_waiting_resize() {
    let mut f = fixture();
    let mut room = room_with(&mut f, &InteractionConfig::default());
    assert!(room.on_pointer_move(client_of(&room, f.cup), 0).is_empty());
    assert!(room.on_resize(Size::new(1600.0, 800.0), 0).is_empty());
    assert_eq!(room.clear_hover(), None);

    // The waiting pointer move is dropped; the resize still lands.
    assert!(room.frame(100).is_empty());
    assert_eq!(room.camera().aspect, 2.0);
    assert_eq!(room.surface().resizes, [Size::new(1600.0, 800.0)]);
    assert!(room.hover().is_idle());
}

#[test]
fn empty_group_resolves_nothing() {
    let mut scene = Scene::new();
    let group = scene.insert(None, LocalNode::group("Interactives_Parent", Transform::IDENTITY));
    let _loose = scene.insert(Some(group), LocalNode::group("Empty", Transform::from_position(CUP)));
    let surface = RecordingSurface::with_size(Size::new(SIDE, SIDE));
    let mut room = Room::setup(scene, Some(surface), &instant()).unwrap();
    assert!(room.registry().is_empty());
    assert!(room.on_pointer_move(Point::new(400.0, 400.0), 0).is_empty());
    assert!(room.hover().is_idle());
}

#[test]
fn setup_errors() {
    let err = Room::<RecordingSurface>::setup(fixture().scene, None, &instant()).unwrap_err();
    assert!(matches!(err, SetupError::MissingRenderTarget), "{err}");

    let config = InteractionConfig {
        interactive_group: "Nope".to_owned(),
        ..instant()
    };
    let surface = RecordingSurface::with_size(Size::new(SIDE, SIDE));
    let err = Room::setup(fixture().scene, Some(surface), &config).unwrap_err();
    assert!(matches!(&err, SetupError::MissingInteractiveGroup(name) if name == "Nope"), "{err}");

    let mut config = instant();
    config.pulse.duration = -1.0;
    let surface = RecordingSurface::with_size(Size::new(SIDE, SIDE));
    let err = Room::setup(fixture().scene, Some(surface), &config).unwrap_err();
    assert!(
        matches!(err, SetupError::Config(ConfigError::Invalid { field: "pulse.duration", .. })),
        "{err}"
    );
}

#[test]
fn registry_holds_direct_mesh_children_in_order() {
    let mut f = fixture();
    let room = room_with(&mut f, &instant());
    assert_eq!(
        room.registry().pickables(),
        &[f.cup, f.tree, f.shelf, f.lamp, f.cat_tree]
    );
}

#[test]
fn toml_config_can_make_the_cup_swing() {
    let mut f = fixture();
    let config = InteractionConfig::from_toml_str(
        r#"
        swing = ["Cup"]

        [pointer_debounce]
        window_ms = 0
        "#,
    )
    .unwrap();
    let mut room = room_with(&mut f, &config);
    let _ = room.on_pointer_move(client_of(&room, f.cup), 0);
    room.frame(0);
    room.frame(100);
    let tf = room.scene().transform(f.cup).unwrap();
    assert!(tf.rotation.z > 0.0);
    assert_eq!(tf.scale, Vec3::ONE);
}

#[test]
fn teardown_releases_the_active_entity() {
    let mut f = fixture();
    let mut room = room_with(&mut f, &instant());
    let _ = room.on_pointer_move(client_of(&room, f.cup), 0);
    room.frame(0);
    room.frame(150);
    let (scene, surface) = room.into_parts();
    assert_eq!(scene.transform(f.cup), Some(Transform::from_position(CUP)));
    assert_eq!(surface.frames, 2);
}
