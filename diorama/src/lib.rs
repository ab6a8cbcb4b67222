// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diorama: hover interaction for an isometric 3D room.
//!
//! This crate wires the workspace together into a [`Room`]:
//!
//! - [`diorama_input`] debounces pointer moves and resizes and maps the pointer to NDC.
//! - [`diorama_scene`] casts a camera ray through the scene.
//! - [`diorama_responder`] resolves the nearest hit to one canonical entity and keeps
//!   hover ownership: at most one entity is active, and the previous one is always
//!   restored to rest before the next one starts animating.
//! - [`diorama_tween`] plays the hover animation: a scale pulse, or a swing for the
//!   entities configured to swing.
//!
//! Rendering, asset loading, and the event loop belong to the host. The host builds a
//! [`Scene`](diorama_scene::Scene), supplies a [`Surface`], forwards device events with
//! explicit millisecond timestamps, and calls [`Room::frame`] once per frame.
//!
//! # Example
//!
//! ```rust
//! use diorama::{InteractionConfig, RecordingSurface, Room};
//! use diorama_responder::hover::HoverEvent;
//! use diorama_scene::{LocalNode, Scene, Transform};
//! use glam::Vec3;
//! use kurbo::{Point, Size};
//!
//! let mut scene = Scene::new();
//! let group = scene.insert(None, LocalNode::group("Interactives_Parent", Transform::IDENTITY));
//! let cup = scene.insert(
//!     Some(group),
//!     LocalNode::mesh("Cup", Transform::from_position(Vec3::new(-3.0, 7.0, 0.0)), Vec3::ONE),
//! );
//!
//! let surface = RecordingSurface::with_size(Size::new(800.0, 800.0));
//! let mut room = Room::setup(scene, Some(surface), &InteractionConfig::default()).unwrap();
//!
//! // Pointer moves are debounced: nothing happens until the window passes.
//! assert!(room.on_pointer_move(Point::new(400.0, 400.0), 0).is_empty());
//! assert_eq!(room.frame(20).as_slice(), &[HoverEvent::Enter(cup)]);
//!
//! // The cup pulses, then comes back to rest.
//! room.frame(320);
//! let peak = room.scene().transform(cup).unwrap().scale;
//! assert!(peak.x > 1.1);
//! room.frame(1000);
//! assert_eq!(room.scene().transform(cup).unwrap().scale, Vec3::ONE);
//! ```

pub mod config;
pub mod error;
pub mod programs;
pub mod room;
pub mod surface;

pub use config::InteractionConfig;
pub use error::{ConfigError, SetupError};
pub use room::Room;
pub use surface::{RecordingSurface, Surface};
