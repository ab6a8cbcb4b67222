// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diorama Tween: a small tween engine for transform channels.
//!
//! - [`Tween`] interpolates one [`Channel`] (position, rotation, or scale) of a target
//!   between two values, with an [`Ease`], repeat count, and optional yoyo.
//! - [`TweenEngine`] owns running tweens, timestamps each one when it starts, samples
//!   them at explicit millisecond clocks, and returns [`Sample`]s for the caller to
//!   write back into its scene.
//! - Every start returns an [`AnimationHandle`]. Handles are generational, so
//!   cancelling a finished or already-cancelled tween is a harmless no-op.
//!
//! The engine never touches a scene: it only produces values. Callers decide how
//! samples map onto their transforms.
//!
//! # Example
//!
//! ```rust
//! use diorama_tween::{Channel, Ease, Tween, TweenEngine};
//! use glam::Vec3;
//!
//! let mut engine = TweenEngine::new();
//! let pulse = Tween::new("Cup", Channel::Scale, Vec3::ONE, Vec3::splat(1.2), 0.3)
//!     .with_repeat(1)
//!     .with_yoyo(true)
//!     .with_ease(Ease::BackOut { overshoot: 1.7 });
//! let handle = engine.start(pulse, 1000);
//!
//! let mid = engine.advance(1300);
//! assert!((mid[0].value.x - 1.2).abs() < 1e-5);
//!
//! let end = engine.advance(1600);
//! assert!(end[0].finished);
//! assert_eq!(end[0].value, Vec3::ONE);
//! assert!(!engine.cancel(handle));
//! ```

#![no_std]

extern crate alloc;

mod ease;
mod engine;
mod tween;

pub use ease::Ease;
pub use engine::{AnimationHandle, Sample, TweenEngine};
pub use tween::{Channel, Tween};
