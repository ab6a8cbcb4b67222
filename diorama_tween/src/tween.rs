// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single tween over one transform channel.

use glam::Vec3;

use crate::ease::Ease;

/// Transform channel animated by a [`Tween`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Channel {
    /// Translation.
    Position,
    /// Euler rotation (radians).
    Rotation,
    /// Per-axis scale.
    Scale,
}

/// Interpolates one channel of `target` from `from` to `to`.
///
/// Timing: one leg lasts `duration` seconds and runs `repeat + 1` times. With
/// `yoyo`, odd legs run backwards, so a tween with `yoyo` and an odd `repeat`
/// ends on `from`; otherwise it ends on `to`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<K> {
    /// Animated entity.
    pub target: K,
    /// Animated channel.
    pub channel: Channel,
    /// Value at progress 0.
    pub from: Vec3,
    /// Value at progress 1.
    pub to: Vec3,
    /// Length of one leg in seconds.
    pub duration: f32,
    /// Number of extra legs after the first.
    pub repeat: u32,
    /// Whether odd legs run backwards.
    pub yoyo: bool,
    /// Easing applied to each leg's progress.
    pub ease: Ease,
}

impl<K> Tween<K> {
    /// A single forward leg with the default ease.
    pub fn new(target: K, channel: Channel, from: Vec3, to: Vec3, duration: f32) -> Self {
        Self {
            target,
            channel,
            from,
            to,
            duration,
            repeat: 0,
            yoyo: false,
            ease: Ease::default(),
        }
    }

    /// Set the number of extra legs.
    #[must_use]
    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }

    /// Run odd legs backwards.
    #[must_use]
    pub fn with_yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    /// Set the easing curve.
    #[must_use]
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Total running time in seconds: `duration * (repeat + 1)`.
    pub fn total_duration(&self) -> f32 {
        self.duration.max(0.0) * (self.repeat as f32 + 1.0)
    }

    /// Value at `elapsed` seconds since start. Clamped to the tween's lifetime.
    pub fn sample(&self, elapsed: f32) -> Vec3 {
        self.from + (self.to - self.from) * self.ease.apply(self.progress(elapsed))
    }

    /// Linear (uneased) progress of the current leg, with yoyo applied.
    pub fn progress(&self, elapsed: f32) -> f32 {
        let (leg, local) = if self.duration <= 0.0 || elapsed >= self.total_duration() {
            (self.repeat, 1.0)
        } else {
            let e = elapsed.max(0.0);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Non-negative and below repeat + 1, so truncation is floor."
            )]
            let leg = ((e / self.duration) as u32).min(self.repeat);
            let local = (e - leg as f32 * self.duration) / self.duration;
            (leg, local.clamp(0.0, 1.0))
        };
        if self.yoyo && leg % 2 == 1 {
            1.0 - local
        } else {
            local
        }
    }

    /// Value once the tween has run to completion.
    pub fn end_value(&self) -> Vec3 {
        self.sample(self.total_duration())
    }
}
