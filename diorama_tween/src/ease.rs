// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves.

use core::f32::consts::PI;

/// An easing curve mapping linear progress in `[0, 1]` to eased progress.
///
/// Every curve maps `0` to `0` and `1` to `1`. [`Ease::BackOut`] overshoots
/// past `1` before settling.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Half-cosine acceleration then deceleration.
    SineInOut,
    /// Fast start that overshoots by an amount controlled by `overshoot`, then settles.
    BackOut {
        /// Overshoot strength; `1.70158` is the conventional default.
        overshoot: f32,
    },
    /// Quadratic deceleration.
    #[default]
    QuadOut,
}

impl Ease {
    /// Evaluate the curve at `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::SineInOut => -(cos(PI * t) - 1.0) / 2.0,
            Self::BackOut { overshoot: s } => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u * u * u + s * u * u
            }
            Self::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

#[cfg(feature = "std")]
fn cos(x: f32) -> f32 {
    x.cos()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
fn cos(x: f32) -> f32 {
    libm::cosf(x)
}

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("diorama_tween requires either the `std` or `libm` feature");
