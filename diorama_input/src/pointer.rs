// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Map client-space pointer positions to normalized device coordinates.
//!
//! NDC has its origin at the viewport center, `x` growing right and `y`
//! growing up, both in `[-1, 1]`. Client space has `y` growing down.
//!
//! ```
//! use diorama_input::pointer::to_ndc;
//! use glam::Vec2;
//! use kurbo::{Point, Rect};
//!
//! let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
//! assert_eq!(to_ndc(Point::new(400.0, 300.0), viewport), Vec2::ZERO);
//! assert_eq!(to_ndc(Point::new(0.0, 0.0), viewport), Vec2::new(-1.0, 1.0));
//! assert_eq!(to_ndc(Point::new(800.0, 600.0), viewport), Vec2::new(1.0, -1.0));
//! ```

use glam::Vec2;
use kurbo::{Point, Rect};

/// Whether `viewport` has no usable area (zero, negative, or non-finite extent on either axis).
///
/// Pointer events over a degenerate viewport should be dropped.
pub fn is_degenerate(viewport: Rect) -> bool {
    !axis_ok(viewport.x0, viewport.x1) || !axis_ok(viewport.y0, viewport.y1)
}

/// Whether `pointer` lies on `viewport`, edges included.
///
/// Pointers off the viewport have nothing under them; callers should resolve
/// them to no target rather than map them, since [`to_ndc`] clamps.
pub fn contains(viewport: Rect, pointer: Point) -> bool {
    (viewport.x0..=viewport.x1).contains(&pointer.x)
        && (viewport.y0..=viewport.y1).contains(&pointer.y)
}

/// Map `pointer` (client space) to NDC relative to `viewport` (client space).
///
/// Results are clamped to `[-1, 1]`, so positions outside the viewport land on
/// its edge. A degenerate axis, or a non-finite pointer coordinate, maps to `0`
/// on that axis.
#[allow(
    clippy::cast_possible_truncation,
    reason = "NDC is in [-1, 1]; f32 precision is plenty."
)]
pub fn to_ndc(pointer: Point, viewport: Rect) -> Vec2 {
    let x = axis_to_ndc(pointer.x, viewport.x0, viewport.x1);
    let y = -axis_to_ndc(pointer.y, viewport.y0, viewport.y1);
    Vec2::new(x as f32, y as f32)
}

fn axis_ok(lo: f64, hi: f64) -> bool {
    let extent = hi - lo;
    lo.is_finite() && extent.is_finite() && extent > 0.0
}

fn axis_to_ndc(v: f64, lo: f64, hi: f64) -> f64 {
    if !axis_ok(lo, hi) || !v.is_finite() {
        return 0.0;
    }
    (((v - lo) / (hi - lo)) * 2.0 - 1.0).clamp(-1.0, 1.0)
}
