// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perspective camera and NDC unprojection.

use glam::{Mat4, Vec2, Vec3};

use crate::types::Ray3;

/// A right-handed perspective camera looking at a fixed target.
///
/// NDC follows the OpenGL convention: `x` and `y` in `[-1, 1]` with `+y` up.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Width over height of the viewport.
    pub aspect: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Eye position.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Up direction.
    pub up: Vec3,
}

impl Default for Camera {
    /// The isometric room view: narrow field of view from a high corner.
    fn default() -> Self {
        Self {
            fov_y_degrees: 25.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(60.0, 40.0, 60.0),
            target: Vec3::new(-3.0, 7.0, 0.0),
            up: Vec3::Y,
        }
    }
}

impl Camera {
    /// World-to-view matrix.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// View-to-clip matrix.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    /// Combined world-to-clip matrix.
    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Update the aspect ratio.
    ///
    /// Returns `false` and leaves the camera untouched if `aspect` is not a
    /// finite positive number.
    pub fn set_aspect(&mut self, aspect: f32) -> bool {
        if !aspect.is_finite() || aspect <= 0.0 {
            return false;
        }
        self.aspect = aspect;
        true
    }

    /// World-space ray from the eye through the point at `ndc`.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray3 {
        let inv = self.view_projection().inverse();
        let through = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray3::new(self.position, through - self.position)
    }

    /// Project a world point to NDC. `z` is the depth in `[-1, 1]` for points inside the frustum.
    pub fn project(&self, world: Vec3) -> Vec3 {
        self.view_projection().project_point3(world)
    }
}
