// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render collaborator seam.

use diorama_scene::{Camera, Scene};
use kurbo::{Point, Rect, Size};

/// A render target the room draws into.
///
/// The room never owns a GPU context; it only asks the surface for its
/// client-space viewport, tells it about resizes, and hands it the scene once
/// per frame.
pub trait Surface {
    /// Client-space rectangle of the canvas.
    fn viewport(&self) -> Rect;
    /// The canvas was resized to `size`.
    fn resize(&mut self, size: Size);
    /// Draw `scene` as seen from `camera`.
    fn render(&mut self, scene: &Scene, camera: &Camera);
}

/// A surface that draws nothing and records what it was asked to do.
///
/// Useful for headless runs and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordingSurface {
    viewport: Rect,
    /// Number of frames rendered.
    pub frames: usize,
    /// Every size passed to [`Surface::resize`], in order.
    pub resizes: Vec<Size>,
}

impl RecordingSurface {
    /// A surface with the given viewport.
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            frames: 0,
            resizes: Vec::new(),
        }
    }

    /// A surface of `size` anchored at the client origin.
    pub fn with_size(size: Size) -> Self {
        Self::new(Rect::from_origin_size(Point::ORIGIN, size))
    }
}

impl Surface for RecordingSurface {
    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn resize(&mut self, size: Size) {
        self.viewport = Rect::from_origin_size(self.viewport.origin(), size);
        self.resizes.push(size);
    }

    fn render(&mut self, _scene: &Scene, _camera: &Camera) {
        self.frames += 1;
    }
}
