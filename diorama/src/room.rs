// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interaction core: device events in, hover transitions and animated transforms out.
//!
//! ## Pipeline
//!
//! 1. [`Room::on_pointer_move`] and [`Room::on_resize`] feed the input scheduler,
//!    which coalesces bursts per kind.
//! 2. Due pointer moves are mapped to NDC against the surface viewport, turned
//!    into a camera ray, cast against the pickable set, and resolved to a
//!    canonical target.
//! 3. The hover session moves to that target, releasing the previous entity to
//!    rest before starting the next one's animation.
//! 4. [`Room::frame`] samples running tweens at the frame clock, writes their
//!    values into the scene, and renders. Each tween is timestamped when its
//!    hover starts, so sparse frames never skip an animation.
//!
//! All handlers take explicit millisecond timestamps. Nothing here spawns
//! timers; a host that wants trailing debounced events delivered promptly
//! should call [`Room::frame`] (or [`Room::pump`]) at or after
//! [`Room::next_deadline`].

use diorama_input::pointer::{contains, is_degenerate, to_ndc};
use diorama_input::scheduler::{InputEvent, InputKind, InputScheduler};
use diorama_responder::adapters::scene::resolve_ray;
use diorama_responder::hover::{HoverEvent, HoverEvents, HoverSession};
use diorama_responder::registry::{EntityRegistry, RegistryBuilder};
use diorama_responder::resolver::Resolver;
use diorama_scene::{Camera, NodeId, QueryFilter, Scene, Transform};
use diorama_tween::{AnimationHandle, TweenEngine};
use glam::Vec2;
use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};

use crate::config::InteractionConfig;
use crate::error::SetupError;
use crate::programs::{ProgramTable, SceneEffects, apply_sample};
use crate::surface::Surface;

/// An interactive room bound to a render surface.
#[derive(Debug)]
pub struct Room<S> {
    scene: Scene,
    surface: S,
    camera: Camera,
    registry: EntityRegistry<NodeId>,
    resolver: Resolver<NodeId>,
    filter: QueryFilter,
    hover: HoverSession<NodeId, AnimationHandle>,
    engine: TweenEngine<NodeId>,
    rest: HashMap<NodeId, Transform>,
    programs: ProgramTable,
    input: InputScheduler,
    clock_ms: u64,
}

impl<S: Surface> Room<S> {
    /// Bind `scene` to `surface` and register the interactive entities.
    ///
    /// Every node with geometry that is a direct child of the configured
    /// interactive group becomes pickable, in child order.
    ///
    /// # Errors
    ///
    /// - [`SetupError::MissingRenderTarget`] if `surface` is `None`.
    /// - [`SetupError::Config`] if `config` fails validation.
    /// - [`SetupError::MissingInteractiveGroup`] if no node has the group name.
    pub fn setup(
        mut scene: Scene,
        surface: Option<S>,
        config: &InteractionConfig,
    ) -> Result<Self, SetupError> {
        let surface = surface.ok_or(SetupError::MissingRenderTarget)?;
        config.validate()?;
        let group = scene
            .find_by_name(&config.interactive_group)
            .ok_or_else(|| SetupError::MissingInteractiveGroup(config.interactive_group.clone()))?;

        let mut builder = RegistryBuilder::new();
        builder
            .redirect_all(config.redirect_to_parent.iter().cloned())
            .exclude_all(config.excluded.iter().cloned());
        for &child in scene.children(group) {
            if scene.has_geometry(child) {
                builder.register(child);
            }
        }
        let registry = builder.build();

        let mut resolver = Resolver::new();
        resolver.set_tie_break(config.tie_break);

        let camera = config.camera.to_camera(aspect_of(surface.viewport()).unwrap_or(1.0));
        let _ = scene.commit();

        tracing::info!(
            group = %config.interactive_group,
            pickables = registry.len(),
            tie_break = ?config.tie_break,
            "room ready"
        );
        if registry.is_empty() {
            tracing::warn!(group = %config.interactive_group, "interactive group has no pickable children");
        }

        Ok(Self {
            scene,
            surface,
            camera,
            registry,
            resolver,
            filter: QueryFilter::default(),
            hover: HoverSession::new(),
            engine: TweenEngine::new(),
            rest: HashMap::new(),
            programs: ProgramTable::from_config(config),
            input: InputScheduler::new(config.pointer_debounce, config.resize_debounce),
            clock_ms: 0,
        })
    }

    /// Record a pointer move at client-space `point`, then deliver whatever is due.
    pub fn on_pointer_move(&mut self, point: Point, now_ms: u64) -> HoverEvents<NodeId> {
        self.input.schedule(now_ms, InputEvent::PointerMove(point));
        self.pump(now_ms)
    }

    /// Record a surface resize to `size`, then deliver whatever is due.
    pub fn on_resize(&mut self, size: Size, now_ms: u64) -> HoverEvents<NodeId> {
        self.input.schedule(now_ms, InputEvent::Resize(size));
        self.pump(now_ms)
    }

    /// Deliver every debounced event due at `now_ms` and return the hover transitions.
    pub fn pump(&mut self, now_ms: u64) -> HoverEvents<NodeId> {
        self.clock_ms = self.clock_ms.max(now_ms);
        let mut out = HoverEvents::new();
        for event in self.input.poll(now_ms) {
            match event {
                InputEvent::Resize(size) => self.apply_resize(size),
                InputEvent::PointerMove(point) => out.extend(self.hover_at(point, now_ms)),
            }
        }
        out
    }

    /// Sample animations at `now_ms`, write them into the scene, and render.
    ///
    /// Also delivers due input first, so a host can drive everything from its
    /// frame callback.
    pub fn frame(&mut self, now_ms: u64) -> HoverEvents<NodeId> {
        let events = self.pump(now_ms);
        for sample in self.engine.advance(now_ms) {
            apply_sample(&mut self.scene, &sample);
            if sample.finished
                && let Some(rest) = self.rest.get(&sample.target)
            {
                self.scene.set_transform(sample.target, *rest);
            }
        }
        let _ = self.scene.commit();
        self.surface.render(&self.scene, &self.camera);
        events
    }

    /// Canonical target under `ndc`, without changing hover state.
    pub fn resolve_at(&self, ndc: Vec2) -> Option<NodeId> {
        let ray = self.camera.ray_from_ndc(ndc);
        resolve_ray(&self.resolver, &self.scene, &self.registry, &ray, self.filter)
    }

    /// Release the hovered entity, if any, and drop waiting pointer moves.
    ///
    /// A waiting resize is kept and still delivered when due.
    pub fn clear_hover(&mut self) -> Option<HoverEvent<NodeId>> {
        self.input.cancel_kind(InputKind::PointerMove);
        let mut fx = SceneEffects {
            scene: &mut self.scene,
            engine: &mut self.engine,
            rest: &mut self.rest,
            programs: &self.programs,
            now_ms: self.clock_ms,
        };
        let event = self.hover.clear(&mut fx);
        if event.is_some() {
            let _ = self.scene.commit();
            tracing::debug!(?event, "hover cleared");
        }
        event
    }

    /// Tear down: release the hovered entity, drop all waiting input, and hand
    /// back the scene and surface.
    pub fn into_parts(mut self) -> (Scene, S) {
        let _ = self.clear_hover();
        self.input.cancel();
        (self.scene, self.surface)
    }

    /// When the next debounced event becomes due, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.input.next_deadline()
    }

    /// Hover session state.
    pub fn hover(&self) -> &HoverSession<NodeId, AnimationHandle> {
        &self.hover
    }

    /// Currently hovered entity.
    pub fn active(&self) -> Option<NodeId> {
        self.hover.active()
    }

    /// Whether the entity has a running tween.
    pub fn is_animating(&self, entity: NodeId) -> bool {
        self.engine.is_animating(entity)
    }

    /// Rest transform of an entity that has been animated at least once.
    pub fn rest_transform(&self, entity: NodeId) -> Option<Transform> {
        self.rest.get(&entity).copied()
    }

    /// The scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The render surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The pickable set and name policies.
    pub fn registry(&self) -> &EntityRegistry<NodeId> {
        &self.registry
    }

    /// Restrict picking, e.g. to visible nodes only.
    pub fn set_query_filter(&mut self, filter: QueryFilter) {
        self.filter = filter;
    }

    fn apply_resize(&mut self, size: Size) {
        self.surface.resize(size);
        match aspect_of(self.surface.viewport()) {
            Some(aspect) => {
                let _ = self.camera.set_aspect(aspect);
                tracing::debug!(width = size.width, height = size.height, aspect, "resized");
            }
            None => {
                tracing::debug!(width = size.width, height = size.height, "degenerate viewport; keeping aspect");
            }
        }
    }

    fn hover_at(&mut self, point: Point, now_ms: u64) -> HoverEvents<NodeId> {
        let viewport = self.surface.viewport();
        if is_degenerate(viewport) || !point.is_finite() {
            tracing::debug!(?point, ?viewport, "pointer dropped");
            return HoverEvents::new();
        }
        // Off the surface nothing is under the pointer.
        let target = if contains(viewport, point) {
            self.resolve_at(to_ndc(point, viewport))
        } else {
            tracing::trace!(?point, ?viewport, "pointer outside viewport");
            None
        };
        self.transition(target, now_ms)
    }

    fn transition(&mut self, target: Option<NodeId>, now_ms: u64) -> HoverEvents<NodeId> {
        let mut fx = SceneEffects {
            scene: &mut self.scene,
            engine: &mut self.engine,
            rest: &mut self.rest,
            programs: &self.programs,
            now_ms,
        };
        let events = self.hover.update(target, &mut fx);
        if !events.is_empty() {
            let _ = self.scene.commit();
            for event in &events {
                tracing::debug!(?event, name = self.event_name(event), "hover");
            }
        }
        events
    }

    fn event_name(&self, event: &HoverEvent<NodeId>) -> Option<&str> {
        match event {
            HoverEvent::Enter(e) | HoverEvent::Leave(e) => self.scene.name(*e),
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Aspect ratios are small; f32 precision is plenty."
)]
fn aspect_of(viewport: Rect) -> Option<f32> {
    if is_degenerate(viewport) {
        return None;
    }
    Some((viewport.width() / viewport.height()) as f32)
}
