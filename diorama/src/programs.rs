// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover animation programs and the effects that play them on a scene.
//!
//! An entity plays one of two programs when it becomes active:
//!
//! - [`AnimationProgram::Pulse`]: uniform scale from rest to a peak and back.
//! - [`AnimationProgram::Swing`]: rotation about one axis by a fixed angle and back.
//!
//! Both are expressed relative to the entity's rest transform, which is captured
//! the first time the entity is animated and restored on every release.

use diorama_responder::hover::HoverEffects;
use diorama_scene::{NodeId, Scene, Transform};
use diorama_tween::{AnimationHandle, Channel, Sample, Tween, TweenEngine};
use hashbrown::{HashMap, HashSet};

use crate::config::{InteractionConfig, PulseConfig, SwingConfig};

/// A hover animation, parameterized relative to a rest transform.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AnimationProgram {
    /// Scale pulse.
    Pulse(PulseConfig),
    /// Rotation swing.
    Swing(SwingConfig),
}

impl AnimationProgram {
    /// Build the tween that plays this program on `target` starting from `rest`.
    pub fn tween(&self, target: NodeId, rest: Transform) -> Tween<NodeId> {
        match *self {
            Self::Pulse(p) => Tween::new(
                target,
                Channel::Scale,
                rest.scale,
                rest.scale * p.scale,
                p.duration,
            )
            .with_repeat(p.repeat)
            .with_yoyo(p.yoyo)
            .with_ease(p.ease),
            Self::Swing(s) => Tween::new(
                target,
                Channel::Rotation,
                rest.rotation,
                rest.rotation + s.axis.unit() * s.angle_degrees.to_radians(),
                s.duration,
            )
            .with_repeat(s.repeat)
            .with_yoyo(s.yoyo)
            .with_ease(s.ease),
        }
    }
}

/// Name-keyed dispatch from entity to program.
#[derive(Clone, Debug)]
pub struct ProgramTable {
    pulse: PulseConfig,
    swing: SwingConfig,
    swing_names: HashSet<String>,
}

impl ProgramTable {
    /// Build the table from the program settings of `config`.
    pub fn from_config(config: &InteractionConfig) -> Self {
        Self {
            pulse: config.pulse,
            swing: config.swing_program,
            swing_names: config.swing.iter().cloned().collect(),
        }
    }

    /// Program for an entity named `name`. Unnamed entities pulse.
    pub fn program_for(&self, name: Option<&str>) -> AnimationProgram {
        match name {
            Some(n) if self.swing_names.contains(n) => AnimationProgram::Swing(self.swing),
            _ => AnimationProgram::Pulse(self.pulse),
        }
    }
}

/// Write one tween sample into the matching transform channel.
pub fn apply_sample(scene: &mut Scene, sample: &Sample<NodeId>) {
    let Some(mut tf) = scene.transform(sample.target) else {
        return;
    };
    match sample.channel {
        Channel::Position => tf.position = sample.value,
        Channel::Rotation => tf.rotation = sample.value,
        Channel::Scale => tf.scale = sample.value,
    }
    scene.set_transform(sample.target, tf);
}

/// [`HoverEffects`] that play programs on scene nodes through a tween engine.
///
/// Borrowed from the room for the duration of one hover update.
#[derive(Debug)]
pub struct SceneEffects<'a> {
    /// Scene whose transforms are animated and reset.
    pub scene: &'a mut Scene,
    /// Engine that owns the running tweens.
    pub engine: &'a mut TweenEngine<NodeId>,
    /// Rest transforms captured on first animation.
    pub rest: &'a mut HashMap<NodeId, Transform>,
    /// Program dispatch.
    pub programs: &'a ProgramTable,
    /// Clock at which animations started by this update begin.
    pub now_ms: u64,
}

impl HoverEffects<NodeId> for SceneEffects<'_> {
    type Handle = AnimationHandle;

    fn start(&mut self, entity: NodeId) -> AnimationHandle {
        let current = self.scene.transform(entity).unwrap_or_default();
        let rest = *self.rest.entry(entity).or_insert(current);
        let program = self.programs.program_for(self.scene.name(entity));
        tracing::debug!(?entity, name = self.scene.name(entity), ?program, "start hover animation");
        self.engine.start(program.tween(entity, rest), self.now_ms)
    }

    fn release(&mut self, entity: NodeId, handle: AnimationHandle) {
        let cancelled = self.engine.cancel(handle);
        let killed = self.engine.kill_tweens_of(entity);
        if let Some(rest) = self.rest.get(&entity) {
            self.scene.set_transform(entity, *rest);
        }
        tracing::debug!(?entity, cancelled, killed, "released to rest");
    }
}
