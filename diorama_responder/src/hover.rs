// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover state machine: at most one active entity, with animation ownership.
//!
//! ## Usage
//!
//! 1) Resolve each pointer event to a canonical target with the
//!    [`Resolver`](crate::resolver::Resolver).
//! 2) Call [`HoverSession::update`] with that target and your [`HoverEffects`].
//!    The session starts and releases animations and returns the `Enter(..)` /
//!    `Leave(..)` transitions it performed.
//!
//! ## Minimal example
//!
//! ```
//! use diorama_responder::hover::{HoverEffects, HoverEvent, HoverSession};
//!
//! #[derive(Default)]
//! struct Log(Vec<String>);
//!
//! impl HoverEffects<u32> for Log {
//!     type Handle = u32;
//!     fn start(&mut self, entity: u32) -> u32 {
//!         self.0.push(format!("start {entity}"));
//!         entity * 10
//!     }
//!     fn release(&mut self, entity: u32, handle: u32) {
//!         self.0.push(format!("release {entity} ({handle})"));
//!     }
//! }
//!
//! let mut fx = Log::default();
//! let mut hover: HoverSession<u32, u32> = HoverSession::new();
//! assert_eq!(hover.update(Some(1), &mut fx).as_slice(), &[HoverEvent::Enter(1)]);
//! assert_eq!(
//!     hover.update(Some(2), &mut fx).as_slice(),
//!     &[HoverEvent::Leave(1), HoverEvent::Enter(2)]
//! );
//! assert_eq!(fx.0, ["start 1", "release 1 (10)", "start 2"]);
//! ```

use smallvec::SmallVec;

/// Side effects driven by the hover state machine.
///
/// Implementations start a hover animation for an entity and return a handle to
/// it, and release an entity by cancelling its animation and restoring its rest
/// transform. Neither operation may fail.
pub trait HoverEffects<K> {
    /// Handle to an in-flight animation.
    type Handle;
    /// Start the hover animation for `entity`.
    fn start(&mut self, entity: K) -> Self::Handle;
    /// Cancel `handle` and restore `entity` to its rest transform.
    ///
    /// Must tolerate a handle whose animation already completed.
    fn release(&mut self, entity: K, handle: Self::Handle);
}

/// State of a [`HoverSession`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoverState<K, H> {
    /// Nothing is hovered.
    Idle,
    /// `entity` is hovered and `handle` is its animation.
    Active {
        /// The hovered entity.
        entity: K,
        /// Animation started when the entity became active.
        handle: H,
    },
}

/// A hover transition event.
///
/// Returned by [`HoverSession::update`] and [`HoverSession::clear`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// The entity became active.
    Enter(K),
    /// The entity stopped being active and was restored to rest.
    Leave(K),
}

/// Transitions produced by one update: at most a leave and an enter.
pub type HoverEvents<K> = SmallVec<[HoverEvent<K>; 2]>;

/// The hover session: which entity is active and which animation it owns.
///
/// Transitions:
/// - `Idle` + target `E` → start `E`; `Active(E)`.
/// - `Active(E)` + target `E` → nothing.
/// - `Active(E)` + target `F` → release `E`, then start `F`; `Active(F)`.
/// - `Active(E)` + none → release `E`; `Idle`.
/// - `Idle` + none → nothing.
///
/// The previous entity is always released before the next one starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverSession<K, H> {
    state: HoverState<K, H>,
}

impl<K: Copy + Eq, H> Default for HoverSession<K, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq, H> HoverSession<K, H> {
    /// Create an idle session.
    pub fn new() -> Self {
        Self {
            state: HoverState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> &HoverState<K, H> {
        &self.state
    }

    /// Active entity, if any.
    pub fn active(&self) -> Option<K> {
        match &self.state {
            HoverState::Idle => None,
            HoverState::Active { entity, .. } => Some(*entity),
        }
    }

    /// Animation handle of the active entity, if any.
    pub fn handle(&self) -> Option<&H> {
        match &self.state {
            HoverState::Idle => None,
            HoverState::Active { handle, .. } => Some(handle),
        }
    }

    /// Whether nothing is hovered.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, HoverState::Idle)
    }

    /// Move to `target`, running the required effects.
    ///
    /// Returns the transitions performed: empty, `[Enter]`, `[Leave]`, or `[Leave, Enter]`.
    pub fn update<E>(&mut self, target: Option<K>, effects: &mut E) -> HoverEvents<K>
    where
        E: HoverEffects<K, Handle = H>,
    {
        let mut out = HoverEvents::new();
        if self.active() == target {
            return out;
        }
        if let HoverState::Active { entity, handle } =
            core::mem::replace(&mut self.state, HoverState::Idle)
        {
            effects.release(entity, handle);
            out.push(HoverEvent::Leave(entity));
        }
        if let Some(entity) = target {
            let handle = effects.start(entity);
            self.state = HoverState::Active { entity, handle };
            out.push(HoverEvent::Enter(entity));
        }
        out
    }

    /// Release the active entity, if any, and become idle.
    pub fn clear<E>(&mut self, effects: &mut E) -> Option<HoverEvent<K>>
    where
        E: HoverEffects<K, Handle = H>,
    {
        match core::mem::replace(&mut self.state, HoverState::Idle) {
            HoverState::Idle => None,
            HoverState::Active { entity, handle } => {
                effects.release(entity, handle);
                Some(HoverEvent::Leave(entity))
            }
        }
    }
}
