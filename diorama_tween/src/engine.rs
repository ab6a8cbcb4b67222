// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tween engine: owns running tweens and hands out cancellation handles.

use alloc::vec::Vec;
use core::fmt::Debug;

use glam::Vec3;

use crate::tween::{Channel, Tween};

/// Generational handle for a running tween.
///
/// A handle goes stale when its tween completes or is cancelled; operations on
/// a stale handle are no-ops, even after the slot is reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnimationHandle(u32, u32);

impl AnimationHandle {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Handles are 32-bit; slot counts never approach u32::MAX."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// The value of one channel at an [`advance`](TweenEngine::advance).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample<K> {
    /// Animated entity.
    pub target: K,
    /// Animated channel.
    pub channel: Channel,
    /// Current channel value.
    pub value: Vec3,
    /// Whether the tween reached its end at this time and was retired.
    pub finished: bool,
}

#[derive(Clone, Debug)]
struct Running<K> {
    tween: Tween<K>,
    started_ms: u64,
}

impl<K> Running<K> {
    fn elapsed(&self, now_ms: u64) -> f32 {
        now_ms.saturating_sub(self.started_ms) as f32 / 1000.0
    }
}

#[derive(Clone, Debug)]
struct Slot<K> {
    generation: u32,
    running: Option<Running<K>>,
}

/// Owns running tweens.
///
/// Each tween is timestamped when it starts and sampled against the clock
/// passed to [`advance`](Self::advance), so a tween started between two
/// advances only plays the time since its own start. Cancellation is
/// immediate: a cancelled tween contributes nothing to the next advance.
#[derive(Clone, Debug)]
pub struct TweenEngine<K> {
    slots: Vec<Slot<K>>,
    free_list: Vec<usize>,
    live: usize,
}

impl<K: Copy + Eq + Debug> Default for TweenEngine<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Debug> TweenEngine<K> {
    /// Create an empty engine.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            live: 0,
        }
    }

    /// Start `tween` at `now_ms`, replacing every running tween of the same target.
    pub fn start(&mut self, tween: Tween<K>, now_ms: u64) -> AnimationHandle {
        let killed = self.kill_tweens_of(tween.target);
        if killed > 0 {
            tracing::trace!(target_entity = ?tween.target, killed, "replaced running tweens");
        }
        self.start_alongside(tween, now_ms)
    }

    /// Start `tween` at `now_ms` without touching other tweens of the same target.
    pub fn start_alongside(&mut self, tween: Tween<K>, now_ms: u64) -> AnimationHandle {
        let running = Some(Running {
            tween,
            started_ms: now_ms,
        });
        self.live += 1;
        if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.running = running;
            AnimationHandle::new(idx, slot.generation)
        } else {
            let idx = self.slots.len();
            self.slots.push(Slot {
                generation: 0,
                running,
            });
            AnimationHandle::new(idx, 0)
        }
    }

    /// Cancel the tween behind `handle`. Returns `false` for a stale handle.
    pub fn cancel(&mut self, handle: AnimationHandle) -> bool {
        if !self.is_running(handle) {
            return false;
        }
        self.retire(handle.idx());
        true
    }

    /// Cancel every running tween of `target`. Returns how many were cancelled.
    pub fn kill_tweens_of(&mut self, target: K) -> usize {
        let mut killed = 0;
        for idx in 0..self.slots.len() {
            let hit = self.slots[idx]
                .running
                .as_ref()
                .is_some_and(|r| r.tween.target == target);
            if hit {
                self.retire(idx);
                killed += 1;
            }
        }
        killed
    }

    /// Whether `handle` refers to a running tween.
    pub fn is_running(&self, handle: AnimationHandle) -> bool {
        self.slots
            .get(handle.idx())
            .is_some_and(|s| s.generation == handle.1 && s.running.is_some())
    }

    /// Whether `target` has any running tween.
    pub fn is_animating(&self, target: K) -> bool {
        self.iter_running().any(|r| r.tween.target == target)
    }

    /// Number of running tweens.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether no tween is running.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Sample every running tween at `now_ms` and return their values.
    ///
    /// A clock earlier than a tween's start samples its start value. Tweens
    /// that reach their end report their final value with `finished: true`
    /// and are retired; their handles become stale.
    pub fn advance(&mut self, now_ms: u64) -> Vec<Sample<K>> {
        let mut out = Vec::with_capacity(self.live);
        for idx in 0..self.slots.len() {
            let Some(r) = self.slots[idx].running.as_ref() else {
                continue;
            };
            let elapsed = r.elapsed(now_ms);
            let finished = elapsed >= r.tween.total_duration();
            out.push(Sample {
                target: r.tween.target,
                channel: r.tween.channel,
                value: r.tween.sample(elapsed),
                finished,
            });
            if finished {
                self.retire(idx);
            }
        }
        out
    }

    fn iter_running(&self) -> impl Iterator<Item = &Running<K>> + '_ {
        self.slots.iter().filter_map(|s| s.running.as_ref())
    }

    fn retire(&mut self, idx: usize) {
        let slot = &mut self.slots[idx];
        if slot.running.take().is_some() {
            slot.generation = slot.generation.wrapping_add(1);
            self.free_list.push(idx);
            self.live -= 1;
        }
    }
}
