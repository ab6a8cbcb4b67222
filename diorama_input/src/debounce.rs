// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounce helper: coalesce bursts of events into the most recent one.
//!
//! Time is supplied by the caller as milliseconds (`u64`), so the state machine
//! is deterministic and has no timers of its own. Feed events with
//! [`Debouncer::schedule`] and drain them with [`Debouncer::poll`].
//!
//! ## Edges
//!
//! - [`DebounceEdge::Trailing`]: nothing is delivered while events keep arriving.
//!   Once `window_ms` passes without a new event, the latest event is delivered once.
//! - [`DebounceEdge::LeadingAndTrailing`]: the first event of a burst is delivered on
//!   the next poll. Later events in the same burst coalesce and are delivered on the
//!   trailing edge as above.
//!
//! ```
//! use diorama_input::debounce::{DebounceSettings, Debouncer};
//!
//! let mut d = Debouncer::new(DebounceSettings::default()); // 20 ms, trailing
//! d.schedule(1000, "first");
//! d.schedule(1005, "second");
//! assert_eq!(d.poll(1020), None); // 15 ms of quiet: not yet
//! assert_eq!(d.poll(1025), Some("second"));
//! assert_eq!(d.poll(1100), None);
//! ```

/// Which edges of a burst are delivered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DebounceEdge {
    /// Deliver only the last event, after the quiet window.
    #[default]
    Trailing,
    /// Deliver the first event immediately and the last after the quiet window.
    LeadingAndTrailing,
}

/// Quiet window and edge policy for one kind of event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DebounceSettings {
    /// Quiet time in milliseconds that ends a burst.
    pub window_ms: u64,
    /// Which edges of a burst are delivered.
    pub edge: DebounceEdge,
}

impl DebounceSettings {
    /// Default quiet window in milliseconds.
    pub const DEFAULT_WINDOW_MS: u64 = 20;
}

impl Default for DebounceSettings {
    fn default() -> Self {
        Self {
            window_ms: Self::DEFAULT_WINDOW_MS,
            edge: DebounceEdge::default(),
        }
    }
}

/// Debounce state for one kind of event.
#[derive(Clone, Debug)]
pub struct Debouncer<E> {
    settings: DebounceSettings,
    /// Leading-edge event waiting for the next poll.
    ready: Option<E>,
    /// Latest event of the current burst and its delivery time.
    pending: Option<(E, u64)>,
    /// End of the current burst (last event time plus window).
    quiet_at: Option<u64>,
}

impl<E> Debouncer<E> {
    /// Create an idle debouncer.
    pub fn new(settings: DebounceSettings) -> Self {
        Self {
            settings,
            ready: None,
            pending: None,
            quiet_at: None,
        }
    }

    /// Current settings.
    pub fn settings(&self) -> DebounceSettings {
        self.settings
    }

    /// Record an event that happened at `now_ms`.
    ///
    /// Replaces any pending event and restarts the quiet window.
    pub fn schedule(&mut self, now_ms: u64, event: E) {
        let deadline = now_ms.saturating_add(self.settings.window_ms);
        let in_burst = self.quiet_at.is_some_and(|q| now_ms < q);
        self.quiet_at = Some(deadline);
        if !in_burst && self.settings.edge == DebounceEdge::LeadingAndTrailing {
            self.ready = Some(event);
            self.pending = None;
        } else {
            self.pending = Some((event, deadline));
        }
    }

    /// Take the next event that is due at `now_ms`, if any.
    ///
    /// A leading-edge event is returned before a trailing one. Call repeatedly
    /// until it returns `None` to drain everything that is due.
    pub fn poll(&mut self, now_ms: u64) -> Option<E> {
        if let Some(e) = self.ready.take() {
            return Some(e);
        }
        match self.pending {
            Some((_, deadline)) if deadline <= now_ms => self.pending.take().map(|(e, _)| e),
            _ => None,
        }
    }

    /// When the next waiting event becomes due, if any.
    ///
    /// A waiting leading-edge event is always due and reports `Some(0)`.
    pub fn next_deadline(&self) -> Option<u64> {
        if self.ready.is_some() {
            return Some(0);
        }
        self.pending.as_ref().map(|(_, d)| *d)
    }

    /// Whether an event is waiting to be delivered.
    pub fn is_pending(&self) -> bool {
        self.ready.is_some() || self.pending.is_some()
    }

    /// Drop any waiting event and end the current burst.
    pub fn cancel(&mut self) {
        self.ready = None;
        self.pending = None;
        self.quiet_at = None;
    }
}
