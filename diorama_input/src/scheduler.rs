// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input scheduler: one debouncer per event kind.
//!
//! Pointer moves and viewport resizes are debounced independently, each with its
//! own [`DebounceSettings`]. When both are due on the same poll, the resize is
//! delivered first so the pointer is mapped against the new viewport.
//!
//! ```
//! use diorama_input::debounce::DebounceSettings;
//! use diorama_input::scheduler::{InputEvent, InputScheduler};
//! use kurbo::{Point, Size};
//!
//! let mut s = InputScheduler::new(DebounceSettings::default(), DebounceSettings::default());
//! s.schedule(0, InputEvent::PointerMove(Point::new(1.0, 1.0)));
//! s.schedule(5, InputEvent::PointerMove(Point::new(2.0, 2.0)));
//! s.schedule(8, InputEvent::Resize(Size::new(640.0, 480.0)));
//!
//! let due = s.poll(30);
//! assert_eq!(
//!     due.as_slice(),
//!     &[
//!         InputEvent::Resize(Size::new(640.0, 480.0)),
//!         InputEvent::PointerMove(Point::new(2.0, 2.0)),
//!     ]
//! );
//! ```

use kurbo::{Point, Size};
use smallvec::SmallVec;

use crate::debounce::{DebounceSettings, Debouncer};

/// A raw device event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to a client-space position.
    PointerMove(Point),
    /// Render surface resized to a client-space size.
    Resize(Size),
}

impl InputEvent {
    /// Kind of this event.
    pub fn kind(&self) -> InputKind {
        match self {
            Self::PointerMove(_) => InputKind::PointerMove,
            Self::Resize(_) => InputKind::Resize,
        }
    }
}

/// Debounce bucket of an [`InputEvent`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Pointer movement.
    PointerMove,
    /// Viewport resize.
    Resize,
}

/// Events delivered by one poll. At most a leading and a trailing event per kind.
pub type DueEvents = SmallVec<[InputEvent; 4]>;

/// Per-kind debouncing of device input.
#[derive(Clone, Debug)]
pub struct InputScheduler {
    pointer: Debouncer<Point>,
    resize: Debouncer<Size>,
}

impl Default for InputScheduler {
    fn default() -> Self {
        Self::new(DebounceSettings::default(), DebounceSettings::default())
    }
}

impl InputScheduler {
    /// Create a scheduler with separate settings for pointer moves and resizes.
    pub fn new(pointer: DebounceSettings, resize: DebounceSettings) -> Self {
        Self {
            pointer: Debouncer::new(pointer),
            resize: Debouncer::new(resize),
        }
    }

    /// Settings for `kind`.
    pub fn settings(&self, kind: InputKind) -> DebounceSettings {
        match kind {
            InputKind::PointerMove => self.pointer.settings(),
            InputKind::Resize => self.resize.settings(),
        }
    }

    /// Record `event`, superseding any pending event of the same kind.
    pub fn schedule(&mut self, now_ms: u64, event: InputEvent) {
        let superseded = match event {
            InputEvent::PointerMove(p) => {
                let had = self.pointer.is_pending();
                self.pointer.schedule(now_ms, p);
                had
            }
            InputEvent::Resize(s) => {
                let had = self.resize.is_pending();
                self.resize.schedule(now_ms, s);
                had
            }
        };
        if superseded {
            tracing::trace!(kind = ?event.kind(), now_ms, "coalesced");
        }
    }

    /// Drain every event due at `now_ms`: resizes first, then pointer moves.
    pub fn poll(&mut self, now_ms: u64) -> DueEvents {
        let mut out = DueEvents::new();
        while let Some(s) = self.resize.poll(now_ms) {
            out.push(InputEvent::Resize(s));
        }
        while let Some(p) = self.pointer.poll(now_ms) {
            out.push(InputEvent::PointerMove(p));
        }
        out
    }

    /// Drain every event due at `now_ms` into `handler`, in [`poll`](Self::poll) order.
    pub fn poll_with(&mut self, now_ms: u64, mut handler: impl FnMut(InputEvent)) {
        for event in self.poll(now_ms) {
            handler(event);
        }
    }

    /// Earliest time at which a waiting event becomes due.
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.pointer.next_deadline(), self.resize.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Whether any event is waiting.
    pub fn is_pending(&self) -> bool {
        self.pointer.is_pending() || self.resize.is_pending()
    }

    /// Drop the waiting events of one kind; the other kind is untouched.
    pub fn cancel_kind(&mut self, kind: InputKind) {
        match kind {
            InputKind::PointerMove => self.pointer.cancel(),
            InputKind::Resize => self.resize.cancel(),
        }
    }

    /// Drop all waiting events.
    pub fn cancel(&mut self) {
        self.cancel_kind(InputKind::PointerMove);
        self.cancel_kind(InputKind::Resize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::DebounceEdge;
    use alloc::vec::Vec;

    fn mv(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerMove(Point::new(x, y))
    }

    #[test]
    fn two_moves_five_ms_apart_deliver_the_second() {
        let mut s = InputScheduler::default();
        s.schedule(1000, mv(10.0, 10.0));
        s.schedule(1005, mv(20.0, 30.0));
        assert!(s.poll(1010).is_empty());
        assert_eq!(s.next_deadline(), Some(1025));
        let due = s.poll(1025);
        assert_eq!(due.as_slice(), &[mv(20.0, 30.0)]);
        assert!(!s.is_pending());
    }

    #[test]
    fn kinds_do_not_cancel_each_other() {
        let mut s = InputScheduler::default();
        s.schedule(0, mv(1.0, 1.0));
        s.schedule(1, InputEvent::Resize(Size::new(10.0, 10.0)));
        let due = s.poll(100);
        assert_eq!(due.len(), 2);
    }

    #[test]
    fn windows_are_per_kind() {
        let fast = DebounceSettings {
            window_ms: 5,
            edge: DebounceEdge::Trailing,
        };
        let slow = DebounceSettings {
            window_ms: 200,
            edge: DebounceEdge::Trailing,
        };
        let mut s = InputScheduler::new(fast, slow);
        s.schedule(0, mv(1.0, 1.0));
        s.schedule(0, InputEvent::Resize(Size::new(10.0, 10.0)));
        assert_eq!(s.poll(5).as_slice(), &[mv(1.0, 1.0)]);
        assert!(s.poll(199).is_empty());
        assert_eq!(s.poll(200).len(), 1);
        assert_eq!(s.settings(InputKind::Resize).window_ms, 200);
    }

    #[test]
    fn leading_pointer_is_due_at_once() {
        let lead = DebounceSettings {
            window_ms: 20,
            edge: DebounceEdge::LeadingAndTrailing,
        };
        let mut s = InputScheduler::new(lead, DebounceSettings::default());
        s.schedule(0, mv(1.0, 1.0));
        s.schedule(3, mv(2.0, 2.0));
        let mut seen = Vec::new();
        s.poll_with(3, |e| seen.push(e));
        assert_eq!(seen, [mv(1.0, 1.0)]);
        s.poll_with(23, |e| seen.push(e));
        assert_eq!(seen, [mv(1.0, 1.0), mv(2.0, 2.0)]);
    }

    #[test]
    fn cancel_drops_everything() {
        let mut s = InputScheduler::default();
        s.schedule(0, mv(1.0, 1.0));
        s.schedule(0, InputEvent::Resize(Size::new(1.0, 1.0)));
        s.cancel();
        assert!(s.poll(1000).is_empty());
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn cancel_kind_keeps_the_other_kind() {
        let mut s = InputScheduler::default();
        s.schedule(0, mv(1.0, 1.0));
        s.schedule(0, InputEvent::Resize(Size::new(640.0, 480.0)));
        s.cancel_kind(InputKind::PointerMove);
        assert_eq!(s.next_deadline(), Some(20));
        assert_eq!(
            s.poll(20).as_slice(),
            &[InputEvent::Resize(Size::new(640.0, 480.0))]
        );
    }
}
