// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diorama Input: pointer mapping and input debouncing.
//!
//! - [`pointer`]: map a client-space pointer position to normalized device
//!   coordinates relative to a viewport rectangle.
//! - [`debounce`]: a deterministic debouncer driven by caller-supplied millisecond
//!   timestamps, with trailing or leading-and-trailing delivery.
//! - [`scheduler`]: one debouncer per event kind (pointer move, resize) with a
//!   fixed delivery order.
//!
//! Nothing here owns a clock or a timer. Callers pass `now_ms` on every call and
//! poll when convenient (typically once per frame and after each device event).
//!
//! Client-space geometry uses [`kurbo`] types (`Point`, `Rect`, `Size`); NDC uses [`glam::Vec2`].

#![no_std]

#[cfg(test)]
extern crate alloc;

pub mod debounce;
pub mod pointer;
pub mod scheduler;
