// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `flatvec`: flat vector with linear scans (small, simple).
//!
//! A room holds a few dozen pickable boxes, so a linear scan is the default
//! and only backend. Larger scenes can plug in a hierarchy through
//! [`Backend`](crate::Backend) without touching call sites.

pub mod flatvec;
