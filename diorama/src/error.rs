// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Setup and configuration errors.
//!
//! Per-event handlers never fail; only building a [`Room`](crate::Room) and
//! loading an [`InteractionConfig`](crate::InteractionConfig) can.

/// An [`InteractionConfig`](crate::InteractionConfig) could not be loaded or is unusable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML source did not parse or did not match the config shape.
    #[error("failed to parse interaction config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The config could not be written out as TOML.
    #[error("failed to serialize interaction config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A value parsed but is out of range.
    #[error("invalid interaction config: `{field}` {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// A [`Room`](crate::Room) could not be set up.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// No render surface was supplied.
    #[error("render target is missing")]
    MissingRenderTarget,
    /// The scene has no node with the configured interactive group name.
    #[error("interactive group `{0}` not found in scene")]
    MissingInteractiveGroup(String),
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
