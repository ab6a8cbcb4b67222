// Copyright 2025 the Diorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction configuration.
//!
//! Every field has a default matching the stock room, so a config file only
//! needs the values it changes:
//!
//! ```
//! use diorama::InteractionConfig;
//!
//! let cfg = InteractionConfig::from_toml_str(
//!     r#"
//!     excluded = ["Cat_tree", "Plant"]
//!
//!     [pulse]
//!     scale = 1.5
//!
//!     [pointer_debounce]
//!     window_ms = 0
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(cfg.pulse.scale, 1.5);
//! assert_eq!(cfg.pulse.duration, 0.3);
//! assert_eq!(cfg.pointer_debounce.window_ms, 0);
//! assert_eq!(cfg.resize_debounce.window_ms, 20);
//! ```

use diorama_input::debounce::DebounceSettings;
use diorama_responder::types::TieBreakPolicy;
use diorama_scene::Camera;
use diorama_tween::Ease;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Everything the interaction core can be tuned with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Name of the scene node whose mesh children are the pickable entities.
    pub interactive_group: String,
    /// Names whose hits resolve to the hit node's direct parent.
    pub redirect_to_parent: Vec<String>,
    /// Names whose hits resolve to nothing.
    pub excluded: Vec<String>,
    /// Entities that swing instead of pulse.
    pub swing: Vec<String>,
    /// Tie-break between hits at equal distance.
    pub tie_break: TieBreakPolicy,
    /// Scale pulse played by most entities.
    pub pulse: PulseConfig,
    /// Rotation swing played by entities named in `swing`.
    pub swing_program: SwingConfig,
    /// Debouncing of pointer moves.
    pub pointer_debounce: DebounceSettings,
    /// Debouncing of viewport resizes.
    pub resize_debounce: DebounceSettings,
    /// Initial camera.
    pub camera: CameraConfig,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            interactive_group: "Interactives_Parent".to_owned(),
            redirect_to_parent: ["PicClover", "PicCats", "PicWork", "PicScreen"]
                .map(String::from)
                .to_vec(),
            excluded: vec!["Cat_tree".to_owned()],
            swing: vec!["Tree_fuzz".to_owned()],
            tie_break: TieBreakPolicy::default(),
            pulse: PulseConfig::default(),
            swing_program: SwingConfig::default(),
            pointer_debounce: DebounceSettings::default(),
            resize_debounce: DebounceSettings::default(),
            camera: CameraConfig::default(),
        }
    }
}

/// Uniform scale pulse relative to the rest scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Peak scale factor.
    pub scale: f32,
    /// Seconds per leg.
    pub duration: f32,
    /// Extra legs after the first.
    pub repeat: u32,
    /// Whether odd legs run backwards.
    pub yoyo: bool,
    /// Easing of each leg.
    pub ease: Ease,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            scale: 1.2,
            duration: 0.3,
            repeat: 1,
            yoyo: true,
            ease: Ease::BackOut { overshoot: 1.7 },
        }
    }
}

/// Coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// The x axis.
    X,
    /// The y axis.
    Y,
    /// The z axis.
    Z,
}

impl Axis {
    /// Unit vector along this axis.
    pub fn unit(self) -> Vec3 {
        match self {
            Self::X => Vec3::X,
            Self::Y => Vec3::Y,
            Self::Z => Vec3::Z,
        }
    }
}

/// Rotation swing about one axis relative to the rest rotation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwingConfig {
    /// Rotation axis.
    pub axis: Axis,
    /// Swing angle in degrees.
    pub angle_degrees: f32,
    /// Seconds per leg.
    pub duration: f32,
    /// Extra legs after the first.
    pub repeat: u32,
    /// Whether odd legs run backwards.
    pub yoyo: bool,
    /// Easing of each leg.
    pub ease: Ease,
}

impl Default for SwingConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Z,
            angle_degrees: 10.0,
            duration: 0.25,
            repeat: 1,
            yoyo: true,
            ease: Ease::SineInOut,
        }
    }
}

/// Perspective camera parameters. The aspect ratio comes from the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Eye position.
    pub position: [f32; 3],
    /// Look-at target.
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        let cam = Camera::default();
        Self {
            fov_y_degrees: cam.fov_y_degrees,
            near: cam.near,
            far: cam.far,
            position: cam.position.to_array(),
            target: cam.target.to_array(),
        }
    }
}

impl CameraConfig {
    /// Build a camera with the given aspect ratio.
    pub fn to_camera(&self, aspect: f32) -> Camera {
        Camera {
            fov_y_degrees: self.fov_y_degrees,
            aspect,
            near: self.near,
            far: self.far,
            position: Vec3::from_array(self.position),
            target: Vec3::from_array(self.target),
            up: Vec3::Y,
        }
    }
}

impl InteractionConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as a TOML document.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check value ranges that the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(v: f32, field: &'static str) -> Result<(), ConfigError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a finite positive number",
                })
            }
        }
        if self.interactive_group.is_empty() {
            return Err(ConfigError::Invalid {
                field: "interactive_group",
                reason: "must not be empty",
            });
        }
        positive(self.pulse.scale, "pulse.scale")?;
        positive(self.pulse.duration, "pulse.duration")?;
        positive(self.swing_program.duration, "swing_program.duration")?;
        if !self.swing_program.angle_degrees.is_finite() {
            return Err(ConfigError::Invalid {
                field: "swing_program.angle_degrees",
                reason: "must be finite",
            });
        }
        positive(self.camera.fov_y_degrees, "camera.fov_y_degrees")?;
        positive(self.camera.near, "camera.near")?;
        if !self.camera.far.is_finite() || self.camera.far <= self.camera.near {
            return Err(ConfigError::Invalid {
                field: "camera.far",
                reason: "must be finite and greater than camera.near",
            });
        }
        let eye = Vec3::from_array(self.camera.position);
        let target = Vec3::from_array(self.camera.target);
        if !eye.is_finite() || !target.is_finite() || eye == target {
            return Err(ConfigError::Invalid {
                field: "camera.position",
                reason: "must be finite and distinct from camera.target",
            });
        }
        Ok(())
    }
}
