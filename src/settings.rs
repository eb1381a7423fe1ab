//! Physics settings
//!
//! Loaded from JSON by the shell; every field falls back to the reference
//! tuning when omitted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How a confirmed shot is committed into the ball's velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShotMode {
    /// Add the aim vector to the current velocity
    #[default]
    Add,
    /// Replace the current velocity with the aim vector
    Replace,
}

/// How many obstacle bounces are resolved per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum CollisionMode {
    /// Reflect off the first obstacle hit and stop scanning
    #[default]
    SinglePass,
    /// Keep scanning the remaining obstacles, reflecting once per struck
    /// obstacle, up to `max_bounces` reflections
    Iterative { max_bounces: u32 },
}

impl CollisionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionMode::SinglePass => "single_pass",
            CollisionMode::Iterative { .. } => "iterative",
        }
    }

    /// Maximum reflections applied in one frame
    pub fn max_bounces(&self) -> u32 {
        match self {
            CollisionMode::SinglePass => 1,
            CollisionMode::Iterative { max_bounces } => (*max_bounces).max(1),
        }
    }
}

/// Physics tuning for one play session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Motion ===
    /// Per-second velocity decay, normalized by `fps`
    pub friction: f64,
    /// Flat speed loss per bounce
    pub bounce_friction: f64,
    /// Shot speed cap
    pub max_velocity: f64,
    /// Speeds strictly between 0 and this snap to rest
    pub rest_velocity_threshold: f64,
    /// Virtual tick rate
    pub fps: u32,
    /// Position advances by `velocity / position_scale` per tick
    pub position_scale: f64,

    // === Course ===
    /// Ball-to-finish distance that completes the course
    pub finish_threshold: f64,

    // === Collider ===
    pub collider_radius: f64,
    pub collider_sides: usize,
    /// Rotation of the collider's first vertex (radians)
    pub collider_offset: f64,
    pub collision_mode: CollisionMode,

    // === Aiming ===
    pub aim_scale: f64,
    pub aim_preview_scale: f64,
    pub shot_mode: ShotMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            friction: FRICTION,
            bounce_friction: BOUNCE_FRICTION,
            max_velocity: MAX_VELOCITY,
            rest_velocity_threshold: REST_VELOCITY_THRESHOLD,
            fps: FPS,
            position_scale: POSITION_SCALE,

            finish_threshold: FINISH_THRESHOLD,

            collider_radius: COLLIDER_RADIUS,
            collider_sides: COLLIDER_SIDES,
            collider_offset: COLLIDER_OFFSET,
            collision_mode: CollisionMode::SinglePass,

            aim_scale: AIM_SCALE,
            aim_preview_scale: AIM_PREVIEW_SCALE,
            shot_mode: ShotMode::Add,
        }
    }
}

impl Settings {
    /// Per-tick velocity multiplier. A zero tick rate disables damping.
    pub fn friction_factor(&self) -> f64 {
        if self.fps == 0 {
            1.0
        } else {
            1.0 - self.friction / self.fps as f64
        }
    }

    /// Parse settings from JSON; missing fields take their defaults and
    /// out-of-range values are replaced (see [`Settings::sanitized`])
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Replace values the simulation cannot run with.
    ///
    /// - `collider_sides` below 3 becomes 3 (an empty collider would sit at the origin)
    /// - non-positive or non-finite `position_scale` falls back to the default
    /// - negative or non-finite `collider_radius` falls back to the default
    pub fn sanitized(mut self) -> Self {
        if self.collider_sides < 3 {
            log::warn!("collider_sides {} too small, using 3", self.collider_sides);
            self.collider_sides = 3;
        }
        if !(self.position_scale.is_finite() && self.position_scale > 0.0) {
            log::warn!(
                "position_scale {} must be positive, using {POSITION_SCALE}",
                self.position_scale
            );
            self.position_scale = POSITION_SCALE;
        }
        if !(self.collider_radius.is_finite() && self.collider_radius >= 0.0) {
            log::warn!(
                "collider_radius {} must be non-negative, using {COLLIDER_RADIUS}",
                self.collider_radius
            );
            self.collider_radius = COLLIDER_RADIUS;
        }
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Invalid settings in {}: {err}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Could not read {}: {err}; using defaults", path.display());
                Self::default()
            }
        }
    }
}
