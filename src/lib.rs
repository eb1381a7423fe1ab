//! Poly Putt - ball physics on a polygonal course
//!
//! Core modules:
//! - `sim`: Deterministic simulation (segments, polygons, integration, collisions)
//! - `settings`: Physics tuning, loadable from JSON
//!
//! Rendering, input polling and the window/event loop live outside this crate.
//! The shell calls [`sim::tick`] once per frame and draws the returned
//! [`sim::FrameOutput`].

pub mod settings;
pub mod sim;

pub use settings::{CollisionMode, Settings, ShotMode};

use glam::DVec2;

/// Default physics constants
pub mod consts {
    /// Virtual tick rate used to normalize friction
    pub const FPS: u32 = 200;
    /// Per-second velocity decay factor
    pub const FRICTION: f64 = 0.7;
    /// Flat speed loss per bounce
    pub const BOUNCE_FRICTION: f64 = 7.0;
    /// Maximum shot speed
    pub const MAX_VELOCITY: f64 = 300.0;
    /// Speeds below this snap to rest
    pub const REST_VELOCITY_THRESHOLD: f64 = 5.0;
    /// Ball-to-hole distance that completes the course
    pub const FINISH_THRESHOLD: f64 = 5.0;

    /// Position advances by velocity / POSITION_SCALE each tick
    pub const POSITION_SCALE: f64 = 100.0;
    /// Pointer-to-ball distance multiplier for shot strength
    pub const AIM_SCALE: f64 = 1.5;
    /// Aim preview line length as a fraction of the shot vector
    pub const AIM_PREVIEW_SCALE: f64 = 0.5;

    /// Ball collider defaults
    pub const COLLIDER_RADIUS: f64 = 17.0;
    pub const COLLIDER_SIDES: usize = 20;
    pub const COLLIDER_OFFSET: f64 = std::f64::consts::FRAC_PI_6;
}

/// Length of a vector
#[inline]
pub fn magnitude(v: DVec2) -> f64 {
    v.length()
}

/// Distance between two points
#[inline]
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    (a - b).length()
}

/// Rescale `v` to the given magnitude.
///
/// A zero vector has no direction, so it is mapped onto the 45° diagonal.
pub fn set_magnitude(v: DVec2, magnitude: f64) -> DVec2 {
    let len = v.length();
    if len == 0.0 {
        return DVec2::splat(std::f64::consts::FRAC_1_SQRT_2 * magnitude);
    }
    v / len * magnitude
}

/// Rescale `v` down to `max` if it is longer, otherwise return it unchanged
#[inline]
pub fn clamp_magnitude(v: DVec2, max: f64) -> DVec2 {
    if v.length() > max {
        set_magnitude(v, max)
    } else {
        v
    }
}
