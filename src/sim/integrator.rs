//! Per-frame motion step
//!
//! Fixed virtual tick: friction is a per-second rate divided by `fps`, and the
//! position advances by `velocity / position_scale` every frame regardless of
//! how long the frame actually took.

use glam::DVec2;

use super::state::Body;
use crate::{Settings, ShotMode, clamp_magnitude};

/// What the motion step did this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationStep {
    /// Position before the advance, for collision rollback
    pub previous_position: DVec2,
    /// The ball dropped below the rest threshold and was stopped
    pub stopped: bool,
}

/// Damp, advance and rest-snap the ball
pub fn integrate(body: &mut Body, settings: &Settings) -> IntegrationStep {
    let previous_position = body.position;

    body.velocity *= settings.friction_factor();
    body.position += body.velocity / settings.position_scale;

    let stopped = snap_to_rest(body, settings.rest_velocity_threshold);

    IntegrationStep {
        previous_position,
        stopped,
    }
}

/// Stop a ball whose speed is above zero but below `threshold`.
///
/// A ball already at exactly zero speed is left untouched.
pub fn snap_to_rest(body: &mut Body, threshold: f64) -> bool {
    let speed = body.speed();
    if speed > 0.0 && speed < threshold {
        body.velocity = DVec2::ZERO;
        body.moving = false;
        return true;
    }
    false
}

/// Shot vector for a ball at `position` aimed away from `pointer`, capped at
/// `max_velocity`
pub fn aim_vector(position: DVec2, pointer: DVec2, settings: &Settings) -> DVec2 {
    clamp_magnitude((position - pointer) * settings.aim_scale, settings.max_velocity)
}

/// Commit a confirmed shot into the ball's velocity
pub fn commit_shot(body: &mut Body, aim: DVec2, settings: &Settings) {
    body.velocity = match settings.shot_mode {
        ShotMode::Add => body.velocity + aim,
        ShotMode::Replace => aim,
    };
    body.moving = true;
}
