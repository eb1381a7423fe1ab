//! Collision response against course obstacles
//!
//! The ball is approximated by a regular polygon collider. When the collider
//! at the tentative position touches an obstacle edge, the ball is rolled
//! back to where it was before the advance and its velocity is reflected
//! about the struck edge, losing a flat amount of speed.

use glam::DVec2;
use std::f64::consts::FRAC_PI_2;

use super::polygon::{Polygon, PolygonHit};
use super::segment::Line;
use super::state::Body;
use crate::{Settings, set_magnitude};

/// A resolved bounce
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    /// Index of the struck obstacle in course order
    pub obstacle: usize,
    pub hit: PolygonHit,
    /// Velocity after reflection and bounce friction
    pub velocity: DVec2,
}

/// Regular-polygon collider for a ball centred at `position`
pub fn ball_collider(position: DVec2, settings: &Settings) -> Polygon {
    Polygon::regular(
        position,
        settings.collider_radius,
        settings.collider_sides,
        settings.collider_offset,
    )
}

/// Orientation of an edge: `atan(slope)`, or π/2 for a vertical edge.
///
/// Direction is discarded, so an edge and its reverse reflect identically.
#[inline]
pub fn edge_angle(line: Option<Line>) -> f64 {
    line.map_or(FRAC_PI_2, |line| line.slope.atan())
}

/// Reflect `velocity` about a line through the origin at angle `a`
pub fn reflect_about_angle(velocity: DVec2, a: f64) -> DVec2 {
    let (sin, cos) = a.sin_cos();

    // Rotate into the edge frame
    let local = DVec2::new(
        velocity.x * cos + velocity.y * sin,
        -velocity.x * sin + velocity.y * cos,
    );
    // Mirror across the edge
    let local = DVec2::new(local.x, -local.y);
    // Rotate back
    DVec2::new(
        local.x * cos - local.y * sin,
        local.x * sin + local.y * cos,
    )
}

/// Remove a flat `bounce_friction` from the speed, never going below zero
pub fn apply_bounce_friction(velocity: DVec2, bounce_friction: f64) -> DVec2 {
    let speed = (velocity.length() - bounce_friction).max(0.0);
    if speed == 0.0 {
        return DVec2::ZERO;
    }
    set_magnitude(velocity, speed)
}

/// Resolve the collider against the obstacles in course order.
///
/// Each struck obstacle rolls the ball back to `previous_position` and
/// reflects its velocity. Scanning stops after `collision_mode.max_bounces()`
/// bounces; the default single-pass mode stops at the first hit. A ball with
/// zero velocity is never resolved.
pub fn resolve_collisions(
    body: &mut Body,
    collider: &Polygon,
    previous_position: DVec2,
    obstacles: &[Polygon],
    settings: &Settings,
) -> Vec<Bounce> {
    let mut bounces = Vec::new();
    if body.velocity == DVec2::ZERO {
        return bounces;
    }

    let max_bounces = settings.collision_mode.max_bounces() as usize;
    for (index, obstacle) in obstacles.iter().enumerate() {
        if bounces.len() >= max_bounces {
            break;
        }
        let Some(hit) = collider.intersects(obstacle) else {
            continue;
        };

        body.position = previous_position;

        let reflected = reflect_about_angle(body.velocity, edge_angle(hit.struck_line()));
        body.velocity = apply_bounce_friction(reflected, settings.bounce_friction);
        if body.velocity == DVec2::ZERO {
            // Bounce absorbed all remaining speed
            body.moving = false;
        }

        log::debug!(
            "Bounce off obstacle {} edge {} at ({:.2}, {:.2}), speed now {:.2}",
            index,
            hit.other_index,
            hit.point().x,
            hit.point().y,
            body.velocity.length()
        );

        bounces.push(Bounce {
            obstacle: index,
            hit,
            velocity: body.velocity,
        });
    }

    bounces
}
