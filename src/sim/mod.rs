//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed virtual tick only
//! - No randomness
//! - Stable iteration order (course order for obstacles, vertex order for edges)
//! - No rendering or platform dependencies

pub mod collision;
pub mod course;
pub mod integrator;
pub mod polygon;
pub mod segment;
pub mod state;
pub mod tick;

pub use collision::{
    Bounce, apply_bounce_friction, ball_collider, edge_angle, reflect_about_angle,
    resolve_collisions,
};
pub use course::{Course, CourseSpec, PolygonSpec};
pub use integrator::{IntegrationStep, aim_vector, commit_shot, integrate, snap_to_rest};
pub use polygon::{Polygon, PolygonHit};
pub use segment::{Intersection, Line, Segment};
pub use state::{Body, GamePhase, GameState};
pub use tick::{AimPreview, FrameOutput, GameEvent, TickInput, tick};
