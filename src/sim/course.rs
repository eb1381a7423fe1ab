//! Courses: start marker, finish marker and obstacles
//!
//! Level data is described by a serializable [`CourseSpec`] and built into an
//! immutable [`Course`] once, before play starts.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::polygon::Polygon;
use crate::distance;

/// Serializable description of one polygon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolygonSpec {
    /// Vertices in course coordinates
    Absolute { points: Vec<DVec2> },
    /// Each point is an offset from the previous one, starting at the origin
    Relative { points: Vec<DVec2> },
    /// Regular polygon, e.g. a round start or finish marker
    Regular {
        center: DVec2,
        radius: f64,
        sides: usize,
        #[serde(default)]
        offset: f64,
    },
}

impl PolygonSpec {
    pub fn build(&self) -> Polygon {
        match self {
            PolygonSpec::Absolute { points } => Polygon::new(points.clone()),
            PolygonSpec::Relative { points } => Polygon::from_relative(points),
            PolygonSpec::Regular {
                center,
                radius,
                sides,
                offset,
            } => Polygon::regular(*center, *radius, *sides, *offset),
        }
    }
}

/// Serializable course layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSpec {
    pub start: PolygonSpec,
    pub finish: PolygonSpec,
    #[serde(default)]
    pub obstacles: Vec<PolygonSpec>,
}

impl CourseSpec {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The introductory course: a winding corridor from the top-left start
    /// to a finish in the lower-right room
    pub fn tutorial() -> Self {
        let outline = [
            (240.0, 150.0),
            (600.0, 0.0),
            (0.0, 240.0),
            (-500.0, 0.0),
            (0.0, 80.0),
            (300.0, 0.0),
            (0.0, -40.0),
            (200.0, 0.0),
            (0.0, 160.0),
            (-200.0, 0.0),
            (0.0, -40.0),
            (-400.0, 0.0),
            (0.0, -240.0),
            (500.0, 0.0),
            (0.0, -80.0),
            (-500.0, 0.0),
        ];
        Self {
            start: PolygonSpec::Regular {
                center: DVec2::new(285.0, 190.0),
                radius: 20.0,
                sides: 20,
                offset: 0.0,
            },
            finish: PolygonSpec::Regular {
                center: DVec2::new(740.0, 510.0),
                radius: 20.0,
                sides: 20,
                offset: 0.0,
            },
            obstacles: vec![PolygonSpec::Relative {
                points: outline.iter().map(|&(x, y)| DVec2::new(x, y)).collect(),
            }],
        }
    }
}

/// A playable course. Obstacles are tested in the order given.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    start: Polygon,
    finish: Polygon,
    obstacles: Vec<Polygon>,
}

impl Course {
    pub fn new(start: Polygon, finish: Polygon, obstacles: Vec<Polygon>) -> Self {
        Self {
            start,
            finish,
            obstacles,
        }
    }

    pub fn from_spec(spec: &CourseSpec) -> Self {
        Self::new(
            spec.start.build(),
            spec.finish.build(),
            spec.obstacles.iter().map(PolygonSpec::build).collect(),
        )
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let spec = CourseSpec::from_json(json)?;
        let course = Self::from_spec(&spec);
        log::info!("Loaded course with {} obstacles", course.obstacles.len());
        Ok(course)
    }

    pub fn tutorial() -> Self {
        Self::from_spec(&CourseSpec::tutorial())
    }

    pub fn start(&self) -> &Polygon {
        &self.start
    }

    pub fn finish(&self) -> &Polygon {
        &self.finish
    }

    pub fn obstacles(&self) -> &[Polygon] {
        &self.obstacles
    }

    /// Where the ball is placed when play (re)starts
    pub fn start_position(&self) -> DVec2 {
        self.start.center()
    }

    /// Whether the ball collider is within `threshold` of the finish centre
    pub fn is_finished(&self, collider: &Polygon, threshold: f64) -> bool {
        distance(collider.center(), self.finish.center()) < threshold
    }
}
