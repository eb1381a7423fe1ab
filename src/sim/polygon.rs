//! Polygons and open polylines
//!
//! A polygon is an ordered vertex chain. Consecutive vertices form segments,
//! and chains of three or more vertices are closed back to the first vertex.
//! Two-point chains stay open (a single segment).

use glam::DVec2;
use std::f64::consts::TAU;

use super::segment::{Intersection, Line, Segment};

/// First intersection found between two polygons
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonHit {
    pub intersection: Intersection,
    /// Struck segment of the polygon the query was made on
    pub own_segment: Segment,
    /// Struck segment of the other polygon
    pub other_segment: Segment,
    /// Index of `other_segment` within the other polygon
    pub other_index: usize,
}

impl PolygonHit {
    /// Line equation of the other polygon's struck edge, `None` if vertical
    pub fn struck_line(&self) -> Option<Line> {
        match self.intersection.lines() {
            Some((_, line)) => line,
            None => self.other_segment.line(),
        }
    }

    /// Contact point reported by the segment test
    pub fn point(&self) -> DVec2 {
        self.intersection.point().unwrap_or(self.other_segment.p1)
    }
}

/// Ordered vertex chain with derived segments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    vertices: Vec<DVec2>,
    segments: Vec<Segment>,
}

impl Polygon {
    pub fn new(vertices: Vec<DVec2>) -> Self {
        let mut polygon = Self {
            vertices,
            segments: Vec::new(),
        };
        polygon.update_segments();
        polygon
    }

    /// Build from delta-encoded points: each point is an offset from the
    /// previous one, starting at the origin
    pub fn from_relative(offsets: &[DVec2]) -> Self {
        let vertices = offsets
            .iter()
            .scan(DVec2::ZERO, |current, &delta| {
                *current += delta;
                Some(*current)
            })
            .collect();
        Self::new(vertices)
    }

    /// Regular polygon with `sides` vertices on a circle of `radius`.
    ///
    /// Vertex `i` sits at angle `TAU * i / sides + offset`.
    pub fn regular(center: DVec2, radius: f64, sides: usize, offset: f64) -> Self {
        let vertices = (0..sides)
            .map(|i| {
                let theta = TAU * i as f64 / sides as f64 + offset;
                center + radius * DVec2::new(theta.cos(), theta.sin())
            })
            .collect();
        Self::new(vertices)
    }

    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Replace all vertices
    pub fn set_vertices(&mut self, vertices: Vec<DVec2>) {
        self.vertices = vertices;
        self.update_segments();
    }

    /// Append a vertex to the chain
    pub fn push_vertex(&mut self, vertex: DVec2) {
        self.vertices.push(vertex);
        self.update_segments();
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.segments.clear();
    }

    fn update_segments(&mut self) {
        self.segments = self
            .vertices
            .windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
            .collect();
        if self.vertices.len() > 2 {
            let first = self.vertices[0];
            let last = self.vertices[self.vertices.len() - 1];
            self.segments.push(Segment::new(last, first));
        }
    }

    /// Axis-aligned bounds `(min, max)`; `(0,0)-(0,0)` when empty
    pub fn bounds(&self) -> (DVec2, DVec2) {
        let Some(&first) = self.vertices.first() else {
            return (DVec2::ZERO, DVec2::ZERO);
        };
        self.vertices
            .iter()
            .fold((first, first), |(min, max), &v| (min.min(v), max.max(v)))
    }

    /// Midpoint of the bounding box
    pub fn center(&self) -> DVec2 {
        let (min, max) = self.bounds();
        (min + max) / 2.0
    }

    /// First pairwise segment hit, scanning this polygon's segments in order
    /// and, for each, the other polygon's segments in order.
    ///
    /// The scan order decides which edge a ball reflects off when it touches
    /// several at once.
    pub fn intersects(&self, other: &Polygon) -> Option<PolygonHit> {
        self.segments.iter().find_map(|own| {
            other
                .segments
                .iter()
                .enumerate()
                .find_map(|(other_index, theirs)| {
                    let intersection = own.intersect(theirs);
                    intersection.is_hit().then_some(PolygonHit {
                        intersection,
                        own_segment: *own,
                        other_segment: *theirs,
                        other_index,
                    })
                })
        })
    }
}
