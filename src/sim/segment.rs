//! Line segment geometry
//!
//! The heart of collision detection: exact segment-vs-segment intersection
//! using slope/intercept line equations. Vertical segments have no slope, so
//! every branch checks verticality before dividing.
//!
//! All bounds checks are inclusive: segments that only touch at an endpoint
//! intersect.

use glam::DVec2;

/// Line equation `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    /// Line through two points with different x coordinates
    pub fn through(p1: DVec2, p2: DVec2) -> Self {
        let slope = (p2.y - p1.y) / (p2.x - p1.x);
        Self {
            slope,
            intercept: p1.y - slope * p1.x,
        }
    }

    #[inline]
    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Outcome of a segment-vs-segment test.
///
/// Line fields are `None` when the corresponding segment is vertical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    NoHit,
    /// Crossing or touching point
    PointHit {
        point: DVec2,
        line_a: Option<Line>,
        line_b: Option<Line>,
    },
    /// Collinear overlapping segments, reported at a representative point
    /// on the shared line rather than the full overlap interval
    Overlap { point: DVec2, line: Option<Line> },
}

impl Intersection {
    pub fn is_hit(&self) -> bool {
        !matches!(self, Intersection::NoHit)
    }

    pub fn point(&self) -> Option<DVec2> {
        match self {
            Intersection::NoHit => None,
            Intersection::PointHit { point, .. } | Intersection::Overlap { point, .. } => {
                Some(*point)
            }
        }
    }

    /// Line equations of the first and second segment, if hit
    pub fn lines(&self) -> Option<(Option<Line>, Option<Line>)> {
        match *self {
            Intersection::NoHit => None,
            Intersection::PointHit { line_a, line_b, .. } => Some((line_a, line_b)),
            Intersection::Overlap { line, .. } => Some((line, line)),
        }
    }
}

/// A finite segment. Direction is kept but ignored by the intersection math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub p1: DVec2,
    pub p2: DVec2,
}

impl Segment {
    pub fn new(p1: DVec2, p2: DVec2) -> Self {
        Self { p1, p2 }
    }

    #[inline]
    pub fn min(&self) -> DVec2 {
        self.p1.min(self.p2)
    }

    #[inline]
    pub fn max(&self) -> DVec2 {
        self.p1.max(self.p2)
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.p1.x == self.p2.x
    }

    /// Line equation, `None` for a vertical segment
    pub fn line(&self) -> Option<Line> {
        if self.is_vertical() {
            None
        } else {
            Some(Line::through(self.p1, self.p2))
        }
    }

    /// Whether `p` lies within the segment's bounding box (inclusive)
    #[inline]
    pub fn bounds_contain(&self, p: DVec2) -> bool {
        let (min, max) = (self.min(), self.max());
        min.x <= p.x && p.x <= max.x && min.y <= p.y && p.y <= max.y
    }

    /// Intersect this segment with `other`
    pub fn intersect(&self, other: &Segment) -> Intersection {
        match (self.line(), other.line()) {
            (None, None) => self.intersect_both_vertical(other),
            (None, Some(line_b)) => {
                let x = self.p1.x;
                let point = DVec2::new(x, line_b.y_at(x));
                if self.bounds_contain(point) && other.bounds_contain(point) {
                    Intersection::PointHit {
                        point,
                        line_a: None,
                        line_b: Some(line_b),
                    }
                } else {
                    Intersection::NoHit
                }
            }
            (Some(line_a), None) => {
                let x = other.p1.x;
                let point = DVec2::new(x, line_a.y_at(x));
                if self.bounds_contain(point) && other.bounds_contain(point) {
                    Intersection::PointHit {
                        point,
                        line_a: Some(line_a),
                        line_b: None,
                    }
                } else {
                    Intersection::NoHit
                }
            }
            (Some(line_a), Some(line_b)) => self.intersect_sloped(other, line_a, line_b),
        }
    }

    /// Two vertical segments.
    ///
    /// Collinear overlap is reported at the first of: other's lower end inside
    /// self, other's upper end inside self, self's lower end when other covers
    /// self entirely.
    fn intersect_both_vertical(&self, other: &Segment) -> Intersection {
        if self.p1.x != other.p1.x {
            return Intersection::NoHit;
        }
        let x = self.p1.x;
        let (y1, y2) = (self.min().y, self.max().y);
        let (y3, y4) = (other.min().y, other.max().y);

        let y = if y1 <= y3 && y3 <= y2 {
            y3
        } else if y1 <= y4 && y4 <= y2 {
            y4
        } else if y3 <= y1 && y4 >= y2 {
            y1
        } else {
            return Intersection::NoHit;
        };

        Intersection::Overlap {
            point: DVec2::new(x, y),
            line: None,
        }
    }

    fn intersect_sloped(&self, other: &Segment, line_a: Line, line_b: Line) -> Intersection {
        if line_a.slope == line_b.slope {
            if line_a.intercept != line_b.intercept {
                return Intersection::NoHit;
            }
            // Same line: overlapping iff the rightward segment starts before
            // the leftward one ends
            let (left, right) = if self.min().x <= other.min().x {
                (self, other)
            } else {
                (other, self)
            };
            let x = right.min().x;
            if x <= left.max().x {
                return Intersection::Overlap {
                    point: DVec2::new(x, line_a.y_at(x)),
                    line: Some(line_a),
                };
            }
            return Intersection::NoHit;
        }

        let x = (line_b.intercept - line_a.intercept) / (line_a.slope - line_b.slope);
        // Evaluate on the flatter line: horizontal edges keep their exact y and
        // the result does not depend on argument order
        let y = if line_a.slope.abs() < line_b.slope.abs() {
            line_a.y_at(x)
        } else if line_b.slope.abs() < line_a.slope.abs() {
            line_b.y_at(x)
        } else {
            (line_a.y_at(x) + line_b.y_at(x)) / 2.0
        };
        let point = DVec2::new(x, y);

        if self.bounds_contain(point) && other.bounds_contain(point) {
            Intersection::PointHit {
                point,
                line_a: Some(line_a),
                line_b: Some(line_b),
            }
        } else {
            Intersection::NoHit
        }
    }
}
