//! Geometric primitives, like points and segments.
//!
//! Everything here works in a screen-like frame: `x` grows to the right and
//! `y` grows *down*. None of the predicates care about that, but the names of
//! orientations elsewhere in the crate do.

/// A two-dimensional point.
///
/// Equality is exact. Points serialize as an `[x, y]` pair.
#[derive(Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Point {
    /// Horizontal component, growing to the right.
    pub x: f64,
    /// Vertical component, growing downwards.
    pub y: f64,
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Are both coordinates finite?
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x) * (self.x - other.x) + (self.y - other.y) * (self.y - other.y)).sqrt()
    }

    /// Compute an affine combination between `self` and `other`; that is, `(1 - t) * self + t * other`.
    pub fn affine(&self, other: &Self, t: f64) -> Self {
        Point {
            x: (1.0 - t) * self.x + t * other.x,
            y: (1.0 - t) * self.y + t * other.y,
        }
    }

    /// Converts to a `kurbo` point, for rendering.
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl From<kurbo::Point> for Point {
    fn from(p: kurbo::Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// The sign of the turn `a -> b -> c`.
///
/// This is the sign of `(b.y - a.y) * (c.x - b.x) - (c.y - b.y) * (b.x - a.x)`:
/// zero when the three points are collinear, and opposite signs for the two
/// sides of the line through `a` and `b`.
pub fn orientation_triple(a: &Point, b: &Point, c: &Point) -> i8 {
    let v = (b.y - a.y) * (c.x - b.x) - (c.y - b.y) * (b.x - a.x);
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// A straight line segment.
///
/// Unlike a sweep-line segment, this one keeps the direction it was given in.
#[derive(Clone, Copy, PartialEq)]
pub struct Segment {
    /// The first endpoint.
    pub start: Point,
    /// The second endpoint.
    pub end: Point,
}

impl std::fmt::Debug for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Segment { start, end } = self;
        write!(f, "{start:?} -- {end:?}")
    }
}

impl Segment {
    /// Create a new segment.
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Returns true if this segment has zero length.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if this segment is exactly horizontal.
    pub fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y
    }

    /// The larger of the two horizontal coordinates.
    pub fn max_x(&self) -> f64 {
        self.start.x.max(self.end.x)
    }

    /// Does this segment cross `other`?
    ///
    /// For each of the two segments, the other segment's endpoints must get
    /// different orientation signs. Zero counts as its own sign, so an endpoint
    /// lying exactly on the other segment is a crossing. Collinear segments
    /// (all four signs zero) never cross, even if they overlap, and neither do
    /// zero-length segments. Some cuts running exactly along an edge will
    /// therefore go unnoticed.
    pub fn crosses(&self, other: &Segment) -> bool {
        let o1a = orientation_triple(&self.start, &self.end, &other.start);
        let o1b = orientation_triple(&self.start, &self.end, &other.end);
        let o2a = orientation_triple(&other.start, &other.end, &self.start);
        let o2b = orientation_triple(&other.start, &other.end, &self.end);
        o1a != o1b && o2a != o2b
    }

    /// The coefficients `(a, b, c)` of the implicit line `a x + b y = c` through this segment.
    ///
    /// Vertical and horizontal lines are special-cased so that neither
    /// coefficient comes out of a division by zero. A degenerate segment
    /// gives `a = b = 0`.
    pub fn line_coefficients(&self) -> (f64, f64, f64) {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let mut a = 1.0;
        let mut b = 1.0;
        if dy == 0.0 {
            a = 0.0;
        }
        if dx == 0.0 {
            b = 0.0;
        } else {
            a = -dy / dx;
        }
        let c = a * self.start.x + b * self.start.y;
        (a, b, c)
    }

    /// The intersection point of the infinite lines through `self` and `other`.
    ///
    /// Returns `None` if the lines are parallel or collinear; overlapping
    /// collinear segments are never resolved to a point.
    pub fn line_intersection(&self, other: &Segment) -> Option<Point> {
        let (a1, b1, c1) = self.line_coefficients();
        let (a2, b2, c2) = other.line_coefficients();
        let determinant = a1 * b2 - a2 * b1;
        if determinant == 0.0 {
            return None;
        }
        Some(Point::new(
            (c1 * b2 - c2 * b1) / determinant,
            (a1 * c2 - a2 * c1) / determinant,
        ))
    }

    /// The crossing point of `self` and `other`, if they [cross](Segment::crosses).
    pub fn intersection(&self, other: &Segment) -> Option<Point> {
        if self.crosses(other) {
            self.line_intersection(other)
        } else {
            None
        }
    }

    /// Perpendicular distance from `p` to the infinite line through this segment.
    ///
    /// If the segment is degenerate, this is the distance from `p` to its start.
    pub fn distance_to_line(&self, p: &Point) -> f64 {
        let ab = (self.end.x - self.start.x, self.end.y - self.start.y);
        let ap = (p.x - self.start.x, p.y - self.start.y);
        let len = (ab.0 * ab.0 + ab.1 * ab.1).sqrt();
        if len == 0.0 {
            return (ap.0 * ap.0 + ap.1 * ap.1).sqrt();
        }
        let t = (ap.0 * ab.0 + ap.1 * ab.1) / len;
        let proj = (ab.0 / len * t, ab.1 / len * t);
        let rej = (ap.0 - proj.0, ap.1 - proj.1);
        (rej.0 * rej.0 + rej.1 * rej.1).sqrt()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    pub fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    pub fn reasonable_point() -> BoxedStrategy<Point> {
        (-1e3..1e3f64, -1e3..1e3f64)
            .prop_map(|(x, y)| Point::new(x, y))
            .boxed()
    }

    #[test]
    fn crossing_diagonals() {
        let s = Segment::new(p(0.0, 0.0), p(10.0, 10.0));
        let t = Segment::new(p(0.0, 10.0), p(10.0, 0.0));
        assert!(s.crosses(&t));
        assert_eq!(s.intersection(&t), Some(p(5.0, 5.0)));
    }

    #[test]
    fn collinear_overlap_is_not_a_crossing() {
        let s = Segment::new(p(0.0, 0.0), p(10.0, 0.0));
        let t = Segment::new(p(5.0, 0.0), p(15.0, 0.0));
        assert!(!s.crosses(&t));
        assert_eq!(s.line_intersection(&t), None);
    }

    #[test]
    fn touching_endpoint_is_a_crossing() {
        let s = Segment::new(p(0.0, 0.0), p(10.0, 0.0));
        let t = Segment::new(p(5.0, 0.0), p(5.0, 5.0));
        assert!(s.crosses(&t));
        assert_eq!(s.intersection(&t), Some(p(5.0, 0.0)));
    }

    #[test]
    fn disjoint_segments() {
        let s = Segment::new(p(0.0, 0.0), p(1.0, 0.0));
        let t = Segment::new(p(5.0, -1.0), p(5.0, 1.0));
        assert!(!s.crosses(&t));
    }

    #[test]
    fn degenerate_segment_never_crosses() {
        let s = Segment::new(p(5.0, 0.0), p(5.0, 0.0));
        let t = Segment::new(p(0.0, 0.0), p(10.0, 0.0));
        assert!(!s.crosses(&t));
        assert!(!t.crosses(&s));
    }

    #[test]
    fn axis_aligned_lines() {
        let vertical = Segment::new(p(3.0, -5.0), p(3.0, 5.0));
        let horizontal = Segment::new(p(-5.0, 2.0), p(5.0, 2.0));
        assert_eq!(vertical.line_coefficients(), (1.0, 0.0, 3.0));
        assert_eq!(horizontal.line_intersection(&vertical), Some(p(3.0, 2.0)));
        assert_eq!(vertical.line_intersection(&horizontal), Some(p(3.0, 2.0)));
    }

    #[test]
    fn parallel_lines() {
        let s = Segment::new(p(0.0, 0.0), p(1.0, 1.0));
        let t = Segment::new(p(0.0, 1.0), p(1.0, 2.0));
        assert_eq!(s.line_intersection(&t), None);
    }

    #[test]
    fn turn_signs() {
        assert_eq!(orientation_triple(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, 0.0)), 0);
        assert_eq!(orientation_triple(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 1.0)), -1);
        assert_eq!(orientation_triple(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, -1.0)), 1);
    }

    #[test]
    fn line_distance() {
        let s = Segment::new(p(0.0, 0.0), p(10.0, 0.0));
        assert_eq!(s.distance_to_line(&p(20.0, 3.0)), 3.0);
        assert_eq!(s.distance_to_line(&p(-4.0, -2.0)), 2.0);

        let degenerate = Segment::new(p(1.0, 1.0), p(1.0, 1.0));
        assert_eq!(degenerate.distance_to_line(&p(4.0, 5.0)), 5.0);
    }

    proptest! {
        #[test]
        fn crossing_is_symmetric(a in reasonable_point(), b in reasonable_point(), c in reasonable_point(), d in reasonable_point()) {
            let s = Segment::new(a, b);
            let t = Segment::new(c, d);
            prop_assert_eq!(s.crosses(&t), t.crosses(&s));
        }
    }
}
