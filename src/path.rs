//! Open and closed polylines.
//!
//! A cut is an [`OpenPath`]: its edges run from each point to the next, and
//! that's it. Contours and holes are [`ClosedPath`]s, whose edges also include
//! the one from the last point back to the first. Keeping the two apart means
//! nobody has to remember to close a path before asking for its area.

use kurbo::{Affine, BezPath};

use crate::geom::{Point, Segment};

/// The winding direction of a closed path.
///
/// The names assume that `y` grows *downwards*, as it does on a screen. With
/// `y` growing upwards, the two directions swap names but nothing else
/// changes: [`Orientation::Clockwise`] always means positive
/// [signed area](ClosedPath::signed_area).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Orientation {
    /// Positive signed area.
    Clockwise,
    /// Negative signed area.
    CounterClockwise,
}

impl Orientation {
    /// The other orientation.
    pub fn reversed(self) -> Self {
        match self {
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::CounterClockwise => Orientation::Clockwise,
        }
    }
}

/// The orientation that contours are kept in.
pub const CONTOUR_ORIENTATION: Orientation = Orientation::Clockwise;

/// The orientation that holes are kept in. Always the opposite of [`CONTOUR_ORIENTATION`].
pub const HOLE_ORIENTATION: Orientation = Orientation::CounterClockwise;

pub(crate) fn pairs<T>(xs: &[T]) -> impl Iterator<Item = (&T, &T)> {
    xs.windows(2).map(|pair| (&pair[0], &pair[1]))
}

pub(crate) fn cyclic_pairs<T>(xs: &[T]) -> impl Iterator<Item = (&T, &T)> {
    pairs(xs).chain(xs.last().zip(xs.first()))
}

fn sign(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

fn bounding_box(points: &[Point]) -> kurbo::Rect {
    let mut points = points.iter();
    let Some(first) = points.next() else {
        return kurbo::Rect::ZERO;
    };
    points.fold(
        kurbo::Rect::from_points(first.to_kurbo(), first.to_kurbo()),
        |rect, p| rect.union_pt(p.to_kurbo()),
    )
}

/// An open polyline, like a cut in progress.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct OpenPath {
    points: Vec<Point>,
}

impl OpenPath {
    /// Creates an open path through `points`, in order.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// The points, in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Takes the points out.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// The number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no points at all.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The starting point, which we call the front.
    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    /// The end point, which we call the back.
    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    /// Appends a point at the back.
    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    /// Swaps the front and the back.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// A copy of this path, walked in the other direction.
    pub fn reversed(&self) -> Self {
        let mut ret = self.clone();
        ret.reverse();
        ret
    }

    /// Iterates over the segments between consecutive points.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        pairs(&self.points).map(|(p, q)| Segment::new(*p, *q))
    }

    /// The first segment, if there are at least two points.
    pub fn first_segment(&self) -> Option<Segment> {
        self.segments().next()
    }

    /// The last segment, if there are at least two points.
    pub fn last_segment(&self) -> Option<Segment> {
        match self.points.as_slice() {
            [.., p, q] => Some(Segment::new(*p, *q)),
            _ => None,
        }
    }

    /// The points strictly between the two endpoints.
    pub fn interior(&self) -> &[Point] {
        if self.points.len() < 2 {
            &[]
        } else {
            &self.points[1..self.points.len() - 1]
        }
    }

    /// Reduces the number of points, keeping the endpoints. See [`simplify`](crate::simplify::simplify).
    pub fn simplified(&self, epsilon: f64) -> Self {
        Self::new(crate::simplify::simplify(&self.points, epsilon))
    }

    /// Applies `affine` to every point.
    pub fn transformed(&self, affine: Affine) -> Self {
        Self::new(
            self.points
                .iter()
                .map(|p| (affine * p.to_kurbo()).into())
                .collect(),
        )
    }

    /// The smallest axis-aligned rectangle containing every point.
    pub fn bounding_box(&self) -> kurbo::Rect {
        bounding_box(&self.points)
    }

    /// Converts to an open `kurbo` path, for rendering.
    pub fn to_bez_path(&self) -> BezPath {
        let mut ret = BezPath::new();
        let mut points = self.points.iter();
        if let Some(p) = points.next() {
            ret.move_to(p.to_kurbo());
        }
        for p in points {
            ret.line_to(p.to_kurbo());
        }
        ret
    }
}

impl From<Vec<Point>> for OpenPath {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

/// A closed polyline, like a contour or a hole.
///
/// The closing vertex is never repeated: the edge from the last point back to
/// the first is implied.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "Vec<Point>", into = "Vec<Point>")]
pub struct ClosedPath {
    points: Vec<Point>,
}

impl From<Vec<Point>> for ClosedPath {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl From<ClosedPath> for Vec<Point> {
    fn from(path: ClosedPath) -> Self {
        path.points
    }
}

impl ClosedPath {
    /// Creates a closed path, dropping any trailing copies of the first point.
    pub fn new(mut points: Vec<Point>) -> Self {
        while points.len() > 1 && points.last() == points.first() {
            points.pop();
        }
        Self { points }
    }

    /// The vertices, without the closing one.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The number of vertices, which is also the number of edges.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no vertices at all.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over all edges, including the closing one.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        cyclic_pairs(&self.points).map(|(p, q)| Segment::new(*p, *q))
    }

    /// The edge starting at vertex `idx`, wrapping around.
    pub fn edge(&self, idx: usize) -> Segment {
        let n = self.points.len();
        Segment::new(self.points[idx % n], self.points[(idx + 1) % n])
    }

    /// The shoelace sum, halved.
    ///
    /// Positive for [`Orientation::Clockwise`] paths (in a `y`-down frame).
    pub fn signed_area(&self) -> f64 {
        cyclic_pairs(&self.points)
            .map(|(p, q)| p.x * q.y - q.x * p.y)
            .sum::<f64>()
            / 2.0
    }

    /// The enclosed area, regardless of orientation.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Which way does this path wind?
    ///
    /// Returns `None` for paths with zero signed area, which have no well-defined orientation.
    pub fn orientation(&self) -> Option<Orientation> {
        let area = self.signed_area();
        if area > 0.0 {
            Some(Orientation::Clockwise)
        } else if area < 0.0 {
            Some(Orientation::CounterClockwise)
        } else {
            None
        }
    }

    /// A copy of this path, walked in the other direction.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Returns this path winding in direction `target`.
    ///
    /// `target` is interpreted in the `y`-down frame (see [`Orientation`]).
    /// Paths that already match, and paths with no orientation at all, come
    /// back unchanged.
    pub fn with_orientation(&self, target: Orientation) -> Self {
        match self.orientation() {
            Some(o) if o != target => self.reversed(),
            _ => self.clone(),
        }
    }

    /// Is `p` inside this path?
    ///
    /// This is an even-odd ray cast towards increasing `x`. Each edge is
    /// tested against a ray that reaches exactly as far as the edge does, and
    /// horizontal edges never count as crossings. When the ray passes through
    /// a vertex, both edges meeting there are reported as crossings. We
    /// remember which side (above or below the ray) the previous such edge
    /// left towards, and if the next one leaves towards the opposite side the
    /// pair is a single real crossing, so one of them is taken back. The
    /// closing edge is also paired up with the first vertex touch. That
    /// pairing can misclassify a point away from the boundary whose ray
    /// passes through a vertex on the first or last edge.
    ///
    /// With this rule, points on left and top edges tend to be inside and
    /// points on right and bottom edges tend to be outside.
    ///
    /// Returns `None` if the path is empty.
    pub fn contains(&self, p: &Point) -> Option<bool> {
        if self.points.is_empty() {
            return None;
        }

        let last_idx = self.points.len() - 1;
        let mut crossings: i32 = 0;
        let mut prev_side: Option<i8> = None;
        let mut first_side: Option<i8> = None;
        let cancels = |a: Option<i8>, b: Option<i8>| matches!((a, b), (Some(a), Some(b)) if a + b == 0);

        for (idx, edge) in self.edges().enumerate() {
            let reach = edge.max_x();
            let ray_end = if reach > p.x {
                Point::new(reach, p.y)
            } else {
                *p
            };
            if !edge.crosses(&Segment::new(*p, ray_end)) {
                continue;
            }

            if !edge.is_horizontal() {
                crossings += 1;
            }

            let touches = p.y == edge.start.y || p.y == edge.end.y;
            let side = if p.y == edge.start.y {
                let side = sign(edge.end.y - p.y);
                if first_side.is_none() && side != 0 {
                    first_side = Some(side);
                }
                Some(side)
            } else if p.y == edge.end.y {
                Some(sign(edge.start.y - p.y))
            } else {
                None
            };

            if cancels(prev_side, side)
                || (touches
                    && idx == last_idx
                    && (cancels(side, first_side) || cancels(prev_side, first_side)))
            {
                crossings -= 1;
            }

            if side != Some(0) {
                prev_side = side;
            }
        }

        Some(crossings % 2 == 1)
    }

    /// Is every vertex of `self` inside `outer`?
    ///
    /// This only samples vertices. That's enough for the non-crossing paths
    /// we deal with, but it isn't a containment proof in general.
    pub fn is_inside(&self, outer: &ClosedPath) -> bool {
        self.points.iter().all(|p| outer.contains(p) == Some(true))
    }

    /// Reduces the number of points. See [`simplify`](crate::simplify::simplify).
    ///
    /// The first point is used as both anchors, so it always survives.
    pub fn simplified(&self, epsilon: f64) -> Self {
        let Some(first) = self.points.first() else {
            return self.clone();
        };
        let mut closed = self.points.clone();
        closed.push(*first);
        Self::new(crate::simplify::simplify(&closed, epsilon))
    }

    /// Rotates the vertex list so that it starts at vertex `idx`. The path itself doesn't change.
    pub fn rotated_to(&self, idx: usize) -> Self {
        let mut points = self.points.clone();
        if !points.is_empty() {
            points.rotate_left(idx % self.points.len());
        }
        Self { points }
    }

    /// Applies `affine` to every vertex. Reflections reverse the orientation.
    pub fn transformed(&self, affine: Affine) -> Self {
        Self::new(
            self.points
                .iter()
                .map(|p| (affine * p.to_kurbo()).into())
                .collect(),
        )
    }

    /// The smallest axis-aligned rectangle containing every vertex.
    pub fn bounding_box(&self) -> kurbo::Rect {
        bounding_box(&self.points)
    }

    /// Converts to a closed `kurbo` path, for rendering.
    pub fn to_bez_path(&self) -> BezPath {
        let mut ret = BezPath::new();
        self.append_to(&mut ret);
        ret
    }

    pub(crate) fn append_to(&self, path: &mut BezPath) {
        let mut points = self.points.iter();
        let Some(first) = points.next() else {
            return;
        };
        path.move_to(first.to_kurbo());
        for p in points {
            path.line_to(p.to_kurbo());
        }
        path.close_path();
    }
}
