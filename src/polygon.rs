//! Polygons with holes.

use kurbo::{Affine, BezPath};

use crate::{
    crossing,
    geom::Point,
    path::{ClosedPath, OpenPath, CONTOUR_ORIENTATION, HOLE_ORIENTATION},
};

/// An outer contour, minus some holes.
///
/// The holes are supposed to lie inside the contour and to be disjoint from
/// one another. Nothing checks that: it holds because every way of making a
/// new polygon out of an old one preserves it. The contour and the holes
/// should also wind in opposite directions ([`CONTOUR_ORIENTATION`] and
/// [`HOLE_ORIENTATION`]); [`PolygonWithHoles::normalized`] restores that.
///
/// Serializes as `{ "contour": [[x, y], ...], "holes": [[[x, y], ...], ...] }`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PolygonWithHoles {
    /// The outer boundary.
    pub contour: ClosedPath,
    /// The inner boundaries.
    #[serde(default)]
    pub holes: Vec<ClosedPath>,
}

impl PolygonWithHoles {
    /// Creates a polygon from its boundaries, as they are.
    pub fn new(contour: ClosedPath, holes: Vec<ClosedPath>) -> Self {
        Self { contour, holes }
    }

    /// A polygon with no holes.
    pub fn from_contour(contour: ClosedPath) -> Self {
        Self {
            contour,
            holes: Vec::new(),
        }
    }

    /// Is `p` inside the contour but outside every hole?
    ///
    /// An empty contour contains nothing.
    pub fn contains(&self, p: &Point) -> bool {
        self.contour.contains(p) == Some(true)
            && self.holes.iter().all(|h| h.contains(p) != Some(true))
    }

    /// The area of the contour minus the area of the holes.
    pub fn area(&self) -> f64 {
        self.contour.area() - self.holes.iter().map(ClosedPath::area).sum::<f64>()
    }

    /// The total number of vertices, holes included.
    pub fn vertex_count(&self) -> usize {
        self.contour.len() + self.holes.iter().map(ClosedPath::len).sum::<usize>()
    }

    /// All the points where `polyline` crosses the contour, followed by all
    /// the points where it crosses each hole.
    ///
    /// See [`crossing::polyline_crossings`] for how close crossings are merged.
    pub fn crossings(&self, polyline: &OpenPath, min_gap: f64) -> Vec<Point> {
        let mut ret = crossing::polyline_crossings(polyline, &self.contour, min_gap);
        for hole in &self.holes {
            ret.extend(crossing::polyline_crossings(polyline, hole, min_gap));
        }
        ret
    }

    /// Re-orients the contour and holes to the conventional orientations.
    pub fn normalized(&self) -> Self {
        Self {
            contour: self.contour.with_orientation(CONTOUR_ORIENTATION),
            holes: self
                .holes
                .iter()
                .map(|h| h.with_orientation(HOLE_ORIENTATION))
                .collect(),
        }
    }

    /// Simplifies the contour and every hole. See [`ClosedPath::simplified`].
    pub fn simplified(&self, epsilon: f64) -> Self {
        Self {
            contour: self.contour.simplified(epsilon),
            holes: self.holes.iter().map(|h| h.simplified(epsilon)).collect(),
        }
    }

    /// Applies `affine` to every vertex.
    ///
    /// Reflections reverse every orientation, so follow up with
    /// [`normalized`](Self::normalized) if `affine` might contain one.
    pub fn transformed(&self, affine: Affine) -> Self {
        Self {
            contour: self.contour.transformed(affine),
            holes: self.holes.iter().map(|h| h.transformed(affine)).collect(),
        }
    }

    /// The bounding box of the contour.
    pub fn bounding_box(&self) -> kurbo::Rect {
        self.contour.bounding_box()
    }

    /// The contour and holes as subpaths of a single path.
    ///
    /// Since the holes wind the other way, this draws correctly with either fill rule.
    pub fn to_bez_path(&self) -> BezPath {
        let mut ret = BezPath::new();
        self.contour.append_to(&mut ret);
        for hole in &self.holes {
            hole.append_to(&mut ret);
        }
        ret
    }
}
