//! Blank sheets to start cutting from.

use std::f64::consts::PI;

use crate::{
    geom::Point,
    path::{ClosedPath, CONTOUR_ORIENTATION},
    polygon::PolygonWithHoles,
};

/// How many sides we use to approximate an ellipse.
pub const ELLIPSE_SIDES: usize = 64;

/// The outline of an uncut sheet.
///
/// In YAML, this looks like
///
/// ```yaml
/// shape: ellipse
/// center: [0.0, 0.0]
/// width: 300.0
/// height: 200.0
/// ```
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum SheetShape {
    /// An axis-aligned rectangle.
    Rectangle {
        /// The middle of the rectangle.
        center: Point,
        /// Horizontal size.
        width: f64,
        /// Vertical size.
        height: f64,
    },
    /// An ellipse, approximated by a regular polygon with [`ELLIPSE_SIDES`] sides.
    Ellipse {
        /// The middle of the ellipse.
        center: Point,
        /// Horizontal diameter.
        width: f64,
        /// Vertical diameter.
        height: f64,
    },
    /// A rhombus with its corners pointing left, right, up and down.
    Diamond {
        /// The middle of the diamond.
        center: Point,
        /// Horizontal diagonal.
        width: f64,
        /// Vertical diagonal.
        height: f64,
    },
}

/// Vertices of a regular `sides`-gon, stretched to `width` by `height`.
///
/// The first vertex is the rightmost one.
pub fn regular_polygon(center: Point, width: f64, height: f64, sides: usize) -> Vec<Point> {
    (0..sides)
        .map(|i| {
            let theta = i as f64 / sides as f64 * 2.0 * PI;
            Point::new(
                center.x + theta.cos() * width / 2.0,
                center.y + theta.sin() * height / 2.0,
            )
        })
        .collect()
}

impl SheetShape {
    /// The contour of this shape, with the usual contour orientation.
    pub fn contour(&self) -> ClosedPath {
        let points = match *self {
            SheetShape::Rectangle {
                center,
                width,
                height,
            } => {
                let (w, h) = (width / 2.0, height / 2.0);
                vec![
                    Point::new(center.x - w, center.y - h),
                    Point::new(center.x + w, center.y - h),
                    Point::new(center.x + w, center.y + h),
                    Point::new(center.x - w, center.y + h),
                ]
            }
            SheetShape::Ellipse {
                center,
                width,
                height,
            } => regular_polygon(center, width, height, ELLIPSE_SIDES),
            SheetShape::Diamond {
                center,
                width,
                height,
            } => regular_polygon(center, width, height, 4),
        };
        ClosedPath::new(points).with_orientation(CONTOUR_ORIENTATION)
    }

    /// An uncut sheet of this shape.
    pub fn to_polygon(&self) -> PolygonWithHoles {
        PolygonWithHoles::from_contour(self.contour())
    }
}
