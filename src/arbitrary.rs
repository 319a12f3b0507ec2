//! Utilities for fuzz and/or property testing using `arbitrary`.

use arbitrary::Unstructured;

use crate::{
    dissect::apply_polyline,
    geom::Point,
    path::{ClosedPath, OpenPath, CONTOUR_ORIENTATION, HOLE_ORIENTATION},
    polygon::PolygonWithHoles,
    session::{CutEvent, Sheet},
    shapes::SheetShape,
    CutSettings,
};

/// Generate an arbitrary float in some range.
pub fn float_in_range(
    start: f64,
    end: f64,
    u: &mut Unstructured<'_>,
) -> Result<f64, arbitrary::Error> {
    let num: u32 = u.arbitrary()?;
    let t = num as f64 / u32::MAX as f64;
    Ok((1.0 - t) * start + t * end)
}

/// Generate a float in some range, but give it a chance to be exactly
/// equal (or very close) to another float.
///
/// Polygon vertices that line up exactly with a cut are where the crossing
/// logic is most fragile, so we want plenty of them.
fn another_float_in_range(
    orig: f64,
    start: f64,
    end: f64,
    u: &mut Unstructured<'_>,
) -> Result<f64, arbitrary::Error> {
    match u.int_in_range(0..=2)? {
        0 => Ok(orig.clamp(start, end)),
        1 => {
            let ulps: i32 = u.int_in_range(-32..=32)?;
            let scale = 1.0f64 + ulps as f64 * f64::EPSILON;
            Ok((orig * scale).clamp(start, end))
        }
        _ => float_in_range(start, end, u),
    }
}

/// Generate a point in the square `[-size, size] x [-size, size]`.
pub fn point(size: f64, u: &mut Unstructured<'_>) -> Result<Point, arbitrary::Error> {
    Ok(Point::new(
        float_in_range(-size, size, u)?,
        float_in_range(-size, size, u)?,
    ))
}

/// Generate a point, with a chance to share a coordinate with `prev`.
fn another_point(
    prev: &Point,
    size: f64,
    u: &mut Unstructured<'_>,
) -> Result<Point, arbitrary::Error> {
    Ok(Point::new(
        another_float_in_range(prev.x, -size, size, u)?,
        another_float_in_range(prev.y, -size, size, u)?,
    ))
}

/// Generate a polyline with at least two points, all within `size` of the origin.
pub fn polyline(size: f64, u: &mut Unstructured<'_>) -> Result<OpenPath, arbitrary::Error> {
    let len = u.int_in_range(2..=12)?;
    let mut points = vec![point(size, u)?];
    for _ in 1..len {
        let next = another_point(&points[points.len() - 1], size, u)?;
        points.push(next);
    }
    Ok(OpenPath::new(points))
}

/// Generate a sheet shape centered near the origin, fitting in `[-size, size]` squared.
pub fn sheet_shape(size: f64, u: &mut Unstructured<'_>) -> Result<SheetShape, arbitrary::Error> {
    let center = point(size / 4.0, u)?;
    let width = float_in_range(size / 8.0, size, u)?;
    let height = float_in_range(size / 8.0, size, u)?;
    Ok(match u.int_in_range(0..=2)? {
        0 => SheetShape::Rectangle {
            center,
            width,
            height,
        },
        1 => SheetShape::Ellipse {
            center,
            width,
            height,
        },
        _ => SheetShape::Diamond {
            center,
            width,
            height,
        },
    })
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> ClosedPath {
    ClosedPath::new(vec![
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ])
}

/// Generate a square of side `2 * size` with up to three rectangular holes in it.
///
/// The holes live in separate vertical strips, so they never overlap.
pub fn polygon_with_holes(
    size: f64,
    u: &mut Unstructured<'_>,
) -> Result<PolygonWithHoles, arbitrary::Error> {
    let contour = rect(-size, -size, size, size).with_orientation(CONTOUR_ORIENTATION);
    let hole_count = u.int_in_range(0..=3)?;
    let strip = 2.0 * size / 3.0;
    let mut holes = Vec::new();
    for i in 0..hole_count {
        let left = -size + i as f64 * strip;
        let x0 = float_in_range(left + strip * 0.1, left + strip * 0.4, u)?;
        let x1 = float_in_range(left + strip * 0.6, left + strip * 0.9, u)?;
        let y0 = float_in_range(-size * 0.9, -size * 0.1, u)?;
        let y1 = float_in_range(size * 0.1, size * 0.9, u)?;
        holes.push(rect(x0, y0, x1, y1).with_orientation(HOLE_ORIENTATION));
    }
    Ok(PolygonWithHoles::new(contour, holes))
}

/// Generate a sequence of drag steps, each starting near where the last one ended.
pub fn drags(
    size: f64,
    u: &mut Unstructured<'_>,
) -> Result<Vec<(Point, Point)>, arbitrary::Error> {
    let count = u.int_in_range(1..=24)?;
    let mut ret = Vec::with_capacity(count);
    let mut from = point(size, u)?;
    for _ in 0..count {
        let to = point(size, u)?;
        ret.push((from, to));
        // Usually continue from where we stopped, sometimes jump.
        from = if u.ratio(4, 5)? { to } else { point(size, u)? };
    }
    Ok(ret)
}

/// Property checks that are shared between unit tests and fuzz targets.
pub mod arbtests {
    use super::*;

    fn check_finite(poly: &PolygonWithHoles) {
        let points = poly
            .contour
            .points()
            .iter()
            .chain(poly.holes.iter().flat_map(|h| h.points()));
        for p in points {
            assert!(p.is_finite(), "non-finite vertex {p:?}");
        }
    }

    /// Applying any cut to any polygon either fails cleanly or gives one or
    /// two polygons with finite, correctly wound boundaries.
    pub fn apply_any_cut(u: &mut Unstructured<'_>) -> Result<(), arbitrary::Error> {
        let poly = polygon_with_holes(100.0, u)?;
        let cut = polyline(120.0, u)?;

        if let Ok(pieces) = apply_polyline(&poly, &cut) {
            assert!(!pieces.is_empty());
            for piece in &pieces {
                check_finite(piece);
                // Slivers are too thin to have a reliable winding direction.
                if piece.contour.area() > 1e-3 {
                    assert_eq!(piece.contour.orientation(), Some(CONTOUR_ORIENTATION));
                }
                for hole in piece.holes.iter().filter(|h| h.area() > 1e-3) {
                    assert_eq!(hole.orientation(), Some(HOLE_ORIENTATION));
                }
            }
        }
        Ok(())
    }

    /// Dragging around on a sheet never fails, never loses the last piece, and
    /// keeps the pending cut consistent with the reported events.
    pub fn drag_around(u: &mut Unstructured<'_>) -> Result<(), arbitrary::Error> {
        let shape = sheet_shape(100.0, u)?;
        let settings = CutSettings::new().with_manual_scrap_selection(u.arbitrary()?);
        let mut sheet = Sheet::new(shape, settings);

        for (from, to) in drags(120.0, u)? {
            let had_pending = sheet.pending_cut().is_some();
            let event = match sheet.cut(from, to) {
                Ok(event) => event,
                Err(e) => panic!("finite drag failed: {e}"),
            };
            match event {
                CutEvent::Started | CutEvent::Extended => {
                    assert!(sheet.pending_cut().is_some());
                }
                CutEvent::Split | CutEvent::HoleCut | CutEvent::Rejected(_) => {
                    assert!(sheet.pending_cut().is_none());
                }
                CutEvent::Abandoned => {
                    assert_eq!(sheet.pending_cut().is_some(), had_pending);
                }
                CutEvent::Ignored => {}
            }
            assert!(!sheet.pieces().is_empty());
            for piece in sheet.pieces().iter().chain(sheet.scraps()) {
                check_finite(&piece.shape);
            }
            if let Some(cut) = sheet.pending_cut() {
                assert!(cut.points().iter().all(Point::is_finite));
            }
        }
        Ok(())
    }
}
