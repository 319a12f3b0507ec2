//! Cutting polygons with polylines.
//!
//! Every function here is pure: it borrows its inputs and either returns a
//! complete replacement or an error, in which case the caller still has the
//! original.
//!
//! The polyline is assumed to cross the boundary at its two end segments and
//! nowhere else; the session in [`crate::session`] makes sure of that by
//! applying a cut as soon as it crosses the boundary twice.

use arrayvec::ArrayVec;

use crate::{
    crossing::{polyline_crossings, segment_crossings, CROSSING_GAP},
    geom::{Point, Segment},
    path::{ClosedPath, OpenPath, CONTOUR_ORIENTATION, HOLE_ORIENTATION},
    polygon::PolygonWithHoles,
    Error,
};

/// Progress of one of the two loops assembled by [`split_polygon_with_polyline`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// We haven't found the edge where this loop leaves the polyline.
    Searching,
    /// We just found that edge; the next boundary vertex goes in.
    Starting,
    /// Collecting boundary vertices.
    Adding,
    /// The loop made it back to the polyline.
    Done,
}

impl LoopState {
    fn is_collecting(self) -> bool {
        matches!(self, LoopState::Starting | LoopState::Adding)
    }
}

struct Loop {
    points: Vec<Point>,
    state: LoopState,
}

impl Loop {
    fn new(points: Vec<Point>) -> Self {
        Loop {
            points,
            state: LoopState::Searching,
        }
    }

    fn start(&mut self, p: Point) {
        self.points.push(p);
        self.state = LoopState::Starting;
    }

    fn finish(&mut self, p: Point) {
        self.points.push(p);
        self.state = LoopState::Done;
    }
}

/// Splits `polygon` in two along `polyline`.
///
/// The first segment of `polyline` must cross the boundary, and so must the
/// last one; the rest of the polyline should be inside. We walk the boundary
/// twice around, building two loops. The first follows the polyline forwards
/// and then the boundary, from where the last segment crosses it to where
/// the first segment does. The second follows the polyline backwards, then
/// the boundary from the first segment's crossing to the last one's.
///
/// If both crossings are on the same edge, a loop closes as soon as it opens.
/// If the polyline has just one segment, its first and last segments are
/// the same, and we make sure the two loops start at different crossings.
///
/// Both loops follow the boundary in its own direction, so they have the
/// same orientation as `polygon`.
pub fn split_polygon_with_polyline(
    polygon: &ClosedPath,
    polyline: &OpenPath,
) -> Result<[ClosedPath; 2], Error> {
    let (Some(first), Some(last)) = (polyline.first_segment(), polyline.last_segment()) else {
        return Err(Error::TooShort {
            len: polyline.len(),
        });
    };
    let single_segment = first == last;

    let mut fwd = Loop::new(polyline.interior().to_vec());
    let mut back = Loop::new(polyline.interior().iter().rev().copied().collect());

    for i in 0..(2 * polygon.len()) {
        let edge = polygon.edge(i);

        if back.state.is_collecting() {
            back.points.push(edge.start);
            back.state = LoopState::Adding;
        }
        if fwd.state.is_collecting() {
            fwd.points.push(edge.start);
            fwd.state = LoopState::Adding;
        }

        if let Some(x) = last.intersection(&edge) {
            if back.state == LoopState::Adding {
                back.finish(x);
            }
            if fwd.state == LoopState::Searching {
                fwd.start(x);
                if !single_segment {
                    if let Some(y) = first.intersection(&Segment::new(x, edge.end)) {
                        fwd.finish(y);
                    }
                }
            }
        }

        if let Some(x) = first.intersection(&edge) {
            if back.state == LoopState::Searching && fwd.state != LoopState::Starting {
                back.start(x);
                if !single_segment {
                    if let Some(y) = last.intersection(&Segment::new(x, edge.end)) {
                        back.finish(y);
                    }
                }
            }
            if fwd.state == LoopState::Adding {
                fwd.finish(x);
            }
        }
    }

    if fwd.state == LoopState::Done && back.state == LoopState::Done {
        Ok([ClosedPath::new(fwd.points), ClosedPath::new(back.points)])
    } else {
        log::debug!(
            "split walk ended with {:?} and {:?}",
            fwd.state,
            back.state
        );
        Err(Error::UnclosedSplit {
            first_closed: fwd.state == LoopState::Done,
            second_closed: back.state == LoopState::Done,
        })
    }
}

/// Opens up `boundary` where `segment` first crosses it.
///
/// The result starts at the crossing point, runs once around the boundary in
/// its own direction, and ends at the crossing point again.
pub fn reorder_with_crossing_segment(
    boundary: &ClosedPath,
    segment: &Segment,
) -> Result<Vec<Point>, Error> {
    let points = boundary.points();
    for (idx, edge) in boundary.edges().enumerate() {
        if let Some(x) = segment.intersection(&edge) {
            let mut ret = Vec::with_capacity(points.len() + 2);
            ret.push(x);
            ret.extend_from_slice(&points[idx + 1..]);
            ret.extend_from_slice(&points[..=idx]);
            ret.push(x);
            return Ok(ret);
        }
    }
    Err(Error::MissedBoundary)
}

fn splice(
    first: &ClosedPath,
    first_segment: &Segment,
    to_second: &[Point],
    second: &ClosedPath,
    second_segment: &Segment,
    to_first: &[Point],
) -> Result<ClosedPath, Error> {
    let mut ret = reorder_with_crossing_segment(first, first_segment)?;
    ret.extend_from_slice(to_second);
    ret.extend(reorder_with_crossing_segment(second, second_segment)?);
    ret.extend_from_slice(to_first);
    Ok(ClosedPath::new(ret))
}

/// Opens a hole up to the outside.
///
/// One end of `polyline` must cross the contour, and the other end must cross
/// one of the holes. The contour and the hole get cut open where the
/// polyline crosses them, and joined by two copies of the polyline into a
/// single new contour. The hole is gone from the result.
pub fn merge_contour_and_hole(
    polygon: &PolygonWithHoles,
    polyline: &OpenPath,
) -> Result<PolygonWithHoles, Error> {
    let (Some(first), Some(last)) = (polyline.first_segment(), polyline.last_segment()) else {
        return Err(Error::TooShort {
            len: polyline.len(),
        });
    };
    let mut c2h = polyline.clone();
    let mut h2c = polyline.reversed();
    if !segment_crossings(last, &polygon.contour, CROSSING_GAP).is_empty() {
        std::mem::swap(&mut c2h, &mut h2c);
    } else if segment_crossings(first, &polygon.contour, CROSSING_GAP).is_empty() {
        return Err(Error::NoContourEnd);
    }

    let contour_segment = c2h.first_segment().ok_or(Error::NoContourEnd)?;
    let hole_segment = h2c.first_segment().ok_or(Error::NoHoleEnd)?;
    for (idx, hole) in polygon.holes.iter().enumerate() {
        let crossings = segment_crossings(hole_segment, hole, CROSSING_GAP);
        if crossings.is_empty() {
            continue;
        }
        if crossings.len() > 1 {
            log::warn!("cut crosses hole {idx} {} times", crossings.len());
        }

        let contour = splice(
            &polygon.contour,
            &contour_segment,
            c2h.interior(),
            hole,
            &hole_segment,
            h2c.interior(),
        )?;
        let mut holes = polygon.holes.clone();
        holes.remove(idx);
        log::debug!("merged hole {idx} into the contour");
        return Ok(PolygonWithHoles::new(contour, holes));
    }
    Err(Error::NoHoleEnd)
}

/// Handles a cut running from a hole to a hole.
///
/// If the two ends cross different holes, the holes are bridged into one
/// bigger hole (listed first) and there's still a single polygon. If they
/// cross the same hole, the cut slices off a piece: the hole gets split, one
/// half becoming a bigger hole and the other the contour of a new polygon.
/// Any other holes go with whichever of the two polygons contains them. The
/// polygon that keeps the original contour comes first.
///
/// When an end crosses several holes, the one listed first wins.
pub fn split_or_bridge_holes(
    polygon: &PolygonWithHoles,
    polyline: &OpenPath,
) -> Result<ArrayVec<PolygonWithHoles, 2>, Error> {
    let (Some(first), Some(last)) = (polyline.first_segment(), polyline.last_segment()) else {
        return Err(Error::TooShort {
            len: polyline.len(),
        });
    };
    let a2b_segment = first;
    let b2a_segment = Segment::new(last.end, last.start);
    let crossed_by = |seg: Segment| {
        polygon
            .holes
            .iter()
            .position(|h| !segment_crossings(seg, h, CROSSING_GAP).is_empty())
    };
    let (Some(a_idx), Some(b_idx)) = (crossed_by(a2b_segment), crossed_by(b2a_segment)) else {
        return Err(Error::UnroutedHoleEnds {
            start_hole: crossed_by(a2b_segment),
            end_hole: crossed_by(b2a_segment),
        });
    };

    let mut ret = ArrayVec::new();
    if a_idx != b_idx {
        let b2a = polyline.reversed();
        let merged = splice(
            &polygon.holes[a_idx],
            &a2b_segment,
            polyline.interior(),
            &polygon.holes[b_idx],
            &b2a_segment,
            b2a.interior(),
        )?;
        let mut holes = vec![merged];
        holes.extend(
            polygon
                .holes
                .iter()
                .enumerate()
                .filter(|(idx, _)| *idx != a_idx && *idx != b_idx)
                .map(|(_, h)| h.clone()),
        );
        log::debug!("bridged holes {a_idx} and {b_idx}");
        ret.push(PolygonWithHoles::new(polygon.contour.clone(), holes));
        return Ok(ret);
    }

    let [one, two] = split_polygon_with_polyline(&polygon.holes[a_idx], polyline)?;
    let (new_hole, cutout) = match (one.orientation(), two.orientation()) {
        (Some(HOLE_ORIENTATION), Some(CONTOUR_ORIENTATION)) => (one, two),
        (Some(CONTOUR_ORIENTATION), Some(HOLE_ORIENTATION)) => (two, one),
        _ => return Err(Error::UnclassifiedHoleSplit),
    };
    let (cutout_holes, mut holes): (Vec<_>, Vec<_>) = polygon
        .holes
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != a_idx)
        .map(|(_, h)| h.clone())
        .partition(|h| h.is_inside(&cutout));
    holes.push(new_hole);
    log::debug!(
        "split hole {a_idx}, moving {} holes to the new piece",
        cutout_holes.len()
    );
    ret.push(PolygonWithHoles::new(polygon.contour.clone(), holes));
    ret.push(PolygonWithHoles::new(cutout, cutout_holes));
    Ok(ret)
}

/// Applies a finished cut to a polygon.
///
/// This counts how many times `polyline` crosses the contour and the holes,
/// and decides what to do:
///
/// - two contour crossings: split the contour with
///   [`split_polygon_with_polyline`]; each half keeps the holes inside it.
/// - two hole crossings: [`split_or_bridge_holes`].
/// - one of each: [`merge_contour_and_hole`].
///
/// Anything else leaves the polygon alone, and the result is just a copy of
/// it. The results are [normalized](PolygonWithHoles::normalized).
pub fn apply_polyline(
    polygon: &PolygonWithHoles,
    polyline: &OpenPath,
) -> Result<ArrayVec<PolygonWithHoles, 2>, Error> {
    let contour_crossings = polyline_crossings(polyline, &polygon.contour, CROSSING_GAP).len();
    let hole_crossings: usize = polygon
        .holes
        .iter()
        .map(|h| polyline_crossings(polyline, h, CROSSING_GAP).len())
        .sum();
    log::debug!("cut crosses the contour {contour_crossings} times and holes {hole_crossings} times");

    let mut ret = ArrayVec::new();
    if contour_crossings == 2 {
        for contour in split_polygon_with_polyline(&polygon.contour, polyline)? {
            let holes = polygon
                .holes
                .iter()
                .filter(|h| h.is_inside(&contour))
                .cloned()
                .collect();
            ret.push(PolygonWithHoles::new(contour, holes));
        }
    } else if hole_crossings == 2 {
        ret = split_or_bridge_holes(polygon, polyline)?;
    } else if contour_crossings + hole_crossings == 2 {
        ret.push(merge_contour_and_hole(polygon, polyline)?);
    } else {
        ret.push(polygon.clone());
    }

    for poly in &mut ret {
        *poly = poly.normalized();
    }
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    use super::*;
    use crate::geom::tests::p;

    fn square(x0: f64, y0: f64, size: f64) -> ClosedPath {
        ClosedPath::new(vec![
            p(x0, y0),
            p(x0 + size, y0),
            p(x0 + size, y0 + size),
            p(x0, y0 + size),
        ])
    }

    fn hole(x0: f64, y0: f64, size: f64) -> ClosedPath {
        square(x0, y0, size).with_orientation(HOLE_ORIENTATION)
    }

    fn cut(points: &[(f64, f64)]) -> OpenPath {
        OpenPath::new(points.iter().map(|&(x, y)| p(x, y)).collect())
    }

    fn total_area(polys: &[PolygonWithHoles]) -> f64 {
        polys.iter().map(PolygonWithHoles::area).sum()
    }

    #[test]
    fn split_square_straight() {
        let [a, b] =
            split_polygon_with_polyline(&square(0.0, 0.0, 10.0), &cut(&[(5.0, -5.0), (5.0, 15.0)]))
                .unwrap();
        insta::assert_debug_snapshot!((a.points(), b.points()), @r"
        (
            [
                (5.0, 0.0),
                (10.0, 0.0),
                (10.0, 10.0),
                (5.0, 10.0),
            ],
            [
                (5.0, 10.0),
                (0.0, 10.0),
                (0.0, 0.0),
                (5.0, 0.0),
            ],
        )
        ");
        assert_eq!(a.area() + b.area(), 100.0);
        assert_eq!(a.orientation(), Some(CONTOUR_ORIENTATION));
        assert_eq!(b.orientation(), Some(CONTOUR_ORIENTATION));
    }

    // Grid points off the cut that are in neither or both of the pieces.
    fn misplaced_samples(pieces: &[ClosedPath], cut: &Segment, size: f64, n: usize) -> Vec<Point> {
        let pieces: Vec<_> = pieces
            .iter()
            .map(|c| PolygonWithHoles::from_contour(c.clone()))
            .collect();
        let step = size / n as f64;
        (0..n)
            .flat_map(|i| (0..n).map(move |j| p((i as f64 + 0.5) * step, (j as f64 + 0.5) * step)))
            .filter(|q| cut.distance_to_line(q) > 1e-6)
            .filter(|q| pieces.iter().filter(|piece| piece.contains(q)).count() != 1)
            .collect()
    }

    #[test]
    fn split_partitions_the_square() {
        let (start, end) = (p(3.3, -2.0), p(6.1, 12.0));
        let polyline = OpenPath::new(vec![start, end]);
        let pieces = split_polygon_with_polyline(&square(0.0, 0.0, 10.0), &polyline).unwrap();
        assert_eq!(misplaced_samples(&pieces, &Segment::new(start, end), 10.0, 100), vec![]);
    }

    #[test]
    fn split_square_with_a_bend() {
        let polyline = cut(&[(5.0, -5.0), (5.0, 5.0), (15.0, 5.0)]);
        let [a, b] = split_polygon_with_polyline(&square(0.0, 0.0, 10.0), &polyline).unwrap();
        assert_eq!(
            a.points(),
            &[p(5.0, 5.0), p(10.0, 5.0), p(10.0, 10.0), p(0.0, 10.0), p(0.0, 0.0), p(5.0, 0.0)]
        );
        assert_eq!(b.points(), &[p(5.0, 5.0), p(5.0, 0.0), p(10.0, 0.0), p(10.0, 5.0)]);
        assert_eq!(a.area(), 75.0);
        assert_eq!(b.area(), 25.0);
    }

    #[test]
    fn split_with_both_crossings_on_one_edge() {
        // A U-shaped cut into the top edge.
        let polyline = cut(&[(2.0, -2.0), (2.0, 5.0), (8.0, 5.0), (8.0, -2.0)]);
        let [a, b] = split_polygon_with_polyline(&square(0.0, 0.0, 10.0), &polyline).unwrap();
        assert_eq!(b.points(), &[p(8.0, 5.0), p(2.0, 5.0), p(2.0, 0.0), p(8.0, 0.0)]);
        assert_eq!(a.area(), 70.0);
        assert_eq!(b.area(), 30.0);
    }

    #[test]
    fn split_failure() {
        // Only one end crosses, so the second loop never closes.
        let polyline = cut(&[(5.0, -5.0), (5.0, 5.0)]);
        assert_matches!(
            split_polygon_with_polyline(&square(0.0, 0.0, 10.0), &polyline),
            Err(Error::UnclosedSplit {
                first_closed: true,
                second_closed: false
            })
        );
        assert_matches!(
            split_polygon_with_polyline(&square(0.0, 0.0, 10.0), &cut(&[(1.0, 1.0)])),
            Err(Error::TooShort { len: 1 })
        );
    }

    #[test]
    fn reorder_square() {
        let seg = Segment::new(p(5.0, 5.0), p(15.0, 5.0));
        let reordered = reorder_with_crossing_segment(&square(0.0, 0.0, 10.0), &seg).unwrap();
        assert_eq!(
            reordered,
            vec![
                p(10.0, 5.0),
                p(10.0, 10.0),
                p(0.0, 10.0),
                p(0.0, 0.0),
                p(10.0, 0.0),
                p(10.0, 5.0)
            ]
        );

        let miss = Segment::new(p(5.0, 5.0), p(6.0, 5.0));
        assert_matches!(
            reorder_with_crossing_segment(&square(0.0, 0.0, 10.0), &miss),
            Err(Error::MissedBoundary)
        );
    }

    #[test]
    fn merge_hole_into_contour() {
        let poly = PolygonWithHoles::new(square(0.0, 0.0, 30.0), vec![hole(10.0, 10.0, 10.0)]);
        let polyline = cut(&[(15.0, -5.0), (15.0, 15.0)]);
        let merged = merge_contour_and_hole(&poly, &polyline).unwrap();
        assert!(merged.holes.is_empty());
        assert_eq!(merged.contour.len(), 12);
        assert_eq!(merged.area(), 800.0);
        assert!(!merged.contains(&p(12.0, 12.0)));
        assert!(merged.contains(&p(25.0, 25.0)));

        // Reversing the cut doesn't matter.
        let reversed = merge_contour_and_hole(&poly, &polyline.reversed()).unwrap();
        assert_eq!(reversed, merged);
    }

    #[test]
    fn merge_routing_errors() {
        let poly = PolygonWithHoles::new(square(0.0, 0.0, 30.0), vec![hole(10.0, 10.0, 10.0)]);
        assert_matches!(
            merge_contour_and_hole(&poly, &cut(&[(5.0, 5.0), (5.0, 8.0)])),
            Err(Error::NoContourEnd)
        );
        assert_matches!(
            merge_contour_and_hole(&poly, &cut(&[(5.0, -5.0), (5.0, 8.0)])),
            Err(Error::NoHoleEnd)
        );
    }

    #[test]
    fn bridge_two_holes() {
        let poly = PolygonWithHoles::new(
            square(0.0, 0.0, 50.0),
            vec![hole(5.0, 5.0, 10.0), hole(30.0, 5.0, 10.0), hole(5.0, 30.0, 10.0)],
        );
        let polyline = cut(&[(10.0, 10.0), (22.0, 10.0), (35.0, 10.0)]);
        let out = split_or_bridge_holes(&poly, &polyline).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].contour, poly.contour);
        assert_eq!(out[0].holes.len(), 2);
        assert_eq!(out[0].holes[1], poly.holes[2]);
        assert_eq!(out[0].holes[0].area(), 200.0);
        assert!(!out[0].contains(&p(10.0, 8.0)));
        assert!(!out[0].contains(&p(35.0, 8.0)));
        assert!(out[0].contains(&p(22.0, 12.0)));
    }

    #[test]
    fn slice_off_a_hole() {
        // A U-shaped cut from the top of a hole to its bottom, around its right side.
        let poly = PolygonWithHoles::new(
            square(0.0, 0.0, 50.0),
            vec![hole(10.0, 10.0, 10.0), hole(25.0, 14.0, 2.0), hole(2.0, 2.0, 2.0)],
        );
        let polyline = cut(&[(15.0, 15.0), (15.0, 5.0), (35.0, 5.0), (35.0, 25.0), (15.0, 25.0), (15.0, 15.0)]);
        let out = split_or_bridge_holes(&poly, &polyline).unwrap();
        assert_eq!(out.len(), 2);
        let (main, cutout) = (&out[0], &out[1]);
        assert_eq!(main.contour, poly.contour);
        assert_eq!(main.holes.len(), 2);
        assert_eq!(main.holes[0], poly.holes[2]);
        assert_eq!(main.holes[1].orientation(), Some(HOLE_ORIENTATION));
        assert_eq!(cutout.contour.orientation(), Some(CONTOUR_ORIENTATION));
        assert_eq!(cutout.holes, vec![poly.holes[1].clone()]);
        assert_eq!(cutout.contour.area(), 350.0);
        assert_eq!(main.holes[1].area(), 450.0);
        assert_eq!(main.area() + cutout.area(), poly.area());
    }

    #[test]
    fn unrouted_hole_ends() {
        let poly = PolygonWithHoles::new(square(0.0, 0.0, 50.0), vec![hole(10.0, 10.0, 10.0)]);
        assert_matches!(
            split_or_bridge_holes(&poly, &cut(&[(15.0, 15.0), (25.0, 15.0), (30.0, 15.0)])),
            Err(Error::UnroutedHoleEnds {
                start_hole: Some(0),
                end_hole: None
            })
        );
    }

    #[test]
    fn dispatch_contour_split_keeps_holes() {
        let poly = PolygonWithHoles::new(
            square(0.0, 0.0, 30.0),
            vec![hole(2.0, 2.0, 5.0), hole(20.0, 20.0, 5.0)],
        );
        let out = apply_polyline(&poly, &cut(&[(15.0, -5.0), (15.0, 35.0)])).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].holes, vec![poly.holes[1].clone()]);
        assert_eq!(out[1].holes, vec![poly.holes[0].clone()]);
        assert_eq!(total_area(&out), poly.area());
    }

    #[test]
    fn dispatch_merge() {
        let poly = PolygonWithHoles::new(square(0.0, 0.0, 30.0), vec![hole(10.0, 10.0, 10.0)]);
        let out = apply_polyline(&poly, &cut(&[(15.0, -5.0), (15.0, 15.0)])).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].holes.is_empty());
        assert_eq!(out[0].contour.orientation(), Some(CONTOUR_ORIENTATION));
    }

    #[test]
    fn dispatch_no_op() {
        let poly = PolygonWithHoles::from_contour(square(0.0, 0.0, 10.0));
        let out = apply_polyline(&poly, &cut(&[(5.0, -5.0), (5.0, 5.0)])).unwrap();
        assert_eq!(out.as_slice(), &[poly]);
    }

    fn crossing_cut() -> impl Strategy<Value = OpenPath> {
        // A cut entering through the top edge and leaving through the bottom
        // one, wandering around inside.
        (
            1.0..99.0f64,
            prop::collection::vec((1.0..99.0f64, 1.0..99.0f64), 0..4),
            1.0..99.0f64,
        )
            .prop_map(|(x_top, middle, x_bottom)| {
                let mut points = vec![p(x_top, -10.0), p(x_top, 10.0)];
                points.extend(middle.into_iter().map(|(x, y)| p(x, 10.0 + y * 0.8)));
                points.push(p(x_bottom, 90.0));
                points.push(p(x_bottom, 110.0));
                OpenPath::new(points)
            })
    }

    proptest! {
        #[test]
        fn split_conserves_area(polyline in crossing_cut()) {
            let poly = PolygonWithHoles::from_contour(square(0.0, 0.0, 100.0));
            // The middle of the cut might cross itself; we only care about
            // the total area when the pieces are well-formed.
            if let Ok([a, b]) = split_polygon_with_polyline(&poly.contour, &polyline) {
                let sum = a.signed_area() + b.signed_area();
                prop_assert!((sum - 10_000.0).abs() < 1e-6);
            }
        }

        #[test]
        fn slanted_split_partitions(x_top in 1.0..99.0f64, x_bottom in 1.0..99.0f64) {
            let (start, end) = (p(x_top, -10.0), p(x_bottom, 110.0));
            let polyline = OpenPath::new(vec![start, end]);
            let pieces = split_polygon_with_polyline(&square(0.0, 0.0, 100.0), &polyline).unwrap();
            let misplaced = misplaced_samples(&pieces, &Segment::new(start, end), 100.0, 20);
            prop_assert!(misplaced.is_empty(), "misplaced: {:?}", misplaced);
        }
    }
}
