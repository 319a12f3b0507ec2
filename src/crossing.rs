//! Finding where cuts cross boundaries, and themselves.

use crate::{
    geom::{Point, Segment},
    path::{ClosedPath, OpenPath},
    Error,
};

/// Crossings closer than this to the previously recorded one are merged into it.
pub const CROSSING_GAP: f64 = 1.0;

/// All the points where `polyline` crosses the edges of `boundary`.
///
/// The crossings are ordered by polyline segment, and then by boundary edge.
/// A crossing is only recorded if it's more than `min_gap` away from the
/// previously recorded one: a cut passing right through a vertex crosses both
/// edges that meet there, and we want to count that once.
pub fn polyline_crossings(polyline: &OpenPath, boundary: &ClosedPath, min_gap: f64) -> Vec<Point> {
    crossings(polyline.segments(), boundary, min_gap)
}

/// Like [`polyline_crossings`], but for a single segment.
pub fn segment_crossings(segment: Segment, boundary: &ClosedPath, min_gap: f64) -> Vec<Point> {
    crossings(std::iter::once(segment), boundary, min_gap)
}

fn crossings(
    segments: impl Iterator<Item = Segment>,
    boundary: &ClosedPath,
    min_gap: f64,
) -> Vec<Point> {
    let mut ret: Vec<Point> = Vec::new();
    for seg in segments {
        for edge in boundary.edges() {
            let Some(p) = seg.intersection(&edge) else {
                continue;
            };
            if ret.last().map_or(true, |prev| prev.distance(&p) > min_gap) {
                ret.push(p);
            }
        }
    }
    ret
}

/// Does the last segment of `polyline` cross any earlier segment, apart from
/// the one right before it?
pub fn has_back_self_crossing(polyline: &OpenPath) -> bool {
    earlier_crossings(polyline).next().is_some()
}

/// The loop closed off by the last segment of `polyline` crossing an earlier one.
///
/// If the last segment crosses the segment from `polyline[i - 1]` to
/// `polyline[i]` at `x`, the loop is `x` followed by the points from
/// `polyline[i]` up to (but not including) the back. The earliest crossing
/// wins, and crossings whose location can't be computed are skipped.
pub fn back_self_crossing_loop(polyline: &OpenPath) -> Result<ClosedPath, Error> {
    let points = polyline.points();
    let back = points.len().saturating_sub(1);
    for (i, earlier, last) in earlier_crossings(polyline) {
        if let Some(x) = earlier.line_intersection(&last) {
            let mut ret = Vec::with_capacity(back - i + 1);
            ret.push(x);
            ret.extend_from_slice(&points[i..back]);
            return Ok(ClosedPath::new(ret));
        }
    }
    Err(Error::NoSelfCrossing)
}

// The segments (indexed by their end point) that the last segment crosses.
fn earlier_crossings(polyline: &OpenPath) -> impl Iterator<Item = (usize, Segment, Segment)> + '_ {
    let points = polyline.points();
    let last = polyline.last_segment();
    // The segment ending at `points[n - 2]` shares an endpoint with the last
    // one, so it would always "cross".
    let end = points.len().saturating_sub(2);
    (1..end).filter_map(move |i| {
        let last = last?;
        let earlier = Segment::new(points[i - 1], points[i]);
        earlier.crosses(&last).then_some((i, earlier, last))
    })
}
