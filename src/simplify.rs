//! Polyline simplification.

use crate::geom::{Point, Segment};

/// Simplifies a polyline with the Ramer-Douglas-Peucker algorithm.
///
/// Between two anchors (initially the two endpoints), we look for the vertex
/// farthest from the line through the anchors. If it's farther than
/// `epsilon`, it becomes an anchor and both halves get simplified in turn;
/// otherwise everything between the anchors is dropped. Ties go to the first
/// vertex reaching the maximum distance.
///
/// The endpoints are always kept, the order of the remaining points is
/// preserved, and the output is never longer than the input. If the anchors
/// coincide (as they do when simplifying a closed loop), distances are
/// measured from the anchor point itself.
pub fn simplify(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut ret = Vec::with_capacity(points.len());
    ret.push(points[0]);
    simplify_between(points, 0, points.len() - 1, epsilon, &mut ret);
    ret
}

// Pushes the kept points in `(start, end]` onto `out`.
fn simplify_between(points: &[Point], start: usize, end: usize, epsilon: f64, out: &mut Vec<Point>) {
    if let Some(farthest) = farthest_index(points, start, end, epsilon) {
        simplify_between(points, start, farthest, epsilon, out);
        simplify_between(points, farthest, end, epsilon, out);
    } else {
        out.push(points[end]);
    }
}

// The index of the point in `start..end` that is farthest from the chord,
// provided that it is strictly farther than `epsilon`.
fn farthest_index(points: &[Point], start: usize, end: usize, epsilon: f64) -> Option<usize> {
    let chord = Segment::new(points[start], points[end]);
    let mut farthest = None;
    let mut farthest_dist = epsilon;
    for (idx, p) in points.iter().enumerate().take(end).skip(start) {
        let dist = chord.distance_to_line(p);
        if dist > farthest_dist {
            farthest_dist = dist;
            farthest = Some(idx);
        }
    }
    farthest
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::geom::tests::{p, reasonable_point};

    #[test]
    fn keeps_endpoints() {
        let path = [p(2.0, 4.0), p(0.0, 10.0), p(7.0, 3.0), p(10.0, 0.0)];
        let simplified = simplify(&path, 1.0);
        assert_eq!(simplified.first(), Some(&p(2.0, 4.0)));
        assert_eq!(simplified.last(), Some(&p(10.0, 0.0)));
        assert!(simplified.len() <= path.len());
        insta::assert_debug_snapshot!(simplified, @r"
        [
            (2.0, 4.0),
            (0.0, 10.0),
            (10.0, 0.0),
        ]
        ");
    }

    #[test]
    fn drops_collinear_points() {
        let path = [p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0)];
        assert_eq!(simplify(&path, 0.0), vec![p(0.0, 0.0), p(3.0, 0.0)]);
    }

    #[test]
    fn zero_epsilon_keeps_corners() {
        let path = [p(0.0, 0.0), p(5.0, 5.0), p(10.0, 0.0), p(15.0, 5.0)];
        assert_eq!(simplify(&path, 0.0), path.to_vec());
    }

    #[test]
    fn short_paths() {
        assert!(simplify(&[], 1.0).is_empty());
        assert_eq!(simplify(&[p(1.0, 1.0)], 1.0), vec![p(1.0, 1.0)]);
        assert_eq!(
            simplify(&[p(1.0, 1.0), p(1.0, 1.0)], 1.0),
            vec![p(1.0, 1.0), p(1.0, 1.0)]
        );
    }

    #[test]
    fn closed_loop_anchors() {
        // With coinciding anchors, the farthest point from the anchor survives.
        let path = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0), p(0.0, 0.0)];
        assert_eq!(simplify(&path, 0.5), path.to_vec());
    }

    #[test]
    fn ties_go_to_the_first() {
        let path = [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 1.0), p(3.0, 0.0)];
        assert_eq!(
            farthest_index(&path, 0, 3, 0.5),
            Some(1),
        );
    }

    proptest! {
        #[test]
        fn endpoints_and_length(points in prop::collection::vec(reasonable_point(), 1..40), epsilon in 0.0..50.0f64) {
            let simplified = simplify(&points, epsilon);
            prop_assert_eq!(simplified.first(), points.first());
            prop_assert_eq!(simplified.last(), points.last());
            prop_assert!(simplified.len() <= points.len());
        }

        #[test]
        fn output_is_a_subsequence(points in prop::collection::vec(reasonable_point(), 1..40), epsilon in 0.0..50.0f64) {
            let simplified = simplify(&points, epsilon);
            let mut remaining = points.iter();
            for q in &simplified {
                prop_assert!(remaining.any(|p| p == q));
            }
        }
    }
}
