#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;
pub mod config;
pub mod crossing;
pub mod dissect;
mod geom;
pub mod path;
pub mod polygon;
pub mod session;
pub mod shapes;
pub mod simplify;

pub use config::CutSettings;
pub use geom::{orientation_triple, Point, Segment};
pub use path::{ClosedPath, OpenPath, Orientation, CONTOUR_ORIENTATION, HOLE_ORIENTATION};
pub use polygon::PolygonWithHoles;
pub use session::{CutEvent, Piece, Sheet, SheetSnapshot};
pub use shapes::SheetShape;

/// Ways that cutting can fail.
///
/// None of these are fatal: whatever was being cut is left as it was.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// A coordinate was infinite or NaN.
    #[error("one of the inputs was not finite")]
    NonFinite,
    /// A cut needs at least two points.
    #[error("a cut with {len} points is too short")]
    TooShort {
        /// The number of points we got.
        len: usize,
    },
    /// Splitting a polygon didn't produce two closed loops.
    #[error("splitting did not close both loops (first: {first_closed}, second: {second_closed})")]
    UnclosedSplit {
        /// Did the loop following the cut forwards close?
        first_closed: bool,
        /// Did the loop following the cut backwards close?
        second_closed: bool,
    },
    /// A segment that was supposed to cross a boundary didn't.
    #[error("the cut misses the boundary it should cross")]
    MissedBoundary,
    /// Neither end of the cut crosses the contour.
    #[error("neither end of the cut crosses the contour")]
    NoContourEnd,
    /// The end of the cut that doesn't cross the contour doesn't cross a hole either.
    #[error("the inner end of the cut crosses no hole")]
    NoHoleEnd,
    /// A cut between holes needs both ends to cross a hole.
    #[error("the cut doesn't run between holes (start: {start_hole:?}, end: {end_hole:?})")]
    UnroutedHoleEnds {
        /// The hole crossed by the start of the cut.
        start_hole: Option<usize>,
        /// The hole crossed by the end of the cut.
        end_hole: Option<usize>,
    },
    /// Splitting a hole should give one loop winding like a hole and one
    /// winding like a contour, but it didn't.
    #[error("could not tell the halves of a split hole apart")]
    UnclassifiedHoleSplit,
    /// The last segment of the cut doesn't cross any earlier segment.
    #[error("the cut does not cross itself")]
    NoSelfCrossing,
}
