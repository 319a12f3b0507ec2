//! An interactive cutting session.
//!
//! A [`Sheet`] starts out as a single piece. The user drags across it, and
//! each drag step is fed to [`Sheet::cut`], which grows a pending cut. As
//! soon as the cut loops back on itself, it punches out a hole; as soon as it
//! crosses the piece's boundary twice, it gets applied with
//! [`apply_polyline`](crate::dissect::apply_polyline). Either way, the cut is
//! used up.
//!
//! Cutting only happens while there's exactly one piece. Once a cut produces
//! more, the next cut first decides which one to keep (see
//! [`Sheet::sort_pieces`]) and sends the rest to the scraps.

use kurbo::Affine;
use serde::{Deserialize, Serialize};

use crate::{
    config::CutSettings,
    crossing::{back_self_crossing_loop, has_back_self_crossing, CROSSING_GAP},
    dissect::apply_polyline,
    geom::Point,
    path::{OpenPath, CONTOUR_ORIENTATION, HOLE_ORIENTATION},
    polygon::PolygonWithHoles,
    shapes::SheetShape,
    Error,
};

/// A polygon, plus some bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    /// The geometry.
    pub shape: PolygonWithHoles,
    /// Is this piece about to be thrown out?
    #[serde(default)]
    pub scrap_candidate: bool,
}

impl Piece {
    /// A piece that nobody has marked as a scrap.
    pub fn new(shape: PolygonWithHoles) -> Self {
        Self {
            shape,
            scrap_candidate: false,
        }
    }
}

impl From<PolygonWithHoles> for Piece {
    fn from(shape: PolygonWithHoles) -> Self {
        Self::new(shape)
    }
}

/// What happened as a result of a drag step.
#[derive(Clone, Debug, PartialEq)]
pub enum CutEvent {
    /// Nothing changed. Either there isn't exactly one piece, or the drag was
    /// too short to extend the pending cut.
    Ignored,
    /// A new pending cut began.
    Started,
    /// The pending cut got a new point.
    Extended,
    /// The drag started a new cut in the air, which was dropped. Any
    /// previously pending cut is still there.
    Abandoned,
    /// The cut crossed the boundary and was applied.
    Split,
    /// The cut crossed itself, and the loop it made was cut out.
    HoleCut,
    /// The cut crossed the boundary but couldn't be applied, so it was
    /// dropped. The pieces are unchanged.
    Rejected(Error),
}

impl CutEvent {
    /// Did this event use up the pending cut and change the pieces?
    pub fn is_finalized(&self) -> bool {
        matches!(self, CutEvent::Split | CutEvent::HoleCut)
    }
}

/// Everything needed to restore a [`Sheet`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetSnapshot {
    /// The session's settings.
    pub settings: CutSettings,
    /// The pieces still being worked on. The first one is the main piece.
    pub pieces: Vec<Piece>,
    /// Pieces that have been discarded.
    pub scraps: Vec<Piece>,
    /// The cut in progress, if any.
    pub pending_cut: Option<OpenPath>,
}

/// A sheet being cut up.
#[derive(Clone, Debug)]
pub struct Sheet {
    settings: CutSettings,
    pieces: Vec<Piece>,
    scraps: Vec<Piece>,
    pending_cut: Option<OpenPath>,
    cut_end_highlighted: bool,
}

impl Sheet {
    /// A fresh, uncut sheet.
    pub fn new(shape: SheetShape, settings: CutSettings) -> Self {
        Self::from_pieces(vec![Piece::new(shape.to_polygon())], settings)
    }

    /// A sheet that has already been cut into `pieces`.
    pub fn from_pieces(pieces: Vec<Piece>, settings: CutSettings) -> Self {
        Self {
            settings,
            pieces,
            scraps: Vec::new(),
            pending_cut: None,
            cut_end_highlighted: false,
        }
    }

    /// Restores a sheet from a snapshot.
    pub fn from_snapshot(snapshot: SheetSnapshot) -> Self {
        Self {
            settings: snapshot.settings,
            pieces: snapshot.pieces,
            scraps: snapshot.scraps,
            pending_cut: snapshot.pending_cut,
            cut_end_highlighted: false,
        }
    }

    /// Captures the current state, for saving or undoing.
    pub fn snapshot(&self) -> SheetSnapshot {
        SheetSnapshot {
            settings: self.settings.clone(),
            pieces: self.pieces.clone(),
            scraps: self.scraps.clone(),
            pending_cut: self.pending_cut.clone(),
        }
    }

    /// The current settings.
    pub fn settings(&self) -> &CutSettings {
        &self.settings
    }

    /// Replaces the settings, for example when the viewport scale changes.
    pub fn set_settings(&mut self, settings: CutSettings) {
        self.settings = settings;
    }

    /// The pieces still being worked on.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// The discarded pieces.
    pub fn scraps(&self) -> &[Piece] {
        &self.scraps
    }

    /// The piece that cuts apply to.
    pub fn main_piece(&self) -> Option<&Piece> {
        self.pieces.first()
    }

    /// The cut in progress.
    pub fn pending_cut(&self) -> Option<&OpenPath> {
        self.pending_cut.as_ref()
    }

    /// Was the last [`update`](Self::update) positioned to continue the pending cut?
    pub fn is_cut_end_highlighted(&self) -> bool {
        self.cut_end_highlighted
    }

    /// The index of the first piece containing `p`.
    pub fn hit_piece(&self, p: &Point) -> Option<usize> {
        self.pieces.iter().position(|piece| piece.shape.contains(p))
    }

    fn on_main_piece(&self, p: Option<&Point>) -> bool {
        match (p, self.main_piece()) {
            (Some(p), Some(main)) => main.shape.contains(p),
            _ => false,
        }
    }

    fn near(&self, end: Option<&Point>, p: &Point) -> bool {
        end.is_some_and(|end| end.distance(p) <= self.settings.snapping_distance())
    }

    fn continues_back(&self, from: &Point) -> bool {
        let back = self.pending_cut.as_ref().and_then(OpenPath::last);
        self.on_main_piece(back) && self.near(back, from)
    }

    fn continues_front(&self, from: &Point) -> bool {
        let front = self.pending_cut.as_ref().and_then(OpenPath::first);
        self.on_main_piece(front) && self.near(front, from)
    }

    /// Tracks the pointer without cutting.
    ///
    /// In manual scrap selection, this marks the pieces under `to` as scrap
    /// candidates. It also records whether a drag from `from` would continue
    /// the pending cut.
    pub fn update(&mut self, from: Point, to: Point) {
        if self.settings.manual_scrap_selection() {
            self.update_scrap_candidates(&to);
        }
        self.cut_end_highlighted = self.continues_back(&from) || self.continues_front(&from);
    }

    /// Marks the pieces containing `p` as scrap candidates, and the others as keepers.
    ///
    /// With only one piece left there's nothing to choose from, so this turns
    /// manual scrap selection off instead.
    pub fn update_scrap_candidates(&mut self, p: &Point) {
        if self.pieces.len() > 1 {
            for piece in &mut self.pieces {
                piece.scrap_candidate = piece.shape.contains(p);
            }
        } else {
            self.settings.set_manual_scrap_selection(false);
        }
    }

    /// Throws out the scrap candidates.
    ///
    /// If there's only one piece, there's nothing to throw out. Instead, we
    /// take the opportunity to simplify all the pieces and scraps. (Doing it
    /// while there are several pieces could make neighboring pieces overlap.)
    pub fn filter_scraps(&mut self) {
        if self.pieces.len() > 1 {
            let (scraps, pieces) = std::mem::take(&mut self.pieces)
                .into_iter()
                .partition(|piece| piece.scrap_candidate);
            self.pieces = pieces;
            self.scraps.extend(scraps);
        } else {
            let epsilon = self.settings.simplify_epsilon();
            for piece in self.pieces.iter_mut().chain(&mut self.scraps) {
                piece.shape = piece.shape.simplified(epsilon);
            }
        }
    }

    /// Keeps the most complicated piece and sends the rest to the scraps.
    ///
    /// The most complicated piece is the one with the most holes, or if
    /// that's a tie, the one with the most vertices. Remaining ties go to
    /// the earlier piece.
    pub fn sort_pieces(&mut self) {
        let complexity = |piece: &Piece| (piece.shape.holes.len(), piece.shape.vertex_count());
        self.pieces.sort_by(|a, b| complexity(b).cmp(&complexity(a)));
        if self.pieces.len() > 1 {
            log::debug!("keeping 1 of {} pieces", self.pieces.len());
            self.scraps.extend(self.pieces.drain(1..));
        }
    }

    /// Rotates everything by `theta` radians around the origin.
    pub fn rotate(&mut self, theta: f64) {
        let affine = Affine::rotate(theta);
        for piece in &mut self.pieces {
            piece.shape = piece.shape.transformed(affine);
        }
        if let Some(cut) = &mut self.pending_cut {
            *cut = cut.transformed(affine);
        }
    }

    /// Mirrors the pieces across the vertical axis.
    pub fn flip_x(&mut self) {
        self.reflect(Affine::FLIP_X);
    }

    /// Mirrors the pieces across the horizontal axis.
    pub fn flip_y(&mut self) {
        self.reflect(Affine::FLIP_Y);
    }

    fn reflect(&mut self, affine: Affine) {
        for piece in &mut self.pieces {
            piece.shape = piece.shape.transformed(affine).normalized();
        }
    }

    /// Feeds a drag step from `from` to `to` into the session.
    ///
    /// If `from` is close to one end of the pending cut (and that end is on
    /// the main piece), the cut is extended to `to`. Otherwise, a new cut from
    /// `from` to `to` replaces it, as long as it touches the main piece.
    /// Then, if the cut crosses itself or the boundary, it gets applied.
    ///
    /// Only non-finite input is an error; failing to apply a cut is reported
    /// as [`CutEvent::Rejected`].
    pub fn cut(&mut self, from: Point, to: Point) -> Result<CutEvent, Error> {
        if !from.is_finite() || !to.is_finite() {
            return Err(Error::NonFinite);
        }
        if self.pieces.len() > 1 && !self.settings.manual_scrap_selection() {
            self.sort_pieces();
        }
        if self.pieces.len() != 1 {
            return Ok(CutEvent::Ignored);
        }

        let mut event = if self.continues_back(&from) {
            self.extend_pending(to)
        } else if self.continues_front(&from) {
            if let Some(cut) = &mut self.pending_cut {
                cut.reverse();
            }
            self.extend_pending(to)
        } else {
            self.start_pending(from, to)
        };

        if let Some(finished) = self.settle_pending() {
            event = finished;
        }
        self.cut_end_highlighted = false;
        log::debug!("drag from {from:?} to {to:?}: {event:?}");
        Ok(event)
    }

    fn extend_pending(&mut self, to: Point) -> CutEvent {
        let min_gap = self.settings.min_point_gap();
        match &mut self.pending_cut {
            Some(cut) if cut.last().is_some_and(|back| back.distance(&to) >= min_gap) => {
                cut.push(to);
                CutEvent::Extended
            }
            _ => CutEvent::Ignored,
        }
    }

    fn start_pending(&mut self, from: Point, to: Point) -> CutEvent {
        let Some(main) = self.main_piece() else {
            return CutEvent::Ignored;
        };
        let cut = if from.distance(&to) > 0.0 {
            OpenPath::new(vec![from, to])
        } else {
            OpenPath::new(vec![from])
        };
        if !main.shape.crossings(&cut, CROSSING_GAP).is_empty() || main.shape.contains(&from) {
            self.pending_cut = Some(cut);
            CutEvent::Started
        } else {
            CutEvent::Abandoned
        }
    }

    // Applies the pending cut if it's ready.
    fn settle_pending(&mut self) -> Option<CutEvent> {
        let cut = self.pending_cut.as_ref()?;
        let main = &self.pieces.first()?.shape;

        if has_back_self_crossing(cut) {
            let lp = back_self_crossing_loop(cut).ok()?;
            let hole = lp.with_orientation(HOLE_ORIENTATION);
            let contour = lp.with_orientation(CONTOUR_ORIENTATION);
            let (moved, mut kept): (Vec<_>, Vec<_>) = main
                .holes
                .iter()
                .cloned()
                .partition(|h| h.is_inside(&contour));
            kept.push(hole);
            log::debug!("cut loops back on itself; {} holes move out", moved.len());

            let updated = PolygonWithHoles::new(main.contour.clone(), kept);
            self.pieces[0] = Piece::new(updated);
            self.pieces.push(Piece::new(PolygonWithHoles::new(contour, moved)));
            self.pending_cut = None;
            return Some(CutEvent::HoleCut);
        }

        if main.crossings(cut, CROSSING_GAP).len() < 2 {
            return None;
        }
        let event = match apply_polyline(main, cut) {
            Ok(replacement) => {
                self.pieces.splice(0..1, replacement.into_iter().map(Piece::new));
                CutEvent::Split
            }
            Err(e) => {
                log::warn!("dropping a cut that couldn't be applied: {e}");
                CutEvent::Rejected(e)
            }
        };
        self.pending_cut = None;
        Some(event)
    }

    /// Draws the pieces, the scraps, and the pending cut.
    #[cfg(feature = "debug-svg")]
    pub fn dump_svg(&self) -> svg::Document {
        let bbox = self
            .pieces
            .iter()
            .chain(&self.scraps)
            .map(|piece| piece.shape.bounding_box())
            .reduce(|a, b| a.union(b))
            .unwrap_or(kurbo::Rect::ZERO);
        let pad = 1.0 + bbox.width().max(bbox.height()) / 32.0;
        let stroke_width = bbox.width().max(bbox.height()).max(1.0) / 512.0;
        let mut document = svg::Document::new().set(
            "viewBox",
            (
                bbox.min_x() - pad,
                bbox.min_y() - pad,
                bbox.width() + 2.0 * pad,
                bbox.height() + 2.0 * pad,
            ),
        );

        let to_data = |path: &kurbo::BezPath| {
            let mut data = svg::node::element::path::Data::new();
            for el in path.elements() {
                data = match *el {
                    kurbo::PathEl::MoveTo(p) => data.move_to((p.x, p.y)),
                    kurbo::PathEl::LineTo(p) => data.line_to((p.x, p.y)),
                    kurbo::PathEl::QuadTo(p0, p1) => {
                        data.quadratic_curve_to(((p0.x, p0.y), (p1.x, p1.y)))
                    }
                    kurbo::PathEl::CurveTo(p0, p1, p2) => {
                        data.cubic_curve_to(((p0.x, p0.y), (p1.x, p1.y), (p2.x, p2.y)))
                    }
                    kurbo::PathEl::ClosePath => data.close(),
                };
            }
            data
        };

        for (piece, fill) in self
            .pieces
            .iter()
            .map(|p| (p, if p.scrap_candidate { "orange" } else { "pink" }))
            .chain(self.scraps.iter().map(|p| (p, "lightgray")))
        {
            let path = svg::node::element::Path::new()
                .set("d", to_data(&piece.shape.to_bez_path()))
                .set("stroke", "black")
                .set("stroke-width", stroke_width)
                .set("stroke-linejoin", "round")
                .set("fill-rule", "evenodd")
                .set("fill", fill);
            document = document.add(path);
        }

        if let Some(cut) = &self.pending_cut {
            let path = svg::node::element::Path::new()
                .set("d", to_data(&cut.to_bez_path()))
                .set("stroke", "red")
                .set("stroke-width", 2.0 * stroke_width)
                .set("stroke-linecap", "round")
                .set("fill", "none");
            document = document.add(path);
        }
        document
    }
}
