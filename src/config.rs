//! Tuning knobs for a cutting session.

use serde::{Deserialize, Serialize};

/// The snapping distance at a viewport scale of 1.
pub const BASE_SNAPPING_DISTANCE: f64 = 16.0;

/// The minimum point gap at a viewport scale of 1.
pub const BASE_MIN_POINT_GAP: f64 = 4.0;

/// Settings for a [`Sheet`](crate::Sheet).
///
/// Distances are in the same units as the sheet's coordinates, which are
/// usually screen pixels. Missing fields deserialize to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutSettings {
    snapping_distance: f64,
    min_point_gap: f64,
    simplify_epsilon: f64,
    manual_scrap_selection: bool,
}

impl Default for CutSettings {
    fn default() -> Self {
        Self {
            snapping_distance: BASE_SNAPPING_DISTANCE,
            min_point_gap: BASE_MIN_POINT_GAP,
            simplify_epsilon: 0.5,
            manual_scrap_selection: false,
        }
    }
}

impl CutSettings {
    /// Creates the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default distances, multiplied by `viewport_scale`.
    ///
    /// Everything else is kept from `self`.
    pub fn scaled(mut self, viewport_scale: f64) -> Self {
        self.snapping_distance = BASE_SNAPPING_DISTANCE * viewport_scale;
        self.min_point_gap = BASE_MIN_POINT_GAP * viewport_scale;
        self
    }

    /// How close a drag has to start to one end of the pending cut to continue it.
    ///
    /// This is never less than one more than the [minimum point
    /// gap](Self::min_point_gap), or some drags could continue a cut without
    /// being able to add to it.
    pub fn snapping_distance(&self) -> f64 {
        self.snapping_distance.max(self.min_point_gap + 1.0)
    }

    /// A drag ending closer than this to the end of the pending cut adds nothing to it.
    pub fn min_point_gap(&self) -> f64 {
        self.min_point_gap
    }

    /// The tolerance for simplifying settled pieces.
    pub fn simplify_epsilon(&self) -> f64 {
        self.simplify_epsilon
    }

    /// Are scraps picked by pointing at them, instead of automatically?
    pub fn manual_scrap_selection(&self) -> bool {
        self.manual_scrap_selection
    }

    /// Sets the snapping distance.
    pub fn with_snapping_distance(mut self, distance: f64) -> Self {
        self.snapping_distance = distance;
        self
    }

    /// Sets the minimum point gap.
    pub fn with_min_point_gap(mut self, gap: f64) -> Self {
        self.min_point_gap = gap;
        self
    }

    /// Sets the simplification tolerance.
    pub fn with_simplify_epsilon(mut self, epsilon: f64) -> Self {
        self.simplify_epsilon = epsilon;
        self
    }

    /// Turns manual scrap selection on or off.
    pub fn with_manual_scrap_selection(mut self, manual: bool) -> Self {
        self.manual_scrap_selection = manual;
        self
    }

    pub(crate) fn set_manual_scrap_selection(&mut self, manual: bool) {
        self.manual_scrap_selection = manual;
    }
}
