//! Running calibration of the raw pupil coordinate
//!
//! There are no prior bounds for the sensor. The tracker keeps the extrema it
//! has seen so far and maps live samples linearly onto the window once both
//! axes have shown some spread. The range only ever widens.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Pupil coordinate in sensor space (absent frames are `None` at call sites)
pub type RawSample = Vec2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationTracker {
    min_observed: Vec2,
    max_observed: Vec2,
    /// False until the first sample seeds the extrema
    seeded: bool,
    is_calibrated: bool,
}

impl Default for CalibrationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl CalibrationTracker {
    pub fn new() -> Self {
        Self {
            min_observed: Vec2::splat(f32::INFINITY),
            max_observed: Vec2::splat(f32::NEG_INFINITY),
            seeded: false,
            is_calibrated: false,
        }
    }

    /// Fold one frame's sample into the extrema. Absent frames change nothing.
    ///
    /// Returns true on the frame calibration is first established.
    pub fn observe(&mut self, sample: Option<RawSample>) -> bool {
        let Some(sample) = sample else {
            return false;
        };
        if !sample.is_finite() {
            log::debug!("Ignoring non-finite sensor sample {sample:?}");
            return false;
        }

        self.min_observed = self.min_observed.min(sample);
        self.max_observed = self.max_observed.max(sample);
        self.seeded = true;

        if !self.is_calibrated
            && self.min_observed.x != self.max_observed.x
            && self.min_observed.y != self.max_observed.y
        {
            self.is_calibrated = true;
            log::info!(
                "Gaze calibrated: min {:?}, max {:?}",
                self.min_observed,
                self.max_observed
            );
            return true;
        }
        false
    }

    #[inline]
    pub fn is_calibrated(&self) -> bool {
        self.is_calibrated
    }

    /// Smallest coordinate seen on each axis, if any sample has arrived
    pub fn min_observed(&self) -> Option<Vec2> {
        self.seeded.then_some(self.min_observed)
    }

    /// Largest coordinate seen on each axis, if any sample has arrived
    pub fn max_observed(&self) -> Option<Vec2> {
        self.seeded.then_some(self.max_observed)
    }

    /// Map a raw sample onto a window of size `window`.
    ///
    /// `None` until calibrated. The result is not clamped: a sample beyond the
    /// recorded extrema lands outside the window.
    pub fn scaled_point(&self, raw: RawSample, window: Vec2) -> Option<Vec2> {
        if !self.is_calibrated {
            return None;
        }
        let span = self.max_observed - self.min_observed;
        Some((raw - self.min_observed) / span * window)
    }
}
