//! Input-to-navigation helpers.
//!
//! Nothing here owns a clock: hosts call `step` with the elapsed frame gap
//! and apply the returned delta to the axis. Dropping an animation between
//! frames leaves the axis in a valid state.

use serde::{Deserialize, Serialize};

use crate::error::{RulerError, RulerResult};

/// Zoom factor applied per wheel notch when scrolling down.
pub const WHEEL_ZOOM_IN: f64 = 1.25;
/// Zoom factor applied per wheel notch when scrolling up.
pub const WHEEL_ZOOM_OUT: f64 = 0.8;

/// Default animation length in milliseconds.
pub const DEFAULT_ANIMATION_MS: f64 = 200.0;

/// Navigation requested by one wheel event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WheelAction {
    /// Pan by `delta_px` pixels.
    Pan { delta_px: f64 },
    /// Zoom by `ratio` keeping pixel `x` stationary.
    Zoom { ratio: f64, x: f64 },
}

impl WheelAction {
    /// Maps a wheel event to a navigation action.
    ///
    /// With the modifier held the vertical delta pans; otherwise the sign of
    /// the delta picks zoom in or out around the pointer. Returns `None` for
    /// non-finite input.
    #[must_use]
    pub fn resolve(delta_y: f64, ctrl: bool, x: f64) -> Option<Self> {
        if !delta_y.is_finite() || !x.is_finite() {
            return None;
        }
        if ctrl {
            return Some(Self::Pan { delta_px: delta_y });
        }
        let ratio = if delta_y > 0.0 {
            WHEEL_ZOOM_IN
        } else {
            WHEEL_ZOOM_OUT
        };
        Some(Self::Zoom { ratio, x })
    }
}

fn validate_duration(duration_ms: f64) -> RulerResult<()> {
    if !duration_ms.is_finite() || duration_ms <= 0.0 {
        return Err(RulerError::InvalidData(
            "animation duration must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

/// Frame gap used for stepping; gaps under one millisecond count as one.
fn frame_gap(gap_ms: f64) -> f64 {
    if gap_ms.is_finite() { gap_ms.max(1.0) } else { 1.0 }
}

/// Splits a zoom by `ratio` into per-frame ratios.
///
/// Each step is `ratio^(gap / duration)`; the last step is trimmed so the
/// product of all steps equals `ratio`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomAnimation {
    ratio: f64,
    x: f64,
    duration_ms: f64,
    applied: f64,
    finished: bool,
}

impl ZoomAnimation {
    pub fn new(ratio: f64, x: f64, duration_ms: f64) -> RulerResult<Self> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(RulerError::InvalidData(
                "zoom ratio must be finite and > 0".to_owned(),
            ));
        }
        if !x.is_finite() {
            return Err(RulerError::InvalidData(
                "zoom anchor must be finite".to_owned(),
            ));
        }
        validate_duration(duration_ms)?;
        Ok(Self {
            ratio,
            x,
            duration_ms,
            applied: 1.0,
            finished: ratio == 1.0,
        })
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Product of every ratio handed out so far.
    #[must_use]
    pub fn applied(&self) -> f64 {
        self.applied
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Ratio to apply for a frame that took `gap_ms`, or `None` once done.
    pub fn step(&mut self, gap_ms: f64) -> Option<f64> {
        if self.finished {
            return None;
        }
        let mut step = self.ratio.powf(frame_gap(gap_ms) / self.duration_ms);
        let reached = if self.ratio > 1.0 {
            self.applied * step >= self.ratio
        } else {
            self.applied * step <= self.ratio
        };
        if reached {
            step = self.ratio / self.applied;
            self.finished = true;
        }
        self.applied *= step;
        Some(step)
    }
}

/// Splits a pan of `delta_px` into per-frame pixel deltas without overshoot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanAnimation {
    delta_px: f64,
    remaining_px: f64,
    duration_ms: f64,
}

impl PanAnimation {
    pub fn new(delta_px: f64, duration_ms: f64) -> RulerResult<Self> {
        if !delta_px.is_finite() {
            return Err(RulerError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }
        validate_duration(duration_ms)?;
        Ok(Self {
            delta_px,
            remaining_px: delta_px,
            duration_ms,
        })
    }

    #[must_use]
    pub fn delta_px(&self) -> f64 {
        self.delta_px
    }

    #[must_use]
    pub fn remaining_px(&self) -> f64 {
        self.remaining_px
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.remaining_px == 0.0
    }

    /// Pixel delta for a frame that took `gap_ms`, or `None` once done.
    ///
    /// Steps are rounded up to whole pixels in magnitude.
    pub fn step(&mut self, gap_ms: f64) -> Option<f64> {
        if self.is_finished() {
            return None;
        }
        let magnitude = (self.delta_px.abs() * frame_gap(gap_ms) / self.duration_ms).ceil();
        let step = magnitude.min(self.remaining_px.abs()).copysign(self.remaining_px);
        self.remaining_px -= step;
        if self.remaining_px.abs() < f64::EPSILON {
            self.remaining_px = 0.0;
        }
        Some(step)
    }
}
