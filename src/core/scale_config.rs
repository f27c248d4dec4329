use serde::{Deserialize, Serialize};

use crate::error::{RulerError, RulerResult};

/// Bounds and tuning for [`ScaleController`](crate::core::ScaleController).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Smallest pixel distance between two ticks while a zoom is settled.
    pub spacing_min: f64,
    pub spacing_max: f64,
    /// Spacing restored when a fit has nothing meaningful to work with.
    pub default_spacing: f64,
    /// Damping multiplier applied to granularity swaps.
    pub hysteresis_threshold: f64,
    pub axis_width_px: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            spacing_min: 2.0,
            spacing_max: 500.0,
            default_spacing: 8.0,
            hysteresis_threshold: 2.0,
            axis_width_px: 800.0,
        }
    }
}

impl ScaleConfig {
    #[must_use]
    pub fn with_spacing_bounds(mut self, spacing_min: f64, spacing_max: f64) -> Self {
        self.spacing_min = spacing_min;
        self.spacing_max = spacing_max;
        self
    }

    #[must_use]
    pub fn with_default_spacing(mut self, default_spacing: f64) -> Self {
        self.default_spacing = default_spacing;
        self
    }

    #[must_use]
    pub fn with_hysteresis_threshold(mut self, threshold: f64) -> Self {
        self.hysteresis_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_axis_width(mut self, axis_width_px: f64) -> Self {
        self.axis_width_px = axis_width_px;
        self
    }

    pub fn validate(self) -> RulerResult<Self> {
        let values = [
            self.spacing_min,
            self.spacing_max,
            self.default_spacing,
            self.hysteresis_threshold,
            self.axis_width_px,
        ];
        if values.iter().any(|value| !value.is_finite()) {
            return Err(RulerError::InvalidData(
                "scale config values must be finite".to_owned(),
            ));
        }
        if self.spacing_min <= 0.0 || self.spacing_min >= self.spacing_max {
            return Err(RulerError::InvalidData(format!(
                "spacing bounds must satisfy 0 < min < max, got [{}, {}]",
                self.spacing_min, self.spacing_max
            )));
        }
        if !(self.spacing_min..=self.spacing_max).contains(&self.default_spacing) {
            return Err(RulerError::InvalidData(format!(
                "default spacing {} is outside [{}, {}]",
                self.default_spacing, self.spacing_min, self.spacing_max
            )));
        }
        if self.hysteresis_threshold < 1.0 {
            return Err(RulerError::InvalidData(
                "hysteresis threshold must be >= 1".to_owned(),
            ));
        }
        if self.axis_width_px <= 0.0 {
            return Err(RulerError::InvalidData(
                "axis width must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn clamp_spacing(&self, spacing: f64) -> f64 {
        spacing.clamp(self.spacing_min, self.spacing_max)
    }

    #[must_use]
    pub fn spacing_in_range(&self, spacing: f64) -> bool {
        (self.spacing_min..=self.spacing_max).contains(&spacing)
    }
}
