use serde::{Deserialize, Serialize};

use crate::core::{ScaleConfig, TimeZoneContext, Viewport};
use crate::error::{RulerError, RulerResult};
use crate::render::Color;

/// Colors and sizes used when materializing an axis frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisStyle {
    pub line_color: Color,
    pub tick_color: Color,
    pub label_color: Color,
    pub font_size_px: f64,
    pub line_width_px: f64,
    pub show_scale_bar: bool,
    pub scale_bar_width_px: f64,
    /// Distance between the scale bar and the bottom edge.
    pub scale_bar_bottom_px: f64,
    pub indicator_line_color: Color,
    pub indicator_background_color: Color,
    pub indicator_label_color: Color,
    /// Text baseline of the indicator box, below the axis baseline.
    pub indicator_box_offset_px: f64,
    pub indicator_box_padding_px: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let ink = Color::rgb8(0x23, 0x23, 0x23);
        Self {
            line_color: ink,
            tick_color: ink,
            label_color: ink,
            font_size_px: 12.0,
            line_width_px: 1.0,
            show_scale_bar: true,
            scale_bar_width_px: 80.0,
            scale_bar_bottom_px: 8.0,
            indicator_line_color: Color::rgb8(0x40, 0x96, 0xff),
            indicator_background_color: Color::rgb8(0x40, 0xaa, 0xff),
            indicator_label_color: Color::rgb(1.0, 1.0, 1.0),
            indicator_box_offset_px: 48.0,
            indicator_box_padding_px: 4.0,
        }
    }
}

impl AxisStyle {
    pub fn validate(self) -> RulerResult<Self> {
        for color in [
            self.line_color,
            self.tick_color,
            self.label_color,
            self.indicator_line_color,
            self.indicator_background_color,
            self.indicator_label_color,
        ] {
            color.validate()?;
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(RulerError::InvalidData(
                "axis font size must be finite and > 0".to_owned(),
            ));
        }
        if !self.line_width_px.is_finite() || self.line_width_px <= 0.0 {
            return Err(RulerError::InvalidData(
                "axis line width must be finite and > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("scale_bar_width_px", self.scale_bar_width_px),
            ("scale_bar_bottom_px", self.scale_bar_bottom_px),
            ("indicator_box_offset_px", self.indicator_box_offset_px),
            ("indicator_box_padding_px", self.indicator_box_padding_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RulerError::InvalidData(format!(
                    "axis style `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Public axis bootstrap configuration.
///
/// Serializable so hosts can persist axis setup next to their own settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeAxisConfig {
    pub viewport: Viewport,
    #[serde(default = "default_baseline_px")]
    pub baseline_px: f64,
    #[serde(default)]
    pub scale: ScaleConfig,
    #[serde(default)]
    pub time_zone: TimeZoneContext,
    #[serde(default)]
    pub style: AxisStyle,
}

fn default_baseline_px() -> f64 {
    28.0
}

impl Default for TimeAxisConfig {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl TimeAxisConfig {
    /// Creates a config whose scale spans the viewport width.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            baseline_px: default_baseline_px(),
            scale: ScaleConfig::default().with_axis_width(f64::from(viewport.width.max(1))),
            time_zone: TimeZoneContext::default(),
            style: AxisStyle::default(),
        }
    }

    #[must_use]
    pub fn with_baseline(mut self, baseline_px: f64) -> Self {
        self.baseline_px = baseline_px;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: ScaleConfig) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_time_zone(mut self, time_zone: TimeZoneContext) -> Self {
        self.time_zone = time_zone;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(self) -> RulerResult<Self> {
        if !self.viewport.is_valid() {
            return Err(RulerError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.baseline_px.is_finite() || self.baseline_px < 0.0 {
            return Err(RulerError::InvalidData(
                "axis baseline must be finite and >= 0".to_owned(),
            ));
        }
        self.scale.validate()?;
        self.style.validate()?;
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> RulerResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            RulerError::InvalidData(format!("failed to parse time axis config json: {e}"))
        })?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> RulerResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            RulerError::InvalidData(format!("failed to serialize time axis config json: {e}"))
        })
    }
}
