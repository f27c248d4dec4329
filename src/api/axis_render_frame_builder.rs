use crate::core::{LabelLevel, MarkClass, PreciseInstant};
use crate::error::RulerResult;
use crate::render::{
    LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::axis_labels::{estimate_label_text_width_px, indicator_text, scale_bar_text};
use super::TimeAxis;

/// Primary labels sit this far above the baseline.
const PRIMARY_LABEL_OFFSET_PX: f64 = -8.0;
/// Gap between the bottom of a large mark and the secondary label baseline.
const SECONDARY_LABEL_GAP_PX: f64 = 12.0;
const SCALE_BAR_TICK_PX: f64 = 6.0;
const INDICATOR_CAP_HALF_PX: f64 = 4.0;

impl<R: Renderer> TimeAxis<R> {
    /// Materializes the current state into backend-agnostic primitives.
    pub fn build_render_frame(&self) -> RulerResult<RenderFrame> {
        let viewport = self.config.viewport;
        let width = f64::from(viewport.width);
        let style = self.config.style;
        let baseline = self.config.baseline_px;

        let mut frame = RenderFrame::new(viewport);
        // Half-pixel offset keeps a 1px stroke on the pixel grid.
        frame.push_line(LinePrimitive::new(
            0.0,
            baseline + 0.5,
            width,
            baseline + 0.5,
            style.line_width_px,
            style.line_color,
        ));

        for tick in self.scale.visible_ticks(width)? {
            let top = baseline + tick.mark.offset_px();
            frame.push_line(LinePrimitive::new(
                tick.x,
                top,
                tick.x,
                top + tick.mark.length_px(),
                style.line_width_px,
                style.tick_color,
            ));
            for label in tick.labels.iter().filter(|label| !label.text.is_empty()) {
                let y = match label.level {
                    LabelLevel::Primary => baseline + PRIMARY_LABEL_OFFSET_PX,
                    LabelLevel::Secondary => {
                        baseline + MarkClass::Large.length_px() + SECONDARY_LABEL_GAP_PX
                    }
                };
                frame.push_text(TextPrimitive::new(
                    label.text.clone(),
                    tick.x,
                    y,
                    style.font_size_px,
                    style.label_color,
                    TextHAlign::Center,
                ));
            }
        }

        if style.show_scale_bar {
            self.push_scale_bar(&mut frame);
        }
        if let Some(indicator) = self.indicator {
            self.push_indicator(&mut frame, &indicator);
        }

        Ok(frame)
    }

    fn push_scale_bar(&self, frame: &mut RenderFrame) {
        let style = self.config.style;
        let width = f64::from(self.config.viewport.width);
        let bottom = f64::from(self.config.viewport.height) - style.scale_bar_bottom_px;
        let left = width - style.scale_bar_width_px;
        let top = bottom - SCALE_BAR_TICK_PX;

        for (x1, y1, x2, y2) in [
            (left, top, left, bottom),
            (left, bottom, width, bottom),
            (width, bottom, width, top),
        ] {
            frame.push_line(LinePrimitive::new(
                x1,
                y1,
                x2,
                y2,
                style.line_width_px,
                style.line_color,
            ));
        }
        frame.push_text(TextPrimitive::new(
            scale_bar_text(self.scale.active_base()),
            width - style.scale_bar_width_px / 2.0,
            top,
            style.font_size_px,
            style.label_color,
            TextHAlign::Center,
        ));
    }

    fn push_indicator(&self, frame: &mut RenderFrame, instant: &PreciseInstant) {
        let style = self.config.style;
        let width = f64::from(self.config.viewport.width);
        let height = f64::from(self.config.viewport.height);
        let x = self.scale.position_of(instant);
        if !x.is_finite() {
            return;
        }

        for (x1, y1, x2, y2) in [
            (x - INDICATOR_CAP_HALF_PX, 0.0, x + INDICATOR_CAP_HALF_PX, 0.0),
            (x, 0.0, x, height),
            (x - INDICATOR_CAP_HALF_PX, height, x + INDICATOR_CAP_HALF_PX, height),
        ] {
            frame.push_line(LinePrimitive::new(
                x1,
                y1,
                x2,
                y2,
                style.line_width_px,
                style.indicator_line_color,
            ));
        }

        let text = indicator_text(instant, self.scale.active_base());
        let padding = style.indicator_box_padding_px;
        let box_width = estimate_label_text_width_px(&text, style.font_size_px) + padding * 2.0;
        let box_height = style.font_size_px + padding * 2.0;
        let box_x = (x - box_width / 2.0).max(0.0).min(width - box_width);
        let text_y = self.config.baseline_px + style.indicator_box_offset_px;
        frame.push_rect(RectPrimitive::new(
            box_x,
            text_y - style.font_size_px - padding,
            box_width,
            box_height,
            style.indicator_background_color,
        ));
        frame.push_text(TextPrimitive::new(
            text,
            box_x + padding,
            text_y,
            style.font_size_px,
            style.indicator_label_color,
            TextHAlign::Left,
        ));
    }
}
