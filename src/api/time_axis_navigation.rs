use tracing::debug;

use crate::core::{FitOutcome, PreciseInstant, ScaleTransition};
use crate::error::RulerResult;
use crate::interaction::{DEFAULT_ANIMATION_MS, PanAnimation, WheelAction, ZoomAnimation};
use crate::render::Renderer;

use super::TimeAxis;

impl<R: Renderer> TimeAxis<R> {
    #[must_use]
    pub fn anchor(&self) -> &PreciseInstant {
        self.scale.anchor()
    }

    pub fn set_anchor(&mut self, anchor: PreciseInstant) -> RulerResult<()> {
        self.scale.set_anchor(anchor.with_zone(self.config.time_zone)?);
        Ok(())
    }

    /// Pixel position of `instant` on the axis.
    #[must_use]
    pub fn pos_of(&self, instant: &PreciseInstant) -> f64 {
        self.scale.position_of(instant)
    }

    /// Instant under pixel `x`.
    pub fn instant_at(&self, x: f64) -> RulerResult<PreciseInstant> {
        self.scale.instant_at(x)
    }

    /// Pans by `delta_px` pixels; positive values move toward later times.
    pub fn move_by(&mut self, delta_px: f64) -> RulerResult<()> {
        self.scale.move_by(delta_px)
    }

    /// Zooms by `ratio` keeping the instant under pixel `x` in place.
    pub fn zoom_at(&mut self, ratio: f64, x: f64) -> RulerResult<ScaleTransition> {
        self.scale.zoom_at(ratio, x)
    }

    /// Fits `[start, end]` into `ratio` of the width and centres it.
    pub fn fit_date_range(
        &mut self,
        start: &PreciseInstant,
        end: &PreciseInstant,
        ratio: f64,
    ) -> RulerResult<FitOutcome> {
        let outcome = self.scale.fit_by_date_range(start, end, ratio)?;
        let span = (*end - *start).max(0);
        let center = start.add_nanos(span / 2)?;
        let half_width = f64::from(self.config.viewport.width) / 2.0;
        let anchor = self.scale.date_by_pos(-half_width, &center)?;
        self.scale.set_anchor(anchor.with_zone(self.config.time_zone)?);
        debug!(?outcome, spacing = self.scale.spacing(), "fit date range");
        Ok(outcome)
    }

    /// Fits the axis to a nanoseconds-per-pixel density around the anchor.
    pub fn fit_pixel_duration(&mut self, ns_per_px: f64) -> RulerResult<FitOutcome> {
        self.scale.fit_by_pixel_duration(ns_per_px)
    }

    /// Resolves a wheel event and starts the matching animation.
    pub fn handle_wheel(
        &mut self,
        delta_y: f64,
        ctrl: bool,
        x: f64,
    ) -> RulerResult<Option<WheelAction>> {
        let Some(action) = WheelAction::resolve(delta_y, ctrl, x) else {
            return Ok(None);
        };
        match action {
            WheelAction::Pan { delta_px } => {
                self.start_pan(delta_px, DEFAULT_ANIMATION_MS)?;
            }
            WheelAction::Zoom { ratio, x } => {
                self.start_zoom(ratio, x, DEFAULT_ANIMATION_MS)?;
            }
        }
        Ok(Some(action))
    }

    /// Queues an animated zoom. Returns `false` when the scale is pinned.
    pub fn start_zoom(&mut self, ratio: f64, x: f64, duration_ms: f64) -> RulerResult<bool> {
        if !self.scale.can_scale(ratio) || self.scale.is_pinned(ratio) {
            return Ok(false);
        }
        self.zoom_animation = Some(ZoomAnimation::new(ratio, x, duration_ms)?);
        Ok(true)
    }

    pub fn start_pan(&mut self, delta_px: f64, duration_ms: f64) -> RulerResult<()> {
        self.pan_animation = Some(PanAnimation::new(delta_px, duration_ms)?);
        Ok(())
    }

    /// Applies one frame of the pending zoom.
    ///
    /// Returns `None` when no zoom is pending. The animation is dropped once it
    /// reaches its target or the scale gets pinned.
    pub fn advance_zoom(&mut self, gap_ms: f64) -> RulerResult<Option<ScaleTransition>> {
        let Some(animation) = self.zoom_animation.as_mut() else {
            return Ok(None);
        };
        let Some(step) = animation.step(gap_ms) else {
            self.zoom_animation = None;
            return Ok(None);
        };
        let (x, target) = (animation.x(), animation.ratio());
        let finished = animation.is_finished();

        let transition = self.scale.zoom_at(step, x)?;
        if finished || !self.scale.can_scale(target) || self.scale.is_pinned(target) {
            self.zoom_animation = None;
        }
        Ok(Some(transition))
    }

    /// Applies one frame of the pending pan. Returns `false` when idle.
    pub fn advance_pan(&mut self, gap_ms: f64) -> RulerResult<bool> {
        let Some(animation) = self.pan_animation.as_mut() else {
            return Ok(false);
        };
        let Some(step) = animation.step(gap_ms) else {
            self.pan_animation = None;
            return Ok(false);
        };
        if animation.is_finished() {
            self.pan_animation = None;
        }
        self.scale.move_by(step)?;
        Ok(true)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.zoom_animation.is_some() || self.pan_animation.is_some()
    }

    pub fn cancel_animations(&mut self) {
        self.zoom_animation = None;
        self.pan_animation = None;
    }
}
