use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::core::precise_instant::PreciseInstant;
use crate::core::scale_config::ScaleConfig;
use crate::core::tick::{TickDefinition, TickDraw};
use crate::core::tick_catalog::{TickCatalog, TickEntry};
use crate::error::{RulerError, RulerResult};

/// How a fit request was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitOutcome {
    /// A catalog entry matched with spacing inside the bounds.
    Exact,
    /// No entry matched; the closest one was taken and its spacing clamped.
    Clamped,
    /// Degenerate input; the controller returned to its default state.
    Reset,
}

/// Effect of one [`ScaleController::scale`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleTransition {
    /// Same granularity, new spacing.
    Rescaled,
    /// The active granularity changed (catalog indices).
    Swapped { from: usize, to: usize },
    /// No neighbour could take over; spacing was clamped to a bound.
    Pinned,
}

/// Owns the tick catalog and the `(active tick, spacing, anchor)` state.
///
/// The anchor is the instant mapped to pixel 0. All pixel/time conversions
/// work on the integer nanosecond difference and convert to `f64` last.
#[derive(Debug, Clone)]
pub struct ScaleController {
    config: ScaleConfig,
    catalog: TickCatalog,
    active: usize,
    spacing: f64,
    anchor: PreciseInstant,
}

impl ScaleController {
    pub fn new(
        config: ScaleConfig,
        catalog: TickCatalog,
        anchor: PreciseInstant,
    ) -> RulerResult<Self> {
        let config = config.validate()?;
        if catalog.is_empty() {
            return Err(RulerError::EmptyCatalog);
        }
        Ok(Self {
            spacing: config.default_spacing,
            config,
            catalog,
            active: 0,
            anchor,
        })
    }

    /// Controller over the built-in catalog with default bounds.
    pub fn with_presets(anchor: PreciseInstant) -> RulerResult<Self> {
        Self::new(ScaleConfig::default(), TickCatalog::presets()?, anchor)
    }

    #[must_use]
    pub fn config(&self) -> &ScaleConfig {
        &self.config
    }

    /// Updates the width used to turn a date range into a pixel density.
    pub fn set_axis_width(&mut self, axis_width_px: f64) -> RulerResult<()> {
        self.config = self.config.with_axis_width(axis_width_px).validate()?;
        Ok(())
    }

    #[must_use]
    pub fn catalog(&self) -> &TickCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    #[must_use]
    pub fn anchor(&self) -> &PreciseInstant {
        &self.anchor
    }

    pub fn set_anchor(&mut self, anchor: PreciseInstant) {
        self.anchor = anchor;
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    fn active_entry(&self) -> &TickEntry {
        // `active` always indexes into a non-empty catalog.
        &self.catalog.entries()[self.active]
    }

    #[must_use]
    pub fn active_tick(&self) -> &Arc<dyn TickDefinition> {
        self.active_entry().definition()
    }

    /// Nominal duration of one active tick in nanoseconds.
    #[must_use]
    pub fn active_base(&self) -> i128 {
        self.active_entry().base()
    }

    /// Selects a catalog entry directly. Spacing is clamped into range.
    pub fn select(&mut self, index: usize, spacing: f64) -> RulerResult<()> {
        if index >= self.catalog.len() {
            return Err(RulerError::InvalidData(format!(
                "tick index {index} out of range for catalog of {}",
                self.catalog.len()
            )));
        }
        if !spacing.is_finite() {
            return Err(RulerError::InvalidData("spacing must be finite".to_owned()));
        }
        self.active = index;
        self.spacing = self.config.clamp_spacing(spacing);
        Ok(())
    }

    /// Nanoseconds covered by one pixel at the current state.
    #[must_use]
    pub fn pixel_duration(&self) -> f64 {
        self.active_base() as f64 / self.spacing
    }

    /// Picks the finest granularity whose spacing at `ns_per_px` lands in range.
    pub fn fit_by_pixel_duration(&mut self, ns_per_px: f64) -> RulerResult<FitOutcome> {
        if !ns_per_px.is_finite() || ns_per_px <= 0.0 {
            return Err(RulerError::InvalidData(
                "pixel duration must be finite and > 0".to_owned(),
            ));
        }

        let candidates: Vec<f64> = self
            .catalog
            .iter()
            .map(|entry| entry.base() as f64 / ns_per_px)
            .collect();

        if let Some(index) = candidates
            .iter()
            .rposition(|candidate| self.config.spacing_in_range(*candidate))
        {
            self.active = index;
            self.spacing = candidates[index];
            return Ok(FitOutcome::Exact);
        }

        let (min, max) = (self.config.spacing_min, self.config.spacing_max);
        let mut closest = 0;
        let mut best = f64::INFINITY;
        for (index, candidate) in candidates.iter().enumerate() {
            let distance = (candidate - min).abs().min((candidate - max).abs());
            if distance < best {
                best = distance;
                closest = index;
            }
        }
        self.active = closest;
        self.spacing = self.config.clamp_spacing(candidates[closest]);
        warn!(
            ns_per_px,
            tick = %self.active_tick().name(),
            spacing = self.spacing,
            "unable to fit pixel duration exactly, clamped"
        );
        Ok(FitOutcome::Clamped)
    }

    /// Fits `[start, end]` into `ratio` of the axis width.
    ///
    /// A non-positive span resets to the coarsest entry at the default spacing.
    pub fn fit_by_date_range(
        &mut self,
        start: &PreciseInstant,
        end: &PreciseInstant,
        ratio: f64,
    ) -> RulerResult<FitOutcome> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(RulerError::InvalidData(
                "fit ratio must be finite and > 0".to_owned(),
            ));
        }
        let span = *end - *start;
        if span <= 0 {
            self.active = 0;
            self.spacing = self.config.default_spacing;
            debug!(span = %span, "degenerate date range, reset scale");
            return Ok(FitOutcome::Reset);
        }
        let density = span as f64 / (self.config.axis_width_px * ratio);
        self.fit_by_pixel_duration(density)
    }

    /// Whether a zoom by `ratio` is worth attempting.
    ///
    /// True iff the spacing is not already past the bound on the side `ratio`
    /// pushes toward: zooming out needs `spacing >= spacing_min`, zooming in
    /// needs `spacing <= spacing_max`. Neutral or invalid ratios are false.
    #[must_use]
    pub fn can_scale(&self, ratio: f64) -> bool {
        if !ratio.is_finite() || ratio <= 0.0 {
            return false;
        }
        (ratio < 1.0 && self.spacing >= self.config.spacing_min)
            || (ratio > 1.0 && self.spacing <= self.config.spacing_max)
    }

    /// Whether the spacing sits on the bound `ratio` pushes toward with no
    /// granularity left on that side, so a zoom that way cannot change it.
    #[must_use]
    pub fn is_pinned(&self, ratio: f64) -> bool {
        if ratio < 1.0 {
            self.active == 0 && self.spacing <= self.config.spacing_min
        } else if ratio > 1.0 {
            self.active + 1 == self.catalog.len() && self.spacing >= self.config.spacing_max
        } else {
            false
        }
    }

    /// One continuous zoom step: multiplies the spacing by `ratio`.
    ///
    /// When the result leaves the spacing bounds the neighbouring granularity
    /// is tried. Zoom-in swaps to the finer entry once the base ratio times the
    /// hysteresis threshold is at or below the new spacing; zoom-out swaps to
    /// the coarser entry once the rescaled spacing times the threshold is at
    /// or below `spacing_max`. The spacing is clamped into range afterwards.
    pub fn scale(&mut self, ratio: f64) -> RulerResult<ScaleTransition> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(RulerError::InvalidData(
                "scale ratio must be finite and > 0".to_owned(),
            ));
        }

        let next = self.spacing * ratio;
        if self.config.spacing_in_range(next) {
            self.spacing = next;
            return Ok(ScaleTransition::Rescaled);
        }

        let threshold = self.config.hysteresis_threshold;
        let from = self.active;
        let current = self.active_base() as f64;
        let swap = if next > self.config.spacing_max {
            self.catalog.get(from + 1).and_then(|finer| {
                let base_ratio = current / finer.base() as f64;
                (base_ratio * threshold <= next).then_some((from + 1, next / base_ratio))
            })
        } else {
            from.checked_sub(1)
                .and_then(|index| self.catalog.get(index).map(|coarser| (index, coarser)))
                .and_then(|(index, coarser)| {
                    let base_ratio = coarser.base() as f64 / current;
                    (next * base_ratio * threshold <= self.config.spacing_max)
                        .then_some((index, next * base_ratio))
                })
        };

        match swap {
            Some((to, spacing)) => {
                let previous = self.active_tick().name();
                self.active = to;
                self.spacing = self.config.clamp_spacing(spacing);
                debug!(
                    from = %previous,
                    to = %self.active_tick().name(),
                    spacing = self.spacing,
                    "swap tick granularity"
                );
                Ok(ScaleTransition::Swapped { from, to })
            }
            None => {
                self.spacing = self.config.clamp_spacing(next);
                Ok(ScaleTransition::Pinned)
            }
        }
    }

    /// Pixel offset of `instant` relative to `anchor`.
    #[must_use]
    pub fn pos_by_date(&self, instant: &PreciseInstant, anchor: &PreciseInstant) -> f64 {
        let base = self.active_base();
        let difference = *instant - *anchor;
        let whole = difference / base;
        let rest = difference % base;
        (whole as f64 + rest as f64 / base as f64) * self.spacing
    }

    /// Instant at pixel `x` relative to `anchor`, rounded to whole nanoseconds.
    pub fn date_by_pos(&self, x: f64, anchor: &PreciseInstant) -> RulerResult<PreciseInstant> {
        if !x.is_finite() {
            return Err(RulerError::InvalidData(
                "pixel position must be finite".to_owned(),
            ));
        }
        let base = self.active_base();
        let units = x / self.spacing;
        let whole = units.trunc();
        let fraction = units - whole;
        let offset = (whole as i128)
            .checked_mul(base)
            .and_then(|nanos| nanos.checked_add((fraction * base as f64).round() as i128))
            .ok_or_else(|| RulerError::Overflow(format!("{x}px at {base}ns per tick")))?;
        anchor.add_nanos(offset)
    }

    /// [`pos_by_date`](Self::pos_by_date) against the current anchor.
    #[must_use]
    pub fn position_of(&self, instant: &PreciseInstant) -> f64 {
        self.pos_by_date(instant, &self.anchor)
    }

    /// [`date_by_pos`](Self::date_by_pos) against the current anchor.
    pub fn instant_at(&self, x: f64) -> RulerResult<PreciseInstant> {
        self.date_by_pos(x, &self.anchor)
    }

    /// Earliest active-tick boundary at or after `anchor`.
    pub fn first_visible_tick(&self, anchor: &PreciseInstant) -> RulerResult<PreciseInstant> {
        let tick = self.active_tick();
        anchor.end_of(tick.increment(), tick.unit())
    }

    /// Pans so that pixel `delta_px` becomes the new pixel 0.
    pub fn move_by(&mut self, delta_px: f64) -> RulerResult<()> {
        self.anchor = self.instant_at(delta_px)?;
        Ok(())
    }

    /// Zooms by `ratio` keeping the instant under pixel `x` in place.
    pub fn zoom_at(&mut self, ratio: f64, x: f64) -> RulerResult<ScaleTransition> {
        if !self.can_scale(ratio) {
            return Ok(ScaleTransition::Pinned);
        }
        let under_cursor = self.instant_at(x)?;
        let transition = self.scale(ratio)?;
        // Re-anchor with the spacing actually applied; clamps and swaps change it.
        self.anchor = self.date_by_pos(-x, &under_cursor)?;
        Ok(transition)
    }

    /// Registers another granularity, keeping the active one selected.
    pub fn use_definition(&mut self, definition: Arc<dyn TickDefinition>) -> RulerResult<usize> {
        let active = Arc::clone(self.active_tick());
        let index = self.catalog.register(definition)?;
        self.active = self.catalog.position(&active).unwrap_or(0);
        Ok(index)
    }

    /// Render directives for every active tick from the anchor to `width_px`.
    pub fn visible_ticks(&self, width_px: f64) -> RulerResult<Vec<TickDraw>> {
        if !width_px.is_finite() || width_px < 0.0 {
            return Err(RulerError::InvalidData(
                "axis width must be finite and >= 0".to_owned(),
            ));
        }

        let tick = self.active_tick();
        let first = self.first_visible_tick(&self.anchor)?;
        let step = i64::from(tick.increment());
        // Calendar months are shorter than the nominal base, so allow headroom.
        let limit = (width_px / self.spacing).ceil() as usize * 2 + 2;

        let mut draws = Vec::with_capacity(limit / 2 + 1);
        for index in 0..limit {
            let amount = step
                .checked_mul(index as i64)
                .ok_or_else(|| RulerError::Overflow(format!("tick #{index}")))?;
            let instant = first.add(amount, tick.unit())?;
            let x = self.position_of(&instant);
            if x > width_px {
                break;
            }
            draws.push(tick.draw(x, &instant, self.spacing));
        }

        trace!(
            tick = %tick.name(),
            count = draws.len(),
            spacing = self.spacing,
            "enumerate visible ticks"
        );
        Ok(draws)
    }
}
