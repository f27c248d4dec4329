use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::{
    PreciseInstant, ScaleController, TickCatalog, TickDefinition, TimeZoneContext, Viewport,
};
use crate::error::RulerResult;
use crate::interaction::{PanAnimation, ZoomAnimation};
use crate::render::Renderer;

use super::drawn_subscriptions::{DrawnSubscriptions, SubscriptionId};
use super::TimeAxisConfig;

/// Facade consumed by host applications.
///
/// `TimeAxis` owns one [`ScaleController`], the viewport and style, an
/// optional indicator, pending animations, and drawn-event subscribers. It
/// turns the controller state into a [`RenderFrame`](crate::render::RenderFrame)
/// and hands it to the renderer.
pub struct TimeAxis<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: TimeAxisConfig,
    pub(super) scale: ScaleController,
    pub(super) indicator: Option<PreciseInstant>,
    pub(super) zoom_animation: Option<ZoomAnimation>,
    pub(super) pan_animation: Option<PanAnimation>,
    subscriptions: DrawnSubscriptions,
}

impl<R: Renderer> TimeAxis<R> {
    /// Creates an axis over the built-in tick catalog with `anchor` at pixel 0.
    pub fn new(renderer: R, config: TimeAxisConfig, anchor: PreciseInstant) -> RulerResult<Self> {
        Self::with_catalog(renderer, config, TickCatalog::presets()?, anchor)
    }

    pub fn with_catalog(
        renderer: R,
        config: TimeAxisConfig,
        catalog: TickCatalog,
        anchor: PreciseInstant,
    ) -> RulerResult<Self> {
        let mut config = config.validate()?;
        config.scale = config
            .scale
            .with_axis_width(f64::from(config.viewport.width))
            .validate()?;
        let anchor = anchor.with_zone(config.time_zone)?;
        let scale = ScaleController::new(config.scale, catalog, anchor)?;
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            zone = %config.time_zone,
            "create time axis"
        );
        Ok(Self {
            renderer,
            config,
            scale,
            indicator: None,
            zoom_animation: None,
            pan_animation: None,
            subscriptions: DrawnSubscriptions::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &TimeAxisConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    #[must_use]
    pub fn time_zone(&self) -> TimeZoneContext {
        self.config.time_zone
    }

    /// Read access to the tick/spacing state.
    #[must_use]
    pub fn scale(&self) -> &ScaleController {
        &self.scale
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Changes the drawing surface size; the scale keeps its spacing.
    pub fn resize(&mut self, viewport: Viewport) -> RulerResult<()> {
        let config = TimeAxisConfig {
            viewport,
            ..self.config
        }
        .validate()?;
        self.scale.set_axis_width(f64::from(viewport.width))?;
        self.config = config;
        self.config.scale = *self.scale.config();
        Ok(())
    }

    /// Registers an additional tick granularity; the active one stays selected.
    pub fn use_definition(&mut self, definition: Arc<dyn TickDefinition>) -> RulerResult<usize> {
        self.scale.use_definition(definition)
    }

    #[must_use]
    pub fn indicator(&self) -> Option<&PreciseInstant> {
        self.indicator.as_ref()
    }

    pub fn set_indicator(&mut self, indicator: Option<PreciseInstant>) -> RulerResult<()> {
        self.indicator = indicator
            .map(|instant| instant.with_zone(self.config.time_zone))
            .transpose()?;
        Ok(())
    }

    /// Builds a frame, hands it to the renderer, then notifies subscribers.
    pub fn render(&mut self) -> RulerResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)?;
        trace!(
            lines = frame.lines.len(),
            texts = frame.texts.len(),
            subscribers = self.subscriptions.len(),
            "time axis drawn"
        );
        self.subscriptions.notify();
        Ok(())
    }

    /// Calls `callback` after every successful [`render`](Self::render).
    pub fn on_drawn(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        self.subscriptions.subscribe(Box::new(callback))
    }

    /// Returns whether `id` was still subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.unsubscribe(id)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Drops subscribers, animations, and the indicator.
    pub fn destroy(&mut self) {
        self.subscriptions.clear();
        self.zoom_animation = None;
        self.pan_animation = None;
        self.indicator = None;
    }
}
