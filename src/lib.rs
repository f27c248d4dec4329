//! time-ruler: adaptive tick-resolution engine for zoomable time axes.
//!
//! The crate maps nanosecond-precise instants onto a one-dimensional pixel
//! axis and picks the tick granularity ("1 day", "10 seconds", "1 millisecond")
//! that keeps ticks readable as the user zooms and pans.
//!
//! - [`core`] holds the pure engine: [`PreciseInstant`], the tick catalog and
//!   [`ScaleController`].
//! - [`render`] describes frames as backend-agnostic primitives.
//! - [`api`] exposes the [`TimeAxis`] facade that ties both together.
//! - [`interaction`] turns wheel input into frame-stepped zoom and pan.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{AxisStyle, SubscriptionId, TimeAxis, TimeAxisConfig};
pub use crate::core::{
    CustomTick, FitOutcome, PreciseInstant, PresetTick, ScaleConfig, ScaleController,
    ScaleTransition, TickCatalog, TickDefinition, TimeUnit, TimeZoneContext,
};
pub use error::{RulerError, RulerResult};
