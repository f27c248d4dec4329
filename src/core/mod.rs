pub mod custom_tick;
pub mod format;
pub mod precise_instant;
pub mod scale_config;
pub mod scale_controller;
pub mod tick;
pub mod tick_catalog;
pub mod tick_presets;
pub mod time_unit;
pub mod time_zone;
pub mod types;

pub use custom_tick::CustomTick;
pub use format::format_instant;
pub use precise_instant::PreciseInstant;
pub use scale_config::ScaleConfig;
pub use scale_controller::{FitOutcome, ScaleController, ScaleTransition};
pub use tick::{
    LabelLevel, LabelLevels, MarkClass, TickDefinition, TickDraw, TickLabel, nominal_base,
    validate_granularity,
};
pub use tick_catalog::{TickCatalog, TickEntry};
pub use tick_presets::PresetTick;
pub use time_unit::{CalendarField, TimeUnit};
pub use time_zone::TimeZoneContext;
pub use types::Viewport;
