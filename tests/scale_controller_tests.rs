use std::sync::Arc;

use approx::assert_relative_eq;
use chrono::NaiveDate;
use time_ruler::core::time_unit::{HOUR, MILLISECOND, SECOND};
use time_ruler::core::{
    CustomTick, FitOutcome, PreciseInstant, ScaleConfig, ScaleController, ScaleTransition,
    TickCatalog, TimeUnit, TimeZoneContext,
};

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> PreciseInstant {
    let local = NaiveDate::from_ymd_opt(y, mo, d)
        .and_then(|date| date.and_hms_opt(h, mi, s))
        .expect("valid local time");
    PreciseInstant::from_local(&local, TimeZoneContext::Utc).expect("instant")
}

fn controller_at(anchor: PreciseInstant) -> ScaleController {
    ScaleController::with_presets(anchor).expect("controller")
}

fn index_of(controller: &ScaleController, name: &str) -> usize {
    controller
        .catalog()
        .iter()
        .position(|entry| entry.definition().name() == name)
        .expect("tick name")
}

fn select(controller: &mut ScaleController, name: &str, spacing: f64) {
    let index = index_of(controller, name);
    controller.select(index, spacing).expect("select");
}

#[test]
fn fit_picks_finest_granularity_in_bounds() {
    let mut controller = controller_at(utc(2024, 1, 1, 0, 0, 0));
    let outcome = controller
        .fit_by_pixel_duration((20 * MILLISECOND) as f64)
        .expect("fit");

    assert_eq!(outcome, FitOutcome::Exact);
    assert_eq!(controller.active_tick().name(), "100 milliseconds");
    assert_relative_eq!(controller.spacing(), 5.0);
    assert_relative_eq!(controller.pixel_duration(), 2.0e7);
}

#[test]
fn fit_outside_catalog_range_clamps_to_nearest_bound() {
    let mut controller = controller_at(utc(2024, 1, 1, 0, 0, 0));

    let coarse = controller.fit_by_pixel_duration(1e20).expect("fit");
    assert_eq!(coarse, FitOutcome::Clamped);
    assert_eq!(controller.active_index(), 0);
    assert_relative_eq!(controller.spacing(), 2.0);

    let fine = controller.fit_by_pixel_duration(1e-3).expect("fit");
    assert_eq!(fine, FitOutcome::Clamped);
    assert_eq!(controller.active_index(), controller.catalog().len() - 1);
    assert_relative_eq!(controller.spacing(), 500.0);
}

#[test]
fn fit_rejects_non_positive_density() {
    let mut controller = controller_at(utc(2024, 1, 1, 0, 0, 0));
    assert!(controller.fit_by_pixel_duration(0.0).is_err());
    assert!(controller.fit_by_pixel_duration(-1.0).is_err());
    assert!(controller.fit_by_pixel_duration(f64::NAN).is_err());
}

#[test]
fn one_hour_range_over_default_width() {
    let mut controller = controller_at(utc(2024, 1, 1, 0, 0, 0));
    let start = utc(2024, 1, 1, 0, 0, 0);
    let end = utc(2024, 1, 1, 1, 0, 0);

    let outcome = controller.fit_by_date_range(&start, &end, 1.0).expect("fit");
    assert_eq!(outcome, FitOutcome::Exact);
    assert_eq!(controller.active_tick().name(), "10 seconds");
    assert_relative_eq!(controller.spacing(), 20.0 / 9.0, epsilon = 1e-9);
}

#[test]
fn inverted_range_resets_to_default() {
    let mut controller = controller_at(utc(2024, 1, 1, 0, 0, 0));
    select(&mut controller, "1 minute", 40.0);
    let start = utc(2024, 1, 1, 1, 0, 0);
    let end = utc(2024, 1, 1, 0, 0, 0);

    let outcome = controller.fit_by_date_range(&start, &end, 1.0).expect("fit");
    assert_eq!(outcome, FitOutcome::Reset);
    assert_eq!(controller.active_index(), 0);
    assert_relative_eq!(controller.spacing(), 8.0);
    assert!(controller.fit_by_date_range(&end, &start, 0.0).is_err());
}

#[test]
fn first_visible_tick_rounds_up_to_boundary() {
    let mut controller = controller_at(utc(2024, 1, 1, 0, 0, 0));
    select(&mut controller, "1 minute", 10.0);
    let anchor = utc(2024, 1, 1, 12, 34, 56)
        .add_nanos(789 * MILLISECOND)
        .expect("anchor");

    let first = controller.first_visible_tick(&anchor).expect("first");
    assert_eq!(first, utc(2024, 1, 1, 12, 35, 0));
}

#[test]
fn hourly_ticks_cover_the_width_inclusively() {
    let mut controller = controller_at(utc(2024, 1, 1, 0, 0, 0));
    select(&mut controller, "1 hour", 50.0);

    let ticks = controller.visible_ticks(800.0).expect("ticks");
    assert_eq!(ticks.len(), 17);
    assert_relative_eq!(ticks[0].x, 0.0);
    assert_relative_eq!(ticks[16].x, 800.0, epsilon = 1e-9);
    assert_eq!(ticks[16].instant, utc(2024, 1, 1, 16, 0, 0));
}

#[test]
fn month_ticks_follow_calendar_lengths() {
    let mut controller = controller_at(utc(2024, 1, 1, 0, 0, 0));
    select(&mut controller, "1 month", 31.0);

    let ticks = controller.visible_ticks(70.0).expect("ticks");
    let xs: Vec<f64> = ticks.iter().map(|tick| tick.x).collect();
    assert_eq!(xs.len(), 3);
    assert_relative_eq!(xs[0], 0.0);
    assert_relative_eq!(xs[1], 31.0, epsilon = 1e-9);
    assert_relative_eq!(xs[2], 60.0, epsilon = 1e-9);
}

#[test]
fn ticks_start_after_an_unaligned_anchor() {
    let anchor = utc(2024, 1, 1, 0, 0, 0).add_nanos(HOUR / 2).expect("anchor");
    let mut controller = controller_at(anchor);
    select(&mut controller, "1 hour", 40.0);

    let ticks = controller.visible_ticks(100.0).expect("ticks");
    assert_eq!(ticks.len(), 3);
    assert_relative_eq!(ticks[0].x, 20.0, epsilon = 1e-9);
    assert_eq!(ticks[0].instant, utc(2024, 1, 1, 1, 0, 0));
}

#[test]
fn move_by_pans_the_anchor() {
    let start = utc(2024, 1, 1, 0, 0, 0);
    let mut controller = controller_at(start);
    select(&mut controller, "1 second", 50.0);

    controller.move_by(100.0).expect("move");
    assert_eq!(*controller.anchor() - start, 2 * SECOND);
    controller.move_by(-25.0).expect("move");
    assert_eq!(*controller.anchor() - start, 3 * SECOND / 2);
}

#[test]
fn zoom_keeps_the_instant_under_the_cursor() {
    let mut controller = controller_at(utc(2024, 1, 1, 0, 0, 0));
    select(&mut controller, "1 second", 50.0);
    let under_cursor = controller.instant_at(200.0).expect("instant");

    let transition = controller.zoom_at(1.25, 200.0).expect("zoom");
    assert_eq!(transition, ScaleTransition::Rescaled);
    assert_relative_eq!(controller.spacing(), 62.5);
    assert_relative_eq!(controller.position_of(&under_cursor), 200.0, epsilon = 1e-6);
}

#[test]
fn registering_a_definition_keeps_the_active_tick() {
    let mut controller = controller_at(utc(2024, 1, 1, 0, 0, 0));
    select(&mut controller, "1 second", 25.0);
    let before = controller.active_index();

    let index = controller
        .use_definition(Arc::new(CustomTick::new(30, TimeUnit::Second)))
        .expect("register");
    assert_eq!(index, before - 1);
    assert_eq!(controller.active_index(), before + 1);
    assert_eq!(controller.active_tick().name(), "1 second");
    assert_relative_eq!(controller.spacing(), 25.0);
}

#[test]
fn finest_entry_pins_at_max() {
    let mut controller = controller_at(utc(2024, 1, 1, 0, 0, 0));
    let finest = controller.catalog().len() - 1;

    controller.select(finest, 500.0).expect("select");
    assert!(controller.can_scale(1.25));
    assert!(controller.is_pinned(1.25));
    assert!(controller.can_scale(0.8));
    assert!(!controller.is_pinned(0.8));

    controller.select(finest, 450.0).expect("select");
    assert!(controller.can_scale(1.25));
    assert_eq!(controller.scale(1.25).expect("scale"), ScaleTransition::Pinned);
    assert_relative_eq!(controller.spacing(), 500.0);
    assert_eq!(controller.active_index(), finest);
    assert_eq!(controller.zoom_at(1.25, 10.0).expect("zoom"), ScaleTransition::Pinned);
}

#[test]
fn can_scale_only_checks_the_pre_scale_bound() {
    let mut controller = controller_at(utc(2024, 1, 1, 0, 0, 0));
    controller.select(0, 2.0).expect("select");
    assert!(controller.can_scale(0.8));
    assert!(controller.is_pinned(0.8));
    assert!(controller.can_scale(1.25));
    assert!(!controller.is_pinned(1.25));
}

#[test]
fn pinned_zoom_keeps_the_instant_under_the_cursor() {
    let mut controller = controller_at(utc(2024, 1, 1, 0, 0, 0));
    let finest = controller.catalog().len() - 1;
    controller.select(finest, 450.0).expect("select");
    let under_cursor = controller.instant_at(200.0).expect("instant");

    assert_eq!(controller.zoom_at(1.25, 200.0).expect("zoom"), ScaleTransition::Pinned);
    assert_relative_eq!(controller.spacing(), 500.0);
    assert_relative_eq!(controller.position_of(&under_cursor), 200.0, epsilon = 1e-3);
}

#[test]
fn neutral_or_invalid_ratio_never_scales() {
    let controller = controller_at(utc(2024, 1, 1, 0, 0, 0));
    assert!(!controller.can_scale(1.0));
    assert!(!controller.can_scale(0.0));
    assert!(!controller.can_scale(f64::INFINITY));
}

#[test]
fn zoom_in_hysteresis_delays_swap() {
    let catalog = TickCatalog::presets().expect("presets");
    let config = ScaleConfig::default()
        .with_spacing_bounds(2.0, 100.0)
        .with_default_spacing(8.0)
        .with_hysteresis_threshold(20.0);
    let mut controller =
        ScaleController::new(config, catalog, utc(2024, 1, 1, 0, 0, 0)).expect("controller");
    select(&mut controller, "1 second", 90.0);

    // 112.5 < 10 * 20, so the finer entry does not take over yet.
    assert_eq!(controller.scale(1.25).expect("scale"), ScaleTransition::Pinned);
    assert_eq!(controller.active_tick().name(), "1 second");
    assert_relative_eq!(controller.spacing(), 100.0);
}

#[test]
fn custom_catalog_with_custom_bounds() {
    let mut catalog = TickCatalog::new();
    catalog
        .register_custom(CustomTick::new(1, TimeUnit::Hour))
        .expect("hour");
    catalog
        .register_custom(CustomTick::new(15, TimeUnit::Minute))
        .expect("quarter");
    let config = ScaleConfig::default().with_spacing_bounds(4.0, 200.0);
    let mut controller =
        ScaleController::new(config, catalog, utc(2024, 1, 1, 0, 0, 0)).expect("controller");

    controller.select(0, 190.0).expect("select");
    let transition = controller.scale(1.25).expect("scale");
    assert_eq!(transition, ScaleTransition::Swapped { from: 0, to: 1 });
    assert_relative_eq!(controller.spacing(), 190.0 * 1.25 / 4.0, epsilon = 1e-9);
}
