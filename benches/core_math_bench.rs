use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use time_ruler::core::time_unit::SECOND;
use time_ruler::core::{PreciseInstant, ScaleController, TimeZoneContext, Viewport};
use time_ruler::render::NullRenderer;
use time_ruler::{TimeAxis, TimeAxisConfig};

fn anchor() -> PreciseInstant {
    PreciseInstant::from_nanos(1_704_067_200 * SECOND, TimeZoneContext::Utc).expect("anchor")
}

fn bench_pixel_round_trip(c: &mut Criterion) {
    let mut controller = ScaleController::with_presets(anchor()).expect("controller");
    controller.fit_by_pixel_duration(1.0e8).expect("fit");
    let target = anchor().add_nanos(123_456_789_012).expect("target");

    c.bench_function("pixel_round_trip", |b| {
        b.iter(|| {
            let x = controller.position_of(black_box(&target));
            let _ = controller.instant_at(black_box(x)).expect("instant");
        })
    });
}

fn bench_fit_by_pixel_duration(c: &mut Criterion) {
    let mut controller = ScaleController::with_presets(anchor()).expect("controller");

    c.bench_function("fit_by_pixel_duration", |b| {
        b.iter(|| {
            let _ = controller
                .fit_by_pixel_duration(black_box(3.7e7))
                .expect("fit");
        })
    });
}

fn bench_visible_ticks_1920(c: &mut Criterion) {
    let mut controller = ScaleController::with_presets(anchor()).expect("controller");
    controller.fit_by_pixel_duration(5.0e7).expect("fit");

    c.bench_function("visible_ticks_1920", |b| {
        b.iter(|| {
            let _ = controller
                .visible_ticks(black_box(1_920.0))
                .expect("ticks");
        })
    });
}

fn bench_format_full_precision(c: &mut Criterion) {
    let instant = anchor().add_nanos(987_654_321).expect("instant");

    c.bench_function("format_full_precision", |b| {
        b.iter(|| {
            let _ = black_box(&instant).format(black_box("YYYY-MM-DD HH:mm:ss.SSSSSSSSS Z"));
        })
    });
}

fn bench_axis_render_frame(c: &mut Criterion) {
    let config = TimeAxisConfig::new(Viewport::new(1_920, 80));
    let mut axis = TimeAxis::new(NullRenderer::default(), config, anchor()).expect("axis");
    axis.fit_pixel_duration(1.0e8).expect("fit");
    axis.set_indicator(Some(anchor().add_nanos(42 * SECOND).expect("indicator")))
        .expect("indicator");

    c.bench_function("axis_render_frame_1920", |b| {
        b.iter(|| {
            let _ = axis.build_render_frame().expect("frame");
        })
    });
}

criterion_group!(
    benches,
    bench_pixel_round_trip,
    bench_fit_by_pixel_duration,
    bench_visible_ticks_1920,
    bench_format_full_precision,
    bench_axis_render_frame
);
criterion_main!(benches);
