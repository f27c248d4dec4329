use approx::assert_relative_eq;
use time_ruler::core::Viewport;
use time_ruler::core::time_unit::SECOND;
use time_ruler::interaction::{
    DEFAULT_ANIMATION_MS, PanAnimation, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT, WheelAction, ZoomAnimation,
};
use time_ruler::render::NullRenderer;
use time_ruler::{PreciseInstant, TimeAxis, TimeAxisConfig, TimeZoneContext};

fn axis_at_one_second() -> TimeAxis<NullRenderer> {
    let anchor = PreciseInstant::from_nanos(1_704_067_200 * SECOND, TimeZoneContext::Utc)
        .expect("anchor");
    let config = TimeAxisConfig::new(Viewport::new(800, 80));
    let mut axis = TimeAxis::new(NullRenderer::default(), config, anchor).expect("axis");
    axis.fit_pixel_duration(1.0e8).expect("fit");
    axis
}

#[test]
fn wheel_direction_picks_zoom_ratio() {
    assert_eq!(
        WheelAction::resolve(3.0, false, 120.0),
        Some(WheelAction::Zoom {
            ratio: WHEEL_ZOOM_IN,
            x: 120.0
        })
    );
    assert_eq!(
        WheelAction::resolve(-3.0, false, 120.0),
        Some(WheelAction::Zoom {
            ratio: WHEEL_ZOOM_OUT,
            x: 120.0
        })
    );
    assert_eq!(WheelAction::resolve(f64::NAN, false, 0.0), None);
    assert_eq!(WheelAction::resolve(1.0, false, f64::INFINITY), None);
}

#[test]
fn zoom_animation_ends_exactly_on_target() {
    let mut animation = ZoomAnimation::new(0.8, 0.0, DEFAULT_ANIMATION_MS).expect("zoom");
    let mut frames = 0;
    while animation.step(40.0).is_some() {
        frames += 1;
    }
    assert!((5..=6).contains(&frames));
    assert!(animation.is_finished());
    assert_relative_eq!(animation.applied(), 0.8, epsilon = 1e-12);
}

#[test]
fn neutral_zoom_animation_is_already_finished() {
    let mut animation = ZoomAnimation::new(1.0, 0.0, 100.0).expect("zoom");
    assert!(animation.is_finished());
    assert_eq!(animation.step(16.0), None);
}

#[test]
fn pan_animation_rounds_steps_up_to_whole_pixels() {
    let mut animation = PanAnimation::new(30.0, 200.0).expect("pan");
    assert_eq!(animation.step(16.0), Some(3.0));
    assert_relative_eq!(animation.remaining_px(), 27.0);
    assert_eq!(animation.step(1_000.0), Some(27.0));
    assert!(animation.is_finished());
    assert_eq!(animation.step(16.0), None);
}

#[test]
fn invalid_animation_parameters_are_rejected() {
    assert!(ZoomAnimation::new(0.0, 0.0, 200.0).is_err());
    assert!(ZoomAnimation::new(1.25, f64::NAN, 200.0).is_err());
    assert!(PanAnimation::new(10.0, 0.0).is_err());

    let mut axis = axis_at_one_second();
    assert!(axis.start_pan(10.0, -1.0).is_err());
    assert!(axis.start_zoom(1.25, 0.0, f64::INFINITY).is_err());
    assert!(!axis.is_animating());
}

#[test]
fn animated_wheel_zoom_reaches_target_spacing() {
    let mut axis = axis_at_one_second();
    let under_cursor = axis.instant_at(400.0).expect("instant");

    let action = axis.handle_wheel(1.0, false, 400.0).expect("wheel");
    assert_eq!(
        action,
        Some(WheelAction::Zoom {
            ratio: WHEEL_ZOOM_IN,
            x: 400.0
        })
    );
    assert!(axis.is_animating());

    let mut frames = 0;
    while axis.advance_zoom(16.0).expect("advance").is_some() {
        frames += 1;
    }
    assert_eq!(frames, 13);
    assert!(!axis.is_animating());
    assert_relative_eq!(axis.scale().spacing(), 12.5, epsilon = 1e-9);
    assert_relative_eq!(axis.pos_of(&under_cursor), 400.0, epsilon = 1e-3);
}

#[test]
fn ctrl_wheel_pans_toward_later_times() {
    let mut axis = axis_at_one_second();
    let start = *axis.anchor();

    axis.handle_wheel(30.0, true, 0.0).expect("wheel");
    let mut frames = 0;
    while axis.advance_pan(16.0).expect("advance") {
        frames += 1;
    }
    assert_eq!(frames, 10);
    assert_eq!(*axis.anchor() - start, 3 * SECOND);
    assert!(!axis.is_animating());
}

#[test]
fn cancelling_stops_pending_animations() {
    let mut axis = axis_at_one_second();
    assert!(axis.start_zoom(1.25, 100.0, 200.0).expect("zoom"));
    axis.start_pan(-40.0, 200.0).expect("pan");
    assert!(axis.advance_zoom(16.0).expect("advance").is_some());

    let spacing = axis.scale().spacing();
    axis.cancel_animations();
    assert!(!axis.is_animating());
    assert_eq!(axis.advance_zoom(16.0).expect("advance"), None);
    assert!(!axis.advance_pan(16.0).expect("advance"));
    assert_relative_eq!(axis.scale().spacing(), spacing);
}

#[test]
fn zoom_out_refused_when_pinned_at_coarsest() {
    let mut axis = axis_at_one_second();
    axis.fit_pixel_duration(1e20).expect("fit");
    assert_eq!(axis.scale().active_index(), 0);

    assert!(!axis.start_zoom(WHEEL_ZOOM_OUT, 100.0, 200.0).expect("zoom"));
    assert!(!axis.is_animating());
    assert!(axis.start_zoom(WHEEL_ZOOM_IN, 100.0, 200.0).expect("zoom"));
}
