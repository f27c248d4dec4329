use chrono::{NaiveDate, NaiveDateTime};
use time_ruler::RulerError;
use time_ruler::core::time_unit::{DAY, HOUR, MINUTE, SECOND};
use time_ruler::core::{CalendarField, PreciseInstant, TimeUnit, TimeZoneContext};

fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .and_then(|date| date.and_hms_opt(h, mi, s))
        .expect("valid local time")
}

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> PreciseInstant {
    PreciseInstant::from_local(&local(y, mo, d, h, mi, s), TimeZoneContext::Utc)
        .expect("utc instant")
}

#[test]
fn month_step_keeps_day_of_month() {
    let start = utc(2024, 1, 15, 10, 30, 0);
    let next = start.add(1, TimeUnit::Month).expect("add month");
    assert_eq!(next, utc(2024, 2, 15, 10, 30, 0));
    assert_eq!(next.subtract(1, TimeUnit::Month).expect("subtract"), start);
}

#[test]
fn month_step_into_missing_day_is_rejected() {
    let start = utc(2024, 1, 31, 0, 0, 0);
    let err = start.add(1, TimeUnit::Month).expect_err("february 31st");
    assert!(matches!(err, RulerError::Overflow(_)));
}

#[test]
fn leap_day_plus_one_year_is_rejected() {
    let start = utc(2024, 2, 29, 0, 0, 0);
    assert!(start.add(1, TimeUnit::Year).is_err());
    assert_eq!(
        start.add(4, TimeUnit::Year).expect("next leap year"),
        utc(2028, 2, 29, 0, 0, 0)
    );
}

#[test]
fn day_step_keeps_local_wall_clock_across_dst() {
    let berlin: TimeZoneContext = "Europe/Berlin".parse().expect("zone");
    let before = PreciseInstant::from_local(&local(2024, 3, 30, 12, 0, 0), berlin).expect("before");
    let after = before.add(1, TimeUnit::Day).expect("add day");

    assert_eq!(after.get(CalendarField::Hour), 12);
    assert_eq!(after.get(CalendarField::Day), 31);
    assert_eq!(after - before, 23 * HOUR);
}

#[test]
fn sub_day_units_are_exact_offsets() {
    let start = utc(2024, 6, 1, 0, 0, 0);
    let later = start.add(90, TimeUnit::Minute).expect("add minutes");
    assert_eq!(later - start, 90 * MINUTE);
    let earlier = start.subtract(1_500, TimeUnit::Millisecond).expect("subtract ms");
    assert_eq!(start - earlier, SECOND + SECOND / 2);
}

#[test]
fn set_day_of_week_shifts_within_the_iso_week() {
    let wednesday = utc(2024, 5, 15, 9, 0, 0);
    assert_eq!(wednesday.get(CalendarField::DayOfWeek), 3);

    let monday = wednesday.set(CalendarField::DayOfWeek, 1).expect("monday");
    assert_eq!(monday, utc(2024, 5, 13, 9, 0, 0));
    let sunday = wednesday.set(CalendarField::DayOfWeek, 7).expect("sunday");
    assert_eq!(sunday, utc(2024, 5, 19, 9, 0, 0));
    assert!(wednesday.set(CalendarField::DayOfWeek, 8).is_err());
}

#[test]
fn set_rejects_nonexistent_dates_instead_of_clamping() {
    let february = utc(2023, 2, 10, 0, 0, 0);
    assert!(matches!(
        february.set(CalendarField::Day, 30),
        Err(RulerError::Overflow(_))
    ));
    assert!(february.set(CalendarField::Hour, 24).is_err());
    assert_eq!(
        february.set(CalendarField::Day, 28).expect("valid day"),
        utc(2023, 2, 28, 0, 0, 0)
    );
}

#[test]
fn set_sub_second_fields_keeps_the_other_digits() {
    let instant = PreciseInstant::from_nanos(123_456_789, TimeZoneContext::Utc).expect("instant");
    let updated = instant.set(CalendarField::Microsecond, 999).expect("set micro");
    assert_eq!(updated.epoch_nanos(), 123_999_789);
    assert!(instant.set(CalendarField::Millisecond, 1_000).is_err());
}

#[test]
fn divisibility_is_evaluated_in_local_time() {
    let shanghai: TimeZoneContext = "+08:00".parse().expect("zone");
    let local_midnight =
        PreciseInstant::from_local(&local(2024, 1, 2, 0, 0, 0), shanghai).expect("midnight");

    assert!(local_midnight.is_divisible_by(DAY).expect("day"));
    let same_in_utc = local_midnight.with_zone(TimeZoneContext::Utc).expect("utc");
    assert!(!same_in_utc.is_divisible_by(DAY).expect("day"));
    assert!(same_in_utc.is_divisible_by(HOUR).expect("hour"));
}

#[test]
fn zero_or_negative_divisor_fails_fast() {
    let instant = utc(2024, 1, 1, 0, 0, 0);
    assert!(matches!(
        instant.is_divisible_by(0),
        Err(RulerError::InvalidDivisor(0))
    ));
    assert!(instant.end_of_duration(-5).is_err());
    assert!(instant.end_of(0, TimeUnit::Second).is_err());
}

#[test]
fn end_of_rounds_up_to_the_next_boundary() {
    let instant = utc(2023, 6, 15, 12, 34, 56);
    assert_eq!(
        instant.end_of(1, TimeUnit::Minute).expect("minute"),
        utc(2023, 6, 15, 12, 35, 0)
    );
    assert_eq!(
        instant.end_of(1, TimeUnit::Day).expect("day"),
        utc(2023, 6, 16, 0, 0, 0)
    );
    assert_eq!(
        instant.end_of(1, TimeUnit::Month).expect("month"),
        utc(2023, 7, 1, 0, 0, 0)
    );
    assert_eq!(
        instant.end_of(1, TimeUnit::Year).expect("year"),
        utc(2024, 1, 1, 0, 0, 0)
    );
    assert_eq!(
        instant.end_of(10, TimeUnit::Year).expect("decade"),
        utc(2030, 1, 1, 0, 0, 0)
    );
    assert_eq!(
        instant.end_of(3, TimeUnit::Month).expect("quarter"),
        utc(2023, 7, 1, 0, 0, 0)
    );
}

#[test]
fn end_of_is_idempotent_on_boundaries() {
    let boundary = utc(2024, 1, 1, 0, 0, 0);
    for (increment, unit) in [
        (1, TimeUnit::Year),
        (1, TimeUnit::Month),
        (1, TimeUnit::Day),
        (1, TimeUnit::Hour),
        (10, TimeUnit::Minute),
        (100, TimeUnit::Millisecond),
    ] {
        assert_eq!(boundary.end_of(increment, unit).expect("end of"), boundary);
    }
}

#[test]
fn zone_never_changes_identity() {
    let utc_instant = PreciseInstant::from_nanos(1_700_000_000 * SECOND, TimeZoneContext::Utc)
        .expect("utc");
    let tokyo = utc_instant
        .with_zone("Asia/Tokyo".parse().expect("zone"))
        .expect("tokyo");

    assert_eq!(utc_instant, tokyo);
    assert_ne!(
        utc_instant.get(CalendarField::Hour),
        tokyo.get(CalendarField::Hour)
    );
}

#[test]
fn display_is_rfc3339_with_nanoseconds() {
    let instant = PreciseInstant::from_nanos(1_500_000_001, TimeZoneContext::Utc).expect("instant");
    assert_eq!(instant.to_string(), "1970-01-01T00:00:01.500000001+00:00");
}

#[test]
fn unit_and_field_tokens_parse() {
    assert_eq!("ms".parse::<TimeUnit>().expect("unit"), TimeUnit::Millisecond);
    assert_eq!("us".parse::<TimeUnit>().expect("unit"), TimeUnit::Microsecond);
    assert!(matches!(
        "fortnight".parse::<TimeUnit>(),
        Err(RulerError::InvalidUnit(_))
    ));
    assert_eq!("D".parse::<CalendarField>().expect("field"), CalendarField::Day);
    assert_eq!("d".parse::<CalendarField>().expect("field"), CalendarField::DayOfWeek);
    assert!(matches!(
        "week".parse::<CalendarField>(),
        Err(RulerError::InvalidField(_))
    ));
}

#[test]
fn out_of_range_nanos_are_rejected() {
    assert!(matches!(
        PreciseInstant::from_nanos(i128::MAX, TimeZoneContext::Utc),
        Err(RulerError::OutOfRange(_))
    ));
    assert!(PreciseInstant::from_millis_f64(f64::NAN, TimeZoneContext::Utc).is_err());
}

#[test]
fn end_of_stays_in_the_repeated_hour_after_fall_back() {
    use chrono::{TimeZone, Utc};

    let new_york: TimeZoneContext = "America/New_York".parse().expect("zone");
    let at = |h: u32, mi: u32| {
        let utc = Utc.with_ymd_and_hms(2023, 11, 5, h, mi, 0).single().expect("utc");
        PreciseInstant::from_datetime(&utc, new_york).expect("instant")
    };

    // 01:35 EST, the second pass through 01:xx local.
    let second_pass = at(6, 35);
    let rounded = second_pass.end_of(10, TimeUnit::Minute).expect("end of");
    assert_eq!(rounded, at(6, 40));
    assert_eq!(rounded.format("HH:mm Z"), "01:40 -05:00");

    // 01:35 EDT, the first pass.
    let first_pass = at(5, 35);
    assert_eq!(first_pass.end_of(10, TimeUnit::Minute).expect("end of"), at(5, 40));

    for minute in (0..60).step_by(7) {
        for hour in [5, 6] {
            let instant = at(hour, minute);
            let rounded = instant.end_of(10, TimeUnit::Minute).expect("end of");
            assert!(rounded >= instant, "{rounded} before {instant}");
        }
    }
}

#[test]
fn end_of_skips_a_boundary_swallowed_by_spring_forward() {
    let berlin: TimeZoneContext = "Europe/Berlin".parse().expect("zone");
    let before_gap = PreciseInstant::from_local(&local(2024, 3, 31, 1, 30, 0), berlin)
        .expect("before gap");
    let rounded = before_gap.end_of(1, TimeUnit::Hour).expect("end of");

    assert_eq!(rounded - before_gap, 30 * MINUTE);
    assert_eq!(rounded.format("HH:mm Z"), "03:00 +02:00");
}
