use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Sub;

use chrono::{
    DateTime, Datelike, FixedOffset, Locale, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta,
    TimeZone, Timelike,
};

use crate::core::format::format_instant;
use crate::core::time_unit::{CalendarField, MILLISECOND, SECOND, TimeUnit};
use crate::core::time_zone::TimeZoneContext;
use crate::error::{RulerError, RulerResult};

/// Immutable point in time with nanosecond resolution.
///
/// The absolute value is an `i128` count of nanoseconds since the Unix epoch.
/// Arithmetic, ordering, and equality only look at that value; the attached
/// zone is used to decompose calendar fields, round in local time, and
/// format. Every operation returns a new instant.
#[derive(Debug, Clone, Copy)]
pub struct PreciseInstant {
    nanos: i128,
    zone: TimeZoneContext,
    local: DateTime<FixedOffset>,
}

impl PreciseInstant {
    pub fn from_nanos(nanos: i128, zone: TimeZoneContext) -> RulerResult<Self> {
        let seconds = i64::try_from(nanos.div_euclid(SECOND))
            .map_err(|_| RulerError::OutOfRange(nanos))?;
        let subsec = u32::try_from(nanos.rem_euclid(SECOND))
            .map_err(|_| RulerError::OutOfRange(nanos))?;
        let utc =
            DateTime::from_timestamp(seconds, subsec).ok_or(RulerError::OutOfRange(nanos))?;
        let offset = zone.offset_at_utc(&utc.naive_utc());
        let local = offset.from_utc_datetime(&utc.naive_utc());
        Ok(Self { nanos, zone, local })
    }

    /// Builds an instant from a (possibly fractional) millisecond timestamp.
    ///
    /// The integer part is exact; the fraction is truncated to whole nanoseconds.
    pub fn from_millis_f64(millis: f64, zone: TimeZoneContext) -> RulerResult<Self> {
        if !millis.is_finite() {
            return Err(RulerError::InvalidData(
                "millisecond timestamp must be finite".to_owned(),
            ));
        }
        let whole = millis.trunc();
        let fraction = millis - whole;
        let nanos = (whole as i128) * MILLISECOND + (fraction * 1_000_000.0).trunc() as i128;
        Self::from_nanos(nanos, zone)
    }

    pub fn from_datetime<Z: TimeZone>(
        datetime: &DateTime<Z>,
        zone: TimeZoneContext,
    ) -> RulerResult<Self> {
        Self::from_nanos(nanos_from_utc(&datetime.naive_utc()), zone)
    }

    /// Resolves a local wall-clock time in `zone` to an instant.
    pub fn from_local(local: &NaiveDateTime, zone: TimeZoneContext) -> RulerResult<Self> {
        let utc = zone.resolve_local(local)?;
        Self::from_nanos(nanos_from_utc(&utc), zone)
    }

    /// Unix epoch in the given zone.
    pub fn epoch(zone: TimeZoneContext) -> RulerResult<Self> {
        Self::from_nanos(0, zone)
    }

    #[must_use]
    pub fn epoch_nanos(&self) -> i128 {
        self.nanos
    }

    #[must_use]
    pub fn zone(&self) -> TimeZoneContext {
        self.zone
    }

    /// Same absolute instant, reinterpreted in another zone.
    pub fn with_zone(&self, zone: TimeZoneContext) -> RulerResult<Self> {
        Self::from_nanos(self.nanos, zone)
    }

    #[must_use]
    pub fn local_datetime(&self) -> DateTime<FixedOffset> {
        self.local
    }

    /// Offset of the local wall clock from UTC, in nanoseconds.
    #[must_use]
    pub fn utc_offset(&self) -> i128 {
        i128::from(self.local.offset().local_minus_utc()) * SECOND
    }

    /// Local wall-clock value expressed as nanoseconds since the local epoch.
    #[must_use]
    pub fn local_nanos(&self) -> i128 {
        self.nanos + self.utc_offset()
    }

    #[must_use]
    pub fn get(&self, field: CalendarField) -> i64 {
        let local = self.local.naive_local();
        let subsec = i64::from(local.nanosecond());
        match field {
            CalendarField::Year => i64::from(local.year()),
            CalendarField::Month => i64::from(local.month()),
            CalendarField::Day => i64::from(local.day()),
            CalendarField::Hour => i64::from(local.hour()),
            CalendarField::Minute => i64::from(local.minute()),
            CalendarField::Second => i64::from(local.second()),
            CalendarField::Millisecond => subsec / 1_000_000,
            CalendarField::Microsecond => (subsec / 1_000) % 1_000,
            CalendarField::Nanosecond => subsec % 1_000,
            CalendarField::DayOfWeek => i64::from(local.weekday().number_from_monday()),
        }
    }

    /// Returns a new instant with one local calendar field replaced.
    ///
    /// Values that produce a nonexistent date (February 30, hour 24, ...) are
    /// rejected with `Overflow` instead of being clamped.
    pub fn set(&self, field: CalendarField, value: i64) -> RulerResult<Self> {
        let local = self.local.naive_local();
        let overflow =
            || RulerError::Overflow(format!("cannot set {field} to {value} on {local}"));

        if field == CalendarField::DayOfWeek {
            if !(1..=7).contains(&value) {
                return Err(overflow());
            }
            return self.add(value - self.get(CalendarField::DayOfWeek), TimeUnit::Day);
        }

        let subsec = i64::from(local.nanosecond());
        let sub_part = |scale: i64| -> RulerResult<u32> {
            if !(0..1_000).contains(&value) {
                return Err(overflow());
            }
            let high = subsec - subsec % (scale * 1_000);
            let low = subsec % scale;
            u32::try_from(high + value * scale + low).map_err(|_| overflow())
        };

        let updated = match field {
            CalendarField::Year => i32::try_from(value)
                .ok()
                .and_then(|year| local.with_year(year)),
            CalendarField::Month => u32::try_from(value)
                .ok()
                .and_then(|month| local.with_month(month)),
            CalendarField::Day => u32::try_from(value)
                .ok()
                .and_then(|day| local.with_day(day)),
            CalendarField::Hour => u32::try_from(value)
                .ok()
                .and_then(|hour| local.with_hour(hour)),
            CalendarField::Minute => {
                u32::try_from(value).ok().and_then(|minute| local.with_minute(minute))
            }
            CalendarField::Second => {
                u32::try_from(value).ok().and_then(|second| local.with_second(second))
            }
            CalendarField::Millisecond => local.with_nanosecond(sub_part(1_000_000)?),
            CalendarField::Microsecond => local.with_nanosecond(sub_part(1_000)?),
            CalendarField::Nanosecond => local.with_nanosecond(sub_part(1)?),
            CalendarField::DayOfWeek => None,
        };

        let updated = updated.ok_or_else(overflow)?;
        Self::from_local(&updated, self.zone)
    }

    /// Calendar-aware addition.
    ///
    /// Years, months, and days move the local wall clock; finer units are
    /// exact nanosecond offsets. A month/year step that lands on a day that
    /// does not exist in the target month is rejected.
    pub fn add(&self, amount: i64, unit: TimeUnit) -> RulerResult<Self> {
        match unit {
            TimeUnit::Year => {
                let months = amount
                    .checked_mul(12)
                    .ok_or_else(|| RulerError::Overflow(format!("{amount} years")))?;
                self.add_months(months)
            }
            TimeUnit::Month => self.add_months(amount),
            TimeUnit::Day => {
                let local = self.local.naive_local();
                let shifted = TimeDelta::try_days(amount)
                    .and_then(|delta| local.checked_add_signed(delta))
                    .ok_or_else(|| RulerError::Overflow(format!("{amount} days from {local}")))?;
                Self::from_local(&shifted, self.zone)
            }
            _ => {
                let unit_nanos = unit.fixed_nanos().unwrap_or(1);
                let delta = i128::from(amount)
                    .checked_mul(unit_nanos)
                    .ok_or_else(|| RulerError::Overflow(format!("{amount} {unit}")))?;
                self.add_nanos(delta)
            }
        }
    }

    pub fn subtract(&self, amount: i64, unit: TimeUnit) -> RulerResult<Self> {
        let negated = amount
            .checked_neg()
            .ok_or_else(|| RulerError::Overflow(format!("-{amount} {unit}")))?;
        self.add(negated, unit)
    }

    /// Exact shift by a signed nanosecond count.
    pub fn add_nanos(&self, delta: i128) -> RulerResult<Self> {
        let nanos = self
            .nanos
            .checked_add(delta)
            .ok_or_else(|| RulerError::Overflow(format!("{delta}ns")))?;
        Self::from_nanos(nanos, self.zone)
    }

    /// Signed distance `self - earlier` in nanoseconds.
    #[must_use]
    pub fn duration_since(&self, earlier: &Self) -> i128 {
        self.nanos - earlier.nanos
    }

    /// Whether the local wall-clock value is an exact multiple of `duration`.
    pub fn is_divisible_by(&self, duration: i128) -> RulerResult<bool> {
        if duration <= 0 {
            return Err(RulerError::InvalidDivisor(duration));
        }
        Ok(self.local_nanos().rem_euclid(duration) == 0)
    }

    /// Rounds up to the next local-time multiple of `duration`.
    ///
    /// Instants already on a boundary are returned unchanged.
    pub fn end_of_duration(&self, duration: i128) -> RulerResult<Self> {
        if duration <= 0 {
            return Err(RulerError::InvalidDivisor(duration));
        }
        let local = self.local_nanos();
        let target = ceil_to_multiple(local, duration);
        if target == local {
            return Ok(*self);
        }
        // Keep our own offset while it is still valid at the boundary so the
        // second pass through a repeated hour stays in that pass.
        let same_offset = Self::from_nanos(target - self.utc_offset(), self.zone)?;
        if same_offset.local_nanos() == target {
            return Ok(same_offset);
        }
        let mut rounded = Self::from_local(&naive_from_nanos(target)?, self.zone)?;
        while rounded < *self {
            rounded = rounded.add_nanos(duration)?;
        }
        Ok(rounded)
    }

    /// Rounds up to the next boundary of `increment` × `unit` in local time.
    ///
    /// Year boundaries are January 1st of years divisible by `increment`;
    /// month boundaries are the first day of months whose zero-based index is
    /// divisible by `increment` (which must divide 12).
    pub fn end_of(&self, increment: u32, unit: TimeUnit) -> RulerResult<Self> {
        if increment == 0 {
            return Err(RulerError::InvalidDivisor(0));
        }
        match unit {
            TimeUnit::Year => self.end_of_months(i64::from(increment) * 12),
            TimeUnit::Month => {
                if increment >= 12 || 12 % increment != 0 {
                    return Err(RulerError::InvalidDivisor(i128::from(increment)));
                }
                self.end_of_months(i64::from(increment))
            }
            _ => {
                let unit_nanos = unit.wall_clock_nanos().unwrap_or(1);
                self.end_of_duration(i128::from(increment) * unit_nanos)
            }
        }
    }

    /// Formats with the `en_US` locale. See [`format_instant`] for tokens.
    #[must_use]
    pub fn format(&self, template: &str) -> String {
        format_instant(self, template, Locale::en_US)
    }

    #[must_use]
    pub fn format_localized(&self, template: &str, locale: Locale) -> String {
        format_instant(self, template, locale)
    }

    fn add_months(&self, months: i64) -> RulerResult<Self> {
        let local = self.local.naive_local();
        let index = i64::from(local.year()) * 12 + i64::from(local.month0());
        let target = index
            .checked_add(months)
            .ok_or_else(|| RulerError::Overflow(format!("{months} months from {local}")))?;
        let date = date_from_month_index(target, local.day()).ok_or_else(|| {
            RulerError::Overflow(format!(
                "day {} does not exist {months} months from {local}",
                local.day()
            ))
        })?;
        Self::from_local(&date.and_time(local.time()), self.zone)
    }

    fn end_of_months(&self, months: i64) -> RulerResult<Self> {
        let local = self.local.naive_local();
        let index = i64::from(local.year()) * 12 + i64::from(local.month0());
        let mut target = ceil_to_multiple(i128::from(index), i128::from(months));
        loop {
            let index = i64::try_from(target)
                .map_err(|_| RulerError::Overflow(format!("month index {target}")))?;
            let start = date_from_month_index(index, 1)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .ok_or_else(|| RulerError::Overflow(format!("month index {index}")))?;
            let candidate = Self::from_local(&start, self.zone)?;
            if candidate >= *self {
                return Ok(candidate);
            }
            target += i128::from(months);
        }
    }
}

fn date_from_month_index(index: i64, day: u32) -> Option<NaiveDate> {
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn ceil_to_multiple(value: i128, step: i128) -> i128 {
    value + (step - value.rem_euclid(step)) % step
}

fn nanos_from_utc(utc: &NaiveDateTime) -> i128 {
    let utc = utc.and_utc();
    i128::from(utc.timestamp()) * SECOND + i128::from(utc.timestamp_subsec_nanos())
}

fn naive_from_nanos(nanos: i128) -> RulerResult<NaiveDateTime> {
    let seconds =
        i64::try_from(nanos.div_euclid(SECOND)).map_err(|_| RulerError::OutOfRange(nanos))?;
    let subsec =
        u32::try_from(nanos.rem_euclid(SECOND)).map_err(|_| RulerError::OutOfRange(nanos))?;
    DateTime::from_timestamp(seconds, subsec)
        .map(|utc| utc.naive_utc())
        .ok_or(RulerError::OutOfRange(nanos))
}

impl PartialEq for PreciseInstant {
    fn eq(&self, other: &Self) -> bool {
        self.nanos == other.nanos
    }
}

impl Eq for PreciseInstant {}

impl PartialOrd for PreciseInstant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PreciseInstant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.nanos.cmp(&other.nanos)
    }
}

impl Hash for PreciseInstant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nanos.hash(state);
    }
}

impl Sub for PreciseInstant {
    type Output = i128;

    fn sub(self, rhs: Self) -> Self::Output {
        self.duration_since(&rhs)
    }
}

impl fmt::Display for PreciseInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.local.to_rfc3339_opts(SecondsFormat::Nanos, false))
    }
}
