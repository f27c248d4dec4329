use std::fmt;
use std::str::FromStr;

use chrono::{FixedOffset, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{RulerError, RulerResult};

/// Zone used to interpret an absolute instant as local wall-clock time.
///
/// The zone never changes the absolute value of an instant; it only drives
/// calendar-field decomposition, local-time rounding, and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeZoneContext {
    #[default]
    Utc,
    Fixed(FixedOffset),
    Named(Tz),
}

impl TimeZoneContext {
    /// Host zone as reported by the operating system, UTC when unknown.
    #[must_use]
    pub fn system() -> Self {
        iana_time_zone::get_timezone()
            .ok()
            .and_then(|name| name.parse::<Tz>().ok())
            .map_or(Self::Utc, Self::Named)
    }

    /// Fixed offset east of UTC, in seconds.
    pub fn fixed_seconds(seconds_east: i32) -> RulerResult<Self> {
        FixedOffset::east_opt(seconds_east)
            .map(Self::Fixed)
            .ok_or_else(|| RulerError::InvalidTimeZone(format!("{seconds_east}s")))
    }

    /// Offset in effect at the given UTC wall-clock time.
    #[must_use]
    pub fn offset_at_utc(self, utc: &NaiveDateTime) -> FixedOffset {
        match self {
            Self::Utc => Utc.fix(),
            Self::Fixed(offset) => offset,
            Self::Named(tz) => tz.offset_from_utc_datetime(utc).fix(),
        }
    }

    /// Maps a local wall-clock time back to UTC.
    ///
    /// Ambiguous local times resolve to the earlier instant; local times that
    /// fall into a transition gap use the offset in effect before the gap.
    pub fn resolve_local(self, local: &NaiveDateTime) -> RulerResult<NaiveDateTime> {
        let offset = match self {
            Self::Utc => return Ok(*local),
            Self::Fixed(offset) => offset,
            Self::Named(tz) => match tz.from_local_datetime(local) {
                LocalResult::Single(resolved) | LocalResult::Ambiguous(resolved, _) => {
                    return Ok(resolved.naive_utc());
                }
                LocalResult::None => {
                    let before = local
                        .checked_sub_signed(TimeDelta::days(1))
                        .ok_or_else(|| RulerError::Overflow(format!("local time {local}")))?;
                    tz.offset_from_utc_datetime(&before).fix()
                }
            },
        };

        local
            .checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
            .ok_or_else(|| RulerError::Overflow(format!("local time {local}")))
    }
}

impl fmt::Display for TimeZoneContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => f.write_str("UTC"),
            Self::Fixed(offset) => write!(f, "{offset}"),
            Self::Named(tz) => f.write_str(tz.name()),
        }
    }
}

impl FromStr for TimeZoneContext {
    type Err = RulerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
            return Ok(Self::Utc);
        }
        if trimmed.starts_with('+') || trimmed.starts_with('-') {
            return trimmed
                .parse::<FixedOffset>()
                .map(Self::Fixed)
                .map_err(|_| RulerError::InvalidTimeZone(trimmed.to_owned()));
        }
        trimmed
            .parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| RulerError::InvalidTimeZone(trimmed.to_owned()))
    }
}

impl TryFrom<String> for TimeZoneContext {
    type Error = RulerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeZoneContext> for String {
    fn from(zone: TimeZoneContext) -> Self {
        zone.to_string()
    }
}
