use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RulerError;

pub const NANOSECOND: i128 = 1;
pub const MICROSECOND: i128 = 1_000;
pub const MILLISECOND: i128 = 1_000_000;
pub const SECOND: i128 = 1_000_000_000;
pub const MINUTE: i128 = 60 * SECOND;
pub const HOUR: i128 = 60 * MINUTE;
pub const DAY: i128 = 24 * HOUR;

/// Unit accepted by instant arithmetic and rounding.
///
/// Variants are declared coarsest first so the derived `Ord` ranks
/// coarser units before finer ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
}

impl TimeUnit {
    /// Exact length in nanoseconds for units that never vary with the calendar.
    ///
    /// `Day` is excluded because a local day may be 23 or 25 hours long.
    #[must_use]
    pub const fn fixed_nanos(self) -> Option<i128> {
        match self {
            Self::Year | Self::Month | Self::Day => None,
            Self::Hour => Some(HOUR),
            Self::Minute => Some(MINUTE),
            Self::Second => Some(SECOND),
            Self::Millisecond => Some(MILLISECOND),
            Self::Microsecond => Some(MICROSECOND),
            Self::Nanosecond => Some(NANOSECOND),
        }
    }

    /// Nominal length used for wall-clock rounding of day and finer units.
    #[must_use]
    pub const fn wall_clock_nanos(self) -> Option<i128> {
        match self {
            Self::Day => Some(DAY),
            _ => self.fixed_nanos(),
        }
    }

    #[must_use]
    pub const fn is_calendar(self) -> bool {
        matches!(self, Self::Year | Self::Month | Self::Day)
    }

    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Millisecond => "millisecond",
            Self::Microsecond => "microsecond",
            Self::Nanosecond => "nanosecond",
        }
    }

    /// Short label used by the scale bar.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Year => "y",
            Self::Month => "mo",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "min",
            Self::Second => "s",
            Self::Millisecond => "ms",
            Self::Microsecond => "us",
            Self::Nanosecond => "ns",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

impl FromStr for TimeUnit {
    type Err = RulerError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let unit = match token {
            "y" | "year" | "years" => Self::Year,
            "M" | "month" | "months" => Self::Month,
            "d" | "day" | "days" => Self::Day,
            "h" | "hour" | "hours" => Self::Hour,
            "m" | "minute" | "minutes" => Self::Minute,
            "s" | "second" | "seconds" => Self::Second,
            "ms" | "millisecond" | "milliseconds" => Self::Millisecond,
            "us" | "microsecond" | "microseconds" => Self::Microsecond,
            "ns" | "nanosecond" | "nanoseconds" => Self::Nanosecond,
            other => return Err(RulerError::InvalidUnit(other.to_owned())),
        };
        Ok(unit)
    }
}

/// Calendar field readable from (and writable to) an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarField {
    Year,
    /// 1-based month of the year.
    Month,
    /// 1-based day of the month.
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
    /// ISO day of week, Monday = 1 through Sunday = 7.
    DayOfWeek,
}

impl fmt::Display for CalendarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Millisecond => "millisecond",
            Self::Microsecond => "microsecond",
            Self::Nanosecond => "nanosecond",
            Self::DayOfWeek => "day_of_week",
        };
        f.write_str(name)
    }
}

impl FromStr for CalendarField {
    type Err = RulerError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let field = match token {
            "y" | "year" | "years" => Self::Year,
            "M" | "month" | "months" => Self::Month,
            "D" | "date" | "dates" => Self::Day,
            "h" | "hour" | "hours" => Self::Hour,
            "m" | "minute" | "minutes" => Self::Minute,
            "s" | "second" | "seconds" => Self::Second,
            "ms" | "millisecond" | "milliseconds" => Self::Millisecond,
            "us" | "microsecond" | "microseconds" => Self::Microsecond,
            "ns" | "nanosecond" | "nanoseconds" => Self::Nanosecond,
            "d" | "day" | "days" => Self::DayOfWeek,
            other => return Err(RulerError::InvalidField(other.to_owned())),
        };
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::{CalendarField, TimeUnit};

    #[test]
    fn short_and_long_tokens_resolve_to_same_unit() {
        for token in ["ms", "millisecond", "milliseconds"] {
            assert_eq!(token.parse::<TimeUnit>().expect("unit"), TimeUnit::Millisecond);
        }
        assert_eq!("M".parse::<TimeUnit>().expect("unit"), TimeUnit::Month);
        assert_eq!("m".parse::<TimeUnit>().expect("unit"), TimeUnit::Minute);
    }

    #[test]
    fn unknown_unit_token_is_rejected() {
        let err = "fortnight".parse::<TimeUnit>().expect_err("must fail");
        assert!(format!("{err}").contains("fortnight"));
    }

    #[test]
    fn day_tokens_split_between_day_of_month_and_day_of_week() {
        assert_eq!("D".parse::<CalendarField>().expect("field"), CalendarField::Day);
        assert_eq!("date".parse::<CalendarField>().expect("field"), CalendarField::Day);
        assert_eq!("d".parse::<CalendarField>().expect("field"), CalendarField::DayOfWeek);
        assert!("weekday".parse::<CalendarField>().is_err());
    }

    #[test]
    fn unit_order_is_coarsest_first() {
        assert!(TimeUnit::Year < TimeUnit::Month);
        assert!(TimeUnit::Second < TimeUnit::Millisecond);
    }
}
