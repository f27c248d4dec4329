//! Built-in tick granularities and their density rules.
//!
//! The thresholds below are hand-tuned readability data: a denser spacing
//! allows more frequent labels without overlap. Treat them as a table, not
//! as something derived.

use serde::{Deserialize, Serialize};

use crate::core::precise_instant::PreciseInstant;
use crate::core::tick::{LabelLevel, LabelLevels, MarkClass, TickDefinition};
use crate::core::time_unit::{CalendarField, TimeUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetTick {
    Year1,
    Month1,
    Day1,
    Hour1,
    Minutes10,
    Minute1,
    Seconds10,
    Second1,
    Milliseconds100,
    Milliseconds10,
    Millisecond1,
}

impl PresetTick {
    /// Every preset, coarsest first.
    pub const ALL: [Self; 11] = [
        Self::Year1,
        Self::Month1,
        Self::Day1,
        Self::Hour1,
        Self::Minutes10,
        Self::Minute1,
        Self::Seconds10,
        Self::Second1,
        Self::Milliseconds100,
        Self::Milliseconds10,
        Self::Millisecond1,
    ];

    const fn granularity(self) -> (u32, TimeUnit) {
        match self {
            Self::Year1 => (1, TimeUnit::Year),
            Self::Month1 => (1, TimeUnit::Month),
            Self::Day1 => (1, TimeUnit::Day),
            Self::Hour1 => (1, TimeUnit::Hour),
            Self::Minutes10 => (10, TimeUnit::Minute),
            Self::Minute1 => (1, TimeUnit::Minute),
            Self::Seconds10 => (10, TimeUnit::Second),
            Self::Second1 => (1, TimeUnit::Second),
            Self::Milliseconds100 => (100, TimeUnit::Millisecond),
            Self::Milliseconds10 => (10, TimeUnit::Millisecond),
            Self::Millisecond1 => (1, TimeUnit::Millisecond),
        }
    }

    const fn templates(self) -> (&'static str, &'static str) {
        match self {
            Self::Year1 => ("YYYY", "YY"),
            Self::Month1 => ("YYYY", "MM"),
            Self::Day1 => ("YYYY-MM", "DD"),
            Self::Hour1 | Self::Minutes10 => ("YYYY-MM-DD", "HH:mm"),
            Self::Minute1 => ("YYYY-MM-DD HH", "HH:mm"),
            Self::Seconds10 => ("YYYY-MM-DD HH:mm", "HH:mm"),
            Self::Second1 => ("YYYY-MM-DD HH:mm", "ss"),
            Self::Milliseconds100 => ("YYYY-MM-DD HH:mm:ss", "ss.S"),
            Self::Milliseconds10 => ("YYYY-MM-DD HH:mm:ss", "SS"),
            Self::Millisecond1 => ("YYYY-MM-DD HH:mm:ss", "SSS"),
        }
    }
}

struct Fields {
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    millisecond: i64,
}

impl Fields {
    fn of(instant: &PreciseInstant) -> Self {
        Self {
            year: instant.get(CalendarField::Year),
            month: instant.get(CalendarField::Month),
            day: instant.get(CalendarField::Day),
            hour: instant.get(CalendarField::Hour),
            minute: instant.get(CalendarField::Minute),
            second: instant.get(CalendarField::Second),
            millisecond: instant.get(CalendarField::Millisecond),
        }
    }
}

fn tiered(large: bool, medium: bool) -> MarkClass {
    if large {
        MarkClass::Large
    } else if medium {
        MarkClass::Medium
    } else {
        MarkClass::Small
    }
}

impl TickDefinition for PresetTick {
    fn unit(&self) -> TimeUnit {
        self.granularity().1
    }

    fn increment(&self) -> u32 {
        self.granularity().0
    }

    fn mark_class(&self, instant: &PreciseInstant, _spacing: f64) -> MarkClass {
        let f = Fields::of(instant);
        match self {
            Self::Year1 => tiered(f.year % 10 == 0, f.year % 5 == 0),
            Self::Month1 => tiered(f.month == 1, f.month == 7),
            Self::Day1 => tiered(f.day == 1, f.day % 5 == 1),
            Self::Hour1 => tiered(f.hour == 0, f.hour % 4 == 0),
            Self::Minutes10 => tiered(f.hour % 6 == 0 && f.minute == 0, f.minute == 0),
            Self::Minute1 => tiered(f.minute == 0, f.minute % 10 == 0),
            Self::Seconds10 => tiered(f.second == 0 && f.minute % 5 == 0, f.second == 0),
            Self::Second1 => tiered(f.second == 0, f.second % 10 == 0),
            Self::Milliseconds100 => tiered(f.millisecond == 0, f.millisecond % 500 == 0),
            Self::Milliseconds10 => tiered(f.millisecond % 100 == 0, f.millisecond % 50 == 0),
            Self::Millisecond1 => tiered(f.millisecond % 10 == 0, f.millisecond % 5 == 0),
        }
    }

    fn label_levels(&self, instant: &PreciseInstant, spacing: f64) -> LabelLevels {
        let f = Fields::of(instant);
        let sp = spacing;
        match self {
            Self::Year1 => {
                let y = f.year;
                LabelLevels::new(
                    (sp > 10.0 && y % 10 == 0)
                        || if sp > 4.0 { y % 50 == 0 } else { y % 100 == 0 },
                    (sp > 12.0 && y % 5 == 0) || if sp > 6.0 { y % 10 == 0 } else { y % 20 == 0 },
                )
            }
            Self::Month1 => {
                let (y, m) = (f.year, f.month);
                LabelLevels::new(
                    m == 1 && (sp > 12.0 || if sp > 4.0 { y % 5 == 0 } else { y % 10 == 0 }),
                    (sp > 24.0 && m % 3 == 1)
                        || (sp > 8.0 && m % 6 == 1)
                        || if sp > 4.0 {
                            m % 12 == 1
                        } else {
                            y % 2 == 0 && m % 12 == 1
                        },
                )
            }
            Self::Day1 => {
                let d = f.day;
                let primary = if d == 1 {
                    sp > 6.0 || f.month % 3 == 0
                } else {
                    sp > 16.0 && (d == 11 || d == 21)
                };
                let secondary = (sp > 24.0 && (d == 1 || d % 5 == 1))
                    || if sp > 6.0 {
                        d == 1 || d == 11 || d == 21
                    } else {
                        d == 1
                    };
                LabelLevels::new(primary, secondary)
            }
            Self::Hour1 => {
                let (h, d) = (f.hour, f.day);
                let odd_day = d % 2 == 1 && d != 31;
                LabelLevels::new(
                    (sp > 16.0 && h % 12 == 0)
                        || (sp > 8.0 && h == 0)
                        || if sp > 4.0 {
                            h == 0 && odd_day
                        } else {
                            h == 0 && d % 4 == 1
                        },
                    (sp > 16.0 && h % 4 == 0)
                        || (sp > 8.0 && h % 12 == 0)
                        || if sp > 3.0 { h == 0 } else { h == 0 && odd_day },
                )
            }
            Self::Minutes10 => {
                let (h, m) = (f.hour, f.minute);
                LabelLevels::new(
                    m == 0
                        && ((sp > 12.0 && h % 3 == 0)
                            || (sp > 6.0 && h % 6 == 0)
                            || if sp > 4.0 { h % 12 == 0 } else { h % 24 == 0 }),
                    m == 0 && (sp > 8.0 || if sp > 4.0 { h % 3 == 0 } else { h % 6 == 0 }),
                )
            }
            Self::Minute1 => {
                let (h, m) = (f.hour, f.minute);
                LabelLevels::new(
                    (sp > 8.0 && m % 30 == 0)
                        || if sp > 4.0 { m == 0 } else { m == 0 && h % 2 == 0 },
                    if sp > 6.0 { m % 10 == 0 } else { m % 30 == 0 },
                )
            }
            Self::Seconds10 => {
                let (m, s) = (f.minute, f.second);
                LabelLevels::new(
                    s == 0
                        && ((sp > 8.0 && m % 5 == 0)
                            || if sp > 4.0 { m % 10 == 0 } else { m % 20 == 0 }),
                    s == 0 && (sp > 8.0 || m % 5 == 0),
                )
            }
            Self::Second1 => {
                let (m, s) = (f.minute, f.second);
                LabelLevels::new(
                    (sp > 16.0 && s % 10 == 0)
                        || (sp > 8.0 && s % 30 == 0)
                        || if sp > 4.0 { s == 0 } else { s == 0 && m % 2 == 0 },
                    if sp > 6.0 { s % 10 == 0 } else { s % 30 == 0 },
                )
            }
            Self::Milliseconds100 => {
                let (s, ms) = (f.second, f.millisecond);
                LabelLevels::new(
                    ms == 0 && (sp > 16.0 || if sp > 4.0 { s % 5 == 0 } else { s % 10 == 0 }),
                    (sp > 12.0 && ms % 500 == 0)
                        || if sp > 6.0 { ms == 0 } else { ms == 0 && s % 2 == 0 },
                )
            }
            Self::Milliseconds10 => {
                let ms = f.millisecond;
                LabelLevels::new(
                    (sp > 16.0 && ms % 100 == 0) || if sp > 4.0 { ms % 500 == 0 } else { ms == 0 },
                    (sp > 12.0 && ms % 50 == 0)
                        || if sp > 6.0 { ms % 100 == 0 } else { ms % 500 == 0 },
                )
            }
            Self::Millisecond1 => {
                let ms = f.millisecond;
                LabelLevels::new(
                    (sp > 16.0 && ms % 10 == 0)
                        || if sp > 4.0 { ms % 50 == 0 } else { ms % 100 == 0 },
                    sp > 60.0
                        || (sp > 12.0 && ms % 5 == 0)
                        || if sp > 6.0 { ms % 10 == 0 } else { ms % 50 == 0 },
                )
            }
        }
    }

    fn formatter(&self, instant: &PreciseInstant, level: LabelLevel) -> String {
        let (primary, secondary) = self.templates();
        match level {
            LabelLevel::Primary => instant.format(primary),
            LabelLevel::Secondary => instant.format(secondary),
        }
    }
}
