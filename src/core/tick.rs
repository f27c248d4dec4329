use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::precise_instant::PreciseInstant;
use crate::core::time_unit::TimeUnit;
use crate::error::{RulerError, RulerResult};

/// Height class of one graduation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkClass {
    Small,
    Medium,
    Large,
}

impl MarkClass {
    /// Mark length in pixels.
    #[must_use]
    pub const fn length_px(self) -> f64 {
        match self {
            Self::Small => 12.0,
            Self::Medium => 20.0,
            Self::Large => 36.0,
        }
    }

    /// Vertical start relative to the axis baseline.
    ///
    /// Large marks poke 4px above the baseline.
    #[must_use]
    pub const fn offset_px(self) -> f64 {
        match self {
            Self::Large => -4.0,
            Self::Small | Self::Medium => 0.0,
        }
    }
}

/// Which label slot a tick label occupies.
///
/// `Primary` carries coarse context (the date) above the baseline;
/// `Secondary` carries the fine value below the marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelLevel {
    Primary,
    Secondary,
}

/// Label decisions for one tick position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelLevels {
    pub primary: bool,
    pub secondary: bool,
}

impl LabelLevels {
    #[must_use]
    pub const fn new(primary: bool, secondary: bool) -> Self {
        Self { primary, secondary }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickLabel {
    pub level: LabelLevel,
    pub text: String,
}

/// Renderer directive for one tick: where it is, how tall, and what it says.
#[derive(Debug, Clone, PartialEq)]
pub struct TickDraw {
    pub x: f64,
    pub instant: PreciseInstant,
    pub mark: MarkClass,
    pub labels: SmallVec<[TickLabel; 2]>,
}

impl TickDraw {
    #[must_use]
    pub fn label(&self, level: LabelLevel) -> Option<&str> {
        self.labels
            .iter()
            .find(|label| label.level == level)
            .map(|label| label.text.as_str())
    }
}

/// One tick granularity: `increment` × `unit`, plus its density rules.
///
/// `mark_class` and `label_levels` receive an instant that lies on one of
/// this granularity's boundaries and the current pixel distance between
/// consecutive ticks. Both are pure functions of the instant's local calendar
/// fields and the spacing.
pub trait TickDefinition: fmt::Debug + Send + Sync {
    fn unit(&self) -> TimeUnit;

    fn increment(&self) -> u32;

    fn mark_class(&self, instant: &PreciseInstant, spacing: f64) -> MarkClass;

    fn label_levels(&self, instant: &PreciseInstant, spacing: f64) -> LabelLevels;

    fn formatter(&self, instant: &PreciseInstant, level: LabelLevel) -> String;

    /// Rejects granularities the calendar stepping cannot enumerate.
    fn validate(&self) -> RulerResult<()> {
        validate_granularity(self.increment(), self.unit())
    }

    /// Human readable granularity, e.g. `"10 seconds"`.
    fn name(&self) -> String {
        let increment = self.increment();
        let unit = self.unit().singular();
        if increment == 1 {
            format!("1 {unit}")
        } else {
            format!("{increment} {unit}s")
        }
    }

    fn draw(&self, x: f64, instant: &PreciseInstant, spacing: f64) -> TickDraw {
        let levels = self.label_levels(instant, spacing);
        let mut labels = SmallVec::new();
        if levels.primary {
            labels.push(TickLabel {
                level: LabelLevel::Primary,
                text: self.formatter(instant, LabelLevel::Primary),
            });
        }
        if levels.secondary {
            labels.push(TickLabel {
                level: LabelLevel::Secondary,
                text: self.formatter(instant, LabelLevel::Secondary),
            });
        }
        TickDraw {
            x,
            instant: *instant,
            mark: self.mark_class(instant, spacing),
            labels,
        }
    }
}

/// A zero increment never advances; month increments must divide a year.
pub fn validate_granularity(increment: u32, unit: TimeUnit) -> RulerResult<()> {
    if increment == 0 {
        return Err(RulerError::InvalidDivisor(0));
    }
    if unit == TimeUnit::Month && (increment >= 12 || 12 % increment != 0) {
        return Err(RulerError::InvalidDivisor(i128::from(increment)));
    }
    Ok(())
}

/// Nominal length of `increment` × `unit`, measured from the UTC epoch.
///
/// Only used to order granularities and to relate them to pixel spacing, so
/// month and year resolve to 31 and 365 days respectively.
pub fn nominal_base(increment: u32, unit: TimeUnit) -> RulerResult<i128> {
    if increment == 0 {
        return Err(RulerError::InvalidDivisor(0));
    }
    let epoch = PreciseInstant::epoch(Default::default())?;
    let end = epoch.add(i64::from(increment), unit)?;
    Ok(end - epoch)
}

#[cfg(test)]
mod tests {
    use super::{nominal_base, validate_granularity};
    use crate::core::time_unit::{DAY, MILLISECOND, MINUTE, TimeUnit};

    #[test]
    fn calendar_bases_follow_epoch_month_and_year() {
        assert_eq!(nominal_base(1, TimeUnit::Month).expect("base"), 31 * DAY);
        assert_eq!(nominal_base(1, TimeUnit::Year).expect("base"), 365 * DAY);
    }

    #[test]
    fn exact_bases_scale_with_increment() {
        assert_eq!(nominal_base(10, TimeUnit::Minute).expect("base"), 10 * MINUTE);
        assert_eq!(nominal_base(100, TimeUnit::Millisecond).expect("base"), 100 * MILLISECOND);
    }

    #[test]
    fn zero_increment_is_rejected() {
        assert!(nominal_base(0, TimeUnit::Second).is_err());
    }

    #[test]
    fn month_increments_must_divide_a_year() {
        assert!(validate_granularity(3, TimeUnit::Month).is_ok());
        assert!(validate_granularity(5, TimeUnit::Month).is_err());
        assert!(validate_granularity(12, TimeUnit::Month).is_err());
        assert!(validate_granularity(5, TimeUnit::Year).is_ok());
        assert!(validate_granularity(0, TimeUnit::Second).is_err());
    }
}
