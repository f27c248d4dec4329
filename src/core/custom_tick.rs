use serde::{Deserialize, Serialize};

use crate::core::precise_instant::PreciseInstant;
use crate::core::tick::{
    LabelLevel, LabelLevels, MarkClass, TickDefinition, validate_granularity,
};
use crate::core::time_unit::{CalendarField, TimeUnit};
use crate::error::{RulerError, RulerResult};

const NICE_STEPS: [u32; 3] = [1, 2, 5];

/// Consumer-defined granularity described as data.
///
/// Mark and label placement is expressed as "every N ticks", aligned in the
/// instant's local time. Labels are thinned along a 1-2-5 sequence until two
/// consecutive labels sit at least `min_label_spacing_px` apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomTick {
    pub unit: TimeUnit,
    pub increment: u32,
    pub primary_template: String,
    pub secondary_template: String,
    pub large_every: u32,
    pub medium_every: u32,
    pub primary_every: u32,
    pub secondary_every: u32,
    pub min_label_spacing_px: f64,
}

impl CustomTick {
    #[must_use]
    pub fn new(increment: u32, unit: TimeUnit) -> Self {
        let (primary, secondary) = default_templates(unit);
        Self {
            unit,
            increment,
            primary_template: primary.to_owned(),
            secondary_template: secondary.to_owned(),
            large_every: 10,
            medium_every: 5,
            primary_every: 10,
            secondary_every: 5,
            min_label_spacing_px: 60.0,
        }
    }

    #[must_use]
    pub fn with_templates(
        mut self,
        primary: impl Into<String>,
        secondary: impl Into<String>,
    ) -> Self {
        self.primary_template = primary.into();
        self.secondary_template = secondary.into();
        self
    }

    #[must_use]
    pub fn with_marks(mut self, large_every: u32, medium_every: u32) -> Self {
        self.large_every = large_every;
        self.medium_every = medium_every;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, primary_every: u32, secondary_every: u32) -> Self {
        self.primary_every = primary_every;
        self.secondary_every = secondary_every;
        self
    }

    #[must_use]
    pub fn with_min_label_spacing(mut self, min_label_spacing_px: f64) -> Self {
        self.min_label_spacing_px = min_label_spacing_px;
        self
    }

    pub fn validate(&self) -> RulerResult<()> {
        validate_granularity(self.increment, self.unit)?;
        for (name, every) in [
            ("large_every", self.large_every),
            ("medium_every", self.medium_every),
            ("primary_every", self.primary_every),
            ("secondary_every", self.secondary_every),
        ] {
            if every == 0 {
                return Err(RulerError::InvalidData(format!(
                    "custom tick `{name}` must be > 0"
                )));
            }
        }
        if !self.min_label_spacing_px.is_finite() || self.min_label_spacing_px < 0.0 {
            return Err(RulerError::InvalidData(
                "custom tick label spacing must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Whether `instant` sits on a multiple of `every` ticks in local time.
    fn aligned(&self, instant: &PreciseInstant, every: u32) -> bool {
        let step = i128::from(self.increment) * i128::from(every);
        match self.unit {
            TimeUnit::Year => i128::from(instant.get(CalendarField::Year)).rem_euclid(step) == 0,
            TimeUnit::Month => {
                let index = instant.get(CalendarField::Year) * 12
                    + instant.get(CalendarField::Month)
                    - 1;
                i128::from(index).rem_euclid(step) == 0
            }
            unit => unit
                .wall_clock_nanos()
                .and_then(|nanos| instant.is_divisible_by(nanos * step).ok())
                .unwrap_or(false),
        }
    }

    fn label_stride(&self, every: u32, spacing: f64) -> u32 {
        every.saturating_mul(self.thinning(every, spacing))
    }

    fn thinning(&self, every: u32, spacing: f64) -> u32 {
        let pitch = f64::from(every) * spacing;
        if !pitch.is_finite() || pitch <= 0.0 {
            return 1;
        }
        let mut decade = 1u32;
        loop {
            for step in NICE_STEPS {
                let factor = step.saturating_mul(decade);
                if pitch * f64::from(factor) >= self.min_label_spacing_px || factor == u32::MAX {
                    return factor;
                }
            }
            decade = decade.saturating_mul(10);
        }
    }
}

fn default_templates(unit: TimeUnit) -> (&'static str, &'static str) {
    match unit {
        TimeUnit::Year => ("YYYY", "YY"),
        TimeUnit::Month => ("YYYY", "MM"),
        TimeUnit::Day => ("YYYY-MM", "DD"),
        TimeUnit::Hour | TimeUnit::Minute => ("YYYY-MM-DD", "HH:mm"),
        TimeUnit::Second => ("YYYY-MM-DD HH:mm", "ss"),
        TimeUnit::Millisecond => ("YYYY-MM-DD HH:mm:ss", "SSS"),
        TimeUnit::Microsecond => ("YYYY-MM-DD HH:mm:ss", "SSSSSS"),
        TimeUnit::Nanosecond => ("YYYY-MM-DD HH:mm:ss", "SSSSSSSSS"),
    }
}

impl TickDefinition for CustomTick {
    fn unit(&self) -> TimeUnit {
        self.unit
    }

    fn increment(&self) -> u32 {
        self.increment
    }

    fn validate(&self) -> RulerResult<()> {
        CustomTick::validate(self)
    }

    fn mark_class(&self, instant: &PreciseInstant, _spacing: f64) -> MarkClass {
        if self.aligned(instant, self.large_every) {
            MarkClass::Large
        } else if self.aligned(instant, self.medium_every) {
            MarkClass::Medium
        } else {
            MarkClass::Small
        }
    }

    fn label_levels(&self, instant: &PreciseInstant, spacing: f64) -> LabelLevels {
        let primary = self.label_stride(self.primary_every, spacing);
        let secondary = self.label_stride(self.secondary_every, spacing);
        LabelLevels::new(self.aligned(instant, primary), self.aligned(instant, secondary))
    }

    fn formatter(&self, instant: &PreciseInstant, level: LabelLevel) -> String {
        match level {
            LabelLevel::Primary => instant.format(&self.primary_template),
            LabelLevel::Secondary => instant.format(&self.secondary_template),
        }
    }
}
