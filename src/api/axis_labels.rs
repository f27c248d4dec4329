use crate::core::PreciseInstant;
use crate::core::time_unit::{DAY, HOUR, MICROSECOND, MILLISECOND, MINUTE, SECOND};

/// Scale bar caption for one tick of `base` nanoseconds, e.g. `"10 min"`.
pub(super) fn scale_bar_text(base: i128) -> String {
    let (unit, suffix) = if base >= DAY {
        (DAY, "day")
    } else if base >= HOUR {
        (HOUR, "hour")
    } else if base >= MINUTE {
        (MINUTE, "min")
    } else if base >= SECOND {
        (SECOND, "s")
    } else if base >= MILLISECOND {
        (MILLISECOND, "ms")
    } else if base >= MICROSECOND {
        (MICROSECOND, "us")
    } else {
        (1, "ns")
    };
    if base % unit == 0 {
        format!("{} {suffix}", base / unit)
    } else {
        format!("{:.1} {suffix}", base as f64 / unit as f64)
    }
}

/// Indicator timestamp with precision following the active tick base.
pub(super) fn indicator_text(instant: &PreciseInstant, base: i128) -> String {
    if base > SECOND {
        instant.format("YYYY-MM-DD HH:mm:ss")
    } else if base > 10 * MILLISECOND {
        instant.format("YYYY-MM-DD HH:mm:ss.SSS")
    } else {
        instant.format("YYYY-MM-DD HH:mm:ss.SSSSSS")
    }
}

pub(super) fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' | ':' => 0.34,
            '-' | '+' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

#[cfg(test)]
mod tests {
    use super::{estimate_label_text_width_px, scale_bar_text};
    use crate::core::time_unit::{DAY, MILLISECOND, MINUTE, SECOND};

    #[test]
    fn scale_bar_uses_largest_whole_unit() {
        assert_eq!(scale_bar_text(DAY), "1 day");
        assert_eq!(scale_bar_text(31 * DAY), "31 day");
        assert_eq!(scale_bar_text(10 * MINUTE), "10 min");
        assert_eq!(scale_bar_text(10 * SECOND), "10 s");
        assert_eq!(scale_bar_text(100 * MILLISECOND), "100 ms");
        assert_eq!(scale_bar_text(250), "250 ns");
    }

    #[test]
    fn width_estimate_never_drops_below_font_size() {
        assert!(estimate_label_text_width_px("", 12.0) >= 12.0);
        assert!(estimate_label_text_width_px("2024-01-01", 12.0) > 60.0);
    }
}
