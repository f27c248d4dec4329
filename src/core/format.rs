//! Token-substitution formatter for [`PreciseInstant`].
//!
//! | token | output |
//! |-------|--------|
//! | `YYYY` `YY` `Y` | year, trailing digits |
//! | `M` `MM` | month number, `MMM`/`MMMM` short/long month name |
//! | `D` `DD` | day of month |
//! | `d` | ISO weekday number, `dd`/`ddd`/`dddd` narrow/short/long weekday |
//! | `H` `HH` / `h` `hh` | 24h / 12h hour |
//! | `a` `A` | `am`/`pm`, `AM`/`PM` |
//! | `m` `mm`, `s` `ss` | minute, second |
//! | `S` … `SSSSSSSSS` | leading digits of the nine-digit second fraction |
//! | `Z` `ZZ` | offset as `+08:00` / `+0800` |
//! | `[text]` | literal `text` |
//!
//! Runs longer than a token's maximum width are split, so `YYYYYY` renders
//! as `YYYY` followed by `YY`.

use chrono::{Datelike, Locale, Timelike};

use crate::core::precise_instant::PreciseInstant;

const SUBSECOND_DIGITS: usize = 9;

fn max_run(token: char) -> Option<usize> {
    match token {
        'Y' | 'M' | 'd' => Some(4),
        'D' | 'H' | 'h' | 'm' | 's' | 'Z' => Some(2),
        'a' | 'A' => Some(1),
        'S' => Some(SUBSECOND_DIGITS),
        _ => None,
    }
}

/// Renders `template` against the local wall-clock fields of `instant`.
#[must_use]
pub fn format_instant(instant: &PreciseInstant, template: &str, locale: Locale) -> String {
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::with_capacity(template.len() + 8);
    let mut index = 0;

    while index < chars.len() {
        let current = chars[index];

        if current == '[' {
            if let Some(close) = chars[index + 1..].iter().position(|c| *c == ']') {
                out.extend(&chars[index + 1..index + 1 + close]);
                index += close + 2;
                continue;
            }
        }

        let Some(limit) = max_run(current) else {
            out.push(current);
            index += 1;
            continue;
        };

        let run = chars[index..]
            .iter()
            .take(limit)
            .take_while(|c| **c == current)
            .count();
        out.push_str(&render_token(instant, current, run, locale));
        index += run;
    }

    out
}

fn render_token(instant: &PreciseInstant, token: char, len: usize, locale: Locale) -> String {
    let local = instant.local_datetime();
    let naive = local.naive_local();
    match token {
        'Y' => tail_pad(i64::from(naive.year()), len),
        'M' => match len {
            1 | 2 => tail_pad(i64::from(naive.month()), len),
            3 => local.format_localized("%b", locale).to_string(),
            _ => local.format_localized("%B", locale).to_string(),
        },
        'D' => tail_pad(i64::from(naive.day()), len),
        'd' => match len {
            1 => naive.weekday().number_from_monday().to_string(),
            2 => local
                .format_localized("%a", locale)
                .to_string()
                .chars()
                .next()
                .map(String::from)
                .unwrap_or_default(),
            3 => local.format_localized("%a", locale).to_string(),
            _ => local.format_localized("%A", locale).to_string(),
        },
        'H' => tail_pad(i64::from(naive.hour()), len),
        'h' => {
            let hour = naive.hour() % 12;
            tail_pad(i64::from(if hour == 0 { 12 } else { hour }), len)
        }
        'a' => (if naive.hour() < 12 { "am" } else { "pm" }).to_owned(),
        'A' => (if naive.hour() < 12 { "AM" } else { "PM" }).to_owned(),
        'm' => tail_pad(i64::from(naive.minute()), len),
        's' => tail_pad(i64::from(naive.second()), len),
        'S' => {
            let digits = format!("{:09}", naive.nanosecond() % 1_000_000_000);
            digits[..len.min(SUBSECOND_DIGITS)].to_owned()
        }
        'Z' => offset_text(local.offset().local_minus_utc(), len == 1),
        other => other.to_string(),
    }
}

/// Keeps the trailing `len` characters of `value` and left-pads with zeros.
fn tail_pad(value: i64, len: usize) -> String {
    let text = value.to_string();
    let count = text.chars().count();
    let tail: String = text.chars().skip(count.saturating_sub(len)).collect();
    format!("{tail:0>len$}")
}

fn offset_text(seconds_east: i32, with_colon: bool) -> String {
    let sign = if seconds_east < 0 { '-' } else { '+' };
    let total = seconds_east.unsigned_abs();
    let hours = total / 3_600;
    let minutes = (total % 3_600) / 60;
    if with_colon {
        format!("{sign}{hours:02}:{minutes:02}")
    } else {
        format!("{sign}{hours:02}{minutes:02}")
    }
}
