// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label formatting helpers shared by axes, legends, and tooltips.

extern crate alloc;

use alloc::string::{String, ToString};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats a tick value with a precision appropriate to the tick step.
///
/// Integer-stepped axes print integers; fractional steps print just enough
/// decimals to distinguish adjacent ticks (capped at 6).
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return "–".to_string();
    }
    let decimals = step_decimals(step);
    if decimals == 0 {
        let rounded = v.round();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "axis ticks are far inside the i64 range"
        )]
        let n = rounded as i64;
        format_grouped(n)
    } else {
        alloc::format!("{v:.decimals$}")
    }
}

fn step_decimals(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    let mut decimals = 0;
    let mut s = step;
    while decimals < 6 && (s - s.round()).abs() > 1.0e-9 {
        s *= 10.0;
        decimals += 1;
    }
    decimals
}

/// Formats an integral count with thousands separators (`12,345,678`).
pub fn format_count(v: f64) -> String {
    if !v.is_finite() {
        return "–".to_string();
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "dataset counts are far inside the i64 range"
    )]
    let n = v.round() as i64;
    format_grouped(n)
}

fn format_grouped(n: i64) -> String {
    let negative = n < 0;
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Truncates a categorical label to `max_chars` with an ellipsis.
///
/// Axis display only; the underlying data is unaffected.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() > max_chars {
        let mut out: String = label.chars().take(max_chars).collect();
        out.push('…');
        out
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn integer_steps_group_thousands() {
        assert_eq!(format_tick_with_step(12_000_000.0, 2_000_000.0), "12,000,000");
        assert_eq!(format_tick_with_step(0.0, 5.0), "0");
    }

    #[test]
    fn fractional_steps_keep_decimals() {
        assert_eq!(format_tick_with_step(0.5, 0.25), "0.50");
        assert_eq!(format_tick_with_step(1.2, 0.1), "1.2");
    }

    #[test]
    fn counts_group_and_round() {
        assert_eq!(format_count(37_435_191.0), "37,435,191");
        assert_eq!(format_count(999.6), "1,000");
        assert_eq!(format_count(-1234.0), "-1,234");
    }

    #[test]
    fn long_labels_truncate_with_ellipsis() {
        assert_eq!(truncate_label("Guadalajara", 10), "Guadalajar…");
        assert_eq!(truncate_label("Delhi", 10), "Delhi");
        // Exactly at the budget: unchanged.
        assert_eq!(truncate_label("HoChiMinhC", 10), "HoChiMinhC");
    }
}
