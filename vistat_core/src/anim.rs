// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entry-animation metadata.
//!
//! Marks describe *what* their entry looks like (effect, delay, duration);
//! the renderer owns the clock and interpolates at paint time. Delays give
//! per-element stagger; progress is eased with the symmetric cubic used by
//! the usual web transition defaults.

use kurbo::Point;

/// The geometric/opacity effect applied while a mark enters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnterEffect {
    /// Grow vertically from a baseline (bars): y-scale 0 → 1 about
    /// `baseline`.
    GrowUp {
        /// Baseline y in scene coordinates.
        baseline: f64,
    },
    /// Scale uniformly about a center while fading in (scatter points).
    ScaleAbout {
        /// Scale origin in scene coordinates.
        center: Point,
    },
    /// Fade from transparent to the mark's own paint.
    FadeIn,
}

/// Entry animation: when it starts, how long it runs, what it does.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnterSpec {
    /// Delay before the animation starts, in milliseconds.
    pub delay_ms: f64,
    /// Animation duration in milliseconds.
    pub duration_ms: f64,
    /// The effect to interpolate.
    pub effect: EnterEffect,
}

impl EnterSpec {
    /// Creates an entry animation.
    pub fn new(effect: EnterEffect, duration_ms: f64, delay_ms: f64) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
            duration_ms: duration_ms.max(0.0),
            effect,
        }
    }

    /// Eased progress in `[0, 1]` at `elapsed_ms` since the render started.
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let t = (elapsed_ms - self.delay_ms) / self.duration_ms;
        ease_cubic_in_out(t.clamp(0.0, 1.0))
    }

    /// Whether the animation has run to completion at `elapsed_ms`.
    pub fn is_done(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.delay_ms + self.duration_ms
    }
}

/// Symmetric cubic easing: slow start, slow end.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = 2.0 * t - 2.0;
        0.5 * u * u * u + 1.0
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn easing_is_monotonic_with_fixed_endpoints() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        let mut prev = 0.0;
        for i in 1..=20 {
            let v = ease_cubic_in_out(i as f64 / 20.0);
            assert!(v >= prev, "easing must not decrease");
            prev = v;
        }
    }

    #[test]
    fn delay_holds_progress_at_zero() {
        let spec = EnterSpec::new(EnterEffect::FadeIn, 600.0, 150.0);
        assert_eq!(spec.progress(0.0), 0.0);
        assert_eq!(spec.progress(150.0), 0.0);
        assert!(spec.progress(450.0) > 0.0);
        assert!(spec.is_done(750.0));
        assert!(!spec.is_done(749.0));
    }
}
