// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Symbol helpers for point-like marks.

use kurbo::{BezPath, Circle, Shape};

/// Returns a circle path centered at `(cx, cy)` with the given radius.
///
/// The flattening tolerance is fixed; renderers that care about device
/// pixel ratios can re-tessellate, but chart-scale circles are fine at 0.1.
pub fn circle_path(cx: f64, cy: f64, radius: f64) -> BezPath {
    let circle = Circle::new((cx, cy), radius);
    let tolerance = 0.1;
    circle.path_elements(tolerance).collect()
}
