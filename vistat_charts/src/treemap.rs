// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Squarified treemap layout.
//!
//! The squarify heuristic (Bruls, Huizing, van Wijk) lays out a sequence of
//! values as rectangles whose areas are proportional to the values, greedily
//! growing a row while the worst aspect ratio in the row keeps improving,
//! then slicing the row off the shorter side of the remaining free
//! rectangle. Values should be pre-sorted descending for the classic
//! near-square results; the layout itself accepts any order.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Rect;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Lays out `values` inside `rect`, one rectangle per value, areas
/// proportional to values. Non-positive values get degenerate rectangles at
/// the current layout cursor.
pub fn squarify(values: &[f64], rect: Rect) -> Vec<Rect> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }

    let total: f64 = values.iter().copied().filter(|v| *v > 0.0).sum();
    if total <= 0.0 || rect.width() <= 0.0 || rect.height() <= 0.0 {
        return vec![Rect::new(rect.x0, rect.y0, rect.x0, rect.y0); n];
    }

    let scale = rect.area() / total;
    let areas: Vec<f64> = values
        .iter()
        .map(|&v| (v.max(0.0) * scale).max(1.0e-12))
        .collect();

    let mut out = vec![Rect::ZERO; n];
    let mut free = rect;
    let mut i = 0;

    while i < n {
        let side = free.width().min(free.height()).max(1.0e-12);

        // Grow the row while the worst aspect ratio improves.
        let mut row_sum = areas[i];
        let mut row_min = areas[i];
        let mut row_max = areas[i];
        let mut worst = worst_ratio(row_sum, row_min, row_max, side);
        let mut j = i + 1;
        while j < n {
            let a = areas[j];
            let next = worst_ratio(row_sum + a, row_min.min(a), row_max.max(a), side);
            if next > worst {
                break;
            }
            row_sum += a;
            row_min = row_min.min(a);
            row_max = row_max.max(a);
            worst = next;
            j += 1;
        }

        // Slice the row off the shorter side of the free rectangle.
        if free.width() >= free.height() {
            let thickness = row_sum / free.height().max(1.0e-12);
            let mut y = free.y0;
            for k in i..j {
                let h = areas[k] / thickness.max(1.0e-12);
                out[k] = Rect::new(free.x0, y, free.x0 + thickness, y + h);
                y += h;
            }
            free = Rect::new(free.x0 + thickness, free.y0, free.x1, free.y1);
        } else {
            let thickness = row_sum / free.width().max(1.0e-12);
            let mut x = free.x0;
            for k in i..j {
                let w = areas[k] / thickness.max(1.0e-12);
                out[k] = Rect::new(x, free.y0, x + w, free.y0 + thickness);
                x += w;
            }
            free = Rect::new(free.x0, free.y0 + thickness, free.x1, free.y1);
        }

        i = j;
    }

    out
}

fn worst_ratio(sum: f64, min: f64, max: f64, side: f64) -> f64 {
    let s2 = side * side;
    let sum2 = sum * sum;
    (s2 * max / sum2).max(sum2 / (s2 * min))
}

/// Insets a rectangle on all sides, collapsing instead of inverting.
pub fn deflate(rect: Rect, amount: f64) -> Rect {
    let amount = amount.max(0.0);
    let ax = amount.min(0.5 * rect.width());
    let ay = amount.min(0.5 * rect.height());
    Rect::new(rect.x0 + ax, rect.y0 + ay, rect.x1 - ax, rect.y1 - ay)
}

/// Rounds all edges to whole pixels.
pub fn round_rect(rect: Rect) -> Rect {
    Rect::new(
        rect.x0.round(),
        rect.y0.round(),
        rect.x1.round(),
        rect.y1.round(),
    )
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn assert_close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "{a} != {b} (eps {eps})");
    }

    #[test]
    fn areas_are_proportional_to_values() {
        let values = [40.0, 30.0, 20.0, 10.0];
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let rects = squarify(&values, rect);

        let total: f64 = values.iter().sum();
        for (v, r) in values.iter().zip(&rects) {
            assert_close(r.area(), v / total * rect.area(), 1.0e-6);
        }
    }

    #[test]
    fn rects_tile_without_overlap() {
        let values = [5.0, 4.0, 3.0, 2.0, 1.0, 1.0];
        let rect = Rect::new(10.0, 20.0, 210.0, 140.0);
        let rects = squarify(&values, rect);

        let sum: f64 = rects.iter().map(Rect::area).sum();
        assert_close(sum, rect.area(), 1.0e-6);

        for (i, a) in rects.iter().enumerate() {
            assert!(a.x0 >= rect.x0 - 1e-9 && a.x1 <= rect.x1 + 1e-9, "inside x");
            assert!(a.y0 >= rect.y0 - 1e-9 && a.y1 <= rect.y1 + 1e-9, "inside y");
            for b in rects.iter().skip(i + 1) {
                let overlap_w = (a.x1.min(b.x1) - a.x0.max(b.x0)).max(0.0);
                let overlap_h = (a.y1.min(b.y1) - a.y0.max(b.y0)).max(0.0);
                assert_close(overlap_w * overlap_h, 0.0, 1.0e-6);
            }
        }
    }

    #[test]
    fn squarify_beats_striping_on_aspect_ratio() {
        // Equal values in a square: squarify should produce near-square
        // cells, far from the 9:1 slivers a naive strip layout yields.
        let values = [1.0; 9];
        let rects = squarify(&values, Rect::new(0.0, 0.0, 90.0, 90.0));
        for r in rects {
            let ratio = (r.width() / r.height()).max(r.height() / r.width());
            assert!(ratio < 3.0, "aspect ratio too thin: {ratio}");
        }
    }

    #[test]
    fn non_positive_values_collapse() {
        let values = [3.0, 0.0, 2.0];
        let rects = squarify(&values, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_close(rects[1].area(), 0.0, 1.0e-9);
        let sum: f64 = rects.iter().map(Rect::area).sum();
        assert_close(sum, 100.0, 1.0e-6);
    }

    #[test]
    fn deflate_collapses_rather_than_inverts() {
        let r = deflate(Rect::new(0.0, 0.0, 4.0, 4.0), 10.0);
        assert!(r.width() >= 0.0 && r.height() >= 0.0);
        let r = deflate(Rect::new(0.0, 0.0, 10.0, 10.0), 1.0);
        assert_eq!(r, Rect::new(1.0, 1.0, 9.0, 9.0));
    }
}
