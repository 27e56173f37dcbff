// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny measure/arrange layout helper for charts.
//!
//! This follows the same basic shape as WPF-style layout:
//! - **Measure**: determine desired extents (margins) for guides (axes,
//!   legends, titles).
//! - **Arrange**: place guides relative to the plot rectangle based on
//!   orientation.
//!
//! Charts here always render into a known surface, so the usual input is an
//! explicit `view_size`: the plot rectangle is whatever remains after the
//! measured guide margins are reserved. That is also what makes resize
//! re-layout work: the same spec arranged against a new view size.

use kurbo::Rect;

/// A width/height pair used by chart layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in chart coordinate units.
    pub width: f64,
    /// Height in chart coordinate units.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Legend orientation options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegendOrient {
    /// Place the legend below the chart.
    Bottom,
    /// Place the legend inside the lower-left corner of the plot.
    BottomLeft,
    /// Place the legend inside the lower-right corner of the plot.
    BottomRight,
    /// Disable automatic placement and use explicit coordinates.
    None,
}

/// Legend placement options (orientation + offset).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendPlacement {
    /// Legend orientation.
    pub orient: LegendOrient,
    /// Offset in pixels away from the data rectangle / axes (or inward for
    /// corners).
    pub offset: f64,
    /// Explicit x position, used only when `orient` is `None`.
    pub x: f64,
    /// Explicit y position, used only when `orient` is `None`.
    pub y: f64,
}

impl Default for LegendPlacement {
    fn default() -> Self {
        Self {
            orient: LegendOrient::Bottom,
            offset: 18.0,
            x: 0.0,
            y: 0.0,
        }
    }
}

/// Layout inputs for a single chart: a plot area plus optional guides.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChartLayoutSpec {
    /// Optional chart title thickness (reserved above the plot and guides).
    pub title_top: Option<f64>,
    /// Explicit view size (outer chart bounds).
    ///
    /// `ChartLayout::arrange` computes the largest plot size that fits
    /// within the given view size after accounting for guides and
    /// `outer_padding`.
    pub view_size: Size,
    /// Extra padding around the whole chart (applied on all sides).
    pub outer_padding: f64,
    /// Whether to include a left axis, and its desired margin thickness.
    pub axis_left: Option<f64>,
    /// Whether to include a bottom axis, and its desired margin thickness.
    pub axis_bottom: Option<f64>,
    /// An optional legend, given by its desired size and placement.
    pub legend: Option<(Size, LegendPlacement)>,
}

/// Output of the arrange pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Outer chart bounds.
    pub view: Rect,
    /// Reserved rectangle for the chart title (if any).
    pub title_top: Option<Rect>,
    /// The plot rectangle (the data rectangle marks are drawn into).
    pub plot: Rect,
    /// Reserved rectangle for the left axis (if any).
    pub axis_left: Option<Rect>,
    /// Reserved rectangle for the bottom axis (if any).
    pub axis_bottom: Option<Rect>,
    /// Legend placement rectangle (if any).
    pub legend: Option<Rect>,
}

impl ChartLayout {
    /// Computes a layout from the provided specification.
    pub fn arrange(spec: &ChartLayoutSpec) -> Self {
        let outer_padding = spec.outer_padding.max(0.0);
        let title_top_h = spec.title_top.unwrap_or(0.0).max(0.0);
        let axis_left_w = spec.axis_left.unwrap_or(0.0).max(0.0);
        let axis_bottom_h = spec.axis_bottom.unwrap_or(0.0).max(0.0);

        let margin_left = outer_padding + axis_left_w;
        let margin_right = outer_padding;
        let margin_top = outer_padding + title_top_h;
        let mut margin_bottom = outer_padding + axis_bottom_h;

        if let Some((legend_size, placement)) = spec.legend
            && placement.orient == LegendOrient::Bottom
        {
            margin_bottom += legend_size.height.max(0.0) + placement.offset.max(0.0);
        }

        let view = Rect::new(
            0.0,
            0.0,
            spec.view_size.width.max(0.0),
            spec.view_size.height.max(0.0),
        );
        let plot_w = (view.width() - margin_left - margin_right).max(0.0);
        let plot_h = (view.height() - margin_top - margin_bottom).max(0.0);

        let plot = Rect::new(
            margin_left,
            margin_top,
            margin_left + plot_w,
            margin_top + plot_h,
        );

        let axis_left = (axis_left_w > 0.0)
            .then(|| Rect::new(plot.x0 - axis_left_w, plot.y0, plot.x0, plot.y1));

        let axis_bottom = (axis_bottom_h > 0.0)
            .then(|| Rect::new(plot.x0, plot.y1, plot.x1, plot.y1 + axis_bottom_h));

        let legend = spec
            .legend
            .map(|(size, placement)| legend_rect(view, plot, axis_bottom_h, size, placement));

        let title_top = (title_top_h > 0.0).then(|| {
            Rect::new(
                0.0,
                outer_padding,
                view.x1,
                outer_padding + title_top_h,
            )
        });

        Self {
            view,
            title_top,
            plot,
            axis_left,
            axis_bottom,
            legend,
        }
    }
}

fn legend_rect(
    view: Rect,
    plot: Rect,
    axis_bottom_h: f64,
    size: Size,
    placement: LegendPlacement,
) -> Rect {
    let w = size.width.max(0.0);
    let h = size.height.max(0.0);
    let offset = placement.offset.max(0.0);

    match placement.orient {
        LegendOrient::Bottom => {
            let y0 = plot.y1 + axis_bottom_h + offset;
            Rect::new(plot.x0, y0, plot.x0 + w, y0 + h)
        }
        LegendOrient::BottomLeft => Rect::new(
            view.x0 + offset,
            view.y1 - offset - h,
            view.x0 + offset + w,
            view.y1 - offset,
        ),
        LegendOrient::BottomRight => Rect::new(
            view.x1 - offset - w,
            view.y1 - offset - h,
            view.x1 - offset,
            view.y1 - offset,
        ),
        LegendOrient::None => Rect::new(placement.x, placement.y, placement.x + w, placement.y + h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_and_axes_reserve_margins_inside_the_view() {
        let spec = ChartLayoutSpec {
            title_top: Some(20.0),
            view_size: Size::new(400.0, 300.0),
            outer_padding: 10.0,
            axis_left: Some(30.0),
            axis_bottom: Some(18.0),
            legend: None,
        };

        let layout = ChartLayout::arrange(&spec);
        let title = layout.title_top.expect("missing title rect");
        assert!((title.y0 - 10.0).abs() < 1e-9);
        assert!((title.y1 - 30.0).abs() < 1e-9);

        // plot.y0 = padding + title, plot.x0 = padding + axis_left
        assert!((layout.plot.y0 - 30.0).abs() < 1e-9);
        assert!((layout.plot.x0 - 40.0).abs() < 1e-9);
        assert!((layout.plot.x1 - 390.0).abs() < 1e-9);
        assert!((layout.plot.y1 - (300.0 - 10.0 - 18.0)).abs() < 1e-9);
    }

    #[test]
    fn bottom_legend_shrinks_the_plot() {
        let base = ChartLayoutSpec {
            view_size: Size::new(400.0, 300.0),
            axis_bottom: Some(20.0),
            ..ChartLayoutSpec::default()
        };
        let with_legend = ChartLayoutSpec {
            legend: Some((
                Size::new(120.0, 30.0),
                LegendPlacement {
                    orient: LegendOrient::Bottom,
                    offset: 8.0,
                    x: 0.0,
                    y: 0.0,
                },
            )),
            ..base
        };

        let a = ChartLayout::arrange(&base);
        let b = ChartLayout::arrange(&with_legend);
        assert!((a.plot.y1 - b.plot.y1 - 38.0).abs() < 1e-9);

        let legend = b.legend.expect("missing legend rect");
        assert!(legend.y0 >= b.plot.y1 + 20.0);
    }

    #[test]
    fn corner_legends_overlay_instead_of_reserving() {
        let spec = ChartLayoutSpec {
            view_size: Size::new(400.0, 300.0),
            legend: Some((
                Size::new(100.0, 12.0),
                LegendPlacement {
                    orient: LegendOrient::BottomRight,
                    offset: 20.0,
                    x: 0.0,
                    y: 0.0,
                },
            )),
            ..ChartLayoutSpec::default()
        };
        let layout = ChartLayout::arrange(&spec);
        // The plot keeps the full height; the legend floats inside the view.
        assert!((layout.plot.y1 - 300.0).abs() < 1e-9);
        let legend = layout.legend.expect("missing legend rect");
        assert!((legend.x1 - 380.0).abs() < 1e-9);
        assert!((legend.y1 - 280.0).abs() < 1e-9);
    }
}
