// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! An axis is a single spec with an `orient`; it can be measured (for
//! layout) and arranged (to generate marks). The dashboards here only place
//! axes below and to the left of the plot, so those are the two
//! orientations modeled.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::{BezPath, Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;
use vistat_core::{Mark, MarkId, MarkPayload, PathPayload, StrokePaint, TextAnchor, TextBaseline};

use crate::format::{format_tick_with_step, truncate_label};
use crate::scale::{ScaleBand, ScaleBandSpec, ScaleLinear, ScaleLinearSpec};
use crate::text_mark::TextMarkSpec;
use crate::{TextMeasurer, TextStyle, z_order};

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the axis domain line and tick marks.
    pub rule: StrokePaint,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
    /// Fill paint for the axis title.
    pub title_fill: Brush,
    /// Font size for the axis title.
    pub title_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokePaint::solid(css::BLACK, 1.0);
        Self {
            rule: rule.clone(),
            label_fill: rule.brush.clone(),
            label_font_size: 12.0,
            title_fill: rule.brush,
            title_font_size: 12.0,
        }
    }
}

/// Gridline styling.
#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
    /// Stroke style for gridlines.
    pub stroke: StrokePaint,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            stroke: StrokePaint {
                brush: Brush::Solid(css::BLACK.with_alpha(40.0 / 255.0)),
                width: 1.0,
            },
        }
    }
}

/// Axis placement relative to the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis placed below the plot area.
    Bottom,
    /// A vertical axis placed to the left of the plot area.
    Left,
}

/// The scale an axis is generated from.
#[derive(Clone, Debug)]
pub enum AxisScale {
    /// A continuous linear scale.
    Linear(ScaleLinearSpec),
    /// A discrete band scale with one label per band.
    Band {
        /// Band geometry (count + padding).
        spec: ScaleBandSpec,
        /// Category labels, one per band, in band order.
        labels: Vec<String>,
    },
}

impl From<ScaleLinearSpec> for AxisScale {
    fn from(value: ScaleLinearSpec) -> Self {
        Self::Linear(value)
    }
}

/// An axis specification (scale + orient + styling).
#[derive(Clone)]
pub struct AxisSpec {
    /// Stable-id base; each generated mark uses a deterministic offset from
    /// this base.
    pub id_base: u64,
    /// The axis scale.
    pub scale: AxisScale,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks (linear scales only).
    pub tick_count: usize,
    /// Tick line length (in pixels). `0` hides tick lines but keeps labels.
    pub tick_size: f64,
    /// Whether to draw the axis domain line.
    pub show_domain: bool,
    /// Padding between the tick end and the tick label.
    pub tick_padding: f64,
    /// Axis styling.
    pub style: AxisStyle,
    /// Optional gridline styling; gridline marks span the plot area.
    pub grid: Option<GridStyle>,
    /// Optional axis title text.
    pub title: Option<String>,
    /// Distance from tick labels to the title.
    pub title_offset: f64,
    /// Optional tick label formatter for linear scales `(value, step)`.
    pub tick_formatter: Option<Arc<dyn Fn(f64, f64) -> String>>,
    /// Tick label rotation angle in degrees.
    pub label_angle: f64,
    /// Character budget for band labels; longer labels render truncated
    /// with an ellipsis (display only).
    pub label_max_chars: Option<usize>,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("id_base", &self.id_base)
            .field("scale", &self.scale)
            .field("orient", &self.orient)
            .field("tick_count", &self.tick_count)
            .field("tick_size", &self.tick_size)
            .field("show_domain", &self.show_domain)
            .field("tick_padding", &self.tick_padding)
            .field("style", &self.style)
            .field("grid", &self.grid)
            .field("title", &self.title)
            .field("title_offset", &self.title_offset)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .field("label_angle", &self.label_angle)
            .field("label_max_chars", &self.label_max_chars)
            .finish()
    }
}

impl AxisSpec {
    /// Creates a new axis specification with sensible defaults.
    pub fn new(id_base: u64, scale: impl Into<AxisScale>, orient: AxisOrient) -> Self {
        let tick_padding = match orient {
            AxisOrient::Bottom => 8.0,
            AxisOrient::Left => 6.0,
        };
        Self {
            id_base,
            scale: scale.into(),
            orient,
            tick_count: 10,
            tick_size: 5.0,
            show_domain: true,
            tick_padding,
            style: AxisStyle::default(),
            grid: None,
            title: None,
            title_offset: 10.0,
            tick_formatter: None,
            label_angle: 0.0,
            label_max_chars: None,
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom(id_base: u64, scale: impl Into<AxisScale>) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left(id_base: u64, scale: impl Into<AxisScale>) -> Self {
        Self::new(id_base, scale, AxisOrient::Left)
    }

    /// Convenience constructor for a band axis from owned labels.
    pub fn band(id_base: u64, orient: AxisOrient, spec: ScaleBandSpec, labels: Vec<String>) -> Self {
        Self::new(id_base, AxisScale::Band { spec, labels }, orient)
    }

    /// Set the approximate tick count (linear scales).
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Set tick size in scene coordinates; `0` hides tick lines.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Enable or disable the axis domain line.
    pub fn with_domain(mut self, domain: bool) -> Self {
        self.show_domain = domain;
        self
    }

    /// Set tick padding in scene coordinates.
    pub fn with_tick_padding(mut self, tick_padding: f64) -> Self {
        self.tick_padding = tick_padding;
        self
    }

    /// Set a custom tick label formatter (linear scales).
    pub fn with_tick_formatter(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Set tick label rotation angle in degrees.
    pub fn with_label_angle(mut self, angle_degrees: f64) -> Self {
        self.label_angle = angle_degrees;
        self
    }

    /// Set the band label character budget.
    pub fn with_label_max_chars(mut self, max_chars: usize) -> Self {
        self.label_max_chars = Some(max_chars);
        self
    }

    /// Set the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Enable gridlines using the provided style.
    pub fn with_grid(mut self, grid: GridStyle) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Set the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Returns a linear scale mapping axis values into plot coordinates.
    ///
    /// Panics if this axis uses a band scale.
    pub fn scale_linear(&self, plot: Rect) -> ScaleLinear {
        let range = match self.orient {
            AxisOrient::Bottom => (plot.x0, plot.x1),
            AxisOrient::Left => (plot.y1, plot.y0),
        };
        match &self.scale {
            AxisScale::Linear(s) => s.instantiate_resolved(range, self.tick_count),
            AxisScale::Band { .. } => panic!("scale_linear called on a band axis"),
        }
    }

    /// Returns a band scale mapping indices into plot coordinates.
    ///
    /// Panics if this axis uses a linear scale.
    pub fn scale_band(&self, plot: Rect) -> ScaleBand {
        let range = match self.orient {
            AxisOrient::Bottom => (plot.x0, plot.x1),
            AxisOrient::Left => (plot.y0, plot.y1),
        };
        match &self.scale {
            AxisScale::Band { spec, .. } => spec.instantiate(range),
            AxisScale::Linear(_) => panic!("scale_band called on a linear axis"),
        }
    }

    /// Tick label strings in tick order, with the numeric step for linear
    /// scales.
    fn tick_labels(&self) -> (Vec<String>, f64) {
        match &self.scale {
            AxisScale::Linear(s) => {
                let domain = s.resolved_domain(self.tick_count);
                let tmp = ScaleLinear::new(domain, (0.0, 1.0));
                let ticks = tmp.ticks(self.tick_count);
                let step = tick_step(&ticks);
                let labels = ticks
                    .iter()
                    .map(|&v| match &self.tick_formatter {
                        Some(f) => (f)(v, step),
                        None => format_tick_with_step(v, step),
                    })
                    .collect();
                (labels, step)
            }
            AxisScale::Band { labels, .. } => {
                let shown = labels
                    .iter()
                    .map(|l| match self.label_max_chars {
                        Some(max) => truncate_label(l, max),
                        None => l.clone(),
                    })
                    .collect();
                (shown, 1.0)
            }
        }
    }

    /// Measure the thickness this axis needs along its normal direction.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> f64 {
        let tick_extent = self.tick_size.abs();
        let label_gap = self.tick_padding.max(0.0);
        let (labels, _step) = self.tick_labels();

        let theta = self.label_angle.to_radians();
        let sin = theta.sin().abs();
        let cos = theta.cos().abs();

        let mut max_label_extent = 0.0_f64;
        for label in &labels {
            let metrics = measurer.measure(label, TextStyle::new(self.style.label_font_size));
            let w = metrics.advance_width;
            let h = metrics.line_height();
            let extent = match self.orient {
                // Rotated width projects into the axis normal (height).
                AxisOrient::Bottom => sin * w + cos * h,
                AxisOrient::Left => cos * w + sin * h,
            };
            max_label_extent = max_label_extent.max(extent);
        }

        let mut out = tick_extent + label_gap + max_label_extent;
        if let Some(title) = &self.title {
            let metrics = measurer.measure(title, TextStyle::new(self.style.title_font_size));
            out += self.title_offset.max(0.0)
                + match self.orient {
                    AxisOrient::Bottom => metrics.line_height(),
                    // A rotated title's height maps to width.
                    AxisOrient::Left => self.style.title_font_size,
                };
        }
        out
    }

    /// Generate axis marks for the given plot rectangle and arranged axis
    /// rectangle (`axis_rect` is the reserved region adjacent to `plot`).
    pub fn marks(&self, plot: Rect, axis_rect: Rect) -> Vec<Mark> {
        match self.orient {
            AxisOrient::Bottom => self.marks_bottom(plot, axis_rect),
            AxisOrient::Left => self.marks_left(plot, axis_rect),
        }
    }

    /// Tick center positions along the axis direction, paired with labels.
    fn tick_positions(&self, plot: Rect) -> Vec<(f64, String)> {
        let (labels, _step) = self.tick_labels();
        match &self.scale {
            AxisScale::Linear(s) => {
                let scale = self.scale_linear(plot);
                let domain = s.resolved_domain(self.tick_count);
                let tmp = ScaleLinear::new(domain, (0.0, 1.0));
                tmp.ticks(self.tick_count)
                    .into_iter()
                    .zip(labels)
                    .map(|(v, label)| (scale.map(v), label))
                    .collect()
            }
            AxisScale::Band { .. } => {
                let band = self.scale_band(plot);
                let bw = band.band_width();
                labels
                    .into_iter()
                    .enumerate()
                    .map(|(i, label)| (band.x(i) + 0.5 * bw, label))
                    .collect()
            }
        }
    }

    fn marks_bottom(&self, plot: Rect, axis_rect: Rect) -> Vec<Mark> {
        let y = plot.y1;
        let tick_size = self.tick_size.abs();
        let label_gap = self.tick_padding.max(0.0);
        let ticks = self.tick_positions(plot);

        let mut out = Vec::new();

        if let Some(grid) = &self.grid {
            for (i, (x, _)) in ticks.iter().enumerate() {
                if *x < plot.x0 - 1.0e-9 || *x > plot.x1 + 1.0e-9 {
                    continue;
                }
                out.push(stroke_mark(
                    MarkId::from_raw(self.id_base + 500 + i as u64),
                    line(Point::new(*x, plot.y0), Point::new(*x, plot.y1)),
                    &grid.stroke,
                    z_order::GRID_LINES,
                ));
            }
        }

        if self.show_domain {
            out.push(stroke_mark(
                MarkId::from_raw(self.id_base),
                line(Point::new(plot.x0, y), Point::new(plot.x1, y)),
                &self.style.rule,
                z_order::AXIS_RULES,
            ));
        }

        let ticks_len = ticks.len();
        for (i, (x, label)) in ticks.iter().enumerate() {
            let x = *x;
            if x < plot.x0 - 1.0e-9 || x > plot.x1 + 1.0e-9 {
                continue;
            }

            if tick_size > 0.0 {
                out.push(stroke_mark(
                    MarkId::from_raw(self.id_base + 100 + i as u64),
                    line(Point::new(x, y), Point::new(x, y + tick_size)),
                    &self.style.rule,
                    z_order::AXIS_RULES,
                ));
            }

            let (anchor, x) = if i == 0 && ticks_len > 1 {
                (TextAnchor::Start, x.clamp(plot.x0, plot.x1))
            } else if i + 1 == ticks_len && ticks_len > 1 {
                (TextAnchor::End, x.clamp(plot.x0, plot.x1))
            } else {
                (TextAnchor::Middle, x)
            };

            // Rotating around the label anchor shifts the visual midline for
            // non-middle anchors (the x-offset rotates into y); compensate
            // with an estimated width so first/last labels stay aligned.
            let y_label = {
                let mut y_label = y + tick_size + label_gap;
                if self.label_angle != 0.0 {
                    let sin = self.label_angle.to_radians().sin();
                    if sin != 0.0 {
                        let w = estimate_text_width(label, self.style.label_font_size);
                        let dy = 0.5 * w * sin;
                        match anchor {
                            TextAnchor::Start => y_label -= dy,
                            TextAnchor::End => y_label += dy,
                            TextAnchor::Middle => {}
                        }
                    }
                }
                y_label
            };

            out.push(
                TextMarkSpec::new(
                    MarkId::from_raw(self.id_base + 1000 + i as u64),
                    Point::new(x, y_label),
                    label.clone(),
                )
                .with_font_size(self.style.label_font_size)
                .with_fill(self.style.label_fill.clone())
                .with_anchor(anchor)
                .with_baseline(TextBaseline::Hanging)
                .with_angle(self.label_angle)
                .with_z_index(z_order::AXIS_LABELS)
                .mark(),
            );
        }

        if let Some(title) = &self.title {
            let x = (plot.x0 + plot.x1) * 0.5;
            // Place the title in the strip at the outer edge of `axis_rect`.
            let y = axis_rect.y1 - self.style.title_font_size;
            out.push(
                TextMarkSpec::new(MarkId::from_raw(self.id_base + 9000), Point::new(x, y), title)
                    .with_font_size(self.style.title_font_size)
                    .with_fill(self.style.title_fill.clone())
                    .with_anchor(TextAnchor::Middle)
                    .with_baseline(TextBaseline::Hanging)
                    .with_z_index(z_order::AXIS_TITLES)
                    .mark(),
            );
        }

        out
    }

    fn marks_left(&self, plot: Rect, axis_rect: Rect) -> Vec<Mark> {
        let x = plot.x0;
        let tick_size = self.tick_size.abs();
        let label_gap = self.tick_padding.max(0.0);
        let ticks = self.tick_positions(plot);

        let mut out = Vec::new();

        if let Some(grid) = &self.grid {
            for (i, (y, _)) in ticks.iter().enumerate() {
                if *y < plot.y0 - 1.0e-9 || *y > plot.y1 + 1.0e-9 {
                    continue;
                }
                out.push(stroke_mark(
                    MarkId::from_raw(self.id_base + 500 + i as u64),
                    line(Point::new(plot.x0, *y), Point::new(plot.x1, *y)),
                    &grid.stroke,
                    z_order::GRID_LINES,
                ));
            }
        }

        if self.show_domain {
            out.push(stroke_mark(
                MarkId::from_raw(self.id_base),
                line(Point::new(x, plot.y0), Point::new(x, plot.y1)),
                &self.style.rule,
                z_order::AXIS_RULES,
            ));
        }

        for (i, (y, label)) in ticks.iter().enumerate() {
            let y = *y;
            if y < plot.y0 - 1.0e-9 || y > plot.y1 + 1.0e-9 {
                continue;
            }

            if tick_size > 0.0 {
                out.push(stroke_mark(
                    MarkId::from_raw(self.id_base + 100 + i as u64),
                    line(Point::new(x, y), Point::new(x - tick_size, y)),
                    &self.style.rule,
                    z_order::AXIS_RULES,
                ));
            }

            out.push(
                TextMarkSpec::new(
                    MarkId::from_raw(self.id_base + 1000 + i as u64),
                    Point::new(x - tick_size - label_gap, y),
                    label.clone(),
                )
                .with_font_size(self.style.label_font_size)
                .with_fill(self.style.label_fill.clone())
                .with_anchor(TextAnchor::End)
                .with_baseline(TextBaseline::Middle)
                .with_z_index(z_order::AXIS_LABELS)
                .mark(),
            );
        }

        if let Some(title) = &self.title {
            let y = (plot.y0 + plot.y1) * 0.5;
            let x = axis_rect.x0 + self.style.title_font_size;
            out.push(
                TextMarkSpec::new(MarkId::from_raw(self.id_base + 9000), Point::new(x, y), title)
                    .with_font_size(self.style.title_font_size)
                    .with_fill(self.style.title_fill.clone())
                    .with_anchor(TextAnchor::Middle)
                    .with_baseline(TextBaseline::Middle)
                    .with_angle(-90.0)
                    .with_z_index(z_order::AXIS_TITLES)
                    .mark(),
            );
        }

        out
    }
}

fn line(a: Point, b: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(a);
    path.line_to(b);
    path
}

fn stroke_mark(id: MarkId, path: BezPath, stroke: &StrokePaint, z_index: i32) -> Mark {
    Mark::new(
        id,
        MarkPayload::Path(PathPayload {
            path,
            fill: Brush::Solid(peniko::Color::TRANSPARENT),
            stroke: Some(stroke.clone()),
        }),
    )
    .with_z_index(z_index)
}

fn tick_step(ticks: &[f64]) -> f64 {
    if ticks.len() >= 2 {
        (ticks[1] - ticks[0]).abs()
    } else {
        0.0
    }
}

fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    0.6 * font_size * text.chars().count() as f64
}
