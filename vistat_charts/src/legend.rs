// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation.
//!
//! Two legend kinds cover the charts here:
//! - [`LegendSwatchesSpec`]: discrete color swatches with text labels
//!   (scatter density bands).
//! - [`GradientLegendSpec`]: a continuous ramp bar with low/high end labels
//!   (heatmap, choropleth).
//!
//! Both follow a measure/arrange pass: measure a desired size for layout,
//! then generate marks once the origin is known.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::color::palette::css;
use peniko::{Brush, Color};
use vistat_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::color::ColorRamp;
use crate::layout::Size;
use crate::measure::{TextMeasurer, TextStyle};
use crate::rect_mark::RectMarkSpec;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// A simple legend row item.
#[derive(Clone, Debug)]
pub struct LegendItem {
    /// The label string shown next to the swatch.
    pub label: String,
    /// The swatch fill paint.
    pub fill: Brush,
}

impl LegendItem {
    /// Convenience constructor for a solid-color swatch.
    pub fn solid(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            fill: Brush::Solid(color),
        }
    }
}

/// A positioned swatch legend: color squares with text labels laid out in
/// columns.
#[derive(Clone, Debug)]
pub struct LegendSwatches {
    /// Stable-id base; each generated mark uses a deterministic offset.
    pub id_base: u64,
    /// Legend origin (top-left).
    pub x: f64,
    /// Legend origin (top-left).
    pub y: f64,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Horizontal gap between swatch and label.
    pub label_dx: f64,
    /// Fixed column width; items flow left-to-right, then wrap.
    pub column_width: f64,
    /// Number of columns.
    pub columns: usize,
    /// Optional heading drawn above the items.
    pub heading: Option<String>,
    /// Label font size.
    pub font_size: f64,
    /// Label color.
    pub text_fill: Brush,
    /// Items in display order.
    pub items: Vec<LegendItem>,
}

impl LegendSwatches {
    /// Generate legend marks (heading + swatch rect + label text per item).
    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::new();
        let columns = self.columns.max(1);
        let row_height = self.swatch_size.max(self.font_size);

        let mut y = self.y;
        if let Some(heading) = &self.heading {
            out.push(
                TextMarkSpec::new(
                    MarkId::from_raw(self.id_base + 5000),
                    kurbo::Point::new(self.x, y + 0.5 * self.font_size),
                    heading.clone(),
                )
                .with_font_size(self.font_size)
                .with_fill(self.text_fill.clone())
                .with_baseline(TextBaseline::Middle)
                .with_z_index(z_order::LEGEND_LABELS)
                .mark(),
            );
            y += row_height + self.row_gap;
        }

        for (i, item) in self.items.iter().enumerate() {
            let col = i % columns;
            let row = i / columns;
            let x = self.x + col as f64 * self.column_width;
            let item_y = y + row as f64 * (row_height + self.row_gap);
            let swatch_y = item_y + (row_height - self.swatch_size) * 0.5;
            let label_y = item_y + row_height * 0.5;

            out.push(
                RectMarkSpec::new(
                    MarkId::from_raw(self.id_base + i as u64),
                    Rect::new(
                        x,
                        swatch_y,
                        x + self.swatch_size,
                        swatch_y + self.swatch_size,
                    ),
                )
                .with_fill(item.fill.clone())
                .with_z_index(z_order::LEGEND_SWATCHES)
                .mark(),
            );

            out.push(
                TextMarkSpec::new(
                    MarkId::from_raw(self.id_base + 1000 + i as u64),
                    kurbo::Point::new(x + self.swatch_size + self.label_dx, label_y),
                    item.label.clone(),
                )
                .with_font_size(self.font_size)
                .with_fill(self.text_fill.clone())
                .with_anchor(TextAnchor::Start)
                .with_baseline(TextBaseline::Middle)
                .with_z_index(z_order::LEGEND_LABELS)
                .mark(),
            );
        }
        out
    }
}

/// An unpositioned swatch legend specification.
#[derive(Clone, Debug)]
pub struct LegendSwatchesSpec {
    /// Stable-id base; each generated mark uses a deterministic offset.
    pub id_base: u64,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Horizontal gap between swatch and label.
    pub label_dx: f64,
    /// Fixed column width; items flow left-to-right, then wrap.
    pub column_width: f64,
    /// Number of columns.
    pub columns: usize,
    /// Optional heading drawn above the items.
    pub heading: Option<String>,
    /// Label font size.
    pub font_size: f64,
    /// Label color.
    pub text_fill: Brush,
    /// Items in display order.
    pub items: Vec<LegendItem>,
}

impl LegendSwatchesSpec {
    /// Creates a new legend specification with defaults.
    pub fn new(id_base: u64, items: Vec<LegendItem>) -> Self {
        Self {
            id_base,
            swatch_size: 12.0,
            row_gap: 6.0,
            label_dx: 6.0,
            column_width: 150.0,
            columns: 1,
            heading: None,
            font_size: 12.0,
            text_fill: css::BLACK.into(),
            items,
        }
    }

    /// Sets the number of columns (items flow left-to-right).
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// Sets the fixed column width.
    pub fn with_column_width(mut self, column_width: f64) -> Self {
        self.column_width = column_width.max(0.0);
        self
    }

    /// Sets a heading line drawn above the items.
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    /// Set the label font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Measures the desired legend size (width/height).
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> Size {
        let columns = self.columns.max(1);
        let row_height = self.swatch_size.max(self.font_size);
        let rows = self.items.len().div_ceil(columns);

        let mut width = 0.0_f64;
        if columns > 1 {
            width = columns as f64 * self.column_width;
        } else {
            for item in &self.items {
                let m = measurer.measure(&item.label, TextStyle::new(self.font_size));
                width = width.max(self.swatch_size + self.label_dx + m.advance_width);
            }
        }
        if let Some(heading) = &self.heading {
            let m = measurer.measure(heading, TextStyle::new(self.font_size));
            width = width.max(m.advance_width);
        }

        let heading_rows = usize::from(self.heading.is_some());
        let total_rows = rows + heading_rows;
        let height = total_rows as f64 * row_height
            + total_rows.saturating_sub(1) as f64 * self.row_gap;
        Size::new(width, height)
    }

    /// Creates a positioned legend at the given origin.
    pub fn at(&self, x: f64, y: f64) -> LegendSwatches {
        LegendSwatches {
            id_base: self.id_base,
            x,
            y,
            swatch_size: self.swatch_size,
            row_gap: self.row_gap,
            label_dx: self.label_dx,
            column_width: self.column_width,
            columns: self.columns,
            heading: self.heading.clone(),
            font_size: self.font_size,
            text_fill: self.text_fill.clone(),
            items: self.items.clone(),
        }
    }

    /// Generates marks for this legend for the given origin.
    pub fn marks(&self, x: f64, y: f64) -> Vec<Mark> {
        self.at(x, y).marks()
    }
}

/// A gradient ramp legend: a horizontal bar sampled from a [`ColorRamp`],
/// with "Low"/"High" style labels above its ends.
#[derive(Clone, Debug)]
pub struct GradientLegendSpec {
    /// Stable-id base; each generated mark uses a deterministic offset.
    pub id_base: u64,
    /// The ramp to sample.
    pub ramp: ColorRamp,
    /// Bar width.
    pub width: f64,
    /// Bar height.
    pub height: f64,
    /// Number of slices the bar is built from.
    pub slices: usize,
    /// Label above the low end.
    pub low_label: String,
    /// Label above the high end.
    pub high_label: String,
    /// Label font size.
    pub font_size: f64,
    /// Label color.
    pub text_fill: Brush,
}

impl GradientLegendSpec {
    /// Creates a gradient legend with the original 200×10 bar.
    pub fn new(id_base: u64, ramp: ColorRamp) -> Self {
        Self {
            id_base,
            ramp,
            width: 200.0,
            height: 10.0,
            slices: 64,
            low_label: String::from("Low"),
            high_label: String::from("High"),
            font_size: 11.0,
            text_fill: css::BLACK.into(),
        }
    }

    /// Measures the desired legend size (bar + label row).
    pub fn measure(&self, _measurer: &dyn TextMeasurer) -> Size {
        Size::new(self.width, self.height + self.font_size + 4.0)
    }

    /// Generates marks with the legend's top-left at `(x, y)`.
    pub fn marks(&self, x: f64, y: f64) -> Vec<Mark> {
        let mut out = Vec::new();
        let label_row = self.font_size + 4.0;
        let bar_y = y + label_row;

        // The ramp bar is built from flat slices, the same way the original
        // built its gradient from dense stops.
        let slices = self.slices.max(2);
        let slice_w = self.width / slices as f64;
        for i in 0..slices {
            let t = i as f64 / (slices - 1) as f64;
            let x0 = x + i as f64 * slice_w;
            out.push(
                RectMarkSpec::new(
                    MarkId::from_raw(self.id_base + i as u64),
                    Rect::new(x0, bar_y, x0 + slice_w + 0.5, bar_y + self.height),
                )
                .with_fill(self.ramp.sample(t))
                .with_z_index(z_order::LEGEND_SWATCHES)
                .mark(),
            );
        }

        out.push(
            TextMarkSpec::new(
                MarkId::from_raw(self.id_base + 1000),
                kurbo::Point::new(x, y + 0.5 * self.font_size),
                self.low_label.clone(),
            )
            .with_font_size(self.font_size)
            .with_fill(self.text_fill.clone())
            .with_anchor(TextAnchor::Start)
            .with_baseline(TextBaseline::Middle)
            .with_z_index(z_order::LEGEND_LABELS)
            .mark(),
        );
        out.push(
            TextMarkSpec::new(
                MarkId::from_raw(self.id_base + 1001),
                kurbo::Point::new(x + self.width, y + 0.5 * self.font_size),
                self.high_label.clone(),
            )
            .with_font_size(self.font_size)
            .with_fill(self.text_fill.clone())
            .with_anchor(TextAnchor::End)
            .with_baseline(TextBaseline::Middle)
            .with_z_index(z_order::LEGEND_LABELS)
            .mark(),
        );

        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use vistat_core::MarkPayload;

    use super::*;
    use crate::HeuristicTextMeasurer;
    use crate::color::BLUES;

    #[test]
    fn swatch_legend_emits_swatch_and_label_per_item() {
        let items = vec![
            LegendItem::solid("0–50: Very Low", css::BLUE),
            LegendItem::solid(">2000: Very High", css::RED),
        ];
        let spec = LegendSwatchesSpec::new(1, items).with_heading("Density Groups:");
        let marks = spec.marks(0.0, 0.0);
        let rects = marks
            .iter()
            .filter(|m| matches!(m.payload, MarkPayload::Rect(_)))
            .count();
        let texts = marks
            .iter()
            .filter(|m| matches!(m.payload, MarkPayload::Text(_)))
            .count();
        assert_eq!(rects, 2);
        assert_eq!(texts, 3, "two labels plus the heading");
    }

    #[test]
    fn multi_column_rows_wrap_left_to_right() {
        let items = vec![
            LegendItem::solid("a", css::BLUE),
            LegendItem::solid("b", css::RED),
            LegendItem::solid("c", css::GREEN),
        ];
        let spec = LegendSwatchesSpec::new(1, items)
            .with_columns(2)
            .with_column_width(80.0);
        let size = spec.measure(&HeuristicTextMeasurer);
        assert_eq!(size.width, 160.0);

        let marks = spec.marks(0.0, 0.0);
        // Third swatch wraps to the second row, first column.
        let third = marks
            .iter()
            .find(|m| m.id == MarkId::from_raw(1 + 2))
            .expect("third swatch");
        let bounds = third.payload.bounds().expect("swatch bounds");
        assert_eq!(bounds.x0, 0.0);
        assert!(bounds.y0 > 0.0);
    }

    #[test]
    fn gradient_legend_spans_its_width_and_labels_both_ends() {
        let spec = GradientLegendSpec::new(1, BLUES);
        let marks = spec.marks(10.0, 5.0);

        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        for m in &marks {
            if let MarkPayload::Rect(r) = &m.payload {
                min_x = min_x.min(r.rect.x0);
                max_x = max_x.max(r.rect.x1);
            }
        }
        assert_eq!(min_x, 10.0);
        assert!((max_x - 210.0).abs() < 1.0);

        let labels: Vec<&str> = marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["Low", "High"]);
    }
}
