// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Heatmap: migration flows by year and month.

extern crate alloc;

use alloc::string::ToString;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Color;
use vistat_core::{EnterEffect, EnterSpec, Highlight, HoverSpec, MarkId, StrokePaint};

use crate::axis::{AxisOrient, AxisSpec};
use crate::chart_spec::{ChartLegend, ChartScene, ChartSpec};
use crate::color::{SequentialScale, YL_OR_RD};
use crate::format::format_count;
use crate::legend::GradientLegendSpec;
use crate::rect_mark::RectMarkSpec;
use crate::scale::{ScaleBandSpec, infer_max_f64};
use crate::title::TitleSpec;
use crate::{LegendOrient, LegendPlacement, Size, TextMeasurer, z_order};

const ID_TITLE: u64 = 0x30_000;
const ID_AXIS_X: u64 = 0x31_000;
const ID_AXIS_Y: u64 = 0x32_000;
const ID_LEGEND: u64 = 0x33_000;
const ID_CELLS: u64 = 0x3F_000;

const ENTER_DURATION_MS: f64 = 600.0;
const ENTER_STAGGER_MS: f64 = 3.0;
const CELL_PADDING: f64 = 0.05;

/// Month display names in calendar order; the y axis always shows all
/// twelve, whatever the data holds.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One heatmap cell: a year/month pair and its flow magnitude.
#[derive(Clone, Copy, Debug)]
pub struct FlowCell {
    /// Calendar year (x category).
    pub year: i32,
    /// Month number, `1..=12` (y category).
    pub month: u32,
    /// Flow magnitude (cell color).
    pub flows: f64,
}

/// Heatmap builder.
#[derive(Clone, Debug)]
pub struct HeatmapChartSpec {
    /// Validated input cells.
    pub cells: Vec<FlowCell>,
}

impl HeatmapChartSpec {
    /// Creates a heatmap spec.
    pub fn new(cells: Vec<FlowCell>) -> Self {
        Self { cells }
    }

    /// Distinct years in first-seen order.
    fn years(&self) -> Vec<i32> {
        let mut years = Vec::new();
        for cell in &self.cells {
            if !years.contains(&cell.year) {
                years.push(cell.year);
            }
        }
        years
    }

    /// Builds the chart scene for the given view size.
    pub fn build(&self, view: Size, measurer: &dyn TextMeasurer) -> ChartScene {
        let years = self.years();
        let max_flow = infer_max_f64(self.cells.iter().map(|c| c.flows)).unwrap_or(0.0);
        let color = SequentialScale::new((0.0, max_flow), YL_OR_RD);

        let axis_bottom = AxisSpec::band(
            ID_AXIS_X,
            AxisOrient::Bottom,
            ScaleBandSpec::new(years.len()).with_padding(CELL_PADDING, CELL_PADDING),
            years.iter().map(|y| y.to_string()).collect(),
        )
        .with_tick_size(0.0);

        let axis_left = AxisSpec::band(
            ID_AXIS_Y,
            AxisOrient::Left,
            ScaleBandSpec::new(MONTH_NAMES.len()).with_padding(CELL_PADDING, CELL_PADDING),
            MONTH_NAMES.iter().map(|m| m.to_string()).collect(),
        );

        let chart = ChartSpec {
            title: Some(TitleSpec::new(
                MarkId::from_raw(ID_TITLE),
                "Monthly Migration Flows (2019–2023)",
            )),
            view_size: view,
            outer_padding: 10.0,
            axis_left: Some(axis_left),
            axis_bottom: Some(axis_bottom),
            legend: Some((
                ChartLegend::Gradient(GradientLegendSpec::new(ID_LEGEND, YL_OR_RD)),
                LegendPlacement {
                    orient: LegendOrient::BottomRight,
                    offset: 14.0,
                    x: 0.0,
                    y: 0.0,
                },
            )),
        };

        let cells = self.cells.clone();
        chart.build(measurer, move |chart, plot| {
            let x = chart
                .axis_bottom
                .as_ref()
                .expect("bottom axis")
                .scale_band(plot);
            let y = chart.axis_left.as_ref().expect("left axis").scale_band(plot);
            let bw = x.band_width();
            let bh = y.band_width();

            let mut out = Vec::new();
            for (i, cell) in cells.iter().enumerate() {
                let Some(col) = years.iter().position(|&yr| yr == cell.year) else {
                    continue;
                };
                let Some(month_name) = cell
                    .month
                    .checked_sub(1)
                    .and_then(|m| MONTH_NAMES.get(m as usize))
                else {
                    continue;
                };
                let row = (cell.month - 1) as usize;

                let x0 = x.x(col);
                let y0 = y.x(row);
                out.push(
                    RectMarkSpec::new(
                        MarkId::from_raw(ID_CELLS + i as u64),
                        Rect::new(x0, y0, x0 + bw, y0 + bh),
                    )
                    .with_fill(color.color(cell.flows))
                    .with_z_index(z_order::SERIES_FILL)
                    .mark()
                    .with_hover(
                        HoverSpec::new(
                            alloc::format!("{month_name} {}", cell.year),
                            Highlight::Stroke(StrokePaint::solid(
                                Color::from_rgb8(0x33, 0x33, 0x33),
                                1.5,
                            )),
                        )
                        .with_line(alloc::format!("Flows: {}", format_count(cell.flows))),
                    )
                    .with_enter(EnterSpec::new(
                        EnterEffect::FadeIn,
                        ENTER_DURATION_MS,
                        i as f64 * ENTER_STAGGER_MS,
                    )),
                );
            }
            out
        })
    }
}
