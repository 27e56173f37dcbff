// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar chart: city populations, largest first.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Color;
use vistat_core::{EnterEffect, EnterSpec, Highlight, HoverSpec, MarkId};

use crate::axis::{AxisOrient, AxisSpec, GridStyle};
use crate::chart_spec::{ChartScene, ChartSpec};
use crate::format::format_count;
use crate::rect_mark::RectMarkSpec;
use crate::scale::{ScaleBandSpec, ScaleLinearSpec, infer_max_f64};
use crate::title::TitleSpec;
use crate::{Size, TextMeasurer, z_order};

const ID_TITLE: u64 = 0x10_000;
const ID_AXIS_X: u64 = 0x11_000;
const ID_AXIS_Y: u64 = 0x12_000;
const ID_BARS: u64 = 0x1F_000;

const ENTER_DURATION_MS: f64 = 800.0;
const ENTER_STAGGER_MS: f64 = 50.0;
const LABEL_MAX_CHARS: usize = 10;

/// One bar: a city and its population.
#[derive(Clone, Debug)]
pub struct CityBar {
    /// Category label.
    pub city: String,
    /// Bar value.
    pub population: f64,
}

/// Bar chart builder.
///
/// Bars are sorted descending by population before layout, so the category
/// axis order always matches the value order regardless of input order.
#[derive(Clone, Debug)]
pub struct BarChartSpec {
    /// Input records (already validated by the loader).
    pub bars: Vec<CityBar>,
    /// Bar fill (the "bar color" styling token).
    pub bar_color: Color,
    /// Bar fill while hovered (the "bar hover color" styling token).
    pub hover_color: Color,
}

impl BarChartSpec {
    /// Creates a bar chart spec.
    pub fn new(bars: Vec<CityBar>, bar_color: Color, hover_color: Color) -> Self {
        Self {
            bars,
            bar_color,
            hover_color,
        }
    }

    /// Builds the chart scene for the given view size.
    pub fn build(&self, view: Size, measurer: &dyn TextMeasurer) -> ChartScene {
        let mut bars = self.bars.clone();
        bars.sort_by(|a, b| {
            b.population
                .partial_cmp(&a.population)
                .unwrap_or(core::cmp::Ordering::Equal)
        });

        let max_population = infer_max_f64(bars.iter().map(|b| b.population)).unwrap_or(0.0);
        let labels: Vec<String> = bars.iter().map(|b| b.city.clone()).collect();

        let axis_bottom = AxisSpec::band(
            ID_AXIS_X,
            AxisOrient::Bottom,
            ScaleBandSpec::new(bars.len()).with_padding(0.2, 0.2),
            labels,
        )
        .with_label_angle(-45.0)
        .with_label_max_chars(LABEL_MAX_CHARS)
        .with_title("City");

        let axis_left = AxisSpec::left(
            ID_AXIS_Y,
            ScaleLinearSpec::new((0.0, max_population)).with_nice(true),
        )
        .with_grid(GridStyle::default())
        .with_title("Population");

        let chart = ChartSpec {
            title: Some(TitleSpec::new(
                MarkId::from_raw(ID_TITLE),
                "Population of Megacities in 2023",
            )),
            view_size: view,
            outer_padding: 10.0,
            axis_left: Some(axis_left),
            axis_bottom: Some(axis_bottom),
            legend: None,
        };

        let bar_color = self.bar_color;
        let hover_color = self.hover_color;
        chart.build(measurer, move |chart, plot| {
            let band = chart
                .axis_bottom
                .as_ref()
                .expect("bottom axis")
                .scale_band(plot);
            let y = chart.axis_left.as_ref().expect("left axis").scale_linear(plot);
            let bw = band.band_width();
            let baseline = y.map(0.0);

            let mut out = Vec::new();
            for (i, bar) in bars.iter().enumerate() {
                let x0 = band.x(i);
                let y0 = y.map(bar.population).min(baseline);
                let rect = Rect::new(x0, y0, x0 + bw, baseline);

                out.push(
                    RectMarkSpec::new(MarkId::from_raw(ID_BARS + i as u64), rect)
                        .with_fill(bar_color)
                        .with_z_index(z_order::SERIES_FILL)
                        .mark()
                        .with_hover(
                            HoverSpec::new(bar.city.clone(), Highlight::Fill(hover_color.into()))
                                .with_line(alloc::format!(
                                    "Population: {}",
                                    format_count(bar.population)
                                )),
                        )
                        .with_enter(EnterSpec::new(
                            EnterEffect::GrowUp { baseline },
                            ENTER_DURATION_MS,
                            i as f64 * ENTER_STAGGER_MS,
                        )),
                );
            }
            out
        })
    }
}
