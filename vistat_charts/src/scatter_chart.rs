// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatterplot: urbanization share against population density, with points
//! colored by a fixed set of density bands.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Color;
use vistat_core::{EnterEffect, EnterSpec, Highlight, HoverSpec, MarkId, StrokePaint};

use crate::axis::{AxisSpec, AxisStyle};
use crate::chart_spec::{ChartLegend, ChartScene, ChartSpec};
use crate::format::format_count;
use crate::legend::{LegendItem, LegendSwatchesSpec};
use crate::point_mark::PointMarkSpec;
use crate::rect_mark::RectMarkSpec;
use crate::scale::{ScaleLinearSpec, infer_max_f64};
use crate::title::TitleSpec;
use crate::{LegendOrient, LegendPlacement, Size, TextMeasurer, z_order};

const ID_TITLE: u64 = 0x20_000;
const ID_AXIS_X: u64 = 0x21_000;
const ID_AXIS_Y: u64 = 0x22_000;
const ID_LEGEND: u64 = 0x23_000;
const ID_FRAME: u64 = 0x24_000;
const ID_POINTS: u64 = 0x2F_000;

const ENTER_DURATION_MS: f64 = 700.0;
const ENTER_STAGGER_MS: f64 = 5.0;
const POINT_RADIUS: f64 = 5.0;
const POINT_ALPHA: f32 = 0.8;
const HOVER_RADIUS: f64 = 7.0;

/// One scatter record. All three fields are required; records missing any
/// of them must be rejected by the loader before the chart is built.
#[derive(Clone, Debug)]
pub struct DensityPoint {
    /// Country name (tooltip label).
    pub country: String,
    /// Urban population share in percent (x).
    pub urban_percent: f64,
    /// Population density in people/km² (y).
    pub density: f64,
}

/// The five fixed density bands points are colored by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DensityBand {
    /// Up to 50 people/km².
    VeryLow,
    /// 51–150 people/km².
    Low,
    /// 151–500 people/km².
    Medium,
    /// 501–2000 people/km².
    High,
    /// More than 2000 people/km².
    VeryHigh,
}

impl DensityBand {
    /// All bands in legend order.
    pub const ALL: [Self; 5] = [
        Self::VeryLow,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::VeryHigh,
    ];

    /// Classifies a density value.
    pub fn of(density: f64) -> Self {
        if density <= 50.0 {
            Self::VeryLow
        } else if density <= 150.0 {
            Self::Low
        } else if density <= 500.0 {
            Self::Medium
        } else if density <= 2000.0 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }

    /// The band's point color.
    pub fn color(self) -> Color {
        match self {
            Self::VeryLow => Color::from_rgb8(0x00, 0x7b, 0xff),
            Self::Low => Color::from_rgb8(0x28, 0xa7, 0x45),
            Self::Medium => Color::from_rgb8(0xff, 0xc1, 0x07),
            Self::High => Color::from_rgb8(0xfd, 0x7e, 0x14),
            Self::VeryHigh => Color::from_rgb8(0xdc, 0x35, 0x45),
        }
    }

    /// The band's legend label.
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "0–50: Very Low",
            Self::Low => "51–150: Low",
            Self::Medium => "151–500: Medium",
            Self::High => "501–2000: High",
            Self::VeryHigh => ">2000: Very High",
        }
    }
}

/// Scatterplot builder.
#[derive(Clone, Debug)]
pub struct ScatterChartSpec {
    /// Validated input records.
    pub points: Vec<DensityPoint>,
}

impl ScatterChartSpec {
    /// Creates a scatterplot spec.
    pub fn new(points: Vec<DensityPoint>) -> Self {
        Self { points }
    }

    /// Builds the chart scene for the given view size.
    pub fn build(&self, view: Size, measurer: &dyn TextMeasurer) -> ChartScene {
        let max_urban = infer_max_f64(self.points.iter().map(|p| p.urban_percent)).unwrap_or(0.0);
        let max_density = infer_max_f64(self.points.iter().map(|p| p.density)).unwrap_or(0.0);

        let axis_style = AxisStyle {
            label_font_size: 12.0,
            title_font_size: 14.0,
            ..AxisStyle::default()
        };

        let axis_bottom = AxisSpec::bottom(
            ID_AXIS_X,
            ScaleLinearSpec::new((0.0, max_urban)).with_nice(true),
        )
        .with_tick_count(10)
        .with_style(axis_style.clone())
        .with_tick_formatter(|v, step| {
            let mut s = crate::format::format_tick_with_step(v, step);
            s.push('%');
            s
        })
        .with_title("Urban Population (%)");

        let axis_left = AxisSpec::left(
            ID_AXIS_Y,
            ScaleLinearSpec::new((0.0, max_density)).with_nice(true),
        )
        .with_style(axis_style)
        .with_title("Population Density (people/km²)");

        let legend = LegendSwatchesSpec::new(
            ID_LEGEND,
            DensityBand::ALL
                .iter()
                .map(|band| LegendItem::solid(band.label(), band.color()))
                .collect(),
        )
        .with_columns(5)
        .with_column_width(150.0)
        .with_heading("Density Groups (people/km²):")
        .with_font_size(12.0);

        let chart = ChartSpec {
            title: Some(
                TitleSpec::new(MarkId::from_raw(ID_TITLE), "Urbanization vs Population Density")
                    .with_font_size(18.0),
            ),
            view_size: view,
            outer_padding: 10.0,
            axis_left: Some(axis_left),
            axis_bottom: Some(axis_bottom),
            legend: Some((
                ChartLegend::Swatches(legend),
                LegendPlacement {
                    orient: LegendOrient::Bottom,
                    offset: 12.0,
                    x: 0.0,
                    y: 0.0,
                },
            )),
        };

        let points = self.points.clone();
        let mut scene = chart.build(measurer, move |chart, plot| {
            let x = chart
                .axis_bottom
                .as_ref()
                .expect("bottom axis")
                .scale_linear(plot);
            let y = chart.axis_left.as_ref().expect("left axis").scale_linear(plot);

            let mut out = Vec::new();
            for (i, p) in points.iter().enumerate() {
                let band = DensityBand::of(p.density);
                let center = Point::new(x.map(p.urban_percent), y.map(p.density));

                out.push(
                    PointMarkSpec::new(MarkId::from_raw(ID_POINTS + i as u64), center)
                        .with_radius(POINT_RADIUS)
                        .with_fill(band.color().with_alpha(POINT_ALPHA))
                        .mark()
                        .with_hover(
                            HoverSpec::new(
                                p.country.clone(),
                                Highlight::Grow {
                                    scale: HOVER_RADIUS / POINT_RADIUS,
                                    alpha: 1.0,
                                },
                            )
                            .with_line(alloc::format!("Urban: {}%", p.urban_percent))
                            .with_line(alloc::format!("Density: {}", format_count(p.density))),
                        )
                        .with_enter(EnterSpec::new(
                            EnterEffect::ScaleAbout { center },
                            ENTER_DURATION_MS,
                            i as f64 * ENTER_STAGGER_MS,
                        )),
                );
            }
            out
        });

        // Frame behind everything, covering the full surface.
        scene.marks.push(
            RectMarkSpec::new(
                MarkId::from_raw(ID_FRAME),
                Rect::new(0.0, 0.0, view.width, view.height),
            )
            .with_fill(Color::from_rgb8(0xf8, 0xf9, 0xfa))
            .with_stroke(StrokePaint::solid(
                Color::from_rgb8(0xde, 0xe2, 0xe6),
                1.0,
            ))
            .with_z_index(z_order::PLOT_BACKGROUND)
            .mark(),
        );
        scene
    }
}
