// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Choropleth: world map with country fill encoding urbanization share.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Color;
use vistat_core::{
    EnterEffect, EnterSpec, Highlight, HoverSpec, Mark, MarkId, MarkPayload, PathPayload,
    StrokePaint,
};

use crate::chart_spec::{ChartLegend, ChartScene, ChartSpec};
use crate::color::{BLUES, SequentialScale};
use crate::legend::GradientLegendSpec;
use crate::projection::Projection;
use crate::title::TitleSpec;
use crate::{LegendOrient, LegendPlacement, Size, TextMeasurer, z_order};

const ID_TITLE: u64 = 0x40_000;
const ID_LEGEND: u64 = 0x41_000;
const ID_REGIONS: u64 = 0x4F_000;

const ENTER_DURATION_MS: f64 = 800.0;
/// Vertical space kept clear of the map for the legend strip, matching the
/// original fit of `(width, height - 60)`.
const BOTTOM_RESERVED: f64 = 60.0;

/// One country: its code, display name, and polygon rings in
/// `(longitude, latitude)` degrees.
#[derive(Clone, Debug)]
pub struct RegionShape {
    /// Region code used for the metric lookup (ISO 3166-1 alpha-3).
    pub code: String,
    /// Display name for the tooltip.
    pub name: String,
    /// Polygon rings; outer rings first per polygon, holes after.
    pub rings: Vec<Vec<(f64, f64)>>,
}

/// Choropleth builder.
#[derive(Clone, Debug)]
pub struct ChoroplethChartSpec {
    /// Country geometry.
    pub regions: Vec<RegionShape>,
    /// Urbanization percent by region code. Codes absent here render the
    /// neutral fallback fill.
    pub metrics: BTreeMap<String, f64>,
}

impl ChoroplethChartSpec {
    /// Creates a choropleth spec.
    pub fn new(regions: Vec<RegionShape>, metrics: BTreeMap<String, f64>) -> Self {
        Self { regions, metrics }
    }

    /// Builds the chart scene for the given view size.
    pub fn build(&self, view: Size, measurer: &dyn TextMeasurer) -> ChartScene {
        let chart = ChartSpec {
            title: Some(
                TitleSpec::new(MarkId::from_raw(ID_TITLE), "Urbanization by Country (%)")
                    .with_font_size(18.0),
            ),
            view_size: view,
            outer_padding: 0.0,
            axis_left: None,
            axis_bottom: None,
            legend: Some((
                ChartLegend::Gradient(GradientLegendSpec::new(ID_LEGEND, BLUES)),
                LegendPlacement {
                    orient: LegendOrient::BottomRight,
                    offset: 20.0,
                    x: 0.0,
                    y: 0.0,
                },
            )),
        };

        let regions = self.regions.clone();
        let metrics = self.metrics.clone();
        chart.build(measurer, move |chart, plot| {
            let extent = Rect::new(
                plot.x0,
                plot.y0,
                plot.x1,
                (chart.view_size.height - BOTTOM_RESERVED).max(plot.y0),
            );
            let projection =
                Projection::fit_extent(extent, regions.iter().flat_map(|r| r.rings.iter()).map(Vec::as_slice));

            let mut out = Vec::new();
            for (i, region) in regions.iter().enumerate() {
                let value = metrics.get(&region.code).copied();
                let fill = SequentialScale::new((0.0, 100.0), BLUES).color_or_neutral(value);

                let tooltip_value = match value {
                    Some(v) => alloc::format!("Urbanization: {v}%"),
                    None => String::from("Urbanization: N/A"),
                };

                out.push(
                    Mark::new(
                        MarkId::from_raw(ID_REGIONS + i as u64),
                        MarkPayload::Path(PathPayload {
                            path: projection.path(&region.rings),
                            fill: fill.into(),
                            stroke: Some(StrokePaint::solid(
                                Color::from_rgb8(0x99, 0x99, 0x99),
                                0.5,
                            )),
                        }),
                    )
                    .with_z_index(z_order::SERIES_FILL)
                    .with_hover(
                        HoverSpec::new(
                            region.name.clone(),
                            Highlight::Stroke(StrokePaint::solid(
                                Color::from_rgb8(0x22, 0x22, 0x22),
                                1.0,
                            )),
                        )
                        .with_line(tooltip_value),
                    )
                    .with_enter(EnterSpec::new(EnterEffect::FadeIn, ENTER_DURATION_MS, 0.0)),
                );
            }
            out
        })
    }
}
