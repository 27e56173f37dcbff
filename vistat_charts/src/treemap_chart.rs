// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Treemap: population age structure, region → age group.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use peniko::color::palette::css;
use vistat_core::{Highlight, HoverSpec, MarkId, StrokePaint};

use crate::chart_spec::{ChartScene, ChartSpec};
use crate::color::category10;
use crate::rect_mark::RectMarkSpec;
use crate::text_mark::TextMarkSpec;
use crate::title::TitleSpec;
use crate::treemap::{deflate, round_rect, squarify};
use crate::{Size, TextMeasurer, z_order};

const ID_TITLE: u64 = 0x50_000;
const ID_LEAVES: u64 = 0x5F_000;
const ID_LABELS: u64 = 0x5F_800;

/// Gap between adjacent rectangles, split between neighbors.
const LEAF_PADDING: f64 = 0.5;

/// One record: a region, an age group within it, and the group's share.
#[derive(Clone, Debug)]
pub struct AgeShare {
    /// Top-level grouping; also selects the leaf fill color.
    pub region: String,
    /// Age group label.
    pub group: String,
    /// Share in percent.
    pub value: f64,
}

/// Treemap builder.
#[derive(Clone, Debug)]
pub struct TreemapChartSpec {
    /// Input records. Duplicate `(region, group)` pairs keep the first
    /// record's value.
    pub shares: Vec<AgeShare>,
}

struct RegionNode {
    name: String,
    total: f64,
    leaves: Vec<(String, f64)>,
}

impl TreemapChartSpec {
    /// Creates a treemap spec.
    pub fn new(shares: Vec<AgeShare>) -> Self {
        Self { shares }
    }

    /// Groups records into region nodes, sorted descending by total value,
    /// leaves sorted descending within each region.
    fn hierarchy(&self) -> Vec<RegionNode> {
        let mut regions: Vec<RegionNode> = Vec::new();
        for share in &self.shares {
            let index = match regions.iter().position(|r| r.name == share.region) {
                Some(index) => index,
                None => {
                    regions.push(RegionNode {
                        name: share.region.clone(),
                        total: 0.0,
                        leaves: Vec::new(),
                    });
                    regions.len() - 1
                }
            };
            let node = &mut regions[index];
            if node.leaves.iter().any(|(g, _)| g == &share.group) {
                continue;
            }
            node.total += share.value.max(0.0);
            node.leaves.push((share.group.clone(), share.value));
        }

        for node in &mut regions {
            node.leaves.sort_by(|a, b| {
                b.1.partial_cmp(&a.1).unwrap_or(core::cmp::Ordering::Equal)
            });
        }
        regions.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(core::cmp::Ordering::Equal)
        });
        regions
    }

    /// Builds the chart scene for the given view size.
    pub fn build(&self, view: Size, measurer: &dyn TextMeasurer) -> ChartScene {
        let regions = self.hierarchy();

        let chart = ChartSpec {
            title: Some(
                TitleSpec::new(
                    MarkId::from_raw(ID_TITLE),
                    "Population Age Structure by Region",
                )
                .with_font_size(18.0),
            ),
            view_size: view,
            outer_padding: 0.0,
            axis_left: None,
            axis_bottom: None,
            legend: None,
        };

        chart.build(measurer, move |_chart, plot| {
            let region_totals: Vec<f64> = regions.iter().map(|r| r.total).collect();
            let region_rects = squarify(&region_totals, plot);

            let mut out = Vec::new();
            let mut leaf_index = 0_u64;
            for (region_index, (region, region_rect)) in
                regions.iter().zip(region_rects).enumerate()
            {
                let fill = category10(region_index);
                let inner = deflate(region_rect, LEAF_PADDING);
                let leaf_values: Vec<f64> = region.leaves.iter().map(|(_, v)| *v).collect();
                let leaf_rects = squarify(&leaf_values, inner);

                for ((group, value), leaf_rect) in region.leaves.iter().zip(leaf_rects) {
                    let rect = round_rect(deflate(leaf_rect, LEAF_PADDING));
                    if rect.width() <= 0.0 || rect.height() <= 0.0 {
                        leaf_index += 1;
                        continue;
                    }

                    out.push(
                        RectMarkSpec::new(MarkId::from_raw(ID_LEAVES + leaf_index), rect)
                            .with_fill(fill)
                            .with_z_index(z_order::SERIES_FILL)
                            .mark()
                            .with_hover(
                                HoverSpec::new(
                                    region.name.clone(),
                                    Highlight::Stroke(StrokePaint::solid(css::BLACK, 1.5)),
                                )
                                .with_line(alloc::format!("{group}: {value}%")),
                            ),
                    );

                    out.push(
                        TextMarkSpec::new(
                            MarkId::from_raw(ID_LABELS + leaf_index),
                            Point::new(rect.x0 + 4.0, rect.y0 + 14.0),
                            alloc::format!("{group} ({value}%)"),
                        )
                        .with_font_size(11.0)
                        .with_fill(css::WHITE)
                        .with_z_index(z_order::SERIES_LABELS)
                        .mark(),
                    );

                    leaf_index += 1;
                }
            }
            out
        })
    }
}
