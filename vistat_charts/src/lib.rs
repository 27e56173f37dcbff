// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart building blocks for `vistat_core`.
//!
//! This crate is a small, reusable layer above `vistat_core`:
//! - **Scales** map data values into screen coordinates or colors.
//! - **Guides** (axes, legends, titles) are built by generating
//!   `vistat_core::Mark`s.
//! - **Charts** (bar, scatter, heatmap, choropleth, treemap) compose scales
//!   and guides with per-record series marks, hover metadata, and entry
//!   animations.
//!
//! The two algorithmic pieces no upstream crate supplies (a Natural Earth
//! map projection and a squarified treemap layout) live in [`projection`]
//! and [`treemap`].
//!
//! Text shaping and layout are out of scope; text marks store unshaped
//! strings and guides measure through the [`TextMeasurer`] trait.

#![no_std]

extern crate alloc;

mod axis;
mod bar_chart;
mod chart_spec;
mod choropleth_chart;
mod color;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod heatmap_chart;
mod layout;
mod legend;
mod measure;
mod point_mark;
pub mod projection;
mod rect_mark;
mod scale;
mod scatter_chart;
mod symbol;
mod text_mark;
mod title;
pub mod treemap;
mod treemap_chart;
mod z_order;

#[cfg(test)]
mod chart_tests;

pub use axis::{AxisOrient, AxisScale, AxisSpec, AxisStyle, GridStyle};
pub use bar_chart::{BarChartSpec, CityBar};
pub use chart_spec::{ChartLegend, ChartScene, ChartSpec};
pub use choropleth_chart::{ChoroplethChartSpec, RegionShape};
pub use color::{BLUES, CATEGORY10, ColorRamp, NEUTRAL_FILL, SequentialScale, YL_OR_RD};
pub use format::{format_count, format_tick_with_step, truncate_label};
pub use heatmap_chart::{FlowCell, HeatmapChartSpec, MONTH_NAMES};
pub use layout::{ChartLayout, ChartLayoutSpec, LegendOrient, LegendPlacement, Size};
pub use legend::{GradientLegendSpec, LegendItem, LegendSwatches, LegendSwatchesSpec};
pub use measure::{
    FontFamily, FontStyle, FontWeight, HeuristicTextMeasurer, TextMeasurer, TextMetrics, TextStyle,
};
pub use point_mark::PointMarkSpec;
pub use rect_mark::RectMarkSpec;
pub use scale::{ScaleBand, ScaleBandSpec, ScaleLinear, ScaleLinearSpec, infer_max_f64};
pub use scatter_chart::{DensityBand, DensityPoint, ScatterChartSpec};
pub use symbol::circle_path;
pub use text_mark::TextMarkSpec;
pub use title::TitleSpec;
pub use treemap_chart::{AgeShare, TreemapChartSpec};
pub use z_order::*;
