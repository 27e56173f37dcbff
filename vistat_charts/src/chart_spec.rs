// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart composition helpers.
//!
//! This module provides the composition layer shared by the five chart
//! builders: a chart is assembled from a view rectangle, guide components
//! (title, axes, legend) and a set of series marks. The guides are measured
//! first, the remaining space becomes the plot rectangle, then guides and
//! series generate marks against it.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;
use vistat_core::Mark;

use crate::{
    AxisSpec, ChartLayout, ChartLayoutSpec, GradientLegendSpec, LegendPlacement,
    LegendSwatchesSpec, Size, TextMeasurer, TitleSpec,
};

/// The output of one chart build: a view rectangle and the marks to draw.
#[derive(Debug)]
pub struct ChartScene {
    /// Outer chart bounds in scene coordinates.
    pub view: Rect,
    /// All marks, series and guides alike.
    pub marks: Vec<Mark>,
}

/// The legend attached to a chart, if any.
#[derive(Clone, Debug)]
pub enum ChartLegend {
    /// Discrete swatches.
    Swatches(LegendSwatchesSpec),
    /// A continuous gradient ramp.
    Gradient(GradientLegendSpec),
}

/// A composed chart description that owns guide specs and layout inputs.
#[derive(Clone, Debug, Default)]
pub struct ChartSpec {
    /// Optional title.
    pub title: Option<TitleSpec>,
    /// The view (outer chart bounds) this chart renders into.
    pub view_size: Size,
    /// Extra padding around the whole chart.
    pub outer_padding: f64,
    /// Optional left axis.
    pub axis_left: Option<AxisSpec>,
    /// Optional bottom axis.
    pub axis_bottom: Option<AxisSpec>,
    /// Optional legend.
    pub legend: Option<(ChartLegend, LegendPlacement)>,
}

impl ChartSpec {
    /// Computes layout for this chart.
    pub fn layout(&self, measurer: &dyn TextMeasurer) -> ChartLayout {
        let title_top = self.title.as_ref().map(|t| t.measure(measurer));
        let axis_left = self.axis_left.as_ref().map(|a| a.measure(measurer));
        let axis_bottom = self.axis_bottom.as_ref().map(|a| a.measure(measurer));

        let legend = self.legend.as_ref().map(|(legend, placement)| {
            let size = match legend {
                ChartLegend::Swatches(spec) => spec.measure(measurer),
                ChartLegend::Gradient(spec) => spec.measure(measurer),
            };
            (size, *placement)
        });

        ChartLayout::arrange(&ChartLayoutSpec {
            title_top,
            view_size: self.view_size,
            outer_padding: self.outer_padding,
            axis_left,
            axis_bottom,
            legend,
        })
    }

    /// Generates marks for title/axes/legend, given a computed layout.
    pub fn guide_marks(&self, measurer: &dyn TextMeasurer, layout: &ChartLayout) -> Vec<Mark> {
        let mut out = Vec::new();

        if let (Some(title), Some(rect)) = (self.title.as_ref(), layout.title_top) {
            out.extend(title.marks(measurer, rect));
        }

        let plot = layout.plot;
        if let (Some(axis), Some(axis_rect)) = (self.axis_bottom.as_ref(), layout.axis_bottom) {
            out.extend(axis.marks(plot, axis_rect));
        }
        if let (Some(axis), Some(axis_rect)) = (self.axis_left.as_ref(), layout.axis_left) {
            out.extend(axis.marks(plot, axis_rect));
        }

        if let (Some((legend, _placement)), Some(rect)) = (self.legend.as_ref(), layout.legend) {
            match legend {
                ChartLegend::Swatches(spec) => out.extend(spec.marks(rect.x0, rect.y0)),
                ChartLegend::Gradient(spec) => out.extend(spec.marks(rect.x0, rect.y0)),
            }
        }

        out
    }

    /// Produces a full chart scene: series marks + guide marks.
    ///
    /// The series builder is invoked with the resolved plot rectangle.
    pub fn build(
        &self,
        measurer: &dyn TextMeasurer,
        build_series: impl FnOnce(&Self, Rect) -> Vec<Mark>,
    ) -> ChartScene {
        let layout = self.layout(measurer);
        let mut marks = build_series(self, layout.plot);
        marks.extend(self.guide_marks(measurer, &layout));
        ChartScene {
            view: layout.view,
            marks,
        }
    }
}
