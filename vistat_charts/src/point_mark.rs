// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point mark generation.

use kurbo::Point;
use peniko::Brush;
use vistat_core::{Mark, MarkId, MarkPayload, PathPayload, StrokePaint};

use crate::symbol::circle_path;

/// A circular point mark spec.
#[derive(Clone, Debug)]
pub struct PointMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Center in scene coordinates.
    pub center: Point,
    /// Radius in scene coordinates.
    pub radius: f64,
    /// Fill paint for the glyph.
    pub fill: Brush,
    /// Optional outline.
    pub stroke: Option<StrokePaint>,
    /// Rendering order hint (`vistat_core::Mark::z_index`).
    pub z_index: i32,
}

impl PointMarkSpec {
    /// Creates a point mark spec with a radius of 3 and a default fill.
    pub fn new(id: MarkId, center: Point) -> Self {
        Self {
            id,
            center,
            radius: 3.0,
            fill: Brush::default(),
            stroke: None,
            z_index: crate::z_order::SERIES_POINTS,
        }
    }

    /// Sets the glyph radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets an outline stroke.
    pub fn with_stroke(mut self, stroke: StrokePaint) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        Mark::new(
            self.id,
            MarkPayload::Path(PathPayload {
                path: circle_path(self.center.x, self.center.y, self.radius),
                fill: self.fill.clone(),
                stroke: self.stroke.clone(),
            }),
        )
        .with_z_index(self.z_index)
    }
}
