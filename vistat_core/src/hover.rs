// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover metadata carried by marks that participate in the interaction layer.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Brush;

use crate::mark::StrokePaint;

/// How a mark is emphasized while the pointer is over it.
#[derive(Clone, Debug)]
pub enum Highlight {
    /// Swap the fill paint (bars).
    Fill(Brush),
    /// Add or replace an outline (heatmap cells, map regions, treemap
    /// leaves).
    Stroke(StrokePaint),
    /// Scale the mark up around its centroid and raise it to full opacity
    /// (scatter points).
    Grow {
        /// Uniform scale factor applied to the geometry.
        scale: f64,
        /// Absolute alpha while highlighted.
        alpha: f32,
    },
}

/// Tooltip content plus a highlight style.
///
/// The renderer owns a single shared tooltip; whichever mark currently has
/// pointer focus supplies its content through this spec.
#[derive(Clone, Debug)]
pub struct HoverSpec {
    /// First tooltip line, drawn emphasized.
    pub title: String,
    /// Remaining tooltip lines.
    pub lines: Vec<String>,
    /// Highlight applied to the mark while hovered.
    pub highlight: Highlight,
}

impl HoverSpec {
    /// Creates hover metadata with the given title and highlight.
    pub fn new(title: impl Into<String>, highlight: Highlight) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            highlight,
        }
    }

    /// Appends a detail line.
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}
