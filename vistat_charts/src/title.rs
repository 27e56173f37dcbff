// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart titles.
//!
//! Titles participate in chart layout (they reserve a strip above the plot
//! in [`crate::ChartLayout`]) but render as an ordinary text mark.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Brush;
use vistat_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::text_mark::TextMarkSpec;
use crate::z_order;
use crate::{TextMeasurer, TextStyle};

/// A chart-level title.
#[derive(Clone, Debug)]
pub struct TitleSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Title text (unshaped).
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Extra vertical padding around the title text, applied above and
    /// below.
    pub padding: f64,
    /// Horizontal anchor within the title rectangle.
    pub anchor: TextAnchor,
    /// Rendering order hint (`vistat_core::Mark::z_index`).
    pub z_index: i32,
}

impl TitleSpec {
    /// Creates a title spec with default styling.
    pub fn new(id: MarkId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            font_size: 16.0,
            fill: Brush::default(),
            padding: 6.0,
            anchor: TextAnchor::Middle,
            z_index: z_order::TITLES,
        }
    }

    /// Returns the thickness (height) reserved by this title in chart
    /// layout.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> f64 {
        let pad = self.padding.max(0.0);
        let metrics = measurer.measure(&self.text, TextStyle::new(self.font_size));
        2.0 * pad + metrics.line_height()
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the vertical padding.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Emits the title mark placed within the provided title rectangle.
    pub fn marks(&self, measurer: &dyn TextMeasurer, title_rect: Rect) -> Vec<Mark> {
        let x = match self.anchor {
            TextAnchor::Start => title_rect.x0,
            TextAnchor::Middle => 0.5 * (title_rect.x0 + title_rect.x1),
            TextAnchor::End => title_rect.x1,
        };

        let pad = self.padding.max(0.0);
        let metrics = measurer.measure(&self.text, TextStyle::new(self.font_size));
        let y = title_rect.y0 + pad + 0.5 * metrics.line_height();

        alloc::vec![
            TextMarkSpec::new(self.id, Point::new(x, y), self.text.clone())
                .with_font_size(self.font_size)
                .with_fill(self.fill.clone())
                .with_anchor(self.anchor)
                .with_baseline(TextBaseline::Middle)
                .with_z_index(self.z_index)
                .mark(),
        ]
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::Rect;
    use vistat_core::MarkPayload;

    use super::*;
    use crate::HeuristicTextMeasurer;

    #[test]
    fn title_centers_within_its_rect() {
        let measurer = HeuristicTextMeasurer;
        let title = TitleSpec::new(MarkId::from_raw(10), "Population of Megacities in 2023");

        let h = title.measure(&measurer);
        assert!(h > title.font_size);

        let rect = Rect::new(0.0, 0.0, 400.0, h);
        let marks = title.marks(&measurer, rect);
        assert_eq!(marks.len(), 1);
        match &marks[0].payload {
            MarkPayload::Text(t) => {
                assert_eq!(t.pos.x, 200.0);
                assert_eq!(t.anchor, TextAnchor::Middle);
            }
            other => panic!("expected a text mark, got {other:?}"),
        }
    }
}
