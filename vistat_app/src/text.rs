// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parley-backed text engine: one shaping context serving both guide
//! measurement (`TextMeasurer`) and glyph rendering into a vello scene.

use std::cell::RefCell;

use kurbo::{Affine, Vec2};
use parley::style::{FontFamily as ParleyFontFamily, FontStack, GenericFamily, StyleProperty};
use parley::{Alignment, AlignmentOptions, FontContext, FontWeight as ParleyFontWeight, LayoutContext};
use peniko::Brush;
use vello::Scene as VelloScene;
use vello::peniko::{Fill, FontData};
use vistat_charts::{FontFamily, TextMeasurer, TextMetrics, TextStyle};
use vistat_core::{TextAnchor, TextBaseline, TextPayload};

/// Shaping contexts shared by measurement and rendering.
pub(crate) struct TextEngine {
    font_cx: RefCell<FontContext>,
    layout_cx: RefCell<LayoutContext<()>>,
}

impl std::fmt::Debug for TextEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEngine").finish_non_exhaustive()
    }
}

fn font_size_f32(font_size: f64) -> f32 {
    if !font_size.is_finite() {
        return 0.0;
    }
    let font_size = font_size.max(0.0);
    if font_size >= f64::from(f32::MAX) {
        f32::MAX
    } else {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Value is clamped to f32::MAX above"
        )]
        {
            font_size as f32
        }
    }
}

fn parley_font_stack(family: &FontFamily) -> FontStack<'_> {
    let family = match family {
        FontFamily::Serif => ParleyFontFamily::Generic(GenericFamily::Serif),
        FontFamily::SansSerif => ParleyFontFamily::Generic(GenericFamily::SansSerif),
        FontFamily::Monospace => ParleyFontFamily::Generic(GenericFamily::Monospace),
        FontFamily::Named(name) => {
            ParleyFontFamily::Named(std::borrow::Cow::Borrowed(name.as_ref()))
        }
    };
    FontStack::from(family)
}

impl TextEngine {
    /// Creates a new engine with Parley's default system fonts.
    pub(crate) fn new() -> Self {
        Self {
            font_cx: RefCell::new(FontContext::new()),
            layout_cx: RefCell::new(LayoutContext::new()),
        }
    }

    fn shape(&self, text: &str, style: &TextStyle) -> parley::Layout<()> {
        let mut font_cx = self.font_cx.borrow_mut();
        let mut layout_cx = self.layout_cx.borrow_mut();

        let mut builder = layout_cx.ranged_builder(&mut font_cx, text, 1.0, true);
        builder.push_default(StyleProperty::FontSize(font_size_f32(style.font_size)));
        builder.push_default(StyleProperty::FontStack(parley_font_stack(&style.font_family)));
        builder.push_default(StyleProperty::FontWeight(ParleyFontWeight::new(f32::from(
            style.font_weight.0,
        ))));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, Alignment::Start, AlignmentOptions::default());
        layout
    }

    /// Draws a single text payload into the vello scene under `global`.
    pub(crate) fn draw(&self, scene: &mut VelloScene, global: Affine, payload: &TextPayload, fill: &Brush) {
        let text = payload.text.split('\n').next().unwrap_or("");
        if text.is_empty() {
            return;
        }

        let layout = self.shape(text, &TextStyle::new(payload.font_size));
        let Some(line) = layout.lines().next() else {
            return;
        };

        let metrics = line.metrics();
        let width = f64::from(metrics.advance);
        let ascent = f64::from(metrics.ascent);
        let descent = f64::from(metrics.descent);
        let leading = f64::from(metrics.leading);
        let baseline_offset = f64::from(metrics.baseline);
        let height = ascent + descent + leading;

        let ref_x = match payload.anchor {
            TextAnchor::Start => 0.0,
            TextAnchor::Middle => 0.5 * width,
            TextAnchor::End => width,
        };

        let top = baseline_offset - ascent;
        let ref_y = match payload.baseline {
            TextBaseline::Alphabetic | TextBaseline::Ideographic => baseline_offset,
            TextBaseline::Hanging => top,
            TextBaseline::Middle => top + 0.5 * height,
        };

        let angle = payload.angle.to_radians();
        let transform = global
            * (Affine::translate(Vec2::new(payload.pos.x, payload.pos.y))
                * Affine::rotate(angle)
                * Affine::translate(Vec2::new(-ref_x, -ref_y)));

        for item in line.items() {
            let parley::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let font: &FontData = run.run().font();
            let glyphs = run.positioned_glyphs().map(|g| vello::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });

            scene
                .draw_glyphs(font)
                .transform(transform)
                .font_size(run.run().font_size())
                .brush(fill)
                .draw(Fill::NonZero, glyphs);
        }
    }

    /// Measures a single line for tooltip layout.
    pub(crate) fn line_metrics(&self, text: &str, font_size: f64) -> TextMetrics {
        self.measure(text, TextStyle::new(font_size))
    }

    /// Convenience anchor point for code that positions by `Point`.
    pub(crate) fn advance_width(&self, text: &str, font_size: f64) -> f64 {
        self.line_metrics(text, font_size).advance_width
    }
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for TextEngine {
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics {
        let text = text.split('\n').next().unwrap_or("");
        if text.is_empty() {
            return TextMetrics {
                advance_width: 0.0,
                ascent: 0.0,
                descent: 0.0,
                leading: 0.0,
            };
        }

        let layout = self.shape(text, &style);
        let Some(line) = layout.lines().next() else {
            return TextMetrics {
                advance_width: 0.0,
                ascent: 0.0,
                descent: 0.0,
                leading: 0.0,
            };
        };

        let m = line.metrics();
        TextMetrics {
            advance_width: f64::from(m.advance),
            ascent: f64::from(m.ascent),
            descent: f64::from(m.descent),
            leading: f64::from(m.leading),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonempty_text_measures_nonzero() {
        let engine = TextEngine::new();
        let metrics = engine.measure("Hello", TextStyle::new(12.0));
        assert!(metrics.advance_width > 0.0);
        assert!(metrics.ascent > 0.0);
    }

    #[test]
    fn empty_text_measures_zero() {
        let engine = TextEngine::new();
        let metrics = engine.measure("", TextStyle::new(12.0));
        assert_eq!(metrics.advance_width, 0.0);
    }

    #[test]
    fn longer_text_is_wider() {
        let engine = TextEngine::new();
        let short = engine.advance_width("Lo", 13.0);
        let long = engine.advance_width("Low and behold", 13.0);
        assert!(long > short);
    }
}
