// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Painting the retained scene into vello.
//!
//! Entry animations and hover highlights are applied here, at paint time:
//! marks stay immutable, the painter derives a per-mark transform, alpha,
//! and paint overrides from the animation clock and the hovered id.

use kurbo::{Affine, Point, Rect, RoundedRect, Vec2};
use peniko::color::palette::css;
use peniko::Brush;
use vello::Scene as VelloScene;
use vello::kurbo::Stroke;
use vello::peniko::Fill;
use vistat_core::{
    EnterEffect, Highlight, HoverSpec, Mark, MarkId, MarkPayload, Scene, StrokePaint, TextAnchor,
    TextBaseline, TextPayload,
};

use crate::text::TextEngine;

const TOOLTIP_OFFSET: Vec2 = Vec2::new(10.0, -28.0);
const TOOLTIP_FONT_SIZE: f64 = 13.0;
const TOOLTIP_LINE_HEIGHT: f64 = 18.0;
const TOOLTIP_PAD_X: f64 = 8.0;
const TOOLTIP_PAD_Y: f64 = 5.0;

/// Paints all marks under `transform`, interpolating entry animations at
/// `elapsed_ms` and applying the hovered mark's highlight.
pub(crate) fn paint_scene(
    vello: &mut VelloScene,
    scene: &Scene,
    transform: Affine,
    elapsed_ms: f64,
    hovered: Option<MarkId>,
    text: &TextEngine,
) {
    for mark in scene.marks() {
        paint_mark(vello, mark, transform, elapsed_ms, hovered, text);
    }
}

fn paint_mark(
    vello: &mut VelloScene,
    mark: &Mark,
    transform: Affine,
    elapsed_ms: f64,
    hovered: Option<MarkId>,
    text: &TextEngine,
) {
    let mut local = Affine::IDENTITY;
    let mut alpha = 1.0_f64;
    let mut fill_override: Option<Brush> = None;
    let mut stroke_override: Option<StrokePaint> = None;

    if let Some(enter) = &mark.enter {
        let p = enter.progress(elapsed_ms);
        match enter.effect {
            EnterEffect::GrowUp { baseline } => {
                local = Affine::translate(Vec2::new(0.0, baseline))
                    * Affine::scale_non_uniform(1.0, p)
                    * Affine::translate(Vec2::new(0.0, -baseline));
            }
            EnterEffect::ScaleAbout { center } => {
                local = scale_about(center, p);
                alpha *= p;
            }
            EnterEffect::FadeIn => alpha *= p,
        }
    }

    if hovered == Some(mark.id)
        && let Some(hover) = &mark.hover
    {
        match &hover.highlight {
            Highlight::Fill(brush) => fill_override = Some(brush.clone()),
            Highlight::Stroke(stroke) => stroke_override = Some(stroke.clone()),
            Highlight::Grow {
                scale,
                alpha: hover_alpha,
            } => {
                if let Some(bounds) = mark.payload.bounds() {
                    local = scale_about(bounds.center(), *scale) * local;
                }
                alpha = f64::from(*hover_alpha);
            }
        }
    }

    let t = transform * local;
    match &mark.payload {
        MarkPayload::Rect(r) => {
            let fill = faded(fill_override.as_ref().unwrap_or(&r.fill), alpha);
            if !brush_is_transparent(&fill) {
                vello.fill(Fill::NonZero, t, &fill, None, &r.rect);
            }
            if let Some(stroke) = stroke_override.as_ref().or(r.stroke.as_ref()) {
                paint_stroke(vello, t, stroke, alpha, &r.rect);
            }
        }
        MarkPayload::Path(p) => {
            let fill = faded(fill_override.as_ref().unwrap_or(&p.fill), alpha);
            if !brush_is_transparent(&fill) {
                vello.fill(Fill::NonZero, t, &fill, None, &p.path);
            }
            if let Some(stroke) = stroke_override.as_ref().or(p.stroke.as_ref()) {
                paint_stroke(vello, t, stroke, alpha, &p.path);
            }
        }
        MarkPayload::Text(payload) => {
            let fill = faded(fill_override.as_ref().unwrap_or(&payload.fill), alpha);
            if !brush_is_transparent(&fill) {
                text.draw(vello, t, payload, &fill);
            }
        }
    }
}

fn paint_stroke(
    vello: &mut VelloScene,
    transform: Affine,
    stroke: &StrokePaint,
    alpha: f64,
    shape: &impl kurbo::Shape,
) {
    if stroke.width <= 0.0 {
        return;
    }
    let brush = faded(&stroke.brush, alpha);
    if brush_is_transparent(&brush) {
        return;
    }
    vello.stroke(&Stroke::new(stroke.width), transform, &brush, None, shape);
}

fn scale_about(center: Point, factor: f64) -> Affine {
    Affine::translate(center.to_vec2()) * Affine::scale(factor) * Affine::translate(-center.to_vec2())
}

pub(crate) fn faded(brush: &Brush, alpha: f64) -> Brush {
    if alpha >= 1.0 {
        return brush.clone();
    }
    match brush {
        Brush::Solid(c) => {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "alpha is clamped to [0, 1]"
            )]
            let a = c.components[3] * alpha.clamp(0.0, 1.0) as f32;
            Brush::Solid(c.with_alpha(a))
        }
        other => other.clone(),
    }
}

fn brush_is_transparent(brush: &Brush) -> bool {
    match brush {
        Brush::Solid(c) => c.components[3] <= 0.0,
        _ => false,
    }
}

/// Paints the shared tooltip overlay for the hovered mark.
///
/// The tooltip is drawn in surface coordinates at the pointer position plus
/// the fixed offset; content comes from the mark's [`HoverSpec`].
pub(crate) fn paint_tooltip(
    vello: &mut VelloScene,
    engine: &TextEngine,
    hover: &HoverSpec,
    pointer: Point,
) {
    let origin = pointer + TOOLTIP_OFFSET;

    let mut width = engine.advance_width(&hover.title, TOOLTIP_FONT_SIZE);
    for line in &hover.lines {
        width = width.max(engine.advance_width(line, TOOLTIP_FONT_SIZE));
    }
    let line_count = 1 + hover.lines.len();
    let rect = Rect::new(
        origin.x,
        origin.y,
        origin.x + width + 2.0 * TOOLTIP_PAD_X,
        origin.y + line_count as f64 * TOOLTIP_LINE_HEIGHT + 2.0 * TOOLTIP_PAD_Y,
    );

    vello.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        &Brush::Solid(css::BLACK.with_alpha(0.75)),
        None,
        &RoundedRect::from_rect(rect, 4.0),
    );

    let mut y = rect.y0 + TOOLTIP_PAD_Y + 0.5 * TOOLTIP_LINE_HEIGHT;
    for line in core::iter::once(&hover.title).chain(&hover.lines) {
        let payload = TextPayload {
            pos: Point::new(rect.x0 + TOOLTIP_PAD_X, y),
            text: line.clone(),
            font_size: TOOLTIP_FONT_SIZE,
            angle: 0.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
            fill: Brush::Solid(css::WHITE),
        };
        engine.draw(vello, Affine::IDENTITY, &payload, &payload.fill);
        y += TOOLTIP_LINE_HEIGHT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faded_scales_solid_alpha() {
        let brush = Brush::Solid(css::BLACK.with_alpha(0.8));
        let half = faded(&brush, 0.5);
        match half {
            Brush::Solid(c) => assert!((c.components[3] - 0.4).abs() < 1.0e-6),
            other => panic!("expected solid, got {other:?}"),
        }
    }

    #[test]
    fn full_alpha_is_untouched() {
        let brush = Brush::Solid(css::TOMATO);
        match faded(&brush, 1.0) {
            Brush::Solid(c) => assert_eq!(c.components[3], 1.0),
            other => panic!("expected solid, got {other:?}"),
        }
    }

    #[test]
    fn scale_about_fixes_its_center() {
        let center = Point::new(10.0, 20.0);
        let t = scale_about(center, 1.4);
        let moved = t * center;
        assert!((moved - center).hypot() < 1.0e-9);

        let edge = t * Point::new(15.0, 20.0);
        assert!((edge.x - 17.0).abs() < 1.0e-9, "5 units scale to 7");
    }
}
