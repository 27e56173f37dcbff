// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump of a scene, for headless export.
//!
//! Entry animations render at their final state; hover metadata and the
//! tooltip are interactive-only and never exported.

use kurbo::Rect;
use peniko::Brush;
use vistat_core::{MarkPayload, Scene, StrokePaint, TextAnchor, TextBaseline};

/// Serializes the scene's marks, in paint order, as a standalone SVG
/// document with the given view box.
pub(crate) fn scene_to_svg(scene: &Scene, view: Rect) -> String {
    let mut out = String::new();

    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    out.push_str(&format!(
        r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
        view.x0,
        view.y0,
        view.width(),
        view.height(),
        view.width(),
        view.height()
    ));
    out.push('\n');

    for mark in scene.marks() {
        match &mark.payload {
            MarkPayload::Rect(r) => {
                out.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                    r.rect.x0,
                    r.rect.y0,
                    r.rect.width(),
                    r.rect.height(),
                ));
                write_paint_attr(&mut out, "fill", &r.fill);
                write_stroke_attrs(&mut out, r.stroke.as_ref());
                out.push_str("/>\n");
            }
            MarkPayload::Text(t) => {
                let baseline = match t.baseline {
                    TextBaseline::Middle => "middle",
                    TextBaseline::Alphabetic => "alphabetic",
                    TextBaseline::Hanging => "hanging",
                    TextBaseline::Ideographic => "ideographic",
                };
                out.push_str(&format!(
                    r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                    t.pos.x, t.pos.y, t.font_size, baseline
                ));
                if t.angle != 0.0 {
                    out.push_str(&format!(
                        r#" transform="rotate({} {} {})""#,
                        t.angle, t.pos.x, t.pos.y
                    ));
                }
                out.push_str(match t.anchor {
                    TextAnchor::Start => r#" text-anchor="start""#,
                    TextAnchor::Middle => r#" text-anchor="middle""#,
                    TextAnchor::End => r#" text-anchor="end""#,
                });
                write_paint_attr(&mut out, "fill", &t.fill);
                out.push('>');
                out.push_str(&escape_xml(&t.text));
                out.push_str("</text>\n");
            }
            MarkPayload::Path(p) => {
                let d = p.path.to_svg();
                out.push_str(&format!(r#"<path d="{d}""#));
                write_paint_attr(&mut out, "fill", &p.fill);
                write_stroke_attrs(&mut out, p.stroke.as_ref());
                out.push_str("/>\n");
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let paint = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (paint, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn write_stroke_attrs(out: &mut String, stroke: Option<&StrokePaint>) {
    if let Some(stroke) = stroke
        && stroke.width > 0.0
    {
        write_paint_attr(out, "stroke", &stroke.brush);
        out.push_str(&format!(r#" stroke-width="{}""#, stroke.width));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use kurbo::Point;
    use peniko::color::palette::css;
    use vistat_core::{Mark, MarkId, RectPayload, TextPayload};

    use super::*;

    #[test]
    fn rects_text_and_strokes_serialize() {
        let mut scene = Scene::new();
        scene.replace(vec![
            Mark::new(
                MarkId::from_raw(1),
                MarkPayload::Rect(RectPayload {
                    rect: Rect::new(0.0, 0.0, 10.0, 20.0),
                    fill: Brush::Solid(css::STEEL_BLUE),
                    stroke: Some(StrokePaint::solid(css::BLACK, 1.5)),
                }),
            ),
            Mark::new(
                MarkId::from_raw(2),
                MarkPayload::Text(TextPayload {
                    pos: Point::new(5.0, 5.0),
                    text: "A & B".to_string(),
                    font_size: 12.0,
                    angle: -45.0,
                    anchor: TextAnchor::Middle,
                    baseline: TextBaseline::Hanging,
                    fill: Brush::Solid(css::BLACK),
                }),
            ),
        ]);

        let svg = scene_to_svg(&scene, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(svg.contains("<rect"), "rect element missing");
        assert!(svg.contains(r#"stroke-width="1.5""#));
        assert!(svg.contains("A &amp; B"), "text must be XML-escaped");
        assert!(svg.contains("rotate(-45"), "rotation must serialize");
        assert!(svg.ends_with("</svg>\n"));
    }
}
