// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark types: drawable values with stable identity and paint order.

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::Brush;

use crate::anim::EnterSpec;
use crate::hover::HoverSpec;

/// A stable mark identifier.
///
/// Chart generators derive ids deterministically (an `id_base` per guide or
/// series plus an offset per element), so the same element gets the same id
/// across re-renders of the same chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Creates a mark id from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns this id offset by `delta` (wrapping).
    pub const fn offset(self, delta: u64) -> Self {
        Self(self.0.wrapping_add(delta))
    }
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Anchor at the start (left) of the text.
    Start,
    /// Anchor at the horizontal center of the text.
    Middle,
    /// Anchor at the end (right) of the text.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The alphabetic baseline (default for Latin text).
    Alphabetic,
    /// The vertical midpoint of the text.
    Middle,
    /// The top edge of the text.
    Hanging,
    /// The bottom edge of the text.
    Ideographic,
}

/// A stroke paint: brush + width.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokePaint {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub width: f64,
}

impl StrokePaint {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, width: f64) -> Self {
        Self {
            brush: brush.into(),
            width,
        }
    }
}

/// An axis-aligned filled rectangle, optionally stroked.
#[derive(Clone, Debug)]
pub struct RectPayload {
    /// Rectangle geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Optional outline.
    pub stroke: Option<StrokePaint>,
}

/// A filled and/or stroked Bézier path.
#[derive(Clone, Debug)]
pub struct PathPayload {
    /// Path geometry in scene coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Optional stroke.
    pub stroke: Option<StrokePaint>,
}

/// A single line of unshaped text.
#[derive(Clone, Debug)]
pub struct TextPayload {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content (unshaped).
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Rotation angle in degrees around `pos`.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// The drawable content of a mark.
#[derive(Clone, Debug)]
pub enum MarkPayload {
    /// An axis-aligned rectangle.
    Rect(RectPayload),
    /// A Bézier path.
    Path(PathPayload),
    /// A single line of text.
    Text(TextPayload),
}

impl MarkPayload {
    /// Returns geometry bounds, or `None` for text (which needs shaping to
    /// measure).
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Path(p) => Some(p.path.bounding_box()),
            Self::Text(_) => None,
        }
    }

    /// Point containment test used for hover hit-testing.
    ///
    /// Rects test exact containment; paths test the bounding box first and
    /// then the winding number; text never hit-tests.
    pub fn contains(&self, p: Point) -> bool {
        match self {
            Self::Rect(r) => r.rect.contains(p),
            Self::Path(path) => path.path.bounding_box().contains(p) && path.path.contains(p),
            Self::Text(_) => false,
        }
    }
}

/// One rendered shape, bound to at most one data record.
#[derive(Clone, Debug)]
pub struct Mark {
    /// Stable mark id.
    pub id: MarkId,
    /// Rendering order hint; ties break on `id`.
    pub z_index: i32,
    /// Drawable content.
    pub payload: MarkPayload,
    /// Tooltip content + highlight style, if this mark participates in the
    /// interaction layer.
    pub hover: Option<HoverSpec>,
    /// Entry animation, if any.
    pub enter: Option<EnterSpec>,
}

impl Mark {
    /// Creates a mark with z-index 0 and no hover/enter metadata.
    pub fn new(id: MarkId, payload: MarkPayload) -> Self {
        Self {
            id,
            z_index: 0,
            payload,
            hover: None,
            enter: None,
        }
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Attaches hover metadata.
    pub fn with_hover(mut self, hover: HoverSpec) -> Self {
        self.hover = Some(hover);
        self
    }

    /// Attaches an entry animation.
    pub fn with_enter(mut self, enter: EnterSpec) -> Self {
        self.enter = Some(enter);
        self
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::Circle;

    use super::*;

    #[test]
    fn rect_payload_contains_its_interior() {
        let payload = MarkPayload::Rect(RectPayload {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            fill: Brush::default(),
            stroke: None,
        });
        assert!(payload.contains(Point::new(5.0, 5.0)));
        assert!(!payload.contains(Point::new(15.0, 5.0)));
    }

    #[test]
    fn path_payload_uses_winding_not_just_bounds() {
        // A ring: outer circle minus inner circle. The hole is inside the
        // bounding box but outside the filled region.
        let mut path = Circle::new((0.0, 0.0), 10.0).to_path(0.01);
        path.extend(Circle::new((0.0, 0.0), 5.0).to_path(0.01).reverse_subpaths());
        let payload = MarkPayload::Path(PathPayload {
            path,
            fill: Brush::default(),
            stroke: None,
        });
        assert!(payload.contains(Point::new(7.5, 0.0)));
        assert!(!payload.contains(Point::new(0.0, 0.0)));
    }
}
