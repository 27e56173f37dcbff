// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The retained mark list of the active chart.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Point;

use crate::mark::{Mark, MarkId};

/// The z-sorted mark list for the currently active chart.
///
/// A scene is the single shared drawing surface: every renderer invocation
/// replaces its contents wholesale, so at most one chart's output is live at
/// a time. Marks are kept sorted by `(z_index, id)` for deterministic paint
/// order.
#[derive(Debug, Default)]
pub struct Scene {
    marks: Vec<Mark>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self { marks: Vec::new() }
    }

    /// Replaces all marks, discarding previous content.
    pub fn replace(&mut self, mut marks: Vec<Mark>) {
        marks.sort_by_key(|m| (m.z_index, m.id));
        self.marks = marks;
    }

    /// Removes all marks.
    pub fn clear(&mut self) {
        self.marks.clear();
    }

    /// Marks in paint order.
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Returns whether the scene holds no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Number of marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Looks up a mark by id.
    pub fn mark(&self, id: MarkId) -> Option<&Mark> {
        self.marks.iter().find(|m| m.id == id)
    }

    /// Finds the topmost hover-enabled mark containing `p`.
    ///
    /// Marks without hover metadata are transparent to hit-testing, so
    /// axis/grid/label marks never steal hover from series marks below them.
    pub fn hit_test(&self, p: Point) -> Option<MarkId> {
        self.marks
            .iter()
            .rev()
            .find(|m| m.hover.is_some() && m.payload.contains(p))
            .map(|m| m.id)
    }

    /// Whether any mark's entry animation is still running at `elapsed_ms`.
    ///
    /// Renderers use this to keep the redraw loop alive until the last
    /// staggered element has finished entering.
    pub fn any_entering(&self, elapsed_ms: f64) -> bool {
        self.marks
            .iter()
            .filter_map(|m| m.enter.as_ref())
            .any(|e| !e.is_done(elapsed_ms))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use kurbo::Rect;
    use peniko::Brush;

    use super::*;
    use crate::mark::{MarkPayload, RectPayload};
    use crate::{EnterEffect, EnterSpec, Highlight, HoverSpec};

    fn rect_mark(id: u64, z: i32, rect: Rect) -> Mark {
        Mark::new(
            MarkId::from_raw(id),
            MarkPayload::Rect(RectPayload {
                rect,
                fill: Brush::default(),
                stroke: None,
            }),
        )
        .with_z_index(z)
    }

    #[test]
    fn replace_sorts_by_z_then_id() {
        let mut scene = Scene::new();
        scene.replace(vec![
            rect_mark(2, 10, Rect::new(0.0, 0.0, 1.0, 1.0)),
            rect_mark(1, 10, Rect::new(0.0, 0.0, 1.0, 1.0)),
            rect_mark(3, -5, Rect::new(0.0, 0.0, 1.0, 1.0)),
        ]);
        let ids: Vec<u64> = scene.marks().iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn hit_test_prefers_topmost_and_skips_inert_marks() {
        let hover = HoverSpec::new("a", Highlight::Fill(Brush::default()));
        let mut scene = Scene::new();
        scene.replace(vec![
            rect_mark(1, 0, Rect::new(0.0, 0.0, 10.0, 10.0)).with_hover(hover.clone()),
            rect_mark(2, 5, Rect::new(0.0, 0.0, 10.0, 10.0)).with_hover(hover),
            // Topmost but inert: must not capture the pointer.
            rect_mark(3, 50, Rect::new(0.0, 0.0, 10.0, 10.0)),
        ]);
        assert_eq!(
            scene.hit_test(Point::new(5.0, 5.0)),
            Some(MarkId::from_raw(2))
        );
        assert_eq!(scene.hit_test(Point::new(20.0, 5.0)), None);
    }

    #[test]
    fn replace_discards_previous_chart_output() {
        let mut scene = Scene::new();
        scene.replace(vec![rect_mark(1, 0, Rect::new(0.0, 0.0, 1.0, 1.0))]);
        scene.replace(vec![rect_mark(9, 0, Rect::new(0.0, 0.0, 1.0, 1.0))]);
        assert_eq!(scene.len(), 1);
        assert!(scene.mark(MarkId::from_raw(1)).is_none());
        assert!(scene.mark(MarkId::from_raw(9)).is_some());
    }

    #[test]
    fn any_entering_tracks_the_slowest_stagger() {
        let mut scene = Scene::new();
        scene.replace(vec![
            rect_mark(1, 0, Rect::new(0.0, 0.0, 1.0, 1.0))
                .with_enter(EnterSpec::new(EnterEffect::FadeIn, 600.0, 0.0)),
            rect_mark(2, 0, Rect::new(0.0, 0.0, 1.0, 1.0))
                .with_enter(EnterSpec::new(EnterEffect::FadeIn, 600.0, 150.0)),
        ]);
        assert!(scene.any_entering(700.0));
        assert!(!scene.any_entering(751.0));
    }
}
