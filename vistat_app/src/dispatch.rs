// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart selection state, render generations, and resize debouncing.

use std::time::{Duration, Instant};

/// The five chart identifiers the selection control exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ChartId {
    /// City populations.
    Bar,
    /// Urbanization vs density.
    Scatter,
    /// Migration flows by month.
    Heatmap,
    /// Urbanization world map.
    Choropleth,
    /// Population age structure.
    Treemap,
}

impl ChartId {
    /// All identifiers in selection order.
    pub(crate) const ALL: [Self; 5] = [
        Self::Bar,
        Self::Scatter,
        Self::Heatmap,
        Self::Choropleth,
        Self::Treemap,
    ];

    /// Parses a chart identifier. Unknown identifiers return `None`; the
    /// caller decides how to surface that (here: a placeholder scene).
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s {
            "bar" => Some(Self::Bar),
            "scatter" => Some(Self::Scatter),
            "heatmap" => Some(Self::Heatmap),
            "choropleth" => Some(Self::Choropleth),
            "treemap" => Some(Self::Treemap),
            _ => None,
        }
    }

    /// The identifier string.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Scatter => "scatter",
            Self::Heatmap => "heatmap",
            Self::Choropleth => "choropleth",
            Self::Treemap => "treemap",
        }
    }

    /// The resize quiet window for this chart.
    pub(crate) fn debounce_window(self) -> Duration {
        match self {
            Self::Scatter => Duration::from_millis(100),
            _ => Duration::from_millis(150),
        }
    }

    /// The next identifier in selection order, wrapping.
    pub(crate) fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&c| c == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// The previous identifier in selection order, wrapping.
    pub(crate) fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|&c| c == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// The currently selected chart. Written only by the dispatcher on explicit
/// selection; read by the resize coordinator to know what to redraw.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ActiveChartState {
    id: ChartId,
}

/// Owns the active-chart state and the render generation counter.
///
/// Every render invocation gets a fresh, monotonically increasing
/// generation. Load completions carry their generation back; anything but
/// the latest is stale and must be discarded before drawing, so output from
/// a superseded invocation can never land on the surface.
#[derive(Debug)]
pub(crate) struct Dispatcher {
    active: ActiveChartState,
    generation: u64,
}

impl Dispatcher {
    /// Creates a dispatcher with the given initial selection.
    pub(crate) fn new(initial: ChartId) -> Self {
        Self {
            active: ActiveChartState { id: initial },
            generation: 0,
        }
    }

    /// The currently selected chart.
    pub(crate) fn active(&self) -> ChartId {
        self.active.id
    }

    /// Selects a chart and starts a new render generation.
    pub(crate) fn select(&mut self, id: ChartId) -> u64 {
        self.active.id = id;
        self.generation += 1;
        self.generation
    }

    /// Starts a new render generation for the current chart (resize path).
    pub(crate) fn reinvoke(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Whether `generation` is still the latest render invocation.
    pub(crate) fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

/// Debounces resize notifications: repeated notifications within the quiet
/// window keep pushing the deadline out; only the last one fires.
#[derive(Debug, Default)]
pub(crate) struct Debouncer {
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Records a notification at `now`, restarting the quiet window.
    pub(crate) fn notify(&mut self, now: Instant, window: Duration) {
        self.deadline = Some(now + window);
    }

    /// The pending deadline, if a notification is waiting.
    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fires if the quiet window has elapsed, clearing the pending state.
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_of_notifications_fires_exactly_once() {
        let window = Duration::from_millis(150);
        let t0 = Instant::now();
        let mut debouncer = Debouncer::default();

        // Three notifications inside one quiet window.
        debouncer.notify(t0, window);
        debouncer.notify(t0 + Duration::from_millis(50), window);
        debouncer.notify(t0 + Duration::from_millis(100), window);

        assert!(!debouncer.fire(t0 + Duration::from_millis(200)));
        assert!(debouncer.fire(t0 + Duration::from_millis(251)));
        assert!(!debouncer.fire(t0 + Duration::from_millis(300)), "already fired");
    }

    #[test]
    fn debounce_uses_the_chart_active_at_expiry() {
        let t0 = Instant::now();
        let mut dispatcher = Dispatcher::new(ChartId::Heatmap);
        let mut debouncer = Debouncer::default();

        debouncer.notify(t0, dispatcher.active().debounce_window());
        // The user switches charts while the resize is pending.
        dispatcher.select(ChartId::Bar);

        assert!(debouncer.fire(t0 + Duration::from_millis(151)));
        assert_eq!(dispatcher.active(), ChartId::Bar);
    }

    #[test]
    fn stale_generations_are_not_current() {
        let mut dispatcher = Dispatcher::new(ChartId::Bar);
        let heatmap_render = dispatcher.select(ChartId::Heatmap);
        let bar_render = dispatcher.select(ChartId::Bar);

        assert!(!dispatcher.is_current(heatmap_render));
        assert!(dispatcher.is_current(bar_render));

        let resize_render = dispatcher.reinvoke();
        assert!(!dispatcher.is_current(bar_render));
        assert!(dispatcher.is_current(resize_render));
        assert_eq!(dispatcher.active(), ChartId::Bar);
    }

    #[test]
    fn scatter_uses_the_shorter_window() {
        assert_eq!(ChartId::Scatter.debounce_window(), Duration::from_millis(100));
        assert_eq!(ChartId::Bar.debounce_window(), Duration::from_millis(150));
    }

    #[test]
    fn selection_order_cycles() {
        assert_eq!(ChartId::Bar.next(), ChartId::Scatter);
        assert_eq!(ChartId::Treemap.next(), ChartId::Bar);
        assert_eq!(ChartId::Bar.prev(), ChartId::Treemap);
        assert_eq!(ChartId::parse("heatmap"), Some(ChartId::Heatmap));
        assert_eq!(ChartId::parse("pie"), None);
    }
}
