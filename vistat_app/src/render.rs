// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-chart render pipeline: load a dataset, build a mark scene.
//!
//! Loading runs on a worker thread (the only asynchronous step in a render
//! invocation); scene building is synchronous on the event-loop thread.
//! Load failures become a single red inline error mark; no partial chart
//! ever renders.

use std::path::Path;

use kurbo::Point;
use peniko::Color;
use peniko::color::palette::css;
use vistat_charts::{
    AgeShare, BarChartSpec, ChartScene, ChoroplethChartSpec, CityBar, DensityPoint, FlowCell,
    HeatmapChartSpec, RegionShape, ScatterChartSpec, Size, TITLES, TextMarkSpec, TextMeasurer,
    TreemapChartSpec,
};
use vistat_core::{Mark, MarkId, TextAnchor};
use vistat_data::DataError;

use crate::dispatch::ChartId;

const ID_ERROR: u64 = 0xE000;
const ID_PLACEHOLDER: u64 = 0xE100;

const FILE_CITIES: &str = "megacities_population.csv";
const FILE_DENSITY: &str = "density_vs_urbanization.json";
const FILE_MIGRATION: &str = "migration_months.csv";
const FILE_URBANIZATION: &str = "urbanization_by_country.json";
const FILE_WORLD: &str = "world.geojson";
const FILE_AGE_STRUCTURE: &str = "population_age_structure.json";

/// A chart's loaded dataset, ready for synchronous scene building.
#[derive(Debug)]
pub(crate) enum LoadedData {
    /// Bar chart records.
    Bar(Vec<CityBar>),
    /// Scatter records.
    Scatter(Vec<DensityPoint>),
    /// Heatmap cells.
    Heatmap(Vec<FlowCell>),
    /// Country shapes plus the urbanization lookup.
    Choropleth {
        /// Country geometry.
        regions: Vec<RegionShape>,
        /// Urbanization percent by country code.
        metrics: std::collections::BTreeMap<String, f64>,
    },
    /// Treemap records.
    Treemap(Vec<AgeShare>),
}

/// Loads the dataset(s) for one chart. Runs on a worker thread.
pub(crate) fn load_chart_data(id: ChartId, data_dir: &Path) -> Result<LoadedData, DataError> {
    match id {
        ChartId::Bar => Ok(LoadedData::Bar(vistat_data::load_city_populations(
            &data_dir.join(FILE_CITIES),
        )?)),
        ChartId::Scatter => Ok(LoadedData::Scatter(vistat_data::load_density_points(
            &data_dir.join(FILE_DENSITY),
        )?)),
        ChartId::Heatmap => Ok(LoadedData::Heatmap(vistat_data::load_migration_cells(
            &data_dir.join(FILE_MIGRATION),
        )?)),
        ChartId::Choropleth => {
            let regions = vistat_data::load_world_atlas(&data_dir.join(FILE_WORLD))?;
            let metrics =
                vistat_data::load_urbanization_lookup(&data_dir.join(FILE_URBANIZATION))?;
            Ok(LoadedData::Choropleth { regions, metrics })
        }
        ChartId::Treemap => Ok(LoadedData::Treemap(vistat_data::load_age_structure(
            &data_dir.join(FILE_AGE_STRUCTURE),
        )?)),
    }
}

/// The externally-configured colors the bar chart consumes.
#[derive(Clone, Copy, Debug)]
pub(crate) struct StyleTokens {
    /// Bar fill.
    pub(crate) bar_color: Color,
    /// Bar fill while hovered.
    pub(crate) bar_hover: Color,
}

/// Builds the mark scene for loaded data at the current surface size.
pub(crate) fn build_chart_scene(
    data: &LoadedData,
    view: Size,
    tokens: StyleTokens,
    measurer: &dyn TextMeasurer,
) -> ChartScene {
    match data {
        LoadedData::Bar(bars) => {
            BarChartSpec::new(bars.clone(), tokens.bar_color, tokens.bar_hover)
                .build(view, measurer)
        }
        LoadedData::Scatter(points) => ScatterChartSpec::new(points.clone()).build(view, measurer),
        LoadedData::Heatmap(cells) => HeatmapChartSpec::new(cells.clone()).build(view, measurer),
        LoadedData::Choropleth { regions, metrics } => {
            ChoroplethChartSpec::new(regions.clone(), metrics.clone()).build(view, measurer)
        }
        LoadedData::Treemap(shares) => TreemapChartSpec::new(shares.clone()).build(view, measurer),
    }
}

/// The single red inline error mark shown when a load or validation fails.
pub(crate) fn error_marks(message: &str) -> Vec<Mark> {
    vec![
        TextMarkSpec::new(
            MarkId::from_raw(ID_ERROR),
            Point::new(20.0, 40.0),
            format!("Error loading data: {message}"),
        )
        .with_font_size(14.0)
        .with_fill(css::RED)
        .with_z_index(TITLES)
        .mark(),
    ]
}

/// The placeholder shown for an unknown chart identifier.
pub(crate) fn placeholder_marks(requested: &str, view: Size) -> Vec<Mark> {
    vec![
        TextMarkSpec::new(
            MarkId::from_raw(ID_PLACEHOLDER),
            Point::new(0.5 * view.width, 0.5 * view.height),
            format!("no such chart: {requested}"),
        )
        .with_font_size(16.0)
        .with_fill(css::DARK_GRAY)
        .with_anchor(TextAnchor::Middle)
        .with_z_index(TITLES)
        .mark(),
    ]
}

#[cfg(test)]
mod tests {
    use vistat_charts::HeuristicTextMeasurer;
    use vistat_core::MarkPayload;

    use super::*;

    #[test]
    fn error_marks_are_a_single_red_text() {
        let marks = error_marks("boom");
        assert_eq!(marks.len(), 1);
        match &marks[0].payload {
            MarkPayload::Text(t) => {
                assert!(t.text.contains("boom"));
                assert_eq!(t.pos, Point::new(20.0, 40.0));
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn scenes_build_for_every_loaded_variant() {
        let tokens = StyleTokens {
            bar_color: css::STEEL_BLUE,
            bar_hover: css::TOMATO,
        };
        let view = Size::new(800.0, 450.0);
        let measurer = HeuristicTextMeasurer;

        let bar = LoadedData::Bar(vec![CityBar {
            city: "Tokyo".to_string(),
            population: 37_435_191.0,
        }]);
        assert!(!build_chart_scene(&bar, view, tokens, &measurer).marks.is_empty());

        let treemap = LoadedData::Treemap(vec![AgeShare {
            region: "Asia".to_string(),
            group: "0-14".to_string(),
            value: 23.5,
        }]);
        assert!(
            !build_chart_scene(&treemap, view, tokens, &measurer)
                .marks
                .is_empty()
        );
    }
}
