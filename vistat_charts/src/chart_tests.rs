// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Brush;
use vistat_core::{Mark, MarkPayload};

use crate::{
    AgeShare, BarChartSpec, ChoroplethChartSpec, CityBar, DensityPoint, FlowCell,
    HeatmapChartSpec, HeuristicTextMeasurer, RegionShape, ScatterChartSpec, SequentialScale, Size,
    TreemapChartSpec, BLUES, NEUTRAL_FILL,
};

const VIEW: Size = Size::new(900.0, 500.0);

/// Series elements are exactly the marks carrying hover metadata; guides
/// (axes, titles, legends, labels) never do.
fn series_marks(marks: &[Mark]) -> Vec<&Mark> {
    marks.iter().filter(|m| m.hover.is_some()).collect()
}

fn solid_rgb(brush: &Brush) -> (u8, u8, u8) {
    match brush {
        Brush::Solid(c) => {
            let c = c.to_rgba8();
            (c.r, c.g, c.b)
        }
        other => panic!("expected a solid brush, got {other:?}"),
    }
}

fn mark_fill(mark: &Mark) -> (u8, u8, u8) {
    match &mark.payload {
        MarkPayload::Rect(r) => solid_rgb(&r.fill),
        MarkPayload::Path(p) => solid_rgb(&p.fill),
        MarkPayload::Text(t) => solid_rgb(&t.fill),
    }
}

fn bars() -> Vec<CityBar> {
    vec![
        CityBar {
            city: "Delhi".to_string(),
            population: 32_900_000.0,
        },
        CityBar {
            city: "Tokyo".to_string(),
            population: 37_200_000.0,
        },
        CityBar {
            city: "Shanghai".to_string(),
            population: 29_900_000.0,
        },
    ]
}

#[test]
fn bar_chart_has_one_element_per_record() {
    let spec = BarChartSpec::new(bars(), peniko::color::palette::css::STEEL_BLUE, peniko::color::palette::css::TOMATO);
    let scene = spec.build(VIEW, &HeuristicTextMeasurer);
    assert_eq!(series_marks(&scene.marks).len(), 3);
}

#[test]
fn bar_chart_orders_descending_along_the_category_axis() {
    let spec = BarChartSpec::new(bars(), peniko::color::palette::css::STEEL_BLUE, peniko::color::palette::css::TOMATO);
    let scene = spec.build(VIEW, &HeuristicTextMeasurer);

    let mut bars: Vec<Rect> = series_marks(&scene.marks)
        .iter()
        .map(|m| match &m.payload {
            MarkPayload::Rect(r) => r.rect,
            other => panic!("bars must be rects, got {other:?}"),
        })
        .collect();
    bars.sort_by(|a, b| a.x0.partial_cmp(&b.x0).expect("finite x"));

    // All bars share the baseline, so height is proportional to value:
    // left-to-right heights must be strictly descending.
    for pair in bars.windows(2) {
        assert!(
            pair[0].height() > pair[1].height(),
            "bar order is not descending: {pair:?}"
        );
    }
}

#[test]
fn bar_chart_axis_order_matches_sorted_values() {
    let spec = BarChartSpec::new(bars(), peniko::color::palette::css::STEEL_BLUE, peniko::color::palette::css::TOMATO);
    let scene = spec.build(VIEW, &HeuristicTextMeasurer);

    // The biggest city must hold the leftmost hover title.
    let mut series: Vec<&Mark> = series_marks(&scene.marks);
    series.sort_by(|a, b| {
        let ax = a.payload.bounds().expect("rect").x0;
        let bx = b.payload.bounds().expect("rect").x0;
        ax.partial_cmp(&bx).expect("finite x")
    });
    let titles: Vec<&str> = series
        .iter()
        .map(|m| m.hover.as_ref().expect("series mark").title.as_str())
        .collect();
    assert_eq!(titles, vec!["Tokyo", "Delhi", "Shanghai"]);
}

#[test]
fn scatter_chart_has_one_point_per_record_and_band_colors() {
    let points = vec![
        DensityPoint {
            country: "Australia".to_string(),
            urban_percent: 86.0,
            density: 3.0,
        },
        DensityPoint {
            country: "Netherlands".to_string(),
            urban_percent: 93.0,
            density: 520.0,
        },
        DensityPoint {
            country: "Singapore".to_string(),
            urban_percent: 100.0,
            density: 8_000.0,
        },
    ];
    let scene = ScatterChartSpec::new(points).build(VIEW, &HeuristicTextMeasurer);
    let series = series_marks(&scene.marks);
    assert_eq!(series.len(), 3);

    // Band colors: ≤50 blue, 501–2000 high-orange is skipped here, >2000 red.
    let australia = series
        .iter()
        .find(|m| m.hover.as_ref().expect("hover").title == "Australia")
        .expect("missing point");
    assert_eq!(mark_fill(australia), (0x00, 0x7b, 0xff));

    let singapore = series
        .iter()
        .find(|m| m.hover.as_ref().expect("hover").title == "Singapore")
        .expect("missing point");
    assert_eq!(mark_fill(singapore), (0xdc, 0x35, 0x45));
}

#[test]
fn scatter_chart_renders_zero_points_for_empty_input() {
    let scene = ScatterChartSpec::new(Vec::new()).build(VIEW, &HeuristicTextMeasurer);
    assert_eq!(series_marks(&scene.marks).len(), 0);
}

#[test]
fn heatmap_cell_count_and_color_follow_the_data() {
    let cells = vec![
        FlowCell {
            year: 2019,
            month: 1,
            flows: 100.0,
        },
        FlowCell {
            year: 2019,
            month: 2,
            flows: 400.0,
        },
        FlowCell {
            year: 2020,
            month: 1,
            flows: 0.0,
        },
        // Out-of-range month is not a cell.
        FlowCell {
            year: 2020,
            month: 13,
            flows: 50.0,
        },
    ];
    let scene = HeatmapChartSpec::new(cells).build(VIEW, &HeuristicTextMeasurer);
    let series = series_marks(&scene.marks);
    assert_eq!(series.len(), 3);

    // Cell fills are the sequential scale of flows over [0, max].
    let expected = SequentialScale::new((0.0, 400.0), crate::YL_OR_RD);
    let top = series
        .iter()
        .find(|m| m.hover.as_ref().expect("hover").title == "February 2019")
        .expect("missing cell");
    let want = expected.color(400.0).to_rgba8();
    assert_eq!(mark_fill(top), (want.r, want.g, want.b));
}

fn square_ring(lon: f64, lat: f64) -> Vec<Vec<(f64, f64)>> {
    vec![vec![
        (lon, lat),
        (lon + 10.0, lat),
        (lon + 10.0, lat + 10.0),
        (lon, lat + 10.0),
        (lon, lat),
    ]]
}

#[test]
fn choropleth_fills_by_lookup_with_neutral_fallback() {
    let regions = vec![
        RegionShape {
            code: "USA".to_string(),
            name: "United States".to_string(),
            rings: square_ring(-100.0, 35.0),
        },
        RegionShape {
            code: "MEX".to_string(),
            name: "Mexico".to_string(),
            rings: square_ring(-105.0, 20.0),
        },
    ];
    let mut metrics = BTreeMap::new();
    metrics.insert("USA".to_string(), 83.0);

    let scene = ChoroplethChartSpec::new(regions, metrics).build(VIEW, &HeuristicTextMeasurer);
    let series = series_marks(&scene.marks);
    assert_eq!(series.len(), 2);

    let usa = series
        .iter()
        .find(|m| m.hover.as_ref().expect("hover").title == "United States")
        .expect("missing region");
    let want = SequentialScale::new((0.0, 100.0), BLUES).color(83.0).to_rgba8();
    assert_eq!(mark_fill(usa), (want.r, want.g, want.b));

    let mexico = series
        .iter()
        .find(|m| m.hover.as_ref().expect("hover").title == "Mexico")
        .expect("missing region");
    let neutral = NEUTRAL_FILL.to_rgba8();
    assert_eq!(mark_fill(mexico), (neutral.r, neutral.g, neutral.b));

    let na = mexico.hover.as_ref().expect("hover");
    assert!(na.lines.iter().any(|l| l.contains("N/A")));
}

#[test]
fn treemap_region_areas_match_their_value_share() {
    let shares = vec![
        AgeShare {
            region: "Asia".to_string(),
            group: "0-14".to_string(),
            value: 24.0,
        },
        AgeShare {
            region: "Asia".to_string(),
            group: "15-64".to_string(),
            value: 66.0,
        },
        AgeShare {
            region: "Europe".to_string(),
            group: "0-14".to_string(),
            value: 16.0,
        },
        AgeShare {
            region: "Europe".to_string(),
            group: "15-64".to_string(),
            value: 64.0,
        },
    ];
    let totals: BTreeMap<&str, f64> =
        BTreeMap::from([("Asia", 90.0), ("Europe", 80.0)]);
    let grand_total = 170.0;

    let scene = TreemapChartSpec::new(shares).build(VIEW, &HeuristicTextMeasurer);
    let series = series_marks(&scene.marks);
    assert_eq!(series.len(), 4);

    // Group leaf areas by region (the hover title).
    let mut area_by_region: BTreeMap<String, f64> = BTreeMap::new();
    let mut total_area = 0.0;
    for mark in &series {
        let rect = mark.payload.bounds().expect("leaf rect");
        let region = mark.hover.as_ref().expect("hover").title.clone();
        *area_by_region.entry(region).or_insert(0.0) += rect.area();
        total_area += rect.area();
    }

    for (region, value) in totals {
        let share = area_by_region.get(region).expect("region present") / total_area;
        let want = value / grand_total;
        assert!(
            (share - want).abs() < 0.02,
            "region {region}: area share {share} != value share {want}"
        );
    }
}

#[test]
fn treemap_keeps_the_first_value_of_duplicate_groups() {
    let shares = vec![
        AgeShare {
            region: "Asia".to_string(),
            group: "0-14".to_string(),
            value: 24.0,
        },
        AgeShare {
            region: "Asia".to_string(),
            group: "0-14".to_string(),
            value: 99.0,
        },
    ];
    let scene = TreemapChartSpec::new(shares).build(VIEW, &HeuristicTextMeasurer);
    let series = series_marks(&scene.marks);
    assert_eq!(series.len(), 1);
    let hover = series[0].hover.as_ref().expect("hover");
    assert!(hover.lines.iter().any(|l| l.contains("24")));
}
