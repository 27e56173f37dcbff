// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-chart dataset loaders.
//!
//! Each loader reads one static resource, applies that chart's
//! filtering/validation rules, and returns chart-ready records. On any
//! failure the loader returns an error and no records; callers never see
//! partial data.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use vistat_charts::{AgeShare, CityBar, DensityPoint, FlowCell};

use crate::error::DataError;
use crate::table::Table;

/// Loads the bar chart's city populations.
///
/// Rows with an empty city or a non-numeric population are discarded; the
/// survivors are sorted descending by population.
pub fn load_city_populations(path: &Path) -> Result<Vec<CityBar>, DataError> {
    let table = Table::from_csv_path(path)?;
    let city = table.require_column("city")?;
    let population = table.require_column("population")?;

    let mut bars: Vec<CityBar> = table
        .rows()
        .filter_map(|row| {
            let city = row[city].as_str()?;
            let population = row[population].as_f64()?;
            Some(CityBar {
                city: city.to_string(),
                population,
            })
        })
        .collect();

    bars.sort_by(|a, b| {
        b.population
            .partial_cmp(&a.population)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(bars)
}

#[derive(Debug, Deserialize)]
struct RawDensityPoint {
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    urban_percent: Option<f64>,
    #[serde(default)]
    density: Option<f64>,
}

/// Loads the scatterplot's density records.
///
/// Every record must carry `country`, `urban_percent`, and `density`;
/// otherwise the whole load fails with `invalid data format` and the chart
/// renders zero points.
pub fn load_density_points(path: &Path) -> Result<Vec<DensityPoint>, DataError> {
    let text = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
    let raw: Vec<RawDensityPoint> = serde_json::from_str(&text)?;

    raw.into_iter()
        .map(|r| match (r.country, r.urban_percent, r.density) {
            (Some(country), Some(urban_percent), Some(density)) => Ok(DensityPoint {
                country,
                urban_percent,
                density,
            }),
            _ => Err(DataError::InvalidFormat("invalid data format".to_string())),
        })
        .collect()
}

/// Loads the heatmap's migration cells.
///
/// Rows need a numeric year, a month in `1..=12`, and numeric flows; rows
/// failing any of these are discarded.
pub fn load_migration_cells(path: &Path) -> Result<Vec<FlowCell>, DataError> {
    let table = Table::from_csv_path(path)?;
    let year = table.require_column("year")?;
    let month = table.require_column("month")?;
    let flows = table.require_column("flows")?;

    Ok(table
        .rows()
        .filter_map(|row| {
            let year = row[year].as_f64()?;
            let month = row[month].as_f64()?;
            let flows = row[flows].as_f64()?;
            if !(1.0..=12.0).contains(&month) {
                return None;
            }
            #[allow(
                clippy::cast_possible_truncation,
                reason = "year/month are validated small integers"
            )]
            Some(FlowCell {
                year: year as i32,
                month: month as u32,
                flows,
            })
        })
        .collect())
}

#[derive(Debug, Deserialize)]
struct RawUrbanization {
    code: String,
    urban_percent: f64,
}

/// Loads the choropleth's urbanization lookup, keyed by ISO alpha-3 code.
pub fn load_urbanization_lookup(path: &Path) -> Result<BTreeMap<String, f64>, DataError> {
    let text = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
    let raw: Vec<RawUrbanization> = serde_json::from_str(&text)?;
    Ok(raw
        .into_iter()
        .map(|r| (r.code, r.urban_percent))
        .collect())
}

#[derive(Debug, Deserialize)]
struct RawAgeShare {
    region: String,
    group: String,
    value: f64,
}

/// Loads the treemap's age-structure records.
pub fn load_age_structure(path: &Path) -> Result<Vec<AgeShare>, DataError> {
    let text = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
    let raw: Vec<RawAgeShare> = serde_json::from_str(&text)?;
    Ok(raw
        .into_iter()
        .map(|r| AgeShare {
            region: r.region,
            group: r.group,
            value: r.value,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write fixture");
        file
    }

    #[test]
    fn city_rows_filter_invalid_and_sort_descending() {
        let file = write_fixture(
            "city,population\n\
             Delhi,29399141\n\
             ,12000000\n\
             Tokyo,37435191\n\
             Lagos,not-a-number\n\
             Shanghai,26317104\n",
        );
        let bars = load_city_populations(file.path()).expect("load");
        let cities: Vec<&str> = bars.iter().map(|b| b.city.as_str()).collect();
        assert_eq!(cities, ["Tokyo", "Delhi", "Shanghai"]);
        assert!(bars.windows(2).all(|w| w[0].population >= w[1].population));
    }

    #[test]
    fn density_records_require_all_three_fields() {
        let good = write_fixture(
            r#"[{"country": "Japan", "urban_percent": 91.8, "density": 347.0}]"#,
        );
        let points = load_density_points(good.path()).expect("load");
        assert_eq!(points.len(), 1);

        let missing = write_fixture(
            r#"[{"country": "Japan", "urban_percent": 91.8, "density": 347.0},
                {"country": "Iceland", "urban_percent": 93.9}]"#,
        );
        let err = load_density_points(missing.path()).expect_err("must fail");
        assert!(matches!(err, DataError::InvalidFormat(msg) if msg == "invalid data format"));
    }

    #[test]
    fn density_load_fails_on_non_array_json() {
        let file = write_fixture(r#"{"country": "Japan"}"#);
        let err = load_density_points(file.path()).expect_err("must fail");
        assert!(matches!(err, DataError::Json(_)));
    }

    #[test]
    fn migration_rows_validate_month_range() {
        let file = write_fixture(
            "year,month,flows\n\
             2019,1,3200\n\
             2019,13,99\n\
             2019,0,99\n\
             2020,12,4100\n",
        );
        let cells = load_migration_cells(file.path()).expect("load");
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].month, 1);
        assert_eq!(cells[1].month, 12);
    }

    #[test]
    fn urbanization_lookup_is_keyed_by_code() {
        let file = write_fixture(
            r#"[{"code": "JPN", "urban_percent": 91.8}, {"code": "NER", "urban_percent": 16.8}]"#,
        );
        let lookup = load_urbanization_lookup(file.path()).expect("load");
        assert_eq!(lookup.get("JPN"), Some(&91.8));
        assert_eq!(lookup.get("XXX"), None);
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = load_city_populations(Path::new("/nonexistent/cities.csv"))
            .expect_err("must fail");
        assert!(matches!(err, DataError::Io { .. }));
        assert!(err.to_string().contains("cities.csv"));
    }

    #[test]
    fn age_structure_loads_verbatim() {
        let file = write_fixture(
            r#"[{"region": "Asia", "group": "0-14", "value": 23.5}]"#,
        );
        let shares = load_age_structure(file.path()).expect("load");
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].region, "Asia");
        assert_eq!(shares[0].value, 23.5);
    }
}
