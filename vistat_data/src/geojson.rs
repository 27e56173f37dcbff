// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GeoJSON feature-collection decoding.
//!
//! Only the subset the world map needs: `Polygon` and `MultiPolygon`
//! geometries, plus the `iso_a3`/`name` properties. Features with other
//! geometry types are skipped; features without a code keep an empty code
//! (which can never match the metric lookup, so they render the neutral
//! fill).

use std::fs;
use std::path::Path;

use serde::Deserialize;
use vistat_charts::RegionShape;

use crate::error::DataError;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Properties,
    geometry: Geometry,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    #[serde(default)]
    iso_a3: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    ty: String,
    coordinates: serde_json::Value,
}

/// Loads a GeoJSON world atlas into region shapes.
pub fn load_world_atlas(path: &Path) -> Result<Vec<RegionShape>, DataError> {
    let text = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
    let collection: FeatureCollection = serde_json::from_str(&text)?;

    let mut regions = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        let rings = match feature.geometry.ty.as_str() {
            "Polygon" => polygon_rings(&feature.geometry.coordinates)?,
            "MultiPolygon" => {
                let polygons = feature
                    .geometry
                    .coordinates
                    .as_array()
                    .ok_or_else(|| bad_geometry("MultiPolygon"))?;
                let mut rings = Vec::new();
                for polygon in polygons {
                    rings.extend(polygon_rings(polygon)?);
                }
                rings
            }
            _ => continue,
        };

        let code = feature.properties.iso_a3.unwrap_or_default();
        let name = feature
            .properties
            .name
            .unwrap_or_else(|| if code.is_empty() { "Unknown".to_string() } else { code.clone() });

        regions.push(RegionShape { code, name, rings });
    }
    Ok(regions)
}

fn polygon_rings(coordinates: &serde_json::Value) -> Result<Vec<Vec<(f64, f64)>>, DataError> {
    let rings = coordinates
        .as_array()
        .ok_or_else(|| bad_geometry("Polygon"))?;

    let mut out = Vec::with_capacity(rings.len());
    for ring in rings {
        let points = ring.as_array().ok_or_else(|| bad_geometry("ring"))?;
        let mut ring_out = Vec::with_capacity(points.len());
        for point in points {
            let pair = point.as_array().ok_or_else(|| bad_geometry("position"))?;
            let lon = pair.first().and_then(serde_json::Value::as_f64);
            let lat = pair.get(1).and_then(serde_json::Value::as_f64);
            match (lon, lat) {
                (Some(lon), Some(lat)) => ring_out.push((lon, lat)),
                _ => return Err(bad_geometry("position")),
            }
        }
        out.push(ring_out);
    }
    Ok(out)
}

fn bad_geometry(what: &str) -> DataError {
    DataError::InvalidFormat(format!("malformed GeoJSON {what}"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_fixture(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(json.as_bytes()).expect("write fixture");
        file
    }

    #[test]
    fn polygons_and_multipolygons_decode_to_rings() {
        let file = write_fixture(
            r#"{
              "type": "FeatureCollection",
              "features": [
                {
                  "type": "Feature",
                  "properties": {"iso_a3": "ESP", "name": "Spain"},
                  "geometry": {"type": "Polygon", "coordinates": [[[ -9.0, 36.0 ], [ 3.0, 36.0 ], [ 3.0, 43.0 ], [ -9.0, 43.0 ], [ -9.0, 36.0 ]]]}
                },
                {
                  "type": "Feature",
                  "properties": {"iso_a3": "NZL", "name": "New Zealand"},
                  "geometry": {"type": "MultiPolygon", "coordinates": [
                    [[[166.0, -46.0], [174.0, -46.0], [174.0, -40.0], [166.0, -46.0]]],
                    [[[172.0, -41.0], [178.0, -41.0], [178.0, -34.0], [172.0, -41.0]]]
                  ]}
                }
              ]
            }"#,
        );
        let regions = load_world_atlas(file.path()).expect("load");
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].code, "ESP");
        assert_eq!(regions[0].rings.len(), 1);
        assert_eq!(regions[1].rings.len(), 2, "one ring per island");
    }

    #[test]
    fn missing_code_yields_empty_code_not_an_error() {
        let file = write_fixture(
            r#"{
              "type": "FeatureCollection",
              "features": [
                {
                  "type": "Feature",
                  "properties": {"name": "Somewhere"},
                  "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}
                }
              ]
            }"#,
        );
        let regions = load_world_atlas(file.path()).expect("load");
        assert_eq!(regions[0].code, "");
        assert_eq!(regions[0].name, "Somewhere");
    }

    #[test]
    fn unsupported_geometries_are_skipped() {
        let file = write_fixture(
            r#"{
              "type": "FeatureCollection",
              "features": [
                {
                  "type": "Feature",
                  "properties": {"iso_a3": "PNT", "name": "Point"},
                  "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}
                }
              ]
            }"#,
        );
        let regions = load_world_atlas(file.path()).expect("load");
        assert!(regions.is_empty());
    }

    #[test]
    fn malformed_coordinates_fail_loudly() {
        let file = write_fixture(
            r#"{
              "type": "FeatureCollection",
              "features": [
                {
                  "type": "Feature",
                  "properties": {"iso_a3": "BAD", "name": "Bad"},
                  "geometry": {"type": "Polygon", "coordinates": [[["x", 1.0]]]}
                }
              ]
            }"#,
        );
        let err = load_world_atlas(file.path()).expect_err("must fail");
        assert!(matches!(err, DataError::InvalidFormat(_)));
    }
}
