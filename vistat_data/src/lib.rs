// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dataset loading and validation for vistat.
//!
//! Charts consume plain record types defined by `vistat_charts`; this crate
//! owns how those records come to exist:
//! - CSV resources are parsed with column-wise **type inference** (numbers
//!   and empty-as-null, everything else stays text),
//! - JSON resources are deserialized with `serde`,
//! - GeoJSON feature collections are decoded into polygon rings,
//! - each loader applies its chart's filtering/validation/sort rules.
//!
//! A loader either returns a complete, valid dataset or a [`DataError`],
//! never partial data.

mod datasets;
mod error;
mod geojson;
mod table;
mod value;

pub use datasets::{
    load_age_structure, load_city_populations, load_density_points, load_migration_cells,
    load_urbanization_lookup,
};
pub use error::DataError;
pub use geojson::load_world_atlas;
pub use table::Table;
pub use value::Value;
