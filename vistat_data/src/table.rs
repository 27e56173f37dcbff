// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An owned tabular resource with inferred cell types.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::DataError;
use crate::value::Value;

/// A parsed tabular resource: named columns, rows of inferred [`Value`]s.
#[derive(Clone, Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Parses CSV from a reader, inferring cell types.
    pub fn from_csv_reader(reader: impl Read) -> Result<Self, DataError> {
        let mut csv = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in csv.records() {
            let record = record?;
            let mut row: Vec<Value> = record.iter().map(Value::infer).collect();
            // Ragged short rows pad with nulls so column access stays safe.
            row.resize(headers.len(), Value::Null);
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Reads and parses a CSV file.
    pub fn from_csv_path(path: &Path) -> Result<Self, DataError> {
        let file = File::open(path).map_err(|e| DataError::io(path, e))?;
        Self::from_csv_reader(file)
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of a named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of a named column, or `DataError::MissingColumn`.
    pub fn require_column(&self, name: &str) -> Result<usize, DataError> {
        self.column_index(name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    }

    /// Iterates rows as value slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_parses_with_inferred_types() {
        let csv = "city,population\nTokyo,37435191\nDelhi,29399141\nNoCount,\n";
        let table = Table::from_csv_reader(csv.as_bytes()).expect("parse");
        assert_eq!(table.headers(), ["city", "population"]);
        assert_eq!(table.row_count(), 3);

        let pop = table.require_column("population").expect("column");
        let rows: Vec<&[Value]> = table.rows().collect();
        assert_eq!(rows[0][pop].as_f64(), Some(37_435_191.0));
        assert!(rows[2][pop].is_null());
    }

    #[test]
    fn missing_columns_are_reported_by_name() {
        let table = Table::from_csv_reader("a,b\n1,2\n".as_bytes()).expect("parse");
        let err = table.require_column("flows").expect_err("must be missing");
        assert!(matches!(err, DataError::MissingColumn(name) if name == "flows"));
    }

    #[test]
    fn short_rows_pad_with_nulls() {
        let table = Table::from_csv_reader("a,b,c\n1,2\n".as_bytes()).expect("parse");
        let rows: Vec<&[Value]> = table.rows().collect();
        assert_eq!(rows[0].len(), 3);
        assert!(rows[0][2].is_null());
    }
}
