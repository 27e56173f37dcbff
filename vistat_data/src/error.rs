// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The error taxonomy for dataset loading.

use std::path::PathBuf;

use thiserror::Error;

/// Why a dataset failed to load.
///
/// `Io`/`Csv`/`Json` are load errors (the resource could not be fetched or
/// parsed); `MissingColumn`/`InvalidFormat` are validation errors (the
/// resource parsed, but its shape is wrong for the chart it feeds).
#[derive(Debug, Error)]
pub enum DataError {
    /// The resource could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The resource that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The resource is not well-formed CSV.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The resource is not well-formed JSON.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A required tabular column is absent.
    #[error("missing column `{0}`")]
    MissingColumn(String),

    /// The parsed data fails a chart's shape check.
    #[error("{0}")]
    InvalidFormat(String),
}

impl DataError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
