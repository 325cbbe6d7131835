// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON serialization for face collections.
//!
//! Dense matrices use `{"columns": n, "rows": [[...], ...]}`. The column count
//! is stored explicitly so that a collection with no faces keeps its vertex
//! set. Sparse collections serialize their fields directly as
//! `{"vertex_count": n, "faces": [[...], ...]}`.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matrix::FaceMatrix;
use crate::sparse::SparseFaces;

/// Serializable representation of a dense face matrix.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatrixSnapshot {
    pub columns: usize,
    pub rows: Vec<Vec<f64>>,
}

impl FaceMatrix {
    /// Serializes the matrix to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_snapshot())?)
    }

    /// Serializes the matrix to a single-line JSON string.
    pub fn to_json_compact(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_snapshot())?)
    }

    /// Parses a matrix from JSON. Every row must have `columns` entries.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: MatrixSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(&snapshot)
    }

    /// Creates a serializable snapshot of the matrix.
    pub fn to_snapshot(&self) -> MatrixSnapshot {
        MatrixSnapshot {
            columns: self.cols(),
            rows: self.to_rows(),
        }
    }

    /// Rebuilds a matrix from a snapshot.
    pub fn from_snapshot(snapshot: &MatrixSnapshot) -> Result<Self> {
        Self::from_rows_with_cols(snapshot.columns, &snapshot.rows)
    }
}

impl SparseFaces {
    /// Serializes the collection to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes the collection to a single-line JSON string.
    pub fn to_json_compact(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a collection from JSON, checking every vertex index.
    pub fn from_json(json: &str) -> Result<Self> {
        let faces: SparseFaces = serde_json::from_str(json)?;
        faces.validate()?;
        Ok(faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn dense_json_shape() {
        let m = FaceMatrix::from_rows(&[[1.0, 0.0], [0.0, 1.0]]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&m.to_json().unwrap()).unwrap();
        assert_eq!(value["columns"], 2);
        assert_eq!(value["rows"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn integer_entries_are_accepted() {
        let m = FaceMatrix::from_json(r#"{"columns": 3, "rows": [[1, 1, 0], [0, 1, 1]]}"#).unwrap();
        assert_eq!(m.row(0), &[1.0, 1.0, 0.0]);
        assert_eq!(m.row(1), &[0.0, 1.0, 1.0]);
    }

    #[test]
    fn zero_rows_keep_columns() {
        let json = FaceMatrix::empty(5).to_json_compact().unwrap();
        let back = FaceMatrix::from_json(&json).unwrap();
        assert!(back.is_empty());
        assert_eq!(back.cols(), 5);
    }

    #[test]
    fn ragged_json_is_rejected() {
        let err = FaceMatrix::from_json(r#"{"columns": 2, "rows": [[1, 0], [1]]}"#).unwrap_err();
        assert_eq!(
            err,
            Error::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn huge_column_count_is_a_ragged_row() {
        let err = FaceMatrix::from_json(r#"{"columns": 18446744073709551615, "rows": [[1]]}"#)
            .unwrap_err();
        assert_eq!(
            err,
            Error::RaggedRow {
                row: 0,
                expected: usize::MAX,
                found: 1
            }
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn huge_vertex_count_is_too_large() {
        let faces = SparseFaces::from_json(
            r#"{"vertex_count": 18446744073709551615, "faces": [[0], [1]]}"#,
        )
        .unwrap();
        assert!(matches!(faces.to_dense(), Err(Error::TooLarge { .. })));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = FaceMatrix::from_json(r#"{"rows": []}"#).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn sparse_json_is_validated() {
        let faces = SparseFaces::from_json(r#"{"vertex_count": 3, "faces": [[0, 1], [2]]}"#).unwrap();
        assert_eq!(faces.len(), 2);

        let err = SparseFaces::from_json(r#"{"vertex_count": 2, "faces": [[0, 2]]}"#).unwrap_err();
        assert!(matches!(err, Error::VertexOutOfRange { vertex: 2, .. }));
    }
}
