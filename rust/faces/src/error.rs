// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for face collection operations.

/// Result type alias for face collection operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or filtering face collections.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The face and empty-face collections are defined over different vertex sets.
    #[error("faces have {faces} columns but empty faces have {empty_faces}")]
    ShapeMismatch { faces: usize, empty_faces: usize },

    /// A flat data buffer does not match the declared matrix shape.
    #[error("matrix data has {found} entries, expected {expected}")]
    DataLength { expected: usize, found: usize },

    /// The declared shape has more entries than can be addressed.
    #[error("matrix of {rows} x {cols} entries is too large")]
    TooLarge { rows: usize, cols: usize },

    /// A row has a different width than the rest of the collection.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A sparse face references a vertex outside the vertex set.
    #[error("face {face} references vertex {vertex}, but only {vertex_count} vertices exist")]
    VertexOutOfRange {
        face: usize,
        vertex: usize,
        vertex_count: usize,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
