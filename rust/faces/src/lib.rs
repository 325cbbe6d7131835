// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Helly-Lite Faces
//!
//! Face removal for Helly completions.
//!
//! A face is a subset of a fixed vertex set, stored as a row of a 0/1
//! incidence matrix. Given the faces of a complex and a collection of empty
//! faces over the same vertices, [`remove_faces`] drops every face that
//! contains at least one empty face and returns the rest in their original
//! order.
//!
//! ```
//! use helly_lite_faces::{remove_faces, FaceMatrix};
//!
//! let faces = FaceMatrix::from_rows(&[[1.0, 1.0, 1.0], [0.0, 1.0, 0.0]]).unwrap();
//! let empty = FaceMatrix::from_rows(&[[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]).unwrap();
//!
//! let kept = remove_faces(&faces, &empty).unwrap();
//! assert_eq!(kept.to_rows(), vec![vec![0.0, 1.0, 0.0]]);
//! ```
//!
//! Callers holding faces as vertex lists go through [`SparseFaces`] and
//! [`remove_sparse_faces`], which convert to dense form first.

pub mod error;
pub mod filter;
pub mod matrix;
pub mod serialization;
pub mod sparse;

pub use error::{Error, Result};
pub use filter::{
    contains_any, contains_face, par_remove_faces, par_remove_faces_with_report,
    par_retained_mask, remove_faces, remove_faces_with_report, retained_mask, FilterReport,
};
pub use matrix::FaceMatrix;
pub use serialization::MatrixSnapshot;
pub use sparse::{remove_sparse_faces, SparseFace, SparseFaces};
