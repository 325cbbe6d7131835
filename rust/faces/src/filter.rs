// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Removal of faces that contain an empty face.
//!
//! Given the faces of a complex and a collection of empty (forbidden) faces
//! over the same vertices, every face that is a superset of at least one empty
//! face is dropped. What remains, in its original order, is the face set of
//! the Helly completion.
//!
//! An entry counts as set only when it is exactly `1.0`. A face entry of `2.0`
//! does not cover an empty-face vertex, and an empty-face entry of `0.5`
//! places no constraint on the faces.
//!
//! The work is split into a membership decision per face
//! ([`retained_mask`] / [`par_retained_mask`]) and a stable compaction of
//! the kept rows. Decisions are independent, so only the decision phase is
//! parallelized.

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::matrix::FaceMatrix;

/// Counts describing one filter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    /// Number of faces passed in.
    pub input_faces: usize,
    /// Number of empty faces checked against.
    pub empty_faces: usize,
    /// Number of faces kept.
    pub retained: usize,
    /// Number of faces dropped.
    pub removed: usize,
}

#[inline]
fn is_set(value: f64) -> bool {
    value == 1.0
}

/// Returns `true` if every vertex set in `empty_face` is also set in `face`.
///
/// Stops at the first vertex of `empty_face` that `face` lacks.
#[inline]
pub fn contains_face(face: &[f64], empty_face: &[f64]) -> bool {
    debug_assert_eq!(face.len(), empty_face.len());
    face.iter()
        .zip(empty_face)
        .all(|(&f, &e)| !is_set(e) || is_set(f))
}

/// Returns `true` if `face` contains at least one row of `empty_faces`.
///
/// Stops at the first contained empty face. With no empty faces nothing is
/// contained.
#[inline]
pub fn contains_any(face: &[f64], empty_faces: &FaceMatrix) -> bool {
    empty_faces
        .iter_rows()
        .any(|empty_face| contains_face(face, empty_face))
}

fn check_shape(faces: &FaceMatrix, empty_faces: &FaceMatrix) -> Result<()> {
    if faces.cols() != empty_faces.cols() {
        return Err(Error::ShapeMismatch {
            faces: faces.cols(),
            empty_faces: empty_faces.cols(),
        });
    }
    Ok(())
}

/// Decides, for each face in order, whether it survives the filter.
pub fn retained_mask(faces: &FaceMatrix, empty_faces: &FaceMatrix) -> Result<Vec<bool>> {
    check_shape(faces, empty_faces)?;
    Ok(faces
        .iter_rows()
        .map(|face| !contains_any(face, empty_faces))
        .collect())
}

/// Parallel version of [`retained_mask`]. The mask is identical.
///
/// Falls back to sequential iteration on WASM, where no thread pool exists.
pub fn par_retained_mask(faces: &FaceMatrix, empty_faces: &FaceMatrix) -> Result<Vec<bool>> {
    check_shape(faces, empty_faces)?;

    #[cfg(not(target_arch = "wasm32"))]
    let mask = (0..faces.rows())
        .into_par_iter()
        .map(|i| !contains_any(faces.row(i), empty_faces))
        .collect();

    #[cfg(target_arch = "wasm32")]
    let mask = faces
        .iter_rows()
        .map(|face| !contains_any(face, empty_faces))
        .collect();

    Ok(mask)
}

/// Removes every face that contains an empty face.
///
/// The surviving faces keep their relative order and the result has the same
/// number of columns as the input, even when no face survives.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if the two matrices have different column
/// counts. Nothing is filtered in that case.
///
/// # Example
///
/// ```
/// use helly_lite_faces::{remove_faces, FaceMatrix};
///
/// let faces = FaceMatrix::from_rows(&[[1.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 1.0]]).unwrap();
/// let empty = FaceMatrix::from_rows(&[[1.0, 0.0, 0.0]]).unwrap();
///
/// let kept = remove_faces(&faces, &empty).unwrap();
/// assert_eq!(kept.to_rows(), vec![vec![0.0, 1.0, 1.0]]);
/// ```
pub fn remove_faces(faces: &FaceMatrix, empty_faces: &FaceMatrix) -> Result<FaceMatrix> {
    remove_faces_with_report(faces, empty_faces).map(|(kept, _)| kept)
}

/// Same as [`remove_faces`], also returning the run's counts.
pub fn remove_faces_with_report(
    faces: &FaceMatrix,
    empty_faces: &FaceMatrix,
) -> Result<(FaceMatrix, FilterReport)> {
    let mask = retained_mask(faces, empty_faces)?;
    Ok(finish(faces, empty_faces, &mask))
}

/// Same as [`remove_faces`], deciding membership in parallel.
pub fn par_remove_faces(faces: &FaceMatrix, empty_faces: &FaceMatrix) -> Result<FaceMatrix> {
    par_remove_faces_with_report(faces, empty_faces).map(|(kept, _)| kept)
}

/// Same as [`remove_faces_with_report`], deciding membership in parallel.
pub fn par_remove_faces_with_report(
    faces: &FaceMatrix,
    empty_faces: &FaceMatrix,
) -> Result<(FaceMatrix, FilterReport)> {
    let mask = par_retained_mask(faces, empty_faces)?;
    Ok(finish(faces, empty_faces, &mask))
}

fn finish(
    faces: &FaceMatrix,
    empty_faces: &FaceMatrix,
    mask: &[bool],
) -> (FaceMatrix, FilterReport) {
    let kept = faces.compact(mask);
    let report = FilterReport {
        input_faces: faces.rows(),
        empty_faces: empty_faces.rows(),
        retained: kept.rows(),
        removed: faces.rows() - kept.rows(),
    };
    tracing::debug!(
        input_faces = report.input_faces,
        empty_faces = report.empty_faces,
        retained = report.retained,
        removed = report.removed,
        vertices = faces.cols(),
        "removed faces containing an empty face"
    );
    (kept, report)
}
