// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertex-list face collections and their conversion to dense matrices.
//!
//! Callers that keep faces as lists of vertex indices convert them with
//! [`SparseFaces::to_dense`] before filtering. [`remove_sparse_faces`] does
//! the round trip in one call and returns the caller's own vertex lists.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::filter::retained_mask;
use crate::matrix::{entry_count, FaceMatrix};

/// Vertex indices of one face.
pub type SparseFace = SmallVec<[usize; 8]>;

/// A face collection stored as vertex lists over `vertex_count` vertices.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SparseFaces {
    vertex_count: usize,
    faces: Vec<SparseFace>,
}

impl SparseFaces {
    /// Creates an empty collection over `vertex_count` vertices.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            faces: Vec::new(),
        }
    }

    /// Creates a collection from vertex lists, checking every index.
    pub fn from_faces<F, I>(vertex_count: usize, faces: F) -> Result<Self>
    where
        F: IntoIterator<Item = I>,
        I: IntoIterator<Item = usize>,
    {
        let mut out = Self::new(vertex_count);
        for face in faces {
            out.push(face)?;
        }
        Ok(out)
    }

    /// Appends a face.
    pub fn push<I: IntoIterator<Item = usize>>(&mut self, face: I) -> Result<()> {
        let face: SparseFace = face.into_iter().collect();
        self.check_face(self.faces.len(), &face)?;
        self.faces.push(face);
        Ok(())
    }

    /// Returns the number of vertices the faces are drawn from.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Returns the number of faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if there are no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Returns the faces in order.
    pub fn faces(&self) -> &[SparseFace] {
        &self.faces
    }

    /// Checks that every vertex index is below [`vertex_count`](Self::vertex_count).
    ///
    /// Collections built through [`push`](Self::push) are always valid; this
    /// is for deserialized input.
    pub fn validate(&self) -> Result<()> {
        self.faces
            .iter()
            .enumerate()
            .try_for_each(|(i, face)| self.check_face(i, face))
    }

    fn check_face(&self, index: usize, face: &[usize]) -> Result<()> {
        match face.iter().find(|&&v| v >= self.vertex_count) {
            Some(&vertex) => Err(Error::VertexOutOfRange {
                face: index,
                vertex,
                vertex_count: self.vertex_count,
            }),
            None => Ok(()),
        }
    }

    /// Expands the collection into a dense incidence matrix. Repeated
    /// indices within a face set the same entry.
    pub fn to_dense(&self) -> Result<FaceMatrix> {
        self.validate()?;
        let cols = self.vertex_count;
        let mut data = vec![0.0; entry_count(self.faces.len(), cols)?];
        for (i, face) in self.faces.iter().enumerate() {
            for &v in face {
                data[i * cols + v] = 1.0;
            }
        }
        FaceMatrix::new(self.faces.len(), cols, data)
    }

    /// Collects the set vertices of each row, in ascending order. Only
    /// entries exactly equal to `1.0` are taken.
    pub fn from_dense(matrix: &FaceMatrix) -> Self {
        let faces: Vec<SparseFace> = matrix
            .iter_rows()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &x)| x == 1.0)
                    .map(|(k, _)| k)
                    .collect()
            })
            .collect();
        Self {
            vertex_count: matrix.cols(),
            faces,
        }
    }

    /// Returns the faces whose `keep` entry is `true`, in order.
    fn select(&self, keep: &[bool]) -> Self {
        Self {
            vertex_count: self.vertex_count,
            faces: self
                .faces
                .iter()
                .zip(keep)
                .filter(|&(_, &k)| k)
                .map(|(face, _)| face.clone())
                .collect(),
        }
    }
}

/// Removes every face that contains an empty face, for vertex-list input.
///
/// Both collections are expanded to dense form and decided exactly like
/// [`remove_faces`](crate::remove_faces). The surviving faces are returned
/// as the caller passed them (vertex order and repeats untouched).
///
/// # Errors
///
/// [`Error::ShapeMismatch`] if the vertex counts differ, and
/// [`Error::VertexOutOfRange`] for an index outside either vertex set.
pub fn remove_sparse_faces(
    faces: &SparseFaces,
    empty_faces: &SparseFaces,
) -> Result<SparseFaces> {
    if faces.vertex_count != empty_faces.vertex_count {
        return Err(Error::ShapeMismatch {
            faces: faces.vertex_count,
            empty_faces: empty_faces.vertex_count,
        });
    }
    let dense_faces = faces.to_dense()?;
    let dense_empty = empty_faces.to_dense()?;
    let mask = retained_mask(&dense_faces, &dense_empty)?;
    Ok(faces.select(&mask))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_rejects_out_of_range_vertex() {
        let mut faces = SparseFaces::new(3);
        faces.push([0, 2]).unwrap();
        let err = faces.push([1, 3]).unwrap_err();
        assert_eq!(
            err,
            Error::VertexOutOfRange {
                face: 1,
                vertex: 3,
                vertex_count: 3
            }
        );
        assert_eq!(faces.len(), 1);
    }

    #[test]
    fn dense_conversion_rejects_overflowing_shape() {
        let mut faces = SparseFaces::new(usize::MAX);
        faces.push([0]).unwrap();
        faces.push([usize::MAX - 1]).unwrap();
        assert_eq!(
            faces.to_dense().unwrap_err(),
            Error::TooLarge {
                rows: 2,
                cols: usize::MAX
            }
        );
    }

    #[test]
    fn dense_conversion() {
        let faces = SparseFaces::from_faces(3, [vec![0, 1], vec![2], vec![]]).unwrap();
        let dense = faces.to_dense().unwrap();
        assert_eq!(
            dense.to_rows(),
            vec![
                vec![1.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0],
                vec![0.0, 0.0, 0.0]
            ]
        );
    }

    #[test]
    fn repeated_vertices_set_one_entry() {
        let faces = SparseFaces::from_faces(2, [[1, 1, 1]]).unwrap();
        assert_eq!(faces.to_dense().unwrap().row(0), &[0.0, 1.0]);
    }

    #[test]
    fn from_dense_reads_exact_ones() {
        let dense = FaceMatrix::from_rows(&[[1.0, 2.0, 1.0], [0.0, 1.0, 0.5]]).unwrap();
        let sparse = SparseFaces::from_dense(&dense);
        assert_eq!(sparse.vertex_count(), 3);
        assert_eq!(sparse.faces()[0].as_slice(), &[0, 2]);
        assert_eq!(sparse.faces()[1].as_slice(), &[1]);
    }

    #[test]
    fn sparse_removal_returns_original_lists() {
        let faces = SparseFaces::from_faces(3, [vec![1, 0], vec![2, 1], vec![0, 2, 2]]).unwrap();
        let empty = SparseFaces::from_faces(3, [vec![0, 1]]).unwrap();
        let kept = remove_sparse_faces(&faces, &empty).unwrap();
        assert_eq!(kept.len(), 2);
        assert_eq!(kept.faces()[0].as_slice(), &[2, 1]);
        assert_eq!(kept.faces()[1].as_slice(), &[0, 2, 2]);
    }

    #[test]
    fn sparse_removal_checks_vertex_counts() {
        let faces = SparseFaces::from_faces(3, [vec![0]]).unwrap();
        let empty = SparseFaces::from_faces(2, [vec![0]]).unwrap();
        assert_eq!(
            remove_sparse_faces(&faces, &empty).unwrap_err(),
            Error::ShapeMismatch {
                faces: 3,
                empty_faces: 2
            }
        );
    }
}
