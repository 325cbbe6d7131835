// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dense incidence matrices.
//!
//! A [`FaceMatrix`] stores one face per row and one vertex per column. Entry
//! `(i, k)` is `1.0` when vertex `k` belongs to face `i`. Entries are kept as
//! `f64` rather than `bool` so that matrices handed over from numeric hosts
//! keep their exact values; only an entry exactly equal to `1.0` counts as
//! set (see [`crate::filter`]).

use crate::error::{Error, Result};

/// Returns `rows * cols`, or [`Error::TooLarge`] if the product overflows.
pub(crate) fn entry_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or(Error::TooLarge { rows, cols })
}

/// Dense, row-major face incidence matrix.
///
/// # Example
///
/// ```
/// use helly_lite_faces::FaceMatrix;
///
/// let faces = FaceMatrix::from_rows(&[[1.0, 1.0, 0.0], [0.0, 1.0, 1.0]]).unwrap();
/// assert_eq!(faces.rows(), 2);
/// assert_eq!(faces.cols(), 3);
/// assert_eq!(faces.row(1), &[0.0, 1.0, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FaceMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl FaceMatrix {
    /// Creates a matrix from row-major data.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let expected = entry_count(rows, cols)?;
        if data.len() != expected {
            return Err(Error::DataLength {
                expected,
                found: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Creates a matrix with no faces over `cols` vertices.
    pub fn empty(cols: usize) -> Self {
        Self {
            rows: 0,
            cols,
            data: Vec::new(),
        }
    }

    /// Creates a matrix from a list of rows. The width is taken from the
    /// first row; an empty list gives a `0 x 0` matrix.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        Self::from_rows_with_cols(cols, rows)
    }

    /// Creates a matrix from a list of rows that must all have `cols` entries.
    pub fn from_rows_with_cols<R: AsRef<[f64]>>(cols: usize, rows: &[R]) -> Result<Self> {
        // `cols` may come from untrusted input; check widths before reserving.
        for (i, row) in rows.iter().enumerate() {
            let found = row.as_ref().len();
            if found != cols {
                return Err(Error::RaggedRow {
                    row: i,
                    expected: cols,
                    found,
                });
            }
        }
        let mut data = Vec::with_capacity(entry_count(rows.len(), cols)?);
        for row in rows {
            data.extend_from_slice(row.as_ref());
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Creates a matrix from boolean indicator rows (`true` becomes `1.0`).
    pub fn from_indicator_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let rows: Vec<Vec<f64>> = rows
            .iter()
            .map(|r| r.as_ref().iter().map(|&b| if b { 1.0 } else { 0.0 }).collect())
            .collect();
        Self::from_rows(&rows)
    }

    /// Creates a matrix from column-major data, the layout numeric hosts
    /// usually hand over.
    pub fn from_column_major(rows: usize, cols: usize, data: &[f64]) -> Result<Self> {
        let expected = entry_count(rows, cols)?;
        if data.len() != expected {
            return Err(Error::DataLength {
                expected,
                found: data.len(),
            });
        }
        let mut row_major = Vec::with_capacity(expected);
        for i in 0..rows {
            row_major.extend((0..cols).map(|k| data[i + k * rows]));
        }
        Ok(Self {
            rows,
            cols,
            data: row_major,
        })
    }

    /// Returns the entries in column-major order.
    pub fn to_column_major(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.data.len());
        for k in 0..self.cols {
            out.extend((0..self.rows).map(|i| self.data[i * self.cols + k]));
        }
        out
    }

    /// Returns the number of faces.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of vertices.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `true` if the matrix holds no faces.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Returns face `i` as a slice of length [`cols`](Self::cols).
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.rows()`.
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(i < self.rows, "row {} out of bounds ({} rows)", i, self.rows);
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterates over the faces in order.
    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        // Indexed rather than `chunks_exact`, which rejects zero-width rows.
        (0..self.rows).map(move |i| &self.data[i * self.cols..(i + 1) * self.cols])
    }

    /// Returns the row-major backing data.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Copies the matrix into a list of rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(<[f64]>::to_vec).collect()
    }

    /// Returns a new matrix with the rows whose `keep` entry is `true`, in
    /// their original order. `keep` must have one entry per row.
    pub(crate) fn compact(&self, keep: &[bool]) -> FaceMatrix {
        assert_eq!(
            keep.len(),
            self.rows,
            "mask length must equal the number of rows"
        );
        let retained = keep.iter().filter(|&&k| k).count();
        let mut data = Vec::with_capacity(retained * self.cols);
        for (row, _) in self.iter_rows().zip(keep).filter(|&(_, &k)| k) {
            data.extend_from_slice(row);
        }
        FaceMatrix {
            rows: retained,
            cols: self.cols,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_wrong_length() {
        let err = FaceMatrix::new(2, 3, vec![0.0; 5]).unwrap_err();
        assert_eq!(
            err,
            Error::DataLength {
                expected: 6,
                found: 5
            }
        );
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let rows = vec![vec![1.0, 0.0], vec![1.0]];
        let err = FaceMatrix::from_rows(&rows).unwrap_err();
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
    fn new_rejects_overflowing_shape() {
        let err = FaceMatrix::new(1 << (usize::BITS - 1), 2, Vec::new()).unwrap_err();
        assert_eq!(
            err,
            Error::TooLarge {
                rows: 1 << (usize::BITS - 1),
                cols: 2
            }
        );
    }

    #[test]
    fn column_major_rejects_overflowing_shape() {
        let err = FaceMatrix::from_column_major(usize::MAX, 3, &[]).unwrap_err();
        assert!(matches!(err, Error::TooLarge { .. }));
    }

    #[test]
    fn huge_declared_width_is_a_ragged_row() {
        let err = FaceMatrix::from_rows_with_cols(usize::MAX, &[[1.0]]).unwrap_err();
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
    fn huge_width_without_rows_is_empty() {
        let rows: [[f64; 0]; 0] = [];
        let m = FaceMatrix::from_rows_with_cols(usize::MAX, &rows).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.cols(), usize::MAX);
    }

    #[test]
    fn empty_keeps_column_count() {
        let m = FaceMatrix::empty(4);
        assert!(m.is_empty());
        assert_eq!(m.cols(), 4);
        assert_eq!(m.iter_rows().count(), 0);
    }

    #[test]
    fn zero_width_rows_are_iterable() {
        let m = FaceMatrix::new(3, 0, Vec::new()).unwrap();
        let rows: Vec<&[f64]> = m.iter_rows().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.is_empty()));
    }

    #[test]
    fn column_major_layout() {
        // [[1, 2, 3],
        //  [4, 5, 6]]
        let m = FaceMatrix::from_column_major(2, 3, &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]).unwrap();
        assert_eq!(m.row(0), &[1.0, 2.0, 3.0]);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!(m.to_column_major(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn indicator_rows() {
        let m = FaceMatrix::from_indicator_rows(&[[true, false], [false, true]]).unwrap();
        assert_eq!(m.to_rows(), vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn compact_keeps_order() {
        let m = FaceMatrix::from_rows(&[[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]).unwrap();
        let c = m.compact(&[true, false, true]);
        assert_eq!(c.rows(), 2);
        assert_eq!(c.to_rows(), vec![vec![1.0, 0.0], vec![1.0, 1.0]]);
    }

    #[test]
    #[should_panic(expected = "mask length")]
    fn compact_rejects_short_mask() {
        let m = FaceMatrix::from_rows(&[[1.0], [0.0]]).unwrap();
        m.compact(&[true]);
    }
}
