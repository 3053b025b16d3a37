use nalgebra::DMatrix;

use crate::error::{Result, SpkError};

/// Dense N x D point set. Shape is fixed once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMatrix {
    data: DMatrix<f64>,
}

impl PointMatrix {
    /// Build from row-major rows. All rows must share one length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map(Vec::len).unwrap_or(0);
        let mut flat = Vec::with_capacity(nrows * ncols);
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != ncols {
                return Err(SpkError::generic(format!(
                    "row {idx} has {} values, expected {ncols}",
                    row.len()
                )));
            }
            flat.extend_from_slice(row);
        }
        Ok(Self {
            data: DMatrix::from_row_slice(nrows, ncols, &flat),
        })
    }

    pub fn from_matrix(data: DMatrix<f64>) -> Self {
        Self { data }
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    pub fn is_square(&self) -> bool {
        self.data.nrows() == self.data.ncols()
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    pub fn row(&self, index: usize) -> Vec<f64> {
        self.data.row(index).iter().copied().collect()
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.nrows()).map(|i| self.row(i)).collect()
    }

    /// Squared Euclidean distance between rows `a` and `b`.
    pub fn squared_distance(&self, a: usize, b: usize) -> f64 {
        self.data
            .row(a)
            .iter()
            .zip(self.data.row(b).iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum()
    }

    /// Squared Euclidean distance between row `a` and an arbitrary vector.
    pub fn squared_distance_to(&self, a: usize, other: &[f64]) -> f64 {
        self.data
            .row(a)
            .iter()
            .zip(other.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum()
    }
}

/// Turn any matrix into row vectors for formatting.
pub fn matrix_rows(matrix: &DMatrix<f64>) -> Vec<Vec<f64>> {
    matrix
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn rows_round_trip_in_order() {
        let rows = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        let points = PointMatrix::from_rows(&rows).expect("matrix");
        assert_eq!(points.nrows(), 2);
        assert_eq!(points.ncols(), 3);
        assert_eq!(points.to_rows(), rows);
        assert_eq!(points.as_matrix()[(1, 0)], 4.0);
        assert!(!points.is_square());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        let err = PointMatrix::from_rows(&rows).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GenericProcessing);
    }

    #[test]
    fn empty_input_is_representable() {
        let points = PointMatrix::from_rows(&[]).expect("empty matrix");
        assert!(points.is_empty());
        assert_eq!(points.ncols(), 0);
    }

    #[test]
    fn squared_distance_between_rows() {
        let points = PointMatrix::from_rows(&[vec![0.0, 0.0], vec![3.0, 4.0]]).expect("matrix");
        assert!(points.is_square());
        assert_eq!(points.squared_distance(0, 1), 25.0);
        assert_eq!(points.squared_distance(1, 1), 0.0);
        assert_eq!(points.squared_distance_to(1, &[3.0, 0.0]), 16.0);
    }
}
