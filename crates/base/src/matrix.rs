use crate::error::{ComputeError, ShapeError};
use crate::shape::Shape;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

fn check_len(shape: (usize, usize), len: usize) -> Result<(), ShapeError> {
    if shape.0.checked_mul(shape.1) != Some(len) {
        return Err(ShapeError::Length {
            shape: Shape::known(&[shape.0, shape.1]),
            len,
        });
    }
    Ok(())
}

/// Dense row-major matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    shape: (usize, usize),
    base: Vec<T>,
}

impl<T: Default + Copy> Matrix<T> {
    pub fn zeros(shape: (usize, usize)) -> Self {
        Self {
            shape,
            base: vec![T::default(); shape.0 * shape.1],
        }
    }
    /// Like [`Matrix::zeros`], but reports allocation failure instead of
    /// aborting.
    pub fn try_zeros(shape: (usize, usize)) -> Result<Self, ComputeError> {
        let (rows, cols) = shape;
        let fail = ComputeError::Allocation { rows, cols };
        let len = rows.checked_mul(cols).ok_or(fail.clone())?;
        let mut base = Vec::new();
        base.try_reserve_exact(len).map_err(|_| fail)?;
        base.resize(len, T::default());
        Ok(Self { shape, base })
    }
}

impl<T> Matrix<T> {
    pub fn from_vec(shape: (usize, usize), base: Vec<T>) -> Result<Self, ShapeError> {
        check_len(shape, base.len())?;
        Ok(Self { shape, base })
    }
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }
    pub fn rows(&self) -> usize {
        self.shape.0
    }
    pub fn cols(&self) -> usize {
        self.shape.1
    }
    pub fn len(&self) -> usize {
        self.base.len()
    }
    pub fn as_slice(&self) -> &[T] {
        self.base.as_slice()
    }
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.base.as_mut_slice()
    }
    pub fn into_vec(self) -> Vec<T> {
        self.base
    }
    pub fn view(&self) -> MatrixView<'_, T> {
        MatrixView {
            shape: self.shape,
            base: &self.base,
        }
    }
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Matrix<U> {
        Matrix {
            shape: self.shape,
            base: self.base.iter().map(f).collect(),
        }
    }
}

impl<T: Copy> Matrix<T> {
    /// Builds a matrix from equally sized rows.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, ShapeError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut base = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(ShapeError::Length {
                    shape: Shape::known(&[rows.len(), cols]),
                    len: rows.iter().map(Vec::len).sum(),
                });
            }
            base.extend_from_slice(row);
        }
        Ok(Self {
            shape: (rows.len(), cols),
            base,
        })
    }
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.view().to_rows()
    }
    pub fn column(&self, j: usize) -> Vec<T> {
        self.view().column(j)
    }
}

impl<T> Index<(usize,)> for Matrix<T> {
    type Output = [T];

    fn index(&self, (i,): (usize,)) -> &Self::Output {
        &self.base[i * self.shape.1..][..self.shape.1]
    }
}

impl<T> IndexMut<(usize,)> for Matrix<T> {
    fn index_mut(&mut self, (i,): (usize,)) -> &mut Self::Output {
        &mut self.base[i * self.shape.1..][..self.shape.1]
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.base[i * self.shape.1..][..self.shape.1][j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        &mut self.base[i * self.shape.1..][..self.shape.1][j]
    }
}

/// Borrowed row-major matrix over a caller-owned buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixView<'a, T> {
    shape: (usize, usize),
    base: &'a [T],
}

impl<'a, T> MatrixView<'a, T> {
    pub fn new(shape: (usize, usize), base: &'a [T]) -> Result<Self, ShapeError> {
        check_len(shape, base.len())?;
        Ok(Self { shape, base })
    }
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }
    pub fn rows(&self) -> usize {
        self.shape.0
    }
    pub fn cols(&self) -> usize {
        self.shape.1
    }
    pub fn as_slice(&self) -> &'a [T] {
        self.base
    }
    pub fn row(&self, i: usize) -> &'a [T] {
        &self.base[i * self.shape.1..][..self.shape.1]
    }
}

impl<T: Copy> MatrixView<'_, T> {
    pub fn get(&self, i: usize, j: usize) -> T {
        self.row(i)[j]
    }
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.shape.0).map(|i| self.row(i).to_vec()).collect()
    }
    pub fn column(&self, j: usize) -> Vec<T> {
        assert!(j < self.shape.1);
        (0..self.shape.0).map(|i| self.get(i, j)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_checks_length() {
        let m = Matrix::from_vec((2, 3), vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(m[(1, 0)], 4);
        assert_eq!(&m[(0,)], &[1, 2, 3]);
        assert_eq!(m.column(2), vec![3, 6]);
        assert_eq!(
            Matrix::from_vec((2, 2), vec![1, 2, 3]),
            Err(ShapeError::Length {
                shape: Shape::known(&[2, 2]),
                len: 3
            })
        );
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let m = Matrix::from_rows(&[vec![0.0, 0.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.shape(), (2, 2));
        assert_eq!(m.to_rows(), vec![vec![0.0, 0.0], vec![3.0, 4.0]]);
        assert!(Matrix::from_rows(&[vec![1, 2], vec![3]]).is_err());
        assert_eq!(Matrix::<i32>::from_rows(&[]).unwrap().shape(), (0, 0));
    }

    #[test]
    fn try_zeros_reports_overflow() {
        assert_eq!(
            Matrix::<f64>::try_zeros((usize::MAX, 2)),
            Err(ComputeError::Allocation {
                rows: usize::MAX,
                cols: 2
            })
        );
        let m = Matrix::<f64>::try_zeros((3, 4)).unwrap();
        assert!(m.as_slice().iter().all(|&x| x == 0.0));
        assert_eq!(m.len(), 12);
    }

    #[test]
    fn view_over_borrowed_buffer() {
        let buffer = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let view = MatrixView::new((3, 2), &buffer).unwrap();
        assert_eq!(view.row(2), &[5.0, 6.0]);
        assert_eq!(view.get(1, 0), 3.0);
        assert_eq!(view.column(1), vec![2.0, 4.0, 6.0]);
        assert!(MatrixView::new((4, 2), &buffer).is_err());
        assert!(MatrixView::new((usize::MAX, 2), &buffer).is_err());
    }

    #[test]
    #[should_panic]
    fn column_index_is_bounds_checked() {
        let m = Matrix::from_vec((2, 2), vec![1, 2, 3, 4]).unwrap();
        let _ = m[(0, 2)];
    }
}
