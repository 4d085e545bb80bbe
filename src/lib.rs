//! Triangular views over `ndarray` matrices.
//!
//! A [`TriangularView`](triangular::TriangularView) restricts a matrix expression to one of the
//! six regions named by [`ShapeTag`](shape::ShapeTag). Reads outside the region return the value
//! the tag implies (zero, or one on a unit diagonal), writes through a
//! [`TriangularViewMut`](triangular::TriangularViewMut) never leave the region, and
//! [`solve`](triangular::TriangularView::solve) runs forward or back substitution against only
//! the cells the view exposes.
//!
//! ```
//! use ndarray::array;
//! use ndarray_triangular::{shape::ShapeTag, triangular::TriangularViewExt};
//!
//! let t = array![[2., 1., 1.], [0., 3., 1.], [0., 0., 4.]];
//! let b = array![[1.], [1.], [1.]];
//! let x = t.triangular_view(ShapeTag::Upper).solve(&b).unwrap();
//! assert_eq!(x, array![[0.25], [0.25], [0.25]]);
//! ```

pub mod assign;
pub mod expr;
mod index;
pub mod shape;
pub mod solve;
pub mod triangular;

use std::fmt::Debug;

use ndarray::LinalgScalar;
use num_complex::ComplexFloat;
use thiserror::Error;

use crate::expr::MatrixExpr;

pub use crate::shape::{ShapeTag, UPLO};
pub use crate::solve::Side;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LinalgError {
    #[error("Matrix with {rows} rows and {cols} cols is not square")]
    NotSquare { rows: usize, cols: usize },
    #[error("Expected matrix with {expected} rows, got {actual} rows")]
    WrongRows { expected: usize, actual: usize },
    #[error("Expected matrix with {expected} columns, got {actual} columns")]
    WrongColumns { expected: usize, actual: usize },
    #[error("Expected matrix of shape {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("Triangular views of {left:?} and {right:?} sides cannot be swapped")]
    SideMismatch { left: UPLO, right: UPLO },
}

pub type Result<T> = std::result::Result<T, LinalgError>;

/// Element types the views and solvers operate on: `f32`, `f64` and their complex counterparts.
pub trait Scalar: LinalgScalar + ComplexFloat + Debug {}

impl<T> Scalar for T where T: LinalgScalar + ComplexFloat + Debug {}

/// Return the side length of a square matrix, or `NotSquare`.
pub(crate) fn check_square<E: MatrixExpr + ?Sized>(arr: &E) -> Result<usize> {
    let (rows, cols) = arr.dim();
    if rows != cols {
        Err(LinalgError::NotSquare { rows, cols })
    } else {
        Ok(rows)
    }
}

/// Return `Ok` if both shapes are identical, or `ShapeMismatch` naming them.
pub(crate) fn check_same_shape(expected: (usize, usize), actual: (usize, usize)) -> Result<()> {
    if expected != actual {
        Err(LinalgError::ShapeMismatch { expected, actual })
    } else {
        Ok(())
    }
}
