//! Forward and back substitution against a triangular view.
//!
//! Solves `op(T) * X = B` (or `X * op(T) = B`) where `op(T)` is whatever the view reports:
//! transposition and conjugation are applied by building the view over a
//! [`Transposed`]/[`Conjugated`](crate::expr::Conjugated) expression. Singular diagonals are not
//! detected; dividing by a zero diagonal produces infinities and NaNs in the result, the same as
//! BLAS `trsm`. A strictly triangular view has an implicit zero diagonal and is always singular.

use ndarray::{s, Array1, Array2, ArrayBase, ArrayViewMut2, Axis, Data, DataMut, Ix1, Ix2, Zip};

use crate::{
    check_square,
    expr::{Layout, MatrixExpr, Transposed},
    shape::{DiagonalMode, UPLO},
    triangular::{TriangularView, TriangularViewExt},
    LinalgError, Result, Scalar,
};

/// Which side of the unknown the triangular operator multiplies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// `op(T) * X = B`
    Left,
    /// `X * op(T) = B`
    Right,
}

/// Overwrite `b` with the solution of `t * x = b`.
///
/// Rows are resolved in dependency order (ascending for lower, descending for upper), and each
/// row update is applied across every column of `b` before moving to the next row.
fn substitute<E, A>(t: &TriangularView<E>, mut b: ArrayViewMut2<'_, A>) -> Result<()>
where
    E: MatrixExpr<Elem = A>,
    A: Scalar,
{
    let n = check_square(t)?;
    if b.nrows() != n {
        return Err(LinalgError::WrongRows {
            expected: n,
            actual: b.nrows(),
        });
    }

    let tag = t.tag();
    log::trace!("{:?} substitution, n = {}, rhs cols = {}", tag, n, b.ncols());
    if Layout::of(&b) == Layout::Strided {
        log::warn!(
            target: "ndarray_triangular_perf",
            "Triangular solve prefers row-major or column-major right-hand side. Found matrix with generic strides."
        );
    }

    let t = t.expr();
    let mut resolve = |i: usize, solved: std::ops::Range<usize>| {
        for k in solved {
            let tik = t.read(i, k);
            let (mut row_i, row_k) = b.multi_slice_mut((s![i, ..], s![k, ..]));
            Zip::from(&mut row_i)
                .and(&row_k)
                .for_each(|xi, &xk| *xi = *xi - tik * xk);
        }
        let diag = match tag.diagonal_mode() {
            DiagonalMode::Unit => return,
            DiagonalMode::Included => t.read(i, i),
            DiagonalMode::Strict => A::zero(),
        };
        b.row_mut(i).mapv_inplace(|x| x / diag);
    };

    match tag.side() {
        UPLO::Lower => (0..n).for_each(|i| resolve(i, 0..i)),
        UPLO::Upper => (0..n).rev().for_each(|i| resolve(i, i + 1..n)),
    }
    Ok(())
}

impl<E, A> TriangularView<E>
where
    E: MatrixExpr<Elem = A>,
    A: Scalar,
{
    /// Solve `self * x = b` in place, overwriting `b` with `x`.
    pub fn solve_inplace<'b, S: DataMut<Elem = A>>(
        &self,
        b: &'b mut ArrayBase<S, Ix2>,
    ) -> Result<&'b mut ArrayBase<S, Ix2>> {
        self.solve_inplace_side(Side::Left, b)
    }

    /// Solve `self * x = b` (left) or `x * self = b` (right) in place, overwriting `b` with `x`.
    ///
    /// The right-hand form solves `self.t() * x.t() = b.t()` on a transposed view of `b`, so no
    /// copy is made.
    pub fn solve_inplace_side<'b, S: DataMut<Elem = A>>(
        &self,
        side: Side,
        b: &'b mut ArrayBase<S, Ix2>,
    ) -> Result<&'b mut ArrayBase<S, Ix2>> {
        match side {
            Side::Left => substitute(self, b.view_mut())?,
            Side::Right => {
                let n = check_square(self)?;
                if b.ncols() != n {
                    return Err(LinalgError::WrongColumns {
                        expected: n,
                        actual: b.ncols(),
                    });
                }
                let transposed =
                    TriangularView::new(Transposed::new(self.expr()), self.tag().transpose());
                substitute(&transposed, b.view_mut().reversed_axes())?
            }
        }
        Ok(b)
    }

    /// Solve `self * x = b`, consuming `b` and returning `x` in its storage.
    pub fn solve_into<S: DataMut<Elem = A>>(
        &self,
        mut b: ArrayBase<S, Ix2>,
    ) -> Result<ArrayBase<S, Ix2>> {
        self.solve_inplace(&mut b)?;
        Ok(b)
    }

    /// Solve `self * x = b` without modifying `b`.
    pub fn solve<S: Data<Elem = A>>(&self, b: &ArrayBase<S, Ix2>) -> Result<Array2<A>> {
        self.solve_into(b.to_owned())
    }

    /// Solve `self * x = b` or `x * self = b` without modifying `b`.
    pub fn solve_side<S: Data<Elem = A>>(
        &self,
        side: Side,
        b: &ArrayBase<S, Ix2>,
    ) -> Result<Array2<A>> {
        let mut x = b.to_owned();
        self.solve_inplace_side(side, &mut x)?;
        Ok(x)
    }

    /// Solve `self * x = b` for a vector `b`, in place.
    pub fn solve_vec_inplace<'b, S: DataMut<Elem = A>>(
        &self,
        b: &'b mut ArrayBase<S, Ix1>,
    ) -> Result<&'b mut ArrayBase<S, Ix1>> {
        substitute(self, b.view_mut().insert_axis(Axis(1)))?;
        Ok(b)
    }

    /// Solve `self * x = b` for a vector `b`.
    pub fn solve_vec<S: Data<Elem = A>>(&self, b: &ArrayBase<S, Ix1>) -> Result<Array1<A>> {
        let mut x = b.to_owned();
        self.solve_vec_inplace(&mut x)?;
        Ok(x)
    }
}

/// Solve triangular systems with the matrix itself as the operator
pub trait SolveTriangular<A> {
    /// Solve `self * x = b`, where only the `uplo` triangle of `self` (diagonal included) is
    /// read.
    fn solve_triangular<Sb: Data<Elem = A>>(
        &self,
        b: &ArrayBase<Sb, Ix2>,
        uplo: UPLO,
    ) -> Result<Array2<A>>;

    /// Solve `self * x = b`, consuming `b`.
    fn solve_triangular_into<Sb: DataMut<Elem = A>>(
        &self,
        b: ArrayBase<Sb, Ix2>,
        uplo: UPLO,
    ) -> Result<ArrayBase<Sb, Ix2>>;

    /// Solve `self * x = b`, overwriting `b`.
    fn solve_triangular_inplace<'a, Sb: DataMut<Elem = A>>(
        &self,
        b: &'a mut ArrayBase<Sb, Ix2>,
        uplo: UPLO,
    ) -> Result<&'a mut ArrayBase<Sb, Ix2>>;
}

impl<A: Scalar, S: Data<Elem = A>> SolveTriangular<A> for ArrayBase<S, Ix2> {
    fn solve_triangular<Sb: Data<Elem = A>>(
        &self,
        b: &ArrayBase<Sb, Ix2>,
        uplo: UPLO,
    ) -> Result<Array2<A>> {
        self.triangular_view(uplo.into()).solve(b)
    }

    fn solve_triangular_into<Sb: DataMut<Elem = A>>(
        &self,
        b: ArrayBase<Sb, Ix2>,
        uplo: UPLO,
    ) -> Result<ArrayBase<Sb, Ix2>> {
        self.triangular_view(uplo.into()).solve_into(b)
    }

    fn solve_triangular_inplace<'a, Sb: DataMut<Elem = A>>(
        &self,
        b: &'a mut ArrayBase<Sb, Ix2>,
        uplo: UPLO,
    ) -> Result<&'a mut ArrayBase<Sb, Ix2>> {
        self.triangular_view(uplo.into()).solve_inplace(b)
    }
}
