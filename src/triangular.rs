//! Traits and views for creating and inspecting triangular matrices

use ndarray::{Array2, ArrayBase, ArrayView2, ArrayViewMut2, Data, DataMut, Ix2};
use num_complex::ComplexFloat;
use num_traits::{One, Zero};

use crate::{
    check_square,
    expr::{Adjoint, Conjugated, ExprExt, Layout, MatrixExpr, Transposed},
    shape::{DiagonalMode, Implied, ShapeTag, Transform, UPLO},
    Result, Scalar,
};

/// Read-only triangular window over a matrix expression.
///
/// Cells inside the tag's region read through to the expression. Every other cell reads as the
/// value the tag implies: zero, or one on the diagonal of a unit tag. The view borrows whatever
/// `E` borrows and cannot outlive it.
#[derive(Debug, Clone, Copy)]
pub struct TriangularView<E> {
    expr: E,
    tag: ShapeTag,
}

impl<E: MatrixExpr> TriangularView<E> {
    pub fn new(expr: E, tag: ShapeTag) -> Self {
        Self { expr, tag }
    }

    pub fn tag(&self) -> ShapeTag {
        self.tag
    }

    /// The wrapped expression, including the cells outside the region
    pub fn expr(&self) -> &E {
        &self.expr
    }

    pub fn into_inner(self) -> E {
        self.expr
    }

    fn map<F: MatrixExpr>(self, transform: Transform, f: impl FnOnce(E) -> F) -> TriangularView<F> {
        let (tag, _) = self.tag.apply(transform);
        TriangularView::new(f(self.expr), tag)
    }

    /// View of the transposed expression. An upper view becomes a lower one.
    pub fn transpose(self) -> TriangularView<Transposed<E>> {
        self.map(Transform::Transpose, ExprExt::transposed)
    }

    /// View of the conjugated expression, with the same tag
    pub fn conjugate(self) -> TriangularView<Conjugated<E>>
    where
        E::Elem: ComplexFloat,
    {
        self.map(Transform::Conjugate, ExprExt::conjugated)
    }

    /// View of the conjugate transpose
    pub fn adjoint(self) -> TriangularView<Adjoint<E>>
    where
        E::Elem: ComplexFloat,
    {
        self.map(Transform::Adjoint, ExprExt::adjoint)
    }
}

impl<E: MatrixExpr> TriangularView<E>
where
    E::Elem: Scalar,
{
    /// Materialize the view, filling cells outside the region with their implied values.
    pub fn to_dense(&self) -> Array2<E::Elem> {
        self.to_owned_array()
    }

    /// Product of the diagonal as the view reports it: one for unit tags, zero for strict tags.
    pub fn determinant(&self) -> Result<E::Elem> {
        let n = check_square(self)?;
        Ok((0..n).fold(E::Elem::one(), |acc, i| acc * self.read(i, i)))
    }
}

impl<E: MatrixExpr> MatrixExpr for TriangularView<E>
where
    E::Elem: Scalar,
{
    type Elem = E::Elem;

    fn dim(&self) -> (usize, usize) {
        self.expr.dim()
    }

    fn read(&self, i: usize, j: usize) -> Self::Elem {
        let (rows, cols) = self.expr.dim();
        assert!(
            i < rows && j < cols,
            "index ({}, {}) out of bounds for {}x{} triangular view",
            i,
            j,
            rows,
            cols
        );
        match self.tag.implied(i, j) {
            Implied::Stored => self.expr.read(i, j),
            Implied::Zero => E::Elem::zero(),
            Implied::One => E::Elem::one(),
        }
    }

    fn layout(&self) -> Layout {
        self.expr.layout()
    }
}

/// Writable triangular window over a mutably borrowed matrix.
///
/// Assignments through this view touch only the cells inside the tag's region. The diagonal of
/// a unit tag is never read or written. See [`crate::assign`] for the write operations.
#[derive(Debug)]
pub struct TriangularViewMut<'a, A> {
    pub(crate) data: ArrayViewMut2<'a, A>,
    pub(crate) tag: ShapeTag,
}

impl<'a, A> TriangularViewMut<'a, A> {
    pub fn new(data: ArrayViewMut2<'a, A>, tag: ShapeTag) -> Self {
        Self { data, tag }
    }

    pub fn tag(&self) -> ShapeTag {
        self.tag
    }

    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Read-only view of the same region
    pub fn view(&self) -> TriangularView<ArrayView2<'_, A>> {
        TriangularView {
            expr: self.data.view(),
            tag: self.tag,
        }
    }

    /// Shorter-lived writable view of the same region
    pub fn reborrow(&mut self) -> TriangularViewMut<'_, A> {
        TriangularViewMut {
            data: self.data.view_mut(),
            tag: self.tag,
        }
    }

    /// Writable view of the transposed matrix; swaps axes without copying.
    pub fn transpose(self) -> Self {
        Self {
            data: self.data.reversed_axes(),
            tag: self.tag.transpose(),
        }
    }
}

/// Construct triangular views over arrays
pub trait TriangularViewExt {
    type Elem;

    fn triangular_view(&self, tag: ShapeTag) -> TriangularView<ArrayView2<'_, Self::Elem>>;
}

impl<A, S: Data<Elem = A>> TriangularViewExt for ArrayBase<S, Ix2> {
    type Elem = A;

    fn triangular_view(&self, tag: ShapeTag) -> TriangularView<ArrayView2<'_, A>> {
        TriangularView {
            expr: self.view(),
            tag,
        }
    }
}

/// Construct writable triangular views over arrays
pub trait TriangularViewMutExt {
    type Elem;

    fn triangular_view_mut(&mut self, tag: ShapeTag) -> TriangularViewMut<'_, Self::Elem>;
}

impl<A, S: DataMut<Elem = A>> TriangularViewMutExt for ArrayBase<S, Ix2> {
    type Elem = A;

    fn triangular_view_mut(&mut self, tag: ShapeTag) -> TriangularViewMut<'_, A> {
        TriangularViewMut::new(self.view_mut(), tag)
    }
}

/// Transform square matrix into triangular matrix
pub trait IntoTriangular {
    /// Transform square matrix into a triangular matrix in place, zeroing out the other
    /// triangle and keeping the diagonal.
    fn triangular_inplace(&mut self, uplo: UPLO) -> Result<&mut Self>;

    /// Transform square matrix into a triangular matrix, zeroing out the other triangle and
    /// keeping the diagonal.
    fn into_triangular(self, uplo: UPLO) -> Result<Self>
    where
        Self: Sized;
}

impl<A, S> IntoTriangular for ArrayBase<S, Ix2>
where
    A: Scalar,
    S: DataMut<Elem = A>,
{
    fn triangular_inplace(&mut self, uplo: UPLO) -> Result<&mut Self> {
        check_square(&*self)?;
        self.triangular_view_mut(ShapeTag::from_parts(uplo.transpose(), DiagonalMode::Strict))
            .fill(A::zero());
        Ok(self)
    }

    fn into_triangular(mut self, uplo: UPLO) -> Result<Self> {
        self.triangular_inplace(uplo)?;
        Ok(self)
    }
}

/// Check the values of a matrix for triangular structure
pub trait Triangular {
    /// Whether every element strictly on the other side of the diagonal from `uplo` is zero.
    /// Non-square matrices are checked with the same `j > i` / `j < i` rule.
    fn is_triangular(&self, uplo: UPLO) -> bool;

    fn is_upper(&self) -> bool {
        self.is_triangular(UPLO::Upper)
    }

    fn is_lower(&self) -> bool {
        self.is_triangular(UPLO::Lower)
    }
}

impl<E> Triangular for E
where
    E: MatrixExpr,
    E::Elem: Zero,
{
    fn is_triangular(&self, uplo: UPLO) -> bool {
        let outside = ShapeTag::from_parts(uplo.transpose(), DiagonalMode::Strict);
        let (rows, cols) = self.dim();
        (0..rows).all(|i| outside.row_range(i, cols).all(|j| self.read(i, j).is_zero()))
    }
}
