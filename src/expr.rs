//! Lazy two-dimensional expressions.
//!
//! Anything that can report its shape and produce element `(i, j)` on demand is a
//! [`MatrixExpr`]. Arrays are the leaves; [`Transposed`], [`Conjugated`], [`Scaled`], [`Sum`]
//! and [`Difference`] wrap other expressions without allocating, so that a chain such as
//! `m.t() + m` can be written into a triangular view cell by cell.

use std::ops::{Add, Mul, Sub};

use ndarray::{Array2, ArrayBase, Data, Ix2, ShapeBuilder};
use num_complex::ComplexFloat;

use crate::{check_same_shape, Result};

/// Memory order in which an expression is cheapest to traverse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Consecutive elements of a row are adjacent
    RowMajor,
    /// Consecutive elements of a column are adjacent
    ColumnMajor,
    /// Neither; traversal order does not matter
    Strided,
}

impl Layout {
    pub fn transpose(self) -> Self {
        match self {
            Layout::RowMajor => Layout::ColumnMajor,
            Layout::ColumnMajor => Layout::RowMajor,
            Layout::Strided => Layout::Strided,
        }
    }

    /// Layout of a two-dimensional array, judged from its strides
    pub fn of<S: Data>(arr: &ArrayBase<S, Ix2>) -> Self {
        if arr.is_standard_layout() {
            Layout::RowMajor
        } else if arr.t().is_standard_layout() {
            Layout::ColumnMajor
        } else {
            Layout::Strided
        }
    }
}

/// A matrix whose elements can be evaluated one at a time
pub trait MatrixExpr {
    type Elem: Copy;

    /// `(rows, cols)`
    fn dim(&self) -> (usize, usize);

    /// Element `(i, j)`. Panics if the index is out of bounds.
    fn read(&self, i: usize, j: usize) -> Self::Elem;

    fn layout(&self) -> Layout {
        Layout::Strided
    }

    fn nrows(&self) -> usize {
        self.dim().0
    }

    fn ncols(&self) -> usize {
        self.dim().1
    }

    /// Evaluate every element into a new array, in the expression's preferred memory order.
    fn to_owned_array(&self) -> Array2<Self::Elem> {
        let (rows, cols) = self.dim();
        let shape = (rows, cols).set_f(self.layout() == Layout::ColumnMajor);
        Array2::from_shape_fn(shape, |(i, j)| self.read(i, j))
    }
}

impl<A: Copy, S: Data<Elem = A>> MatrixExpr for ArrayBase<S, Ix2> {
    type Elem = A;

    fn dim(&self) -> (usize, usize) {
        (self.shape()[0], self.shape()[1])
    }

    fn read(&self, i: usize, j: usize) -> A {
        self[(i, j)]
    }

    fn layout(&self) -> Layout {
        Layout::of(self)
    }
}

impl<'a, E: MatrixExpr + ?Sized> MatrixExpr for &'a E {
    type Elem = E::Elem;

    fn dim(&self) -> (usize, usize) {
        (**self).dim()
    }

    fn read(&self, i: usize, j: usize) -> Self::Elem {
        (**self).read(i, j)
    }

    fn layout(&self) -> Layout {
        (**self).layout()
    }
}

/// `expr.t()`, read with rows and columns exchanged
#[derive(Debug, Clone, Copy)]
pub struct Transposed<E>(E);

impl<E: MatrixExpr> Transposed<E> {
    pub fn new(expr: E) -> Self {
        Transposed(expr)
    }

    pub fn into_inner(self) -> E {
        self.0
    }
}

impl<E: MatrixExpr> MatrixExpr for Transposed<E> {
    type Elem = E::Elem;

    fn dim(&self) -> (usize, usize) {
        let (rows, cols) = self.0.dim();
        (cols, rows)
    }

    fn read(&self, i: usize, j: usize) -> Self::Elem {
        self.0.read(j, i)
    }

    fn layout(&self) -> Layout {
        self.0.layout().transpose()
    }
}

/// Elementwise complex conjugate. The identity on real scalars.
#[derive(Debug, Clone, Copy)]
pub struct Conjugated<E>(E);

impl<E: MatrixExpr> Conjugated<E>
where
    E::Elem: ComplexFloat,
{
    pub fn new(expr: E) -> Self {
        Conjugated(expr)
    }

    pub fn into_inner(self) -> E {
        self.0
    }
}

impl<E: MatrixExpr> MatrixExpr for Conjugated<E>
where
    E::Elem: ComplexFloat,
{
    type Elem = E::Elem;

    fn dim(&self) -> (usize, usize) {
        self.0.dim()
    }

    fn read(&self, i: usize, j: usize) -> Self::Elem {
        self.0.read(i, j).conj()
    }

    fn layout(&self) -> Layout {
        self.0.layout()
    }
}

/// Conjugate transpose
pub type Adjoint<E> = Conjugated<Transposed<E>>;

/// `factor * expr`
#[derive(Debug, Clone, Copy)]
pub struct Scaled<E: MatrixExpr> {
    expr: E,
    factor: E::Elem,
}

impl<E: MatrixExpr> MatrixExpr for Scaled<E>
where
    E::Elem: Mul<Output = E::Elem>,
{
    type Elem = E::Elem;

    fn dim(&self) -> (usize, usize) {
        self.expr.dim()
    }

    fn read(&self, i: usize, j: usize) -> Self::Elem {
        self.factor * self.expr.read(i, j)
    }

    fn layout(&self) -> Layout {
        self.expr.layout()
    }
}

fn common_layout(lhs: Layout, rhs: Layout) -> Layout {
    if lhs == rhs {
        lhs
    } else {
        Layout::Strided
    }
}

/// `lhs + rhs`, elementwise
#[derive(Debug, Clone, Copy)]
pub struct Sum<L, R> {
    lhs: L,
    rhs: R,
}

impl<L, R> MatrixExpr for Sum<L, R>
where
    L: MatrixExpr,
    R: MatrixExpr<Elem = L::Elem>,
    L::Elem: Add<Output = L::Elem>,
{
    type Elem = L::Elem;

    fn dim(&self) -> (usize, usize) {
        self.lhs.dim()
    }

    fn read(&self, i: usize, j: usize) -> Self::Elem {
        self.lhs.read(i, j) + self.rhs.read(i, j)
    }

    fn layout(&self) -> Layout {
        common_layout(self.lhs.layout(), self.rhs.layout())
    }
}

/// `lhs - rhs`, elementwise
#[derive(Debug, Clone, Copy)]
pub struct Difference<L, R> {
    lhs: L,
    rhs: R,
}

impl<L, R> MatrixExpr for Difference<L, R>
where
    L: MatrixExpr,
    R: MatrixExpr<Elem = L::Elem>,
    L::Elem: Sub<Output = L::Elem>,
{
    type Elem = L::Elem;

    fn dim(&self) -> (usize, usize) {
        self.lhs.dim()
    }

    fn read(&self, i: usize, j: usize) -> Self::Elem {
        self.lhs.read(i, j) - self.rhs.read(i, j)
    }

    fn layout(&self) -> Layout {
        common_layout(self.lhs.layout(), self.rhs.layout())
    }
}

/// Combinators available on every expression. Pass arrays by reference or as views to avoid
/// moving them into the expression.
pub trait ExprExt: MatrixExpr + Sized {
    fn transposed(self) -> Transposed<Self> {
        Transposed::new(self)
    }

    fn conjugated(self) -> Conjugated<Self>
    where
        Self::Elem: ComplexFloat,
    {
        Conjugated::new(self)
    }

    fn adjoint(self) -> Adjoint<Self>
    where
        Self::Elem: ComplexFloat,
    {
        Conjugated::new(Transposed::new(self))
    }

    fn scaled(self, factor: Self::Elem) -> Scaled<Self> {
        Scaled { expr: self, factor }
    }

    /// Elementwise sum. Both operands must have the same shape.
    fn plus<R: MatrixExpr<Elem = Self::Elem>>(self, rhs: R) -> Result<Sum<Self, R>> {
        check_same_shape(self.dim(), rhs.dim())?;
        Ok(Sum { lhs: self, rhs })
    }

    /// Elementwise difference. Both operands must have the same shape.
    fn minus<R: MatrixExpr<Elem = Self::Elem>>(self, rhs: R) -> Result<Difference<Self, R>> {
        check_same_shape(self.dim(), rhs.dim())?;
        Ok(Difference { lhs: self, rhs })
    }
}

impl<E: MatrixExpr> ExprExt for E {}
