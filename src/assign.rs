//! Region-restricted assignment through a [`TriangularViewMut`].
//!
//! Every operation here visits exactly the cells inside the view's tag, walking rows first for
//! row-major storage and columns first otherwise. Cells outside the region, including the
//! diagonal of a unit tag, are never read or written.

use crate::{
    check_same_shape,
    expr::{Layout, MatrixExpr},
    index::*,
    shape::ShapeTag,
    triangular::TriangularViewMut,
    LinalgError, Result, Scalar,
};

/// Operator applied by [`TriangularViewMut::compound_assign`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundOp {
    Add,
    Sub,
}

impl CompoundOp {
    fn apply<A: Scalar>(self, lhs: A, rhs: A) -> A {
        match self {
            CompoundOp::Add => lhs + rhs,
            CompoundOp::Sub => lhs - rhs,
        }
    }
}

/// Call `f(i, j)` for every cell of an `rows x cols` matrix inside `tag`, in the order that suits
/// `layout`.
fn for_each_in_region(
    tag: ShapeTag,
    (rows, cols): (usize, usize),
    layout: Layout,
    mut f: impl FnMut(usize, usize),
) {
    match layout {
        Layout::RowMajor => {
            for i in 0..rows {
                for j in tag.row_range(i, cols) {
                    f(i, j);
                }
            }
        }
        Layout::ColumnMajor | Layout::Strided => {
            if layout == Layout::Strided {
                log::debug!(
                    target: "ndarray_triangular_perf",
                    "Triangular assignment prefers row-major or column-major storage. Found matrix with generic strides."
                );
            }
            for j in 0..cols {
                for i in tag.col_range(j, rows) {
                    f(i, j);
                }
            }
        }
    }
}

impl<'a, A: Scalar> TriangularViewMut<'a, A> {
    fn for_each_cell(&mut self, mut f: impl FnMut(&mut A, usize, usize)) {
        let layout = Layout::of(&self.data);
        let data = &mut self.data;
        for_each_in_region(self.tag, data.dim(), layout, |i, j| {
            f(unsafe { data.atm(i, j) }, i, j)
        });
    }

    /// Copy `rhs(i, j)` into every cell of the region. `rhs` must have the view's shape.
    pub fn assign<E: MatrixExpr<Elem = A>>(&mut self, rhs: E) -> Result<()> {
        check_same_shape(self.dim(), rhs.dim())?;
        self.for_each_cell(|cell, i, j| *cell = rhs.read(i, j));
        Ok(())
    }

    /// Replace every cell of the region with `op(cell, rhs(i, j))`.
    pub fn compound_assign<E: MatrixExpr<Elem = A>>(
        &mut self,
        rhs: E,
        op: CompoundOp,
    ) -> Result<()> {
        check_same_shape(self.dim(), rhs.dim())?;
        self.for_each_cell(|cell, i, j| *cell = op.apply(*cell, rhs.read(i, j)));
        Ok(())
    }

    pub fn add_assign<E: MatrixExpr<Elem = A>>(&mut self, rhs: E) -> Result<()> {
        self.compound_assign(rhs, CompoundOp::Add)
    }

    pub fn sub_assign<E: MatrixExpr<Elem = A>>(&mut self, rhs: E) -> Result<()> {
        self.compound_assign(rhs, CompoundOp::Sub)
    }

    /// Set every cell of the region to `value`.
    pub fn fill(&mut self, value: A) {
        self.for_each_cell(|cell, _, _| *cell = value);
    }

    /// Exchange the cells that lie inside both views' regions. Both views must cover the same
    /// side of the diagonal and have the same shape.
    pub fn swap(&mut self, other: &mut TriangularViewMut<'_, A>) -> Result<()> {
        if self.tag.side() != other.tag.side() {
            return Err(LinalgError::SideMismatch {
                left: self.tag.side(),
                right: other.tag.side(),
            });
        }
        check_same_shape(self.dim(), other.dim())?;

        let their_tag = other.tag;
        let theirs = &mut other.data;
        self.for_each_cell(|cell, i, j| {
            if their_tag.contains(i, j) {
                std::mem::swap(cell, unsafe { theirs.atm(i, j) });
            }
        });
        Ok(())
    }
}
