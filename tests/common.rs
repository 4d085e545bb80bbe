#![allow(unused)]

use std::ops::RangeInclusive;

use ndarray::prelude::*;
use num_complex::{Complex64, ComplexFloat};
use num_traits::NumCast;
use proptest::prelude::*;
use proptest_derive::Arbitrary;

const FLOAT_RANGE: RangeInclusive<f64> = -1000.0..=1000.0;
const DIM_RANGE: RangeInclusive<usize> = 1..=10;

pub const SENTINEL: f64 = -12345.5;

/// Memory order of a generated array: row-major, column-major, or negatively strided
#[derive(Debug, Arbitrary)]
struct Storage {
    invert_rows: bool,
    invert_cols: bool,
    transpose: bool,
}

impl Storage {
    fn apply<A>(&self, mut arr: Array2<A>) -> Array2<A> {
        if self.invert_rows {
            arr.invert_axis(Axis(0));
        }
        if self.invert_cols {
            arr.invert_axis(Axis(1));
        }
        if self.transpose {
            arr.reversed_axes()
        } else {
            arr
        }
    }
}

prop_compose! {
    pub fn square_arr()(dim in DIM_RANGE)
        (data in prop::collection::vec(FLOAT_RANGE, dim*dim), dim in Just(dim), storage in any::<Storage>()) -> Array2<f64> {
        storage.apply(Array2::from_shape_vec((dim, dim), data).unwrap())
    }
}

prop_compose! {
    pub fn rect_arr()(rows in DIM_RANGE, cols in DIM_RANGE)
        (data in prop::collection::vec(FLOAT_RANGE, rows*cols), rows in Just(rows), cols in Just(cols), storage in any::<Storage>()) -> Array2<f64> {
        // Transposition swaps the shape, so build it with the axes already swapped
        if storage.transpose {
            storage.apply(Array2::from_shape_vec((cols, rows), data).unwrap())
        } else {
            storage.apply(Array2::from_shape_vec((rows, cols), data).unwrap())
        }
    }
}

prop_compose! {
    pub fn complex_square_arr()(dim in DIM_RANGE)
        (re in prop::collection::vec(FLOAT_RANGE, dim*dim), im in prop::collection::vec(FLOAT_RANGE, dim*dim), dim in Just(dim), storage in any::<Storage>()) -> Array2<Complex64> {
        let data: Vec<Complex64> = re.into_iter().zip(im).map(|(re, im)| Complex64::new(re, im)).collect();
        storage.apply(Array2::from_shape_vec((dim, dim), data).unwrap())
    }
}

/// Make the diagonal dominate both its row and its column, so that the matrix, its transpose and
/// any of its triangles are safe to solve against
pub fn dominant_diag<A: ComplexFloat<Real = f64>>(arr: &mut Array2<A>) {
    let n = arr.nrows();
    for i in 0..n {
        let row: f64 = (0..n).filter(|&j| j != i).map(|j| arr[(i, j)].abs()).sum();
        let col: f64 = (0..n).filter(|&j| j != i).map(|j| arr[(j, i)].abs()).sum();
        arr[(i, i)] = <A as NumCast>::from(1.0 + row.max(col)).unwrap();
    }
}

/// Pair a matrix with a right-hand side whose row count matches its size
pub fn system_of_arr<A: Clone + std::fmt::Debug + 'static>(
    arr: impl Strategy<Value = Array2<A>>,
) -> impl Strategy<Value = (Array2<A>, Array2<f64>)> {
    arr.prop_flat_map(|arr| {
        let dim = arr.nrows();
        (Just(arr), (1..=5usize).prop_flat_map(move |cols| {
            prop::collection::vec(FLOAT_RANGE, dim * cols)
                .prop_map(move |data| Array2::from_shape_vec((dim, cols), data).unwrap())
        }))
    })
}
