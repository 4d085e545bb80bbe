use approx::assert_abs_diff_eq;
use ndarray::prelude::*;
use num_complex::Complex64;
use proptest::prelude::*;

use ndarray_triangular::{
    expr::{ExprExt, MatrixExpr},
    shape::ShapeTag,
    solve::*,
    triangular::*,
    UPLO,
};

mod common;

fn tri_system(uplo: UPLO) -> impl Strategy<Value = (Array2<f64>, Array2<f64>)> {
    let squares = common::square_arr().prop_map(move |a| {
        let mut a = a.into_triangular(uplo).unwrap();
        common::dominant_diag(&mut a);
        a
    });
    common::system_of_arr(squares)
}

/// The same systems scaled into `[-1, 1]` and narrowed to single precision
fn tri_system_f32(uplo: UPLO) -> impl Strategy<Value = (Array2<f32>, Array2<f32>)> {
    let squares = common::square_arr().prop_map(move |a| {
        let mut a = a.mapv(|x| x / 1000.0).into_triangular(uplo).unwrap();
        common::dominant_diag(&mut a);
        a.mapv(|x| x as f32)
    });
    common::system_of_arr(squares)
        .prop_map(|(a, x)| (a, x.mapv(|v| (v / 1000.0) as f32)))
}

fn complex_system() -> impl Strategy<Value = (Array2<Complex64>, Array2<f64>)> {
    let squares = common::complex_square_arr().prop_map(|mut a| {
        common::dominant_diag(&mut a);
        a
    });
    common::system_of_arr(squares)
}

fn run_solve_triangular_test(a: Array2<f64>, x: Array2<f64>, uplo: UPLO) {
    let mut b = a.dot(&x);
    let out = a.solve_triangular(&b, uplo).unwrap();
    assert_abs_diff_eq!(out, x, epsilon = 1e-4);

    let out = a.solve_triangular_into(b.clone(), uplo).unwrap();
    assert_abs_diff_eq!(out, x, epsilon = 1e-4);

    let out = a.solve_triangular_inplace(&mut b, uplo).unwrap();
    assert_abs_diff_eq!(*out, x, epsilon = 1e-4);
}

fn run_solve_f32_test(a: Array2<f32>, x: Array2<f32>, uplo: UPLO) {
    let b = a.dot(&x);
    let out = a.solve_triangular(&b, uplo).unwrap();
    assert_abs_diff_eq!(out, x, epsilon = 1e-3);

    let mut b_f = Array2::<f32>::zeros(b.dim().f());
    b_f.assign(&b);
    a.triangular_view(uplo.into())
        .solve_inplace(&mut b_f)
        .unwrap();
    assert_abs_diff_eq!(b_f, x, epsilon = 1e-3);
}

/// Solve through transposed and conjugated views, checking `op(T) * solve(op(T), b) == b`.
fn run_op_solve_test(m1: Array2<Complex64>, rhs: Array2<f64>) {
    let m2 = rhs.mapv(|x| Complex64::new(x, -0.5 * x));
    let v2 = m2.column(0).to_owned();

    let upper = m1.triangular_view(ShapeTag::Upper).to_dense();
    let lower = m1.triangular_view(ShapeTag::Lower).to_dense();

    let adj = m1.view().adjoint();
    let sol = TriangularView::new(&adj, ShapeTag::Lower).solve(&m2).unwrap();
    assert_abs_diff_eq!(upper.view().adjoint().to_owned_array().dot(&sol), m2, epsilon = 1e-6);
    let sol = m1.triangular_view(ShapeTag::Upper).adjoint().solve_vec(&v2).unwrap();
    assert_abs_diff_eq!(upper.view().adjoint().to_owned_array().dot(&sol), v2, epsilon = 1e-6);

    let sol = m1.t().triangular_view(ShapeTag::Upper).solve(&m2).unwrap();
    assert_abs_diff_eq!(lower.t().dot(&sol), m2, epsilon = 1e-6);

    let sol = m1.triangular_view(ShapeTag::Upper).solve(&m2).unwrap();
    assert_abs_diff_eq!(upper.dot(&sol), m2, epsilon = 1e-6);

    let conj = m1.view().conjugated();
    let sol = TriangularView::new(conj, ShapeTag::Lower).solve(&m2).unwrap();
    let lower_conj = lower.mapv(|x| x.conj());
    assert_abs_diff_eq!(lower_conj.dot(&sol), m2, epsilon = 1e-6);
    let sol = m1.triangular_view(ShapeTag::Lower).conjugate().solve(&m2).unwrap();
    assert_abs_diff_eq!(lower_conj.dot(&sol), m2, epsilon = 1e-6);

    // Off-diagonal rows summing below one keep the unit triangle well conditioned
    let n = m1.nrows();
    let small = m1.mapv(|x| x / (2000.0 * n as f64));
    let unit = small.triangular_view(ShapeTag::UnitUpper);
    let sol = unit.solve(&m2).unwrap();
    assert_abs_diff_eq!(unit.to_dense().dot(&sol), m2, epsilon = 1e-6);
}

/// `M * inv(T)` through an in-place solve on a transposed right-hand side
fn run_inverse_test(m1: Array2<f64>) {
    let n = m1.nrows();
    for &uplo in &[UPLO::Lower, UPLO::Upper] {
        let m3 = m1.triangular_view(uplo.into()).to_dense();
        let mut m4 = m3.clone();
        m3.t()
            .triangular_view(ShapeTag::from(uplo.transpose()))
            .solve_inplace(&mut m4.view_mut().reversed_axes())
            .unwrap();
        assert_abs_diff_eq!(m4, Array2::<f64>::eye(n), epsilon = 1e-6);

        let mut m5 = m3.clone();
        m1.triangular_view(uplo.into())
            .solve_inplace_side(Side::Right, &mut m5)
            .unwrap();
        assert_abs_diff_eq!(m5, Array2::<f64>::eye(n), epsilon = 1e-6);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]
    #[test]
    fn solve_triangular_lower(system in tri_system(UPLO::Lower)) {
        let (a, x) = system;
        run_solve_triangular_test(a, x, UPLO::Lower);
    }

    #[test]
    fn solve_triangular_upper(system in tri_system(UPLO::Upper)) {
        let (a, x) = system;
        run_solve_triangular_test(a, x, UPLO::Upper);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]
    #[test]
    fn solve_f32_lower(system in tri_system_f32(UPLO::Lower)) {
        let (a, x) = system;
        run_solve_f32_test(a, x, UPLO::Lower);
    }

    #[test]
    fn solve_f32_upper(system in tri_system_f32(UPLO::Upper)) {
        let (a, x) = system;
        run_solve_f32_test(a, x, UPLO::Upper);
    }

    #[test]
    fn solve_through_ops(system in complex_system()) {
        let (m1, rhs) = system;
        run_op_solve_test(m1, rhs);
    }

    #[test]
    fn inverse_inplace(mut a in common::square_arr()) {
        common::dominant_diag(&mut a);
        run_inverse_test(a);
    }
}

#[test]
fn concrete_upper() {
    let t = array![[2., 1., 1.], [0., 3., 1.], [0., 0., 4.]];
    let b = array![[1.], [1.], [1.]];
    let x = t.triangular_view(ShapeTag::Upper).solve(&b).unwrap();
    assert_eq!(x, array![[0.25], [0.25], [0.25]]);
}

#[test]
fn concrete_unit_lower() {
    let t = array![[1., 0.], [5., 1.]];
    let mut b = array![1., 2.];
    t.triangular_view(ShapeTag::UnitLower)
        .solve_vec_inplace(&mut b)
        .unwrap();
    assert_eq!(b, array![1., -3.]);
}

#[test]
fn row_major_and_column_major_rhs() {
    let t = array![[4., 0., 0.], [1., 2., 0.], [3., -1., 5.]];
    let x = array![[1., 2.], [3., 4.], [5., 6.]];
    let b = t.dot(&x);

    let mut b_f = Array2::<f64>::zeros((3, 2).f());
    b_f.assign(&b);
    let view = t.triangular_view(ShapeTag::Lower);
    view.solve_inplace(&mut b_f).unwrap();
    assert_abs_diff_eq!(b_f, x, epsilon = 1e-12);
    assert_abs_diff_eq!(view.solve(&b).unwrap(), x, epsilon = 1e-12);
}
