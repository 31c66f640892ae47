//! Randomized checks of algebraic identities that every implementation has to satisfy.

use std::f64::consts::TAU;

use fastrand::Rng;
use ortho::{
    assert_approx_eq, matrices, quats, vectors, Context3d, Context4d, Context4f, Mat3d, Mat4d,
    Mat4f, Quatd, Vec3d, Vector,
};

const ITERATIONS: usize = 200;

fn signed(rng: &mut Rng) -> f64 {
    rng.f64() * 2.0 - 1.0
}

fn random_vector<const N: usize>(rng: &mut Rng) -> Vector<f64, N> {
    Vector::from_fn(|_| signed(rng) * 10.0)
}

/// A random matrix with a dominant diagonal, so that it is well-conditioned.
fn random_invertible4(rng: &mut Rng) -> Mat4d {
    Mat4d::from_fn(|row, col| {
        let offset = if row == col { 4.0 } else { 0.0 };
        signed(rng) + offset
    })
}

fn random_rotation(rng: &mut Rng) -> (Vec3d, f64) {
    loop {
        let axis = random_vector::<3>(rng);
        if axis.magnitude_squared() > 1e-3 {
            return (axis.normalize(), rng.f64() * TAU);
        }
    }
}

#[test]
fn normalize_is_unit_or_fixed_point() {
    let mut rng = Rng::with_seed(0x9e3779b97f4a7c15);
    for _ in 0..ITERATIONS {
        let v = random_vector::<4>(&mut rng);
        let mut n = Vector::ZERO;
        vectors::normalize(&v, &mut n);
        assert_approx_eq!(vectors::magnitude(&n), 1.0).abs(1e-15);
    }

    let mut n = Vec3d::X;
    vectors::normalize(&Vec3d::ZERO, &mut n);
    assert_eq!(n, Vec3d::ZERO);
}

#[test]
fn inverse_times_matrix_is_identity() {
    let mut rng = Rng::with_seed(0x3024b6663d843ca2);
    let mut ctx = Context4d::new();
    for _ in 0..ITERATIONS {
        let m = random_invertible4(&mut rng);
        let mut inv = Mat4d::ZERO;
        assert!(matrices::invert4(&mut ctx, &m, &mut inv));
        assert_approx_eq!(m * inv, Mat4d::IDENTITY).abs(1e-14);

        let mut inv_inv = Mat4d::ZERO;
        assert!(matrices::invert4(&mut ctx, &inv, &mut inv_inv));
        assert_approx_eq!(inv_inv, m).abs(1e-13);

        // The upper left 3x3 part is diagonally dominant as well.
        let m3 = Mat3d::from_fn(|row, col| m[(row, col)]);
        let inv3 = m3.invert().expect("diagonally dominant matrix is invertible");
        assert_approx_eq!(m3 * inv3, Mat3d::IDENTITY).abs(1e-14);
    }
}

#[test]
fn invert_f32_accumulates_in_f64() {
    let mut rng = Rng::with_seed(7);
    let mut ctx = Context4f::new();
    for _ in 0..ITERATIONS {
        let m = random_invertible4(&mut rng).map(|e| e as f32);
        let mut inv = Mat4f::ZERO;
        assert!(matrices::invert4(&mut ctx, &m, &mut inv));
        assert_approx_eq!(m * inv, Mat4f::IDENTITY).abs(1e-6);
    }
}

#[test]
fn transpose_is_an_involution() {
    let mut rng = Rng::with_seed(42);
    for _ in 0..ITERATIONS {
        let m = Mat4d::from_fn(|_, _| signed(&mut rng) * 1e6);
        let mut t = Mat4d::ZERO;
        matrices::transpose(&m, &mut t);
        matrices::transpose_in_place(&mut t);
        assert_eq!(t, m);
    }
}

#[test]
fn quat_times_conjugate_is_real() {
    let mut rng = Rng::with_seed(1);
    for _ in 0..ITERATIONS {
        let q = Quatd::from_vector(random_vector::<4>(&mut rng));
        let mut c = Quatd::ZERO;
        quats::conjugate(&q, &mut c);
        let mut p = Quatd::ZERO;
        quats::multiply(&q, &c, &mut p);

        let scale = quats::magnitude_squared(&q);
        assert_approx_eq!([p.x, p.y, p.z], [0.0; 3]).abs(1e-12);
        assert_approx_eq!(p.w, scale).rel(1e-15);
    }
}

#[test]
fn slerp_endpoints_are_normalized_inputs() {
    let mut rng = Rng::with_seed(2);
    for _ in 0..ITERATIONS {
        let a = Quatd::from_vector(random_vector::<4>(&mut rng));
        let b = Quatd::from_vector(random_vector::<4>(&mut rng));
        if quats::dot(&a.normalize(), &b.normalize()).abs() > quats::SLERP_LINEAR_THRESHOLD {
            continue;
        }

        let mut out = Quatd::ZERO;
        quats::slerp(&a, &b, 0.0, &mut out);
        assert_approx_eq!(out, a.normalize()).abs(1e-15);

        // `b` may have been flipped onto the shorter arc.
        quats::slerp(&a, &b, 1.0, &mut out);
        let b = b.normalize();
        if out.dot(b) < 0.0 {
            assert_approx_eq!(out, -b).abs(1e-14);
        } else {
            assert_approx_eq!(out, b).abs(1e-14);
        }
    }
}

#[test]
fn rotation_matrix_quat_round_trip() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut rng = Rng::with_seed(0xdeadbeef);
    for _ in 0..ITERATIONS {
        let (axis, angle) = random_rotation(&mut rng);
        let mut m = Mat3d::ZERO;
        matrices::make_rotation3(&axis, angle, &mut m);

        let mut q = Quatd::ZERO;
        quats::from_matrix3(&m, &mut q);
        assert_approx_eq!(q.magnitude(), 1.0).abs(1e-14);

        let mut back = Mat3d::ZERO;
        quats::to_matrix3(&q, &mut back);
        assert_approx_eq!(back, m).abs(1e-14);

        let mut m4 = Mat4d::ZERO;
        matrices::make_rotation4(&axis, angle, &mut m4);
        let mut q4 = Quatd::ZERO;
        quats::from_matrix4(&m4, &mut q4);
        assert_eq!(q4, q);
    }
}

#[test]
fn quat_and_matrix_rotate_alike() {
    let mut rng = Rng::with_seed(3);
    for _ in 0..ITERATIONS {
        let (axis, angle) = random_rotation(&mut rng);
        let v = random_vector::<3>(&mut rng);

        let q = Quatd::from_axis_angle(axis, angle);
        let mut m = Mat3d::ZERO;
        matrices::make_rotation3(&axis, angle, &mut m);

        assert_approx_eq!(q * v, m * v).abs(1e-13);
        assert_approx_eq!(vectors::magnitude(&(q * v)), vectors::magnitude(&v)).abs(1e-13);
    }
}

#[test]
fn elimination_reaches_upper_triangular_form() {
    let mut rng = Rng::with_seed(4);
    let mut ctx = Context3d::new();
    for _ in 0..ITERATIONS {
        let m = Mat3d::from_fn(|row, col| signed(&mut rng) + if row == col { 3.0 } else { 0.0 });
        let det = m.determinant();

        let mut u = m;
        for pivot in 0..3 {
            for row in pivot + 1..3 {
                let factor = -u[(row, pivot)] / u[(pivot, pivot)];
                matrices::add_row_scaled_in_place(&mut ctx, &mut u, pivot, row, factor);
            }
        }

        for row in 1..3 {
            for col in 0..row {
                assert_approx_eq!(u[(row, col)], 0.0).abs(1e-14);
            }
        }
        // Adding multiples of rows does not change the determinant.
        assert_approx_eq!(u.diagonal().as_slice().iter().product::<f64>(), det).abs(1e-12);
    }
}
