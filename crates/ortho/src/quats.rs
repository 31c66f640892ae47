//! Quaternion operations with explicit outputs.
//!
//! Quaternions are read through [`ReadQuat`] and written through [`WriteQuat`], so the functions
//! here accept [`Quat`] values, `[x, y, z, w]` arrays and storage-backed views alike.
//!
//! No operation enforces unit length. [`slerp`], [`to_matrix3`] and [`to_matrix4`] assume
//! normalized input and produce a meaningless (but finite, and never panicking) result otherwise.
//! Call [`normalize`] first when in doubt.
//!
//! # Examples
//!
//! ```
//! # use ortho::*;
//! use std::f64::consts::FRAC_PI_2;
//!
//! let mut q = Quatd::IDENTITY;
//! quats::from_axis_angle(&Vec3d::Z, FRAC_PI_2, &mut q);
//!
//! let mut m = Mat3d::ZERO;
//! quats::to_matrix3(&q, &mut m);
//! assert_approx_eq!(m * Vec3d::X, Vec3d::Y);
//!
//! let mut back = Quatd::ZERO;
//! quats::from_matrix3(&m, &mut back);
//! assert_approx_eq!(back, q);
//! ```

use crate::{
    access::{ReadMatrix, ReadQuat, ReadVector, WriteMatrix, WriteQuat, WriteVector},
    approx::{ApproxContext, ApproxEq},
    context::QuatContext,
    matrices, Quat, Real, Vector,
};

/// Above this cosine of the angle between two quaternions, [`slerp`] falls back to normalized
/// linear interpolation.
///
/// For nearly parallel inputs the `sin` of the angle between them approaches zero, and the
/// spherical formula loses precision.
pub const SLERP_LINEAR_THRESHOLD: f64 = 0.9995;

fn widen<T: Real>(q: &(impl ReadQuat<T> + ?Sized)) -> Vector<f64, 4> {
    Vector::from([q.x().widen(), q.y().widen(), q.z().widen(), q.w().widen()])
}

fn write<T: Real>(out: &mut (impl WriteQuat<T> + ?Sized), q: Vector<f64, 4>) {
    let [x, y, z, w] = q.into_array();
    out.set_x(T::narrow(x));
    out.set_y(T::narrow(y));
    out.set_z(T::narrow(z));
    out.set_w(T::narrow(w));
}

fn components<T: Copy>(q: &(impl ReadQuat<T> + ?Sized)) -> [T; 4] {
    [q.x(), q.y(), q.z(), q.w()]
}

/// Applies `f` to each pair of components of `a` and `b`, and writes the results to `out`.
fn zip_with<T: Real>(
    a: &(impl ReadQuat<T> + ?Sized),
    b: &(impl ReadQuat<T> + ?Sized),
    out: &mut (impl WriteQuat<T> + ?Sized),
    f: impl Fn(T, T) -> T,
) {
    let [ax, ay, az, aw] = components(a);
    let [bx, by, bz, bw] = components(b);
    out.assign(Quat::new(f(ax, bx), f(ay, by), f(az, bz), f(aw, bw)));
}

/// Copies the components of `q` into `out`.
pub fn copy<T: Copy>(q: &(impl ReadQuat<T> + ?Sized), out: &mut (impl WriteQuat<T> + ?Sized)) {
    out.set_x(q.x());
    out.set_y(q.y());
    out.set_z(q.z());
    out.set_w(q.w());
}

/// Overwrites `out` with the identity rotation `(0, 0, 0, 1)`.
pub fn set_identity<T: Real>(out: &mut (impl WriteQuat<T> + ?Sized)) {
    out.assign(Quat::IDENTITY);
}

/// `out = a + b`, component-wise.
pub fn add<T: Real>(
    a: &(impl ReadQuat<T> + ?Sized),
    b: &(impl ReadQuat<T> + ?Sized),
    out: &mut (impl WriteQuat<T> + ?Sized),
) {
    zip_with(a, b, out, |l, r| l + r);
}

/// `a += b`.
pub fn add_in_place<'a, T: Real, Q>(a: &'a mut Q, b: &(impl ReadQuat<T> + ?Sized)) -> &'a mut Q
where
    Q: ReadQuat<T> + WriteQuat<T> + ?Sized,
{
    let sum = Quat::from(components(a)) + Quat::from(components(b));
    a.assign(sum);
    a
}

/// `out = a - b`, component-wise.
pub fn subtract<T: Real>(
    a: &(impl ReadQuat<T> + ?Sized),
    b: &(impl ReadQuat<T> + ?Sized),
    out: &mut (impl WriteQuat<T> + ?Sized),
) {
    zip_with(a, b, out, |l, r| l - r);
}

/// `a -= b`.
pub fn subtract_in_place<'a, T: Real, Q>(
    a: &'a mut Q,
    b: &(impl ReadQuat<T> + ?Sized),
) -> &'a mut Q
where
    Q: ReadQuat<T> + WriteQuat<T> + ?Sized,
{
    let diff = Quat::from(components(a)) - Quat::from(components(b));
    a.assign(diff);
    a
}

/// `out = q * r`, component-wise.
pub fn scale<T: Real>(
    q: &(impl ReadQuat<T> + ?Sized),
    r: f64,
    out: &mut (impl WriteQuat<T> + ?Sized),
) {
    write(out, widen(q) * r);
}

/// `q *= r`.
pub fn scale_in_place<'a, T: Real, Q>(q: &'a mut Q, r: f64) -> &'a mut Q
where
    Q: ReadQuat<T> + WriteQuat<T> + ?Sized,
{
    let scaled = widen(q) * r;
    write(q, scaled);
    q
}

/// `out = -q`.
///
/// `-q` represents the same rotation as `q`.
pub fn negate<T: Real>(q: &(impl ReadQuat<T> + ?Sized), out: &mut (impl WriteQuat<T> + ?Sized)) {
    out.assign(-q.to_quat());
}

/// `q = -q`.
pub fn negate_in_place<'a, T: Real, Q>(q: &'a mut Q) -> &'a mut Q
where
    Q: ReadQuat<T> + WriteQuat<T> + ?Sized,
{
    let neg = -q.to_quat();
    q.assign(neg);
    q
}

fn hamilton(a: Vector<f64, 4>, b: Vector<f64, 4>) -> Vector<f64, 4> {
    let [x1, y1, z1, w1] = a.into_array();
    let [x2, y2, z2, w2] = b.into_array();
    Vector::from([
        w1 * x2 + x1 * w2 + y1 * z2 - z1 * y2,
        w1 * y2 - x1 * z2 + y1 * w2 + z1 * x2,
        w1 * z2 + x1 * y2 - y1 * x2 + z1 * w2,
        w1 * w2 - x1 * x2 - y1 * y2 - z1 * z2,
    ])
}

/// Computes the Hamilton product `out = a * b`.
///
/// If both operands are rotations, the product is the rotation that first applies `b` and then
/// `a`. The product is not commutative.
pub fn multiply<T: Real>(
    a: &(impl ReadQuat<T> + ?Sized),
    b: &(impl ReadQuat<T> + ?Sized),
    out: &mut (impl WriteQuat<T> + ?Sized),
) {
    write(out, hamilton(widen(a), widen(b)));
}

/// `a = a * b`.
pub fn multiply_in_place<'a, T: Real, Q>(a: &'a mut Q, b: &(impl ReadQuat<T> + ?Sized)) -> &'a mut Q
where
    Q: ReadQuat<T> + WriteQuat<T> + ?Sized,
{
    let p = hamilton(widen(a), widen(b));
    write(a, p);
    a
}

/// Writes the conjugate of `q`, which has its vector part `(x, y, z)` negated, to `out`.
///
/// For unit quaternions, the conjugate is the inverse rotation.
pub fn conjugate<T: Real>(
    q: &(impl ReadQuat<T> + ?Sized),
    out: &mut (impl WriteQuat<T> + ?Sized),
) {
    out.assign(Quat::new(-q.x(), -q.y(), -q.z(), q.w()));
}

/// `q = conj(q)`.
pub fn conjugate_in_place<'a, T: Real, Q>(q: &'a mut Q) -> &'a mut Q
where
    Q: ReadQuat<T> + WriteQuat<T> + ?Sized,
{
    let c = Quat::new(-q.x(), -q.y(), -q.z(), q.w());
    q.assign(c);
    q
}

/// Computes the 4-dimensional dot product of `a` and `b`.
pub fn dot<T: Real>(a: &(impl ReadQuat<T> + ?Sized), b: &(impl ReadQuat<T> + ?Sized)) -> f64 {
    widen(a).dot(widen(b))
}

/// `q · q`, accumulated in `f64`.
pub fn magnitude_squared<T: Real>(q: &(impl ReadQuat<T> + ?Sized)) -> f64 {
    dot(q, q)
}

/// The length of `q` as a 4-vector.
pub fn magnitude<T: Real>(q: &(impl ReadQuat<T> + ?Sized)) -> f64 {
    magnitude_squared(q).sqrt()
}

/// Scales `q` to unit length and writes the result to `out`.
///
/// The zero quaternion is copied unchanged.
pub fn normalize<T: Real>(
    q: &(impl ReadQuat<T> + ?Sized),
    out: &mut (impl WriteQuat<T> + ?Sized),
) {
    write(out, widen(q).normalize());
}

/// Scales `q` to unit length. The zero quaternion is left unchanged.
pub fn normalize_in_place<'a, T: Real, Q>(q: &'a mut Q) -> &'a mut Q
where
    Q: ReadQuat<T> + WriteQuat<T> + ?Sized,
{
    let n = widen(q).normalize();
    write(q, n);
    q
}

/// Interpolates component-wise between `a` (at `alpha = 0`) and `b` (at `alpha = 1`).
///
/// The result is not normalized. Use [`slerp`] to interpolate between rotations.
pub fn interpolate_linear<T: Real>(
    a: &(impl ReadQuat<T> + ?Sized),
    b: &(impl ReadQuat<T> + ?Sized),
    alpha: f64,
    out: &mut (impl WriteQuat<T> + ?Sized),
) {
    let a = widen(a);
    let b = widen(b);
    write(out, a + (b - a) * alpha);
}

/// Spherical linear interpolation between the rotations `a` (at `t = 0`) and `b` (at `t = 1`).
///
/// Both inputs are normalized first. The interpolation follows the shorter arc between the two
/// rotations, so `b` is negated if the two point into opposite hemispheres. The rotation changes
/// at constant angular velocity as `t` goes from 0 to 1.
///
/// Because of that, the result at `t = 1` is the normalized `b` only up to sign: it is `-b` when
/// the dot product of the normalized inputs is negative. Both describe the same rotation.
///
/// If the inputs are nearly parallel (their dot product exceeds [`SLERP_LINEAR_THRESHOLD`]), a
/// normalized linear interpolation is computed instead. This is checked before `b` is moved onto
/// the shorter arc, so nearly opposite inputs still take the spherical path.
///
/// # Examples
///
/// ```
/// # use ortho::*;
/// use std::f64::consts::FRAC_PI_2;
///
/// let a = Quatd::IDENTITY;
/// let b = Quatd::from_rotation_z(FRAC_PI_2);
/// let mut half = Quatd::ZERO;
/// quats::slerp(&a, &b, 0.5, &mut half);
/// assert_approx_eq!(half, Quatd::from_rotation_z(FRAC_PI_2 / 2.0));
/// ```
pub fn slerp<T: Real>(
    a: &(impl ReadQuat<T> + ?Sized),
    b: &(impl ReadQuat<T> + ?Sized),
    t: f64,
    out: &mut (impl WriteQuat<T> + ?Sized),
) {
    let a = widen(a).normalize();
    let mut b = widen(b).normalize();

    let mut d = a.dot(b);
    if d > SLERP_LINEAR_THRESHOLD {
        log::trace!("slerp: inputs nearly parallel (dot = {d}), using normalized lerp");
        write(out, (a + (b - a) * t).normalize());
        return;
    }

    if d < 0.0 {
        b = -b;
        d = -d;
    }

    let d = d.clamp(-1.0, 1.0);
    let theta = d.acos() * t;
    let orthogonal = (b - a * d).normalize();
    let (sin, cos) = theta.sin_cos();
    write(out, a * cos + orthogonal * sin);
}

/// Computes the quaternion for a rotation by `angle` radians around `axis`.
///
/// `axis` must have unit length; it is not normalized here. The rotation is counterclockwise when
/// looking against the direction of `axis`, matching [`matrices::make_rotation3`].
pub fn from_axis_angle<T: Real>(
    axis: &(impl ReadVector<T, 3> + ?Sized),
    angle: f64,
    out: &mut (impl WriteQuat<T> + ?Sized),
) {
    let (sin, cos) = (angle * 0.5).sin_cos();
    let [x, y, z] = axis.to_vector().map(T::widen).into_array();
    write(out, Vector::from([x * sin, y * sin, z * sin, cos]));
}

/// Converts the upper left 3x3 part of a rotation matrix to a quaternion, using Shepperd's
/// method.
fn shepperd(m: [[f64; 3]; 3]) -> Vector<f64, 4> {
    let [[m00, m01, m02], [m10, m11, m12], [m20, m21, m22]] = m;
    let trace = m00 + m11 + m22;

    // Pick the component with the largest magnitude to take the square root of, so that the
    // divisor `s` stays away from zero.
    let [x, y, z, w] = if trace > 0.0 {
        log::trace!("shepperd: positive trace ({trace})");
        let s = 2.0 * (trace + 1.0).sqrt();
        [(m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s, s / 4.0]
    } else if m00 > m11 && m00 > m22 {
        log::trace!("shepperd: m00 is the largest diagonal element");
        let s = 2.0 * (1.0 + m00 - m11 - m22).sqrt();
        [s / 4.0, (m01 + m10) / s, (m02 + m20) / s, (m21 - m12) / s]
    } else if m11 > m22 {
        log::trace!("shepperd: m11 is the largest diagonal element");
        let s = 2.0 * (1.0 + m11 - m00 - m22).sqrt();
        [(m01 + m10) / s, s / 4.0, (m12 + m21) / s, (m02 - m20) / s]
    } else {
        log::trace!("shepperd: m22 is the largest diagonal element");
        let s = 2.0 * (1.0 + m22 - m00 - m11).sqrt();
        [(m02 + m20) / s, (m12 + m21) / s, s / 4.0, (m10 - m01) / s]
    };

    Vector::from([x, y, z, w])
}

fn upper3<T: Real, const N: usize>(m: &(impl ReadMatrix<T, N> + ?Sized)) -> [[f64; 3]; 3] {
    std::array::from_fn(|row| std::array::from_fn(|col| m.get(row, col).widen()))
}

/// Converts the rotation matrix `m` to a quaternion.
///
/// `m` must be a pure rotation (orthonormal, with determinant 1).
pub fn from_matrix3<T: Real>(
    m: &(impl ReadMatrix<T, 3> + ?Sized),
    out: &mut (impl WriteQuat<T> + ?Sized),
) {
    write(out, shepperd(upper3(m)));
}

/// Converts the rotation in the upper left 3x3 part of `m` to a quaternion.
///
/// The bottom-right element `m[(3, 3)]` is ignored. For a homogeneous matrix that is scaled
/// uniformly by that element, this only changes the magnitude of the equivalent quaternion, not
/// the orientation it represents. The translation column and the bottom row are ignored as well.
pub fn from_matrix4<T: Real>(
    m: &(impl ReadMatrix<T, 4> + ?Sized),
    out: &mut (impl WriteQuat<T> + ?Sized),
) {
    write(out, shepperd(upper3(m)));
}

fn rotation_matrix<T: Real>(q: &(impl ReadQuat<T> + ?Sized)) -> [[f64; 3]; 3] {
    let [x, y, z, w] = widen(q).into_array();
    let (xx, xy, xz) = (x * x, x * y, x * z);
    let (yy, yz, zz) = (y * y, y * z, z * z);
    let (wx, wy, wz) = (w * x, w * y, w * z);

    [
        [1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy)],
        [2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx)],
        [2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (xx + yy)],
    ]
}

/// Writes the rotation matrix equivalent to the unit quaternion `q` to `out`.
pub fn to_matrix3<T: Real>(
    q: &(impl ReadQuat<T> + ?Sized),
    out: &mut (impl WriteMatrix<T, 3> + ?Sized),
) {
    for (row, elems) in rotation_matrix(q).iter().enumerate() {
        for (col, elem) in elems.iter().enumerate() {
            out.set(row, col, T::narrow(*elem));
        }
    }
}

/// Writes the homogeneous rotation matrix equivalent to the unit quaternion `q` to `out`.
pub fn to_matrix4<T: Real>(
    q: &(impl ReadQuat<T> + ?Sized),
    out: &mut (impl WriteMatrix<T, 4> + ?Sized),
) {
    matrices::set_identity(out);
    for (row, elems) in rotation_matrix(q).iter().enumerate() {
        for (col, elem) in elems.iter().enumerate() {
            out.set(row, col, T::narrow(*elem));
        }
    }
}

/// Rotates `v` by the unit quaternion `q`.
pub fn rotate_vector<T: Real>(
    q: &(impl ReadQuat<T> + ?Sized),
    v: &(impl ReadVector<T, 3> + ?Sized),
    out: &mut (impl WriteVector<T, 3> + ?Sized),
) {
    let [x, y, z, w] = widen(q).into_array();
    let u = Vector::from([x, y, z]);
    let v = v.to_vector().map(T::widen);

    // v + 2w (u × v) + 2 u × (u × v)
    let uv = u.cross(v);
    let uuv = u.cross(uv);
    let rotated = v + uv * (2.0 * w) + uuv * 2.0;
    out.assign(rotated.map(T::narrow));
}

/// Computes the rotation of a camera at `origin` looking at `target`.
///
/// This builds the view matrix with [`matrices::look_at4`] and converts its rotation part to a
/// quaternion. Like the matrix version, a parallel `up` vector produces a degenerate result
/// instead of an error.
pub fn look_at<T: Real>(
    ctx: &mut QuatContext<T>,
    origin: &(impl ReadVector<T, 3> + ?Sized),
    target: &(impl ReadVector<T, 3> + ?Sized),
    up: &(impl ReadVector<T, 3> + ?Sized),
    out: &mut (impl WriteQuat<T> + ?Sized),
) {
    matrices::look_at4(&mut ctx.matrices, origin, target, up, &mut ctx.view);
    from_matrix4(&ctx.view, out);
}

/// Returns whether all components of `q` are exactly zero.
pub fn is_zero<T: Real>(q: &(impl ReadQuat<T> + ?Sized)) -> bool {
    components(q).iter().all(|c| *c == T::ZERO)
}

/// Returns whether `q` is exactly the identity `(0, 0, 0, 1)`.
///
/// `-identity` represents the same rotation, but is not considered the identity here.
pub fn is_identity<T: Real>(q: &(impl ReadQuat<T> + ?Sized)) -> bool {
    components(q) == [T::ZERO, T::ZERO, T::ZERO, T::ONE]
}

/// Compares `a` and `b` component-wise using the tolerances in `context`.
pub fn almost_equal<T: ApproxEq + Copy>(
    context: &ApproxContext<T::Tolerance>,
    a: &(impl ReadQuat<T> + ?Sized),
    b: &(impl ReadQuat<T> + ?Sized),
) -> bool {
    components(a)
        .iter()
        .zip(components(b).iter())
        .all(|(a, b)| context.almost_equal(a, b))
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use crate::{
        assert_approx_eq, assert_approx_ne, vec3, Mat3d, Mat4d, Mat4f, QuatContextd, Quatd,
        Quatf, Vec3d, Vec3f,
    };

    use super::*;

    #[test]
    fn arithmetic() {
        let a = Quatd::new(1.0, 2.0, 3.0, 4.0);
        let b = Quatd::new(0.5, 0.5, 0.5, 0.5);
        let mut out = Quatd::ZERO;

        add(&a, &b, &mut out);
        assert_eq!(out, Quatd::new(1.5, 2.5, 3.5, 4.5));
        subtract_in_place(&mut out, &b);
        assert_eq!(out, a);
        scale(&a, 2.0, &mut out);
        assert_eq!(out, Quatd::new(2.0, 4.0, 6.0, 8.0));
        negate_in_place(&mut out);
        assert_eq!(out, Quatd::new(-2.0, -4.0, -6.0, -8.0));
        add_in_place(&mut out, &a);
        scale_in_place(&mut out, -1.0);
        assert_eq!(out, a);

        let mut arr = [0.0f32; 4];
        negate(&Quatf::IDENTITY, &mut arr);
        assert_eq!(arr, [-0.0, -0.0, -0.0, -1.0]);
    }

    #[test]
    fn hamilton_product() {
        let i = Quatd::new(1.0, 0.0, 0.0, 0.0);
        let j = Quatd::new(0.0, 1.0, 0.0, 0.0);
        let k = Quatd::new(0.0, 0.0, 1.0, 0.0);
        let minus_one = Quatd::new(0.0, 0.0, 0.0, -1.0);

        let mut out = Quatd::ZERO;
        multiply(&i, &j, &mut out);
        assert_eq!(out, k);
        multiply(&j, &i, &mut out);
        assert_eq!(out, -k);
        multiply(&i, &i, &mut out);
        assert_eq!(out, minus_one);
        multiply(&k, &k, &mut out);
        assert_eq!(out, minus_one);

        let mut q = i;
        multiply_in_place(&mut q, &Quatd::IDENTITY);
        assert_eq!(q, i);
    }

    #[test]
    fn conjugate_product_is_magnitude_squared() {
        let q = Quatd::new(1.0, -2.0, 0.5, 3.0);
        let mut c = Quatd::ZERO;
        conjugate(&q, &mut c);
        assert_eq!(c, Quatd::new(-1.0, 2.0, -0.5, 3.0));

        let mut p = Quatd::ZERO;
        multiply(&q, &c, &mut p);
        assert_eq!([p.x, p.y, p.z], [0.0; 3]);
        assert_eq!(p.w, magnitude_squared(&q));

        conjugate_in_place(&mut c);
        assert_eq!(c, q);
    }

    #[test]
    fn normalize_() {
        let mut q = Quatf::new(0.0, 0.0, 3.0, 4.0);
        normalize_in_place(&mut q);
        assert_approx_eq!(q, Quatf::new(0.0, 0.0, 0.6, 0.8));
        assert_approx_eq!(magnitude(&q), 1.0).abs(1e-6);

        let mut z = Quatd::IDENTITY;
        normalize(&Quatd::ZERO, &mut z);
        assert!(is_zero(&z));
    }

    #[test]
    fn predicates() {
        assert!(is_identity(&Quatd::IDENTITY));
        assert!(!is_identity(&-Quatd::IDENTITY));
        assert!(is_zero(&[0.0f32; 4]));
        assert!(!is_zero(&Quatf::IDENTITY));

        let mut q = Quatd::ZERO;
        set_identity(&mut q);
        assert!(is_identity(&q));
        copy(&Quatd::ZERO, &mut q);
        assert!(is_zero(&q));
    }

    #[test]
    fn axis_angle() {
        let mut q = Quatd::ZERO;
        from_axis_angle(&Vec3d::X, PI, &mut q);
        assert_approx_eq!(q, Quatd::new(1.0, 0.0, 0.0, 0.0));

        from_axis_angle(&Vec3d::Y, 0.0, &mut q);
        assert!(is_identity(&q));
    }

    #[test]
    fn matrix_conversion_matches_rodrigues() {
        let axis = vec3(1.0, 2.0, -2.0) / 3.0;
        for angle in [0.1, 1.0, FRAC_PI_2, 2.5, PI, -2.0] {
            let mut q = Quatd::ZERO;
            from_axis_angle(&axis, angle, &mut q);

            let mut from_quat = Mat3d::ZERO;
            to_matrix3(&q, &mut from_quat);
            let mut rodrigues = Mat3d::ZERO;
            matrices::make_rotation3(&axis, angle, &mut rodrigues);
            assert_approx_eq!(from_quat, rodrigues).abs(1e-15);

            // `q` and `-q` are the same rotation.
            let mut back = Quatd::ZERO;
            from_matrix3(&rodrigues, &mut back);
            if dot(&back, &q) < 0.0 {
                negate_in_place(&mut back);
            }
            assert_approx_eq!(back, q).abs(1e-15);
        }
    }

    #[test]
    fn shepperd_branches() {
        let _ = env_logger::builder().is_test(true).try_init();

        // Rotations by 180° have a trace of -1 and exercise each diagonal branch.
        for axis in [Vec3d::X, Vec3d::Y, Vec3d::Z] {
            let mut m = Mat3d::ZERO;
            matrices::make_rotation3(&axis, PI, &mut m);
            let mut q = Quatd::ZERO;
            from_matrix3(&m, &mut q);
            let expected = Quatd::from_vector(axis.extend(0.0));
            assert_approx_eq!(q, expected).abs(1e-15);
        }
    }

    #[test]
    fn matrix4_ignores_bottom_right() {
        let q = Quatd::from_rotation_y(0.75);
        let mut m = Mat4d::ZERO;
        to_matrix4(&q, &mut m);
        assert_eq!(m.row(3), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(m.column(3), [0.0, 0.0, 0.0, 1.0]);

        m[(3, 3)] = 42.0;
        m[(0, 3)] = 5.0;
        let mut back = Quatd::ZERO;
        from_matrix4(&m, &mut back);
        assert_approx_eq!(back, q).abs(1e-15);
    }

    #[test]
    fn rotate() {
        let q = Quatf::from_rotation_z(FRAC_PI_2);
        let mut v = Vec3f::ZERO;
        rotate_vector(&q, &Vec3f::X, &mut v);
        assert_approx_eq!(v, Vec3f::Y).abs(1e-6);

        let mut m = Mat4f::ZERO;
        to_matrix4(&q, &mut m);
        assert_approx_eq!(m * Vec3f::X.extend(0.0), Vec3f::Y.extend(0.0)).abs(1e-6);
    }

    #[test]
    fn slerp_endpoints_and_midpoint() {
        let a = Quatd::from_rotation_x(0.2);
        let b = Quatd::from_rotation_x(2.2);
        let mut out = Quatd::ZERO;

        slerp(&a, &b, 0.0, &mut out);
        assert_approx_eq!(out, a);
        slerp(&a, &b, 1.0, &mut out);
        assert_approx_eq!(out, b).abs(1e-15);
        slerp(&a, &b, 0.5, &mut out);
        assert_approx_eq!(out, Quatd::from_rotation_x(1.2)).abs(1e-15);
    }

    #[test]
    fn slerp_takes_shorter_arc() {
        let a = Quatd::IDENTITY;
        let b = -Quatd::from_rotation_z(1.0);
        let mut out = Quatd::ZERO;
        slerp(&a, &b, 0.5, &mut out);
        assert_approx_eq!(out, Quatd::from_rotation_z(0.5)).abs(1e-15);

        // The end point is `b` with its sign flipped.
        slerp(&a, &b, 1.0, &mut out);
        assert_approx_eq!(out, -b).abs(1e-15);
    }

    #[test]
    fn slerp_nearly_opposite_uses_spherical_path() {
        let a = Quatd::IDENTITY;
        let b = -Quatd::from_rotation_z(0.01);
        assert!(dot(&a, &b) < -SLERP_LINEAR_THRESHOLD);

        let mut out = Quatd::ZERO;
        slerp(&a, &b, 0.5, &mut out);
        assert_approx_eq!(out, Quatd::from_rotation_z(0.005)).abs(1e-12);

        slerp(&a, &-a, 0.5, &mut out);
        assert_approx_eq!(out, a).abs(1e-15);
    }

    #[test]
    fn slerp_nearly_parallel() {
        let _ = env_logger::builder().is_test(true).try_init();

        let a = Quatd::from_rotation_y(0.001);
        let b = Quatd::from_rotation_y(0.002);
        let mut out = Quatd::ZERO;
        slerp(&a, &b, 0.5, &mut out);
        assert_approx_eq!(magnitude(&out), 1.0);
        assert_approx_eq!(out, Quatd::from_rotation_y(0.0015)).abs(1e-9);

        slerp(&a, &a, 0.3, &mut out);
        assert_approx_eq!(out, a);
    }

    #[test]
    fn slerp_does_not_require_unit_input() {
        let a = Quatd::IDENTITY * 3.0;
        let b = Quatd::from_rotation_x(1.0) * 0.5;
        let mut out = Quatd::ZERO;
        slerp(&a, &b, 1.0, &mut out);
        assert_approx_eq!(out, Quatd::from_rotation_x(1.0)).abs(1e-15);
    }

    #[test]
    fn interpolate_linear_() {
        let mut out = Quatd::ZERO;
        interpolate_linear(&Quatd::ZERO, &Quatd::new(2.0, 4.0, 6.0, 8.0), 0.25, &mut out);
        assert_eq!(out, Quatd::new(0.5, 1.0, 1.5, 2.0));
    }

    #[test]
    fn look_at_() {
        let mut ctx = QuatContextd::new();
        let mut q = Quatd::ZERO;
        look_at(&mut ctx, &vec3(0.0, 0.0, 5.0), &Vec3d::ZERO, &Vec3d::Y, &mut q);
        assert_approx_eq!(q, Quatd::IDENTITY);

        // Looking down +X: the view rotation maps +X to -Z.
        look_at(&mut ctx, &Vec3d::ZERO, &Vec3d::X, &Vec3d::Y, &mut q);
        let mut v = Vec3d::ZERO;
        rotate_vector(&q, &Vec3d::X, &mut v);
        assert_approx_eq!(v, -Vec3d::Z).abs(1e-15);

        let mut m = Mat3d::ZERO;
        let mut t = Vec3d::ZERO;
        matrices::look_at3(&Vec3d::ZERO, &Vec3d::X, &Vec3d::Y, &mut m, &mut t);
        let mut from_quat = Mat3d::ZERO;
        to_matrix3(&q, &mut from_quat);
        assert_approx_eq!(from_quat, m).abs(1e-15);
    }

    #[test]
    fn almost_equal_() {
        let ctx = ApproxContext::new(1e-6, 0.0);
        let a = Quatf::IDENTITY;
        let b = Quatf::new(0.0, 1e-7, 0.0, 1.0);
        assert!(almost_equal(&ctx, &a, &b));
        assert_approx_ne!(a, Quatf::new(0.0, 1e-3, 0.0, 1.0));
        assert!(!almost_equal(&ctx, &a, &[0.0, 1e-3, 0.0, 1.0]));
    }
}
