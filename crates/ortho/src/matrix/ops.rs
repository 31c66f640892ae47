use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

use crate::{matrices, Matrix, Real, Vector};

impl<T, const N: usize> Index<(usize, usize)> for Matrix<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.0[col][row]
    }
}

impl<T, const N: usize> IndexMut<(usize, usize)> for Matrix<T, N> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.0[col][row]
    }
}

impl<T, U, const N: usize> PartialEq<Matrix<U, N>> for Matrix<T, N>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Matrix<U, N>) -> bool {
        self.0.eq(&other.0)
    }
}

impl<T, const N: usize> Eq for Matrix<T, N> where T: Eq {}

impl<T: Neg, const N: usize> Neg for Matrix<T, N> {
    type Output = Matrix<T::Output, N>;

    fn neg(self) -> Self::Output {
        self.map(T::neg)
    }
}

impl<T: Real, const N: usize> Add for Matrix<T, N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut out = self;
        matrices::add(&self, &rhs, &mut out);
        out
    }
}

impl<T: Real, const N: usize> Sub for Matrix<T, N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let mut out = self;
        matrices::subtract(&self, &rhs, &mut out);
        out
    }
}

/// Matrix * Column Vector.
impl<T: Real, const N: usize> Mul<Vector<T, N>> for Matrix<T, N> {
    type Output = Vector<T, N>;

    fn mul(self, rhs: Vector<T, N>) -> Self::Output {
        let mut out = rhs;
        matrices::multiply_vector(&self, &rhs, &mut out);
        out
    }
}

/// Matrix * Matrix.
impl<T: Real, const N: usize> Mul for Matrix<T, N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut out = self;
        matrices::multiply(&self, &rhs, &mut out);
        out
    }
}

/// Matrix * Scalar.
impl<T: Real, const N: usize> Mul<T> for Matrix<T, N> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        let mut out = self;
        matrices::scale(&self, rhs.widen(), &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::{vec3, Mat3d, Mat4f};

    #[test]
    fn mat_vec_mul() {
        let mat = Mat3d::from_rows([[0.0, 1.0, 0.0], [2.0, 3.0, 0.0], [0.0, 0.0, 1.0]]);
        let out = mat * vec3(4.0, 5.0, 6.0);
        assert_eq!(out, [5.0, 23.0, 6.0]);
    }

    #[test]
    fn mat_mat_mul() {
        #[rustfmt::skip]
        let a = Mat3d::from_rows([
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        ]);
        let b = a.transpose();
        let c = a * b;
        assert_eq!(c[(0, 1)], 1.0 * 4.0 + 2.0 * 5.0 + 3.0 * 6.0);
        assert_eq!(c[(2, 2)], 49.0 + 64.0 + 81.0);
        assert_eq!(a * Mat3d::IDENTITY, a);
    }

    #[test]
    fn add_sub_scale() {
        let a = Mat4f::IDENTITY;
        assert_eq!(a + a, a * 2.0);
        assert_eq!(a - a, Mat4f::ZERO);
        assert_eq!(-a + a, Mat4f::ZERO);
    }
}
