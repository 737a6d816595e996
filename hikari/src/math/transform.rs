use std::ops::Mul;

use thiserror::Error;

use super::{bounds::Bounds3, ray::Ray, Matrix4, Point3, Vec3};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Geometry_and_Transforms/Transforms.html

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransformError {
    #[error("matrix contains non-finite values")]
    NonFinite,
    #[error("bottom row {0:?} is not [0, 0, 0, 1]")]
    NotAffine([f64; 4]),
    #[error("matrix is not invertible")]
    Singular,
}

/// An affine transform with its cached inverse.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    m: Matrix4,
    m_inv: Matrix4,
}

impl Transform {
    /// Creates a new `Transform` from a [Matrix4].
    ///
    /// Panics if `m` is not an invertible affine matrix. Use [Transform::try_new]
    /// to handle the failure instead.
    pub fn new(m: Matrix4) -> Self {
        match Self::try_new(m) {
            Ok(t) => t,
            Err(why) => panic!("Invalid transform: {}", why),
        }
    }

    /// Creates a new `Transform` from a [Matrix4], verifying that it is an
    /// invertible affine matrix.
    pub fn try_new(m: Matrix4) -> Result<Self, TransformError> {
        if m.iter().any(|v| !v.is_finite()) {
            return Err(TransformError::NonFinite);
        }
        let bottom = [m[(3, 0)], m[(3, 1)], m[(3, 2)], m[(3, 3)]];
        if bottom != [0.0, 0.0, 0.0, 1.0] {
            return Err(TransformError::NotAffine(bottom));
        }
        let m_inv = m.try_inverse().ok_or(TransformError::Singular)?;
        if m_inv.iter().any(|v| !v.is_finite()) {
            return Err(TransformError::Singular);
        }
        Ok(Self::new_full(m, m_inv))
    }

    /// Creates a new `Transform` from a [Matrix4] and its inverse.
    pub(crate) fn new_full(m: Matrix4, m_inv: Matrix4) -> Self {
        debug_assert!(m.iter().all(|v| !v.is_nan()));
        debug_assert!(m_inv.iter().all(|v| !v.is_nan()));
        Self { m, m_inv }
    }

    /// Creates a new identity `Transform`.
    pub fn identity() -> Self {
        Self::new_full(Matrix4::identity(), Matrix4::identity())
    }

    /// Returns a reference to the [Matrix4] of this `Transform`.
    pub fn m(&self) -> &Matrix4 {
        &self.m
    }

    /// Returns a reference to the inverse [Matrix4] of this `Transform`.
    pub fn m_inv(&self) -> &Matrix4 {
        &self.m_inv
    }

    /// Returns the inverse of this `Transform`.
    pub fn inverted(&self) -> Self {
        Self::new_full(self.m_inv, self.m)
    }

    /// Returns a `Transform` that applies this one first and then `next`.
    pub fn then(&self, next: &Transform) -> Self {
        next * self
    }

    /// Checks if this `Transform` is the identity transform.
    pub fn is_identity(&self) -> bool {
        self.m == Matrix4::identity()
    }

    /// Applies the inverse of this `Transform` to `p`.
    #[inline]
    pub fn inverse_point(&self, p: &Point3) -> Point3 {
        self.m_inv.transform_point(p)
    }

    /// Applies the inverse of this `Transform` to `ray`.
    #[inline]
    pub fn inverse_ray(&self, ray: &Ray) -> Ray {
        Ray::new(
            self.m_inv.transform_point(&ray.o),
            self.m_inv.transform_vector(&ray.d),
        )
    }

    /// Transforms the surface normal `n` with the inverse transpose of this
    /// `Transform`. The result is not normalized.
    pub fn normal(&self, n: &Vec3) -> Vec3 {
        let mi = &self.m_inv;
        // Transpose inverse matrix through accesses, dropping the translation
        Vec3::new(
            mi[(0, 0)] * n.x + mi[(1, 0)] * n.y + mi[(2, 0)] * n.z,
            mi[(0, 1)] * n.x + mi[(1, 1)] * n.y + mi[(2, 1)] * n.z,
            mi[(0, 2)] * n.x + mi[(1, 2)] * n.y + mi[(2, 2)] * n.z,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl<'a> Mul<Point3> for &'a Transform {
    type Output = Point3;

    fn mul(self, other: Point3) -> Point3 {
        self.m.transform_point(&other)
    }
}

impl<'a> Mul<Vec3> for &'a Transform {
    type Output = Vec3;

    fn mul(self, other: Vec3) -> Vec3 {
        self.m.transform_vector(&other)
    }
}

impl<'a> Mul<Ray> for &'a Transform {
    type Output = Ray;

    fn mul(self, other: Ray) -> Ray {
        Ray::new(self * other.o, self * other.d)
    }
}

impl<'a> Mul<Bounds3> for &'a Transform {
    type Output = Bounds3;

    fn mul(self, other: Bounds3) -> Bounds3 {
        if other.is_empty() {
            return other;
        }

        // Arvo's method: accumulate each output axis from the per-axis extremes.
        // Zero coefficients must not multiply infinite extents into NaNs.
        let scaled = |k: f64, v: f64| if k == 0.0 { 0.0 } else { k * v };
        let m = &self.m;
        let mut p_min = [m[(0, 3)], m[(1, 3)], m[(2, 3)]];
        let mut p_max = p_min;
        for i in 0..3 {
            for j in 0..3 {
                let a = scaled(m[(i, j)], other.p_min[j]);
                let b = scaled(m[(i, j)], other.p_max[j]);
                p_min[i] += a.min(b);
                p_max[i] += a.max(b);
            }
        }

        Bounds3::new(
            Point3::new(p_min[0], p_min[1], p_min[2]),
            Point3::new(p_max[0], p_max[1], p_max[2]),
        )
    }
}

impl<'a, 'b> Mul<&'b Transform> for &'a Transform {
    type Output = Transform;

    fn mul(self, other: &Transform) -> Transform {
        Transform::new_full(self.m * other.m, other.m_inv * self.m_inv)
    }
}
