mod bounds;
mod color;
mod ray;
pub mod roots;
mod transform;
pub mod transforms;

pub use bounds::Bounds3;
pub use color::Color;
pub use ray::Ray;
pub use transform::{Transform, TransformError};

/// A point in homogeneous space with an implicit `w` of one.
pub type Point3 = nalgebra::Point3<f64>;
/// A direction with an implicit `w` of zero.
pub type Vec3 = nalgebra::Vector3<f64>;
/// A row-major 4x4 affine matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Tolerance used for all approximate comparisons and surface offsets.
pub const EPSILON: f64 = 1e-5;

/// Creates a new [Point3].
#[inline]
pub fn point3(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

/// Creates a new [Vec3].
#[inline]
pub fn vec3(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new(x, y, z)
}

/// Checks if `v` is within [EPSILON] of zero.
#[inline]
pub fn approx_zero(v: f64) -> bool {
    v.abs() < EPSILON
}

/// Checks if `a` and `b` are within [EPSILON] of each other.
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    approx_zero(a - b)
}

/// Reflects `v` around `n`.
#[inline]
pub fn reflect(v: &Vec3, n: &Vec3) -> Vec3 {
    v - n * 2.0 * v.dot(n)
}
