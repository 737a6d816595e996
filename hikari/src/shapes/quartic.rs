use super::Shape;
use crate::{
    intersection::Intersection,
    math::{roots::real_roots, Bounds3, Point3, Ray, Vec3, EPSILON},
};

/// A torus around the y-axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Torus {
    /// Distance from the center to the middle of the tube
    major: f64,
    /// Radius of the tube
    minor: f64,
}

impl Torus {
    /// Creates a new `Torus`. Both radii have to be positive.
    pub fn new(major: f64, minor: f64) -> Self {
        assert!(
            major > 0.0 && minor > 0.0,
            "Torus radii have to be positive, got {} and {}",
            major,
            minor
        );
        Self { major, minor }
    }

    pub fn major(&self) -> f64 {
        self.major
    }

    pub fn minor(&self) -> f64 {
        self.minor
    }

    // (|p|² + R² - r²)² = 4R²(x² + z²) expanded in t
    fn coefficients(&self, ray: &Ray) -> [f64; 5] {
        let o = ray.o.coords;
        let d = ray.d;
        let r2 = self.major * self.major;

        let s = d.dot(&d);
        let f = o.dot(&d);
        let e = o.dot(&o) + r2 - self.minor * self.minor;

        [
            s * s,
            4.0 * s * f,
            2.0 * s * e + 4.0 * f * f - 4.0 * r2 * (d.x * d.x + d.z * d.z),
            4.0 * f * e - 8.0 * r2 * (o.x * d.x + o.z * d.z),
            e * e - 4.0 * r2 * (o.x * o.x + o.z * o.z),
        ]
    }

    pub(super) fn intersect<'a>(
        &self,
        shape: &'a Shape,
        ray: &Ray,
        out: &mut Vec<Intersection<'a>>,
    ) {
        for t in real_roots(&self.coefficients(ray)) {
            out.push(Intersection::new(t, shape));
        }
    }

    pub(super) fn normal(&self, p: &Point3) -> Vec3 {
        let s = p.coords.norm_squared();
        let r2 = self.major * self.major;
        let rr2 = self.minor * self.minor;
        Vec3::new(
            p.x * (s - r2 - rr2),
            p.y * (s + r2 - rr2),
            p.z * (s - r2 - rr2),
        )
    }

    pub(super) fn bounds(&self) -> Bounds3 {
        let xz = self.major + self.minor;
        Bounds3::new(
            Point3::new(-xz, -self.minor, -xz),
            Point3::new(xz, self.minor, xz),
        )
    }
}

/// Appends the intersections of the local-space `ray` with the spindle
/// `x² + z² = (1 - y²)²`, `y` in [-1, 1], to `out`.
pub(super) fn intersect_fusiform<'a>(
    shape: &'a Shape,
    ray: &Ray,
    out: &mut Vec<Intersection<'a>>,
) {
    let Ray { o, d } = ray;

    // 1 - y² as a quadratic in t
    let a = -d.y * d.y;
    let b = -2.0 * o.y * d.y;
    let c = 1.0 - o.y * o.y;

    let coeffs = [
        -a * a,
        -2.0 * a * b,
        (d.x * d.x + d.z * d.z) - (b * b + 2.0 * a * c),
        2.0 * (o.x * d.x + o.z * d.z) - 2.0 * b * c,
        o.x * o.x + o.z * o.z - c * c,
    ];

    for t in real_roots(&coeffs) {
        let y = o.y + t * d.y;
        if (-1.0..=1.0).contains(&y) {
            out.push(Intersection::new(t, shape));
        }
    }
}

pub(super) fn fusiform_normal(p: &Point3) -> Vec3 {
    if p.x * p.x + p.z * p.z < EPSILON * EPSILON && (1.0 - p.y.abs()) < EPSILON {
        // The gradient vanishes at the tips
        return Vec3::new(0.0, p.y.signum(), 0.0);
    }
    Vec3::new(p.x, 2.0 * p.y * (1.0 - p.y * p.y), p.z)
}
