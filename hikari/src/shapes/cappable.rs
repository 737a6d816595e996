use strum::{Display, EnumString, EnumVariantNames};

use super::Shape;
use crate::{
    intersection::Intersection,
    math::{roots::solve_quadratic, Bounds3, Point3, Ray, Vec3, EPSILON},
};

/// The body of a [Cappable], revolved around the y-axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumString, EnumVariantNames)]
pub enum Profile {
    /// `x² + z² = 1`
    Cylinder,
    /// `x² + z² = y²`, two cones meeting at the origin
    Cone,
    /// `x² + z² = 1 + y²`, a hyperboloid of one sheet
    Hyperboloid,
}

impl Profile {
    /// Radius of the profile at height `y`.
    pub fn radius(self, y: f64) -> f64 {
        match self {
            Profile::Cylinder => 1.0,
            Profile::Cone => y.abs(),
            Profile::Hyperboloid => (1.0 + y * y).sqrt(),
        }
    }

    // Quadratic coefficients of the body for `ray`
    fn coefficients(self, ray: &Ray) -> (f64, f64, f64) {
        let Ray { o, d } = ray;
        match self {
            Profile::Cylinder => (
                d.x * d.x + d.z * d.z,
                2.0 * (o.x * d.x + o.z * d.z),
                o.x * o.x + o.z * o.z - 1.0,
            ),
            Profile::Cone | Profile::Hyperboloid => {
                let c = o.x * o.x - o.y * o.y + o.z * o.z;
                (
                    d.x * d.x - d.y * d.y + d.z * d.z,
                    2.0 * (o.x * d.x - o.y * d.y + o.z * d.z),
                    if self == Profile::Cone { c } else { c - 1.0 },
                )
            }
        }
    }
}

/// A surface of revolution truncated to (`minimum`, `maximum`) on y,
/// optionally closed with flat caps.
#[derive(Clone, Debug, PartialEq)]
pub struct Cappable {
    profile: Profile,
    minimum: f64,
    maximum: f64,
    closed: bool,
}

impl Cappable {
    /// Creates a new `Cappable`. Infinite limits give an untruncated body.
    pub fn new(profile: Profile, minimum: f64, maximum: f64, closed: bool) -> Self {
        assert!(
            minimum <= maximum,
            "Cappable minimum {} is above maximum {}",
            minimum,
            maximum
        );
        Self {
            profile,
            minimum,
            maximum,
            closed,
        }
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    pub fn closed(&self) -> bool {
        self.closed
    }

    /// Appends the body and cap intersections of the local-space `ray` to `out`.
    pub(super) fn intersect<'a>(
        &self,
        shape: &'a Shape,
        ray: &Ray,
        out: &mut Vec<Intersection<'a>>,
    ) {
        let (a, b, c) = self.profile.coefficients(ray);

        if a.abs() < EPSILON {
            match self.profile {
                // Parallel to the walls
                Profile::Cylinder => (),
                // Parallel to one of the cone's halves hits the other once
                Profile::Cone | Profile::Hyperboloid => {
                    if b.abs() >= EPSILON {
                        self.push_body(shape, ray, -c / b, out);
                    }
                }
            }
        } else if let Some((t0, t1)) = solve_quadratic(a, b, c) {
            self.push_body(shape, ray, t0, out);
            self.push_body(shape, ray, t1, out);
        }

        self.intersect_caps(shape, ray, out);
    }

    fn push_body<'a>(&self, shape: &'a Shape, ray: &Ray, t: f64, out: &mut Vec<Intersection<'a>>) {
        let y = ray.o.y + t * ray.d.y;
        if self.minimum < y && y < self.maximum {
            out.push(Intersection::new(t, shape));
        }
    }

    fn intersect_caps<'a>(&self, shape: &'a Shape, ray: &Ray, out: &mut Vec<Intersection<'a>>) {
        if !self.closed || ray.d.y.abs() < EPSILON {
            return;
        }
        for y in [self.minimum, self.maximum] {
            let t = (y - ray.o.y) / ray.d.y;
            if self.within_cap(ray, t, y) {
                out.push(Intersection::new(t, shape));
            }
        }
    }

    // Checks if `ray` at `t` is inside the cap at height `y`
    fn within_cap(&self, ray: &Ray, t: f64, y: f64) -> bool {
        let x = ray.o.x + t * ray.d.x;
        let z = ray.o.z + t * ray.d.z;
        let r = self.profile.radius(y);
        x * x + z * z <= r * r
    }

    /// Finds the unnormalized normal at the local-space `p`.
    pub(super) fn normal(&self, p: &Point3) -> Vec3 {
        let dist = p.x * p.x + p.z * p.z;
        if self.closed {
            let r_max = self.profile.radius(self.maximum);
            if dist < r_max * r_max && p.y >= self.maximum - EPSILON {
                return Vec3::new(0.0, 1.0, 0.0);
            }
            let r_min = self.profile.radius(self.minimum);
            if dist < r_min * r_min && p.y <= self.minimum + EPSILON {
                return Vec3::new(0.0, -1.0, 0.0);
            }
        }

        match self.profile {
            Profile::Cylinder => Vec3::new(p.x, 0.0, p.z),
            Profile::Cone => {
                let y = dist.sqrt();
                Vec3::new(p.x, if p.y > 0.0 { -y } else { y }, p.z)
            }
            Profile::Hyperboloid => Vec3::new(p.x, -p.y, p.z),
        }
    }

    pub(super) fn bounds(&self) -> Bounds3 {
        let r = self
            .profile
            .radius(self.minimum)
            .max(self.profile.radius(self.maximum));
        Bounds3::new(
            Point3::new(-r, self.minimum, -r),
            Point3::new(r, self.maximum, r),
        )
    }
}
