use std::sync::Arc;

use crate::{
    intersection::Intersections,
    material::Material,
    math::{reflect, Point3, Ray, Vec3, EPSILON},
    shapes::Shape,
};

/// Shading state at a resolved hit.
#[derive(Clone, Debug)]
pub struct Computations<'a> {
    pub t: f64,
    pub shape: &'a Shape,
    /// Resolved material of `shape`
    pub material: Arc<Material>,
    pub point: Point3,
    /// `point` nudged off the surface along the normal
    pub over_point: Point3,
    /// `point` nudged below the surface against the normal
    pub under_point: Point3,
    pub eyev: Vec3,
    /// Faces `eyev`
    pub normalv: Vec3,
    pub reflectv: Vec3,
    /// Whether `ray` started inside the shape
    pub inside: bool,
    /// Refractive index of the medium being exited
    pub n1: f64,
    /// Refractive index of the medium being entered
    pub n2: f64,
}

impl<'a> Computations<'a> {
    /// Creates new `Computations` for `xs[hit]` along `ray`.
    ///
    /// `xs` has to hold every intersection of `ray` for the refractive indices to resolve.
    pub fn new(xs: &Intersections<'a>, hit: usize, ray: &Ray) -> Self {
        let x = &xs[hit];
        let point = ray.point(x.t);
        let eyev = -ray.d;
        let mut normalv = x.shape.normal_at(&point, x);
        let inside = normalv.dot(&eyev) < 0.0;
        if inside {
            normalv = -normalv;
        }
        let (n1, n2) = refractive_indices(xs, hit);

        Self {
            t: x.t,
            shape: x.shape,
            material: x.shape.material(),
            point,
            over_point: point + normalv * EPSILON,
            under_point: point - normalv * EPSILON,
            eyev,
            normalv,
            reflectv: reflect(&ray.d, &normalv),
            inside,
            n1,
            n2,
        }
    }

    /// Finds the fraction of light reflected at the hit with Schlick's approximation.
    pub fn schlick(&self) -> f64 {
        let mut cos = self.eyev.dot(&self.normalv);
        if self.n1 > self.n2 {
            let n = self.n1 / self.n2;
            let sin2_t = n * n * (1.0 - cos * cos);
            if sin2_t > 1.0 {
                // Total internal reflection
                return 1.0;
            }
            cos = (1.0 - sin2_t).sqrt();
        }

        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cos).powi(5)
    }
}

// Tracks the shapes the ray is inside of up to the hit
fn refractive_indices(xs: &Intersections, hit: usize) -> (f64, f64) {
    let index_of = |containers: &[&Shape]| {
        containers
            .last()
            .map_or(1.0, |s| s.material().refractive_index)
    };

    let mut containers: Vec<&Shape> = Vec::new();
    let mut n1 = 1.0;
    for (i, x) in xs.iter().enumerate() {
        if i == hit {
            n1 = index_of(&containers);
        }

        match containers.iter().position(|s| std::ptr::eq(*s, x.shape)) {
            Some(pos) => {
                containers.remove(pos);
            }
            None => containers.push(x.shape),
        }

        if i == hit {
            return (n1, index_of(&containers));
        }
    }
    (n1, 1.0)
}
