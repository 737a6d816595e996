use crate::math::{Bounds3, Point3, Ray, Vec3, EPSILON};

/// A flat triangle with counter clockwise winding.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangle {
    p1: Point3,
    p2: Point3,
    p3: Point3,
    e1: Vec3,
    e2: Vec3,
    normal: Vec3,
}

impl Triangle {
    /// Creates a new `Triangle`.
    pub fn new(p1: Point3, p2: Point3, p3: Point3) -> Self {
        let e1 = p2 - p1;
        let e2 = p3 - p1;
        Self {
            p1,
            p2,
            p3,
            e1,
            e2,
            normal: e2.cross(&e1).normalize(),
        }
    }

    pub fn points(&self) -> [Point3; 3] {
        [self.p1, self.p2, self.p3]
    }

    pub fn edges(&self) -> (Vec3, Vec3) {
        (self.e1, self.e2)
    }

    /// Returns the normal of the plane of this `Triangle`.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Finds the local-space `ray`'s hit as `(t, u, v)`, where `u` and `v`
    /// weigh the second and third vertex.
    pub fn hit(&self, ray: &Ray) -> Option<(f64, f64, f64)> {
        // Möller–Trumbore
        let dir_cross_e2 = ray.d.cross(&self.e2);
        let det = self.e1.dot(&dir_cross_e2);
        if det.abs() < EPSILON {
            // Parallel to the plane
            return None;
        }

        let f = 1.0 / det;
        let p1_to_origin = ray.o - self.p1;
        let u = f * p1_to_origin.dot(&dir_cross_e2);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let origin_cross_e1 = p1_to_origin.cross(&self.e1);
        let v = f * ray.d.dot(&origin_cross_e1);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * self.e2.dot(&origin_cross_e1);
        Some((t, u, v))
    }

    pub fn bounds(&self) -> Bounds3 {
        Bounds3::new(self.p1, self.p2).union_p(self.p3)
    }
}

/// A [Triangle] that interpolates normals given at its vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothTriangle {
    triangle: Triangle,
    n1: Vec3,
    n2: Vec3,
    n3: Vec3,
}

impl SmoothTriangle {
    /// Creates a new `SmoothTriangle`.
    pub fn new(p1: Point3, p2: Point3, p3: Point3, n1: Vec3, n2: Vec3, n3: Vec3) -> Self {
        Self {
            triangle: Triangle::new(p1, p2, p3),
            n1,
            n2,
            n3,
        }
    }

    pub fn triangle(&self) -> &Triangle {
        &self.triangle
    }

    pub fn normals(&self) -> [Vec3; 3] {
        [self.n1, self.n2, self.n3]
    }

    /// Interpolates the vertex normals at the barycentric `(u, v)` of a hit.
    pub fn normal(&self, u: f64, v: f64) -> Vec3 {
        self.n2 * u + self.n3 * v + self.n1 * (1.0 - u - v)
    }
}
