use super::{ray::Ray, Point3, Vec3, EPSILON};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Geometry_and_Transformations/Bounding_Boxes.html

/// Three-dimensional axis-aligned bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3 {
    /// The minimum extent of the bounds.
    pub p_min: Point3,
    /// The maximum extent of the bounds.
    pub p_max: Point3,
}

impl Bounds3 {
    /// Creates new `Bounds3` spanning `p0` and `p1`.
    pub fn new(p0: Point3, p1: Point3) -> Self {
        Self {
            p_min: p0.inf(&p1),
            p_max: p0.sup(&p1),
        }
    }

    /// Creates empty `Bounds3` that any union will replace.
    pub fn empty() -> Self {
        Self {
            p_min: Point3::from(Vec3::repeat(f64::INFINITY)),
            p_max: Point3::from(Vec3::repeat(f64::NEG_INFINITY)),
        }
    }

    /// Creates `Bounds3` spanning all of space.
    pub fn infinite() -> Self {
        Self {
            p_min: Point3::from(Vec3::repeat(f64::NEG_INFINITY)),
            p_max: Point3::from(Vec3::repeat(f64::INFINITY)),
        }
    }

    /// Checks if these `Bounds3` contain nothing.
    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.p_min[i] > self.p_max[i])
    }

    /// Checks if all extents of these `Bounds3` are finite.
    pub fn is_finite(&self) -> bool {
        self.p_min.iter().chain(self.p_max.iter()).all(|v| v.is_finite())
    }

    /// Returns the union of these `Bounds3` and `p`.
    pub fn union_p(&self, p: Point3) -> Self {
        Self {
            p_min: self.p_min.inf(&p),
            p_max: self.p_max.sup(&p),
        }
    }

    /// Returns the union of these `Bounds3` and `other`.
    pub fn union_b(&self, other: Bounds3) -> Self {
        Self {
            p_min: self.p_min.inf(&other.p_min),
            p_max: self.p_max.sup(&other.p_max),
        }
    }

    /// Checks if `p` is inside these `Bounds3`, boundary included.
    pub fn inside(&self, p: Point3) -> bool {
        (0..3).all(|i| self.p_min[i] <= p[i] && p[i] <= self.p_max[i])
    }

    /// Checks if `other` is fully inside these `Bounds3`.
    pub fn contains_b(&self, other: &Bounds3) -> bool {
        self.inside(other.p_min) && self.inside(other.p_max)
    }

    /// Checks if these `Bounds3` and `other` share any point, boundaries included.
    pub fn overlaps(&self, other: &Bounds3) -> bool {
        (0..3).all(|i| self.p_min[i] <= other.p_max[i] && other.p_min[i] <= self.p_max[i])
    }

    /// Returns the vector from `p_min` to `p_max`.
    pub fn diagonal(&self) -> Vec3 {
        self.p_max - self.p_min
    }

    /// Returns the center point of these `Bounds3`.
    pub fn centroid(&self) -> Point3 {
        nalgebra::center(&self.p_min, &self.p_max)
    }

    /// Finds the axis of maximum extent of these `Bounds3`.
    pub fn maximum_extent(&self) -> usize {
        let d = self.diagonal();
        if d.x > d.y && d.x > d.z {
            0
        } else if d.y > d.z {
            1
        } else {
            2
        }
    }

    /// Splits these `Bounds3` into eight octants at the center.
    pub fn octants(&self) -> [Bounds3; 8] {
        let c = self.centroid();
        let mut ret = [*self; 8];
        for (i, octant) in ret.iter_mut().enumerate() {
            for axis in 0..3 {
                if (i >> axis) & 1 == 0 {
                    octant.p_max[axis] = c[axis];
                } else {
                    octant.p_min[axis] = c[axis];
                }
            }
        }
        ret
    }

    /// Finds the parametric range where `ray` is inside these `Bounds3`.
    /// Returns `None` if `ray` misses.
    pub fn intersections(&self, ray: &Ray) -> Option<(f64, f64)> {
        let mut t0 = f64::NEG_INFINITY;
        let mut t1 = f64::INFINITY;
        for i in 0..3 {
            let (ti0, ti1) = check_axis(ray.o[i], ray.d[i], self.p_min[i], self.p_max[i]);
            t0 = t0.max(ti0);
            t1 = t1.min(ti1);
            if t0 > t1 {
                return None;
            }
        }
        Some((t0, t1))
    }

    /// Checks if `ray` hits these `Bounds3`.
    pub fn intersect(&self, ray: &Ray) -> bool {
        self.intersections(ray).is_some()
    }
}

impl Default for Bounds3 {
    fn default() -> Self {
        Self::empty()
    }
}

// Slab entry and exit along one axis
fn check_axis(origin: f64, direction: f64, min: f64, max: f64) -> (f64, f64) {
    if direction.abs() < EPSILON {
        // Parallel to the slab: either always inside or never
        if origin < min || origin > max {
            (f64::INFINITY, f64::NEG_INFINITY)
        } else {
            (f64::NEG_INFINITY, f64::INFINITY)
        }
    } else {
        let inv_dir = 1.0 / direction;
        let t0 = (min - origin) * inv_dir;
        let t1 = (max - origin) * inv_dir;
        if t0 > t1 {
            (t1, t0)
        } else {
            (t0, t1)
        }
    }
}
