use super::{Point3, Vec3};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Geometry_and_Transformations/Rays.html

#[derive(Copy, PartialEq, Clone, Debug)]
pub struct Ray {
    pub o: Point3,
    pub d: Vec3,
}

impl Ray {
    /// Creates a new `Ray`.
    pub fn new(o: Point3, d: Vec3) -> Self {
        let ret = Self { o, d };
        debug_assert!(!ret.has_nans());
        ret
    }

    /// Checks if any of the members in this `Ray` contain NaNs.
    pub fn has_nans(&self) -> bool {
        self.o.iter().chain(self.d.iter()).any(|v| v.is_nan())
    }

    /// Finds the [Point3] on this `Ray` at distance `t`.
    pub fn point(&self, t: f64) -> Point3 {
        self.o + self.d * t
    }
}
