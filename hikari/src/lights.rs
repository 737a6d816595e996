use crate::math::{Color, Point3, Vec3};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Light_Sources/Point_Lights.html
// Intensity doesn't fall off with distance.

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointLight {
    /// World position of the light
    pub p: Point3,
    /// Intensity of the light
    pub i: Color,
}

/// Direction and distance from a shaded point to a light.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightSample {
    /// Normalized direction towards the light
    pub l: Vec3,
    pub dist: f64,
}

impl PointLight {
    /// Creates a new `PointLight` at `p` with intensity `i`.
    pub fn new(p: Point3, i: Color) -> Self {
        Self { p, i }
    }

    pub fn sample(&self, p: &Point3) -> LightSample {
        let to_light = self.p - p;
        let dist = to_light.norm();

        LightSample {
            l: to_light / dist,
            dist,
        }
    }
}
