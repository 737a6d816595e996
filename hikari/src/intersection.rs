use std::ops::Deref;

use crate::shapes::Shape;

/// A ray hitting a shape at distance `t`.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    /// The primitive that was hit
    pub shape: &'a Shape,
    /// Barycentric coordinates on smooth triangles
    pub uv: Option<(f64, f64)>,
}

impl<'a> Intersection<'a> {
    /// Creates a new `Intersection`.
    pub fn new(t: f64, shape: &'a Shape) -> Self {
        Self { t, shape, uv: None }
    }

    /// Creates a new `Intersection` carrying the hit's `(u, v)`.
    pub fn with_uv(t: f64, shape: &'a Shape, u: f64, v: f64) -> Self {
        Self {
            t,
            shape,
            uv: Some((u, v)),
        }
    }
}

impl<'a> PartialEq for Intersection<'a> {
    // Shapes compare by identity
    fn eq(&self, other: &Self) -> bool {
        self.t == other.t && std::ptr::eq(self.shape, other.shape) && self.uv == other.uv
    }
}

/// Intersections sorted by ascending `t`.
#[derive(Clone, Debug, Default)]
pub struct Intersections<'a> {
    xs: Vec<Intersection<'a>>,
}

impl<'a> Intersections<'a> {
    /// Creates new `Intersections` from `xs` in any order. Equal `t`s keep their relative order.
    pub fn new(mut xs: Vec<Intersection<'a>>) -> Self {
        xs.sort_by(|a, b| a.t.total_cmp(&b.t));
        Self { xs }
    }

    /// Returns the visible hit, the closest intersection at or in front of the ray origin.
    pub fn hit(&self) -> Option<&Intersection<'a>> {
        self.xs.iter().find(|x| x.t >= 0.0)
    }

    /// Returns the closest intersection at or in front of the ray origin
    /// ignoring shapes that don't cast shadows.
    pub fn hit_casting_shadow(&self) -> Option<&Intersection<'a>> {
        self.xs.iter().find(|x| x.t >= 0.0 && x.shape.casts_shadow())
    }

    /// Returns the index of the visible hit.
    pub fn hit_index(&self) -> Option<usize> {
        self.xs.iter().position(|x| x.t >= 0.0)
    }

    pub fn into_vec(self) -> Vec<Intersection<'a>> {
        self.xs
    }
}

impl<'a> Deref for Intersections<'a> {
    type Target = [Intersection<'a>];

    fn deref(&self) -> &Self::Target {
        &self.xs
    }
}

impl<'a> From<Vec<Intersection<'a>>> for Intersections<'a> {
    fn from(xs: Vec<Intersection<'a>>) -> Self {
        Self::new(xs)
    }
}
