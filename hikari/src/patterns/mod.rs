mod noise;

pub use noise::{noise, noise_vector};

use crate::{
    math::{Color, Point3, Transform},
    shapes::Shape,
};

/// A procedural color field with its own transform.
///
/// Sub-patterns are sampled through their own transforms, on top of the
/// enclosing pattern's space.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    transform: Transform,
    kind: PatternKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PatternKind {
    Solid(Color),
    /// Alternates between the two along x.
    Stripe(Box<Pattern>, Box<Pattern>),
    /// Linear blend from the first to the second along each unit of x.
    Gradient(Box<Pattern>, Box<Pattern>),
    /// Concentric rings around the y-axis.
    Ring(Box<Pattern>, Box<Pattern>),
    /// Alternating unit cubes.
    Checkers(Box<Pattern>, Box<Pattern>),
    /// Average of the two.
    Blend(Box<Pattern>, Box<Pattern>),
    /// Samples `inner` at a point jittered by noise.
    Perturbed { inner: Box<Pattern>, scale: f64 },
    /// Returns the pattern-space point as a color.
    #[cfg(test)]
    Test,
}

impl Pattern {
    /// Creates a new `Pattern` with the identity transform.
    pub fn new(kind: PatternKind) -> Self {
        Self {
            transform: Transform::identity(),
            kind,
        }
    }

    pub fn solid(c: Color) -> Self {
        Self::new(PatternKind::Solid(c))
    }

    pub fn stripe(a: impl Into<Pattern>, b: impl Into<Pattern>) -> Self {
        Self::new(PatternKind::Stripe(Box::new(a.into()), Box::new(b.into())))
    }

    pub fn gradient(a: impl Into<Pattern>, b: impl Into<Pattern>) -> Self {
        Self::new(PatternKind::Gradient(Box::new(a.into()), Box::new(b.into())))
    }

    pub fn ring(a: impl Into<Pattern>, b: impl Into<Pattern>) -> Self {
        Self::new(PatternKind::Ring(Box::new(a.into()), Box::new(b.into())))
    }

    pub fn checkers(a: impl Into<Pattern>, b: impl Into<Pattern>) -> Self {
        Self::new(PatternKind::Checkers(Box::new(a.into()), Box::new(b.into())))
    }

    pub fn blend(a: impl Into<Pattern>, b: impl Into<Pattern>) -> Self {
        Self::new(PatternKind::Blend(Box::new(a.into()), Box::new(b.into())))
    }

    pub fn perturbed(inner: impl Into<Pattern>, scale: f64) -> Self {
        Self::new(PatternKind::Perturbed {
            inner: Box::new(inner.into()),
            scale,
        })
    }

    /// Returns this `Pattern` with `transform` in place of its current one.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn kind(&self) -> &PatternKind {
        &self.kind
    }

    /// Evaluates this `Pattern` at the world-space `p` on `shape`.
    pub fn color_at_shape(&self, shape: &Shape, p: &Point3) -> Color {
        self.sample(&shape.world_to_object(p))
    }

    /// Evaluates this `Pattern` at `p` given in the space enclosing the pattern.
    pub fn sample(&self, p: &Point3) -> Color {
        self.color_at(&self.transform.inverse_point(p))
    }

    /// Evaluates this `Pattern` at `p` given in pattern space.
    pub fn color_at(&self, p: &Point3) -> Color {
        match &self.kind {
            PatternKind::Solid(c) => *c,
            PatternKind::Stripe(a, b) => {
                if is_even(p.x.floor()) {
                    a.sample(p)
                } else {
                    b.sample(p)
                }
            }
            PatternKind::Gradient(a, b) => {
                let ca = a.sample(p);
                let cb = b.sample(p);
                ca + (cb - ca) * (p.x - p.x.floor())
            }
            PatternKind::Ring(a, b) => {
                if is_even((p.x * p.x + p.z * p.z).sqrt().floor()) {
                    a.sample(p)
                } else {
                    b.sample(p)
                }
            }
            PatternKind::Checkers(a, b) => {
                if is_even(p.x.floor() + p.y.floor() + p.z.floor()) {
                    a.sample(p)
                } else {
                    b.sample(p)
                }
            }
            PatternKind::Blend(a, b) => (a.sample(p) + b.sample(p)) * 0.5,
            PatternKind::Perturbed { inner, scale } => {
                inner.sample(&(p + noise_vector(p) * *scale))
            }
            #[cfg(test)]
            PatternKind::Test => Color::new(p.x, p.y, p.z),
        }
    }
}

impl From<Color> for Pattern {
    fn from(c: Color) -> Self {
        Self::solid(c)
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::solid(Color::white())
    }
}

fn is_even(v: f64) -> bool {
    v.rem_euclid(2.0) == 0.0
}
