use approx::{AbsDiffEq, RelativeEq};
use std::{
    iter::Sum,
    ops::{Add, AddAssign, Div, Mul, MulAssign, Sub},
};

// Based on Physically Based Rendering 3rd ed.
// https://www.pbr-book.org/3ed-2018/Color_and_Radiometry/Spectral_Representation

/// A linear RGB color. Components are not clamped.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Color {
    /// The r component of the color
    pub r: f64,
    /// The g component of the color
    pub g: f64,
    /// The b component of the color
    pub b: f64,
}

impl Color {
    /// Creates a new `Color`.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Creates a new `Color` with all components set to `v`.
    pub const fn gray(v: f64) -> Self {
        Self::new(v, v, v)
    }

    pub const fn black() -> Self {
        Self::gray(0.0)
    }

    pub const fn white() -> Self {
        Self::gray(1.0)
    }

    /// Checks if all components of this `Color` are zero.
    pub fn is_black(&self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }

    /// Converts this `Color` to 8-bit channels, clamping to [0, 255].
    pub fn to_rgb8(&self) -> [u8; 3] {
        let channel = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        [channel(self.r), channel(self.g), channel(self.b)]
    }
}

// Component-wise binary ops
macro_rules! impl_color_op {
    ( $( $tr:ident $f:ident ),+ ) => {
        $(
            impl $tr for Color {
                type Output = Color;

                fn $f(self, other: Color) -> Color {
                    Color::new(self.r.$f(other.r), self.g.$f(other.g), self.b.$f(other.b))
                }
            }
        )*
    }
}
impl_color_op!(Add add, Sub sub, Mul mul);

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, other: f64) -> Color {
        Color::new(self.r * other, self.g * other, self.b * other)
    }
}

impl Div<f64> for Color {
    type Output = Color;

    fn div(self, other: f64) -> Color {
        Color::new(self.r / other, self.g / other, self.b / other)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, other: Color) {
        *self = *self + other;
    }
}

impl MulAssign<f64> for Color {
    fn mul_assign(&mut self, other: f64) {
        *self = *self * other;
    }
}

impl Sum for Color {
    fn sum<I: Iterator<Item = Color>>(iter: I) -> Color {
        iter.fold(Color::black(), |acc, c| acc + c)
    }
}

impl AbsDiffEq for Color {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.r.abs_diff_eq(&other.r, epsilon)
            && self.g.abs_diff_eq(&other.g, epsilon)
            && self.b.abs_diff_eq(&other.b, epsilon)
    }
}

impl RelativeEq for Color {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.r.relative_eq(&other.r, epsilon, max_relative)
            && self.g.relative_eq(&other.g, epsilon, max_relative)
            && self.b.relative_eq(&other.b, epsilon, max_relative)
    }
}
