use lazy_static::lazy_static;
use std::sync::Arc;

use crate::{
    lights::PointLight,
    math::{reflect, Color, Point3, Vec3},
    patterns::Pattern,
    shapes::Shape,
};

lazy_static! {
    /// Used by shapes that have no material on themselves or their ancestors.
    pub static ref DEFAULT_MATERIAL: Arc<Material> = Arc::new(Material::default());
}

/// Phong surface response along with reflection and refraction coefficients.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub pattern: Pattern,
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
    pub reflective: f64,
    pub transparency: f64,
    pub refractive_index: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            pattern: Pattern::default(),
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
            reflective: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
        }
    }
}

impl Material {
    /// Creates a new default `Material` with a solid `color`.
    pub fn with_color(color: Color) -> Self {
        Self {
            pattern: Pattern::solid(color),
            ..Self::default()
        }
    }

    /// Creates a new clear glass `Material`.
    pub fn glass() -> Self {
        Self {
            transparency: 1.0,
            refractive_index: 1.5,
            ..Self::default()
        }
    }

    /// Evaluates the Phong reflection model for `light` at the world-space
    /// `point` on `shape`. Only the ambient term is returned when `in_shadow`.
    pub fn lighting(
        &self,
        shape: &Shape,
        light: &PointLight,
        point: &Point3,
        eyev: &Vec3,
        normalv: &Vec3,
        in_shadow: bool,
    ) -> Color {
        let color = self.pattern.color_at_shape(shape, point);
        let effective_color = color * light.i;
        let ambient = effective_color * self.ambient;
        if in_shadow {
            return ambient;
        }

        let lightv = light.sample(point).l;
        let light_dot_normal = lightv.dot(normalv);
        if light_dot_normal < 0.0 {
            // Light is on the other side of the surface
            return ambient;
        }
        let diffuse = effective_color * self.diffuse * light_dot_normal;

        let reflectv = reflect(&-lightv, normalv);
        let reflect_dot_eye = reflectv.dot(eyev);
        let specular = if reflect_dot_eye <= 0.0 {
            Color::black()
        } else {
            light.i * self.specular * reflect_dot_eye.powf(self.shininess)
        };

        ambient + diffuse + specular
    }
}
