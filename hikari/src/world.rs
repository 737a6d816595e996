use std::sync::Arc;

use crate::{
    computations::Computations,
    intersection::Intersections,
    lights::PointLight,
    math::{Color, Point3, Ray},
    shapes::Shape,
};

/// Default number of bounces for reflected and refracted rays.
pub const MAX_DEPTH: u32 = 5;

/// The top-level shapes and lights of a scene.
#[derive(Clone, Debug, Default)]
pub struct World {
    shapes: Vec<Arc<Shape>>,
    lights: Vec<PointLight>,
}

impl World {
    /// Creates a new empty `World`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seals `shape` and adds it to this `World`.
    pub fn add(&mut self, shape: Shape) -> Arc<Shape> {
        let shape = shape.into_arc();
        self.shapes.push(shape.clone());
        shape
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn shapes(&self) -> &[Arc<Shape>] {
        &self.shapes
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Finds all intersections of `ray` with the shapes in this `World`.
    pub fn intersect(&self, ray: &Ray) -> Intersections<'_> {
        let mut xs = Vec::new();
        for shape in &self.shapes {
            shape.intersect_into(ray, &mut xs);
        }
        Intersections::new(xs)
    }

    /// Finds the color seen along `ray`, following at most `remaining` bounces.
    pub fn color_at(&self, ray: &Ray, remaining: u32) -> Color {
        let xs = self.intersect(ray);
        match xs.hit_index() {
            Some(hit) => {
                let comps = Computations::new(&xs, hit, ray);
                self.shade_hit(&comps, remaining)
            }
            None => Color::black(),
        }
    }

    /// Finds the color at the hit described by `comps`.
    pub fn shade_hit(&self, comps: &Computations, remaining: u32) -> Color {
        let material = &comps.material;
        let surface: Color = self
            .lights
            .iter()
            .map(|light| {
                let in_shadow = self.is_shadowed(light, &comps.over_point);
                material.lighting(
                    comps.shape,
                    light,
                    &comps.over_point,
                    &comps.eyev,
                    &comps.normalv,
                    in_shadow,
                )
            })
            .sum();

        let reflected = self.reflected_color(comps, remaining);
        let refracted = self.refracted_color(comps, remaining);
        if material.reflective > 0.0 && material.transparency > 0.0 {
            let reflectance = comps.schlick();
            surface + reflected * reflectance + refracted * (1.0 - reflectance)
        } else {
            surface + reflected + refracted
        }
    }

    /// Checks if something that casts shadows lies between `p` and `light`.
    pub fn is_shadowed(&self, light: &PointLight, p: &Point3) -> bool {
        let sample = light.sample(p);
        let ray = Ray::new(*p, sample.l);
        let xs = self.intersect(&ray);
        xs.hit_casting_shadow().map_or(false, |x| x.t < sample.dist)
    }

    pub fn reflected_color(&self, comps: &Computations, remaining: u32) -> Color {
        let reflective = comps.material.reflective;
        if remaining == 0 || reflective == 0.0 {
            return Color::black();
        }
        let ray = Ray::new(comps.over_point, comps.reflectv);
        self.color_at(&ray, remaining - 1) * reflective
    }

    pub fn refracted_color(&self, comps: &Computations, remaining: u32) -> Color {
        let transparency = comps.material.transparency;
        if remaining == 0 || transparency == 0.0 {
            return Color::black();
        }

        // Snell's law
        let n_ratio = comps.n1 / comps.n2;
        let cos_i = comps.eyev.dot(&comps.normalv);
        let sin2_t = n_ratio * n_ratio * (1.0 - cos_i * cos_i);
        if sin2_t > 1.0 {
            // Total internal reflection
            return Color::black();
        }

        let cos_t = (1.0 - sin2_t).sqrt();
        let direction = comps.normalv * (n_ratio * cos_i - cos_t) - comps.eyev * n_ratio;
        let ray = Ray::new(comps.under_point, direction);
        self.color_at(&ray, remaining - 1) * transparency
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        intersection::Intersection,
        material::Material,
        math::{point3, transforms::*, vec3, EPSILON},
        patterns::{Pattern, PatternKind},
        scene::demos::default_world,
        shapes::CsgOp,
    };

    const SQRT_2: f64 = std::f64::consts::SQRT_2;

    fn outer_material() -> Material {
        Material {
            diffuse: 0.7,
            specular: 0.2,
            ..Material::with_color(Color::new(0.8, 1.0, 0.6))
        }
    }

    // The default world with materials swapped out
    fn world_with(outer: Material, inner: Material) -> World {
        let mut w = World::new();
        w.add_light(PointLight::new(point3(-10.0, 10.0, -10.0), Color::white()));
        w.add(Shape::sphere().with_material(outer));
        w.add(
            Shape::sphere()
                .with_transform(scale(0.5, 0.5, 0.5))
                .with_material(inner),
        );
        w
    }

    fn comps_for<'a>(xs: &Intersections<'a>, hit: usize, r: &Ray) -> Computations<'a> {
        Computations::new(xs, hit, r)
    }

    #[test]
    fn intersect_default_world() {
        let w = default_world();
        let r = Ray::new(point3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
        let ts: Vec<f64> = w.intersect(&r).iter().map(|x| x.t).collect();
        assert_eq!(ts, vec![4.0, 4.5, 5.5, 6.0]);
    }

    #[test]
    fn shade_outside() {
        let w = default_world();
        let r = Ray::new(point3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
        let xs = Intersections::new(vec![Intersection::new(4.0, &w.shapes()[0])]);
        let c = w.shade_hit(&comps_for(&xs, 0, &r), MAX_DEPTH);
        assert_abs_diff_eq!(c, Color::new(0.38066, 0.47583, 0.2855), epsilon = 1e-4);
    }

    #[test]
    fn shade_inside() {
        let mut w = World::new();
        w.add_light(PointLight::new(point3(0.0, 0.25, 0.0), Color::white()));
        w.add(Shape::sphere().with_material(outer_material()));
        let inner = w.add(Shape::sphere().with_transform(scale(0.5, 0.5, 0.5)));
        let r = Ray::new(point3(0.0, 0.0, 0.0), vec3(0.0, 0.0, 1.0));
        let xs = Intersections::new(vec![Intersection::new(0.5, &inner)]);
        let c = w.shade_hit(&comps_for(&xs, 0, &r), MAX_DEPTH);
        assert_abs_diff_eq!(c, Color::gray(0.90498), epsilon = 1e-4);
    }

    #[test]
    fn shade_in_shadow() {
        let mut w = World::new();
        w.add_light(PointLight::new(point3(0.0, 0.0, -10.0), Color::white()));
        w.add(Shape::sphere());
        let s2 = w.add(Shape::sphere().with_transform(translation(0.0, 0.0, 10.0)));
        let r = Ray::new(point3(0.0, 0.0, 5.0), vec3(0.0, 0.0, 1.0));
        let xs = Intersections::new(vec![Intersection::new(4.0, &s2)]);
        let c = w.shade_hit(&comps_for(&xs, 0, &r), MAX_DEPTH);
        assert_abs_diff_eq!(c, Color::gray(0.1), epsilon = EPSILON);
    }

    #[test]
    fn color_at_miss_and_hit() {
        let w = default_world();
        let miss = Ray::new(point3(0.0, 0.0, -5.0), vec3(0.0, 1.0, 0.0));
        assert_eq!(w.color_at(&miss, MAX_DEPTH), Color::black());
        let hit = Ray::new(point3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
        assert_abs_diff_eq!(
            w.color_at(&hit, MAX_DEPTH),
            Color::new(0.38066, 0.47583, 0.2855),
            epsilon = 1e-4
        );
    }

    #[test]
    fn color_at_hit_behind_ray() {
        let inner = Material {
            ambient: 1.0,
            ..Material::default()
        };
        let outer = Material {
            ambient: 1.0,
            ..outer_material()
        };
        let w = world_with(outer, inner);
        let r = Ray::new(point3(0.0, 0.0, 0.75), vec3(0.0, 0.0, -1.0));
        assert_abs_diff_eq!(w.color_at(&r, MAX_DEPTH), Color::white(), epsilon = EPSILON);
    }

    #[test]
    fn shadows() {
        let w = default_world();
        let light = &w.lights()[0];
        assert!(!w.is_shadowed(light, &point3(0.0, 10.0, 0.0)));
        assert!(w.is_shadowed(light, &point3(10.0, -10.0, 10.0)));
        assert!(!w.is_shadowed(light, &point3(-20.0, 20.0, -20.0)));
        assert!(!w.is_shadowed(light, &point3(-2.0, 2.0, -2.0)));
    }

    #[test]
    fn non_casting_shapes_leave_no_shadow() {
        let mut w = World::new();
        w.add_light(PointLight::new(point3(0.0, 10.0, 0.0), Color::white()));
        w.add(Shape::sphere().with_transform(translation(0.0, 5.0, 0.0)).with_shadow(false));
        assert!(!w.is_shadowed(&w.lights()[0], &point3(0.0, 0.0, 0.0)));
    }

    #[test]
    fn non_casting_group_leaves_no_shadow() {
        let mut w = World::new();
        w.add_light(PointLight::new(point3(0.0, 10.0, 0.0), Color::white()));
        w.add(
            Shape::group(vec![Shape::sphere()])
                .with_transform(translation(0.0, 5.0, 0.0))
                .with_shadow(false),
        );
        let origin = point3(0.0, 0.0, 0.0);
        assert!(!w.is_shadowed(&w.lights()[0], &origin));

        w.add(Shape::csg(
            CsgOp::Union,
            Shape::cube().with_transform(translation(0.0, 3.0, 0.0)),
            Shape::sphere().with_transform(translation(0.0, 7.0, 0.0)),
        )
        .with_shadow(false));
        assert!(!w.is_shadowed(&w.lights()[0], &origin));

        w.add(Shape::group(vec![Shape::sphere()]).with_transform(translation(0.0, 5.0, 0.0)));
        assert!(w.is_shadowed(&w.lights()[0], &origin));
    }

    #[test]
    fn opaque_hit_traces_no_secondary_rays() {
        // A mirror behind the eye would show up if a reflected ray were traced
        let mut w = default_world();
        w.add(
            reflective_plane()
                .with_transform(
                    rotation_x(std::f64::consts::FRAC_PI_2).then(&translation(0.0, 0.0, -7.0)),
                )
                .with_shadow(false),
        );
        let r = Ray::new(point3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
        let xs = w.intersect(&r);
        let comps = comps_for(&xs, xs.hit_index().unwrap(), &r);
        assert_eq!(comps.material.reflective, 0.0);
        assert_eq!(comps.material.transparency, 0.0);

        let surface: Color = w
            .lights()
            .iter()
            .map(|light| {
                comps.material.lighting(
                    comps.shape,
                    light,
                    &comps.over_point,
                    &comps.eyev,
                    &comps.normalv,
                    w.is_shadowed(light, &comps.over_point),
                )
            })
            .sum();
        assert_eq!(w.shade_hit(&comps, MAX_DEPTH), surface);
        assert_eq!(w.shade_hit(&comps, 0), surface);
    }

    #[test]
    fn reflected_nonreflective() {
        let inner = Material {
            ambient: 1.0,
            ..Material::default()
        };
        let w = world_with(outer_material(), inner);
        let r = Ray::new(point3(0.0, 0.0, 0.0), vec3(0.0, 0.0, 1.0));
        let xs = Intersections::new(vec![Intersection::new(1.0, &w.shapes()[1])]);
        let comps = comps_for(&xs, 0, &r);
        assert_eq!(w.reflected_color(&comps, MAX_DEPTH), Color::black());
    }

    fn reflective_plane() -> Shape {
        Shape::plane()
            .with_material(Material {
                reflective: 0.5,
                ..Material::default()
            })
            .with_transform(translation(0.0, -1.0, 0.0))
    }

    #[test]
    fn reflected_reflective() {
        let mut w = default_world();
        let plane = w.add(reflective_plane());
        let r = Ray::new(point3(0.0, 0.0, -3.0), vec3(0.0, -SQRT_2 / 2.0, SQRT_2 / 2.0));
        let xs = Intersections::new(vec![Intersection::new(SQRT_2, &plane)]);
        let comps = comps_for(&xs, 0, &r);
        assert_abs_diff_eq!(
            w.reflected_color(&comps, MAX_DEPTH),
            Color::new(0.19033, 0.23791, 0.14274),
            epsilon = 1e-3
        );
        assert_abs_diff_eq!(
            w.shade_hit(&comps, MAX_DEPTH),
            Color::new(0.87675, 0.92434, 0.82917),
            epsilon = 1e-3
        );
        // Out of bounces
        assert_eq!(w.reflected_color(&comps, 0), Color::black());
    }

    #[test]
    fn parallel_mirrors_terminate() {
        let mirror = || Material {
            reflective: 1.0,
            ..Material::default()
        };
        let mut w = World::new();
        w.add_light(PointLight::new(point3(0.0, 0.0, 0.0), Color::white()));
        w.add(Shape::plane().with_material(mirror()).with_transform(translation(0.0, -1.0, 0.0)));
        w.add(
            Shape::plane()
                .with_material(mirror())
                .with_transform(rotation_x(std::f64::consts::PI).then(&translation(0.0, 1.0, 0.0))),
        );
        let r = Ray::new(point3(0.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0));
        let c = w.color_at(&r, MAX_DEPTH);
        assert!(c.r.is_finite() && c.r > 0.0);
    }

    #[test]
    fn refracted_opaque() {
        let w = default_world();
        let s = &w.shapes()[0];
        let r = Ray::new(point3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
        let xs = Intersections::new(vec![Intersection::new(4.0, s), Intersection::new(6.0, s)]);
        assert_eq!(w.refracted_color(&comps_for(&xs, 0, &r), 5), Color::black());
    }

    #[test]
    fn refracted_out_of_bounces() {
        let w = world_with(
            Material {
                transparency: 1.0,
                refractive_index: 1.5,
                ..outer_material()
            },
            Material::default(),
        );
        let s = &w.shapes()[0];
        let r = Ray::new(point3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
        let xs = Intersections::new(vec![Intersection::new(4.0, s), Intersection::new(6.0, s)]);
        assert_eq!(w.refracted_color(&comps_for(&xs, 0, &r), 0), Color::black());
    }

    #[test]
    fn refracted_total_internal_reflection() {
        let w = world_with(
            Material {
                transparency: 1.0,
                refractive_index: 1.5,
                ..outer_material()
            },
            Material::default(),
        );
        let s = &w.shapes()[0];
        let r = Ray::new(point3(0.0, 0.0, SQRT_2 / 2.0), vec3(0.0, 1.0, 0.0));
        let xs = Intersections::new(vec![
            Intersection::new(-SQRT_2 / 2.0, s),
            Intersection::new(SQRT_2 / 2.0, s),
        ]);
        // Inside the sphere, so the second intersection is the hit
        assert_eq!(w.refracted_color(&comps_for(&xs, 1, &r), 5), Color::black());
    }

    #[test]
    fn refracted_ray_follows_snell() {
        let a = Material {
            ambient: 1.0,
            pattern: Pattern::new(PatternKind::Test),
            ..outer_material()
        };
        let b = Material {
            transparency: 1.0,
            refractive_index: 1.5,
            ..Material::default()
        };
        let w = world_with(a, b);
        let (a, b) = (&w.shapes()[0], &w.shapes()[1]);
        let r = Ray::new(point3(0.0, 0.0, 0.1), vec3(0.0, 1.0, 0.0));
        let xs = Intersections::new(vec![
            Intersection::new(-0.9899, a),
            Intersection::new(-0.4899, b),
            Intersection::new(0.4899, b),
            Intersection::new(0.9899, a),
        ]);
        let c = w.refracted_color(&comps_for(&xs, 2, &r), 5);
        assert_abs_diff_eq!(c, Color::new(0.0, 0.99888, 0.04725), epsilon = 1e-3);
    }

    fn glass_floor(reflective: f64) -> Shape {
        Shape::plane()
            .with_transform(translation(0.0, -1.0, 0.0))
            .with_material(Material {
                reflective,
                transparency: 0.5,
                refractive_index: 1.5,
                ..Material::default()
            })
    }

    fn red_ball() -> Shape {
        Shape::sphere()
            .with_transform(translation(0.0, -3.5, -0.5))
            .with_material(Material {
                ambient: 0.5,
                ..Material::with_color(Color::new(1.0, 0.0, 0.0))
            })
    }

    #[test]
    fn shade_transparent() {
        let mut w = default_world();
        let floor = w.add(glass_floor(0.0));
        w.add(red_ball());
        let r = Ray::new(point3(0.0, 0.0, -3.0), vec3(0.0, -SQRT_2 / 2.0, SQRT_2 / 2.0));
        let xs = Intersections::new(vec![Intersection::new(SQRT_2, &floor)]);
        let c = w.shade_hit(&comps_for(&xs, 0, &r), 5);
        assert_abs_diff_eq!(c, Color::new(0.93642, 0.68642, 0.68642), epsilon = 1e-4);
    }

    #[test]
    fn shade_reflective_transparent_uses_schlick() {
        let mut w = default_world();
        let floor = w.add(glass_floor(0.5));
        w.add(red_ball());
        let r = Ray::new(point3(0.0, 0.0, -3.0), vec3(0.0, -SQRT_2 / 2.0, SQRT_2 / 2.0));
        let xs = Intersections::new(vec![Intersection::new(SQRT_2, &floor)]);
        let c = w.shade_hit(&comps_for(&xs, 0, &r), 5);
        assert_abs_diff_eq!(c, Color::new(0.93391, 0.69643, 0.69243), epsilon = 1e-4);
    }
}
