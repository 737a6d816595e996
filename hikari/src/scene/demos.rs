//! Built-in scenes.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6, PI};

use itertools::iproduct;

use super::{obj::ObjModel, Scene};
use crate::{
    accel::AccelSettings,
    lights::PointLight,
    material::Material,
    math::{point3, transforms::*, vec3, Color, Point3, Transform, Vec3},
    patterns::Pattern,
    shapes::{CsgOp, Group, Shape, ShapeKind},
    world::World,
};

/// Two concentric spheres lit from the upper left.
///
/// The outer sphere is a unit sphere and the inner one has radius 0.5.
pub fn default_world() -> World {
    let mut w = World::new();
    w.add_light(PointLight::new(point3(-10.0, 10.0, -10.0), Color::white()));
    w.add(Shape::sphere().with_material(Material {
        diffuse: 0.7,
        specular: 0.2,
        ..Material::with_color(Color::new(0.8, 1.0, 0.6))
    }));
    w.add(Shape::sphere().with_transform(scale(0.5, 0.5, 0.5)));
    w
}

fn checkered_floor() -> Shape {
    Shape::plane().with_material(Material {
        pattern: Pattern::checkers(Color::gray(0.35), Color::gray(0.65)),
        specular: 0.0,
        reflective: 0.1,
        ..Material::default()
    })
}

pub fn spheres() -> Scene {
    let mut w = World::new();
    w.add_light(PointLight::new(point3(-10.0, 10.0, -10.0), Color::white()));
    w.add(checkered_floor());
    w.add(
        Shape::plane()
            .with_transform(rotation_x(FRAC_PI_2).then(&translation(0.0, 0.0, 10.0)))
            .with_material(Material {
                pattern: Pattern::perturbed(
                    Pattern::stripe(Color::new(0.9, 0.8, 0.7), Color::new(0.7, 0.6, 0.5))
                        .with_transform(scale(0.5, 0.5, 0.5).then(&rotation_y(FRAC_PI_4))),
                    0.3,
                ),
                specular: 0.0,
                ..Material::default()
            }),
    );
    w.add(
        Shape::sphere()
            .with_transform(translation(-0.5, 1.0, 0.5))
            .with_material(Material {
                pattern: Pattern::gradient(Color::new(0.1, 1.0, 0.5), Color::new(0.1, 0.2, 1.0))
                    .with_transform(scale(2.0, 1.0, 1.0).then(&translation(-1.0, 0.0, 0.0))),
                diffuse: 0.7,
                specular: 0.3,
                ..Material::default()
            }),
    );
    w.add(
        Shape::sphere()
            .with_transform(scale(0.5, 0.5, 0.5).then(&translation(1.5, 0.5, -0.5)))
            .with_material(Material {
                pattern: Pattern::ring(Color::new(0.5, 1.0, 0.1), Color::white())
                    .with_transform(scale(0.2, 0.2, 0.2).then(&rotation_x(FRAC_PI_3))),
                diffuse: 0.7,
                specular: 0.3,
                ..Material::default()
            }),
    );
    w.add(
        Shape::sphere()
            .with_transform(scale(0.33, 0.33, 0.33).then(&translation(-1.5, 0.33, -0.75)))
            .with_material(Material {
                pattern: Pattern::blend(
                    Pattern::stripe(Color::new(1.0, 0.8, 0.1), Color::white())
                        .with_transform(scale(0.25, 0.25, 0.25)),
                    Pattern::stripe(Color::new(1.0, 0.8, 0.1), Color::white())
                        .with_transform(scale(0.25, 0.25, 0.25).then(&rotation_y(FRAC_PI_2))),
                ),
                diffuse: 0.7,
                specular: 0.3,
                ..Material::default()
            }),
    );
    Scene::new(w, point3(0.0, 1.5, -5.0), point3(0.0, 1.0, 0.0))
}

// Pip layouts on a face as offsets along its two tangents
const ONE: &[(f64, f64)] = &[(0.0, 0.0)];
const TWO: &[(f64, f64)] = &[(-0.5, -0.5), (0.5, 0.5)];
const THREE: &[(f64, f64)] = &[(-0.5, -0.5), (0.0, 0.0), (0.5, 0.5)];
const FOUR: &[(f64, f64)] = &[(-0.5, -0.5), (-0.5, 0.5), (0.5, -0.5), (0.5, 0.5)];
const FIVE: &[(f64, f64)] = &[(-0.5, -0.5), (-0.5, 0.5), (0.0, 0.0), (0.5, -0.5), (0.5, 0.5)];
const SIX: &[(f64, f64)] = &[
    (-0.5, -0.5),
    (-0.5, 0.0),
    (-0.5, 0.5),
    (0.5, -0.5),
    (0.5, 0.0),
    (0.5, 0.5),
];

fn pip_centers() -> Vec<Point3> {
    let x = vec3(1.0, 0.0, 0.0);
    let y = vec3(0.0, 1.0, 0.0);
    let z = vec3(0.0, 0.0, 1.0);
    // Opposite faces sum to seven
    let faces: [(Vec3, Vec3, Vec3, &[(f64, f64)]); 6] = [
        (-z, x, y, ONE),
        (z, x, y, SIX),
        (y, x, z, TWO),
        (-y, x, z, FIVE),
        (x, y, z, THREE),
        (-x, y, z, FOUR),
    ];
    faces
        .iter()
        .flat_map(|(n, u, v, offsets)| {
            offsets
                .iter()
                .map(move |(a, b)| Point3::origin() + n + u * *a + v * *b)
        })
        .collect()
}

/// A rounded cube with spherical pips carved out of its faces.
pub fn die(body: Material, pips: Material) -> Shape {
    let rounded = Shape::csg(
        CsgOp::Intersection,
        Shape::cube(),
        Shape::sphere().with_transform(scale(1.45, 1.45, 1.45)),
    );
    let holes = Shape::group(pip_centers().into_iter().map(|p| {
        Shape::sphere()
            .with_transform(scale(0.2, 0.2, 0.2).then(&translation(p.x, p.y, p.z)))
            .with_material(pips.clone())
    }));
    Shape::csg(CsgOp::Difference, rounded, holes).with_material(body)
}

pub fn dice() -> Scene {
    let mut w = World::new();
    w.add_light(PointLight::new(point3(-8.0, 10.0, -10.0), Color::white()));
    w.add(checkered_floor());

    let pips = Material {
        specular: 0.1,
        ..Material::with_color(Color::gray(0.05))
    };
    w.add(
        die(
            Material {
                reflective: 0.05,
                ..Material::with_color(Color::new(0.9, 0.1, 0.1))
            },
            pips.clone(),
        )
        .with_transform(
            scale(0.7, 0.7, 0.7)
                .then(&rotation_y(-FRAC_PI_6))
                .then(&translation(-1.0, 0.7, 0.0)),
        ),
    );
    w.add(
        die(
            Material {
                reflective: 0.05,
                ..Material::with_color(Color::new(0.95, 0.95, 0.9))
            },
            pips,
        )
        .with_transform(
            scale(0.7, 0.7, 0.7)
                .then(&rotation_x(FRAC_PI_2))
                .then(&rotation_y(FRAC_PI_3))
                .then(&translation(1.2, 0.7, 0.5)),
        ),
    );
    Scene::new(w, point3(0.0, 3.0, -6.0), point3(0.0, 0.5, 0.0))
}

fn hexagon_side() -> Shape {
    let corner = Shape::sphere()
        .with_transform(scale(0.25, 0.25, 0.25).then(&translation(0.0, 0.0, -1.0)));
    let edge = Shape::cylinder(0.0, 1.0, false).with_transform(
        scale(0.25, 1.0, 0.25)
            .then(&rotation_z(-FRAC_PI_2))
            .then(&rotation_y(-FRAC_PI_6))
            .then(&translation(0.0, 0.0, -1.0)),
    );
    Shape::group(vec![corner, edge])
}

/// Six corner spheres joined by cylinders, built from nested groups.
pub fn hexagon_shape() -> Shape {
    Shape::group((0..6).map(|i| hexagon_side().with_transform(rotation_y(i as f64 * FRAC_PI_3))))
}

pub fn hexagon() -> Scene {
    let mut w = World::new();
    w.add_light(PointLight::new(point3(-5.0, 8.0, -8.0), Color::white()));
    w.add(checkered_floor().with_transform(translation(0.0, -0.25, 0.0)));
    w.add(
        hexagon_shape()
            .with_transform(rotation_x(-FRAC_PI_6).then(&translation(0.0, 0.75, 0.0)))
            .with_material(Material {
                reflective: 0.2,
                ..Material::with_color(Color::new(0.2, 0.5, 0.9))
            }),
    );
    Scene::new(w, point3(0.0, 2.5, -4.0), point3(0.0, 0.5, 0.0))
}

pub fn glass() -> Scene {
    let mut w = World::new();
    w.add_light(PointLight::new(point3(-4.0, 6.0, -8.0), Color::white()));
    w.add(checkered_floor());
    w.add(
        Shape::plane()
            .with_transform(rotation_x(FRAC_PI_2).then(&translation(0.0, 0.0, 6.0)))
            .with_material(Material {
                pattern: Pattern::stripe(Color::new(0.3, 0.4, 0.7), Color::new(0.8, 0.8, 0.9)),
                specular: 0.0,
                ..Material::default()
            }),
    );

    // Hollow glass ball with an air pocket
    let glass = Material {
        ambient: 0.0,
        diffuse: 0.1,
        specular: 1.0,
        shininess: 300.0,
        reflective: 0.9,
        ..Material::glass()
    };
    w.add(
        Shape::sphere()
            .with_transform(translation(0.0, 1.0, 0.0))
            .with_material(glass.clone())
            .with_shadow(false),
    );
    w.add(
        Shape::sphere()
            .with_transform(scale(0.5, 0.5, 0.5).then(&translation(0.0, 1.0, 0.0)))
            .with_material(Material {
                refractive_index: 1.0000034,
                ..glass
            })
            .with_shadow(false),
    );

    w.add(
        Shape::sphere()
            .with_transform(scale(0.6, 0.6, 0.6).then(&translation(-2.0, 0.6, 2.0)))
            .with_material(Material {
                diffuse: 0.2,
                reflective: 0.8,
                ..Material::with_color(Color::gray(0.1))
            }),
    );
    w.add(
        Shape::cylinder(0.0, 1.5, true)
            .with_transform(scale(0.5, 1.0, 0.5).then(&translation(2.0, 0.0, 2.0)))
            .with_material(Material {
                pattern: Pattern::ring(Color::new(0.9, 0.5, 0.1), Color::new(0.6, 0.2, 0.0))
                    .with_transform(scale(0.1, 0.1, 0.1)),
                ..Material::default()
            }),
    );
    Scene::new(w, point3(0.0, 2.0, -5.0), point3(0.0, 1.0, 0.0))
}

/// Vertices of a unit sphere made by subdividing an icosahedron `subdivisions` times.
pub fn icosphere(subdivisions: u32) -> Vec<[Point3; 3]> {
    let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let vertices = [
        vec3(-1.0, t, 0.0),
        vec3(1.0, t, 0.0),
        vec3(-1.0, -t, 0.0),
        vec3(1.0, -t, 0.0),
        vec3(0.0, -1.0, t),
        vec3(0.0, 1.0, t),
        vec3(0.0, -1.0, -t),
        vec3(0.0, 1.0, -t),
        vec3(t, 0.0, -1.0),
        vec3(t, 0.0, 1.0),
        vec3(-t, 0.0, -1.0),
        vec3(-t, 0.0, 1.0),
    ]
    .map(|v| Point3::from(v.normalize()));
    let faces: [[usize; 3]; 20] = [
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    let mut tris: Vec<[Point3; 3]> = faces
        .iter()
        .map(|f| [vertices[f[0]], vertices[f[1]], vertices[f[2]]])
        .collect();
    let mid = |a: &Point3, b: &Point3| Point3::from((a.coords + b.coords).normalize());
    for _ in 0..subdivisions {
        tris = tris
            .iter()
            .flat_map(|[a, b, c]| {
                let (ab, bc, ca) = (mid(a, b), mid(b, c), mid(c, a));
                [[*a, ab, ca], [ab, *b, bc], [ca, bc, *c], [ab, bc, ca]]
            })
            .collect();
    }
    tris
}

/// An icosphere as a group of triangles, smooth shaded if `smooth`.
pub fn icosphere_shape(subdivisions: u32, smooth: bool, settings: &AccelSettings) -> Shape {
    let triangles = icosphere(subdivisions).into_iter().map(|[a, b, c]| {
        if smooth {
            // Points on a unit sphere are their own normals
            Shape::smooth_triangle(a, b, c, a.coords, b.coords, c.coords)
        } else {
            Shape::triangle(a, b, c)
        }
    });
    Shape::new(ShapeKind::Group(Group::new(triangles, settings)))
}

pub fn mesh(settings: &AccelSettings) -> Scene {
    let mut w = World::new();
    w.add_light(PointLight::new(point3(-6.0, 8.0, -8.0), Color::white()));
    w.add(checkered_floor());

    let gold = Material {
        specular: 0.6,
        shininess: 80.0,
        reflective: 0.15,
        ..Material::with_color(Color::new(0.9, 0.7, 0.2))
    };
    w.add(
        icosphere_shape(3, true, settings)
            .with_transform(translation(-1.2, 1.0, 0.0))
            .with_material(gold.clone()),
    );
    w.add(
        icosphere_shape(1, false, settings)
            .with_transform(translation(1.2, 1.0, 0.0))
            .with_material(gold),
    );
    // A grid of small spheres lands in an oct-tree
    let grid = iproduct!(0..5, 0..5).map(|(i, j)| {
        Shape::sphere()
            .with_transform(
                scale(0.15, 0.15, 0.15)
                    .then(&translation(i as f64 * 0.5 - 1.0, 0.15, j as f64 * 0.5 + 1.5)),
            )
            .with_material(Material::with_color(Color::new(
                0.2 + 0.15 * i as f64,
                0.3,
                0.2 + 0.15 * j as f64,
            )))
    });
    w.add(Shape::new(ShapeKind::Group(Group::new(grid, settings))));
    Scene::new(w, point3(0.0, 2.5, -5.0), point3(0.0, 1.0, 0.0))
}

/// Intersection of two tori in the xz-plane, the second shifted by `offset` on x.
pub fn torus_intersection(major_radius: f64, minor_radius: f64, offset: f64) -> Shape {
    Shape::csg(
        CsgOp::Intersection,
        Shape::torus(major_radius, minor_radius),
        Shape::torus(major_radius, minor_radius).with_transform(translation(offset, 0.0, 0.0)),
    )
}

pub fn quartic() -> Scene {
    let mut w = World::new();
    w.add_light(PointLight::new(point3(-6.0, 8.0, -8.0), Color::white()));
    w.add(checkered_floor());
    w.add(
        Shape::torus(1.0, 0.3)
            .with_transform(rotation_x(-FRAC_PI_3).then(&translation(-1.5, 1.1, 0.5)))
            .with_material(Material {
                reflective: 0.1,
                ..Material::with_color(Color::new(0.2, 0.6, 0.9))
            }),
    );
    w.add(
        Shape::fusiform()
            .with_transform(scale(0.8, 1.2, 0.8).then(&translation(1.3, 1.2, 0.3)))
            .with_material(Material {
                pattern: Pattern::stripe(Color::new(0.9, 0.3, 0.2), Color::new(0.95, 0.9, 0.8))
                    .with_transform(scale(0.1, 0.1, 0.1).then(&rotation_z(FRAC_PI_2))),
                ..Material::default()
            }),
    );
    w.add(
        Shape::hyperboloid(-1.0, 1.0, true)
            .with_transform(scale(0.3, 0.5, 0.3).then(&translation(0.0, 0.5, -1.2)))
            .with_material(Material::with_color(Color::new(0.4, 0.8, 0.3))),
    );
    w.add(
        Shape::cone(-1.0, 0.0, true)
            .with_transform(scale(0.4, 0.8, 0.4).then(&translation(0.2, 0.8, 2.0)))
            .with_material(Material::with_color(Color::new(0.8, 0.4, 0.8))),
    );
    w.add(
        torus_intersection(0.6, 0.25, 0.4)
            .with_transform(rotation_y(FRAC_PI_6).then(&translation(1.6, 0.25, -1.6)))
            .with_material(Material {
                specular: 0.6,
                ..Material::with_color(Color::new(0.9, 0.75, 0.2))
            }),
    );
    Scene::new(w, point3(0.0, 2.5, -5.5), point3(0.0, 0.9, 0.0))
}

/// Places an imported model on a floor, scaled to fit a 2 unit box.
pub fn obj_model(model: ObjModel, settings: &AccelSettings) -> Scene {
    let shape = model.into_shape(settings);
    let b = shape.bounds();
    let fit = if b.is_empty() {
        Transform::identity()
    } else {
        let extent = b.p_max - b.p_min;
        let center = b.p_min + extent * 0.5;
        let s = 2.0 / extent.max().max(f64::EPSILON);
        translation(-center.x, -center.y, -center.z)
            .then(&scale(s, s, s))
            .then(&translation(0.0, extent.y * s * 0.5, 0.0))
    };

    let mut w = World::new();
    w.add_light(PointLight::new(point3(-6.0, 8.0, -8.0), Color::white()));
    w.add(checkered_floor());
    w.add(
        shape
            .with_transform(fit.then(&rotation_y(PI)))
            .with_material(Material::with_color(Color::gray(0.8))),
    );
    Scene::new(w, point3(0.0, 2.0, -4.5), point3(0.0, 1.0, 0.0))
}
