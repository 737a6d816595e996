#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};

    use approx::assert_abs_diff_eq;

    use hikari::{
        camera::Camera,
        computations::Computations,
        intersection::{Intersection, Intersections},
        material::Material,
        math::{point3, transforms::*, vec3, Color, Ray},
        scene::{self, demos::default_world},
        settings::{RenderSettings, SceneType},
        shapes::Shape,
        world::MAX_DEPTH,
    };

    fn render_with_threads(settings: &RenderSettings, threads: usize) -> hikari::canvas::Canvas {
        let scene = scene::load(settings).unwrap();
        let camera = Camera::new(
            settings.width,
            settings.height,
            settings.fov.to_radians(),
            &scene.view,
        )
        .with_depth(settings.depth)
        .with_samples(settings.samples_per_pixel);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap();
        pool.install(|| camera.render(&scene.world))
    }

    #[test]
    fn default_world_hits_in_order() {
        let w = default_world();
        let r = Ray::new(point3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
        let ts: Vec<f64> = w.intersect(&r).iter().map(|x| x.t).collect();
        assert_eq!(ts.len(), 4);
        for (t, expected) in ts.iter().zip([4.0, 4.5, 5.5, 6.0]) {
            assert_abs_diff_eq!(*t, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn default_world_colors() {
        let w = default_world();
        let r = Ray::new(point3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
        assert_abs_diff_eq!(
            w.color_at(&r, MAX_DEPTH),
            Color::new(0.38066, 0.47583, 0.2855),
            epsilon = 1e-4
        );
        let r = Ray::new(point3(0.0, 0.0, -5.0), vec3(0.0, 1.0, 0.0));
        assert_eq!(w.color_at(&r, MAX_DEPTH), Color::black());
    }

    #[test]
    fn mirror_at_depth_zero_only_shades_surface() {
        let mut w = default_world();
        let mirror = Material {
            reflective: 1.0,
            ..Material::default()
        };
        w.add(
            Shape::plane()
                .with_transform(translation(0.0, -1.0, 0.0))
                .with_material(mirror),
        );
        let h = 2.0_f64.sqrt() / 2.0;
        let r = Ray::new(point3(0.0, 0.0, -3.0), vec3(0.0, -h, h));
        let shallow = w.color_at(&r, 0);
        let deep = w.color_at(&r, MAX_DEPTH);
        assert!(deep.r > shallow.r);
    }

    #[test]
    fn total_internal_reflection_is_black() {
        let mut w = default_world();
        let glass = w.add(Shape::glass_sphere());
        let h = 2.0_f64.sqrt() / 2.0;
        let r = Ray::new(point3(0.0, 0.0, h), vec3(0.0, 1.0, 0.0));
        let xs = Intersections::new(vec![
            Intersection::new(-h, &glass),
            Intersection::new(h, &glass),
        ]);
        let comps = Computations::new(&xs, 1, &r);
        assert_eq!(w.refracted_color(&comps, MAX_DEPTH), Color::black());
    }

    #[test]
    fn render_is_independent_of_thread_count() {
        let settings = RenderSettings::from_yaml(
            "width: 24\nheight: 16\nsamples_per_pixel: 2\nscene: Dice\n",
        )
        .unwrap();
        let single = render_with_threads(&settings, 1);
        let many = render_with_threads(&settings, 4);
        assert_eq!(single, many);
        assert!(single.pixels().iter().any(|c| !c.is_black()));
    }

    #[test]
    fn renders_every_builtin_scene() {
        for scene in [
            SceneType::Spheres,
            SceneType::Hexagon,
            SceneType::Glass,
            SceneType::Mesh,
            SceneType::Quartic,
        ] {
            let settings = RenderSettings {
                width: 8,
                height: 6,
                scene,
                ..RenderSettings::default()
            };
            let canvas = render_with_threads(&settings, 2);
            assert_eq!(canvas.width(), 8);
            assert_eq!(canvas.height(), 6);
            assert!(canvas.pixels().iter().any(|c| !c.is_black()), "{}", scene);
        }
    }

    #[test]
    fn obj_scene_from_file() {
        let dir = std::env::temp_dir().join(format!("hikari-obj-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("pyramid.obj");
        std::fs::write(
            &path,
            "v -1 0 -1\nv 1 0 -1\nv 1 0 1\nv -1 0 1\nv 0 1.5 0\n\
             g sides\nf 1 2 5\nf 2 3 5\nf 3 4 5\nf 4 1 5\n",
        )
        .unwrap();

        let settings = RenderSettings {
            width: 8,
            height: 6,
            scene: SceneType::Obj,
            obj_path: Some(path),
            ..RenderSettings::default()
        };
        let scene = scene::load(&settings).unwrap();
        assert_eq!(scene.world.shapes().len(), 2);
        let canvas = render_with_threads(&settings, 2);
        assert!(canvas.pixels().iter().any(|c| !c.is_black()));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn camera_looks_at_default_world() {
        let w = default_world();
        let view = view_transform(
            point3(0.0, 0.0, -5.0),
            point3(0.0, 0.0, 0.0),
            vec3(0.0, 1.0, 0.0),
        );
        let c = Camera::new(11, 11, FRAC_PI_2, &view);
        let image = c.render(&w);
        assert_abs_diff_eq!(
            image.get(5, 5),
            Color::new(0.38066, 0.47583, 0.2855),
            epsilon = 1e-4
        );
        // Corners look past the spheres
        assert_eq!(image.get(0, 0), Color::black());
    }

    #[test]
    fn narrow_field_of_view_magnifies() {
        let w = default_world();
        let view = view_transform(
            point3(0.0, 0.0, -5.0),
            point3(0.0, 0.0, 0.0),
            vec3(0.0, 1.0, 0.0),
        );
        let wide = Camera::new(9, 9, FRAC_PI_2, &view).render(&w);
        let narrow = Camera::new(9, 9, FRAC_PI_3 / 2.0, &view).render(&w);
        let covered = |c: &hikari::canvas::Canvas| c.pixels().iter().filter(|p| !p.is_black()).count();
        assert!(covered(&narrow) > covered(&wide));
    }
}
