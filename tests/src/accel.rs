#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand_pcg::Pcg32;

    use hikari::{
        accel::{AccelKind, AccelSettings, Accelerator},
        math::{point3, vec3, Bounds3, Point3, Ray},
        shapes::Shape,
    };

    const SEED: u64 = 0x853C49E6748FEA9B;

    fn random_point(rng: &mut Pcg32, extent: f64) -> Point3 {
        point3(
            rng.gen_range(-extent..extent),
            rng.gen_range(-extent..extent),
            rng.gen_range(-extent..extent),
        )
    }

    fn random_ray(rng: &mut Pcg32) -> Ray {
        let o = random_point(rng, 20.0);
        let target = random_point(rng, 8.0);
        Ray::new(o, (target - o).normalize())
    }

    fn triangles(rng: &mut Pcg32, count: usize) -> Vec<Shape> {
        (0..count)
            .map(|_| {
                let p = random_point(rng, 10.0);
                let e1 = vec3(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), 0.5);
                let e2 = vec3(0.5, rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
                Shape::triangle(p, p + e1, p + e2)
            })
            .collect()
    }

    fn hit_ts(shape: &Shape, ray: &Ray) -> Vec<f64> {
        shape.intersect(ray).iter().map(|x| x.t).collect()
    }

    #[test]
    fn kd_tree_matches_brute_force() {
        let mut rng = Pcg32::new(SEED, 0);
        let tris = triangles(&mut rng, 500);
        let settings = AccelSettings::default();
        let plain = Shape::group_with_accel(tris.clone(), AccelKind::None, &settings);
        let kd = Shape::group_with_accel(tris, AccelKind::KdTree, &settings);

        let mut total_hits = 0;
        for _ in 0..500 {
            let r = random_ray(&mut rng);
            let expected = hit_ts(&plain, &r);
            total_hits += expected.len();
            assert_eq!(hit_ts(&kd, &r), expected);
        }
        assert!(total_hits > 0);
    }

    #[test]
    fn oct_tree_matches_brute_force() {
        let mut rng = Pcg32::new(SEED, 1);
        let mut shapes = triangles(&mut rng, 200);
        shapes.extend((0..100).map(|_| {
            let p = random_point(&mut rng, 10.0);
            let r = rng.gen_range(0.1..1.0);
            Shape::sphere().with_transform(
                hikari::math::transforms::scale(r, r, r)
                    .then(&hikari::math::transforms::translation(p.x, p.y, p.z)),
            )
        }));
        let settings = AccelSettings::default();
        let plain = Shape::group_with_accel(shapes.clone(), AccelKind::None, &settings);
        let oct = Shape::group_with_accel(shapes, AccelKind::OctTree, &settings);

        for _ in 0..500 {
            let r = random_ray(&mut rng);
            assert_eq!(hit_ts(&oct, &r), hit_ts(&plain, &r));
        }
    }

    #[test]
    fn candidates_cover_every_hit_box() {
        let mut rng = Pcg32::new(SEED, 2);
        let bounds: Vec<Bounds3> = (0..300)
            .map(|_| {
                let p = random_point(&mut rng, 10.0);
                Bounds3::new(p, p + vec3(0.5, 0.5, 0.5))
            })
            .collect();
        let settings = AccelSettings::default();
        for kind in [AccelKind::KdTree, AccelKind::OctTree] {
            let accel = Accelerator::new(kind, &bounds, &settings).unwrap();
            for _ in 0..200 {
                let r = random_ray(&mut rng);
                let mut candidates = Vec::new();
                accel.candidates(&r, &mut candidates);
                for (i, b) in bounds.iter().enumerate() {
                    if b.intersect(&r) {
                        assert!(candidates.contains(&i), "{} missed box {}", kind, i);
                    }
                }
            }
        }
    }

    #[test]
    fn empty_input_builds() {
        let settings = AccelSettings::default();
        for kind in [AccelKind::KdTree, AccelKind::OctTree] {
            if let Some(accel) = Accelerator::new(kind, &[], &settings) {
                let mut candidates = Vec::new();
                let r = Ray::new(point3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
                accel.candidates(&r, &mut candidates);
                assert!(candidates.is_empty());
            }
        }
    }
}
