use rand::Rng;
use rand_pcg::Pcg32;
use std::time::Instant;

use hikari::{
    accel::{AccelKind, AccelSettings},
    math::{point3, Ray},
    scene::demos::icosphere,
    shapes::Shape,
};

const RAYS: usize = 200000;

fn random_rays() -> Vec<Ray> {
    let mut rng = Pcg32::new(0xCAFEF00DD15EA5E5, 0);
    (0..RAYS)
        .map(|_| {
            let o = point3(
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
                -5.0,
            );
            let target = point3(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), 0.0);
            Ray::new(o, (target - o).normalize())
        })
        .collect()
}

fn bench_trace(name: &str, triangles: &[Shape], kind: AccelKind, rays: &[Ray]) {
    let settings = AccelSettings::default();

    let build_start = Instant::now();
    let group = Shape::group_with_accel(triangles.to_vec(), kind, &settings);
    let build_ms = build_start.elapsed().as_secs_f64() * 1e3;

    let start = Instant::now();
    let mut hits = 0;
    for r in rays {
        hits += group.intersect(r).len();
    }
    if hits == 0 {
        panic!("We only wanted to force the loop to be executed!")
    }
    let elapsed_ns = start.elapsed().as_nanos();
    let elapsed_ms = (elapsed_ns as f64) * 1e-6;
    let us_per_ray = (elapsed_ns as f64) * 1e-3 / (rays.len() as f64);
    println!(
        "{:8} build {:6.1} ms, trace {:7.1} ms total, {:0.4} us per ray",
        name, build_ms, elapsed_ms, us_per_ray
    );
}

fn main() {
    let rays = random_rays();
    for subdivisions in [2, 4, 5] {
        let triangles: Vec<Shape> = icosphere(subdivisions)
            .into_iter()
            .map(|[a, b, c]| Shape::triangle(a, b, c))
            .collect();
        println!("Icosphere, {} triangles", triangles.len());
        if triangles.len() <= 5000 {
            bench_trace("None", &triangles, AccelKind::None, &rays);
        }
        bench_trace("KdTree", &triangles, AccelKind::KdTree, &rays);
        bench_trace("OctTree", &triangles, AccelKind::OctTree, &rays);
    }
}
