use super::Shape;
use crate::{
    intersection::Intersection,
    math::{roots::solve_quadratic, Ray},
};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Shapes/Spheres.html

/// Appends the intersections of the local-space `ray` with the unit sphere to `out`.
pub(super) fn intersect<'a>(shape: &'a Shape, ray: &Ray, out: &mut Vec<Intersection<'a>>) {
    let o = ray.o.coords;
    let d = ray.d;

    // Quadratic coefficients
    let a = d.dot(&d);
    let b = 2.0 * d.dot(&o);
    let c = o.dot(&o) - 1.0;

    if let Some((t0, t1)) = solve_quadratic(a, b, c) {
        out.push(Intersection::new(t0, shape));
        out.push(Intersection::new(t1, shape));
    }
}
