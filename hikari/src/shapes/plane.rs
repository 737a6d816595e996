use super::Shape;
use crate::{
    intersection::Intersection,
    math::{Bounds3, Point3, Ray, EPSILON},
};

/// Appends the intersection of the local-space `ray` with the xz-plane to `out`.
pub(super) fn intersect<'a>(shape: &'a Shape, ray: &Ray, out: &mut Vec<Intersection<'a>>) {
    // Parallel or coplanar rays never register a hit
    if ray.d.y.abs() < EPSILON {
        return;
    }
    let t = -ray.o.y / ray.d.y;
    out.push(Intersection::new(t, shape));
}

pub(super) fn bounds() -> Bounds3 {
    Bounds3::new(
        Point3::new(f64::NEG_INFINITY, 0.0, f64::NEG_INFINITY),
        Point3::new(f64::INFINITY, 0.0, f64::INFINITY),
    )
}
