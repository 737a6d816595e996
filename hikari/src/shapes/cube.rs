use super::Shape;
use crate::{
    intersection::Intersection,
    math::{Bounds3, Point3, Ray, Vec3},
};

/// Appends the intersections of the local-space `ray` with the unit cube to `out`.
pub(super) fn intersect<'a>(shape: &'a Shape, ray: &Ray, out: &mut Vec<Intersection<'a>>) {
    let unit = Bounds3::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
    if let Some((t0, t1)) = unit.intersections(ray) {
        out.push(Intersection::new(t0, shape));
        out.push(Intersection::new(t1, shape));
    }
}

/// Finds the normal of the face that `p` lies on, picked by the largest component.
pub(super) fn normal(p: &Point3) -> Vec3 {
    let (ax, ay, az) = (p.x.abs(), p.y.abs(), p.z.abs());
    let max = ax.max(ay).max(az);
    if max == ax {
        Vec3::new(p.x, 0.0, 0.0)
    } else if max == ay {
        Vec3::new(0.0, p.y, 0.0)
    } else {
        Vec3::new(0.0, 0.0, p.z)
    }
}
