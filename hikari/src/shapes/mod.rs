mod cappable;
mod csg;
mod cube;
mod group;
mod plane;
mod quartic;
mod sphere;
mod triangle;

pub use cappable::{Cappable, Profile};
pub use csg::{Csg, CsgOp};
pub use group::Group;
pub use quartic::Torus;
pub use triangle::{SmoothTriangle, Triangle};

use std::sync::{Arc, OnceLock, Weak};

use crate::{
    accel::{AccelKind, AccelSettings},
    intersection::{Intersection, Intersections},
    material::{Material, DEFAULT_MATERIAL},
    math::{Bounds3, Point3, Ray, Transform, Vec3},
};

/// The geometry of a [Shape].
#[derive(Clone, Debug)]
pub enum ShapeKind {
    /// Unit sphere at the origin
    Sphere,
    /// The xz-plane
    Plane,
    /// Axis-aligned cube spanning [-1, 1] on each axis
    Cube,
    /// Cylinder, cone or hyperboloid around the y-axis
    Cappable(Cappable),
    Triangle(Triangle),
    SmoothTriangle(SmoothTriangle),
    /// Torus around the y-axis
    Torus(Torus),
    /// Spindle `x² + z² = (1 - y²)²` for y in [-1, 1]
    Fusiform,
    Group(Group),
    Csg(Csg),
}

/// A node in the scene tree.
///
/// Shapes are immutable once built. Transforms are relative to the parent's
/// space so nested groups compose. Parents own their children and children
/// only keep a weak link back, set when the tree is sealed with
/// [Shape::into_arc] or [Shape::with_parent].
#[derive(Clone, Debug)]
pub struct Shape {
    kind: ShapeKind,
    transform: Transform,
    material: Option<Arc<Material>>,
    casts_shadow: bool,
    parent: Option<Weak<Shape>>,
    // Untransformed bounds
    bounds: OnceLock<Bounds3>,
    // Bounds in the parent's space
    parent_bounds: OnceLock<Bounds3>,
}

impl Shape {
    /// Creates a new `Shape` with the identity transform and no material.
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            transform: Transform::identity(),
            material: None,
            casts_shadow: true,
            parent: None,
            bounds: OnceLock::new(),
            parent_bounds: OnceLock::new(),
        }
    }

    pub fn sphere() -> Self {
        Self::new(ShapeKind::Sphere)
    }

    /// Creates a new unit sphere of clear glass.
    pub fn glass_sphere() -> Self {
        Self::sphere().with_material(Material::glass())
    }

    pub fn plane() -> Self {
        Self::new(ShapeKind::Plane)
    }

    pub fn cube() -> Self {
        Self::new(ShapeKind::Cube)
    }

    /// Creates a new unit radius cylinder spanning (`minimum`, `maximum`) on y.
    pub fn cylinder(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self::new(ShapeKind::Cappable(Cappable::new(
            Profile::Cylinder,
            minimum,
            maximum,
            closed,
        )))
    }

    /// Creates a new double-napped cone spanning (`minimum`, `maximum`) on y.
    pub fn cone(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self::new(ShapeKind::Cappable(Cappable::new(
            Profile::Cone,
            minimum,
            maximum,
            closed,
        )))
    }

    /// Creates a new one-sheet hyperboloid spanning (`minimum`, `maximum`) on y.
    pub fn hyperboloid(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self::new(ShapeKind::Cappable(Cappable::new(
            Profile::Hyperboloid,
            minimum,
            maximum,
            closed,
        )))
    }

    pub fn triangle(p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self::new(ShapeKind::Triangle(Triangle::new(p1, p2, p3)))
    }

    /// Creates a new triangle that interpolates the vertex normals `n1`, `n2` and `n3`.
    pub fn smooth_triangle(p1: Point3, p2: Point3, p3: Point3, n1: Vec3, n2: Vec3, n3: Vec3) -> Self {
        Self::new(ShapeKind::SmoothTriangle(SmoothTriangle::new(
            p1, p2, p3, n1, n2, n3,
        )))
    }

    pub fn torus(major_radius: f64, minor_radius: f64) -> Self {
        Self::new(ShapeKind::Torus(Torus::new(major_radius, minor_radius)))
    }

    pub fn fusiform() -> Self {
        Self::new(ShapeKind::Fusiform)
    }

    /// Creates a new group of `children`, picking an acceleration structure
    /// with the default [AccelSettings].
    ///
    /// Children only see the group's transform, material and shadow flag once
    /// the tree is sealed with [Shape::into_arc] or [World::add](crate::world::World::add).
    pub fn group(children: impl IntoIterator<Item = Shape>) -> Self {
        Self::new(ShapeKind::Group(Group::new(children, &AccelSettings::default())))
    }

    /// Creates a new group of `children` with a forced acceleration structure.
    pub fn group_with_accel(
        children: impl IntoIterator<Item = Shape>,
        kind: AccelKind,
        settings: &AccelSettings,
    ) -> Self {
        Self::new(ShapeKind::Group(Group::with_accel(children, kind, settings)))
    }

    pub fn csg(op: CsgOp, left: Shape, right: Shape) -> Self {
        Self::new(ShapeKind::Csg(Csg::new(op, left, right)))
    }

    /// Returns this `Shape` with `transform` in place of its current one.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self.parent_bounds = OnceLock::new();
        self
    }

    /// Returns this `Shape` with `material`. Descendants without their own
    /// material inherit it.
    pub fn with_material(self, material: Material) -> Self {
        self.with_shared_material(Arc::new(material))
    }

    pub fn with_shared_material(mut self, material: Arc<Material>) -> Self {
        self.material = Some(material);
        self
    }

    /// Returns this `Shape` with shadow casting toggled.
    pub fn with_shadow(mut self, casts_shadow: bool) -> Self {
        self.casts_shadow = casts_shadow;
        self
    }

    /// Seals this `Shape` as the root of a tree, linking every descendant to its parent.
    pub fn into_arc(self) -> Arc<Shape> {
        self.relink(None)
    }

    /// Creates a copy of this `Shape` that is a child of `parent`. Descendants
    /// are rebuilt to link to the copy, `self` is untouched.
    pub fn with_parent(&self, parent: &Arc<Shape>) -> Arc<Shape> {
        self.relink(Some(Arc::downgrade(parent)))
    }

    fn relink(&self, parent: Option<Weak<Shape>>) -> Arc<Shape> {
        Arc::new_cyclic(|me| Shape {
            kind: self.kind.relinked(me),
            transform: self.transform.clone(),
            material: self.material.clone(),
            casts_shadow: self.casts_shadow,
            parent,
            bounds: self.bounds.clone(),
            parent_bounds: self.parent_bounds.clone(),
        })
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Checks if this `Shape` casts shadows. A group or CSG that doesn't
    /// turns off shadows for all of its descendants.
    pub fn casts_shadow(&self) -> bool {
        self.casts_shadow && self.parent().map_or(true, |p| p.casts_shadow())
    }

    /// Returns the parent of this `Shape`.
    ///
    /// Panics if the parent has been dropped while this `Shape` is still in use.
    pub fn parent(&self) -> Option<Arc<Shape>> {
        self.parent.as_ref().map(|p| match p.upgrade() {
            Some(parent) => parent,
            None => panic!("Shape outlived its parent"),
        })
    }

    /// Returns the children of a group, empty for other shapes.
    pub fn children(&self) -> &[Arc<Shape>] {
        match &self.kind {
            ShapeKind::Group(g) => g.children(),
            _ => &[],
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match &self.kind {
            ShapeKind::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_csg(&self) -> Option<&Csg> {
        match &self.kind {
            ShapeKind::Csg(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the material of this `Shape`, inherited from the closest
    /// ancestor that has one if it doesn't.
    pub fn material(&self) -> Arc<Material> {
        match &self.material {
            Some(m) => m.clone(),
            None => match self.parent() {
                Some(parent) => parent.material(),
                None => DEFAULT_MATERIAL.clone(),
            },
        }
    }

    /// Returns the material set on this `Shape` itself.
    pub fn own_material(&self) -> Option<&Arc<Material>> {
        self.material.as_ref()
    }

    /// Checks if `other` is this `Shape` or one of its descendants.
    pub fn includes(&self, other: &Shape) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        match &self.kind {
            ShapeKind::Group(g) => g.children().iter().any(|c| c.includes(other)),
            ShapeKind::Csg(c) => c.left().includes(other) || c.right().includes(other),
            _ => false,
        }
    }

    /// Finds the intersections of the world-space `ray` with this `Shape`.
    pub fn intersect(&self, ray: &Ray) -> Intersections<'_> {
        let mut xs = Vec::new();
        self.intersect_into(ray, &mut xs);
        Intersections::new(xs)
    }

    /// Appends the intersections of `ray`, given in the parent's space, to `out` in no particular order.
    pub(crate) fn intersect_into<'a>(&'a self, ray: &Ray, out: &mut Vec<Intersection<'a>>) {
        let local_ray = self.transform.inverse_ray(ray);
        self.local_intersect(&local_ray, out);
    }

    /// Appends the intersections of the local-space `ray` to `out`.
    pub fn local_intersect<'a>(&'a self, ray: &Ray, out: &mut Vec<Intersection<'a>>) {
        match &self.kind {
            ShapeKind::Sphere => sphere::intersect(self, ray, out),
            ShapeKind::Plane => plane::intersect(self, ray, out),
            ShapeKind::Cube => cube::intersect(self, ray, out),
            ShapeKind::Cappable(c) => c.intersect(self, ray, out),
            ShapeKind::Triangle(t) => {
                if let Some((t, _, _)) = t.hit(ray) {
                    out.push(Intersection::new(t, self));
                }
            }
            ShapeKind::SmoothTriangle(s) => {
                if let Some((t, u, v)) = s.triangle().hit(ray) {
                    out.push(Intersection::with_uv(t, self, u, v));
                }
            }
            ShapeKind::Torus(torus) => {
                // Skip the quartic when the ray can't reach the surface
                if self.bounds().intersect(ray) {
                    torus.intersect(self, ray, out);
                }
            }
            ShapeKind::Fusiform => {
                if self.bounds().intersect(ray) {
                    quartic::intersect_fusiform(self, ray, out);
                }
            }
            ShapeKind::Group(g) => {
                if self.bounds().intersect(ray) {
                    g.intersect(ray, out);
                }
            }
            ShapeKind::Csg(c) => {
                if self.bounds().intersect(ray) {
                    c.intersect(ray, out);
                }
            }
        }
    }

    /// Finds the world-space surface normal at the world-space point `p`.
    ///
    /// Panics for groups and CSG nodes, which have no surface of their own.
    pub fn normal_at(&self, p: &Point3, hit: &Intersection) -> Vec3 {
        let local_point = self.world_to_object(p);
        let local_normal = self.local_normal_at(&local_point, hit);
        self.normal_to_world(&local_normal)
    }

    /// Finds the unnormalized surface normal at the local-space point `p`.
    pub fn local_normal_at(&self, p: &Point3, hit: &Intersection) -> Vec3 {
        match &self.kind {
            ShapeKind::Sphere => p.coords,
            ShapeKind::Plane => Vec3::new(0.0, 1.0, 0.0),
            ShapeKind::Cube => cube::normal(p),
            ShapeKind::Cappable(c) => c.normal(p),
            ShapeKind::Triangle(t) => t.normal(),
            ShapeKind::SmoothTriangle(s) => match hit.uv {
                Some((u, v)) => s.normal(u, v),
                None => panic!("Smooth triangle normal requested without (u, v)"),
            },
            ShapeKind::Torus(torus) => torus.normal(p),
            ShapeKind::Fusiform => quartic::fusiform_normal(p),
            ShapeKind::Group(_) => panic!("Groups have no surface normal"),
            ShapeKind::Csg(_) => panic!("CSG nodes have no surface normal"),
        }
    }

    /// Converts the world-space `p` to this `Shape`'s local space through its ancestors.
    pub fn world_to_object(&self, p: &Point3) -> Point3 {
        let p = match self.parent() {
            Some(parent) => parent.world_to_object(p),
            None => *p,
        };
        self.transform.inverse_point(&p)
    }

    /// Converts the local-space normal `n` to world space through this
    /// `Shape`'s ancestors. The result is normalized.
    pub fn normal_to_world(&self, n: &Vec3) -> Vec3 {
        let n = self.transform.normal(n).normalize();
        match self.parent() {
            Some(parent) => parent.normal_to_world(&n),
            None => n,
        }
    }

    /// Returns the untransformed bounds of this `Shape`.
    pub fn bounds(&self) -> Bounds3 {
        *self.bounds.get_or_init(|| match &self.kind {
            ShapeKind::Sphere | ShapeKind::Cube | ShapeKind::Fusiform => Bounds3::new(
                Point3::new(-1.0, -1.0, -1.0),
                Point3::new(1.0, 1.0, 1.0),
            ),
            ShapeKind::Plane => plane::bounds(),
            ShapeKind::Cappable(c) => c.bounds(),
            ShapeKind::Triangle(t) => t.bounds(),
            ShapeKind::SmoothTriangle(s) => s.triangle().bounds(),
            ShapeKind::Torus(torus) => torus.bounds(),
            ShapeKind::Group(g) => g
                .children()
                .iter()
                .fold(Bounds3::empty(), |b, c| b.union_b(c.parent_bounds())),
            ShapeKind::Csg(c) => c.left().parent_bounds().union_b(c.right().parent_bounds()),
        })
    }

    /// Returns the bounds of this `Shape` in its parent's space.
    pub fn parent_bounds(&self) -> Bounds3 {
        *self
            .parent_bounds
            .get_or_init(|| &self.transform * self.bounds())
    }
}

impl ShapeKind {
    // Rebuilds composite children so that they link to `parent`
    fn relinked(&self, parent: &Weak<Shape>) -> ShapeKind {
        match self {
            ShapeKind::Group(g) => ShapeKind::Group(g.relinked(parent)),
            ShapeKind::Csg(c) => ShapeKind::Csg(c.relinked(parent)),
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::{point3, transforms::*, vec3, Color, EPSILON};

    #[test]
    fn defaults() {
        let s = Shape::sphere();
        assert!(s.transform().is_identity());
        assert!(s.casts_shadow());
        assert!(s.parent().is_none());
        assert_eq!(*s.material(), Material::default());
    }

    #[test]
    fn intersect_uses_inverse_transform() {
        let r = Ray::new(point3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
        let s = Shape::sphere().with_transform(scale(2.0, 2.0, 2.0));
        let xs = s.intersect(&r);
        assert_eq!(xs.len(), 2);
        assert_abs_diff_eq!(xs[0].t, 3.0);
        assert_abs_diff_eq!(xs[1].t, 7.0);

        let s = Shape::sphere().with_transform(translation(5.0, 0.0, 0.0));
        assert!(s.intersect(&r).is_empty());
    }

    #[test]
    fn transformed_normals() {
        let s = Shape::sphere().with_transform(translation(0.0, 1.0, 0.0));
        let hit = Intersection::new(0.0, &s);
        let n = s.normal_at(&point3(0.0, 1.70711, -0.70711), &hit);
        assert_abs_diff_eq!(n, vec3(0.0, 0.70711, -0.70711), epsilon = 1e-4);

        let s = Shape::sphere()
            .with_transform(rotation_z(std::f64::consts::PI / 5.0).then(&scale(1.0, 0.5, 1.0)));
        let hit = Intersection::new(0.0, &s);
        let h = 2.0_f64.sqrt() / 2.0;
        let n = s.normal_at(&point3(0.0, h, -h), &hit);
        assert_abs_diff_eq!(n, vec3(0.0, 0.97014, -0.24254), epsilon = 1e-4);
    }

    #[test]
    fn sealing_links_parents() {
        let g = Shape::group(vec![Shape::sphere(), Shape::cube()]).into_arc();
        assert_eq!(g.children().len(), 2);
        for c in g.children() {
            let parent = c.parent().unwrap();
            assert!(Arc::ptr_eq(&parent, &g));
        }
    }

    #[test]
    fn with_parent_leaves_original_untouched() {
        let parent = Shape::group(Vec::new()).into_arc();
        let child = Shape::group(vec![Shape::sphere()]);
        let linked = child.with_parent(&parent);
        assert!(child.parent().is_none());
        assert!(Arc::ptr_eq(&linked.parent().unwrap(), &parent));
        // Grandchildren link to the new copy
        let grandchild = &linked.children()[0];
        assert!(Arc::ptr_eq(&grandchild.parent().unwrap(), &linked));
    }

    #[test]
    fn nested_world_to_object() {
        let s = Shape::sphere().with_transform(translation(5.0, 0.0, 0.0));
        let g2 = Shape::group(vec![s]).with_transform(scale(2.0, 2.0, 2.0));
        let g1 = Shape::group(vec![g2])
            .with_transform(rotation_y(FRAC_PI_2))
            .into_arc();
        let s = &g1.children()[0].children()[0];
        assert_abs_diff_eq!(
            s.world_to_object(&point3(-2.0, 0.0, -10.0)),
            point3(0.0, 0.0, -1.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn nested_normal_to_world() {
        let s = Shape::sphere().with_transform(translation(5.0, 0.0, 0.0));
        let g2 = Shape::group(vec![s]).with_transform(scale(1.0, 2.0, 3.0));
        let g1 = Shape::group(vec![g2])
            .with_transform(rotation_y(FRAC_PI_2))
            .into_arc();
        let s = &g1.children()[0].children()[0];
        let v = 3.0_f64.sqrt() / 3.0;
        assert_abs_diff_eq!(
            s.normal_to_world(&vec3(v, v, v)),
            vec3(0.28571, 0.42857, -0.85714),
            epsilon = 1e-4
        );

        let hit = Intersection::new(0.0, s.as_ref());
        assert_abs_diff_eq!(
            s.normal_at(&point3(1.7321, 1.1547, -5.5774), &hit),
            vec3(0.28570, 0.42854, -0.85716),
            epsilon = 1e-4
        );
    }

    #[test]
    fn material_inherited_from_ancestors() {
        let red = Material::with_color(Color::new(1.0, 0.0, 0.0));
        let blue = Material::with_color(Color::new(0.0, 0.0, 1.0));
        let inner = Shape::group(vec![Shape::sphere(), Shape::cube().with_material(blue.clone())]);
        let outer = Shape::group(vec![inner]).with_material(red.clone()).into_arc();
        let inner = &outer.children()[0];
        assert_eq!(*inner.children()[0].material(), red);
        assert_eq!(*inner.children()[1].material(), blue);
    }

    #[test]
    fn shadow_flag_inherited_from_ancestors() {
        let g = Shape::group(vec![Shape::group(vec![Shape::sphere()])])
            .with_shadow(false)
            .into_arc();
        assert!(!g.children()[0].children()[0].casts_shadow());

        let c = Shape::csg(CsgOp::Union, Shape::sphere(), Shape::cube().with_shadow(false))
            .into_arc();
        let (l, r) = c.as_csg().map(|c| (c.left(), c.right())).unwrap();
        assert!(l.casts_shadow());
        assert!(!r.casts_shadow());
    }

    #[test]
    fn includes_descends() {
        let g = Shape::group(vec![Shape::sphere(), Shape::group(vec![Shape::cube()])]).into_arc();
        let cube = &g.children()[1].children()[0];
        assert!(g.includes(cube));
        assert!(g.includes(&g));
        assert!(!cube.includes(&g));
        assert!(!g.includes(&Shape::cube()));
    }

    #[test]
    fn parent_bounds_follow_transform() {
        let s = Shape::sphere().with_transform(translation(1.0, -3.0, 5.0).then(&scale(0.5, 2.0, 4.0)));
        let b = s.parent_bounds();
        assert_abs_diff_eq!(b.p_min, point3(0.0, -8.0, 16.0), epsilon = EPSILON);
        assert_abs_diff_eq!(b.p_max, point3(1.0, -4.0, 24.0), epsilon = EPSILON);
    }

    #[test]
    #[should_panic]
    fn group_has_no_normal() {
        let g = Shape::group(vec![Shape::sphere()]);
        let hit = Intersection::new(1.0, &g);
        g.local_normal_at(&point3(0.0, 0.0, 0.0), &hit);
    }
}
