#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_abs_diff_eq;

    use hikari::{
        intersection::Intersection,
        material::Material,
        math::{point3, transforms::*, vec3, Color, Ray},
        shapes::{CsgOp, Shape},
    };

    fn nested() -> std::sync::Arc<Shape> {
        let s = Shape::sphere().with_transform(translation(5.0, 0.0, 0.0));
        let g2 = Shape::group(vec![s]).with_transform(scale(2.0, 2.0, 2.0));
        Shape::group(vec![g2])
            .with_transform(rotation_y(FRAC_PI_2))
            .into_arc()
    }

    #[test]
    fn world_to_object_through_groups() {
        let g1 = nested();
        let s = &g1.children()[0].children()[0];
        let p = s.world_to_object(&point3(-2.0, 0.0, -10.0));
        assert_abs_diff_eq!(p, point3(0.0, 0.0, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn normal_to_world_through_groups() {
        let g1 = nested();
        let s = &g1.children()[0].children()[0];
        let h = 3.0_f64.sqrt() / 3.0;
        let n = s.normal_to_world(&vec3(h, h, h));
        assert_abs_diff_eq!(n, vec3(0.2857, 0.4286, -0.8571), epsilon = 1e-4);
    }

    #[test]
    fn normal_on_nested_child() {
        let g1 = nested();
        let s = &g1.children()[0].children()[0];
        let hit = Intersection::new(0.0, s);
        let n = s.normal_at(&point3(1.7321, 1.1547, -5.5774), &hit);
        assert_abs_diff_eq!(n, vec3(0.2857, 0.4286, -0.8571), epsilon = 1e-4);
    }

    #[test]
    fn parent_links_walk_to_root() {
        let g1 = nested();
        let s = &g1.children()[0].children()[0];
        let g2 = s.parent().unwrap();
        assert!(std::ptr::eq(g2.as_ref(), g1.children()[0].as_ref()));
        let root = g2.parent().unwrap();
        assert!(std::ptr::eq(root.as_ref(), g1.as_ref()));
        assert!(root.parent().is_none());
    }

    #[test]
    fn material_is_inherited() {
        let red = Material::with_color(Color::new(1.0, 0.0, 0.0));
        let g = Shape::group(vec![
            Shape::sphere(),
            Shape::cube().with_material(Material::glass()),
        ])
        .with_material(red.clone())
        .into_arc();
        assert_eq!(*g.children()[0].material(), red);
        assert_eq!(*g.children()[1].material(), Material::glass());
    }

    #[test]
    fn csg_hollow_cube() {
        // Cube with a spherical cavity
        let c = Shape::csg(
            CsgOp::Difference,
            Shape::cube(),
            Shape::sphere().with_transform(scale(0.8, 0.8, 0.8)),
        )
        .into_arc();
        let r = Ray::new(point3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
        let ts: Vec<f64> = c.intersect(&r).iter().map(|x| x.t).collect();
        assert_eq!(ts.len(), 4);
        for (t, expected) in ts.iter().zip([4.0, 4.2, 5.8, 6.0]) {
            assert_abs_diff_eq!(*t, expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn csg_of_groups() {
        let left = Shape::group(vec![
            Shape::sphere().with_transform(translation(-1.5, 0.0, 0.0)),
            Shape::sphere().with_transform(translation(1.5, 0.0, 0.0)),
        ]);
        let right = Shape::cube().with_transform(scale(2.0, 2.0, 2.0));
        let c = Shape::csg(CsgOp::Intersection, left, right).into_arc();
        let r = Ray::new(point3(-5.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0));
        let ts: Vec<f64> = c.intersect(&r).iter().map(|x| x.t).collect();
        assert_eq!(ts.len(), 4);
        for (t, expected) in ts.iter().zip([3.0, 4.5, 5.5, 7.0]) {
            assert_abs_diff_eq!(*t, expected, epsilon = 1e-5);
        }
    }
}
