use std::sync::{Arc, Weak};

use super::{Shape, ShapeKind};
use crate::{
    accel::{AccelKind, AccelSettings, Accelerator},
    intersection::Intersection,
    math::{Bounds3, Ray},
};

/// An ordered collection of child shapes.
///
/// Large groups index their children with an [Accelerator]. The structure
/// refers to children by position, so it is shared as is when the group is
/// relinked.
#[derive(Clone, Debug)]
pub struct Group {
    children: Vec<Arc<Shape>>,
    accel: Option<Arc<Accelerator>>,
}

impl Group {
    /// Creates a new `Group`. A k-d tree is built if every child is a triangle
    /// and an oct-tree otherwise, once there are more than
    /// `settings.min_children` children.
    pub fn new(children: impl IntoIterator<Item = Shape>, settings: &AccelSettings) -> Self {
        let children: Vec<Arc<Shape>> = children.into_iter().map(Arc::new).collect();
        let kind = if children.len() <= settings.min_children {
            AccelKind::None
        } else if children.iter().all(|c| is_triangle(c)) {
            AccelKind::KdTree
        } else {
            AccelKind::OctTree
        };
        Self::build(children, kind, settings)
    }

    /// Creates a new `Group` that uses `kind` regardless of its size.
    pub fn with_accel(
        children: impl IntoIterator<Item = Shape>,
        kind: AccelKind,
        settings: &AccelSettings,
    ) -> Self {
        Self::build(children.into_iter().map(Arc::new).collect(), kind, settings)
    }

    fn build(children: Vec<Arc<Shape>>, kind: AccelKind, settings: &AccelSettings) -> Self {
        let bounds: Vec<Bounds3> = children.iter().map(|c| c.parent_bounds()).collect();
        let accel = Accelerator::new(kind, &bounds, settings).map(Arc::new);
        Self { children, accel }
    }

    pub fn children(&self) -> &[Arc<Shape>] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn accel_kind(&self) -> AccelKind {
        self.accel.as_ref().map_or(AccelKind::None, |a| a.kind())
    }

    pub(super) fn relinked(&self, parent: &Weak<Shape>) -> Self {
        Self {
            children: self
                .children
                .iter()
                .map(|c| c.relink(Some(parent.clone())))
                .collect(),
            accel: self.accel.clone(),
        }
    }

    /// Appends the intersections of the group-space `ray` with all children to `out`.
    pub(super) fn intersect<'a>(&'a self, ray: &Ray, out: &mut Vec<Intersection<'a>>) {
        match &self.accel {
            Some(accel) => {
                let mut candidates = Vec::new();
                accel.candidates(ray, &mut candidates);
                for i in candidates {
                    self.children[i].intersect_into(ray, out);
                }
            }
            None => {
                for child in &self.children {
                    if child.parent_bounds().intersect(ray) {
                        child.intersect_into(ray, out);
                    }
                }
            }
        }
    }
}

fn is_triangle(shape: &Shape) -> bool {
    matches!(
        shape.kind(),
        ShapeKind::Triangle(_) | ShapeKind::SmoothTriangle(_)
    )
}
