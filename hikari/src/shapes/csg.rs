use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, EnumVariantNames};

use super::Shape;
use crate::{intersection::Intersection, math::Ray};

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Display, EnumString, EnumVariantNames, Deserialize, Serialize,
)]
pub enum CsgOp {
    Union,
    Intersection,
    Difference,
}

impl CsgOp {
    /// Checks if an intersection survives this operation. `left_hit` tells
    /// which operand was hit, `in_left` and `in_right` whether the ray is
    /// currently inside each operand.
    pub fn allowed(self, left_hit: bool, in_left: bool, in_right: bool) -> bool {
        match self {
            CsgOp::Union => (left_hit && !in_right) || (!left_hit && !in_left),
            CsgOp::Intersection => (left_hit && in_right) || (!left_hit && in_left),
            CsgOp::Difference => (left_hit && !in_right) || (!left_hit && in_left),
        }
    }
}

/// A boolean combination of two shapes.
#[derive(Clone, Debug)]
pub struct Csg {
    op: CsgOp,
    left: Arc<Shape>,
    right: Arc<Shape>,
}

impl Csg {
    /// Creates a new `Csg` of `left` and `right`.
    pub fn new(op: CsgOp, left: Shape, right: Shape) -> Self {
        Self {
            op,
            left: Arc::new(left),
            right: Arc::new(right),
        }
    }

    pub fn op(&self) -> CsgOp {
        self.op
    }

    pub fn left(&self) -> &Arc<Shape> {
        &self.left
    }

    pub fn right(&self) -> &Arc<Shape> {
        &self.right
    }

    pub(super) fn relinked(&self, parent: &Weak<Shape>) -> Self {
        Self {
            op: self.op,
            left: self.left.relink(Some(parent.clone())),
            right: self.right.relink(Some(parent.clone())),
        }
    }

    /// Appends the surviving intersections of the local-space `ray` to `out` in ascending order.
    pub(super) fn intersect<'a>(&'a self, ray: &Ray, out: &mut Vec<Intersection<'a>>) {
        let mut xs = Vec::new();
        self.left.intersect_into(ray, &mut xs);
        self.right.intersect_into(ray, &mut xs);
        xs.sort_by(|a, b| a.t.total_cmp(&b.t));
        out.extend(self.filter_intersections(&xs));
    }

    /// Keeps the intersections in the sorted `xs` that lie on the surface of the combined shape.
    pub fn filter_intersections<'a>(&self, xs: &[Intersection<'a>]) -> Vec<Intersection<'a>> {
        let mut in_left = false;
        let mut in_right = false;

        let mut ret = Vec::new();
        for x in xs {
            let left_hit = self.left.includes(x.shape);
            if self.op.allowed(left_hit, in_left, in_right) {
                ret.push(*x);
            }
            if left_hit {
                in_left = !in_left;
            } else {
                in_right = !in_right;
            }
        }
        ret
    }
}
