mod kd_tree;
mod oct_tree;

pub use kd_tree::KdTree;
pub use oct_tree::OctTree;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, EnumVariantNames};

use crate::math::{Bounds3, Ray};

/// Stopping policy shared by the acceleration structures.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AccelSettings {
    /// Nodes at this depth become leaves.
    pub max_depth: usize,
    /// Nodes with at most this many primitives become leaves.
    pub min_leaf_size: usize,
    /// Groups with more children than this build a structure on construction.
    pub min_children: usize,
}

impl Default for AccelSettings {
    fn default() -> Self {
        Self {
            max_depth: 16,
            min_leaf_size: 4,
            min_children: 8,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumString, EnumVariantNames)]
pub enum AccelKind {
    None,
    KdTree,
    OctTree,
}

#[derive(Debug)]
enum Structure {
    KdTree(KdTree),
    OctTree(OctTree),
}

/// Spatial index over a list of primitive bounds.
///
/// Queries report the indices of primitives whose leaves the ray reaches.
/// Primitives with unbounded extents can't be partitioned and are reported for
/// every ray.
#[derive(Debug)]
pub struct Accelerator {
    structure: Structure,
    unbounded: Vec<usize>,
}

impl Accelerator {
    /// Builds the structure of `kind` over `bounds`. Returns `None` for [AccelKind::None].
    pub fn new(kind: AccelKind, bounds: &[Bounds3], settings: &AccelSettings) -> Option<Self> {
        let (bounded, unbounded): (Vec<(usize, Bounds3)>, Vec<(usize, Bounds3)>) = bounds
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, b)| !b.is_empty())
            .partition(|(_, b)| b.is_finite());

        let structure = match kind {
            AccelKind::None => return None,
            AccelKind::KdTree => Structure::KdTree(KdTree::new(&bounded, settings)),
            AccelKind::OctTree => Structure::OctTree(OctTree::new(bounded, settings)),
        };

        Some(Self {
            structure,
            unbounded: unbounded.into_iter().map(|(i, _)| i).collect(),
        })
    }

    pub fn kind(&self) -> AccelKind {
        match self.structure {
            Structure::KdTree(_) => AccelKind::KdTree,
            Structure::OctTree(_) => AccelKind::OctTree,
        }
    }

    /// Collects the primitive indices `ray` should be tested against into `out`.
    /// The result is sorted and free of duplicates.
    pub fn candidates(&self, ray: &Ray, out: &mut Vec<usize>) {
        out.extend_from_slice(&self.unbounded);
        match &self.structure {
            Structure::KdTree(tree) => tree.candidates(ray, out),
            Structure::OctTree(tree) => tree.candidates(ray, out),
        }
        // Oct-tree leaves share primitives that straddle splits
        out.sort_unstable();
        out.dedup();
    }
}

/// Build statistics, logged once per structure.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub node_count: usize,
    pub leaf_count: usize,
    pub max_depth: usize,
}

impl BuildStats {
    fn add_node(&mut self, depth: usize, is_leaf: bool) {
        self.node_count += 1;
        if is_leaf {
            self.leaf_count += 1;
        }
        self.max_depth = self.max_depth.max(depth);
    }
}
