use super::{AccelSettings, BuildStats};
use crate::{
    hikari_debug,
    math::{Bounds3, Ray},
};

/// An oct-tree over primitive bounds.
///
/// Nodes split at their spatial midpoint. A primitive is stored in every octant
/// its bounds overlap, so queries may report the same index more than once.
#[derive(Debug)]
pub struct OctTree {
    root: Option<OctNode>,
    stats: BuildStats,
}

#[derive(Debug)]
struct OctNode {
    bounds: Bounds3,
    content: NodeContent,
}

#[derive(Debug)]
enum NodeContent {
    // Empty octants are pruned
    Branch(Box<[Option<OctNode>; 8]>),
    Leaf(Vec<usize>),
}

impl OctTree {
    /// Creates a new `OctTree` for the `(index, bounds)` pairs in `primitives`.
    pub fn new(primitives: Vec<(usize, Bounds3)>, settings: &AccelSettings) -> Self {
        let mut stats = BuildStats::default();
        if primitives.is_empty() {
            return Self { root: None, stats };
        }

        let bounds = primitives
            .iter()
            .fold(Bounds3::default(), |b, (_, pb)| b.union_b(*pb));
        let primitive_count = primitives.len();
        let root = build(bounds, primitives, 0, settings, &mut stats);

        hikari_debug!(
            "oct-tree: {} primitives, {} nodes, {} leaves, depth {}",
            primitive_count,
            stats.node_count,
            stats.leaf_count,
            stats.max_depth
        );

        Self {
            root: Some(root),
            stats,
        }
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Appends the primitives of every leaf `ray` reaches to `out`.
    pub fn candidates(&self, ray: &Ray, out: &mut Vec<usize>) {
        if let Some(root) = &self.root {
            root.candidates(ray, out);
        }
    }
}

impl OctNode {
    fn candidates(&self, ray: &Ray, out: &mut Vec<usize>) {
        if !self.bounds.intersect(ray) {
            return;
        }
        match &self.content {
            NodeContent::Branch(children) => {
                for child in children.iter().flatten() {
                    child.candidates(ray, out);
                }
            }
            NodeContent::Leaf(indices) => out.extend_from_slice(indices),
        }
    }
}

fn leaf(bounds: Bounds3, primitives: Vec<(usize, Bounds3)>, depth: usize, stats: &mut BuildStats) -> OctNode {
    stats.add_node(depth, true);
    OctNode {
        bounds,
        content: NodeContent::Leaf(primitives.into_iter().map(|(i, _)| i).collect()),
    }
}

fn build(
    bounds: Bounds3,
    primitives: Vec<(usize, Bounds3)>,
    depth: usize,
    settings: &AccelSettings,
    stats: &mut BuildStats,
) -> OctNode {
    if depth >= settings.max_depth || primitives.len() <= settings.min_leaf_size.max(1) {
        return leaf(bounds, primitives, depth, stats);
    }

    stats.add_node(depth, false);
    let parent_count = primitives.len();
    let children = bounds.octants().map(|octant| {
        let inside: Vec<(usize, Bounds3)> = primitives
            .iter()
            .filter(|(_, b)| b.overlaps(&octant))
            .copied()
            .collect();
        if inside.is_empty() {
            None
        } else if inside.len() == parent_count {
            // Everything straddles this split, recursing wouldn't terminate
            Some(leaf(octant, inside, depth + 1, stats))
        } else {
            Some(build(octant, inside, depth + 1, settings, stats))
        }
    });

    OctNode {
        bounds,
        content: NodeContent::Branch(Box::new(children)),
    }
}
