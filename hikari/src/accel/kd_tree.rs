use super::{AccelSettings, BuildStats};
use crate::{
    hikari_debug,
    math::{Bounds3, Point3, Ray},
};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Primitives_and_Intersection_Acceleration/Kd-Tree_Accelerator.html
// Splits are at the centroid median on a cycling axis instead of the SAH.

/// A k-d tree over primitive bounds, stored as a flattened array of nodes.
#[derive(Debug)]
pub struct KdTree {
    nodes: Vec<KdNode>,
    // Primitive indices in leaf order
    indices: Vec<usize>,
    stats: BuildStats,
}

impl KdTree {
    /// Creates a new `KdTree` for the `(index, bounds)` pairs in `primitives`.
    pub fn new(primitives: &[(usize, Bounds3)], settings: &AccelSettings) -> Self {
        let mut info: Vec<PrimitiveInfo> = primitives
            .iter()
            .map(|&(index, bounds)| PrimitiveInfo {
                index,
                bounds,
                centroid: bounds.centroid(),
            })
            .collect();

        let mut ret = Self {
            nodes: Vec::new(),
            indices: Vec::with_capacity(info.len()),
            stats: BuildStats::default(),
        };
        if info.is_empty() {
            return ret;
        }

        let mut indices = Vec::with_capacity(info.len());
        let (root, node_count) = ret.recursive_build(&mut info, 0, settings, &mut indices);
        ret.indices = indices;

        ret.nodes = vec![KdNode::default(); node_count];
        ret.flatten_tree(root, 0);

        hikari_debug!(
            "k-d tree: {} primitives, {} nodes, {} leaves, depth {}",
            primitives.len(),
            ret.stats.node_count,
            ret.stats.leaf_count,
            ret.stats.max_depth
        );

        ret
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Appends the primitives of every leaf `ray` reaches to `out`.
    pub fn candidates(&self, ray: &Ray, out: &mut Vec<usize>) {
        if self.nodes.is_empty() {
            return;
        }

        let mut current_node_index = 0;
        let mut to_visit_stack = Vec::with_capacity(64);
        loop {
            let node = &self.nodes[current_node_index];
            if node.bounds.intersect(ray) {
                match node.content {
                    NodeContent::Interior { second_child_index } => {
                        // Median splits don't separate space so both halves are visited
                        to_visit_stack.push(second_child_index as usize);
                        current_node_index += 1;
                        continue;
                    }
                    NodeContent::Leaf {
                        first_index,
                        count,
                    } => {
                        let range = (first_index as usize)..((first_index + count) as usize);
                        out.extend_from_slice(&self.indices[range]);
                    }
                    NodeContent::Uninitialized => unreachable!(),
                }
            }

            match to_visit_stack.pop() {
                Some(index) => current_node_index = index,
                None => break,
            }
        }
    }

    fn recursive_build(
        &mut self,
        info: &mut [PrimitiveInfo],
        depth: usize,
        settings: &AccelSettings,
        indices: &mut Vec<usize>,
    ) -> (Box<BuildNode>, usize) {
        let bounds = info
            .iter()
            .fold(Bounds3::default(), |b, p| b.union_b(p.bounds));

        if depth >= settings.max_depth || info.len() <= settings.min_leaf_size.max(1) {
            let first_index = indices.len();
            indices.extend(info.iter().map(|p| p.index));
            self.stats.add_node(depth, true);
            return (BuildNode::leaf(bounds, first_index, info.len()), 1);
        }

        let axis = depth % 3;
        let mid = info.len() / 2;
        info.select_nth_unstable_by(mid, |a, b| a.centroid[axis].total_cmp(&b.centroid[axis]));

        self.stats.add_node(depth, false);
        let (left, right) = info.split_at_mut(mid);
        let (child0, child0_node_count) = self.recursive_build(left, depth + 1, settings, indices);
        let (child1, child1_node_count) = self.recursive_build(right, depth + 1, settings, indices);
        (
            BuildNode::interior(child0, child1),
            1 + child0_node_count + child1_node_count,
        )
    }

    fn flatten_tree(&mut self, root: Box<BuildNode>, mut next_index: usize) -> usize {
        match root.content {
            BuildNodeContent::Interior {
                children: [child0, child1],
            } => {
                let self_index = next_index;
                let second_child_index = self.flatten_tree(child0, self_index + 1);
                next_index = self.flatten_tree(child1, second_child_index);
                self.nodes[self_index] = KdNode {
                    bounds: root.bounds,
                    content: NodeContent::Interior {
                        second_child_index: second_child_index as u32,
                    },
                };
            }
            BuildNodeContent::Leaf { first_index, count } => {
                self.nodes[next_index] = KdNode {
                    bounds: root.bounds,
                    content: NodeContent::Leaf {
                        first_index: first_index as u32,
                        count: count as u32,
                    },
                };
                next_index += 1;
            }
        }
        next_index
    }
}

struct PrimitiveInfo {
    index: usize,
    bounds: Bounds3,
    centroid: Point3,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum NodeContent {
    Interior { second_child_index: u32 },
    Leaf { first_index: u32, count: u32 },
    Uninitialized,
}

#[derive(Copy, Clone, Debug)]
struct KdNode {
    bounds: Bounds3,
    content: NodeContent,
}

impl Default for KdNode {
    fn default() -> Self {
        Self {
            bounds: Bounds3::default(),
            content: NodeContent::Uninitialized,
        }
    }
}

enum BuildNodeContent {
    Interior { children: [Box<BuildNode>; 2] },
    Leaf { first_index: usize, count: usize },
}

struct BuildNode {
    bounds: Bounds3,
    content: BuildNodeContent,
}

impl BuildNode {
    fn interior(child0: Box<BuildNode>, child1: Box<BuildNode>) -> Box<Self> {
        Box::new(Self {
            bounds: child0.bounds.union_b(child1.bounds),
            content: BuildNodeContent::Interior {
                children: [child0, child1],
            },
        })
    }

    fn leaf(bounds: Bounds3, first_index: usize, count: usize) -> Box<Self> {
        Box::new(Self {
            bounds,
            content: BuildNodeContent::Leaf { first_index, count },
        })
    }
}
