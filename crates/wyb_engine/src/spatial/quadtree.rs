//! Fixed-depth quadtree over a 2D region
//!
//! The tree is fully built at construction: a depth `D` tree has `4^D`
//! leaves of equal size and never subdivides or merges afterwards. Items are
//! stored by value (typically an [`EntityId`](crate::ecs::EntityId)) in every
//! leaf their rectangle overlaps, so an item straddling a boundary lives in
//! several leaves and queries deduplicate.
//!
//! Nodes live in a flat arena and refer to each other by index.

use crate::foundation::math::{Line, Rect};
use std::collections::HashSet;
use std::hash::Hash;

/// Deepest subdivision accepted by [`QuadTree::new`] (65 536 leaves)
pub const MAX_DEPTH: u32 = 8;

/// Index of a node in the quadtree arena
pub type NodeId = usize;

const ROOT: NodeId = 0;

/// Quadtree construction errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SpatialError {
    /// Region with zero or negative extent
    #[error("Quadtree bounds must have positive size, got {width}x{height}")]
    InvalidBounds {
        /// Requested width
        width: f32,
        /// Requested height
        height: f32,
    },

    /// Depth above [`MAX_DEPTH`]
    #[error("Quadtree depth {0} exceeds maximum {MAX_DEPTH}")]
    DepthTooLarge(u32),
}

/// Single node in the quadtree arena
#[derive(Debug, Clone)]
pub struct QuadNode<T> {
    /// World-space bounds of this node
    pub bounds: Rect,

    /// Parent node, `None` for the root
    pub parent: Option<NodeId>,

    /// Child quadrants (top-left, top-right, bottom-left, bottom-right), `None` for leaves
    pub children: Option<[NodeId; 4]>,

    /// Depth in the tree (0 = root)
    pub depth: u32,

    contents: Vec<T>,
    has_content: bool,
}

impl<T> QuadNode<T> {
    fn new(bounds: Rect, parent: Option<NodeId>, depth: u32) -> Self {
        Self {
            bounds,
            parent,
            children: None,
            depth,
            contents: Vec::new(),
            has_content: false,
        }
    }

    /// Check if this node is a leaf (has no children)
    pub const fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Items stored here; always empty for internal nodes
    pub fn contents(&self) -> &[T] {
        &self.contents
    }

    /// Whether this node or a descendant holds an item
    pub const fn has_content(&self) -> bool {
        self.has_content
    }
}

/// Fixed-depth quadtree spatial index
#[derive(Debug, Clone)]
pub struct QuadTree<T> {
    nodes: Vec<QuadNode<T>>,
    leaves: Vec<NodeId>,
    depth: u32,
}

impl<T: Copy + Eq + Hash> QuadTree<T> {
    /// Build the complete tree over `bounds` down to `depth`
    pub fn new(bounds: Rect, depth: u32) -> Result<Self, SpatialError> {
        if !bounds.has_area() {
            return Err(SpatialError::InvalidBounds {
                width: bounds.width,
                height: bounds.height,
            });
        }
        if depth > MAX_DEPTH {
            return Err(SpatialError::DepthTooLarge(depth));
        }

        let node_count: usize = (0..=depth).map(|level| 4_usize.pow(level)).sum();
        let mut nodes = Vec::with_capacity(node_count);
        nodes.push(QuadNode::new(bounds, None, 0));

        // Breadth-first: each level's nodes are contiguous in the arena
        let mut frontier = vec![ROOT];
        for level in 1..=depth {
            let mut next = Vec::with_capacity(frontier.len() * 4);
            for &parent in &frontier {
                let quadrants = nodes[parent].bounds.quadrants();
                let first = nodes.len();
                for quadrant in quadrants {
                    nodes.push(QuadNode::new(quadrant, Some(parent), level));
                }
                let children = [first, first + 1, first + 2, first + 3];
                nodes[parent].children = Some(children);
                next.extend(children);
            }
            frontier = next;
        }

        log::debug!(
            "Built quadtree over {:?}: depth {}, {} leaves",
            bounds,
            depth,
            frontier.len()
        );

        Ok(Self {
            nodes,
            leaves: frontier,
            depth,
        })
    }

    /// Insert an item into every leaf its rectangle overlaps.
    ///
    /// Every overlapping node on the way down is flagged as having content.
    /// Returns `false` when the rectangle misses the tree entirely.
    pub fn add(&mut self, item: T, rect: Rect) -> bool {
        let mut inserted = false;
        let mut stack = vec![ROOT];

        while let Some(id) = stack.pop() {
            let node = &mut self.nodes[id];
            if !node.bounds.intersects(&rect) {
                continue;
            }
            node.has_content = true;
            match node.children {
                Some(children) => stack.extend(children),
                None => {
                    if !node.contents.contains(&item) {
                        node.contents.push(item);
                    }
                    inserted = true;
                }
            }
        }

        inserted
    }

    /// Remove an item from every leaf holding it.
    ///
    /// Visits every leaf without pruning, then clears the content flag of
    /// leaves left empty and of ancestors whose subtrees are all empty.
    /// Returns `true` if the item was present anywhere.
    pub fn remove(&mut self, item: T) -> bool {
        let mut removed = false;

        for index in 0..self.leaves.len() {
            let leaf = self.leaves[index];
            let node = &mut self.nodes[leaf];
            let before = node.contents.len();
            node.contents.retain(|stored| *stored != item);
            if node.contents.len() == before {
                continue;
            }
            removed = true;
            if node.contents.is_empty() {
                node.has_content = false;
                self.refresh_ancestors(leaf);
            }
        }

        removed
    }

    /// Re-insert an item under a new rectangle
    pub fn update(&mut self, item: T, rect: Rect) -> bool {
        self.remove(item);
        self.add(item, rect)
    }

    /// Items in leaves crossed by the segment, each reported once in
    /// traversal order.
    ///
    /// Subtrees without content are skipped.
    pub fn intersects(&self, line: &Line) -> Vec<T> {
        self.collect(|bounds| line.intersects_rect(bounds))
    }

    /// Items in leaves overlapping the rectangle, each reported once
    pub fn query_rect(&self, rect: &Rect) -> Vec<T> {
        self.collect(|bounds| bounds.intersects(rect))
    }

    /// Drop every item, keeping the tree shape
    pub fn clear(&mut self) {
        for node in &mut self.nodes {
            node.contents.clear();
            node.has_content = false;
        }
    }

    /// Check if any leaf holds the item
    pub fn contains(&self, item: T) -> bool {
        self.leaves
            .iter()
            .any(|&leaf| self.nodes[leaf].contents.contains(&item))
    }

    /// Bounds of the leaves holding the item
    pub fn leaves_containing(&self, item: T) -> Vec<Rect> {
        self.leaves
            .iter()
            .map(|&leaf| &self.nodes[leaf])
            .filter(|node| node.contents.contains(&item))
            .map(|node| node.bounds)
            .collect()
    }

    fn collect(&self, crosses: impl Fn(&Rect) -> bool) -> Vec<T> {
        let mut found = Vec::new();
        let root = &self.nodes[ROOT];
        if !root.has_content || !crosses(&root.bounds) {
            return found;
        }
        let mut stack = vec![ROOT];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            match node.children {
                Some(children) => {
                    // Reversed so the first quadrant is visited first
                    for &child in children.iter().rev() {
                        let child_node = &self.nodes[child];
                        if child_node.has_content && crosses(&child_node.bounds) {
                            stack.push(child);
                        }
                    }
                }
                None => found.extend_from_slice(&node.contents),
            }
        }

        let mut seen = HashSet::with_capacity(found.len());
        found.retain(|item| seen.insert(*item));
        found
    }

    fn refresh_ancestors(&mut self, node: NodeId) {
        let mut current = self.nodes[node].parent;
        while let Some(id) = current {
            let any_child = self.nodes[id]
                .children
                .is_some_and(|children| children.iter().any(|&c| self.nodes[c].has_content));
            if any_child {
                break;
            }
            self.nodes[id].has_content = false;
            current = self.nodes[id].parent;
        }
    }
}

impl<T> QuadTree<T> {
    /// Region covered by the root
    pub fn bounds(&self) -> Rect {
        self.nodes[ROOT].bounds
    }

    /// Subdivision depth, fixed at construction
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of leaves, always `4^depth`
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Width of every leaf
    pub fn leaf_width(&self) -> f32 {
        self.nodes[self.leaves[0]].bounds.width
    }

    /// Height of every leaf
    pub fn leaf_height(&self) -> f32 {
        self.nodes[self.leaves[0]].bounds.height
    }

    /// Bounds of every leaf, in arena order
    pub fn leaf_bounds(&self) -> Vec<Rect> {
        self.leaves().map(|leaf| leaf.bounds).collect()
    }

    /// Leaf nodes in arena order
    pub fn leaves(&self) -> impl Iterator<Item = &QuadNode<T>> {
        self.leaves.iter().map(|&leaf| &self.nodes[leaf])
    }

    /// Root node
    pub fn root(&self) -> &QuadNode<T> {
        &self.nodes[ROOT]
    }

    /// Node by arena index
    pub fn node(&self, id: NodeId) -> Option<&QuadNode<T>> {
        self.nodes.get(id)
    }
}
