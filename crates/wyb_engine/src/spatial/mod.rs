//! Spatial partitioning data structures
//!
//! Provides a fixed-depth quadtree for line-of-sight and broad-phase
//! collision queries over the 2D arena.

mod quadtree;

pub use quadtree::{NodeId, QuadNode, QuadTree, SpatialError, MAX_DEPTH};
