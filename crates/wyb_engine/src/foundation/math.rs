//! Math utilities and types
//!
//! 2D primitives in screen space: x grows right, y grows down, angles are
//! measured clockwise from the vertical.

use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Extent along x
    pub width: f32,
    /// Extent along y
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle of the given size centered on a point
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    /// Left edge
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True when both extents are strictly positive
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Half the length of the diagonal
    pub fn half_diagonal(&self) -> f32 {
        self.width.hypot(self.height) / 2.0
    }

    /// Check if a point lies inside or on the edge of the rectangle
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Check if two rectangles overlap.
    ///
    /// Overlap is strict: rectangles that only share an edge do not overlap.
    pub fn intersects(&self, other: &Self) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Split into four equal quadrants: top-left, top-right, bottom-left, bottom-right
    pub fn quadrants(&self) -> [Self; 4] {
        let w = self.width / 2.0;
        let h = self.height / 2.0;
        [
            Self::new(self.x, self.y, w, h),
            Self::new(self.x + w, self.y, w, h),
            Self::new(self.x, self.y + h, w, h),
            Self::new(self.x + w, self.y + h, w, h),
        ]
    }
}

/// Line segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Start point
    pub p1: Vec2,
    /// End point
    pub p2: Vec2,
}

impl Line {
    /// Create a segment from two points
    pub const fn new(p1: Vec2, p2: Vec2) -> Self {
        Self { p1, p2 }
    }

    /// Create a segment from raw coordinates
    pub fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(Vec2::new(x1, y1), Vec2::new(x2, y2))
    }

    /// Direction vector from `p1` to `p2`
    pub fn direction(&self) -> Vec2 {
        self.p2 - self.p1
    }

    /// Segment length
    pub fn length(&self) -> f32 {
        self.direction().norm()
    }

    /// Check if the segment touches the rectangle, edges included.
    ///
    /// Liang-Barsky clipping of the segment parameter range `[0, 1]`
    /// against the four slabs of the rectangle.
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        let d = self.direction();
        let mut t_enter = 0.0_f32;
        let mut t_exit = 1.0_f32;

        let slabs = [
            (-d.x, self.p1.x - rect.left()),
            (d.x, rect.right() - self.p1.x),
            (-d.y, self.p1.y - rect.top()),
            (d.y, rect.bottom() - self.p1.y),
        ];

        for (p, q) in slabs {
            if p.abs() < f32::EPSILON {
                // Parallel to this slab: reject only if outside it
                if q < 0.0 {
                    return false;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                if t > t_exit {
                    return false;
                }
                t_enter = t_enter.max(t);
            } else {
                if t < t_enter {
                    return false;
                }
                t_exit = t_exit.min(t);
            }
        }

        t_enter <= t_exit
    }
}

/// Unit vector for an angle measured clockwise from the vertical
pub fn angle_to_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}

/// Angle of a vector, clockwise from the vertical, in `[0, 2π)`
pub fn vector_to_angle(vector: Vec2) -> f32 {
    normalize_angle(vector.x.atan2(-vector.y))
}

/// Wrap an angle into `[0, 2π)`
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// 2D cross product (z component of the 3D cross product)
pub fn cross(v: Vec2, w: Vec2) -> f32 {
    v.x * w.y - v.y * w.x
}

/// Point of `points` nearest to `point`
pub fn closest_point(point: Vec2, points: &[Vec2]) -> Option<Vec2> {
    points
        .iter()
        .copied()
        .min_by(|a, b| (a - point).norm_squared().total_cmp(&(b - point).norm_squared()))
}

/// Point of `points` furthest from `point`
pub fn furthest_point(point: Vec2, points: &[Vec2]) -> Option<Vec2> {
    points
        .iter()
        .copied()
        .max_by(|a, b| (a - point).norm_squared().total_cmp(&(b - point).norm_squared()))
}
