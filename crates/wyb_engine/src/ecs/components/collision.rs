//! Collision component for ECS

use crate::foundation::math::{Rect, Vec2};

/// Axis-aligned collision box
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColliderComponent {
    /// Collision box in world space
    pub collider: Rect,

    /// Whether hits destroy the owner (walls are not destructible)
    pub destructible: bool,
}

impl ColliderComponent {
    /// Create a collider box
    pub const fn new(collider: Rect, destructible: bool) -> Self {
        Self { collider, destructible }
    }

    /// Move the box so its top-left corner sits at `position`
    pub fn move_to(&mut self, position: Vec2) {
        self.collider.x = position.x;
        self.collider.y = position.y;
    }

    /// Check if two colliders overlap
    pub fn overlaps(&self, other: &Self) -> bool {
        self.collider.intersects(&other.collider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_and_overlap() {
        let mut a = ColliderComponent::new(Rect::new(0.0, 0.0, 10.0, 10.0), true);
        let b = ColliderComponent::new(Rect::new(20.0, 0.0, 10.0, 10.0), false);
        assert!(!a.overlaps(&b));

        a.move_to(Vec2::new(15.0, 0.0));
        assert!(a.overlaps(&b));
        assert_eq!(a.collider.width, 10.0);
    }
}
