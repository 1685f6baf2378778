//! Transform component for the ECS system
//!
//! Pure data component in screen space: `position` is the top-left corner
//! of the entity's footprint, rotation and look angle are clockwise from the
//! vertical.

use crate::foundation::math::{angle_to_vector, Rect, Vec2};

/// ECS Transform component
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// Top-left corner of the footprint
    pub position: Vec2,

    /// Footprint extents
    pub size: Vec2,

    /// Body rotation in radians
    pub rotation: f32,

    /// Facing used for aiming, independent of body rotation
    pub look_angle: f32,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            size: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            look_angle: 0.0,
        }
    }
}

impl TransformComponent {
    /// Create from a footprint rectangle
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            position: Vec2::new(rect.x, rect.y),
            size: Vec2::new(rect.width, rect.height),
            ..Default::default()
        }
    }

    /// Builder: set body rotation
    #[must_use]
    pub const fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Footprint rectangle, the shape inserted into the spatial index
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    /// Center of the footprint
    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }

    /// Unit vector along the look angle
    pub fn look_direction(&self) -> Vec2 {
        angle_to_vector(self.look_angle)
    }

    /// Move by an offset
    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bounds_and_center() {
        let transform = TransformComponent::from_rect(Rect::new(10.0, 20.0, 4.0, 6.0));

        assert_eq!(transform.bounds(), Rect::new(10.0, 20.0, 4.0, 6.0));
        assert_relative_eq!(transform.center().x, 12.0);
        assert_relative_eq!(transform.center().y, 23.0);
    }

    #[test]
    fn test_translate() {
        let mut transform = TransformComponent::default();
        transform.translate(Vec2::new(3.0, -1.0));
        assert_eq!(transform.position, Vec2::new(3.0, -1.0));
    }
}
