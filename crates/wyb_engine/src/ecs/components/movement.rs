//! Velocity component for entities that move across the arena

use crate::foundation::math::Vec2;
use std::time::Duration;

/// Component for entities that can move
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityComponent {
    /// Linear velocity in units per second
    pub velocity: Vec2,

    /// Maximum speed limit (0 = no limit)
    pub max_speed: f32,
}

impl Default for VelocityComponent {
    fn default() -> Self {
        Self {
            velocity: Vec2::zeros(),
            max_speed: 0.0,
        }
    }
}

impl VelocityComponent {
    /// Create a velocity component with initial velocity
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Default::default()
        }
    }

    /// Builder: cap the speed
    #[must_use]
    pub const fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// Set velocity, respecting the speed cap
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        if self.max_speed > 0.0 && self.velocity.norm() > self.max_speed {
            self.velocity = self.velocity.normalize() * self.max_speed;
        }
    }

    /// Displacement over a time step
    pub fn displacement(&self, elapsed: Duration) -> Vec2 {
        self.velocity * elapsed.as_secs_f32()
    }

    /// Check if the entity is moving
    pub fn is_moving(&self) -> bool {
        self.velocity.norm_squared() > f32::EPSILON
    }
}
