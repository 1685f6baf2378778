//! Avatar input and vision components

use crate::foundation::math::Vec2;

/// Input state of a player-controlled avatar, written by an input system
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerInputComponent {
    /// Movement axes, each in `-1..=1`
    pub movement: Vec2,

    /// Point the avatar looks at
    pub look_target: Vec2,

    /// Swing requested this frame
    pub swing: bool,

    /// Throw requested this frame
    pub throw: bool,
}

impl PlayerInputComponent {
    /// Clear one-shot requests after they were handled
    pub fn consume_actions(&mut self) {
        self.swing = false;
        self.throw = false;
    }
}

/// Field of view polygon computed by a vision system
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisionComponent {
    /// Maximum sight distance
    pub range: f32,

    /// Polygon vertices around the viewer, empty until first computed
    pub field: Vec<Vec2>,
}

impl VisionComponent {
    /// Create a vision component with no computed field yet
    pub const fn new(range: f32) -> Self {
        Self { range, field: Vec::new() }
    }
}
