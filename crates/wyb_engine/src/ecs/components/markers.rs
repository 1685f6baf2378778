//! Graphics and debug marker components
//!
//! The core never draws; these only carry what a renderer needs to pick a
//! sprite and order it.

/// Visual representation handle
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsComponent {
    /// Renderer-defined sprite identifier
    pub sprite: u32,

    /// Draw depth, 0 in front
    pub layer: f32,

    /// Whether the sprite is drawn
    pub visible: bool,
}

impl GraphicsComponent {
    /// Visible sprite on a layer
    pub const fn new(sprite: u32, layer: f32) -> Self {
        Self { sprite, layer, visible: true }
    }
}

/// Debug visualisation marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebugComponent;
