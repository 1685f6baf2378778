//! Application trait: the gameplay policy plugged into the engine

use crate::engine::Engine;
use crate::events::GameEvent;
use crate::world::{WorldError, WorldKind, WorldStack};
use thiserror::Error;

/// Application lifecycle trait
///
/// The engine only moves frames along; deciding what an emitted event means
/// (push a world, pop one, reset a game) is up to the application.
pub trait Application {
    /// Called once before the first frame. Use this to register worlds
    /// and push the initial one.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Handle an event emitted by a system of `source` during the frame
    fn on_event(
        &mut self,
        stack: &mut WorldStack,
        source: WorldKind,
        event: GameEvent,
    ) -> Result<(), AppError>;

    /// Present the worlds of the draw set, bottom to top
    fn draw(&mut self, _stack: &WorldStack, _worlds: &[WorldKind]) {}

    /// Called when the engine stops running
    fn cleanup(&mut self, _engine: &mut Engine) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// World stack operation failed
    #[error("World error: {0}")]
    World(#[from] WorldError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}
