//! Core engine implementation

use crate::application::Application;
use crate::config::{ConfigError, EngineConfig};
use crate::ecs::Manager;
use crate::foundation::time::Timer;
use crate::spatial::SpatialError;
use crate::world::{FrameReport, WorldError, WorldStack};
use std::time::Duration;
use thiserror::Error;

/// Main engine struct
///
/// Owns the world stack and drives it one frame at a time.
pub struct Engine {
    /// Registered worlds and the navigation stack
    pub stack: WorldStack,

    config: EngineConfig,
    frame_count: u64,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!("Initializing engine...");

        Ok(Self {
            stack: WorldStack::new(),
            config,
            frame_count: 0,
        })
    }

    /// Build an empty manager from the configured defaults
    pub fn create_manager(&self) -> Result<Manager, EngineError> {
        Ok(Manager::new(&self.config.manager)?)
    }

    /// Run one frame: update the stack, hand every emitted event to the
    /// application, then let it draw.
    pub fn frame<A: Application>(
        &mut self,
        app: &mut A,
        elapsed: Duration,
    ) -> Result<FrameReport, EngineError> {
        let report = self.stack.update(elapsed);

        for (source, event) in &report.events {
            log::debug!("Frame {}: {:?} emitted {:?}", self.frame_count, source, event);
            app.on_event(&mut self.stack, *source, event.clone())
                .map_err(|e| EngineError::Application(format!("Event handling: {}", e)))?;
        }

        let draw_set = self.stack.draw_set();
        app.draw(&self.stack, &draw_set);

        self.frame_count += 1;
        Ok(report)
    }

    /// Run the main loop with a wall-clock timer until the stack is empty
    pub fn run<A: Application>(config: EngineConfig, app: &mut A) -> Result<(), EngineError> {
        let mut engine = Self::new(config)?;

        app.initialize(&mut engine)
            .map_err(|e| EngineError::Application(format!("App initialization: {}", e)))?;

        log::info!("Starting main loop...");
        let mut timer = Timer::new();
        while engine.is_running() {
            let elapsed = timer.tick();
            engine.frame(app, elapsed)?;
        }

        app.cleanup(&mut engine);
        log::info!(
            "Engine shutdown complete after {} frames ({:.1} fps)",
            engine.frame_count,
            timer.average_fps()
        );
        Ok(())
    }

    /// Run at most `max_frames` frames of a fixed `step`, stopping early
    /// when the stack empties. Returns the number of frames run.
    pub fn run_fixed<A: Application>(
        &mut self,
        app: &mut A,
        step: Duration,
        max_frames: u64,
    ) -> Result<u64, EngineError> {
        let start = self.frame_count;
        while self.is_running() && self.frame_count - start < max_frames {
            self.frame(app, step)?;
        }
        Ok(self.frame_count - start)
    }

    /// The engine runs while some world is on the stack
    pub fn is_running(&self) -> bool {
        self.stack.top().is_some()
    }

    /// Frames driven so far
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Engine configuration
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// World stack misuse
    #[error("World error: {0}")]
    World(#[from] WorldError),

    /// Spatial index construction failed
    #[error("Spatial error: {0}")]
    Spatial(#[from] SpatialError),

    /// Error returned by the application
    #[error("Application error: {0}")]
    Application(String),
}
