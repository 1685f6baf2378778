//! # WYB Engine
//!
//! Headless game-engine core for a top-down 2D arena game.
//!
//! ## Features
//!
//! - **ECS Architecture**: bitmask component registry, deferred entity
//!   admission and removal, incremental system membership
//! - **Change Feed**: per-frame Add/Remove/Modify entries for replication
//! - **World Stack**: one manager per screen state with update and draw
//!   exclusivity
//! - **Spatial Index**: fixed-depth quadtree for line-of-sight and broad
//!   phase queries
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wyb_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let manager = engine.create_manager().map_err(|e| AppError::Custom(e.to_string()))?;
//!         engine.stack.insert(World::new(WorldKind::MainMenu, manager, WorldFlags::EXCLUSIVE));
//!         engine.stack.push(WorldKind::MainMenu)?;
//!         Ok(())
//!     }
//!
//!     fn on_event(
//!         &mut self,
//!         stack: &mut WorldStack,
//!         _source: WorldKind,
//!         event: GameEvent,
//!     ) -> Result<(), AppError> {
//!         if event == GameEvent::Navigate(Navigation::Exit) {
//!             stack.pop();
//!         }
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let mut app = MyApp;
//!     Engine::run(config, &mut app)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod ecs;
pub mod events;
pub mod foundation;
pub mod spatial;
pub mod world;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use config::EngineConfig;
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ManagerConfig, SpatialConfig},
        ecs::{
            components::*, ChangeKind, Component, ComponentKind, ComponentMask, Entity, EntityId,
            Manager, System, SystemContext, SystemId,
        },
        events::{AvatarInput, GameEvent, Navigation},
        foundation::math::{Line, Rect, Vec2},
        spatial::{QuadTree, SpatialError},
        world::{FrameReport, World, WorldError, WorldFlags, WorldKind, WorldStack},
        AppError, Application, Engine, EngineConfig, EngineError,
    };
}
