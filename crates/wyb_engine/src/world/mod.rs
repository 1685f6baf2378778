//! Worlds: one manager per screen state, stacked for navigation

mod stack;

pub use stack::{FrameReport, WorldStack};

use crate::ecs::Manager;
use crate::spatial::SpatialError;
use serde::{Deserialize, Serialize};

/// Closed set of screen states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WorldKind {
    /// Title screen
    MainMenu,
    /// Server address entry for networked play
    ConnectMenu,
    /// Overlay shown while a game is paused
    PauseMenu,
    /// Local game
    InGame,
    /// Networked game
    InGameMulti,
}

/// Per-world exclusivity, supplied by whoever builds the world
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldFlags {
    /// Worlds below this one are not updated while it is on the stack
    pub update_exclusive: bool,
    /// Worlds below this one are not drawn while it is on the stack
    pub draw_exclusive: bool,
}

impl WorldFlags {
    /// Blocks both updating and drawing of lower worlds
    pub const EXCLUSIVE: Self = Self { update_exclusive: true, draw_exclusive: true };

    /// Overlay that freezes lower worlds but lets them show through
    pub const OVERLAY: Self = Self { update_exclusive: true, draw_exclusive: false };

    /// Blocks nothing
    pub const TRANSPARENT: Self = Self { update_exclusive: false, draw_exclusive: false };
}

/// Builds a fresh manager for a world, systems and seed entities included
pub type ManagerFactory = Box<dyn Fn() -> Result<Manager, SpatialError>>;

/// World errors
#[derive(thiserror::Error, Debug)]
pub enum WorldError {
    /// No world of this kind was inserted
    #[error("World {0:?} is not registered")]
    NotRegistered(WorldKind),

    /// The world is already somewhere on the stack
    #[error("World {0:?} is already on the stack")]
    AlreadyOnStack(WorldKind),

    /// Reset requested for a world built without a factory
    #[error("World {0:?} has no manager factory to reset from")]
    NoFactory(WorldKind),

    /// Rebuilding the manager failed
    #[error("Spatial error: {0}")]
    Spatial(#[from] SpatialError),
}

/// A screen state and the manager holding its entities
pub struct World {
    kind: WorldKind,
    /// Entities and systems of this world
    pub manager: Manager,
    /// Exclusivity flags
    pub flags: WorldFlags,
    factory: Option<ManagerFactory>,
}

impl World {
    /// Wrap an existing manager; such a world can only be reset with
    /// [`reset_with`](Self::reset_with)
    pub fn new(kind: WorldKind, manager: Manager, flags: WorldFlags) -> Self {
        Self {
            kind,
            manager,
            flags,
            factory: None,
        }
    }

    /// Build the manager from a factory that [`reset`](Self::reset) reuses
    pub fn from_factory(
        kind: WorldKind,
        flags: WorldFlags,
        factory: ManagerFactory,
    ) -> Result<Self, WorldError> {
        let manager = factory()?;
        Ok(Self {
            kind,
            manager,
            flags,
            factory: Some(factory),
        })
    }

    /// Screen state of this world
    pub const fn kind(&self) -> WorldKind {
        self.kind
    }

    /// Check if the world can rebuild its manager by itself
    pub const fn has_factory(&self) -> bool {
        self.factory.is_some()
    }

    /// Replace the manager with a fresh one from the factory.
    ///
    /// The old manager is kept when the factory fails.
    pub fn reset(&mut self) -> Result<(), WorldError> {
        let factory = self.factory.as_ref().ok_or(WorldError::NoFactory(self.kind))?;
        self.manager = factory()?;
        log::info!("Reset world {:?}", self.kind);
        Ok(())
    }

    /// Replace the manager with one built by the caller
    pub fn reset_with(&mut self, manager: Manager) {
        self.manager = manager;
        log::info!("Reset world {:?} with a supplied manager", self.kind);
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("kind", &self.kind)
            .field("manager", &self.manager)
            .field("flags", &self.flags)
            .field("has_factory", &self.factory.is_some())
            .finish()
    }
}
