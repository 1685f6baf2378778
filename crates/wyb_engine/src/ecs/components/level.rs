//! Level bookkeeping components

use crate::ecs::EntityId;

/// Levels shipped with the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LevelName {
    /// Opening arena
    #[default]
    FirstLevel,
}

/// Singleton holding the current level's entity lists and clock
#[derive(Debug, Clone, PartialEq)]
pub struct LevelComponent {
    /// Level being played
    pub current: LevelName,

    /// Spawn point entities
    pub spawns: Vec<EntityId>,

    /// Avatar entities
    pub avatars: Vec<EntityId>,

    /// Wall entities
    pub walls: Vec<EntityId>,

    /// Seconds left on the round clock
    pub time_left: f32,

    /// Set when the level must be rebuilt
    pub reset: bool,
}

impl Default for LevelComponent {
    fn default() -> Self {
        Self {
            current: LevelName::default(),
            spawns: Vec::new(),
            avatars: Vec::new(),
            walls: Vec::new(),
            time_left: 300.0,
            reset: false,
        }
    }
}

impl LevelComponent {
    /// Every entity the level tracks
    pub fn all_entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.spawns
            .iter()
            .chain(&self.avatars)
            .chain(&self.walls)
            .copied()
    }
}

/// Spawn point marker
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpawnComponent {
    /// Whether an avatar currently stands on this spawn
    pub occupied: bool,
}
