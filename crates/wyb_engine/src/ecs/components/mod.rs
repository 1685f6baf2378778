//! ECS Components module
//!
//! Payload types for every component kind of the registry in
//! [`crate::ecs::component`].

pub mod transform;
pub mod movement;
pub mod collision;
pub mod combat;
pub mod avatar;
pub mod level;
pub mod markers;

pub use transform::TransformComponent;
pub use movement::VelocityComponent;
pub use collision::ColliderComponent;
pub use combat::{Allegiance, AllegianceComponent, WeaponComponent, WeaponKind, WielderComponent};
pub use avatar::{PlayerInputComponent, VisionComponent};
pub use level::{LevelComponent, LevelName, SpawnComponent};
pub use markers::{DebugComponent, GraphicsComponent};
