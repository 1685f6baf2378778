//! Entity-Component-System implementation
//!
//! Entities are kind-keyed sets of components with a derived bitmask,
//! systems declare the mask they need, and the [`Manager`] keeps each
//! system's matching set current while deferring structural changes to
//! frame boundaries.

pub mod component;
pub mod components;
pub mod entity;
pub mod manager;
pub mod system;

pub use component::{Component, ComponentData, ComponentKind, ComponentMask, ComponentType};
pub use entity::{Entity, EntityId, EntityIdAllocator};
pub use manager::{ChangeKind, Manager, SystemId};
pub use system::{System, SystemContext};
