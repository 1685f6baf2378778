//! System trait and the per-call view of a manager

use super::component::ComponentMask;
use super::entity::{Entity, EntityId};
use super::manager::{ChangeKind, ManagerState};
use crate::events::GameEvent;
use crate::spatial::QuadTree;
use std::collections::BTreeSet;
use std::time::Duration;

/// Per-frame behavior over the entities matching a component mask.
///
/// The owning [`Manager`](super::Manager) keeps the set of matching entities
/// up to date; a system only reads it through
/// [`SystemContext::active_entities`].
pub trait System {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Kinds an entity must carry to be processed by this system
    fn required_mask(&self) -> ComponentMask;

    /// Called once when the system is registered, before its membership is
    /// first evaluated
    fn initialize(&mut self, _ctx: &mut SystemContext<'_>) {}

    /// Called once per frame, in registration order
    fn update(&mut self, ctx: &mut SystemContext<'_>, elapsed: Duration);
}

/// A system's access to its manager for the duration of one call.
///
/// The live set cannot change while a context exists: additions and
/// removals are queued and applied at the frame boundary. Component
/// changes made through [`entity_mut`](Self::entity_mut) are picked up by
/// the manager once the call returns.
pub struct SystemContext<'a> {
    state: &'a mut ManagerState,
    active: &'a BTreeSet<EntityId>,
}

impl<'a> SystemContext<'a> {
    pub(super) fn new(state: &'a mut ManagerState, active: &'a BTreeSet<EntityId>) -> Self {
        Self { state, active }
    }

    /// Live entities matching the current system's mask, in id order.
    ///
    /// The set is not tied to the context borrow, so it can be iterated
    /// while entities are mutated.
    pub fn active_entities(&self) -> &'a BTreeSet<EntityId> {
        self.active
    }

    /// Live entity by id
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.state.entities.get(&id)
    }

    /// Mutable live entity by id
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let entity = self.state.entities.get_mut(&id)?;
        self.state.touched.entry(id).or_insert_with(|| entity.mask());
        Some(entity)
    }

    /// Every live entity, in id order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.state.entities.values()
    }

    /// Allocate an empty entity; it stays outside the manager until passed
    /// to [`add_entity`](Self::add_entity)
    pub fn create_entity(&mut self) -> Entity {
        Entity::new(self.state.ids.allocate())
    }

    /// Queue an entity for admission at the start of the next frame
    pub fn add_entity(&mut self, entity: Entity) {
        self.state.pending.push(entity);
    }

    /// Queue an entity for removal at the end of this frame
    pub fn remove_entity(&mut self, id: EntityId) {
        self.state.removal.push(id);
    }

    /// Record a data change in this frame's change feed
    pub fn mark_modified(&mut self, id: EntityId) {
        self.state.mark_modified(id);
    }

    /// Change recorded for an entity so far this frame
    pub fn change_of(&self, id: EntityId) -> Option<ChangeKind> {
        self.state.changed.get(&id).copied()
    }

    /// Whether the manager drives a renderer
    pub fn has_graphics(&self) -> bool {
        self.state.has_graphics
    }

    /// Spatial index of the manager
    pub fn spatial(&self) -> &QuadTree<EntityId> {
        &self.state.spatial
    }

    /// Mutable spatial index of the manager
    pub fn spatial_mut(&mut self) -> &mut QuadTree<EntityId> {
        &mut self.state.spatial
    }

    /// Inbound events routed to this manager for the current frame
    pub fn events(&self) -> &[GameEvent] {
        self.state.inbox.pending()
    }

    /// Queue an outbound event for the driver
    pub fn emit(&mut self, event: GameEvent) {
        self.state.outbox.send(event);
    }
}
