//! Entity manager: the live set, deferred structural changes, registered
//! systems and the per-frame change feed.
//!
//! A frame runs in a fixed order:
//!
//! 1. pending entities are admitted into the live set,
//! 2. systems update in registration order,
//! 3. queued removals are applied,
//! 4. the change feed describes the frame until the next [`Manager::update`].
//!
//! Modifications reported through [`Manager::mark_modified`] between frames
//! are held back and merged into the next frame's feed.
//!
//! System membership is maintained one entity at a time whenever an entity
//! is admitted, removed, or has its mask changed.

use super::component::ComponentMask;
use super::entity::{Entity, EntityId, EntityIdAllocator};
use super::system::{System, SystemContext};
use crate::config::ManagerConfig;
use crate::events::{EventQueue, GameEvent};
use crate::spatial::{QuadTree, SpatialError};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::time::Duration;

/// Entry kind in the change feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Admitted this frame
    Add,
    /// Live before this frame and removed during it
    Remove,
    /// Data changed, reported explicitly by a system
    Modify,
}

/// Handle returned by [`Manager::add_system`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SystemId(u32);

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "system {}", self.0)
    }
}

/// Manager data reachable from a [`SystemContext`]
pub(crate) struct ManagerState {
    pub(super) entities: BTreeMap<EntityId, Entity>,
    pub(super) pending: Vec<Entity>,
    pub(super) removal: Vec<EntityId>,
    pub(super) changed: BTreeMap<EntityId, ChangeKind>,
    /// Modifications reported between frames, merged on the next update
    pub(super) carried: BTreeSet<EntityId>,
    /// Masks of entities handed out mutably, taken before the first handout
    pub(super) touched: HashMap<EntityId, ComponentMask>,
    pub(super) ids: EntityIdAllocator,
    pub(super) spatial: QuadTree<EntityId>,
    pub(super) has_graphics: bool,
    pub(super) inbox: EventQueue<GameEvent>,
    pub(super) outbox: EventQueue<GameEvent>,
}

impl ManagerState {
    /// Modify never replaces an Add or Remove entry
    pub(super) fn mark_modified(&mut self, id: EntityId) {
        if self.entities.contains_key(&id) {
            self.changed.entry(id).or_insert(ChangeKind::Modify);
        }
    }
}

struct SystemEntry {
    id: SystemId,
    system: Box<dyn System>,
    active: BTreeSet<EntityId>,
}

impl SystemEntry {
    fn evaluate(&mut self, entity: &Entity) {
        if entity.has_all(self.system.required_mask()) {
            self.active.insert(entity.id());
        } else {
            self.active.remove(&entity.id());
        }
    }
}

/// One world's entities and systems
pub struct Manager {
    state: ManagerState,
    systems: Vec<SystemEntry>,
    next_system: u32,
    playing: bool,
}

impl Manager {
    /// Create an empty manager with its spatial index built from `config`
    pub fn new(config: &ManagerConfig) -> Result<Self, SpatialError> {
        let spatial = QuadTree::new(config.spatial.bounds, config.spatial.depth)?;
        Ok(Self {
            state: ManagerState {
                entities: BTreeMap::new(),
                pending: Vec::new(),
                removal: Vec::new(),
                changed: BTreeMap::new(),
                carried: BTreeSet::new(),
                touched: HashMap::new(),
                ids: EntityIdAllocator::new(),
                spatial,
                has_graphics: config.has_graphics,
                inbox: EventQueue::new(),
                outbox: EventQueue::new(),
            },
            systems: Vec::new(),
            next_system: 0,
            playing: true,
        })
    }

    /// Allocate an empty entity with an id unique to this manager
    pub fn create_entity(&mut self) -> Entity {
        Entity::new(self.state.ids.allocate())
    }

    /// Queue an entity for admission at the start of the next update
    pub fn add_entity(&mut self, entity: Entity) {
        log::trace!("Queued entity {} for admission", entity.id());
        self.state.pending.push(entity);
    }

    /// Queue an entity for removal at the end of the next update
    pub fn remove_entity(&mut self, id: EntityId) {
        log::trace!("Queued entity {} for removal", id);
        self.state.removal.push(id);
    }

    /// Register a system.
    ///
    /// `initialize` runs first, then the whole live set is evaluated once
    /// against the system's mask.
    pub fn add_system<S: System + 'static>(&mut self, system: S) -> SystemId {
        let id = SystemId(self.next_system);
        self.next_system += 1;

        let mut entry = SystemEntry {
            id,
            system: Box::new(system),
            active: BTreeSet::new(),
        };
        {
            let SystemEntry { system, active, .. } = &mut entry;
            let mut ctx = SystemContext::new(&mut self.state, active);
            system.initialize(&mut ctx);
        }
        self.refresh_touched();

        for entity in self.state.entities.values() {
            entry.evaluate(entity);
        }
        log::debug!(
            "Registered {} '{}' with {} matching entities",
            id,
            entry.system.name(),
            entry.active.len()
        );
        self.systems.push(entry);
        id
    }

    /// Unregister a system, returning it. Unknown ids are ignored.
    pub fn remove_system(&mut self, id: SystemId) -> Option<Box<dyn System>> {
        let Some(index) = self.systems.iter().position(|entry| entry.id == id) else {
            log::debug!("Ignoring removal of unknown {}", id);
            return None;
        };
        let entry = self.systems.remove(index);
        log::debug!("Removed {} '{}'", id, entry.system.name());
        Some(entry.system)
    }

    /// Run one frame.
    ///
    /// Clears the previous frame's change feed first, then merges the
    /// modifications reported since. Inbound events pushed before this call
    /// are visible to every system and dropped afterwards.
    pub fn update(&mut self, elapsed: Duration) {
        self.state.changed.clear();
        let admitted = self.admit_pending();
        for id in std::mem::take(&mut self.state.carried) {
            self.state.mark_modified(id);
        }

        for index in 0..self.systems.len() {
            if !self.playing {
                break;
            }
            let SystemEntry { system, active, .. } = &mut self.systems[index];
            let mut ctx = SystemContext::new(&mut self.state, active);
            system.update(&mut ctx, elapsed);
            self.refresh_touched();
        }

        let removed = self.apply_removals();
        self.state.inbox.clear();
        log::trace!(
            "Frame done: {} admitted, {} removed, {} live",
            admitted,
            removed,
            self.state.entities.len()
        );
    }

    fn admit_pending(&mut self) -> usize {
        let mut admitted = 0;
        for mut entity in std::mem::take(&mut self.state.pending) {
            let id = entity.id();
            if self.state.entities.contains_key(&id) {
                log::warn!("Entity {} is already live, dropping duplicate admission", id);
                continue;
            }
            entity.set_active(true);
            for entry in &mut self.systems {
                entry.evaluate(&entity);
            }
            self.state.changed.insert(id, ChangeKind::Add);
            self.state.entities.insert(id, entity);
            admitted += 1;
        }
        admitted
    }

    fn apply_removals(&mut self) -> usize {
        let mut removed = 0;
        for id in std::mem::take(&mut self.state.removal) {
            if let Some(mut entity) = self.state.entities.remove(&id) {
                entity.set_active(false);
                for entry in &mut self.systems {
                    entry.active.remove(&id);
                }
                self.state.spatial.remove(id);
                self.state.touched.remove(&id);

                // Admitted and removed in the same frame nets to nothing
                if self.state.changed.get(&id) == Some(&ChangeKind::Add) {
                    self.state.changed.remove(&id);
                } else {
                    self.state.changed.insert(id, ChangeKind::Remove);
                }
                removed += 1;
            } else if let Some(index) = self.state.pending.iter().position(|e| e.id() == id) {
                self.state.pending.remove(index);
                log::trace!("Entity {} removed before admission", id);
            } else {
                log::trace!("Ignoring removal of unknown entity {}", id);
            }
        }
        removed
    }

    /// Re-evaluate membership for entities whose mask changed while handed
    /// out mutably
    fn refresh_touched(&mut self) {
        for (id, before) in std::mem::take(&mut self.state.touched) {
            let Some(entity) = self.state.entities.get(&id) else {
                continue;
            };
            if entity.mask() == before {
                continue;
            }
            log::trace!("Entity {} mask changed {:?} -> {:?}", id, before, entity.mask());
            for entry in &mut self.systems {
                entry.evaluate(entity);
            }
        }
    }

    /// Mutate a live entity outside a frame, re-evaluating its membership
    /// afterwards. `None` if the entity is not live.
    pub fn modify_entity<R>(&mut self, id: EntityId, f: impl FnOnce(&mut Entity) -> R) -> Option<R> {
        let entity = self.state.entities.get_mut(&id)?;
        let before = entity.mask();
        let result = f(entity);

        if entity.mask() != before {
            let entity = &*entity;
            for entry in &mut self.systems {
                entry.evaluate(entity);
            }
        }
        Some(result)
    }

    /// Report a data change made between frames.
    ///
    /// The entry shows up in the feed of the next [`update`](Self::update),
    /// unless the entity is gone by then. Unknown ids are ignored.
    pub fn mark_modified(&mut self, id: EntityId) {
        if self.state.entities.contains_key(&id) {
            self.state.carried.insert(id);
        } else {
            log::trace!("Ignoring modification of unknown entity {}", id);
        }
    }

    /// Change feed of the last update
    pub fn changed(&self) -> &BTreeMap<EntityId, ChangeKind> {
        &self.state.changed
    }

    /// Take the change feed, leaving it empty
    pub fn take_changed(&mut self) -> BTreeMap<EntityId, ChangeKind> {
        std::mem::take(&mut self.state.changed)
    }

    /// Live entities in id order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.state.entities.values()
    }

    /// Live entity by id
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.state.entities.get(&id)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.state.entities.len()
    }

    /// Number of entities waiting for admission
    pub fn pending_count(&self) -> usize {
        self.state.pending.len()
    }

    /// Entities currently matched by a system
    pub fn active_entities(&self, id: SystemId) -> Option<&BTreeSet<EntityId>> {
        self.systems
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.active)
    }

    /// Registered systems in update order
    pub fn system_ids(&self) -> impl Iterator<Item = SystemId> + '_ {
        self.systems.iter().map(|entry| entry.id)
    }

    /// Number of registered systems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Whether systems run on [`update`](Self::update)
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    /// Stop or resume running systems. A stopped manager still admits and
    /// removes entities, so its change feed stays accurate.
    pub fn set_playing(&mut self, playing: bool) {
        if self.playing != playing {
            log::debug!("Manager playing: {}", playing);
        }
        self.playing = playing;
    }

    /// Whether this manager drives a renderer
    pub const fn has_graphics(&self) -> bool {
        self.state.has_graphics
    }

    /// Spatial index
    pub fn spatial(&self) -> &QuadTree<EntityId> {
        &self.state.spatial
    }

    /// Mutable spatial index
    pub fn spatial_mut(&mut self) -> &mut QuadTree<EntityId> {
        &mut self.state.spatial
    }

    /// Queue an inbound event for the next update
    pub fn push_event(&mut self, event: GameEvent) {
        self.state.inbox.send(event);
    }

    /// Take the outbound events systems emitted
    pub fn drain_emitted(&mut self) -> Vec<GameEvent> {
        self.state.outbox.drain()
    }

    /// Drop every entity, queue and feed entry. Systems stay registered with
    /// empty memberships; ids keep increasing.
    pub fn clear(&mut self) {
        let state = &mut self.state;
        state.entities.clear();
        state.pending.clear();
        state.removal.clear();
        state.changed.clear();
        state.carried.clear();
        state.touched.clear();
        state.spatial.clear();
        state.inbox.clear();
        state.outbox.clear();
        for entry in &mut self.systems {
            entry.active.clear();
        }
        log::debug!("Cleared manager, {} systems kept", self.systems.len());
    }
}

impl fmt::Debug for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("entities", &self.state.entities.len())
            .field("pending", &self.state.pending.len())
            .field("removal", &self.state.removal.len())
            .field("systems", &self.systems.len())
            .field("playing", &self.playing)
            .field("has_graphics", &self.state.has_graphics)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::{Component, ComponentKind};
    use crate::ecs::components::{AllegianceComponent, Allegiance, TransformComponent, VelocityComponent};
    use crate::events::Navigation;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::cell::RefCell;
    use std::rc::Rc;

    const FRAME: Duration = Duration::from_millis(16);

    /// Records what it sees each frame
    struct Recorder {
        name: &'static str,
        mask: ComponentMask,
        seen: Rc<RefCell<Vec<Vec<EntityId>>>>,
    }

    impl Recorder {
        fn new(name: &'static str, mask: ComponentMask) -> (Self, Rc<RefCell<Vec<Vec<EntityId>>>>) {
            let seen = Rc::new(RefCell::new(Vec::new()));
            (Self { name, mask, seen: Rc::clone(&seen) }, seen)
        }
    }

    impl System for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn required_mask(&self) -> ComponentMask {
            self.mask
        }

        fn update(&mut self, ctx: &mut SystemContext<'_>, _elapsed: Duration) {
            self.seen.borrow_mut().push(ctx.active_entities().iter().copied().collect());
        }
    }

    /// Strips velocity from everything it processes
    struct Brake;

    impl System for Brake {
        fn name(&self) -> &str {
            "brake"
        }

        fn required_mask(&self) -> ComponentMask {
            ComponentMask::VELOCITY
        }

        fn update(&mut self, ctx: &mut SystemContext<'_>, _elapsed: Duration) {
            for &id in ctx.active_entities() {
                if let Some(entity) = ctx.entity_mut(id) {
                    entity.remove_component(ComponentKind::Velocity);
                }
            }
        }
    }

    /// Reports every live entity as modified
    struct Toucher;

    impl System for Toucher {
        fn name(&self) -> &str {
            "toucher"
        }

        fn required_mask(&self) -> ComponentMask {
            ComponentMask::empty()
        }

        fn update(&mut self, ctx: &mut SystemContext<'_>, _elapsed: Duration) {
            for &id in ctx.active_entities() {
                ctx.mark_modified(id);
            }
        }
    }

    fn manager() -> Manager {
        Manager::new(&ManagerConfig::headless()).unwrap()
    }

    fn spawn(manager: &mut Manager, components: Vec<Component>) -> EntityId {
        let mut entity = manager.create_entity();
        for component in components {
            entity.add_component(component);
        }
        let id = entity.id();
        manager.add_entity(entity);
        id
    }

    fn expected_members(manager: &Manager, mask: ComponentMask) -> BTreeSet<EntityId> {
        manager
            .entities()
            .filter(|entity| entity.has_all(mask))
            .map(Entity::id)
            .collect()
    }

    #[test]
    fn test_admission_filters_by_mask() {
        let mut manager = manager();
        let (recorder, _) = Recorder::new("recorder", ComponentMask::TRANSFORM);
        let system = manager.add_system(recorder);

        let x = spawn(&mut manager, vec![TransformComponent::default().into()]);
        let _y = spawn(&mut manager, vec![VelocityComponent::default().into()]);
        manager.update(FRAME);

        let active: Vec<_> = manager.active_entities(system).unwrap().iter().copied().collect();
        assert_eq!(active, vec![x]);
    }

    #[test]
    fn test_add_is_deferred_until_update() {
        let mut manager = manager();
        let id = spawn(&mut manager, vec![TransformComponent::default().into()]);

        assert!(manager.entity(id).is_none());
        assert_eq!(manager.pending_count(), 1);

        manager.update(FRAME);
        assert!(manager.entity(id).unwrap().is_active());
        assert_eq!(manager.changed().get(&id), Some(&ChangeKind::Add));
    }

    #[test]
    fn test_systems_see_admitted_entities_same_frame() {
        let mut manager = manager();
        let (recorder, seen) = Recorder::new("recorder", ComponentMask::empty());
        manager.add_system(recorder);

        let id = spawn(&mut manager, vec![]);
        manager.update(FRAME);

        assert_eq!(seen.borrow()[0], vec![id]);
    }

    #[test]
    fn test_admit_and_remove_same_frame_leaves_no_entry() {
        let mut manager = manager();
        let z = spawn(&mut manager, vec![TransformComponent::default().into()]);
        manager.remove_entity(z);
        manager.update(FRAME);

        assert!(manager.changed().get(&z).is_none());
        assert!(manager.entity(z).is_none());
    }

    #[test]
    fn test_live_entity_removed_reports_remove() {
        let mut manager = manager();
        let id = spawn(&mut manager, vec![TransformComponent::default().into()]);
        manager.update(FRAME);

        manager.mark_modified(id);
        manager.remove_entity(id);
        manager.update(FRAME);

        assert_eq!(manager.changed().get(&id), Some(&ChangeKind::Remove));
    }

    #[test]
    fn test_modify_never_overrides_add() {
        let mut manager = manager();
        manager.add_system(Toucher);
        let id = spawn(&mut manager, vec![]);
        manager.update(FRAME);

        assert_eq!(manager.changed().get(&id), Some(&ChangeKind::Add));

        manager.update(FRAME);
        assert_eq!(manager.changed().get(&id), Some(&ChangeKind::Modify));
    }

    #[test]
    fn test_feed_is_cleared_by_take_and_by_update() {
        let mut manager = manager();
        let id = spawn(&mut manager, vec![]);
        manager.update(FRAME);

        let feed = manager.take_changed();
        assert_eq!(feed.get(&id), Some(&ChangeKind::Add));
        assert!(manager.changed().is_empty());

        manager.update(FRAME);
        assert!(manager.changed().is_empty());
    }

    #[test]
    fn test_modify_between_frames_reaches_next_feed() {
        let mut manager = manager();
        let id = spawn(&mut manager, vec![]);
        manager.update(FRAME);
        manager.take_changed();

        manager.modify_entity(id, |entity| entity.add_component(VelocityComponent::default()));
        manager.mark_modified(id);
        assert!(manager.changed().is_empty());

        manager.update(FRAME);
        assert_eq!(manager.changed().get(&id), Some(&ChangeKind::Modify));

        manager.update(FRAME);
        assert!(manager.changed().is_empty());
    }

    #[test]
    fn test_modify_between_frames_yields_to_remove() {
        let mut manager = manager();
        let id = spawn(&mut manager, vec![]);
        manager.update(FRAME);

        manager.mark_modified(id);
        manager.remove_entity(id);
        manager.update(FRAME);
        assert_eq!(manager.changed().get(&id), Some(&ChangeKind::Remove));

        manager.mark_modified(id);
        manager.update(FRAME);
        assert!(manager.changed().is_empty());
    }

    #[test]
    fn test_stopped_manager_keeps_structural_changes() {
        let mut manager = manager();
        let (recorder, seen) = Recorder::new("all", ComponentMask::empty());
        manager.add_system(recorder);
        manager.set_playing(false);
        assert!(!manager.is_playing());

        let id = spawn(&mut manager, vec![]);
        manager.update(FRAME);
        assert!(seen.borrow().is_empty());
        assert_eq!(manager.changed().get(&id), Some(&ChangeKind::Add));

        manager.set_playing(true);
        manager.update(FRAME);
        assert_eq!(*seen.borrow(), vec![vec![id]]);
    }

    #[test]
    fn test_unknown_removal_is_noop() {
        let mut manager = manager();
        manager.remove_entity(EntityId::new(42));
        manager.update(FRAME);
        assert!(manager.changed().is_empty());
    }

    #[test]
    fn test_mask_change_inside_system_updates_membership() {
        let mut manager = manager();
        let brake = manager.add_system(Brake);
        let (recorder, seen) = Recorder::new("movers", ComponentMask::VELOCITY);
        manager.add_system(recorder);

        let id = spawn(
            &mut manager,
            vec![TransformComponent::default().into(), VelocityComponent::default().into()],
        );
        manager.update(FRAME);

        // `Brake` ran first, so the recorder no longer matched it
        assert!(seen.borrow()[0].is_empty());
        assert!(manager.active_entities(brake).unwrap().is_empty());
        assert!(!manager.entity(id).unwrap().has_component(ComponentKind::Velocity));
    }

    #[test]
    fn test_late_system_sees_existing_entities() {
        let mut manager = manager();
        let id = spawn(&mut manager, vec![TransformComponent::default().into()]);
        manager.update(FRAME);

        let (recorder, _) = Recorder::new("late", ComponentMask::TRANSFORM);
        let system = manager.add_system(recorder);
        assert!(manager.active_entities(system).unwrap().contains(&id));
    }

    #[test]
    fn test_remove_system() {
        let mut manager = manager();
        let (recorder, seen) = Recorder::new("recorder", ComponentMask::empty());
        let system = manager.add_system(recorder);

        let removed = manager.remove_system(system).unwrap();
        assert_eq!(removed.name(), "recorder");
        assert!(manager.remove_system(system).is_none());

        manager.update(FRAME);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_events_reach_systems_once_and_emitted_drain() {
        struct Echo;

        impl System for Echo {
            fn name(&self) -> &str {
                "echo"
            }

            fn required_mask(&self) -> ComponentMask {
                ComponentMask::empty()
            }

            fn update(&mut self, ctx: &mut SystemContext<'_>, _elapsed: Duration) {
                let events = ctx.events().to_vec();
                for event in events {
                    ctx.emit(event);
                }
            }
        }

        let mut manager = manager();
        manager.add_system(Echo);
        manager.push_event(GameEvent::Navigate(Navigation::Pause));
        manager.update(FRAME);

        assert_eq!(manager.drain_emitted(), vec![GameEvent::Navigate(Navigation::Pause)]);

        manager.update(FRAME);
        assert!(manager.drain_emitted().is_empty());
    }

    #[test]
    fn test_removal_purges_spatial_index() {
        let mut manager = manager();
        let id = spawn(&mut manager, vec![TransformComponent::default().into()]);
        manager.update(FRAME);

        let bounds = manager.entity(id).unwrap().component::<TransformComponent>().bounds();
        manager.spatial_mut().add(id, bounds);
        manager.remove_entity(id);
        manager.update(FRAME);

        assert!(!manager.spatial().contains(id));
    }

    #[test]
    fn test_clear_keeps_systems() {
        let mut manager = manager();
        let (recorder, _) = Recorder::new("recorder", ComponentMask::empty());
        let system = manager.add_system(recorder);
        spawn(&mut manager, vec![]);
        manager.update(FRAME);
        spawn(&mut manager, vec![]);

        manager.clear();
        assert_eq!(manager.entity_count(), 0);
        assert_eq!(manager.pending_count(), 0);
        assert!(manager.changed().is_empty());
        assert!(manager.active_entities(system).unwrap().is_empty());
        assert_eq!(manager.system_count(), 1);
    }

    #[test]
    fn test_membership_matches_live_set_under_random_operations() {
        let masks = [
            ComponentMask::TRANSFORM,
            ComponentMask::TRANSFORM | ComponentMask::VELOCITY,
            ComponentMask::ALLEGIANCE,
            ComponentMask::empty(),
        ];
        let mut manager = manager();
        let systems: Vec<SystemId> = masks
            .iter()
            .map(|&mask| manager.add_system(Recorder::new("recorder", mask).0))
            .collect();
        let mut rng = StdRng::seed_from_u64(0xec5);
        let mut known = Vec::new();

        for _ in 0..200 {
            match rng.gen_range(0..4) {
                0 => {
                    let mut components: Vec<Component> = Vec::new();
                    if rng.gen_bool(0.6) {
                        components.push(TransformComponent::default().into());
                    }
                    if rng.gen_bool(0.5) {
                        components.push(VelocityComponent::default().into());
                    }
                    if rng.gen_bool(0.3) {
                        components.push(AllegianceComponent::new(Allegiance::Player2).into());
                    }
                    known.push(spawn(&mut manager, components));
                }
                1 if !known.is_empty() => {
                    let id = known[rng.gen_range(0..known.len())];
                    manager.remove_entity(id);
                }
                2 if !known.is_empty() => {
                    let id = known[rng.gen_range(0..known.len())];
                    let toggle = rng.gen_bool(0.5);
                    manager.modify_entity(id, |entity| {
                        if toggle {
                            entity.remove_component(ComponentKind::Transform);
                        } else {
                            entity.add_component(VelocityComponent::default());
                        }
                    });
                }
                _ => manager.update(FRAME),
            }

            for (system, mask) in systems.iter().zip(masks) {
                assert_eq!(
                    manager.active_entities(*system).unwrap(),
                    &expected_members(&manager, mask)
                );
            }
        }
    }
}
