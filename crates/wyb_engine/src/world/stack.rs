//! Navigation stack of worlds
//!
//! Worlds are registered once and stay owned by the stack; pushing and
//! popping only moves their kind on and off the navigation stack, so a
//! popped world keeps its manager until it is explicitly reset.

use super::{World, WorldError, WorldKind};
use crate::events::{EventQueue, GameEvent};
use std::collections::HashMap;
use std::time::Duration;

/// Outcome of one [`WorldStack::update`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Worlds updated this frame, bottom to top
    pub updated: Vec<WorldKind>,
    /// Events emitted by the systems of those worlds
    pub events: Vec<(WorldKind, GameEvent)>,
}

/// Registry of worlds plus the navigation stack over them
#[derive(Debug, Default)]
pub struct WorldStack {
    worlds: HashMap<WorldKind, World>,
    stack: Vec<WorldKind>,
    inbox: EventQueue<GameEvent>,
    clock: Duration,
}

impl WorldStack {
    /// Create an empty stack with no registered worlds
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a world, returning the one it replaces
    pub fn insert(&mut self, world: World) -> Option<World> {
        log::debug!("Registered world {:?}", world.kind());
        self.worlds.insert(world.kind(), world)
    }

    /// Put a registered world on top
    pub fn push(&mut self, kind: WorldKind) -> Result<(), WorldError> {
        if !self.worlds.contains_key(&kind) {
            return Err(WorldError::NotRegistered(kind));
        }
        if self.stack.contains(&kind) {
            return Err(WorldError::AlreadyOnStack(kind));
        }
        self.stack.push(kind);
        log::info!("Pushed world {:?} (depth {})", kind, self.stack.len());
        Ok(())
    }

    /// Take the top world off the stack, keeping its manager
    pub fn pop(&mut self) -> Option<WorldKind> {
        let kind = self.stack.pop()?;
        log::info!("Popped world {:?}, top is now {:?}", kind, self.top());
        Some(kind)
    }

    /// Active world
    pub fn top(&self) -> Option<WorldKind> {
        self.stack.last().copied()
    }

    /// Kinds on the stack, bottom to top
    pub fn stack(&self) -> &[WorldKind] {
        &self.stack
    }

    /// Check if a world is somewhere on the stack
    pub fn is_on_stack(&self, kind: WorldKind) -> bool {
        self.stack.contains(&kind)
    }

    /// Rebuild a registered world's manager
    pub fn reset(&mut self, kind: WorldKind) -> Result<(), WorldError> {
        self.worlds
            .get_mut(&kind)
            .ok_or(WorldError::NotRegistered(kind))?
            .reset()
    }

    /// Registered world by kind
    pub fn world(&self, kind: WorldKind) -> Option<&World> {
        self.worlds.get(&kind)
    }

    /// Mutable registered world by kind
    pub fn world_mut(&mut self, kind: WorldKind) -> Option<&mut World> {
        self.worlds.get_mut(&kind)
    }

    /// Worlds to update this frame, bottom to top
    pub fn update_set(&self) -> Vec<WorldKind> {
        self.collect_down(|world| world.flags.update_exclusive)
    }

    /// Worlds to draw this frame, bottom to top
    pub fn draw_set(&self) -> Vec<WorldKind> {
        self.collect_down(|world| world.flags.draw_exclusive)
    }

    /// Walk from the top, stopping after the first world that blocks
    fn collect_down(&self, blocks: impl Fn(&World) -> bool) -> Vec<WorldKind> {
        let mut set = Vec::new();
        for &kind in self.stack.iter().rev() {
            set.push(kind);
            if self.worlds.get(&kind).is_some_and(&blocks) {
                break;
            }
        }
        set.reverse();
        set
    }

    /// Queue an inbound event for the worlds updated next frame
    pub fn dispatch(&mut self, event: GameEvent) {
        self.inbox.send(event);
    }

    /// Queue an inbound event for the first frame at least `delay` of stack
    /// time from now
    pub fn dispatch_after(&mut self, delay: Duration, event: GameEvent) {
        self.inbox.post((self.clock + delay).as_secs_f64(), event);
    }

    /// Number of events still waiting on [`dispatch_after`](Self::dispatch_after)
    pub fn deferred_len(&self) -> usize {
        self.inbox.deferred_len()
    }

    /// Sum of the elapsed time of every update so far
    pub const fn clock(&self) -> Duration {
        self.clock
    }

    /// Route queued events to the update set, update its managers bottom to
    /// top and collect what their systems emitted
    pub fn update(&mut self, elapsed: Duration) -> FrameReport {
        self.clock += elapsed;
        self.inbox.dispatch_due(self.clock.as_secs_f64());

        let updated = self.update_set();
        let inbound = self.inbox.drain();
        if updated.is_empty() && !inbound.is_empty() {
            log::debug!("No world to update, dropping {} events", inbound.len());
        }

        let mut events = Vec::new();
        for &kind in &updated {
            let Some(world) = self.worlds.get_mut(&kind) else {
                continue;
            };
            for event in &inbound {
                world.manager.push_event(event.clone());
            }
            world.manager.update(elapsed);
            events.extend(world.manager.drain_emitted().into_iter().map(|event| (kind, event)));
        }

        FrameReport { updated, events }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ManagerConfig;
    use crate::ecs::{ComponentMask, Manager, System, SystemContext};
    use crate::events::{AvatarInput, Navigation};
    use crate::world::WorldFlags;

    const FRAME: Duration = Duration::from_millis(16);

    /// Emits one event per inbound event it sees
    struct Relay;

    impl System for Relay {
        fn name(&self) -> &str {
            "relay"
        }

        fn required_mask(&self) -> ComponentMask {
            ComponentMask::empty()
        }

        fn update(&mut self, ctx: &mut SystemContext<'_>, _elapsed: Duration) {
            let seen = ctx.events().len();
            for _ in 0..seen {
                ctx.emit(GameEvent::Navigate(Navigation::Exit));
            }
        }
    }

    fn world(kind: WorldKind, flags: WorldFlags) -> World {
        let mut manager = Manager::new(&ManagerConfig::headless()).unwrap();
        manager.add_system(Relay);
        World::new(kind, manager, flags)
    }

    fn stack() -> WorldStack {
        let mut stack = WorldStack::new();
        stack.insert(world(WorldKind::MainMenu, WorldFlags::EXCLUSIVE));
        stack.insert(world(WorldKind::InGame, WorldFlags::EXCLUSIVE));
        stack.insert(world(WorldKind::PauseMenu, WorldFlags::OVERLAY));
        stack.insert(world(WorldKind::ConnectMenu, WorldFlags::TRANSPARENT));
        stack
    }

    #[test]
    fn test_push_errors() {
        let mut stack = WorldStack::new();
        assert!(matches!(
            stack.push(WorldKind::InGame),
            Err(WorldError::NotRegistered(WorldKind::InGame))
        ));

        stack.insert(world(WorldKind::InGame, WorldFlags::EXCLUSIVE));
        stack.push(WorldKind::InGame).unwrap();
        assert!(matches!(
            stack.push(WorldKind::InGame),
            Err(WorldError::AlreadyOnStack(WorldKind::InGame))
        ));
        assert_eq!(stack.top(), Some(WorldKind::InGame));
    }

    #[test]
    fn test_overlay_freezes_but_shows_lower_world() {
        let mut stack = stack();
        stack.push(WorldKind::InGame).unwrap();
        stack.push(WorldKind::PauseMenu).unwrap();

        assert_eq!(stack.update_set(), vec![WorldKind::PauseMenu]);
        assert_eq!(stack.draw_set(), vec![WorldKind::InGame, WorldKind::PauseMenu]);
    }

    #[test]
    fn test_transparent_world_lets_everything_through_to_blocker() {
        let mut stack = stack();
        stack.push(WorldKind::MainMenu).unwrap();
        stack.push(WorldKind::InGame).unwrap();
        stack.push(WorldKind::ConnectMenu).unwrap();

        // InGame blocks, so MainMenu is excluded from both sets
        assert_eq!(stack.update_set(), vec![WorldKind::InGame, WorldKind::ConnectMenu]);
        assert_eq!(stack.draw_set(), vec![WorldKind::InGame, WorldKind::ConnectMenu]);
    }

    #[test]
    fn test_empty_stack_updates_nothing() {
        let mut stack = stack();
        stack.dispatch(GameEvent::Navigate(Navigation::Pause));
        let report = stack.update(FRAME);

        assert!(report.updated.is_empty());
        assert!(report.events.is_empty());
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_events_reach_only_the_update_set() {
        let mut stack = stack();
        stack.push(WorldKind::InGame).unwrap();
        stack.push(WorldKind::PauseMenu).unwrap();

        stack.dispatch(GameEvent::Avatar(AvatarInput::default()));
        let report = stack.update(FRAME);

        assert_eq!(report.updated, vec![WorldKind::PauseMenu]);
        assert_eq!(
            report.events,
            vec![(WorldKind::PauseMenu, GameEvent::Navigate(Navigation::Exit))]
        );

        // The queue is consumed by that frame
        let report = stack.update(FRAME);
        assert!(report.events.is_empty());
    }

    #[test]
    fn test_delayed_event_waits_for_stack_time() {
        let mut stack = stack();
        stack.push(WorldKind::ConnectMenu).unwrap();

        stack.dispatch_after(FRAME * 2, GameEvent::Avatar(AvatarInput::default()));
        assert_eq!(stack.deferred_len(), 1);

        assert!(stack.update(FRAME).events.is_empty());
        let report = stack.update(FRAME);
        assert_eq!(
            report.events,
            vec![(WorldKind::ConnectMenu, GameEvent::Navigate(Navigation::Exit))]
        );
        assert_eq!(stack.deferred_len(), 0);
        assert_eq!(stack.clock(), FRAME * 2);
    }

    #[test]
    fn test_pop_preserves_lower_world_state() {
        let mut stack = stack();
        stack.push(WorldKind::InGame).unwrap();
        {
            let manager = &mut stack.world_mut(WorldKind::InGame).unwrap().manager;
            for _ in 0..3 {
                let entity = manager.create_entity();
                manager.add_entity(entity);
            }
        }
        stack.update(FRAME);

        let snapshot = |stack: &WorldStack| {
            let manager = &stack.world(WorldKind::InGame).unwrap().manager;
            let ids: Vec<_> = manager.entities().map(|entity| entity.id()).collect();
            let members: Vec<_> = manager
                .system_ids()
                .map(|id| manager.active_entities(id).cloned())
                .collect();
            (ids, members)
        };
        let before = snapshot(&stack);

        stack.push(WorldKind::PauseMenu).unwrap();
        stack.update(FRAME);
        assert_eq!(stack.pop(), Some(WorldKind::PauseMenu));

        assert_eq!(snapshot(&stack), before);
        assert_eq!(stack.top(), Some(WorldKind::InGame));
    }

    #[test]
    fn test_reset_unknown_world() {
        let mut stack = WorldStack::new();
        assert!(matches!(
            stack.reset(WorldKind::InGameMulti),
            Err(WorldError::NotRegistered(WorldKind::InGameMulti))
        ));
    }
}
