//! Entity implementation
//!
//! An entity is a container of at most one component per kind. Its mask is
//! derived state: only [`Entity::add_component`] and
//! [`Entity::remove_component`] touch it, so it always equals the OR of the
//! kinds present.

use super::component::{Component, ComponentKind, ComponentMask, ComponentType};
use std::collections::HashMap;
use std::fmt;

/// Entity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Create an id from its raw value
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out entity ids that stay unique for the allocator's lifetime
#[derive(Debug, Default)]
pub struct EntityIdAllocator {
    next: u32,
}

impl EntityIdAllocator {
    /// Create an allocator starting at id 0
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocate the next id
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

/// Game object: a kind-keyed set of components
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    mask: ComponentMask,
    components: HashMap<ComponentKind, Component>,
    active: bool,
}

impl Entity {
    /// Create an empty, inactive entity
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            mask: ComponentMask::empty(),
            components: HashMap::new(),
            active: false,
        }
    }

    /// Create an entity holding the given components.
    ///
    /// Later components of an already present kind are dropped, exactly as
    /// repeated [`add_component`](Self::add_component) calls would.
    pub fn with<I, C>(id: EntityId, components: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Component>,
    {
        let mut entity = Self::new(id);
        for component in components {
            entity.add_component(component);
        }
        entity
    }

    /// Get the entity id
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// OR of the kinds currently present
    pub const fn mask(&self) -> ComponentMask {
        self.mask
    }

    /// Whether the manager has admitted this entity into its live set
    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Attach a component.
    ///
    /// No-op returning `false` if a component of the same kind is already
    /// present; the existing component is kept untouched.
    pub fn add_component(&mut self, component: impl Into<Component>) -> bool {
        let mut component = component.into();
        let kind = component.kind();
        if self.has_component(kind) {
            return false;
        }
        component.attach(self.id);
        self.components.insert(kind, component);
        self.mask.insert(kind.mask());
        true
    }

    /// Detach the component of a kind, returning it with its owner cleared.
    ///
    /// No-op returning `None` if the kind is absent.
    pub fn remove_component(&mut self, kind: ComponentKind) -> Option<Component> {
        let mut component = self.components.remove(&kind)?;
        component.detach();
        self.mask.remove(kind.mask());
        Some(component)
    }

    /// O(1) mask test for a single kind
    pub const fn has_component(&self, kind: ComponentKind) -> bool {
        self.mask.contains(kind.mask())
    }

    /// Check if every kind of `required` is present
    pub const fn has_all(&self, required: ComponentMask) -> bool {
        self.mask.contains(required)
    }

    /// Tagged component of a kind
    pub fn component_of(&self, kind: ComponentKind) -> Option<&Component> {
        self.components.get(&kind)
    }

    /// Typed payload, `None` if the kind is absent
    pub fn get<T: ComponentType>(&self) -> Option<&T> {
        self.components.get(&T::KIND).and_then(|component| component.get::<T>())
    }

    /// Mutable typed payload, `None` if the kind is absent
    pub fn get_mut<T: ComponentType>(&mut self) -> Option<&mut T> {
        self.components.get_mut(&T::KIND).and_then(|component| component.get_mut::<T>())
    }

    /// Typed payload of a kind the caller knows is present.
    ///
    /// # Panics
    ///
    /// Panics if the kind is absent. Systems may rely on their required mask
    /// instead of checking first.
    pub fn component<T: ComponentType>(&self) -> &T {
        match self.get::<T>() {
            Some(payload) => payload,
            None => panic!("entity {} has no {:?} component", self.id, T::KIND),
        }
    }

    /// Mutable typed payload of a kind the caller knows is present.
    ///
    /// # Panics
    ///
    /// Panics if the kind is absent.
    pub fn component_mut<T: ComponentType>(&mut self) -> &mut T {
        let id = self.id;
        match self.get_mut::<T>() {
            Some(payload) => payload,
            None => panic!("entity {} has no {:?} component", id, T::KIND),
        }
    }

    /// Iterate over attached components, in no particular order
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{
        AllegianceComponent, Allegiance, ColliderComponent, TransformComponent, VelocityComponent,
    };
    use crate::foundation::math::{Rect, Vec2};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn component_for(kind: ComponentKind) -> Option<Component> {
        let component: Component = match kind {
            ComponentKind::Transform => TransformComponent::default().into(),
            ComponentKind::Velocity => VelocityComponent::default().into(),
            ComponentKind::Allegiance => AllegianceComponent::new(Allegiance::Player1).into(),
            ComponentKind::Collider => ColliderComponent::default().into(),
            _ => return None,
        };
        Some(component)
    }

    fn mask_of_present(entity: &Entity) -> ComponentMask {
        entity.components().map(Component::kind).collect()
    }

    #[test]
    fn test_transform_velocity_mask() {
        let entity = Entity::with(
            EntityId::new(1),
            [
                Component::from(TransformComponent::default()),
                Component::from(VelocityComponent::default()),
            ],
        );

        assert_eq!(entity.mask(), ComponentMask::TRANSFORM | ComponentMask::VELOCITY);
        assert!(entity.has_component(ComponentKind::Transform));
        assert!(!entity.has_component(ComponentKind::Allegiance));
        assert!(!entity.is_active());
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let mut entity = Entity::new(EntityId::new(3));
        let first = VelocityComponent::with_velocity(Vec2::new(1.0, 0.0));
        let second = VelocityComponent::with_velocity(Vec2::new(9.0, 9.0));

        assert!(entity.add_component(first.clone()));
        let mask_before = entity.mask();
        assert!(!entity.add_component(second));

        assert_eq!(entity.mask(), mask_before);
        assert_eq!(entity.component::<VelocityComponent>(), &first);
        assert_eq!(entity.component_count(), 1);
    }

    #[test]
    fn test_back_reference_set_and_cleared() {
        let mut entity = Entity::new(EntityId::new(5));
        entity.add_component(ColliderComponent::new(Rect::new(0.0, 0.0, 2.0, 2.0), true));

        let attached = entity.component_of(ComponentKind::Collider).unwrap();
        assert_eq!(attached.owner(), Some(EntityId::new(5)));

        let detached = entity.remove_component(ComponentKind::Collider).unwrap();
        assert_eq!(detached.owner(), None);
        assert!(entity.mask().is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut entity = Entity::with(EntityId::new(2), [TransformComponent::default()]);
        assert!(entity.remove_component(ComponentKind::Velocity).is_none());
        assert_eq!(entity.mask(), ComponentMask::TRANSFORM);
    }

    #[test]
    fn test_mask_tracks_random_add_remove_sequences() {
        let kinds = [
            ComponentKind::Transform,
            ComponentKind::Velocity,
            ComponentKind::Allegiance,
            ComponentKind::Collider,
        ];
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for round in 0..50 {
            let mut entity = Entity::new(EntityId::new(round));
            for _ in 0..40 {
                let kind = kinds[rng.gen_range(0..kinds.len())];
                if rng.gen_bool(0.5) {
                    entity.add_component(component_for(kind).unwrap());
                } else {
                    entity.remove_component(kind);
                }
                assert_eq!(entity.mask(), mask_of_present(&entity));
            }
        }
    }

    #[test]
    #[should_panic(expected = "has no Velocity component")]
    fn test_missing_component_panics() {
        let entity = Entity::new(EntityId::new(9));
        let _ = entity.component::<VelocityComponent>();
    }

    #[test]
    fn test_allocator_is_monotonic() {
        let mut ids = EntityIdAllocator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        assert!(a < b);
        assert_eq!(b.id(), 1);
    }
}
