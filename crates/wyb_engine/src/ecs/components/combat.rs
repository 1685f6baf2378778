//! Team and weapon components
//!
//! Weapons are entities of their own; wielder and weapon point at each other
//! through entity ids.

use crate::ecs::EntityId;

/// Owning team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Allegiance {
    /// First player
    Player1,
    /// Second player
    Player2,
}

/// Team membership
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllegianceComponent {
    /// Team that owns the entity
    pub owner: Allegiance,
}

impl AllegianceComponent {
    /// Create an allegiance component
    pub const fn new(owner: Allegiance) -> Self {
        Self { owner }
    }

    /// Check if two entities are on opposing teams
    pub fn is_hostile_to(&self, other: &Self) -> bool {
        self.owner != other.owner
    }
}

/// Weapon families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponKind {
    /// Melee swing anchored to the wielder
    Sword,
    /// Projectile released from the wielder
    Thrown,
}

/// Weapon holder with attack cooldowns
#[derive(Debug, Clone, PartialEq)]
pub struct WielderComponent {
    /// Weapon family this entity attacks with
    pub weapon_kind: WeaponKind,

    /// Weapon entity currently out, if any
    pub weapon: Option<EntityId>,

    /// Seconds between swings
    pub attack_interval: f32,

    /// Seconds between throws
    pub throw_interval: f32,

    attack_cooldown: f32,
    throw_cooldown: f32,
}

impl WielderComponent {
    /// Create a wielder with ready weapons
    pub const fn new(weapon_kind: WeaponKind, attack_interval: f32, throw_interval: f32) -> Self {
        Self {
            weapon_kind,
            weapon: None,
            attack_interval,
            throw_interval,
            attack_cooldown: 0.0,
            throw_cooldown: 0.0,
        }
    }

    /// Check if a weapon entity is out
    pub const fn has_weapon(&self) -> bool {
        self.weapon.is_some()
    }

    /// Record the weapon entity spawned for a swing
    pub fn equip(&mut self, weapon: EntityId) {
        self.weapon = Some(weapon);
    }

    /// Forget the weapon entity, returning it for removal
    pub fn unequip(&mut self) -> Option<EntityId> {
        self.weapon.take()
    }

    /// Check if a swing is allowed
    pub fn can_attack(&self) -> bool {
        self.attack_cooldown <= 0.0
    }

    /// Check if a throw is allowed
    pub fn can_throw(&self) -> bool {
        self.throw_cooldown <= 0.0
    }

    /// Start the swing cooldown
    pub fn start_attack_cooldown(&mut self) {
        self.attack_cooldown = self.attack_interval;
    }

    /// Start the throw cooldown
    pub fn start_throw_cooldown(&mut self) {
        self.throw_cooldown = self.throw_interval;
    }

    /// Advance both cooldowns
    pub fn tick(&mut self, seconds: f32) {
        self.attack_cooldown = (self.attack_cooldown - seconds).max(0.0);
        self.throw_cooldown = (self.throw_cooldown - seconds).max(0.0);
    }
}

/// Active weapon entity
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponComponent {
    /// Entity swinging or having thrown this weapon
    pub wielder: Option<EntityId>,

    /// Arc covered so far, in radians
    pub arc: f32,

    /// Arc at which the swing ends
    pub max_arc: f32,
}

impl WeaponComponent {
    /// Create a weapon attached to a wielder
    pub const fn new(wielder: Option<EntityId>, max_arc: f32) -> Self {
        Self { wielder, arc: 0.0, max_arc }
    }

    /// Check if the swing has run its course
    pub fn is_finished(&self) -> bool {
        self.arc >= self.max_arc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldowns() {
        let mut wielder = WielderComponent::new(WeaponKind::Sword, 0.5, 2.0);
        assert!(wielder.can_attack());

        wielder.start_attack_cooldown();
        wielder.start_throw_cooldown();
        wielder.tick(0.6);
        assert!(wielder.can_attack());
        assert!(!wielder.can_throw());

        wielder.tick(2.0);
        assert!(wielder.can_throw());
    }

    #[test]
    fn test_equip_and_hostility() {
        let mut wielder = WielderComponent::new(WeaponKind::Sword, 0.5, 2.0);
        wielder.equip(EntityId::new(7));
        assert!(wielder.has_weapon());
        assert_eq!(wielder.unequip(), Some(EntityId::new(7)));
        assert!(!wielder.has_weapon());

        let p1 = AllegianceComponent::new(Allegiance::Player1);
        let p2 = AllegianceComponent::new(Allegiance::Player2);
        assert!(p1.is_hostile_to(&p2));
        assert!(!p1.is_hostile_to(&p1));
    }
}
