//! Component registry: kinds, masks and the tagged component value
//!
//! Every component kind owns one bit of [`ComponentMask`]. The set of kinds
//! is closed; adding one means adding a line to the registry below.

use super::components::{
    AllegianceComponent, ColliderComponent, DebugComponent, GraphicsComponent, LevelComponent,
    PlayerInputComponent, SpawnComponent, TransformComponent, VelocityComponent,
    VisionComponent, WeaponComponent, WielderComponent,
};
use super::entity::EntityId;

/// Payload types that can be stored on an entity
pub trait ComponentType: Sized + 'static {
    /// The kind tag this payload is stored under
    const KIND: ComponentKind;

    /// Borrow the payload out of a tagged value of the matching kind
    fn from_data(data: &ComponentData) -> Option<&Self>;

    /// Mutably borrow the payload out of a tagged value of the matching kind
    fn from_data_mut(data: &mut ComponentData) -> Option<&mut Self>;
}

macro_rules! component_registry {
    ($( $(#[doc = $doc:literal])* $kind:ident / $flag:ident => $payload:ty ),+ $(,)?) => {
        /// Closed enumeration of component kinds
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ComponentKind {
            $( $(#[doc = $doc])* $kind, )+
        }

        impl ComponentKind {
            /// Every kind, in bit order
            pub const ALL: &'static [Self] = &[$( Self::$kind, )+];

            /// Number of registered kinds
            pub const COUNT: usize = Self::ALL.len();

            /// The single bit owned by this kind
            pub const fn mask(self) -> ComponentMask {
                ComponentMask::from_bits_retain(1 << self as u32)
            }
        }

        bitflags::bitflags! {
            /// Fixed-width bit-set over component kinds
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub struct ComponentMask: u32 {
                $( $(#[doc = $doc])* const $flag = 1 << (ComponentKind::$kind as u32); )+
            }
        }

        /// Tagged component value, one variant per kind
        #[derive(Debug, Clone, PartialEq)]
        pub enum ComponentData {
            $( $(#[doc = $doc])* $kind($payload), )+
        }

        impl ComponentData {
            /// Kind tag of this value
            pub const fn kind(&self) -> ComponentKind {
                match self {
                    $( Self::$kind(_) => ComponentKind::$kind, )+
                }
            }
        }

        $(
            impl ComponentType for $payload {
                const KIND: ComponentKind = ComponentKind::$kind;

                fn from_data(data: &ComponentData) -> Option<&Self> {
                    match data {
                        ComponentData::$kind(payload) => Some(payload),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }

                fn from_data_mut(data: &mut ComponentData) -> Option<&mut Self> {
                    match data {
                        ComponentData::$kind(payload) => Some(payload),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }

            impl From<$payload> for Component {
                fn from(payload: $payload) -> Self {
                    Self::new(ComponentData::$kind(payload))
                }
            }
        )+
    };
}

component_registry! {
    /// Position, size and facing
    Transform / TRANSFORM => TransformComponent,
    /// Linear motion
    Velocity / VELOCITY => VelocityComponent,
    /// Owning team
    Allegiance / ALLEGIANCE => AllegianceComponent,
    /// Axis-aligned collision box
    Collider / COLLIDER => ColliderComponent,
    /// Visual representation, skipped by headless managers
    Graphics / GRAPHICS => GraphicsComponent,
    /// Field of view
    Vision / VISION => VisionComponent,
    /// Avatar input state
    PlayerInput / PLAYER_INPUT => PlayerInputComponent,
    /// Weapon holder
    Wielder / WIELDER => WielderComponent,
    /// Active weapon swing or throw
    Weapon / WEAPON => WeaponComponent,
    /// Level bookkeeping
    Level / LEVEL => LevelComponent,
    /// Spawn point marker
    Spawn / SPAWN => SpawnComponent,
    /// Debug visualisation marker
    Debug / DEBUG => DebugComponent,
}

impl ComponentMask {
    /// Number of kinds the mask can represent
    pub const WIDTH: usize = u32::BITS as usize;
}

impl Default for ComponentMask {
    fn default() -> Self {
        Self::empty()
    }
}

// The registry must fit in the mask
const _: () = assert!(ComponentKind::COUNT <= ComponentMask::WIDTH);

impl From<ComponentKind> for ComponentMask {
    fn from(kind: ComponentKind) -> Self {
        kind.mask()
    }
}

impl FromIterator<ComponentKind> for ComponentMask {
    fn from_iter<I: IntoIterator<Item = ComponentKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |mask, kind| mask | kind.mask())
    }
}

/// A component value together with its back-reference to the owning entity.
///
/// The owner is a plain id, never a handle: entities own components, not the
/// reverse. It is set by [`Entity::add_component`](super::Entity::add_component)
/// and cleared by [`Entity::remove_component`](super::Entity::remove_component).
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    owner: Option<EntityId>,
    data: ComponentData,
}

impl Component {
    /// Wrap a tagged value, not yet attached to any entity
    pub const fn new(data: ComponentData) -> Self {
        Self { owner: None, data }
    }

    /// Kind tag
    pub const fn kind(&self) -> ComponentKind {
        self.data.kind()
    }

    /// Entity this component is attached to
    pub const fn owner(&self) -> Option<EntityId> {
        self.owner
    }

    pub(super) fn attach(&mut self, owner: EntityId) {
        self.owner = Some(owner);
    }

    pub(super) fn detach(&mut self) {
        self.owner = None;
    }

    /// Tagged value
    pub const fn data(&self) -> &ComponentData {
        &self.data
    }

    /// Mutable tagged value
    pub fn data_mut(&mut self) -> &mut ComponentData {
        &mut self.data
    }

    /// Typed payload, if this component is of kind `T::KIND`
    pub fn get<T: ComponentType>(&self) -> Option<&T> {
        T::from_data(&self.data)
    }

    /// Mutable typed payload
    pub fn get_mut<T: ComponentType>(&mut self) -> Option<&mut T> {
        T::from_data_mut(&mut self.data)
    }

    /// Unwrap into the tagged value
    pub fn into_data(self) -> ComponentData {
        self.data
    }
}

impl From<ComponentData> for Component {
    fn from(data: ComponentData) -> Self {
        Self::new(data)
    }
}
