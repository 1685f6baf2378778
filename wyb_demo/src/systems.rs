//! Toy gameplay systems for the headless demo

use std::time::Duration;
use wyb_engine::foundation::math::{angle_to_vector, closest_point, vector_to_angle};
use wyb_engine::prelude::*;

/// Re-emits the navigation requests its world understands
pub struct NavigationSystem {
    accepts: Vec<Navigation>,
}

impl NavigationSystem {
    pub fn new(accepts: &[Navigation]) -> Self {
        Self { accepts: accepts.to_vec() }
    }
}

impl System for NavigationSystem {
    fn name(&self) -> &str {
        "navigation"
    }

    fn required_mask(&self) -> ComponentMask {
        ComponentMask::empty()
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _elapsed: Duration) {
        let accepted: Vec<Navigation> = ctx
            .events()
            .iter()
            .filter_map(|event| match event {
                GameEvent::Navigate(navigation) if self.accepts.contains(navigation) => Some(*navigation),
                _ => None,
            })
            .collect();
        for navigation in accepted {
            ctx.emit(GameEvent::Navigate(navigation));
        }
    }
}

/// Turns avatar input events into velocity and facing
pub struct InputSystem {
    pub speed: f32,
}

impl System for InputSystem {
    fn name(&self) -> &str {
        "input"
    }

    fn required_mask(&self) -> ComponentMask {
        ComponentMask::PLAYER_INPUT | ComponentMask::VELOCITY | ComponentMask::TRANSFORM
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _elapsed: Duration) {
        // Last input of the frame wins
        let Some(input) = ctx.events().iter().rev().find_map(|event| match event {
            GameEvent::Avatar(input) => Some(input.clone()),
            GameEvent::Navigate(_) => None,
        }) else {
            return;
        };

        for &id in ctx.active_entities() {
            let Some(entity) = ctx.entity_mut(id) else {
                continue;
            };
            let state = entity.component_mut::<PlayerInputComponent>();
            state.movement = Vec2::new(f32::from(input.x_input), f32::from(input.y_input));
            state.look_target = input.mouse;
            state.swing |= input.swing;
            state.throw |= input.throw;
            let movement = state.movement;

            entity
                .component_mut::<VelocityComponent>()
                .set_velocity(movement * self.speed);

            let transform = entity.component_mut::<TransformComponent>();
            let facing = input.mouse - transform.center();
            if facing.norm_squared() > f32::EPSILON {
                transform.look_angle = vector_to_angle(facing);
            }
            ctx.mark_modified(id);
        }
    }
}

/// Integrates velocity into position, dragging colliders along
pub struct MovementSystem;

impl System for MovementSystem {
    fn name(&self) -> &str {
        "movement"
    }

    fn required_mask(&self) -> ComponentMask {
        ComponentMask::TRANSFORM | ComponentMask::VELOCITY
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, elapsed: Duration) {
        for &id in ctx.active_entities() {
            let Some(entity) = ctx.entity_mut(id) else {
                continue;
            };
            let velocity = entity.component::<VelocityComponent>();
            if !velocity.is_moving() {
                continue;
            }
            let step = velocity.displacement(elapsed);
            let transform = entity.component_mut::<TransformComponent>();
            transform.translate(step);
            let position = transform.position;
            if let Some(collider) = entity.get_mut::<ColliderComponent>() {
                collider.move_to(position);
            }
            ctx.mark_modified(id);
        }
    }
}

/// Keeps the quadtree in step with transforms; must run before any system
/// that queries it
pub struct SpatialSystem;

impl System for SpatialSystem {
    fn name(&self) -> &str {
        "spatial"
    }

    fn required_mask(&self) -> ComponentMask {
        ComponentMask::TRANSFORM
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _elapsed: Duration) {
        for &id in ctx.active_entities() {
            let Some(bounds) = ctx
                .entity(id)
                .map(|entity| entity.component::<TransformComponent>().bounds())
            else {
                continue;
            };
            ctx.spatial_mut().update(id, bounds);
        }
    }
}

/// Casts a fan of rays from each viewer and stores the resulting polygon
pub struct VisionSystem {
    /// Rays per field, spread over the view cone
    pub rays: usize,
    /// Full view cone in radians
    pub cone: f32,
}

impl VisionSystem {
    fn cast(&self, ctx: &SystemContext<'_>, viewer: EntityId) -> Option<Vec<Vec2>> {
        let entity = ctx.entity(viewer)?;
        let transform = entity.component::<TransformComponent>();
        let range = entity.component::<VisionComponent>().range;
        let origin = transform.center();

        let mut field = vec![origin];
        for ray in 0..self.rays {
            let t = ray as f32 / (self.rays.max(2) - 1) as f32;
            let angle = transform.look_angle - self.cone / 2.0 + self.cone * t;
            let end = origin + angle_to_vector(angle) * range;

            let blockers: Vec<Vec2> = ctx
                .spatial()
                .intersects(&Line::new(origin, end))
                .into_iter()
                .filter(|&hit| hit != viewer)
                .filter_map(|hit| ctx.entity(hit))
                .filter(|hit| hit.has_component(ComponentKind::Collider))
                .map(|hit| hit.component::<TransformComponent>().center())
                .collect();

            let reach = closest_point(origin, &blockers)
                .map_or(range, |blocker| (blocker - origin).norm().min(range));
            field.push(origin + angle_to_vector(angle) * reach);
        }
        Some(field)
    }
}

impl System for VisionSystem {
    fn name(&self) -> &str {
        "vision"
    }

    fn required_mask(&self) -> ComponentMask {
        ComponentMask::TRANSFORM | ComponentMask::VISION
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _elapsed: Duration) {
        for &id in ctx.active_entities() {
            let Some(field) = self.cast(ctx, id) else {
                continue;
            };
            if let Some(entity) = ctx.entity_mut(id) {
                entity.component_mut::<VisionComponent>().field = field;
            }
        }
    }
}

/// Owns the level singleton and ends the round when its clock runs out
pub struct LevelSystem {
    round: Duration,
}

impl LevelSystem {
    pub const fn new(round: Duration) -> Self {
        Self { round }
    }
}

impl System for LevelSystem {
    fn name(&self) -> &str {
        "level"
    }

    fn required_mask(&self) -> ComponentMask {
        ComponentMask::LEVEL
    }

    fn initialize(&mut self, ctx: &mut SystemContext<'_>) {
        let mut level = ctx.create_entity();
        level.add_component(LevelComponent {
            time_left: self.round.as_secs_f32(),
            ..LevelComponent::default()
        });
        log::debug!("Created level entity {}", level.id());
        ctx.add_entity(level);
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, elapsed: Duration) {
        let mut expired = false;
        for &id in ctx.active_entities() {
            let Some(entity) = ctx.entity_mut(id) else {
                continue;
            };
            let level = entity.component_mut::<LevelComponent>();
            if level.time_left <= 0.0 {
                continue;
            }
            level.time_left -= elapsed.as_secs_f32();
            if level.time_left <= 0.0 {
                log::info!("Round over on level {:?}", level.current);
                expired = true;
            }
        }
        if expired {
            ctx.emit(GameEvent::Navigate(Navigation::Exit));
        }
    }
}
