//! Headless demo
//!
//! Builds the menu and game worlds, replays a scripted session (open the
//! connect screen and time out, start a game, move around, pause, resume,
//! quit to the menu, quit) and logs each world's change feed per frame.
//!
//! Usage: `headless_demo [config.toml|config.ron]`

mod systems;

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Duration;
use systems::{InputSystem, LevelSystem, MovementSystem, NavigationSystem, SpatialSystem, VisionSystem};
use wyb_engine::foundation::logging;
use wyb_engine::prelude::*;

const STEP: Duration = Duration::from_millis(16);
const MAX_FRAMES: u64 = 600;
const WALL_COUNT: usize = 12;
/// The headless demo has no server, so the connect screen always gives up
const CONNECT_TIMEOUT: Duration = Duration::from_millis(250);

/// Gameplay policy: what each emitted navigation request does
#[derive(Default)]
struct DemoApp {
    drawn_frames: u64,
}

impl DemoApp {
    fn register(engine: &mut Engine) -> Result<(), AppError> {
        let config = engine.config().manager.clone();

        let menus = [
            (
                WorldKind::MainMenu,
                WorldFlags::EXCLUSIVE,
                vec![Navigation::StartSingle, Navigation::StartMulti, Navigation::Exit],
            ),
            (WorldKind::ConnectMenu, WorldFlags::EXCLUSIVE, vec![Navigation::Exit]),
            (WorldKind::PauseMenu, WorldFlags::OVERLAY, vec![Navigation::Resume, Navigation::Exit]),
        ];
        for (kind, flags, accepts) in menus {
            let config = config.clone();
            let world = World::from_factory(
                kind,
                flags,
                Box::new(move || {
                    let mut manager = Manager::new(&config)?;
                    manager.add_system(NavigationSystem::new(&accepts));
                    Ok(manager)
                }),
            )?;
            engine.stack.insert(world);
        }

        let game = World::from_factory(
            WorldKind::InGame,
            WorldFlags::EXCLUSIVE,
            Box::new(move || build_game(&config)),
        )?;
        engine.stack.insert(game);
        Ok(())
    }
}

impl Application for DemoApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        Self::register(engine)?;
        engine.stack.push(WorldKind::MainMenu)?;
        Ok(())
    }

    fn on_event(
        &mut self,
        stack: &mut WorldStack,
        source: WorldKind,
        event: GameEvent,
    ) -> Result<(), AppError> {
        let GameEvent::Navigate(navigation) = event else {
            return Ok(());
        };

        match (source, navigation) {
            (WorldKind::MainMenu, Navigation::StartSingle) => {
                stack.reset(WorldKind::InGame)?;
                stack.push(WorldKind::InGame)?;
            }
            (WorldKind::MainMenu, Navigation::StartMulti) => {
                stack.push(WorldKind::ConnectMenu)?;
                stack.dispatch_after(CONNECT_TIMEOUT, GameEvent::Navigate(Navigation::Exit));
            }
            (WorldKind::InGame, Navigation::Pause) => stack.push(WorldKind::PauseMenu)?,
            (WorldKind::PauseMenu, Navigation::Resume) | (WorldKind::ConnectMenu, Navigation::Exit) => {
                stack.pop();
            }
            (WorldKind::PauseMenu | WorldKind::InGame, Navigation::Exit) => {
                // Back to the main menu with a fresh game for next time
                while stack.top().is_some_and(|top| top != WorldKind::MainMenu) {
                    stack.pop();
                }
                stack.reset(WorldKind::InGame)?;
            }
            (WorldKind::MainMenu, Navigation::Exit) => {
                stack.pop();
            }
            (source, navigation) => {
                log::warn!("{:?} has no handler for {:?}", source, navigation);
            }
        }
        Ok(())
    }

    fn draw(&mut self, stack: &WorldStack, worlds: &[WorldKind]) {
        self.drawn_frames += 1;
        for kind in worlds {
            if let Some(world) = stack.world(*kind) {
                log::trace!("Drawing {:?}: {} entities", kind, world.manager.entity_count());
            }
        }
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        log::info!(
            "Demo finished after {} frames ({} drawn)",
            engine.frame_count(),
            self.drawn_frames
        );
    }
}

/// Avatar surrounded by random walls, plus the level singleton
fn build_game(config: &ManagerConfig) -> Result<Manager, SpatialError> {
    let mut manager = Manager::new(config)?;
    manager.add_system(NavigationSystem::new(&[Navigation::Pause]));
    manager.add_system(LevelSystem::new(Duration::from_secs(300)));
    manager.add_system(InputSystem { speed: 120.0 });
    manager.add_system(MovementSystem);
    manager.add_system(SpatialSystem);
    manager.add_system(VisionSystem { rays: 9, cone: std::f32::consts::FRAC_PI_2 });

    let arena = config.spatial.bounds;
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..WALL_COUNT {
        let rect = Rect::new(
            rng.gen_range(arena.left()..arena.right() - 40.0),
            rng.gen_range(arena.top()..arena.bottom() - 40.0),
            40.0,
            40.0,
        );
        let mut wall = manager.create_entity();
        wall.add_component(TransformComponent::from_rect(rect));
        wall.add_component(ColliderComponent::new(rect, false));
        if manager.has_graphics() {
            wall.add_component(GraphicsComponent::new(1, 0.0));
        }
        manager.add_entity(wall);
    }

    let footprint = Rect::from_center(arena.center(), 16.0, 16.0);
    let mut avatar = manager.create_entity();
    avatar.add_component(TransformComponent::from_rect(footprint));
    avatar.add_component(VelocityComponent::default().with_max_speed(200.0));
    avatar.add_component(ColliderComponent::new(footprint, true));
    avatar.add_component(PlayerInputComponent::default());
    avatar.add_component(VisionComponent::new(300.0));
    avatar.add_component(AllegianceComponent::new(Allegiance::Player1));
    if manager.has_graphics() {
        avatar.add_component(GraphicsComponent::new(2, 1.0));
    }
    manager.add_entity(avatar);

    Ok(manager)
}

/// Inbound events keyed by the frame they are dispatched on
fn script() -> Vec<(u64, GameEvent)> {
    let mut events = vec![
        (1, GameEvent::Navigate(Navigation::StartMulti)),
        (20, GameEvent::Navigate(Navigation::StartSingle)),
        (45, GameEvent::Navigate(Navigation::Pause)),
        (55, GameEvent::Navigate(Navigation::Resume)),
        (90, GameEvent::Navigate(Navigation::Pause)),
        (95, GameEvent::Navigate(Navigation::Exit)),
        (100, GameEvent::Navigate(Navigation::Exit)),
    ];

    let mut rng = StdRng::seed_from_u64(42);
    for frame in 22..90 {
        events.push((
            frame,
            GameEvent::Avatar(AvatarInput {
                x_input: rng.gen_range(-1..=1),
                y_input: rng.gen_range(-1..=1),
                mouse: Vec2::new(rng.gen_range(0.0..1280.0), rng.gen_range(0.0..720.0)),
                swing: false,
                throw: false,
            }),
        ));
    }
    events
}

/// Drain and log the change feed of every world updated this frame
fn log_changes(stack: &mut WorldStack, frame: u64, updated: &[WorldKind]) {
    for kind in updated {
        let Some(world) = stack.world_mut(*kind) else {
            continue;
        };
        let feed = world.manager.take_changed();
        if feed.is_empty() {
            continue;
        }
        let count = |wanted: ChangeKind| feed.values().filter(|&&change| change == wanted).count();
        log::info!(
            "Frame {} {:?}: {} added, {} removed, {} modified",
            frame,
            kind,
            count(ChangeKind::Add),
            count(ChangeKind::Remove),
            count(ChangeKind::Modify)
        );
        for (id, change) in &feed {
            log::debug!("  {} {:?}", id, change);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_from_file(&path)?,
        None => EngineConfig::default(),
    };
    logging::init_with_filter(&config.logging.filter);

    let mut engine = Engine::new(config)?;
    let mut app = DemoApp::default();
    app.initialize(&mut engine)?;

    let script = script();
    while engine.is_running() && engine.frame_count() < MAX_FRAMES {
        let frame = engine.frame_count();
        for (_, event) in script.iter().filter(|(at, _)| *at == frame) {
            engine.stack.dispatch(event.clone());
        }

        let report = engine.frame(&mut app, STEP)?;
        log_changes(&mut engine.stack, frame, &report.updated);
    }

    app.cleanup(&mut engine);
    Ok(())
}
