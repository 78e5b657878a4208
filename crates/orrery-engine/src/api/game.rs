use crate::api::types::{EntityId, GameEvent};
use crate::assets::loader::AssetLoader;
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera3D;
use crate::renderer::controls::OrbitControls;
use crate::systems::lighting::LightState;
use crate::systems::overlay::Overlay;
use crate::systems::points::PointCloud;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Initial viewport width in CSS pixels (replaced by the first resize).
    pub viewport_width: f32,
    /// Initial viewport height in CSS pixels.
    pub viewport_height: f32,
    /// Maximum number of render instances (default: 256).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Maximum number of point lights (default: 8).
    pub max_lights: usize,
    /// Maximum number of backdrop points (default: 4096).
    pub max_points: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            max_instances: 256,
            max_events: 32,
            max_lights: 8,
            max_points: 4096,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure camera and lights.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The frame tick. Called exactly once per host frame; `ctx.frame_dt`
    /// holds the frame delta in seconds.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: Camera3D,
    pub controls: OrbitControls,
    pub assets: AssetLoader,
    pub lights: LightState,
    pub backdrop: PointCloud,
    pub overlay: Overlay,
    pub events: Vec<GameEvent>,
    /// Delta of the current host frame in seconds.
    pub frame_dt: f32,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    /// Create a context sized for the given configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::with_capacity(config.max_instances),
            camera: Camera3D::new(config.viewport_width, config.viewport_height),
            controls: OrbitControls::default(),
            assets: AssetLoader::new(),
            lights: LightState::with_capacity(config.max_lights),
            backdrop: PointCloud::default(),
            overlay: Overlay::default(),
            events: Vec::with_capacity(config.max_events),
            frame_dt: 0.0,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Viewport changed: update camera aspect. Passthrough, no game logic.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.set_viewport(width, height);
    }

    /// Clear per-frame transient data (events).
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
