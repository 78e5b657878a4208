/// Solar System: interactive 3D orrery.
///
/// Bodies are loaded one at a time from the host, fall back to styled
/// spheres, then circle the central star at a speed the host's sliders
/// control. Drag orbits the camera, scroll zooms, click focuses a body.

use glam::{Vec2, Vec3};
use orrery_engine::{
    Clock, Color, EngineContext, Game, GameConfig, GameEvent, InputEvent, InputQueue,
    OrbitControls, PointLight, Rng,
};

use crate::bodies::{Body, BodyKind, REGISTRY};
use crate::composer::SceneComposer;
use crate::motion::{self, SimulationState};
use crate::picking::FocusController;

// ── Scene ambience ───────────────────────────────────────────────────

const CAMERA_FOV: f32 = 90.0;
const CAMERA_NEAR: f32 = 0.5;
const CAMERA_FAR: f32 = 3000.0;
const CAMERA_START: Vec3 = Vec3::new(0.0, 100.0, 350.0);

const CONTROLS_DAMPING: f32 = 0.05;
const CONTROLS_MIN_DISTANCE: f32 = 60.0;
const CONTROLS_MAX_DISTANCE: f32 = 400.0;

const AMBIENT_COLOR: u32 = 0x404040;
const AMBIENT_INTENSITY: f32 = 0.5;
const SUN_LIGHT_INTENSITY: f32 = 1.5;
const SUN_LIGHT_RANGE: f32 = 300.0;

const STAR_COUNT: usize = 1000;
/// Half-edge of the starfield cube.
const STAR_EXTENT: f32 = 1500.0;
const STAR_SEED: u64 = 0x5EED_0F_57A5;

/// Pixels the pointer must travel before a press becomes a drag.
const DRAG_THRESHOLD: f32 = 5.0;

// ── Custom event kinds from the host ─────────────────────────────────

/// a = body index, b = percent (0..=100).
pub const CUSTOM_SET_SPEED: u32 = 1;
pub const CUSTOM_TOGGLE_PAUSE: u32 = 2;
pub const CUSTOM_TOGGLE_CONTROLS: u32 = 3;
/// a = bitmask of bodies with a slider.
pub const CUSTOM_BIND_SLIDERS: u32 = 4;

// ── Game event kinds to the host ─────────────────────────────────────

/// a = 1 when paused ("Resume"), 0 when running ("Pause").
pub const EVENT_PAUSE: f32 = 1.0;
/// a = 1 when the speed controls are shown.
pub const EVENT_CONTROLS: f32 = 2.0;
/// a = body index, b = speed percent.
pub const EVENT_SPEED: f32 = 3.0;
/// a = bodies placed, b = total.
pub const EVENT_LOADING: f32 = 4.0;

/// Pointer press being tracked between down and up.
#[derive(Debug, Clone, Copy)]
struct Press {
    start: Vec2,
    last: Vec2,
    dragging: bool,
}

/// Last state sent to the host, so events go out only on change.
#[derive(Debug, Clone, Default)]
struct Reported {
    paused: Option<bool>,
    controls_visible: Option<bool>,
    percents: Vec<Option<f32>>,
    placed: Option<usize>,
}

pub struct SolarSystem {
    bodies: Vec<Body>,
    composer: SceneComposer,
    sim: SimulationState,
    focus: FocusController,
    clock: Clock,
    press: Option<Press>,
    /// Most recently focused body.
    selected: Option<usize>,
    reported: Reported,
}

impl SolarSystem {
    pub fn new() -> Self {
        let bodies: Vec<Body> = REGISTRY.iter().copied().map(Body::new).collect();
        Self {
            composer: SceneComposer::new(&bodies),
            sim: SimulationState::new(&REGISTRY),
            focus: FocusController::default(),
            clock: Clock::new(),
            press: None,
            selected: None,
            reported: Reported {
                percents: vec![None; bodies.len()],
                ..Reported::default()
            },
            bodies,
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn simulation(&self) -> &SimulationState {
        &self.sim
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    fn handle_custom(&mut self, kind: u32, a: f32, b: f32) {
        match kind {
            CUSTOM_SET_SPEED => match body_index(a) {
                Some(index) => {
                    if !self.sim.set_speed_percent(index, b) {
                        log::warn!("Ignoring speed {b} for body {index}");
                    }
                }
                None => log::warn!("Speed change for unknown body {a}"),
            },
            CUSTOM_TOGGLE_PAUSE => {
                self.sim.toggle_pause();
            }
            CUSTOM_TOGGLE_CONTROLS => {
                self.sim.toggle_controls();
            }
            CUSTOM_BIND_SLIDERS => {
                if a.is_finite() && a >= 0.0 {
                    self.sim.bind_sliders(a as u32, &REGISTRY);
                }
            }
            _ => log::debug!("Unhandled custom event {kind}"),
        }
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::Custom { kind, a, b, .. } => self.handle_custom(kind, a, b),
                InputEvent::PointerDown { x, y } => {
                    let at = Vec2::new(x, y);
                    self.press = Some(Press {
                        start: at,
                        last: at,
                        dragging: false,
                    });
                }
                InputEvent::PointerMove { x, y } => {
                    let Some(press) = self.press.as_mut() else {
                        continue;
                    };
                    let at = Vec2::new(x, y);
                    if !press.dragging && at.distance(press.start) > DRAG_THRESHOLD {
                        press.dragging = true;
                    }
                    if press.dragging {
                        let delta = at - press.last;
                        ctx.controls.rotate(delta.x, delta.y, ctx.camera.viewport().y);
                    }
                    press.last = at;
                }
                InputEvent::PointerUp { x, y } => {
                    if let Some(press) = self.press.take() {
                        if !press.dragging {
                            let hit = self.focus.on_pointer_click(
                                Vec2::new(x, y),
                                &self.bodies,
                                &self.sim,
                                ctx,
                            );
                            if hit.is_some() {
                                self.selected = hit;
                            }
                        }
                    }
                }
                InputEvent::Wheel { delta } => ctx.controls.zoom(delta),
            }
        }
    }

    fn emit_changes(&mut self, ctx: &mut EngineContext) {
        if self.reported.paused != Some(self.sim.paused) {
            self.reported.paused = Some(self.sim.paused);
            ctx.emit_event(GameEvent::new(EVENT_PAUSE, flag(self.sim.paused), 0.0, 0.0));
        }
        if self.reported.controls_visible != Some(self.sim.controls_visible) {
            self.reported.controls_visible = Some(self.sim.controls_visible);
            ctx.emit_event(GameEvent::new(
                EVENT_CONTROLS,
                flag(self.sim.controls_visible),
                0.0,
                0.0,
            ));
        }
        for (index, last) in self.reported.percents.iter_mut().enumerate() {
            let current = self.sim.speed_percent(index);
            if *last != current {
                *last = current;
                if let Some(percent) = current {
                    ctx.emit_event(GameEvent::new(EVENT_SPEED, index as f32, percent, 0.0));
                }
            }
        }
        let placed = self.composer.placed();
        if self.reported.placed != Some(placed) {
            self.reported.placed = Some(placed);
            ctx.emit_event(GameEvent::new(
                EVENT_LOADING,
                placed as f32,
                self.composer.total() as f32,
                0.0,
            ));
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn flag(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}

fn body_index(raw: f32) -> Option<usize> {
    if raw.is_finite() && raw >= 0.0 && (raw as usize) < BodyKind::COUNT {
        Some(raw as usize)
    } else {
        None
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_instances: 64,
            max_points: STAR_COUNT,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        ctx.camera.fov_y = CAMERA_FOV;
        ctx.camera.near = CAMERA_NEAR;
        ctx.camera.far = CAMERA_FAR;
        ctx.camera.position = CAMERA_START;
        ctx.camera.look_at(Vec3::ZERO);

        ctx.controls = OrbitControls::new()
            .with_damping(CONTROLS_DAMPING)
            .with_distance_range(CONTROLS_MIN_DISTANCE, CONTROLS_MAX_DISTANCE);
        ctx.controls.set_target(Vec3::ZERO);

        ctx.lights.set_ambient(Color::from_hex(AMBIENT_COLOR), AMBIENT_INTENSITY);
        ctx.lights.add(PointLight::new(
            Vec3::ZERO,
            Color::WHITE,
            SUN_LIGHT_INTENSITY,
            SUN_LIGHT_RANGE,
        ));

        ctx.backdrop.scatter(STAR_COUNT, STAR_EXTENT, &mut Rng::new(STAR_SEED));

        log::info!("Composing {} bodies", self.bodies.len());
        self.composer.drive(&mut self.bodies, ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        // The clock keeps running while paused, so resuming jumps ahead.
        let elapsed = self.clock.advance(ctx.frame_dt);

        self.handle_input(ctx, input);

        if !self.composer.is_done() && self.composer.drive(&mut self.bodies, ctx) {
            log::info!("All {} bodies composed", self.composer.total());
        }

        motion::update(elapsed, &self.bodies, &self.sim, &mut ctx.scene);
        self.emit_changes(ctx);
    }
}
