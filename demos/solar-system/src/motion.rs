//! Per-frame orbital motion and the simulation state it reads.
//!
//! Positions are a pure function of elapsed time and current speed: the
//! angle is recomputed from scratch every frame, so changing a speed jumps
//! the body to a new phase. Self-rotation, on the other hand, accumulates
//! a fixed step per update call and so depends on the frame rate.

use glam::Vec3;
use orrery_engine::Scene;

use crate::bodies::{Body, BodyDesc};

/// Self-rotation per update call, as a fraction of orbital speed.
pub const SELF_ROTATION_FACTOR: f32 = 0.01;
/// Spin per update call of the central body. Its speed is ignored.
pub const CENTRAL_SPIN: f32 = 0.002;

/// Point on a circular orbit in the XZ plane.
pub fn orbital_position(radius: f32, speed: f32, offset_radians: f32, elapsed: f64) -> Vec3 {
    let angle = elapsed * speed as f64 + offset_radians as f64;
    let radius = radius as f64;
    Vec3::new((radius * angle.cos()) as f32, 0.0, (radius * angle.sin()) as f32)
}

/// Everything the host's controls can change.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub paused: bool,
    pub controls_visible: bool,
    speeds: Vec<f32>,
    base_rates: Vec<f32>,
}

impl SimulationState {
    /// Speeds start at each body's registry speed.
    pub fn new(descs: &[BodyDesc]) -> Self {
        Self {
            paused: false,
            controls_visible: false,
            speeds: descs.iter().map(|d| d.speed).collect(),
            base_rates: descs.iter().map(|d| d.style().base_rate).collect(),
        }
    }

    pub fn speed(&self, body: usize) -> Option<f32> {
        self.speeds.get(body).copied()
    }

    pub fn set_speed(&mut self, body: usize, speed: f32) -> bool {
        match self.speeds.get_mut(body) {
            Some(slot) if speed.is_finite() => {
                *slot = speed;
                true
            }
            _ => false,
        }
    }

    /// Slider input: `percent` of the body's base rate, clamped to [0, 100].
    pub fn set_speed_percent(&mut self, body: usize, percent: f32) -> bool {
        if !percent.is_finite() {
            return false;
        }
        let Some(base) = self.base_rates.get(body).copied() else {
            return false;
        };
        self.set_speed(body, base * percent.clamp(0.0, 100.0) / 100.0)
    }

    /// Current speed as a percentage of the base rate.
    pub fn speed_percent(&self, body: usize) -> Option<f32> {
        let base = *self.base_rates.get(body)?;
        if base == 0.0 {
            return None;
        }
        Some(self.speed(body)? / base * 100.0)
    }

    /// A slider now controls this body: start it at 100%.
    pub fn rebase(&mut self, body: usize) -> bool {
        match self.base_rates.get(body).copied() {
            Some(base) => self.set_speed(body, base),
            None => false,
        }
    }

    /// The host reports which bodies have a slider (bit `i` = body `i`).
    /// Bound bodies are rebased; missing sliders are logged.
    pub fn bind_sliders(&mut self, mask: u32, descs: &[BodyDesc]) {
        for (i, desc) in descs.iter().enumerate() {
            if i < 32 && mask & (1 << i) != 0 {
                self.rebase(i);
            } else {
                log::warn!("Slider for {} not found.", desc.name);
            }
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn toggle_controls(&mut self) -> bool {
        self.controls_visible = !self.controls_visible;
        self.controls_visible
    }
}

/// Move and spin every composed body for `elapsed` seconds since start.
/// Does nothing while paused.
pub fn update(elapsed: f64, bodies: &[Body], sim: &SimulationState, scene: &mut Scene) {
    if sim.paused {
        return;
    }
    for (i, body) in bodies.iter().enumerate() {
        let Some(entity) = body.entity.and_then(|id| scene.get_mut(id)) else {
            continue;
        };
        let speed = sim.speed(i).unwrap_or(body.desc.speed);
        if body.desc.is_central() {
            entity.rotation.y += CENTRAL_SPIN;
        } else {
            entity.pos = orbital_position(body.desc.radius, speed, body.desc.offset_radians(), elapsed);
            entity.rotation.y += speed * SELF_ROTATION_FACTOR;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    use approx::assert_relative_eq;
    use orrery_engine::{Color, Entity, EntityId, MeshComponent, Visual};

    use crate::bodies::{BodyKind, REGISTRY};

    fn composed() -> (Vec<Body>, Scene) {
        let mut scene = Scene::new();
        let bodies = REGISTRY
            .iter()
            .enumerate()
            .map(|(i, desc)| {
                let id = scene.spawn(
                    Entity::new(EntityId(i as u32 + 1))
                        .with_visual(Visual::Mesh(MeshComponent::sphere(3.0, Color::WHITE))),
                );
                Body {
                    desc: *desc,
                    entity: Some(id),
                    orbit: None,
                }
            })
            .collect();
        (bodies, scene)
    }

    fn snapshot(bodies: &[Body], scene: &Scene) -> Vec<(Vec3, Vec3)> {
        bodies
            .iter()
            .map(|b| {
                let e = scene.get(b.entity.unwrap()).unwrap();
                (e.pos, e.rotation)
            })
            .collect()
    }

    #[test]
    fn orbit_radius_is_preserved_for_all_times() {
        for &t in &[0.0, 0.5, 1.0, 17.3, 1000.0, 86_400.0] {
            for desc in REGISTRY.iter().filter(|d| !d.is_central()) {
                let p = orbital_position(desc.radius, desc.speed, desc.offset_radians(), t);
                assert_eq!(p.y, 0.0);
                assert_relative_eq!(p.length(), desc.radius, max_relative = 1e-5);
                let angle = t * desc.speed as f64 + desc.offset_radians() as f64;
                assert_relative_eq!(p.x, (desc.radius as f64 * angle.cos()) as f32, epsilon = 1e-3);
                assert_relative_eq!(p.z, (desc.radius as f64 * angle.sin()) as f32, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn earth_starts_on_the_z_axis() {
        let p = orbital_position(110.0, 1.0, 90f32.to_radians(), 0.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(p.z, 110.0, epsilon = 1e-4);
    }

    #[test]
    fn half_speed_slider_halves_the_angle_rate() {
        let mut sim = SimulationState::new(&REGISTRY);
        let mars = BodyKind::Mars.index();
        assert!(sim.set_speed_percent(mars, 50.0));
        assert_relative_eq!(sim.speed(mars).unwrap(), 0.4, epsilon = 1e-6);

        let desc = &REGISTRY[mars];
        let p = orbital_position(desc.radius, 0.4, desc.offset_radians(), PI);
        let expected = desc.offset_radians() as f64 + 0.4 * PI;
        assert_relative_eq!(p.x, (desc.radius as f64 * expected.cos()) as f32, epsilon = 1e-3);
        assert_relative_eq!(p.z, (desc.radius as f64 * expected.sin()) as f32, epsilon = 1e-3);
    }

    #[test]
    fn same_elapsed_same_position_but_more_rotation() {
        let (bodies, mut scene) = composed();
        let sim = SimulationState::new(&REGISTRY);
        update(2.5, &bodies, &sim, &mut scene);
        let first = snapshot(&bodies, &scene);
        update(2.5, &bodies, &sim, &mut scene);
        let second = snapshot(&bodies, &scene);

        for ((p1, r1), (p2, r2)) in first.iter().zip(&second) {
            assert_eq!(p1, p2);
            assert!(r2.y > r1.y);
        }
    }

    #[test]
    fn rotation_steps_follow_speed_and_central_spin() {
        let (bodies, mut scene) = composed();
        let sim = SimulationState::new(&REGISTRY);
        update(0.0, &bodies, &sim, &mut scene);
        let after = snapshot(&bodies, &scene);

        assert_relative_eq!(after[0].1.y, CENTRAL_SPIN);
        assert_eq!(after[0].0, Vec3::ZERO, "the central body never moves");
        let mercury = BodyKind::Mercury.index();
        assert_relative_eq!(after[mercury].1.y, 4.1 * SELF_ROTATION_FACTOR, epsilon = 1e-6);
    }

    #[test]
    fn paused_update_changes_nothing() {
        let (bodies, mut scene) = composed();
        let mut sim = SimulationState::new(&REGISTRY);
        update(1.0, &bodies, &sim, &mut scene);
        let before = snapshot(&bodies, &scene);

        sim.toggle_pause();
        update(9.0, &bodies, &sim, &mut scene);
        assert_eq!(snapshot(&bodies, &scene), before);
    }

    #[test]
    fn uncomposed_bodies_are_skipped() {
        let (mut bodies, mut scene) = composed();
        bodies[3].entity = None;
        let sim = SimulationState::new(&REGISTRY);
        update(1.0, &bodies, &sim, &mut scene);
        assert_eq!(scene.get(EntityId(4)).unwrap().rotation, Vec3::ZERO);
    }

    #[test]
    fn percent_is_clamped_and_reported() {
        let mut sim = SimulationState::new(&REGISTRY);
        let venus = BodyKind::Venus.index();
        sim.set_speed_percent(venus, 250.0);
        assert_relative_eq!(sim.speed_percent(venus).unwrap(), 100.0, epsilon = 1e-4);
        sim.set_speed_percent(venus, -3.0);
        assert_eq!(sim.speed(venus), Some(0.0));
        assert!(!sim.set_speed_percent(venus, f32::NAN));
        assert!(!sim.set_speed_percent(99, 50.0));
    }

    #[test]
    fn binding_sliders_rebases_speeds() {
        let mut sim = SimulationState::new(&REGISTRY);
        let venus = BodyKind::Venus.index();
        let saturn = BodyKind::Saturn.index();
        assert_eq!(sim.speed(venus), Some(1.0));

        sim.bind_sliders(1 << venus, &REGISTRY);
        assert_eq!(sim.speed(venus), Some(1.6));
        assert_eq!(sim.speed(saturn), Some(1.0), "no slider, registry speed kept");
    }

    #[test]
    fn toggles_flip() {
        let mut sim = SimulationState::new(&REGISTRY);
        assert!(sim.toggle_pause());
        assert!(!sim.toggle_pause());
        assert!(sim.toggle_controls());
    }
}
