use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::camera::Camera3D;

/// Keeps `phi` off the poles so the view matrix never degenerates.
const POLE_EPSILON: f32 = 1e-6;

/// Zoom factor per wheel notch.
const ZOOM_STEP: f32 = 0.95;

/// Damped orbit controls around a pivot point.
///
/// Drags and wheel notches accumulate into spherical deltas. [`OrbitControls::update`]
/// applies a `damping` fraction of the outstanding delta each frame and decays
/// the rest, so motion eases out after the pointer is released.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Orbit pivot; the camera always looks at it.
    pub target: Vec3,
    /// Fraction of the outstanding rotation applied per update (0, 1].
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub enabled: bool,
    theta_delta: f32,
    phi_delta: f32,
    scale: f32,
}

impl OrbitControls {
    pub fn new() -> Self {
        Self {
            target: Vec3::ZERO,
            damping: 0.05,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            enabled: true,
            theta_delta: 0.0,
            phi_delta: 0.0,
            scale: 1.0,
        }
    }

    pub fn with_distance_range(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max.max(min);
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping.clamp(f32::EPSILON, 1.0);
        self
    }

    /// Move the pivot. The camera turns toward it on the next update.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Pointer drag of `(dx, dy)` pixels. A drag across the full viewport
    /// height is one full turn.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if !self.enabled || viewport_height <= 0.0 {
            return;
        }
        self.theta_delta -= TAU * dx / viewport_height * self.rotate_speed;
        self.phi_delta -= TAU * dy / viewport_height * self.rotate_speed;
    }

    /// Wheel input. Negative deltas move closer.
    pub fn zoom(&mut self, delta: f32) {
        if !self.enabled || delta == 0.0 {
            return;
        }
        let step = ZOOM_STEP.powf(self.zoom_speed);
        if delta < 0.0 {
            self.scale *= step;
        } else {
            self.scale /= step;
        }
    }

    /// True while damped rotation is still being applied.
    pub fn is_settling(&self) -> bool {
        self.theta_delta.abs() > 1e-5 || self.phi_delta.abs() > 1e-5
    }

    /// Apply one frame of orbiting to `camera`.
    pub fn update(&mut self, camera: &mut Camera3D) {
        let mut offset = camera.position - self.target;
        if offset.length_squared() < f32::EPSILON {
            offset = Vec3::Z * self.min_distance.max(1.0);
        }
        let radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta += self.theta_delta * self.damping;
        phi = (phi + self.phi_delta * self.damping).clamp(POLE_EPSILON, PI - POLE_EPSILON);
        let radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let offset = Vec3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        camera.position = self.target + offset;
        camera.look_at(self.target);

        self.theta_delta *= 1.0 - self.damping;
        self.phi_delta *= 1.0 - self.damping;
        self.scale = 1.0;
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new()
    }
}
