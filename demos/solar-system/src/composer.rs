//! Startup composition: resolve each body in registry order and place it.

use std::collections::VecDeque;
use std::f32::consts::FRAC_PI_2;
use std::task::Poll;

use glam::Vec3;
use orrery_engine::{Color, EngineContext, Entity, MeshComponent, Visual};

use crate::bodies::{Body, OrbitStyle};
use crate::motion::orbital_position;
use crate::resolver::{Renderable, ResolveTask};

pub const ORBIT_COLOR: u32 = 0x888888;
const PLAIN_HALF_WIDTH: f32 = 0.2;
const HIGHLIGHT_HALF_WIDTH: f32 = 0.5;
const HIGHLIGHT_OPACITY: f32 = 0.5;
const DASH: f32 = 2.0;
const GAP: f32 = 1.0;

/// Orbit path mesh for a body at `radius`, and the rotation that lays it in
/// the XZ plane.
pub fn orbit_indicator(radius: f32, style: OrbitStyle) -> (MeshComponent, Vec3) {
    let color = Color::from_hex(ORBIT_COLOR);
    match style {
        OrbitStyle::Plain => (
            MeshComponent::ring(radius - PLAIN_HALF_WIDTH, radius + PLAIN_HALF_WIDTH, color)
                .double_sided(),
            Vec3::new(FRAC_PI_2, 0.0, 0.0),
        ),
        OrbitStyle::Highlighted => (
            MeshComponent::ring(radius - HIGHLIGHT_HALF_WIDTH, radius + HIGHLIGHT_HALF_WIDTH, color)
                .double_sided()
                .with_opacity(HIGHLIGHT_OPACITY),
            Vec3::new(FRAC_PI_2, 0.0, 0.0),
        ),
        // Already built in the XZ plane.
        OrbitStyle::Dashed => (
            MeshComponent::dashed_circle(radius, DASH, GAP, color).double_sided(),
            Vec3::ZERO,
        ),
    }
}

/// Drives resolution one body at a time. The next load is issued only after
/// the previous body has been placed, so logs come out in registry order.
pub struct SceneComposer {
    queue: VecDeque<(usize, ResolveTask)>,
    total: usize,
}

impl SceneComposer {
    pub fn new(bodies: &[Body]) -> Self {
        let queue: VecDeque<_> = bodies
            .iter()
            .enumerate()
            .map(|(i, body)| (i, ResolveTask::new(body.desc.name, body.desc.path)))
            .collect();
        Self {
            total: queue.len(),
            queue,
        }
    }

    pub fn is_done(&self) -> bool {
        self.queue.is_empty()
    }

    /// Bodies placed so far.
    pub fn placed(&self) -> usize {
        self.total - self.queue.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Advance as far as possible without waiting on the host.
    /// Returns true once every body has been handled.
    pub fn drive(&mut self, bodies: &mut [Body], ctx: &mut EngineContext) -> bool {
        while let Some((index, task)) = self.queue.front_mut() {
            let index = *index;
            match task.poll(&mut ctx.assets) {
                Poll::Pending => return false,
                Poll::Ready(renderable) => {
                    self.queue.pop_front();
                    match bodies.get_mut(index) {
                        Some(body) => place(body, Some(renderable), ctx),
                        None => log::error!("No body at index {index}; dropping its visual"),
                    }
                }
            }
        }
        true
    }
}

/// Put a resolved body into the scene at its initial position, with its
/// orbit indicator. A missing visual skips the body.
pub fn place(body: &mut Body, renderable: Option<Renderable>, ctx: &mut EngineContext) {
    let name = body.desc.name;
    let Some(Renderable { visual, scale }) = renderable else {
        log::error!("{name} object is null, not added to scene");
        return;
    };
    if body.entity.is_some() {
        log::error!("{name} already has a visual; keeping the first one");
        return;
    }

    let pos = if body.desc.is_central() {
        Vec3::ZERO
    } else {
        orbital_position(body.desc.radius, 0.0, body.desc.offset_radians(), 0.0)
    };
    let id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(id)
            .with_tag(name)
            .with_pos(pos)
            .with_uniform_scale(scale)
            .with_visual(visual),
    );
    body.entity = Some(id);
    log::info!("{name} added to scene");

    if !body.desc.is_central() {
        let (mesh, rotation) = orbit_indicator(body.desc.radius, body.desc.style().orbit);
        let orbit_id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(orbit_id)
                .with_tag(format!("{name} orbit"))
                .with_rotation(rotation)
                .with_visual(Visual::Mesh(mesh)),
        );
        body.orbit = Some(orbit_id);
        log::info!("{name} orbit added at radius {}", body.desc.radius);
    }

    log::debug!(
        "{name} initial position: x={:.2}, y={:.2}, z={:.2}",
        pos.x,
        pos.y,
        pos.z
    );
}
